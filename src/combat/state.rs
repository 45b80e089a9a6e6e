//! Combat state snapshot types.

use serde::{Deserialize, Serialize};

use crate::core::Combatant;
use crate::effects::Target;

use super::intent::{EnemyConfig, Intent};

/// How a combat ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
    /// Turn cap reached with both sides alive.
    Draw,
}

impl std::fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BattleOutcome::Victory => "victory",
            BattleOutcome::Defeat => "defeat",
            BattleOutcome::Draw => "draw",
        };
        f.write_str(name)
    }
}

/// Where the turn state machine is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatPhase {
    #[default]
    NotStarted,
    PlayerTurn,
    EnemyTurn,
    Ended(BattleOutcome),
}

/// The enemy side of a combat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyState {
    pub config: EnemyConfig,
    pub fighter: Combatant,
    /// Declared next action.
    pub intent: Option<Intent>,
}

impl EnemyState {
    #[must_use]
    pub fn spawn(config: EnemyConfig) -> Self {
        let fighter = config.spawn();
        Self {
            config,
            fighter,
            intent: None,
        }
    }
}

/// Everything a UI needs to draw a combat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    /// Completed rounds plus one.
    pub turn: u32,
    pub phase: CombatPhase,
    pub player: Combatant,
    pub enemy: EnemyState,
}

impl CombatState {
    #[must_use]
    pub fn in_combat(&self) -> bool {
        matches!(self.phase, CombatPhase::PlayerTurn | CombatPhase::EnemyTurn)
    }

    /// Side whose turn it is, if the combat is running.
    #[must_use]
    pub fn current_turn(&self) -> Option<Target> {
        match self.phase {
            CombatPhase::PlayerTurn => Some(Target::Player),
            CombatPhase::EnemyTurn => Some(Target::Enemy),
            CombatPhase::NotStarted | CombatPhase::Ended(_) => None,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            CombatPhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    #[must_use]
    pub fn fighter(&self, side: Target) -> &Combatant {
        match side {
            Target::Player => &self.player,
            Target::Enemy => &self.enemy.fighter,
        }
    }
}
