//! Typed combat log.
//!
//! Each entry pairs a turn number with a `CombatEvent`. `Display` renders
//! the human-readable line a UI shows. The log is an `im::Vector`, so
//! handing out a snapshot is a cheap clone.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::effects::{StatusKind, Target};
use crate::relics::{RelicId, RelicOutcome};

use super::intent::Intent;
use super::state::BattleOutcome;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    CombatStarted { enemy: String },
    TurnStarted,
    CardsDrawn { count: usize },
    CardPlayed { card: CardId, target: Target, cost: i32 },
    DamageDealt { target: Target, hp_damage: i32, blocked: i32, combo: bool },
    BlockGained { target: Target, amount: i32 },
    ArmorGained { target: Target, amount: i32 },
    Healed { target: Target, amount: i32 },
    StatusApplied { target: Target, status: StatusKind },
    StatusDamage { target: Target, amount: i32 },
    StatusExpired { target: Target, status: StatusKind },
    RelicActivated { relic: RelicId, outcome: RelicOutcome },
    IntentDeclared { intent: Intent },
    EnemyActed { intent: Intent },
    TurnEnded { discarded: usize },
    CombatEnded { outcome: BattleOutcome },
}

impl std::fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CombatEvent::CombatStarted { enemy } => write!(f, "Combat against {enemy} begins"),
            CombatEvent::TurnStarted => f.write_str("Player turn starts"),
            CombatEvent::CardsDrawn { count } => write!(f, "Drew {count} cards"),
            CombatEvent::CardPlayed { card, target, cost } => {
                write!(f, "Played {card} on {target} for {cost} energy")
            }
            CombatEvent::DamageDealt { target, hp_damage, blocked, combo } => {
                write!(f, "{target} takes {hp_damage} damage ({blocked} absorbed)")?;
                if *combo {
                    f.write_str(" [combo]")?;
                }
                Ok(())
            }
            CombatEvent::BlockGained { target, amount } => write!(f, "{target} gains {amount} block"),
            CombatEvent::ArmorGained { target, amount } => write!(f, "{target} gains {amount} armor"),
            CombatEvent::Healed { target, amount } => write!(f, "{target} heals {amount}"),
            CombatEvent::StatusApplied { target, status } => write!(f, "{target} is afflicted with {status}"),
            CombatEvent::StatusDamage { target, amount } => write!(f, "{target} loses {amount} hp to statuses"),
            CombatEvent::StatusExpired { target, status } => write!(f, "{status} on {target} wears off"),
            CombatEvent::RelicActivated { relic, outcome } => write!(f, "{relic}: {outcome}"),
            CombatEvent::IntentDeclared { intent } => write!(f, "Enemy intends to {intent}"),
            CombatEvent::EnemyActed { intent } => write!(f, "Enemy uses {intent}"),
            CombatEvent::TurnEnded { discarded } => write!(f, "Turn ends, {discarded} cards discarded"),
            CombatEvent::CombatEnded { outcome } => write!(f, "Combat ends in {outcome}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u32,
    pub event: CombatEvent,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[turn {}] {}", self.turn, self.event)
    }
}

/// Append-only list of combat events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombatLog {
    entries: Vector<LogEntry>,
}

impl CombatLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: u32, event: CombatEvent) {
        self.entries.push_back(LogEntry { turn, event });
    }

    #[must_use]
    pub fn entries(&self) -> &Vector<LogEntry> {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Rendered lines, oldest first.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let mut log = CombatLog::new();
        log.push(1, CombatEvent::CombatStarted { enemy: "Slime".into() });
        log.push(
            2,
            CombatEvent::DamageDealt { target: Target::Enemy, hp_damage: 6, blocked: 2, combo: true },
        );

        assert_eq!(
            log.lines(),
            vec![
                "[turn 1] Combat against Slime begins".to_string(),
                "[turn 2] enemy takes 6 damage (2 absorbed) [combo]".to_string(),
            ]
        );
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut log = CombatLog::new();
        log.push(1, CombatEvent::TurnStarted);
        let snapshot = log.entries().clone();
        log.push(1, CombatEvent::CardsDrawn { count: 5 });

        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
    }
}
