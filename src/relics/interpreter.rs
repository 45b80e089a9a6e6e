//! Relic effect interpreter.
//!
//! `apply_effect` is the only place relic behavior lives. It receives the
//! combat through an explicit `TriggerContext` of mutable borrows and never
//! looks anything up on its own.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::CardType;
use crate::core::{Combatant, PlayerProgress};
use crate::effects::{absorb, apply_status, StatusKind, Target};
use crate::zones::DeckEngine;

use super::condition::{ConditionEvaluator, TriggerExtra};
use super::relic::{Relic, RelicEffectKind, RelicId};

/// Everything a relic may touch when it fires.
pub struct TriggerContext<'a> {
    pub player: &'a mut Combatant,
    pub enemy: &'a mut Combatant,
    pub deck: &'a mut DeckEngine,
    pub progress: &'a mut PlayerProgress,
    pub turn: u32,
    pub extra: TriggerExtra,
}

impl TriggerContext<'_> {
    fn side(&mut self, target: Target) -> &mut Combatant {
        match target {
            Target::Player => &mut *self.player,
            Target::Enemy => &mut *self.enemy,
        }
    }
}

/// Per-combat relic bookkeeping, cleared by `reset_combat_state`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelicCombatState {
    /// Set by a `NextCardFree` relic, consumed by the next card played.
    pub next_card_free: bool,
    /// Activations per relic this combat.
    pub activations: FxHashMap<RelicId, u32>,
}

impl RelicCombatState {
    #[must_use]
    pub fn activations_of(&self, id: &RelicId) -> u32 {
        self.activations.get(id).copied().unwrap_or(0)
    }
}

/// What a relic did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelicOutcome {
    Healed { target: Target, amount: i32 },
    ArmorGained { target: Target, amount: i32 },
    EnergyGained { amount: i32 },
    MaxEnergyGained { amount: i32 },
    CardsDrawn { count: usize },
    Damaged { target: Target, hp_damage: i32 },
    NextCardFree,
    GoldGained { amount: i32 },
    StatusApplied { target: Target, status: StatusKind },
}

impl std::fmt::Display for RelicOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelicOutcome::Healed { target, amount } => write!(f, "{target} heals {amount}"),
            RelicOutcome::ArmorGained { target, amount } => write!(f, "{target} gains {amount} armor"),
            RelicOutcome::EnergyGained { amount } => write!(f, "gain {amount} energy"),
            RelicOutcome::MaxEnergyGained { amount } => write!(f, "gain {amount} max energy"),
            RelicOutcome::CardsDrawn { count } => write!(f, "draw {count} cards"),
            RelicOutcome::Damaged { target, hp_damage } => write!(f, "{target} takes {hp_damage} damage"),
            RelicOutcome::NextCardFree => f.write_str("next card costs 0"),
            RelicOutcome::GoldGained { amount } => write!(f, "gain {amount} gold"),
            RelicOutcome::StatusApplied { target, status } => write!(f, "{target} gains {status}"),
        }
    }
}

/// A relic that fired, and what it did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelicActivation {
    pub relic: RelicId,
    pub outcome: RelicOutcome,
}

/// Evaluate one relic against the context.
///
/// Returns `None` when the condition is unmet or the relic has used up its
/// activations for this combat.
pub fn apply_effect(
    relic: &Relic,
    ctx: &mut TriggerContext,
    state: &mut RelicCombatState,
) -> Option<RelicActivation> {
    let effect = &relic.effect;

    if !ConditionEvaluator::evaluate(&effect.condition, ctx.turn, &ctx.extra) {
        return None;
    }
    if let Some(limit) = effect.uses_per_combat {
        if state.activations_of(&relic.id) >= limit {
            return None;
        }
    }

    let target = effect.resolved_target();
    let outcome = match &effect.kind {
        RelicEffectKind::Heal { value } => {
            let amount = ctx.side(target).heal(*value);
            RelicOutcome::Healed { target, amount }
        }
        RelicEffectKind::Armor { value } => {
            ctx.side(target).armor += value;
            RelicOutcome::ArmorGained { target, amount: *value }
        }
        RelicEffectKind::Energy { value } => {
            ctx.player.energy += value;
            RelicOutcome::EnergyGained { amount: *value }
        }
        RelicEffectKind::MaxEnergy { value } => {
            ctx.player.max_energy += value;
            ctx.player.energy += value;
            RelicOutcome::MaxEnergyGained { amount: *value }
        }
        RelicEffectKind::Draw { count } => {
            let count = ctx.deck.draw_cards(*count).map_or(0, |drawn| drawn.len());
            RelicOutcome::CardsDrawn { count }
        }
        RelicEffectKind::Damage { value } => {
            let defender = ctx.side(target);
            let resolution = absorb(*value, defender);
            resolution.apply(defender);
            RelicOutcome::Damaged { target, hp_damage: resolution.hp_damage }
        }
        RelicEffectKind::EnergyOnAttack { value } => {
            if ctx.extra.card_type != Some(CardType::Attack) {
                return None;
            }
            ctx.player.energy += value;
            RelicOutcome::EnergyGained { amount: *value }
        }
        RelicEffectKind::NextCardFree => {
            state.next_card_free = true;
            RelicOutcome::NextCardFree
        }
        RelicEffectKind::Gold { value } => {
            ctx.progress.add_gold(*value);
            RelicOutcome::GoldGained { amount: *value }
        }
        RelicEffectKind::ApplyStatus { status, duration, value } => {
            apply_status(ctx.side(target), *status, *duration, *value);
            RelicOutcome::StatusApplied { target, status: *status }
        }
    };

    *state.activations.entry(relic.id.clone()).or_insert(0) += 1;
    debug!(relic = %relic.id, timing = %effect.timing, %outcome, "relic activated");

    Some(RelicActivation {
        relic: relic.id.clone(),
        outcome,
    })
}
