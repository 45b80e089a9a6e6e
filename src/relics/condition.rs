//! Relic conditions.
//!
//! A condition gates whether a relic's effect fires. An unmet condition
//! is a silent no-op.

use serde::{Deserialize, Serialize};

use crate::cards::CardType;

/// A condition checked against the firing context.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelicCondition {
    /// No filter.
    #[default]
    Always,

    /// The card just played has this type.
    CardType(CardType),

    /// Only on turn 1.
    FirstTurn,

    /// Only on the listed turns.
    Turns(Vec<u32>),

    /// The damage carried by the event is at least this much.
    DamageAtLeast(i32),

    /// All conditions must hold.
    All(Vec<RelicCondition>),
}

/// Event data a relic sees besides the combatants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TriggerExtra {
    /// Type of the card being played, for `CardPlay`.
    pub card_type: Option<CardType>,
    /// Damage dealt by the triggering action.
    pub damage: i32,
}

impl TriggerExtra {
    #[must_use]
    pub fn card_play(card_type: CardType, damage: i32) -> Self {
        Self {
            card_type: Some(card_type),
            damage,
        }
    }
}

/// Evaluates conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    #[must_use]
    pub fn evaluate(condition: &RelicCondition, turn: u32, extra: &TriggerExtra) -> bool {
        match condition {
            RelicCondition::Always => true,
            RelicCondition::CardType(card_type) => extra.card_type == Some(*card_type),
            RelicCondition::FirstTurn => turn == 1,
            RelicCondition::Turns(turns) => turns.contains(&turn),
            RelicCondition::DamageAtLeast(min) => extra.damage >= *min,
            RelicCondition::All(conditions) => {
                conditions.iter().all(|c| Self::evaluate(c, turn, extra))
            }
        }
    }
}
