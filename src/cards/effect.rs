//! Card effect descriptors.
//!
//! Each variant carries only the fields it needs. Catalog JSON uses an
//! internal `"type"` tag, so an unknown tag fails at load time rather than
//! surfacing mid-combat.

use serde::{Deserialize, Serialize};

use crate::effects::StatusKind;

/// What a card does when played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardEffect {
    /// Single hit against the opposing target.
    Damage { value: i32 },

    /// Several hits, each resolved separately.
    DamageMulti { value: i32, hits: u32 },

    /// Block for this turn, boosted by dexterity.
    Block { value: i32 },

    /// Permanent armor.
    Armor { value: i32 },

    Draw { count: usize },

    Energy { value: i32 },

    /// Apply vulnerable to the target.
    Vulnerable { duration: u32 },

    DrawEnergy { draw: usize, energy: i32 },

    /// Restore hp, capped at max hp.
    Heal { value: i32 },

    /// Apply an arbitrary status to the chosen target.
    ApplyStatus {
        status: StatusKind,
        duration: u32,
        value: i32,
    },

    /// Gain dexterity.
    Dexterity { value: i32 },
}

impl CardEffect {
    /// Whether this effect deals direct damage.
    #[must_use]
    pub fn is_damage(&self) -> bool {
        matches!(self, Self::Damage { .. } | Self::DamageMulti { .. })
    }

    /// The primary numeric magnitude of the effect.
    #[must_use]
    pub fn magnitude(&self) -> i32 {
        match self {
            Self::Damage { value }
            | Self::DamageMulti { value, .. }
            | Self::Block { value }
            | Self::Armor { value }
            | Self::Energy { value }
            | Self::Heal { value }
            | Self::ApplyStatus { value, .. }
            | Self::Dexterity { value } => *value,
            Self::Draw { count } => *count as i32,
            Self::Vulnerable { duration } => *duration as i32,
            Self::DrawEnergy { draw, .. } => *draw as i32,
        }
    }

    /// Grow the primary magnitude by `amount`.
    pub fn add_magnitude(&mut self, amount: i32) {
        match self {
            Self::Damage { value }
            | Self::DamageMulti { value, .. }
            | Self::Block { value }
            | Self::Armor { value }
            | Self::Energy { value }
            | Self::Heal { value }
            | Self::ApplyStatus { value, .. }
            | Self::Dexterity { value } => *value += amount,
            Self::Draw { count } => *count = count.saturating_add_signed(amount as isize),
            Self::Vulnerable { duration } => *duration = duration.saturating_add_signed(amount),
            Self::DrawEnergy { draw, .. } => *draw = draw.saturating_add_signed(amount as isize),
        }
    }
}
