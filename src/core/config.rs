//! Combat configuration.
//!
//! Every tunable constant of the rules lives in `CombatConfig`. Callers
//! may load it from JSON; missing fields fall back to the defaults, which
//! reproduce the standard ruleset.

use serde::{Deserialize, Serialize};

use super::error::CatalogError;

/// Card-type composition of a starter deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarterComposition {
    pub attack: usize,
    pub defense: usize,
    pub skill: usize,
}

impl StarterComposition {
    /// Total number of cards in the starter deck.
    #[must_use]
    pub fn total(&self) -> usize {
        self.attack + self.defense + self.skill
    }
}

impl Default for StarterComposition {
    fn default() -> Self {
        Self {
            attack: 4,
            defense: 3,
            skill: 3,
        }
    }
}

/// Rules constants for a combat session.
///
/// ## Example
///
/// ```
/// use rust_spire::core::CombatConfig;
///
/// let config = CombatConfig::from_json(r#"{ "turn_cap": 20 }"#).unwrap();
/// assert_eq!(config.turn_cap, 20);
/// assert_eq!(config.max_hand_size, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Hand capacity; draws beyond it are silently skipped.
    pub max_hand_size: usize,

    /// Master deck capacity.
    pub max_deck_size: usize,

    /// Smallest deck the growth operations may shrink to.
    pub min_deck_size: usize,

    /// Cards drawn at the start of every player turn.
    pub cards_per_turn: usize,

    /// Player hp at combat start.
    pub player_max_hp: i32,

    /// Player energy per turn.
    pub player_max_energy: i32,

    /// Completed rounds after which combat ends in a draw.
    pub turn_cap: u32,

    /// Bonus applied to an attack played right after another attack.
    pub combo_bonus_percent: i32,

    pub starter: StarterComposition,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            max_hand_size: 10,
            max_deck_size: 20,
            min_deck_size: 5,
            cards_per_turn: 5,
            player_max_hp: 100,
            player_max_energy: 3,
            turn_cap: 50,
            combo_bonus_percent: 10,
            starter: StarterComposition::default(),
        }
    }
}

impl CombatConfig {
    /// Parse a configuration from JSON. Absent keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }
}
