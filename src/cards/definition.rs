//! Card definitions.
//!
//! A `Card` is a small owned value. The catalog holds the immutable
//! templates; every zone slot holds its own copy, so upgrading a card in
//! the master deck replaces that copy and never touches the template or
//! any other zone.

use serde::{Deserialize, Serialize};

use super::effect::CardEffect;
use crate::core::DeckError;

/// Damage added to an attack by an upgrade.
pub const UPGRADE_DAMAGE_BONUS: i32 = 3;

/// Magnitude added to a non-attack effect by an upgrade.
pub const UPGRADE_MAGNITUDE_BONUS: i32 = 3;

/// Identifier of a card template (e.g. `"strike"`).
///
/// Several copies of the same template share an id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Card type. Drives effect dispatch and archetype weighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Attack,
    Defense,
    Skill,
    Status,
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardType::Attack => "attack",
            CardType::Defense => "defense",
            CardType::Skill => "skill",
            CardType::Status => "status",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Basic,
    #[default]
    Common,
    Uncommon,
    Rare,
}

/// A card value.
///
/// ## Example
///
/// ```
/// use rust_spire::cards::{Card, CardEffect, CardType};
///
/// let mut strike = Card::new("strike", "Strike", CardType::Attack, 1, CardEffect::Damage { value: 6 });
/// strike.upgrade().unwrap();
///
/// assert_eq!(strike.name, "Strike +");
/// assert_eq!(strike.effect, CardEffect::Damage { value: 9 });
/// assert!(strike.upgrade().is_err());
/// ```
/// Highest energy cost a card may carry.
pub const MAX_CARD_COST: i32 = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,

    pub name: String,

    #[serde(rename = "type")]
    pub card_type: CardType,

    /// Energy cost, `0..=MAX_CARD_COST`.
    pub cost: i32,

    pub effect: CardEffect,

    #[serde(default)]
    pub rarity: Rarity,

    #[serde(default)]
    pub upgraded: bool,
}

impl Card {
    /// Create a common, non-upgraded card.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        card_type: CardType,
        cost: i32,
        effect: CardEffect,
    ) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            card_type,
            cost,
            effect,
            rarity: Rarity::Common,
            upgraded: false,
        }
    }

    /// Set the rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Apply the single upgrade this card may receive.
    ///
    /// Exactly one rule applies, in priority order: an attack gains damage;
    /// otherwise a card with cost above 0 gets cheaper; otherwise the
    /// effect's magnitude grows.
    pub fn upgrade(&mut self) -> Result<(), DeckError> {
        if self.upgraded {
            return Err(DeckError::CardAlreadyUpgraded);
        }

        if self.card_type == CardType::Attack && self.effect.is_damage() {
            self.effect.add_magnitude(UPGRADE_DAMAGE_BONUS);
        } else if self.cost > 0 {
            self.cost -= 1;
        } else {
            self.effect.add_magnitude(UPGRADE_MAGNITUDE_BONUS);
        }

        self.name.push_str(" +");
        self.upgraded = true;
        Ok(())
    }
}
