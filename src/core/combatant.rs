//! Combatant record shared by the player and enemies.
//!
//! The status engine, damage resolution, card effects, and relic effects
//! all operate on this shape and nothing else.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardType;
use crate::effects::{StatusEffect, StatusKind};

/// A fighter in combat.
///
/// `block` is cleared every turn; `armor` persists and is only eroded by
/// damage that gets through block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub hp: i32,
    pub max_hp: i32,
    pub energy: i32,
    pub max_energy: i32,
    pub armor: i32,
    pub block: i32,

    /// At most one entry per `StatusKind`.
    pub status_effects: SmallVec<[StatusEffect; 4]>,

    /// Flat bonus added to every outgoing hit.
    pub bonus_damage: i32,

    /// Type of the last card this combatant played this turn.
    pub last_card_type: Option<CardType>,
}

impl Combatant {
    /// A full-health combatant with no defenses.
    #[must_use]
    pub fn new(max_hp: i32, max_energy: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            energy: max_energy,
            max_energy,
            armor: 0,
            block: 0,
            status_effects: SmallVec::new(),
            bonus_damage: 0,
            last_card_type: None,
        }
    }

    /// Set starting armor (builder pattern).
    #[must_use]
    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Lose hp directly, bypassing block and armor. Floors at 0.
    pub fn lose_hp(&mut self, amount: i32) -> i32 {
        let lost = amount.clamp(0, self.hp.max(0));
        self.hp -= lost;
        lost
    }

    /// Restore hp up to `max_hp`. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let healed = amount.clamp(0, (self.max_hp - self.hp).max(0));
        self.hp += healed;
        healed
    }

    #[must_use]
    pub fn status(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.status_effects.iter().find(|s| s.kind == kind)
    }

    /// Magnitude of a status, 0 when absent.
    #[must_use]
    pub fn status_value(&self, kind: StatusKind) -> i32 {
        self.status(kind).map_or(0, |s| s.value)
    }

    #[must_use]
    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.status(kind).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::apply_status;

    #[test]
    fn test_new_is_full() {
        let fighter = Combatant::new(50, 3);
        assert_eq!(fighter.hp, 50);
        assert_eq!(fighter.energy, 3);
        assert!(!fighter.is_dead());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut fighter = Combatant::new(50, 3);
        fighter.hp = 45;
        assert_eq!(fighter.heal(10), 5);
        assert_eq!(fighter.hp, 50);
    }

    #[test]
    fn test_lose_hp_floors_at_zero() {
        let mut fighter = Combatant::new(10, 3);
        assert_eq!(fighter.lose_hp(15), 10);
        assert_eq!(fighter.hp, 0);
        assert!(fighter.is_dead());
    }

    #[test]
    fn test_status_value() {
        let mut fighter = Combatant::new(10, 3);
        assert_eq!(fighter.status_value(StatusKind::Strength), 0);

        apply_status(&mut fighter, StatusKind::Strength, 2, 3);
        assert_eq!(fighter.status_value(StatusKind::Strength), 3);
        assert!(fighter.has_status(StatusKind::Strength));
    }
}
