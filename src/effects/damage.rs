//! Damage resolution.
//!
//! Outgoing damage is built up from the attacker's modifiers, scaled by
//! the defender's statuses, then absorbed by block first and armor second.
//! Only what survives both reaches hp. Block-before-armor holds for every
//! damage source.
//!
//! Resolution is split into a pure computation (`resolve_hit`) and an
//! application step (`DamageResolution::apply`), so callers can preview a
//! hit without mutating anything.

use serde::{Deserialize, Serialize};

use crate::cards::CardType;
use crate::core::Combatant;

use super::status::StatusKind;

/// Default attack-after-attack bonus, in percent.
pub const COMBO_BONUS_PERCENT: i32 = 10;

/// A single hit before modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub base: i32,
    /// Type of the card dealing the hit; `None` for enemy actions and relics.
    pub card_type: Option<CardType>,
    pub combo_bonus_percent: i32,
}

impl Hit {
    #[must_use]
    pub fn new(base: i32) -> Self {
        Self {
            base,
            card_type: None,
            combo_bonus_percent: COMBO_BONUS_PERCENT,
        }
    }

    /// Mark the hit as coming from a card (builder pattern).
    #[must_use]
    pub fn from_card(mut self, card_type: CardType) -> Self {
        self.card_type = Some(card_type);
        self
    }

    #[must_use]
    pub fn with_combo_bonus(mut self, percent: i32) -> Self {
        self.combo_bonus_percent = percent;
        self
    }
}

/// Where a hit's damage ended up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageResolution {
    /// Damage after all modifiers, before absorption.
    pub total: i32,
    pub block_consumed: i32,
    pub armor_consumed: i32,
    pub hp_damage: i32,
    pub combo: bool,
}

impl DamageResolution {
    /// Write the result into the defender.
    pub fn apply(&self, defender: &mut Combatant) {
        defender.block -= self.block_consumed;
        defender.armor -= self.armor_consumed;
        defender.hp = (defender.hp - self.hp_damage).max(0);
    }

    /// Merge another hit into a running total (multi-hit attacks).
    pub fn accumulate(&mut self, other: &DamageResolution) {
        self.total = self.total.saturating_add(other.total);
        self.block_consumed = self.block_consumed.saturating_add(other.block_consumed);
        self.armor_consumed = self.armor_consumed.saturating_add(other.armor_consumed);
        self.hp_damage = self.hp_damage.saturating_add(other.hp_damage);
        self.combo |= other.combo;
    }
}

/// Apply block then armor to a final damage amount. No modifiers.
#[must_use]
pub fn absorb(amount: i32, defender: &Combatant) -> DamageResolution {
    let mut remaining = amount.max(0);

    let block_consumed = remaining.min(defender.block.max(0));
    remaining -= block_consumed;

    let armor_consumed = remaining.min(defender.armor.max(0));
    remaining -= armor_consumed;

    DamageResolution {
        total: amount.max(0),
        block_consumed,
        armor_consumed,
        hp_damage: remaining.min(defender.hp.max(0)),
        combo: false,
    }
}

/// Compute a hit against `defender` without mutating either side.
#[must_use]
pub fn resolve_hit(hit: &Hit, attacker: &Combatant, defender: &Combatant) -> DamageResolution {
    // Template values are unbounded, so every step saturates.
    let mut damage = hit
        .base
        .saturating_add(attacker.bonus_damage)
        .saturating_add(attacker.status_value(StatusKind::Strength))
        .saturating_sub(attacker.status_value(StatusKind::Disarm))
        .max(0);

    let combo = hit.card_type.is_some() && attacker.last_card_type == hit.card_type;
    if combo {
        damage = damage.saturating_mul(100_i32.saturating_add(hit.combo_bonus_percent)) / 100;
    }

    if defender.has_status(StatusKind::Weak) {
        damage = damage.saturating_mul(3) / 4;
    }
    if defender.has_status(StatusKind::Vulnerable) {
        damage = damage.saturating_mul(3) / 2;
    }

    let mut resolution = absorb(damage, defender);
    resolution.combo = combo;
    resolution
}

/// Compute a plain hit of `base` damage.
#[must_use]
pub fn resolve_damage(base: i32, attacker: &Combatant, defender: &Combatant) -> DamageResolution {
    resolve_hit(&Hit::new(base), attacker, defender)
}

/// Resolve and apply a hit in one step.
pub fn deal_damage(hit: &Hit, attacker: &Combatant, defender: &mut Combatant) -> DamageResolution {
    let resolution = resolve_hit(hit, attacker, defender);
    resolution.apply(defender);
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::apply_status;

    fn attacker() -> Combatant {
        Combatant::new(50, 3)
    }

    fn defender(block: i32, armor: i32, hp: i32) -> Combatant {
        let mut d = Combatant::new(hp, 0).with_armor(armor);
        d.block = block;
        d
    }

    #[test]
    fn test_block_absorbs_before_armor() {
        let res = resolve_damage(10, &attacker(), &defender(4, 100, 50));
        assert_eq!(res.block_consumed, 4);
        assert_eq!(res.armor_consumed, 6);
        assert_eq!(res.hp_damage, 0);
    }

    #[test]
    fn test_armor_then_hp() {
        let res = resolve_damage(10, &attacker(), &defender(0, 3, 50));
        assert_eq!(res.block_consumed, 0);
        assert_eq!(res.armor_consumed, 3);
        assert_eq!(res.hp_damage, 7);
    }

    #[test]
    fn test_apply_mutates_defender() {
        let mut target = defender(4, 3, 50);
        let res = resolve_damage(10, &attacker(), &target);
        res.apply(&mut target);

        assert_eq!((target.block, target.armor, target.hp), (0, 0, 47));
    }

    #[test]
    fn test_hp_floored_at_zero() {
        let mut target = defender(0, 0, 5);
        let res = deal_damage(&Hit::new(20), &attacker(), &mut target);

        assert_eq!(res.hp_damage, 5);
        assert_eq!(target.hp, 0);
    }

    #[test]
    fn test_strength_and_bonus_added() {
        let mut atk = attacker();
        atk.bonus_damage = 2;
        apply_status(&mut atk, StatusKind::Strength, 2, 3);

        let res = resolve_damage(5, &atk, &defender(0, 0, 50));
        assert_eq!(res.hp_damage, 10);
    }

    #[test]
    fn test_disarm_reduces_and_floors() {
        let mut atk = attacker();
        apply_status(&mut atk, StatusKind::Disarm, 2, 10);

        let res = resolve_damage(6, &atk, &defender(0, 0, 50));
        assert_eq!(res.total, 0);
    }

    #[test]
    fn test_combo_bonus_on_repeated_type() {
        let mut atk = attacker();
        atk.last_card_type = Some(CardType::Attack);

        let hit = Hit::new(15).from_card(CardType::Attack);
        let res = resolve_hit(&hit, &atk, &defender(0, 0, 50));

        // floor(15 * 1.1) = 16
        assert!(res.combo);
        assert_eq!(res.hp_damage, 16);

        atk.last_card_type = Some(CardType::Skill);
        let res = resolve_hit(&hit, &atk, &defender(0, 0, 50));
        assert!(!res.combo);
        assert_eq!(res.hp_damage, 15);
    }

    #[test]
    fn test_weak_applied_before_vulnerable() {
        let mut target = defender(0, 0, 50);
        apply_status(&mut target, StatusKind::Weak, 1, 1);
        apply_status(&mut target, StatusKind::Vulnerable, 1, 1);

        // floor(floor(10 * 0.75) * 1.5) = floor(7 * 1.5) = 10
        let res = resolve_damage(10, &attacker(), &target);
        assert_eq!(res.hp_damage, 10);
    }

    #[test]
    fn test_vulnerable_alone() {
        let mut target = defender(0, 0, 50);
        apply_status(&mut target, StatusKind::Vulnerable, 1, 1);

        let res = resolve_damage(7, &attacker(), &target);
        assert_eq!(res.hp_damage, 10);
    }

    #[test]
    fn test_accumulate() {
        let mut total = DamageResolution::default();
        total.accumulate(&absorb(5, &defender(3, 0, 50)));
        total.accumulate(&absorb(5, &defender(0, 0, 50)));

        assert_eq!(total.block_consumed, 3);
        assert_eq!(total.hp_damage, 7);
    }

    #[test]
    fn test_huge_values_saturate() {
        let mut atk = attacker();
        atk.bonus_damage = i32::MAX;
        atk.last_card_type = Some(CardType::Attack);
        apply_status(&mut atk, StatusKind::Strength, 2, i32::MAX);

        let mut target = defender(5, 5, 50);
        apply_status(&mut target, StatusKind::Weak, 1, 1);
        apply_status(&mut target, StatusKind::Vulnerable, 1, 1);

        let hit = Hit::new(i32::MAX).from_card(CardType::Attack);
        let res = deal_damage(&hit, &atk, &mut target);

        assert!(res.total > 0);
        assert_eq!((res.block_consumed, res.armor_consumed, res.hp_damage), (5, 5, 50));
        assert_eq!(target.hp, 0);

        let mut total = DamageResolution { total: i32::MAX, ..res };
        total.accumulate(&res);
        assert_eq!(total.total, i32::MAX);
    }
}
