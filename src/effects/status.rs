//! Status effect engine.
//!
//! A combatant holds at most one entry per status kind. Damage-over-time
//! statuses (poison, burn) refresh their duration and add value when
//! reapplied; every other kind adds value and keeps the longer duration.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Combatant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Lose `value` hp each turn start.
    Poison,
    /// Lose `value` percent of max hp each turn start.
    Burn,
    /// Incoming damage x0.75.
    Weak,
    /// Incoming damage x1.5.
    Vulnerable,
    /// Outgoing damage +value.
    Strength,
    /// Block gained +value.
    Dexterity,
    /// Outgoing damage -value.
    Disarm,
}

impl StatusKind {
    /// Poison and burn: refreshed rather than extended on reapplication.
    #[must_use]
    pub fn is_damage_over_time(self) -> bool {
        matches!(self, StatusKind::Poison | StatusKind::Burn)
    }

    /// Harmful to whoever carries it.
    #[must_use]
    pub fn is_debuff(self) -> bool {
        !matches!(self, StatusKind::Strength | StatusKind::Dexterity)
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StatusKind::Poison => "poison",
            StatusKind::Burn => "burn",
            StatusKind::Weak => "weak",
            StatusKind::Vulnerable => "vulnerable",
            StatusKind::Strength => "strength",
            StatusKind::Dexterity => "dexterity",
            StatusKind::Disarm => "disarm",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Turns remaining.
    pub duration: u32,
    /// Magnitude.
    pub value: i32,
}

/// Hp lost to damage-over-time in one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusDamage {
    pub poison: i32,
    pub burn: i32,
}

impl StatusDamage {
    #[must_use]
    pub fn total(&self) -> i32 {
        self.poison + self.burn
    }
}

/// Apply or stack a status on `target`.
pub fn apply_status(target: &mut Combatant, kind: StatusKind, duration: u32, value: i32) {
    if let Some(existing) = target.status_effects.iter_mut().find(|s| s.kind == kind) {
        existing.value = existing.value.saturating_add(value);
        existing.duration = if kind.is_damage_over_time() {
            duration
        } else {
            existing.duration.max(duration)
        };
        trace!(%kind, duration = existing.duration, value = existing.value, "status stacked");
        return;
    }

    target.status_effects.push(StatusEffect { kind, duration, value });
    trace!(%kind, duration, value, "status applied");
}

/// Count every status down by one turn and drop expired ones.
///
/// Returns the kinds that expired.
pub fn tick_start(fighter: &mut Combatant) -> Vec<StatusKind> {
    let mut expired = Vec::new();
    fighter.status_effects.retain(|status| {
        status.duration = status.duration.saturating_sub(1);
        if status.duration == 0 {
            expired.push(status.kind);
            false
        } else {
            true
        }
    });
    expired
}

/// Apply poison and burn damage directly to hp, bypassing block and armor.
pub fn tick_status_damage(fighter: &mut Combatant) -> StatusDamage {
    let mut damage = StatusDamage::default();

    let poison = fighter.status_value(StatusKind::Poison);
    if poison > 0 {
        damage.poison = fighter.lose_hp(poison);
    }

    let burn = fighter.status_value(StatusKind::Burn);
    if burn > 0 {
        let amount = (i64::from(fighter.max_hp) * i64::from(burn) / 100) as i32;
        damage.burn = fighter.lose_hp(amount);
    }

    damage
}
