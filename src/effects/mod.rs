//! Effects: statuses, damage, and card effect resolution.
//!
//! - `status`: apply, stack, tick, and damage-over-time
//! - `damage`: modifier pipeline and block/armor absorption
//! - `targeting`: the two sides a card can address
//! - `resolver`: validates and executes card effects
//!
//! Everything here works on `Combatant` so that cards, relics, and enemy
//! actions share a single damage and status path.

mod damage;
mod resolver;
mod status;
mod targeting;

pub use damage::{
    absorb, deal_damage, resolve_damage, resolve_hit, DamageResolution, Hit, COMBO_BONUS_PERCENT,
};
pub use resolver::{EffectReport, EffectResolver, ResolverContext};
pub use status::{apply_status, tick_start, tick_status_damage, StatusDamage, StatusEffect, StatusKind};
pub use targeting::Target;
