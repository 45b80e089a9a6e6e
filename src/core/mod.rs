//! Shared plumbing: RNG, configuration, errors, the combatant record, and
//! the persistent player record.
//!
//! Nothing here knows about turn order. The deck, effects, relic, and
//! combat modules build on these types.

pub mod combatant;
pub mod config;
pub mod error;
pub mod progress;
pub mod rng;

pub use combatant::Combatant;
pub use config::{CombatConfig, StarterComposition};
pub use error::{CatalogError, CombatError, DeckError, RelicError};
pub use progress::PlayerProgress;
pub use rng::GameRng;
