//! Relics: timed, conditional passive effects.
//!
//! - `relic`: templates and effect descriptors
//! - `condition`: gates on card type, turn number, and damage
//! - `interpreter`: `apply_effect`, the single place relic behavior lives
//! - `registry`: `RelicEngine`, the owned set with its timing index
//! - `reward`: archetype-weighted reward offers
//! - `catalog`: template storage and the built-in set
//!
//! The combat session fires relics through `RelicEngine::fire`, handing
//! over a `TriggerContext` of mutable borrows. Relics never reach into
//! the session directly.

mod catalog;
mod condition;
mod interpreter;
mod registry;
mod relic;
mod reward;

pub use catalog::RelicCatalog;
pub use condition::{ConditionEvaluator, RelicCondition, TriggerExtra};
pub use interpreter::{apply_effect, RelicActivation, RelicCombatState, RelicOutcome, TriggerContext};
pub use registry::RelicEngine;
pub use relic::{Relic, RelicEffect, RelicEffectKind, RelicId, RelicPool, RelicRarity, TriggerTiming};
pub use reward::{generate_relic_reward, relic_weight, ArchetypeBias};
