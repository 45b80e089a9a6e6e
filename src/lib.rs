//! # rust-spire
//!
//! Rules engine for a turn-based deck-building combat game.
//!
//! ## Design Principles
//!
//! 1. **Synchronous core**: every operation runs to completion and returns
//!    a `Result`. Validation errors leave state untouched.
//!
//! 2. **Deterministic**: all randomness flows from one seed through
//!    `GameRng` context streams, so a seed replays a combat exactly.
//!
//! 3. **Data-driven passives**: relics are inert descriptors evaluated by a
//!    single interpreter; the turn state machine knows nothing about
//!    individual relics.
//!
//! ## Architecture
//!
//! - **Block before armor**: every damage source is absorbed by block
//!   first, then armor, then hp.
//!
//! - **Persistent piles**: draw pile, hand, and discard are `im::Vector`s,
//!   so combat snapshots clone cheaply.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, error kinds, combatant and progress records
//! - `cards`: Card templates, effects, and the card catalog
//! - `zones`: Deck engine (deck, draw pile, hand, discard)
//! - `effects`: Status effects, damage resolution, card effect execution
//! - `relics`: Passive trigger engine and relic rewards
//! - `combat`: Turn state machine, enemy intents, combat log, auto-play

pub mod core;
pub mod cards;
pub mod zones;
pub mod effects;
pub mod relics;
pub mod combat;

// Re-export commonly used types
pub use crate::core::{
    CatalogError, CombatConfig, CombatError, Combatant, DeckError, GameRng,
    PlayerProgress, RelicError, StarterComposition,
};

pub use crate::cards::{Card, CardCatalog, CardEffect, CardId, CardType, Rarity};

pub use crate::zones::{DeckEngine, Pile, TypeCounts};

pub use crate::effects::{
    apply_status, resolve_damage, tick_start, tick_status_damage, DamageResolution, EffectResolver,
    StatusEffect, StatusKind, Target,
};

pub use crate::relics::{
    Relic, RelicCatalog, RelicCondition, RelicEffectKind, RelicEngine, RelicId, TriggerContext,
    TriggerTiming,
};

pub use crate::combat::{
    BattleOutcome, CombatEvent, CombatPhase, CombatSession, CombatState, EnemyConfig, EnemySkill,
    GreedyPolicy, Intent, IntentTracker, PlayerPolicy,
};
