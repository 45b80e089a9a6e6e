//! Combat turn state machine.
//!
//! - `intent`: enemy templates, intent rolls, and the intent audit trail
//! - `state`: the snapshot handed to UIs
//! - `log`: typed, human-readable event log
//! - `session`: `CombatSession`, which owns and advances a combat
//! - `autoplay`: policies for running a combat without a UI

mod autoplay;
mod intent;
mod log;
mod session;
mod state;

pub use autoplay::{default_target, GreedyPolicy, PlannedPlay, PlayerPolicy};
pub use intent::{
    choose_intent, intent_weights, AiType, EnemyConfig, EnemySkill, Intent, IntentKind, IntentRecord,
    IntentTracker,
};
pub use log::{CombatEvent, CombatLog, LogEntry};
pub use session::{CombatSession, PlayResult};
pub use state::{BattleOutcome, CombatPhase, CombatState, EnemyState};
