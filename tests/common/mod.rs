//! Shared fixtures for integration tests.

#![allow(dead_code)]

use rust_spire::cards::{Card, CardCatalog, CardId, CardType};
use rust_spire::combat::{CombatSession, EnemyConfig, EnemySkill};
use rust_spire::core::{CombatConfig, StarterComposition};
use rust_spire::relics::{Relic, RelicEffectKind, TriggerTiming};

/// Install a test-writer subscriber once. Set `RUST_LOG` to see engine logs.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

pub fn session(seed: u64) -> CombatSession {
    init_tracing();
    CombatSession::new(CombatConfig::default(), seed)
}

/// Session whose starter deck is ten copies of one standard card.
pub fn uniform_deck(seed: u64, id: &str) -> CombatSession {
    init_tracing();
    let standard = CardCatalog::standard();
    let card: Card = standard.instantiate(&CardId::new(id)).expect("standard card");

    let mut starter = StarterComposition { attack: 0, defense: 0, skill: 0 };
    match card.card_type {
        CardType::Attack => starter.attack = 10,
        CardType::Defense => starter.defense = 10,
        _ => starter.skill = 10,
    }
    let mut config = CombatConfig::default();
    config.starter = starter;

    let mut cards = CardCatalog::new();
    cards.register(card).expect("single card");
    CombatSession::new(config, seed).with_cards(cards)
}

/// Session whose starter deck is ten copies of Strike.
pub fn all_strikes(seed: u64) -> CombatSession {
    uniform_deck(seed, "strike")
}

/// Cannot hurt the player and takes forever to kill.
pub fn punching_bag() -> EnemyConfig {
    EnemyConfig::new("bag", "Punching Bag", 10_000, 0)
}

pub fn slime() -> EnemyConfig {
    EnemyConfig::new("slime", "Acid Slime", 40, 7).with_skill(EnemySkill::Poison { value: 2, duration: 3 })
}

/// Hits hard enough to end a combat quickly.
pub fn ogre() -> EnemyConfig {
    EnemyConfig::new("ogre", "Ogre", 10_000, 60)
}

/// Turn-start relic that leaves the player with no energy.
pub fn energy_drain() -> Relic {
    Relic::new("drain", "Drain", TriggerTiming::TurnStart, RelicEffectKind::Energy { value: -3 })
}

/// End turns without playing anything until the combat ends.
pub fn pass_until_end(session: &mut CombatSession) -> rust_spire::combat::BattleOutcome {
    loop {
        if let Some(outcome) = session.end_player_turn().expect("player turn") {
            return outcome;
        }
        if let Some(outcome) = session.enemy_turn().expect("enemy turn") {
            return outcome;
        }
    }
}
