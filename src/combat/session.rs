//! Combat session: the turn state machine.
//!
//! A `CombatSession` owns everything one player carries through a run:
//! the deck engine, owned relics, the persistent progress record, and the
//! current combat. It is the only thing that mutates combat state.
//!
//! ```text
//! start_combat ─► PlayerTurn ─► end_player_turn ─► EnemyTurn ─► enemy_turn ─┐
//!                    ▲                                                      │
//!                    └──────────────────── start_player_turn ◄──────────────┘
//! ```
//!
//! Any step may end the combat with victory, defeat, or a draw once the
//! turn cap is exceeded. Rejected actions leave state untouched.
//!
//! ## Example
//!
//! ```
//! use rust_spire::combat::{CombatSession, EnemyConfig};
//! use rust_spire::core::CombatConfig;
//! use rust_spire::effects::Target;
//!
//! let mut session = CombatSession::new(CombatConfig::default(), 7);
//! session.start_combat(EnemyConfig::new("slime", "Slime", 30, 5)).unwrap();
//!
//! let state = session.get_combat_state().unwrap();
//! assert_eq!(state.turn, 1);
//! assert_eq!(session.deck().hand().len(), 5);
//!
//! if let Some(card) = session.deck().hand().iter().find(|c| c.cost <= 3) {
//!     let id = card.id.clone();
//!     let target = if card.effect.is_damage() { Target::Enemy } else { Target::Player };
//!     let _ = session.play_card(&id, target);
//! }
//! session.end_player_turn().unwrap();
//! session.enemy_turn().unwrap();
//! ```

use tracing::{debug, info, warn};

use crate::cards::{Card, CardCatalog, CardId};
use crate::core::{
    CombatConfig, CombatError, Combatant, DeckError, GameRng, PlayerProgress, RelicError,
};
use crate::effects::{
    apply_status, deal_damage, tick_start, tick_status_damage, EffectReport, EffectResolver, Hit,
    ResolverContext, StatusKind, Target,
};
use crate::relics::{
    generate_relic_reward, Relic, RelicActivation, RelicCatalog, RelicEngine, RelicId, TriggerContext,
    TriggerExtra, TriggerTiming,
};
use crate::zones::DeckEngine;

use super::intent::{choose_intent, EnemyConfig, EnemySkill, Intent, IntentTracker};
use super::log::{CombatEvent, CombatLog};
use super::state::{BattleOutcome, CombatPhase, CombatState, EnemyState};

/// Result of a successful `play_card`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayResult {
    pub card: Card,
    /// Energy actually paid.
    pub cost: i32,
    pub report: EffectReport,
    pub relics: Vec<RelicActivation>,
    /// Set when the play ended the combat.
    pub outcome: Option<BattleOutcome>,
}

/// One player's run state plus the combat in progress.
pub struct CombatSession {
    config: CombatConfig,
    cards: CardCatalog,
    relic_catalog: RelicCatalog,
    deck: DeckEngine,
    relics: RelicEngine,
    progress: PlayerProgress,
    state: Option<CombatState>,
    log: CombatLog,
    intents: IntentTracker,
    intent_rng: GameRng,
    reward_rng: GameRng,
}

impl CombatSession {
    /// New session with the built-in card and relic sets.
    ///
    /// `seed` determines every shuffle, intent, and reward.
    #[must_use]
    pub fn new(config: CombatConfig, seed: u64) -> Self {
        let rng = GameRng::new(seed);
        Self {
            deck: DeckEngine::new(&config, rng.for_context("deck")),
            progress: PlayerProgress::new(config.player_max_hp),
            config,
            cards: CardCatalog::standard(),
            relic_catalog: RelicCatalog::standard(),
            relics: RelicEngine::new(),
            state: None,
            log: CombatLog::new(),
            intents: IntentTracker::new(),
            intent_rng: rng.for_context("intent"),
            reward_rng: rng.for_context("reward"),
        }
    }

    /// Use a different card catalog (builder pattern).
    #[must_use]
    pub fn with_cards(mut self, cards: CardCatalog) -> Self {
        self.cards = cards;
        self
    }

    /// Use a different relic catalog (builder pattern).
    #[must_use]
    pub fn with_relic_catalog(mut self, catalog: RelicCatalog) -> Self {
        self.relic_catalog = catalog;
        self
    }

    /// Resume from a progress record (builder pattern).
    ///
    /// Deck and relic ids that cannot be restored are skipped with a warning.
    /// A deck over the size limit keeps its first cards.
    #[must_use]
    pub fn with_progress(mut self, progress: PlayerProgress) -> Self {
        for id in &progress.deck {
            let Some(card) = self.cards.instantiate(id) else {
                warn!(card = %id, "unknown card in progress, skipped");
                continue;
            };
            if let Err(err) = self.deck.add_card_to_deck(card) {
                warn!(card = %id, %err, "card not restored");
            }
        }
        for id in &progress.relics {
            if let Err(err) = self.relics.grant_from_catalog(&self.relic_catalog, id) {
                warn!(relic = %id, %err, "relic not restored");
            }
        }
        self.progress = progress;
        self.progress.sync_deck(self.deck.deck());
        self.progress.relics = self.relics.owned_ids();
        self
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    #[must_use]
    pub fn cards(&self) -> &CardCatalog {
        &self.cards
    }

    #[must_use]
    pub fn deck(&self) -> &DeckEngine {
        &self.deck
    }

    #[must_use]
    pub fn relics(&self) -> &RelicEngine {
        &self.relics
    }

    #[must_use]
    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    #[must_use]
    pub fn intent_tracker(&self) -> &IntentTracker {
        &self.intents
    }

    /// Snapshot of the current or most recent combat.
    #[must_use]
    pub fn get_combat_state(&self) -> Option<&CombatState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn get_combat_log(&self) -> &CombatLog {
        &self.log
    }

    #[must_use]
    pub fn in_combat(&self) -> bool {
        self.state.as_ref().is_some_and(CombatState::in_combat)
    }

    /// Would the combat end right now, and how?
    ///
    /// Pure query; never advances the turn counter.
    #[must_use]
    pub fn check_battle_end(&self) -> Option<BattleOutcome> {
        self.state
            .as_ref()
            .and_then(|state| battle_end(state, &self.config))
    }

    // === Combat flow ===

    /// Begin a combat against `enemy`, replacing any previous one.
    ///
    /// Builds the starter deck first if the player has no cards yet.
    pub fn start_combat(&mut self, enemy: EnemyConfig) -> Result<Option<BattleOutcome>, CombatError> {
        if self.deck.deck().is_empty() {
            self.create_starter_deck()?;
        }

        self.deck.reset_for_combat();
        self.relics.reset_combat_state();
        self.log.clear();
        self.intents.clear();

        info!(enemy = %enemy.id, hp = enemy.hp, deck = self.deck.deck().len(), "combat started");
        self.log.push(1, CombatEvent::CombatStarted { enemy: enemy.name.clone() });

        self.state = Some(CombatState {
            turn: 1,
            phase: CombatPhase::NotStarted,
            player: Combatant::new(self.config.player_max_hp, self.config.player_max_energy),
            enemy: EnemyState::spawn(enemy),
        });

        let mut battle = self.battle()?;
        battle.fire(TriggerTiming::CombatStart, TriggerExtra::default());
        if let Some(outcome) = battle.settle() {
            return Ok(Some(outcome));
        }
        battle.declare_intent();
        Ok(battle.start_player_turn())
    }

    /// Play the first copy of `card_id` in hand on `target`.
    pub fn play_card(&mut self, card_id: &CardId, target: Target) -> Result<PlayResult, CombatError> {
        self.battle()?.play_card(card_id, target)
    }

    /// Finish the player's turn.
    pub fn end_player_turn(&mut self) -> Result<Option<BattleOutcome>, CombatError> {
        self.battle()?.end_player_turn()
    }

    /// Run the enemy's declared action, then start the next player turn.
    pub fn enemy_turn(&mut self) -> Result<Option<BattleOutcome>, CombatError> {
        self.battle()?.enemy_turn()
    }

    /// Force the combat to end.
    pub fn end_combat(&mut self, outcome: BattleOutcome) -> Result<(), CombatError> {
        self.battle()?.end_combat(outcome);
        Ok(())
    }

    fn battle(&mut self) -> Result<Battle<'_>, CombatError> {
        let state = self.state.as_mut().ok_or(CombatError::NotInCombat)?;
        if matches!(state.phase, CombatPhase::Ended(_)) {
            return Err(CombatError::NotInCombat);
        }
        Ok(Battle {
            state,
            config: &self.config,
            deck: &mut self.deck,
            relics: &mut self.relics,
            progress: &mut self.progress,
            log: &mut self.log,
            intents: &mut self.intents,
            intent_rng: &mut self.intent_rng,
        })
    }

    // === Growth ===

    /// Replace the deck with a starter deck from the card catalog.
    pub fn create_starter_deck(&mut self) -> Result<(), DeckError> {
        self.deck.create_starter_deck(&self.cards, &self.config.starter)?;
        self.progress.sync_deck(self.deck.deck());
        Ok(())
    }

    pub fn add_card_to_deck(&mut self, card: Card) -> Result<(), DeckError> {
        self.deck.add_card_to_deck(card)?;
        self.progress.sync_deck(self.deck.deck());
        Ok(())
    }

    /// Add a copy of a catalog card.
    pub fn add_catalog_card(&mut self, id: &CardId) -> Result<(), DeckError> {
        let card = self.cards.instantiate(id).ok_or(DeckError::CardNotInDeck)?;
        self.add_card_to_deck(card)
    }

    /// Remove a card, keeping at least `min_deck_size` cards.
    pub fn remove_card_from_deck(&mut self, id: &CardId) -> Result<Card, DeckError> {
        let card = self.deck.remove_card_from_deck(id, self.config.min_deck_size)?;
        self.progress.sync_deck(self.deck.deck());
        Ok(card)
    }

    pub fn upgrade_card(&mut self, id: &CardId) -> Result<Card, DeckError> {
        let card = self.deck.upgrade_card(id)?.clone();
        self.progress.sync_deck(self.deck.deck());
        Ok(card)
    }

    /// Grant a relic from the relic catalog.
    pub fn grant_relic(&mut self, id: &RelicId) -> Result<(), RelicError> {
        self.relics.grant_from_catalog(&self.relic_catalog, id)?;
        self.progress.relics = self.relics.owned_ids();
        Ok(())
    }

    /// Grant a relic that is not in the catalog.
    pub fn grant_relic_template(&mut self, relic: Relic) -> Result<(), RelicError> {
        self.relics.grant(relic)?;
        self.progress.relics = self.relics.owned_ids();
        Ok(())
    }

    pub fn remove_relic(&mut self, id: &RelicId) -> Result<Relic, RelicError> {
        let relic = self.relics.remove(id)?;
        self.progress.relics = self.relics.owned_ids();
        Ok(relic)
    }

    /// Offer up to `count` relics, biased toward the deck's archetype.
    pub fn generate_relic_reward(&mut self, count: usize) -> Vec<Relic> {
        generate_relic_reward(
            &self.relic_catalog,
            &self.relics,
            &self.deck.type_counts(),
            count,
            &mut self.reward_rng,
        )
    }
}

/// Victory/defeat/draw check shared by the session and its steps.
fn battle_end(state: &CombatState, config: &CombatConfig) -> Option<BattleOutcome> {
    if let CombatPhase::Ended(outcome) = state.phase {
        return Some(outcome);
    }
    if state.player.is_dead() {
        Some(BattleOutcome::Defeat)
    } else if state.enemy.fighter.is_dead() {
        Some(BattleOutcome::Victory)
    } else if state.turn > config.turn_cap {
        Some(BattleOutcome::Draw)
    } else {
        None
    }
}

/// Split borrow of a session with a combat in progress.
struct Battle<'a> {
    state: &'a mut CombatState,
    config: &'a CombatConfig,
    deck: &'a mut DeckEngine,
    relics: &'a mut RelicEngine,
    progress: &'a mut PlayerProgress,
    log: &'a mut CombatLog,
    intents: &'a mut IntentTracker,
    intent_rng: &'a mut GameRng,
}

impl Battle<'_> {
    fn push(&mut self, event: CombatEvent) {
        self.log.push(self.state.turn, event);
    }

    fn fire(&mut self, timing: TriggerTiming, extra: TriggerExtra) -> Vec<RelicActivation> {
        let mut ctx = TriggerContext {
            player: &mut self.state.player,
            enemy: &mut self.state.enemy.fighter,
            deck: &mut *self.deck,
            progress: &mut *self.progress,
            turn: self.state.turn,
            extra,
        };
        let fired = self.relics.fire(timing, &mut ctx);
        for activation in &fired {
            self.push(CombatEvent::RelicActivated {
                relic: activation.relic.clone(),
                outcome: activation.outcome.clone(),
            });
        }
        fired
    }

    /// End the combat if either side is down or the turn cap is exceeded.
    fn settle(&mut self) -> Option<BattleOutcome> {
        let outcome = battle_end(&*self.state, self.config)?;
        if outcome == BattleOutcome::Victory {
            self.fire(TriggerTiming::EnemyDeath, TriggerExtra::default());
        }
        self.end_combat(outcome);
        Some(outcome)
    }

    fn end_combat(&mut self, outcome: BattleOutcome) {
        self.state.phase = CombatPhase::Ended(outcome);
        self.progress.hp = self.state.player.hp.max(0);
        self.progress.max_hp = self.state.player.max_hp;
        self.progress.sync_deck(self.deck.deck());
        self.progress.relics = self.relics.owned_ids();
        self.push(CombatEvent::CombatEnded { outcome });
        info!(%outcome, turn = self.state.turn, hp = self.state.player.hp, "combat ended");
    }

    fn declare_intent(&mut self) {
        let intent = choose_intent(&self.state.enemy.config, &self.state.enemy.fighter, &mut *self.intent_rng);
        self.state.enemy.intent = Some(intent);
        self.intents.declare(self.state.turn, intent);
        self.push(CombatEvent::IntentDeclared { intent });
    }

    fn start_player_turn(&mut self) -> Option<BattleOutcome> {
        self.state.phase = CombatPhase::PlayerTurn;
        self.push(CombatEvent::TurnStarted);
        debug!(turn = self.state.turn, "player turn started");

        self.state.player.block = 0;
        self.state.enemy.fighter.block = 0;

        for status in tick_start(&mut self.state.player) {
            self.push(CombatEvent::StatusExpired { target: Target::Player, status });
        }

        // Energy refills before turn-start relics so their bonus survives.
        self.state.player.energy = self.state.player.max_energy;
        self.fire(TriggerTiming::TurnStart, TriggerExtra::default());

        let drawn = self.deck.draw_cards(self.config.cards_per_turn).map_or(0, |c| c.len());
        self.push(CombatEvent::CardsDrawn { count: drawn });

        for target in [Target::Player, Target::Enemy] {
            let fighter = match target {
                Target::Player => &mut self.state.player,
                Target::Enemy => &mut self.state.enemy.fighter,
            };
            let damage = tick_status_damage(fighter);
            if damage.total() > 0 {
                self.push(CombatEvent::StatusDamage { target, amount: damage.total() });
            }
        }

        self.settle()
    }

    fn play_card(&mut self, card_id: &CardId, target: Target) -> Result<PlayResult, CombatError> {
        if self.state.phase != CombatPhase::PlayerTurn {
            return Err(CombatError::NotPlayerTurn);
        }

        let index = self.deck.find_in_hand(card_id).ok_or(DeckError::CardNotInHand)?;
        let card = self.deck.hand()[index].clone();
        EffectResolver::validate(&card, target)?;

        let free = self.relics.next_card_free();
        let cost = if free { 0 } else { card.cost };
        if self.state.player.energy < cost {
            return Err(CombatError::InsufficientEnergy);
        }

        // Validation done; nothing above mutated.
        if free {
            self.relics.take_next_card_free();
        }

        let report = {
            let mut ctx = ResolverContext {
                caster: &mut self.state.player,
                opponent: &mut self.state.enemy.fighter,
                deck: &mut *self.deck,
                combo_bonus_percent: self.config.combo_bonus_percent,
            };
            EffectResolver::execute(&card, target, &mut ctx)
        };

        // Draws append to the hand, so the card is still at `index`.
        self.deck.discard_from_hand(index);
        self.state.player.energy -= cost;
        self.state.player.last_card_type = Some(card.card_type);

        debug!(card = %card.id, %target, cost, hp_damage = report.damage.hp_damage, "card played");
        self.push(CombatEvent::CardPlayed { card: card.id.clone(), target, cost });
        self.log_report(&card, &report);

        let relics = self.fire(
            TriggerTiming::CardPlay,
            TriggerExtra::card_play(card.card_type, report.damage.hp_damage),
        );
        let outcome = self.settle();

        Ok(PlayResult {
            card,
            cost,
            report,
            relics,
            outcome,
        })
    }

    fn log_report(&mut self, card: &Card, report: &EffectReport) {
        if card.effect.is_damage() {
            self.push(CombatEvent::DamageDealt {
                target: Target::Enemy,
                hp_damage: report.damage.hp_damage,
                blocked: report.damage.block_consumed + report.damage.armor_consumed,
                combo: report.damage.combo,
            });
        }
        if report.block_gained > 0 {
            self.push(CombatEvent::BlockGained { target: Target::Player, amount: report.block_gained });
        }
        if report.armor_gained > 0 {
            self.push(CombatEvent::ArmorGained { target: Target::Player, amount: report.armor_gained });
        }
        if report.healed > 0 {
            self.push(CombatEvent::Healed { target: Target::Player, amount: report.healed });
        }
        if let Some((target, status)) = report.status_applied {
            self.push(CombatEvent::StatusApplied { target, status });
        }
        if report.cards_drawn > 0 {
            self.push(CombatEvent::CardsDrawn { count: report.cards_drawn });
        }
    }

    fn end_player_turn(&mut self) -> Result<Option<BattleOutcome>, CombatError> {
        if self.state.phase != CombatPhase::PlayerTurn {
            return Err(CombatError::NotPlayerTurn);
        }

        self.state.player.block = 0;
        self.fire(TriggerTiming::TurnEnd, TriggerExtra::default());
        if let Some(outcome) = self.settle() {
            return Ok(Some(outcome));
        }

        let discarded = self.deck.discard_hand();
        self.state.player.last_card_type = None;
        self.push(CombatEvent::TurnEnded { discarded });
        self.state.phase = CombatPhase::EnemyTurn;
        Ok(None)
    }

    fn enemy_turn(&mut self) -> Result<Option<BattleOutcome>, CombatError> {
        if self.state.phase != CombatPhase::EnemyTurn {
            return Err(CombatError::NotEnemyTurn);
        }

        for status in tick_start(&mut self.state.enemy.fighter) {
            self.push(CombatEvent::StatusExpired { target: Target::Enemy, status });
        }

        let intent = match self.state.enemy.intent.take() {
            Some(intent) => intent,
            None => choose_intent(&self.state.enemy.config, &self.state.enemy.fighter, &mut *self.intent_rng),
        };
        self.execute_intent(intent);
        self.intents.execute(intent);

        self.state.turn += 1;
        if let Some(outcome) = self.settle() {
            return Ok(Some(outcome));
        }

        self.declare_intent();
        Ok(self.start_player_turn())
    }

    fn execute_intent(&mut self, intent: Intent) {
        self.push(CombatEvent::EnemyActed { intent });
        let enemy = &mut self.state.enemy.fighter;
        let player = &mut self.state.player;

        match intent {
            Intent::Attack { damage } => {
                let res = deal_damage(&Hit::new(damage), enemy, player);
                self.push(CombatEvent::DamageDealt {
                    target: Target::Player,
                    hp_damage: res.hp_damage,
                    blocked: res.block_consumed + res.armor_consumed,
                    combo: false,
                });
            }
            Intent::Defend { armor } => {
                enemy.armor += armor;
                self.push(CombatEvent::ArmorGained { target: Target::Enemy, amount: armor });
            }
            Intent::Skill { skill } => {
                let (target, status) = match skill {
                    EnemySkill::Poison { value, duration } => {
                        apply_status(player, StatusKind::Poison, duration, value);
                        (Target::Player, Some(StatusKind::Poison))
                    }
                    EnemySkill::Burn { value, duration } => {
                        apply_status(player, StatusKind::Burn, duration, value);
                        (Target::Player, Some(StatusKind::Burn))
                    }
                    EnemySkill::Expose { duration } => {
                        apply_status(player, StatusKind::Vulnerable, duration, 1);
                        (Target::Player, Some(StatusKind::Vulnerable))
                    }
                    EnemySkill::Enrage { value, duration } => {
                        apply_status(enemy, StatusKind::Strength, duration, value);
                        (Target::Enemy, Some(StatusKind::Strength))
                    }
                    EnemySkill::Regenerate { value } => {
                        let amount = enemy.heal(value);
                        self.push(CombatEvent::Healed { target: Target::Enemy, amount });
                        (Target::Enemy, None)
                    }
                };
                if let Some(status) = status {
                    self.push(CombatEvent::StatusApplied { target, status });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardEffect, CardType};

    fn session() -> CombatSession {
        CombatSession::new(CombatConfig::default(), 11)
    }

    fn dummy() -> EnemyConfig {
        EnemyConfig::new("dummy", "Dummy", 500, 0)
    }

    #[test]
    fn test_start_combat_initializes() {
        let mut s = session();
        assert_eq!(s.start_combat(dummy()).unwrap(), None);

        let state = s.get_combat_state().unwrap();
        assert_eq!(state.phase, CombatPhase::PlayerTurn);
        assert_eq!((state.player.hp, state.player.energy, state.player.max_energy), (100, 3, 3));
        assert!(state.enemy.intent.is_some());
        assert_eq!(s.deck().hand().len(), 5);
        assert_eq!(s.deck().cards_in_combat(), 10);
    }

    #[test]
    fn test_actions_outside_combat() {
        let mut s = session();
        assert_eq!(s.end_player_turn(), Err(CombatError::NotInCombat));
        assert_eq!(s.enemy_turn(), Err(CombatError::NotInCombat));
        assert_eq!(s.check_battle_end(), None);
    }

    #[test]
    fn test_phase_guards() {
        let mut s = session();
        s.start_combat(dummy()).unwrap();
        assert_eq!(s.enemy_turn(), Err(CombatError::NotEnemyTurn));

        s.end_player_turn().unwrap();
        let id = CardId::new("strike");
        assert_eq!(s.play_card(&id, Target::Enemy).err(), Some(CombatError::NotPlayerTurn));
    }

    #[test]
    fn test_card_not_in_hand() {
        let mut s = session();
        s.start_combat(dummy()).unwrap();
        let err = s.play_card(&CardId::new("whirlwind"), Target::Enemy).unwrap_err();
        assert_eq!(err.code(), "ERR_CARD_NOT_IN_HAND");
    }

    #[test]
    fn test_invalid_target_leaves_state() {
        let mut s = session();
        s.start_combat(dummy()).unwrap();
        let attack = s
            .deck()
            .hand()
            .iter()
            .find(|c| c.card_type == CardType::Attack)
            .map(|c| c.id.clone());

        if let Some(id) = attack {
            let before = s.get_combat_state().cloned();
            let hand = s.deck().hand().len();
            assert_eq!(s.play_card(&id, Target::Player).err(), Some(CombatError::InvalidTarget));
            assert_eq!(s.get_combat_state().cloned(), before);
            assert_eq!(s.deck().hand().len(), hand);
        }
    }

    #[test]
    fn test_turn_counter_once_per_round() {
        let mut s = session();
        s.start_combat(dummy()).unwrap();
        for expected in 2..=4 {
            s.end_player_turn().unwrap();
            s.enemy_turn().unwrap();
            assert_eq!(s.get_combat_state().unwrap().turn, expected);
            // Polling never advances the counter.
            assert_eq!(s.check_battle_end(), None);
            assert_eq!(s.get_combat_state().unwrap().turn, expected);
        }
    }

    #[test]
    fn test_intents_match_actions() {
        let mut s = session();
        s.start_combat(EnemyConfig::new("brute", "Brute", 500, 1).with_skill(EnemySkill::Regenerate { value: 1 }))
            .unwrap();
        for _ in 0..10 {
            s.end_player_turn().unwrap();
            s.enemy_turn().unwrap();
        }
        assert_eq!(s.intent_tracker().records().len(), 11);
        assert_eq!(s.intent_tracker().mismatches().count(), 0);
    }

    #[test]
    fn test_with_progress_skips_unrestorable_entries() {
        let mut progress = PlayerProgress::new(80);
        progress.deck = vec![CardId::new("strike"); 22];
        progress.deck.insert(0, CardId::new("mystery"));
        progress.relics = vec![RelicId::new("anchor"), RelicId::new("anchor"), RelicId::new("mystery")];

        let s = session().with_progress(progress);

        assert_eq!(s.deck().deck().len(), 20);
        assert_eq!(s.progress().deck, vec![CardId::new("strike"); 20]);
        assert_eq!(s.progress().relics, vec![RelicId::new("anchor")]);
        assert_eq!(s.progress().max_hp, 80);
    }

    #[test]
    fn test_growth_syncs_progress() {
        let mut s = session();
        s.create_starter_deck().unwrap();
        s.add_catalog_card(&CardId::new("whirlwind")).unwrap();
        assert_eq!(s.progress().deck.len(), 11);

        s.upgrade_card(&CardId::new("whirlwind")).unwrap();
        assert!(s.deck().deck().iter().any(|c| c.name == "Whirlwind +"));

        s.remove_card_from_deck(&CardId::new("whirlwind")).unwrap();
        assert_eq!(s.progress().deck.len(), 10);

        s.grant_relic(&RelicId::new("anchor")).unwrap();
        assert_eq!(s.progress().relics, vec![RelicId::new("anchor")]);
        assert_eq!(s.grant_relic(&RelicId::new("anchor")), Err(RelicError::RelicAlreadyOwned));
        s.remove_relic(&RelicId::new("anchor")).unwrap();
        assert!(s.progress().relics.is_empty());
    }

    #[test]
    fn test_next_card_free() {
        let mut s = session();
        s.grant_relic(&RelicId::new("slippers")).unwrap();
        s.create_starter_deck().unwrap();
        s.start_combat(dummy()).unwrap();

        let card = s.deck().hand()[0].clone();
        let target = if card.effect.is_damage() || matches!(card.effect, CardEffect::Vulnerable { .. }) {
            Target::Enemy
        } else {
            Target::Player
        };
        let energy_before = s.get_combat_state().unwrap().player.energy;

        let played = s.play_card(&card.id, target).unwrap();

        assert_eq!(played.cost, 0);
        assert!(!s.relics().next_card_free());
        let gained = played.report.energy_gained;
        assert_eq!(s.get_combat_state().unwrap().player.energy, energy_before + gained);
    }
}
