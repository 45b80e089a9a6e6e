//! Headless combat driving.
//!
//! A `PlayerPolicy` picks cards for the player; `run_to_end` alternates
//! player and enemy turns until the combat is over. Used for simulation,
//! tests, and benchmarks.

use tracing::trace;

use crate::cards::{Card, CardEffect, CardId, CardType};
use crate::core::CombatError;
use crate::effects::Target;

use super::session::CombatSession;
use super::state::{BattleOutcome, CombatPhase, CombatState};

/// A card to play and where.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedPlay {
    pub card: CardId,
    pub target: Target,
}

/// Chooses the player's actions.
pub trait PlayerPolicy {
    /// Next card to play, or `None` to end the turn.
    fn next_play(&mut self, session: &CombatSession) -> Option<PlannedPlay>;
}

/// Natural target for a card: the enemy for anything harmful, else self.
#[must_use]
pub fn default_target(card: &Card) -> Target {
    match card.effect {
        CardEffect::Damage { .. } | CardEffect::DamageMulti { .. } | CardEffect::Vulnerable { .. } => {
            Target::Enemy
        }
        CardEffect::ApplyStatus { status, .. } if status.is_debuff() => Target::Enemy,
        _ => Target::Player,
    }
}

/// Plays the most valuable affordable card each step.
///
/// Attacks are scored by damage and zero-cost utility comes first. Block
/// is worth nothing here: it is cleared when the player's turn ends, before
/// the enemy acts.
#[derive(Clone, Debug, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    fn score(card: &Card, state: &CombatState) -> i32 {
        let magnitude = card.effect.magnitude();

        let value = match (&card.card_type, &card.effect) {
            (_, CardEffect::DamageMulti { value, hits }) => value * *hits as i32,
            (CardType::Attack, _) => magnitude,
            (_, CardEffect::Block { .. }) => 0,
            (_, CardEffect::Heal { .. }) => magnitude.min(state.player.max_hp - state.player.hp),
            (CardType::Status, _) => 0,
            _ => magnitude.max(1) + 2,
        };

        if value <= 0 {
            0
        } else if card.cost == 0 {
            value + 10
        } else {
            value / card.cost
        }
    }
}

impl PlayerPolicy for GreedyPolicy {
    fn next_play(&mut self, session: &CombatSession) -> Option<PlannedPlay> {
        let state = session.get_combat_state()?;
        let free = session.relics().next_card_free();

        session
            .deck()
            .hand()
            .iter()
            .filter(|card| free || card.cost <= state.player.energy)
            .map(|card| (Self::score(card, state), card))
            .filter(|(score, _)| *score > 0)
            .max_by_key(|(score, _)| *score)
            .map(|(_, card)| PlannedPlay {
                card: card.id.clone(),
                target: default_target(card),
            })
    }
}

impl CombatSession {
    /// Drive the current combat to its end with `policy`.
    ///
    /// A play the rules reject ends the player's turn instead of failing.
    pub fn run_to_end<P: PlayerPolicy>(&mut self, policy: &mut P) -> Result<BattleOutcome, CombatError> {
        loop {
            let phase = self
                .get_combat_state()
                .map(|s| s.phase)
                .ok_or(CombatError::NotInCombat)?;

            match phase {
                CombatPhase::Ended(outcome) => return Ok(outcome),
                CombatPhase::NotStarted => return Err(CombatError::NotInCombat),
                CombatPhase::PlayerTurn => {
                    // Bounded: every play discards a card or fails.
                    let max_plays = self.deck().cards_in_combat() * 2;
                    for _ in 0..max_plays {
                        let Some(play) = policy.next_play(self) else {
                            break;
                        };
                        match self.play_card(&play.card, play.target) {
                            Ok(result) if result.outcome.is_some() => break,
                            Ok(_) => {}
                            Err(err) => {
                                trace!(card = %play.card, %err, "policy play rejected");
                                break;
                            }
                        }
                    }
                    if self.in_combat() {
                        self.end_player_turn()?;
                    }
                }
                CombatPhase::EnemyTurn => {
                    self.enemy_turn()?;
                }
            }
        }
    }
}
