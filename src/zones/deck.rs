//! Deck engine: the four card zones and movement between them.
//!
//! The master `deck` persists across combats and is authoritative. The
//! three combat piles (draw, hand, discard) are rebuilt from it at the
//! start of every combat, so cards created or destroyed mid-combat never
//! leak into the run.
//!
//! Piles are `im::Vector`s: the front of the draw pile is index 0, and a
//! snapshot of any pile is an O(1) clone.

use im::Vector;
use tracing::{debug, trace};

use crate::cards::{Card, CardCatalog, CardId, CardType, Rarity};
use crate::core::config::{CombatConfig, StarterComposition};
use crate::core::{DeckError, GameRng};

/// Which pile a card sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pile {
    Deck,
    Draw,
    Hand,
    Discard,
}

/// Return a shuffled copy of `pile` (Fisher-Yates).
///
/// The input is untouched; an empty input yields an empty output.
pub fn shuffle<T: Clone>(pile: &[T], rng: &mut GameRng) -> Vec<T> {
    let mut out = pile.to_vec();
    rng.shuffle(&mut out);
    out
}

/// Owns the player's cards for a run.
///
/// ## Usage
///
/// ```
/// use rust_spire::cards::CardCatalog;
/// use rust_spire::core::{CombatConfig, GameRng};
/// use rust_spire::zones::DeckEngine;
///
/// let config = CombatConfig::default();
/// let mut deck = DeckEngine::new(&config, GameRng::new(7));
/// deck.create_starter_deck(&CardCatalog::standard(), &config.starter).unwrap();
///
/// deck.reset_for_combat();
/// let drawn = deck.draw_cards(5).unwrap();
/// assert_eq!(drawn.len(), 5);
/// assert_eq!(deck.hand().len() + deck.draw_pile().len(), 10);
/// ```
#[derive(Clone, Debug)]
pub struct DeckEngine {
    deck: Vec<Card>,
    draw_pile: Vector<Card>,
    hand: Vector<Card>,
    discard_pile: Vector<Card>,
    max_hand_size: usize,
    max_deck_size: usize,
    rng: GameRng,
    reshuffles: u32,
}

impl DeckEngine {
    /// Create an empty engine using the limits from `config`.
    #[must_use]
    pub fn new(config: &CombatConfig, rng: GameRng) -> Self {
        Self::with_limits(config.max_hand_size, config.max_deck_size, rng)
    }

    #[must_use]
    pub fn with_limits(max_hand_size: usize, max_deck_size: usize, rng: GameRng) -> Self {
        Self {
            deck: Vec::new(),
            draw_pile: Vector::new(),
            hand: Vector::new(),
            discard_pile: Vector::new(),
            max_hand_size,
            max_deck_size,
            rng,
            reshuffles: 0,
        }
    }

    // === Queries ===

    /// The master deck.
    #[must_use]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    #[must_use]
    pub fn draw_pile(&self) -> &Vector<Card> {
        &self.draw_pile
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<Card> {
        &self.hand
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<Card> {
        &self.discard_pile
    }

    #[must_use]
    pub fn max_hand_size(&self) -> usize {
        self.max_hand_size
    }

    #[must_use]
    pub fn max_deck_size(&self) -> usize {
        self.max_deck_size
    }

    /// Number of cards in a pile.
    #[must_use]
    pub fn pile_size(&self, pile: Pile) -> usize {
        match pile {
            Pile::Deck => self.deck.len(),
            Pile::Draw => self.draw_pile.len(),
            Pile::Hand => self.hand.len(),
            Pile::Discard => self.discard_pile.len(),
        }
    }

    /// Cards across draw pile, hand, and discard pile.
    #[must_use]
    pub fn cards_in_combat(&self) -> usize {
        self.draw_pile.len() + self.hand.len() + self.discard_pile.len()
    }

    /// How many times the discard pile has been shuffled back in.
    #[must_use]
    pub fn reshuffle_count(&self) -> u32 {
        self.reshuffles
    }

    #[must_use]
    pub fn is_hand_full(&self) -> bool {
        self.hand.len() >= self.max_hand_size
    }

    /// Position of the first copy of `id` in hand.
    #[must_use]
    pub fn find_in_hand(&self, id: &CardId) -> Option<usize> {
        self.hand.iter().position(|c| &c.id == id)
    }

    /// Count cards of each type in the master deck.
    #[must_use]
    pub fn type_counts(&self) -> TypeCounts {
        let mut counts = TypeCounts::default();
        for card in &self.deck {
            match card.card_type {
                CardType::Attack => counts.attack += 1,
                CardType::Defense => counts.defense += 1,
                CardType::Skill => counts.skill += 1,
                CardType::Status => counts.status += 1,
            }
        }
        counts
    }

    // === Deck construction ===

    /// Replace the master deck with a starter deck drawn from `catalog`.
    ///
    /// For each type, candidates are taken in catalog order with `basic`
    /// cards first, cycling when the catalog has fewer distinct cards than
    /// the composition asks for.
    pub fn create_starter_deck(
        &mut self,
        catalog: &CardCatalog,
        composition: &StarterComposition,
    ) -> Result<&[Card], DeckError> {
        if catalog.is_empty() {
            return Err(DeckError::CardsNotLoaded);
        }

        let mut deck = Vec::with_capacity(composition.total());
        for (card_type, count) in [
            (CardType::Attack, composition.attack),
            (CardType::Defense, composition.defense),
            (CardType::Skill, composition.skill),
        ] {
            let mut candidates: Vec<&Card> = catalog.find_by_type(card_type).collect();
            // Stable sort keeps catalog order within each group.
            candidates.sort_by_key(|c| c.rarity != Rarity::Basic);

            if candidates.is_empty() && count > 0 {
                return Err(DeckError::StarterDeckInvalid);
            }
            deck.extend(candidates.iter().cycle().take(count).map(|&c| c.clone()));
        }

        if deck.len() != composition.total() || deck.len() > self.max_deck_size {
            return Err(DeckError::StarterDeckInvalid);
        }

        debug!(cards = deck.len(), "starter deck created");
        self.deck = deck;
        Ok(&self.deck)
    }

    /// Add a card to the master deck.
    pub fn add_card_to_deck(&mut self, card: Card) -> Result<(), DeckError> {
        if self.deck.len() >= self.max_deck_size {
            return Err(DeckError::DeckFull);
        }
        debug!(card = %card.id, "card added to deck");
        self.deck.push(card);
        Ok(())
    }

    /// Remove the first copy of `id` from the master deck.
    ///
    /// `min_size` is the floor the caller enforces; removal that would go
    /// below it is rejected.
    pub fn remove_card_from_deck(&mut self, id: &CardId, min_size: usize) -> Result<Card, DeckError> {
        let idx = self
            .deck
            .iter()
            .position(|c| &c.id == id)
            .ok_or(DeckError::CardNotInDeck)?;

        if self.deck.len() <= min_size {
            return Err(DeckError::DeckTooSmall);
        }

        debug!(card = %id, "card removed from deck");
        Ok(self.deck.remove(idx))
    }

    /// Upgrade the first non-upgraded copy of `id` in the master deck.
    pub fn upgrade_card(&mut self, id: &CardId) -> Result<&Card, DeckError> {
        let mut copies = self.deck.iter().enumerate().filter(|(_, c)| &c.id == id).peekable();
        if copies.peek().is_none() {
            return Err(DeckError::CardNotInDeck);
        }

        let idx = copies
            .find(|(_, c)| !c.upgraded)
            .map(|(i, _)| i)
            .ok_or(DeckError::CardAlreadyUpgraded)?;

        self.deck[idx].upgrade()?;
        debug!(card = %id, "card upgraded");
        Ok(&self.deck[idx])
    }

    // === Combat piles ===

    /// Shuffle a pile with this engine's RNG.
    pub fn shuffle_pile(&mut self, pile: &[Card]) -> Vec<Card> {
        shuffle(pile, &mut self.rng)
    }

    /// Empty hand and discard, and rebuild a shuffled draw pile from the deck.
    pub fn reset_for_combat(&mut self) {
        let shuffled = shuffle(&self.deck, &mut self.rng);
        self.draw_pile = shuffled.into_iter().collect();
        self.hand.clear();
        self.discard_pile.clear();
        self.reshuffles = 0;
    }

    /// Draw up to `count` cards from the front of the draw pile.
    ///
    /// The discard pile is shuffled back in at most once per call. Drawing
    /// stops early, without error, when the hand is full or both piles run
    /// dry; the returned cards are the ones actually drawn.
    pub fn draw_cards(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        if count == 0 {
            return Err(DeckError::InvalidDrawCount);
        }

        let mut drawn = Vec::with_capacity(count);
        let mut reshuffled = false;

        for _ in 0..count {
            if self.is_hand_full() {
                trace!("hand full, draw stopped");
                break;
            }

            if self.draw_pile.is_empty() {
                if reshuffled || self.discard_pile.is_empty() {
                    break;
                }
                self.reshuffle_discard();
                reshuffled = true;
            }

            let Some(card) = self.draw_pile.pop_front() else {
                break;
            };
            self.hand.push_back(card.clone());
            drawn.push(card);
        }

        trace!(requested = count, drawn = drawn.len(), "cards drawn");
        Ok(drawn)
    }

    fn reshuffle_discard(&mut self) {
        let discard: Vec<Card> = std::mem::take(&mut self.discard_pile).into_iter().collect();
        let shuffled = shuffle(&discard, &mut self.rng);
        self.draw_pile.extend(shuffled);
        self.reshuffles += 1;
        debug!(cards = self.draw_pile.len(), "discard pile shuffled into draw pile");
    }

    /// Move the hand card at `index` to the discard pile.
    pub fn discard_from_hand(&mut self, index: usize) -> Option<Card> {
        if index >= self.hand.len() {
            return None;
        }
        let card = self.hand.remove(index);
        self.discard_pile.push_back(card.clone());
        Some(card)
    }

    /// Discard the whole hand. Returns the number of cards moved.
    pub fn discard_hand(&mut self) -> usize {
        let count = self.hand.len();
        let hand = std::mem::take(&mut self.hand);
        self.discard_pile.append(hand);
        count
    }

    /// Pay for and discard a card from hand.
    ///
    /// Only the zone move and energy payment happen here; gameplay effects
    /// are the combat session's job.
    pub fn play_card(&mut self, id: &CardId, energy: &mut i32) -> Result<Card, DeckError> {
        let idx = self.find_in_hand(id).ok_or(DeckError::CardNotInHand)?;
        let cost = self.hand[idx].cost;
        if *energy < cost {
            return Err(DeckError::InsufficientEnergy);
        }

        *energy -= cost;
        self.discard_from_hand(idx).ok_or(DeckError::CardNotInHand)
    }
}

/// Card-type histogram of a deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypeCounts {
    pub attack: usize,
    pub defense: usize,
    pub skill: usize,
    pub status: usize,
}

impl TypeCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.attack + self.defense + self.skill + self.status
    }

    /// Share of `count` in the whole deck (0.0 for an empty deck).
    #[must_use]
    pub fn ratio(&self, count: usize) -> f32 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            count as f32 / total as f32
        }
    }
}
