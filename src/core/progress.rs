//! Persistent player record.
//!
//! The run-level state the combat core reads and writes between fights:
//! current hp, gold, the deck by card id, and owned relics by relic id.
//! Saving and loading it is someone else's job.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::relics::RelicId;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub hp: i32,
    pub max_hp: i32,
    pub gold: i32,
    pub deck: Vec<CardId>,
    pub relics: Vec<RelicId>,
}

impl PlayerProgress {
    /// A fresh run at full health with nothing collected.
    #[must_use]
    pub fn new(max_hp: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            ..Self::default()
        }
    }

    /// Replace the recorded deck with the ids of `cards`.
    pub fn sync_deck(&mut self, cards: &[Card]) {
        self.deck = cards.iter().map(|c| c.id.clone()).collect();
    }

    pub fn add_gold(&mut self, amount: i32) {
        self.gold = (self.gold + amount).max(0);
    }

    #[must_use]
    pub fn owns_relic(&self, id: &RelicId) -> bool {
        self.relics.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardEffect, CardType};

    #[test]
    fn test_new_is_full_health() {
        let progress = PlayerProgress::new(80);
        assert_eq!((progress.hp, progress.max_hp, progress.gold), (80, 80, 0));
        assert!(progress.deck.is_empty());
    }

    #[test]
    fn test_sync_deck_keeps_order() {
        let mut progress = PlayerProgress::new(80);
        let cards = [
            Card::new("b", "B", CardType::Attack, 1, CardEffect::Damage { value: 1 }),
            Card::new("a", "A", CardType::Defense, 1, CardEffect::Block { value: 1 }),
        ];
        progress.sync_deck(&cards);
        assert_eq!(progress.deck, vec![CardId::new("b"), CardId::new("a")]);
    }

    #[test]
    fn test_gold_never_negative() {
        let mut progress = PlayerProgress::new(80);
        progress.add_gold(10);
        progress.add_gold(-25);
        assert_eq!(progress.gold, 0);
    }
}
