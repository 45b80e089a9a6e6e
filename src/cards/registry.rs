//! Card catalog for template lookup.
//!
//! The `CardCatalog` stores every card template known to a run. It keeps
//! registration order so that anything selecting "the first N cards of a
//! type" is deterministic.

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId, CardType, Rarity, MAX_CARD_COST};
use super::effect::CardEffect;
use crate::core::CatalogError;
use crate::effects::StatusKind;

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use rust_spire::cards::{Card, CardCatalog, CardEffect, CardType};
///
/// let mut catalog = CardCatalog::new();
/// catalog
///     .register(Card::new("strike", "Strike", CardType::Attack, 1, CardEffect::Damage { value: 6 }))
///     .unwrap();
///
/// assert_eq!(catalog.get(&"strike".into()).unwrap().name, "Strike");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
    index: FxHashMap<CardId, usize>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load templates from a JSON array of cards.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for card in cards {
            catalog.register(card)?;
        }
        Ok(catalog)
    }

    /// Register a card template. Ids must be unique and the cost must lie
    /// in `0..=MAX_CARD_COST`.
    pub fn register(&mut self, card: Card) -> Result<(), CatalogError> {
        if self.index.contains_key(&card.id) {
            return Err(CatalogError::DuplicateId(card.id.0));
        }
        if !(0..=MAX_CARD_COST).contains(&card.cost) {
            return Err(CatalogError::InvalidCard(format!("{}: cost {}", card.id.0, card.cost)));
        }
        self.index.insert(card.id.clone(), self.cards.len());
        self.cards.push(card);
        Ok(())
    }

    /// Get a template by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    /// Get a fresh copy of a template by ID.
    #[must_use]
    pub fn instantiate(&self, id: &CardId) -> Option<Card> {
        self.get(id).cloned()
    }

    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Find templates by type, in registration order.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.card_type == card_type)
    }

    /// The built-in card set.
    #[must_use]
    pub fn standard() -> Self {
        use CardEffect as E;
        use CardType::{Attack, Defense, Skill, Status};

        let cards = [
            Card::new("strike", "Strike", Attack, 1, E::Damage { value: 6 }).with_rarity(Rarity::Basic),
            Card::new("bash", "Bash", Attack, 2, E::Damage { value: 10 }).with_rarity(Rarity::Basic),
            Card::new("twin_strike", "Twin Strike", Attack, 1, E::DamageMulti { value: 5, hits: 2 }),
            Card::new("heavy_blade", "Heavy Blade", Attack, 2, E::Damage { value: 14 }).with_rarity(Rarity::Uncommon),
            Card::new("whirlwind", "Whirlwind", Attack, 3, E::DamageMulti { value: 6, hits: 3 }).with_rarity(Rarity::Rare),
            Card::new("defend", "Defend", Defense, 1, E::Block { value: 5 }).with_rarity(Rarity::Basic),
            Card::new("shrug", "Shrug It Off", Defense, 1, E::Block { value: 8 }),
            Card::new("iron_skin", "Iron Skin", Defense, 2, E::Armor { value: 4 }).with_rarity(Rarity::Uncommon),
            Card::new("quick_draw", "Quick Draw", Skill, 1, E::Draw { count: 2 }).with_rarity(Rarity::Basic),
            Card::new("focus", "Focus", Skill, 0, E::Energy { value: 1 }),
            Card::new("expose", "Expose", Skill, 1, E::Vulnerable { duration: 2 }).with_rarity(Rarity::Basic),
            Card::new("adrenaline", "Adrenaline", Skill, 0, E::DrawEnergy { draw: 1, energy: 1 }).with_rarity(Rarity::Rare),
            Card::new("bandage", "Bandage", Skill, 1, E::Heal { value: 6 }),
            Card::new(
                "poison_stab",
                "Poison Stab",
                Skill,
                1,
                E::ApplyStatus { status: StatusKind::Poison, duration: 3, value: 3 },
            ),
            Card::new(
                "flex",
                "Flex",
                Skill,
                0,
                E::ApplyStatus { status: StatusKind::Strength, duration: 2, value: 2 },
            )
            .with_rarity(Rarity::Uncommon),
            Card::new("footwork", "Footwork", Skill, 1, E::Dexterity { value: 2 }).with_rarity(Rarity::Uncommon),
            Card::new(
                "wound",
                "Wound",
                Status,
                0,
                E::ApplyStatus { status: StatusKind::Burn, duration: 1, value: 1 },
            ),
        ];

        let mut catalog = Self::new();
        for card in cards {
            // Ids above are distinct literals and every cost is in range.
            let _ = catalog.register(card);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strike() -> Card {
        Card::new("strike", "Strike", CardType::Attack, 1, CardEffect::Damage { value: 6 })
    }

    #[test]
    fn test_register_and_get() {
        let mut catalog = CardCatalog::new();
        catalog.register(strike()).unwrap();

        assert!(catalog.contains(&"strike".into()));
        assert!(catalog.get(&"missing".into()).is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalog = CardCatalog::new();
        catalog.register(strike()).unwrap();

        let err = catalog.register(strike()).unwrap_err();
        assert_eq!(err.code(), "ERR_DUPLICATE_ID");
    }

    #[test]
    fn test_find_by_type_keeps_order() {
        let catalog = CardCatalog::standard();
        let attacks: Vec<_> = catalog.find_by_type(CardType::Attack).map(|c| c.id.as_str()).collect();
        assert_eq!(attacks[0], "strike");
        assert_eq!(attacks[1], "bash");
    }

    #[test]
    fn test_standard_catalog_covers_starter_types() {
        let catalog = CardCatalog::standard();
        assert!(catalog.find_by_type(CardType::Attack).count() >= 4);
        assert!(catalog.find_by_type(CardType::Defense).count() >= 3);
        assert!(catalog.find_by_type(CardType::Skill).count() >= 3);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            { "id": "strike", "name": "Strike", "type": "attack", "cost": 1,
              "effect": { "type": "damage", "value": 6 } },
            { "id": "defend", "name": "Defend", "type": "defense", "cost": 1,
              "effect": { "type": "block", "value": 5 } }
        ]"#;

        let catalog = CardCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.instantiate(&"defend".into()).unwrap().cost, 1);
    }

    #[test]
    fn test_cost_out_of_range_rejected() {
        let card_with_cost = |cost: i32| {
            format!(
                r#"[{{ "id": "odd", "name": "Odd", "type": "attack", "cost": {cost},
                      "effect": {{ "type": "damage", "value": 6 }} }}]"#
            )
        };

        for cost in [-1, 4] {
            let err = CardCatalog::from_json(&card_with_cost(cost)).unwrap_err();
            assert_eq!(err.code(), "ERR_INVALID_CARD");
            assert!(matches!(err, CatalogError::InvalidCard(msg) if msg.contains("odd")));
        }

        for cost in [0, MAX_CARD_COST] {
            assert_eq!(CardCatalog::from_json(&card_with_cost(cost)).unwrap().len(), 1);
        }
    }

    #[test]
    fn test_standard_costs_in_range() {
        let catalog = CardCatalog::standard();
        assert!(catalog.iter().all(|c| (0..=MAX_CARD_COST).contains(&c.cost)));
    }
}
