//! Relic catalog.

use rustc_hash::FxHashMap;

use crate::cards::CardType;
use crate::core::CatalogError;
use crate::effects::{StatusKind, Target};

use super::condition::RelicCondition;
use super::relic::{Relic, RelicEffectKind, RelicId, RelicPool, RelicRarity, TriggerTiming};

/// Registry of relic templates, in registration order.
#[derive(Clone, Debug, Default)]
pub struct RelicCatalog {
    relics: Vec<Relic>,
    index: FxHashMap<RelicId, usize>,
}

impl RelicCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load templates from a JSON array of relics.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let relics: Vec<Relic> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for relic in relics {
            catalog.register(relic)?;
        }
        Ok(catalog)
    }

    pub fn register(&mut self, relic: Relic) -> Result<(), CatalogError> {
        if self.index.contains_key(&relic.id) {
            return Err(CatalogError::DuplicateId(relic.id.0));
        }
        self.index.insert(relic.id.clone(), self.relics.len());
        self.relics.push(relic);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &RelicId) -> Option<&Relic> {
        self.index.get(id).map(|&i| &self.relics[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.relics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relic> {
        self.relics.iter()
    }

    /// The built-in relic set.
    #[must_use]
    pub fn standard() -> Self {
        use RelicEffectKind as K;
        use TriggerTiming::{CardPlay, CombatStart, EnemyDeath, TurnEnd, TurnStart};

        let relics = [
            Relic::new("burning_blood", "Burning Blood", EnemyDeath, K::Heal { value: 6 }),
            Relic::new("meat_on_the_bone", "Meat on the Bone", TurnEnd, K::Heal { value: 2 })
                .with_rarity(RelicRarity::Uncommon)
                .with_pool(RelicPool::Defense),
            Relic::new("anchor", "Anchor", TurnStart, K::Armor { value: 10 })
                .with_condition(RelicCondition::FirstTurn)
                .with_pool(RelicPool::Defense),
            Relic::new("orichalcum", "Orichalcum", TurnEnd, K::Armor { value: 3 })
                .with_rarity(RelicRarity::Uncommon)
                .with_pool(RelicPool::Defense),
            Relic::new("lantern", "Lantern", TurnStart, K::Energy { value: 1 })
                .with_condition(RelicCondition::FirstTurn)
                .with_pool(RelicPool::Skill),
            Relic::new("happy_flower", "Happy Flower", TurnStart, K::Energy { value: 1 })
                .with_condition(RelicCondition::Turns(vec![3, 6, 9, 12, 15, 18, 21, 24, 27, 30]))
                .with_pool(RelicPool::Skill),
            Relic::new("cursed_key", "Cursed Key", CombatStart, K::MaxEnergy { value: 1 })
                .with_rarity(RelicRarity::Rare),
            Relic::new("bag_of_preparation", "Bag of Preparation", TurnStart, K::Draw { count: 2 })
                .with_condition(RelicCondition::FirstTurn)
                .with_pool(RelicPool::Skill),
            Relic::new("bag_of_marbles", "Bag of Marbles", CombatStart, K::ApplyStatus {
                status: StatusKind::Vulnerable,
                duration: 1,
                value: 1,
            })
            .with_pool(RelicPool::Attack),
            Relic::new("vajra", "Vajra", CombatStart, K::ApplyStatus {
                status: StatusKind::Strength,
                duration: u32::MAX,
                value: 1,
            })
            .with_target(Target::Player)
            .with_pool(RelicPool::Attack),
            Relic::new("mercury_hourglass", "Mercury Hourglass", TurnStart, K::Damage { value: 3 })
                .with_rarity(RelicRarity::Uncommon)
                .with_pool(RelicPool::Attack),
            Relic::new("kunai", "Kunai", CardPlay, K::EnergyOnAttack { value: 1 })
                .with_uses_per_combat(1)
                .with_rarity(RelicRarity::Rare)
                .with_pool(RelicPool::Attack),
            Relic::new("letter_opener", "Letter Opener", CardPlay, K::Damage { value: 5 })
                .with_condition(RelicCondition::CardType(CardType::Skill))
                .with_rarity(RelicRarity::Uncommon)
                .with_pool(RelicPool::Skill),
            Relic::new("slippers", "Slippers", CombatStart, K::NextCardFree)
                .with_pool(RelicPool::Skill),
            Relic::new("golden_idol", "Golden Idol", EnemyDeath, K::Gold { value: 25 })
                .with_rarity(RelicRarity::Uncommon),
            Relic::new("snecko_skull", "Snecko Skull", EnemyDeath, K::Energy { value: 1 })
                .with_rarity(RelicRarity::Rare)
                .stackable(),
        ];

        let mut catalog = Self::new();
        for relic in relics {
            // Built-in ids are unique.
            let _ = catalog.register(relic);
        }
        catalog
    }
}
