//! Relic reward generation.
//!
//! Candidates are the catalog relics the player does not already own
//! (stackable relics always qualify). Each candidate starts at its rarity
//! weight and is scaled by how well its pool matches the deck's archetype:
//!
//! | Pool    | Multiplier | When                   |
//! |---------|------------|------------------------|
//! | attack  | x1.5       | > 40% of deck attacks  |
//! | defense | x1.3       | > 30% of deck defenses |
//! | skill   | x1.4       | > 40% of deck skills   |
//!
//! Picks are drawn by weighted sampling without replacement.

use tracing::debug;

use crate::core::GameRng;
use crate::zones::TypeCounts;

use super::catalog::RelicCatalog;
use super::registry::RelicEngine;
use super::relic::{Relic, RelicPool};

/// Pool multipliers derived from a deck's type histogram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArchetypeBias {
    pub attack: f32,
    pub defense: f32,
    pub skill: f32,
}

impl Default for ArchetypeBias {
    fn default() -> Self {
        Self {
            attack: 1.0,
            defense: 1.0,
            skill: 1.0,
        }
    }
}

impl ArchetypeBias {
    #[must_use]
    pub fn from_counts(counts: &TypeCounts) -> Self {
        let mut bias = Self::default();
        if counts.ratio(counts.attack) > 0.4 {
            bias.attack = 1.5;
        }
        if counts.ratio(counts.defense) > 0.3 {
            bias.defense = 1.3;
        }
        if counts.ratio(counts.skill) > 0.4 {
            bias.skill = 1.4;
        }
        bias
    }

    #[must_use]
    pub fn multiplier(&self, pool: RelicPool) -> f32 {
        match pool {
            RelicPool::Neutral => 1.0,
            RelicPool::Attack => self.attack,
            RelicPool::Defense => self.defense,
            RelicPool::Skill => self.skill,
        }
    }
}

/// Reward weight of one relic.
#[must_use]
pub fn relic_weight(relic: &Relic, bias: &ArchetypeBias) -> f32 {
    relic.rarity.base_weight() * bias.multiplier(relic.pool)
}

/// Offer up to `count` distinct relics.
///
/// An empty candidate pool yields an empty offer, not an error.
pub fn generate_relic_reward(
    catalog: &RelicCatalog,
    owned: &RelicEngine,
    counts: &TypeCounts,
    count: usize,
    rng: &mut GameRng,
) -> Vec<Relic> {
    let candidates: Vec<&Relic> = catalog
        .iter()
        .filter(|r| r.stackable || !owned.owns(&r.id))
        .collect();
    if candidates.is_empty() || count == 0 {
        return Vec::new();
    }

    let bias = ArchetypeBias::from_counts(counts);
    let weights: Vec<f32> = candidates.iter().map(|r| relic_weight(r, &bias)).collect();

    let offer: Vec<Relic> = rng
        .sample_weighted(&weights, count)
        .into_iter()
        .map(|i| candidates[i].clone())
        .collect();

    debug!(
        candidates = candidates.len(),
        offered = offer.len(),
        ?bias,
        "relic reward generated"
    );
    offer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relics::{RelicEffectKind, RelicRarity, TriggerTiming};

    fn counts(attack: usize, defense: usize, skill: usize) -> TypeCounts {
        TypeCounts {
            attack,
            defense,
            skill,
            status: 0,
        }
    }

    #[test]
    fn test_bias_thresholds() {
        let bias = ArchetypeBias::from_counts(&counts(5, 3, 2));
        assert_eq!(bias.attack, 1.5);
        assert_eq!(bias.defense, 1.0);
        assert_eq!(bias.skill, 1.0);

        // Exactly 40% is not "more than" 40%.
        let bias = ArchetypeBias::from_counts(&counts(4, 2, 4));
        assert_eq!(bias.attack, 1.0);
        assert_eq!(bias.skill, 1.0);

        let bias = ArchetypeBias::from_counts(&counts(2, 4, 4));
        assert_eq!(bias.defense, 1.3);
    }

    #[test]
    fn test_weight_combines_rarity_and_pool() {
        let relic = Relic::new("r", "R", TriggerTiming::TurnEnd, RelicEffectKind::Heal { value: 1 })
            .with_rarity(RelicRarity::Uncommon)
            .with_pool(RelicPool::Attack);
        let bias = ArchetypeBias::from_counts(&counts(6, 2, 2));

        assert!((relic_weight(&relic, &bias) - 45.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_offer_is_distinct_and_unowned() {
        let catalog = RelicCatalog::standard();
        let mut owned = RelicEngine::new();
        owned.grant_from_catalog(&catalog, &"anchor".into()).unwrap();
        let mut rng = GameRng::new(42);

        let offer = generate_relic_reward(&catalog, &owned, &counts(4, 3, 3), 3, &mut rng);

        assert_eq!(offer.len(), 3);
        assert!(offer.iter().all(|r| r.id.as_str() != "anchor"));
        let mut ids: Vec<_> = offer.iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_empty_pool_is_empty_offer() {
        let catalog = RelicCatalog::new();
        let mut rng = GameRng::new(1);
        let offer = generate_relic_reward(&catalog, &RelicEngine::new(), &counts(4, 3, 3), 3, &mut rng);
        assert!(offer.is_empty());
    }

    #[test]
    fn test_offer_capped_by_candidates() {
        let mut catalog = RelicCatalog::new();
        catalog
            .register(Relic::new("only", "Only", TriggerTiming::TurnEnd, RelicEffectKind::Heal { value: 1 }))
            .unwrap();
        let mut rng = GameRng::new(1);

        let offer = generate_relic_reward(&catalog, &RelicEngine::new(), &counts(4, 3, 3), 3, &mut rng);
        assert_eq!(offer.len(), 1);
    }
}
