//! Owned relics and timing dispatch.
//!
//! `RelicEngine` stores the relics the player owns, in grant order, plus a
//! `timing -> [relic]` index used to fire them. The index is rebuilt
//! whenever a relic is granted or removed, so lookups at fire time are a
//! single map access. Relics for one timing always fire in grant order.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::core::RelicError;

use super::catalog::RelicCatalog;
use super::interpreter::{apply_effect, RelicActivation, RelicCombatState, TriggerContext};
use super::relic::{Relic, RelicId, TriggerTiming};

/// The player's relics and their per-combat state.
///
/// ## Example
///
/// ```
/// use rust_spire::relics::{Relic, RelicEffectKind, RelicEngine, TriggerTiming};
///
/// let mut relics = RelicEngine::new();
/// relics
///     .grant(Relic::new("salve", "Salve", TriggerTiming::TurnEnd, RelicEffectKind::Heal { value: 2 }))
///     .unwrap();
///
/// assert_eq!(relics.relics_for(TriggerTiming::TurnEnd).count(), 1);
/// assert_eq!(relics.relics_for(TriggerTiming::TurnStart).count(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RelicEngine {
    owned: Vec<Relic>,
    by_timing: FxHashMap<TriggerTiming, Vec<usize>>,
    combat: RelicCombatState,
}

impl RelicEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relic. Non-stackable relics can only be owned once.
    pub fn grant(&mut self, relic: Relic) -> Result<(), RelicError> {
        if !relic.stackable && self.owns(&relic.id) {
            return Err(RelicError::RelicAlreadyOwned);
        }
        debug!(relic = %relic.id, timing = %relic.timing(), "relic granted");
        self.owned.push(relic);
        self.rebuild_index();
        Ok(())
    }

    /// Look a relic up in `catalog` and grant a copy of it.
    pub fn grant_from_catalog(&mut self, catalog: &RelicCatalog, id: &RelicId) -> Result<&Relic, RelicError> {
        let relic = catalog.get(id).cloned().ok_or(RelicError::RelicNotFound)?;
        self.grant(relic)?;
        self.owned.last().ok_or(RelicError::RelicNotFound)
    }

    /// Remove the most recently granted copy of a relic.
    pub fn remove(&mut self, id: &RelicId) -> Result<Relic, RelicError> {
        let index = self
            .owned
            .iter()
            .rposition(|r| &r.id == id)
            .ok_or(RelicError::RelicNotOwned)?;
        let relic = self.owned.remove(index);
        self.rebuild_index();
        debug!(relic = %relic.id, "relic removed");
        Ok(relic)
    }

    fn rebuild_index(&mut self) {
        self.by_timing.clear();
        for (i, relic) in self.owned.iter().enumerate() {
            self.by_timing.entry(relic.timing()).or_default().push(i);
        }
    }

    #[must_use]
    pub fn owns(&self, id: &RelicId) -> bool {
        self.owned.iter().any(|r| &r.id == id)
    }

    #[must_use]
    pub fn owned(&self) -> &[Relic] {
        &self.owned
    }

    #[must_use]
    pub fn owned_ids(&self) -> Vec<RelicId> {
        self.owned.iter().map(|r| r.id.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.owned.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }

    /// Relics listening on `timing`, in grant order.
    pub fn relics_for(&self, timing: TriggerTiming) -> impl Iterator<Item = &Relic> {
        self.by_timing
            .get(&timing)
            .into_iter()
            .flatten()
            .map(|&i| &self.owned[i])
    }

    /// Clear one-shot flags and activation counters.
    pub fn reset_combat_state(&mut self) {
        self.combat = RelicCombatState::default();
        trace!("relic combat state reset");
    }

    #[must_use]
    pub fn combat_state(&self) -> &RelicCombatState {
        &self.combat
    }

    #[must_use]
    pub fn next_card_free(&self) -> bool {
        self.combat.next_card_free
    }

    /// Consume the "next card free" flag. Returns whether it was set.
    pub fn take_next_card_free(&mut self) -> bool {
        std::mem::take(&mut self.combat.next_card_free)
    }

    /// Fire every relic registered for `timing`, in grant order.
    pub fn fire(&mut self, timing: TriggerTiming, ctx: &mut TriggerContext) -> Vec<RelicActivation> {
        let Some(indices) = self.by_timing.get(&timing) else {
            return Vec::new();
        };

        let mut fired = Vec::new();
        for &i in indices {
            if let Some(activation) = apply_effect(&self.owned[i], ctx, &mut self.combat) {
                fired.push(activation);
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Combatant, GameRng, PlayerProgress};
    use crate::relics::{RelicEffectKind, RelicOutcome, TriggerExtra};
    use crate::zones::DeckEngine;

    fn heal(id: &str, value: i32) -> Relic {
        Relic::new(id, id, TriggerTiming::TurnEnd, RelicEffectKind::Heal { value })
    }

    #[test]
    fn test_grant_rejects_duplicate() {
        let mut relics = RelicEngine::new();
        relics.grant(heal("salve", 2)).unwrap();
        assert_eq!(relics.grant(heal("salve", 2)), Err(RelicError::RelicAlreadyOwned));
        assert_eq!(relics.len(), 1);
    }

    #[test]
    fn test_stackable_may_repeat() {
        let mut relics = RelicEngine::new();
        relics.grant(heal("salve", 2).stackable()).unwrap();
        relics.grant(heal("salve", 2).stackable()).unwrap();
        assert_eq!(relics.relics_for(TriggerTiming::TurnEnd).count(), 2);
    }

    #[test]
    fn test_remove_rebuilds_index() {
        let mut relics = RelicEngine::new();
        relics.grant(heal("a", 1)).unwrap();
        relics.grant(heal("b", 1)).unwrap();

        relics.remove(&"a".into()).unwrap();

        let ids: Vec<_> = relics.relics_for(TriggerTiming::TurnEnd).map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
        assert_eq!(relics.remove(&"a".into()), Err(RelicError::RelicNotOwned));
    }

    #[test]
    fn test_grant_from_catalog() {
        let catalog = RelicCatalog::standard();
        let mut relics = RelicEngine::new();

        assert!(relics.grant_from_catalog(&catalog, &"burning_blood".into()).is_ok());
        assert_eq!(
            relics.grant_from_catalog(&catalog, &"no_such_relic".into()).err(),
            Some(RelicError::RelicNotFound)
        );
    }

    #[test]
    fn test_fire_in_grant_order() {
        let mut relics = RelicEngine::new();
        relics.grant(heal("first", 1)).unwrap();
        relics
            .grant(Relic::new("armor", "Armor", TriggerTiming::TurnEnd, RelicEffectKind::Armor { value: 2 }))
            .unwrap();
        relics.grant(heal("second", 1)).unwrap();

        let mut player = Combatant::new(100, 3);
        player.hp = 50;
        let mut enemy = Combatant::new(30, 0);
        let mut deck = DeckEngine::with_limits(10, 20, GameRng::new(1));
        let mut progress = PlayerProgress::new(100);
        let mut ctx = TriggerContext {
            player: &mut player,
            enemy: &mut enemy,
            deck: &mut deck,
            progress: &mut progress,
            turn: 1,
            extra: TriggerExtra::default(),
        };

        let fired = relics.fire(TriggerTiming::TurnEnd, &mut ctx);

        let order: Vec<_> = fired.iter().map(|a| a.relic.as_str()).collect();
        assert_eq!(order, vec!["first", "armor", "second"]);
        assert!(matches!(fired[1].outcome, RelicOutcome::ArmorGained { amount: 2, .. }));
        assert_eq!(player.hp, 52);
    }

    #[test]
    fn test_reset_clears_next_card_free() {
        let mut relics = RelicEngine::new();
        relics.combat.next_card_free = true;
        relics.reset_combat_state();
        assert!(!relics.next_card_free());
    }

    #[test]
    fn test_take_next_card_free_once() {
        let mut relics = RelicEngine::new();
        relics.combat.next_card_free = true;
        assert!(relics.take_next_card_free());
        assert!(!relics.take_next_card_free());
    }
}
