//! Card effect resolution.
//!
//! `EffectResolver` turns a played card into state changes. Validation is
//! a separate, non-mutating pass so that a rejected play leaves the combat
//! exactly as it was.

use tracing::trace;

use crate::cards::{Card, CardEffect, CardType};
use crate::core::{Combatant, CombatError};
use crate::zones::DeckEngine;

use super::damage::{deal_damage, DamageResolution, Hit};
use super::status::{apply_status, StatusKind};
use super::targeting::Target;

/// Mutable view of the combat handed to the resolver.
///
/// The caster is always the player; `Target::Player` addresses the
/// caster and `Target::Enemy` the opponent.
pub struct ResolverContext<'a> {
    pub caster: &'a mut Combatant,
    pub opponent: &'a mut Combatant,
    pub deck: &'a mut DeckEngine,
    pub combo_bonus_percent: i32,
}

/// What a card did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectReport {
    pub damage: DamageResolution,
    pub block_gained: i32,
    pub armor_gained: i32,
    pub healed: i32,
    pub cards_drawn: usize,
    pub energy_gained: i32,
    pub status_applied: Option<(Target, StatusKind)>,
}

/// Resolves card effects.
pub struct EffectResolver;

impl EffectResolver {
    /// Check that `card` can be played on `target`. Never mutates.
    pub fn validate(card: &Card, target: Target) -> Result<(), CombatError> {
        match card.card_type {
            CardType::Attack => {
                if !card.effect.is_damage() {
                    return Err(CombatError::InvalidEffect);
                }
                Self::validate_effect(&card.effect, target)
            }
            CardType::Defense | CardType::Skill | CardType::Status => {
                Self::validate_effect(&card.effect, target)
            }
        }
    }

    fn validate_effect(effect: &CardEffect, target: Target) -> Result<(), CombatError> {
        match effect {
            CardEffect::Damage { .. } | CardEffect::Vulnerable { .. } => {
                if target != Target::Enemy {
                    return Err(CombatError::InvalidTarget);
                }
            }
            CardEffect::DamageMulti { hits, .. } => {
                if *hits == 0 {
                    return Err(CombatError::InvalidEffect);
                }
                if target != Target::Enemy {
                    return Err(CombatError::InvalidTarget);
                }
            }
            CardEffect::Draw { count: 0 } | CardEffect::DrawEnergy { draw: 0, .. } => {
                return Err(CombatError::InvalidEffect);
            }
            _ => {}
        }
        Ok(())
    }

    /// Execute a validated card.
    ///
    /// Attack and defense cards take their dedicated paths; everything else
    /// goes through the effect switch.
    pub fn execute(card: &Card, target: Target, ctx: &mut ResolverContext) -> EffectReport {
        let mut report = EffectReport::default();

        match (card.card_type, &card.effect) {
            (CardType::Attack, CardEffect::Damage { value }) => {
                report.damage = Self::strike(ctx, card.card_type, *value, 1);
            }
            (CardType::Attack, CardEffect::DamageMulti { value, hits }) => {
                report.damage = Self::strike(ctx, card.card_type, *value, *hits);
            }
            (CardType::Defense, CardEffect::Block { value }) => {
                report.block_gained = Self::gain_block(ctx.caster, *value);
            }
            (CardType::Defense, CardEffect::Armor { value }) => {
                ctx.caster.armor += value;
                report.armor_gained = *value;
            }
            _ => Self::execute_effect(card, target, ctx, &mut report),
        }

        trace!(card = %card.id, ?report, "card effect resolved");
        report
    }

    fn execute_effect(card: &Card, target: Target, ctx: &mut ResolverContext, report: &mut EffectReport) {
        match &card.effect {
            CardEffect::Damage { value } => {
                report.damage = Self::strike(ctx, card.card_type, *value, 1);
            }
            CardEffect::DamageMulti { value, hits } => {
                report.damage = Self::strike(ctx, card.card_type, *value, *hits);
            }
            CardEffect::Block { value } => {
                report.block_gained = Self::gain_block(ctx.caster, *value);
            }
            CardEffect::Armor { value } => {
                ctx.caster.armor += value;
                report.armor_gained = *value;
            }
            CardEffect::ApplyStatus { status, duration, value } => {
                let fighter = match target {
                    Target::Player => &mut *ctx.caster,
                    Target::Enemy => &mut *ctx.opponent,
                };
                apply_status(fighter, *status, *duration, *value);
                report.status_applied = Some((target, *status));
            }
            CardEffect::Vulnerable { duration } => {
                apply_status(ctx.opponent, StatusKind::Vulnerable, *duration, 1);
                report.status_applied = Some((Target::Enemy, StatusKind::Vulnerable));
            }
            CardEffect::Dexterity { value } => {
                apply_status(ctx.caster, StatusKind::Dexterity, u32::MAX, *value);
                report.status_applied = Some((Target::Player, StatusKind::Dexterity));
            }
            CardEffect::Heal { value } => {
                report.healed = ctx.caster.heal(*value);
            }
            CardEffect::Draw { count } => {
                report.cards_drawn = Self::draw(ctx.deck, *count);
            }
            CardEffect::Energy { value } => {
                ctx.caster.energy += value;
                report.energy_gained = *value;
            }
            CardEffect::DrawEnergy { draw, energy } => {
                report.cards_drawn = Self::draw(ctx.deck, *draw);
                ctx.caster.energy += energy;
                report.energy_gained = *energy;
            }
        }
    }

    fn strike(ctx: &mut ResolverContext, card_type: CardType, value: i32, hits: u32) -> DamageResolution {
        let hit = Hit::new(value)
            .from_card(card_type)
            .with_combo_bonus(ctx.combo_bonus_percent);

        let mut total = DamageResolution::default();
        for _ in 0..hits {
            if ctx.opponent.is_dead() {
                break;
            }
            let res = deal_damage(&hit, ctx.caster, ctx.opponent);
            total.accumulate(&res);
        }
        total
    }

    fn gain_block(caster: &mut Combatant, base: i32) -> i32 {
        let gained = (base + caster.status_value(StatusKind::Dexterity)).max(0);
        caster.block += gained;
        gained
    }

    fn draw(deck: &mut DeckEngine, count: usize) -> usize {
        // A zero count was rejected during validation.
        deck.draw_cards(count).map_or(0, |drawn| drawn.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCatalog;
    use crate::core::config::StarterComposition;
    use crate::core::GameRng;

    fn deck() -> DeckEngine {
        let mut deck = DeckEngine::with_limits(10, 20, GameRng::new(5));
        deck.create_starter_deck(&CardCatalog::standard(), &StarterComposition::default())
            .unwrap();
        deck.reset_for_combat();
        deck
    }

    fn run(card: &Card, target: Target, caster: &mut Combatant, opponent: &mut Combatant) -> EffectReport {
        let mut deck = deck();
        let mut ctx = ResolverContext {
            caster,
            opponent,
            deck: &mut deck,
            combo_bonus_percent: 10,
        };
        EffectResolver::execute(card, target, &mut ctx)
    }

    #[test]
    fn test_attack_must_target_enemy() {
        let card = Card::new("strike", "Strike", CardType::Attack, 1, CardEffect::Damage { value: 6 });
        assert_eq!(EffectResolver::validate(&card, Target::Player), Err(CombatError::InvalidTarget));
        assert_eq!(EffectResolver::validate(&card, Target::Enemy), Ok(()));
    }

    #[test]
    fn test_attack_without_damage_is_invalid() {
        let card = Card::new("odd", "Odd", CardType::Attack, 1, CardEffect::Heal { value: 3 });
        assert_eq!(EffectResolver::validate(&card, Target::Enemy), Err(CombatError::InvalidEffect));
    }

    #[test]
    fn test_zero_draw_is_invalid() {
        let card = Card::new("nothing", "Nothing", CardType::Skill, 0, CardEffect::Draw { count: 0 });
        assert_eq!(EffectResolver::validate(&card, Target::Player), Err(CombatError::InvalidEffect));
    }

    #[test]
    fn test_attack_damages_opponent() {
        let card = Card::new("strike", "Strike", CardType::Attack, 1, CardEffect::Damage { value: 6 });
        let mut caster = Combatant::new(100, 3);
        let mut opponent = Combatant::new(30, 0);

        let report = run(&card, Target::Enemy, &mut caster, &mut opponent);

        assert_eq!(report.damage.hp_damage, 6);
        assert_eq!(opponent.hp, 24);
    }

    #[test]
    fn test_multi_hit_accumulates() {
        let card = Card::new("twin", "Twin", CardType::Attack, 1, CardEffect::DamageMulti { value: 5, hits: 2 });
        let mut caster = Combatant::new(100, 3);
        let mut opponent = Combatant::new(30, 0);
        opponent.block = 3;

        let report = run(&card, Target::Enemy, &mut caster, &mut opponent);

        assert_eq!(report.damage.block_consumed, 3);
        assert_eq!(report.damage.hp_damage, 7);
        assert_eq!(opponent.hp, 23);
    }

    #[test]
    fn test_block_adds_dexterity() {
        let card = Card::new("defend", "Defend", CardType::Defense, 1, CardEffect::Block { value: 5 });
        let mut caster = Combatant::new(100, 3);
        apply_status(&mut caster, StatusKind::Dexterity, 3, 2);
        let mut opponent = Combatant::new(30, 0);

        let report = run(&card, Target::Player, &mut caster, &mut opponent);

        assert_eq!(report.block_gained, 7);
        assert_eq!(caster.block, 7);
    }

    #[test]
    fn test_status_goes_to_chosen_target() {
        let card = Card::new(
            "poison",
            "Poison",
            CardType::Skill,
            1,
            CardEffect::ApplyStatus { status: StatusKind::Poison, duration: 3, value: 3 },
        );
        let mut caster = Combatant::new(100, 3);
        let mut opponent = Combatant::new(30, 0);

        run(&card, Target::Enemy, &mut caster, &mut opponent);

        assert_eq!(opponent.status_value(StatusKind::Poison), 3);
        assert!(!caster.has_status(StatusKind::Poison));
    }

    #[test]
    fn test_draw_energy() {
        let card = Card::new("adr", "Adrenaline", CardType::Skill, 0, CardEffect::DrawEnergy { draw: 2, energy: 1 });
        let mut caster = Combatant::new(100, 3);
        let mut opponent = Combatant::new(30, 0);

        let report = run(&card, Target::Player, &mut caster, &mut opponent);

        assert_eq!(report.cards_drawn, 2);
        assert_eq!(caster.energy, 4);
    }

    #[test]
    fn test_heal_caps() {
        let card = Card::new("bandage", "Bandage", CardType::Skill, 1, CardEffect::Heal { value: 10 });
        let mut caster = Combatant::new(100, 3);
        caster.hp = 95;
        let mut opponent = Combatant::new(30, 0);

        let report = run(&card, Target::Player, &mut caster, &mut opponent);
        assert_eq!(report.healed, 5);
    }
}
