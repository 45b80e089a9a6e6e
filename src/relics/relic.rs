//! Relic templates.
//!
//! A relic is inert data: an id, a name, and one effect descriptor saying
//! when it fires, what it does, and under which condition. Behavior lives
//! in the interpreter.

use serde::{Deserialize, Serialize};

use crate::effects::{StatusKind, Target};

use super::condition::RelicCondition;

/// Unique identifier for a relic template.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelicId(pub String);

impl RelicId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RelicId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for RelicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Point in the combat flow at which a relic is evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerTiming {
    CombatStart,
    TurnStart,
    TurnEnd,
    CardPlay,
    EnemyDeath,
}

impl TriggerTiming {
    pub const ALL: [TriggerTiming; 5] = [
        TriggerTiming::CombatStart,
        TriggerTiming::TurnStart,
        TriggerTiming::TurnEnd,
        TriggerTiming::CardPlay,
        TriggerTiming::EnemyDeath,
    ];
}

impl std::fmt::Display for TriggerTiming {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TriggerTiming::CombatStart => "on_combat_start",
            TriggerTiming::TurnStart => "on_turn_start",
            TriggerTiming::TurnEnd => "on_turn_end",
            TriggerTiming::CardPlay => "on_card_play",
            TriggerTiming::EnemyDeath => "on_enemy_death",
        };
        f.write_str(name)
    }
}

/// What a relic does when it fires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelicEffectKind {
    Heal { value: i32 },
    Armor { value: i32 },
    Energy { value: i32 },
    /// Raises max energy and current energy together.
    MaxEnergy { value: i32 },
    Draw { count: usize },
    /// Flat damage, absorbed by block and armor but unmodified by statuses.
    Damage { value: i32 },
    /// Energy refund whenever an attack card is played.
    EnergyOnAttack { value: i32 },
    /// The next card played this combat costs 0.
    NextCardFree,
    Gold { value: i32 },
    ApplyStatus { status: StatusKind, duration: u32, value: i32 },
}

impl RelicEffectKind {
    /// Side the effect lands on when the descriptor names none.
    #[must_use]
    pub fn default_target(&self) -> Target {
        match self {
            RelicEffectKind::Damage { .. } | RelicEffectKind::ApplyStatus { .. } => Target::Enemy,
            _ => Target::Player,
        }
    }
}

/// Effect descriptor carried by a relic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelicEffect {
    pub timing: TriggerTiming,
    #[serde(flatten)]
    pub kind: RelicEffectKind,
    #[serde(default)]
    pub condition: RelicCondition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    /// Activations allowed per combat. `None` = unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses_per_combat: Option<u32>,
}

impl RelicEffect {
    #[must_use]
    pub fn new(timing: TriggerTiming, kind: RelicEffectKind) -> Self {
        Self {
            timing,
            kind,
            condition: RelicCondition::Always,
            target: None,
            uses_per_combat: None,
        }
    }

    #[must_use]
    pub fn resolved_target(&self) -> Target {
        self.target.unwrap_or_else(|| self.kind.default_target())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelicRarity {
    #[default]
    Common,
    Uncommon,
    Rare,
}

impl RelicRarity {
    /// Base reward weight before archetype bias.
    #[must_use]
    pub fn base_weight(self) -> f32 {
        match self {
            RelicRarity::Common => 60.0,
            RelicRarity::Uncommon => 30.0,
            RelicRarity::Rare => 10.0,
        }
    }
}

/// Deck archetype a relic is tuned for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelicPool {
    #[default]
    Neutral,
    Attack,
    Defense,
    Skill,
}

/// A relic template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relic {
    pub id: RelicId,
    pub name: String,
    pub effect: RelicEffect,
    #[serde(default)]
    pub rarity: RelicRarity,
    #[serde(default)]
    pub pool: RelicPool,
    /// May be owned more than once.
    #[serde(default)]
    pub stackable: bool,
}

impl Relic {
    pub fn new(id: impl Into<String>, name: impl Into<String>, timing: TriggerTiming, kind: RelicEffectKind) -> Self {
        Self {
            id: RelicId::new(id),
            name: name.into(),
            effect: RelicEffect::new(timing, kind),
            rarity: RelicRarity::default(),
            pool: RelicPool::default(),
            stackable: false,
        }
    }

    #[must_use]
    pub fn with_condition(mut self, condition: RelicCondition) -> Self {
        self.effect.condition = condition;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.effect.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_uses_per_combat(mut self, uses: u32) -> Self {
        self.effect.uses_per_combat = Some(uses);
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: RelicRarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_pool(mut self, pool: RelicPool) -> Self {
        self.pool = pool;
        self
    }

    #[must_use]
    pub fn stackable(mut self) -> Self {
        self.stackable = true;
        self
    }

    #[must_use]
    pub fn timing(&self) -> TriggerTiming {
        self.effect.timing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardType;

    #[test]
    fn test_default_targets() {
        assert_eq!(RelicEffectKind::Damage { value: 3 }.default_target(), Target::Enemy);
        assert_eq!(RelicEffectKind::Heal { value: 3 }.default_target(), Target::Player);
    }

    #[test]
    fn test_builder() {
        let relic = Relic::new("r", "R", TriggerTiming::CardPlay, RelicEffectKind::Energy { value: 1 })
            .with_condition(RelicCondition::CardType(CardType::Skill))
            .with_pool(RelicPool::Skill)
            .with_rarity(RelicRarity::Rare)
            .with_uses_per_combat(2);

        assert_eq!(relic.timing(), TriggerTiming::CardPlay);
        assert_eq!(relic.effect.uses_per_combat, Some(2));
        assert_eq!(relic.rarity.base_weight(), 10.0);
        assert!(!relic.stackable);
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{
            "id": "vajra",
            "name": "Vajra",
            "effect": { "timing": "combat_start", "type": "apply_status",
                        "status": "strength", "duration": 99, "value": 1, "target": "player" },
            "rarity": "common",
            "pool": "attack"
        }"#;
        let relic: Relic = serde_json::from_str(json).unwrap();

        assert_eq!(relic.id, RelicId::new("vajra"));
        assert_eq!(relic.effect.resolved_target(), Target::Player);
        assert_eq!(relic.effect.condition, RelicCondition::Always);
        assert_eq!(
            relic.effect.kind,
            RelicEffectKind::ApplyStatus { status: StatusKind::Strength, duration: 99, value: 1 }
        );
    }
}
