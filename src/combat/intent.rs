//! Enemy templates and intent selection.
//!
//! An intent is declared before the player acts and executed verbatim on
//! the enemy turn. Selection is a weighted draw biased by the enemy's hp:
//!
//! | hp ratio   | attack | defend | skill |
//! |------------|--------|--------|-------|
//! | < 0.3      | 30     | 20     | 50    |
//! | < 0.6      | 40     | 40     | 20    |
//! | otherwise  | 60     | 20     | 20    |
//!
//! Enemies without skills never roll a skill intent.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CatalogError, Combatant, GameRng};

/// Something an enemy can do besides attacking or defending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnemySkill {
    /// Poison the player.
    Poison { value: i32, duration: u32 },
    /// Burn the player.
    Burn { value: i32, duration: u32 },
    /// Make the player vulnerable.
    Expose { duration: u32 },
    /// Gain strength.
    Enrage { value: i32, duration: u32 },
    /// Heal self.
    Regenerate { value: i32 },
}

impl std::fmt::Display for EnemySkill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnemySkill::Poison { value, duration } => write!(f, "poison {value} for {duration} turns"),
            EnemySkill::Burn { value, duration } => write!(f, "burn {value}% for {duration} turns"),
            EnemySkill::Expose { duration } => write!(f, "expose for {duration} turns"),
            EnemySkill::Enrage { value, .. } => write!(f, "enrage +{value}"),
            EnemySkill::Regenerate { value } => write!(f, "regenerate {value}"),
        }
    }
}

/// Behavior profile nudging intent weights.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiType {
    #[default]
    Balanced,
    /// +20 attack weight.
    Aggressive,
    /// +20 defend weight.
    Defensive,
}

/// Enemy template as supplied by level configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyConfig {
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub attack: i32,
    #[serde(default)]
    pub armor: i32,
    #[serde(default)]
    pub skills: Vec<EnemySkill>,
    #[serde(default)]
    pub ai_type: AiType,
}

impl EnemyConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>, hp: i32, attack: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hp,
            attack,
            armor: 0,
            skills: Vec::new(),
            ai_type: AiType::default(),
        }
    }

    #[must_use]
    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: EnemySkill) -> Self {
        self.skills.push(skill);
        self
    }

    #[must_use]
    pub fn with_ai(mut self, ai_type: AiType) -> Self {
        self.ai_type = ai_type;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fresh combatant for this template. Enemies have no energy.
    #[must_use]
    pub fn spawn(&self) -> Combatant {
        Combatant::new(self.hp, 0).with_armor(self.armor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Attack,
    Defend,
    Skill,
}

/// A declared enemy action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    Attack { damage: i32 },
    Defend { armor: i32 },
    Skill { skill: EnemySkill },
}

impl Intent {
    #[must_use]
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::Attack { .. } => IntentKind::Attack,
            Intent::Defend { .. } => IntentKind::Defend,
            Intent::Skill { .. } => IntentKind::Skill,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Attack { damage } => write!(f, "attack for {damage}"),
            Intent::Defend { armor } => write!(f, "defend for {armor} armor"),
            Intent::Skill { skill } => write!(f, "use {skill}"),
        }
    }
}

/// Attack/defend/skill weights for an enemy at its current hp.
#[must_use]
pub fn intent_weights(config: &EnemyConfig, enemy: &Combatant) -> [f32; 3] {
    let ratio = if enemy.max_hp > 0 {
        enemy.hp as f32 / enemy.max_hp as f32
    } else {
        0.0
    };

    let mut weights = if ratio < 0.3 {
        [30.0, 20.0, 50.0]
    } else if ratio < 0.6 {
        [40.0, 40.0, 20.0]
    } else {
        [60.0, 20.0, 20.0]
    };

    match config.ai_type {
        AiType::Balanced => {}
        AiType::Aggressive => weights[0] += 20.0,
        AiType::Defensive => weights[1] += 20.0,
    }
    if config.skills.is_empty() {
        weights[2] = 0.0;
    }
    weights
}

/// Roll the next intent.
pub fn choose_intent(config: &EnemyConfig, enemy: &Combatant, rng: &mut GameRng) -> Intent {
    let weights = intent_weights(config, enemy);

    let intent = match rng.choose_weighted(&weights) {
        Some(1) => Intent::Defend {
            armor: (config.attack / 2).max(1),
        },
        Some(2) => match rng.choose(&config.skills) {
            Some(skill) => Intent::Skill { skill: *skill },
            None => Intent::Attack { damage: config.attack },
        },
        _ => Intent::Attack { damage: config.attack },
    };

    debug!(enemy = %config.id, hp = enemy.hp, %intent, "intent chosen");
    intent
}

/// One declared intent and what was actually done.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntentRecord {
    pub turn: u32,
    pub declared: Intent,
    pub executed: Option<Intent>,
}

/// Audits that every executed enemy action matches its declaration.
#[derive(Clone, Debug, Default)]
pub struct IntentTracker {
    records: Vec<IntentRecord>,
}

impl IntentTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, turn: u32, intent: Intent) {
        self.records.push(IntentRecord {
            turn,
            declared: intent,
            executed: None,
        });
    }

    /// Record the action performed for the latest declaration.
    pub fn execute(&mut self, intent: Intent) {
        if let Some(record) = self.records.last_mut() {
            record.executed = Some(intent);
        }
    }

    #[must_use]
    pub fn records(&self) -> &[IntentRecord] {
        &self.records
    }

    /// Executed actions that differ from what was declared.
    pub fn mismatches(&self) -> impl Iterator<Item = &IntentRecord> {
        self.records
            .iter()
            .filter(|r| r.executed.is_some_and(|done| done != r.declared))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
