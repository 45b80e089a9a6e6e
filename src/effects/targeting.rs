//! Card targets.
//!
//! In a one-on-one fight a card can only target the player (its caster)
//! or the enemy. UI collaborators send targets as strings; anything other
//! than `"player"` or `"enemy"` is rejected with `ERR_INVALID_TARGET`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::CombatError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Player,
    Enemy,
}

impl Target {
    /// The other side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Target::Player => Target::Enemy,
            Target::Enemy => Target::Player,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Player => "player",
            Target::Enemy => "enemy",
        }
    }
}

impl FromStr for Target {
    type Err = CombatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player" => Ok(Target::Player),
            "enemy" => Ok(Target::Enemy),
            _ => Err(CombatError::InvalidTarget),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
