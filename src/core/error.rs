//! Error kinds for each engine component.
//!
//! The `Display` output of every validation error is its stable `ERR_`
//! code, which UI collaborators pattern-match on. `code()` returns the
//! same string without allocating.
//!
//! Running out of cards, a full hand, or an empty reward pool are not
//! errors and never appear here. Neither are combat outcomes.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("ERR_CARDS_NOT_LOADED")]
    CardsNotLoaded,
    #[error("ERR_STARTER_DECK_INVALID")]
    StarterDeckInvalid,
    #[error("ERR_CARD_NOT_IN_HAND")]
    CardNotInHand,
    #[error("ERR_INSUFFICIENT_ENERGY")]
    InsufficientEnergy,
    #[error("ERR_DECK_FULL")]
    DeckFull,
    #[error("ERR_CARD_NOT_IN_DECK")]
    CardNotInDeck,
    #[error("ERR_DECK_TOO_SMALL")]
    DeckTooSmall,
    #[error("ERR_CARD_ALREADY_UPGRADED")]
    CardAlreadyUpgraded,
    #[error("ERR_INVALID_DRAW_COUNT")]
    InvalidDrawCount,
}

impl DeckError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::CardsNotLoaded => "ERR_CARDS_NOT_LOADED",
            Self::StarterDeckInvalid => "ERR_STARTER_DECK_INVALID",
            Self::CardNotInHand => "ERR_CARD_NOT_IN_HAND",
            Self::InsufficientEnergy => "ERR_INSUFFICIENT_ENERGY",
            Self::DeckFull => "ERR_DECK_FULL",
            Self::CardNotInDeck => "ERR_CARD_NOT_IN_DECK",
            Self::DeckTooSmall => "ERR_DECK_TOO_SMALL",
            Self::CardAlreadyUpgraded => "ERR_CARD_ALREADY_UPGRADED",
            Self::InvalidDrawCount => "ERR_INVALID_DRAW_COUNT",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CombatError {
    #[error("ERR_INVALID_TARGET")]
    InvalidTarget,
    #[error("ERR_INSUFFICIENT_ENERGY")]
    InsufficientEnergy,
    #[error("ERR_INVALID_EFFECT")]
    InvalidEffect,
    #[error("ERR_NOT_IN_COMBAT")]
    NotInCombat,
    #[error("ERR_NOT_PLAYER_TURN")]
    NotPlayerTurn,
    #[error("ERR_NOT_ENEMY_TURN")]
    NotEnemyTurn,
    #[error(transparent)]
    Deck(#[from] DeckError),
}

impl CombatError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTarget => "ERR_INVALID_TARGET",
            Self::InsufficientEnergy => "ERR_INSUFFICIENT_ENERGY",
            Self::InvalidEffect => "ERR_INVALID_EFFECT",
            Self::NotInCombat => "ERR_NOT_IN_COMBAT",
            Self::NotPlayerTurn => "ERR_NOT_PLAYER_TURN",
            Self::NotEnemyTurn => "ERR_NOT_ENEMY_TURN",
            Self::Deck(inner) => inner.code(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelicError {
    #[error("ERR_RELIC_NOT_FOUND")]
    RelicNotFound,
    #[error("ERR_RELIC_ALREADY_OWNED")]
    RelicAlreadyOwned,
    #[error("ERR_RELIC_NOT_OWNED")]
    RelicNotOwned,
}

impl RelicError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::RelicNotFound => "ERR_RELIC_NOT_FOUND",
            Self::RelicAlreadyOwned => "ERR_RELIC_ALREADY_OWNED",
            Self::RelicNotOwned => "ERR_RELIC_NOT_OWNED",
        }
    }
}

/// Errors raised while loading catalogs or configuration.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("ERR_CATALOG_PARSE: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("ERR_DUPLICATE_ID: {0}")]
    DuplicateId(String),
    #[error("ERR_INVALID_CARD: {0}")]
    InvalidCard(String),
}

impl CatalogError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "ERR_CATALOG_PARSE",
            Self::DuplicateId(_) => "ERR_DUPLICATE_ID",
            Self::InvalidCard(_) => "ERR_INVALID_CARD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_stable_code() {
        assert_eq!(CombatError::InvalidTarget.to_string(), "ERR_INVALID_TARGET");
        assert_eq!(DeckError::InsufficientEnergy.to_string(), "ERR_INSUFFICIENT_ENERGY");
        assert_eq!(RelicError::RelicAlreadyOwned.to_string(), "ERR_RELIC_ALREADY_OWNED");
    }

    #[test]
    fn test_code_matches_display() {
        let all = [
            DeckError::CardsNotLoaded,
            DeckError::StarterDeckInvalid,
            DeckError::CardNotInHand,
            DeckError::InsufficientEnergy,
            DeckError::DeckFull,
            DeckError::CardNotInDeck,
            DeckError::DeckTooSmall,
            DeckError::CardAlreadyUpgraded,
            DeckError::InvalidDrawCount,
        ];
        for err in all {
            assert_eq!(err.code(), err.to_string());
        }
    }

    #[test]
    fn test_wrapped_deck_error_keeps_code() {
        let err: CombatError = DeckError::CardNotInHand.into();
        assert_eq!(err.code(), "ERR_CARD_NOT_IN_HAND");
        assert_eq!(err.to_string(), "ERR_CARD_NOT_IN_HAND");
    }
}
