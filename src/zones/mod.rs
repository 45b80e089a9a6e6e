//! Card zones.
//!
//! The player's cards live in four ordered zones: the master deck, the
//! draw pile, the hand, and the discard pile. `DeckEngine` owns all four
//! and is the only code that moves cards between them.

pub mod deck;

pub use deck::{shuffle, DeckEngine, Pile, TypeCounts};
