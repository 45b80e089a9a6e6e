//! Card system: definitions, effects, and catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card templates
//! - `Card`: A card value (template copy held by a zone slot)
//! - `CardEffect`: Tagged effect descriptor
//! - `CardCatalog`: Template lookup

pub mod definition;
pub mod effect;
pub mod registry;

pub use definition::{Card, CardId, CardType, Rarity, MAX_CARD_COST};
pub use effect::CardEffect;
pub use registry::CardCatalog;
