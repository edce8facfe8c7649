//! Card system: templates, instances, the registry and the built-in catalog.
//!
//! ## Key Types
//!
//! - `CardTemplate`: static card data (cost, stats, keywords, effects)
//! - `Card`: an instance of a template in a deck, hand or graveyard
//! - `FieldCard`: a creature on the battlefield with its runtime state
//! - `CardRegistry`: template lookup, validated at load time
//!
//! Instances share their template through an `Arc`, so moving cards
//! between zones never copies card data.

pub mod catalog;
pub mod definition;
pub mod instance;
pub mod registry;

pub use catalog::starter_deck;
pub use definition::{CardTemplate, CardType, Faction, Keyword, KeywordSet, TemplateId};
pub use instance::{Card, CardSnapshot, FieldCard, StatusEffect};
pub use registry::CardRegistry;
