//! Effect system for card abilities.
//!
//! - `CardEffect`: trigger, action, target and value, plus optional
//!   dynamic value, activation condition and filter rules
//! - `FilterRule` / `LegacyFilter`: the target filter engine
//! - `execute_card_effect`: resolves one effect against the game state
//! - `apply_passive_effects`: rebuilds passive modifiers from scratch
//!
//! ## Design
//!
//! Actions, triggers and targets are closed enums. The resolver matches on
//! them exhaustively, so adding an action means the compiler points at
//! every place that must handle it.

mod dynamic;
mod effect;
mod passive;
mod resolver;
mod targeting;

pub use dynamic::{effect_value, resolve_dynamic_value};
pub use effect::{
    CardEffect, DynamicFilter, DynamicSource, DynamicValue, EffectAction, EffectTarget, EffectTrigger, TriggerScope,
};
pub use passive::apply_passive_effects;
pub use resolver::{execute_card_effect, ResolveOutcome};
pub use targeting::{apply_multiple_filters, filter_targets, BrandOp, FilterRule, Filterable, LegacyFilter};
