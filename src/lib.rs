//! # card-duel
//!
//! Deterministic simulation core for a two-player card battler.
//!
//! Two automated players with a faction deck and a tactics archetype play
//! a full game: draw, gain energy, deploy cards, attack, and trigger card
//! effects, until one falls to zero life or the turn limit runs out. Every
//! observable event lands in an ordered action log, which is the engine's
//! only output.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: A seed string fixes every shuffle, coin flip and
//!    random target. The same setup always produces the same log.
//!
//! 2. **State In, State Out**: `process_game_step` consumes a `GameState`
//!    and returns the next one. The action log is an `im::Vector`, so
//!    keeping old states around for time travel is cheap.
//!
//! 3. **Data-Driven Cards**: Effects are plain data (trigger, action,
//!    target, value, filters). Bad card data is rejected when the registry
//!    loads, not mid-game.
//!
//! ## Modules
//!
//! - `core`: ids, players, RNG, configuration, action log, state, errors
//! - `cards`: templates, instances, registry, built-in catalog
//! - `effects`: the effect model, target filters, resolution, passives
//! - `triggers`: activation conditions and trigger dispatch
//! - `combat`: attacks, keywords, the death cascade, status upkeep
//! - `rules`: tactics, the phase machine, game driver, replay, snapshots
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use card_duel::{execute_full_game, starter_deck, CardRegistry, EngineConfig, Faction, GameSetup, PlayerSetup, Tactics};
//!
//! let registry = Arc::new(CardRegistry::standard().unwrap());
//! let setup = GameSetup::new(
//!     "quickstart",
//!     "any seed",
//!     PlayerSetup::new(starter_deck(Faction::Mage), Faction::Mage, Tactics::Control),
//!     PlayerSetup::new(starter_deck(Faction::Knight), Faction::Knight, Tactics::Defensive),
//! )
//! .with_config(EngineConfig::deterministic());
//!
//! let state = execute_full_game(&setup, registry).unwrap();
//! let result = state.result.as_ref().unwrap();
//! println!("{:?} after {} turns", result.winner, result.total_turns);
//! assert!(state.action_log.is_contiguous());
//! ```

pub mod core;
pub mod cards;
pub mod effects;
pub mod triggers;
pub mod combat;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ActionKind, ActionLog, GameAction,
    EngineConfig, EngineError, ErrorCategory, Result,
    GameRng, GameRngState,
    InstanceId, PlayerId, PlayerMap,
    EndReason, GameResult, GameState, Phase, PlayerState,
};

pub use crate::cards::{
    Card, CardRegistry, CardTemplate, CardType, FieldCard,
    Faction, Keyword, StatusEffect, TemplateId, starter_deck,
};

pub use crate::effects::{
    CardEffect, EffectAction, EffectTarget, EffectTrigger,
    DynamicValue, FilterRule, LegacyFilter,
    apply_passive_effects, execute_card_effect,
};

pub use crate::triggers::{ActivationCondition, process_effect_trigger};

pub use crate::combat::{resolve_attack, resolve_deaths};

pub use crate::rules::{
    GameSetup, PlayerSetup, Snapshot, Tactics,
    create_initial_game_state, execute_full_game, process_game_step,
    replay_to_sequence, verify_replay,
};
