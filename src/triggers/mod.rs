//! Trigger system: when card effects wake up.
//!
//! Two concerns live here:
//!
//! - [`ActivationCondition`]: a gate checked when an effect resolves
//!   ("if your life is lower than your opponent's...")
//! - [`process_effect_trigger`]: maps a game event (a card played, a
//!   creature dying, a turn ending) to the effects it fires, scoped so that
//!   only the right cards react
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use card_duel::cards::{CardRegistry, CardTemplate, Faction, TemplateId};
//! use card_duel::core::{EngineConfig, GameState, PlayerId};
//! use card_duel::effects::{CardEffect, EffectAction, EffectTarget, EffectTrigger};
//! use card_duel::triggers::process_effect_trigger;
//!
//! let mut registry = CardRegistry::new();
//! registry
//!     .register(
//!         CardTemplate::creature("cleric", "Cleric", Faction::Knight, 2, 1, 3)
//!             .with_effect(CardEffect::new(EffectTrigger::TurnEnd, EffectAction::Heal, EffectTarget::Player, 1)),
//!     )
//!     .unwrap();
//!
//! let mut state = GameState::new("demo", "seed", EngineConfig::deterministic(), Arc::new(registry));
//! state.player_mut(PlayerId::Player1).life = 10;
//! let cleric = state.create_card(&TemplateId::new("cleric")).unwrap();
//! state.place_creature(PlayerId::Player1, cleric).unwrap();
//!
//! process_effect_trigger(&mut state, EffectTrigger::TurnEnd, None, PlayerId::Player1).unwrap();
//! assert_eq!(state.player(PlayerId::Player1).life, 11);
//! ```

mod condition;
mod dispatch;

pub use condition::{ActivationCondition, CompareOp, ConditionOperand, ConditionSubject};
pub use dispatch::{process_effect_trigger, MAX_TRIGGER_DEPTH};
