//! Core engine types: ids, players, RNG, configuration, the action log,
//! game state and errors.
//!
//! Everything else in the crate builds on these. Nothing here knows how a
//! card effect or an attack resolves.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{
    ActionKind, ActionLog, CardAttack, CardBanished, CardDiscarded, CardDraw, CardPlay, CardSummon,
    CombatStage, CreatureDestroyed, DiscardSource, DrawSkipReason, DrawSkipped, EffectTriggered,
    EnergyUpdate, Fatigue, GameAction, GameEnd, KeywordTrigger, PassiveUpdate, PhaseChange, StatusTick,
    TargetDelta, TargetDeltas, TriggerEvent, TriggerTruncated,
};
pub use config::EngineConfig;
pub use entity::{InstanceId, TargetRef};
pub use error::{EngineError, ErrorCategory, Result};
pub use player::{PlayerId, PlayerMap};
pub use rng::{seed_from_str, GameRng, GameRngState};
pub use state::{DrawOutcome, EndReason, GameResult, GameState, Phase, PlayerState};
