//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use card_duel::cards::{starter_deck, CardRegistry, CardTemplate, Faction, TemplateId};
use card_duel::core::{EngineConfig, GameState, InstanceId, PlayerId};
use card_duel::rules::{GameSetup, PlayerSetup, Tactics};

static TRACING: Once = Once::new();

/// Route engine traces to the test output; filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn standard_registry() -> Arc<CardRegistry> {
    Arc::new(CardRegistry::standard().expect("built-in catalog is valid"))
}

/// Starter-deck matchup with zeroed timestamps.
pub fn matchup(seed: &str, p1: (Faction, Tactics), p2: (Faction, Tactics)) -> GameSetup {
    GameSetup::new(
        format!("test-{seed}"),
        seed,
        PlayerSetup::new(starter_deck(p1.0), p1.0, p1.1),
        PlayerSetup::new(starter_deck(p2.0), p2.0, p2.1),
    )
    .with_config(EngineConfig::deterministic())
}

pub fn default_matchup(seed: &str) -> GameSetup {
    matchup(
        seed,
        (Faction::Necromancer, Tactics::Aggressive),
        (Faction::Knight, Tactics::Defensive),
    )
}

/// Registry holding exactly `templates`.
pub fn registry_of(templates: Vec<CardTemplate>) -> Arc<CardRegistry> {
    let mut registry = CardRegistry::new();
    for template in templates {
        registry.register(template).expect("test template is valid");
    }
    Arc::new(registry)
}

/// Empty board over `registry`, player 1 to act on turn 1.
pub fn board(seed: &str, registry: Arc<CardRegistry>) -> GameState {
    GameState::new("board", seed, EngineConfig::deterministic(), registry)
}

/// Put a creature on `player`'s field, ready to attack this turn.
pub fn field(state: &mut GameState, player: PlayerId, template: &str) -> InstanceId {
    let card = state.create_card(&TemplateId::new(template)).expect("template registered");
    let id = state.place_creature(player, card).expect("field has room");
    state.find_creature_mut(id).expect("just placed").summon_turn = 0;
    id
}
