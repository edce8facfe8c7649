//! Game setup and the full-game driver.
//!
//! ```
//! use std::sync::Arc;
//!
//! use card_duel::cards::{starter_deck, CardRegistry, Faction};
//! use card_duel::core::EngineConfig;
//! use card_duel::rules::{execute_full_game, GameSetup, PlayerSetup, Tactics};
//!
//! let registry = Arc::new(CardRegistry::standard().unwrap());
//! let setup = GameSetup::new(
//!     "demo",
//!     "seed-42",
//!     PlayerSetup::new(starter_deck(Faction::Knight), Faction::Knight, Tactics::Defensive),
//!     PlayerSetup::new(starter_deck(Faction::Berserker), Faction::Berserker, Tactics::Aggressive),
//! )
//! .with_config(EngineConfig::deterministic());
//!
//! let finished = execute_full_game(&setup, registry).unwrap();
//! assert!(finished.result.is_some());
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::engine::process_game_step;
use super::tactics::Tactics;
use crate::cards::{CardRegistry, Faction, TemplateId};
use crate::core::{
    ActionKind, EngineConfig, EngineError, GameState, Phase, PhaseChange, PlayerId, PlayerState, Result,
};

/// One seat's deck and personality.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSetup {
    pub deck: Vec<TemplateId>,
    pub faction: Faction,
    pub tactics: Tactics,
}

impl PlayerSetup {
    #[must_use]
    pub fn new(deck: Vec<TemplateId>, faction: Faction, tactics: Tactics) -> Self {
        Self { deck, faction, tactics }
    }
}

/// Everything needed to start a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSetup {
    pub game_id: String,
    pub seed: String,
    pub player1: PlayerSetup,
    pub player2: PlayerSetup,
    #[serde(default)]
    pub config: EngineConfig,
}

impl GameSetup {
    #[must_use]
    pub fn new(game_id: impl Into<String>, seed: impl Into<String>, player1: PlayerSetup, player2: PlayerSetup) -> Self {
        Self {
            game_id: game_id.into(),
            seed: seed.into(),
            player1,
            player2,
            config: EngineConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerSetup {
        match player {
            PlayerId::Player1 => &self.player1,
            PlayerId::Player2 => &self.player2,
        }
    }
}

/// Build the opening state.
///
/// Creates both decks (player 1 first), shuffles them in that order, flips
/// for the first player, deals opening hands and logs the opening
/// `phase_change`. All randomness comes from the seeded RNG.
pub fn create_initial_game_state(setup: &GameSetup, registry: Arc<CardRegistry>) -> Result<GameState> {
    let mut state = GameState::new(setup.game_id.clone(), &setup.seed, setup.config.clone(), registry);

    for player in PlayerId::ALL {
        let seat_setup = setup.player(player);
        if seat_setup.deck.is_empty() {
            return Err(EngineError::InvalidDeck {
                player: player.to_string(),
                reason: "deck is empty".to_string(),
            });
        }

        let mut deck = Vec::with_capacity(seat_setup.deck.len());
        for template_id in &seat_setup.deck {
            deck.push(state.create_card(template_id)?);
        }
        let mut seat = PlayerState::new(seat_setup.faction, seat_setup.tactics, &state.config);
        seat.deck = deck;
        *state.player_mut(player) = seat;
    }

    for player in PlayerId::ALL {
        let mut deck = std::mem::take(&mut state.player_mut(player).deck);
        state.rng.shuffle(&mut deck);
        state.player_mut(player).deck = deck;
    }

    let first = if state.rng.gen_bool(0.5) {
        PlayerId::Player1
    } else {
        PlayerId::Player2
    };
    state.current_player = first;

    for player in [first, first.opponent()] {
        for _ in 0..state.config.opening_hand {
            state.draw_card(player);
        }
    }

    state.phase = Phase::Draw;
    let kind = ActionKind::PhaseChange(PhaseChange {
        from: None,
        to: Phase::Draw,
        turn_number: state.turn_number,
        current_player: first,
    });
    state.log(first, kind);
    debug!(game = %state.game_id, %first, "game created");
    Ok(state)
}

/// Run a game from setup to result.
///
/// Fails with [`EngineError::StepLimitExceeded`] if the configured step
/// budget runs out first.
pub fn execute_full_game(setup: &GameSetup, registry: Arc<CardRegistry>) -> Result<GameState> {
    let state = create_initial_game_state(setup, registry)?;
    run_to_completion(state)
}

/// Step an existing state until it has a result, within the step budget.
pub fn run_to_completion(mut state: GameState) -> Result<GameState> {
    let limit = state.config.step_limit;
    for _ in 0..limit {
        if state.is_over() {
            return Ok(state);
        }
        state = process_game_step(state)?;
    }
    if state.is_over() {
        return Ok(state);
    }
    warn!(game = %state.game_id, limit, "step limit exceeded");
    Err(EngineError::StepLimitExceeded { limit })
}
