//! Game rules: the phase machine and everything that drives it.
//!
//! - `tactics`: how an automated player values and picks cards
//! - `phases`: the entry actions of each phase
//! - `engine`: `process_game_step`, one phase per call
//! - `game`: setup and the full-game driver
//! - `replay` / `snapshot`: reproducing and persisting games
//!
//! A game is a pure function of its setup. Every random choice goes
//! through the state's seeded RNG, so a seed string and two decks pin down
//! the whole action log.

mod engine;
mod game;
mod phases;
mod replay;
mod snapshot;
mod tactics;

pub use engine::{check_winner, process_game_step};
pub use game::{create_initial_game_state, execute_full_game, run_to_completion, GameSetup, PlayerSetup};
pub use phases::play_card;
pub use replay::{replay_to_sequence, verify_replay};
pub use snapshot::{Snapshot, SNAPSHOT_FORMAT_VERSION};
pub use tactics::{choose_card, is_playable, Tactics, TacticsWeights, FACTION_SYNERGY_BONUS};
