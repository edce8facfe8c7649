//! Log replay from a frozen initial state.
//!
//! The engine is a pure function of its state, so re-running
//! [`process_game_step`] from the state `create_initial_game_state`
//! returned reproduces the recorded log event for event. Timestamps are
//! the one field allowed to differ.

use tracing::debug;

use super::engine::process_game_step;
use crate::core::{ActionLog, EngineError, GameState, Result};

/// Re-run the engine until the entry with `sequence` has been logged.
///
/// Returns the state right after the step that produced that entry, or the
/// terminal state when the game ends first.
pub fn replay_to_sequence(initial: &GameState, sequence: u32) -> Result<GameState> {
    let target = sequence as usize;
    let limit = initial.config.step_limit;
    let mut state = initial.clone();

    for _ in 0..limit {
        if state.action_log.len() > target || state.is_over() {
            return Ok(state);
        }
        state = process_game_step(state)?;
    }
    if state.action_log.len() > target || state.is_over() {
        return Ok(state);
    }
    Err(EngineError::StepLimitExceeded { limit })
}

/// Check that `recorded` is what the engine produces from `initial`.
///
/// The recorded log may stop early (a game in progress); it must then be a
/// prefix of the re-run.
pub fn verify_replay(initial: &GameState, recorded: &ActionLog) -> Result<bool> {
    if recorded.is_empty() {
        return Ok(true);
    }
    if !recorded.is_contiguous() {
        return Ok(false);
    }
    let last = (recorded.len() - 1) as u32;
    let rerun = replay_to_sequence(initial, last)?;
    let matches = recorded.is_prefix_of(&rerun.action_log);
    debug!(entries = recorded.len(), matches, "replay verified");
    Ok(matches)
}
