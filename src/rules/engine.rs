//! The phase state machine.
//!
//! `process_game_step` consumes a state, runs the entry actions of its
//! current phase, checks for a winner, and returns the next state with
//! `phase` pointing at what runs next:
//!
//! ```text
//! draw -> energy -> deploy -> battle -> battle_attack (repeats) -> end -> draw
//! ```
//!
//! Leaving `end` hands the turn to the other player and increments
//! `turn_number`. Once `result` is set the state is terminal.

use tracing::{debug, info};

use super::phases::{run_battle, run_battle_attack, run_deploy, run_draw, run_end, run_energy};
use crate::core::{
    ActionKind, EndReason, EngineError, GameEnd, GameResult, GameState, Phase, PhaseChange, PlayerId, Result,
};

/// Advance the game by one phase.
///
/// Fails with [`EngineError::GameOver`] if the game already has a result.
pub fn process_game_step(mut state: GameState) -> Result<GameState> {
    if state.is_over() {
        return Err(EngineError::GameOver);
    }

    let phase = state.phase;
    match phase {
        Phase::Draw => run_draw(&mut state)?,
        Phase::Energy => run_energy(&mut state),
        Phase::Deploy => run_deploy(&mut state)?,
        Phase::Battle => run_battle(&mut state),
        Phase::BattleAttack => run_battle_attack(&mut state)?,
        Phase::End => {
            run_end(&mut state)?;
            state.current_player = state.current_player.opponent();
            state.turn_number += 1;
        }
    }

    if let Some((winner, reason)) = check_winner(&state) {
        finish(&mut state, winner, reason);
        return Ok(state);
    }

    let next = match phase {
        Phase::BattleAttack if !state.attack_queue.is_empty() => Phase::BattleAttack,
        other => other.next(),
    };
    if next != phase {
        let player = state.current_player;
        let kind = ActionKind::PhaseChange(PhaseChange {
            from: Some(phase),
            to: next,
            turn_number: state.turn_number,
            current_player: player,
        });
        state.log(player, kind);
        debug!(from = %phase, to = %next, turn = state.turn_number, %player, "phase");
    }
    state.phase = next;
    Ok(state)
}

/// Decide whether the game is over.
///
/// A player at zero life loses; both at zero is a draw. Past the turn
/// limit, higher life wins and equal life is a draw.
#[must_use]
pub fn check_winner(state: &GameState) -> Option<(Option<PlayerId>, EndReason)> {
    let p1 = state.player(PlayerId::Player1).life;
    let p2 = state.player(PlayerId::Player2).life;

    match (p1 <= 0, p2 <= 0) {
        (true, true) => return Some((None, EndReason::LifeZero)),
        (true, false) => return Some((Some(PlayerId::Player2), EndReason::LifeZero)),
        (false, true) => return Some((Some(PlayerId::Player1), EndReason::LifeZero)),
        (false, false) => {}
    }

    if state.turn_number > state.config.max_turns {
        let winner = match p1.cmp(&p2) {
            std::cmp::Ordering::Greater => Some(PlayerId::Player1),
            std::cmp::Ordering::Less => Some(PlayerId::Player2),
            std::cmp::Ordering::Equal => None,
        };
        return Some((winner, EndReason::Timeout));
    }
    None
}

fn finish(state: &mut GameState, winner: Option<PlayerId>, reason: EndReason) {
    let end_time = state.now();
    let total_turns = state.turn_number.min(state.config.max_turns);
    let duration_seconds = end_time.saturating_sub(state.start_time) as f64 / 1000.0;

    let player = winner.unwrap_or(state.current_player);
    state.log(
        player,
        ActionKind::GameEnd(GameEnd {
            winner,
            reason,
            total_turns,
        }),
    );
    info!(winner = ?winner, ?reason, total_turns, "game over");

    state.result = Some(GameResult {
        winner,
        reason,
        total_turns,
        duration_seconds,
        end_time,
    });
}
