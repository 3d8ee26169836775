//! Rule engine - legality checks and win detection
//!
//! Every check is a pure function of the current [`GameState`]. Nothing here
//! mutates; [`GameState`] calls these before applying a change.

use thiserror::Error;

use crate::board::Board;
use crate::game_state::GameState;
use crate::types::{Player, WinLine, BOARD_CELLS, WIN_LINES};

/// Why an action was refused.
///
/// The game treats all of these as silent no-ops; the variants exist so callers
/// and tests can tell the cases apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("game has not been started")]
    NotStarted,
    #[error("game is already running")]
    AlreadyStarted,
    #[error("game is over")]
    GameOver,
    #[error("it is not {0}'s turn")]
    NotYourTurn(Player),
    #[error("cell {0} is outside the board")]
    OutOfBounds(u8),
    #[error("cell {0} is already taken")]
    CellOccupied(u8),
    #[error("all pieces have already been placed")]
    PlacementPhaseOver,
    #[error("cell {0} does not hold one of the current player's pieces")]
    NotOwned(u8),
    #[error("cell {0} is not a valid piece to move")]
    InvalidSource(u8),
    #[error("no piece is selected")]
    NoSelection,
}

fn ensure_turn(state: &GameState, player: Player) -> Result<(), RuleError> {
    if state.outcome().is_some() {
        return Err(RuleError::GameOver);
    }
    if !state.started() {
        return Err(RuleError::NotStarted);
    }
    if state.current() != player {
        return Err(RuleError::NotYourTurn(player));
    }
    Ok(())
}

fn ensure_in_bounds(index: u8) -> Result<(), RuleError> {
    if (index as usize) < BOARD_CELLS {
        Ok(())
    } else {
        Err(RuleError::OutOfBounds(index))
    }
}

/// Check that `player` may drop a new piece on `target`.
pub fn validate_placement(state: &GameState, player: Player, target: u8) -> Result<(), RuleError> {
    ensure_turn(state, player)?;
    ensure_in_bounds(target)?;
    if !state.board().is_empty(target) {
        return Err(RuleError::CellOccupied(target));
    }
    if state.player(player).finished_placing() {
        return Err(RuleError::PlacementPhaseOver);
    }
    Ok(())
}

/// Check that `player` may pick up the piece on `index`.
///
/// Any own piece can be picked up, including while pieces are still being
/// placed.
pub fn validate_selection(state: &GameState, player: Player, index: u8) -> Result<(), RuleError> {
    ensure_turn(state, player)?;
    ensure_in_bounds(index)?;
    if !state.board().is_owned_by(index, player) {
        return Err(RuleError::NotOwned(index));
    }
    Ok(())
}

/// Check that `player` may slide the piece on `from` to `to`.
pub fn validate_move(state: &GameState, player: Player, from: u8, to: u8) -> Result<(), RuleError> {
    ensure_turn(state, player)?;
    ensure_in_bounds(from)?;
    ensure_in_bounds(to)?;
    let pieces = state.player(player);
    if !pieces.has_piece(from) || !state.board().is_owned_by(from, player) {
        return Err(RuleError::InvalidSource(from));
    }
    if !state.board().is_empty(to) {
        return Err(RuleError::CellOccupied(to));
    }
    Ok(())
}

/// First line in [`WIN_LINES`] order fully held by `player`.
pub fn check_win(board: &Board, player: Player) -> Option<WinLine> {
    WIN_LINES
        .iter()
        .copied()
        .find(|line| line.iter().all(|&i| board.is_owned_by(i, player)))
}

/// Whether `player` holds any complete line.
pub fn is_win(board: &Board, player: Player) -> bool {
    check_win(board, player).is_some()
}
