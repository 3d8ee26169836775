//! Game state module - board occupancy, turn, and per-player pieces
//!
//! This module ties the board and the rule engine together. Every mutating
//! method validates through [`crate::rules`] first, so a `GameState` can only
//! ever hold a legal position. The clock lives next to it in
//! [`crate::timer::TimerService`]; the two are coordinated by the engine.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::rules::{self, RuleError};
use crate::types::{Player, WinLine, PIECES_PER_PLAYER};

/// Pieces and placement progress of one player
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerState {
    placed: u8,
    /// Board indices of this player's pieces. Order carries no meaning.
    pieces: ArrayVec<u8, { PIECES_PER_PLAYER as usize }>,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placed(&self) -> u8 {
        self.placed
    }

    pub fn pieces(&self) -> &[u8] {
        &self.pieces
    }

    pub fn has_piece(&self, index: u8) -> bool {
        self.pieces.contains(&index)
    }

    pub fn finished_placing(&self) -> bool {
        self.placed >= PIECES_PER_PLAYER
    }

    /// Record a newly dropped piece. Returns false once all pieces are down.
    pub fn place(&mut self, index: u8) -> bool {
        if self.finished_placing() || self.has_piece(index) {
            return false;
        }
        if self.pieces.try_push(index).is_err() {
            return false;
        }
        self.placed += 1;
        true
    }

    /// Replace `from` with `to` in the piece set.
    pub fn relocate(&mut self, from: u8, to: u8) -> bool {
        if self.has_piece(to) {
            return false;
        }
        match self.pieces.iter_mut().find(|p| **p == from) {
            Some(slot) => {
                *slot = to;
                true
            }
            None => false,
        }
    }
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// `winner` completed `line`
    Won { winner: Player, line: WinLine },
    /// `loser`'s clock reached zero
    TimedOut { loser: Player },
}

impl GameOutcome {
    pub fn winner(&self) -> Player {
        match *self {
            GameOutcome::Won { winner, .. } => winner,
            GameOutcome::TimedOut { loser } => loser.opponent(),
        }
    }

    pub fn win_line(&self) -> Option<WinLine> {
        match *self {
            GameOutcome::Won { line, .. } => Some(line),
            GameOutcome::TimedOut { .. } => None,
        }
    }

    /// Text shown in the end-of-game popup
    pub fn message(&self) -> String {
        match *self {
            GameOutcome::Won { winner, .. } => format!("{winner} wins!"),
            GameOutcome::TimedOut { loser } => format!("{loser} ran out of time! Opponent wins!"),
        }
    }
}

/// Phase of the game, derived from the state rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    Placing,
    Moving,
    Won(Player),
    /// Carries the player whose clock expired
    TimedOut(Player),
}

impl GamePhase {
    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::Won(_) | GamePhase::TimedOut(_))
    }
}

/// Complete rules-side game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    players: [PlayerState; 2],
    current: Player,
    selected: Option<u8>,
    started: bool,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Empty board, X to move, not started
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            players: [PlayerState::new(), PlayerState::new()],
            current: Player::X,
            selected: None,
            started: false,
            outcome: None,
        }
    }

    /// Start the game. Returns false if it was already running or has ended.
    pub fn start(&mut self) -> bool {
        if self.started || self.outcome.is_some() {
            return false;
        }
        self.started = true;
        true
    }

    /// Back to the initial position
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Player {
        self.current
    }

    pub fn selected(&self) -> Option<u8> {
        self.selected
    }

    pub fn player(&self, player: Player) -> &PlayerState {
        &self.players[player.index()]
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn phase(&self) -> GamePhase {
        match self.outcome {
            Some(GameOutcome::Won { winner, .. }) => GamePhase::Won(winner),
            Some(GameOutcome::TimedOut { loser }) => GamePhase::TimedOut(loser),
            None if !self.started => GamePhase::NotStarted,
            None if self.players.iter().all(PlayerState::finished_placing) => GamePhase::Moving,
            None => GamePhase::Placing,
        }
    }

    /// Drop a piece for the current player on `target`.
    pub fn place(&mut self, target: u8) -> Result<(), RuleError> {
        let player = self.current;
        rules::validate_placement(self, player, target)?;
        self.board.set(target, Some(player));
        self.players[player.index()].place(target);
        self.selected = None;
        Ok(())
    }

    /// Select the current player's piece on `index`, or deselect it if it is
    /// already selected. Returns the new selection.
    pub fn toggle_selection(&mut self, index: u8) -> Result<Option<u8>, RuleError> {
        rules::validate_selection(self, self.current, index)?;
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
        Ok(self.selected)
    }

    /// Slide the selected piece to `to`. Returns the cell it left.
    pub fn move_selected(&mut self, to: u8) -> Result<u8, RuleError> {
        let from = self.selected.ok_or(RuleError::NoSelection)?;
        let player = self.current;
        rules::validate_move(self, player, from, to)?;
        self.board.set(from, None);
        self.board.set(to, Some(player));
        self.players[player.index()].relocate(from, to);
        self.selected = None;
        Ok(from)
    }

    /// Winning line for the current player, if the last action completed one
    pub fn current_win(&self) -> Option<WinLine> {
        rules::check_win(&self.board, self.current)
    }

    /// Hand the turn to the other player
    pub fn switch_turn(&mut self) {
        self.current = self.current.opponent();
        self.selected = None;
    }

    /// Freeze the game with the given result
    pub fn finish(&mut self, outcome: GameOutcome) {
        self.outcome = Some(outcome);
        self.selected = None;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> GameState {
        let mut state = GameState::new();
        assert!(state.start());
        state
    }

    /// Play placements alternating X/O starting with X.
    fn place_all(state: &mut GameState, cells: &[u8]) {
        for &c in cells {
            state.place(c).unwrap();
            state.switch_turn();
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new();
        assert_eq!(state.phase(), GamePhase::NotStarted);
        assert_eq!(state.current(), Player::X);
        assert_eq!(state.selected(), None);
        assert_eq!(state.player(Player::X).placed(), 0);
        assert!(state.player(Player::O).pieces().is_empty());
        assert_eq!(state.board(), &Board::new());
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut state = started();
        assert!(!state.start());
        assert_eq!(state.phase(), GamePhase::Placing);
    }

    #[test]
    fn test_place_updates_board_and_pieces() {
        let mut state = started();
        state.place(4).unwrap();
        assert_eq!(state.board().get(4), Some(Some(Player::X)));
        assert_eq!(state.player(Player::X).placed(), 1);
        assert_eq!(state.player(Player::X).pieces(), &[4]);
    }

    #[test]
    fn test_fourth_placement_is_rejected() {
        let mut state = started();
        place_all(&mut state, &[0, 1, 2, 3, 5, 4]);
        assert_eq!(state.phase(), GamePhase::Moving);
        assert_eq!(state.place(6), Err(RuleError::PlacementPhaseOver));
        assert_eq!(state.player(Player::X).placed(), 3);
    }

    #[test]
    fn test_phase_moves_once_both_players_placed() {
        let mut state = started();
        place_all(&mut state, &[0, 1, 2, 3, 5]);
        // X finished, O still has one to go.
        assert_eq!(state.phase(), GamePhase::Placing);
        place_all(&mut state, &[4]);
        assert_eq!(state.phase(), GamePhase::Moving);
    }

    #[test]
    fn test_toggle_selection() {
        let mut state = started();
        place_all(&mut state, &[0, 1, 2, 3, 5, 4]);
        assert_eq!(state.toggle_selection(0), Ok(Some(0)));
        assert_eq!(state.toggle_selection(2), Ok(Some(2)));
        assert_eq!(state.toggle_selection(2), Ok(None));
        assert_eq!(state.toggle_selection(1), Err(RuleError::NotOwned(1)));
    }

    #[test]
    fn test_move_selected_relocates_piece() {
        let mut state = started();
        place_all(&mut state, &[0, 1, 2, 3, 5, 4]);
        state.toggle_selection(0).unwrap();
        assert_eq!(state.move_selected(6), Ok(0));
        assert!(state.board().is_empty(0));
        assert_eq!(state.board().get(6), Some(Some(Player::X)));
        let mut pieces = state.player(Player::X).pieces().to_vec();
        pieces.sort_unstable();
        assert_eq!(pieces, vec![2, 5, 6]);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_move_without_selection() {
        let mut state = started();
        place_all(&mut state, &[0, 1, 2, 3, 5, 4]);
        assert_eq!(state.move_selected(6), Err(RuleError::NoSelection));
    }

    #[test]
    fn test_move_onto_taken_cell() {
        let mut state = started();
        place_all(&mut state, &[0, 1, 2, 3, 5, 4]);
        state.toggle_selection(0).unwrap();
        assert_eq!(state.move_selected(1), Err(RuleError::CellOccupied(1)));
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_finish_freezes_actions() {
        let mut state = started();
        state.finish(GameOutcome::TimedOut { loser: Player::X });
        assert_eq!(state.phase(), GamePhase::TimedOut(Player::X));
        assert_eq!(state.place(0), Err(RuleError::GameOver));
        assert!(!state.start());
    }

    #[test]
    fn test_outcome_messages() {
        let won = GameOutcome::Won {
            winner: Player::O,
            line: [0, 4, 8],
        };
        assert_eq!(won.message(), "O wins!");
        assert_eq!(won.win_line(), Some([0, 4, 8]));
        let timed_out = GameOutcome::TimedOut { loser: Player::X };
        assert_eq!(timed_out.winner(), Player::O);
        assert_eq!(timed_out.message(), "X ran out of time! Opponent wins!");
    }

    #[test]
    fn test_player_state_relocate() {
        let mut p = PlayerState::new();
        assert!(p.place(1));
        assert!(p.place(2));
        assert!(!p.place(2));
        assert!(p.relocate(1, 7));
        assert!(!p.relocate(1, 8));
        assert!(!p.relocate(2, 7));
        assert!(p.has_piece(7));
    }
}
