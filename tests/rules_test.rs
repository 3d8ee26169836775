//! Rule engine checks against hand-built positions.

use tui_slidetoe::core::{
    check_win, validate_move, validate_placement, validate_selection, Board, GamePhase, GameState,
    RuleError,
};
use tui_slidetoe::types::{Player, WIN_LINES};

/// Play `cells` as alternating placements starting with X.
fn placed(cells: &[u8]) -> GameState {
    let mut state = GameState::new();
    state.start();
    for &i in cells {
        state.place(i).unwrap();
        state.switch_turn();
    }
    state
}

#[test]
fn test_board_bounds() {
    let mut board = Board::new();
    assert_eq!(board.get(9), None);
    assert!(!board.set(9, Some(Player::X)));
    assert!(board.set(8, Some(Player::X)));
    assert_eq!(board.get(8), Some(Some(Player::X)));
    assert_eq!(board.count(Player::X), 1);
    board.clear();
    assert_eq!(board.count(Player::X), 0);
}

#[test]
fn test_win_lines_are_checked_in_fixed_order() {
    for (n, line) in WIN_LINES.iter().enumerate() {
        let mut board = Board::new();
        for &i in line {
            board.set(i, Some(Player::X));
        }
        assert_eq!(check_win(&board, Player::X), Some(*line), "line {n}");
        assert_eq!(check_win(&board, Player::O), None);
    }
}

#[test]
fn test_fourth_placement_is_refused() {
    let state = placed(&[0, 3, 1, 6, 5, 8]);
    assert_eq!(state.phase(), GamePhase::Moving);
    assert_eq!(
        validate_placement(&state, Player::X, 2),
        Err(RuleError::PlacementPhaseOver)
    );
}

#[test]
fn test_pieces_can_be_picked_up_and_moved_while_placing() {
    let mut state = placed(&[0, 4]);
    assert_eq!(state.phase(), GamePhase::Placing);
    assert_eq!(validate_selection(&state, Player::X, 0), Ok(()));
    assert_eq!(
        validate_selection(&state, Player::X, 4),
        Err(RuleError::NotOwned(4))
    );
    assert_eq!(validate_move(&state, Player::X, 0, 8), Ok(()));

    assert_eq!(state.toggle_selection(0), Ok(Some(0)));
    assert_eq!(state.move_selected(8), Ok(0));
    assert_eq!(state.player(Player::X).pieces(), &[8]);
    assert_eq!(state.player(Player::X).placed(), 1);
    assert!(state.board().is_empty(0));
}

#[test]
fn test_move_rules() {
    let state = placed(&[0, 3, 1, 6, 5, 8]);
    assert_eq!(validate_move(&state, Player::X, 0, 2), Ok(()));
    assert_eq!(
        validate_move(&state, Player::X, 3, 2),
        Err(RuleError::InvalidSource(3))
    );
    assert_eq!(
        validate_move(&state, Player::X, 0, 1),
        Err(RuleError::CellOccupied(1))
    );
    assert_eq!(
        validate_move(&state, Player::X, 0, 12),
        Err(RuleError::OutOfBounds(12))
    );
    assert_eq!(
        validate_move(&state, Player::O, 3, 2),
        Err(RuleError::NotYourTurn(Player::O))
    );
}

#[test]
fn test_move_keeps_piece_count() {
    let mut state = placed(&[0, 3, 1, 6, 5, 8]);
    assert_eq!(state.toggle_selection(5), Ok(Some(5)));
    assert_eq!(state.move_selected(7), Ok(5));
    assert_eq!(state.board().count(Player::X), 3);
    assert!(state.player(Player::X).has_piece(7));
    assert!(!state.player(Player::X).has_piece(5));
    assert_eq!(state.selected(), None);
}

#[test]
fn test_errors_have_readable_messages() {
    assert_eq!(RuleError::CellOccupied(4).to_string(), "cell 4 is already taken");
    assert_eq!(RuleError::NotStarted.to_string(), "game has not been started");
}
