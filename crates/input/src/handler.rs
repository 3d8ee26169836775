//! Keyboard cursor over the board.
//!
//! Terminals have no pointer by default, so the cursor stands in for the
//! mouse: arrow keys move it, Enter/Space clicks the cell under it.

use crate::map::{Direction, InputEvent};
use crate::types::{GameAction, BOARD_SIDE};

/// Tracks the highlighted cell and turns cursor input into clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorHandler {
    cursor: u8,
}

impl CursorHandler {
    /// Cursor starts on the centre cell.
    pub fn new() -> Self {
        Self { cursor: 4 }
    }

    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    /// Put the cursor on `index` (ignored if off the board)
    pub fn set_cursor(&mut self, index: u8) {
        if index < BOARD_SIDE * BOARD_SIDE {
            self.cursor = index;
        }
    }

    /// Move one step, wrapping around the edge of the row or column.
    pub fn move_cursor(&mut self, dir: Direction) {
        let side = BOARD_SIDE;
        let (col, row) = (self.cursor % side, self.cursor / side);
        let (col, row) = match dir {
            Direction::Left => ((col + side - 1) % side, row),
            Direction::Right => ((col + 1) % side, row),
            Direction::Up => (col, (row + side - 1) % side),
            Direction::Down => (col, (row + 1) % side),
        };
        self.cursor = row * side + col;
    }

    /// Feed one input event. Returns the game action it produces, if any.
    ///
    /// Direct cell clicks also move the cursor there.
    pub fn handle(&mut self, event: InputEvent) -> Option<GameAction> {
        match event {
            InputEvent::Game(action) => {
                if let GameAction::CellClicked(index) = action {
                    self.set_cursor(index);
                }
                Some(action)
            }
            InputEvent::Cursor(dir) => {
                self.move_cursor(dir);
                None
            }
            InputEvent::Activate => Some(GameAction::CellClicked(self.cursor)),
            InputEvent::ToggleRules | InputEvent::Dismiss => None,
        }
    }
}

impl Default for CursorHandler {
    fn default() -> Self {
        Self::new()
    }
}
