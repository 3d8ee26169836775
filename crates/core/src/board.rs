//! Board module - manages the game grid
//!
//! The board is a 3x3 grid where each cell is empty or holds one player's piece.
//! Uses a flat array in row-major order, so index `i` is row `i / 3`, column `i % 3`.

use crate::types::{Cell, Player, BOARD_CELLS, BOARD_SIDE};

/// The game board - 9 cells using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
        }
    }

    /// Calculate flat index from (column, row) coordinates
    #[inline(always)]
    pub fn index(col: u8, row: u8) -> Option<u8> {
        if col >= BOARD_SIDE || row >= BOARD_SIDE {
            return None;
        }
        Some(row * BOARD_SIDE + col)
    }

    /// Get cell at index
    /// Returns None if out of bounds
    pub fn get(&self, index: u8) -> Option<Cell> {
        self.cells.get(index as usize).copied()
    }

    /// Set cell at index
    /// Returns false if out of bounds
    pub fn set(&mut self, index: u8, cell: Cell) -> bool {
        match self.cells.get_mut(index as usize) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Check if index is within bounds and empty
    pub fn is_empty(&self, index: u8) -> bool {
        matches!(self.get(index), Some(None))
    }

    /// Check if index is within bounds and held by `player`
    pub fn is_owned_by(&self, index: u8, player: Player) -> bool {
        self.get(index) == Some(Some(player))
    }

    /// Number of pieces `player` has on the board
    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|&&c| c == Some(player)).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_CELLS];
    }

    /// Build a board from a 9-character picture for tests (`X`, `O`, anything else empty)
    #[cfg(test)]
    pub fn from_pattern(pattern: &str) -> Self {
        let mut board = Self::new();
        for (i, ch) in pattern.chars().filter(|c| !c.is_whitespace()).enumerate() {
            let cell = match ch {
                'X' => Some(Player::X),
                'O' => Some(Player::O),
                _ => None,
            };
            board.set(i as u8, cell);
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
