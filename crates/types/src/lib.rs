//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behavior beyond parsing and formatting, making
//! them usable in any context (rules, orchestration, terminal rendering, tracing).
//!
//! # Board Layout
//!
//! The board is a 3x3 grid addressed by a flat index in row-major order:
//!
//! ```text
//!  0 | 1 | 2
//! ---+---+---
//!  3 | 4 | 5
//! ---+---+---
//!  6 | 7 | 8
//! ```
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BOARD_SIDE` | 3 | Rows and columns |
//! | `BOARD_CELLS` | 9 | Total cells |
//! | `PIECES_PER_PLAYER` | 3 | Pieces each player places before sliding |
//! | `DEFAULT_CLOCK_SECS` | 180 | Per-player countdown (3 minutes) |
//! | `CLOCK_TICK_MS` | 1000 | One clock tick per real-time second |
//!
//! # Examples
//!
//! ```
//! use tui_slidetoe_types::{format_clock, GameAction, Player, BOARD_CELLS};
//!
//! assert_eq!(Player::X.opponent(), Player::O);
//! assert_eq!(Player::from_str("o"), Some(Player::O));
//!
//! assert_eq!(GameAction::from_str("click:4"), Some(GameAction::CellClicked(4)));
//! assert_eq!(GameAction::from_str("start"), Some(GameAction::StartGame));
//!
//! assert_eq!(format_clock(180), "3:00");
//! assert_eq!(BOARD_CELLS, 9);
//! ```

use serde::{Deserialize, Serialize};

/// Cells per board side (3 rows, 3 columns)
pub const BOARD_SIDE: u8 = 3;

/// Total number of cells on the board
pub const BOARD_CELLS: usize = (BOARD_SIDE * BOARD_SIDE) as usize;

/// Pieces each player drops before the moving phase begins
pub const PIECES_PER_PLAYER: u8 = 3;

/// Starting value of each player's countdown (3 minutes)
pub const DEFAULT_CLOCK_SECS: u32 = 180;

/// Real-time interval between two clock ticks
pub const CLOCK_TICK_MS: u64 = 1000;

/// Three cell indices forming a line on the board.
pub type WinLine = [u8; 3];

/// The eight winning triples, in the order they are checked.
///
/// Rows first, then columns, then the two diagonals. When several lines are
/// complete at once, the first one in this order is the one reported.
pub const WIN_LINES: [WinLine; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// One of the two players
///
/// X always opens the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::X, Player::O];

    /// The other player
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_slidetoe_types::Player;
    ///
    /// assert_eq!(Player::X.opponent(), Player::O);
    /// assert_eq!(Player::O.opponent(), Player::X);
    /// ```
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Stable slot for per-player arrays (X = 0, O = 1)
    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }

    /// Mark drawn on the board
    pub fn as_char(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    /// Parse a player mark (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_slidetoe_types::Player;
    ///
    /// assert_eq!(Player::from_str("x"), Some(Player::X));
    /// assert_eq!(Player::from_str("O"), Some(Player::O));
    /// assert_eq!(Player::from_str("z"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "x" => Some(Player::X),
            "o" => Some(Player::O),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Player::X => "X",
            Player::O => "O",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Player)`: Cell holding that player's piece
pub type Cell = Option<Player>;

/// Visual state of one cell as reported to presenters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellFlags {
    /// The cell holds a piece
    pub taken: bool,
    /// The cell holds the piece the current player picked up
    pub selected: bool,
    /// The cell belongs to the reported winning line
    pub win: bool,
}

/// User actions accepted by the game
///
/// These are the only inputs the rules react to. Anything UI-specific
/// (cursor movement, overlays) stays in the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// A board cell was clicked (0-8, row-major)
    CellClicked(u8),
    /// Start the clocks (ignored while a game is running)
    StartGame,
    /// Clear everything back to the initial position
    ResetGame,
}

impl GameAction {
    /// Parse an action from its text form
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_slidetoe_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("click:0"), Some(GameAction::CellClicked(0)));
    /// assert_eq!(GameAction::from_str("Reset"), Some(GameAction::ResetGame));
    /// assert_eq!(GameAction::from_str("click:9"), None);
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if let Some(rest) = lower.strip_prefix("click:") {
            let index: u8 = rest.parse().ok()?;
            return ((index as usize) < BOARD_CELLS).then_some(GameAction::CellClicked(index));
        }
        match lower.as_str() {
            "start" => Some(GameAction::StartGame),
            "reset" => Some(GameAction::ResetGame),
            _ => None,
        }
    }

    /// Convert to text form (inverse of [`GameAction::from_str`])
    pub fn to_text(self) -> String {
        match self {
            GameAction::CellClicked(index) => format!("click:{index}"),
            GameAction::StartGame => "start".to_string(),
            GameAction::ResetGame => "reset".to_string(),
        }
    }
}

/// Format a countdown as `M:SS`
///
/// Minutes are not padded, seconds always take two digits.
///
/// # Examples
///
/// ```
/// use tui_slidetoe_types::format_clock;
///
/// assert_eq!(format_clock(180), "3:00");
/// assert_eq!(format_clock(65), "1:05");
/// assert_eq!(format_clock(9), "0:09");
/// assert_eq!(format_clock(0), "0:00");
/// ```
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
