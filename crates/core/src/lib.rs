//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and clock logic.
//! It has **no dependencies** on UI, threads, or I/O, making it:
//!
//! - **Deterministic**: The same action sequence always produces the same game
//! - **Testable**: Clock ticks are plain method calls, no real time involved
//! - **Portable**: Can run behind a terminal, a headless trace, or anything else
//!
//! # Module Structure
//!
//! - [`board`]: 3x3 board with flat cell storage
//! - [`game_state`]: Turn, selection, per-player pieces, and the derived phase
//! - [`rules`]: Placement/selection/move validation and win detection
//! - [`timer`]: Per-player countdown clocks with stale-tick protection
//! - [`snapshot`]: Serializable copy of the whole game for observers
//!
//! # Game Rules
//!
//! - **Placement**: Players alternate dropping pieces on empty cells, three each
//! - **Moving**: Afterwards a turn consists of sliding one own piece to any empty cell
//! - **Sliding early**: A piece already on the board may be slid instead of placing a new one
//! - **Winning**: Three in a row, column, or diagonal wins immediately
//! - **Clock**: Each player has 3 minutes; running out loses the game
//! - **No draws**: The moving phase can continue indefinitely
//!
//! # Example
//!
//! ```
//! use tui_slidetoe_core::{GamePhase, GameState};
//!
//! let mut game = GameState::new();
//! game.start();
//!
//! // X and O alternate placements.
//! game.place(0).unwrap();
//! game.switch_turn();
//! game.place(4).unwrap();
//!
//! assert_eq!(game.phase(), GamePhase::Placing);
//! assert!(game.place(4).is_err()); // taken
//! ```

pub mod board;
pub mod game_state;
pub mod rules;
pub mod snapshot;
pub mod timer;

pub use tui_slidetoe_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameOutcome, GamePhase, GameState, PlayerState};
pub use rules::{check_win, is_win, validate_move, validate_placement, validate_selection, RuleError};
pub use snapshot::GameSnapshot;
pub use timer::{ClockState, ClockToken, TickOutcome, TimerService};
