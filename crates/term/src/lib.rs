//! Terminal front end.
//!
//! A small game-oriented rendering layer: the [`BoardModel`] presenter collects
//! what the controller reports, [`GameView`] lays it out into a [`FrameBuffer`]
//! and [`TerminalRenderer`] flushes only the changed cells to the terminal.
//!
//! Everything except [`TerminalRenderer`] is pure and unit-testable.

pub mod board_model;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_slidetoe_engine as engine;
pub use tui_slidetoe_types as types;

pub use board_model::BoardModel;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Hud, Viewport, RULES_TEXT};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
