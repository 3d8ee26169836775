//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework beyond crossterm events. It
//! maps key and mouse events into [`InputEvent`]s and keeps a keyboard cursor
//! over the board so the game is fully playable without a mouse.

pub mod handler;
pub mod map;

pub use tui_slidetoe_types as types;

pub use handler::CursorHandler;
pub use map::{handle_key_event, mouse_click_position, should_quit, Direction, InputEvent};
