//! Slide-toe (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_slidetoe::{types,core,engine,clock,input,term}`
//! and hosts the startup [`config`] shared by the binary and the integration tests.

pub mod config;

pub use tui_slidetoe_clock as clock;
pub use tui_slidetoe_core as core;
pub use tui_slidetoe_engine as engine;
pub use tui_slidetoe_input as input;
pub use tui_slidetoe_term as term;
pub use tui_slidetoe_types as types;
