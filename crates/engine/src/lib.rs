//! Game orchestration on top of the pure rules.
//!
//! - [`controller`]: [`TurnController`] turns user actions and clock ticks into
//!   rule-checked state changes and presenter notifications
//! - [`presenter`]: the [`Presenter`] contract plus small implementations
//!   (event log, fan-out, null)
//! - [`trace`]: [`TraceWriter`], a presenter that appends JSON lines to a file
//!
//! # Example
//!
//! ```
//! use tui_slidetoe_engine::{ActionOutcome, EventLog, TurnController};
//! use tui_slidetoe_engine::types::GameAction;
//!
//! let mut game = TurnController::default();
//! let mut log = EventLog::new();
//!
//! game.handle(GameAction::StartGame, &mut log);
//! assert_eq!(game.handle(GameAction::CellClicked(4), &mut log), ActionOutcome::Placed(4));
//! assert_eq!(log.last_banner(), Some("Current Turn: Player O"));
//! ```

pub mod controller;
pub mod presenter;
pub mod trace;

pub use tui_slidetoe_core as core;
pub use tui_slidetoe_types as types;

pub use controller::{ActionOutcome, TurnController};
pub use presenter::{EventLog, NullPresenter, PresentationEvent, Presenter};
pub use trace::TraceWriter;
