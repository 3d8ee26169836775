//! Turn controller - drives one game from user actions and clock ticks.
//!
//! The controller owns the rules state and the clocks and is the only thing
//! that mutates them. Each entry point runs to completion synchronously: a
//! turn change stops the outgoing clock and arms the incoming one inside the
//! same call, so no tick can land between the two.

use tracing::{debug, info, trace};

use crate::core::{
    ClockToken, GameOutcome, GamePhase, GameSnapshot, GameState, RuleError, TickOutcome,
    TimerService,
};
use crate::presenter::Presenter;
use crate::types::{format_clock, CellFlags, GameAction, Player, BOARD_CELLS};

/// What a user action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Started,
    Reset,
    Placed(u8),
    Selected(u8),
    Deselected(u8),
    Moved { from: u8, to: u8 },
    /// The action completed a line and ended the game
    Won(GameOutcome),
    /// Nothing changed
    Ignored(RuleError),
}

impl ActionOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, ActionOutcome::Ignored(_))
    }
}

/// Game orchestration: rules state + clocks + presenter notifications
#[derive(Debug, Clone)]
pub struct TurnController {
    state: GameState,
    timer: TimerService,
}

impl TurnController {
    pub fn new(clock_secs: u32) -> Self {
        Self {
            state: GameState::new(),
            timer: TimerService::new(clock_secs),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn timer(&self) -> &TimerService {
        &self.timer
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    /// Clock arming the tick source should currently serve, if any
    pub fn armed(&self) -> Option<ClockToken> {
        self.timer.token()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state, &self.timer)
    }

    /// Apply one user action
    pub fn handle(&mut self, action: GameAction, out: &mut dyn Presenter) -> ActionOutcome {
        let outcome = match action {
            GameAction::CellClicked(index) => self.cell_clicked(index, out),
            GameAction::StartGame => self.start(out),
            GameAction::ResetGame => self.reset(out),
        };
        match outcome {
            ActionOutcome::Ignored(reason) => trace!(?action, %reason, "action ignored"),
            _ => debug!(?action, ?outcome, "action applied"),
        }
        outcome
    }

    /// Begin the game and run X's clock.
    pub fn start(&mut self, out: &mut dyn Presenter) -> ActionOutcome {
        if self.state.outcome().is_some() {
            return ActionOutcome::Ignored(RuleError::GameOver);
        }
        if !self.state.start() {
            return ActionOutcome::Ignored(RuleError::AlreadyStarted);
        }
        let token = self.timer.start(self.state.current());
        info!(?token, "game started");
        out.render_turn_banner(&self.banner());
        ActionOutcome::Started
    }

    /// Back to the initial position with full clocks, popup hidden.
    pub fn reset(&mut self, out: &mut dyn Presenter) -> ActionOutcome {
        self.timer.reset();
        self.state.reset();
        info!("game reset");
        self.render_board(out);
        out.render_turn_banner(&self.banner());
        self.render_timers(out);
        out.hide_end_popup();
        ActionOutcome::Reset
    }

    /// React to a click on cell `index`.
    pub fn cell_clicked(&mut self, index: u8, out: &mut dyn Presenter) -> ActionOutcome {
        if self.state.outcome().is_some() {
            return ActionOutcome::Ignored(RuleError::GameOver);
        }
        if !self.state.started() {
            return ActionOutcome::Ignored(RuleError::NotStarted);
        }
        let player = self.state.current();
        let Some(cell) = self.state.board().get(index) else {
            return ActionOutcome::Ignored(RuleError::OutOfBounds(index));
        };

        match cell {
            Some(owner) if owner == player => self.toggle_selection(index, out),
            Some(_) => ActionOutcome::Ignored(RuleError::NotOwned(index)),
            // A picked-up piece takes priority over placing a new one.
            None if self.state.selected().is_some() => match self.state.move_selected(index) {
                Ok(from) => {
                    self.render_cell(from, out);
                    self.render_cell(index, out);
                    self.end_turn(ActionOutcome::Moved { from, to: index }, out)
                }
                Err(e) => ActionOutcome::Ignored(e),
            },
            None if self.state.player(player).finished_placing() => {
                ActionOutcome::Ignored(RuleError::NoSelection)
            }
            None => {
                if let Err(e) = self.state.place(index) {
                    return ActionOutcome::Ignored(e);
                }
                self.render_cell(index, out);
                self.end_turn(ActionOutcome::Placed(index), out)
            }
        }
    }

    /// Deliver one clock tick.
    pub fn on_tick(&mut self, token: ClockToken, out: &mut dyn Presenter) -> TickOutcome {
        let outcome = self.timer.on_tick(token);
        match outcome {
            TickOutcome::Ignored => trace!(?token, "stale tick dropped"),
            TickOutcome::Decremented { player, remaining } => {
                out.render_timer(player, &format_clock(remaining));
            }
            TickOutcome::Expired(loser) => {
                out.render_timer(loser, &format_clock(0));
                let selected = self.state.selected();
                let result = GameOutcome::TimedOut { loser };
                self.state.finish(result);
                if let Some(index) = selected {
                    self.render_cell(index, out);
                }
                info!(%loser, "clock expired");
                out.show_end_popup(&result.message());
            }
        }
        outcome
    }

    /// Push the complete current state to `out`.
    pub fn refresh(&self, out: &mut dyn Presenter) {
        self.render_board(out);
        out.render_turn_banner(&self.banner());
        self.render_timers(out);
        match self.state.outcome() {
            Some(result) => out.show_end_popup(&result.message()),
            None => out.hide_end_popup(),
        }
    }

    /// Banner text for the player to move
    pub fn banner(&self) -> String {
        let player = self.state.current();
        if self.state.player(player).finished_placing() {
            format!("Current Turn: Player {player} (move pieces)")
        } else {
            format!("Current Turn: Player {player}")
        }
    }

    fn toggle_selection(&mut self, index: u8, out: &mut dyn Presenter) -> ActionOutcome {
        let previous = self.state.selected();
        match self.state.toggle_selection(index) {
            Ok(now) => {
                if let Some(prev) = previous.filter(|&p| p != index) {
                    self.render_cell(prev, out);
                }
                self.render_cell(index, out);
                match now {
                    Some(i) => ActionOutcome::Selected(i),
                    None => ActionOutcome::Deselected(index),
                }
            }
            Err(e) => ActionOutcome::Ignored(e),
        }
    }

    /// After a placement or move: finish on a win, otherwise pass the turn.
    fn end_turn(&mut self, done: ActionOutcome, out: &mut dyn Presenter) -> ActionOutcome {
        let player = self.state.current();
        if let Some(line) = self.state.current_win() {
            self.timer.stop();
            let result = GameOutcome::Won {
                winner: player,
                line,
            };
            self.state.finish(result);
            for i in line {
                self.render_cell(i, out);
            }
            info!(winner = %player, ?line, "game won");
            out.show_end_popup(&result.message());
            return ActionOutcome::Won(result);
        }

        self.state.switch_turn();
        let token = self.timer.switch_to(self.state.current());
        debug!(?token, "turn passed");
        out.render_turn_banner(&self.banner());
        done
    }

    fn flags(&self, index: u8) -> CellFlags {
        let win = self
            .state
            .outcome()
            .and_then(|o| o.win_line())
            .is_some_and(|line| line.contains(&index));
        CellFlags {
            taken: !self.state.board().is_empty(index),
            selected: self.state.selected() == Some(index),
            win,
        }
    }

    fn render_cell(&self, index: u8, out: &mut dyn Presenter) {
        let content = self.state.board().get(index).flatten();
        out.render_cell(index, content, self.flags(index));
    }

    fn render_board(&self, out: &mut dyn Presenter) {
        for index in 0..BOARD_CELLS as u8 {
            self.render_cell(index, out);
        }
    }

    fn render_timers(&self, out: &mut dyn Presenter) {
        for player in Player::ALL {
            out.render_timer(player, &format_clock(self.timer.remaining(player)));
        }
    }
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_CLOCK_SECS)
    }
}
