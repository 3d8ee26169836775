//! Snapshot module - copyable read model of a game
//!
//! Observers, tests and the trace read the game through [`GameSnapshot`] rather
//! than borrowing [`GameState`]. [`GameSnapshot::fill`] reuses an existing value.

use serde::{Deserialize, Serialize};

use crate::game_state::{GamePhase, GameState};
use crate::timer::TimerService;
use crate::types::{Cell, Player, WinLine, BOARD_CELLS};

/// Read-only copy of everything observable about a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub cells: [Cell; BOARD_CELLS],
    pub current: Player,
    pub selected: Option<u8>,
    pub placed: [u8; 2],
    pub remaining_secs: [u32; 2],
    pub running: Option<Player>,
    pub phase: GamePhase,
    pub win_line: Option<WinLine>,
}

impl GameSnapshot {
    pub fn capture(state: &GameState, timer: &TimerService) -> Self {
        let mut s = Self::default();
        s.fill(state, timer);
        s
    }

    /// Overwrite every field from the live state.
    pub fn fill(&mut self, state: &GameState, timer: &TimerService) {
        self.cells = *state.board().cells();
        self.current = state.current();
        self.selected = state.selected();
        for p in Player::ALL {
            self.placed[p.index()] = state.player(p).placed();
            self.remaining_secs[p.index()] = timer.remaining(p);
        }
        self.running = timer.running();
        self.phase = state.phase();
        self.win_line = state.outcome().and_then(|o| o.win_line());
    }

    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|&&c| c == Some(player)).count()
    }

    pub fn playable(&self) -> bool {
        matches!(self.phase, GamePhase::Placing | GamePhase::Moving)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
            current: Player::X,
            selected: None,
            placed: [0; 2],
            remaining_secs: [0; 2],
            running: None,
            phase: GamePhase::NotStarted,
            win_line: None,
        }
    }
}
