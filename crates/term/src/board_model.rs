//! Screen-side copy of everything the controller has presented.
//!
//! [`BoardModel`] is the terminal's [`Presenter`]: it only stores what it is
//! told, and [`GameView`](crate::GameView) draws from it. The overlays it
//! tracks (popup visibility, rules panel) are front-end state that never feeds
//! back into the game.

use crate::engine::Presenter;
use crate::types::{format_clock, Cell, CellFlags, Player, BOARD_CELLS, DEFAULT_CLOCK_SECS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardModel {
    cells: [Cell; BOARD_CELLS],
    flags: [CellFlags; BOARD_CELLS],
    banner: String,
    timers: [String; 2],
    popup: Option<String>,
    popup_visible: bool,
    rules_visible: bool,
    revision: u64,
}

impl BoardModel {
    pub fn new() -> Self {
        let clock = format_clock(DEFAULT_CLOCK_SECS);
        Self {
            cells: [None; BOARD_CELLS],
            flags: [CellFlags::default(); BOARD_CELLS],
            banner: String::new(),
            timers: [clock.clone(), clock],
            popup: None,
            popup_visible: false,
            rules_visible: false,
            revision: 0,
        }
    }

    pub fn cell(&self, index: u8) -> Cell {
        self.cells.get(index as usize).copied().flatten()
    }

    pub fn flags(&self, index: u8) -> CellFlags {
        self.flags
            .get(index as usize)
            .copied()
            .unwrap_or_default()
    }

    pub fn banner(&self) -> &str {
        &self.banner
    }

    pub fn timer(&self, player: Player) -> &str {
        &self.timers[player.index()]
    }

    /// End-of-game message, while it is on screen
    pub fn popup(&self) -> Option<&str> {
        self.popup
            .as_deref()
            .filter(|_| self.popup_visible)
    }

    /// The game ended, even if the popup was dismissed
    pub fn has_result(&self) -> bool {
        self.popup.is_some()
    }

    pub fn rules_visible(&self) -> bool {
        self.rules_visible
    }

    pub fn toggle_rules(&mut self) {
        self.rules_visible = !self.rules_visible;
        self.bump();
    }

    /// Close the topmost overlay. Returns false if nothing was open.
    pub fn dismiss(&mut self) -> bool {
        if self.rules_visible {
            self.rules_visible = false;
        } else if self.popup_visible {
            self.popup_visible = false;
        } else {
            return false;
        }
        self.bump();
        true
    }

    /// Counter bumped on every visible change; redraw when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for BoardModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for BoardModel {
    fn render_cell(&mut self, index: u8, content: Cell, flags: CellFlags) {
        let i = index as usize;
        if i < BOARD_CELLS {
            self.cells[i] = content;
            self.flags[i] = flags;
            self.bump();
        }
    }

    fn render_turn_banner(&mut self, text: &str) {
        if self.banner != text {
            self.banner.clear();
            self.banner.push_str(text);
            self.bump();
        }
    }

    fn render_timer(&mut self, player: Player, formatted: &str) {
        let slot = &mut self.timers[player.index()];
        if slot != formatted {
            slot.clear();
            slot.push_str(formatted);
            self.bump();
        }
    }

    fn show_end_popup(&mut self, message: &str) {
        self.popup = Some(message.to_string());
        self.popup_visible = true;
        self.bump();
    }

    fn hide_end_popup(&mut self) {
        if self.popup.take().is_some() || self.popup_visible {
            self.popup_visible = false;
            self.bump();
        }
    }
}
