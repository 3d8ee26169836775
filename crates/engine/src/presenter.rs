//! Presentation contract between the game and whatever displays it.
//!
//! The controller never draws anything itself. It reports what changed through
//! [`Presenter`] and the implementation decides how to show it (terminal
//! framebuffer, JSON trace, test log).

use serde::{Deserialize, Serialize};

use crate::types::{Cell, CellFlags, Player};

/// Receives state-change notifications from the controller.
pub trait Presenter {
    fn render_cell(&mut self, index: u8, content: Cell, flags: CellFlags);
    fn render_turn_banner(&mut self, text: &str);
    fn render_timer(&mut self, player: Player, formatted: &str);
    fn show_end_popup(&mut self, message: &str);
    fn hide_end_popup(&mut self);
}

/// One presenter call, as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PresentationEvent {
    Cell {
        index: u8,
        content: Cell,
        flags: CellFlags,
    },
    TurnBanner {
        text: String,
    },
    Timer {
        player: Player,
        time: String,
    },
    ShowPopup {
        message: String,
    },
    HidePopup,
}

impl PresentationEvent {
    /// Replay this event into another presenter.
    pub fn apply(&self, out: &mut dyn Presenter) {
        match self {
            PresentationEvent::Cell {
                index,
                content,
                flags,
            } => out.render_cell(*index, *content, *flags),
            PresentationEvent::TurnBanner { text } => out.render_turn_banner(text),
            PresentationEvent::Timer { player, time } => out.render_timer(*player, time),
            PresentationEvent::ShowPopup { message } => out.show_end_popup(message),
            PresentationEvent::HidePopup => out.hide_end_popup(),
        }
    }
}

/// Presenter that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<PresentationEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PresentationEvent] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn last_banner(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            PresentationEvent::TurnBanner { text } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn last_popup(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            PresentationEvent::ShowPopup { message } => Some(message.as_str()),
            _ => None,
        })
    }
}

impl Presenter for EventLog {
    fn render_cell(&mut self, index: u8, content: Cell, flags: CellFlags) {
        self.events.push(PresentationEvent::Cell {
            index,
            content,
            flags,
        });
    }

    fn render_turn_banner(&mut self, text: &str) {
        self.events.push(PresentationEvent::TurnBanner {
            text: text.to_string(),
        });
    }

    fn render_timer(&mut self, player: Player, formatted: &str) {
        self.events.push(PresentationEvent::Timer {
            player,
            time: formatted.to_string(),
        });
    }

    fn show_end_popup(&mut self, message: &str) {
        self.events.push(PresentationEvent::ShowPopup {
            message: message.to_string(),
        });
    }

    fn hide_end_popup(&mut self) {
        self.events.push(PresentationEvent::HidePopup);
    }
}

/// Presenter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render_cell(&mut self, _index: u8, _content: Cell, _flags: CellFlags) {}
    fn render_turn_banner(&mut self, _text: &str) {}
    fn render_timer(&mut self, _player: Player, _formatted: &str) {}
    fn show_end_popup(&mut self, _message: &str) {}
    fn hide_end_popup(&mut self) {}
}

/// Fan out to two presenters, first then second.
impl<A: Presenter, B: Presenter> Presenter for (A, B) {
    fn render_cell(&mut self, index: u8, content: Cell, flags: CellFlags) {
        self.0.render_cell(index, content, flags);
        self.1.render_cell(index, content, flags);
    }

    fn render_turn_banner(&mut self, text: &str) {
        self.0.render_turn_banner(text);
        self.1.render_turn_banner(text);
    }

    fn render_timer(&mut self, player: Player, formatted: &str) {
        self.0.render_timer(player, formatted);
        self.1.render_timer(player, formatted);
    }

    fn show_end_popup(&mut self, message: &str) {
        self.0.show_end_popup(message);
        self.1.show_end_popup(message);
    }

    fn hide_end_popup(&mut self) {
        self.0.hide_end_popup();
        self.1.hide_end_popup();
    }
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn render_cell(&mut self, index: u8, content: Cell, flags: CellFlags) {
        (**self).render_cell(index, content, flags);
    }

    fn render_turn_banner(&mut self, text: &str) {
        (**self).render_turn_banner(text);
    }

    fn render_timer(&mut self, player: Player, formatted: &str) {
        (**self).render_timer(player, formatted);
    }

    fn show_end_popup(&mut self, message: &str) {
        (**self).show_end_popup(message);
    }

    fn hide_end_popup(&mut self) {
        (**self).hide_end_popup();
    }
}

impl<P: Presenter> Presenter for Option<P> {
    fn render_cell(&mut self, index: u8, content: Cell, flags: CellFlags) {
        if let Some(p) = self {
            p.render_cell(index, content, flags);
        }
    }

    fn render_turn_banner(&mut self, text: &str) {
        if let Some(p) = self {
            p.render_turn_banner(text);
        }
    }

    fn render_timer(&mut self, player: Player, formatted: &str) {
        if let Some(p) = self {
            p.render_timer(player, formatted);
        }
    }

    fn show_end_popup(&mut self, message: &str) {
        if let Some(p) = self {
            p.show_end_popup(message);
        }
    }

    fn hide_end_popup(&mut self) {
        if let Some(p) = self {
            p.hide_end_popup();
        }
    }
}
