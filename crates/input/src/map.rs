//! Key and mouse mapping from terminal events to input events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::types::GameAction;

/// Cursor movement on the 3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Everything a key press can mean.
///
/// Only [`InputEvent::Game`] (and [`InputEvent::Activate`], via the cursor)
/// reaches the rules; the rest is handled by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Game(GameAction),
    Cursor(Direction),
    /// Click the cell under the cursor
    Activate,
    ToggleRules,
    /// Close the popup or rules panel
    Dismiss,
}

/// Map keyboard input to input events.
pub fn handle_key_event(key: KeyEvent) -> Option<InputEvent> {
    match key.code {
        // Cells 1-9, row-major
        KeyCode::Char(c @ '1'..='9') => Some(InputEvent::Game(GameAction::CellClicked(c as u8 - b'1'))),

        // Cursor
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(InputEvent::Cursor(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(InputEvent::Cursor(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(InputEvent::Cursor(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(InputEvent::Cursor(Direction::Right))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputEvent::Activate),

        // Game control
        KeyCode::Char('s') | KeyCode::Char('S') => Some(InputEvent::Game(GameAction::StartGame)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::Game(GameAction::ResetGame)),

        // Overlays
        KeyCode::Char('?') => Some(InputEvent::ToggleRules),
        KeyCode::Esc => Some(InputEvent::Dismiss),

        _ => None,
    }
}

/// Terminal position of a left-button press, if this is one.
pub fn mouse_click_position(mouse: MouseEvent) -> Option<(u16, u16)> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some((mouse.column, mouse.row)),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
