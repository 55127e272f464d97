//! Event mapping from terminal events to game input.

use crate::types::PointerPos;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Input the front-end acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Primary button pressed at a terminal cell
    PointerDown(PointerPos),
    /// Pointer moved with the primary button held
    PointerMove(PointerPos),
    /// Primary button released
    PointerUp(PointerPos),
    /// Deal a fresh encounter
    Restart,
    /// Ask the engine for a productive swap
    Hint,
    Quit,
}

/// Map any terminal event to game input.
pub fn map_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Mouse(mouse) => handle_mouse_event(*mouse),
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if should_quit(*key) {
                Some(InputEvent::Quit)
            } else {
                handle_key_event(*key)
            }
        }
        _ => None,
    }
}

/// Map mouse input to pointer events (left button only).
pub fn handle_mouse_event(mouse: MouseEvent) -> Option<InputEvent> {
    let pos = PointerPos::new(i32::from(mouse.column), i32::from(mouse.row));
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerDown(pos)),
        MouseEventKind::Drag(MouseButton::Left) => Some(InputEvent::PointerMove(pos)),
        MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::PointerUp(pos)),
        _ => None,
    }
}

/// Map keyboard input to game input.
pub fn handle_key_event(key: KeyEvent) -> Option<InputEvent> {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::Restart),
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => Some(InputEvent::Hint),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
