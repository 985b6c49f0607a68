use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use tracing::debug;

use crate::events::Action;
use crate::events::Button;
use crate::events::Key;
use crate::events::RawInput;

/// Screen pixels per terminal row. Each character cell is drawn as two stacked half blocks.
pub const PIXELS_PER_ROW: u32 = 2;

/// Converts a crossterm event into a raw input event
pub fn convert_event(event: CrossTermEvent) -> Option<RawInput> {
    match event {
        CrossTermEvent::Key(key_event) => convert_key(key_event),
        CrossTermEvent::Mouse(mouse_event) => convert_mouse(mouse_event),
        CrossTermEvent::Resize(cols, rows) => {
            debug!(cols, rows, "terminal resized, keeping the screen size");
            None
        }
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<RawInput> {
    let action = match key_event.kind {
        KeyEventKind::Press => Action::Press,
        KeyEventKind::Repeat => Action::Repeat,
        KeyEventKind::Release => Action::Release,
    };

    let key = match key_event {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => return Some(RawInput::CloseRequested),
        KeyEvent {
            code: KeyCode::Esc, ..
        } => Key::Escape,
        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } => Key::Space,
        KeyEvent {
            code: KeyCode::Char(c),
            ..
        } => Key::Char(c.to_ascii_lowercase()),
        _ => return None,
    };

    Some(RawInput::Key { key, action })
}

/// Only presses and releases are converted. Moves and drags never edit the grid.
fn convert_mouse(mouse_event: MouseEvent) -> Option<RawInput> {
    let (button, action) = match mouse_event.kind {
        MouseEventKind::Down(button) => (button, Action::Press),
        MouseEventKind::Up(button) => (button, Action::Release),
        _ => return None,
    };

    let button = match button {
        MouseButton::Left => Button::Primary,
        MouseButton::Right => Button::Secondary,
        MouseButton::Middle => Button::Middle,
    };

    let (x, y) = cell_centre(mouse_event.column, mouse_event.row);

    Some(RawInput::Pointer {
        button,
        action,
        x,
        y,
    })
}

/// Screen position of the centre of a terminal cell, `y` growing downwards
pub fn cell_centre(column: u16, row: u16) -> (f64, f64) {
    let x = column as f64 + 0.5;
    let y = (row as u32 * PIXELS_PER_ROW) as f64 + PIXELS_PER_ROW as f64 / 2.0;

    (x, y)
}
