use tracing::debug;

use crate::config::Config;
use crate::config::KeyBindings;
use crate::events::Button;
use crate::events::InputEvent;
use crate::events::Key;
use crate::events::RawInput;

/// Turns raw host input into [`InputEvent`]s.
///
/// Releases are dropped here, so nothing downstream ever reacts to a key or button going up.
#[derive(Clone, Debug)]
pub struct InputController {
    bindings: KeyBindings,

    screen_width: u32,
    screen_height: u32,
    cell_size: u32,

    grid_width: usize,
    grid_height: usize,
}

impl InputController {
    pub fn new(config: &Config) -> Self {
        Self {
            bindings: config.bindings.clone(),
            screen_width: config.screen_width,
            screen_height: config.screen_height,
            cell_size: config.cell_size,
            grid_width: config.grid_width(),
            grid_height: config.grid_height(),
        }
    }

    pub fn translate(&self, input: RawInput) -> Option<InputEvent> {
        match input {
            RawInput::CloseRequested => Some(InputEvent::Quit),
            RawInput::Key { action, .. } | RawInput::Pointer { action, .. }
                if !action.is_active() =>
            {
                None
            }
            RawInput::Key { key, .. } => self.translate_key(key),
            RawInput::Pointer {
                button: Button::Primary,
                x,
                y,
                ..
            } => {
                let Some((x, y)) = self.screen_to_grid(x, y) else {
                    debug!(x, y, "click outside of the grid");
                    return None;
                };

                Some(InputEvent::ToggleCell { x, y })
            }
            RawInput::Pointer { .. } => None,
        }
    }

    fn translate_key(&self, key: Key) -> Option<InputEvent> {
        let KeyBindings { quit, pause, clear } = &self.bindings;

        if quit.contains(&key) {
            Some(InputEvent::Quit)
        } else if pause.contains(&key) {
            Some(InputEvent::TogglePause)
        } else if clear.contains(&key) {
            Some(InputEvent::ClearGrid)
        } else {
            None
        }
    }

    /// Maps a screen position (`y` growing downwards) to grid coordinates (`y` growing upwards).
    ///
    /// Positions on the far edges of the screen belong to the last pixel row or column, so
    /// `(0, height)` is cell `(0, 0)` and `(width - 1, 0)` is the top right cell. Anything off the
    /// screen, or in the margin past the last full cell, is `None`.
    pub fn screen_to_grid(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let (w, h) = (self.screen_width as f64, self.screen_height as f64);
        let cell_size = self.cell_size as f64;

        // NaN fails both checks
        if !(0.0..=w).contains(&x) || !(0.0..=h).contains(&y) {
            return None;
        }

        let x = x.min(w - 1.0);
        let y = (h - y).min(h - 1.0);

        let gx = (x / cell_size).floor() as usize;
        let gy = (y / cell_size).floor() as usize;

        (gx < self.grid_width && gy < self.grid_height).then_some((gx, gy))
    }
}
