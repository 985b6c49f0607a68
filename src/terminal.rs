use std::io;
use std::io::Stdout;
use std::io::Write;
use std::time::Duration;

use crossterm::cursor;
use crossterm::event;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::style::Color as TermColor;
use crossterm::terminal;
use tracing::error;
use tracing::warn;

use crate::app::Host;
use crate::events::RawInput;
use crate::io::PIXELS_PER_ROW;
use crate::io::convert_event;
use crate::render::Canvas;
use crate::render::Color;
use crate::render::Framebuffer;
use crate::render::Quad;
use crate::render::RenderError;

/// Upper half block. Its foreground is the upper pixel, its background the lower one.
const HALF_BLOCK: char = '\u{2580}';

/// A terminal acting as window, event source and canvas.
///
/// The terminal is put into raw mode on creation and restored when dropped.
pub struct Terminal {
    out: Stdout,
    fb: Framebuffer,
    title: String,
}

impl Terminal {
    /// Take over the terminal for a `width` by `height` pixel screen
    pub fn new(width: usize, height: usize, title: &str) -> io::Result<Self> {
        let mut term = Self {
            out: io::stdout(),
            fb: Framebuffer::new(width, height),
            title: title.to_string(),
        };

        let (cols, rows) = terminal::size()?;
        let needed = (width, height.div_ceil(PIXELS_PER_ROW as usize));
        if (cols as usize) < needed.0 || (rows as usize) < needed.1 {
            warn!(cols, rows, ?needed, "terminal is smaller than the screen, output will be cut");
        }

        term.enter()?;

        Ok(term)
    }

    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;

        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            terminal::SetTitle(&self.title),
            terminal::Clear(terminal::ClearType::All),
        )
    }

    fn leave(&mut self) -> io::Result<()> {
        execute!(
            self.out,
            style::ResetColor,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
        )?;

        terminal::disable_raw_mode()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(e) = self.leave() {
            error!("Failed to restore the terminal: {e}");
        }
    }
}

impl Host for Terminal {
    type Canvas = Self;

    /// Waits up to `timeout` for the first event, then drains whatever else is pending
    fn poll(&mut self, timeout: Duration) -> io::Result<Vec<RawInput>> {
        let mut inputs = Vec::new();
        let mut timeout = timeout;

        while event::poll(timeout)? {
            if let Some(input) = convert_event(event::read()?) {
                inputs.push(input);
            }

            timeout = Duration::ZERO;
        }

        Ok(inputs)
    }

    fn canvas(&mut self) -> &mut Self {
        self
    }
}

impl Canvas for Terminal {
    fn clear(&mut self, color: Color) {
        self.fb.fill(color);
    }

    fn draw_quad(&mut self, quad: &Quad, color: Color) {
        self.fb.fill_quad(quad, color);
    }

    fn present(&mut self) -> Result<(), RenderError> {
        queue!(self.out, terminal::BeginSynchronizedUpdate)?;

        let mut last = None;
        for (row, pairs) in half_blocks(&self.fb).enumerate() {
            queue!(self.out, cursor::MoveTo(0, row as u16))?;

            for pair in pairs {
                if last != Some(pair) {
                    let (upper, lower) = pair;
                    queue!(
                        self.out,
                        style::SetForegroundColor(term_color(upper)),
                        style::SetBackgroundColor(term_color(lower)),
                    )?;
                    last = Some(pair);
                }

                queue!(self.out, style::Print(HALF_BLOCK))?;
            }
        }

        queue!(self.out, style::ResetColor, terminal::EndSynchronizedUpdate)?;
        self.out.flush()?;

        Ok(())
    }

    fn is_current(&self) -> bool {
        terminal::is_raw_mode_enabled().unwrap_or(false)
    }

    fn make_current(&mut self) -> Result<(), RenderError> {
        Ok(self.enter()?)
    }
}

fn term_color(color: Color) -> TermColor {
    let (r, g, b) = color.to_rgb8();
    TermColor::Rgb { r, g, b }
}

/// Pairs of (upper, lower) pixel colors, one row of terminal cells at a time from the top.
///
/// The framebuffer grows upwards, so the top terminal row holds its two highest pixel rows. An
/// odd height leaves the lowest half block black.
pub fn half_blocks(fb: &Framebuffer) -> impl Iterator<Item = Vec<(Color, Color)>> + '_ {
    let rows = fb.height().div_ceil(PIXELS_PER_ROW as usize);

    (0..rows).map(move |row| {
        let upper = fb.height() - 1 - row * 2;
        let lower = upper.checked_sub(1);

        (0..fb.width())
            .map(|x| {
                let lower = lower.map_or(Color::BLACK, |y| fb.pixel(x, y));
                (fb.pixel(x, upper), lower)
            })
            .collect()
    })
}
