use std::io;
use std::time::Duration;
use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::events::RawInput;
use crate::input::InputController;
use crate::life::Life;
use crate::life::Response;
use crate::render::Canvas;
use crate::render::RenderError;
use crate::render::Renderer;

/// The windowing side of the application: where input comes from and where frames go.
pub trait Host {
    type Canvas: Canvas;

    /// Collect pending input, waiting at most `timeout` for some to arrive
    fn poll(&mut self, timeout: Duration) -> io::Result<Vec<RawInput>>;

    fn canvas(&mut self) -> &mut Self::Canvas;
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to poll for input: {0}")]
    Poll(#[from] io::Error),

    #[error("Failed to render: {0}")]
    Render(#[from] RenderError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drives a [`Life`] from a [`Host`]: input first, then at most one generation, every iteration.
pub struct App {
    input: InputController,
    renderer: Renderer,
    poll_timeout: Duration,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            input: InputController::new(config),
            renderer: Renderer::new(config.cell_size),
            poll_timeout: config.poll_timeout,
        }
    }

    /// Run until a quit event arrives
    pub fn run<H: Host>(&self, host: &mut H, life: &mut Life) -> Result<(), AppError> {
        self.renderer.draw(host.canvas(), life.grid())?;

        loop {
            if self.handle_input(host, life)? == Flow::Quit {
                break;
            }

            self.advance(host, life, Instant::now())?;
        }

        debug!(generation = life.grid().generation(), "quit requested");

        Ok(())
    }

    /// Apply everything the host has pending, drawing right away after edits
    pub fn handle_input<H: Host>(&self, host: &mut H, life: &mut Life) -> Result<Flow, AppError> {
        for raw in host.poll(self.poll_timeout)? {
            let Some(event) = self.input.translate(raw) else {
                continue;
            };

            match life.apply(event) {
                Response::Continue => {}
                Response::Redraw => self.renderer.draw(host.canvas(), life.grid())?,
                Response::Quit => return Ok(Flow::Quit),
            }
        }

        Ok(Flow::Continue)
    }

    /// Advance and draw if the simulation is running and due. Returns whether it advanced.
    pub fn advance<H: Host>(
        &self,
        host: &mut H,
        life: &mut Life,
        now: Instant,
    ) -> Result<bool, AppError> {
        if !life.tick(now) {
            return Ok(false);
        }

        self.renderer.draw(host.canvas(), life.grid())?;

        Ok(true)
    }
}
