use std::time::Instant;

use tracing::debug;
use tracing::trace;

use crate::clock::SimulationClock;
use crate::config::Config;
use crate::config::ConfigError;
use crate::events::InputEvent;
use crate::grid::Grid;
use crate::rule_set::RuleSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Paused,
}

/// What the loop should do after an [`InputEvent`] was applied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    Continue,

    /// The grid changed and should be drawn right away
    Redraw,

    Quit,
}

/// All mutable simulation state, owned by the loop.
pub struct Life {
    grid: Grid,
    rules: RuleSet,
    clock: SimulationClock,
    state: LoopState,
}

impl Life {
    pub fn new(grid: Grid, rules: RuleSet, clock: SimulationClock) -> Self {
        Self {
            grid,
            rules,
            clock,
            state: LoopState::Running,
        }
    }

    /// Empty grid sized from `config`, with the clock starting at `now`
    pub fn from_config(config: &Config, now: Instant) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = Grid::new(config.grid_width(), config.grid_height());
        let clock = SimulationClock::new(config.timestep, now);

        Ok(Self::new(grid, config.rule_set()?, clock))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == LoopState::Paused
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            LoopState::Running => LoopState::Paused,
            LoopState::Paused => LoopState::Running,
        };
    }

    /// Apply an input event. Edits go through regardless of whether the simulation is paused.
    pub fn apply(&mut self, event: InputEvent) -> Response {
        debug!(?event, state = ?self.state, "input");

        match event {
            InputEvent::Quit => Response::Quit,
            InputEvent::TogglePause => {
                self.toggle_pause();
                Response::Continue
            }
            InputEvent::ClearGrid => {
                self.grid.clear();
                Response::Redraw
            }
            InputEvent::ToggleCell { x, y } => {
                if x >= self.grid.width() || y >= self.grid.height() {
                    return Response::Continue;
                }

                self.grid.toggle(x, y);
                Response::Redraw
            }
        }
    }

    /// Advance one generation if running and the clock allows it. Returns whether it advanced.
    ///
    /// While paused the clock is left alone, so the first tick after resuming advances as soon
    /// as a timestep has passed since the last generation.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.is_paused() || !self.clock.tick(now) {
            return false;
        }

        self.grid.advance(&self.rules);

        debug!(
            generation = self.grid.generation(),
            population = self.grid.population(),
            "advanced"
        );
        trace!("\n{}", self.grid);

        true
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;
    use std::time::Instant;

    use super::*;
    use crate::rule_set::B3S23;

    const STEP: Duration = Duration::from_millis(100);

    fn blinker(now: Instant) -> Life {
        let grid = Grid::with_cells(5, 5, [(1, 2), (2, 2), (3, 2)]);
        Life::new(grid, B3S23, SimulationClock::new(STEP, now))
    }

    #[test]
    fn starts_running() {
        let life = blinker(Instant::now());

        assert_eq!(life.state(), LoopState::Running);
    }

    #[test]
    fn tick_waits_for_the_clock() {
        let t0 = Instant::now();
        let mut life = blinker(t0);

        assert!(!life.tick(t0 + STEP));
        assert_eq!(life.grid().generation(), 0);

        assert!(life.tick(t0 + STEP * 2));
        assert_eq!(life.grid().generation(), 1);
    }

    #[test]
    fn paused_never_advances() {
        let t0 = Instant::now();
        let mut life = blinker(t0);
        let before = life.grid().clone();

        assert_eq!(life.apply(InputEvent::TogglePause), Response::Continue);

        for i in 1..10 {
            assert!(!life.tick(t0 + STEP * i * 2));
        }

        assert_eq!(life.grid(), &before);

        life.apply(InputEvent::TogglePause);
        assert!(life.tick(t0 + STEP * 20));
    }

    #[test]
    fn edits_work_while_paused() {
        let mut life = blinker(Instant::now());
        life.toggle_pause();

        assert_eq!(
            life.apply(InputEvent::ToggleCell { x: 0, y: 0 }),
            Response::Redraw
        );
        assert!(life.grid().get(0, 0));

        assert_eq!(life.apply(InputEvent::ClearGrid), Response::Redraw);
        assert_eq!(life.grid().population(), 0);
        assert!(life.is_paused());
    }

    #[test]
    fn out_of_grid_toggle_is_ignored() {
        let mut life = blinker(Instant::now());

        assert_eq!(
            life.apply(InputEvent::ToggleCell { x: 5, y: 0 }),
            Response::Continue
        );
        assert_eq!(life.grid().population(), 3);
    }

    #[test]
    fn quit() {
        let mut life = blinker(Instant::now());

        assert_eq!(life.apply(InputEvent::Quit), Response::Quit);
    }
}
