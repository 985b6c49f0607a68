use std::time::Duration;

use thiserror::Error;

use crate::events::Key;
use crate::render::FILL_INSET;
use crate::rule_set::RuleSet;
use crate::rule_set::RuleSetError;

/// Screen width in pixels. In a terminal, a pixel is one column wide.
pub const SCREEN_WIDTH: u32 = 96;

/// Screen height in pixels. In a terminal, a pixel is half a row tall.
pub const SCREEN_HEIGHT: u32 = 60;

/// Side length of a cell in pixels
pub const CELL_SIZE: u32 = 6;

/// Minimum time between two generations
pub const TIMESTEP: Duration = Duration::from_millis(100);

/// Longest the host may wait for input before handing control back to the loop
pub const POLL_TIMEOUT: Duration = Duration::from_millis(5);

// See: https://conwaylife.com/wiki/Rulestring
pub const LIFE_RULES: &str = "b3s23";

pub const TITLE: &str = "Game Of Life";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    pub quit: Vec<Key>,
    pub pause: Vec<Key>,
    pub clear: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: vec![Key::Escape, Key::Char('q')],
            pause: vec![Key::Space],
            clear: vec![Key::Char('c')],
        }
    }
}

/// Startup configuration. Nothing here changes once the loop runs.
#[derive(Clone, Debug)]
pub struct Config {
    pub screen_width: u32,
    pub screen_height: u32,
    pub cell_size: u32,
    pub timestep: Duration,
    pub poll_timeout: Duration,
    pub rules: String,
    pub title: String,
    pub bindings: KeyBindings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            cell_size: CELL_SIZE,
            timestep: TIMESTEP,
            poll_timeout: POLL_TIMEOUT,
            rules: LIFE_RULES.to_string(),
            title: TITLE.to_string(),
            bindings: KeyBindings::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Cell size must be at least {min} pixels to fit the cell border, got {got}")]
    CellTooSmall { min: u32, got: u32 },

    #[error("A {width}x{height} screen fits no {cell_size} pixel cell")]
    EmptyGrid {
        width: u32,
        height: u32,
        cell_size: u32,
    },

    #[error("Invalid rules \"{rules}\": {source}")]
    Rules {
        rules: String,
        #[source]
        source: RuleSetError,
    },
}

impl Config {
    /// Grid width in cells. Leftover pixels are unused margin.
    pub fn grid_width(&self) -> usize {
        (self.screen_width / self.cell_size.max(1)) as usize
    }

    /// Grid height in cells. Leftover pixels are unused margin.
    pub fn grid_height(&self) -> usize {
        (self.screen_height / self.cell_size.max(1)) as usize
    }

    pub fn rule_set(&self) -> Result<RuleSet, ConfigError> {
        self.rules.parse().map_err(|source| ConfigError::Rules {
            rules: self.rules.clone(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // the fill quad is inset on both sides and must keep at least one pixel
        let min = 2 * FILL_INSET + 1;
        if self.cell_size < min {
            return Err(ConfigError::CellTooSmall {
                min,
                got: self.cell_size,
            });
        }

        if self.grid_width() == 0 || self.grid_height() == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.screen_width,
                height: self.screen_height,
                cell_size: self.cell_size,
            });
        }

        self.rule_set()?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = Config::default();

        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.grid_width(), 16);
        assert_eq!(config.grid_height(), 10);
    }

    #[test]
    fn margin_is_dropped() {
        let config = Config {
            screen_width: 100,
            screen_height: 65,
            ..Config::default()
        };

        assert_eq!(config.grid_width(), 16);
        assert_eq!(config.grid_height(), 10);
    }

    #[test]
    fn rejects_tiny_cells() {
        let config = Config {
            cell_size: 4,
            ..Config::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::CellTooSmall { min: 5, got: 4 })
        );
    }

    #[test]
    fn rejects_empty_grid() {
        let config = Config {
            screen_height: 5,
            ..Config::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn rejects_bad_rules() {
        let config = Config {
            rules: "b3s2x".to_string(),
            ..Config::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::Rules { .. })));
    }
}
