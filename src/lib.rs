pub mod app;
pub mod clock;
pub mod config;
pub mod events;
pub mod grid;
pub mod input;
pub mod io;
pub mod life;
pub mod render;
pub mod rule_set;
pub mod terminal;

/// Signed grid coordinate. Lets neighbour lookups step off the grid edge.
pub type CellOffset = i32;
