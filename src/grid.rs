use std::fmt;

use crate::CellOffset;
use crate::rule_set::StepRule;

/// Offsets of the 8 cells surrounding a cell
const NEIGHBOURHOOD: [(CellOffset, CellOffset); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A fixed size, double buffered grid of cells.
///
/// `x` grows to the right and `y` grows upwards. Anything outside of `[0, width) x [0, height)` is
/// permanently dead: the grid does not wrap around.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Current generation, row major. This is the only buffer ever read through [`Grid::get`].
    cells: Vec<bool>,

    /// Scratch buffer the next generation is written to. All dead outside of [`Grid::advance`].
    next: Vec<bool>,

    width: usize,
    height: usize,

    /// Number of generations computed since creation or the last [`Grid::clear`]
    generation: u64,
}

impl Grid {
    /// Create an all dead grid of `width` by `height` cells
    pub fn new(width: usize, height: usize) -> Self {
        let n = width * height;

        Self {
            cells: vec![false; n],
            next: vec![false; n],
            width,
            height,
            generation: 0,
        }
    }

    /// Create a grid with the given cells alive
    pub fn with_cells<I>(width: usize, height: usize, alive: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::new(width, height);

        for (x, y) in alive {
            grid.set(x, y, true);
        }

        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `(x, y)` lies on the grid
    pub fn contains(&self, x: CellOffset, y: CellOffset) -> bool {
        self.index(x, y).is_some()
    }

    /// State of the cell at `(x, y)`. Out of bounds cells are dead.
    pub fn get(&self, x: CellOffset, y: CellOffset) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    /// Set the cell at `(x, y)`.
    ///
    /// # Panics
    /// If `(x, y)` is outside of the grid. Callers are expected to validate coordinates first.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        assert!(x < self.width, "x is out of bounds");
        assert!(y < self.height, "y is out of bounds");

        self.cells[y * self.width + x] = alive;
    }

    /// Flip the cell at `(x, y)`, returning its new state.
    ///
    /// # Panics
    /// Same as [`Grid::set`].
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let alive = !self.get(x as CellOffset, y as CellOffset);
        self.set(x, y, alive);

        alive
    }

    /// Kill every cell, in both buffers
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.next.fill(false);
        self.generation = 0;
    }

    /// Number of live cells among the 8 surrounding `(x, y)`
    pub fn neighbours(&self, x: CellOffset, y: CellOffset) -> u8 {
        NEIGHBOURHOOD
            .iter()
            .filter(|&&(dx, dy)| self.get(x + dx, y + dy))
            .count() as u8
    }

    /// Compute the next generation under `rule`.
    ///
    /// The whole generation is written to the scratch buffer before it is swapped in, so the
    /// current buffer is never observed half updated.
    pub fn advance<R: StepRule + ?Sized>(&mut self, rule: &R) {
        for y in 0..self.height {
            for x in 0..self.width {
                let (cx, cy) = (x as CellOffset, y as CellOffset);
                let alive = self.cells[y * self.width + x];
                let n = self.neighbours(cx, cy);

                self.next[y * self.width + x] = rule.next_state(alive, n);
            }
        }

        std::mem::swap(&mut self.cells, &mut self.next);
        self.next.fill(false);
        self.generation += 1;
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Coordinates of every live cell, row by row from `y = 0`
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| (i % self.width, i / self.width))
    }

    fn index(&self, x: CellOffset, y: CellOffset) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;

        Some(y * self.width + x)
    }
}

/// Draws the grid with the highest row first, `#` for live cells and `.` for dead ones.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let c = if self.cells[y * self.width + x] { '#' } else { '.' };
                write!(f, "{c}")?;
            }

            if y > 0 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::Grid;
    use crate::rule_set::B3S23;

    #[test]
    fn out_of_bounds_is_dead() {
        let grid = Grid::with_cells(2, 2, [(0, 0), (1, 0), (0, 1), (1, 1)]);

        assert!(grid.get(0, 0));
        assert!(!grid.get(-1, 0));
        assert!(!grid.get(0, -1));
        assert!(!grid.get(2, 0));
        assert!(!grid.get(0, 2));
    }

    #[test]
    fn corner_sees_three_neighbours() {
        let grid = Grid::with_cells(2, 2, [(0, 0), (1, 0), (0, 1), (1, 1)]);

        assert_eq!(grid.neighbours(0, 0), 3);
        assert_eq!(grid.neighbours(-1, -1), 1);
    }

    #[test]
    #[should_panic(expected = "x is out of bounds")]
    fn set_out_of_bounds_panics() {
        let mut grid = Grid::new(3, 3);
        grid.set(3, 0, true);
    }

    #[test]
    fn block_is_still() {
        let mut grid = Grid::with_cells(4, 4, [(1, 1), (2, 1), (1, 2), (2, 2)]);
        let before = grid.clone();

        grid.advance(&B3S23);

        assert_eq!(grid.to_string(), before.to_string());
        assert_eq!(grid.generation(), 1);
    }

    #[test]
    fn lonely_cell_dies() {
        let mut grid = Grid::with_cells(3, 3, [(1, 1)]);

        grid.advance(&B3S23);

        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn clear_resets_generation() {
        let mut grid = Grid::with_cells(3, 3, [(0, 1), (1, 1), (2, 1)]);
        grid.advance(&B3S23);

        grid.clear();

        assert_eq!(grid.population(), 0);
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn display_puts_high_rows_first() {
        let grid = Grid::with_cells(3, 2, [(0, 1), (2, 0)]);

        assert_eq!(grid.to_string(), "#..\n..#");
    }

    #[test]
    fn alive_cells_in_row_order() {
        let grid = Grid::with_cells(3, 3, [(2, 2), (1, 0)]);

        assert_eq!(grid.alive_cells().collect::<Vec<_>>(), vec![(1, 0), (2, 2)]);
    }
}
