//! The bounded arena and the agent stepping through it.

// Coverage fractions trade u32 counts for f64; the precision loss is intentional
#![allow(clippy::cast_precision_loss)]

use std::fmt;

use crate::error::{SimError, SimResult};
use crate::sim::pattern::WallPattern;
use crate::sim::program::Program;

/// Minimum arena edge length.
///
/// Anything narrower lets opposite border walls touch a single interior cell,
/// whose surroundings would fall outside the canonical pattern set.
pub const MIN_ARENA: u16 = 4;

/// Default arena width.
pub const DEFAULT_WIDTH: u16 = 25;

/// Default arena height.
pub const DEFAULT_HEIGHT: u16 = 25;

/// Status of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Border wall.
    Wall,
    /// Interior cell the agent has not stepped off yet.
    Unvisited,
    /// Interior cell the agent has stepped off at least once.
    Visited,
}

/// One simulation run: the arena grid, the agent, and the program driving it.
///
/// The world owns its grid exclusively; the program is borrowed read-only for
/// the duration of the run.
#[derive(Debug)]
pub struct World<'p> {
    program: &'p Program,
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    row: u16,
    col: u16,
    state: u8,
}

impl<'p> World<'p> {
    /// Create a world with a one-cell border wall and the agent at the given
    /// interior start position, automaton state 0.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArena`] for dimensions below
    /// [`MIN_ARENA`] and [`SimError::BadStart`] for a start position on the
    /// border or outside the arena.
    pub fn new(
        program: &'p Program,
        width: u16,
        height: u16,
        start_row: u16,
        start_col: u16,
    ) -> SimResult<Self> {
        if width < MIN_ARENA || height < MIN_ARENA {
            return Err(SimError::InvalidArena { width, height });
        }
        if start_row == 0 || start_row >= height - 1 || start_col == 0 || start_col >= width - 1 {
            return Err(SimError::BadStart {
                row: start_row,
                col: start_col,
            });
        }

        let mut cells = vec![Cell::Unvisited; usize::from(width) * usize::from(height)];
        for col in 0..width {
            cells[Self::index_for(width, 0, col)] = Cell::Wall;
            cells[Self::index_for(width, height - 1, col)] = Cell::Wall;
        }
        for row in 0..height {
            cells[Self::index_for(width, row, 0)] = Cell::Wall;
            cells[Self::index_for(width, row, width - 1)] = Cell::Wall;
        }

        Ok(Self {
            program,
            width,
            height,
            cells,
            row: start_row,
            col: start_col,
            state: 0,
        })
    }

    const fn index_for(width: u16, row: u16, col: u16) -> usize {
        row as usize * width as usize + col as usize
    }

    /// Arena width.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Arena height.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Current agent position as `(row, col)`.
    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.row, self.col)
    }

    /// Current automaton state.
    #[must_use]
    pub const fn state(&self) -> u8 {
        self.state
    }

    /// Status of the cell at `(row, col)`.
    ///
    /// Returns `None` outside the arena.
    #[must_use]
    pub fn cell(&self, row: u16, col: u16) -> Option<Cell> {
        if row < self.height && col < self.width {
            Some(self.cells[Self::index_for(self.width, row, col)])
        } else {
            None
        }
    }

    fn is_wall(&self, row: u16, col: u16) -> bool {
        self.cells[Self::index_for(self.width, row, col)] == Cell::Wall
    }

    /// Classify the agent's current surroundings.
    ///
    /// Returns `None` only for wall combinations outside the canonical set,
    /// which the [`MIN_ARENA`] check makes unreachable.
    #[must_use]
    pub fn current_pattern(&self) -> Option<WallPattern> {
        WallPattern::from_walls(
            self.is_wall(self.row - 1, self.col),
            self.is_wall(self.row, self.col + 1),
            self.is_wall(self.row, self.col - 1),
            self.is_wall(self.row + 1, self.col),
        )
    }

    /// Advance the agent by one step.
    ///
    /// Looks up the rule for the current `(state, pattern)` key, enters the
    /// rule's next state, marks the departed cell visited, and moves one cell
    /// in the rule's direction. The destination is not bounds-checked: rule
    /// direction validity is a program invariant, and a hand-built program
    /// that violates it corrupts the run.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MissingRule`] if the program has no rule for the
    /// current key.
    pub fn step(&mut self) -> SimResult<()> {
        let pattern = self.current_pattern().ok_or(SimError::ConflictingWalls {
            row: self.row,
            col: self.col,
        })?;
        let rule = self.program.rule_for(self.state, pattern)?;

        self.state = rule.next_state;
        self.cells[Self::index_for(self.width, self.row, self.col)] = Cell::Visited;

        let (dr, dc) = rule.direction.offset();
        self.row = u16::try_from(i32::from(self.row) + dr).unwrap_or(0);
        self.col = u16::try_from(i32::from(self.col) + dc).unwrap_or(0);
        Ok(())
    }

    /// Run exactly `steps` steps.
    ///
    /// Deterministic given the program, start position, and start state; no
    /// randomness is consumed.
    ///
    /// # Errors
    ///
    /// Propagates the first [`SimError`] from [`World::step`].
    pub fn run(&mut self, steps: usize) -> SimResult<()> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// Number of interior cells marked visited.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Visited).count()
    }

    /// Number of interior (non-border) cells.
    #[must_use]
    pub const fn interior_count(&self) -> usize {
        (self.width as usize - 2) * (self.height as usize - 2)
    }

    /// Fraction of interior cells visited so far.
    ///
    /// Cells are marked when the agent steps off them, so a run of zero steps
    /// scores 0. Marks are never cleared; the fraction is non-decreasing over
    /// the course of a run.
    #[must_use]
    pub fn fraction_visited(&self) -> f64 {
        self.visited_count() as f64 / self.interior_count() as f64
    }
}

impl fmt::Display for World<'_> {
    /// Renders the arena: `+` border, `o` visited, `P` agent, space unvisited.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let c = if (row, col) == (self.row, self.col) {
                    'P'
                } else {
                    match self.cells[Self::index_for(self.width, row, col)] {
                        Cell::Wall => '+',
                        Cell::Visited => 'o',
                        Cell::Unvisited => ' ',
                    }
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
