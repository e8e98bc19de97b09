//! Error types for the grid simulator.

use std::fmt;

use crate::sim::WallPattern;

/// Errors that halt a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// Rule lookup failed for a `(state, pattern)` key.
    ///
    /// Unreachable for programs built by `Program::random` or `crossover`;
    /// hitting it means the program was constructed by hand and left
    /// incomplete.
    MissingRule {
        /// Automaton state of the failed lookup.
        state: u8,
        /// Local wall pattern of the failed lookup.
        pattern: WallPattern,
    },
    /// The agent's surroundings match none of the canonical wall patterns.
    ///
    /// Only arenas narrower than 4 cells can produce this, and `World::new`
    /// rejects those.
    ConflictingWalls {
        /// Agent row when classification failed.
        row: u16,
        /// Agent column when classification failed.
        col: u16,
    },
    /// Arena dimensions too small to host a walled interior.
    InvalidArena {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },
    /// Start position is on the border wall or outside the arena.
    BadStart {
        /// Requested start row.
        row: u16,
        /// Requested start column.
        col: u16,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::MissingRule { state, pattern } => {
                write!(f, "no rule for state {state} with surroundings {pattern}")
            }
            SimError::ConflictingWalls { row, col } => {
                write!(f, "surroundings at ({row}, {col}) match no canonical pattern")
            }
            SimError::InvalidArena { width, height } => {
                write!(f, "arena {width}x{height} is too small (minimum 4x4)")
            }
            SimError::BadStart { row, col } => {
                write!(f, "start position ({row}, {col}) is not an interior cell")
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Result type for simulation steps.
pub type SimResult<T> = Result<T, SimError>;
