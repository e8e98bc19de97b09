// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Gridbot: genetic evolution of finite-state grid explorers.
//!
//! A bot is a finite-state control program: for every pair of automaton state
//! and local wall pattern it prescribes a move and a successor state. Bots
//! are dropped into a walled arena and scored by how much of the interior
//! they visit in a fixed number of steps; a genetic algorithm breeds
//! better-covering programs generation over generation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │       Generational Search           │
//! ├─────────────────────────────────────┤
//! │   Fitness (randomized trial runs)   │
//! ├─────────────────────────────────────┤
//! │   Simulator (arena + agent steps)   │
//! ├─────────────────────────────────────┤
//! │   Program (state × pattern table)   │
//! └─────────────────────────────────────┘
//! ```

pub mod error;
pub mod gp;
pub mod sim;

pub use error::{SimError, SimResult};

// Re-export key simulation types at crate root for convenience
pub use sim::{Cell, Direction, NUM_STATES, Program, Rule, WallPattern, World};
