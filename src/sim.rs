//! Grid-agent simulation: rule-set programs, the arena, and the stepping
//! agent.
//!
//! A [`Program`] maps every `(automaton state, local wall pattern)` pair to a
//! move direction and a successor state. A [`World`] executes one program
//! deterministically, marking cells as the agent steps off them; the fraction
//! of interior cells visited is the raw material for fitness scoring.

mod pattern;
mod program;
mod world;

pub use pattern::{Direction, WallPattern};
pub use program::{NUM_STATES, Program, Rule};
pub use world::{Cell, DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_ARENA, World};
