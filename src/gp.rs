//! Genetic search over rule-set programs.
//!
//! This module provides the evolutionary framework that discovers programs
//! with high arena coverage: fitness evaluation over randomized trials,
//! fitness-ranked selection with elite preservation, state-split crossover,
//! single-entry mutation, and the generational loop tying them together.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │         Evolution Loop              │
//! ├─────────────────────────────────────┤
//! │  Selection │ Crossover │ Mutation   │
//! ├─────────────────────────────────────┤
//! │  Fitness: trial runs in the World   │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use gridbot::gp::{EvolutionConfig, evolve};
//!
//! let config = EvolutionConfig::default();
//! let (best, stats) = evolve(&config, |_| {})?;
//! println!("coverage {:.3}", stats.best_fitness);
//! print!("{best}");
//! # Ok::<(), gridbot::gp::EvolutionError>(())
//! ```

mod crossover;
mod evolution;
mod fitness;
mod mutation;
mod persistence;
mod selection;

pub use crossover::crossover;
pub use evolution::{
    EvolutionConfig, EvolutionError, EvolutionStats, GenerationStats, evolve, run_search,
};
pub use fitness::{FitnessConfig, evaluate_fitness, evaluate_population};
pub use mutation::mutate;
pub use persistence::{load_program, save_program};
pub use selection::{
    ParentPool, SelectionConfig, SelectionStats, elite_count, rank_by_fitness,
};
