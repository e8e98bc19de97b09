//! Fitness evaluation for rule-set programs.
//!
//! Fitness is the mean fraction of interior cells an agent visits across
//! several independent trials, each from a uniformly chosen interior start
//! cell. Population-wide evaluation fans out over rayon with one
//! independently seeded rng per individual, so trial outcomes are
//! reproducible regardless of scheduling.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::sim::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_ARENA, Program, World};

/// Configuration for fitness evaluation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FitnessConfig {
    /// Number of independent trials per evaluation.
    pub trials: usize,
    /// Steps per trial.
    pub steps: usize,
    /// Arena width.
    pub width: u16,
    /// Arena height.
    pub height: u16,
    /// Base seed for per-individual trial rngs.
    pub base_seed: u64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            trials: 20,
            steps: 800,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            base_seed: 12345,
        }
    }
}

/// Evaluate one program: mean coverage over independent randomized trials.
///
/// Each trial starts the agent at a uniformly chosen interior cell in
/// automaton state 0 and runs for the configured number of steps. Zero trials
/// score 0.
///
/// # Errors
///
/// Propagates the first [`crate::error::SimError`] from a trial run, which
/// only an incomplete program or a degenerate arena can produce.
#[allow(clippy::cast_precision_loss)]
pub fn evaluate_fitness<R: Rng>(
    program: &Program,
    config: &FitnessConfig,
    rng: &mut R,
) -> SimResult<f64> {
    if config.width < MIN_ARENA || config.height < MIN_ARENA {
        return Err(SimError::InvalidArena {
            width: config.width,
            height: config.height,
        });
    }
    if config.trials == 0 {
        return Ok(0.0);
    }

    let mut total = 0.0;
    for _ in 0..config.trials {
        let row = rng.gen_range(1..config.height - 1);
        let col = rng.gen_range(1..config.width - 1);
        let mut world = World::new(program, config.width, config.height, row, col)?;
        world.run(config.steps)?;
        total += world.fraction_visited();
    }
    Ok(total / config.trials as f64)
}

/// Evaluate a whole population in parallel.
///
/// Returns scores in population order. Each individual gets its own
/// [`SmallRng`] seeded from the base seed, the generation index, and the
/// individual index. Individuals whose evaluation fails score 0.
#[must_use]
pub fn evaluate_population(
    population: &[Program],
    config: &FitnessConfig,
    generation: usize,
) -> Vec<f64> {
    population
        .par_iter()
        .enumerate()
        .map(|(idx, program)| {
            let mut rng = SmallRng::seed_from_u64(trial_seed(config.base_seed, generation, idx));
            match evaluate_fitness(program, config, &mut rng) {
                Ok(fitness) => fitness,
                Err(_) => 0.0, // Failed individuals score zero
            }
        })
        .collect()
}

/// Deterministic per-individual seed.
fn trial_seed(base_seed: u64, generation: usize, idx: usize) -> u64 {
    base_seed
        .wrapping_add(generation as u64 * 1_000_003)
        .wrapping_add(idx as u64 * 1000)
}
