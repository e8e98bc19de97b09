//! Generational search loop.
//!
//! Each generation evaluates the whole population, preserves the top slice
//! verbatim, and refills the remaining slots with mutated crossover children
//! of the configured parent pool.

// Evolution prints progress to stderr
#![allow(clippy::print_stderr)]

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::gp::crossover::crossover;
use crate::gp::fitness::{FitnessConfig, evaluate_population};
use crate::gp::mutation::mutate;
use crate::gp::selection::{ParentPool, SelectionConfig, SelectionStats, elite_count, rank_by_fitness};
use crate::sim::Program;

/// Configuration for the generational search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Population size.
    pub population_size: usize,
    /// Number of generations to run.
    pub generations: usize,
    /// RNG seed for population initialization and breeding.
    pub seed: u64,
    /// Probability that a freshly bred child is mutated.
    ///
    /// Values outside `[0, 1]` are clamped.
    pub mutation_rate: f64,
    /// Fitness evaluation configuration.
    pub fitness: FitnessConfig,
    /// Selection configuration.
    pub selection: SelectionConfig,
    /// Whether to print per-generation progress to stderr.
    pub verbose: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 50,
            seed: 42,
            mutation_rate: 0.15,
            fitness: FitnessConfig::default(),
            selection: SelectionConfig::default(),
            verbose: true,
        }
    }
}

/// Statistics for a single generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerationStats {
    /// Generation number.
    pub generation: usize,
    /// Best fitness in this generation.
    pub best_fitness: f64,
    /// Mean fitness.
    pub mean_fitness: f64,
    /// Fitness standard deviation.
    pub fitness_std: f64,
}

/// Overall statistics from a search run.
#[derive(Debug, Clone)]
pub struct EvolutionStats {
    /// Statistics per generation.
    pub generations: Vec<GenerationStats>,
    /// Best fitness in the final generation.
    pub best_fitness: f64,
    /// Total time in seconds.
    pub elapsed_seconds: f64,
}

/// Error during evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionError {
    /// The configured population size is zero.
    EmptyPopulation,
    /// A simulation failed while evaluating fitness.
    Sim(SimError),
}

impl fmt::Display for EvolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPopulation => write!(f, "population size must be at least 1"),
            Self::Sim(e) => write!(f, "simulation error: {e}"),
        }
    }
}

impl std::error::Error for EvolutionError {}

impl From<SimError> for EvolutionError {
    fn from(e: SimError) -> Self {
        Self::Sim(e)
    }
}

/// Run the generational search.
///
/// Returns the best program of the final generation's evaluation pass
/// together with per-generation statistics. Deterministic for a fixed
/// configuration. `on_generation` is invoked once per generation with that
/// generation's statistics, after evaluation and before breeding.
///
/// # Errors
///
/// Returns [`EvolutionError::EmptyPopulation`] if the configured population
/// size is zero, or a wrapped [`SimError`] for a degenerate arena
/// configuration.
pub fn evolve(
    config: &EvolutionConfig,
    mut on_generation: impl FnMut(&GenerationStats),
) -> Result<(Program, EvolutionStats), EvolutionError> {
    if config.population_size == 0 {
        return Err(EvolutionError::EmptyPopulation);
    }

    let start_time = std::time::Instant::now();
    let mutation_rate = config.mutation_rate.clamp(0.0, 1.0);
    let mut rng = SmallRng::seed_from_u64(config.seed);

    let mut population: Vec<Program> = (0..config.population_size)
        .map(|_| Program::random(&mut rng))
        .collect();

    let mut best = population[0];
    let mut best_fitness = 0.0;
    let mut gen_stats = Vec::with_capacity(config.generations);

    for generation in 0..config.generations {
        let fitness = evaluate_population(&population, &config.fitness, generation);

        let stats = SelectionStats::from_fitness(&fitness);
        let gen_stat = GenerationStats {
            generation,
            best_fitness: stats.best_fitness,
            mean_fitness: stats.mean_fitness,
            fitness_std: stats.fitness_std,
        };
        gen_stats.push(gen_stat);

        let ranking = rank_by_fitness(&fitness);
        best = population[ranking[0]];
        best_fitness = fitness[ranking[0]];

        if config.verbose {
            eprintln!(
                "Gen {:>4}: best={:.4} mean={:.4} std={:.4}",
                generation, stats.best_fitness, stats.mean_fitness, stats.fitness_std
            );
        }
        on_generation(&gen_stat);

        // The final generation is evaluation-only; its best is the result
        if generation + 1 == config.generations {
            break;
        }

        let elites = elite_count(config.population_size, config.selection.elite_fraction);
        let mut next_population: Vec<Program> = ranking
            .iter()
            .take(elites)
            .map(|&idx| population[idx])
            .collect();

        while next_population.len() < config.population_size {
            let pool = match config.selection.parent_pool {
                ParentPool::EliteOnly => elites.min(next_population.len()),
                ParentPool::Growing => next_population.len(),
            };
            let p1 = rng.gen_range(0..pool);
            let p2 = rng.gen_range(0..pool);

            let mut child = crossover(&next_population[p1], &next_population[p2]);
            if rng.gen_bool(mutation_rate) && child != best {
                mutate(&mut child, &mut rng);
            }
            next_population.push(child);
        }

        population = next_population;
    }

    let stats = EvolutionStats {
        generations: gen_stats,
        best_fitness,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    };
    Ok((best, stats))
}

/// Run the full search with default parameters.
///
/// Convenience entry point over [`evolve`]: seeds from the default
/// configuration, reports per-generation progress to stderr, and returns the
/// final best program.
///
/// # Errors
///
/// Returns [`EvolutionError::EmptyPopulation`] if `popsize` is zero.
pub fn run_search(popsize: usize, numgens: usize) -> Result<Program, EvolutionError> {
    let config = EvolutionConfig {
        population_size: popsize,
        generations: numgens,
        ..EvolutionConfig::default()
    };
    evolve(&config, |_| {}).map(|(best, _)| best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_config() -> EvolutionConfig {
        EvolutionConfig {
            population_size: 10,
            generations: 3,
            seed: 7,
            verbose: false,
            fitness: FitnessConfig {
                trials: 2,
                steps: 50,
                ..FitnessConfig::default()
            },
            ..EvolutionConfig::default()
        }
    }

    #[test]
    fn test_empty_population_rejected() {
        let config = EvolutionConfig {
            population_size: 0,
            ..tiny_config()
        };
        assert_eq!(
            evolve(&config, |_| {}).unwrap_err(),
            EvolutionError::EmptyPopulation
        );
    }

    #[test]
    fn test_search_returns_complete_program() {
        let (best, stats) = evolve(&tiny_config(), |_| {}).expect("evolve");
        assert!(best.is_complete());
        assert_eq!(stats.generations.len(), 3);
        assert!(stats.best_fitness >= 0.0);
    }

    #[test]
    fn test_search_is_deterministic() {
        let config = tiny_config();
        let (a, _) = evolve(&config, |_| {}).expect("evolve");
        let (b, _) = evolve(&config, |_| {}).expect("evolve");
        assert_eq!(a, b);
    }

    #[test]
    fn test_generation_callback_fires_once_per_generation() {
        let mut seen = Vec::new();
        let config = tiny_config();
        evolve(&config, |stats| seen.push(stats.generation)).expect("evolve");
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn test_growing_pool_also_converges() {
        let config = EvolutionConfig {
            selection: SelectionConfig {
                parent_pool: ParentPool::Growing,
                ..SelectionConfig::default()
            },
            ..tiny_config()
        };
        let (best, _) = evolve(&config, |_| {}).expect("evolve");
        assert!(best.is_complete());
    }

    #[test]
    fn test_single_generation_returns_initial_best() {
        let config = EvolutionConfig {
            generations: 1,
            ..tiny_config()
        };
        let (best, stats) = evolve(&config, |_| {}).expect("evolve");
        assert!(best.is_complete());
        assert_eq!(stats.generations.len(), 1);
    }
}
