//! Evolve command implementation.

#![allow(clippy::needless_pass_by_value, clippy::too_many_arguments)]

use super::CliError;
use gridbot::gp::{
    EvolutionConfig, FitnessConfig, ParentPool, SelectionConfig, evolve, save_program,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Execute the evolve command.
///
/// # Errors
///
/// Returns an error if the search configuration is degenerate or the best
/// program cannot be saved.
pub(crate) fn execute(
    population: usize,
    generations: usize,
    trials: usize,
    steps: usize,
    width: u16,
    height: u16,
    seed: Option<u64>,
    mutation_rate: f64,
    elite_fraction: f64,
    growing_pool: bool,
    output: Option<PathBuf>,
    progress: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(42)
    });

    let config = EvolutionConfig {
        population_size: population,
        generations,
        seed,
        mutation_rate,
        fitness: FitnessConfig {
            trials,
            steps,
            width,
            height,
            base_seed: seed.wrapping_add(1),
        },
        selection: SelectionConfig {
            elite_fraction,
            parent_pool: if growing_pool {
                ParentPool::Growing
            } else {
                ParentPool::EliteOnly
            },
        },
        verbose: !quiet && !progress,
    };

    if !quiet {
        println!("Starting search:");
        println!("  Population: {population}");
        println!("  Generations: {generations}");
        println!("  Trials per eval: {trials}, steps per trial: {steps}");
        println!("  Arena: {width}x{height}");
        println!("  Seed: {seed}");
        println!();
    }

    let pb = if progress {
        let pb = ProgressBar::new(generations as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} generations {msg}")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let (best, stats) = evolve(&config, |gen_stats| {
        if let Some(pb) = &pb {
            pb.set_position(gen_stats.generation as u64 + 1);
            pb.set_message(format!(
                "best={:.3} mean={:.3}",
                gen_stats.best_fitness, gen_stats.mean_fitness
            ));
        }
    })?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if let Some(path) = &output {
        save_program(&best, path)?;
    }

    if quiet {
        print!("{best}");
    } else {
        println!("Search complete!");
        println!("  Best coverage: {:.4}", stats.best_fitness);
        println!("  Elapsed time: {:.1}s", stats.elapsed_seconds);
        if let Some(path) = &output {
            println!("  Saved best program to: {}", path.display());
        }
        println!();
        println!("Best program:");
        print!("{best}");
    }

    Ok(())
}
