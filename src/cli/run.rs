//! Run command implementation.

// Time-derived seeds truncate intentionally
#![allow(clippy::cast_possible_truncation)]

use super::{CliError, OutputFormat};
use gridbot::gp::load_program;
use gridbot::{SimError, World, sim::MIN_ARENA};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::path::PathBuf;

/// Machine-readable result of a single run.
#[derive(Debug, Serialize)]
struct JsonRunResult {
    steps: usize,
    width: u16,
    height: u16,
    start: (u16, u16),
    final_position: (u16, u16),
    final_state: u8,
    visited_cells: usize,
    interior_cells: usize,
    coverage: f64,
}

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the program cannot be loaded or the run fails.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    program_path: PathBuf,
    steps: usize,
    width: u16,
    height: u16,
    start: Option<(u16, u16)>,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<(), CliError> {
    if width < MIN_ARENA || height < MIN_ARENA {
        return Err(SimError::InvalidArena { width, height }.into());
    }

    let program = load_program(&program_path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", program_path.display())))?;

    let seed = seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });

    let (start_row, start_col) = start.unwrap_or_else(|| {
        let mut rng = SmallRng::seed_from_u64(seed);
        (rng.gen_range(1..height - 1), rng.gen_range(1..width - 1))
    });

    let mut world = World::new(&program, width, height, start_row, start_col)?;
    world.run(steps)?;

    match format {
        OutputFormat::Text => {
            print!("{world}");
            println!();
            println!(
                "Visited {} of {} interior cells ({:.1}% coverage) in {} steps.",
                world.visited_count(),
                world.interior_count(),
                world.fraction_visited() * 100.0,
                steps
            );
        }
        OutputFormat::Json => {
            let result = JsonRunResult {
                steps,
                width,
                height,
                start: (start_row, start_col),
                final_position: world.position(),
                final_state: world.state(),
                visited_cells: world.visited_count(),
                interior_cells: world.interior_count(),
                coverage: world.fraction_visited(),
            };
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
