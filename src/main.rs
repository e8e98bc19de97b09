//! Gridbot CLI - evolve, run, and watch grid-exploring bots.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Gridbot - genetic evolution of grid-exploring bots
#[derive(Parser, Debug)]
#[command(name = "gridbot")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the generational search and print the best program
    Evolve {
        /// Population size
        #[arg(short, long, default_value = "100")]
        population: usize,

        /// Number of generations
        #[arg(short, long, default_value = "50")]
        generations: usize,

        /// Trials per fitness evaluation
        #[arg(short, long, default_value = "20")]
        trials: usize,

        /// Steps per trial
        #[arg(long, default_value = "800")]
        steps: usize,

        /// Arena width (default: 25)
        #[arg(long, default_value = "25")]
        width: u16,

        /// Arena height (default: 25)
        #[arg(long, default_value = "25")]
        height: u16,

        /// Random seed (default: derived from the clock)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Probability of mutating a freshly bred child
        #[arg(short, long, default_value = "0.15")]
        mutation_rate: f64,

        /// Fraction of the population preserved as elites
        #[arg(short, long, default_value = "0.10")]
        elite_fraction: f64,

        /// Sample parents from the growing next population instead of the
        /// fixed elite pool
        #[arg(long)]
        growing_pool: bool,

        /// Save the best program as JSON
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,

        /// Show a progress bar instead of per-generation stats
        #[arg(long)]
        progress: bool,

        /// Print only the best program
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run a saved program once and print the explored arena
    Run {
        /// Program file (JSON)
        #[arg(required = true)]
        program: std::path::PathBuf,

        /// Number of steps (default: 800)
        #[arg(long, default_value = "800")]
        steps: usize,

        /// Arena width (default: 25)
        #[arg(long, default_value = "25")]
        width: u16,

        /// Arena height (default: 25)
        #[arg(long, default_value = "25")]
        height: u16,

        /// Start row (interior; default: random)
        #[arg(long, requires = "col")]
        row: Option<u16>,

        /// Start column (interior; default: random)
        #[arg(long, requires = "row")]
        col: Option<u16>,

        /// Random seed for the start position
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Interactive TUI to watch a program explore in real-time
    Watch {
        /// Program file (JSON)
        #[arg(required = true)]
        program: std::path::PathBuf,

        /// Number of steps (default: 800)
        #[arg(long, default_value = "800")]
        steps: usize,

        /// Arena width (default: 25)
        #[arg(long, default_value = "25")]
        width: u16,

        /// Arena height (default: 25)
        #[arg(long, default_value = "25")]
        height: u16,

        /// Random seed for the start position
        #[arg(short, long)]
        seed: Option<u64>,

        /// Step delay in milliseconds (default: 50)
        #[arg(long, default_value = "50")]
        speed: u64,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Evolve {
            population,
            generations,
            trials,
            steps,
            width,
            height,
            seed,
            mutation_rate,
            elite_fraction,
            growing_pool,
            output,
            progress,
            quiet,
        } => cli::evolve::execute(
            population,
            generations,
            trials,
            steps,
            width,
            height,
            seed,
            mutation_rate,
            elite_fraction,
            growing_pool,
            output,
            progress,
            quiet,
        ),

        Commands::Run {
            program,
            steps,
            width,
            height,
            row,
            col,
            seed,
            format,
        } => {
            let start = match (row, col) {
                (Some(r), Some(c)) => Some((r, c)),
                _ => None,
            };
            cli::run::execute(program, steps, width, height, start, seed, format)
        }

        Commands::Watch {
            program,
            steps,
            width,
            height,
            seed,
            speed,
        } => cli::watch::execute(program, steps, width, height, seed, speed),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
