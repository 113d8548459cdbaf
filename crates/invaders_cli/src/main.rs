//! Console invaders runner.
//!
//! Runs one complete simulated game and prints its events to stdout.
//!
//! # Usage
//!
//! ```bash
//! # Default game: 20x20 grid, 5 levels, random seed, paced output
//! cargo run -p invaders_cli
//!
//! # Reproduce a specific game, unpaced, with a JSON report
//! cargo run -p invaders_cli -- --seed 42 --delay-ms 0 --json
//! ```
//!
//! Game output goes to stdout; logs go to stderr. The process exits 0 on
//! both win and loss - each is a normal termination.

use clap::Parser;
use rand::Rng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invaders_cli::console::ConsoleSink;
use invaders_core::engine::{Engine, EngineConfig};
use invaders_core::entity::Grid;

#[derive(Parser)]
#[command(name = "invaders")]
#[command(about = "Turn-based console invaders simulation")]
#[command(version)]
struct Cli {
    /// RNG seed; drawn from entropy (and logged) when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Side length of the square grid
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i32).range(2..=1000))]
    grid: i32,

    /// Number of levels; level k spawns k invaders
    #[arg(long, default_value_t = 5)]
    levels: u32,

    /// Pause after each shot, in milliseconds (0 disables pacing)
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,

    /// Print the final report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Logs to stderr; stdout belongs to the game output.
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    tracing::info!(
        seed,
        grid = cli.grid,
        levels = cli.levels,
        "starting simulation"
    );

    let engine = Engine::new(EngineConfig {
        grid: Grid::new(cli.grid),
        seed,
        max_level: cli.levels,
        ..Default::default()
    });
    let mut sink = ConsoleSink::with_pace(cli.delay_ms);

    let report = engine.run(&mut sink);

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(error) => {
                eprintln!("Failed to encode report: {error}");
                std::process::exit(1);
            }
        }
    } else {
        println!();
        println!("{}", "=".repeat(40));
        println!("FINAL REPORT");
        println!("{}", "=".repeat(40));
        println!("Outcome: {:?}", report.outcome);
        println!("Score: {} invader(s) destroyed", report.score);
        println!("Level reached: {}", report.level_reached);
        println!("Ticks: {}", report.ticks);
    }
}
