//! Command-line front end for lifesim.
//!
//! # Usage
//!
//! ```bash
//! # Reference configuration: N = 100, t = 3, 4, 5
//! cargo run -- 100 3 4 5
//!
//! # Reproducible run with error bounds and debug logs
//! cargo run -- 100 3 4 5 --seed 42 --verbose
//! ```

use clap::Parser;
use tracing::Level;

use lifesim::quadrature::default_tolerance;
use lifesim::simulation::{run, SimulationConfig, REFERENCE_THRESHOLD};
use lifesim::Float;

/// Simulate exponential component lifetimes and report survival probabilities
#[derive(Parser, Debug)]
#[command(name = "lifesim")]
#[command(version)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Number of random variables to generate
    #[arg(value_name = "N")]
    sample_count: i64,

    /// First time constant
    #[arg(value_name = "T1")]
    t1: i64,

    /// Second time constant
    #[arg(value_name = "T2")]
    t2: i64,

    /// Third time constant
    #[arg(value_name = "T3")]
    t3: i64,

    /// Time beyond which survival is evaluated
    #[arg(long, default_value_t = REFERENCE_THRESHOLD)]
    threshold: Float,

    /// Quadrature tolerance
    #[arg(long, default_value_t = default_tolerance())]
    tolerance: Float,

    /// Seed for the uniform source (OS entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Print error bounds and debug logs
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let config = SimulationConfig {
        time_constants: vec![args.t1, args.t2, args.t3],
        sample_count: args.sample_count,
        threshold: args.threshold,
        tolerance: args.tolerance,
        seed: args.seed,
    };

    let report = match run(&config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    for estimate in &report.survival {
        if args.verbose {
            println!("{estimate} (error <= {:e})", estimate.result.error_estimate);
        } else {
            println!("{estimate}");
        }
    }
}
