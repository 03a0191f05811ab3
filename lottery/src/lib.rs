//! Parallel Monte Carlo simulation of a lottery draw.
//!
//! Every draw is identified by a seed. Worker `i` of `n` owns the seeds
//! `i + k * n`, so workers never overlap and only meet again when their
//! results are merged.

pub mod config;
pub mod draw;
pub mod error;
pub mod rng;
pub mod simulation;
pub mod worker;

pub use config::{GameConfig, Mode, RunConfig};
pub use draw::{generate, Draw};
pub use error::{ConfigError, Error};
pub use rng::Lcg48;
pub use simulation::AggregateResult;
pub use worker::{Finished, StopSignal, Trial, Worker, WorkerHandle, WorkerResult};

/// Install the `fmt` subscriber used by the binaries. `RUST_LOG` overrides
/// the default `info` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Print the end-of-run summary.
pub fn print_summary(result: &AggregateResult) {
    println!("Number of combinations: {}", result.total_attempts);
    match result.win_percentage() {
        Some(percentage) if !result.winning_seeds.is_empty() => {
            println!("Number of winning seeds: {}", result.winning_seeds.len());
            println!("Chance of winning: {:.10}%", percentage);
        }
        _ => println!("No winning seeds"),
    }
    if !result.trials.is_empty() {
        println!("Completed search trials: {}", result.trials.len());
    }
}
