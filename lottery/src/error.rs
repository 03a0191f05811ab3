//! Errors.

use thiserror::Error;

/// Everything that can stop a simulation from running.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The game or run configuration is unusable. Raised before any worker starts.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A worker thread panicked, so its counters are lost.
    #[error("Worker {index} panicked")]
    WorkerPanicked {
        /// Index of the worker in `0..workers`.
        index: usize,
    },
}

/// A configuration precondition that does not hold.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("at least one main ball must be drawn")]
    NoMainBalls,

    #[error("cannot draw {ball_count} main balls from a pool of {max_main}")]
    BallCountExceedsPool { ball_count: usize, max_main: u32 },

    #[error("{name} must be at least 1")]
    EmptyRange { name: &'static str },

    #[error("{name} {value} is larger than the generator supports ({max})")]
    RangeTooLarge {
        name: &'static str,
        value: u32,
        max: u32,
    },

    #[error("{name} {value} is outside 1..={max}")]
    NumberOutOfRange {
        name: &'static str,
        value: u32,
        max: u32,
    },

    #[error("winning main number {0} appears more than once")]
    DuplicateWinningNumber(u32),

    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("run duration must be a positive number of minutes, got {0}")]
    InvalidDuration(f64),

    #[error("cannot parse {name} from {value:?}")]
    Unparsable { name: &'static str, value: String },

    #[error("unknown mode {0:?}, expected \"bounded\" or \"search\"")]
    UnknownMode(String),
}
