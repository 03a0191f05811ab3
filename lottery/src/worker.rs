use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use crate::config::{GameConfig, Mode};
use crate::draw::{generate, Draw};
use crate::error::Error;
use crate::rng::Lcg48;

/// Shared cancellation flag. Cancelling is idempotent and never undone.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A search-mode trial that ended in a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trial {
    /// Seed the trial's generator was started from.
    pub seed: u64,
    /// Draws taken, the winning one included.
    pub attempts: u64,
}

/// Sent on the completion channel when a worker thread exits, by returning
/// or by unwinding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finished {
    pub index: usize,
    pub panicked: bool,
}

struct NotifyOnExit {
    index: usize,
    done: mpsc::Sender<Finished>,
}

impl Drop for NotifyOnExit {
    fn drop(&mut self) {
        // The coordinator may have stopped listening after its deadline.
        let _ = self.done.send(Finished {
            index: self.index,
            panicked: thread::panicking(),
        });
    }
}

/// Counters owned by one worker, handed over once it has stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerResult {
    pub attempts_completed: u64,
    /// Winning seeds in discovery order. Bounded mode only.
    pub winning_seeds: Vec<u64>,
    /// Completed trials in order. Search mode only.
    pub trials: Vec<Trial>,
}

/// Processes the seeds `index, index + workers, index + 2 * workers, ...`.
///
/// Workers with distinct indices under the same worker count never touch the
/// same seed, so they run without sharing anything mutable.
#[derive(Debug, Clone)]
pub struct Worker {
    index: usize,
    workers: usize,
    game: Arc<GameConfig>,
    mode: Mode,
}

impl Worker {
    pub fn new(index: usize, workers: usize, game: Arc<GameConfig>, mode: Mode) -> Self {
        assert!(
            index < workers,
            "worker index {index} out of range for {workers} workers"
        );
        Self {
            index,
            workers,
            game,
            mode,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Seed for the worker's `attempt`-th draw, or `None` once the partition
    /// runs past the 64-bit seed space.
    pub fn seed_for(&self, attempt: u64) -> Option<u64> {
        attempt
            .checked_mul(self.workers as u64)?
            .checked_add(self.index as u64)
    }

    /// Run until the mode's bound, the end of the seed space, or `stop`.
    ///
    /// `stop` is checked before every draw. A draw is counted only once it has
    /// been generated and checked.
    pub fn run(&self, stop: &StopSignal) -> WorkerResult {
        debug!(worker = self.index, mode = ?self.mode, "worker started");
        let result = match self.mode {
            Mode::Bounded { max_attempts } => self.run_bounded(max_attempts, stop),
            Mode::Search { trials } => self.run_search(trials, stop),
        };
        debug!(
            worker = self.index,
            attempts = result.attempts_completed,
            "worker stopped"
        );
        result
    }

    fn run_bounded(&self, max_attempts: u64, stop: &StopSignal) -> WorkerResult {
        let mut result = WorkerResult::default();

        for attempt in 0..max_attempts {
            if stop.is_cancelled() {
                break;
            }
            let Some(seed) = self.seed_for(attempt) else {
                break;
            };

            let draw = generate(seed, &self.game);
            if self.game.is_win(&draw) {
                self.report_win(seed, &draw);
                result.winning_seeds.push(seed);
            }
            result.attempts_completed += 1;
        }

        result
    }

    fn run_search(&self, trials: u64, stop: &StopSignal) -> WorkerResult {
        let mut result = WorkerResult::default();

        'trials: for trial in 0..trials {
            let Some(seed) = self.seed_for(trial) else {
                break;
            };
            let mut rng = Lcg48::new(seed);
            let mut attempts = 0;

            loop {
                if stop.is_cancelled() {
                    break 'trials;
                }
                let draw = Draw::from_rng(&mut rng, &self.game);
                attempts += 1;
                result.attempts_completed += 1;

                if self.game.is_win(&draw) {
                    info!(worker = self.index, seed, attempts, %draw, "trial won");
                    result.trials.push(Trial { seed, attempts });
                    break;
                }
            }
        }

        result
    }

    fn report_win(&self, seed: u64, draw: &Draw) {
        info!(worker = self.index, seed, %draw, "winning seed");
    }

    /// Run on a new thread with its own stop signal.
    pub fn start(self) -> WorkerHandle {
        self.spawn(StopSignal::new(), None)
    }

    /// Run on a new thread, sharing `stop` and reporting on `done` when the
    /// thread exits, panics included.
    pub fn start_with(self, stop: StopSignal, done: mpsc::Sender<Finished>) -> WorkerHandle {
        self.spawn(stop, Some(done))
    }

    fn spawn(self, stop: StopSignal, done: Option<mpsc::Sender<Finished>>) -> WorkerHandle {
        let index = self.index;
        let signal = stop.clone();

        let thread = thread::spawn(move || {
            let _notify = done.map(|done| NotifyOnExit { index, done });
            self.run(&signal)
        });

        WorkerHandle {
            index,
            stop,
            thread,
        }
    }
}

/// A worker running on its own thread.
#[derive(Debug)]
pub struct WorkerHandle {
    index: usize,
    stop: StopSignal,
    thread: JoinHandle<WorkerResult>,
}

impl WorkerHandle {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn cancel(&self) {
        self.stop.cancel();
    }

    /// Wait for the worker to stop and take its result.
    pub fn join(self) -> Result<WorkerResult, Error> {
        self.thread
            .join()
            .map_err(|_| Error::WorkerPanicked { index: self.index })
    }
}
