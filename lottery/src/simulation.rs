use std::sync::{mpsc, Arc};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::{GameConfig, RunConfig};
use crate::error::Error;
use crate::worker::{Finished, StopSignal, Trial, Worker, WorkerResult};

/// All workers' results, merged after every worker has stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateResult {
    pub total_attempts: u64,
    /// Worker 0's seeds first, then worker 1's, and so on.
    pub winning_seeds: Vec<u64>,
    pub trials: Vec<Trial>,
}

impl AggregateResult {
    pub fn merge<I>(results: I) -> Self
    where
        I: IntoIterator<Item = WorkerResult>,
    {
        results
            .into_iter()
            .fold(Self::default(), |mut total, result| {
                total.total_attempts += result.attempts_completed;
                total.winning_seeds.extend(result.winning_seeds);
                total.trials.extend(result.trials);
                total
            })
    }

    /// Winning seeds per attempt, or `None` if nothing was attempted.
    pub fn win_rate(&self) -> Option<f64> {
        (self.total_attempts > 0)
            .then(|| self.winning_seeds.len() as f64 / self.total_attempts as f64)
    }

    pub fn win_percentage(&self) -> Option<f64> {
        self.win_rate().map(|rate| rate * 100.0)
    }
}

/// Run `config.workers` workers on their own threads until the duration
/// elapses or all of them finish, then merge their results.
pub fn run(config: &RunConfig, game: Arc<GameConfig>) -> Result<AggregateResult, Error> {
    let deadline = Instant::now() + config.duration;
    let stop = StopSignal::new();
    let (done_tx, done_rx) = mpsc::channel();

    info!(
        workers = config.workers,
        duration = ?config.duration,
        mode = ?config.mode,
        "starting simulation"
    );

    let handles: Vec<_> = (0..config.workers)
        .map(|index| {
            Worker::new(index, config.workers, Arc::clone(&game), config.mode)
                .start_with(stop.clone(), done_tx.clone())
        })
        .collect();
    drop(done_tx);

    wait_for_workers(&done_rx, handles.len(), deadline);
    stop.cancel();

    let mut results = Vec::with_capacity(handles.len());
    let mut panicked = None;
    for handle in handles {
        match handle.join() {
            Ok(result) => results.push(result),
            Err(e) => {
                panicked.get_or_insert(e);
            }
        }
    }
    if let Some(e) = panicked {
        return Err(e);
    }

    let aggregate = AggregateResult::merge(results);
    info!(
        attempts = aggregate.total_attempts,
        wins = aggregate.winning_seeds.len(),
        "simulation finished"
    );
    Ok(aggregate)
}

/// Block until every worker has finished, one has panicked, or `deadline`
/// passes, whichever comes first.
fn wait_for_workers(done: &mpsc::Receiver<Finished>, workers: usize, deadline: Instant) {
    let mut finished = 0;
    while finished < workers {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match done.recv_timeout(remaining) {
            Ok(Finished {
                index,
                panicked: true,
            }) => {
                warn!(worker = index, "worker panicked, stopping the run");
                return;
            }
            Ok(Finished { index, .. }) => {
                finished += 1;
                debug!(worker = index, "worker finished before deadline");
            }
            Err(_) => return,
        }
    }
}
