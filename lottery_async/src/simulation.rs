use std::sync::Arc;

use lottery_sim::{AggregateResult, Error, GameConfig, RunConfig, StopSignal, Worker};
use tokio::task;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

/// Run `config.workers` workers on the blocking pool until the duration
/// elapses or all of them finish, then merge their results.
pub async fn run(config: &RunConfig, game: Arc<GameConfig>) -> Result<AggregateResult, Error> {
    let deadline = Instant::now() + config.duration;
    let stop = StopSignal::new();

    info!(
        workers = config.workers,
        duration = ?config.duration,
        mode = ?config.mode,
        "starting simulation"
    );

    let mut handles = vec![];

    for index in 0..config.workers {
        let worker = Worker::new(index, config.workers, Arc::clone(&game), config.mode);
        let stop = stop.clone();

        let handle = task::spawn_blocking(move || worker.run(&stop));

        handles.push(handle);
    }

    let timer = {
        let stop = stop.clone();
        task::spawn(async move {
            sleep_until(deadline).await;
            debug!("deadline reached, cancelling workers");
            stop.cancel();
        })
    };

    let mut results = Vec::with_capacity(handles.len());
    let mut panicked = None;
    for (index, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok(result) => results.push(result),
            Err(_) => {
                // Stop the rest now rather than at the deadline.
                stop.cancel();
                panicked.get_or_insert(index);
            }
        }
    }
    timer.abort();

    if let Some(index) = panicked {
        return Err(Error::WorkerPanicked { index });
    }

    let aggregate = AggregateResult::merge(results);
    info!(
        attempts = aggregate.total_attempts,
        wins = aggregate.winning_seeds.len(),
        "simulation finished"
    );
    Ok(aggregate)
}
