//! A fixed-width **worker pool** for probe jobs.
//!
//! `width` workers pull targets from one shared queue and push each job's
//! output into an unbounded channel that the caller drains. Every job is raced
//! against the cancellation token: once it fires, no worker pulls another
//! target and in-flight jobs are dropped where they stand.

use std::future::Future;
use std::sync::{Arc, Mutex};

use netsweep_common::error::ScanError;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::warn;

type Queue<T> = Arc<Mutex<std::vec::IntoIter<T>>>;

/// Runs `job` once per target with at most `width` jobs in flight.
///
/// Outputs are returned in completion order. If `cancel` fires before every
/// job has finished, all outputs are discarded and [`ScanError::Cancelled`]
/// is returned. A job that panics fails the whole run with
/// [`ScanError::WorkerFailed`].
pub async fn run<T, R, F, Fut>(
    targets: Vec<T>,
    width: usize,
    cancel: &CancellationToken,
    job: F,
) -> Result<Vec<R>, ScanError>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    if cancel.is_cancelled() {
        return Err(ScanError::Cancelled);
    }

    let total: usize = targets.len();
    let worker_count: usize = width.clamp(1, total.max(1));
    let queue: Queue<T> = Arc::new(Mutex::new(targets.into_iter()));
    let job = Arc::new(job);
    let (tx, mut rx) = mpsc::unbounded_channel::<R>();

    let mut workers: JoinSet<()> = JoinSet::new();
    for _ in 0..worker_count {
        let queue = Arc::clone(&queue);
        let job = Arc::clone(&job);
        let tx = tx.clone();
        let cancel = cancel.clone();

        workers.spawn(async move {
            while !cancel.is_cancelled() {
                let Some(target) = next_target(&queue) else {
                    break;
                };

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    output = (*job)(target) => {
                        if tx.send(output).is_err() {
                            break;
                        }
                    }
                }
            }
        });
    }
    drop(tx);

    let mut outputs: Vec<R> = Vec::with_capacity(total);
    while let Some(output) = rx.recv().await {
        outputs.push(output);
    }

    let mut failure: Option<String> = None;
    while let Some(joined) = workers.join_next().await {
        if let Err(e) = joined {
            warn!("Probe worker stopped abnormally: {e}");
            failure.get_or_insert_with(|| e.to_string());
        }
    }

    if cancel.is_cancelled() {
        return Err(ScanError::Cancelled);
    }
    if let Some(reason) = failure {
        return Err(ScanError::WorkerFailed(reason));
    }
    if outputs.len() != total {
        return Err(ScanError::Cancelled);
    }

    Ok(outputs)
}

fn next_target<T>(queue: &Queue<T>) -> Option<T> {
    queue.lock().ok()?.next()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
