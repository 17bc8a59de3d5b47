use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tracing::{error, trace, warn};

use crate::error::WheelError;
use crate::task::DelayedTask;

pub(crate) enum Job {
    Run(Box<dyn DelayedTask>),
    Shutdown,
}

/// Fixed-size worker set draining one unbounded queue.
///
/// Submission never waits for a free worker: jobs queue until one picks them
/// up. A failure inside a task stays inside that task; the worker logs it and
/// moves on to the next job.
pub(crate) struct DispatchPool {
    size: usize,
    tx: UnboundedSender<Job>,
    // Receiver parked here between construction and `start`.
    idle_rx: Mutex<Option<UnboundedReceiver<Job>>>,
}

impl DispatchPool {
    pub(crate) fn new(size: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            size,
            tx,
            idle_rx: Mutex::new(Some(rx)),
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// Spawn the workers, returning their join handles for shutdown. Empty
    /// if the pool was already started.
    pub(crate) fn start(&self) -> Vec<JoinHandle<()>> {
        let Some(rx) = self.idle_rx.lock().take() else {
            return Vec::new();
        };
        let rx = Arc::new(AsyncMutex::new(rx));
        (0..self.size)
            .map(|worker| {
                let rx = Arc::clone(&rx);
                tokio::spawn(worker_loop(worker, rx))
            })
            .collect()
    }

    /// Queue a task for execution. Fails only once the pool has shut down.
    pub(crate) fn dispatch(&self, task: Box<dyn DelayedTask>) -> Result<(), WheelError> {
        self.tx
            .send(Job::Run(task))
            .map_err(|_| WheelError::NotRunning)
    }

    /// Stop the workers: one sentinel per worker queued behind any remaining
    /// work, then a bounded wait before aborting stragglers.
    pub(crate) async fn shutdown(&self, workers: Vec<JoinHandle<()>>, grace: Duration) {
        for _ in 0..workers.len() {
            if self.tx.send(Job::Shutdown).is_err() {
                break;
            }
        }
        join_within(workers, grace, "dispatch worker").await;
    }
}

/// Await each handle until `grace` elapses overall, aborting whatever is
/// still running past the deadline.
pub(crate) async fn join_within(handles: Vec<JoinHandle<()>>, grace: Duration, what: &str) {
    let deadline = tokio::time::Instant::now() + grace;
    for mut handle in handles {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        match tokio::time::timeout(remaining, &mut handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.is_cancelled() => {}
            Ok(Err(e)) => error!(what, error = %e, "terminated abnormally"),
            Err(_) => {
                warn!(what, grace_ms = grace.as_millis() as u64, "grace period elapsed, aborting");
                handle.abort();
            }
        }
    }
}

async fn worker_loop(worker: usize, rx: Arc<AsyncMutex<UnboundedReceiver<Job>>>) {
    loop {
        let job = rx.lock().await.recv().await;
        match job {
            Some(Job::Run(task)) => run_task(worker, task).await,
            Some(Job::Shutdown) | None => break,
        }
    }
    trace!(worker, "dispatch worker exiting");
}

/// Execute one task. The action runs on the blocking pool so a panic comes
/// back as a join error instead of unwinding through the worker.
async fn run_task(worker: usize, task: Box<dyn DelayedTask>) {
    if let Err(e) = tokio::task::spawn_blocking(move || task.execute()).await {
        error!(worker, error = %e, "error executing task");
    }
}
