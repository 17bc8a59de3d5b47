use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::bucket::BucketArray;
use super::builder::TimeWheelBuilder;
use super::ticker;
use crate::config::WheelConfig;
use crate::dispatch::{join_within, DispatchPool};
use crate::error::WheelError;
use crate::task::DelayedTask;

/// How long `stop` waits for the tick clock, and then for the workers,
/// before aborting them.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

const STATE_NEW: u8 = 0;
const STATE_RUNNING: u8 = 1;
const STATE_STOPPED: u8 = 2;

/// Hashed-timing-wheel task scheduler.
///
/// Tasks are placed `delay / tick_duration` slots ahead of the current one;
/// a tick clock drains one slot per period and hands the drained tasks to a
/// fixed-size dispatch pool. Scheduling and firing are both O(1) in the
/// number of pending tasks.
///
/// The wheel is constructed stopped, started once, and stopped once; it is
/// shared by reference (`start`, `stop` and `submit` all take `&self`), so
/// wrap it in an `Arc` to hand it to other threads.
///
/// # Example
///
/// ```rust,no_run
/// use rondo_runtime::{ActionTask, TimeWheel, WheelConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let wheel = TimeWheel::new(WheelConfig::default())?;
///     wheel.start()?;
///
///     wheel.submit(ActionTask::new(1_000, || {
///         println!("one second later");
///     }))?;
///
///     tokio::time::sleep(std::time::Duration::from_secs(2)).await;
///     wheel.stop().await;
///     Ok(())
/// }
/// ```
pub struct TimeWheel {
    core: Arc<WheelCore>,
    lifecycle: Mutex<Option<Lifecycle>>,
}

/// State shared between the engine handle, the tick task and the workers.
pub(crate) struct WheelCore {
    pub(crate) tick_duration: Duration,
    tick_millis: u64,
    wheel_size: usize,
    buckets: BucketArray,
    current_slot: AtomicUsize,
    state: AtomicU8,
    pool: DispatchPool,
}

struct Lifecycle {
    shutdown_tx: watch::Sender<bool>,
    tick_handle: JoinHandle<()>,
    worker_handles: Vec<JoinHandle<()>>,
}

impl TimeWheel {
    /// Build a wheel from validated configuration, in the stopped state.
    /// Nothing runs until [`start`](Self::start).
    pub fn new(config: WheelConfig) -> Result<Self, WheelError> {
        config.validate()?;
        let core = WheelCore {
            tick_duration: config.tick_duration(),
            tick_millis: config.tick_duration_ms,
            wheel_size: config.wheel_size,
            buckets: BucketArray::new(config.wheel_size),
            current_slot: AtomicUsize::new(0),
            state: AtomicU8::new(STATE_NEW),
            pool: DispatchPool::new(config.task_pool_size),
        };
        Ok(Self {
            core: Arc::new(core),
            lifecycle: Mutex::new(None),
        })
    }

    pub fn builder() -> TimeWheelBuilder {
        TimeWheelBuilder::new()
    }

    /// Begin ticking. Must be called from within a tokio runtime: the tick
    /// clock and the dispatch workers are spawned onto it.
    ///
    /// Starting a wheel that is already running is a no-op. A wheel that has
    /// been stopped cannot be started again.
    pub fn start(&self) -> Result<(), WheelError> {
        match self.core.state.compare_exchange(
            STATE_NEW,
            STATE_RUNNING,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {}
            Err(STATE_RUNNING) => return Ok(()),
            Err(_) => return Err(WheelError::AlreadyStopped),
        }

        info!(
            tick_ms = self.core.tick_millis,
            wheel_size = self.core.wheel_size,
            pool_size = self.core.pool.size(),
            "starting time wheel"
        );

        let worker_handles = self.core.pool.start();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let tick_handle = tokio::spawn(ticker::run(Arc::clone(&self.core), shutdown_rx));

        *self.lifecycle.lock() = Some(Lifecycle {
            shutdown_tx,
            tick_handle,
            worker_handles,
        });
        Ok(())
    }

    /// Stop ticking and wind down the workers.
    ///
    /// The tick clock goes first so no further work is generated, then the
    /// pool drains what is already queued. Each side gets a bounded grace
    /// period before being aborted. Tasks still waiting in buckets are
    /// discarded. Stopping a wheel that is not running is a no-op.
    pub async fn stop(&self) {
        if self
            .core
            .state
            .compare_exchange(
                STATE_RUNNING,
                STATE_STOPPED,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return;
        }

        info!("stopping time wheel");
        let Some(lifecycle) = self.lifecycle.lock().take() else {
            return;
        };

        let _ = lifecycle.shutdown_tx.send(true);
        join_within(vec![lifecycle.tick_handle], SHUTDOWN_GRACE, "tick clock").await;
        self.core
            .pool
            .shutdown(lifecycle.worker_handles, SHUTDOWN_GRACE)
            .await;
    }

    /// Hand a task to the wheel.
    ///
    /// A negative delay skips the wheel and goes straight to the dispatch
    /// pool. Otherwise the delay is truncated to whole ticks and the task is
    /// placed that many slots ahead of the current one.
    ///
    /// The wheel tracks a single rotation: it does not remember how many
    /// times a long delay should wrap, so a delay of `tick_duration *
    /// wheel_size` or more fires earlier than requested. Such submissions
    /// are accepted and logged at `warn` level.
    pub fn submit<T: DelayedTask + 'static>(&self, task: T) -> Result<(), WheelError> {
        if !self.is_running() {
            return Err(WheelError::NotRunning);
        }
        self.core.submit(Box::new(task))
    }

    /// Whether the wheel is currently ticking.
    pub fn is_running(&self) -> bool {
        self.core.state.load(Ordering::Acquire) == STATE_RUNNING
    }

    /// Period of one tick.
    pub fn tick_duration(&self) -> Duration {
        self.core.tick_duration
    }

    /// Number of slots in the wheel.
    pub fn wheel_size(&self) -> usize {
        self.core.wheel_size
    }

    /// Number of dispatch workers.
    pub fn pool_size(&self) -> usize {
        self.core.pool.size()
    }

    /// Slot the wheel will drain on its next tick. This races the tick task
    /// and may be one step stale; fine for reporting, not for scheduling.
    pub fn current_slot(&self) -> usize {
        self.core.current_slot.load(Ordering::Acquire)
    }

    /// Snapshot of the wheel for health and status reporting.
    pub fn status(&self) -> WheelStatus {
        WheelStatus {
            running: self.is_running(),
            current_slot: self.current_slot(),
            wheel_size: self.core.wheel_size,
            tick_duration_ms: self.core.tick_millis,
        }
    }
}

impl Drop for TimeWheel {
    fn drop(&mut self) {
        // A wheel dropped without `stop` must not leave the tick task and
        // the workers holding the shared core alive.
        if let Some(lifecycle) = self.lifecycle.lock().take() {
            let _ = lifecycle.shutdown_tx.send(true);
            lifecycle.tick_handle.abort();
            for handle in lifecycle.worker_handles {
                handle.abort();
            }
        }
    }
}

impl WheelCore {
    fn submit(&self, task: Box<dyn DelayedTask>) -> Result<(), WheelError> {
        let delay_ms = task.delay_ms();
        if delay_ms < 0 {
            warn!(delay_ms, "task delay is negative, executing immediately");
            return self.pool.dispatch(task);
        }

        let ticks = delay_ms as u64 / self.tick_millis;
        if ticks >= self.wheel_size as u64 {
            warn!(
                delay_ms,
                horizon_ms = self.tick_millis * self.wheel_size as u64,
                "delay exceeds one wheel rotation, task will fire early"
            );
        }

        let current = self.current_slot.load(Ordering::Acquire);
        let slot = ((current as u64 + ticks) % self.wheel_size as u64) as usize;
        self.buckets.append(slot, task);
        debug!(slot, current, delay_ms, ticks, "added task to slot");
        Ok(())
    }

    /// One advance of the wheel: drain the current slot, dispatch what
    /// fired, move the pointer. Runs on the tick task only.
    pub(crate) fn tick(&self) {
        let slot = self.current_slot.load(Ordering::Acquire);
        if let Err(panic) = catch_unwind(AssertUnwindSafe(|| self.fire_slot(slot))) {
            error!(slot, panic = panic_message(panic.as_ref()), "error in tick");
        }
        // The pointer advances exactly once per tick even when the drain
        // fails, so a bad slot cannot stall the wheel.
        self.current_slot
            .store((slot + 1) % self.wheel_size, Ordering::Release);
    }

    fn fire_slot(&self, slot: usize) {
        let fired = self.buckets.drain(slot);
        if fired.is_empty() {
            return;
        }
        debug!(count = fired.len(), slot, "dispatching expired tasks");
        for task in fired {
            if self.pool.dispatch(task).is_err() {
                warn!(slot, "dispatch queue closed, dropping fired task");
            }
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

/// Read-only view of the wheel, shaped for status endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct WheelStatus {
    pub running: bool,
    pub current_slot: usize,
    pub wheel_size: usize,
    pub tick_duration_ms: u64,
}
