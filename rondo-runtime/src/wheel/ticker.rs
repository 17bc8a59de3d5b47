use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::engine::WheelCore;

/// Drive the wheel: one tick per period until the shutdown signal flips.
///
/// The interval's first tick completes immediately and is consumed up front,
/// so the first slot fires one full period after start. The tick body is
/// synchronous and contains no await point, which keeps ticks strictly
/// sequential and lets a tick in progress finish before shutdown is
/// observed. A failed tick is contained inside [`WheelCore::tick`]; nothing
/// here stops the clock except the shutdown signal.
pub(crate) async fn run(core: Arc<WheelCore>, mut shutdown: watch::Receiver<bool>) {
    let mut interval = tokio::time::interval(core.tick_duration);
    interval.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = interval.tick() => core.tick(),
        }
    }
    debug!("tick clock stopped");
}
