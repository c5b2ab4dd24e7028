//! Background expiry of stale entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::MemoryRegistry;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Spawns the task that sweeps `registry` once per sweep interval.
///
/// The first sweep happens one interval after the call. The task runs until
/// `shutdown` is cancelled; await the returned handle to join it.
pub fn spawn_sweeper(registry: Arc<MemoryRegistry>, shutdown: CancellationToken) -> JoinHandle<()> {
    // tokio intervals panic on a zero period
    let period = registry.config().sweep_interval.max(MIN_PERIOD);

    tokio::spawn(async move {
        let mut timer = time::interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(interval_secs = period.as_secs_f64(), "Sweeper started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = timer.tick() => {}
            }

            let evicted = registry.sweep();
            if evicted > 0 {
                debug!(evicted, remaining = registry.len(), "Sweep complete");
            }
        }

        info!("Sweeper stopped");
    })
}
