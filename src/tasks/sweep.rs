//! Cache Sweep Task
//!
//! Background task that periodically removes expired entries from every
//! memory cache role and runs the durable tier's cleanup.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::AppState;

/// Spawns the periodic cache sweep.
///
/// The sweep is advisory: reads perform their own lazy expiry checks, so
/// the task only reclaims memory and storage earlier than reads would.
///
/// # Arguments
/// * `state` - Application state holding the caches to sweep
/// * `interval` - Time between sweep runs
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_sweep_task(state: AppState, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting cache sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let swept = state.sweep_expired().await;
            let purged = state.durable.cleanup();

            if swept > 0 || purged > 0 {
                info!(
                    "Cache sweep: removed {} memory entries, {} durable entries",
                    swept, purged
                );
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
