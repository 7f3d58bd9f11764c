//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries,
//! bounding memory growth from keys that are never read again after
//! expiring.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a task that sweeps expired entries on a fixed interval.
///
/// The task loops forever: sleep for `interval`, take the write lock, and
/// delete every expired entry. The loop body is infallible, so nothing can
/// terminate the periodic schedule short of aborting the task. The returned
/// [`JoinHandle`] is used by [`crate::TtlCache::shutdown`] to do exactly
/// that.
pub fn spawn_sweep_task<V>(
    store: Arc<RwLock<CacheStore<V>>>,
    interval: Duration,
) -> JoinHandle<()>
where
    V: Clone + Eq + Hash + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "starting TTL sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut store = store.write().await;
                store.sweep_expired()
            };

            if removed > 0 {
                info!(removed, "TTL sweep removed expired entries");
            } else {
                debug!("TTL sweep found no expired entries");
            }
        }
    })
}
