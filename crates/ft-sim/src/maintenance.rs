//! Periodic arrival-history pruning.

use std::sync::Arc;
use std::time::Duration;

use tokio::task;
use tokio::time::sleep;
use tracing::{debug, error, info};

use ft_mobility::Clock;
use ft_store::TelemetryStore;

/// Every `interval`, delete arrival records older than `retention`.
///
/// Sleeps first, then prunes on the blocking pool.  A failed prune is
/// logged and the loop carries on; this never returns.
pub async fn prune_loop<S: TelemetryStore>(
    store:     Arc<S>,
    clock:     Arc<dyn Clock>,
    interval:  Duration,
    retention: chrono::Duration,
) {
    loop {
        sleep(interval).await;
        let (store, now) = (Arc::clone(&store), clock.now());
        match task::spawn_blocking(move || store.prune_older_than(retention, now)).await {
            Ok(Ok(0)) => debug!("arrival pruning: nothing to delete"),
            Ok(Ok(deleted)) => info!(deleted, retention_days = retention.num_days(), "pruned arrival history"),
            Ok(Err(err)) => error!(error = %err, "arrival pruning failed"),
            Err(err) => error!(error = %err, "arrival pruning task panicked"),
        }
    }
}
