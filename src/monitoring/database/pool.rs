//! Connection pool instrumentation

use super::monitor::DatabaseMonitor;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Lifecycle event reported by a database driver's connection pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum PoolEvent {
    /// A connection was opened
    Created,
    /// A connection was closed
    Closed,
    CheckedOut,
    CheckedIn,
    /// A caller failed to obtain a connection
    CheckOutFailed { reason: String },
    /// The pool invalidated its connections; closes are reported separately
    Cleared,
}

impl DatabaseMonitor {
    /// Follow a pool's lifecycle events on a background task.
    ///
    /// The monitor only observes; it never acts on the pool. The task ends when the
    /// stream does.
    pub fn monitor_connection_pool<S>(self: &Arc<Self>, events: S) -> JoinHandle<()>
    where
        S: Stream<Item = PoolEvent> + Send + 'static,
    {
        let monitor = Arc::clone(self);
        tokio::spawn(async move {
            let mut events = Box::pin(events);
            while let Some(event) = events.next().await {
                monitor.handle_pool_event(&event);
            }
            debug!("Connection pool event stream ended");
        })
    }

    /// Apply a single pool event to the connection gauge
    pub fn handle_pool_event(&self, event: &PoolEvent) {
        match event {
            PoolEvent::Created => {
                let open = self.active_connections.fetch_add(1, Ordering::AcqRel) + 1;
                debug!(active_connections = open, "Database connection created");
            }
            PoolEvent::Closed => {
                let previous = self
                    .active_connections
                    .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                        Some(n.saturating_sub(1))
                    })
                    .unwrap_or(0);
                if previous == 0 {
                    warn!("Connection closed while no connections were open");
                } else {
                    debug!(active_connections = previous - 1, "Database connection closed");
                }
            }
            PoolEvent::CheckedOut | PoolEvent::CheckedIn => {}
            PoolEvent::CheckOutFailed { reason } => {
                self.checkout_failures.fetch_add(1, Ordering::AcqRel);
                warn!(reason = %reason, "Database connection checkout failed");
            }
            PoolEvent::Cleared => {
                warn!(
                    active_connections = self.active_connections(),
                    "Database connection pool cleared"
                );
            }
        }
    }
}
