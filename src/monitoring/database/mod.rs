//! Database operation monitoring
//!
//! Persistence calls opt in by running through [`DatabaseMonitor::timed`]. The monitor
//! records duration, slowness and failure per `collection:operation` and follows the
//! connection pool through a stream of [`PoolEvent`]s.

mod monitor;
mod pool;
mod types;


pub use monitor::DatabaseMonitor;
pub use pool::PoolEvent;
pub use types::{ConnectionHealth, DatabaseMetrics, DbOperationSample, OperationStats};
