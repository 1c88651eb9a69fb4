//! Alert lifecycle management
//!
//! Alerts are raised by rule evaluation at the end of every health check and live in
//! memory until the process exits. The only transition is active to resolved; a
//! condition that recurs after resolution raises a new alert.

mod manager;
mod notifier;
mod rules;
mod types;


pub use manager::AlertManager;
pub use notifier::{LogNotifier, Notifier};
pub use rules::{AlertCandidate, evaluate_rules};
pub use types::{Alert, AlertDetails, AlertStats, AlertType};
