//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod history_port;

#[cfg(test)]
pub use history_port::{MockHistorySession, MockHistorySourcePort};
pub use history_port::{HistorySession, HistorySourcePort};
