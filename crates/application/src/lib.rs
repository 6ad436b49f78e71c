//! Application layer - Use cases and orchestration
//!
//! Contains the history aggregation use case, the CSV year parser and the
//! port definitions that infrastructure adapters implement.

pub mod csv_parser;
pub mod error;
pub mod ports;
pub mod services;

pub use csv_parser::parse_year;
pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
