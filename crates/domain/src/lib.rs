//! Domain layer for the weather history service
//!
//! Contains the value objects and entities that describe a historical
//! weather query and its per-year temperature summaries.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
