//! Value Objects - Immutable, identity-less domain primitives

mod airport_code;
mod month;
mod year_range;

pub use airport_code::AirportCode;
pub use month::Month;
pub use year_range::{DEFAULT_END_YEAR, DEFAULT_START_YEAR, YearRange};
