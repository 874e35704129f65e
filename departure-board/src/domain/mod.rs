//! Domain types for the departure board.
//!
//! These types represent validated transit data. They enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod departure;
mod stop;
mod time;

pub use departure::DepartureRecord;
pub use stop::{Stop, StopId};
pub use time::{ClockTime, TimeError};
