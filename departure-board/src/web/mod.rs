//! JSON surface for the departure board.
//!
//! Serves the last published board and accepts a trigger to fetch now.
//! Layout and styling are left to whatever consumes the JSON.

mod dto;
mod routes;
mod state;

pub use dto::{BoardFailure, BoardResponse, BoardStatus, ErrorResponse};
pub use routes::{AppError, create_router};
pub use state::{AppState, BoardSnapshot, FailureReport};
