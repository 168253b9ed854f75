//! HTTP API module for the Attendance Interpretation Engine.
//!
//! This module provides the REST endpoint for running a monthly
//! attendance-processing period.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ProcessRequest;
pub use response::{ApiError, ProcessResponse};
pub use state::AppState;
