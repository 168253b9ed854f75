//! Core data models for the Attendance Interpretation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod carry_over;
mod grant;
mod record;
mod summary;
mod warning;

pub use carry_over::CarryOverState;
pub use grant::EarnedRestGrant;
pub use record::{DailyAttendanceRecord, EarnedRestInfo};
pub use summary::PersonnelSummary;
pub use warning::{RunWarning, warning_codes};
