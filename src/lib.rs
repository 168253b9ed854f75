//! Attendance Interpretation Engine
//!
//! This crate computes a company's monthly time-and-attendance payroll
//! adjustments from raw daily check-in/check-out records: regular hours,
//! tiered overtime, official-holiday premiums, earned-rest days for
//! qualifying consecutive work streaks, and absence counts.
//!
//! The engine is a single-threaded, staged batch pipeline: shift matching,
//! per-day processing, consecutive-work tracking, earned-rest distribution
//! and monthly summarisation, with a persisted carry-over snapshot so work
//! streaks continue across a month boundary.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
