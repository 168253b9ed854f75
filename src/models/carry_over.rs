//! Cross-period carry-over state.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-person trailing streak state persisted at the end of a period.
///
/// Read once when the next period's run starts (when cross-period carry-over
/// is enabled for the company), recomputed in full at period end from that
/// period's own trailing streak, and persisted wholesale, replacing the
/// prior snapshot rather than merging with it.
///
/// # Example
///
/// ```
/// use attendance_engine::models::CarryOverState;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let state = CarryOverState {
///     personnel_code: "1042".to_string(),
///     personnel_name: "A. Demir".to_string(),
///     last_shift_group: Some("day-shift".to_string()),
///     last_work_date: NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
///     streak_length: 4,
///     last_worked_hours: Decimal::new(90, 1),
/// };
/// assert_eq!(state.streak_length, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarryOverState {
    /// Personnel code identifying the person.
    pub personnel_code: String,
    /// Personnel display name.
    pub personnel_name: String,
    /// Shift group the person last worked under, if one was matched.
    pub last_shift_group: Option<String>,
    /// The last counted work date of the period.
    pub last_work_date: NaiveDate,
    /// The consecutive-work streak length as of `last_work_date`.
    pub streak_length: u32,
    /// Hours worked on the last work date.
    pub last_worked_hours: Decimal,
}
