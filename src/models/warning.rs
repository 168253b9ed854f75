//! Non-fatal warnings collected during a run.
//!
//! The engine never aborts a batch for a business-rule edge case. Anything
//! recoverable (an unmatched shift label, an unparseable holiday override,
//! an earned-rest grant with nowhere to land) degrades into a [`RunWarning`]
//! on the run outcome so the caller can report it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Well-known warning codes emitted by the engine.
pub mod warning_codes {
    /// A shift label matched no configured rule group.
    pub const UNMATCHED_SHIFT: &str = "UNMATCHED_SHIFT";
    /// A holiday-override entry failed to parse and was skipped.
    pub const BAD_HOLIDAY_OVERRIDE: &str = "BAD_HOLIDAY_OVERRIDE";
    /// An earned-rest grant could not be placed on any record.
    pub const GRANT_UNPLACED: &str = "GRANT_UNPLACED";
    /// A carry-over snapshot disagreed with the prior period's records.
    pub const STALE_CARRY_OVER: &str = "STALE_CARRY_OVER";
    /// A record was skipped because its raw input was unusable.
    pub const UNUSABLE_RECORD: &str = "UNUSABLE_RECORD";
}

/// A warning generated during a run.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{RunWarning, warning_codes};
///
/// let warning = RunWarning::new(warning_codes::UNMATCHED_SHIFT, "no group matches '9/21x'");
/// assert_eq!(warning.code, "UNMATCHED_SHIFT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The personnel code the warning concerns, when person-specific.
    #[serde(default)]
    pub personnel_code: Option<String>,
    /// The date the warning concerns, when date-specific.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl RunWarning {
    /// Creates a warning with no person or date attribution.
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            personnel_code: None,
            date: None,
        }
    }

    /// Attributes the warning to a person.
    pub fn for_person(mut self, code: &str) -> Self {
        self.personnel_code = Some(code.to_string());
        self
    }

    /// Attributes the warning to a date.
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}
