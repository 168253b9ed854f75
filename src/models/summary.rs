//! Monthly per-person summary model.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly aggregates for one person.
///
/// Derived by the summary aggregator after all other stages have run; never
/// mutated afterwards. One summary per person per month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonnelSummary {
    /// Personnel code identifying the person.
    pub personnel_code: String,
    /// Personnel display name.
    pub personnel_name: String,
    /// Total net worked hours in the month.
    pub worked_hours: Decimal,
    /// Distinct days with any work in the effective employment window.
    pub worked_days: u32,
    /// Overtime hours at the normal tier (rate < 1.5).
    pub overtime_normal: Decimal,
    /// Overtime hours at the premium tier (rate >= 1.5).
    pub overtime_premium: Decimal,
    /// Overtime hours per named output column, including special columns.
    pub column_hours: BTreeMap<String, Decimal>,
    /// Vacation days taken (earned-rest days actually rested).
    pub vacation_days: u32,
    /// Absence days within the effective employment window.
    pub absent_days: u32,
    /// Total shortfall hours across partially worked days.
    pub absent_hours: Decimal,
    /// Average net hours per worked day (zero when no work days).
    pub average_daily_hours: Decimal,
    /// The longest consecutive-work streak observed in the period.
    pub max_streak: u32,
    /// The shift group with the most accumulated hours, if any matched.
    pub dominant_shift_group: Option<String>,
}
