//! Daily attendance record model.
//!
//! This module defines [`DailyAttendanceRecord`], the unit of work flowing
//! through the calculation pipeline, and the [`EarnedRestInfo`] metadata
//! attached when an earned-rest grant lands on a record.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Metadata describing the earned-rest grant applied to a record.
///
/// Attached by the vacation distributor when a grant is consumed, whether
/// the day was actually rested or worked through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnedRestInfo {
    /// Name of the shift rule group whose streak rule produced the grant.
    pub rule_name: String,
    /// First day of the qualifying consecutive-work range.
    pub range_start: NaiveDate,
    /// Last day of the qualifying consecutive-work range.
    pub range_end: NaiveDate,
    /// The date the grant took effect on (the date of the record it landed on).
    pub effective_date: NaiveDate,
}

/// A single person-day of attendance, raw input plus computed results.
///
/// Records are created from ingested raw data (check-in/out times or a
/// pre-aggregated grid value) and mutated in place by the pipeline stages.
/// Each stage only sets its own fields: the daily processor sets worked and
/// overtime hours, the streak engine and vacation distributor set the
/// earned-rest fields, nothing mutates a field another stage owns.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DailyAttendanceRecord;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let mut record = DailyAttendanceRecord::new(
///     "1042",
///     "A. Demir",
///     NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
/// );
/// record.shift_label = Some("08:00-18:00".to_string());
/// record.check_in = Some(NaiveTime::from_hms_opt(8, 0, 0).unwrap());
/// record.check_out = Some(NaiveTime::from_hms_opt(18, 0, 0).unwrap());
/// assert!(!record.is_work_day());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAttendanceRecord {
    /// Personnel code identifying the person.
    pub personnel_code: String,
    /// Personnel display name.
    pub personnel_name: String,
    /// Calendar date the record covers.
    pub date: NaiveDate,
    /// Raw shift label as ingested (e.g. "8/18", "08:00-18:00").
    #[serde(default)]
    pub shift_label: Option<String>,
    /// Check-in time, when the source supplies clock times.
    #[serde(default)]
    pub check_in: Option<NaiveTime>,
    /// Check-out time, when the source supplies clock times.
    #[serde(default)]
    pub check_out: Option<NaiveTime>,
    /// Pre-aggregated worked hours for grid-style input without clock times.
    #[serde(default)]
    pub grid_hours: Option<Decimal>,
    /// Whether the grid template pre-marked this day as a vacation day.
    #[serde(default)]
    pub template_vacation: bool,
    /// Raw grid cell symbol, for template input that marks holiday days with
    /// a company-specific character instead of hours.
    #[serde(default)]
    pub grid_symbol: Option<String>,

    /// Net worked hours (gross minus paid break), set by the daily processor.
    #[serde(default)]
    pub worked_hours: Decimal,
    /// Name of the matched shift rule group, if any.
    #[serde(default)]
    pub shift_group: Option<String>,
    /// Overtime hours paid at the normal tier (rate < 1.5).
    #[serde(default)]
    pub overtime_normal: Decimal,
    /// Overtime hours paid at the premium tier (rate >= 1.5).
    #[serde(default)]
    pub overtime_premium: Decimal,
    /// Overtime hours attributed to each named output column.
    #[serde(default)]
    pub column_hours: BTreeMap<String, Decimal>,
    /// Vacation days taken on this record (0 or 1).
    #[serde(default)]
    pub vacation_days: Decimal,
    /// Shortfall below the standard hours for the matched shift.
    #[serde(default)]
    pub absent_hours: Decimal,

    /// Whether the date is an official holiday.
    #[serde(default)]
    pub official_holiday: bool,
    /// Name of the official holiday, when the date is one.
    #[serde(default)]
    pub holiday_name: Option<String>,
    /// Whether the official holiday is a half day.
    #[serde(default)]
    pub half_day_holiday: bool,
    /// Whether the person worked on an official holiday.
    #[serde(default)]
    pub worked_on_official_holiday: bool,
    /// Whether the person worked through an earned rest day.
    #[serde(default)]
    pub worked_on_earned_rest: bool,
    /// Grant metadata, set when an earned-rest grant consumed this record.
    #[serde(default)]
    pub earned_rest: Option<EarnedRestInfo>,
}

impl DailyAttendanceRecord {
    /// Creates a raw record with no computed fields set.
    pub fn new(code: &str, name: &str, date: NaiveDate) -> Self {
        Self {
            personnel_code: code.to_string(),
            personnel_name: name.to_string(),
            date,
            shift_label: None,
            check_in: None,
            check_out: None,
            grid_hours: None,
            template_vacation: false,
            grid_symbol: None,
            worked_hours: Decimal::ZERO,
            shift_group: None,
            overtime_normal: Decimal::ZERO,
            overtime_premium: Decimal::ZERO,
            column_hours: BTreeMap::new(),
            vacation_days: Decimal::ZERO,
            absent_hours: Decimal::ZERO,
            official_holiday: false,
            holiday_name: None,
            half_day_holiday: false,
            worked_on_official_holiday: false,
            worked_on_earned_rest: false,
            earned_rest: None,
        }
    }

    /// Returns the gross attended hours before the paid break is removed.
    ///
    /// Grid-style input supplies the value directly; clock-time input derives
    /// it from check-in/check-out. A check-out before the check-in is
    /// treated as crossing midnight; equal punch times contribute nothing.
    ///
    /// Returns `None` when neither a grid value nor both clock times exist.
    pub fn gross_hours(&self) -> Option<Decimal> {
        if let Some(hours) = self.grid_hours {
            return Some(hours);
        }
        let (check_in, check_out) = (self.check_in?, self.check_out?);
        let mut minutes = (check_out - check_in).num_minutes();
        if minutes < 0 {
            // Overnight shift: the check-out belongs to the next calendar day.
            minutes += 24 * 60;
        }
        Some(Decimal::new(minutes, 0) / Decimal::new(60, 0))
    }

    /// Whether this record counts as a worked day.
    pub fn is_work_day(&self) -> bool {
        self.worked_hours > Decimal::ZERO
    }

    /// Adds overtime hours to a named output column.
    pub fn add_column_hours(&mut self, column: &str, hours: Decimal) {
        if hours > Decimal::ZERO {
            *self
                .column_hours
                .entry(column.to_string())
                .or_insert(Decimal::ZERO) += hours;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn base_record() -> DailyAttendanceRecord {
        DailyAttendanceRecord::new("1042", "A. Demir", NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
    }

    #[test]
    fn test_gross_hours_from_clock_times() {
        let mut record = base_record();
        record.check_in = Some(time(8, 0));
        record.check_out = Some(time(19, 0));
        assert_eq!(record.gross_hours(), Some(dec("11")));
    }

    #[test]
    fn test_gross_hours_fractional() {
        let mut record = base_record();
        record.check_in = Some(time(8, 30));
        record.check_out = Some(time(17, 15));
        assert_eq!(record.gross_hours(), Some(dec("8.75")));
    }

    #[test]
    fn test_gross_hours_overnight_wrap() {
        let mut record = base_record();
        record.check_in = Some(time(22, 0));
        record.check_out = Some(time(6, 0));
        assert_eq!(record.gross_hours(), Some(dec("8")));
    }

    #[test]
    fn test_gross_hours_equal_punches_are_zero() {
        // A duplicate punch is not a 24-hour overnight shift.
        let mut record = base_record();
        record.check_in = Some(time(8, 0));
        record.check_out = Some(time(8, 0));
        assert_eq!(record.gross_hours(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_gross_hours_prefers_grid_value() {
        let mut record = base_record();
        record.grid_hours = Some(dec("7.5"));
        record.check_in = Some(time(8, 0));
        record.check_out = Some(time(20, 0));
        assert_eq!(record.gross_hours(), Some(dec("7.5")));
    }

    #[test]
    fn test_gross_hours_missing_times() {
        let mut record = base_record();
        record.check_in = Some(time(8, 0));
        assert_eq!(record.gross_hours(), None);
    }

    #[test]
    fn test_is_work_day() {
        let mut record = base_record();
        assert!(!record.is_work_day());
        record.worked_hours = dec("0.5");
        assert!(record.is_work_day());
    }

    #[test]
    fn test_add_column_hours_accumulates() {
        let mut record = base_record();
        record.add_column_hours("FM-Normal", dec("1.5"));
        record.add_column_hours("FM-Normal", dec("0.5"));
        record.add_column_hours("FM-50", dec("1.0"));
        assert_eq!(record.column_hours.get("FM-Normal"), Some(&dec("2.0")));
        assert_eq!(record.column_hours.get("FM-50"), Some(&dec("1.0")));
    }

    #[test]
    fn test_add_column_hours_ignores_zero() {
        let mut record = base_record();
        record.add_column_hours("FM-Normal", Decimal::ZERO);
        assert!(record.column_hours.is_empty());
    }

    #[test]
    fn test_record_deserializes_from_raw_input() {
        let json = r#"{
            "personnel_code": "1042",
            "personnel_name": "A. Demir",
            "date": "2025-03-10",
            "shift_label": "08:00-18:00",
            "check_in": "08:00:00",
            "check_out": "18:00:00"
        }"#;

        let record: DailyAttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.personnel_code, "1042");
        assert_eq!(record.worked_hours, Decimal::ZERO);
        assert!(record.column_hours.is_empty());
        assert!(!record.template_vacation);
    }

    #[test]
    fn test_record_round_trips_with_computed_fields() {
        let mut record = base_record();
        record.worked_hours = dec("10");
        record.overtime_normal = dec("1.5");
        record.add_column_hours("FM-50", dec("1.0"));
        record.earned_rest = Some(EarnedRestInfo {
            rule_name: "day-shift".to_string(),
            range_start: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            range_end: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
            effective_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
        });

        let json = serde_json::to_string(&record).unwrap();
        let back: DailyAttendanceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
