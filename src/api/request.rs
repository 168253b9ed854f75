//! Request types for the Attendance Interpretation Engine API.
//!
//! This module defines the JSON request structures for the `/process`
//! endpoint.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::CalendarHoliday;
use crate::models::DailyAttendanceRecord;

/// Request body for the `/process` endpoint.
///
/// Carries one payroll period's raw attendance data plus the holiday
/// calendar for the year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// The payroll year; must match the loaded configuration.
    pub year: i32,
    /// The payroll month; must match the loaded configuration.
    pub month: u32,
    /// The official holiday calendar for the year.
    #[serde(default)]
    pub holidays: Vec<HolidayRequest>,
    /// The raw daily attendance records to process.
    pub records: Vec<RecordRequest>,
}

/// One holiday calendar entry in a process request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayRequest {
    /// The holiday date.
    pub date: NaiveDate,
    /// The holiday name.
    pub name: String,
    /// Whether only half the day is a holiday.
    #[serde(default)]
    pub half_day: bool,
}

/// One raw attendance record in a process request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordRequest {
    /// Personnel code identifying the person.
    pub personnel_code: String,
    /// Personnel display name.
    pub personnel_name: String,
    /// The calendar date the record covers.
    pub date: NaiveDate,
    /// Raw shift label, when the source supplies one.
    #[serde(default)]
    pub shift_label: Option<String>,
    /// Check-in time, when the source supplies clock times.
    #[serde(default)]
    pub check_in: Option<NaiveTime>,
    /// Check-out time, when the source supplies clock times.
    #[serde(default)]
    pub check_out: Option<NaiveTime>,
    /// Pre-aggregated worked hours for grid-style input.
    #[serde(default)]
    pub grid_hours: Option<Decimal>,
    /// Whether the grid template pre-marked the day as a vacation day.
    #[serde(default)]
    pub template_vacation: bool,
    /// Raw grid cell symbol for template input.
    #[serde(default)]
    pub grid_symbol: Option<String>,
}

impl From<HolidayRequest> for CalendarHoliday {
    fn from(req: HolidayRequest) -> Self {
        CalendarHoliday {
            date: req.date,
            name: req.name,
            half_day: req.half_day,
        }
    }
}

impl From<RecordRequest> for DailyAttendanceRecord {
    fn from(req: RecordRequest) -> Self {
        let mut record =
            DailyAttendanceRecord::new(&req.personnel_code, &req.personnel_name, req.date);
        record.shift_label = req.shift_label;
        record.check_in = req.check_in;
        record.check_out = req.check_out;
        record.grid_hours = req.grid_hours;
        record.template_vacation = req.template_vacation;
        record.grid_symbol = req.grid_symbol;
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_process_request() {
        let json = r#"{
            "year": 2025,
            "month": 3,
            "holidays": [
                { "date": "2025-03-30", "name": "Feast Day 1" }
            ],
            "records": [
                {
                    "personnel_code": "1042",
                    "personnel_name": "A. Demir",
                    "date": "2025-03-10",
                    "shift_label": "08:00-18:00",
                    "check_in": "08:00:00",
                    "check_out": "19:00:00"
                }
            ]
        }"#;

        let request: ProcessRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.year, 2025);
        assert_eq!(request.holidays.len(), 1);
        assert!(!request.holidays[0].half_day);
        assert_eq!(request.records.len(), 1);
        assert_eq!(request.records[0].personnel_code, "1042");
    }

    #[test]
    fn test_record_conversion_leaves_computed_fields_zeroed() {
        let req = RecordRequest {
            personnel_code: "1042".to_string(),
            personnel_name: "A. Demir".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            shift_label: Some("8/18".to_string()),
            check_in: None,
            check_out: None,
            grid_hours: Some(Decimal::from(11)),
            template_vacation: false,
            grid_symbol: None,
        };

        let record: DailyAttendanceRecord = req.into();
        assert_eq!(record.shift_label.as_deref(), Some("8/18"));
        assert_eq!(record.worked_hours, Decimal::ZERO);
        assert!(record.column_hours.is_empty());
    }
}
