//! Official-holiday lookup.
//!
//! The full calendar-year holiday list is provisioned externally; this stage
//! reduces it to the set of dates active for a company's payroll year,
//! honoring the company's explicit override list and per-date half-day
//! flags. Absence from the resulting map means "not a holiday".

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::CompanyConfig;
use crate::models::{RunWarning, warning_codes};

/// One entry of the externally provisioned holiday calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarHoliday {
    /// The holiday date.
    pub date: NaiveDate,
    /// The holiday name.
    pub name: String,
    /// Whether only half the day is a holiday.
    #[serde(default)]
    pub half_day: bool,
}

/// Resolved holiday information for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayInfo {
    /// The holiday name.
    pub name: String,
    /// Whether only half the day is a holiday.
    pub half_day: bool,
}

/// Resolves which dates are official holidays for a company's payroll year.
///
/// Starts from the full calendar list. When the company supplies an explicit
/// active-dates override for that year, the result is restricted (or
/// emptied, when the override list is empty) to exactly those dates; a
/// per-date `half_day` override takes precedence over the calendar's flag.
/// Override entries that fail to parse are reported as warnings and skipped,
/// never fatal.
///
/// Override dates missing from the base calendar are still honored. The
/// company list is authoritative for its year; the calendar only contributes
/// names and half-day defaults.
pub fn holidays_for(
    config: &CompanyConfig,
    calendar: &[CalendarHoliday],
    warnings: &mut Vec<RunWarning>,
) -> BTreeMap<NaiveDate, HolidayInfo> {
    let base: BTreeMap<NaiveDate, HolidayInfo> = calendar
        .iter()
        .map(|h| {
            (
                h.date,
                HolidayInfo {
                    name: h.name.clone(),
                    half_day: h.half_day,
                },
            )
        })
        .collect();

    let Some(overrides) = &config.holiday_overrides else {
        return base;
    };
    if overrides.year != config.year {
        return base;
    }

    let mut restricted = BTreeMap::new();
    for entry in &overrides.dates {
        let Ok(date) = NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d") else {
            warnings.push(RunWarning::new(
                warning_codes::BAD_HOLIDAY_OVERRIDE,
                format!("holiday override entry '{}' is not a valid date", entry.date),
            ));
            continue;
        };

        let info = match base.get(&date) {
            Some(base_info) => HolidayInfo {
                name: base_info.name.clone(),
                half_day: entry.half_day.unwrap_or(base_info.half_day),
            },
            None => HolidayInfo {
                name: "Company-designated holiday".to_string(),
                half_day: entry.half_day.unwrap_or(false),
            },
        };
        restricted.insert(date, info);
    }

    restricted
}
