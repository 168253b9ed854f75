//! Absenteeism and monthly summary aggregation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::CompanyConfig;
use crate::models::{DailyAttendanceRecord, PersonnelSummary};

/// Number of days in a calendar month, when the year/month pair is valid.
fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

/// Rolls one person's processed records up into their monthly summary.
///
/// The effective employment window defaults to the full month and narrows
/// under the person's entry/exit day overrides. Worked and vacation days are
/// counted as distinct dates inside the window (vacation days by their
/// grant-adjusted effective date), and
/// `absent_days = max(0, effective_days − worked_days − vacation_days)`.
pub fn summarize_person(
    records: &[DailyAttendanceRecord],
    config: &CompanyConfig,
    max_streak: u32,
) -> PersonnelSummary {
    let (code, name) = records
        .first()
        .map(|r| (r.personnel_code.clone(), r.personnel_name.clone()))
        .unwrap_or_default();

    let month_days = days_in_month(config.year, config.month).unwrap_or(30);
    let window = config.employment_windows.get(&code);
    let start_day = window
        .and_then(|w| w.entry_day)
        .unwrap_or(1)
        .clamp(1, month_days);
    let end_day = window
        .and_then(|w| w.exit_day)
        .unwrap_or(month_days)
        .clamp(start_day, month_days);
    let effective_days = end_day - start_day + 1;

    let in_window = |date: NaiveDate| {
        date.year() == config.year
            && date.month() == config.month
            && (start_day..=end_day).contains(&date.day())
    };

    let mut worked_hours = Decimal::ZERO;
    let mut absent_hours = Decimal::ZERO;
    let mut overtime_normal = Decimal::ZERO;
    let mut overtime_premium = Decimal::ZERO;
    let mut column_hours: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut worked_dates: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut vacation_dates: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut group_hours: BTreeMap<String, Decimal> = BTreeMap::new();

    for record in records {
        worked_hours += record.worked_hours;
        absent_hours += record.absent_hours;
        overtime_normal += record.overtime_normal;
        overtime_premium += record.overtime_premium;
        for (column, hours) in &record.column_hours {
            *column_hours.entry(column.clone()).or_insert(Decimal::ZERO) += *hours;
        }

        if record.is_work_day() {
            if in_window(record.date) {
                worked_dates.insert(record.date);
            }
            if let Some(group) = &record.shift_group {
                *group_hours.entry(group.clone()).or_insert(Decimal::ZERO) +=
                    record.worked_hours;
            }
        }

        if record.vacation_days > Decimal::ZERO {
            let effective = record
                .earned_rest
                .as_ref()
                .map(|info| info.effective_date)
                .unwrap_or(record.date);
            if in_window(effective) {
                vacation_dates.insert(effective);
            }
        }
    }

    let worked_days = worked_dates.len() as u32;
    let vacation_days = vacation_dates.len() as u32;
    let absent_days = effective_days.saturating_sub(worked_days + vacation_days);

    let average_daily_hours = if worked_days > 0 {
        worked_hours / Decimal::from(worked_days)
    } else {
        Decimal::ZERO
    };

    let dominant_shift_group = group_hours
        .iter()
        .max_by_key(|(_, hours)| **hours)
        .map(|(group, _)| group.clone());

    PersonnelSummary {
        personnel_code: code,
        personnel_name: name,
        worked_hours,
        worked_days,
        overtime_normal,
        overtime_premium,
        column_hours,
        vacation_days,
        absent_days,
        absent_hours,
        average_daily_hours,
        max_streak,
        dominant_shift_group,
    }
}
