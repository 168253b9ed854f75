//! Per-day record processing.
//!
//! For each matched record this stage derives net worked hours, applies the
//! official-holiday special casing, records shortfall (absence) hours and
//! invokes the overtime allocator. It owns the record fields
//! `worked_hours`, `shift_group`, `overtime_*`, `column_hours`,
//! `absent_hours` and the holiday flags; later stages own the earned-rest
//! fields.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::config::{CompanyConfig, ShiftRuleGroup};
use crate::models::DailyAttendanceRecord;

use super::holiday::HolidayInfo;
use super::overtime::allocate_overtime;

/// Whether a date falls on Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Processes a single daily record in place.
///
/// `group` is the resolved shift rule group; `None` leaves the record
/// unrated (worked hours are taken gross, no standard-hours or overtime rule
/// applies). Records pre-flagged as template-supplied vacation days are
/// marked as a vacation day and otherwise skipped entirely.
///
/// Grid cell symbols are translated first: the company's rested-holiday
/// symbol marks a template vacation day, the worked-holiday symbol stands
/// for a full standard shift when the record carries no hours of its own.
///
/// Official-holiday special casing: a worked holiday routes
/// `min(worked, half-day-adjusted standard hours)` into the configured
/// holiday-work column and receives no ordinary overtime allocation.
pub fn process_daily_record(
    record: &mut DailyAttendanceRecord,
    group: Option<&ShiftRuleGroup>,
    holidays: &BTreeMap<NaiveDate, HolidayInfo>,
    config: &CompanyConfig,
) {
    if let Some(info) = holidays.get(&record.date) {
        record.official_holiday = true;
        record.holiday_name = Some(info.name.clone());
        record.half_day_holiday = info.half_day;
    }

    if let Some(symbol) = &record.grid_symbol {
        if config.grid.rested_holiday_symbol.as_deref() == Some(symbol.as_str()) {
            record.template_vacation = true;
        } else if config.grid.worked_holiday_symbol.as_deref() == Some(symbol.as_str())
            && record.grid_hours.is_none()
            && record.check_in.is_none()
        {
            // The symbol stands for a full standard shift worked that day.
            if let Some(group) = group {
                record.grid_hours = Some(group.standard_hours + group.break_hours);
            }
        }
    }

    if record.template_vacation {
        // The grid template already decided this day; it only contributes a
        // vacation-day count.
        record.vacation_days = Decimal::ONE;
        return;
    }

    record.shift_group = group.map(|g| g.name.clone());

    let Some(gross) = record.gross_hours() else {
        return;
    };

    let Some(group) = group else {
        // Unrated: keep the hours visible but apply no rule.
        record.worked_hours = gross.max(Decimal::ZERO);
        return;
    };

    record.worked_hours = (gross - group.break_hours).max(Decimal::ZERO);
    if record.worked_hours == Decimal::ZERO {
        return;
    }

    if record.official_holiday {
        record.worked_on_official_holiday = true;
        let cap = if record.half_day_holiday {
            group.standard_hours / Decimal::TWO
        } else {
            group.standard_hours
        };
        let premium = record.worked_hours.min(cap);
        record.add_column_hours(&config.special_columns.holiday_work, premium);
        // Holiday work earns the holiday premium instead of ordinary
        // overtime, even when hours exceed the standard.
        return;
    }

    if record.worked_hours < group.standard_hours {
        record.absent_hours = group.standard_hours - record.worked_hours;
    } else if record.worked_hours > group.standard_hours {
        let allocation = allocate_overtime(record.worked_hours, group);
        record.overtime_normal = allocation.normal_hours;
        record.overtime_premium = allocation.premium_hours;
        for (column, hours) in allocation.column_hours {
            record.add_column_hours(&column, hours);
        }

        // Groups without overtime rules can still route weekend overtime
        // into the company's weekend column.
        if group.overtime_rules.is_empty()
            && is_weekend(record.date)
            && let Some(column) = &config.special_columns.weekend_work
        {
            record.add_column_hours(column, record.worked_hours - group.standard_hours);
        }
    }
}
