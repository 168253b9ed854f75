//! Consecutive-work tracking and vacation earning.
//!
//! Walks one person's chronologically sorted records, counting consecutive
//! work days. The counter can be seeded from the previous period's persisted
//! carry-over so a streak continues across a month boundary. Whenever the
//! streak crosses a group's threshold (and again at each multiple of it),
//! earned-rest grants are enqueued for the following calendar days.

use chrono::{Days, NaiveDate};

use crate::config::CompanyConfig;
use crate::models::{CarryOverState, DailyAttendanceRecord, EarnedRestGrant};

/// The result of one person's consecutive-work pass.
#[derive(Debug, Clone, Default)]
pub struct StreakOutcome {
    /// Earned-rest grants, in the order they were earned.
    pub grants: Vec<EarnedRestGrant>,
    /// The trailing streak to persist for the next period, or `None` when
    /// the period does not end on a counted work day (the person's prior
    /// carry-over entry must then be cleared).
    pub carry_over: Option<CarryOverState>,
    /// The longest streak observed in the pass. A seeded carry-over length
    /// counts only once it extends into this period.
    pub max_streak: u32,
}

/// Computes the contiguous trailing run of work days at the tail of a prior
/// period's records (sorted by date).
///
/// Returns the run length and its last work date, or `None` when the period
/// does not end in a work day. Used to validate a persisted carry-over
/// snapshot before seeding from it.
pub fn trailing_run(prior_records: &[DailyAttendanceRecord]) -> Option<(u32, NaiveDate)> {
    let last = prior_records.iter().rev().find(|r| r.is_work_day())?;

    // Any non-work record dated after the last work day breaks the tail.
    if prior_records
        .iter()
        .any(|r| r.date > last.date && !r.is_work_day())
    {
        return None;
    }

    let mut run = 1u32;
    let mut cursor = last.date;
    loop {
        let Some(prev_date) = cursor.checked_sub_days(Days::new(1)) else {
            break;
        };
        let continues = prior_records
            .iter()
            .any(|r| r.date == prev_date && r.is_work_day());
        if !continues {
            break;
        }
        run += 1;
        cursor = prev_date;
    }

    Some((run, last.date))
}

/// Runs the consecutive-work state machine over one person's current-period
/// records, which must be sorted by date.
///
/// `seed` is an already validated carry-over snapshot (the pipeline discards
/// stale ones); when present, the streak starts at its length and continues
/// if the first counted work day is the day after its last work date.
///
/// Counting rules:
/// - a record counts as a work day when it has worked hours and is not an
///   un-worked template-flagged holiday;
/// - a template-flagged earned-rest-on-holiday record (holiday, not worked,
///   vacation flag set) is skipped without breaking contiguity;
/// - any other non-work day resets the streak to zero;
/// - a work day one day after the last counted work day increments the
///   streak, any other work day restarts it at one.
pub fn track_consecutive_work(
    records: &[DailyAttendanceRecord],
    config: &CompanyConfig,
    seed: Option<&CarryOverState>,
) -> StreakOutcome {
    let mut outcome = StreakOutcome::default();

    let mut streak: u32 = 0;
    let mut expected_next: Option<NaiveDate> = None;
    if let Some(state) = seed {
        streak = state.streak_length;
        expected_next = state.last_work_date.checked_add_days(Days::new(1));
    }

    let mut last_counted: Option<&DailyAttendanceRecord> = None;
    let mut last_record_counted = false;

    for record in records {
        let skip_bridge = record.official_holiday
            && !record.is_work_day()
            && (record.vacation_days > rust_decimal::Decimal::ZERO || record.template_vacation);

        if skip_bridge {
            // An earned rest taken on a holiday bridges the streak: the day
            // neither counts nor breaks contiguity.
            if expected_next == Some(record.date) {
                expected_next = record.date.checked_add_days(Days::new(1));
            }
            last_record_counted = false;
            continue;
        }

        if !record.is_work_day() {
            streak = 0;
            expected_next = None;
            last_record_counted = false;
            continue;
        }

        if expected_next == Some(record.date) {
            streak += 1;
        } else {
            streak = 1;
        }
        expected_next = record.date.checked_add_days(Days::new(1));
        last_counted = Some(record);
        last_record_counted = true;
        outcome.max_streak = outcome.max_streak.max(streak);

        let group = record
            .shift_group
            .as_deref()
            .and_then(|name| config.group(name));
        if let Some(group) = group {
            let threshold = config.streak_threshold(group, record.shift_label.is_some());
            if threshold > 0 && streak >= threshold && streak % threshold == 0 {
                let range_start = record
                    .date
                    .checked_sub_days(Days::new(u64::from(threshold) - 1))
                    .unwrap_or(record.date);
                for offset in 1..=u64::from(group.vacation_days) {
                    let Some(target) = record.date.checked_add_days(Days::new(offset)) else {
                        continue;
                    };
                    outcome.grants.push(EarnedRestGrant {
                        target_date: target,
                        range_start,
                        range_end: record.date,
                        rule_name: group.name.clone(),
                        streak_length: threshold,
                    });
                }
            }
        }
    }

    // Only a period that ends on a counted work day carries its streak over.
    if last_record_counted && let Some(record) = last_counted {
        outcome.carry_over = Some(CarryOverState {
            personnel_code: record.personnel_code.clone(),
            personnel_name: record.personnel_name.clone(),
            last_shift_group: record.shift_group.clone(),
            last_work_date: record.date,
            streak_length: streak,
            last_worked_hours: record.worked_hours,
        });
    }

    outcome
}
