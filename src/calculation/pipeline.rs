//! The monthly processing pipeline.
//!
//! Orchestrates the full period run: holiday resolution, per-person grouping,
//! shift matching, daily processing, consecutive-work tracking with carry-over
//! seeding, earned-rest distribution and summary aggregation. Every person is
//! processed independently; a degraded record or an unmatched shift label
//! surfaces as a [`RunWarning`], never as a failed run.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info, warn};

use crate::config::CompanyConfig;
use crate::models::{
    CarryOverState, DailyAttendanceRecord, PersonnelSummary, RunWarning, warning_codes,
};

use super::daily::process_daily_record;
use super::holiday::{CalendarHoliday, holidays_for};
use super::shift_matcher::resolve_shift_group;
use super::streak::{track_consecutive_work, trailing_run};
use super::summary::summarize_person;
use super::vacation::distribute_grants;

/// The previous period's persisted data, used to seed carry-over streaks.
#[derive(Debug, Clone, Default)]
pub struct PriorPeriod {
    /// The previous period's processed records.
    pub records: Vec<DailyAttendanceRecord>,
    /// The carry-over snapshot persisted at the end of the previous period.
    pub carry_over: Vec<CarryOverState>,
}

/// Everything a period run produces.
#[derive(Debug, Clone, Default)]
pub struct PeriodOutcome {
    /// All processed records, grouped by person and sorted by date.
    pub records: Vec<DailyAttendanceRecord>,
    /// One summary per person, ordered by personnel code.
    pub summaries: Vec<PersonnelSummary>,
    /// Trailing streak state to persist for the next period.
    pub carry_over: Vec<CarryOverState>,
    /// Non-fatal degradations collected along the way.
    pub warnings: Vec<RunWarning>,
}

/// Runs the complete pipeline over one payroll period.
///
/// `calendar` is the externally provisioned holiday list for the year;
/// `prior` is the previous period's persisted data when carry-over is
/// enabled. Records may arrive in any order; they are grouped per person and
/// sorted by date before processing.
pub fn process_period(
    config: &CompanyConfig,
    records: Vec<DailyAttendanceRecord>,
    calendar: &[CalendarHoliday],
    prior: Option<&PriorPeriod>,
) -> PeriodOutcome {
    info!(
        company = %config.company_id,
        year = config.year,
        month = config.month,
        records = records.len(),
        "processing payroll period"
    );

    let mut outcome = PeriodOutcome::default();
    let holidays = holidays_for(config, calendar, &mut outcome.warnings);

    let mut by_person: BTreeMap<String, Vec<DailyAttendanceRecord>> = BTreeMap::new();
    for record in records {
        by_person
            .entry(record.personnel_code.clone())
            .or_default()
            .push(record);
    }

    let mut warned_labels: HashSet<String> = HashSet::new();

    for (code, mut person_records) in by_person {
        person_records.sort_by_key(|r| r.date);
        debug!(person = %code, days = person_records.len(), "processing person");

        for record in &mut person_records {
            if record.check_in.is_some() != record.check_out.is_some() {
                outcome.warnings.push(
                    RunWarning::new(
                        warning_codes::UNUSABLE_RECORD,
                        "record has only one of check-in/check-out and contributes no hours",
                    )
                    .for_person(&record.personnel_code)
                    .on_date(record.date),
                );
            }

            let group = match &record.shift_label {
                Some(label) => {
                    let resolved = resolve_shift_group(label, config);
                    if resolved.is_none() && warned_labels.insert(label.clone()) {
                        warn!(label = %label, "shift label matches no rule group");
                        outcome.warnings.push(
                            RunWarning::new(
                                warning_codes::UNMATCHED_SHIFT,
                                format!("shift label '{label}' matches no rule group"),
                            )
                            .for_person(&record.personnel_code)
                            .on_date(record.date),
                        );
                    }
                    resolved
                }
                // Grid input carries no labels; the configured grid group
                // (or the first group) rates those records.
                None => config.grid_group(),
            };

            process_daily_record(record, group, &holidays, config);
        }

        let mut max_streak = 0;
        if config.grid.vacations_premarked {
            // The template already placed every vacation day; the streak
            // engine must not add more.
            debug!(person = %code, "vacations pre-marked, skipping streak engine");
        } else {
            let seed = resolve_seed(&code, config, prior, &mut outcome.warnings);
            let streaks = track_consecutive_work(&person_records, config, seed.as_ref());
            max_streak = streaks.max_streak;
            distribute_grants(
                &mut person_records,
                &streaks.grants,
                config,
                &mut outcome.warnings,
            );
            if config.carry_over_enabled
                && let Some(state) = streaks.carry_over
            {
                outcome.carry_over.push(state);
            }
        }

        outcome
            .summaries
            .push(summarize_person(&person_records, config, max_streak));
        outcome.records.extend(person_records);
    }

    info!(
        company = %config.company_id,
        summaries = outcome.summaries.len(),
        warnings = outcome.warnings.len(),
        "period run complete"
    );
    outcome
}

/// Resolves the carry-over seed for one person.
///
/// Without prior records the persisted snapshot is trusted as-is. With prior
/// records the trailing run is recomputed from them: a snapshot ending on the
/// same work date is kept (its length may include history older than the
/// prior period), anything else is reported stale and replaced by the
/// recomputed run.
fn resolve_seed(
    code: &str,
    config: &CompanyConfig,
    prior: Option<&PriorPeriod>,
    warnings: &mut Vec<RunWarning>,
) -> Option<CarryOverState> {
    if !config.carry_over_enabled {
        return None;
    }
    let prior = prior?;

    let snapshot = prior
        .carry_over
        .iter()
        .find(|s| s.personnel_code == code)
        .cloned();

    let mut prior_records: Vec<DailyAttendanceRecord> = prior
        .records
        .iter()
        .filter(|r| r.personnel_code == code)
        .cloned()
        .collect();
    if prior_records.is_empty() {
        return snapshot;
    }
    prior_records.sort_by_key(|r| r.date);

    let recomputed = trailing_run(&prior_records);
    match (&snapshot, recomputed) {
        (Some(state), Some((_, last))) if state.last_work_date == last => snapshot,
        (Some(state), recomputed) => {
            warn!(
                person = %code,
                snapshot_date = %state.last_work_date,
                "carry-over snapshot disagrees with prior records"
            );
            warnings.push(
                RunWarning::new(
                    warning_codes::STALE_CARRY_OVER,
                    format!(
                        "carry-over snapshot dated {} does not match the prior period's records",
                        state.last_work_date
                    ),
                )
                .for_person(code),
            );
            recomputed.and_then(|run| state_from_run(&prior_records, run))
        }
        (None, recomputed) => recomputed.and_then(|run| state_from_run(&prior_records, run)),
    }
}

fn state_from_run(
    records: &[DailyAttendanceRecord],
    (length, last_date): (u32, chrono::NaiveDate),
) -> Option<CarryOverState> {
    let last = records.iter().find(|r| r.date == last_date)?;
    Some(CarryOverState {
        personnel_code: last.personnel_code.clone(),
        personnel_name: last.personnel_name.clone(),
        last_shift_group: last.shift_group.clone(),
        last_work_date: last_date,
        streak_length: length,
        last_worked_hours: last.worked_hours,
    })
}
