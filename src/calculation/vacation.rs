//! Earned-rest grant distribution.
//!
//! Resolves each queued [`EarnedRestGrant`] against one person's records, in
//! FIFO order. A grant marks its target day as a taken vacation day when the
//! person rested, or reroutes the day's hours into the earned-rest premium
//! column when the person worked through it. When the target date has no
//! record, the most recent unconsumed work day absorbs the grant instead.
//! Every record is consumed by at most one grant.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::CompanyConfig;
use crate::models::{
    DailyAttendanceRecord, EarnedRestGrant, EarnedRestInfo, RunWarning, warning_codes,
};

/// Distributes earned-rest grants over one person's records (sorted by date).
///
/// Appends a [`warning_codes::GRANT_UNPLACED`] warning for every grant that
/// finds neither a same-date record nor a fallback candidate; the hours
/// lapse rather than deferring to the next period.
pub fn distribute_grants(
    records: &mut [DailyAttendanceRecord],
    grants: &[EarnedRestGrant],
    config: &CompanyConfig,
    warnings: &mut Vec<RunWarning>,
) {
    let mut consumed: HashSet<usize> = HashSet::new();

    for grant in grants {
        let same_date = records
            .iter()
            .position(|r| r.date == grant.target_date)
            .filter(|i| !consumed.contains(i));

        if let Some(index) = same_date {
            consumed.insert(index);
            let record = &mut records[index];
            if record.is_work_day() {
                reroute_to_earned_rest(record, grant, config);
            } else {
                record.vacation_days = Decimal::ONE;
                record.earned_rest = Some(grant_info(grant, record));
            }
            continue;
        }

        // No record on the rest date: the most recent unconsumed work day
        // before it takes the worked-on-earned-rest treatment.
        let fallback = records
            .iter()
            .enumerate()
            .rev()
            .find(|(i, r)| {
                !consumed.contains(i) && r.date < grant.target_date && r.is_work_day()
            })
            .map(|(i, _)| i);

        match fallback {
            Some(index) => {
                consumed.insert(index);
                let record = &mut records[index];
                reroute_to_earned_rest(record, grant, config);
            }
            None => {
                warn!(
                    target_date = %grant.target_date,
                    rule = %grant.rule_name,
                    "earned-rest grant could not be placed"
                );
                warnings.push(
                    RunWarning::new(
                        warning_codes::GRANT_UNPLACED,
                        format!(
                            "earned-rest grant for {} has no record to land on",
                            grant.target_date
                        ),
                    )
                    .on_date(grant.target_date),
                );
            }
        }
    }
}

/// The person worked on their earned rest day: the full worked hours move
/// into the earned-rest premium column and ordinary overtime is dropped.
fn reroute_to_earned_rest(
    record: &mut DailyAttendanceRecord,
    grant: &EarnedRestGrant,
    config: &CompanyConfig,
) {
    record.worked_on_earned_rest = true;
    record.overtime_normal = Decimal::ZERO;
    record.overtime_premium = Decimal::ZERO;
    record.column_hours.clear();
    record.add_column_hours(&config.special_columns.earned_rest, record.worked_hours);
    record.earned_rest = Some(grant_info(grant, record));
}

fn grant_info(grant: &EarnedRestGrant, record: &DailyAttendanceRecord) -> EarnedRestInfo {
    EarnedRestInfo {
        rule_name: grant.rule_name.clone(),
        range_start: grant.range_start,
        range_end: grant.range_end,
        effective_date: record.date,
    }
}
