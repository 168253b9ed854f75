//! Tiered overtime allocation.
//!
//! Splits the overtime portion of a worked day into rate-tiered buckets and
//! maps each bucket to a named payroll output column. Three mutually
//! exclusive strategies exist, selected by what the shift group's rules
//! encode: the newer threshold two-tier logic, fixed duration buckets with a
//! catch-all, and the legacy time-of-day window rules.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{OvertimeRule, OvertimeRuleKind, ShiftRuleGroup};

/// The result of allocating one record's overtime.
///
/// Invariant: the sum of all `column_hours` values equals
/// `normal_hours + premium_hours` equals the total overtime, for any rule
/// configuration that attributes columns (the no-rules fallback leaves
/// `column_hours` empty).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OvertimeAllocation {
    /// Overtime at the normal tier (rate < 1.5).
    pub normal_hours: Decimal,
    /// Overtime at the premium tier (rate >= 1.5).
    pub premium_hours: Decimal,
    /// Overtime attributed per output column.
    pub column_hours: BTreeMap<String, Decimal>,
}

impl OvertimeAllocation {
    /// Total overtime hours in the allocation.
    pub fn total(&self) -> Decimal {
        self.normal_hours + self.premium_hours
    }

    fn add(&mut self, rule: &OvertimeRule, hours: Decimal) {
        if hours <= Decimal::ZERO {
            return;
        }
        if rule.is_premium() {
            self.premium_hours += hours;
        } else {
            self.normal_hours += hours;
        }
        *self
            .column_hours
            .entry(rule.column.clone())
            .or_insert(Decimal::ZERO) += hours;
    }
}

/// Allocates the overtime portion of `worked_hours` under a shift group.
///
/// Returns an all-zero allocation when `worked_hours` does not exceed the
/// group's standard hours. A group with no overtime rules at all yields all
/// overtime as normal hours with no column attribution.
///
/// # Example
///
/// The canonical bucket scenario: standard 7.5h, one 1.5h bucket at 1.0x
/// into "FM-Normal", then a 1.5x catch-all into "FM-50". A 10h day carries
/// 2.5h of overtime: 1.5h lands in FM-Normal, 1.0h in FM-50.
pub fn allocate_overtime(worked_hours: Decimal, group: &ShiftRuleGroup) -> OvertimeAllocation {
    let overtime = worked_hours - group.standard_hours;
    if overtime <= Decimal::ZERO {
        return OvertimeAllocation::default();
    }

    let has_threshold = group
        .overtime_rules
        .iter()
        .any(|r| matches!(r.kind, OvertimeRuleKind::Threshold));
    let has_bucket = group.overtime_rules.iter().any(|r| {
        matches!(
            r.kind,
            OvertimeRuleKind::Bucket { .. } | OvertimeRuleKind::CatchAll
        )
    });
    let has_window = group
        .overtime_rules
        .iter()
        .any(|r| matches!(r.kind, OvertimeRuleKind::TimeWindow { .. }));

    if has_threshold {
        allocate_threshold(overtime, group)
    } else if has_bucket {
        allocate_buckets(overtime, group)
    } else if has_window {
        allocate_time_windows(overtime, group)
    } else {
        OvertimeAllocation {
            normal_hours: overtime,
            premium_hours: Decimal::ZERO,
            column_hours: BTreeMap::new(),
        }
    }
}

/// Threshold logic: overtime up to the full shift duration is normal,
/// anything beyond the duration is premium. When the duration does not
/// exceed the standard hours, all overtime is normal.
fn allocate_threshold(overtime: Decimal, group: &ShiftRuleGroup) -> OvertimeAllocation {
    let mut allocation = OvertimeAllocation::default();

    let normal_span = group.shift_duration - group.standard_hours;
    let (normal_part, premium_part) = if normal_span <= Decimal::ZERO {
        (overtime, Decimal::ZERO)
    } else {
        let normal = overtime.min(normal_span);
        (normal, overtime - normal)
    };

    if let Some(rule) = group.overtime_rules.iter().find(|r| !r.is_premium()) {
        allocation.add(rule, normal_part);
    } else {
        allocation.normal_hours += normal_part;
    }
    if premium_part > Decimal::ZERO {
        if let Some(rule) = group.overtime_rules.iter().find(|r| r.is_premium()) {
            allocation.add(rule, premium_part);
        } else {
            allocation.premium_hours += premium_part;
        }
    }

    allocation
}

/// Bucket logic: fixed-size buckets consumed in ascending duration order,
/// catch-all last; any leftover after all buckets is forced into the last
/// rule.
fn allocate_buckets(overtime: Decimal, group: &ShiftRuleGroup) -> OvertimeAllocation {
    let mut buckets: Vec<(&OvertimeRule, Option<Decimal>)> = group
        .overtime_rules
        .iter()
        .filter_map(|r| match r.kind {
            OvertimeRuleKind::Bucket { hours } => Some((r, Some(hours))),
            OvertimeRuleKind::CatchAll => Some((r, None)),
            _ => None,
        })
        .collect();
    // Catch-all sorts last, fixed buckets ascending.
    buckets.sort_by(|(_, a), (_, b)| match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    let mut allocation = OvertimeAllocation::default();
    let mut remaining = overtime;

    for (rule, size) in &buckets {
        if remaining <= Decimal::ZERO {
            break;
        }
        let take = match size {
            Some(size) => remaining.min(*size),
            None => remaining,
        };
        allocation.add(rule, take);
        remaining -= take;
    }

    // No catch-all absorbed the tail: force it into the last rule.
    if remaining > Decimal::ZERO
        && let Some((rule, _)) = buckets.last()
    {
        allocation.add(rule, remaining);
    }

    allocation
}

/// Legacy time-window logic: each rule opens a window at a literal clock
/// time; overtime is attributed to whichever window the elapsed overtime
/// hour falls into, with the earliest window anchored at the overtime start
/// point (the group's standard hours).
fn allocate_time_windows(overtime: Decimal, group: &ShiftRuleGroup) -> OvertimeAllocation {
    let mut windows: Vec<(&OvertimeRule, NaiveTime)> = group
        .overtime_rules
        .iter()
        .filter_map(|r| match r.kind {
            OvertimeRuleKind::TimeWindow { start } => Some((r, start)),
            _ => None,
        })
        .collect();
    windows.sort_by_key(|(_, start)| *start);

    let mut allocation = OvertimeAllocation::default();
    let Some(&(_, first_start)) = windows.first() else {
        return allocation;
    };

    // Offset of each window from the overtime start point, in hours.
    // A start before the first window's start crossed midnight.
    let offset_of = |start: NaiveTime| -> Decimal {
        let mut minutes = (start - first_start).num_minutes();
        if minutes < 0 {
            minutes += 24 * 60;
        }
        Decimal::new(minutes, 0) / Decimal::new(60, 0)
    };

    for (i, (rule, start)) in windows.iter().enumerate() {
        let from = offset_of(*start);
        let to = match windows.get(i + 1) {
            Some((_, next_start)) => offset_of(*next_start),
            None => overtime,
        };
        let take = overtime.min(to) - from;
        allocation.add(rule, take.max(Decimal::ZERO));
    }

    allocation
}
