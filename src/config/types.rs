//! Configuration types for the attendance engine.
//!
//! These are deserialized from the company YAML file and treated as
//! read-only input for the duration of a run.

use std::collections::HashMap;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The pattern-list sentinel matching any shift label.
pub const WILDCARD_PATTERN: &str = "*";

/// Rate multiplier at or above which overtime counts as the premium tier.
pub const PREMIUM_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// How an overtime rule consumes overtime hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OvertimeRuleKind {
    /// Newer two-tier logic: overtime up to the shift duration is normal,
    /// anything beyond is premium.
    Threshold,
    /// A fixed-size slice consumed before spilling to the next rule.
    Bucket {
        /// The number of overtime hours this bucket absorbs.
        hours: Decimal,
    },
    /// Absorbs whatever overtime the fixed buckets left over.
    CatchAll,
    /// Legacy rule anchored to a literal time-of-day start boundary.
    TimeWindow {
        /// The clock time the window opens at.
        start: NaiveTime,
    },
}

/// One overtime rule inside a shift rule group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeRule {
    /// Rate multiplier for hours allocated to this rule.
    pub rate: Decimal,
    /// The output column the allocated hours land in.
    pub column: String,
    /// How the rule consumes overtime.
    #[serde(flatten)]
    pub kind: OvertimeRuleKind,
}

impl OvertimeRule {
    /// Whether hours under this rule count as premium-tier overtime.
    pub fn is_premium(&self) -> bool {
        self.rate >= PREMIUM_RATE
    }
}

/// A named bundle of standard-hours, overtime and vacation-earning rules
/// matched by shift-label pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRuleGroup {
    /// Group name (e.g. "day-shift").
    pub name: String,
    /// Matchable normalized shift patterns; may contain the `*` wildcard.
    pub patterns: Vec<String>,
    /// Standard paid hours of the shift.
    pub standard_hours: Decimal,
    /// Paid break hours removed from gross attendance.
    #[serde(default)]
    pub break_hours: Decimal,
    /// Full shift duration from start to end.
    pub shift_duration: Decimal,
    /// Consecutive work days required to earn rest days (0 disables earning).
    #[serde(default)]
    pub consecutive_days_for_vacation: u32,
    /// Rest days granted each time the threshold is crossed.
    #[serde(default = "default_vacation_days")]
    pub vacation_days: u32,
    /// Ordered overtime rules; empty means all overtime is plain normal hours.
    #[serde(default)]
    pub overtime_rules: Vec<OvertimeRule>,
}

fn default_vacation_days() -> u32 {
    1
}

impl ShiftRuleGroup {
    /// Whether the group's pattern list contains the wildcard sentinel.
    pub fn has_wildcard(&self) -> bool {
        self.patterns.iter().any(|p| p == WILDCARD_PATTERN)
    }
}

/// A declared output column in the payroll sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputColumn {
    /// Column name (the identifier rules refer to).
    pub name: String,
    /// The output-sheet column letter, when known.
    #[serde(default)]
    pub sheet_letter: Option<String>,
}

/// Names of the special premium columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialColumns {
    /// Column receiving hours worked through an earned rest day.
    pub earned_rest: String,
    /// Column receiving hours worked on an official holiday.
    pub holiday_work: String,
    /// Column receiving weekend-work hours, when the company uses one.
    #[serde(default)]
    pub weekend_work: Option<String>,
}

/// One raw holiday-override entry.
///
/// The date is kept as a string so a malformed entry degrades into a
/// warning at lookup time instead of failing the whole config load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayOverrideEntry {
    /// Date in `YYYY-MM-DD` form.
    pub date: String,
    /// Per-date half-day override.
    #[serde(default)]
    pub half_day: Option<bool>,
}

/// Company override restricting which calendar dates count as holidays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayOverrides {
    /// The payroll year the override applies to.
    pub year: i32,
    /// The active holiday dates; an empty list empties the holiday map.
    pub dates: Vec<HolidayOverrideEntry>,
}

/// Entry/exit day overrides bounding a person's effective employment window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentWindow {
    /// First employed day of the month, when the person entered mid-month.
    #[serde(default)]
    pub entry_day: Option<u32>,
    /// Last employed day of the month, when the person exited mid-month.
    #[serde(default)]
    pub exit_day: Option<u32>,
}

/// Behaviour flags for grid/horizontal-template input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridOptions {
    /// Whether vacations arrive pre-marked in the template. When set, the
    /// consecutive-streak engine is skipped for the whole run.
    #[serde(default)]
    pub vacations_premarked: bool,
    /// Grid symbol meaning "worked on an official holiday".
    #[serde(default)]
    pub worked_holiday_symbol: Option<String>,
    /// Grid symbol meaning "rested on an official holiday".
    #[serde(default)]
    pub rested_holiday_symbol: Option<String>,
    /// Shift group applied to grid records that carry no shift label.
    #[serde(default)]
    pub forced_shift_group: Option<String>,
    /// Streak-threshold override for grid input lacking shift labels.
    #[serde(default)]
    pub streak_threshold_override: Option<u32>,
}

/// The complete per-company rule configuration for one payroll period.
///
/// Supplied by the caller and treated as read-only for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyConfig {
    /// Company identifier used for snapshot paths.
    pub company_id: String,
    /// Company display name.
    pub company_name: String,
    /// Payroll year.
    pub year: i32,
    /// Payroll month (1-12).
    pub month: u32,
    /// Ordered shift rule groups; earlier groups match first.
    pub shift_groups: Vec<ShiftRuleGroup>,
    /// Alternate mapping from normalized shift label to group name.
    #[serde(default)]
    pub shift_aliases: HashMap<String, String>,
    /// Declared output columns; every referenced column must appear here.
    pub output_columns: Vec<OutputColumn>,
    /// Special premium column names.
    pub special_columns: SpecialColumns,
    /// Optional holiday-date override for the payroll year.
    #[serde(default)]
    pub holiday_overrides: Option<HolidayOverrides>,
    /// Per-person entry/exit day overrides, keyed by personnel code.
    #[serde(default)]
    pub employment_windows: HashMap<String, EmploymentWindow>,
    /// Grid/horizontal-template behaviour flags.
    #[serde(default)]
    pub grid: GridOptions,
    /// Whether consecutive-work streaks carry over the month boundary.
    #[serde(default)]
    pub carry_over_enabled: bool,
}

impl CompanyConfig {
    /// Looks up a shift group by name.
    pub fn group(&self, name: &str) -> Option<&ShiftRuleGroup> {
        self.shift_groups.iter().find(|g| g.name == name)
    }

    /// The group applied to grid records without shift labels: the forced
    /// override when configured, otherwise the first configured group.
    pub fn grid_group(&self) -> Option<&ShiftRuleGroup> {
        match &self.grid.forced_shift_group {
            Some(name) => self.group(name),
            None => self.shift_groups.first(),
        }
    }

    /// The consecutive-day threshold effective for a group. The grid
    /// override applies only to unlabeled (grid-style) records; labeled
    /// input always uses the group's own threshold.
    pub fn streak_threshold(&self, group: &ShiftRuleGroup, labeled: bool) -> u32 {
        if labeled {
            group.consecutive_days_for_vacation
        } else {
            self.grid
                .streak_threshold_override
                .unwrap_or(group.consecutive_days_for_vacation)
        }
    }

    /// Whether a column name is declared.
    pub fn is_declared_column(&self, name: &str) -> bool {
        self.output_columns.iter().any(|c| c.name == name)
    }
}
