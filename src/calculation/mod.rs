//! Calculation logic for the Attendance Interpretation Engine.
//!
//! This module contains all the pipeline stages: shift-label normalization
//! and rule-group resolution, holiday lookup, tiered overtime allocation,
//! per-day record processing, consecutive-work streak tracking with
//! cross-period carry-over, earned-rest distribution and the monthly
//! summary aggregation, plus the orchestrating pipeline itself.

mod daily;
mod holiday;
mod overtime;
mod pipeline;
mod shift_matcher;
mod streak;
mod summary;
mod vacation;

pub use daily::{is_weekend, process_daily_record};
pub use holiday::{CalendarHoliday, HolidayInfo, holidays_for};
pub use overtime::{OvertimeAllocation, allocate_overtime};
pub use pipeline::{PeriodOutcome, PriorPeriod, process_period};
pub use shift_matcher::{normalize_shift_label, resolve_shift_group};
pub use streak::{StreakOutcome, track_consecutive_work, trailing_run};
pub use summary::summarize_person;
pub use vacation::distribute_grants;
