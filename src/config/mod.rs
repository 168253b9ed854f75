//! Company and shift-rule configuration.
//!
//! This module provides the configuration graph consumed by the engine and
//! the [`ConfigLoader`] that reads it from YAML.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CompanyConfig, EmploymentWindow, GridOptions, HolidayOverrideEntry, HolidayOverrides,
    OutputColumn, OvertimeRule, OvertimeRuleKind, PREMIUM_RATE, ShiftRuleGroup, SpecialColumns,
    WILDCARD_PATTERN,
};
