//! Earned-rest grant model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A rest day earned by working a qualifying consecutive streak.
///
/// Created by the consecutive-work engine whenever a streak crosses its
/// group's threshold; consumed exactly once by the vacation distributor.
///
/// # Example
///
/// ```
/// use attendance_engine::models::EarnedRestGrant;
/// use chrono::NaiveDate;
///
/// let grant = EarnedRestGrant {
///     target_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
///     range_start: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     range_end: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
///     rule_name: "day-shift".to_string(),
///     streak_length: 6,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnedRestGrant {
    /// The rest date the grant targets.
    pub target_date: NaiveDate,
    /// First day of the consecutive-work range that earned the grant.
    pub range_start: NaiveDate,
    /// Last day of the consecutive-work range that earned the grant.
    pub range_end: NaiveDate,
    /// Name of the shift rule group whose threshold was crossed.
    pub rule_name: String,
    /// The streak length required by the rule.
    pub streak_length: u32,
}
