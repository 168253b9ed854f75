//! File-backed snapshot store for cross-period state.
//!
//! Each company gets a directory under the store root; each period persists
//! two JSON documents, the processed records and the trailing carry-over
//! snapshot. Reads degrade gracefully: a missing file is an empty period, a
//! corrupt file is logged and treated as empty. Only writes fail hard,
//! because losing a snapshot silently would corrupt next month's streaks.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::calculation::PriorPeriod;
use crate::error::{EngineError, EngineResult};
use crate::models::{CarryOverState, DailyAttendanceRecord};

/// Personnel codes and names that mark template filler rows, not people.
const PLACEHOLDER_CODES: &[&str] = &["", "0", "-", "--", "toplam", "total"];

/// Returns the period immediately before `(year, month)`.
pub fn previous_period(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// A directory-backed store for per-period snapshots.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::state::SnapshotStore;
///
/// let store = SnapshotStore::new("/var/lib/attendance");
/// let prior = store.load_prior_period("acme", 2025, 3);
/// println!("{} prior records", prior.records.len());
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    /// Creates a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn records_path(&self, company_id: &str, year: i32, month: u32) -> PathBuf {
        self.root
            .join(company_id)
            .join(format!("{year}-{month:02}.records.json"))
    }

    fn carry_over_path(&self, company_id: &str, year: i32, month: u32) -> PathBuf {
        self.root
            .join(company_id)
            .join(format!("{year}-{month:02}.carry_over.json"))
    }

    /// Loads the previous period's records and carry-over snapshot for
    /// seeding a run on `(year, month)`.
    pub fn load_prior_period(&self, company_id: &str, year: i32, month: u32) -> PriorPeriod {
        let (prior_year, prior_month) = previous_period(year, month);
        PriorPeriod {
            records: self.load_records(company_id, prior_year, prior_month),
            carry_over: self.load_carry_over(company_id, prior_year, prior_month),
        }
    }

    /// Loads one period's persisted records. Placeholder filler rows are
    /// dropped on the way in.
    pub fn load_records(
        &self,
        company_id: &str,
        year: i32,
        month: u32,
    ) -> Vec<DailyAttendanceRecord> {
        let records: Vec<DailyAttendanceRecord> =
            read_json(&self.records_path(company_id, year, month));
        records
            .into_iter()
            .filter(|r| !is_placeholder(&r.personnel_code) && !is_placeholder(&r.personnel_name))
            .collect()
    }

    /// Loads one period's carry-over snapshot.
    pub fn load_carry_over(
        &self,
        company_id: &str,
        year: i32,
        month: u32,
    ) -> Vec<CarryOverState> {
        read_json(&self.carry_over_path(company_id, year, month))
    }

    /// Persists a completed period, replacing any previous snapshot for it.
    pub fn save_period(
        &self,
        company_id: &str,
        year: i32,
        month: u32,
        records: &[DailyAttendanceRecord],
        carry_over: &[CarryOverState],
    ) -> EngineResult<()> {
        write_json(&self.records_path(company_id, year, month), records)?;
        write_json(&self.carry_over_path(company_id, year, month), carry_over)?;
        Ok(())
    }
}

fn is_placeholder(code: &str) -> bool {
    let trimmed = code.trim().to_lowercase();
    PLACEHOLDER_CODES.contains(&trimmed.as_str())
}

fn read_json<T: serde::de::DeserializeOwned + Default>(path: &Path) -> T {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return T::default(),
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "discarding corrupt snapshot");
            T::default()
        }
    }
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> EngineResult<()> {
    let as_error = |message: String| EngineError::SnapshotWriteError {
        path: path.display().to_string(),
        message,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| as_error(e.to_string()))?;
    }
    let body = serde_json::to_string_pretty(value).map_err(|e| as_error(e.to_string()))?;
    fs::write(path, body).map_err(|e| as_error(e.to_string()))
}
