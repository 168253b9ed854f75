//! Integration tests for the Attendance Interpretation Engine.
//!
//! This suite drives the HTTP surface end to end, covering:
//! - Tiered overtime allocation (bucket and threshold strategies)
//! - Official-holiday premium routing, full and half day
//! - Consecutive-work streaks and earned-rest placement
//! - Carry-over seeding across a month boundary
//! - Absenteeism aggregation and employment windows
//! - Warning degradation and error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;
use attendance_engine::models::{CarryOverState, DailyAttendanceRecord};
use attendance_engine::state::SnapshotStore;

// =============================================================================
// Test Helpers
// =============================================================================

const COMPANY_YAML: &str = r#"
company_id: acme
company_name: Acme Textiles
year: 2025
month: 3
shift_groups:
  - name: day-shift
    patterns: ["0800-1800", "8/18"]
    standard_hours: "7.5"
    break_hours: "1.0"
    shift_duration: "9.0"
    consecutive_days_for_vacation: 6
    vacation_days: 1
    overtime_rules:
      - rate: "1.0"
        column: FM-Normal
        kind: bucket
        hours: "1.5"
      - rate: "1.5"
        column: FM-50
        kind: catch_all
  - name: night-shift
    patterns: ["2000-0600"]
    standard_hours: "7.5"
    break_hours: "1.0"
    shift_duration: "9.0"
    consecutive_days_for_vacation: 6
    vacation_days: 1
    overtime_rules:
      - rate: "1.0"
        column: FM-Normal
        kind: threshold
      - rate: "1.5"
        column: FM-50
        kind: threshold
output_columns:
  - name: FM-Normal
    sheet_letter: K
  - name: FM-50
    sheet_letter: L
  - name: FM-Rest
    sheet_letter: M
  - name: FM-Holiday
    sheet_letter: N
special_columns:
  earned_rest: FM-Rest
  holiday_work: FM-Holiday
employment_windows:
  "9001":
    entry_day: 15
carry_over_enabled: true
"#;

fn write_config(dir: &std::path::Path) {
    std::fs::write(dir.join("company.yaml"), COMPANY_YAML).unwrap();
}

fn create_test_state(dir: &std::path::Path) -> AppState {
    write_config(dir);
    let config = ConfigLoader::load(dir).expect("Failed to load config");
    AppState::new(config, SnapshotStore::new(dir.join("state")))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Normalize a decimal string by removing trailing zeros.
fn normalize_decimal(s: &str) -> String {
    decimal(s).normalize().to_string()
}

fn assert_decimal_field(value: &Value, expected: &str) {
    let actual = value.as_str().unwrap_or_else(|| panic!("not a string: {value}"));
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {expected}, got {actual}"
    );
}

async fn post_process(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn create_request(holidays: Vec<Value>, records: Vec<Value>) -> Value {
    json!({
        "year": 2025,
        "month": 3,
        "holidays": holidays,
        "records": records
    })
}

fn clock_record(code: &str, date: &str, label: &str, check_in: &str, check_out: &str) -> Value {
    json!({
        "personnel_code": code,
        "personnel_name": "A. Demir",
        "date": date,
        "shift_label": label,
        "check_in": check_in,
        "check_out": check_out
    })
}

fn rest_record(code: &str, date: &str) -> Value {
    json!({
        "personnel_code": code,
        "personnel_name": "A. Demir",
        "date": date
    })
}

fn record_on(result: &Value, date: &str) -> Value {
    result["records"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["date"] == date)
        .unwrap_or_else(|| panic!("no record on {date}"))
        .clone()
}

// =============================================================================
// Overtime allocation
// =============================================================================

#[tokio::test]
async fn test_bucket_overtime_day() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(create_test_state(dir.path()));

    // 08:00-19:00 gross 11h, minus 1h break = 10h worked, 2.5h overtime.
    let request = create_request(
        vec![],
        vec![clock_record("1042", "2025-03-10", "8/18", "08:00:00", "19:00:00")],
    );
    let (status, result) = post_process(router, request).await;

    assert_eq!(status, StatusCode::OK);
    let record = record_on(&result, "2025-03-10");
    assert_decimal_field(&record["worked_hours"], "10.0");
    assert_decimal_field(&record["column_hours"]["FM-Normal"], "1.5");
    assert_decimal_field(&record["column_hours"]["FM-50"], "1.0");
    assert_decimal_field(&record["overtime_normal"], "1.5");
    assert_decimal_field(&record["overtime_premium"], "1.0");
}

#[tokio::test]
async fn test_threshold_overtime_split_at_shift_duration() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(create_test_state(dir.path()));

    // Night shift 20:00-08:00 = 12h gross, 11h worked. Overtime is 3.5h:
    // 1.5h up to the 9h shift duration is normal, 2h beyond is premium.
    let request = create_request(
        vec![],
        vec![clock_record("1042", "2025-03-10", "2000-0600", "20:00:00", "08:00:00")],
    );
    let (status, result) = post_process(router, request).await;

    assert_eq!(status, StatusCode::OK);
    let record = record_on(&result, "2025-03-10");
    assert_eq!(record["shift_group"], "night-shift");
    assert_decimal_field(&record["overtime_normal"], "1.5");
    assert_decimal_field(&record["overtime_premium"], "2.0");
    assert_decimal_field(&record["column_hours"]["FM-Normal"], "1.5");
    assert_decimal_field(&record["column_hours"]["FM-50"], "2.0");
}

#[tokio::test]
async fn test_short_day_accrues_absent_hours() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(create_test_state(dir.path()));

    // 08:00-14:00 gross 6h, worked 5h, standard 7.5h -> 2.5h shortfall.
    let request = create_request(
        vec![],
        vec![clock_record("1042", "2025-03-10", "8/18", "08:00:00", "14:00:00")],
    );
    let (_, result) = post_process(router, request).await;

    let record = record_on(&result, "2025-03-10");
    assert_decimal_field(&record["absent_hours"], "2.5");
    assert_decimal_field(&result["summaries"][0]["absent_hours"], "2.5");
}

// =============================================================================
// Official holidays
// =============================================================================

#[tokio::test]
async fn test_holiday_work_routes_to_holiday_column() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(create_test_state(dir.path()));

    let request = create_request(
        vec![json!({ "date": "2025-03-30", "name": "Feast Day 1" })],
        vec![clock_record("1042", "2025-03-30", "8/18", "08:00:00", "19:00:00")],
    );
    let (_, result) = post_process(router, request).await;

    let record = record_on(&result, "2025-03-30");
    assert_eq!(record["worked_on_official_holiday"], true);
    assert_eq!(record["holiday_name"], "Feast Day 1");
    // min(10h worked, 7.5h standard) lands in the holiday column, and the
    // day earns no ordinary overtime.
    assert_decimal_field(&record["column_hours"]["FM-Holiday"], "7.5");
    assert_decimal_field(&record["overtime_normal"], "0");
    assert!(record["column_hours"].get("FM-Normal").is_none());
}

#[tokio::test]
async fn test_half_day_holiday_caps_at_half_standard() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(create_test_state(dir.path()));

    let request = create_request(
        vec![json!({ "date": "2025-03-29", "name": "Eve", "half_day": true })],
        vec![clock_record("1042", "2025-03-29", "8/18", "08:00:00", "19:00:00")],
    );
    let (_, result) = post_process(router, request).await;

    let record = record_on(&result, "2025-03-29");
    assert_eq!(record["half_day_holiday"], true);
    assert_decimal_field(&record["column_hours"]["FM-Holiday"], "3.75");
}

// =============================================================================
// Streaks and earned rest
// =============================================================================

#[tokio::test]
async fn test_six_day_streak_earns_vacation_on_rest_day() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(create_test_state(dir.path()));

    let mut records: Vec<Value> = (3..=8)
        .map(|d| clock_record("1042", &format!("2025-03-{d:02}"), "8/18", "08:00:00", "19:00:00"))
        .collect();
    records.push(rest_record("1042", "2025-03-09"));

    let (_, result) = post_process(router, create_request(vec![], records)).await;

    let summary = &result["summaries"][0];
    assert_eq!(summary["max_streak"], 6);
    assert_eq!(summary["vacation_days"], 1);
    assert_eq!(summary["worked_days"], 6);

    let rest = record_on(&result, "2025-03-09");
    assert_decimal_field(&rest["vacation_days"], "1");
    assert_eq!(rest["earned_rest"]["rule_name"], "day-shift");
    assert_eq!(rest["earned_rest"]["range_start"], "2025-03-03");
    assert_eq!(rest["earned_rest"]["range_end"], "2025-03-08");
}

#[tokio::test]
async fn test_working_through_earned_rest_reroutes_hours() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(create_test_state(dir.path()));

    // Seven straight work days: the grant for day seven finds the person
    // working and reroutes the whole day into the earned-rest column.
    let records: Vec<Value> = (3..=9)
        .map(|d| clock_record("1042", &format!("2025-03-{d:02}"), "8/18", "08:00:00", "19:00:00"))
        .collect();

    let (_, result) = post_process(router, create_request(vec![], records)).await;

    let day9 = record_on(&result, "2025-03-09");
    assert_eq!(day9["worked_on_earned_rest"], true);
    assert_decimal_field(&day9["column_hours"]["FM-Rest"], "10.0");
    assert_decimal_field(&day9["overtime_normal"], "0");
    assert_decimal_field(&day9["overtime_premium"], "0");
    assert!(day9["column_hours"].get("FM-Normal").is_none());
}

#[tokio::test]
async fn test_month_end_grant_falls_back_to_last_work_day() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(create_test_state(dir.path()));

    // The streak completes on the last day of the month, so the grant's
    // target date falls outside the period and the last work day absorbs it.
    let records: Vec<Value> = (26..=31)
        .map(|d| clock_record("1042", &format!("2025-03-{d}"), "8/18", "08:00:00", "19:00:00"))
        .collect();

    let (_, result) = post_process(router, create_request(vec![], records)).await;

    let day31 = record_on(&result, "2025-03-31");
    assert_eq!(day31["worked_on_earned_rest"], true);
    assert_eq!(result["warnings"].as_array().unwrap().len(), 0);
}

// =============================================================================
// Carry-over across the month boundary
// =============================================================================

#[tokio::test]
async fn test_carry_over_seeds_from_prior_period() {
    let dir = tempfile::tempdir().unwrap();
    let state = create_test_state(dir.path());

    // Persist February by hand: a four-day trailing run ending on the 28th.
    let store = SnapshotStore::new(dir.path().join("state"));
    let feb_records: Vec<DailyAttendanceRecord> = (25..=28)
        .map(|d| {
            let mut record = DailyAttendanceRecord::new(
                "1042",
                "A. Demir",
                NaiveDate::from_ymd_opt(2025, 2, d).unwrap(),
            );
            record.worked_hours = decimal("10.0");
            record.shift_group = Some("day-shift".to_string());
            record
        })
        .collect();
    let feb_state = CarryOverState {
        personnel_code: "1042".to_string(),
        personnel_name: "A. Demir".to_string(),
        last_shift_group: Some("day-shift".to_string()),
        last_work_date: NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
        streak_length: 4,
        last_worked_hours: decimal("10.0"),
    };
    store
        .save_period("acme", 2025, 2, &feb_records, &[feb_state])
        .unwrap();

    // March 1-2 worked: the seeded streak reaches 6 and earns a grant.
    let router = create_router(state);
    let records = vec![
        clock_record("1042", "2025-03-01", "8/18", "08:00:00", "19:00:00"),
        clock_record("1042", "2025-03-02", "8/18", "08:00:00", "19:00:00"),
        rest_record("1042", "2025-03-03"),
    ];
    let (status, result) = post_process(router, create_request(vec![], records)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["summaries"][0]["max_streak"], 6);
    let rest = record_on(&result, "2025-03-03");
    assert_decimal_field(&rest["vacation_days"], "1");

    // The new trailing state was persisted for April's run.
    let carry_over = store.load_carry_over("acme", 2025, 3);
    assert_eq!(carry_over.len(), 0); // period ended on a rest day
}

#[tokio::test]
async fn test_trailing_streak_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let state = create_test_state(dir.path());
    let router = create_router(state);

    let records = vec![
        clock_record("1042", "2025-03-30", "8/18", "08:00:00", "19:00:00"),
        clock_record("1042", "2025-03-31", "8/18", "08:00:00", "19:00:00"),
    ];
    let (_, result) = post_process(router, create_request(vec![], records)).await;

    let carry_over = result["carry_over"].as_array().unwrap();
    assert_eq!(carry_over.len(), 1);
    assert_eq!(carry_over[0]["personnel_code"], "1042");
    assert_eq!(carry_over[0]["streak_length"], 2);
    assert_eq!(carry_over[0]["last_work_date"], "2025-03-31");

    let store = SnapshotStore::new(dir.path().join("state"));
    assert_eq!(store.load_carry_over("acme", 2025, 3).len(), 1);
}

// =============================================================================
// Absenteeism and employment windows
// =============================================================================

#[tokio::test]
async fn test_absence_formula_covers_full_month() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(create_test_state(dir.path()));

    // Ten worked days in a 31-day month, no vacations -> 21 absent days.
    let records: Vec<Value> = (3..=12)
        .map(|d| clock_record("1042", &format!("2025-03-{d:02}"), "8/18", "08:00:00", "16:30:00"))
        .collect();

    let (_, result) = post_process(router, create_request(vec![], records)).await;

    let summary = &result["summaries"][0];
    assert_eq!(summary["worked_days"], 10);
    assert_eq!(summary["vacation_days"], 0);
    assert_eq!(summary["absent_days"], 21);
}

#[tokio::test]
async fn test_employment_window_limits_absence() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(create_test_state(dir.path()));

    // Personnel 9001 entered on March 15: 17 effective days.
    let records: Vec<Value> = (15..=24)
        .map(|d| clock_record("9001", &format!("2025-03-{d}"), "8/18", "08:00:00", "16:30:00"))
        .collect();

    let (_, result) = post_process(router, create_request(vec![], records)).await;

    let summary = &result["summaries"][0];
    assert_eq!(summary["worked_days"], 10);
    assert_eq!(summary["absent_days"], 7);
}

// =============================================================================
// Degradation and error cases
// =============================================================================

#[tokio::test]
async fn test_unmatched_shift_label_warns_and_unrates() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(create_test_state(dir.path()));

    let request = create_request(
        vec![],
        vec![clock_record("1042", "2025-03-10", "9/21x?", "09:00:00", "21:00:00")],
    );
    let (status, result) = post_process(router, request).await;

    assert_eq!(status, StatusCode::OK);
    let warnings = result["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "UNMATCHED_SHIFT");

    // The unrated record keeps its gross hours with no overtime.
    let record = record_on(&result, "2025-03-10");
    assert!(record["shift_group"].is_null());
    assert_decimal_field(&record["worked_hours"], "12");
    assert_decimal_field(&record["overtime_normal"], "0");
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(create_test_state(dir.path()));

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process")
                .header("Content-Type", "application/json")
                .body(Body::from("{not valid json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_period_mismatch_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(create_test_state(dir.path()));

    let body = json!({ "year": 2024, "month": 12, "records": [] });
    let (status, error) = post_process(router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "PERIOD_MISMATCH");
}

#[tokio::test]
async fn test_empty_records_is_a_valid_run() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(create_test_state(dir.path()));

    let (status, result) = post_process(router, create_request(vec![], vec![])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["summaries"].as_array().unwrap().len(), 0);
    assert_eq!(result["records"].as_array().unwrap().len(), 0);
    assert_eq!(result["year"], 2025);
    assert!(result["run_id"].is_string());
}
