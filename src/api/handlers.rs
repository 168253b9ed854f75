//! HTTP request handlers for the Attendance Interpretation Engine API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{CalendarHoliday, process_period};
use crate::models::DailyAttendanceRecord;

use super::request::ProcessRequest;
use super::response::{ApiError, ApiErrorResponse, ProcessResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/process", post(process_handler))
        .with_state(state)
}

/// Handler for the POST /process endpoint.
///
/// Accepts one period's raw attendance data, runs the full pipeline and
/// persists the period's snapshots on success.
async fn process_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance period request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {err}"))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let config = state.config().config();
    if request.year != config.year || request.month != config.month {
        warn!(
            correlation_id = %correlation_id,
            requested_year = request.year,
            requested_month = request.month,
            "Request period does not match configuration"
        );
        return (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, "application/json")],
            Json(ApiError::period_mismatch(request.year, request.month)),
        )
            .into_response();
    }

    let calendar: Vec<CalendarHoliday> =
        request.holidays.into_iter().map(Into::into).collect();
    let records: Vec<DailyAttendanceRecord> =
        request.records.into_iter().map(Into::into).collect();

    let prior = config
        .carry_over_enabled
        .then(|| state.store().load_prior_period(&config.company_id, config.year, config.month));

    let start_time = Instant::now();
    let outcome = process_period(config, records, &calendar, prior.as_ref());

    if let Err(err) = state.store().save_period(
        &config.company_id,
        config.year,
        config.month,
        &outcome.records,
        &outcome.carry_over,
    ) {
        warn!(correlation_id = %correlation_id, error = %err, "Failed to persist period");
        let api_error: ApiErrorResponse = err.into();
        return (
            api_error.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(api_error.error),
        )
            .into_response();
    }

    let duration = start_time.elapsed();
    info!(
        correlation_id = %correlation_id,
        summaries = outcome.summaries.len(),
        warnings = outcome.warnings.len(),
        duration_us = duration.as_micros(),
        "Period processed successfully"
    );

    let response = ProcessResponse {
        run_id: correlation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        year: config.year,
        month: config.month,
        summaries: outcome.summaries,
        records: outcome.records,
        carry_over: outcome.carry_over,
        warnings: outcome.warnings,
        duration_us: duration.as_micros() as u64,
    };
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}
