//! HTTP request handlers for the Attendance Engine API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! handler tags its log lines with a fresh correlation id and turns engine
//! errors into [`ApiErrorResponse`] bodies.

use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Datelike;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AttendanceRecord, PayrollPeriod, PolicyUpdate};

use super::request::{
    ClockInRequest, ClockOutRequest, MarkRequest, PayrollQuery, RangeQuery, ReminderQuery,
};
use super::response::{ApiError, ApiErrorResponse, RecordsResponse, ReminderResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/clock-in", post(clock_in_handler))
        .route("/attendance/clock-out", post(clock_out_handler))
        .route("/attendance/mark-absent", post(mark_absent_handler))
        .route("/attendance/mark-on-leave", post(mark_on_leave_handler))
        .route("/attendance/:employee_id", get(records_handler))
        .route("/attendance/:employee_id/reminder", get(reminder_handler))
        .route("/payroll", get(payroll_run_handler))
        .route("/payroll/:employee_id", get(payroll_handler))
        .route("/policy", get(list_policies_handler))
        .route(
            "/policy/:company_id",
            get(get_policy_handler).put(put_policy_handler),
        )
        .with_state(state)
}

/// Unwraps a JSON body, mapping extractor rejections to 400 responses.
fn json_body<T>(correlation_id: Uuid, payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Unwraps a query string, mapping extractor rejections to 400 responses.
fn query_params<T>(
    correlation_id: Uuid,
    query: Result<Query<T>, QueryRejection>,
) -> ApiResult<T> {
    query.map(|Query(params)| params).map_err(|rejection| {
        let body_text = rejection.body_text();
        warn!(correlation_id = %correlation_id, error = %body_text, "Query string rejected");
        ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
    })
}

/// Logs an engine failure and converts it into a response.
fn engine_failure(correlation_id: Uuid, operation: &str, err: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        operation,
        kind = ?err.kind(),
        error = %err,
        "Request failed"
    );
    err.into()
}

/// Handler for POST /attendance/clock-in.
///
/// Returns 201 with the created record.
async fn clock_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockInRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing clock-in request");

    let request = json_body(correlation_id, payload)?;
    let engine = state.engine();
    let now = request.timestamp.unwrap_or_else(|| engine.now());

    let record = engine
        .clock_in(&request.employee_id, request.company_id.as_deref(), now)
        .map_err(|e| engine_failure(correlation_id, "clock_in", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %record.employee_id,
        status = %record.status,
        "Clock-in accepted"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for POST /attendance/clock-out.
async fn clock_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockOutRequest>, JsonRejection>,
) -> ApiResult<Json<AttendanceRecord>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing clock-out request");

    let request = json_body(correlation_id, payload)?;
    let engine = state.engine();
    let now = request.timestamp.unwrap_or_else(|| engine.now());

    let record = engine
        .clock_out(&request.employee_id, now)
        .map_err(|e| engine_failure(correlation_id, "clock_out", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %record.employee_id,
        "Clock-out accepted"
    );
    Ok(Json(record))
}

/// Handler for POST /attendance/mark-absent.
async fn mark_absent_handler(
    State(state): State<AppState>,
    payload: Result<Json<MarkRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;

    let record = state
        .engine()
        .mark_absent(&request.employee_id, request.date)
        .map_err(|e| engine_failure(correlation_id, "mark_absent", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %record.employee_id,
        date = %record.date,
        "Marked absent"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for POST /attendance/mark-on-leave.
async fn mark_on_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<MarkRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;

    let record = state
        .engine()
        .mark_on_leave(&request.employee_id, request.date)
        .map_err(|e| engine_failure(correlation_id, "mark_on_leave", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %record.employee_id,
        date = %record.date,
        "Marked on leave"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for GET /attendance/{employee_id}.
///
/// Missing bounds default to the first and last day of the current month.
async fn records_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> ApiResult<Json<RecordsResponse>> {
    let correlation_id = Uuid::new_v4();
    let query = query_params(correlation_id, query)?;
    let engine = state.engine();

    let today = engine.now().date();
    let month = PayrollPeriod::month(today.year(), today.month())
        .map_err(|e| engine_failure(correlation_id, "records", e))?;
    let from = query.from.unwrap_or(month.start_date);
    let to = query.to.unwrap_or(month.end_date);

    engine
        .employee(&employee_id)
        .map_err(|e| engine_failure(correlation_id, "records", e))?;
    let records = engine
        .records_between(&employee_id, from, to)
        .map_err(|e| engine_failure(correlation_id, "records", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        count = records.len(),
        "Records listed"
    );
    Ok(Json(RecordsResponse {
        employee_id,
        from,
        to,
        records,
    }))
}

/// Handler for GET /attendance/{employee_id}/reminder.
async fn reminder_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<ReminderQuery>, QueryRejection>,
) -> ApiResult<Json<ReminderResponse>> {
    let correlation_id = Uuid::new_v4();
    let query = query_params(correlation_id, query)?;
    let engine = state.engine();
    let at = query.at.unwrap_or_else(|| engine.now());

    let (state, reminder) = engine
        .reminder_status(&employee_id, at)
        .map_err(|e| engine_failure(correlation_id, "reminder", e))?;

    Ok(Json(ReminderResponse {
        employee_id,
        at,
        state,
        reminder,
    }))
}

/// Handler for GET /payroll/{employee_id}.
async fn payroll_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<PayrollQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Processing payroll request");

    let query = query_params(correlation_id, query)?;
    let engine = state.engine();
    let period = query
        .resolve_period(engine.now().date())
        .map_err(|e| engine_failure(correlation_id, "payroll", e))?;

    let start_time = Instant::now();
    let line = engine
        .compute_month(&employee_id, query.company_id.as_deref(), period)
        .map_err(|e| engine_failure(correlation_id, "payroll", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        net_pay = %line.net_pay,
        duration_us = start_time.elapsed().as_micros(),
        "Payroll computed"
    );
    Ok(Json(line))
}

/// Handler for GET /payroll.
///
/// Computes a line for every employee on the roster.
async fn payroll_run_handler(
    State(state): State<AppState>,
    query: Result<Query<PayrollQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let query = query_params(correlation_id, query)?;
    let engine = state.engine();
    let period = query
        .resolve_period(engine.now().date())
        .map_err(|e| engine_failure(correlation_id, "payroll_run", e))?;

    let start_time = Instant::now();
    let lines = engine
        .payroll_run(period)
        .map_err(|e| engine_failure(correlation_id, "payroll_run", e))?;

    info!(
        correlation_id = %correlation_id,
        period = %period.label(),
        employees = lines.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Payroll run completed"
    );
    Ok(Json(lines))
}

/// Handler for GET /policy.
async fn list_policies_handler(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let policies = state
        .engine()
        .policies()
        .map_err(|e| engine_failure(correlation_id, "list_policies", e))?;
    Ok(Json(policies))
}

/// Handler for GET /policy/{company_id}.
async fn get_policy_handler(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let policy = state
        .engine()
        .policy(&company_id)
        .map_err(|e| engine_failure(correlation_id, "get_policy", e))?;
    Ok(Json(policy))
}

/// Handler for PUT /policy/{company_id}.
///
/// Fields omitted from the body keep their current value.
async fn put_policy_handler(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    payload: Result<Json<PolicyUpdate>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, company_id = %company_id, "Processing policy update");

    let update = json_body(correlation_id, payload)?;
    let policy = state
        .engine()
        .upsert_policy(&company_id, &update)
        .map_err(|e| engine_failure(correlation_id, "put_policy", e))?;
    Ok(Json(policy))
}
