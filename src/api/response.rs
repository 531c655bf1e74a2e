//! Response types for the Attendance Engine API.
//!
//! This module defines the error body shared by every endpoint, the mapping
//! from [`EngineError`] to HTTP status codes, and the envelope types for the
//! read endpoints.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{AttendanceRecord, DayState, Reminder};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::Validation { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details("VALIDATION_ERROR", message, format!("field: {field}")),
            },
            EngineError::AlreadyClockedIn { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("ALREADY_CLOCKED_IN", message),
            },
            EngineError::NoOpenSession { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("NO_OPEN_SESSION", message),
            },
            EngineError::DuplicateDayRecord { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("DUPLICATE_DAY_RECORD", message),
            },
            EngineError::UnknownEmployee { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("UNKNOWN_EMPLOYEE", message),
            },
            EngineError::PolicyResolution { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("POLICY_NOT_RESOLVED", message),
            },
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::Storage { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORAGE_ERROR", "Storage failure", message),
            },
        }
    }
}

/// Body of `GET /attendance/{employee_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsResponse {
    /// The employee the records belong to.
    pub employee_id: String,
    /// First day of the range (inclusive).
    pub from: NaiveDate,
    /// Last day of the range (inclusive).
    pub to: NaiveDate,
    /// Records ordered by date.
    pub records: Vec<AttendanceRecord>,
}

/// Body of `GET /attendance/{employee_id}/reminder`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderResponse {
    /// The employee the reminder is for.
    pub employee_id: String,
    /// The instant the reminder was evaluated at.
    pub at: NaiveDateTime,
    /// Where the employee stands on that day.
    pub state: DayState,
    /// The reminder to show, if any.
    pub reminder: Option<Reminder>,
}
