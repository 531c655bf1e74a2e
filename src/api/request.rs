//! Request types for the Attendance Engine API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! attendance and payroll endpoints.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::PayrollPeriod;

/// Request body for `POST /attendance/clock-in`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockInRequest {
    /// The employee clocking in.
    pub employee_id: String,
    /// Company whose policy applies. Defaults to the employee's own company.
    #[serde(default)]
    pub company_id: Option<String>,
    /// When the event happened. Defaults to the server clock.
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

/// Request body for `POST /attendance/clock-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockOutRequest {
    /// The employee clocking out.
    pub employee_id: String,
    /// When the event happened. Defaults to the server clock.
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

/// Request body for `POST /attendance/mark-absent` and
/// `POST /attendance/mark-on-leave`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkRequest {
    /// The employee being marked.
    pub employee_id: String,
    /// The day being marked.
    pub date: NaiveDate,
}

/// Query string for `GET /attendance/{employee_id}`.
///
/// A missing bound defaults to the edge of the current month.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RangeQuery {
    /// First day (inclusive).
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Last day (inclusive).
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// Query string for `GET /attendance/{employee_id}/reminder`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderQuery {
    /// Instant to evaluate at. Defaults to the server clock.
    #[serde(default)]
    pub at: Option<NaiveDateTime>,
}

/// Query string for the payroll endpoints.
///
/// Either `period=YYYY-MM` or an explicit `from`/`to` range; when neither is
/// given the month containing the server clock's date is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayrollQuery {
    /// Month in `YYYY-MM` form.
    #[serde(default)]
    pub period: Option<String>,
    /// Explicit range start.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Explicit range end.
    #[serde(default)]
    pub to: Option<NaiveDate>,
    /// Company whose penalty policy applies. Defaults to the employee's own.
    #[serde(default)]
    pub company_id: Option<String>,
}

impl PayrollQuery {
    /// Resolves the query into a payroll period, using `today` as the
    /// fallback month.
    pub fn resolve_period(&self, today: NaiveDate) -> EngineResult<PayrollPeriod> {
        match (&self.period, self.from, self.to) {
            (Some(month), _, _) => PayrollPeriod::parse_month(month),
            (None, Some(from), Some(to)) => PayrollPeriod::new(from, to),
            (None, Some(_), None) | (None, None, Some(_)) => Err(EngineError::validation(
                "period",
                "both from and to are required",
            )),
            (None, None, None) => PayrollPeriod::month(today.year(), today.month()),
        }
    }
}
