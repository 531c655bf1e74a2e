//! HTTP API module for the Attendance Engine.
//!
//! This module provides the REST API endpoints for recording attendance,
//! querying reminders and payroll, and administering company policies.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ClockInRequest, ClockOutRequest, MarkRequest, PayrollQuery, RangeQuery, ReminderQuery,
};
pub use response::{ApiError, ApiErrorResponse, RecordsResponse, ReminderResponse};
pub use state::AppState;
