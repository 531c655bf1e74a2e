//! Late arrival detection.
//!
//! This module decides whether a clock-in is on time or late against a
//! company's work start and grace period.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceStatus, CompanyPolicy};

/// The outcome of evaluating a clock-in instant against a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalEvaluation {
    /// `Present` or `Late`.
    pub status: AttendanceStatus,
    /// The latest on-time instant for the day.
    pub late_limit: NaiveDateTime,
    /// Whole minutes past the limit, rounded up. Zero when on time.
    pub minutes_late: u32,
}

/// Evaluates a clock-in at `now` against `policy`.
///
/// The limit is `work_start + grace_period_minutes` on the day of `now`.
/// Arriving exactly at the limit is on time; any instant strictly after it
/// is late.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::evaluate_arrival;
/// use attendance_engine::models::{AttendanceStatus, CompanyPolicy};
/// use chrono::NaiveDate;
///
/// let policy = CompanyPolicy::default_for("acme"); // 08:00, 15 min grace
/// let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
///
/// let on_time = evaluate_arrival(&policy, day.and_hms_opt(8, 14, 0).unwrap());
/// assert_eq!(on_time.status, AttendanceStatus::Present);
///
/// let late = evaluate_arrival(&policy, day.and_hms_opt(8, 16, 0).unwrap());
/// assert_eq!(late.status, AttendanceStatus::Late);
/// assert_eq!(late.minutes_late, 1);
/// ```
pub fn evaluate_arrival(policy: &CompanyPolicy, now: NaiveDateTime) -> ArrivalEvaluation {
    let late_limit = policy.late_limit(now.date());

    if now > late_limit {
        let late_by = now - late_limit;
        let mut whole_minutes = late_by.num_minutes();
        if late_by > Duration::minutes(whole_minutes) {
            whole_minutes += 1;
        }
        let minutes_late = u32::try_from(whole_minutes).unwrap_or(u32::MAX);
        ArrivalEvaluation {
            status: AttendanceStatus::Late,
            late_limit,
            minutes_late,
        }
    } else {
        ArrivalEvaluation {
            status: AttendanceStatus::Present,
            late_limit,
            minutes_late: 0,
        }
    }
}
