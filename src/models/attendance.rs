//! Attendance record model.
//!
//! One [`AttendanceRecord`] exists per employee per calendar day. A record
//! is created either by a clock-in event or by an administrative mark, and
//! the only mutation ever applied to it is setting the checkout timestamp.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Attendance outcome for a day.
///
/// `Present` and `Late` come from clock-in events. `Absent` and `OnLeave`
/// are only ever set administratively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    /// Arrived no later than the grace limit.
    Present,
    /// Arrived after the grace limit.
    Late,
    /// Marked absent.
    Absent,
    /// Marked on leave.
    OnLeave,
}

impl AttendanceStatus {
    /// Returns true for statuses that count as a day attended.
    pub fn is_attended(self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }

    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "PRESENT",
            AttendanceStatus::Late => "LATE",
            AttendanceStatus::Absent => "ABSENT",
            AttendanceStatus::OnLeave => "ON_LEAVE",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single employee-day in the attendance ledger.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AttendanceRecord, AttendanceStatus, DayState};
/// use chrono::NaiveDate;
///
/// let check_in = NaiveDate::from_ymd_opt(2026, 3, 2)
///     .unwrap()
///     .and_hms_opt(8, 5, 0)
///     .unwrap();
/// let record = AttendanceRecord::checked_in("emp_001", check_in, AttendanceStatus::Present, 0);
/// assert_eq!(record.state(), DayState::CheckedIn);
/// assert!(record.is_open());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The calendar day of the record.
    pub date: NaiveDate,
    /// Clock-in timestamp. Absent for administrative marks.
    #[serde(default)]
    pub check_in_at: Option<NaiveDateTime>,
    /// Clock-out timestamp, set at most once.
    #[serde(default)]
    pub check_out_at: Option<NaiveDateTime>,
    /// Outcome fixed at creation.
    pub status: AttendanceStatus,
    /// Minutes past the grace limit at check-in (zero when on time).
    #[serde(default)]
    pub minutes_late: u32,
}

impl AttendanceRecord {
    /// Builds a record for a clock-in event.
    pub fn checked_in(
        employee_id: impl Into<String>,
        check_in_at: NaiveDateTime,
        status: AttendanceStatus,
        minutes_late: u32,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            date: check_in_at.date(),
            check_in_at: Some(check_in_at),
            check_out_at: None,
            status,
            minutes_late,
        }
    }

    /// Builds an administratively marked record with no timestamps.
    pub fn marked(employee_id: impl Into<String>, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            check_in_at: None,
            check_out_at: None,
            status,
            minutes_late: 0,
        }
    }

    /// True while the employee is checked in and has not checked out.
    pub fn is_open(&self) -> bool {
        self.check_in_at.is_some() && self.check_out_at.is_none()
    }

    /// Position of the record in the daily state machine.
    pub fn state(&self) -> DayState {
        match (self.check_in_at, self.check_out_at) {
            (Some(_), None) => DayState::CheckedIn,
            (Some(_), Some(_)) => DayState::CheckedOut,
            (None, _) => DayState::Marked(self.status),
        }
    }
}

/// State of an employee's day.
///
/// Clock events move `NoRecord -> CheckedIn -> CheckedOut`; administrative
/// marks move `NoRecord -> Marked`. `CheckedOut` and `Marked` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "status", rename_all = "snake_case")]
pub enum DayState {
    /// Nothing recorded yet.
    NoRecord,
    /// Clocked in, not yet clocked out.
    CheckedIn,
    /// Clocked in and out.
    CheckedOut,
    /// Marked absent or on leave.
    Marked(AttendanceStatus),
}

impl DayState {
    /// Derives the state from an optional ledger entry.
    pub fn of(record: Option<&AttendanceRecord>) -> Self {
        record.map_or(DayState::NoRecord, AttendanceRecord::state)
    }
}
