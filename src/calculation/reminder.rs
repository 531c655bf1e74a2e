//! Check-in and check-out reminders.
//!
//! Reminders are derived on demand from the current time, the employee's
//! policy and today's ledger entry. Nothing here holds state.

use chrono::{Duration, NaiveDateTime};

use crate::models::{AttendanceRecord, CompanyPolicy, Reminder, ReminderKind};

/// How long before work start (or end) a reminder becomes active.
pub const REMINDER_LEAD_MINUTES: i64 = 30;

/// Decides which reminder, if any, should be shown at `now`.
///
/// - Check-in: `now >= work_start - 30min` and no record exists for today.
/// - Check-out: `now >= work_end - 30min` and today's record is checked in
///   but not checked out.
///
/// At most one reminder is returned; check-in wins if both would apply.
/// A record dated on another day is treated as no record.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::evaluate_reminder;
/// use attendance_engine::models::{CompanyPolicy, ReminderKind};
/// use chrono::NaiveDate;
///
/// let policy = CompanyPolicy::default_for("acme"); // 08:00 - 16:00
/// let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
///
/// let reminder = evaluate_reminder(day.and_hms_opt(7, 31, 0).unwrap(), &policy, None);
/// assert_eq!(reminder.map(|r| r.kind), Some(ReminderKind::CheckIn));
///
/// assert!(evaluate_reminder(day.and_hms_opt(7, 29, 0).unwrap(), &policy, None).is_none());
/// ```
pub fn evaluate_reminder(
    now: NaiveDateTime,
    policy: &CompanyPolicy,
    today: Option<&AttendanceRecord>,
) -> Option<Reminder> {
    let date = now.date();
    let today = today.filter(|record| record.date == date);
    let lead = Duration::minutes(REMINDER_LEAD_MINUTES);

    let start = policy.start_on(date);
    if today.is_none() && now >= start - lead {
        return Some(Reminder {
            kind: ReminderKind::CheckIn,
            due_at: start,
            message: format!(
                "Work starts at {}. Remember to clock in.",
                policy.work_start.format("%H:%M")
            ),
        });
    }

    let end = policy.end_on(date);
    if today.is_some_and(AttendanceRecord::is_open) && now >= end - lead {
        return Some(Reminder {
            kind: ReminderKind::CheckOut,
            due_at: end,
            message: format!(
                "Work ends at {}. Remember to clock out.",
                policy.work_end.format("%H:%M")
            ),
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceStatus;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn open_record() -> AttendanceRecord {
        AttendanceRecord::checked_in("emp_001", at(8, 0), AttendanceStatus::Present, 0)
    }

    fn policy() -> CompanyPolicy {
        CompanyPolicy::default_for("acme")
    }

    // ==========================================================================
    // REM-001: 07:31 with no record shows the check-in reminder
    // ==========================================================================
    #[test]
    fn test_rem_001_check_in_active_inside_lead() {
        let reminder = evaluate_reminder(at(7, 31), &policy(), None).unwrap();
        assert_eq!(reminder.kind, ReminderKind::CheckIn);
        assert_eq!(reminder.due_at, at(8, 0));
        assert!(reminder.message.contains("08:00"));
    }

    // ==========================================================================
    // REM-002: 07:29 with no record shows nothing
    // ==========================================================================
    #[test]
    fn test_rem_002_check_in_inactive_before_lead() {
        assert!(evaluate_reminder(at(7, 29), &policy(), None).is_none());
    }

    // ==========================================================================
    // REM-003: lead boundary itself is active
    // ==========================================================================
    #[test]
    fn test_rem_003_check_in_boundary_is_active() {
        let reminder = evaluate_reminder(at(7, 30), &policy(), None);
        assert_eq!(reminder.map(|r| r.kind), Some(ReminderKind::CheckIn));
    }

    #[test]
    fn test_check_in_cleared_once_record_exists() {
        let record = open_record();
        assert!(evaluate_reminder(at(9, 0), &policy(), Some(&record)).is_none());
    }

    #[test]
    fn test_check_out_active_near_end() {
        let record = open_record();
        let reminder = evaluate_reminder(at(15, 30), &policy(), Some(&record)).unwrap();
        assert_eq!(reminder.kind, ReminderKind::CheckOut);
        assert_eq!(reminder.due_at, at(16, 0));
    }

    #[test]
    fn test_check_out_inactive_before_lead() {
        let record = open_record();
        assert!(evaluate_reminder(at(15, 29), &policy(), Some(&record)).is_none());
    }

    #[test]
    fn test_check_out_cleared_after_checkout() {
        let mut record = open_record();
        record.check_out_at = Some(at(15, 45));
        assert!(evaluate_reminder(at(15, 50), &policy(), Some(&record)).is_none());
    }

    #[test]
    fn test_marked_day_has_no_reminder() {
        let record = AttendanceRecord::marked(
            "emp_001",
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            AttendanceStatus::OnLeave,
        );
        assert!(evaluate_reminder(at(7, 45), &policy(), Some(&record)).is_none());
        assert!(evaluate_reminder(at(15, 45), &policy(), Some(&record)).is_none());
    }

    #[test]
    fn test_check_in_takes_priority_late_in_day() {
        // No record at 15:45: both windows are open but only check-in applies.
        let reminder = evaluate_reminder(at(15, 45), &policy(), None).unwrap();
        assert_eq!(reminder.kind, ReminderKind::CheckIn);
    }

    #[test]
    fn test_record_from_other_day_is_ignored() {
        let yesterday = AttendanceRecord::checked_in(
            "emp_001",
            NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            AttendanceStatus::Present,
            0,
        );
        let reminder = evaluate_reminder(at(7, 45), &policy(), Some(&yesterday));
        assert_eq!(reminder.map(|r| r.kind), Some(ReminderKind::CheckIn));
    }
}
