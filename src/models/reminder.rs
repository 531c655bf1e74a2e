//! Reminder model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Which reminder is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    /// The working day is about to start and the employee has not clocked in.
    CheckIn,
    /// The working day is about to end and the employee is still clocked in.
    CheckOut,
}

/// An advisory reminder for the notification layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// The reminder type.
    pub kind: ReminderKind,
    /// The policy boundary the reminder refers to (work start or work end).
    pub due_at: NaiveDateTime,
    /// A short message suitable for display.
    pub message: String,
}
