//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod payroll;
mod policy;
mod reminder;

pub use attendance::{AttendanceRecord, AttendanceStatus, DayState};
pub use employee::Employee;
pub use payroll::{AuditStep, PayrollLine, PayrollPeriod};
pub use policy::{
    CompanyPolicy, DEFAULT_ABSENCE_PENALTY_RATE, DEFAULT_GRACE_PERIOD_MINUTES,
    DEFAULT_LATE_PENALTY_AMOUNT, MAX_MONETARY_AMOUNT, PolicyUpdate,
};
pub use reminder::{Reminder, ReminderKind};
