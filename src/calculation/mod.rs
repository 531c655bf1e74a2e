//! Calculation logic for the Attendance Engine.
//!
//! This module contains the pure functions behind the engine: late arrival
//! detection at clock-in, check-in/check-out reminder scheduling, and the
//! monthly payroll derivation. Each takes its inputs explicitly and holds no
//! state between calls.

mod lateness;
mod payroll;
mod reminder;

pub use lateness::{ArrivalEvaluation, evaluate_arrival};
pub use payroll::{WORKING_DAYS_PER_MONTH, calculate_payroll_line};
pub use reminder::{REMINDER_LEAD_MINUTES, evaluate_reminder};
