//! Payroll period and payroll line models.
//!
//! This module contains the [`PayrollPeriod`] used to bound a payroll run and
//! the [`PayrollLine`] it produces, together with the [`AuditStep`] trail that
//! explains each figure.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive date range for a payroll run.
///
/// # Example
///
/// ```
/// use attendance_engine::models::PayrollPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod::parse_month("2026-02").unwrap();
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl PayrollPeriod {
    /// Creates a period, rejecting an end date before the start date.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        if end_date < start_date {
            return Err(EngineError::validation(
                "period",
                format!("end date {end_date} is before start date {start_date}"),
            ));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// The calendar month `year-month`.
    pub fn month(year: i32, month: u32) -> EngineResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            EngineError::validation("period", format!("{year}-{month:02} is not a valid month"))
        })?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| EngineError::validation("period", "month is out of range"))?;
        Self::new(start, end)
    }

    /// Parses a `YYYY-MM` month string.
    pub fn parse_month(value: &str) -> EngineResult<Self> {
        let invalid = || EngineError::validation("period", format!("expected YYYY-MM, got '{value}'"));
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !all_digits(year) || !all_digits(month) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::month(year, month)
    }

    /// Checks if a given date falls within this period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// The `YYYY-MM` label of the start month.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.start_date.year(), self.start_date.month())
    }
}

/// A single step in the audit trail of a payroll calculation.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Derived monthly pay figure for one employee.
///
/// Recomputed from the ledger on every request; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLine {
    /// The employee the line was computed for.
    pub employee_id: String,
    /// The company whose policy was applied.
    pub company_id: String,
    /// The period covered.
    pub period: PayrollPeriod,
    /// Days with status `PRESENT` or `LATE`.
    pub days_attended: u32,
    /// Days with status `LATE`.
    pub late_count: u32,
    /// Days marked `ABSENT`.
    pub absent_count: u32,
    /// Days marked `ON_LEAVE`.
    pub on_leave_count: u32,
    /// Base salary divided by the working days per month.
    pub daily_rate: Decimal,
    /// Daily rate times days attended.
    pub gross_for_attendance: Decimal,
    /// Late count times the policy's late penalty.
    pub total_penalty: Decimal,
    /// Gross minus penalty, rounded to a whole unit and floored at zero.
    pub net_pay: Decimal,
    /// How each figure was derived.
    pub audit: Vec<AuditStep>,
}
