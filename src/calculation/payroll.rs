//! Monthly payroll derivation.
//!
//! This module turns a period of attendance records into a [`PayrollLine`]:
//! salary is prorated by days attended and reduced by a flat penalty per
//! late arrival.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AttendanceStatus, AuditStep, CompanyPolicy, Employee, PayrollLine,
    PayrollPeriod,
};

/// Working days assumed in every month, regardless of the calendar.
pub const WORKING_DAYS_PER_MONTH: u32 = 22;

/// Computes the payroll line for `employee` over `period`.
///
/// Only records belonging to the employee and dated inside the period are
/// counted; callers may pass a wider slice.
///
/// - `daily_rate = base_salary / 22`
/// - `gross_for_attendance = daily_rate * days_attended`
/// - `total_penalty = late_count * late_penalty_amount`
/// - `net_pay = max(0, round(gross_for_attendance - total_penalty))`
///
/// `absence_penalty_rate` is not applied.
///
/// Fails with `Validation` when salary or penalty figures are too large for
/// the arithmetic to be represented.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::calculate_payroll_line;
/// use attendance_engine::models::{
///     AttendanceRecord, AttendanceStatus, CompanyPolicy, Employee, PayrollPeriod,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("emp_001", Decimal::new(22000, 0), "acme");
/// let policy = CompanyPolicy::default_for("acme");
/// let period = PayrollPeriod::month(2026, 3).unwrap();
///
/// let records: Vec<AttendanceRecord> = (2..=21)
///     .map(|day| {
///         let status = if day <= 3 { AttendanceStatus::Late } else { AttendanceStatus::Present };
///         let at = NaiveDate::from_ymd_opt(2026, 3, day).unwrap().and_hms_opt(8, 0, 0).unwrap();
///         AttendanceRecord::checked_in("emp_001", at, status, 0)
///     })
///     .collect();
///
/// let line = calculate_payroll_line(&employee, &policy, period, &records)?;
/// assert_eq!(line.days_attended, 20);
/// assert_eq!(line.late_count, 2);
/// assert_eq!(line.net_pay, Decimal::new(19900, 0));
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
pub fn calculate_payroll_line(
    employee: &Employee,
    policy: &CompanyPolicy,
    period: PayrollPeriod,
    records: &[AttendanceRecord],
) -> EngineResult<PayrollLine> {
    let mut days_attended: u32 = 0;
    let mut late_count: u32 = 0;
    let mut absent_count: u32 = 0;
    let mut on_leave_count: u32 = 0;

    for record in records
        .iter()
        .filter(|r| r.employee_id == employee.id && period.contains_date(r.date))
    {
        if record.status.is_attended() {
            days_attended += 1;
        }
        match record.status {
            AttendanceStatus::Late => late_count += 1,
            AttendanceStatus::Absent => absent_count += 1,
            AttendanceStatus::OnLeave => on_leave_count += 1,
            AttendanceStatus::Present => {}
        }
    }

    let mut audit = Vec::with_capacity(5);

    audit.push(AuditStep {
        step_number: 1,
        rule_id: "attendance_tally".to_string(),
        rule_name: "Attendance Tally".to_string(),
        input: serde_json::json!({
            "period_start": period.start_date.to_string(),
            "period_end": period.end_date.to_string()
        }),
        output: serde_json::json!({
            "days_attended": days_attended,
            "late_count": late_count,
            "absent_count": absent_count,
            "on_leave_count": on_leave_count
        }),
        reasoning: format!(
            "{} PRESENT/LATE day(s) counted as attended, of which {} LATE",
            days_attended, late_count
        ),
    });

    let working_days = Decimal::from(WORKING_DAYS_PER_MONTH);
    let daily_rate = employee.base_salary / working_days;
    audit.push(AuditStep {
        step_number: 2,
        rule_id: "daily_rate".to_string(),
        rule_name: "Daily Rate".to_string(),
        input: serde_json::json!({
            "base_salary": employee.base_salary.normalize().to_string(),
            "working_days": WORKING_DAYS_PER_MONTH
        }),
        output: serde_json::json!({
            "daily_rate": daily_rate.normalize().to_string()
        }),
        reasoning: format!(
            "{} / {} = {}",
            employee.base_salary.normalize(),
            WORKING_DAYS_PER_MONTH,
            daily_rate.round_dp(2).normalize()
        ),
    });

    let gross_for_attendance = daily_rate
        .checked_mul(Decimal::from(days_attended))
        .ok_or_else(|| overflow("base_salary", "gross for attendance"))?;
    audit.push(AuditStep {
        step_number: 3,
        rule_id: "gross_for_attendance".to_string(),
        rule_name: "Gross For Attendance".to_string(),
        input: serde_json::json!({
            "daily_rate": daily_rate.normalize().to_string(),
            "days_attended": days_attended
        }),
        output: serde_json::json!({
            "gross_for_attendance": gross_for_attendance.normalize().to_string()
        }),
        reasoning: format!(
            "{} x {} day(s) = {}",
            daily_rate.round_dp(2).normalize(),
            days_attended,
            gross_for_attendance.round_dp(2).normalize()
        ),
    });

    let total_penalty = policy
        .late_penalty_amount
        .checked_mul(Decimal::from(late_count))
        .ok_or_else(|| overflow("late_penalty_amount", "total late penalty"))?;
    audit.push(AuditStep {
        step_number: 4,
        rule_id: "late_penalty".to_string(),
        rule_name: "Late Arrival Penalty".to_string(),
        input: serde_json::json!({
            "late_count": late_count,
            "late_penalty_amount": policy.late_penalty_amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_penalty": total_penalty.normalize().to_string()
        }),
        reasoning: format!(
            "{} late arrival(s) x {} = {}",
            late_count,
            policy.late_penalty_amount.normalize(),
            total_penalty.normalize()
        ),
    });

    let raw = gross_for_attendance
        .checked_sub(total_penalty)
        .ok_or_else(|| overflow("late_penalty_amount", "net pay"))?;
    let rounded = raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let net_pay = rounded.max(Decimal::ZERO);
    let clamped = rounded < Decimal::ZERO;
    audit.push(AuditStep {
        step_number: 5,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross_for_attendance": gross_for_attendance.normalize().to_string(),
            "total_penalty": total_penalty.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_pay": net_pay.normalize().to_string(),
            "clamped_to_zero": clamped
        }),
        reasoning: if clamped {
            format!(
                "{} is negative, net pay floored at 0",
                raw.round_dp(2).normalize()
            )
        } else {
            format!(
                "{} rounded to nearest whole unit = {}",
                raw.round_dp(2).normalize(),
                net_pay.normalize()
            )
        },
    });

    Ok(PayrollLine {
        employee_id: employee.id.clone(),
        company_id: policy.company_id.clone(),
        period,
        days_attended,
        late_count,
        absent_count,
        on_leave_count,
        daily_rate,
        gross_for_attendance,
        total_penalty,
        net_pay: net_pay.normalize(),
        audit,
    })
}

fn overflow(field: &str, figure: &str) -> EngineError {
    EngineError::validation(field, format!("{figure} exceeds the representable range"))
}
