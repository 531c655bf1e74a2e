//! The attendance engine.
//!
//! [`AttendanceEngine`] wires the stores, the roster and the clock together
//! and exposes the daily attendance state machine:
//!
//! ```text
//! NoRecord --clock_in--> CheckedIn --clock_out--> CheckedOut
//! NoRecord --mark_absent / mark_on_leave--> Marked
//! ```
//!
//! Every transition is guarded and fails with a typed error instead of being
//! silently ignored. Reminder and payroll queries are read-only projections
//! over the stores.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::calculation::{calculate_payroll_line, evaluate_arrival, evaluate_reminder};
use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AttendanceStatus, CompanyPolicy, DayState, Employee, PayrollLine,
    PayrollPeriod, PolicyUpdate, Reminder,
};
use crate::store::{AttendanceLedger, PolicyStore, Roster};

/// Attendance and payroll operations over injected stores.
#[derive(Clone)]
pub struct AttendanceEngine {
    policies: Arc<dyn PolicyStore>,
    ledger: Arc<dyn AttendanceLedger>,
    roster: Arc<dyn Roster>,
    clock: Arc<dyn Clock>,
}

impl AttendanceEngine {
    /// Creates an engine over the given stores and clock.
    pub fn new(
        policies: Arc<dyn PolicyStore>,
        ledger: Arc<dyn AttendanceLedger>,
        roster: Arc<dyn Roster>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            policies,
            ledger,
            roster,
            clock,
        }
    }

    /// The engine's current wall-clock time.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Looks up an employee, failing with `UnknownEmployee` when absent.
    pub fn employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.roster
            .employee(employee_id)?
            .ok_or_else(|| EngineError::UnknownEmployee {
                employee_id: employee_id.to_string(),
            })
    }

    /// The policy that applies to `company_id`.
    pub fn policy(&self, company_id: &str) -> EngineResult<CompanyPolicy> {
        self.policies.get(company_id)
    }

    /// Merges `update` into the company's policy.
    pub fn upsert_policy(
        &self,
        company_id: &str,
        update: &PolicyUpdate,
    ) -> EngineResult<CompanyPolicy> {
        let policy = self.policies.upsert(company_id, update)?;
        info!(
            company_id,
            work_start = %policy.work_start.format("%H:%M"),
            work_end = %policy.work_end.format("%H:%M"),
            grace_period_minutes = policy.grace_period_minutes,
            "Company policy updated"
        );
        Ok(policy)
    }

    /// Every explicitly registered policy.
    pub fn policies(&self) -> EngineResult<Vec<CompanyPolicy>> {
        self.policies.list()
    }

    /// Records a clock-in at `now`.
    ///
    /// The policy is taken from `company_id` when given, otherwise from the
    /// employee's own company. Status is `Late` when `now` is strictly after
    /// `work_start + grace_period_minutes`, `Present` otherwise.
    ///
    /// Fails with `AlreadyClockedIn` when any record exists for the day.
    pub fn clock_in(
        &self,
        employee_id: &str,
        company_id: Option<&str>,
        now: NaiveDateTime,
    ) -> EngineResult<AttendanceRecord> {
        let employee = self.employee(employee_id)?;
        let company_id = company_id.unwrap_or(&employee.company_id);
        let policy = self.policies.get(company_id)?;

        let evaluation = evaluate_arrival(&policy, now);
        let record = AttendanceRecord::checked_in(
            employee_id,
            now,
            evaluation.status,
            evaluation.minutes_late,
        );

        let record = self.ledger.insert(record).map_err(|e| match e {
            EngineError::DuplicateDayRecord { employee_id, date } => {
                EngineError::AlreadyClockedIn { employee_id, date }
            }
            other => other,
        });

        match record {
            Ok(record) => {
                info!(
                    employee_id,
                    company_id,
                    date = %record.date,
                    status = %record.status,
                    minutes_late = record.minutes_late,
                    "Clock-in recorded"
                );
                Ok(record)
            }
            Err(e) => {
                warn!(employee_id, error = %e, "Clock-in rejected");
                Err(e)
            }
        }
    }

    /// Records a clock-out at `now` on the open record for `now`'s date.
    ///
    /// Status is left untouched. Fails with `UnknownEmployee` for employees
    /// off the roster, with `NoOpenSession` when there is no open record for
    /// the day and with `Validation` when `now` precedes the check-in.
    pub fn clock_out(&self, employee_id: &str, now: NaiveDateTime) -> EngineResult<AttendanceRecord> {
        self.employee(employee_id)?;
        match self.ledger.check_out(employee_id, now.date(), now) {
            Ok(record) => {
                info!(
                    employee_id,
                    date = %record.date,
                    status = %record.status,
                    "Clock-out recorded"
                );
                Ok(record)
            }
            Err(e) => {
                warn!(employee_id, error = %e, "Clock-out rejected");
                Err(e)
            }
        }
    }

    /// Marks the employee absent on `date`.
    pub fn mark_absent(&self, employee_id: &str, date: NaiveDate) -> EngineResult<AttendanceRecord> {
        self.mark(employee_id, date, AttendanceStatus::Absent)
    }

    /// Marks the employee on leave on `date`.
    pub fn mark_on_leave(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<AttendanceRecord> {
        self.mark(employee_id, date, AttendanceStatus::OnLeave)
    }

    fn mark(
        &self,
        employee_id: &str,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> EngineResult<AttendanceRecord> {
        self.employee(employee_id)?;
        let record = self
            .ledger
            .insert(AttendanceRecord::marked(employee_id, date, status))?;
        info!(employee_id, date = %date, status = %status, "Attendance marked");
        Ok(record)
    }

    /// Where the employee stands on `date`.
    pub fn day_state(&self, employee_id: &str, date: NaiveDate) -> EngineResult<DayState> {
        let record = self.ledger.get(employee_id, date)?;
        Ok(DayState::of(record.as_ref()))
    }

    /// The reminder to show the employee at `now`, if any.
    pub fn reminder_for(
        &self,
        employee_id: &str,
        now: NaiveDateTime,
    ) -> EngineResult<Option<Reminder>> {
        self.reminder_status(employee_id, now)
            .map(|(_, reminder)| reminder)
    }

    /// The employee's state on the day of `now` together with the reminder
    /// to show at `now`. Both come from the same ledger read.
    pub fn reminder_status(
        &self,
        employee_id: &str,
        now: NaiveDateTime,
    ) -> EngineResult<(DayState, Option<Reminder>)> {
        let employee = self.employee(employee_id)?;
        let policy = self.policies.get(&employee.company_id)?;
        let today = self.ledger.get(employee_id, now.date())?;

        let state = DayState::of(today.as_ref());
        let reminder = evaluate_reminder(now, &policy, today.as_ref());
        debug!(
            employee_id,
            state = ?state,
            reminder = ?reminder.as_ref().map(|r| r.kind),
            "Reminder evaluated"
        );
        Ok((state, reminder))
    }

    /// The employee's records with `from <= date <= to`, ordered by date.
    pub fn records_between(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        if to < from {
            return Err(EngineError::validation(
                "to",
                format!("{to} is before from {from}"),
            ));
        }
        self.ledger.range(employee_id, from, to)
    }

    /// Computes the employee's payroll line for `period`.
    ///
    /// The penalty policy comes from `company_id` when given, otherwise from
    /// the employee's own company. Nothing is cached or stored.
    pub fn compute_month(
        &self,
        employee_id: &str,
        company_id: Option<&str>,
        period: PayrollPeriod,
    ) -> EngineResult<PayrollLine> {
        let employee = self.employee(employee_id)?;
        let company_id = company_id.unwrap_or(&employee.company_id);
        let policy = self.policies.get(company_id)?;
        let records = self
            .ledger
            .range(employee_id, period.start_date, period.end_date)?;

        let line = calculate_payroll_line(&employee, &policy, period, &records)?;
        info!(
            employee_id,
            company_id,
            period = %period.label(),
            days_attended = line.days_attended,
            late_count = line.late_count,
            "Payroll line computed"
        );
        Ok(line)
    }

    /// Computes payroll lines for every employee on the roster.
    pub fn payroll_run(&self, period: PayrollPeriod) -> EngineResult<Vec<PayrollLine>> {
        self.roster
            .employees()?
            .iter()
            .map(|employee| self.compute_month(&employee.id, None, period))
            .collect()
    }
}
