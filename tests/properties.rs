//! Property tests for the attendance and payroll rules.
//!
//! These check the invariants that must hold for any input rather than for
//! hand-picked scenarios:
//! - Arrival status flips exactly at the grace limit
//! - At most one record per employee per day
//! - A checkout is never earlier than its check-in
//! - Net pay is never negative and follows the rounding rule

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use attendance_engine::calculation::{
    calculate_payroll_line, evaluate_arrival, WORKING_DAYS_PER_MONTH,
};
use attendance_engine::error::EngineError;
use attendance_engine::models::{
    AttendanceRecord, AttendanceStatus, CompanyPolicy, Employee, PayrollPeriod,
};
use attendance_engine::store::{AttendanceLedger, InMemoryLedger};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn policy_with(start_minute: u32, grace: u32, penalty_cents: i64) -> CompanyPolicy {
    let mut policy = CompanyPolicy::default_for("acme");
    policy.work_start =
        NaiveTime::from_hms_opt(0, 0, 0).unwrap() + Duration::minutes(i64::from(start_minute));
    policy.work_end = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
    policy.grace_period_minutes = grace;
    policy.late_penalty_amount = Decimal::new(penalty_cents, 2);
    policy
}

fn status_strategy() -> impl Strategy<Value = AttendanceStatus> {
    prop_oneof![
        Just(AttendanceStatus::Present),
        Just(AttendanceStatus::Late),
        Just(AttendanceStatus::Absent),
        Just(AttendanceStatus::OnLeave),
    ]
}

proptest! {
    #[test]
    fn arrival_is_late_only_past_the_grace_limit(
        start_minute in 180u32..(18 * 60),
        grace in 0u32..120,
        offset_seconds in -7200i64..7200,
    ) {
        let policy = policy_with(start_minute, grace, 5000);
        let limit = policy.late_limit(day(2));
        let now = limit + Duration::seconds(offset_seconds);

        let evaluation = evaluate_arrival(&policy, now);

        prop_assert_eq!(evaluation.late_limit, limit);
        if now > limit {
            prop_assert_eq!(evaluation.status, AttendanceStatus::Late);
            prop_assert!(evaluation.minutes_late >= 1);
        } else {
            prop_assert_eq!(evaluation.status, AttendanceStatus::Present);
            prop_assert_eq!(evaluation.minutes_late, 0);
        }
    }

    #[test]
    fn ledger_keeps_one_record_per_employee_day(
        events in prop::collection::vec((0usize..3, 1u32..=5, 0u32..600), 1..40),
    ) {
        let ledger = InMemoryLedger::new();
        let mut seen = HashSet::new();

        for (employee, d, minute) in events {
            let employee_id = format!("emp_{employee}");
            let at = day(d).and_hms_opt(6, 0, 0).unwrap() + Duration::minutes(minute as i64);
            let record = AttendanceRecord::checked_in(&employee_id, at, AttendanceStatus::Present, 0);

            let result = ledger.insert(record);
            if seen.insert((employee_id, d)) {
                prop_assert!(result.is_ok());
            } else {
                let is_duplicate = matches!(result, Err(EngineError::DuplicateDayRecord { .. }));
                prop_assert!(is_duplicate);
            }
        }

        let total: usize = (0..3)
            .map(|e| ledger.range(&format!("emp_{e}"), day(1), day(5)).unwrap().len())
            .sum();
        prop_assert_eq!(total, seen.len());
    }

    #[test]
    fn checkout_is_never_before_check_in(
        check_in_minute in 0u32..(12 * 60),
        offset_minutes in -600i64..600,
    ) {
        let ledger = InMemoryLedger::new();
        let check_in: NaiveDateTime = day(2).and_hms_opt(0, 0, 0).unwrap()
            + Duration::minutes(check_in_minute as i64);
        ledger
            .insert(AttendanceRecord::checked_in("emp_001", check_in, AttendanceStatus::Present, 0))
            .unwrap();

        let at = check_in + Duration::minutes(offset_minutes);
        let result = ledger.check_out("emp_001", day(2), at);

        if offset_minutes >= 0 {
            let record = result.unwrap();
            prop_assert!(record.check_out_at.unwrap() >= record.check_in_at.unwrap());
        } else {
            let is_validation = matches!(result, Err(EngineError::Validation { .. }));
            prop_assert!(is_validation);
            prop_assert!(ledger.get("emp_001", day(2)).unwrap().unwrap().is_open());
        }
    }

    #[test]
    fn net_pay_is_clamped_and_rounded(
        salary_cents in 0i64..10_000_000,
        penalty_cents in 0i64..500_000,
        statuses in prop::collection::vec(status_strategy(), 0..31),
    ) {
        let employee = Employee::new("emp_001", Decimal::new(salary_cents, 2), "acme");
        let policy = policy_with(8 * 60, 15, penalty_cents);
        let period = PayrollPeriod::month(2026, 3).unwrap();
        let records: Vec<AttendanceRecord> = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                let date = day(i as u32 + 1);
                match status {
                    AttendanceStatus::Present | AttendanceStatus::Late => AttendanceRecord::checked_in(
                        "emp_001",
                        date.and_hms_opt(8, 0, 0).unwrap(),
                        *status,
                        0,
                    ),
                    _ => AttendanceRecord::marked("emp_001", date, *status),
                }
            })
            .collect();

        let line = calculate_payroll_line(&employee, &policy, period, &records).unwrap();

        let attended = statuses.iter().filter(|s| s.is_attended()).count() as u32;
        let late = statuses.iter().filter(|s| **s == AttendanceStatus::Late).count() as u32;
        prop_assert_eq!(line.days_attended, attended);
        prop_assert_eq!(line.late_count, late);

        let daily_rate = employee.base_salary / Decimal::from(WORKING_DAYS_PER_MONTH);
        let gross = daily_rate * Decimal::from(attended);
        let penalty = policy.late_penalty_amount * Decimal::from(late);
        let expected = (gross - penalty)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .max(Decimal::ZERO);

        prop_assert!(line.net_pay >= Decimal::ZERO);
        prop_assert_eq!(line.net_pay, expected);
    }
}
