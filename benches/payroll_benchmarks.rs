//! Performance benchmarks for the Attendance Engine.
//!
//! This benchmark suite covers the hot paths:
//! - Arrival evaluation for a single clock-in
//! - Payroll line derivation over a month of records
//! - Payroll over HTTP for one employee
//! - A payroll run across a growing roster
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

use attendance_engine::api::{create_router, AppState};
use attendance_engine::calculation::{calculate_payroll_line, evaluate_arrival};
use attendance_engine::clock::FixedClock;
use attendance_engine::models::{
    AttendanceRecord, AttendanceStatus, CompanyPolicy, Employee, PayrollPeriod,
};
use attendance_engine::store::{InMemoryLedger, InMemoryPolicyStore, InMemoryRoster};
use attendance_engine::AttendanceEngine;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn march() -> PayrollPeriod {
    PayrollPeriod::month(2026, 3).unwrap()
}

/// Creates a month of records alternating present and late arrivals.
fn month_of_records(employee_id: &str) -> Vec<AttendanceRecord> {
    (1..=31)
        .map(|day| {
            let (status, minute) = if day % 5 == 0 {
                (AttendanceStatus::Late, 40)
            } else {
                (AttendanceStatus::Present, 0)
            };
            AttendanceRecord::checked_in(employee_id, at(day, 8, minute), status, 0)
        })
        .collect()
}

/// Creates an engine with `employees` employees, each clocked in every day of March.
fn create_populated_engine(employees: usize) -> AttendanceEngine {
    let roster = InMemoryRoster::from_employees((0..employees).map(|i| {
        Employee::new(format!("emp_{i:04}"), Decimal::new(22000, 0), "acme")
    }));
    let engine = AttendanceEngine::new(
        Arc::new(InMemoryPolicyStore::new()),
        Arc::new(InMemoryLedger::new()),
        Arc::new(roster),
        Arc::new(FixedClock::new(at(31, 18, 0))),
    );

    for i in 0..employees {
        let employee_id = format!("emp_{i:04}");
        for day in 1..=31 {
            engine
                .clock_in(&employee_id, None, at(day, 8, (day * 3) % 40))
                .expect("Failed to seed attendance");
        }
    }
    engine
}

/// Benchmark: Arrival evaluation.
///
/// Target: < 1μs mean
fn bench_evaluate_arrival(c: &mut Criterion) {
    let policy = CompanyPolicy::default_for("acme");
    let now = at(2, 8, 16);

    c.bench_function("evaluate_arrival", |b| {
        b.iter(|| black_box(evaluate_arrival(black_box(&policy), black_box(now))))
    });
}

/// Benchmark: Payroll line over one month of records.
///
/// Target: < 50μs mean
fn bench_payroll_line(c: &mut Criterion) {
    let employee = Employee::new("emp_0001", Decimal::new(22000, 0), "acme");
    let policy = CompanyPolicy::default_for("acme");
    let records = month_of_records("emp_0001");

    c.bench_function("payroll_line_month", |b| {
        b.iter(|| {
            black_box(calculate_payroll_line(
                black_box(&employee),
                black_box(&policy),
                march(),
                black_box(&records),
            )
            .unwrap())
        })
    });
}

/// Benchmark: Payroll for one employee over HTTP.
///
/// Target: < 1ms mean
fn bench_payroll_http(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(create_populated_engine(1)));

    c.bench_function("payroll_http", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .uri("/payroll/emp_0000?period=2026-03")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Payroll run scaling with roster size.
fn bench_payroll_run_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("payroll_run_scaling");

    for roster_size in [10usize, 100, 500] {
        let engine = create_populated_engine(roster_size);
        group.throughput(Throughput::Elements(roster_size as u64));
        if roster_size >= 500 {
            group.sample_size(10);
        }
        group.bench_with_input(
            BenchmarkId::from_parameter(roster_size),
            &engine,
            |b, engine| b.iter(|| black_box(engine.payroll_run(march()).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_evaluate_arrival,
    bench_payroll_line,
    bench_payroll_http,
    bench_payroll_run_scaling,
);
criterion_main!(benches);
