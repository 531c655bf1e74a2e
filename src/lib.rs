//! Attendance and Payroll Policy Engine
//!
//! This crate records daily attendance for employees of construction-group
//! companies, evaluates arrivals against per-company work-hour policies, and
//! derives monthly payroll lines with late penalties and an audit trail.
//!
//! The [`engine::AttendanceEngine`] is the entry point. It is built over the
//! storage traits in [`store`] and a [`clock::Clock`], and is served over
//! HTTP by [`api::create_router`].

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;

pub use engine::AttendanceEngine;
pub use error::{EngineError, EngineResult};
