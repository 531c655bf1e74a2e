//! Error types for the Attendance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while recording attendance,
//! resolving company policies, and deriving payroll.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::UnknownEmployee {
///     employee_id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown employee: emp_404");
/// assert_eq!(error.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input was malformed: a bad time window, a missing field, or a
    /// checkout timestamp earlier than the check-in.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The employee already has an attendance record for the day.
    #[error("Employee '{employee_id}' already clocked in on {date}")]
    AlreadyClockedIn {
        /// The employee that attempted a second clock-in.
        employee_id: String,
        /// The calendar day of the existing record.
        date: NaiveDate,
    },

    /// There is no checked-in, not yet checked-out record for the day.
    #[error("Employee '{employee_id}' has no open session on {date}")]
    NoOpenSession {
        /// The employee that attempted to clock out.
        employee_id: String,
        /// The calendar day that was inspected.
        date: NaiveDate,
    },

    /// An administrative mark was attempted on a day that already has a record.
    #[error("Employee '{employee_id}' already has an attendance record on {date}")]
    DuplicateDayRecord {
        /// The employee being marked.
        employee_id: String,
        /// The calendar day of the existing record.
        date: NaiveDate,
    },

    /// The employee is not part of the roster.
    #[error("Unknown employee: {employee_id}")]
    UnknownEmployee {
        /// The employee ID that was not found.
        employee_id: String,
    },

    /// No policy is registered for the company and no default is available.
    #[error("No policy could be resolved for company '{company_id}'")]
    PolicyResolution {
        /// The company whose policy was requested.
        company_id: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The persistence layer failed (poisoned lock, snapshot I/O).
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

/// Coarse classification of an [`EngineError`].
///
/// Callers use this to pick a user-facing presentation without matching
/// every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input.
    Validation,
    /// The requested transition conflicts with the ledger's current state.
    Conflict,
    /// A referenced entity does not exist.
    NotFound,
    /// The company policy could not be resolved.
    PolicyResolution,
    /// Configuration or storage failure.
    Internal,
}

impl EngineError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Validation { .. } => ErrorKind::Validation,
            EngineError::AlreadyClockedIn { .. }
            | EngineError::NoOpenSession { .. }
            | EngineError::DuplicateDayRecord { .. } => ErrorKind::Conflict,
            EngineError::UnknownEmployee { .. } => ErrorKind::NotFound,
            EngineError::PolicyResolution { .. } => ErrorKind::PolicyResolution,
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::Storage { .. } => ErrorKind::Internal,
        }
    }

    /// Shorthand for building a [`EngineError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn storage(message: impl Into<String>) -> Self {
        EngineError::Storage {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
