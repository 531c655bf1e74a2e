//! Store trait definitions

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, CompanyPolicy, Employee, PolicyUpdate};

/// Company policy storage.
pub trait PolicyStore: Send + Sync {
    /// Returns the policy for `company_id`, or the default policy when none
    /// is registered and fallback is enabled.
    fn get(&self, company_id: &str) -> EngineResult<CompanyPolicy>;

    /// Merges `update` into the existing policy (or the default) and stores
    /// the result. The merged policy is validated before it is stored.
    fn upsert(&self, company_id: &str, update: &PolicyUpdate) -> EngineResult<CompanyPolicy>;

    /// All registered policies, ordered by company ID.
    fn list(&self) -> EngineResult<Vec<CompanyPolicy>>;
}

/// Attendance record storage keyed by (employee ID, date).
///
/// Every write is atomic with respect to its key: two concurrent inserts for
/// the same employee-day cannot both succeed.
pub trait AttendanceLedger: Send + Sync {
    /// The record for one employee-day, if any.
    fn get(&self, employee_id: &str, date: NaiveDate) -> EngineResult<Option<AttendanceRecord>>;

    /// Stores a new record. Fails with `DuplicateDayRecord` when the
    /// employee-day is already taken.
    fn insert(&self, record: AttendanceRecord) -> EngineResult<AttendanceRecord>;

    /// Sets the checkout timestamp on the open record for the employee-day.
    ///
    /// Fails with `NoOpenSession` when there is no record, the record has no
    /// check-in, or checkout is already set; fails with `Validation` when
    /// `at` is earlier than the check-in.
    fn check_out(
        &self,
        employee_id: &str,
        date: NaiveDate,
        at: NaiveDateTime,
    ) -> EngineResult<AttendanceRecord>;

    /// Records for one employee with `from <= date <= to`, ordered by date.
    fn range(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Copy of every record in the ledger, ordered by employee then date.
    fn snapshot(&self) -> EngineResult<Vec<AttendanceRecord>>;
}

/// Read-only employee lookup supplied by the ERP.
pub trait Roster: Send + Sync {
    /// The employee with `employee_id`, if on the roster.
    fn employee(&self, employee_id: &str) -> EngineResult<Option<Employee>>;

    /// Every employee on the roster, ordered by ID.
    fn employees(&self) -> EngineResult<Vec<Employee>>;
}
