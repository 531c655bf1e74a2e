//! In-memory store implementations.
//!
//! Each store keeps its data behind an `RwLock`. Readers receive cloned
//! values, so they never observe a record mid-update. Writes hold the lock
//! for the whole check-then-modify sequence, which serializes operations on
//! any given employee-day.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, error};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, CompanyPolicy, Employee, PolicyUpdate};

use super::snapshot::SnapshotFile;
use super::traits::{AttendanceLedger, PolicyStore, Roster};

type LedgerKey = (String, NaiveDate);

/// Policy store backed by a `HashMap`.
///
/// Unregistered companies resolve to the default policy (built-in values
/// with `defaults` merged over them) unless fallback is disabled.
#[derive(Debug)]
pub struct InMemoryPolicyStore {
    policies: RwLock<HashMap<String, CompanyPolicy>>,
    defaults: PolicyUpdate,
    fallback_to_default: bool,
}

impl Default for InMemoryPolicyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPolicyStore {
    /// An empty store that falls back to the built-in default policy.
    pub fn new() -> Self {
        Self {
            policies: RwLock::new(HashMap::new()),
            defaults: PolicyUpdate::default(),
            fallback_to_default: true,
        }
    }

    /// Overrides fields of the default policy. The resulting default must
    /// itself be a valid policy.
    pub fn with_defaults(mut self, defaults: PolicyUpdate) -> EngineResult<Self> {
        CompanyPolicy::default_for("default")
            .merged(&defaults)
            .validate()?;
        self.defaults = defaults;
        Ok(self)
    }

    /// Controls whether unregistered companies receive the default policy.
    pub fn with_fallback(mut self, fallback_to_default: bool) -> Self {
        self.fallback_to_default = fallback_to_default;
        self
    }

    /// The default policy as it would be issued to `company_id`.
    pub fn default_policy(&self, company_id: &str) -> CompanyPolicy {
        CompanyPolicy::default_for(company_id).merged(&self.defaults)
    }
}

impl PolicyStore for InMemoryPolicyStore {
    fn get(&self, company_id: &str) -> EngineResult<CompanyPolicy> {
        let policies = self.policies.read()?;
        match policies.get(company_id) {
            Some(policy) => Ok(policy.clone()),
            None if self.fallback_to_default => Ok(self.default_policy(company_id)),
            None => Err(EngineError::PolicyResolution {
                company_id: company_id.to_string(),
            }),
        }
    }

    fn upsert(&self, company_id: &str, update: &PolicyUpdate) -> EngineResult<CompanyPolicy> {
        let mut policies = self.policies.write()?;
        let base = match policies.get(company_id) {
            Some(existing) => existing.clone(),
            None => self.default_policy(company_id),
        };

        let merged = base.merged(update);
        merged.validate()?;
        policies.insert(company_id.to_string(), merged.clone());

        debug!(company_id, "Stored company policy");
        Ok(merged)
    }

    fn list(&self) -> EngineResult<Vec<CompanyPolicy>> {
        let policies = self.policies.read()?;
        let mut all: Vec<CompanyPolicy> = policies.values().cloned().collect();
        all.sort_by(|a, b| a.company_id.cmp(&b.company_id));
        Ok(all)
    }
}

/// Attendance ledger backed by an ordered map, optionally mirrored to a
/// JSON snapshot file after every write.
///
/// When a snapshot write fails the in-memory change is rolled back, so the
/// map and the file never disagree about a write the caller saw succeed.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    records: RwLock<BTreeMap<LedgerKey, AttendanceRecord>>,
    snapshot: Option<SnapshotFile>,
}

impl InMemoryLedger {
    /// An empty, memory-only ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger persisted at `file`, preloaded with whatever it contains.
    pub fn open(file: SnapshotFile) -> EngineResult<Self> {
        let mut records = BTreeMap::new();
        for record in file.load()? {
            let key = (record.employee_id.clone(), record.date);
            if records.insert(key, record).is_some() {
                return Err(EngineError::storage(format!(
                    "snapshot {} contains duplicate employee-day records",
                    file.path().display()
                )));
            }
        }

        Ok(Self {
            records: RwLock::new(records),
            snapshot: Some(file),
        })
    }

    fn persist(&self, records: &BTreeMap<LedgerKey, AttendanceRecord>) -> EngineResult<()> {
        match &self.snapshot {
            Some(file) => file.write(records.values()).inspect_err(|e| {
                error!(error = %e, "Failed to persist ledger snapshot, rolling back");
            }),
            None => Ok(()),
        }
    }
}

impl AttendanceLedger for InMemoryLedger {
    fn get(&self, employee_id: &str, date: NaiveDate) -> EngineResult<Option<AttendanceRecord>> {
        let records = self.records.read()?;
        Ok(records.get(&(employee_id.to_string(), date)).cloned())
    }

    fn insert(&self, record: AttendanceRecord) -> EngineResult<AttendanceRecord> {
        let mut records = self.records.write()?;
        let key = (record.employee_id.clone(), record.date);

        if records.contains_key(&key) {
            return Err(EngineError::DuplicateDayRecord {
                employee_id: key.0,
                date: key.1,
            });
        }

        records.insert(key.clone(), record.clone());
        if let Err(e) = self.persist(&records) {
            records.remove(&key);
            return Err(e);
        }
        Ok(record)
    }

    fn check_out(
        &self,
        employee_id: &str,
        date: NaiveDate,
        at: NaiveDateTime,
    ) -> EngineResult<AttendanceRecord> {
        let mut records = self.records.write()?;
        let key = (employee_id.to_string(), date);

        let no_session = || EngineError::NoOpenSession {
            employee_id: employee_id.to_string(),
            date,
        };
        let record = records.get_mut(&key).ok_or_else(no_session)?;
        if !record.is_open() {
            return Err(no_session());
        }
        if let Some(check_in_at) = record.check_in_at {
            if at < check_in_at {
                return Err(EngineError::validation(
                    "timestamp",
                    format!("checkout {at} is earlier than check-in {check_in_at}"),
                ));
            }
        }

        record.check_out_at = Some(at);
        let updated = record.clone();

        if let Err(e) = self.persist(&records) {
            if let Some(record) = records.get_mut(&key) {
                record.check_out_at = None;
            }
            return Err(e);
        }
        Ok(updated)
    }

    fn range(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        if to < from {
            return Ok(Vec::new());
        }
        let records = self.records.read()?;
        let lower = (employee_id.to_string(), from);
        let upper = (employee_id.to_string(), to);
        Ok(records.range(lower..=upper).map(|(_, r)| r.clone()).collect())
    }

    fn snapshot(&self) -> EngineResult<Vec<AttendanceRecord>> {
        let records = self.records.read()?;
        Ok(records.values().cloned().collect())
    }
}

/// Roster backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryRoster {
    employees: RwLock<HashMap<String, Employee>>,
}

impl InMemoryRoster {
    /// A roster holding `employees`. Later duplicates replace earlier ones.
    pub fn from_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        let map = employees
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect::<HashMap<_, _>>();
        Self {
            employees: RwLock::new(map),
        }
    }

    /// Adds or replaces an employee.
    pub fn put(&self, employee: Employee) -> EngineResult<()> {
        let mut employees = self.employees.write()?;
        employees.insert(employee.id.clone(), employee);
        Ok(())
    }
}

impl Roster for InMemoryRoster {
    fn employee(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        let employees = self.employees.read()?;
        Ok(employees.get(employee_id).cloned())
    }

    fn employees(&self) -> EngineResult<Vec<Employee>> {
        let employees = self.employees.read()?;
        let mut all: Vec<Employee> = employees.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }
}
