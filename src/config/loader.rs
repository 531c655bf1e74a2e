//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings, company policies and the employee roster from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::clock::Clock;
use crate::engine::AttendanceEngine;
use crate::error::{EngineError, EngineResult};
use crate::models::{CompanyPolicy, Employee, MAX_MONETARY_AMOUNT};
use crate::store::{InMemoryLedger, InMemoryPolicyStore, InMemoryRoster, PolicyStore, SnapshotFile};

use super::types::{EngineSettings, PoliciesConfig, PolicyEntry, RosterConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml    # Server, default policy and ledger settings
/// ├── policies.yaml  # Per-company policies
/// └── roster.yaml    # Employees (id, base salary, company)
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::clock::SystemClock;
/// use attendance_engine::config::ConfigLoader;
/// use std::sync::Arc;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let engine = loader.build_engine(Arc::new(SystemClock))?;
/// println!("{} employees on the roster", loader.employees().len());
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: EngineSettings,
    policies: Vec<PolicyEntry>,
    employees: Vec<Employee>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing or malformed, if a company or
    /// employee appears twice, or if a policy does not validate once merged
    /// over the default.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let policies = Self::load_yaml::<PoliciesConfig>(&path.join("policies.yaml"))?.policies;
        let employees = Self::load_yaml::<RosterConfig>(&path.join("roster.yaml"))?.employees;

        let loader = Self {
            settings,
            policies,
            employees,
        };
        loader.validate()?;

        info!(
            path = %path.display(),
            companies = loader.policies.len(),
            employees = loader.employees.len(),
            "Configuration loaded"
        );
        Ok(loader)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(&self) -> EngineResult<()> {
        let default = self.default_policy("default");
        default.validate()?;

        let mut companies = HashSet::new();
        for entry in &self.policies {
            if !companies.insert(entry.company_id.as_str()) {
                return Err(EngineError::validation(
                    "company_id",
                    format!("policy for '{}' is defined more than once", entry.company_id),
                ));
            }
            self.default_policy(&entry.company_id)
                .merged(&entry.fields)
                .validate()?;
        }

        let mut employees = HashSet::new();
        for employee in &self.employees {
            if !employees.insert(employee.id.as_str()) {
                return Err(EngineError::validation(
                    "employee_id",
                    format!("employee '{}' is listed more than once", employee.id),
                ));
            }
            if employee.base_salary.is_sign_negative() {
                return Err(EngineError::validation(
                    "base_salary",
                    format!("employee '{}' has a negative base salary", employee.id),
                ));
            }
            if employee.base_salary > MAX_MONETARY_AMOUNT {
                return Err(EngineError::validation(
                    "base_salary",
                    format!(
                        "employee '{}' has a base salary above {MAX_MONETARY_AMOUNT}",
                        employee.id
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the roster.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Returns the HTTP bind address.
    pub fn bind_address(&self) -> &str {
        &self.settings.server.bind_address
    }

    /// The default policy as it would be issued to `company_id`.
    pub fn default_policy(&self, company_id: &str) -> CompanyPolicy {
        CompanyPolicy::default_for(company_id).merged(&self.settings.policies.default)
    }

    /// Builds the policy store described by the configuration.
    pub fn policy_store(&self) -> EngineResult<InMemoryPolicyStore> {
        let store = InMemoryPolicyStore::new()
            .with_defaults(self.settings.policies.default.clone())?
            .with_fallback(self.settings.policies.fallback_to_default);
        for entry in &self.policies {
            store.upsert(&entry.company_id, &entry.fields)?;
        }
        Ok(store)
    }

    /// Builds the ledger, loading the snapshot when one is configured.
    pub fn ledger(&self) -> EngineResult<InMemoryLedger> {
        match &self.settings.ledger.snapshot_path {
            Some(path) => InMemoryLedger::open(SnapshotFile::new(path)),
            None => Ok(InMemoryLedger::new()),
        }
    }

    /// Builds an engine wired to stores created from this configuration.
    pub fn build_engine(&self, clock: Arc<dyn Clock>) -> EngineResult<AttendanceEngine> {
        Ok(AttendanceEngine::new(
            Arc::new(self.policy_store()?),
            Arc::new(self.ledger()?),
            Arc::new(InMemoryRoster::from_employees(self.employees.iter().cloned())),
            clock,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn write_config(dir: &Path, engine: &str, policies: &str, roster: &str) {
        fs::write(dir.join("engine.yaml"), engine).unwrap();
        fs::write(dir.join("policies.yaml"), policies).unwrap();
        fs::write(dir.join("roster.yaml"), roster).unwrap();
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.bind_address(), "127.0.0.1:8080");
        assert!(loader.settings().policies.fallback_to_default);
        assert!(!loader.employees().is_empty());
    }

    #[test]
    fn test_policy_store_applies_entries() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let store = loader.policy_store().unwrap();

        let policy = store.get("northbuild").unwrap();
        assert_eq!(policy.work_start, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
        assert_eq!(policy.work_end, NaiveTime::from_hms_opt(15, 0, 0).unwrap());
        assert_eq!(policy.grace_period_minutes, 10);
        assert_eq!(policy.late_penalty_amount, dec("75"));
    }

    #[test]
    fn test_unlisted_company_gets_default() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let store = loader.policy_store().unwrap();

        let policy = store.get("unlisted").unwrap();
        assert_eq!(policy.work_start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(policy.grace_period_minutes, 15);
        assert_eq!(policy.late_penalty_amount, dec("50"));
    }

    #[test]
    fn test_roster_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let employee = loader
            .employees()
            .iter()
            .find(|e| e.id == "emp_001")
            .unwrap();
        assert_eq!(employee.base_salary, dec("22000"));
        assert_eq!(employee.company_id, "northbuild");
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "server: [unclosed", "policies: []", "employees: []");

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("engine.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_policy_window_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "{}",
            "policies:\n  - company_id: acme\n    work_start: \"17:00\"\n    work_end: \"09:00\"\n",
            "employees: []",
        );

        assert!(matches!(
            ConfigLoader::load(dir.path()),
            Err(EngineError::Validation { .. })
        ));
    }

    #[test]
    fn test_duplicate_company_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "{}",
            "policies:\n  - company_id: acme\n  - company_id: acme\n",
            "employees: []",
        );

        assert!(matches!(
            ConfigLoader::load(dir.path()),
            Err(EngineError::Validation { .. })
        ));
    }

    #[test]
    fn test_oversized_base_salary_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "{}",
            "policies: []",
            "employees:\n  - id: emp_001\n    base_salary: \"50000000000000000000000000000\"\n    company_id: acme\n",
        );

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "base_salary"),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_and_fallback_settings() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "policies:\n  fallback_to_default: false\n  default:\n    grace_period_minutes: 0\n",
            "policies:\n  - company_id: acme\n",
            "employees:\n  - id: emp_001\n    base_salary: \"1000\"\n    company_id: acme\n",
        );

        let loader = ConfigLoader::load(dir.path()).unwrap();
        let store = loader.policy_store().unwrap();
        assert_eq!(store.get("acme").unwrap().grace_period_minutes, 0);
        assert!(matches!(
            store.get("other"),
            Err(EngineError::PolicyResolution { .. })
        ));
    }

    #[test]
    fn test_build_engine_with_snapshot() {
        use crate::clock::FixedClock;
        use chrono::NaiveDate;

        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("data").join("ledger.json");
        write_config(
            dir.path(),
            &format!("ledger:\n  snapshot_path: \"{}\"\n", snapshot.display()),
            "policies: []",
            "employees:\n  - id: emp_001\n    base_salary: \"22000\"\n    company_id: acme\n",
        );
        let now = NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        let loader = ConfigLoader::load(dir.path()).unwrap();
        let engine = loader.build_engine(Arc::new(FixedClock::new(now))).unwrap();
        engine.clock_in("emp_001", None, now).unwrap();

        assert!(snapshot.exists());
    }
}
