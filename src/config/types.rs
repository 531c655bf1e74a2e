//! Configuration types for the attendance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::path::PathBuf;

use serde::Deserialize;

use crate::models::{Employee, PolicyUpdate};

/// Default address the HTTP server binds to.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

/// Engine settings from `engine.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineSettings {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,
    /// Policy resolution settings.
    #[serde(default)]
    pub policies: PolicySettings,
    /// Ledger persistence settings.
    #[serde(default)]
    pub ledger: LedgerSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Socket address to listen on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Policy resolution settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicySettings {
    /// Whether unregistered companies receive the default policy.
    #[serde(default = "default_true")]
    pub fallback_to_default: bool,
    /// Overrides applied to the built-in default policy.
    #[serde(default)]
    pub default: PolicyUpdate,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            fallback_to_default: true,
            default: PolicyUpdate::default(),
        }
    }
}

/// Ledger persistence settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerSettings {
    /// Where to keep the JSON snapshot. Memory-only when absent.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

/// One company's entry in `policies.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyEntry {
    /// The company the policy belongs to.
    pub company_id: String,
    /// Fields set for this company; the rest come from the default policy.
    #[serde(flatten)]
    pub fields: PolicyUpdate,
}

/// `policies.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PoliciesConfig {
    /// Company policies.
    #[serde(default)]
    pub policies: Vec<PolicyEntry>,
}

/// `roster.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Employees known to the engine.
    #[serde(default)]
    pub employees: Vec<Employee>,
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

fn default_true() -> bool {
    true
}
