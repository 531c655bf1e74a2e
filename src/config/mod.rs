//! Configuration loading and management for the Attendance Engine.
//!
//! This module loads engine settings, company policies and the employee
//! roster from YAML files and builds a ready-to-use engine from them.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Listening on {}", config.bind_address());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_BIND_ADDRESS, EngineSettings, LedgerSettings, PoliciesConfig, PolicyEntry,
    PolicySettings, RosterConfig, ServerSettings,
};
