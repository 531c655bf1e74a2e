//! Application state for the Attendance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::AttendanceEngine;

/// Shared application state.
///
/// Holds the engine every handler operates on. Cloning is cheap: the engine
/// sits behind an `Arc` and its stores are shared.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<AttendanceEngine>,
}

impl AppState {
    /// Creates a new application state around `engine`.
    pub fn new(engine: AttendanceEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &AttendanceEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }
}
