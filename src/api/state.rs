//! Application state for the Attendance & Payroll Calculation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::workflow::AttendanceEngine;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// namely the engine with its store and rounding configuration.
#[derive(Clone)]
pub struct AppState {
    /// The engine instance.
    engine: Arc<AttendanceEngine>,
}

impl AppState {
    /// Creates a new application state wrapping the given engine.
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
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
