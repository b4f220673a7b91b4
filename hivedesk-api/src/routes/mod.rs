/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Liveness check
/// - `auth`: Login and HR-only registration
/// - `dashboard`: Role-dependent summary views
/// - `employees`: HR employee management
/// - `tasks`: Task catalog, assignment, completion
/// - `documents`: Upload, listing, verification
/// - `training`: Module catalog and progress
/// - `reports`: HR performance reporting

use serde::Serialize;

pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod employees;
pub mod health;
pub mod reports;
pub mod tasks;
pub mod training;

/// Plain acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

impl MessageResponse {
    /// Builds an acknowledgement
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
