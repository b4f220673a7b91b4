/// Database models for HiveDesk
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: HR and employee accounts
/// - `task`: Onboarding task catalog (HR-owned)
/// - `assignment`: Per-employee task assignments and completion
/// - `document`: Uploaded document metadata and verification state
/// - `training_module`: Training catalog (HR-owned)
/// - `training_progress`: Per-employee training progress

pub mod assignment;
pub mod document;
pub mod task;
pub mod training_module;
pub mod training_progress;
pub mod user;
