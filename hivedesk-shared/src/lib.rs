//! # HiveDesk Shared Library
//!
//! This crate contains the models, authorization rules, and reporting logic
//! shared by the HiveDesk onboarding API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `auth`: Password hashing, JWT tokens, request auth, access policy
//! - `db`: Connection pool and migration runner
//! - `reports`: Read-only performance aggregation

pub mod auth;
pub mod db;
pub mod models;
pub mod reports;

/// Current version of the HiveDesk shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
