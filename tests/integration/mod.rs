//! Integration tests for Gradebook.

pub mod reports_test;
pub mod schema_test;
pub mod seed_test;
