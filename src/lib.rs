//! Gradebook - academic performance reports over SQLite.
//!
//! The report layer lives in [`reports`]; [`schema`] owns the tables and the
//! fixture accessors, and [`db::Gradebook`] opens a migrated pool.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod reports;
pub mod schema;
pub mod seed;

pub use db::Gradebook;
pub use error::{GradebookError, Result};
