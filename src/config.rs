//! Configuration management for Gradebook.
//!
//! Handles loading configuration from TOML files and environment variables:
//! where the database lives, how the pool is sized, and defaults for the
//! fixture generator.

use crate::error::{GradebookError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the database path.
pub const DATABASE_ENV: &str = "GRADEBOOK_DATABASE";

/// Main configuration structure for Gradebook.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Database location and pool settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Fixture generator defaults.
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file. Defaults to the platform data directory.
    pub path: Option<PathBuf>,

    /// Maximum pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long a connection waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_busy_timeout_secs() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    /// Returns the configured database path, or the platform default.
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_database_path)
    }
}

/// Fixture generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Number of students to generate.
    #[serde(default = "default_students")]
    pub students: usize,

    /// Number of teachers to generate.
    #[serde(default = "default_teachers")]
    pub teachers: usize,

    /// Fixed RNG seed for reproducible fixtures.
    pub rng_seed: Option<u64>,
}

fn default_students() -> usize {
    50
}

fn default_teachers() -> usize {
    5
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            students: default_students(),
            teachers: default_teachers(),
            rng_seed: None,
        }
    }
}

/// Returns the default database path for the current platform.
///
/// - Linux: `~/.local/share/gradebook/gradebook.db`
/// - macOS: `~/Library/Application Support/gradebook/gradebook.db`
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gradebook")
        .join("gradebook.db")
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gradebook")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GradebookError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            GradebookError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the pool cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            return Err(GradebookError::config(
                "database.max_connections must be at least 1",
            ));
        }
        Ok(())
    }
}
