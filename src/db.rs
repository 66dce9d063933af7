//! Connection handling for the gradebook database.
//!
//! Opens a SQLite pool with foreign keys enforced and brings the schema up to
//! date. Report functions only need the pool; this type owns its lifecycle.

use crate::config::DatabaseConfig;
use crate::error::{GradebookError, Result};
use crate::schema::run_migrations;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

const MAX_RETRY_ATTEMPTS: u32 = 3;
const RETRY_DELAY_MS: u64 = 100;

/// An open, migrated gradebook database.
pub struct Gradebook {
    pool: SqlitePool,
    db_path: Option<PathBuf>,
}

impl Gradebook {
    /// Opens or creates the database described by `config`.
    pub async fn open_with(config: &DatabaseConfig) -> Result<Self> {
        let path = config.resolved_path();
        Self::ensure_parent_dirs(&path)?;

        let mut last_error = None;

        for attempt in 0..MAX_RETRY_ATTEMPTS {
            if attempt > 0 {
                let delay = Duration::from_millis(RETRY_DELAY_MS * 2u64.pow(attempt));
                warn!("Retrying database open in {:?}", delay);
                tokio::time::sleep(delay).await;
            }

            match Self::connect(&path, config).await {
                Ok(pool) => {
                    run_migrations(&pool).await?;
                    info!("Gradebook database opened at {}", path.display());
                    return Ok(Self {
                        pool,
                        db_path: Some(path),
                    });
                }
                Err(e) => {
                    debug!("Open attempt {} failed: {e}", attempt + 1);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            GradebookError::connection("Failed to open database after retries")
        }))
    }

    /// Opens or creates the database at `path` with default pool settings.
    pub async fn open(path: &Path) -> Result<Self> {
        let config = DatabaseConfig {
            path: Some(path.to_path_buf()),
            ..Default::default()
        };
        Self::open_with(&config).await
    }

    /// Opens a private in-memory database. Used by tests and dry runs.
    ///
    /// The pool holds exactly one connection that is never recycled, since
    /// each SQLite memory connection is its own database.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| GradebookError::connection(format!("Invalid database URL: {e}")))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| {
                GradebookError::connection(format!("Failed to open in-memory database: {e}"))
            })?;

        run_migrations(&pool).await?;
        Ok(Self {
            pool,
            db_path: None,
        })
    }

    /// Creates a connection pool to the SQLite database.
    async fn connect(path: &Path, config: &DatabaseConfig) -> Result<SqlitePool> {
        let conn_str = format!("sqlite:{}?mode=rwc", path.display());
        let options = SqliteConnectOptions::from_str(&conn_str)
            .map_err(|e| GradebookError::connection(format!("Invalid database path: {e}")))?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(config.busy_timeout_secs))
            .foreign_keys(true)
            .create_if_missing(true);

        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(|e| {
                GradebookError::connection(format!("Failed to connect to {}: {e}", path.display()))
            })
    }

    /// Ensures parent directories exist for the database path.
    fn ensure_parent_dirs(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if parent.as_os_str().is_empty() {
                return Ok(());
            }
            std::fs::create_dir_all(parent).map_err(|e| {
                GradebookError::connection(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        Ok(())
    }

    /// Returns the database file path, or `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
