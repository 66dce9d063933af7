//! Schema versioning and migrations for the gradebook database.
//!
//! Manages database schema evolution with forward-only migrations.

use crate::error::{GradebookError, Result};
use sqlx::sqlite::SqlitePool;
use tracing::info;

pub(crate) const CURRENT_VERSION: i32 = 2;

/// Runs all pending migrations on the database.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    ensure_schema_versions_table(pool).await?;

    let current = get_current_version(pool).await?;

    // Check if database is newer than code
    if current > CURRENT_VERSION {
        return Err(GradebookError::migration(format!(
            "Database schema version ({}) is newer than supported version ({}). \
             Please upgrade gradebook to the latest version.",
            current, CURRENT_VERSION
        )));
    }

    if current < CURRENT_VERSION {
        info!(
            "Migrating gradebook database from version {} to {}",
            current, CURRENT_VERSION
        );
        run_pending_migrations(pool, current).await?;
    }

    Ok(())
}

/// Ensures the schema_versions table exists.
async fn ensure_schema_versions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_versions (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| {
        GradebookError::migration(format!("Failed to create schema_versions table: {e}"))
    })?;

    Ok(())
}

/// Gets the current schema version.
pub(crate) async fn get_current_version(pool: &SqlitePool) -> Result<i32> {
    let row: Option<(Option<i32>,)> = sqlx::query_as("SELECT MAX(version) FROM schema_versions")
        .fetch_optional(pool)
        .await
        .map_err(|e| GradebookError::migration(format!("Failed to get schema version: {e}")))?;

    Ok(row.and_then(|(v,)| v).unwrap_or(0))
}

/// Runs migrations from the current version to the target version.
async fn run_pending_migrations(pool: &SqlitePool, from_version: i32) -> Result<()> {
    for version in (from_version + 1)..=CURRENT_VERSION {
        run_migration(pool, version).await?;
        record_version(pool, version).await?;
        info!("Applied migration v{}", version);
    }
    Ok(())
}

/// Records a completed migration version.
async fn record_version(pool: &SqlitePool, version: i32) -> Result<()> {
    sqlx::query("INSERT INTO schema_versions (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await
        .map_err(|e| GradebookError::migration(format!("Failed to record migration: {e}")))?;
    Ok(())
}

/// Runs a specific migration version.
async fn run_migration(pool: &SqlitePool, version: i32) -> Result<()> {
    match version {
        1 => migration_v1(pool).await,
        2 => migration_v2(pool).await,
        _ => Err(GradebookError::migration(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Executes one DDL statement, labelling failures with `what`.
async fn execute_ddl(pool: &SqlitePool, sql: &str, what: &str) -> Result<()> {
    sqlx::query(sql)
        .execute(pool)
        .await
        .map_err(|e| GradebookError::migration(format!("Failed to create {what}: {e}")))?;
    Ok(())
}

/// Migration v1: the five entity tables and the teacher/subject association.
///
/// Students reference their group with `ON DELETE RESTRICT`: a group with
/// members cannot be removed until they are moved or deleted.
async fn migration_v1(pool: &SqlitePool) -> Result<()> {
    execute_ddl(
        pool,
        r#"
        CREATE TABLE IF NOT EXISTS groups (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
        "groups table",
    )
    .await?;

    execute_ddl(
        pool,
        r#"
        CREATE TABLE IF NOT EXISTS teachers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone TEXT
        )
        "#,
        "teachers table",
    )
    .await?;

    execute_ddl(
        pool,
        r#"
        CREATE TABLE IF NOT EXISTS subjects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
        "subjects table",
    )
    .await?;

    execute_ddl(
        pool,
        r#"
        CREATE TABLE IF NOT EXISTS teacher_subject (
            teacher_id INTEGER NOT NULL,
            subject_id INTEGER NOT NULL,
            PRIMARY KEY (teacher_id, subject_id),
            FOREIGN KEY (teacher_id) REFERENCES teachers(id) ON DELETE CASCADE,
            FOREIGN KEY (subject_id) REFERENCES subjects(id) ON DELETE CASCADE
        )
        "#,
        "teacher_subject table",
    )
    .await?;

    execute_ddl(
        pool,
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone TEXT,
            group_id INTEGER NOT NULL,
            FOREIGN KEY (group_id) REFERENCES groups(id) ON DELETE RESTRICT
        )
        "#,
        "students table",
    )
    .await?;

    execute_ddl(
        pool,
        r#"
        CREATE TABLE IF NOT EXISTS grades (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id INTEGER NOT NULL,
            subject_id INTEGER NOT NULL,
            grade REAL NOT NULL,
            date_received TEXT NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY (student_id) REFERENCES students(id) ON DELETE CASCADE,
            FOREIGN KEY (subject_id) REFERENCES subjects(id) ON DELETE CASCADE
        )
        "#,
        "grades table",
    )
    .await?;

    Ok(())
}

/// Migration v2: indexes backing the report joins.
async fn migration_v2(pool: &SqlitePool) -> Result<()> {
    execute_ddl(
        pool,
        "CREATE INDEX IF NOT EXISTS idx_students_group ON students(group_id)",
        "students group index",
    )
    .await?;

    execute_ddl(
        pool,
        "CREATE INDEX IF NOT EXISTS idx_grades_student ON grades(student_id)",
        "grades student index",
    )
    .await?;

    execute_ddl(
        pool,
        "CREATE INDEX IF NOT EXISTS idx_grades_subject ON grades(subject_id)",
        "grades subject index",
    )
    .await?;

    execute_ddl(
        pool,
        "CREATE INDEX IF NOT EXISTS idx_teacher_subject_subject ON teacher_subject(subject_id)",
        "teacher_subject index",
    )
    .await?;

    Ok(())
}
