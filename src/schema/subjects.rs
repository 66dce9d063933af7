//! Subject accessors.

use super::models::Subject;
use crate::error::{GradebookError, Result};
use sqlx::sqlite::SqlitePool;
use sqlx::SqliteExecutor;

/// Creates a subject and returns its id.
pub async fn create_subject<'e>(executor: impl SqliteExecutor<'e>, name: &str) -> Result<i64> {
    let result = sqlx::query("INSERT INTO subjects (name) VALUES (?)")
        .bind(name)
        .execute(executor)
        .await
        .map_err(|e| {
            GradebookError::from_write(&format!("Failed to create subject '{name}'"), e)
        })?;

    Ok(result.last_insert_rowid())
}

/// Gets a subject by id.
pub async fn get_subject(pool: &SqlitePool, id: i64) -> Result<Option<Subject>> {
    sqlx::query_as::<_, Subject>("SELECT id, name FROM subjects WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| GradebookError::query(format!("Failed to get subject: {e}")))
}

/// Lists all subjects ordered by name.
pub async fn list_subjects(pool: &SqlitePool) -> Result<Vec<Subject>> {
    sqlx::query_as::<_, Subject>("SELECT id, name FROM subjects ORDER BY name, id")
        .fetch_all(pool)
        .await
        .map_err(|e| GradebookError::query(format!("Failed to list subjects: {e}")))
}

/// Deletes a subject together with its grades and teacher links.
/// Returns false if no such subject existed.
pub async fn delete_subject(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM subjects WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| GradebookError::from_write("Failed to delete subject", e))?;

    Ok(result.rows_affected() > 0)
}
