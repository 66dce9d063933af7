//! Group accessors.

use super::models::Group;
use crate::error::{GradebookError, Result};
use sqlx::sqlite::SqlitePool;
use sqlx::SqliteExecutor;

/// Creates a group and returns its id.
pub async fn create_group<'e>(executor: impl SqliteExecutor<'e>, name: &str) -> Result<i64> {
    let result = sqlx::query("INSERT INTO groups (name) VALUES (?)")
        .bind(name)
        .execute(executor)
        .await
        .map_err(|e| {
            GradebookError::from_write(&format!("Failed to create group '{name}'"), e)
        })?;

    Ok(result.last_insert_rowid())
}

/// Gets a group by id.
pub async fn get_group(pool: &SqlitePool, id: i64) -> Result<Option<Group>> {
    sqlx::query_as::<_, Group>("SELECT id, name FROM groups WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| GradebookError::query(format!("Failed to get group: {e}")))
}

/// Lists all groups ordered by name.
pub async fn list_groups(pool: &SqlitePool) -> Result<Vec<Group>> {
    sqlx::query_as::<_, Group>("SELECT id, name FROM groups ORDER BY name, id")
        .fetch_all(pool)
        .await
        .map_err(|e| GradebookError::query(format!("Failed to list groups: {e}")))
}

/// Deletes a group. Fails with a constraint error while students still
/// belong to it. Returns false if no such group existed.
pub async fn delete_group(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM groups WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| GradebookError::from_write("Failed to delete group", e))?;

    Ok(result.rows_affected() > 0)
}
