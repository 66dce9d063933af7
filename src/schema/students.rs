//! Student accessors.

use super::models::{NewStudent, Student};
use crate::error::{GradebookError, Result};
use sqlx::sqlite::SqlitePool;
use sqlx::SqliteExecutor;

const STUDENT_COLUMNS: &str = "id, first_name, last_name, email, phone, group_id";

/// Creates a student in an existing group and returns its id.
pub async fn create_student<'e>(
    executor: impl SqliteExecutor<'e>,
    student: &NewStudent,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO students (first_name, last_name, email, phone, group_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&student.first_name)
    .bind(&student.last_name)
    .bind(&student.email)
    .bind(&student.phone)
    .bind(student.group_id)
    .execute(executor)
    .await
    .map_err(|e| {
        GradebookError::from_write(&format!("Failed to create student '{}'", student.email), e)
    })?;

    Ok(result.last_insert_rowid())
}

/// Gets a student by id.
pub async fn get_student(pool: &SqlitePool, id: i64) -> Result<Option<Student>> {
    let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?");
    sqlx::query_as::<_, Student>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| GradebookError::query(format!("Failed to get student: {e}")))
}

/// Lists all students ordered by id.
pub async fn list_students(pool: &SqlitePool) -> Result<Vec<Student>> {
    let sql = format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY id");
    sqlx::query_as::<_, Student>(&sql)
        .fetch_all(pool)
        .await
        .map_err(|e| GradebookError::query(format!("Failed to list students: {e}")))
}

/// Deletes a student together with all of their grades.
/// Returns false if no such student existed.
pub async fn delete_student(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| GradebookError::from_write("Failed to delete student", e))?;

    Ok(result.rows_affected() > 0)
}
