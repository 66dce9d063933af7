//! Teacher accessors and the teacher/subject association.

use super::models::{NewTeacher, Teacher};
use crate::error::{GradebookError, Result};
use sqlx::sqlite::SqlitePool;
use sqlx::SqliteExecutor;

/// Creates a teacher and returns its id.
pub async fn create_teacher<'e>(
    executor: impl SqliteExecutor<'e>,
    teacher: &NewTeacher,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO teachers (first_name, last_name, email, phone)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&teacher.first_name)
    .bind(&teacher.last_name)
    .bind(&teacher.email)
    .bind(&teacher.phone)
    .execute(executor)
    .await
    .map_err(|e| {
        GradebookError::from_write(&format!("Failed to create teacher '{}'", teacher.email), e)
    })?;

    Ok(result.last_insert_rowid())
}

/// Gets a teacher by id.
pub async fn get_teacher(pool: &SqlitePool, id: i64) -> Result<Option<Teacher>> {
    sqlx::query_as::<_, Teacher>(
        "SELECT id, first_name, last_name, email, phone FROM teachers WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| GradebookError::query(format!("Failed to get teacher: {e}")))
}

/// Lists all teachers ordered by id.
pub async fn list_teachers(pool: &SqlitePool) -> Result<Vec<Teacher>> {
    sqlx::query_as::<_, Teacher>(
        "SELECT id, first_name, last_name, email, phone FROM teachers ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| GradebookError::query(format!("Failed to list teachers: {e}")))
}

/// Links a teacher to a subject. Linking an existing pair is a no-op.
pub async fn assign_teacher<'e>(
    executor: impl SqliteExecutor<'e>,
    teacher_id: i64,
    subject_id: i64,
) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO teacher_subject (teacher_id, subject_id) VALUES (?, ?)")
        .bind(teacher_id)
        .bind(subject_id)
        .execute(executor)
        .await
        .map_err(|e| GradebookError::from_write("Failed to assign teacher to subject", e))?;

    Ok(())
}

/// Lists the teachers linked to a subject.
pub async fn teachers_of_subject(pool: &SqlitePool, subject_id: i64) -> Result<Vec<Teacher>> {
    sqlx::query_as::<_, Teacher>(
        r#"
        SELECT t.id, t.first_name, t.last_name, t.email, t.phone
        FROM teachers t
        JOIN teacher_subject ts ON ts.teacher_id = t.id
        WHERE ts.subject_id = ?
        ORDER BY t.id
        "#,
    )
    .bind(subject_id)
    .fetch_all(pool)
    .await
    .map_err(|e| GradebookError::query(format!("Failed to list teachers of subject: {e}")))
}
