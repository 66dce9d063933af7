//! Grade accessors.

use super::models::{Grade, NewGrade};
use crate::error::{GradebookError, Result};
use sqlx::sqlite::SqlitePool;
use sqlx::SqliteExecutor;

/// Records a grade and returns its id. Without an explicit date the
/// column default (`datetime('now')`) applies.
pub async fn create_grade<'e>(
    executor: impl SqliteExecutor<'e>,
    grade: &NewGrade,
) -> Result<i64> {
    let query = match grade.date_received {
        Some(date) => sqlx::query(
            "INSERT INTO grades (student_id, subject_id, grade, date_received) VALUES (?, ?, ?, ?)",
        )
        .bind(grade.student_id)
        .bind(grade.subject_id)
        .bind(grade.grade)
        .bind(date),
        None => sqlx::query("INSERT INTO grades (student_id, subject_id, grade) VALUES (?, ?, ?)")
            .bind(grade.student_id)
            .bind(grade.subject_id)
            .bind(grade.grade),
    };

    let result = query
        .execute(executor)
        .await
        .map_err(|e| GradebookError::from_write("Failed to record grade", e))?;

    Ok(result.last_insert_rowid())
}

/// Lists a student's grades, oldest first.
pub async fn grades_of_student(pool: &SqlitePool, student_id: i64) -> Result<Vec<Grade>> {
    sqlx::query_as::<_, Grade>(
        r#"
        SELECT id, student_id, subject_id, grade, date_received
        FROM grades
        WHERE student_id = ?
        ORDER BY date_received, id
        "#,
    )
    .bind(student_id)
    .fetch_all(pool)
    .await
    .map_err(|e| GradebookError::query(format!("Failed to list grades: {e}")))
}

/// Counts every grade row.
pub async fn count_grades(pool: &SqlitePool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM grades")
        .fetch_one(pool)
        .await
        .map_err(|e| GradebookError::query(format!("Failed to count grades: {e}")))
}
