//! Read-only report queries over the gradebook schema.
//!
//! Every operation is a single SQL statement against the pool: averages are
//! computed by `AVG()` in the database and only rounded here. Unknown ids
//! produce an empty `Vec` or `None`, never an error; storage failures are
//! returned as [`GradebookError::Query`] without retrying.

mod catalog;
pub mod shaping;
mod types;

pub use catalog::{run_report, Report, ReportOutput};
pub use types::{
    GradeRecord, GroupAverage, GroupMember, GroupSubjectAverage, StudentAverage, SubjectAverage,
};

use crate::error::{GradebookError, Result};
use crate::schema::Subject;
use shaping::shape_average;
use sqlx::sqlite::SqlitePool;
use tracing::debug;
use types::{
    GradeRecordRow, GroupAverageRow, GroupSubjectAverageRow, StudentAverageRow, SubjectAverageRow,
};

/// Number of rows returned by [`top_students_by_overall_average`].
pub const TOP_STUDENTS_LIMIT: i64 = 5;

fn report_error(report: &str, err: sqlx::Error) -> GradebookError {
    GradebookError::query(format!("{report} failed: {err}"))
}

/// The five students with the highest average over all their grades.
///
/// Ties keep the lower student id first.
pub async fn top_students_by_overall_average(pool: &SqlitePool) -> Result<Vec<StudentAverage>> {
    let rows: Vec<StudentAverageRow> = sqlx::query_as(
        r#"
        SELECT s.id,
               s.first_name || ' ' || s.last_name AS full_name,
               AVG(g.grade) AS avg_grade
        FROM students s
        JOIN grades g ON g.student_id = s.id
        GROUP BY s.id, s.first_name, s.last_name
        ORDER BY avg_grade DESC, s.id
        LIMIT ?
        "#,
    )
    .bind(TOP_STUDENTS_LIMIT)
    .fetch_all(pool)
    .await
    .map_err(|e| report_error("top_students_by_overall_average", e))?;

    debug!("top_students_by_overall_average returned {} rows", rows.len());
    Ok(rows.into_iter().map(StudentAverage::from).collect())
}

/// The student with the highest average in one subject.
pub async fn top_student_in_subject(
    pool: &SqlitePool,
    subject_id: i64,
) -> Result<Option<StudentAverage>> {
    let row: Option<StudentAverageRow> = sqlx::query_as(
        r#"
        SELECT s.id,
               s.first_name || ' ' || s.last_name AS full_name,
               AVG(g.grade) AS avg_grade
        FROM students s
        JOIN grades g ON g.student_id = s.id
        WHERE g.subject_id = ?
        GROUP BY s.id, s.first_name, s.last_name
        ORDER BY avg_grade DESC, s.id
        LIMIT 1
        "#,
    )
    .bind(subject_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| report_error("top_student_in_subject", e))?;

    debug!(
        "top_student_in_subject(subject={}) found={}",
        subject_id,
        row.is_some()
    );
    Ok(row.map(StudentAverage::from))
}

/// Per-group average and grade count in one subject, best group first.
///
/// Groups without grades in the subject are not listed.
pub async fn group_averages_in_subject(
    pool: &SqlitePool,
    subject_id: i64,
) -> Result<Vec<GroupSubjectAverage>> {
    let rows: Vec<GroupSubjectAverageRow> = sqlx::query_as(
        r#"
        SELECT gr.id,
               gr.name,
               AVG(g.grade) AS avg_grade,
               COUNT(g.id) AS grade_count
        FROM grades g
        JOIN students s ON s.id = g.student_id
        JOIN groups gr ON gr.id = s.group_id
        WHERE g.subject_id = ?
        GROUP BY gr.id, gr.name
        ORDER BY avg_grade DESC, gr.id
        "#,
    )
    .bind(subject_id)
    .fetch_all(pool)
    .await
    .map_err(|e| report_error("group_averages_in_subject", e))?;

    debug!(
        "group_averages_in_subject(subject={}) returned {} rows",
        subject_id,
        rows.len()
    );
    Ok(rows.into_iter().map(GroupSubjectAverage::from).collect())
}

/// Every group with its average over all subjects, ordered by group name.
///
/// A group whose students have no grades is listed with `avg_grade: None`
/// instead of being dropped, as a grades-first inner join would do.
pub async fn group_averages_overall(pool: &SqlitePool) -> Result<Vec<GroupAverage>> {
    let rows: Vec<GroupAverageRow> = sqlx::query_as(
        r#"
        SELECT gr.id,
               gr.name,
               AVG(g.grade) AS avg_grade
        FROM groups gr
        LEFT JOIN students s ON s.group_id = gr.id
        LEFT JOIN grades g ON g.student_id = s.id
        GROUP BY gr.id, gr.name
        ORDER BY gr.name, gr.id
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| report_error("group_averages_overall", e))?;

    debug!("group_averages_overall returned {} rows", rows.len());
    Ok(rows.into_iter().map(GroupAverage::from).collect())
}

/// Average of every grade in the database, or `None` if there are none.
pub async fn overall_average(pool: &SqlitePool) -> Result<Option<f64>> {
    let avg: Option<f64> = sqlx::query_scalar("SELECT AVG(grade) FROM grades")
        .fetch_one(pool)
        .await
        .map_err(|e| report_error("overall_average", e))?;

    debug!("overall_average = {:?}", avg);
    Ok(shape_average(avg))
}

/// Subjects linked to a teacher.
pub async fn subjects_taught_by_teacher(
    pool: &SqlitePool,
    teacher_id: i64,
) -> Result<Vec<Subject>> {
    let rows: Vec<Subject> = sqlx::query_as(
        r#"
        SELECT s.id, s.name
        FROM subjects s
        JOIN teacher_subject ts ON ts.subject_id = s.id
        WHERE ts.teacher_id = ?
        ORDER BY s.name, s.id
        "#,
    )
    .bind(teacher_id)
    .fetch_all(pool)
    .await
    .map_err(|e| report_error("subjects_taught_by_teacher", e))?;

    debug!(
        "subjects_taught_by_teacher(teacher={}) returned {} rows",
        teacher_id,
        rows.len()
    );
    Ok(rows)
}

/// Roster of a group ordered by last name, then first name.
pub async fn students_in_group(pool: &SqlitePool, group_id: i64) -> Result<Vec<GroupMember>> {
    let rows: Vec<GroupMember> = sqlx::query_as(
        r#"
        SELECT id,
               first_name || ' ' || last_name AS full_name,
               email
        FROM students
        WHERE group_id = ?
        ORDER BY last_name, first_name, id
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await
    .map_err(|e| report_error("students_in_group", e))?;

    debug!(
        "students_in_group(group={}) returned {} rows",
        group_id,
        rows.len()
    );
    Ok(rows)
}

/// Every grade given in one subject to members of one group, ordered by
/// student full name and then by date received.
pub async fn grades_for_group_in_subject(
    pool: &SqlitePool,
    group_id: i64,
    subject_id: i64,
) -> Result<Vec<GradeRecord>> {
    let rows: Vec<GradeRecordRow> = sqlx::query_as(
        r#"
        SELECT s.id AS student_id,
               s.first_name || ' ' || s.last_name AS full_name,
               g.grade,
               g.date_received
        FROM grades g
        JOIN students s ON s.id = g.student_id
        WHERE s.group_id = ? AND g.subject_id = ?
        ORDER BY full_name, g.date_received, g.id
        "#,
    )
    .bind(group_id)
    .bind(subject_id)
    .fetch_all(pool)
    .await
    .map_err(|e| report_error("grades_for_group_in_subject", e))?;

    debug!(
        "grades_for_group_in_subject(group={}, subject={}) returned {} rows",
        group_id,
        subject_id,
        rows.len()
    );
    Ok(rows.into_iter().map(GradeRecord::from).collect())
}

/// Average grade of each subject a teacher is linked to.
///
/// Grades carry no grader, so the average covers every grade of the subject.
/// A linked subject without grades is listed with `avg_grade: None`.
pub async fn per_subject_average_for_teacher(
    pool: &SqlitePool,
    teacher_id: i64,
) -> Result<Vec<SubjectAverage>> {
    let rows: Vec<SubjectAverageRow> = sqlx::query_as(
        r#"
        SELECT s.id AS subject_id,
               s.name AS subject_name,
               AVG(g.grade) AS avg_grade
        FROM teacher_subject ts
        JOIN subjects s ON s.id = ts.subject_id
        LEFT JOIN grades g ON g.subject_id = s.id
        WHERE ts.teacher_id = ?
        GROUP BY s.id, s.name
        ORDER BY s.name, s.id
        "#,
    )
    .bind(teacher_id)
    .fetch_all(pool)
    .await
    .map_err(|e| report_error("per_subject_average_for_teacher", e))?;

    debug!(
        "per_subject_average_for_teacher(teacher={}) returned {} rows",
        teacher_id,
        rows.len()
    );
    Ok(rows.into_iter().map(SubjectAverage::from).collect())
}

/// Subjects in which a student has at least one grade, each listed once.
pub async fn courses_student_attends(pool: &SqlitePool, student_id: i64) -> Result<Vec<Subject>> {
    let rows: Vec<Subject> = sqlx::query_as(
        r#"
        SELECT DISTINCT s.id, s.name
        FROM subjects s
        JOIN grades g ON g.subject_id = s.id
        WHERE g.student_id = ?
        ORDER BY s.name, s.id
        "#,
    )
    .bind(student_id)
    .fetch_all(pool)
    .await
    .map_err(|e| report_error("courses_student_attends", e))?;

    debug!(
        "courses_student_attends(student={}) returned {} rows",
        student_id,
        rows.len()
    );
    Ok(rows)
}

/// Subjects both linked to the teacher and graded for the student.
pub async fn courses_taught_by_teacher_to_student(
    pool: &SqlitePool,
    student_id: i64,
    teacher_id: i64,
) -> Result<Vec<Subject>> {
    let rows: Vec<Subject> = sqlx::query_as(
        r#"
        SELECT s.id, s.name
        FROM subjects s
        JOIN teacher_subject ts ON ts.subject_id = s.id
        WHERE ts.teacher_id = ?
          AND EXISTS (
              SELECT 1 FROM grades g
              WHERE g.subject_id = s.id AND g.student_id = ?
          )
        ORDER BY s.name, s.id
        "#,
    )
    .bind(teacher_id)
    .bind(student_id)
    .fetch_all(pool)
    .await
    .map_err(|e| report_error("courses_taught_by_teacher_to_student", e))?;

    debug!(
        "courses_taught_by_teacher_to_student(student={}, teacher={}) returned {} rows",
        student_id,
        teacher_id,
        rows.len()
    );
    Ok(rows)
}
