//! Row types returned by the report operations.
//!
//! Each public row has a private `*Row` twin decoded straight from SQL; the
//! `From` conversions apply rounding and date formatting.

use super::shaping::{format_date, round_average, shape_average};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A student with their average grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentAverage {
    pub id: i64,
    pub full_name: String,
    pub avg_grade: f64,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct StudentAverageRow {
    id: i64,
    full_name: String,
    avg_grade: f64,
}

impl From<StudentAverageRow> for StudentAverage {
    fn from(row: StudentAverageRow) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            avg_grade: round_average(row.avg_grade),
        }
    }
}

/// A group's average in one subject and how many grades it is based on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSubjectAverage {
    pub id: i64,
    pub name: String,
    pub avg_grade: f64,
    pub grade_count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct GroupSubjectAverageRow {
    id: i64,
    name: String,
    avg_grade: f64,
    grade_count: i64,
}

impl From<GroupSubjectAverageRow> for GroupSubjectAverage {
    fn from(row: GroupSubjectAverageRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            avg_grade: round_average(row.avg_grade),
            grade_count: row.grade_count,
        }
    }
}

/// A group's average across all subjects. `None` when the group has no grades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAverage {
    pub id: i64,
    pub name: String,
    pub avg_grade: Option<f64>,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct GroupAverageRow {
    id: i64,
    name: String,
    avg_grade: Option<f64>,
}

impl From<GroupAverageRow> for GroupAverage {
    fn from(row: GroupAverageRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            avg_grade: shape_average(row.avg_grade),
        }
    }
}

/// A subject's average over every grade recorded for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectAverage {
    pub subject_id: i64,
    pub subject_name: String,
    pub avg_grade: Option<f64>,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct SubjectAverageRow {
    subject_id: i64,
    subject_name: String,
    avg_grade: Option<f64>,
}

impl From<SubjectAverageRow> for SubjectAverage {
    fn from(row: SubjectAverageRow) -> Self {
        Self {
            subject_id: row.subject_id,
            subject_name: row.subject_name,
            avg_grade: shape_average(row.avg_grade),
        }
    }
}

/// A roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GroupMember {
    pub id: i64,
    pub full_name: String,
    pub email: String,
}

/// One grade of one student, with the date reduced to `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub student_id: i64,
    pub full_name: String,
    pub grade: f64,
    pub date_received: String,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct GradeRecordRow {
    student_id: i64,
    full_name: String,
    grade: f64,
    date_received: NaiveDateTime,
}

impl From<GradeRecordRow> for GradeRecord {
    fn from(row: GradeRecordRow) -> Self {
        Self {
            student_id: row.student_id,
            full_name: row.full_name,
            grade: row.grade,
            date_received: format_date(&row.date_received),
        }
    }
}
