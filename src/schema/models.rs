//! Entity types for the five tables.

use crate::reports::shaping::full_name;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A cohort of students sharing a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

/// A teacher. Linked to subjects through `teacher_subject`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl Teacher {
    /// Returns "first last". Never stored.
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// A course. Grades belong to a subject, not to a teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Subject {
    pub id: i64,
    pub name: String,
}

/// A student, always a member of exactly one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub group_id: i64,
}

impl Student {
    /// Returns "first last". Never stored.
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// A single scored observation of a student in a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub grade: f64,
    pub date_received: NaiveDateTime,
}

/// Insert payload for a teacher.
#[derive(Debug, Clone, Default)]
pub struct NewTeacher {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Insert payload for a student.
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub group_id: i64,
}

/// Insert payload for a grade. `date_received` defaults to the current time
/// when absent.
#[derive(Debug, Clone, Default)]
pub struct NewGrade {
    pub student_id: i64,
    pub subject_id: i64,
    pub grade: f64,
    pub date_received: Option<NaiveDateTime>,
}
