//! A closed list of the available reports, so callers can pick one at
//! runtime and get a serializable result back.

use super::types::{
    GradeRecord, GroupAverage, GroupMember, GroupSubjectAverage, StudentAverage, SubjectAverage,
};
use crate::error::Result;
use crate::schema::Subject;
use serde::Serialize;
use sqlx::sqlite::SqlitePool;

/// A report together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
    TopStudents,
    TopStudentInSubject { subject_id: i64 },
    GroupAveragesInSubject { subject_id: i64 },
    GroupAveragesOverall,
    OverallAverage,
    SubjectsTaughtByTeacher { teacher_id: i64 },
    StudentsInGroup { group_id: i64 },
    GradesForGroupInSubject { group_id: i64, subject_id: i64 },
    PerSubjectAverageForTeacher { teacher_id: i64 },
    CoursesStudentAttends { student_id: i64 },
    CoursesTaughtByTeacherToStudent { student_id: i64, teacher_id: i64 },
}

impl Report {
    /// Human-readable heading.
    pub fn title(&self) -> String {
        match self {
            Self::TopStudents => "Top 5 students by average grade".to_string(),
            Self::TopStudentInSubject { subject_id } => {
                format!("Best student in subject {subject_id}")
            }
            Self::GroupAveragesInSubject { subject_id } => {
                format!("Group averages in subject {subject_id}")
            }
            Self::GroupAveragesOverall => "Group averages across all subjects".to_string(),
            Self::OverallAverage => "Average of all grades".to_string(),
            Self::SubjectsTaughtByTeacher { teacher_id } => {
                format!("Subjects taught by teacher {teacher_id}")
            }
            Self::StudentsInGroup { group_id } => format!("Students in group {group_id}"),
            Self::GradesForGroupInSubject {
                group_id,
                subject_id,
            } => format!("Grades of group {group_id} in subject {subject_id}"),
            Self::PerSubjectAverageForTeacher { teacher_id } => {
                format!("Subject averages for teacher {teacher_id}")
            }
            Self::CoursesStudentAttends { student_id } => {
                format!("Courses attended by student {student_id}")
            }
            Self::CoursesTaughtByTeacherToStudent {
                student_id,
                teacher_id,
            } => format!("Courses teacher {teacher_id} teaches student {student_id}"),
        }
    }
}

/// The result of running a [`Report`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportOutput {
    StudentAverages(Vec<StudentAverage>),
    TopStudent(Option<StudentAverage>),
    GroupSubjectAverages(Vec<GroupSubjectAverage>),
    GroupAverages(Vec<GroupAverage>),
    Average(Option<f64>),
    Subjects(Vec<Subject>),
    Members(Vec<GroupMember>),
    Grades(Vec<GradeRecord>),
    SubjectAverages(Vec<SubjectAverage>),
}

impl ReportOutput {
    /// Number of result rows. A scalar or single-row result counts as one
    /// row when present.
    pub fn len(&self) -> usize {
        match self {
            Self::StudentAverages(rows) => rows.len(),
            Self::TopStudent(row) => usize::from(row.is_some()),
            Self::GroupSubjectAverages(rows) => rows.len(),
            Self::GroupAverages(rows) => rows.len(),
            Self::Average(value) => usize::from(value.is_some()),
            Self::Subjects(rows) => rows.len(),
            Self::Members(rows) => rows.len(),
            Self::Grades(rows) => rows.len(),
            Self::SubjectAverages(rows) => rows.len(),
        }
    }

    /// True when the report matched nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runs one report against the pool.
pub async fn run_report(pool: &SqlitePool, report: Report) -> Result<ReportOutput> {
    let output = match report {
        Report::TopStudents => {
            ReportOutput::StudentAverages(super::top_students_by_overall_average(pool).await?)
        }
        Report::TopStudentInSubject { subject_id } => {
            ReportOutput::TopStudent(super::top_student_in_subject(pool, subject_id).await?)
        }
        Report::GroupAveragesInSubject { subject_id } => ReportOutput::GroupSubjectAverages(
            super::group_averages_in_subject(pool, subject_id).await?,
        ),
        Report::GroupAveragesOverall => {
            ReportOutput::GroupAverages(super::group_averages_overall(pool).await?)
        }
        Report::OverallAverage => ReportOutput::Average(super::overall_average(pool).await?),
        Report::SubjectsTaughtByTeacher { teacher_id } => {
            ReportOutput::Subjects(super::subjects_taught_by_teacher(pool, teacher_id).await?)
        }
        Report::StudentsInGroup { group_id } => {
            ReportOutput::Members(super::students_in_group(pool, group_id).await?)
        }
        Report::GradesForGroupInSubject {
            group_id,
            subject_id,
        } => ReportOutput::Grades(
            super::grades_for_group_in_subject(pool, group_id, subject_id).await?,
        ),
        Report::PerSubjectAverageForTeacher { teacher_id } => ReportOutput::SubjectAverages(
            super::per_subject_average_for_teacher(pool, teacher_id).await?,
        ),
        Report::CoursesStudentAttends { student_id } => {
            ReportOutput::Subjects(super::courses_student_attends(pool, student_id).await?)
        }
        Report::CoursesTaughtByTeacherToStudent {
            student_id,
            teacher_id,
        } => ReportOutput::Subjects(
            super::courses_taught_by_teacher_to_student(pool, student_id, teacher_id).await?,
        ),
    };

    Ok(output)
}
