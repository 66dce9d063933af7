//! Fixture generation.
//!
//! Fills an empty gradebook with three groups, a handful of teachers, eight
//! subjects with one to three teachers each, and students graded in five to
//! eight subjects. Everything is written in a single transaction.

use crate::config::SeedConfig;
use crate::error::{GradebookError, Result};
use crate::schema::{
    assign_teacher, create_grade, create_group, create_student, create_subject, create_teacher,
    NewGrade, NewStudent, NewTeacher,
};
use chrono::{Duration, NaiveDateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use sqlx::sqlite::SqlitePool;
use tracing::{debug, info};

/// Group names created by the generator.
pub const GROUP_NAMES: [&str; 3] = ["KN1", "IPZ4", "PM2"];

/// Subject names created by the generator.
pub const SUBJECT_NAMES: [&str; 8] = [
    "Cloud Computing",
    "Object-Oriented Programming",
    "Mathematical Modelling",
    "Information Systems Analysis",
    "Information Processing Methods",
    "Calculus",
    "Introduction to Programming",
    "Algorithms and Data Structures",
];

const FIRST_NAMES: [&str; 16] = [
    "Andriy", "Bohdana", "Dmytro", "Halyna", "Ivan", "Iryna", "Kateryna", "Maksym", "Mykola",
    "Natalia", "Oksana", "Olena", "Petro", "Roman", "Sofia", "Taras",
];

const LAST_NAMES: [&str; 16] = [
    "Bondarenko", "Boyko", "Hnatyuk", "Kovalenko", "Kovalchuk", "Kravchenko", "Lysenko",
    "Melnyk", "Moroz", "Oliynyk", "Pavlenko", "Savchenko", "Shevchenko", "Tkachenko",
    "Tkachuk", "Zinchenko",
];

/// Teachers assigned per subject.
pub const TEACHERS_PER_SUBJECT: std::ops::RangeInclusive<usize> = 1..=3;
/// Subjects each student is graded in.
pub const SUBJECTS_PER_STUDENT: std::ops::RangeInclusive<usize> = 5..=8;
/// Grades recorded per student and subject.
pub const GRADES_PER_SUBJECT: std::ops::RangeInclusive<usize> = 10..=20;
/// Range of generated grade values.
pub const GRADE_VALUES: std::ops::RangeInclusive<i64> = 60..=100;
/// Grades are dated within this many trailing days.
pub const DATE_WINDOW_DAYS: i64 = 180;

/// Generator parameters.
#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub students: usize,
    pub teachers: usize,
    /// Fixed RNG seed; `None` draws from the OS.
    pub rng_seed: Option<u64>,
    /// Wipe existing rows before generating.
    pub reset: bool,
}

impl Default for SeedOptions {
    fn default() -> Self {
        SeedOptions::from(&SeedConfig::default())
    }
}

impl From<&SeedConfig> for SeedOptions {
    fn from(config: &SeedConfig) -> Self {
        Self {
            students: config.students,
            teachers: config.teachers,
            rng_seed: config.rng_seed,
            reset: false,
        }
    }
}

/// Row counts written by [`seed_database`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub groups: usize,
    pub teachers: usize,
    pub subjects: usize,
    pub assignments: usize,
    pub students: usize,
    pub grades: usize,
}

/// Populates the database with generated fixtures.
///
/// Fails if any entity table already holds rows, unless `options.reset` is set.
pub async fn seed_database(pool: &SqlitePool, options: &SeedOptions) -> Result<SeedSummary> {
    if options.teachers == 0 {
        return Err(GradebookError::config(
            "at least one teacher is required to staff subjects",
        ));
    }

    let mut rng = match options.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| GradebookError::connection(format!("Failed to start transaction: {e}")))?;

    let existing: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM groups
            UNION ALL SELECT 1 FROM teachers
            UNION ALL SELECT 1 FROM subjects
            UNION ALL SELECT 1 FROM students
            UNION ALL SELECT 1 FROM grades
        )
        "#,
    )
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| GradebookError::query(format!("Failed to inspect database: {e}")))?;

    if existing {
        if !options.reset {
            return Err(GradebookError::config(
                "database already contains data; use --reset to replace it",
            ));
        }
        info!("Clearing existing gradebook data");
        for table in [
            "grades",
            "teacher_subject",
            "students",
            "teachers",
            "subjects",
            "groups",
        ] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await
                .map_err(|e| GradebookError::query(format!("Failed to clear {table}: {e}")))?;
        }
        sqlx::query("DELETE FROM sqlite_sequence")
            .execute(&mut *tx)
            .await
            .map_err(|e| GradebookError::query(format!("Failed to reset id sequences: {e}")))?;
    }

    let mut summary = SeedSummary::default();

    let mut group_ids = Vec::with_capacity(GROUP_NAMES.len());
    for name in GROUP_NAMES {
        group_ids.push(create_group(&mut *tx, name).await?);
    }
    summary.groups = group_ids.len();

    let mut teacher_ids = Vec::with_capacity(options.teachers);
    for index in 0..options.teachers {
        let first_name = pick(&mut rng, &FIRST_NAMES);
        let last_name = pick(&mut rng, &LAST_NAMES);
        let teacher = NewTeacher {
            email: email(&first_name, &last_name, "staff", index),
            first_name,
            last_name,
            phone: Some(phone_number(&mut rng)),
        };
        teacher_ids.push(create_teacher(&mut *tx, &teacher).await?);
    }
    summary.teachers = teacher_ids.len();

    let mut subject_ids = Vec::with_capacity(SUBJECT_NAMES.len());
    for name in SUBJECT_NAMES {
        subject_ids.push(create_subject(&mut *tx, name).await?);
    }
    summary.subjects = subject_ids.len();

    for &subject_id in &subject_ids {
        let count = rng
            .random_range(TEACHERS_PER_SUBJECT)
            .min(teacher_ids.len());
        for &teacher_id in teacher_ids.choose_multiple(&mut rng, count) {
            assign_teacher(&mut *tx, teacher_id, subject_id).await?;
            summary.assignments += 1;
        }
    }

    let now = Utc::now().naive_utc();
    let window_start = now - Duration::days(DATE_WINDOW_DAYS);

    for index in 0..options.students {
        let first_name = pick(&mut rng, &FIRST_NAMES);
        let last_name = pick(&mut rng, &LAST_NAMES);
        let student = NewStudent {
            email: email(&first_name, &last_name, "students", index),
            first_name,
            last_name,
            phone: Some(phone_number(&mut rng)),
            group_id: *group_ids.choose(&mut rng).ok_or_else(|| {
                GradebookError::internal("no groups available for students")
            })?,
        };
        let student_id = create_student(&mut *tx, &student).await?;
        summary.students += 1;

        let subject_count = rng
            .random_range(SUBJECTS_PER_STUDENT)
            .min(subject_ids.len());
        for &subject_id in subject_ids.choose_multiple(&mut rng, subject_count) {
            for _ in 0..rng.random_range(GRADES_PER_SUBJECT) {
                let grade = NewGrade {
                    student_id,
                    subject_id,
                    grade: rng.random_range(GRADE_VALUES) as f64,
                    date_received: Some(random_date(&mut rng, window_start)),
                };
                create_grade(&mut *tx, &grade).await?;
                summary.grades += 1;
            }
        }
        debug!("Seeded student {} ({} grades so far)", student_id, summary.grades);
    }

    tx.commit()
        .await
        .map_err(|e| GradebookError::query(format!("Failed to commit fixtures: {e}")))?;

    info!(
        "Seeded {} groups, {} teachers, {} subjects, {} students, {} grades",
        summary.groups, summary.teachers, summary.subjects, summary.students, summary.grades
    );
    Ok(summary)
}

fn pick(rng: &mut StdRng, names: &[&str]) -> String {
    names.choose(rng).copied().unwrap_or("Anonymous").to_string()
}

fn email(first: &str, last: &str, domain: &str, index: usize) -> String {
    format!("{first}.{last}.{index}@{domain}.example.edu").to_lowercase()
}

fn phone_number(rng: &mut StdRng) -> String {
    format!("+380{:09}", rng.random_range(0..1_000_000_000u32))
}

fn random_date(rng: &mut StdRng, window_start: NaiveDateTime) -> NaiveDateTime {
    window_start + Duration::days(rng.random_range(0..=DATE_WINDOW_DAYS))
}
