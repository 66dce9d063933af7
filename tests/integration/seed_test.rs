//! Seeding a file database and running every report over the result.

use gradebook::config::DatabaseConfig;
use gradebook::reports::{self, run_report, Report};
use gradebook::schema::{list_groups, list_students, list_subjects, list_teachers};
use gradebook::seed::{seed_database, SeedOptions};
use gradebook::Gradebook;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use tempfile::tempdir;

async fn seeded_file_db(dir: &std::path::Path) -> Gradebook {
    let config = DatabaseConfig {
        path: Some(dir.join("seeded.db")),
        max_connections: 4,
        ..Default::default()
    };
    let db = Gradebook::open_with(&config).await.unwrap();
    let options = SeedOptions {
        students: 20,
        rng_seed: Some(7),
        ..Default::default()
    };
    seed_database(db.pool(), &options).await.unwrap();
    db
}

#[tokio::test]
async fn test_every_report_runs_on_seeded_data() {
    let dir = tempdir().unwrap();
    let db = seeded_file_db(dir.path()).await;
    let pool = db.pool();

    let group = list_groups(pool).await.unwrap()[0].id;
    let subject = list_subjects(pool).await.unwrap()[0].id;
    let teacher = list_teachers(pool).await.unwrap()[0].id;
    let student = list_students(pool).await.unwrap()[0].id;

    let catalog = [
        Report::TopStudents,
        Report::TopStudentInSubject {
            subject_id: subject,
        },
        Report::GroupAveragesInSubject {
            subject_id: subject,
        },
        Report::GroupAveragesOverall,
        Report::OverallAverage,
        Report::SubjectsTaughtByTeacher {
            teacher_id: teacher,
        },
        Report::StudentsInGroup { group_id: group },
        Report::GradesForGroupInSubject {
            group_id: group,
            subject_id: subject,
        },
        Report::PerSubjectAverageForTeacher {
            teacher_id: teacher,
        },
        Report::CoursesStudentAttends {
            student_id: student,
        },
        Report::CoursesTaughtByTeacherToStudent {
            student_id: student,
            teacher_id: teacher,
        },
    ];

    for report in catalog {
        let output = run_report(pool, report).await.unwrap();
        serde_json::to_value(&output).unwrap();
    }

    let top = reports::top_students_by_overall_average(pool).await.unwrap();
    assert_eq!(top.len(), reports::TOP_STUDENTS_LIMIT as usize);

    db.close().await;
}

#[tokio::test]
async fn test_seeded_reports_are_consistent() {
    let dir = tempdir().unwrap();
    let db = seeded_file_db(dir.path()).await;
    let pool = db.pool();

    let groups = reports::group_averages_overall(pool).await.unwrap();
    let group_names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(group_names, vec!["IPZ4", "KN1", "PM2"]);

    let mut rostered = 0;
    for group in &groups {
        rostered += reports::students_in_group(pool, group.id)
            .await
            .unwrap()
            .len();
    }
    assert_eq!(rostered, 20);

    let overall = reports::overall_average(pool).await.unwrap().unwrap();
    assert!((60.0..=100.0).contains(&overall));

    for teacher in list_teachers(pool).await.unwrap() {
        let taught: BTreeSet<i64> = reports::subjects_taught_by_teacher(pool, teacher.id)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        let averaged: BTreeSet<i64> = reports::per_subject_average_for_teacher(pool, teacher.id)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.subject_id)
            .collect();
        assert_eq!(taught, averaged);

        for student in list_students(pool).await.unwrap().into_iter().take(5) {
            let attended: BTreeSet<i64> = reports::courses_student_attends(pool, student.id)
                .await
                .unwrap()
                .into_iter()
                .map(|s| s.id)
                .collect();
            let shared: BTreeSet<i64> =
                reports::courses_taught_by_teacher_to_student(pool, student.id, teacher.id)
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|s| s.id)
                    .collect();
            let expected: BTreeSet<i64> = taught.intersection(&attended).copied().collect();
            assert_eq!(shared, expected);
        }
    }

    db.close().await;
}

#[tokio::test]
async fn test_reseed_with_reset_replaces_data() {
    let dir = tempdir().unwrap();
    let db = seeded_file_db(dir.path()).await;

    let again = SeedOptions {
        students: 6,
        teachers: 2,
        rng_seed: Some(8),
        reset: true,
    };
    let summary = seed_database(db.pool(), &again).await.unwrap();

    assert_eq!(summary.students, 6);
    assert_eq!(list_students(db.pool()).await.unwrap().len(), 6);
    assert_eq!(list_teachers(db.pool()).await.unwrap().len(), 2);
    assert_eq!(list_groups(db.pool()).await.unwrap().len(), 3);

    db.close().await;
}
