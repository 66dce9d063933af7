//! Report queries against a hand-built school and against seeded data.

use super::common::{student, School};
use gradebook::reports::{self, run_report, Report, ReportOutput};
use gradebook::schema::{create_group, grades_of_student, list_students, list_subjects, Subject};
use gradebook::seed::{seed_database, SeedOptions};
use gradebook::Gradebook;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use tempfile::tempdir;

fn names(subjects: &[Subject]) -> Vec<&str> {
    subjects.iter().map(|s| s.name.as_str()).collect()
}

fn mean(values: &[f64]) -> f64 {
    let avg = values.iter().sum::<f64>() / values.len() as f64;
    (avg * 100.0).round() / 100.0
}

#[tokio::test]
async fn test_top_students_orders_by_average_then_id() {
    let school = School::build().await;

    let top = reports::top_students_by_overall_average(school.db.pool())
        .await
        .unwrap();

    let ids: Vec<i64> = top.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![school.ukrainka, school.franko, school.shevchenko]);
    assert_eq!(top[0].full_name, "Lesya Ukrainka");
    assert_eq!(top[0].avg_grade, 86.25);
    assert_eq!(top[1].avg_grade, 80.0);
    assert_eq!(top[2].avg_grade, 80.0);
}

#[tokio::test]
async fn test_top_student_in_subject() {
    let school = School::build().await;
    let pool = school.db.pool();

    let math = reports::top_student_in_subject(pool, school.math)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(math.id, school.ukrainka);
    assert_eq!(math.avg_grade, 95.0);

    let art = reports::top_student_in_subject(pool, school.art)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(art.id, school.shevchenko);
    assert_eq!(art.avg_grade, 90.0);

    assert!(reports::top_student_in_subject(pool, school.bio)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_group_averages_in_subject() {
    let school = School::build().await;
    let pool = school.db.pool();

    let math = reports::group_averages_in_subject(pool, school.math)
        .await
        .unwrap();
    assert_eq!(math.len(), 2);
    assert_eq!((math[0].id, math[0].avg_grade, math[0].grade_count), (school.alpha, 91.0, 5));
    assert_eq!((math[1].id, math[1].avg_grade, math[1].grade_count), (school.beta, 60.0, 1));

    let art = reports::group_averages_in_subject(pool, school.art)
        .await
        .unwrap();
    assert_eq!(art[0].name, "Beta");
    assert_eq!(art[0].grade_count, 2);
    assert_eq!(art[1].name, "Alpha");
}

#[tokio::test]
async fn test_group_averages_overall_lists_every_group_by_name() {
    let school = School::build().await;

    let rows = reports::group_averages_overall(school.db.pool())
        .await
        .unwrap();

    let summary: Vec<(&str, Option<f64>)> = rows
        .iter()
        .map(|r| (r.name.as_str(), r.avg_grade))
        .collect();
    assert_eq!(
        summary,
        vec![("Alpha", Some(83.57)), ("Beta", Some(80.0)), ("Gamma", None)]
    );
    assert_eq!(rows[2].id, school.gamma);
}

#[tokio::test]
async fn test_overall_average() {
    let school = School::build().await;
    assert_eq!(
        reports::overall_average(school.db.pool()).await.unwrap(),
        Some(82.5)
    );
}

#[tokio::test]
async fn test_subjects_taught_by_teacher() {
    let school = School::build().await;
    let pool = school.db.pool();

    let kovalenko = reports::subjects_taught_by_teacher(pool, school.kovalenko)
        .await
        .unwrap();
    assert_eq!(names(&kovalenko), vec!["Bio", "Math"]);

    let melnyk = reports::subjects_taught_by_teacher(pool, school.melnyk)
        .await
        .unwrap();
    assert_eq!(names(&melnyk), vec!["Art", "History", "Math"]);
}

#[tokio::test]
async fn test_students_in_group_sorted_by_last_then_first_name() {
    let school = School::build().await;

    let roster = reports::students_in_group(school.db.pool(), school.alpha)
        .await
        .unwrap();

    let full_names: Vec<&str> = roster.iter().map(|m| m.full_name.as_str()).collect();
    assert_eq!(full_names, vec!["Anna Bondar", "Ivan Franko", "Lesya Ukrainka"]);
    assert_eq!(roster[0].id, school.bondar);
    assert_eq!(roster[0].email, "anna.bondar@students.example.edu");

    assert!(reports::students_in_group(school.db.pool(), school.gamma)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_students_sharing_last_name_sorted_by_first_name() {
    let school = School::build().await;
    let delta = create_group(school.db.pool(), "Delta").await.unwrap();
    let zoya = student(&school.db, "Zoya", "Koval", delta).await;
    let anna = student(&school.db, "Anna", "Koval", delta).await;
    let boris = student(&school.db, "Boris", "Abramov", delta).await;

    let roster = reports::students_in_group(school.db.pool(), delta)
        .await
        .unwrap();

    let full_names: Vec<&str> = roster.iter().map(|m| m.full_name.as_str()).collect();
    assert_eq!(full_names, vec!["Boris Abramov", "Anna Koval", "Zoya Koval"]);
    let ids: Vec<i64> = roster.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![boris, anna, zoya]);
}

#[tokio::test]
async fn test_grades_for_group_in_subject_sorted_by_name_and_date() {
    let school = School::build().await;

    let rows = reports::grades_for_group_in_subject(school.db.pool(), school.alpha, school.math)
        .await
        .unwrap();

    let flat: Vec<(&str, f64, &str)> = rows
        .iter()
        .map(|r| (r.full_name.as_str(), r.grade, r.date_received.as_str()))
        .collect();
    assert_eq!(
        flat,
        vec![
            ("Ivan Franko", 80.0, "2024-02-01"),
            ("Ivan Franko", 90.0, "2024-03-02"),
            ("Lesya Ukrainka", 100.0, "2024-01-10"),
            ("Lesya Ukrainka", 90.0, "2024-01-15"),
            ("Lesya Ukrainka", 95.0, "2024-01-20"),
        ]
    );
    assert!(rows.iter().all(|r| r.student_id == school.franko || r.student_id == school.ukrainka));
}

#[tokio::test]
async fn test_per_subject_average_for_teacher_includes_ungraded_subject() {
    let school = School::build().await;
    let pool = school.db.pool();

    let kovalenko = reports::per_subject_average_for_teacher(pool, school.kovalenko)
        .await
        .unwrap();
    let summary: Vec<(&str, Option<f64>)> = kovalenko
        .iter()
        .map(|r| (r.subject_name.as_str(), r.avg_grade))
        .collect();
    assert_eq!(summary, vec![("Bio", None), ("Math", Some(85.83))]);
    assert_eq!(kovalenko[0].subject_id, school.bio);

    let melnyk = reports::per_subject_average_for_teacher(pool, school.melnyk)
        .await
        .unwrap();
    let summary: Vec<(&str, Option<f64>)> = melnyk
        .iter()
        .map(|r| (r.subject_name.as_str(), r.avg_grade))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Art", Some(83.33)),
            ("History", Some(60.0)),
            ("Math", Some(85.83))
        ]
    );
}

#[tokio::test]
async fn test_courses_student_attends_is_deduplicated() {
    let school = School::build().await;
    let pool = school.db.pool();

    let ukrainka = reports::courses_student_attends(pool, school.ukrainka)
        .await
        .unwrap();
    assert_eq!(names(&ukrainka), vec!["History", "Math"]);
    assert_eq!(ukrainka[0].id, school.history);
    assert_eq!(ukrainka[1].id, school.math);

    let franko = reports::courses_student_attends(pool, school.franko)
        .await
        .unwrap();
    assert_eq!(names(&franko), vec!["Art", "Math"]);

    assert!(reports::courses_student_attends(pool, school.bondar)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_courses_taught_by_teacher_to_student_is_intersection() {
    let school = School::build().await;
    let pool = school.db.pool();

    let rows = reports::courses_taught_by_teacher_to_student(pool, school.ukrainka, school.melnyk)
        .await
        .unwrap();
    assert_eq!(names(&rows), vec!["History", "Math"]);

    let rows = reports::courses_taught_by_teacher_to_student(pool, school.franko, school.kovalenko)
        .await
        .unwrap();
    assert_eq!(names(&rows), vec!["Math"]);

    let rows = reports::courses_taught_by_teacher_to_student(pool, school.bondar, school.melnyk)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_run_report_dispatches() {
    let school = School::build().await;

    let output = run_report(
        school.db.pool(),
        Report::CoursesStudentAttends {
            student_id: school.ukrainka,
        },
    )
    .await
    .unwrap();

    match output {
        ReportOutput::Subjects(subjects) => assert_eq!(names(&subjects), vec!["History", "Math"]),
        other => panic!("unexpected output: {other:?}"),
    }
}

#[tokio::test]
async fn test_seeded_averages_match_raw_means() {
    let db = Gradebook::open_in_memory().await.unwrap();
    let options = SeedOptions {
        students: 15,
        rng_seed: Some(2024),
        ..Default::default()
    };
    seed_database(db.pool(), &options).await.unwrap();
    let pool = db.pool();

    let mut overall: HashMap<i64, Vec<f64>> = HashMap::new();
    let mut per_subject: HashMap<(i64, i64), Vec<f64>> = HashMap::new();
    for student in list_students(pool).await.unwrap() {
        for grade in grades_of_student(pool, student.id).await.unwrap() {
            overall.entry(student.id).or_default().push(grade.grade);
            per_subject
                .entry((grade.subject_id, student.id))
                .or_default()
                .push(grade.grade);
        }
    }

    let top = reports::top_students_by_overall_average(pool).await.unwrap();
    assert_eq!(top.len(), 5);
    for pair in top.windows(2) {
        assert!(pair[0].avg_grade >= pair[1].avg_grade);
    }
    for row in &top {
        assert_eq!(row.avg_grade, mean(&overall[&row.id]));
    }

    for subject in list_subjects(pool).await.unwrap() {
        let best = reports::top_student_in_subject(pool, subject.id)
            .await
            .unwrap();
        let expected = per_subject
            .iter()
            .filter(|((subject_id, _), _)| *subject_id == subject.id)
            .map(|(_, values)| mean(values))
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));

        match (best, expected) {
            (Some(best), Some(expected)) => {
                assert_eq!(best.avg_grade, expected);
                assert_eq!(
                    best.avg_grade,
                    mean(&per_subject[&(subject.id, best.id)])
                );
            }
            (None, None) => {}
            other => panic!("mismatch for subject {}: {other:?}", subject.name),
        }

        let groups = reports::group_averages_in_subject(pool, subject.id)
            .await
            .unwrap();
        let graded: i64 = groups.iter().map(|g| g.grade_count).sum();
        let expected_count: usize = per_subject
            .iter()
            .filter(|((subject_id, _), _)| *subject_id == subject.id)
            .map(|(_, values)| values.len())
            .sum();
        assert_eq!(graded as usize, expected_count);
    }
}

#[tokio::test]
async fn test_reports_run_concurrently_on_shared_pool() {
    let dir = tempdir().unwrap();
    let db = Gradebook::open(&dir.path().join("school.db")).await.unwrap();
    let school = School::populate(db).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = school.db.pool().clone();
        let (math, alpha) = (school.math, school.alpha);
        handles.push(tokio::spawn(async move {
            let average = reports::overall_average(&pool).await.unwrap();
            let roster = reports::students_in_group(&pool, alpha).await.unwrap();
            let top = reports::top_student_in_subject(&pool, math).await.unwrap();
            (average, roster.len(), top.map(|t| t.id))
        }));
    }

    for handle in handles {
        let (average, roster, top) = handle.await.unwrap();
        assert_eq!(average, Some(82.5));
        assert_eq!(roster, 3);
        assert_eq!(top, Some(school.ukrainka));
    }

    school.db.close().await;
}
