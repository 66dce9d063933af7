//! Integrity rules and persistence of the file-backed database.

use super::common::{day, grade, School};
use gradebook::reports;
use gradebook::schema::{
    count_grades, delete_group, delete_student, delete_subject, get_student, list_groups,
    teachers_of_subject,
};
use gradebook::Gradebook;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("school.db");

    let school = School::populate(Gradebook::open(&path).await.unwrap()).await;
    assert_eq!(school.db.path(), Some(path.as_path()));
    school.db.close().await;

    let reopened = Gradebook::open(&path).await.unwrap();
    let groups: Vec<String> = list_groups(reopened.pool())
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(groups, vec!["Alpha", "Beta", "Gamma"]);
    assert_eq!(count_grades(reopened.pool()).await.unwrap(), 10);
    assert_eq!(
        reports::overall_average(reopened.pool()).await.unwrap(),
        Some(82.5)
    );
    reopened.close().await;
}

#[tokio::test]
async fn test_group_with_students_cannot_be_deleted() {
    let school = School::build().await;
    let pool = school.db.pool();

    let err = delete_group(pool, school.beta).await.unwrap_err();
    assert_eq!(err.category(), "Constraint Error");
    assert!(get_student(pool, school.shevchenko).await.unwrap().is_some());

    assert!(delete_group(pool, school.gamma).await.unwrap());
    assert!(!delete_group(pool, school.gamma).await.unwrap());
}

#[tokio::test]
async fn test_deleting_student_removes_their_grades() {
    let school = School::build().await;
    let pool = school.db.pool();

    assert!(delete_student(pool, school.ukrainka).await.unwrap());
    assert_eq!(count_grades(pool).await.unwrap(), 6);

    let top = reports::top_student_in_subject(pool, school.math)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(top.id, school.franko);
    assert!(reports::courses_student_attends(pool, school.ukrainka)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_deleting_subject_removes_grades_and_assignments() {
    let school = School::build().await;
    let pool = school.db.pool();

    assert!(delete_subject(pool, school.math).await.unwrap());
    assert_eq!(count_grades(pool).await.unwrap(), 4);
    assert!(teachers_of_subject(pool, school.math).await.unwrap().is_empty());

    let taught: Vec<String> = reports::subjects_taught_by_teacher(pool, school.kovalenko)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(taught, vec!["Bio"]);
}

#[tokio::test]
async fn test_grade_for_unknown_student_is_rejected() {
    let school = School::build().await;

    let result = gradebook::schema::create_grade(
        school.db.pool(),
        &gradebook::schema::NewGrade {
            student_id: 9_999,
            subject_id: school.math,
            grade: 75.0,
            date_received: Some(day(5, 1)),
        },
    )
    .await;

    assert_eq!(result.unwrap_err().category(), "Constraint Error");
    assert_eq!(count_grades(school.db.pool()).await.unwrap(), 10);
}

#[tokio::test]
async fn test_new_grade_shifts_averages() {
    let school = School::build().await;
    let pool = school.db.pool();

    grade(&school.db, school.bondar, school.bio, 77.0, day(6, 1)).await;

    let kovalenko = reports::per_subject_average_for_teacher(pool, school.kovalenko)
        .await
        .unwrap();
    assert_eq!(kovalenko[0].subject_name, "Bio");
    assert_eq!(kovalenko[0].avg_grade, Some(77.0));
    assert_eq!(
        reports::courses_student_attends(pool, school.bondar)
            .await
            .unwrap()
            .len(),
        1
    );
}
