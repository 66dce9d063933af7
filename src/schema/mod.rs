//! Schema model for the gradebook database.
//!
//! Owns the table definitions and the typed accessors used to create and
//! inspect fixtures. Integrity is enforced by SQLite itself: unique names and
//! emails, restricted group deletion, and cascading grade cleanup when a
//! student or subject is removed.

mod grades;
mod groups;
pub(crate) mod migrations;
mod models;
mod students;
mod subjects;
mod teachers;

pub use grades::{count_grades, create_grade, grades_of_student};
pub use groups::{create_group, delete_group, get_group, list_groups};
pub use migrations::run_migrations;
pub use models::{Grade, Group, NewGrade, NewStudent, NewTeacher, Student, Subject, Teacher};
pub use students::{create_student, delete_student, get_student, list_students};
pub use subjects::{create_subject, delete_subject, get_subject, list_subjects};
pub use teachers::{assign_teacher, create_teacher, get_teacher, list_teachers, teachers_of_subject};
