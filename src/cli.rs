//! Command-line argument parsing for Gradebook.

use clap::{Parser, Subcommand, ValueEnum};
use gradebook::config::{Config, SeedConfig, DATABASE_ENV};
use gradebook::reports::Report;
use gradebook::seed::SeedOptions;
use std::path::PathBuf;

/// Output format for report results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text tables.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Academic performance reports over a gradebook database.
#[derive(Parser, Debug)]
#[command(name = "gradebook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file
    #[arg(short = 'D', long, value_name = "PATH", env = DATABASE_ENV)]
    pub database: Option<PathBuf>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log report queries at debug level
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the database and apply migrations
    Init,

    /// Fill the database with generated fixtures
    Seed {
        /// Number of students to generate
        #[arg(long)]
        students: Option<usize>,

        /// Number of teachers to generate
        #[arg(long)]
        teachers: Option<usize>,

        /// RNG seed for reproducible fixtures
        #[arg(long)]
        rng_seed: Option<u64>,

        /// Delete existing rows first
        #[arg(long)]
        reset: bool,
    },

    /// Run a single report
    Report {
        #[command(subcommand)]
        report: ReportCommand,
    },

    /// Run every report with sample parameters
    Demo,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportCommand {
    /// Five students with the highest overall average
    TopStudents,
    /// Student with the highest average in a subject
    TopStudentInSubject { subject_id: i64 },
    /// Group averages and grade counts in a subject
    GroupAveragesInSubject { subject_id: i64 },
    /// Every group's average across all subjects
    GroupAveragesOverall,
    /// Average of all grades
    OverallAverage,
    /// Subjects a teacher teaches
    SubjectsTaughtByTeacher { teacher_id: i64 },
    /// Students of a group
    StudentsInGroup { group_id: i64 },
    /// Grades of a group's students in a subject
    GradesForGroupInSubject { group_id: i64, subject_id: i64 },
    /// Average grade per subject of a teacher
    PerSubjectAverageForTeacher { teacher_id: i64 },
    /// Subjects a student has grades in
    CoursesStudentAttends { student_id: i64 },
    /// Subjects a teacher teaches that a student attends
    CoursesTaughtByTeacherToStudent { student_id: i64, teacher_id: i64 },
}

impl From<ReportCommand> for Report {
    fn from(command: ReportCommand) -> Self {
        match command {
            ReportCommand::TopStudents => Report::TopStudents,
            ReportCommand::TopStudentInSubject { subject_id } => {
                Report::TopStudentInSubject { subject_id }
            }
            ReportCommand::GroupAveragesInSubject { subject_id } => {
                Report::GroupAveragesInSubject { subject_id }
            }
            ReportCommand::GroupAveragesOverall => Report::GroupAveragesOverall,
            ReportCommand::OverallAverage => Report::OverallAverage,
            ReportCommand::SubjectsTaughtByTeacher { teacher_id } => {
                Report::SubjectsTaughtByTeacher { teacher_id }
            }
            ReportCommand::StudentsInGroup { group_id } => Report::StudentsInGroup { group_id },
            ReportCommand::GradesForGroupInSubject {
                group_id,
                subject_id,
            } => Report::GradesForGroupInSubject {
                group_id,
                subject_id,
            },
            ReportCommand::PerSubjectAverageForTeacher { teacher_id } => {
                Report::PerSubjectAverageForTeacher { teacher_id }
            }
            ReportCommand::CoursesStudentAttends { student_id } => {
                Report::CoursesStudentAttends { student_id }
            }
            ReportCommand::CoursesTaughtByTeacherToStudent {
                student_id,
                teacher_id,
            } => Report::CoursesTaughtByTeacherToStudent {
                student_id,
                teacher_id,
            },
        }
    }
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Applies CLI overrides (including `GRADEBOOK_DATABASE`) on top of the
    /// file configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(path) = &self.database {
            config.database.path = Some(path.clone());
        }
    }
}

/// Merges `seed` subcommand flags over the configured defaults.
pub fn seed_options(
    defaults: &SeedConfig,
    students: Option<usize>,
    teachers: Option<usize>,
    rng_seed: Option<u64>,
    reset: bool,
) -> SeedOptions {
    SeedOptions {
        students: students.unwrap_or(defaults.students),
        teachers: teachers.unwrap_or(defaults.teachers),
        rng_seed: rng_seed.or(defaults.rng_seed),
        reset,
    }
}
