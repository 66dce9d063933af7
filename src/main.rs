//! Gradebook - academic performance reports.

mod cli;
mod output;

use cli::{Cli, Command, OutputFormat};
use gradebook::config::Config;
use gradebook::reports::{run_report, Report};
use gradebook::schema::{list_groups, list_students, list_subjects, list_teachers};
use gradebook::seed::seed_database;
use gradebook::{logging, Gradebook, Result};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // .env may provide GRADEBOOK_DATABASE and RUST_LOG
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    logging::init_stderr_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Precedence: CLI / GRADEBOOK_DATABASE, then config file, then defaults
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    cli.apply_to(&mut config);

    let db = Gradebook::open_with(&config.database).await?;
    let result = dispatch(&cli, &config, &db).await;
    db.close().await;
    result
}

async fn dispatch(cli: &Cli, config: &Config, db: &Gradebook) -> Result<()> {
    match cli.command.clone() {
        Command::Init => {
            if let Some(path) = db.path() {
                println!("Database ready at {}", path.display());
            }
            Ok(())
        }
        Command::Seed {
            students,
            teachers,
            rng_seed,
            reset,
        } => {
            let options = cli::seed_options(&config.seed, students, teachers, rng_seed, reset);
            let summary = seed_database(db.pool(), &options).await?;
            println!("{}", output::render_summary(&summary, cli.format)?);
            Ok(())
        }
        Command::Report { report } => print_report(db, report.into(), cli.format).await,
        Command::Demo => run_demo(db, cli.format).await,
    }
}

async fn print_report(db: &Gradebook, report: Report, format: OutputFormat) -> Result<()> {
    let result = run_report(db.pool(), report).await?;
    println!("{}", output::render_report(&report, &result, format)?);
    Ok(())
}

/// Runs every report, using the first group, subject, teacher and student
/// found in the database as parameters.
async fn run_demo(db: &Gradebook, format: OutputFormat) -> Result<()> {
    let pool = db.pool();
    let group_id = list_groups(pool).await?.first().map(|g| g.id);
    let subject_id = list_subjects(pool).await?.first().map(|s| s.id);
    let teacher_id = list_teachers(pool).await?.first().map(|t| t.id);
    let student_id = list_students(pool).await?.first().map(|s| s.id);

    let (Some(group_id), Some(subject_id), Some(teacher_id), Some(student_id)) =
        (group_id, subject_id, teacher_id, student_id)
    else {
        warn!("Database has no fixtures; run `gradebook seed` first");
        return Ok(());
    };

    let reports = [
        Report::TopStudents,
        Report::TopStudentInSubject { subject_id },
        Report::GroupAveragesInSubject { subject_id },
        Report::GroupAveragesOverall,
        Report::OverallAverage,
        Report::SubjectsTaughtByTeacher { teacher_id },
        Report::StudentsInGroup { group_id },
        Report::GradesForGroupInSubject {
            group_id,
            subject_id,
        },
        Report::PerSubjectAverageForTeacher { teacher_id },
        Report::CoursesStudentAttends { student_id },
        Report::CoursesTaughtByTeacherToStudent {
            student_id,
            teacher_id,
        },
    ];

    for report in reports {
        print_report(db, report, format).await?;
        println!();
    }
    Ok(())
}
