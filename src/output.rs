//! Rendering of report results for the command line.

use crate::cli::OutputFormat;
use gradebook::reports::{Report, ReportOutput, StudentAverage};
use gradebook::seed::SeedSummary;
use gradebook::{GradebookError, Result};

/// Renders a report result in the requested format.
pub fn render_report(
    report: &Report,
    output: &ReportOutput,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
            "title": report.title(),
            "params": report,
            "rows": output,
        }))
        .map_err(|e| GradebookError::internal(format!("Failed to serialize report: {e}"))),
        OutputFormat::Text => Ok(format!("{}\n\n{}", report.title(), render_text(output))),
    }
}

/// Renders a seed summary in the requested format.
pub fn render_summary(summary: &SeedSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(summary)
            .map_err(|e| GradebookError::internal(format!("Failed to serialize summary: {e}"))),
        OutputFormat::Text => Ok(format_table(
            &["table", "rows"],
            &[
                vec!["groups".to_string(), summary.groups.to_string()],
                vec!["teachers".to_string(), summary.teachers.to_string()],
                vec!["subjects".to_string(), summary.subjects.to_string()],
                vec!["teacher_subject".to_string(), summary.assignments.to_string()],
                vec!["students".to_string(), summary.students.to_string()],
                vec!["grades".to_string(), summary.grades.to_string()],
            ],
        )),
    }
}

/// Formats an optional average; a missing one prints as "-".
fn average_cell(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "-".to_string())
}

fn student_rows(rows: &[StudentAverage]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.full_name.clone(),
                average_cell(Some(r.avg_grade)),
            ]
        })
        .collect()
}

fn render_text(output: &ReportOutput) -> String {
    if output.is_empty() {
        return "(no data)".to_string();
    }

    match output {
        ReportOutput::StudentAverages(rows) => {
            format_table(&["id", "full name", "avg grade"], &student_rows(rows))
        }
        ReportOutput::TopStudent(row) => {
            let rows: Vec<StudentAverage> = row.iter().cloned().collect();
            format_table(&["id", "full name", "avg grade"], &student_rows(&rows))
        }
        ReportOutput::GroupSubjectAverages(rows) => format_table(
            &["id", "group", "avg grade", "grades"],
            &rows
                .iter()
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        r.name.clone(),
                        average_cell(Some(r.avg_grade)),
                        r.grade_count.to_string(),
                    ]
                })
                .collect::<Vec<_>>(),
        ),
        ReportOutput::GroupAverages(rows) => format_table(
            &["id", "group", "avg grade"],
            &rows
                .iter()
                .map(|r| vec![r.id.to_string(), r.name.clone(), average_cell(r.avg_grade)])
                .collect::<Vec<_>>(),
        ),
        ReportOutput::Average(value) => average_cell(*value),
        ReportOutput::Subjects(rows) => format_table(
            &["id", "subject"],
            &rows
                .iter()
                .map(|r| vec![r.id.to_string(), r.name.clone()])
                .collect::<Vec<_>>(),
        ),
        ReportOutput::Members(rows) => format_table(
            &["id", "full name", "email"],
            &rows
                .iter()
                .map(|r| vec![r.id.to_string(), r.full_name.clone(), r.email.clone()])
                .collect::<Vec<_>>(),
        ),
        ReportOutput::Grades(rows) => format_table(
            &["student", "full name", "grade", "date"],
            &rows
                .iter()
                .map(|r| {
                    vec![
                        r.student_id.to_string(),
                        r.full_name.clone(),
                        r.grade.to_string(),
                        r.date_received.clone(),
                    ]
                })
                .collect::<Vec<_>>(),
        ),
        ReportOutput::SubjectAverages(rows) => format_table(
            &["id", "subject", "avg grade"],
            &rows
                .iter()
                .map(|r| {
                    vec![
                        r.subject_id.to_string(),
                        r.subject_name.clone(),
                        average_cell(r.avg_grade),
                    ]
                })
                .collect::<Vec<_>>(),
        ),
    }
}

/// Formats a table as a string for display.
fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if headers.is_empty() {
        return String::new();
    }

    // Widths in chars, names are not ASCII-only
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let mut output = String::new();

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect();
    output.push_str(&header_line.join(" │ "));
    output.push('\n');

    let separator: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    output.push_str(&separator.join("─┼─"));
    output.push('\n');

    for row in rows {
        let row_line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = width)
            })
            .collect();
        output.push_str(&row_line.join(" │ "));
        output.push('\n');
    }

    output.trim_end().to_string()
}
