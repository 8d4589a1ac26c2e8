//! The `quizsmith grade` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use quizsmith_core::config::load_config_from;
use quizsmith_core::engine::ProgressReporter;
use quizsmith_core::parser;
use quizsmith_core::report::AttemptReport;
use quizsmith_core::traits::parse_answers;
use quizsmith_core::{Question, ScriptedAnswers};
use quizsmith_report::{render_text, write_html_report, write_text_report};

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_session_start(&self, title: &str, question_count: usize) {
        eprintln!("Grading: {title} ({question_count} questions)");
    }

    fn on_question(&self, index: usize, total: usize, question: &Question) {
        tracing::debug!("question {index}/{total}: {}", question.id);
    }

    fn on_answer_failed(&self, question_id: &str, _error: &str) {
        eprintln!("  No answer for {question_id}, marking unanswered");
    }

    fn on_session_complete(&self, answered: usize, total: usize, elapsed: Duration) {
        eprintln!(
            "Answered {answered}/{total} ({:.1}s)\n",
            elapsed.as_secs_f64()
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    Text,
    Json,
    Html,
}

/// Parse `text`, `json`, `html`, `all`, or a comma-separated mix.
fn parse_formats(format: &str) -> Result<Vec<ReportFormat>> {
    if format.trim() == "all" {
        return Ok(vec![ReportFormat::Text, ReportFormat::Json, ReportFormat::Html]);
    }
    let mut formats = Vec::new();
    for fmt in format.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        let parsed = match fmt {
            "text" => ReportFormat::Text,
            "json" => ReportFormat::Json,
            "html" => ReportFormat::Html,
            other => anyhow::bail!("unknown format: {other} (expected text, json, html, or all)"),
        };
        if !formats.contains(&parsed) {
            formats.push(parsed);
        }
    }
    Ok(formats)
}

pub fn execute(
    assessment_path: PathBuf,
    answers_path: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let output = output.unwrap_or(config.output_dir);
    let format = format.unwrap_or(config.default_format);

    let formats = parse_formats(&format)?;

    let mut assessment = parser::parse_assessment(&assessment_path)?;
    let answers = parse_answers(&answers_path)?;

    for id in answers.keys() {
        if assessment.question(id).is_none() {
            eprintln!("Warning: answer for unknown question '{id}' ignored");
        }
    }

    let mut source = ScriptedAnswers::new(answers);
    let submission = assessment.run_with_progress(&mut source, &ConsoleReporter);
    let result = assessment.grade(&submission.answers, submission.time_taken);
    let report = AttemptReport::new(&assessment, result);

    print!("{}", render_text(&report));
    print_breakdown(&report);

    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");
    for fmt in formats {
        match fmt {
            ReportFormat::Text => {
                let path = output.join(format!("report-{timestamp}.txt"));
                write_text_report(&report, &path)?;
                eprintln!("Text report: {}", path.display());
            }
            ReportFormat::Json => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            ReportFormat::Html => {
                let path = output.join(format!("report-{timestamp}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
        }
    }

    Ok(())
}

pub(crate) fn print_breakdown(report: &AttemptReport) {
    use comfy_table::{Cell, Table};

    if report.breakdown.by_difficulty.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Slice", "Questions", "Correct", "Points", "Score %"]);

    let difficulty_rows = report
        .breakdown
        .by_difficulty
        .iter()
        .map(|(d, t)| (d.to_string(), t));
    let kind_rows = report
        .breakdown
        .by_kind
        .iter()
        .map(|(k, t)| (k.to_string(), t));

    for (label, tally) in difficulty_rows.chain(kind_rows) {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(tally.questions),
            Cell::new(tally.correct),
            Cell::new(format!("{}/{}", tally.earned, tally.possible)),
            Cell::new(format!("{:.1}%", tally.percentage())),
        ]);
    }

    println!("\n{table}");
}
