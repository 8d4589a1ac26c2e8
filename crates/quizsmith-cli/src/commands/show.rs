//! The `quizsmith show` command.

use std::path::PathBuf;

use anyhow::Result;

use quizsmith_core::report::AttemptReport;
use quizsmith_report::render_text;

pub fn execute(report_path: PathBuf) -> Result<()> {
    let report = AttemptReport::load_json(&report_path)?;

    if let Some(started) = report.started_at {
        println!("Started: {}", started.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    print!("{}", render_text(&report));
    super::grade::print_breakdown(&report);

    Ok(())
}
