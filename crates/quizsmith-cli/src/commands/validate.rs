//! The `quizsmith validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizsmith_core::parser::{self, DirectoryLoad};

pub fn execute(assessment_path: PathBuf) -> Result<()> {
    let loaded = if assessment_path.is_dir() {
        parser::load_assessment_directory(&assessment_path)?
    } else {
        DirectoryLoad {
            assessments: vec![parser::parse_assessment(&assessment_path)?],
            skipped: Vec::new(),
        }
    };

    let mut total_warnings = 0;

    for assessment in &loaded.assessments {
        println!(
            "Assessment: {} ({} questions, {} points)",
            assessment.title,
            assessment.questions().len(),
            assessment.total_points()
        );

        let warnings = parser::validate_assessment(assessment);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    for skipped in &loaded.skipped {
        eprintln!("  FAILED {}: {:#}", skipped.path.display(), skipped.error);
    }

    if !loaded.skipped.is_empty() {
        anyhow::bail!(
            "{} assessment file(s) failed to load in {}",
            loaded.skipped.len(),
            assessment_path.display()
        );
    }
    if loaded.assessments.is_empty() {
        anyhow::bail!("no assessment files found in {}", assessment_path.display());
    }

    if total_warnings == 0 {
        println!("All assessments valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
