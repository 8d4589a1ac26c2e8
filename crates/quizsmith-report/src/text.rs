//! Plain-text report, as printed to a terminal.

use std::path::Path;

use anyhow::{Context, Result};

use quizsmith_core::report::AttemptReport;

const RULE_WIDTH: usize = 50;

/// Render a graded attempt: score, time, performance banner, then every
/// feedback line in question order.
pub fn render_text(report: &AttemptReport) -> String {
    let result = &report.result;
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("{rule}\n"));
    out.push_str("📊 Assessment Results\n");
    out.push_str(&format!("{}\n", report.assessment.title));
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!(
        "Score: {}/{} ({:.1}%)\n",
        result.score, result.total_points, result.percentage
    ));
    out.push_str(&format!("Time taken: {:.1} minutes\n", result.time_taken));
    if report.over_time_limit() {
        out.push_str(&format!(
            "⏱️ Over the {} minute time limit\n",
            report.assessment.time_limit
        ));
    }
    out.push_str(&format!("{}\n", report.tier.message()));

    out.push_str("\n--- Detailed Feedback ---\n");
    for line in result.feedback_lines() {
        out.push_str(&format!("{line}\n"));
    }
    out.push_str(&format!("{rule}\n"));

    out
}

/// Write a plain-text report to a file.
pub fn write_text_report(report: &AttemptReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_text(report))
        .with_context(|| format!("failed to write text report to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizsmith_core::model::{Answers, Assessment, Question};

    fn answers(pairs: &[(&str, &str)]) -> Answers {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn lists_assessment() -> Assessment {
        let mut assessment = Assessment::new("Lists", "").with_time_limit(15);
        assessment
            .add_question(
                Question::multiple_choice("q1", "?", ["1", "2"], "2").with_explanation("zero-based"),
            )
            .unwrap();
        assessment
            .add_question(
                Question::code_completion("q2", "?", "fruits.append('apple')")
                    .with_points(2)
                    .with_explanation("append adds to the end"),
            )
            .unwrap();
        assessment
            .add_question(Question::short_answer("q3", "?", "pop").with_explanation("pop()"))
            .unwrap();
        assessment
    }

    #[test]
    fn renders_score_tier_and_feedback_in_order() {
        let assessment = lists_assessment();
        let result = assessment.grade(
            &answers(&[("q1", "2"), ("q2", "fruits.append('apple')"), ("q3", "del")]),
            2.26,
        );
        let text = render_text(&AttemptReport::new(&assessment, result));

        assert!(text.starts_with(&format!("{}\n📊 Assessment Results\nLists\n", "=".repeat(RULE_WIDTH))));
        assert!(text.contains("Score: 3/4 (75.0%)"));
        assert!(text.contains("Time taken: 2.3 minutes"));
        assert!(text.contains("👍 Good effort!"));
        assert!(!text.contains("time limit"));

        let q1 = text.find("✅ Question q1: Correct! zero-based").unwrap();
        let q2 = text.find("✅ Question q2: Correct! append adds to the end").unwrap();
        let q3 = text.find("❌ Question q3: Incorrect. pop()").unwrap();
        assert!(q1 < q2 && q2 < q3);
    }

    #[test]
    fn flags_attempts_over_the_time_limit() {
        let assessment = lists_assessment();
        let result = assessment.grade(&Answers::new(), 20.0);
        let text = render_text(&AttemptReport::new(&assessment, result));
        assert!(text.contains("Over the 15 minute time limit"));
        assert!(text.contains("📚 Keep practicing!"));
    }

    #[test]
    fn empty_assessment_renders_zero() {
        let assessment = Assessment::new("Empty", "");
        let result = assessment.grade(&Answers::new(), 0.0);
        let text = render_text(&AttemptReport::new(&assessment, result));
        assert!(text.contains("Score: 0/0 (0.0%)"));
    }

    #[test]
    fn write_to_file() {
        let assessment = lists_assessment();
        let result = assessment.grade(&Answers::new(), 1.0);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        write_text_report(&AttemptReport::new(&assessment, result), &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("Detailed Feedback"));
    }
}
