//! TOML assessment parser.
//!
//! Loads assessments from TOML files and directories, and validates them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Assessment, Difficulty, Question, QuestionKind, DEFAULT_TIME_LIMIT};

/// Intermediate TOML structure for parsing assessment files.
#[derive(Debug, Deserialize)]
struct TomlAssessmentFile {
    assessment: TomlAssessmentHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlAssessmentHeader {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_time_limit")]
    time_limit: u32,
}

fn default_time_limit() -> u32 {
    DEFAULT_TIME_LIMIT
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    text: String,
    kind: String,
    #[serde(default)]
    options: Vec<String>,
    correct_answer: String,
    #[serde(default)]
    explanation: String,
    #[serde(default = "default_points")]
    points: u32,
    #[serde(default)]
    difficulty: Option<String>,
}

fn default_points() -> u32 {
    1
}

/// Parse a single TOML file into an `Assessment`.
pub fn parse_assessment(path: &Path) -> Result<Assessment> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read assessment file: {}", path.display()))?;

    parse_assessment_str(&content, path)
}

/// Parse a TOML string into an `Assessment` (useful for testing).
///
/// Questions go through [`Assessment::add_question`], so duplicate ids and
/// invalid questions are rejected here.
pub fn parse_assessment_str(content: &str, source_path: &Path) -> Result<Assessment> {
    let parsed: TomlAssessmentFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut assessment = Assessment::new(parsed.assessment.title, parsed.assessment.description)
        .with_time_limit(parsed.assessment.time_limit);

    for q in parsed.questions {
        let kind: QuestionKind = q
            .kind
            .parse()
            .with_context(|| format!("question {} in {}", q.id, source_path.display()))?;
        let difficulty = q
            .difficulty
            .map(|d| d.parse::<Difficulty>())
            .transpose()
            .with_context(|| format!("question {} in {}", q.id, source_path.display()))?
            .unwrap_or_default();

        let question = Question {
            id: q.id,
            text: q.text,
            kind,
            options: q.options,
            correct_answer: q.correct_answer,
            explanation: q.explanation,
            points: q.points,
            difficulty,
        };
        assessment
            .add_question(question)
            .with_context(|| format!("invalid assessment: {}", source_path.display()))?;
    }

    Ok(assessment)
}

/// Assessments loaded from a directory, plus the files that failed to load.
#[derive(Debug, Default)]
pub struct DirectoryLoad {
    pub assessments: Vec<Assessment>,
    pub skipped: Vec<SkippedFile>,
}

/// A `.toml` file that could not be loaded as an assessment.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

/// Recursively load all `.toml` assessment files from a directory.
///
/// Files that fail to parse are logged and returned in
/// [`DirectoryLoad::skipped`] instead of aborting the walk.
pub fn load_assessment_directory(dir: &Path) -> Result<DirectoryLoad> {
    let mut loaded = DirectoryLoad::default();
    walk_directory(dir, &mut loaded)?;
    Ok(loaded)
}

fn walk_directory(dir: &Path, loaded: &mut DirectoryLoad) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            walk_directory(&path, loaded)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_assessment(&path) {
                Ok(assessment) => loaded.assessments.push(assessment),
                Err(error) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), error);
                    loaded.skipped.push(SkippedFile { path, error });
                }
            }
        }
    }

    Ok(())
}

/// A warning from assessment validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate an assessment for authoring issues that do not break grading.
pub fn validate_assessment(assessment: &Assessment) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if assessment.time_limit == 0 {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "time_limit is 0 minutes".into(),
        });
    }

    if assessment.questions().is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "assessment has no questions".into(),
        });
    }

    for question in assessment.questions() {
        let warn = |message: String| ValidationWarning {
            question_id: Some(question.id.clone()),
            message,
        };

        if question.text.trim().is_empty() {
            warnings.push(warn("question text is empty".into()));
        }

        match question.kind {
            QuestionKind::MultipleChoice => {
                if !question.options.contains(&question.correct_answer) {
                    warnings.push(warn(format!(
                        "correct_answer {:?} is not one of the options",
                        question.correct_answer
                    )));
                }
            }
            _ if !question.options.is_empty() => {
                warnings.push(warn(format!(
                    "options are ignored for {} questions",
                    question.kind
                )));
            }
            _ => {}
        }

        if question.explanation.trim().is_empty() {
            warnings.push(warn("explanation is empty".into()));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssessmentError;

    const VALID_TOML: &str = r#"
[assessment]
title = "Lists Fundamentals Assessment"
description = "Basic list operations"
time_limit = 15

[[questions]]
id = "q1"
text = "What is the output of `my_list = [1, 2, 3]; print(my_list[1])`?"
kind = "multiple_choice"
options = ["1", "2", "3", "IndexError"]
correct_answer = "2"
explanation = "List indexing starts at 0."
difficulty = "beginner"

[[questions]]
id = "q2"
text = "Add 'apple' to the end of the list."
kind = "code_completion"
correct_answer = "fruits.append('apple')"
explanation = "append() adds to the end."
points = 2
"#;

    #[test]
    fn parse_valid_toml() {
        let assessment =
            parse_assessment_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(assessment.title, "Lists Fundamentals Assessment");
        assert_eq!(assessment.time_limit, 15);
        assert_eq!(assessment.questions().len(), 2);
        assert_eq!(assessment.questions()[0].difficulty, Difficulty::Beginner);
        assert_eq!(assessment.questions()[1].points, 2);
        assert_eq!(
            assessment.questions()[1].difficulty,
            Difficulty::Intermediate
        );
        assert!(validate_assessment(&assessment).is_empty());
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[assessment]
title = "Minimal"

[[questions]]
id = "q1"
text = "Which method removes the last element?"
kind = "short_answer"
correct_answer = "pop"
"#;
        let assessment = parse_assessment_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(assessment.time_limit, DEFAULT_TIME_LIMIT);
        assert_eq!(assessment.questions()[0].points, 1);
        assert!(assessment.questions()[0].explanation.is_empty());
    }

    #[test]
    fn parse_rejects_duplicate_ids() {
        let toml = r#"
[assessment]
title = "Dupes"

[[questions]]
id = "same"
text = "First"
kind = "short_answer"
correct_answer = "a"

[[questions]]
id = "same"
text = "Second"
kind = "short_answer"
correct_answer = "b"
"#;
        let err = parse_assessment_str(toml, &PathBuf::from("dupes.toml")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AssessmentError>(),
            Some(&AssessmentError::DuplicateId("same".into()))
        );
    }

    #[test]
    fn parse_rejects_unknown_difficulty_and_kind() {
        let toml = r#"
[assessment]
title = "Bad"

[[questions]]
id = "q1"
text = "?"
kind = "short_answer"
correct_answer = "a"
difficulty = "expert"
"#;
        let err = parse_assessment_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("unrecognized difficulty: expert"));

        let toml = toml
            .replace("short_answer", "essay")
            .replace("difficulty = \"expert\"", "");
        let err = parse_assessment_str(&toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("unrecognized question kind: essay"));
    }

    #[test]
    fn parse_rejects_multiple_choice_without_options() {
        let toml = r#"
[assessment]
title = "Bad"

[[questions]]
id = "q1"
text = "Pick one"
kind = "multiple_choice"
correct_answer = "a"
"#;
        let err = parse_assessment_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("at least one option"));
    }

    #[test]
    fn large_point_values_grade_without_overflow() {
        let toml = r#"
[assessment]
title = "Heavy"

[[questions]]
id = "q1"
text = "?"
kind = "short_answer"
correct_answer = "a"
points = 4000000000

[[questions]]
id = "q2"
text = "?"
kind = "short_answer"
correct_answer = "b"
points = 4000000000
"#;
        let assessment = parse_assessment_str(toml, &PathBuf::from("heavy.toml")).unwrap();
        assert_eq!(assessment.total_points(), 8_000_000_000);

        let answers: crate::model::Answers =
            [("q1".to_string(), "a".to_string())].into_iter().collect();
        let result = assessment.grade(&answers, 0.0);
        assert_eq!(result.score, 4_000_000_000);
        assert_eq!(result.percentage, 50.0);

        let breakdown = crate::statistics::compute_breakdown(assessment.questions(), &result);
        assert_eq!(breakdown.by_kind[&QuestionKind::ShortAnswer].possible, 8_000_000_000);
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_assessment_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_flags_authoring_issues() {
        let toml = r#"
[assessment]
title = "Sloppy"
time_limit = 0

[[questions]]
id = "q1"
text = "Pick"
kind = "multiple_choice"
options = ["a", "b"]
correct_answer = "c"
explanation = "c is right"

[[questions]]
id = "q2"
text = "  "
kind = "short_answer"
options = ["x"]
correct_answer = "pop"
"#;
        let assessment = parse_assessment_str(toml, &PathBuf::from("t.toml")).unwrap();
        let warnings = validate_assessment(&assessment);
        let messages: Vec<_> = warnings.iter().map(|w| w.message.as_str()).collect();

        assert!(messages.iter().any(|m| m.contains("time_limit")));
        assert!(messages.iter().any(|m| m.contains("not one of the options")));
        assert!(messages.iter().any(|m| m.contains("text is empty")));
        assert!(messages.iter().any(|m| m.contains("options are ignored")));
        assert!(warnings
            .iter()
            .any(|w| w.question_id.as_deref() == Some("q2") && w.message.contains("explanation")));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lists.toml"), VALID_TOML).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/broken.toml"), "not [valid").unwrap();
        std::fs::write(dir.path().join("notes.md"), "# ignored").unwrap();

        let loaded = load_assessment_directory(dir.path()).unwrap();
        assert_eq!(loaded.assessments.len(), 1);
        assert_eq!(loaded.assessments[0].questions().len(), 2);
        assert_eq!(loaded.skipped.len(), 1);
        assert!(loaded.skipped[0].path.ends_with("nested/broken.toml"));
        assert!(format!("{:#}", loaded.skipped[0].error).contains("failed to parse TOML"));
    }

    #[test]
    fn load_directory_requires_a_directory() {
        assert!(load_assessment_directory(&PathBuf::from("does-not-exist")).is_err());
    }
}
