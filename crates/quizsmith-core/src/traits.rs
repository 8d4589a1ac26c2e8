//! The answer source seam.
//!
//! The core never reads input itself. Whoever runs an assessment supplies an
//! [`AnswerSource`]: a console prompt, a web form, a file, or a test closure.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Answers, Question};

/// Supplies a submitted answer for a question.
///
/// Implementations may block. An error means "no answer" for that question;
/// the session carries on with the next one.
pub trait AnswerSource {
    fn collect(&mut self, question: &Question) -> Result<String>;
}

impl<F> AnswerSource for F
where
    F: FnMut(&Question) -> Result<String>,
{
    fn collect(&mut self, question: &Question) -> Result<String> {
        self(question)
    }
}

/// An answer source backed by a fixed map of answers.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnswers {
    answers: Answers,
}

impl ScriptedAnswers {
    pub fn new(answers: Answers) -> Self {
        Self { answers }
    }

    /// Load answers from a TOML file with an `[answers]` table.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::new(parse_answers(path)?))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl FromIterator<(String, String)> for ScriptedAnswers {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl AnswerSource for ScriptedAnswers {
    fn collect(&mut self, question: &Question) -> Result<String> {
        self.answers
            .get(&question.id)
            .cloned()
            .with_context(|| format!("no scripted answer for question {}", question.id))
    }
}

#[derive(Debug, Deserialize)]
struct TomlAnswersFile {
    #[serde(default)]
    answers: BTreeMap<String, String>,
}

/// Read an answers file:
///
/// ```toml
/// [answers]
/// q1 = "2"
/// q2 = """
/// fruits.append('apple')
/// """
/// ```
pub fn parse_answers(path: &Path) -> Result<Answers> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    parse_answers_str(&content, path)
}

/// Parse an answers TOML string (useful for testing).
pub fn parse_answers_str(content: &str, source_path: &Path) -> Result<Answers> {
    let parsed: TomlAnswersFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
    Ok(parsed.answers)
}
