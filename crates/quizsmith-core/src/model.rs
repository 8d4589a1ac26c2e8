//! Core data model types for quizsmith.
//!
//! These are the fundamental types that the entire quizsmith system uses
//! to represent questions, their kinds, and the assessments that own them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;

/// Submitted answers keyed by question id. A missing key means unanswered.
pub type Answers = BTreeMap<String, String>;

/// A single gradable item in an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within its assessment.
    pub id: String,
    /// Prompt shown to the respondent.
    pub text: String,
    /// How the answer is collected and checked.
    pub kind: QuestionKind,
    /// Choices for multiple choice questions, in presentation order.
    #[serde(default)]
    pub options: Vec<String>,
    /// Reference value submissions are compared against.
    pub correct_answer: String,
    /// Shown with the feedback whether or not the answer was correct.
    #[serde(default)]
    pub explanation: String,
    /// Scoring weight.
    #[serde(default = "default_points")]
    pub points: u32,
    /// Informational only.
    #[serde(default)]
    pub difficulty: Difficulty,
}

fn default_points() -> u32 {
    1
}

impl Question {
    /// Create a question of any kind with default points and difficulty.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        kind: QuestionKind,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
            options: Vec::new(),
            correct_answer: correct_answer.into(),
            explanation: String::new(),
            points: default_points(),
            difficulty: Difficulty::default(),
        }
    }

    /// Create a multiple choice question. The correct answer is option text,
    /// not an index.
    pub fn multiple_choice<I, S>(
        id: impl Into<String>,
        text: impl Into<String>,
        options: I,
        correct_answer: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            ..Self::new(id, text, QuestionKind::MultipleChoice, correct_answer)
        }
    }

    pub fn code_completion(
        id: impl Into<String>,
        text: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self::new(id, text, QuestionKind::CodeCompletion, correct_answer)
    }

    pub fn short_answer(
        id: impl Into<String>,
        text: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self::new(id, text, QuestionKind::ShortAnswer, correct_answer)
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Check the invariants a question must hold before it joins an assessment.
    pub fn check(&self) -> Result<(), AssessmentError> {
        if self.id.trim().is_empty() {
            return Err(AssessmentError::configuration(&self.id, "id must not be empty"));
        }
        if self.points == 0 {
            return Err(AssessmentError::configuration(
                &self.id,
                "points must be a positive integer",
            ));
        }
        if self.kind == QuestionKind::MultipleChoice && self.options.is_empty() {
            return Err(AssessmentError::configuration(
                &self.id,
                "multiple choice questions need at least one option",
            ));
        }
        Ok(())
    }
}

/// The tag deciding how an answer is collected and checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    CodeCompletion,
    ShortAnswer,
    FreeForm,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [
        QuestionKind::MultipleChoice,
        QuestionKind::CodeCompletion,
        QuestionKind::ShortAnswer,
        QuestionKind::FreeForm,
    ];
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple_choice"),
            QuestionKind::CodeCompletion => write!(f, "code_completion"),
            QuestionKind::ShortAnswer => write!(f, "short_answer"),
            QuestionKind::FreeForm => write!(f, "free_form"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "multiple_choice" => Ok(QuestionKind::MultipleChoice),
            "code_completion" => Ok(QuestionKind::CodeCompletion),
            "short_answer" => Ok(QuestionKind::ShortAnswer),
            "free_form" => Ok(QuestionKind::FreeForm),
            other => Err(AssessmentError::UnrecognizedValue {
                field: "question kind",
                value: other.to_string(),
            }),
        }
    }
}

/// How hard a question is meant to be.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(AssessmentError::UnrecognizedValue {
                field: "difficulty",
                value: other.to_string(),
            }),
        }
    }
}

/// An ordered set of questions plus session metadata, run once per attempt.
#[derive(Debug, Clone)]
pub struct Assessment {
    /// Human-readable title.
    pub title: String,
    /// What the assessment covers.
    pub description: String,
    /// Advisory time limit in minutes. Never enforced.
    pub time_limit: u32,
    questions: Vec<Question>,
    pub(crate) start_time: Option<DateTime<Utc>>,
}

/// Default time limit in minutes.
pub const DEFAULT_TIME_LIMIT: u32 = 30;

impl Assessment {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            time_limit: DEFAULT_TIME_LIMIT,
            questions: Vec::new(),
            start_time: None,
        }
    }

    pub fn with_time_limit(mut self, minutes: u32) -> Self {
        self.time_limit = minutes;
        self
    }

    /// Append a question. Questions are never removed once added.
    ///
    /// Rejects a question whose id is already present, or one that fails
    /// [`Question::check`]. Nothing is appended on error.
    pub fn add_question(&mut self, question: Question) -> Result<(), AssessmentError> {
        question.check()?;
        if self.questions.iter().any(|q| q.id == question.id) {
            return Err(AssessmentError::DuplicateId(question.id));
        }
        self.questions.push(question);
        Ok(())
    }

    /// Questions in presentation order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Sum of points across every question.
    pub fn total_points(&self) -> u64 {
        self.questions.iter().map(|q| u64::from(q.points)).sum()
    }

    /// When the most recent run began, if any.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn summary(&self) -> AssessmentSummary {
        AssessmentSummary {
            title: self.title.clone(),
            description: self.description.clone(),
            time_limit: self.time_limit,
            question_count: self.questions.len(),
        }
    }
}

/// Summary of an assessment (without the full question definitions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub time_limit: u32,
    pub question_count: usize,
}
