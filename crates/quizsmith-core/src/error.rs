//! Assessment error types.
//!
//! These errors cover authoring mistakes: building an assessment out of
//! questions that break its invariants, or naming a kind or difficulty that
//! does not exist. Grading itself never fails.

use thiserror::Error;

/// Errors raised while authoring an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// A question with this id is already part of the assessment.
    #[error("duplicate question id: {0}")]
    DuplicateId(String),

    /// A required field is missing or holds an unusable value.
    #[error("invalid question '{question_id}': {message}")]
    Configuration { question_id: String, message: String },

    /// A value outside an enumerated set (e.g. an unknown difficulty).
    #[error("unrecognized {field}: {value}")]
    UnrecognizedValue { field: &'static str, value: String },
}

impl AssessmentError {
    pub(crate) fn configuration(question_id: &str, message: impl Into<String>) -> Self {
        AssessmentError::Configuration {
            question_id: question_id.to_string(),
            message: message.into(),
        }
    }

    /// Returns `true` if the error stems from a configuration problem rather
    /// than from a clash with an existing question.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AssessmentError::Configuration { .. } | AssessmentError::UnrecognizedValue { .. }
        )
    }
}
