//! quizsmith-core — Assessment model, auto-grader, and loading.
//!
//! This crate defines the question and assessment data model, the grading
//! rules for each question kind, and the session runner that collects answers
//! from an injected answer source.

pub mod config;
pub mod engine;
pub mod error;
pub mod grader;
pub mod model;
pub mod parser;
pub mod report;
pub mod results;
pub mod statistics;
pub mod traits;

pub use error::AssessmentError;
pub use model::{Answers, Assessment, Difficulty, Question, QuestionKind};
pub use results::{AssessmentResult, PerformanceTier, QuestionFeedback, Submission};
pub use traits::{AnswerSource, ScriptedAnswers};
