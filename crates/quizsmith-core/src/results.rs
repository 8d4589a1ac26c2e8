//! Result types produced by grading an attempt.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Answers;

/// The raw outcome of running an assessment against an answer source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Collected answers. Questions whose collection failed are absent.
    pub answers: Answers,
    /// Elapsed minutes between session start and the last answer.
    pub time_taken: f64,
}

/// The immutable outcome of grading one completed attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Answers as submitted, keyed by question id.
    pub answers: Answers,
    /// Points earned.
    pub score: u64,
    /// Points available.
    pub total_points: u64,
    /// `100 * score / total_points`, or 0 when there are no points.
    pub percentage: f64,
    /// One entry per question, in question order.
    pub feedback: Vec<QuestionFeedback>,
    /// Elapsed minutes.
    pub time_taken: f64,
}

impl AssessmentResult {
    pub fn tier(&self) -> PerformanceTier {
        PerformanceTier::from_percentage(self.percentage)
    }

    pub fn correct_count(&self) -> usize {
        self.feedback.iter().filter(|f| f.correct).count()
    }

    /// Feedback rendered as display lines, in question order.
    pub fn feedback_lines(&self) -> Vec<String> {
        self.feedback.iter().map(ToString::to_string).collect()
    }

    /// Whether the attempt ran past an advisory limit in minutes.
    pub fn exceeded(&self, time_limit: u32) -> bool {
        self.time_taken > f64::from(time_limit)
    }
}

/// Feedback for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFeedback {
    pub question_id: String,
    pub correct: bool,
    pub points_awarded: u32,
    #[serde(default)]
    pub explanation: String,
}

impl fmt::Display for QuestionFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.correct {
            write!(f, "✅ Question {}: Correct!", self.question_id)?;
        } else {
            write!(f, "❌ Question {}: Incorrect.", self.question_id)?;
        }
        if !self.explanation.is_empty() {
            write!(f, " {}", self.explanation)?;
        }
        Ok(())
    }
}

/// Qualitative banding of a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    NeedsPractice,
    Good,
    Great,
    Excellent,
}

impl PerformanceTier {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            PerformanceTier::Excellent
        } else if percentage >= 80.0 {
            PerformanceTier::Great
        } else if percentage >= 70.0 {
            PerformanceTier::Good
        } else {
            PerformanceTier::NeedsPractice
        }
    }

    /// Banner shown under the score.
    pub fn message(&self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "🏆 Excellent work!",
            PerformanceTier::Great => "🎉 Great job!",
            PerformanceTier::Good => "👍 Good effort!",
            PerformanceTier::NeedsPractice => "📚 Keep practicing!",
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceTier::Excellent => write!(f, "excellent"),
            PerformanceTier::Great => write!(f, "great"),
            PerformanceTier::Good => write!(f, "good"),
            PerformanceTier::NeedsPractice => write!(f, "needs practice"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_thresholds() {
        assert_eq!(PerformanceTier::from_percentage(100.0), PerformanceTier::Excellent);
        assert_eq!(PerformanceTier::from_percentage(90.0), PerformanceTier::Excellent);
        assert_eq!(PerformanceTier::from_percentage(89.9), PerformanceTier::Great);
        assert_eq!(PerformanceTier::from_percentage(80.0), PerformanceTier::Great);
        assert_eq!(PerformanceTier::from_percentage(75.0), PerformanceTier::Good);
        assert_eq!(PerformanceTier::from_percentage(69.9), PerformanceTier::NeedsPractice);
        assert_eq!(PerformanceTier::from_percentage(0.0), PerformanceTier::NeedsPractice);
    }

    #[test]
    fn feedback_line_carries_marker_id_and_explanation() {
        let fb = QuestionFeedback {
            question_id: "q1".into(),
            correct: true,
            points_awarded: 1,
            explanation: "Indexing starts at 0.".into(),
        };
        assert_eq!(fb.to_string(), "✅ Question q1: Correct! Indexing starts at 0.");

        let fb = QuestionFeedback {
            question_id: "q2".into(),
            correct: false,
            points_awarded: 0,
            explanation: String::new(),
        };
        assert_eq!(fb.to_string(), "❌ Question q2: Incorrect.");
    }

    #[test]
    fn exceeded_time_limit_is_advisory() {
        let result = AssessmentResult {
            answers: Answers::new(),
            score: 0,
            total_points: 0,
            percentage: 0.0,
            feedback: vec![],
            time_taken: 16.5,
        };
        assert!(result.exceeded(15));
        assert!(!result.exceeded(30));
    }
}
