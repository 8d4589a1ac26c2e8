//! Score breakdowns for a graded attempt.
//!
//! Difficulty never affects grading; these tallies only slice an existing
//! result so a report can show where points were lost.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, Question, QuestionKind};
use crate::results::AssessmentResult;

/// Points earned versus points available for one slice of an assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointTally {
    pub questions: usize,
    pub correct: usize,
    pub earned: u64,
    pub possible: u64,
}

impl PointTally {
    /// Earned share of possible points, 0 when nothing was possible.
    pub fn percentage(&self) -> f64 {
        if self.possible == 0 {
            0.0
        } else {
            self.earned as f64 / self.possible as f64 * 100.0
        }
    }
}

/// Per-difficulty and per-kind tallies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub by_difficulty: BTreeMap<Difficulty, PointTally>,
    pub by_kind: BTreeMap<QuestionKind, PointTally>,
}

/// Tally a result against the questions it was graded from.
///
/// Feedback is matched to questions by id; feedback for a question not in
/// `questions` is ignored.
pub fn compute_breakdown(questions: &[Question], result: &AssessmentResult) -> Breakdown {
    let mut breakdown = Breakdown::default();

    for question in questions {
        let feedback = result
            .feedback
            .iter()
            .find(|f| f.question_id == question.id);
        let (correct, earned) = match feedback {
            Some(f) => (f.correct, f.points_awarded),
            None => (false, 0),
        };

        for tally in [
            breakdown.by_difficulty.entry(question.difficulty).or_default(),
            breakdown.by_kind.entry(question.kind).or_default(),
        ] {
            tally.questions += 1;
            tally.possible += u64::from(question.points);
            tally.earned += u64::from(earned);
            if correct {
                tally.correct += 1;
            }
        }
    }

    breakdown
}
