//! Auto-grading.
//!
//! Grading is a single pass over the questions in order. It is pure and total:
//! any set of questions and answers yields a result, including no questions
//! and no answers at all.

use crate::model::{Answers, Assessment, Question, QuestionKind};
use crate::results::{AssessmentResult, QuestionFeedback};

/// Judge one submitted answer against a question's reference answer.
pub fn check_answer(question: &Question, submitted: &str) -> bool {
    let expected = question.correct_answer.as_str();
    match question.kind {
        QuestionKind::MultipleChoice => submitted == expected,
        QuestionKind::CodeCompletion => normalize_code(submitted) == normalize_code(expected),
        QuestionKind::ShortAnswer => {
            submitted.trim().to_lowercase() == expected.trim().to_lowercase()
        }
        QuestionKind::FreeForm => submitted == expected,
    }
}

/// Strip every whitespace character, so formatting never matters but tokens do.
pub fn normalize_code(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Grade `answers` against `questions`. Unanswered questions score nothing.
pub fn grade(questions: &[Question], answers: &Answers, time_taken: f64) -> AssessmentResult {
    let total_points: u64 = questions.iter().map(|q| u64::from(q.points)).sum();
    let mut score = 0u64;
    let mut feedback = Vec::with_capacity(questions.len());

    for question in questions {
        let submitted = answers.get(&question.id).map(String::as_str).unwrap_or("");
        let correct = check_answer(question, submitted);
        let points_awarded = if correct { question.points } else { 0 };
        score += u64::from(points_awarded);

        tracing::debug!(
            question = %question.id,
            kind = %question.kind,
            correct,
            "graded question"
        );

        feedback.push(QuestionFeedback {
            question_id: question.id.clone(),
            correct,
            points_awarded,
            explanation: question.explanation.clone(),
        });
    }

    let percentage = if total_points == 0 {
        0.0
    } else {
        score as f64 / total_points as f64 * 100.0
    };

    AssessmentResult {
        answers: answers.clone(),
        score,
        total_points,
        percentage,
        feedback,
        time_taken,
    }
}

impl Assessment {
    /// Grade a set of answers against this assessment's questions.
    pub fn grade(&self, answers: &Answers, time_taken: f64) -> AssessmentResult {
        grade(self.questions(), answers, time_taken)
    }
}
