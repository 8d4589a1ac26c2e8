//! Session orchestration.
//!
//! Runs an assessment's questions through an answer source in order, records
//! the start time and elapsed minutes, and hands the submission to the grader.

use std::time::{Duration, Instant};

use chrono::Utc;

use crate::model::{Answers, Assessment, Question};
use crate::results::{AssessmentResult, Submission};
use crate::traits::AnswerSource;

/// Progress reporting trait.
pub trait ProgressReporter {
    fn on_session_start(&self, title: &str, question_count: usize);
    fn on_question(&self, index: usize, total: usize, question: &Question);
    fn on_answer_failed(&self, question_id: &str, error: &str);
    fn on_session_complete(&self, answered: usize, total: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_session_start(&self, _: &str, _: usize) {}
    fn on_question(&self, _: usize, _: usize, _: &Question) {}
    fn on_answer_failed(&self, _: &str, _: &str) {}
    fn on_session_complete(&self, _: usize, _: usize, _: Duration) {}
}

impl Assessment {
    /// Collect an answer for every question, in order.
    pub fn run(&mut self, source: &mut dyn AnswerSource) -> Submission {
        self.run_with_progress(source, &NoopReporter)
    }

    /// Like [`Assessment::run`], reporting progress as questions are asked.
    ///
    /// A failing answer source leaves that question unanswered; the session
    /// is never aborted. No time limit is enforced.
    pub fn run_with_progress(
        &mut self,
        source: &mut dyn AnswerSource,
        progress: &dyn ProgressReporter,
    ) -> Submission {
        let total = self.questions().len();
        progress.on_session_start(&self.title, total);
        tracing::info!(title = %self.title, questions = total, "starting assessment");

        self.start_time = Some(Utc::now());
        let start = Instant::now();
        let mut answers = Answers::new();

        for (index, question) in self.questions().iter().enumerate() {
            progress.on_question(index + 1, total, question);
            match source.collect(question) {
                Ok(answer) => {
                    tracing::debug!(question = %question.id, "collected answer");
                    answers.insert(question.id.clone(), answer);
                }
                Err(e) => {
                    tracing::warn!("no answer for question {}: {:#}", question.id, e);
                    progress.on_answer_failed(&question.id, &format!("{e:#}"));
                }
            }
        }

        let elapsed = start.elapsed();
        progress.on_session_complete(answers.len(), total, elapsed);
        tracing::info!(
            answered = answers.len(),
            total,
            elapsed_ms = elapsed.as_millis() as u64,
            "assessment finished"
        );

        Submission {
            answers,
            time_taken: elapsed.as_secs_f64() / 60.0,
        }
    }

    /// Run the assessment and grade the submission.
    pub fn take(&mut self, source: &mut dyn AnswerSource) -> AssessmentResult {
        let submission = self.run(source);
        self.grade(&submission.answers, submission.time_taken)
    }
}
