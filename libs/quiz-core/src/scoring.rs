//! Per-type marking of questions.
//!
//! Canonical policy:
//! - single choice and boolean: all or nothing on the one selected option
//! - multi choice: all or nothing on the exact selected set
//! - matrix: one point per correctly answered statement, capped at max score
//! - short text: all or nothing on the rubric verdict
//! - unsupported: 0 out of 0

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rubric::check_short_answer;
use crate::types::{ChoiceQuestion, MatrixQuestion, Question, QuestionKind};

/// Score awarded to one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionScore {
    pub score: u32,
    pub max_score: u32,
}

/// Totals of a marking pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkingTotals {
    pub total_score: u32,
    pub total_max: u32,
}

impl MarkingTotals {
    /// Add one question's score. Saturates instead of overflowing.
    pub fn add(self, score: QuestionScore) -> Self {
        Self {
            total_score: self.total_score.saturating_add(score.score),
            total_max: self.total_max.saturating_add(score.max_score),
        }
    }
}

/// Mark one question and record the score on it.
pub fn mark_question(question: &mut Question) -> QuestionScore {
    let max_score = question.max_score();
    let score = match question.kind() {
        QuestionKind::SingleChoice(q) | QuestionKind::Boolean(q) => mark_single(q, max_score),
        QuestionKind::MultiChoice(q) => mark_multi(q, max_score),
        QuestionKind::Matrix(q) => mark_matrix(q, max_score),
        QuestionKind::ShortText(q) => {
            if check_short_answer(q.answer(), &q.rubric) {
                max_score
            } else {
                0
            }
        }
        QuestionKind::Unsupported { .. } => 0,
    };

    question.record_score(score);
    QuestionScore { score, max_score }
}

/// Mark every question in order, overwriting any previous scores.
pub fn mark_all(questions: &mut [Question]) -> MarkingTotals {
    let totals = questions
        .iter_mut()
        .map(mark_question)
        .fold(MarkingTotals::default(), MarkingTotals::add);

    debug!(
        questions = questions.len(),
        total_score = totals.total_score,
        total_max = totals.total_max,
        "marking pass complete"
    );
    totals
}

fn mark_single(question: &ChoiceQuestion, max_score: u32) -> u32 {
    match (question.selected(), question.correct.first()) {
        ([selected], Some(correct)) if selected == correct => max_score,
        _ => 0,
    }
}

fn mark_multi(question: &ChoiceQuestion, max_score: u32) -> u32 {
    if question.selected().is_empty() {
        return 0;
    }

    let mut selected = question.selected().to_vec();
    selected.sort_unstable();
    selected.dedup();

    let mut correct = question.correct.clone();
    correct.sort_unstable();
    correct.dedup();

    if selected == correct {
        max_score
    } else {
        0
    }
}

fn mark_matrix(question: &MatrixQuestion, max_score: u32) -> u32 {
    let correct = question.statements.iter().filter(|s| s.is_correct()).count();
    u32::try_from(correct).unwrap_or(u32::MAX).min(max_score)
}
