//! Learner-facing results of a marking pass.

use serde::{Deserialize, Serialize};

use crate::scoring::{MarkingTotals, QuestionScore};
use crate::session::QuizSession;
use crate::types::{ChoiceQuestion, Question, QuestionKind, QuestionType};

/// Correctness of one marked question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    Correct,
    Partial,
    Incorrect,
    Unanswered,
}

impl QuestionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Correct => "Correct",
            Self::Partial => "Partly correct",
            Self::Incorrect => "Incorrect",
            Self::Unanswered => "No answer submitted",
        }
    }
}

/// Result line for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub id: String,
    pub label: String,
    pub question_type: QuestionType,
    pub status: QuestionStatus,
    pub score: u32,
    pub max_score: u32,
    pub detail: String,
}

/// Full results of a marked session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkingReport {
    pub total_score: u32,
    pub total_max: u32,
    pub summary: String,
    pub items: Vec<ResultItem>,
}

/// Classify a question given the score it received.
pub fn question_status(question: &Question, score: QuestionScore) -> QuestionStatus {
    if !question.has_answer() {
        QuestionStatus::Unanswered
    } else if score.max_score > 0 && score.score == score.max_score {
        QuestionStatus::Correct
    } else if score.score == 0 {
        QuestionStatus::Incorrect
    } else {
        QuestionStatus::Partial
    }
}

/// Feedback for one question, available only while the session is marked.
pub fn question_feedback(session: &QuizSession, index: usize) -> Option<QuestionStatus> {
    let score = session.question_score(index)?;
    let question = session.question(index)?;
    Some(question_status(question, score))
}

pub fn summary_text(totals: MarkingTotals) -> String {
    format!("You scored {} out of {}.", totals.total_score, totals.total_max)
}

/// Explanation shown under a question in the results.
pub fn result_detail(question: &Question, score: QuestionScore) -> String {
    let answered = question.has_answer();
    let full_marks = score.max_score > 0 && score.score == score.max_score;

    match question.kind() {
        QuestionKind::Matrix(_) => {
            if !answered {
                return "No statements answered.".to_string();
            }
            format!(
                "You answered {} of {} statements correctly.",
                score.score, score.max_score
            )
        }
        QuestionKind::SingleChoice(q) | QuestionKind::Boolean(q) => {
            let correct = q.correct.first().and_then(|&i| q.option(i));
            if !answered {
                return match correct {
                    Some(correct) => format!(
                        "No answer submitted. Correct answer: {}.",
                        correct.trim_end_matches('.')
                    ),
                    None => "No answer submitted.".to_string(),
                };
            }
            if full_marks {
                return "Correct!".to_string();
            }
            let chosen = q.selected().first().and_then(|&i| q.option(i)).unwrap_or("");
            format!(
                "You chose \"{}\". Correct answer: \"{}\".",
                chosen,
                correct.unwrap_or("")
            )
        }
        QuestionKind::MultiChoice(q) => {
            if !answered {
                return "No answer submitted.".to_string();
            }
            if full_marks {
                return "All correct selections.".to_string();
            }
            format!("No credit awarded. Correct options: {}.", option_list(q, &q.correct))
        }
        QuestionKind::ShortText(q) => {
            if !answered {
                return "No answer submitted. Try mentioning key details from the passage."
                    .to_string();
            }
            if full_marks {
                return "Great explanation! You included the key idea.".to_string();
            }
            let hints = q.rubric.hint_keywords();
            if hints.is_empty() {
                "Needs another detail from the passage.".to_string()
            } else {
                format!("Needs another detail. Try including: {}.", hints.join(", "))
            }
        }
        QuestionKind::Unsupported { .. } => {
            "This question type is not marked automatically.".to_string()
        }
    }
}

/// Build the results of a marked session. `None` until the session is marked.
pub fn build_report(session: &QuizSession) -> Option<MarkingReport> {
    let totals = session.totals()?;

    let items = session
        .questions()
        .iter()
        .enumerate()
        .filter_map(|(index, question)| {
            let score = session.question_score(index)?;
            Some(ResultItem {
                id: question.id.clone(),
                label: question.label.clone(),
                question_type: question.question_type(),
                status: question_status(question, score),
                score: score.score,
                max_score: score.max_score,
                detail: result_detail(question, score),
            })
        })
        .collect();

    Some(MarkingReport {
        total_score: totals.total_score,
        total_max: totals.total_max,
        summary: summary_text(totals),
        items,
    })
}

fn option_list(question: &ChoiceQuestion, indices: &[usize]) -> String {
    let mut indices = indices.to_vec();
    indices.sort_unstable();
    indices.dedup();
    indices
        .into_iter()
        .filter_map(|i| question.option(i))
        .collect::<Vec<_>>()
        .join(", ")
}
