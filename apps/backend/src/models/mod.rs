//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export shared types from quiz-core
pub use quiz_core::{
    Answer, MarkingConfig, MarkingReport, PackSummary, PassageNode, Question, QuestionKind,
    QuestionType,
};

// === Pack Types ===

/// Query string of GET /api/packs
#[derive(Debug, Deserialize)]
pub struct PackQuery {
    pub pack: Option<String>,
}

/// Response for GET /api/packs
#[derive(Debug, Serialize)]
pub struct PackListResponse {
    pub packs: Vec<PackSummary>,
    pub selected: String,
}

/// Learner view of a pack: no correct answers, no rubrics
#[derive(Debug, Serialize)]
pub struct PackView {
    pub id: String,
    pub title: String,
    pub passage: Vec<PassageNode>,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub id: String,
    pub label: String,
    pub question_type: QuestionType,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub statements: Vec<StatementView>,
    pub max_score: u32,
}

#[derive(Debug, Serialize)]
pub struct StatementView {
    pub text: String,
    pub options: Vec<String>,
}

impl QuestionView {
    pub fn from_question(question: &Question) -> Self {
        let (options, statements) = match question.kind() {
            QuestionKind::SingleChoice(q) | QuestionKind::MultiChoice(q) | QuestionKind::Boolean(q) => {
                (q.options.clone(), Vec::new())
            }
            QuestionKind::Matrix(q) => (
                Vec::new(),
                q.statements
                    .iter()
                    .map(|s| StatementView {
                        text: s.text.clone(),
                        options: s.options.clone(),
                    })
                    .collect(),
            ),
            QuestionKind::ShortText(_) | QuestionKind::Unsupported { .. } => (Vec::new(), Vec::new()),
        };

        Self {
            id: question.id.clone(),
            label: question.label.clone(),
            question_type: question.question_type(),
            text: question.text.clone(),
            options,
            statements,
            max_score: question.max_score(),
        }
    }
}

// === Marking Types ===

/// Request body for POST /api/packs/:id/mark
#[derive(Debug, Deserialize)]
pub struct MarkRequest {
    #[serde(default)]
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub answer: Answer,
}

/// Response for POST /api/packs/:id/mark
#[derive(Debug, Serialize)]
pub struct MarkResponse {
    pub pack_id: String,
    #[serde(flatten)]
    pub report: MarkingReport,
    pub marked_at: DateTime<Utc>,
}

// === Rubric Types ===

/// Request body for POST /api/rubric/check
#[derive(Debug, Deserialize)]
pub struct RubricCheckRequest {
    pub answer: String,
    pub config: MarkingConfig,
}

#[derive(Debug, Serialize)]
pub struct RubricCheckResponse {
    pub correct: bool,
}
