//! Error types for quiz-core.

use thiserror::Error;

use crate::types::QuestionType;

/// Result type alias using PackError.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors raised while compiling a marking configuration into a rubric.
#[derive(Debug, Error)]
pub enum RubricError {
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("fuzzy threshold {value} is outside [0, 1]")]
    InvalidThreshold { value: f64 },
}

/// Errors that can occur while loading a pack or pack manifest.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("question {question}: {source}")]
    Rubric {
        question: String,
        #[source]
        source: RubricError,
    },

    #[error("duplicate question ID {id} at position {position}")]
    DuplicateId { id: String, position: usize },
}

/// Errors raised when a response does not fit the question it is given to.
#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("no question at position {index}")]
    NoSuchQuestion { index: usize },

    #[error("answer does not fit a {expected} question")]
    KindMismatch { expected: QuestionType },

    #[error("option {index} out of range ({options} options)")]
    OptionOutOfRange { index: usize, options: usize },

    #[error("statement {index} out of range ({statements} statements)")]
    StatementOutOfRange { index: usize, statements: usize },
}
