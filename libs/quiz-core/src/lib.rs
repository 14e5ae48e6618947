//! Core grading engine for reading-comprehension quizzes.
//!
//! Provides:
//! - Text normalization and Levenshtein similarity
//! - Marking rubrics for free-text answers (patterns, fuzzy keywords, alternatives)
//! - Per-type question scoring and marking passes
//! - JSON pack parsing
//! - A quiz session with answer invalidation and a results report

pub mod error;
pub mod matching;
pub mod pack;
pub mod report;
pub mod rubric;
pub mod scoring;
pub mod session;
pub mod types;

pub use error::{AnswerError, PackError, Result, RubricError};
pub use matching::{levenshtein_distance, normalize, normalized_similarity};
pub use pack::{parse_manifest, parse_pack, resolve_pack_id, Pack, PackManifest, PackSummary, PassageNode, PassageNodeKind};
pub use report::{build_report, question_feedback, MarkingReport, QuestionStatus, ResultItem};
pub use rubric::{check_marking_config, check_short_answer, MarkingConfig, Rubric, RubricPoint};
pub use scoring::{mark_all, mark_question, MarkingTotals, QuestionScore};
pub use session::{Advance, MarkPrompt, QuizSession};
pub use types::{
    Answer, ChoiceQuestion, MatrixQuestion, Question, QuestionKind, QuestionType, ShortTextQuestion,
    Statement,
};
