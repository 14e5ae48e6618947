//! Core types for reading quizzes.

use serde::{Deserialize, Serialize};

use crate::error::AnswerError;
use crate::rubric::Rubric;

/// Question type, as reported to collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultiChoice,
    Boolean,
    Matrix,
    ShortText,
    Unsupported,
}

impl QuestionType {
    /// Get the question type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleChoice => "single_choice",
            Self::MultiChoice => "multi_choice",
            Self::Boolean => "boolean",
            Self::Matrix => "matrix",
            Self::ShortText => "short_text",
            Self::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A learner's response, shaped by question type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    /// Selected option indices (single, multi and boolean questions).
    Choice { selected: Vec<usize> },
    /// One optional selection per matrix statement.
    Matrix { selected: Vec<Option<usize>> },
    Text { text: String },
}

/// Options, correct indices and current selection of a choice question.
#[derive(Debug, Clone)]
pub struct ChoiceQuestion {
    pub options: Vec<String>,
    pub correct: Vec<usize>,
    selected: Vec<usize>,
}

impl ChoiceQuestion {
    pub fn new(options: Vec<String>, correct: Vec<usize>) -> Self {
        Self {
            options,
            correct,
            selected: Vec::new(),
        }
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    /// Text of the option at `index`, if it exists.
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    fn check_index(&self, index: usize) -> Result<(), AnswerError> {
        if index < self.options.len() {
            Ok(())
        } else {
            Err(AnswerError::OptionOutOfRange {
                index,
                options: self.options.len(),
            })
        }
    }
}

/// One row of a matrix question.
#[derive(Debug, Clone)]
pub struct Statement {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: Option<usize>,
    selected: Option<usize>,
}

impl Statement {
    pub fn new(text: String, options: Vec<String>, correct_index: Option<usize>) -> Self {
        Self {
            text,
            options,
            correct_index,
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_correct(&self) -> bool {
        self.selected.is_some() && self.selected == self.correct_index
    }
}

/// A grid of statements, each answered with one of its own options.
#[derive(Debug, Clone, Default)]
pub struct MatrixQuestion {
    pub statements: Vec<Statement>,
}

/// A free-text question graded by a rubric.
#[derive(Debug, Clone, Default)]
pub struct ShortTextQuestion {
    pub rubric: Rubric,
    answer: String,
}

impl ShortTextQuestion {
    pub fn new(rubric: Rubric) -> Self {
        Self {
            rubric,
            answer: String::new(),
        }
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// Question definition together with the learner's response.
#[derive(Debug, Clone)]
pub enum QuestionKind {
    SingleChoice(ChoiceQuestion),
    MultiChoice(ChoiceQuestion),
    Boolean(ChoiceQuestion),
    Matrix(MatrixQuestion),
    ShortText(ShortTextQuestion),
    /// A type this engine cannot mark. Always scores 0 out of 0.
    Unsupported { type_name: String },
}

/// A quiz question.
#[derive(Debug, Clone)]
pub struct Question {
    pub id: String,
    pub label: String,
    pub text: String,
    kind: QuestionKind,
    max_score: u32,
    bookmarked: bool,
    score: Option<u32>,
}

impl Question {
    pub fn new(id: String, label: String, text: String, kind: QuestionKind, max_score: u32) -> Self {
        let max_score = match kind {
            QuestionKind::Unsupported { .. } => 0,
            _ => max_score,
        };
        Self {
            id,
            label,
            text,
            kind,
            max_score,
            bookmarked: false,
            score: None,
        }
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    pub fn question_type(&self) -> QuestionType {
        match self.kind {
            QuestionKind::SingleChoice(_) => QuestionType::SingleChoice,
            QuestionKind::MultiChoice(_) => QuestionType::MultiChoice,
            QuestionKind::Boolean(_) => QuestionType::Boolean,
            QuestionKind::Matrix(_) => QuestionType::Matrix,
            QuestionKind::ShortText(_) => QuestionType::ShortText,
            QuestionKind::Unsupported { .. } => QuestionType::Unsupported,
        }
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked
    }

    /// Whether the learner has given any response at all.
    pub fn has_answer(&self) -> bool {
        match &self.kind {
            QuestionKind::SingleChoice(q) | QuestionKind::MultiChoice(q) | QuestionKind::Boolean(q) => {
                !q.selected.is_empty()
            }
            QuestionKind::Matrix(q) => q.statements.iter().any(|s| s.selected.is_some()),
            QuestionKind::ShortText(q) => !q.answer.trim().is_empty(),
            QuestionKind::Unsupported { .. } => false,
        }
    }

    /// Current response, or `None` for unsupported questions.
    pub fn answer(&self) -> Option<Answer> {
        match &self.kind {
            QuestionKind::SingleChoice(q) | QuestionKind::MultiChoice(q) | QuestionKind::Boolean(q) => {
                Some(Answer::Choice {
                    selected: q.selected.clone(),
                })
            }
            QuestionKind::Matrix(q) => Some(Answer::Matrix {
                selected: q.statements.iter().map(|s| s.selected).collect(),
            }),
            QuestionKind::ShortText(q) => Some(Answer::Text {
                text: q.answer.clone(),
            }),
            QuestionKind::Unsupported { .. } => None,
        }
    }

    /// Score recorded by the last marking pass, regardless of whether it is
    /// still current. Collaborators should go through the session.
    pub(crate) fn recorded_score(&self) -> Option<u32> {
        self.score
    }

    pub(crate) fn record_score(&mut self, score: u32) {
        self.score = Some(score);
    }

    pub(crate) fn clear_score(&mut self) {
        self.score = None;
    }

    pub(crate) fn toggle_bookmark(&mut self) -> bool {
        self.bookmarked = !self.bookmarked;
        self.bookmarked
    }

    /// Replace the whole response.
    pub(crate) fn set_answer(&mut self, answer: Answer) -> Result<(), AnswerError> {
        let expected = self.question_type();
        match (&mut self.kind, answer) {
            (
                QuestionKind::SingleChoice(q) | QuestionKind::MultiChoice(q) | QuestionKind::Boolean(q),
                Answer::Choice { selected },
            ) => {
                for &index in &selected {
                    q.check_index(index)?;
                }
                q.selected = selected;
                Ok(())
            }
            (QuestionKind::Matrix(q), Answer::Matrix { selected }) => {
                if selected.len() > q.statements.len() {
                    return Err(AnswerError::StatementOutOfRange {
                        index: selected.len() - 1,
                        statements: q.statements.len(),
                    });
                }
                for (statement, choice) in q.statements.iter().zip(&selected) {
                    if let Some(index) = *choice {
                        if index >= statement.options.len() {
                            return Err(AnswerError::OptionOutOfRange {
                                index,
                                options: statement.options.len(),
                            });
                        }
                    }
                }
                for (i, statement) in q.statements.iter_mut().enumerate() {
                    statement.selected = selected.get(i).copied().flatten();
                }
                Ok(())
            }
            (QuestionKind::ShortText(q), Answer::Text { text }) => {
                q.answer = text;
                Ok(())
            }
            _ => Err(AnswerError::KindMismatch { expected }),
        }
    }

    /// Select an option. Single and boolean questions replace their
    /// selection; multi-choice questions add to it.
    pub(crate) fn select_option(&mut self, option: usize) -> Result<(), AnswerError> {
        let expected = self.question_type();
        match &mut self.kind {
            QuestionKind::SingleChoice(q) | QuestionKind::Boolean(q) => {
                q.check_index(option)?;
                q.selected = vec![option];
                Ok(())
            }
            QuestionKind::MultiChoice(q) => {
                q.check_index(option)?;
                if !q.selected.contains(&option) {
                    q.selected.push(option);
                }
                Ok(())
            }
            _ => Err(AnswerError::KindMismatch { expected }),
        }
    }

    pub(crate) fn deselect_option(&mut self, option: usize) -> Result<(), AnswerError> {
        let expected = self.question_type();
        match &mut self.kind {
            QuestionKind::SingleChoice(q) | QuestionKind::MultiChoice(q) | QuestionKind::Boolean(q) => {
                q.selected.retain(|&index| index != option);
                Ok(())
            }
            _ => Err(AnswerError::KindMismatch { expected }),
        }
    }

    pub(crate) fn select_statement_option(
        &mut self,
        statement: usize,
        option: usize,
    ) -> Result<(), AnswerError> {
        let expected = self.question_type();
        let QuestionKind::Matrix(q) = &mut self.kind else {
            return Err(AnswerError::KindMismatch { expected });
        };
        let statements = q.statements.len();
        let row = q
            .statements
            .get_mut(statement)
            .ok_or(AnswerError::StatementOutOfRange {
                index: statement,
                statements,
            })?;
        if option >= row.options.len() {
            return Err(AnswerError::OptionOutOfRange {
                index: option,
                options: row.options.len(),
            });
        }
        row.selected = Some(option);
        Ok(())
    }
}
