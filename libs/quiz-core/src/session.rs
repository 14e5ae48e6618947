//! Quiz session: one learner working through one pack.
//!
//! The session owns the questions. Answers can only change through it, and
//! every change made after a marking pass clears all recorded scores and the
//! marked flag before the call returns, so scores are never observable next to
//! an answer they were not computed from.

use tracing::debug;

use crate::error::AnswerError;
use crate::pack::{Pack, PassageNode};
use crate::scoring::{mark_all, MarkingTotals, QuestionScore};
use crate::types::{Answer, Question};

/// Confirmation shown before a marking pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkPrompt {
    FirstCheck,
    Recheck,
}

impl MarkPrompt {
    pub fn message(&self) -> &'static str {
        match self {
            Self::FirstCheck => {
                "You're about to check your answers. You can still go back if you need to change anything."
            }
            Self::Recheck => {
                "You have already checked your answers. Checking again will refresh your feedback. Continue?"
            }
        }
    }
}

/// Outcome of moving forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved(usize),
    /// Already on the last question; marking must be confirmed.
    ConfirmMarking(MarkPrompt),
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    pack_id: String,
    title: String,
    passage: Vec<PassageNode>,
    questions: Vec<Question>,
    current: usize,
    marked: bool,
    confirming: bool,
}

impl QuizSession {
    pub fn new(pack: Pack) -> Self {
        Self {
            pack_id: pack.id,
            title: pack.title,
            passage: pack.passage,
            questions: pack.questions,
            current: 0,
            marked: false,
            confirming: false,
        }
    }

    pub fn pack_id(&self) -> &str {
        &self.pack_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn passage(&self) -> &[PassageNode] {
        &self.passage
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Position of the question with the given id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// Whether a marking confirmation is waiting for an answer.
    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    // === Navigation ===

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Jump to a question. Out-of-range indices clamp to the last question.
    pub fn go_to(&mut self, index: usize) {
        self.current = index.min(self.questions.len().saturating_sub(1));
        self.confirming = false;
    }

    /// Move back one question. Returns false at the first question.
    pub fn back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.go_to(self.current - 1);
        true
    }

    /// Move forward, or ask for marking confirmation on the last question.
    pub fn advance(&mut self) -> Option<Advance> {
        if self.current + 1 < self.questions.len() {
            self.go_to(self.current + 1);
            Some(Advance::Moved(self.current))
        } else {
            self.request_marking().map(Advance::ConfirmMarking)
        }
    }

    /// Toggle the bookmark on the current question.
    pub fn toggle_bookmark(&mut self) -> Option<bool> {
        self.questions
            .get_mut(self.current)
            .map(Question::toggle_bookmark)
    }

    // === Answers ===

    /// Select an option. Single and boolean questions replace their
    /// selection; multi-choice questions add to it.
    pub fn select_option(&mut self, index: usize, option: usize) -> Result<(), AnswerError> {
        self.update(index, |q| q.select_option(option))
    }

    pub fn deselect_option(&mut self, index: usize, option: usize) -> Result<(), AnswerError> {
        self.update(index, |q| q.deselect_option(option))
    }

    pub fn select_statement_option(
        &mut self,
        index: usize,
        statement: usize,
        option: usize,
    ) -> Result<(), AnswerError> {
        self.update(index, |q| q.select_statement_option(statement, option))
    }

    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> Result<(), AnswerError> {
        let text = text.into();
        self.update(index, |q| q.set_answer(Answer::Text { text }))
    }

    /// Replace the whole response of a question.
    pub fn set_answer(&mut self, index: usize, answer: Answer) -> Result<(), AnswerError> {
        self.update(index, |q| q.set_answer(answer))
    }

    fn update<F>(&mut self, index: usize, f: F) -> Result<(), AnswerError>
    where
        F: FnOnce(&mut Question) -> Result<(), AnswerError>,
    {
        let question = self
            .questions
            .get_mut(index)
            .ok_or(AnswerError::NoSuchQuestion { index })?;
        f(question)?;
        self.invalidate();
        Ok(())
    }

    /// Drop all scores and the marked flag.
    pub fn invalidate(&mut self) {
        if !self.marked {
            return;
        }
        self.marked = false;
        for question in &mut self.questions {
            question.clear_score();
        }
        debug!(pack = %self.pack_id, "marking invalidated");
    }

    // === Marking ===

    /// First step of the marking gesture. `None` when there is nothing to mark.
    pub fn request_marking(&mut self) -> Option<MarkPrompt> {
        if self.questions.is_empty() {
            return None;
        }
        self.confirming = true;
        Some(if self.marked {
            MarkPrompt::Recheck
        } else {
            MarkPrompt::FirstCheck
        })
    }

    pub fn cancel_marking(&mut self) {
        self.confirming = false;
    }

    /// Second step of the marking gesture. Does nothing unless a confirmation
    /// was requested.
    pub fn confirm_marking(&mut self) -> Option<MarkingTotals> {
        if !self.confirming {
            return None;
        }
        self.confirming = false;
        self.mark_all()
    }

    /// Run a marking pass over every question.
    pub fn mark_all(&mut self) -> Option<MarkingTotals> {
        if self.questions.is_empty() {
            return None;
        }
        let totals = mark_all(&mut self.questions);
        self.marked = true;
        Some(totals)
    }

    /// Score of a question, visible only while the session is marked.
    pub fn question_score(&self, index: usize) -> Option<QuestionScore> {
        if !self.marked {
            return None;
        }
        let question = self.questions.get(index)?;
        question.recorded_score().map(|score| QuestionScore {
            score,
            max_score: question.max_score(),
        })
    }

    /// Totals of the current marking pass.
    pub fn totals(&self) -> Option<MarkingTotals> {
        if !self.marked {
            return None;
        }
        Some(
            (0..self.questions.len())
                .filter_map(|i| self.question_score(i))
                .fold(MarkingTotals::default(), MarkingTotals::add),
        )
    }
}
