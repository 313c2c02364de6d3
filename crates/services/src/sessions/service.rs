use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

use quiz_core::Clock;
use quiz_core::model::{OptionNumber, QuestionRecord};

use super::progress::{SessionProgress, SessionStatus};
use super::view::{QuestionOutcome, ResultSummary};

//
// ─── TRANSITIONS ───────────────────────────────────────────────────────────────
//

/// Why a transition left the session unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// `load` was given no questions.
    NoQuestions,
    /// The session is empty or already submitted.
    NotInProgress,
    /// `load` during an unsubmitted quiz; submit it first.
    AlreadyInProgress,
    AtFirstQuestion,
    AtLastQuestion,
}

/// Outcome of a session transition. Transitions never fail; a call that does
/// not apply in the current state is reported as `Ignored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored(IgnoredReason),
}

impl Transition {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Transition::Applied)
    }
}

fn ignored(op: &'static str, reason: IgnoredReason) -> Transition {
    debug!(op, ?reason, "quiz transition ignored");
    Transition::Ignored(reason)
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state of one loaded quiz.
///
/// Owned by whatever drives the UI and passed by `&mut` to its handlers.
/// Once submitted, loading a new set of questions replaces everything;
/// an unsubmitted quiz is never replaced mid-way.
pub struct QuizSession {
    clock: Clock,
    questions: Vec<QuestionRecord>,
    current: usize,
    answers: BTreeMap<usize, OptionNumber>,
    submitted: bool,
    started_at: Option<DateTime<Utc>>,
    submitted_at: Option<DateTime<Utc>>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(Clock::default())
    }
}

impl QuizSession {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            questions: Vec::new(),
            current: 0,
            answers: BTreeMap::new(),
            submitted: false,
            started_at: None,
            submitted_at: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.questions.is_empty() {
            SessionStatus::Empty
        } else if self.submitted {
            SessionStatus::Completed
        } else {
            SessionStatus::InProgress
        }
    }

    fn require_in_progress(&self, op: &'static str) -> Result<(), Transition> {
        match self.status() {
            SessionStatus::InProgress => Ok(()),
            _ => Err(ignored(op, IgnoredReason::NotInProgress)),
        }
    }

    /// Replace the loaded questions and reset position, answers and the
    /// submitted flag. Applies to an empty or submitted session only; an
    /// empty list leaves the session untouched.
    pub fn load(&mut self, questions: Vec<QuestionRecord>) -> Transition {
        if questions.is_empty() {
            return ignored("load", IgnoredReason::NoQuestions);
        }
        if self.status() == SessionStatus::InProgress {
            return ignored("load", IgnoredReason::AlreadyInProgress);
        }

        info!(questions = questions.len(), "quiz loaded");
        self.questions = questions;
        self.current = 0;
        self.answers.clear();
        self.submitted = false;
        self.started_at = Some(self.clock.now());
        self.submitted_at = None;
        Transition::Applied
    }

    /// Record `option` as the answer to the current question, replacing any
    /// earlier choice. The option is not checked against the option count.
    pub fn select_answer(&mut self, option: OptionNumber) -> Transition {
        if let Err(t) = self.require_in_progress("select_answer") {
            return t;
        }
        debug!(index = self.current, %option, "answer recorded");
        self.answers.insert(self.current, option);
        Transition::Applied
    }

    /// Move to the next question; stays put on the last one.
    pub fn advance(&mut self) -> Transition {
        if let Err(t) = self.require_in_progress("advance") {
            return t;
        }
        if self.is_last() {
            return ignored("advance", IgnoredReason::AtLastQuestion);
        }
        self.current += 1;
        Transition::Applied
    }

    /// Move to the previous question; stays put on the first one.
    pub fn retreat(&mut self) -> Transition {
        if let Err(t) = self.require_in_progress("retreat") {
            return t;
        }
        if !self.can_retreat() {
            return ignored("retreat", IgnoredReason::AtFirstQuestion);
        }
        self.current -= 1;
        Transition::Applied
    }

    /// Finish the session. Unanswered questions are allowed.
    pub fn submit(&mut self) -> Transition {
        if let Err(t) = self.require_in_progress("submit") {
            return t;
        }
        self.submitted = true;
        self.submitted_at = Some(self.clock.now());
        info!(
            score = self.score(),
            total = self.questions.len(),
            answered = self.answers.len(),
            "quiz submitted"
        );
        Transition::Applied
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<usize, OptionNumber> {
        &self.answers
    }

    #[must_use]
    pub fn answer_for(&self, index: usize) -> Option<&OptionNumber> {
        self.answers.get(&index)
    }

    /// Whether `option` is the recorded answer for the current question.
    #[must_use]
    pub fn is_selected(&self, option: &OptionNumber) -> bool {
        self.answer_for(self.current) == Some(option)
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.current > 0
    }

    /// True on the last question, where the UI offers Submit instead of Next.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    /// Number of recorded answers equal to their question's correct option.
    #[must_use]
    pub fn score(&self) -> usize {
        self.answers
            .iter()
            .filter(|(index, answer)| {
                self.questions
                    .get(**index)
                    .is_some_and(|question| question.is_correct(answer))
            })
            .count()
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        match (self.questions.get(index), self.answers.get(&index)) {
            (Some(question), Some(answer)) => question.is_correct(answer),
            _ => false,
        }
    }

    /// `(current + 1) / total`, or `None` while no questions are loaded.
    #[must_use]
    pub fn progress_fraction(&self) -> Option<f64> {
        self.progress().map(|p| p.fraction())
    }

    #[must_use]
    pub fn progress(&self) -> Option<SessionProgress> {
        if self.questions.is_empty() {
            return None;
        }
        Some(SessionProgress {
            position: self.current + 1,
            total: self.questions.len(),
            answered: self.answers.len(),
            is_first: !self.can_retreat(),
            is_last: self.is_last(),
            status: self.status(),
        })
    }

    /// Score and per-question outcomes, available once submitted.
    #[must_use]
    pub fn results(&self) -> Option<ResultSummary> {
        if self.status() != SessionStatus::Completed {
            return None;
        }

        let outcomes = self
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| QuestionOutcome {
                index,
                prompt: question.text().to_owned(),
                chosen: self.answers.get(&index).cloned(),
                correct_option: question.correct_option().cloned(),
                is_correct: self.is_correct(index),
            })
            .collect();

        let elapsed_seconds = match (self.started_at, self.submitted_at) {
            (Some(start), Some(end)) => (end - start).num_seconds().max(0),
            _ => 0,
        };

        Some(ResultSummary {
            score: self.score(),
            total: self.questions.len(),
            answered: self.answers.len(),
            elapsed_seconds,
            outcomes,
        })
    }

    #[cfg(test)]
    pub(crate) fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answers_len", &self.answers.len())
            .field("submitted", &self.submitted)
            .field("started_at", &self.started_at)
            .field("submitted_at", &self.submitted_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
