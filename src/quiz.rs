//! Practice test state machine.
//!
//! A [`Quiz`] walks an ordered list of questions in either practice mode
//! (feedback after every answer, results once everything is answered) or
//! full-test mode (no feedback until the test is submitted). Answers are final
//! once given. Transitions that are not allowed in the current state leave the
//! quiz untouched and report `false`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{Level, event, instrument};

use crate::store::Store;
use crate::types::{question::Question, state::StateId};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Practice,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
}

/// Scoring rules for a quiz.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizPolicy {
    /// Share of questions, in percent, that must be answered correctly.
    pub pass_percent: u32,
    /// Answers needed before a full test can be submitted. Quizzes with fewer
    /// questions need all of them answered.
    pub submit_threshold: usize,
}

impl Default for QuizPolicy {
    fn default() -> Self {
        QuizPolicy {
            pass_percent: 80,
            submit_threshold: 10,
        }
    }
}

/// Where the questions of a quiz come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizSource {
    State(StateId),
    Category(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub choice: String,
    pub correct: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub correct: usize,
    pub total: usize,
    pub percentage: usize,
    pub passing_score: usize,
    pub passed: bool,
}

#[derive(Debug, Clone)]
pub struct Quiz {
    questions: Vec<Question>,
    policy: QuizPolicy,
    mode: Mode,
    position: usize,
    answers: BTreeMap<usize, Answer>,
    correct: usize,
    showing_results: bool,
}

impl Quiz {
    pub fn new(questions: Vec<Question>, policy: QuizPolicy) -> Self {
        Quiz {
            questions,
            policy,
            mode: Mode::default(),
            position: 0,
            answers: BTreeMap::new(),
            correct: 0,
            showing_results: false,
        }
    }

    /// Builds a quiz from the store, the way the practice page picks its
    /// questions: everything for a state, or one category across states.
    #[instrument(skip(store))]
    pub async fn load(store: &Store, source: QuizSource, policy: QuizPolicy) -> Self {
        let questions = match &source {
            QuizSource::State(id) => store.get_questions_by_state(*id).await,
            QuizSource::Category(category) => store.get_questions_by_category(category).await,
        };
        event!(Level::DEBUG, questions = questions.len(), "quiz loaded");
        Quiz::new(questions, policy)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.position)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn correct_count(&self) -> usize {
        self.correct
    }

    pub fn is_answered(&self, position: usize) -> bool {
        self.answers.contains_key(&position)
    }

    pub fn answer(&self, position: usize) -> Option<&Answer> {
        self.answers.get(&position)
    }

    pub fn is_showing_results(&self) -> bool {
        self.showing_results
    }

    /// Records an answer for `position`.
    ///
    /// Positions can only be answered once, and not after the results are
    /// showing. In practice mode answering the last open question shows the
    /// results.
    pub fn select_answer(&mut self, position: usize, choice: &str) -> bool {
        if self.showing_results || self.is_answered(position) {
            return false;
        }
        let Some(question) = self.questions.get(position) else {
            return false;
        };

        let correct = question.is_correct(choice);
        self.answers.insert(
            position,
            Answer {
                choice: choice.to_string(),
                correct,
            },
        );
        if correct {
            self.correct += 1;
        }

        if self.mode == Mode::Practice && self.answers.len() == self.questions.len() {
            self.showing_results = true;
        }
        true
    }

    /// Moves one question forward or back. In practice mode the current
    /// question has to be answered before moving forward.
    pub fn advance(&mut self, direction: Direction) -> bool {
        if self.showing_results {
            return false;
        }
        match direction {
            Direction::Back if self.position > 0 => {
                self.position -= 1;
                true
            }
            Direction::Forward if self.position + 1 < self.questions.len() => {
                if self.mode == Mode::Practice && !self.is_answered(self.position) {
                    return false;
                }
                self.position += 1;
                true
            }
            _ => false,
        }
    }

    pub fn answers_needed_to_submit(&self) -> usize {
        self.policy.submit_threshold.min(self.questions.len())
    }

    /// How many more answers a full test needs before it can be submitted.
    pub fn remaining_to_submit(&self) -> usize {
        self.answers_needed_to_submit().saturating_sub(self.answers.len())
    }

    pub fn can_submit(&self) -> bool {
        self.mode == Mode::Full
            && !self.showing_results
            && !self.questions.is_empty()
            && self.answers.len() >= self.answers_needed_to_submit()
    }

    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.showing_results = true;
        true
    }

    pub fn restart(&mut self) {
        self.position = 0;
        self.answers.clear();
        self.correct = 0;
        self.showing_results = false;
    }

    /// Switches mode and starts over. Progress is tracked for the active mode
    /// only, so a switch is refused when it targets the mode that already has
    /// answers recorded.
    pub fn switch_mode(&mut self, mode: Mode) -> bool {
        if mode == self.mode && !self.answers.is_empty() {
            return false;
        }
        self.mode = mode;
        self.restart();
        true
    }

    /// Whether the current question should reveal its answer. Full tests give
    /// no feedback until submitted.
    pub fn shows_feedback(&self) -> bool {
        self.mode == Mode::Practice && self.is_answered(self.position)
    }

    /// Correct answers needed to pass, rounded up.
    pub fn passing_score(&self) -> usize {
        let total = self.questions.len() * self.policy.pass_percent as usize;
        total.div_ceil(100)
    }

    pub fn passed(&self) -> bool {
        self.correct >= self.passing_score()
    }

    pub fn progress_percent(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.answers.len() as f64 / self.questions.len() as f64 * 100.0
    }

    /// Score in whole percent, halves rounded up.
    pub fn score_percent(&self) -> usize {
        let total = self.questions.len();
        if total == 0 {
            return 0;
        }
        (self.correct * 200 + total) / (total * 2)
    }

    pub fn result(&self) -> QuizResult {
        QuizResult {
            correct: self.correct,
            total: self.questions.len(),
            percentage: self.score_percent(),
            passing_score: self.passing_score(),
            passed: self.passed(),
        }
    }
}
