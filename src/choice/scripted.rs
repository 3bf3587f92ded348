//! Scripted chooser: replays a fixed queue of answers.
//!
//! Used to drive tests and to replay recorded sessions. Every prompt it is
//! asked is recorded, answered or not.

use std::collections::VecDeque;

use tracing::debug;

use super::chooser::{Candidate, Chooser, Pile};

/// One recorded answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Answer {
    /// Answer to `choose_index` or `choose_option`.
    Index(usize),
    /// Answer to `choose_pile`.
    Pile(Pile),
    /// Cancel whatever is asked.
    Cancel,
}

/// Chooser that pops answers from a queue.
///
/// An exhausted queue, or an answer of the wrong kind, cancels.
#[derive(Clone, Debug, Default)]
pub struct ScriptedChooser {
    answers: VecDeque<Answer>,
    prompts: Vec<String>,
}

impl ScriptedChooser {
    /// Create a chooser with a queue of answers.
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    /// Convenience for index-only scripts.
    #[must_use]
    pub fn indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self::new(indices.into_iter().map(Answer::Index))
    }

    /// Queue another answer.
    pub fn push(&mut self, answer: Answer) {
        self.answers.push_back(answer);
    }

    /// Prompts seen so far.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Answers not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Option<Answer> {
        self.prompts.push(prompt.to_string());
        let answer = self.answers.pop_front();
        debug!(prompt, ?answer, "scripted answer");
        answer
    }
}

impl Chooser for ScriptedChooser {
    fn choose_index(&mut self, prompt: &str, _candidates: &[Candidate], _cancellable: bool) -> Option<usize> {
        match self.next(prompt)? {
            Answer::Index(i) => Some(i),
            _ => None,
        }
    }

    fn choose_pile(&mut self, prompt: &str, _can_hand: bool, _can_discard: bool, _cancellable: bool) -> Option<Pile> {
        match self.next(prompt)? {
            Answer::Pile(pile) => Some(pile),
            _ => None,
        }
    }

    fn choose_option(&mut self, prompt: &str, _labels: &[String], _cancellable: bool) -> Option<usize> {
        match self.next(prompt)? {
            Answer::Index(i) => Some(i),
            _ => None,
        }
    }
}
