//! Per-game mutable state
//!
//! A `GameSession` is owned by exactly one caller for the lifetime of a game.
//! All transitions go through [`apply_guess`](super::apply_guess).

use crate::core::{GameMode, Letter, Word};
use std::collections::BTreeSet;
use std::fmt;

/// Faces shown as the hangman fills up, one per wrong guess
const HANGMAN_STAGES: [&str; 7] = ["😊", "😐", "😟", "😨", "😰", "😵", "💀"];

/// Game outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    /// Whether the game has ended
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "in progress"),
            Self::Won => write!(f, "won"),
            Self::Lost => write!(f, "lost"),
        }
    }
}

/// One step of the adaptation log
///
/// The first entry of every session has no guess; it records the starting word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Secret word active after this step
    pub word: String,
    pub guess: Option<Letter>,
    pub correct: Option<bool>,
    /// Secret word before this step, only set when it was swapped
    pub previous_word: Option<String>,
}

/// Mutable state of a single hangman game
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(super) mode: GameMode,
    pub(super) secret_word: Word,
    pub(super) pool: Vec<Word>,
    pub(super) guessed_letters: BTreeSet<Letter>,
    pub(super) wrong_letters: BTreeSet<Letter>,
    pub(super) revealed_positions: BTreeSet<usize>,
    pub(super) wrong_guess_count: u32,
    pub(super) outcome: Outcome,
    pub(super) history: Vec<HistoryEntry>,
}

impl GameSession {
    /// Start a session with a chosen secret word
    ///
    /// The secret is moved to the front of the pool if the pool doesn't already
    /// contain it, so the "secret is always one of the pool" invariant holds.
    #[must_use]
    pub fn with_secret(mode: GameMode, secret_word: Word, mut pool: Vec<Word>) -> Self {
        if !pool.contains(&secret_word) {
            pool.insert(0, secret_word.clone());
        }

        let history = vec![HistoryEntry {
            word: secret_word.text().to_string(),
            guess: None,
            correct: None,
            previous_word: None,
        }];

        Self {
            mode,
            secret_word,
            pool,
            guessed_letters: BTreeSet::new(),
            wrong_letters: BTreeSet::new(),
            revealed_positions: BTreeSet::new(),
            wrong_guess_count: 0,
            outcome: Outcome::InProgress,
            history,
        }
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// The currently active answer
    #[inline]
    #[must_use]
    pub const fn secret_word(&self) -> &Word {
        &self.secret_word
    }

    /// Candidate words still consistent with everything revealed
    #[inline]
    #[must_use]
    pub fn pool(&self) -> &[Word] {
        &self.pool
    }

    #[inline]
    #[must_use]
    pub const fn guessed_letters(&self) -> &BTreeSet<Letter> {
        &self.guessed_letters
    }

    #[inline]
    #[must_use]
    pub const fn wrong_letters(&self) -> &BTreeSet<Letter> {
        &self.wrong_letters
    }

    #[inline]
    #[must_use]
    pub const fn revealed_positions(&self) -> &BTreeSet<usize> {
        &self.revealed_positions
    }

    #[inline]
    #[must_use]
    pub const fn wrong_guess_count(&self) -> u32 {
        self.wrong_guess_count
    }

    #[inline]
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[inline]
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    #[inline]
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Maximum wrong guesses allowed by this session's mode
    #[inline]
    #[must_use]
    pub const fn max_wrong_guesses(&self) -> u32 {
        self.mode.max_wrong_guesses()
    }

    /// Wrong guesses left before the game is lost
    #[must_use]
    pub const fn remaining_guesses(&self) -> u32 {
        self.max_wrong_guesses().saturating_sub(self.wrong_guess_count)
    }

    /// Number of distinct letters guessed so far
    #[must_use]
    pub fn total_guesses(&self) -> u32 {
        self.guessed_letters.len() as u32
    }

    /// Number of misses recorded in the history
    ///
    /// In kitten mode every miss gives the selector a chance to swap the word.
    #[must_use]
    pub fn adaptation_count(&self) -> usize {
        self.history
            .iter()
            .filter(|entry| entry.correct == Some(false))
            .count()
    }

    /// Number of history entries where the secret word actually changed
    #[must_use]
    pub fn swap_count(&self) -> usize {
        self.history
            .iter()
            .filter(|entry| entry.previous_word.is_some())
            .count()
    }

    /// Percentage of guesses that were hits, 0 when nothing has been guessed
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        let total = self.total_guesses();
        if total == 0 {
            return 0.0;
        }
        f64::from(total - self.wrong_guess_count) / f64::from(total) * 100.0
    }

    /// The word with unrevealed letters masked, e.g. `C _ T`
    ///
    /// Once the game is over the full word is shown.
    #[must_use]
    pub fn masked_word(&self) -> String {
        self.secret_word
            .text()
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                if self.is_over() || self.revealed_positions.contains(&i) {
                    ch
                } else {
                    '_'
                }
            })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Current hangman face for the number of wrong guesses
    #[must_use]
    pub fn hangman_stage(&self) -> &'static str {
        hangman_stage(self.wrong_guess_count)
    }
}

/// Hangman face for a given number of wrong guesses, clamped to the last stage
#[must_use]
pub fn hangman_stage(wrong_guesses: u32) -> &'static str {
    let index = (wrong_guesses as usize).min(HANGMAN_STAGES.len() - 1);
    HANGMAN_STAGES[index]
}
