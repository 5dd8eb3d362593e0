//! Game state machine
//!
//! `InProgress` is the initial state; `Won` and `Lost` are terminal. The only
//! transition is [`apply_guess`].

use super::adapt::{self, Adaptation};
use super::session::{GameSession, HistoryEntry, Outcome};
use crate::core::{GameMode, Letter, LetterError, Word};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fmt;
use tracing::{debug, info};

/// Errors that prevent a game from starting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    EmptyPool,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPool => write!(f, "Word pool is empty"),
        }
    }
}

impl std::error::Error for GameError {}

/// Why a guess was rejected without changing the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidGuess {
    GameOver,
    AlreadyGuessed(Letter),
    NotALetter(LetterError),
}

impl fmt::Display for InvalidGuess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameOver => write!(f, "The game is already over"),
            Self::AlreadyGuessed(letter) => write!(f, "Already guessed {letter}"),
            Self::NotALetter(err) => write!(f, "{err}"),
        }
    }
}

/// Classification of a guess
///
/// Terminal outcomes take precedence over `Adapted`, which takes precedence
/// over a plain `Miss`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessEvent {
    Hit,
    Miss,
    /// A miss after which kitten mode swapped the secret word
    Adapted,
    Won,
    Lost,
    Invalid(InvalidGuess),
}

impl GuessEvent {
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Result of applying one guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    pub event: GuessEvent,
    pub message: String,
}

impl GuessResult {
    fn new(event: GuessEvent, letter: Option<Letter>, mode: GameMode) -> Self {
        let message = status_message(&event, letter, mode);
        Self { event, message }
    }
}

/// Human-readable status line for an event
#[must_use]
pub fn status_message(event: &GuessEvent, letter: Option<Letter>, mode: GameMode) -> String {
    let letter = letter.map_or_else(String::new, |l| l.to_string());
    match event {
        GuessEvent::Hit => format!("✓ Found {letter}!"),
        GuessEvent::Won => format!("✓ Found {letter}! You won!"),
        GuessEvent::Miss => format!("✗ No {letter}"),
        GuessEvent::Adapted => format!("✗ No {letter}... the kitten adapted the word!"),
        GuessEvent::Lost if mode.is_adaptive() => {
            format!("✗ No {letter}... the kitten adapted the word! You lost!")
        }
        GuessEvent::Lost => format!("✗ No {letter}. You lost!"),
        GuessEvent::Invalid(reason) => reason.to_string(),
    }
}

/// Start a game with a uniformly random word from the pool
///
/// # Errors
/// Returns `GameError::EmptyPool` if the pool has no words.
pub fn initialize_game(pool: &[Word], mode: GameMode) -> Result<GameSession, GameError> {
    initialize_game_with_rng(pool, mode, &mut rand::rng())
}

/// Start a game using the given random number generator
///
/// # Errors
/// Returns `GameError::EmptyPool` if the pool has no words.
pub fn initialize_game_with_rng<R: Rng + ?Sized>(
    pool: &[Word],
    mode: GameMode,
    rng: &mut R,
) -> Result<GameSession, GameError> {
    let secret = pool.choose(rng).ok_or(GameError::EmptyPool)?.clone();
    info!(%mode, pool_size = pool.len(), length = secret.len(), "new game");
    Ok(GameSession::with_secret(mode, secret, pool.to_vec()))
}

/// Apply a guess given as text
///
/// Input that is not exactly one letter is rejected without touching the session.
pub fn apply_guess_str(session: &mut GameSession, input: &str) -> GuessResult {
    match input.parse::<Letter>() {
        Ok(letter) => apply_guess(session, letter),
        Err(err) => GuessResult::new(
            GuessEvent::Invalid(InvalidGuess::NotALetter(err)),
            None,
            session.mode,
        ),
    }
}

/// Apply a letter guess to the session
///
/// # Examples
/// ```
/// use kitten_hangman::core::{GameMode, Letter, Word};
/// use kitten_hangman::game::{GameSession, GuessEvent, Outcome, apply_guess};
///
/// let cat = Word::new("cat").unwrap();
/// let mut session = GameSession::with_secret(GameMode::Hard, cat.clone(), vec![cat]);
///
/// for ch in ['c', 'a'] {
///     assert_eq!(apply_guess(&mut session, Letter::new(ch).unwrap()).event, GuessEvent::Hit);
/// }
/// let result = apply_guess(&mut session, Letter::new('t').unwrap());
/// assert_eq!(result.event, GuessEvent::Won);
/// assert_eq!(session.outcome(), Outcome::Won);
/// ```
pub fn apply_guess(session: &mut GameSession, letter: Letter) -> GuessResult {
    let mode = session.mode;

    if session.is_over() {
        return GuessResult::new(
            GuessEvent::Invalid(InvalidGuess::GameOver),
            Some(letter),
            mode,
        );
    }

    if session.guessed_letters.contains(&letter) {
        return GuessResult::new(
            GuessEvent::Invalid(InvalidGuess::AlreadyGuessed(letter)),
            Some(letter),
            mode,
        );
    }

    session.guessed_letters.insert(letter);

    let event = if session.secret_word.contains(letter) {
        apply_hit(session, letter)
    } else {
        apply_miss(session, letter)
    };

    if session.is_over() {
        info!(
            %mode,
            outcome = %session.outcome,
            word = %session.secret_word,
            wrong = session.wrong_guess_count,
            total = session.total_guesses(),
            "game over"
        );
    }

    GuessResult::new(event, Some(letter), mode)
}

fn apply_hit(session: &mut GameSession, letter: Letter) -> GuessEvent {
    let positions = session.secret_word.positions_of(letter).to_vec();
    session.revealed_positions.extend(positions);

    session.history.push(HistoryEntry {
        word: session.secret_word.text().to_string(),
        guess: Some(letter),
        correct: Some(true),
        previous_word: None,
    });

    if session.revealed_positions.len() == session.secret_word.len() {
        session.outcome = Outcome::Won;
        GuessEvent::Won
    } else {
        GuessEvent::Hit
    }
}

fn apply_miss(session: &mut GameSession, letter: Letter) -> GuessEvent {
    session.wrong_letters.insert(letter);
    session.wrong_guess_count += 1;

    let adaptation = session
        .mode
        .is_adaptive()
        .then(|| adapt::adapt(session));
    debug!(%letter, ?adaptation, "miss");

    let previous_word = match &adaptation {
        Some(Adaptation::Swapped { from, .. }) => Some(from.text().to_string()),
        _ => None,
    };

    session.history.push(HistoryEntry {
        word: session.secret_word.text().to_string(),
        guess: Some(letter),
        correct: Some(false),
        previous_word,
    });

    if session.wrong_guess_count >= session.max_wrong_guesses() {
        session.outcome = Outcome::Lost;
        GuessEvent::Lost
    } else if adaptation.as_ref().is_some_and(Adaptation::swapped) {
        GuessEvent::Adapted
    } else {
        GuessEvent::Miss
    }
}
