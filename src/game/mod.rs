//! Hangman game engine
//!
//! The state machine ([`apply_guess`]), the kitten-mode word selector
//! ([`adapt`]) and the XP calculator ([`calculate_xp`]).

pub mod adapt;
mod engine;
pub mod reward;
mod session;

pub use adapt::{Adaptation, SkipReason};
pub use engine::{
    GameError, GuessEvent, GuessResult, InvalidGuess, apply_guess, apply_guess_str,
    initialize_game, initialize_game_with_rng, status_message,
};
pub use reward::{calculate_xp, level_for_xp};
pub use session::{GameSession, HistoryEntry, Outcome, hangman_stage};
