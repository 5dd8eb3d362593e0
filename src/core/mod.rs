//! Core domain types for hangman
//!
//! Words, letters and game modes. Everything here is pure and independently testable.

mod letter;
mod mode;
mod word;

pub use letter::{Letter, LetterError};
pub use mode::{GameMode, UnknownMode};
pub use word::{Word, WordError};
