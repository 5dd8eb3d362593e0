//! Word pools for hangman
//!
//! Provides the embedded word pool compiled into the binary, plus loaders for custom lists.

mod embedded;
pub mod loader;

pub use embedded::{WORDS, WORDS_COUNT};
