//! Kitten Hangman
//!
//! Hangman with three difficulty modes. In kitten mode the secret word is
//! re-picked after every miss: the replacement must agree with every letter
//! already revealed and is the hardest remaining candidate.
//!
//! # Quick Start
//!
//! ```rust
//! use kitten_hangman::core::{GameMode, Word};
//! use kitten_hangman::game::{GuessEvent, Outcome, apply_guess_str, initialize_game};
//!
//! let pool = vec![Word::new("cat").unwrap()];
//! let mut session = initialize_game(&pool, GameMode::Kitten).unwrap();
//!
//! assert_eq!(apply_guess_str(&mut session, "c").event, GuessEvent::Hit);
//! assert_eq!(session.masked_word(), "C _ _");
//!
//! apply_guess_str(&mut session, "a");
//! apply_guess_str(&mut session, "t");
//! assert_eq!(session.outcome(), Outcome::Won);
//! ```

// Core domain types
pub mod core;

// Game engine, adaptive selector and rewards
pub mod game;

// Word lists
pub mod wordlists;

// Records, profiles and leaderboards
pub mod persistence;

// Configuration file
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
