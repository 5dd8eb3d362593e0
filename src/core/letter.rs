//! Single guessable letter
//!
//! Guesses are always case-normalized to uppercase ASCII before they reach the engine.

use std::fmt;
use std::str::FromStr;

/// An uppercase ASCII letter (A-Z)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(u8);

/// Error type for invalid letters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LetterError {
    Empty,
    TooLong(usize),
    NotAlphabetic(char),
}

impl fmt::Display for LetterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "No letter given"),
            Self::TooLong(len) => write!(f, "Expected a single letter, got {len} characters"),
            Self::NotAlphabetic(ch) => write!(f, "'{ch}' is not a letter A-Z"),
        }
    }
}

impl std::error::Error for LetterError {}

impl Letter {
    /// Letters ordered by typical English frequency, used for scoring
    pub const COMMON: &'static [u8] = b"ETAOINSHRDLU";

    /// Create a letter from a character, normalizing case
    ///
    /// # Errors
    /// Returns `LetterError::NotAlphabetic` for anything outside a-z / A-Z.
    ///
    /// # Examples
    /// ```
    /// use kitten_hangman::core::Letter;
    ///
    /// assert_eq!(Letter::new('q').unwrap().as_char(), 'Q');
    /// assert!(Letter::new('7').is_err());
    /// ```
    pub fn new(ch: char) -> Result<Self, LetterError> {
        if ch.is_ascii_alphabetic() {
            Ok(Self(ch.to_ascii_uppercase() as u8))
        } else {
            Err(LetterError::NotAlphabetic(ch))
        }
    }

    /// Create a letter from a raw byte, normalizing case
    ///
    /// # Errors
    /// Returns `LetterError::NotAlphabetic` for non-letter bytes.
    pub fn from_byte(byte: u8) -> Result<Self, LetterError> {
        Self::new(char::from(byte))
    }

    /// Get the letter as an uppercase byte
    #[inline]
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.0
    }

    /// Get the letter as an uppercase char
    #[inline]
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0 as char
    }

    /// Whether the letter is in the common set `ETAOINSHRDLU`
    #[must_use]
    pub fn is_common(self) -> bool {
        Self::COMMON.contains(&self.0)
    }
}

impl FromStr for Letter {
    type Err = LetterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(LetterError::Empty),
            (Some(ch), None) => Self::new(ch),
            (Some(_), Some(_)) => Err(LetterError::TooLong(trimmed.chars().count())),
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_normalizes_case() {
        assert_eq!(Letter::new('a').unwrap(), Letter::new('A').unwrap());
        assert_eq!(Letter::new('z').unwrap().as_byte(), b'Z');
    }

    #[test]
    fn letter_rejects_non_alpha() {
        assert_eq!(Letter::new('1'), Err(LetterError::NotAlphabetic('1')));
        assert_eq!(Letter::new(' '), Err(LetterError::NotAlphabetic(' ')));
        assert!(Letter::new('é').is_err());
    }

    #[test]
    fn letter_from_str() {
        assert_eq!("e".parse::<Letter>().unwrap().as_char(), 'E');
        assert_eq!(" k ".parse::<Letter>().unwrap().as_char(), 'K');
        assert_eq!("".parse::<Letter>(), Err(LetterError::Empty));
        assert_eq!("ab".parse::<Letter>(), Err(LetterError::TooLong(2)));
    }

    #[test]
    fn common_letters() {
        for ch in "ETAOINSHRDLU".chars() {
            assert!(Letter::new(ch).unwrap().is_common(), "{ch} should be common");
        }
        for ch in "BCFGJKMPQVWXYZ".chars() {
            assert!(!Letter::new(ch).unwrap().is_common(), "{ch} should be uncommon");
        }
    }
}
