//! Hangman word representation
//!
//! A Word stores an uppercase word along with letter position indices for revealing guesses.

use super::Letter;
use rustc_hash::FxHashMap;
use std::fmt;

/// An uppercase alphabetic word with letter position tracking
///
/// Stores the word as bytes and maintains a map of letter positions so a hit
/// can reveal every occurrence at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    text: String,
    letter_positions: FxHashMap<u8, Vec<usize>>,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    Empty,
    NonAscii,
    InvalidCharacters,
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Word must not be empty"),
            Self::NonAscii => write!(f, "Word must contain only ASCII letters"),
            Self::InvalidCharacters => write!(f, "Word contains invalid characters"),
        }
    }
}

impl std::error::Error for WordError {}

impl Word {
    /// Create a new Word from a string
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - The word is empty
    /// - Contains non-ASCII characters
    /// - Contains non-alphabetic characters
    ///
    /// # Examples
    /// ```
    /// use kitten_hangman::core::Word;
    ///
    /// let word = Word::new("kitten").unwrap();
    /// assert_eq!(word.text(), "KITTEN");
    ///
    /// assert!(Word::new("two words").is_err());
    /// assert!(Word::new("k1tten").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let text: String = text.into().trim().to_ascii_uppercase();

        if text.is_empty() {
            return Err(WordError::Empty);
        }

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        if !text.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(WordError::InvalidCharacters);
        }

        let mut letter_positions: FxHashMap<u8, Vec<usize>> = FxHashMap::default();
        for (i, byte) in text.bytes().enumerate() {
            letter_positions.entry(byte).or_default().push(i);
        }

        Ok(Self {
            text,
            letter_positions,
        })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of letters in the word
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false: empty words are rejected at construction
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the letter at a position, or `None` if out of range
    #[inline]
    #[must_use]
    pub fn letter_at(&self, position: usize) -> Option<Letter> {
        self.text
            .as_bytes()
            .get(position)
            .and_then(|&b| Letter::from_byte(b).ok())
    }

    /// Check if the word contains a specific letter
    #[inline]
    #[must_use]
    pub fn contains(&self, letter: Letter) -> bool {
        self.letter_positions.contains_key(&letter.as_byte())
    }

    /// Get all positions where a letter appears
    ///
    /// Returns an empty slice if the letter doesn't appear.
    #[inline]
    #[must_use]
    pub fn positions_of(&self, letter: Letter) -> &[usize] {
        self.letter_positions
            .get(&letter.as_byte())
            .map_or(&[], Vec::as_slice)
    }

    /// Distinct letters of the word, in alphabetical order
    #[must_use]
    pub fn distinct_letters(&self) -> Vec<Letter> {
        let mut letters: Vec<Letter> = self
            .letter_positions
            .keys()
            .filter_map(|&b| Letter::from_byte(b).ok())
            .collect();
        letters.sort_unstable();
        letters
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
