//! Game difficulty modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty mode of a hangman game
///
/// Only `Kitten` is adaptive: after every miss the secret word may be swapped
/// for a harder one that is still consistent with what the player has seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Hard,
    Impossible,
    Kitten,
}

/// Error returned when parsing an unknown mode name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl fmt::Display for UnknownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown mode '{}' (expected hard, impossible or kitten)",
            self.0
        )
    }
}

impl std::error::Error for UnknownMode {}

impl GameMode {
    /// Every mode, in menu order
    pub const ALL: [Self; 3] = [Self::Hard, Self::Impossible, Self::Kitten];

    /// Number of wrong guesses that ends the game
    #[must_use]
    pub const fn max_wrong_guesses(self) -> u32 {
        match self {
            Self::Hard | Self::Kitten => 6,
            Self::Impossible => 4,
        }
    }

    /// Whether the secret word adapts after a miss
    #[must_use]
    pub const fn is_adaptive(self) -> bool {
        matches!(self, Self::Kitten)
    }

    /// Lowercase name used in records and on the command line
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hard => "hard",
            Self::Impossible => "impossible",
            Self::Kitten => "kitten",
        }
    }
}

impl FromStr for GameMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hard" => Ok(Self::Hard),
            "impossible" => Ok(Self::Impossible),
            "kitten" => Ok(Self::Kitten),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
