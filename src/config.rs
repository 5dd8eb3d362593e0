//! Player configuration
//!
//! Read from a TOML file; every field has a default, so an empty or missing
//! file is a valid configuration. Command-line flags override what is loaded.
//!
//! ```toml
//! data_dir = ".kitten_hangman"
//! player = "alice"
//! default_mode = "kitten"
//! min_word_length = 5
//! max_word_length = 10
//! ```

use crate::core::GameMode;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "kitten_hangman.toml";

const LOG_FILE: &str = "kitten_hangman.log";

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    /// `min_word_length` is larger than `max_word_length`
    InvalidLengths { min: usize, max: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Failed to read config file: {err}"),
            Self::Parse(err) => write!(f, "Failed to parse config: {err}"),
            Self::InvalidLengths { min, max } => write!(
                f,
                "min_word_length ({min}) is larger than max_word_length ({max})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::InvalidLengths { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where records, profiles and the TUI log live
    pub data_dir: PathBuf,
    /// `None` plays as a guest; guest games are not saved
    pub player: Option<String>,
    pub default_mode: GameMode,
    pub min_word_length: usize,
    pub max_word_length: usize,
    pub leaderboard_window_days: u32,
    pub leaderboard_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".kitten_hangman"),
            player: None,
            default_mode: GameMode::Hard,
            min_word_length: 4,
            max_word_length: 12,
            leaderboard_window_days: 7,
            leaderboard_limit: 50,
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` for malformed TOML or wrongly typed fields,
    /// `ConfigError::InvalidLengths` if the word length bounds are inverted.
    ///
    /// # Examples
    /// ```
    /// use kitten_hangman::config::Config;
    /// use kitten_hangman::core::GameMode;
    ///
    /// let config = Config::from_toml("default_mode = \"kitten\"").unwrap();
    /// assert_eq!(config.default_mode, GameMode::Kitten);
    /// assert_eq!(config.leaderboard_limit, 50);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        if config.min_word_length > config.max_word_length {
            return Err(ConfigError::InvalidLengths {
                min: config.min_word_length,
                max: config.max_word_length,
            });
        }
        Ok(config)
    }

    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] when `None`
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    #[instrument(skip_all, fields(path = ?path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_toml(&content)?;
                info!(player = ?config.player, mode = %config.default_mode, "config loaded");
                Ok(config)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Window covered by the local leaderboard
    #[must_use]
    pub fn leaderboard_window(&self) -> TimeDelta {
        TimeDelta::days(i64::from(self.leaderboard_window_days))
    }

    /// File the TUI writes its logs to
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = Config::from_toml(
            r#"
            player = "alice"
            default_mode = "impossible"
            leaderboard_window_days = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.player.as_deref(), Some("alice"));
        assert_eq!(config.default_mode, GameMode::Impossible);
        assert_eq!(config.leaderboard_window(), TimeDelta::days(30));
        assert_eq!(config.min_word_length, 4);
        assert_eq!(config.data_dir, PathBuf::from(".kitten_hangman"));
    }

    #[test]
    fn bad_mode_is_a_parse_error() {
        let err = Config::from_toml("default_mode = \"easy\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn inverted_lengths_rejected() {
        let err = Config::from_toml("min_word_length = 9\nmax_word_length = 5").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLengths { min: 9, max: 5 }));
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = \"/tmp/hangman\"\nleaderboard_limit = 5\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/hangman"));
        assert_eq!(config.leaderboard_limit, 5);
        assert_eq!(config.log_file(), PathBuf::from("/tmp/hangman/kitten_hangman.log"));
    }
}
