//! Finished-game records

use crate::core::GameMode;
use crate::game::{GameSession, Outcome, calculate_xp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One finished game, as handed to the record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Assigned by the store on insert
    #[serde(default)]
    pub id: u64,
    pub player: String,
    pub mode: GameMode,
    /// The secret word at the end of the game
    pub word: String,
    pub won: bool,
    pub wrong_guesses: u32,
    pub total_guesses: u32,
    pub xp_gained: i64,
    pub played_at: DateTime<Utc>,
}

impl GameRecord {
    /// Build the record for a finished session
    ///
    /// Returns `None` for guests (no player) and for games still in progress;
    /// neither is saved.
    #[must_use]
    pub fn from_session(player: Option<&str>, session: &GameSession) -> Option<Self> {
        let Some(player) = player else {
            debug!("guest game, not saved");
            return None;
        };

        let won = match session.outcome() {
            Outcome::Won => true,
            Outcome::Lost => false,
            Outcome::InProgress => {
                debug!(player, "game still in progress, not saved");
                return None;
            }
        };

        let mode = session.mode();
        let wrong_guesses = session.wrong_guess_count();
        let total_guesses = session.total_guesses();

        Some(Self {
            id: 0,
            player: player.to_string(),
            mode,
            word: session.secret_word().text().to_string(),
            won,
            wrong_guesses,
            total_guesses,
            xp_gained: calculate_xp(won, mode, wrong_guesses, total_guesses),
            played_at: Utc::now(),
        })
    }
}
