//! Command implementations

pub mod leaderboard;
pub mod profile;
pub mod simple;
pub mod simulate;

pub use leaderboard::load_leaderboard;
pub use profile::{ProfileSummary, add_friend, load_profile};
pub use simple::{run_simple, run_simple_with};
pub use simulate::{SimulationConfig, SimulationResult, run_simulation};

use crate::game::{GameError, GameSession};
use crate::persistence::{GameRecord, RecordStore, SaveQueue, StoreError};
use std::fmt;
use std::io;

/// Error type for commands that touch the store or need a player
#[derive(Debug)]
pub enum CommandError {
    Io(io::Error),
    Store(StoreError),
    Game(GameError),
    /// The command only makes sense for a named player
    NoPlayer,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Game(err) => write!(f, "{err}"),
            Self::NoPlayer => write!(
                f,
                "No player configured; pass --player NAME or set `player` in the config file"
            ),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Game(err) => Some(err),
            Self::NoPlayer => None,
        }
    }
}

impl From<io::Error> for CommandError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<GameError> for CommandError {
    fn from(err: GameError) -> Self {
        Self::Game(err)
    }
}

/// Queue a finished game for saving and return its XP delta
///
/// Guests and unfinished games yield `None` and nothing is queued.
pub fn submit_finished<S: RecordStore + Send + 'static>(
    session: &GameSession,
    player: Option<&str>,
    saves: &SaveQueue<S>,
) -> Option<i64> {
    let record = GameRecord::from_session(player, session)?;
    let xp = record.xp_gained;
    saves.submit(record);
    Some(xp)
}
