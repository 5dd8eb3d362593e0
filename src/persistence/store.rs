//! Record stores
//!
//! The engine never talks to a store directly; finished games reach it
//! through the [`SaveQueue`](super::SaveQueue).

use super::{GameRecord, Profile};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

const RECORDS_FILE: &str = "games.jsonl";
const PROFILES_FILE: &str = "profiles.json";

/// Error type for record store operations
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Json(serde_json::Error),
    /// A line of the records file could not be parsed
    Corrupt { line: usize, source: serde_json::Error },
    InvalidFriend(String),
    /// The save worker thread panicked
    WorkerPanicked,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Store I/O error: {err}"),
            Self::Json(err) => write!(f, "Store serialization error: {err}"),
            Self::Corrupt { line, source } => {
                write!(f, "Corrupt game record on line {line}: {source}")
            }
            Self::InvalidFriend(name) => write!(f, "Cannot add '{name}' as a friend"),
            Self::WorkerPanicked => write!(f, "Save worker panicked"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) | Self::Corrupt { source: err, .. } => Some(err),
            Self::InvalidFriend(_) | Self::WorkerPanicked => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Persistence collaborator for finished games
///
/// Inserting a record also folds it into the player's profile, creating the
/// profile on first use.
pub trait RecordStore {
    /// Store a record, returning it with its assigned id
    ///
    /// # Errors
    /// Returns `StoreError` if the record cannot be written.
    fn insert(&mut self, record: GameRecord) -> Result<GameRecord, StoreError>;

    /// All stored records, oldest first
    ///
    /// # Errors
    /// Returns `StoreError` if the records cannot be read.
    fn records(&self) -> Result<Vec<GameRecord>, StoreError>;

    /// All profiles, ordered by player name
    ///
    /// # Errors
    /// Returns `StoreError` if the profiles cannot be read.
    fn profiles(&self) -> Result<Vec<Profile>, StoreError>;

    /// A single profile, `None` if the player has never finished a game
    ///
    /// # Errors
    /// Returns `StoreError` if the profiles cannot be read.
    fn profile(&self, player: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles()?.into_iter().find(|p| p.player == player))
    }

    /// Record that `player` follows `friend`
    ///
    /// Creates an empty profile for `player` if they have none yet.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidFriend` for empty names or self-friending.
    fn add_friend(&mut self, player: &str, friend: &str) -> Result<(), StoreError>;

    /// Names `player` follows
    ///
    /// # Errors
    /// Returns `StoreError` if the friend list cannot be read.
    fn friends(&self, player: &str) -> Result<Vec<String>, StoreError>;
}

/// Profiles and friendships, serialized together
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Directory {
    #[serde(default)]
    profiles: BTreeMap<String, Profile>,
    #[serde(default)]
    friends: BTreeMap<String, BTreeSet<String>>,
}

impl Directory {
    fn apply(&mut self, record: &GameRecord) {
        self.profiles
            .entry(record.player.clone())
            .or_insert_with(|| Profile::new(record.player.clone(), record.played_at))
            .apply(record);
    }

    /// Replace the profiles with ones folded from `records`
    ///
    /// Players who only have friends get an empty profile, as after `add_friend`.
    fn rebuild_profiles(&mut self, records: &[GameRecord]) {
        let known = std::mem::take(&mut self.profiles);
        for record in records {
            self.apply(record);
        }
        for player in self.friends.keys() {
            let created_at = known.get(player).map_or_else(Utc::now, |p| p.created_at);
            self.profiles
                .entry(player.clone())
                .or_insert_with(|| Profile::new(player.clone(), created_at));
        }
    }

    /// Follow `friend`, creating an empty profile for `player` if needed
    ///
    /// The profile puts the player on friend leaderboards before their first game.
    fn add_friend(&mut self, player: &str, friend: &str) -> Result<(), StoreError> {
        let friend = friend.trim();
        if friend.is_empty() || friend == player {
            return Err(StoreError::InvalidFriend(friend.to_string()));
        }
        self.friends
            .entry(player.to_string())
            .or_default()
            .insert(friend.to_string());
        self.profiles
            .entry(player.to_string())
            .or_insert_with(|| Profile::new(player, Utc::now()));
        Ok(())
    }

    fn friends(&self, player: &str) -> Vec<String> {
        self.friends
            .get(player)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// In-memory store; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<GameRecord>,
    directory: Directory,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn insert(&mut self, mut record: GameRecord) -> Result<GameRecord, StoreError> {
        record.id = self.records.len() as u64 + 1;
        self.directory.apply(&record);
        self.records.push(record.clone());
        Ok(record)
    }

    fn records(&self) -> Result<Vec<GameRecord>, StoreError> {
        Ok(self.records.clone())
    }

    fn profiles(&self) -> Result<Vec<Profile>, StoreError> {
        Ok(self.directory.profiles.values().cloned().collect())
    }

    fn add_friend(&mut self, player: &str, friend: &str) -> Result<(), StoreError> {
        self.directory.add_friend(player, friend)
    }

    fn friends(&self, player: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.directory.friends(player))
    }
}

/// File-backed store
///
/// Records are appended to `games.jsonl`, one JSON object per line, and are
/// the source of truth. Friendships live in `profiles.json` next to a copy of
/// the profiles; the profiles are rebuilt from the records on open.
#[derive(Debug)]
pub struct JsonStore {
    dir: PathBuf,
    next_id: u64,
    directory: Directory,
}

impl JsonStore {
    /// Open (or create) a store in `dir`
    ///
    /// # Errors
    /// Returns `StoreError` if the directory cannot be created or existing
    /// files cannot be parsed.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let directory = match fs::read_to_string(dir.join(PROFILES_FILE)) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Directory::default(),
            Err(err) => return Err(err.into()),
        };

        let mut store = Self {
            dir,
            next_id: 1,
            directory,
        };
        let records = store.records()?;
        store.next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        store.directory.rebuild_profiles(&records);

        info!(
            records = records.len(),
            profiles = store.directory.profiles.len(),
            "opened record store"
        );
        Ok(store)
    }

    fn save_directory(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.directory)?;
        let tmp = self.dir.join(format!("{PROFILES_FILE}.tmp"));
        fs::write(&tmp, json)?;
        fs::rename(tmp, self.dir.join(PROFILES_FILE))?;
        Ok(())
    }
}

impl RecordStore for JsonStore {
    #[instrument(skip_all, fields(player = %record.player, mode = %record.mode))]
    fn insert(&mut self, mut record: GameRecord) -> Result<GameRecord, StoreError> {
        record.id = self.next_id;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.dir.join(RECORDS_FILE))?;
        let line = serde_json::to_string(&record)?;
        writeln!(file, "{line}")?;

        // The record is on disk; profiles follow it even if the copy below fails
        self.next_id += 1;
        self.directory.apply(&record);
        if let Err(err) = self.save_directory() {
            warn!(%err, "profile copy not written, rebuilt on next open");
        }

        debug!(id = record.id, xp = record.xp_gained, "game record saved");
        Ok(record)
    }

    fn records(&self) -> Result<Vec<GameRecord>, StoreError> {
        let file = match File::open(self.dir.join(RECORDS_FILE)) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|source| StoreError::Corrupt {
                line: index + 1,
                source,
            })?;
            records.push(record);
        }
        Ok(records)
    }

    fn profiles(&self) -> Result<Vec<Profile>, StoreError> {
        Ok(self.directory.profiles.values().cloned().collect())
    }

    #[instrument(skip(self))]
    fn add_friend(&mut self, player: &str, friend: &str) -> Result<(), StoreError> {
        let mut directory = self.directory.clone();
        directory.add_friend(player, friend)?;

        let previous = std::mem::replace(&mut self.directory, directory);
        if let Err(err) = self.save_directory() {
            self.directory = previous;
            return Err(err);
        }
        Ok(())
    }

    fn friends(&self, player: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.directory.friends(player))
    }
}
