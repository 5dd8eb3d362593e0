//! Game records, player profiles and leaderboards

pub mod leaderboard;
mod profile;
mod queue;
mod record;
mod store;

pub use leaderboard::{LeaderboardEntry, LeaderboardKind};
pub use profile::{ModeCounts, Profile, win_rate};
pub use queue::{SaveQueue, SaveSummary};
pub use record::GameRecord;
pub use store::{JsonStore, MemoryStore, RecordStore, StoreError};
