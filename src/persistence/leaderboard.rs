//! Leaderboards
//!
//! Three views over the same data:
//! - global: every profile ranked by XP
//! - local: recent games of one mode, ranked by wins
//! - friends: a player and the people they follow, ranked by wins

use super::{GameRecord, Profile, profile::win_rate};
use crate::core::GameMode;
use crate::game::level_for_xp;
use chrono::{DateTime, TimeDelta, Utc};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// One ranked row
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub player: String,
    pub xp: i64,
    pub level: u32,
    pub wins: u32,
    pub losses: u32,
    /// Percent, 0 when no games
    pub win_rate: f64,
    pub total_games: u32,
}

impl LeaderboardEntry {
    fn new(player: &str, xp: i64, wins: u32, losses: u32) -> Self {
        Self {
            player: player.to_string(),
            xp,
            level: level_for_xp(xp),
            wins,
            losses,
            win_rate: win_rate(wins, losses),
            total_games: wins + losses,
        }
    }
}

/// Which leaderboard to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeaderboardKind {
    #[default]
    Global,
    Local,
    Friends,
}

impl LeaderboardKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Local => "local",
            Self::Friends => "friends",
        }
    }
}

impl fmt::Display for LeaderboardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized leaderboard name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLeaderboard(pub String);

impl fmt::Display for UnknownLeaderboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown leaderboard '{}' (expected global, local or friends)",
            self.0
        )
    }
}

impl std::error::Error for UnknownLeaderboard {}

impl FromStr for LeaderboardKind {
    type Err = UnknownLeaderboard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "local" => Ok(Self::Local),
            "friends" => Ok(Self::Friends),
            _ => Err(UnknownLeaderboard(s.to_string())),
        }
    }
}

fn by_wins_then_rate(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| b.win_rate.total_cmp(&a.win_rate))
}

fn by_xp_then_wins(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.xp.cmp(&a.xp).then_with(|| by_wins_then_rate(a, b))
}

/// Tally wins and losses per player over `records`
fn tally<'a>(records: impl Iterator<Item = &'a GameRecord>) -> FxHashMap<&'a str, (u32, u32)> {
    let mut counts: FxHashMap<&str, (u32, u32)> = FxHashMap::default();
    for record in records {
        let entry = counts.entry(record.player.as_str()).or_default();
        if record.won {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }
    counts
}

/// Every profile ranked by XP, then wins and win rate in `mode`
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use kitten_hangman::core::GameMode;
/// use kitten_hangman::persistence::{Profile, leaderboard};
///
/// let mut alice = Profile::new("alice", Utc::now());
/// alice.xp = 120;
/// let bob = Profile::new("bob", Utc::now());
///
/// let board = leaderboard::global(&[bob, alice], &[], GameMode::Kitten, 10);
/// assert_eq!(board[0].player, "alice");
/// ```
#[must_use]
pub fn global(
    profiles: &[Profile],
    records: &[GameRecord],
    mode: GameMode,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let counts = tally(records.iter().filter(|r| r.mode == mode));

    let mut entries: Vec<LeaderboardEntry> = profiles
        .iter()
        .map(|profile| {
            let (wins, losses) = counts
                .get(profile.player.as_str())
                .copied()
                .unwrap_or_default();
            LeaderboardEntry::new(&profile.player, profile.xp, wins, losses)
        })
        .collect();

    entries.sort_by(by_xp_then_wins);
    entries.truncate(limit);
    entries
}

/// Players ranked by wins in `mode` over games played within `window` of `now`
#[must_use]
pub fn local(
    profiles: &[Profile],
    records: &[GameRecord],
    mode: GameMode,
    window: TimeDelta,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let since = now - window;
    let counts = tally(
        records
            .iter()
            .filter(|r| r.mode == mode && r.played_at >= since && r.played_at <= now),
    );

    let mut entries: Vec<LeaderboardEntry> = counts
        .into_iter()
        .map(|(player, (wins, losses))| {
            let xp = profiles
                .iter()
                .find(|p| p.player == player)
                .map_or(0, |p| p.xp);
            LeaderboardEntry::new(player, xp, wins, losses)
        })
        .collect();

    // Hash map order is arbitrary; fall back to the name for stable output
    entries.sort_by(|a, b| by_wins_then_rate(a, b).then_with(|| a.player.cmp(&b.player)));
    entries.truncate(limit);
    entries
}

/// `player` and their friends ranked by wins in `mode`
///
/// Players without a profile are left out.
#[must_use]
pub fn friends(
    player: &str,
    friend_ids: &[String],
    profiles: &[Profile],
    mode: GameMode,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = profiles
        .iter()
        .filter(|p| p.player == player || friend_ids.contains(&p.player))
        .map(|p| LeaderboardEntry::new(&p.player, p.xp, p.wins.get(mode), p.losses.get(mode)))
        .collect();

    entries.sort_by(by_wins_then_rate);
    entries
}
