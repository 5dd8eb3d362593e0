//! Player profiles: XP, level and per-mode win/loss counters

use super::GameRecord;
use crate::core::GameMode;
use crate::game::level_for_xp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A counter per game mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeCounts {
    pub hard: u32,
    pub impossible: u32,
    pub kitten: u32,
}

impl ModeCounts {
    #[must_use]
    pub const fn get(&self, mode: GameMode) -> u32 {
        match mode {
            GameMode::Hard => self.hard,
            GameMode::Impossible => self.impossible,
            GameMode::Kitten => self.kitten,
        }
    }

    pub fn increment(&mut self, mode: GameMode) {
        let slot = match mode {
            GameMode::Hard => &mut self.hard,
            GameMode::Impossible => &mut self.impossible,
            GameMode::Kitten => &mut self.kitten,
        };
        *slot += 1;
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.hard + self.impossible + self.kitten
    }
}

/// Persistent player profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub player: String,
    pub xp: i64,
    pub level: u32,
    #[serde(default)]
    pub wins: ModeCounts,
    #[serde(default)]
    pub losses: ModeCounts,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// A fresh level-1 profile with no games
    #[must_use]
    pub fn new(player: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            player: player.into(),
            xp: 0,
            level: 1,
            wins: ModeCounts::default(),
            losses: ModeCounts::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Fold a finished game into the profile
    ///
    /// Adds the XP delta, bumps the mode's win or loss counter and recomputes the level.
    pub fn apply(&mut self, record: &GameRecord) {
        self.xp += record.xp_gained;
        if record.won {
            self.wins.increment(record.mode);
        } else {
            self.losses.increment(record.mode);
        }
        self.level = level_for_xp(self.xp);
        self.updated_at = record.played_at;
    }

    #[must_use]
    pub const fn games_played(&self, mode: GameMode) -> u32 {
        self.wins.get(mode) + self.losses.get(mode)
    }

    /// Win rate for a mode in percent, 0 when no games were played
    #[must_use]
    pub fn win_rate(&self, mode: GameMode) -> f64 {
        win_rate(self.wins.get(mode), self.losses.get(mode))
    }
}

/// Win rate in percent, 0 when there are no games
#[must_use]
pub fn win_rate(wins: u32, losses: u32) -> f64 {
    let total = wins + losses;
    if total == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(total) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mode: GameMode, won: bool, xp: i64) -> GameRecord {
        GameRecord {
            id: 1,
            player: "alice".to_string(),
            mode,
            word: "CAT".to_string(),
            won,
            wrong_guesses: 0,
            total_guesses: 3,
            xp_gained: xp,
            played_at: Utc::now(),
        }
    }

    #[test]
    fn new_profile_is_level_one() {
        let profile = Profile::new("alice", Utc::now());
        assert_eq!(profile.xp, 0);
        assert_eq!(profile.level, 1);
        assert_eq!(profile.wins.total(), 0);
        assert_eq!(profile.losses.total(), 0);
    }

    #[test]
    fn apply_updates_counters_and_xp() {
        let mut profile = Profile::new("alice", Utc::now());
        profile.apply(&record(GameMode::Kitten, true, 105));
        profile.apply(&record(GameMode::Kitten, false, -5));
        profile.apply(&record(GameMode::Hard, false, -15));

        assert_eq!(profile.xp, 85);
        assert_eq!(profile.wins.get(GameMode::Kitten), 1);
        assert_eq!(profile.losses.get(GameMode::Kitten), 1);
        assert_eq!(profile.losses.get(GameMode::Hard), 1);
        assert_eq!(profile.games_played(GameMode::Kitten), 2);
        assert_eq!(profile.games_played(GameMode::Impossible), 0);
    }

    #[test]
    fn apply_recomputes_level() {
        let mut profile = Profile::new("alice", Utc::now());
        profile.xp = 990;
        profile.apply(&record(GameMode::Hard, true, 40));
        assert_eq!(profile.level, 2);
    }

    #[test]
    fn win_rate_percent() {
        assert!((win_rate(3, 1) - 75.0).abs() < f64::EPSILON);
        assert!(win_rate(0, 0).abs() < f64::EPSILON);
        assert!((win_rate(0, 4)).abs() < f64::EPSILON);
    }
}
