//! Leaderboard command

use super::CommandError;
use crate::config::Config;
use crate::core::GameMode;
use crate::persistence::leaderboard::{self, LeaderboardEntry, LeaderboardKind};
use crate::persistence::RecordStore;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Build a leaderboard from the store
///
/// The friends board needs a player; the others do not.
///
/// # Errors
///
/// Returns `CommandError::NoPlayer` for the friends board without a player,
/// or a store error if records or profiles cannot be read.
pub fn load_leaderboard<S: RecordStore + ?Sized>(
    store: &S,
    kind: LeaderboardKind,
    mode: GameMode,
    player: Option<&str>,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<Vec<LeaderboardEntry>, CommandError> {
    let profiles = store.profiles()?;
    debug!(%kind, %mode, profiles = profiles.len(), "building leaderboard");

    let entries = match kind {
        LeaderboardKind::Global => {
            let records = store.records()?;
            leaderboard::global(&profiles, &records, mode, config.leaderboard_limit)
        }
        LeaderboardKind::Local => {
            let records = store.records()?;
            leaderboard::local(
                &profiles,
                &records,
                mode,
                config.leaderboard_window(),
                now,
                config.leaderboard_limit,
            )
        }
        LeaderboardKind::Friends => {
            let player = player.ok_or(CommandError::NoPlayer)?;
            let friends = store.friends(player)?;
            leaderboard::friends(player, &friends, &profiles, mode)
        }
    };

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{GameRecord, MemoryStore};

    fn seeded_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        for (player, won, xp) in [
            ("alice", true, 40),
            ("bob", true, 90),
            ("bob", false, -5),
            ("carol", true, 20),
        ] {
            store
                .insert(GameRecord {
                    id: 0,
                    player: player.to_string(),
                    mode: GameMode::Kitten,
                    word: "BADGER".to_string(),
                    won,
                    wrong_guesses: 1,
                    total_guesses: 6,
                    xp_gained: xp,
                    played_at: Utc::now(),
                })
                .unwrap();
        }
        store.add_friend("alice", "carol").unwrap();
        store
    }

    #[test]
    fn global_board_from_store() {
        let store = seeded_store();
        let board = load_leaderboard(
            &store,
            LeaderboardKind::Global,
            GameMode::Kitten,
            None,
            &Config::default(),
            Utc::now(),
        )
        .unwrap();

        let names: Vec<&str> = board.iter().map(|e| e.player.as_str()).collect();
        assert_eq!(names, vec!["bob", "alice", "carol"]);
        assert_eq!(board[0].xp, 85);
    }

    #[test]
    fn local_board_respects_limit() {
        let store = seeded_store();
        let config = Config {
            leaderboard_limit: 2,
            ..Config::default()
        };
        let board = load_leaderboard(
            &store,
            LeaderboardKind::Local,
            GameMode::Kitten,
            None,
            &config,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn friends_board_needs_player() {
        let store = seeded_store();
        let err = load_leaderboard(
            &store,
            LeaderboardKind::Friends,
            GameMode::Kitten,
            None,
            &Config::default(),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, CommandError::NoPlayer));

        let board = load_leaderboard(
            &store,
            LeaderboardKind::Friends,
            GameMode::Kitten,
            Some("alice"),
            &Config::default(),
            Utc::now(),
        )
        .unwrap();
        let names: Vec<&str> = board.iter().map(|e| e.player.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"alice") && names.contains(&"carol"));
    }
}
