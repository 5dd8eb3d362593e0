//! Profile and friend commands

use super::CommandError;
use crate::persistence::{GameRecord, Profile, RecordStore};
use chrono::Utc;
use tracing::info;

/// A player's profile with their latest games and friend list
#[derive(Debug, Clone)]
pub struct ProfileSummary {
    pub profile: Profile,
    /// Newest first
    pub recent: Vec<GameRecord>,
    pub friends: Vec<String>,
}

/// Load the summary for `player`
///
/// A player who has never finished a game gets a fresh level-1 profile.
///
/// # Errors
///
/// Returns `CommandError::NoPlayer` without a player, or a store error.
pub fn load_profile<S: RecordStore + ?Sized>(
    store: &S,
    player: Option<&str>,
    recent_limit: usize,
) -> Result<ProfileSummary, CommandError> {
    let player = player.ok_or(CommandError::NoPlayer)?;

    let profile = store
        .profile(player)?
        .unwrap_or_else(|| Profile::new(player, Utc::now()));

    let mut recent: Vec<GameRecord> = store
        .records()?
        .into_iter()
        .filter(|r| r.player == player)
        .collect();
    recent.reverse();
    recent.truncate(recent_limit);

    Ok(ProfileSummary {
        profile,
        recent,
        friends: store.friends(player)?,
    })
}

/// Make `player` follow `friend`
///
/// # Errors
///
/// Returns `CommandError::NoPlayer` without a player, or a store error for
/// invalid names.
pub fn add_friend<S: RecordStore + ?Sized>(
    store: &mut S,
    player: Option<&str>,
    friend: &str,
) -> Result<(), CommandError> {
    let player = player.ok_or(CommandError::NoPlayer)?;
    store.add_friend(player, friend)?;
    info!(player, friend, "friend added");
    Ok(())
}
