//! XP rewards for finished games

use crate::core::GameMode;

/// XP needed per profile level
pub const XP_PER_LEVEL: i64 = 1000;

/// Maximum accuracy bonus for a flawless win
const MAX_ACCURACY_BONUS: f64 = 20.0;

/// XP lost for a loss in each mode
#[must_use]
pub const fn loss_penalty(mode: GameMode) -> i64 {
    match mode {
        GameMode::Kitten => -5,
        GameMode::Impossible => -10,
        GameMode::Hard => -15,
    }
}

/// Base XP for a win in each mode
#[must_use]
pub const fn base_xp(mode: GameMode) -> i64 {
    match mode {
        GameMode::Hard => 20,
        GameMode::Impossible => 30,
        GameMode::Kitten => 50,
    }
}

/// Multiplier applied to a win in each mode
#[must_use]
pub const fn mode_multiplier(mode: GameMode) -> f64 {
    match mode {
        GameMode::Hard => 1.0,
        GameMode::Impossible => 1.2,
        GameMode::Kitten => 1.5,
    }
}

/// Calculate the XP delta for a finished game
///
/// Loss: a fixed per-mode penalty.
/// Win: `round((base + round(20 * hits / total)) * multiplier)`.
///
/// # Panics
/// Panics if a won game reports zero total guesses; at least one guess is
/// needed to reveal any letter.
///
/// # Examples
/// ```
/// use kitten_hangman::core::GameMode;
/// use kitten_hangman::game::calculate_xp;
///
/// // accuracy bonus = round(20 * 4/5) = 16
/// assert_eq!(calculate_xp(true, GameMode::Hard, 1, 5), 36);
/// assert_eq!(calculate_xp(false, GameMode::Kitten, 6, 9), -5);
/// ```
#[must_use]
pub fn calculate_xp(won: bool, mode: GameMode, wrong_guesses: u32, total_guesses: u32) -> i64 {
    if !won {
        return loss_penalty(mode);
    }

    assert!(total_guesses > 0, "a won game must have at least one guess");

    let hits = f64::from(total_guesses.saturating_sub(wrong_guesses));
    let accuracy_bonus = (MAX_ACCURACY_BONUS * hits / f64::from(total_guesses)).round();

    ((base_xp(mode) as f64 + accuracy_bonus) * mode_multiplier(mode)).round() as i64
}

/// Profile level for a total XP value, starting at 1
///
/// Negative XP counts as zero.
#[must_use]
pub fn level_for_xp(xp: i64) -> u32 {
    (xp.max(0) / XP_PER_LEVEL + 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn losses_use_fixed_penalty() {
        assert_eq!(calculate_xp(false, GameMode::Kitten, 6, 8), -5);
        assert_eq!(calculate_xp(false, GameMode::Impossible, 4, 4), -10);
        assert_eq!(calculate_xp(false, GameMode::Hard, 6, 10), -15);
    }

    #[test]
    fn loss_with_zero_guesses_does_not_panic() {
        assert_eq!(calculate_xp(false, GameMode::Hard, 0, 0), -15);
    }

    #[test]
    fn hard_win_example() {
        assert_eq!(calculate_xp(true, GameMode::Hard, 1, 5), 36);
    }

    #[test]
    fn flawless_wins() {
        // (20 + 20) * 1.0
        assert_eq!(calculate_xp(true, GameMode::Hard, 0, 4), 40);
        // (30 + 20) * 1.2
        assert_eq!(calculate_xp(true, GameMode::Impossible, 0, 4), 60);
        // (50 + 20) * 1.5
        assert_eq!(calculate_xp(true, GameMode::Kitten, 0, 4), 105);
    }

    #[test]
    fn kitten_win_rounds_half_up() {
        // bonus = round(20 * 5/8) = round(12.5) = 13; (50 + 13) * 1.5 = 94.5 -> 95
        assert_eq!(calculate_xp(true, GameMode::Kitten, 3, 8), 95);
    }

    #[test]
    fn impossible_win_with_misses() {
        // bonus = round(20 * 4/7) = round(11.43) = 11; (30 + 11) * 1.2 = 49.2 -> 49
        assert_eq!(calculate_xp(true, GameMode::Impossible, 3, 7), 49);
    }

    #[test]
    #[should_panic(expected = "at least one guess")]
    fn won_with_zero_guesses_fails_fast() {
        let _ = calculate_xp(true, GameMode::Hard, 0, 0);
    }

    #[test]
    fn levels() {
        assert_eq!(level_for_xp(-50), 1);
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(999), 1);
        assert_eq!(level_for_xp(1000), 2);
        assert_eq!(level_for_xp(2500), 3);
    }
}
