//! Formatting utilities for terminal output

use crate::core::Letter;

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Remaining lives as filled and empty hearts
#[must_use]
pub fn lives_bar(remaining: u32, max: u32) -> String {
    let remaining = remaining.min(max) as usize;
    let lost = max as usize - remaining;
    format!("{}{}", "♥".repeat(remaining), "♡".repeat(lost))
}

/// Letters separated by spaces, `-` when there are none
#[must_use]
pub fn format_letters<'a>(letters: impl IntoIterator<Item = &'a Letter>) -> String {
    let joined = letters
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

/// Signed XP amount, e.g. `+36 XP` or `-5 XP`
#[must_use]
pub fn format_xp(xp: i64) -> String {
    format!("{xp:+} XP")
}

/// Win rate bar sized to `width`
#[must_use]
pub fn win_rate_bar(win_rate: f64, width: usize) -> String {
    create_progress_bar(win_rate, 100.0, width)
}
