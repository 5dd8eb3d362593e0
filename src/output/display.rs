//! Display functions for command results

use super::formatters::{format_letters, format_xp, win_rate_bar};
use crate::commands::{ProfileSummary, SimulationResult};
use crate::core::GameMode;
use crate::game::{GameSession, Outcome, level_for_xp, reward::XP_PER_LEVEL};
use crate::persistence::{LeaderboardEntry, LeaderboardKind};
use colored::Colorize;
use std::io::{self, Write};

/// Write the end-of-game summary
///
/// `xp` is `None` for guest games, which are not saved.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn print_game_summary<W: Write>(
    out: &mut W,
    session: &GameSession,
    xp: Option<i64>,
) -> io::Result<()> {
    writeln!(out, "\n{}", "═".repeat(60).bright_cyan())?;
    match session.outcome() {
        Outcome::Won => writeln!(
            out,
            "{}",
            "    🎉 🎊 ✨  Y O U   W O N !  ✨ 🎊 🎉    ".bright_green().bold()
        )?,
        Outcome::Lost => writeln!(
            out,
            "{}",
            "    💀  G A M E   O V E R  💀    ".bright_red().bold()
        )?,
        Outcome::InProgress => writeln!(out, "{}", "    Game in progress    ".bright_white())?,
    }
    writeln!(out, "{}", "═".repeat(60).bright_cyan())?;

    writeln!(
        out,
        "\n  {}   The word was {}",
        session.hangman_stage(),
        session.secret_word().text().bright_yellow().bold()
    )?;
    writeln!(
        out,
        "  Wrong guesses:  {}/{}  ({})",
        session.wrong_guess_count(),
        session.max_wrong_guesses(),
        format_letters(session.wrong_letters())
    )?;
    writeln!(out, "  Total guesses:  {}", session.total_guesses())?;
    writeln!(out, "  Accuracy:       {:.0}%", session.accuracy())?;

    if session.mode().is_adaptive() {
        writeln!(
            out,
            "  🐱 Kitten adaptations: {} ({} word swaps)",
            session.adaptation_count().to_string().bright_magenta(),
            session.swap_count()
        )?;
    }

    match xp {
        Some(xp) if xp >= 0 => writeln!(out, "\n  {}", format_xp(xp).bright_green().bold())?,
        Some(xp) => writeln!(out, "\n  {}", format_xp(xp).bright_red().bold())?,
        None => writeln!(out, "\n  {}", "Guest game, not saved".bright_black())?,
    }

    writeln!(out, "\n{}\n", "═".repeat(60).bright_cyan())
}

/// Print a ranked leaderboard, highlighting `highlight` if present
pub fn print_leaderboard(
    kind: LeaderboardKind,
    mode: GameMode,
    entries: &[LeaderboardEntry],
    highlight: Option<&str>,
) {
    println!("\n{}", "═".repeat(70).cyan());
    println!(
        " {} {} ",
        format!("{} LEADERBOARD", kind.name().to_uppercase())
            .bright_cyan()
            .bold(),
        format!("({mode})").bright_yellow()
    );
    println!("{}", "═".repeat(70).cyan());

    if entries.is_empty() {
        println!("\n  No games recorded yet.\n");
        return;
    }

    println!(
        "\n  {:>3}  {:<16} {:>7} {:>5} {:>5} {:>6}  {}",
        "#", "Player", "XP", "Lvl", "Wins", "Games", "Win rate"
    );
    println!("  {}", "─".repeat(66).bright_black());

    for (rank, entry) in entries.iter().enumerate() {
        let line = format!(
            "{:>3}  {:<16} {:>7} {:>5} {:>5} {:>6}  {} {:>5.1}%",
            rank + 1,
            entry.player,
            entry.xp,
            entry.level,
            entry.wins,
            entry.total_games,
            win_rate_bar(entry.win_rate, 10),
            entry.win_rate
        );
        if highlight == Some(entry.player.as_str()) {
            println!("  {}", line.bright_yellow().bold());
        } else {
            println!("  {line}");
        }
    }
    println!();
}

/// Print a player's profile
pub fn print_profile(summary: &ProfileSummary) {
    let profile = &summary.profile;

    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "PROFILE:".bright_cyan().bold(),
        profile.player.bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    let into_level = profile.xp.max(0) % XP_PER_LEVEL;
    println!(
        "\n  Level {}  ({} XP, {}/{} to level {})",
        level_for_xp(profile.xp).to_string().bright_green().bold(),
        profile.xp,
        into_level,
        XP_PER_LEVEL,
        level_for_xp(profile.xp) + 1
    );

    println!("\n📊 {}", "By mode:".bright_cyan().bold());
    for mode in GameMode::ALL {
        println!(
            "   {:<11} {:>4} won  {:>4} lost  [{}] {:>5.1}%",
            mode.to_string(),
            profile.wins.get(mode),
            profile.losses.get(mode),
            win_rate_bar(profile.win_rate(mode), 15).green(),
            profile.win_rate(mode)
        );
    }

    if !summary.recent.is_empty() {
        println!("\n🕹  {}", "Recent games:".bright_cyan().bold());
        for record in &summary.recent {
            let outcome = if record.won { "won ".green() } else { "lost".red() };
            println!(
                "   {}  {:<11} {} {:<14} {}",
                record.played_at.format("%Y-%m-%d %H:%M"),
                record.mode.to_string(),
                outcome,
                record.word,
                format_xp(record.xp_gained)
            );
        }
    }

    println!("\n👥 {}", "Friends:".bright_cyan().bold());
    if summary.friends.is_empty() {
        println!("   none yet (add one with `friend add NAME`)");
    } else {
        println!("   {}", summary.friends.join(", "));
    }
    println!();
}

/// Print the result of a simulation run
pub fn print_simulation_result(result: &SimulationResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "SIMULATION RESULTS:".bright_cyan().bold(),
        result.mode.to_string().to_uppercase().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Games played:     {}", result.games);
    println!(
        "   Win rate:         [{}] {}",
        win_rate_bar(result.win_rate, 20).green(),
        format!("{:.1}%", result.win_rate).bright_yellow().bold()
    );
    println!(
        "   Wins / losses:    {} / {}",
        result.wins.to_string().green(),
        result.losses.to_string().red()
    );
    println!("   Avg wrong:        {:.2}", result.average_wrong);
    if result.mode.is_adaptive() {
        println!("   Avg adaptations:  {:.2}", result.average_adaptations);
        println!("   Avg word swaps:   {:.2}", result.average_swaps);
    }

    println!("\n⭐ {}", "Rewards:".bright_cyan().bold());
    println!("   Total XP:         {}", format_xp(result.total_xp));
    println!("   Avg XP per game:  {:.1}", result.average_xp);

    println!("\n⏱  {}", "Timing:".bright_cyan().bold());
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);
    println!();
}
