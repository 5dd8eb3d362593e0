//! Simple interactive CLI mode
//!
//! Line-based hangman without the TUI

use super::{CommandError, submit_finished};
use crate::core::{GameMode, Word};
use crate::game::{GameSession, GuessEvent, Outcome, apply_guess_str, initialize_game};
use crate::output::display::print_game_summary;
use crate::output::formatters::{format_letters, lives_bar};
use crate::persistence::{RecordStore, SaveQueue};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Games finished during one simple-mode run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleSummary {
    pub games_played: usize,
    pub games_won: usize,
}

/// Run the simple interactive CLI mode on stdin/stdout
///
/// # Errors
///
/// Returns an error if reading input or writing output fails, or if the
/// word pool is empty.
pub fn run_simple<S: RecordStore + Send + 'static>(
    pool: &[Word],
    mode: GameMode,
    player: Option<&str>,
    saves: &SaveQueue<S>,
) -> Result<SimpleSummary, CommandError> {
    let stdin = io::stdin();
    run_simple_with(stdin.lock(), io::stdout(), pool, mode, player, saves)
}

/// Run the simple mode over arbitrary input and output
///
/// Finished games are handed to `saves`; the loop never waits on them.
/// End of input ends the run like `quit`.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails, or if the
/// word pool is empty.
pub fn run_simple_with<R, W, S>(
    mut input: R,
    mut out: W,
    pool: &[Word],
    mode: GameMode,
    player: Option<&str>,
    saves: &SaveQueue<S>,
) -> Result<SimpleSummary, CommandError>
where
    R: BufRead,
    W: Write,
    S: RecordStore + Send + 'static,
{
    writeln!(out, "\n╔══════════════════════════════════════════════════════════════╗")?;
    writeln!(out, "║                  Kitten Hangman - Simple Mode                ║")?;
    writeln!(out, "╚══════════════════════════════════════════════════════════════╝\n")?;

    writeln!(out, "Guess one letter per line.")?;
    if mode.is_adaptive() {
        writeln!(out, "🐱 Kitten mode: every miss lets the kitten pick a harder word.")?;
    }
    match player {
        Some(name) => writeln!(out, "Playing as {}.", name.bright_cyan())?,
        None => writeln!(out, "Playing as a guest; games are not saved.")?,
    }
    writeln!(out, "Commands: 'new' for a new game, 'quit' to exit\n")?;

    let mut summary = SimpleSummary::default();

    'games: loop {
        let mut session = initialize_game(pool, mode)?;
        writeln!(
            out,
            "🔄 New {} game: {} letters, {} wrong guesses allowed\n",
            mode,
            session.secret_word().len(),
            session.max_wrong_guesses()
        )?;

        while !session.is_over() {
            write_board(&mut out, &session)?;

            let Some(line) = read_input(&mut input, &mut out, "Guess a letter")? else {
                return Ok(summary);
            };

            match line.to_ascii_lowercase().as_str() {
                "quit" | "exit" => {
                    writeln!(out, "\n👋 Thanks for playing!\n")?;
                    return Ok(summary);
                }
                "new" => {
                    writeln!(out, "\nAbandoned. The word was {}.\n", session.secret_word())?;
                    continue 'games;
                }
                _ => {}
            }

            let result = apply_guess_str(&mut session, &line);
            let message = match result.event {
                GuessEvent::Hit | GuessEvent::Won => result.message.green(),
                GuessEvent::Invalid(_) => result.message.yellow(),
                GuessEvent::Miss | GuessEvent::Adapted | GuessEvent::Lost => result.message.red(),
            };
            writeln!(out, "{message}\n")?;
        }

        let xp = submit_finished(&session, player, saves);
        summary.games_played += 1;
        if session.outcome() == Outcome::Won {
            summary.games_won += 1;
        }
        print_game_summary(&mut out, &session, xp)?;

        let again = read_input(&mut input, &mut out, "Play again? (yes/no)")?;
        match again.map(|answer| answer.to_ascii_lowercase()).as_deref() {
            Some("yes" | "y") => writeln!(out)?,
            _ => {
                writeln!(out, "\n👋 Thanks for playing!\n")?;
                return Ok(summary);
            }
        }
    }
}

fn write_board<W: Write>(out: &mut W, session: &GameSession) -> io::Result<()> {
    writeln!(out, "────────────────────────────────────────────────────────────")?;
    writeln!(
        out,
        "{}   {}",
        session.hangman_stage(),
        session.masked_word().bright_white().bold()
    )?;
    writeln!(
        out,
        "Lives: {}  Wrong: {}",
        lives_bar(session.remaining_guesses(), session.max_wrong_guesses()).red(),
        format_letters(session.wrong_letters())
    )?;
    writeln!(out, "────────────────────────────────────────────────────────────")?;
    Ok(())
}

/// Prompt and read one trimmed line, `None` at end of input
fn read_input<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{prompt}: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn pool(words: &[&str]) -> Vec<Word> {
        words.iter().map(|w| Word::new(*w).unwrap()).collect()
    }

    fn run(script: &str, mode: GameMode, player: Option<&str>) -> (SimpleSummary, String, MemoryStore) {
        let saves = SaveQueue::spawn(MemoryStore::new());
        let mut output = Vec::new();
        let summary = run_simple_with(
            script.as_bytes(),
            &mut output,
            &pool(&["otter"]),
            mode,
            player,
            &saves,
        )
        .unwrap();
        let (store, _) = saves.shutdown().unwrap();
        (summary, String::from_utf8(output).unwrap(), store)
    }

    #[test]
    fn winning_game_is_saved_for_player() {
        let (summary, output, store) = run("o\nt\ne\nr\nno\n", GameMode::Hard, Some("alice"));

        assert_eq!(summary, SimpleSummary { games_played: 1, games_won: 1 });
        assert!(output.contains("You won!"));

        let records = store.records().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].won);
        assert_eq!(records[0].word, "OTTER");
    }

    #[test]
    fn guest_games_are_not_saved() {
        let (summary, output, store) = run("o\nt\ne\nr\nno\n", GameMode::Hard, None);

        assert_eq!(summary.games_won, 1);
        assert!(output.contains("guest"));
        assert!(store.records().unwrap().is_empty());
    }

    #[test]
    fn invalid_input_does_not_end_the_game() {
        let (summary, output, _) = run("42\nab\no\no\nt\ne\nr\nno\n", GameMode::Hard, None);

        assert_eq!(summary.games_won, 1);
        assert!(output.contains("Already guessed O"));
    }

    #[test]
    fn losing_then_replaying() {
        let script = "a\nb\nc\nd\nyes\no\nt\ne\nr\nno\n";
        let (summary, output, store) = run(script, GameMode::Impossible, Some("bob"));

        assert_eq!(summary, SimpleSummary { games_played: 2, games_won: 1 });
        assert!(output.contains("You lost!"));
        assert_eq!(store.profile("bob").unwrap().unwrap().losses.impossible, 1);
    }

    #[test]
    fn quit_and_end_of_input_stop_cleanly() {
        let (summary, output, _) = run("o\nquit\n", GameMode::Kitten, None);
        assert_eq!(summary.games_played, 0);
        assert!(output.contains("Thanks for playing"));

        let (summary, _, _) = run("o\n", GameMode::Kitten, None);
        assert_eq!(summary.games_played, 0);
    }
}
