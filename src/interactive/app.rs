//! TUI application state and logic

use crate::commands::submit_finished;
use crate::core::{GameMode, Word};
use crate::game::{GameError, GameSession, GuessEvent, Outcome, apply_guess_str, initialize_game};
use crate::persistence::{RecordStore, SaveQueue};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::info;

/// Application state
pub struct App<'a, S: RecordStore + Send + 'static> {
    pub pool: &'a [Word],
    pub mode: GameMode,
    pub player: Option<String>,
    pub session: GameSession,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
    pub input_mode: InputMode,
    /// XP delta of the last finished game, `None` for guests
    pub last_xp: Option<i64>,
    saves: &'a SaveQueue<S>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Guessing,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
    pub xp_earned: i64,
    pub current_streak: usize,
}

impl Statistics {
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.games_won as f64 / self.total_games as f64 * 100.0
        }
    }
}

const MAX_MESSAGES: usize = 8;

impl<'a, S: RecordStore + Send + 'static> App<'a, S> {
    /// Create the app and start the first game
    ///
    /// # Errors
    ///
    /// Returns `GameError::EmptyPool` if there are no words to play with.
    pub fn new(
        pool: &'a [Word],
        mode: GameMode,
        player: Option<String>,
        saves: &'a SaveQueue<S>,
    ) -> Result<Self, GameError> {
        let session = initialize_game(pool, mode)?;

        let mut app = Self {
            pool,
            mode,
            player,
            session,
            messages: Vec::new(),
            stats: Statistics::default(),
            should_quit: false,
            input_mode: InputMode::Guessing,
            last_xp: None,
            saves,
        };
        app.announce_game();
        Ok(app)
    }

    fn announce_game(&mut self) {
        let text = format!(
            "New {} game: {} letters, {} wrong guesses allowed",
            self.mode,
            self.session.secret_word().len(),
            self.session.max_wrong_guesses()
        );
        self.add_message(&text, MessageStyle::Info);
        if self.mode.is_adaptive() {
            self.add_message(
                "🐱 The kitten re-picks the word after every miss!",
                MessageStyle::Warning,
            );
        }
    }

    /// Abandon the current game (unsaved) and start a fresh one
    pub fn new_game(&mut self) {
        match initialize_game(self.pool, self.mode) {
            Ok(session) => {
                self.session = session;
                self.input_mode = InputMode::Guessing;
                self.last_xp = None;
                self.messages.clear();
                self.announce_game();
            }
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
    }

    /// Switch to the next mode and start a new game in it
    pub fn cycle_mode(&mut self) {
        let index = GameMode::ALL
            .iter()
            .position(|&m| m == self.mode)
            .unwrap_or(0);
        self.mode = GameMode::ALL[(index + 1) % GameMode::ALL.len()];
        self.new_game();
    }

    pub fn handle_guess(&mut self, ch: char) {
        let result = apply_guess_str(&mut self.session, &ch.to_string());

        let style = match result.event {
            GuessEvent::Hit | GuessEvent::Won => MessageStyle::Success,
            GuessEvent::Adapted => MessageStyle::Warning,
            GuessEvent::Miss | GuessEvent::Lost => MessageStyle::Error,
            GuessEvent::Invalid(_) => MessageStyle::Info,
        };
        self.add_message(&result.message, style);

        if self.session.is_over() {
            self.finish_game();
        }
    }

    fn finish_game(&mut self) {
        let won = self.session.outcome() == Outcome::Won;

        self.stats.total_games += 1;
        if won {
            self.stats.games_won += 1;
            self.stats.current_streak += 1;
        } else {
            self.stats.current_streak = 0;
        }

        self.last_xp = submit_finished(&self.session, self.player.as_deref(), self.saves);
        match self.last_xp {
            Some(xp) => {
                self.stats.xp_earned += xp;
                self.add_message(&format!("{xp:+} XP"), MessageStyle::Info);
            }
            None => self.add_message("Guest game, not saved", MessageStyle::Info),
        }

        if !won {
            let text = format!("The word was {}", self.session.secret_word());
            self.add_message(&text, MessageStyle::Error);
        }
        self.add_message(
            "Press 'n' for new game, Tab to change mode, 'q' to quit.",
            MessageStyle::Info,
        );
        self.input_mode = InputMode::GameOver;
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    /// React to one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only process key press events (fixes Windows double-input bug)
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Guessing => match key.code {
                KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.new_game();
                }
                KeyCode::Tab => self.cycle_mode(),
                KeyCode::Char(c) => self.handle_guess(c),
                _ => {}
            },
            InputMode::GameOver => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('n') | KeyCode::Enter => self.new_game(),
                KeyCode::Tab => self.cycle_mode(),
                _ => {}
            },
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<S: RecordStore + Send + 'static>(app: App<'_, S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend, S: RecordStore + Send + 'static>(
    terminal: &mut Terminal<B>,
    mut app: App<'_, S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    info!(
        games = app.stats.total_games,
        won = app.stats.games_won,
        xp = app.stats.xp_earned,
        "leaving TUI"
    );
    Ok(())
}
