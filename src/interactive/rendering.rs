//! TUI rendering with ratatui
//!
//! Gallows, masked word, keyboard and game log for the hangman interface.

use super::app::{App, InputMode, MessageStyle};
use crate::core::Letter;
use crate::game::Outcome;
use crate::persistence::RecordStore;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui<S: RecordStore + Send + 'static>(f: &mut Frame, app: &App<'_, S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Main content
            Constraint::Length(3), // Input hint
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Board
            Constraint::Percentage(40), // Keyboard and messages
        ])
        .split(chunks[1]);

    render_board(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn mode_color<S: RecordStore + Send + 'static>(app: &App<'_, S>) -> Color {
    if app.mode.is_adaptive() {
        Color::Magenta
    } else {
        Color::Cyan
    }
}

fn render_header<S: RecordStore + Send + 'static>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let title = if app.mode.is_adaptive() {
        "🐱 KITTEN HANGMAN - The word fights back"
    } else {
        "🪢 KITTEN HANGMAN"
    };
    let color = mode_color(app);

    let header = Paragraph::new(title)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(color)),
        );
    f.render_widget(header, area);
}

fn render_board<S: RecordStore + Send + 'static>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(7),    // Face and word
            Constraint::Length(3), // Lives gauge
        ])
        .split(area);

    render_word(f, app, chunks[0]);
    render_lives(f, app, chunks[1]);
}

fn render_word<S: RecordStore + Send + 'static>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let session = &app.session;

    let word_style = match session.outcome() {
        Outcome::Won => Style::default().fg(Color::Green),
        Outcome::Lost => Style::default().fg(Color::Red),
        Outcome::InProgress => Style::default().fg(Color::Yellow),
    }
    .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(""),
        Line::from(session.hangman_stage()).alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(session.masked_word(), word_style)).alignment(Alignment::Center),
        Line::from(""),
        Line::from(format!(
            "{} letters | {} guesses | accuracy {:.0}%",
            session.secret_word().len(),
            session.total_guesses(),
            session.accuracy()
        ))
        .alignment(Alignment::Center),
    ];

    if app.mode.is_adaptive() {
        lines.push(
            Line::from(Span::styled(
                format!(
                    "🐱 adaptations: {} | word swaps: {}",
                    session.adaptation_count(),
                    session.swap_count()
                ),
                Style::default().fg(Color::Magenta),
            ))
            .alignment(Alignment::Center),
        );
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" {} ", app.mode.name().to_uppercase()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

fn render_lives<S: RecordStore + Send + 'static>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let session = &app.session;
    let max = session.max_wrong_guesses();
    let remaining = session.remaining_guesses();
    let percent = (u64::from(remaining) * 100 / u64::from(max.max(1))) as u16;

    let color = match remaining {
        0 | 1 => Color::Red,
        2 | 3 => Color::Yellow,
        _ => Color::Green,
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Lives ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(color))
        .percent(percent)
        .label(format!("{remaining}/{max} wrong guesses left"));

    f.render_widget(gauge, area);
}

fn render_info_panel<S: RecordStore + Send + 'static>(
    f: &mut Frame,
    app: &App<'_, S>,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Keyboard
            Constraint::Min(4),    // Messages
        ])
        .split(area);

    render_keyboard(f, app, chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn letter_style<S: RecordStore + Send + 'static>(app: &App<'_, S>, letter: Letter) -> Style {
    let session = &app.session;
    if session.wrong_letters().contains(&letter) {
        Style::default().fg(Color::Red).add_modifier(Modifier::CROSSED_OUT)
    } else if session.guessed_letters().contains(&letter) {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn render_keyboard<S: RecordStore + Send + 'static>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    const ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

    let lines: Vec<Line> = ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .filter_map(|ch| Letter::new(ch).ok())
                .flat_map(|letter| {
                    [
                        Span::styled(letter.to_string(), letter_style(app, letter)),
                        Span::raw(" "),
                    ]
                })
                .collect();
            Line::from(spans).alignment(Alignment::Center)
        })
        .collect();

    let keyboard = Paragraph::new(lines).block(
        Block::default()
            .title(" Letters ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );

    f.render_widget(keyboard, area);
}

fn render_messages<S: RecordStore + Send + 'static>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Warning => Style::default().fg(Color::Magenta),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input<S: RecordStore + Send + 'static>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let (title, color) = match (app.input_mode, app.session.outcome()) {
        (InputMode::GameOver, Outcome::Won) => (" 🎉 YOU WON! 🎉 ", Color::Green),
        (InputMode::GameOver, _) => (" 💀 GAME OVER 💀 ", Color::Red),
        (InputMode::Guessing, _) => (" Type a letter to guess ", Color::Yellow),
    };

    let content = match (app.input_mode, app.last_xp) {
        (InputMode::GameOver, Some(xp)) => format!("{xp:+} XP  |  n: new game  Tab: mode  q: quit"),
        (InputMode::GameOver, None) => "n: new game  Tab: mode  q: quit".to_string(),
        (InputMode::Guessing, _) => {
            let wrong: Vec<String> = app
                .session
                .wrong_letters()
                .iter()
                .map(ToString::to_string)
                .collect();
            format!("Wrong: {}", wrong.join(" "))
        }
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status<S: RecordStore + Send + 'static>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let player = app.player.as_deref().unwrap_or("guest");
    let player = Paragraph::new(format!("Player: {player}")).alignment(Alignment::Center);
    f.render_widget(player, chunks[0]);

    let stats_text = format!(
        "Games: {} | Win Rate: {:.0}%",
        app.stats.total_games,
        app.stats.win_rate()
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[1]);

    let xp_text = format!(
        "XP: {:+} | Streak: {}",
        app.stats.xp_earned, app.stats.current_streak
    );
    let xp = Paragraph::new(xp_text).alignment(Alignment::Center);
    f.render_widget(xp, chunks[2]);

    let help_text = match app.input_mode {
        InputMode::Guessing => "Esc: Quit | Ctrl+N: New | Tab: Mode",
        InputMode::GameOver => "q: Quit | n: New Game | Tab: Mode",
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}
