//! Kitten Hangman - CLI
//!
//! Hangman with TUI and CLI modes, an adaptive kitten mode, XP and leaderboards.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use kitten_hangman::{
    commands::{
        SimulationConfig, add_friend, load_leaderboard, load_profile, run_simple, run_simulation,
    },
    config::Config,
    core::{GameMode, Word},
    output::{print_leaderboard, print_profile, print_simulation_result},
    persistence::{JsonStore, LeaderboardKind, RecordStore, SaveQueue},
    wordlists::{
        WORDS,
        loader::{filter_by_length, load_from_file, words_from_slice},
    },
};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kitten_hangman",
    about = "Hangman where the kitten re-picks the word after every miss",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Mode: hard, impossible or kitten (default from config, else hard)
    #[arg(short, long, global = true)]
    mode: Option<GameMode>,

    /// Wordlist: 'embedded' (default) or path to file
    #[arg(short = 'w', long, global = true, default_value = "embedded")]
    wordlist: String,

    /// Config file (default: ./kitten_hangman.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Player name; without one you play as a guest and nothing is saved
    #[arg(short, long, global = true)]
    player: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (line-based game without TUI)
    Simple,

    /// Play automated games to compare modes
    Simulate {
        /// Number of games per mode
        #[arg(short = 'n', long, default_value = "200")]
        games: usize,

        /// Base random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },

    /// Show a leaderboard
    Leaderboard {
        /// Which board: global, local (recent games) or friends
        #[arg(short, long, default_value = "global")]
        kind: LeaderboardKind,
    },

    /// Show the player's profile
    Profile,

    /// Manage friends
    Friend {
        #[command(subcommand)]
        action: FriendAction,
    },
}

#[derive(Subcommand)]
enum FriendAction {
    /// Follow another player
    Add {
        /// Friend's player name
        name: String,
    },

    /// List followed players
    List,
}

/// Install the tracing subscriber
///
/// The TUI owns the terminal, so in play mode logs go to a file in the data dir.
fn init_logging(command: &Commands, config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if matches!(command, Commands::Play) {
        fs::create_dir_all(&config.data_dir)?;
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_file())
            .with_context(|| format!("Failed to open log file {}", config.log_file().display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Arc::new(log_file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

/// Load the word pool based on the -w flag, narrowed to the configured lengths
fn load_pool(wordlist: &str, config: &Config) -> Result<Vec<Word>> {
    let words = match wordlist {
        "embedded" => words_from_slice(WORDS),
        path => load_from_file(path).with_context(|| format!("Failed to load word list {path}"))?,
    };

    let pool = filter_by_length(words, config.min_word_length, config.max_word_length);
    if pool.is_empty() {
        bail!(
            "No words between {} and {} letters in word list '{wordlist}'",
            config.min_word_length,
            config.max_word_length
        );
    }
    Ok(pool)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(player) = cli.player {
        config.player = Some(player);
    }
    let mode = cli.mode.unwrap_or(config.default_mode);

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);
    init_logging(&command, &config)?;

    match command {
        Commands::Play => run_play_command(&cli.wordlist, mode, &config),
        Commands::Simple => run_simple_command(&cli.wordlist, mode, &config),
        Commands::Simulate { games, seed } => {
            run_simulate_command(&cli.wordlist, cli.mode, games, seed, &config)
        }
        Commands::Leaderboard { kind } => run_leaderboard_command(kind, mode, &config),
        Commands::Profile => run_profile_command(&config),
        Commands::Friend { action } => run_friend_command(action, &config),
    }
}

fn run_play_command(wordlist: &str, mode: GameMode, config: &Config) -> Result<()> {
    use kitten_hangman::interactive::{App, run_tui};

    let pool = load_pool(wordlist, config)?;
    let saves = SaveQueue::spawn(JsonStore::open(&config.data_dir)?);

    let app = App::new(&pool, mode, config.player.clone(), &saves)?;
    run_tui(app)?;

    let (_, summary) = saves.shutdown()?;
    info!(saved = summary.saved, failed = summary.failed, "session saved");
    Ok(())
}

fn run_simple_command(wordlist: &str, mode: GameMode, config: &Config) -> Result<()> {
    let pool = load_pool(wordlist, config)?;
    let saves = SaveQueue::spawn(JsonStore::open(&config.data_dir)?);

    run_simple(&pool, mode, config.player.as_deref(), &saves)?;

    let (_, summary) = saves.shutdown()?;
    if summary.failed > 0 {
        eprintln!("Warning: {} game(s) could not be saved", summary.failed);
    }
    Ok(())
}

fn run_simulate_command(
    wordlist: &str,
    mode: Option<GameMode>,
    games: usize,
    seed: u64,
    config: &Config,
) -> Result<()> {
    let pool = load_pool(wordlist, config)?;
    let modes = mode.map_or_else(|| GameMode::ALL.to_vec(), |m| vec![m]);

    println!(
        "🎲 Simulating {games} games per mode over {} words...",
        pool.len()
    );

    for mode in modes {
        let simulation = SimulationConfig {
            mode,
            games,
            seed,
            show_progress: true,
        };
        let result = run_simulation(&pool, &simulation)?;
        print_simulation_result(&result);
    }
    Ok(())
}

fn run_leaderboard_command(kind: LeaderboardKind, mode: GameMode, config: &Config) -> Result<()> {
    let store = JsonStore::open(&config.data_dir)?;
    let player = config.player.as_deref();

    let entries = load_leaderboard(&store, kind, mode, player, config, chrono::Utc::now())?;
    print_leaderboard(kind, mode, &entries, player);
    Ok(())
}

fn run_profile_command(config: &Config) -> Result<()> {
    let store = JsonStore::open(&config.data_dir)?;
    let summary = load_profile(&store, config.player.as_deref(), 10)?;
    print_profile(&summary);
    Ok(())
}

fn run_friend_command(action: FriendAction, config: &Config) -> Result<()> {
    let mut store = JsonStore::open(&config.data_dir)?;
    let player = config.player.as_deref();

    match action {
        FriendAction::Add { name } => {
            add_friend(&mut store, player, &name)?;
            println!("✓ Now following {name}");
        }
        FriendAction::List => {
            let summary = load_profile(&store, player, 0)?;
            if summary.friends.is_empty() {
                println!("No friends yet.");
            }
            for friend in &summary.friends {
                let level = store
                    .profile(friend)?
                    .map_or(1, |profile| profile.level);
                println!("  • {friend} (level {level})");
            }
        }
    }
    Ok(())
}
