//! Simulation command
//!
//! Plays many automated games with a fixed letter-frequency guesser to
//! measure how hard each mode is.

use crate::core::{GameMode, Letter, Word};
use crate::game::{
    GameError, GameSession, Outcome, apply_guess, calculate_xp, initialize_game_with_rng,
};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::time::{Duration, Instant};
use tracing::info;

/// English letter frequency order used by the automated guesser
pub const GUESS_ORDER: &[u8; 26] = b"ETAOINSHRDLUCMFWYPVBGKJQXZ";

/// Settings for a simulation run
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub mode: GameMode,
    pub games: usize,
    /// Game `i` is seeded with `seed + i`, so runs are reproducible
    pub seed: u64,
    pub show_progress: bool,
}

/// Aggregate results of a simulation run
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub mode: GameMode,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub average_wrong: f64,
    /// Misses, each of which let the kitten try to swap the word
    pub average_adaptations: f64,
    /// Misses where the word actually changed
    pub average_swaps: f64,
    pub total_xp: i64,
    pub average_xp: f64,
    pub duration: Duration,
    pub games_per_second: f64,
}

#[derive(Debug, Clone, Copy)]
struct GameStats {
    won: bool,
    wrong: u32,
    adaptations: usize,
    swaps: usize,
    xp: i64,
}

impl GameStats {
    fn from_session(session: &GameSession) -> Self {
        let won = session.outcome() == Outcome::Won;
        let wrong = session.wrong_guess_count();
        Self {
            won,
            wrong,
            adaptations: session.adaptation_count(),
            swaps: session.swap_count(),
            xp: calculate_xp(won, session.mode(), wrong, session.total_guesses()),
        }
    }
}

/// Guess letters in frequency order until the game ends
pub fn play_frequency_order(session: &mut GameSession) {
    for letter in GUESS_ORDER.iter().filter_map(|&b| Letter::from_byte(b).ok()) {
        if session.is_over() {
            break;
        }
        apply_guess(session, letter);
    }
}

fn progress_bar(config: &SimulationConfig) -> ProgressBar {
    if !config.show_progress {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(config.games as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░");
    pb.set_style(style);
    pb.set_message(config.mode.to_string());
    pb
}

fn average(sum: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Play `config.games` games in parallel and aggregate the results
///
/// # Errors
///
/// Returns `GameError::EmptyPool` if the pool has no words.
pub fn run_simulation(
    pool: &[Word],
    config: &SimulationConfig,
) -> Result<SimulationResult, GameError> {
    if pool.is_empty() {
        return Err(GameError::EmptyPool);
    }

    let pb = progress_bar(config);
    let start = Instant::now();

    let stats = (0..config.games)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(i as u64));
            let mut session = initialize_game_with_rng(pool, config.mode, &mut rng)?;
            play_frequency_order(&mut session);
            pb.inc(1);
            Ok(GameStats::from_session(&session))
        })
        .collect::<Result<Vec<_>, GameError>>()?;

    pb.finish_with_message("Complete!");
    let duration = start.elapsed();

    let games = stats.len();
    let wins = stats.iter().filter(|s| s.won).count();
    let total_xp: i64 = stats.iter().map(|s| s.xp).sum();
    let wrong: u32 = stats.iter().map(|s| s.wrong).sum();
    let adaptations: usize = stats.iter().map(|s| s.adaptations).sum();
    let swaps: usize = stats.iter().map(|s| s.swaps).sum();

    let result = SimulationResult {
        mode: config.mode,
        games,
        wins,
        losses: games - wins,
        win_rate: average(wins as f64 * 100.0, games),
        average_wrong: average(f64::from(wrong), games),
        average_adaptations: average(adaptations as f64, games),
        average_swaps: average(swaps as f64, games),
        total_xp,
        average_xp: average(total_xp as f64, games),
        duration,
        games_per_second: games as f64 / duration.as_secs_f64().max(f64::EPSILON),
    };

    info!(
        mode = %result.mode,
        games,
        wins,
        win_rate = result.win_rate,
        "simulation finished"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::WORDS;
    use crate::wordlists::loader::words_from_slice;

    fn config(mode: GameMode, games: usize) -> SimulationConfig {
        SimulationConfig {
            mode,
            games,
            seed: 7,
            show_progress: false,
        }
    }

    #[test]
    fn guess_order_covers_alphabet() {
        let mut letters = GUESS_ORDER.to_vec();
        letters.sort_unstable();
        assert_eq!(letters, (b'A'..=b'Z').collect::<Vec<_>>());
    }

    #[test]
    fn frequency_guesser_always_finishes() {
        let word = Word::new("jazz").unwrap();
        let mut session = GameSession::with_secret(GameMode::Hard, word.clone(), vec![word]);
        play_frequency_order(&mut session);
        assert!(session.is_over());
    }

    #[test]
    fn simulation_counts_every_game() {
        let pool = words_from_slice(&WORDS[..50]);
        let result = run_simulation(&pool, &config(GameMode::Hard, 40)).unwrap();

        assert_eq!(result.games, 40);
        assert_eq!(result.wins + result.losses, 40);
        assert!((0.0..=100.0).contains(&result.win_rate));
        assert!(result.average_wrong <= 6.0);
        assert!(result.average_swaps.abs() < f64::EPSILON);
    }

    #[test]
    fn simulation_is_reproducible() {
        let pool = words_from_slice(&WORDS[..80]);
        let first = run_simulation(&pool, &config(GameMode::Kitten, 30)).unwrap();
        let second = run_simulation(&pool, &config(GameMode::Kitten, 30)).unwrap();

        assert_eq!(first.wins, second.wins);
        assert_eq!(first.total_xp, second.total_xp);
        assert!((first.average_swaps - second.average_swaps).abs() < f64::EPSILON);
    }

    #[test]
    fn kitten_adaptations_match_misses() {
        let pool = words_from_slice(&WORDS[..80]);
        let result = run_simulation(&pool, &config(GameMode::Kitten, 25)).unwrap();

        // Every miss is recorded as an adaptation attempt
        assert!((result.average_adaptations - result.average_wrong).abs() < 1e-9);
        assert!(result.average_swaps <= result.average_adaptations);
    }

    #[test]
    fn empty_pool_is_an_error() {
        assert_eq!(
            run_simulation(&[], &config(GameMode::Hard, 5)).unwrap_err(),
            GameError::EmptyPool
        );
    }

    #[test]
    fn zero_games_has_no_nan() {
        let pool = words_from_slice(&WORDS[..5]);
        let result = run_simulation(&pool, &config(GameMode::Impossible, 0)).unwrap();
        assert_eq!(result.games, 0);
        assert!(result.win_rate.abs() < f64::EPSILON);
        assert!(result.average_xp.abs() < f64::EPSILON);
    }
}
