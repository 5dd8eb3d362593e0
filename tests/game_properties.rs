//! Property tests for the game state machine and the kitten selector

use kitten_hangman::core::{GameMode, Letter, Word};
use kitten_hangman::game::{
    GameSession, GuessEvent, Outcome, apply_guess_str, calculate_xp, reward::loss_penalty,
};
use kitten_hangman::wordlists::{WORDS, loader::words_from_slice};
use proptest::prelude::*;
use proptest::sample::{Index, subsequence};
use std::collections::BTreeSet;

fn mode_strategy() -> impl Strategy<Value = GameMode> {
    prop::sample::select(GameMode::ALL.to_vec())
}

fn pool_strategy() -> impl Strategy<Value = Vec<Word>> {
    subsequence(WORDS.to_vec(), 1..60).prop_map(|words| words_from_slice(&words))
}

fn guesses_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            8 => prop::char::range('a', 'z').prop_map(String::from),
            1 => Just("1".to_string()),
            1 => Just("ab".to_string()),
        ],
        0..40,
    )
}

fn new_session(mode: GameMode, pool: Vec<Word>, index: Index) -> GameSession {
    let secret = pool[index.index(pool.len())].clone();
    GameSession::with_secret(mode, secret, pool)
}

proptest! {
    #[test]
    fn guess_sequence_invariants(
        mode in mode_strategy(),
        pool in pool_strategy(),
        index in any::<Index>(),
        guesses in guesses_strategy(),
    ) {
        let mut session = new_session(mode, pool, index);
        let mut valid_guesses = 0;

        for guess in &guesses {
            let before_revealed = session.revealed_positions().clone();
            let before_guessed = session.guessed_letters().clone();
            let before_secret = session.secret_word().clone();
            let before_outcome = session.outcome();

            let result = apply_guess_str(&mut session, guess);

            // Revealed positions and guessed letters only grow
            prop_assert!(session.revealed_positions().is_superset(&before_revealed));
            prop_assert!(session.guessed_letters().is_superset(&before_guessed));

            // The secret keeps its length and every revealed letter
            prop_assert_eq!(session.secret_word().len(), before_secret.len());
            for &i in &before_revealed {
                prop_assert_eq!(session.secret_word().letter_at(i), before_secret.letter_at(i));
            }

            // Only kitten mode may change the word
            if !mode.is_adaptive() {
                prop_assert_eq!(session.secret_word(), &before_secret);
            }

            if result.event.is_invalid() {
                prop_assert_eq!(session.guessed_letters(), &before_guessed);
                prop_assert_eq!(session.outcome(), before_outcome);
            } else {
                valid_guesses += 1;
                prop_assert!(!before_outcome.is_terminal());
            }

            // A terminal outcome never changes
            if before_outcome.is_terminal() {
                prop_assert_eq!(session.outcome(), before_outcome);
            }

            // Outcome matches the counters
            let all_revealed = session.revealed_positions().len() == session.secret_word().len();
            let out_of_guesses = session.wrong_guess_count() == session.max_wrong_guesses();
            match session.outcome() {
                Outcome::Won => prop_assert!(all_revealed && !out_of_guesses),
                Outcome::Lost => prop_assert!(out_of_guesses && !all_revealed),
                Outcome::InProgress => prop_assert!(!all_revealed && !out_of_guesses),
            }

            prop_assert!(session.wrong_guess_count() <= session.max_wrong_guesses());
            prop_assert_eq!(session.wrong_guess_count() as usize, session.wrong_letters().len());
            prop_assert!(session.wrong_letters().is_subset(session.guessed_letters()));
        }

        // One history entry per accepted guess, plus the initial one
        prop_assert_eq!(session.history().len(), valid_guesses + 1);
        prop_assert_eq!(session.total_guesses() as usize, valid_guesses);
        prop_assert_eq!(session.adaptation_count(), session.wrong_guess_count() as usize);
    }

    #[test]
    fn secret_never_contains_a_wrong_letter(
        mode in mode_strategy(),
        pool in pool_strategy(),
        index in any::<Index>(),
        guesses in guesses_strategy(),
    ) {
        let mut session = new_session(mode, pool, index);
        for guess in &guesses {
            apply_guess_str(&mut session, guess);
            for &letter in session.wrong_letters() {
                prop_assert!(!session.secret_word().contains(letter));
            }
        }
    }

    #[test]
    fn revealed_positions_hold_guessed_letters(
        pool in pool_strategy(),
        index in any::<Index>(),
        guesses in guesses_strategy(),
    ) {
        let mut session = new_session(GameMode::Kitten, pool, index);
        for guess in &guesses {
            apply_guess_str(&mut session, guess);
        }

        let guessed: &BTreeSet<Letter> = session.guessed_letters();
        for &i in session.revealed_positions() {
            let letter = session.secret_word().letter_at(i);
            prop_assert!(letter.is_some_and(|l| guessed.contains(&l)));
        }
    }

    #[test]
    fn kitten_pool_only_shrinks(
        pool in pool_strategy(),
        index in any::<Index>(),
        guesses in guesses_strategy(),
    ) {
        let mut session = new_session(GameMode::Kitten, pool, index);
        for guess in &guesses {
            let before = session.pool().len();
            let result = apply_guess_str(&mut session, guess);
            prop_assert!(session.pool().len() <= before);
            prop_assert!(session.pool().contains(session.secret_word()));
            if result.event == GuessEvent::Adapted {
                prop_assert!(session.history().last().is_some_and(|h| h.previous_word.is_some()));
            }
        }
    }

    #[test]
    fn xp_sign_follows_outcome(
        mode in mode_strategy(),
        wrong in 0u32..6,
        extra in 1u32..20,
    ) {
        let total = wrong + extra;
        prop_assert!(calculate_xp(true, mode, wrong, total) > 0);
        prop_assert_eq!(calculate_xp(false, mode, wrong, total), loss_penalty(mode));
        prop_assert!(loss_penalty(mode) < 0);
    }
}
