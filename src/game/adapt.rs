//! Adaptive word selection for kitten mode
//!
//! After a miss, the selector narrows the candidate pool to words that agree
//! with every revealed letter and avoid every wrong letter, then swaps the
//! secret word for the candidate that leaves the player the most work.
//!
//! # Algorithm
//! 1. Build a constraint pattern from the revealed positions of the current word
//! 2. Filter the pool: same length, no wrong letters, matches the pattern
//! 3. Score each candidate over its distinct unguessed letters:
//!    +1 for a common letter (`ETAOINSHRDLU`), +3 for anything else
//! 4. Pick the best score, preferring a different word on ties
//! 5. Replace the pool with the full filtered set

use super::GameSession;
use crate::core::{Letter, Word};
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

/// Points for an unguessed letter in the common set
const COMMON_LETTER_SCORE: u32 = 1;

/// Points for an unguessed letter outside the common set
const UNCOMMON_LETTER_SCORE: u32 = 3;

/// Why an adaptation left the session untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No word in the pool satisfies the constraints
    NoCandidates,
    /// The active secret itself violates the constraints
    SecretExcluded,
}

/// Result of one adaptation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adaptation {
    /// The secret word was replaced
    Swapped {
        from: Word,
        to: Word,
        pool_size: usize,
    },
    /// The pool was narrowed but the current word scored best
    Kept { pool_size: usize },
    /// Nothing changed
    Skipped(SkipReason),
}

impl Adaptation {
    /// Whether the secret word changed
    #[must_use]
    pub const fn swapped(&self) -> bool {
        matches!(self, Self::Swapped { .. })
    }
}

/// Letters that must appear at each position, `None` where unconstrained
#[must_use]
pub fn constraint_pattern(secret: &Word, revealed: &BTreeSet<usize>) -> Vec<Option<Letter>> {
    (0..secret.len())
        .map(|i| {
            if revealed.contains(&i) {
                secret.letter_at(i)
            } else {
                None
            }
        })
        .collect()
}

/// Check a candidate against the length, wrong-letter and pattern constraints
#[must_use]
pub fn satisfies_constraints(
    candidate: &Word,
    pattern: &[Option<Letter>],
    wrong_letters: &BTreeSet<Letter>,
) -> bool {
    if candidate.len() != pattern.len() {
        return false;
    }

    if wrong_letters.iter().any(|&l| candidate.contains(l)) {
        return false;
    }

    pattern
        .iter()
        .enumerate()
        .all(|(i, required)| required.is_none_or(|l| candidate.letter_at(i) == Some(l)))
}

/// Filter the pool to candidates consistent with the session so far
///
/// Pool order is preserved.
#[must_use]
pub fn filter_candidates<'a>(
    pool: &'a [Word],
    secret: &Word,
    revealed: &BTreeSet<usize>,
    wrong_letters: &BTreeSet<Letter>,
) -> Vec<&'a Word> {
    let pattern = constraint_pattern(secret, revealed);

    pool.par_iter()
        .filter(|candidate| satisfies_constraints(candidate, &pattern, wrong_letters))
        .collect()
}

/// Difficulty score of a candidate given the letters already guessed
///
/// # Examples
/// ```
/// use kitten_hangman::core::{Letter, Word};
/// use kitten_hangman::game::adapt::difficulty_score;
/// use std::collections::BTreeSet;
///
/// let guessed: BTreeSet<Letter> = [Letter::new('c').unwrap()].into();
///
/// // A and T are common (+1 each); C is already guessed
/// assert_eq!(difficulty_score(&Word::new("cat").unwrap(), &guessed), 2);
/// // Z and Q are uncommon (+3 each)
/// assert_eq!(difficulty_score(&Word::new("zaq").unwrap(), &guessed), 7);
/// ```
#[must_use]
pub fn difficulty_score(candidate: &Word, guessed: &BTreeSet<Letter>) -> u32 {
    candidate
        .distinct_letters()
        .into_iter()
        .filter(|letter| !guessed.contains(letter))
        .map(|letter| {
            if letter.is_common() {
                COMMON_LETTER_SCORE
            } else {
                UNCOMMON_LETTER_SCORE
            }
        })
        .sum()
}

/// Pick the hardest candidate
///
/// Among the top-scoring candidates the first one (in pool order) that differs
/// from `current` wins. If every top candidate equals `current`, it is kept.
/// Returns `None` only for an empty candidate list.
#[must_use]
pub fn select_candidate<'a>(
    candidates: &[&'a Word],
    current: &Word,
    guessed: &BTreeSet<Letter>,
) -> Option<&'a Word> {
    let scored: Vec<(&Word, u32)> = candidates
        .par_iter()
        .map(|&candidate| (candidate, difficulty_score(candidate, guessed)))
        .collect();

    let best_score = scored.iter().map(|&(_, score)| score).max()?;
    let mut top = scored
        .iter()
        .filter(|&&(_, score)| score == best_score)
        .map(|&(word, _)| word);

    let first = top.clone().next()?;
    Some(top.find(|word| *word != current).unwrap_or(first))
}

/// Run one adaptation step on a session after a miss
///
/// On success the secret word is replaced by the selected candidate and the
/// pool by the full filtered set, so the pool only ever shrinks.
pub fn adapt(session: &mut GameSession) -> Adaptation {
    let pattern = constraint_pattern(&session.secret_word, &session.revealed_positions);
    if !satisfies_constraints(&session.secret_word, &pattern, &session.wrong_letters) {
        debug!(secret = %session.secret_word, "secret violates constraints, skipping adaptation");
        return Adaptation::Skipped(SkipReason::SecretExcluded);
    }

    let candidates: Vec<Word> = filter_candidates(
        &session.pool,
        &session.secret_word,
        &session.revealed_positions,
        &session.wrong_letters,
    )
    .into_iter()
    .cloned()
    .collect();

    let candidate_refs: Vec<&Word> = candidates.iter().collect();
    let Some(chosen) =
        select_candidate(&candidate_refs, &session.secret_word, &session.guessed_letters).cloned()
    else {
        debug!("no consistent candidates, skipping adaptation");
        return Adaptation::Skipped(SkipReason::NoCandidates);
    };

    let pool_size = candidates.len();
    let previous = std::mem::replace(&mut session.secret_word, chosen);
    session.pool = candidates;

    if previous == session.secret_word {
        debug!(pool_size, secret = %session.secret_word, "kept secret word");
        Adaptation::Kept { pool_size }
    } else {
        debug!(pool_size, from = %previous, to = %session.secret_word, "swapped secret word");
        Adaptation::Swapped {
            from: previous,
            to: session.secret_word.clone(),
            pool_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameMode;

    fn letter(ch: char) -> Letter {
        Letter::new(ch).unwrap()
    }

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(*w).unwrap()).collect()
    }

    fn letters(s: &str) -> BTreeSet<Letter> {
        s.chars().map(letter).collect()
    }

    fn kitten_session(secret: &str, pool: &[&str]) -> GameSession {
        GameSession::with_secret(GameMode::Kitten, Word::new(secret).unwrap(), words(pool))
    }

    #[test]
    fn constraint_pattern_uses_revealed_positions() {
        let secret = Word::new("cat").unwrap();
        let revealed: BTreeSet<usize> = [0, 2].into();

        assert_eq!(
            constraint_pattern(&secret, &revealed),
            vec![Some(letter('C')), None, Some(letter('T'))]
        );
    }

    #[test]
    fn filter_matches_spec_example() {
        let pool = words(&["cat", "car", "cot"]);
        let secret = Word::new("cat").unwrap();
        let revealed: BTreeSet<usize> = [0].into();
        let wrong = letters("B");

        // COT passes every filter too: it has C at 0, no B, length 3
        let candidates = filter_candidates(&pool, &secret, &revealed, &wrong);
        let texts: Vec<&str> = candidates.iter().map(|w| w.text()).collect();
        assert_eq!(texts, vec!["CAT", "CAR", "COT"]);
    }

    #[test]
    fn filter_excludes_wrong_letters_and_lengths() {
        let pool = words(&["cat", "cab", "cart", "cut", "dog"]);
        let secret = Word::new("cat").unwrap();
        let revealed: BTreeSet<usize> = [0].into();
        let wrong = letters("B");

        let candidates = filter_candidates(&pool, &secret, &revealed, &wrong);
        let texts: Vec<&str> = candidates.iter().map(|w| w.text()).collect();
        assert_eq!(texts, vec!["CAT", "CUT"]);
    }

    #[test]
    fn score_counts_unguessed_distinct_letters() {
        let guessed = letters("CB");
        // A(1) + T(1)
        assert_eq!(difficulty_score(&Word::new("cat").unwrap(), &guessed), 2);
        // A(1) + R(1)
        assert_eq!(difficulty_score(&Word::new("car").unwrap(), &guessed), 2);
        // J(3) + A(1) + Z(3), repeated Z counted once
        assert_eq!(difficulty_score(&Word::new("jazz").unwrap(), &guessed), 7);
        // everything guessed
        assert_eq!(difficulty_score(&Word::new("cb").unwrap(), &guessed), 0);
    }

    #[test]
    fn select_prefers_different_word_on_tie() {
        let pool = words(&["cat", "car"]);
        let refs: Vec<&Word> = pool.iter().collect();
        let current = Word::new("cat").unwrap();

        let chosen = select_candidate(&refs, &current, &letters("CB")).unwrap();
        assert_eq!(chosen.text(), "CAR");
    }

    #[test]
    fn select_keeps_current_when_it_scores_best() {
        let pool = words(&["jazz", "cat"]);
        let refs: Vec<&Word> = pool.iter().collect();
        let current = Word::new("jazz").unwrap();

        let chosen = select_candidate(&refs, &current, &BTreeSet::new()).unwrap();
        assert_eq!(chosen.text(), "JAZZ");
    }

    #[test]
    fn select_takes_higher_score_over_current() {
        let pool = words(&["cat", "cox"]);
        let refs: Vec<&Word> = pool.iter().collect();
        let current = Word::new("cat").unwrap();

        // COX: O(1) + X(3) beats CAT: A(1) + T(1)
        let chosen = select_candidate(&refs, &current, &letters("C")).unwrap();
        assert_eq!(chosen.text(), "COX");
    }

    #[test]
    fn select_first_different_in_pool_order() {
        let pool = words(&["cat", "car", "can"]);
        let refs: Vec<&Word> = pool.iter().collect();
        let current = Word::new("cat").unwrap();

        let chosen = select_candidate(&refs, &current, &letters("C")).unwrap();
        assert_eq!(chosen.text(), "CAR");
    }

    #[test]
    fn select_empty_returns_none() {
        let current = Word::new("cat").unwrap();
        assert!(select_candidate(&[], &current, &BTreeSet::new()).is_none());
    }

    #[test]
    fn adapt_swaps_and_narrows_pool() {
        let mut session = kitten_session("cat", &["cat", "car", "cot", "dog"]);
        session.guessed_letters = letters("CB");
        session.wrong_letters = letters("B");
        session.revealed_positions.insert(0);

        let adaptation = adapt(&mut session);

        assert!(adaptation.swapped());
        // CAR ties with CAT (2 points); COT also scores 2 but comes later
        assert_eq!(session.secret_word().text(), "CAR");
        let pool: Vec<&str> = session.pool().iter().map(Word::text).collect();
        assert_eq!(pool, vec!["CAT", "CAR", "COT"]);
    }

    #[test]
    fn adapt_preserves_revealed_letters() {
        let mut session = kitten_session("kitten", &["kitten", "mitten", "bitten", "kitted"]);
        session.guessed_letters = letters("TM");
        session.wrong_letters = letters("M");
        session.revealed_positions.extend([2, 3]);

        adapt(&mut session);

        let secret = session.secret_word();
        assert_eq!(secret.len(), 6);
        assert_eq!(secret.letter_at(2), Some(letter('T')));
        assert_eq!(secret.letter_at(3), Some(letter('T')));
        assert!(!secret.contains(letter('M')));
    }

    #[test]
    fn adapt_skips_when_secret_excluded() {
        let mut session = kitten_session("cat", &["cat", "car"]);
        session.wrong_letters = letters("A");

        assert_eq!(
            adapt(&mut session),
            Adaptation::Skipped(SkipReason::SecretExcluded)
        );
        assert_eq!(session.secret_word().text(), "CAT");
        assert_eq!(session.pool().len(), 2);
    }

    #[test]
    fn adapt_kept_when_alone() {
        let mut session = kitten_session("cat", &["cat", "dog"]);
        session.guessed_letters = letters("D");
        session.wrong_letters = letters("D");

        assert_eq!(adapt(&mut session), Adaptation::Kept { pool_size: 1 });
        assert_eq!(session.secret_word().text(), "CAT");
        assert_eq!(session.pool().len(), 1);
    }
}
