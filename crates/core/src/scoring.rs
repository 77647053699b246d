//! Scoring module - converts a solved round into points
//!
//! `score = letters * 3 + time bonus - hint penalty`
//!
//! Notes:
//! - Time tiers are half-open: 5, 10 and 15 seconds land in the next lower tier.
//! - The total is never clamped. Heavy hint use on a slow solve may go to zero
//!   or below and that value is reported as-is.
//! - Exhausted rounds have no score at all; that is `None` at the round level,
//!   never `0` here.

use crate::types::{HintSet, POINTS_PER_LETTER, TIME_BONUS_TIERS};

/// Breakdown of a solved round's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub word_score: i32,
    pub time_bonus: i32,
    /// Points deducted for hints (non-negative).
    pub hint_penalty: i32,
    pub total: i32,
}

/// Points for the word itself.
pub fn word_score(letters: u8) -> i32 {
    i32::from(letters) * POINTS_PER_LETTER
}

/// Bonus for solving quickly.
pub fn time_bonus(elapsed_seconds: u64) -> i32 {
    TIME_BONUS_TIERS
        .iter()
        .find(|&&(upper, _)| elapsed_seconds < upper)
        .map(|&(_, bonus)| bonus)
        .unwrap_or(0)
}

/// Full breakdown for a solve.
pub fn calculate_score(letters: u8, elapsed_seconds: u64, hints: HintSet) -> ScoreResult {
    let word_score = word_score(letters);
    let time_bonus = time_bonus(elapsed_seconds);
    let hint_penalty = hints.penalty();

    ScoreResult {
        word_score,
        time_bonus,
        hint_penalty,
        total: word_score + time_bonus - hint_penalty,
    }
}

/// Final point total for a solve.
pub fn compute_score(letters: u8, elapsed_seconds: u64, hints: HintSet) -> i32 {
    calculate_score(letters, elapsed_seconds, hints).total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HintKind;

    fn hints(kinds: &[HintKind]) -> HintSet {
        kinds.iter().copied().collect()
    }

    #[test]
    fn test_word_scores() {
        assert_eq!(word_score(3), 9);
        assert_eq!(word_score(4), 12);
        assert_eq!(word_score(5), 15);
        assert_eq!(word_score(6), 18);
    }

    #[test]
    fn test_time_bonus_tiers() {
        assert_eq!(time_bonus(0), 15);
        assert_eq!(time_bonus(4), 15);
        assert_eq!(time_bonus(5), 10);
        assert_eq!(time_bonus(9), 10);
        assert_eq!(time_bonus(10), 5);
        assert_eq!(time_bonus(14), 5);
        assert_eq!(time_bonus(15), 0);
        assert_eq!(time_bonus(3600), 0);
    }

    #[test]
    fn test_reference_scores() {
        assert_eq!(compute_score(4, 3, HintSet::empty()), 27);
        assert_eq!(compute_score(5, 7, hints(&[HintKind::Letter])), 23);
        assert_eq!(compute_score(6, 16, HintSet::all()), 11);
    }

    #[test]
    fn test_exact_five_seconds_is_not_top_tier() {
        for letters in 3..=6 {
            let result = calculate_score(letters, 5, HintSet::empty());
            assert_eq!(result.time_bonus, 10);
        }
    }

    #[test]
    fn test_breakdown() {
        let result = calculate_score(3, 20, HintSet::all());
        assert_eq!(result.word_score, 9);
        assert_eq!(result.time_bonus, 0);
        assert_eq!(result.hint_penalty, 7);
        assert_eq!(result.total, 2);
    }

    #[test]
    fn test_total_is_not_clamped() {
        // Not reachable with 3..=6 letters, but the formula must not floor at 0.
        assert_eq!(compute_score(2, 30, HintSet::all()), -1);
        assert_eq!(compute_score(0, 30, hints(&[HintKind::Definition])), -4);
    }
}
