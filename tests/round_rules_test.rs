//! Round rules driven through the collaborator contracts (no runtime).

use std::time::{Duration, Instant};

use word_scramble::core::{compute_score, Round, RoundError};
use word_scramble::engine::MemoryBackend;
use word_scramble::types::{HintKind, HintSet, RoundPhase, MAX_GUESSES};

fn started(target: &str) -> (Round, MemoryBackend, Instant) {
    let backend = MemoryBackend::new(target);
    let t0 = Instant::now();
    let mut round = Round::new();
    round
        .begin(target.len() as u8, "alice", &backend, t0)
        .unwrap();
    (round, backend, t0)
}

#[test]
fn test_fast_solve_scores_full_bonus() {
    let (mut round, backend, t0) = started("cats");
    assert_eq!(round.scrambled(), "atsc");
    assert_eq!(round.phase(), RoundPhase::Active);

    let report = round
        .submit_guess("cats", &backend, t0 + Duration::from_secs(3))
        .unwrap();
    assert!(report.correct);
    assert_eq!(report.phase, RoundPhase::Solved);
    assert_eq!(round.outcome_score(), Some(27));
}

#[test]
fn test_hints_reduce_score() {
    let (mut round, backend, t0) = started("cats");
    assert_eq!(round.use_hint(HintKind::Speech, &backend).unwrap(), "noun");
    assert_eq!(round.use_hint(HintKind::Letter, &backend).unwrap(), "c");

    round
        .submit_guess("cats", &backend, t0 + Duration::from_secs(7))
        .unwrap();
    // 12 + 10 - 3
    assert_eq!(round.outcome_score(), Some(19));
}

#[test]
fn test_repeat_hint_rejected_without_service_call() {
    let (mut round, backend, _) = started("cats");
    round.use_hint(HintKind::Definition, &backend).unwrap();
    let err = round.use_hint(HintKind::Definition, &backend).unwrap_err();
    assert_eq!(err, RoundError::HintAlreadyUsed(HintKind::Definition));
    assert_eq!(backend.call_count("/hint-3"), 1);
}

#[test]
fn test_eight_misses_exhaust_without_score() {
    let (mut round, backend, t0) = started("cats");
    for n in 1..=MAX_GUESSES {
        let report = round.submit_guess("tacs", &backend, t0).unwrap();
        assert_eq!(report.guess_number, n);
    }
    assert_eq!(round.phase(), RoundPhase::Exhausted);
    assert_eq!(round.outcome_score(), None);

    let outcome = round.take_outcome().unwrap();
    assert!(!outcome.solved);
    assert_eq!(outcome.guess_count, MAX_GUESSES);
    assert!(round.take_outcome().is_none());
}

#[test]
fn test_wrong_length_guess_costs_nothing() {
    let (mut round, backend, t0) = started("cats");
    let err = round.submit_guess("cat", &backend, t0).unwrap_err();
    assert_eq!(
        err,
        RoundError::LengthMismatch {
            expected: 4,
            actual: 3
        }
    );
    assert_eq!(round.guess_count(), 0);
    assert_eq!(backend.call_count("/check-word"), 0);
}

#[test]
fn test_unavailable_checker_leaves_round_unchanged() {
    let (mut round, backend, t0) = started("cats");
    backend.set_down(true);
    let before = round.snapshot();

    let err = round.submit_guess("cats", &backend, t0).unwrap_err();
    assert!(matches!(err, RoundError::CollaboratorUnavailable(_)));
    assert_eq!(round.snapshot(), before);

    backend.set_down(false);
    assert!(round.submit_guess("cats", &backend, t0).unwrap().correct);
}

#[test]
fn test_guess_after_end_is_illegal() {
    let (mut round, backend, t0) = started("cats");
    round.submit_guess("cats", &backend, t0).unwrap();
    let err = round.submit_guess("cats", &backend, t0).unwrap_err();
    assert!(matches!(
        err,
        RoundError::IllegalTransition {
            phase: RoundPhase::Solved,
            ..
        }
    ));
}

#[test]
fn test_late_solve_with_every_hint() {
    let hints: HintSet = HintKind::ALL.into_iter().collect();
    assert_eq!(compute_score(3, 60, hints), 2);

    let (mut round, backend, t0) = started("cat");
    for kind in HintKind::ALL {
        round.use_hint(kind, &backend).unwrap();
    }
    round
        .submit_guess("cat", &backend, t0 + Duration::from_secs(20))
        .unwrap();
    assert_eq!(round.outcome_score(), Some(9 - 7));
}
