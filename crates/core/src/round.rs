//! Round module - the lifecycle of a single scrambled word
//!
//! `Idle -> Active -> {Solved, Exhausted}`.
//!
//! The round never reads a clock itself; every time-dependent operation takes
//! `now` so the same inputs always replay the same round. Collaborator answers
//! are fetched before any field is touched, so a failed call leaves the round
//! exactly as it was.

use std::time::Instant;

use crate::collaborator::{Checker, CollaboratorError, HintSource, WordSource};
use crate::error::{InvalidInput, RoundError};
use crate::feedback::{CheckVerdict, PositionFeedback, Similarity};
use crate::scoring::{calculate_score, ScoreResult};
use crate::snapshot::RoundSnapshot;
use crate::types::{HintKind, HintSet, RoundPhase, MAX_GUESSES, MAX_LETTERS, MIN_LETTERS};

/// Result of one accepted (length-valid) guess.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessReport {
    pub guess: String,
    /// 1-based number of this guess within the round.
    pub guess_number: u8,
    pub correct: bool,
    pub feedback: PositionFeedback,
    pub similarity: Similarity,
    /// Phase after the guess was applied.
    pub phase: RoundPhase,
    /// Set only when this guess solved the round.
    pub score: Option<ScoreResult>,
}

/// Final state of a finished round, handed out once via [`Round::take_outcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub identity: String,
    pub scrambled: String,
    pub letters: u8,
    pub solved: bool,
    pub guess_count: u8,
    pub elapsed_seconds: u64,
    pub hints: HintSet,
    /// `None` for an exhausted round (distinct from a zero score).
    pub score: Option<ScoreResult>,
}

/// A single round of play.
#[derive(Debug, Clone, Default)]
pub struct Round {
    phase: RoundPhase,
    identity: String,
    scrambled: String,
    letters: u8,
    guess_count: u8,
    start_time: Option<Instant>,
    elapsed_seconds: u64,
    hints: HintSet,
    score: Option<ScoreResult>,
    /// Filled on the terminal transition, emptied by the first reader.
    outcome: Option<RoundOutcome>,
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn scrambled(&self) -> &str {
        &self.scrambled
    }

    pub fn letters(&self) -> u8 {
        self.letters
    }

    pub fn guess_count(&self) -> u8 {
        self.guess_count
    }

    pub fn guesses_left(&self) -> u8 {
        MAX_GUESSES - self.guess_count
    }

    pub fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn hints(&self) -> HintSet {
        self.hints
    }

    /// Score of a solved round; `None` while playing and for exhausted rounds.
    pub fn outcome_score(&self) -> Option<i32> {
        self.score.map(|s| s.total)
    }

    pub fn score_breakdown(&self) -> Option<ScoreResult> {
        self.score
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            letters: self.letters,
            scrambled: self.scrambled.clone(),
            guess_count: self.guess_count,
            guesses_left: self.guesses_left(),
            elapsed_seconds: self.elapsed_seconds,
            hints: self.hints,
            score: self.outcome_score(),
        }
    }

    /// Check `start` arguments without touching any state.
    pub fn validate_start(letters: u8, identity: &str) -> Result<(), RoundError> {
        if identity.trim().is_empty() {
            return Err(InvalidInput::EmptyIdentity.into());
        }
        if !(MIN_LETTERS..=MAX_LETTERS).contains(&letters) {
            return Err(InvalidInput::LetterCount(letters).into());
        }
        Ok(())
    }

    /// Move `Idle -> Active` with an already fetched scrambled word.
    pub fn start(
        &mut self,
        letters: u8,
        identity: &str,
        scrambled: String,
        now: Instant,
    ) -> Result<(), RoundError> {
        self.require(RoundPhase::Idle, "start")?;
        Self::validate_start(letters, identity)?;

        let got = scrambled.chars().count();
        if got != letters as usize {
            return Err(CollaboratorError::malformed(
                "word source",
                format!("asked for {letters} letters, got {got}"),
            )
            .into());
        }

        self.identity = identity.trim().to_string();
        self.scrambled = scrambled;
        self.letters = letters;
        self.guess_count = 0;
        self.hints = HintSet::empty();
        self.start_time = Some(now);
        self.elapsed_seconds = 0;
        self.score = None;
        self.outcome = None;
        self.phase = RoundPhase::Active;
        Ok(())
    }

    /// Validate, fetch the scrambled word from `source`, then start.
    pub fn begin<W>(
        &mut self,
        letters: u8,
        identity: &str,
        source: &W,
        now: Instant,
    ) -> Result<(), RoundError>
    where
        W: WordSource + ?Sized,
    {
        self.require(RoundPhase::Idle, "start")?;
        Self::validate_start(letters, identity)?;
        let scrambled = source.get_word(letters)?;
        self.start(letters, identity, scrambled, now)
    }

    /// Everything `submit_guess` checks before a turn is consumed.
    ///
    /// Length is checked before the guess counter moves, so malformed guesses
    /// never use up the budget.
    pub fn check_guess(&self, word: &str) -> Result<(), RoundError> {
        self.require(RoundPhase::Active, "submit_guess")?;
        let actual = word.chars().count();
        if actual != self.letters as usize {
            return Err(RoundError::LengthMismatch {
                expected: self.letters,
                actual,
            });
        }
        Ok(())
    }

    /// Consume a turn with the checker's verdict for `word`.
    pub fn apply_verdict(
        &mut self,
        word: &str,
        verdict: CheckVerdict,
        now: Instant,
    ) -> Result<GuessReport, RoundError> {
        self.check_guess(word)?;

        self.guess_count += 1;
        self.refresh_elapsed(now);

        if verdict.correct {
            let score = calculate_score(self.letters, self.elapsed_seconds, self.hints);
            self.score = Some(score);
            self.finish(RoundPhase::Solved);
        } else if self.guess_count >= MAX_GUESSES {
            self.finish(RoundPhase::Exhausted);
        }

        Ok(GuessReport {
            guess: word.to_string(),
            guess_number: self.guess_count,
            correct: verdict.correct,
            feedback: verdict.feedback,
            similarity: verdict.similarity,
            phase: self.phase,
            score: self.score,
        })
    }

    /// Validate, ask `checker`, then apply its verdict.
    pub fn submit_guess<C>(
        &mut self,
        word: &str,
        checker: &C,
        now: Instant,
    ) -> Result<GuessReport, RoundError>
    where
        C: Checker + ?Sized,
    {
        self.check_guess(word)?;
        let verdict = checker.check_word(word)?;
        self.apply_verdict(word, verdict, now)
    }

    /// Everything `use_hint` checks before the hint service is asked.
    pub fn check_hint(&self, kind: HintKind) -> Result<(), RoundError> {
        self.require(RoundPhase::Active, "use_hint")?;
        if self.hints.contains(kind) {
            return Err(RoundError::HintAlreadyUsed(kind));
        }
        Ok(())
    }

    /// Mark `kind` as used once its content has been received.
    pub fn record_hint(&mut self, kind: HintKind) -> Result<(), RoundError> {
        self.check_hint(kind)?;
        self.hints.insert(kind);
        Ok(())
    }

    /// Validate, fetch the hint from `source`, then mark it used.
    pub fn use_hint<H>(&mut self, kind: HintKind, source: &H) -> Result<String, RoundError>
    where
        H: HintSource + ?Sized,
    {
        self.check_hint(kind)?;
        let content = source.get_hint(kind)?;
        self.record_hint(kind)?;
        Ok(content)
    }

    /// Recompute the elapsed seconds. Never changes the phase.
    pub fn tick(&mut self, now: Instant) -> Result<u64, RoundError> {
        self.require(RoundPhase::Active, "tick")?;
        self.refresh_elapsed(now);
        Ok(self.elapsed_seconds)
    }

    /// Hand out the finished round's outcome. Returns `Some` at most once.
    pub fn take_outcome(&mut self) -> Option<RoundOutcome> {
        self.outcome.take()
    }

    fn refresh_elapsed(&mut self, now: Instant) {
        let Some(start) = self.start_time else {
            return;
        };
        let elapsed = now.saturating_duration_since(start).as_secs();
        self.elapsed_seconds = self.elapsed_seconds.max(elapsed);
    }

    fn finish(&mut self, phase: RoundPhase) {
        debug_assert!(phase.is_terminal());
        self.phase = phase;
        self.outcome = Some(RoundOutcome {
            identity: self.identity.clone(),
            scrambled: self.scrambled.clone(),
            letters: self.letters,
            solved: phase == RoundPhase::Solved,
            guess_count: self.guess_count,
            elapsed_seconds: self.elapsed_seconds,
            hints: self.hints,
            score: self.score,
        });
    }

    fn require(&self, phase: RoundPhase, operation: &'static str) -> Result<(), RoundError> {
        if self.phase != phase {
            return Err(RoundError::IllegalTransition {
                operation,
                phase: self.phase,
            });
        }
        Ok(())
    }
}
