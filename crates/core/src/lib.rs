//! Round engine - pure, deterministic, and testable
//!
//! This crate holds the rules of a word-scramble round. It has **no
//! dependencies** on networking, async runtimes or the terminal:
//!
//! - **Deterministic**: time is passed in, never read, so a round replays exactly
//! - **Testable**: collaborators are plain traits, trivially faked
//! - **Portable**: the session runtime and any UI sit on top
//!
//! # Module Structure
//!
//! - [`round`]: the `Idle -> Active -> {Solved, Exhausted}` state machine
//! - [`scoring`]: word score, time bonus tiers and hint penalties
//! - [`collaborator`]: contracts for the remote scramble service
//! - [`feedback`]: typed position code and similarity from the checker
//! - [`error`]: every way a round operation can fail
//! - [`snapshot`]: read-only view for rendering
//!
//! # Rules
//!
//! - The player picks a word length from 3 to 6 and gets 8 guesses.
//! - A guess of the wrong length is rejected and does not use a turn.
//! - Each of the three hints can be bought once per round (1, 2 and 4 points).
//! - Solving scores `letters * 3 + time bonus - hints`; running out of guesses scores nothing.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use word_scramble_core::{CheckVerdict, PositionFeedback, Round, Similarity};
//! use word_scramble_core::types::RoundPhase;
//!
//! let t0 = Instant::now();
//! let mut round = Round::new();
//! round.start(4, "alice", "stac".to_string(), t0).unwrap();
//!
//! let verdict = CheckVerdict {
//!     correct: true,
//!     feedback: PositionFeedback::parse("****").unwrap(),
//!     similarity: Similarity::new(100.0),
//! };
//! round.apply_verdict("cats", verdict, t0 + Duration::from_secs(4)).unwrap();
//!
//! assert_eq!(round.phase(), RoundPhase::Solved);
//! assert_eq!(round.outcome_score(), Some(27));
//! ```

pub mod collaborator;
pub mod error;
pub mod feedback;
pub mod round;
pub mod scoring;
pub mod snapshot;

pub use word_scramble_types as types;

// Re-export commonly used types for convenience
pub use collaborator::{
    hint_endpoint, AccuracyService, Backend, Checker, CollaboratorError, HealthCheck, HintSource,
    Leaderboard, SessionControl, SolutionSource, WordSource,
};
pub use error::{InvalidInput, RoundError};
pub use feedback::{CheckVerdict, PositionFeedback, PositionMark, Similarity};
pub use round::{GuessReport, Round, RoundOutcome};
pub use scoring::{calculate_score, compute_score, ScoreResult};
pub use snapshot::RoundSnapshot;
