//! Contracts the round engine needs from the scramble service.
//!
//! Every call is blocking from the caller's point of view and either returns a
//! typed answer or a [`CollaboratorError`]. Implementations must not retry on
//! their own; the caller decides whether to try again.

use thiserror::Error;

use crate::feedback::CheckVerdict;
use crate::types::{Accuracy, HintKind, LeaderboardEntry};

/// Failure talking to an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// Transport failure: refused connection, timeout, DNS, ...
    #[error("{endpoint} unreachable: {message}")]
    Unreachable { endpoint: String, message: String },

    /// The service answered with a non-success status.
    #[error("{endpoint} answered with status {status}")]
    Status { endpoint: String, status: u16 },

    /// The service answered but the body did not match the expected schema.
    #[error("{endpoint} sent a malformed response: {message}")]
    Malformed { endpoint: String, message: String },
}

impl CollaboratorError {
    pub fn unreachable(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unreachable {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn malformed(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            Self::Unreachable { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Malformed { endpoint, .. } => endpoint,
        }
    }
}

/// Service path serving each hint tier.
pub fn hint_endpoint(kind: HintKind) -> &'static str {
    match kind {
        HintKind::Speech => "/hint-1",
        HintKind::Letter => "/hint-2",
        HintKind::Definition => "/hint-3",
    }
}

/// Liveness probe called before a round may start.
pub trait HealthCheck {
    fn ping(&self) -> Result<(), CollaboratorError>;
}

/// Resets the service's per-session tallies (rounds played, completions, accuracy history).
pub trait SessionControl {
    fn open_session(&self) -> Result<(), CollaboratorError>;
}

/// Picks the target word and hands back its scrambled form.
pub trait WordSource {
    fn get_word(&self, letters: u8) -> Result<String, CollaboratorError>;
}

/// Decides whether a guess matches the target word.
pub trait Checker {
    fn check_word(&self, guess: &str) -> Result<CheckVerdict, CollaboratorError>;
}

/// Serves hint content for the current target word.
pub trait HintSource {
    fn get_hint(&self, kind: HintKind) -> Result<String, CollaboratorError>;
}

/// Reveals the target word. Display only; never used to judge a guess.
pub trait SolutionSource {
    fn get_solution(&self) -> Result<String, CollaboratorError>;
}

/// Tracks accuracy across rounds of the session.
pub trait AccuracyService {
    fn compute_accuracy(&self, guess_attempts: u8) -> Result<Accuracy, CollaboratorError>;
}

/// Persistent high-score table.
pub trait Leaderboard {
    fn update_leaderboard(&self, username: &str, score: i32) -> Result<(), CollaboratorError>;
    fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, CollaboratorError>;
}

/// Everything a session needs from the service, shareable across threads.
pub trait Backend:
    HealthCheck
    + SessionControl
    + WordSource
    + Checker
    + HintSource
    + SolutionSource
    + AccuracyService
    + Leaderboard
    + Send
    + Sync
{
}

impl<T> Backend for T where
    T: HealthCheck
        + SessionControl
        + WordSource
        + Checker
        + HintSource
        + SolutionSource
        + AccuracyService
        + Leaderboard
        + Send
        + Sync
{
}
