use thiserror::Error;

use crate::collaborator::CollaboratorError;
use crate::types::{HintKind, RoundPhase, MAX_LETTERS, MIN_LETTERS};

/// Every way a round operation can fail.
///
/// The validation variants (`InvalidInput`, `LengthMismatch`, `HintAlreadyUsed`)
/// leave the round untouched and are meant to be shown to the player.
/// `CollaboratorUnavailable` also leaves the round untouched; the same call may
/// be repeated. `IllegalTransition` is a caller bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("invalid input: {0}")]
    InvalidInput(InvalidInput),

    #[error("guess has {actual} letters, expected {expected}")]
    LengthMismatch { expected: u8, actual: usize },

    #[error("{0} hint already used this round")]
    HintAlreadyUsed(HintKind),

    #[error("collaborator unavailable: {0}")]
    CollaboratorUnavailable(#[from] CollaboratorError),

    #[error("cannot {operation} while round is {phase}")]
    IllegalTransition {
        operation: &'static str,
        phase: RoundPhase,
    },
}

impl RoundError {
    /// Validation rejections the player can simply correct.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RoundError::InvalidInput(_)
                | RoundError::LengthMismatch { .. }
                | RoundError::HintAlreadyUsed(_)
        )
    }
}

/// Why `start` refused its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("identity must not be empty")]
    EmptyIdentity,

    #[error("letter count {0} outside {min}..={max}", min = MIN_LETTERS, max = MAX_LETTERS)]
    LetterCount(u8),
}

impl From<InvalidInput> for RoundError {
    fn from(value: InvalidInput) -> Self {
        RoundError::InvalidInput(value)
    }
}
