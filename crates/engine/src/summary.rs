use crate::core::{CollaboratorError, RoundOutcome};
use crate::types::{Accuracy, LeaderboardEntry};

/// Everything shown after a round ends.
///
/// Each post-round service call is reported on its own; one failing does not
/// hide the others.
#[derive(Debug, Clone)]
pub struct RoundSummary {
    pub outcome: RoundOutcome,
    pub solution: Result<String, CollaboratorError>,
    pub accuracy: Result<Accuracy, CollaboratorError>,
    /// `None` when the round was not solved (nothing to record).
    pub leaderboard_update: Option<Result<(), CollaboratorError>>,
    pub leaderboard: Result<Vec<LeaderboardEntry>, CollaboratorError>,
}

impl RoundSummary {
    pub fn score(&self) -> Option<i32> {
        self.outcome.score.map(|s| s.total)
    }

    pub fn errors(&self) -> Vec<&CollaboratorError> {
        let mut errors = Vec::new();
        if let Err(err) = &self.solution {
            errors.push(err);
        }
        if let Err(err) = &self.accuracy {
            errors.push(err);
        }
        if let Some(Err(err)) = &self.leaderboard_update {
            errors.push(err);
        }
        if let Err(err) = &self.leaderboard {
            errors.push(err);
        }
        errors
    }
}
