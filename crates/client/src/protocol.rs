//! Protocol module - JSON bodies exchanged with the scramble service
//!
//! Every response the engine reads has an explicit schema here. A body that does
//! not match is a malformed response, never a silently defaulted value.

use serde::{Deserialize, Serialize};

use crate::core::{CheckVerdict, PositionFeedback, Similarity};
use crate::types::Accuracy;

/// `POST /get-word` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WordResponse {
    pub word: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckResult {
    Correct,
    Incorrect,
}

/// Per-guess diagnostics nested in the check response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckScore {
    pub code: String,
    pub similarity: String,
}

/// `POST /check-word` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckResponse {
    pub result: CheckResult,
    pub score: CheckScore,
}

impl CheckResponse {
    /// Convert into the engine's verdict, validating the diagnostic strings.
    pub fn into_verdict(self) -> Result<CheckVerdict, String> {
        let feedback = PositionFeedback::parse(&self.score.code)
            .ok_or_else(|| format!("bad position code {:?}", self.score.code))?;
        let similarity = Similarity::parse(&self.score.similarity)
            .ok_or_else(|| format!("bad similarity {:?}", self.score.similarity))?;

        Ok(CheckVerdict {
            correct: self.result == CheckResult::Correct,
            feedback,
            similarity,
        })
    }
}

/// `GET /hint-1` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartOfSpeechResponse {
    pub part_of_speech: String,
}

/// `GET /hint-3` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DefinitionResponse {
    pub definition: String,
}

/// `POST /accuracy` response (percentages).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AccuracyResponse {
    pub completion: f64,
    pub round_accuracy: f64,
    pub game_accuracy: f64,
}

impl From<AccuracyResponse> for Accuracy {
    fn from(value: AccuracyResponse) -> Self {
        Self {
            completion: value.completion,
            round_accuracy: value.round_accuracy,
            game_accuracy: value.game_accuracy,
        }
    }
}

/// `GET /get-leaderboard` response: ranked entries, one per line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeaderboardResponse {
    pub leaderboard: String,
}

/// `POST /update-leaderboard` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardUpdate<'a> {
    pub username: &'a str,
    pub new_score: i32,
}
