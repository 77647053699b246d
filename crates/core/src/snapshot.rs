use crate::types::{HintSet, RoundPhase, MAX_GUESSES};

/// Read-only view of a round for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoundSnapshot {
    pub phase: RoundPhase,
    pub letters: u8,
    pub scrambled: String,
    pub guess_count: u8,
    pub guesses_left: u8,
    pub elapsed_seconds: u64,
    pub hints: HintSet,
    pub score: Option<i32>,
}

impl RoundSnapshot {
    pub fn playable(&self) -> bool {
        self.phase.is_active()
    }
}

impl Default for RoundSnapshot {
    fn default() -> Self {
        Self {
            phase: RoundPhase::Idle,
            letters: 0,
            scrambled: String::new(),
            guess_count: 0,
            guesses_left: MAX_GUESSES,
            elapsed_seconds: 0,
            hints: HintSet::empty(),
            score: None,
        }
    }
}
