//! Scripted in-process backend.
//!
//! Stands in for the scramble service in tests, benchmarks and offline demos.
//! The target word is set by the caller; the "scramble" is a left rotation so
//! results are reproducible. The service can be switched off to exercise the
//! unavailable paths, and every call is recorded by endpoint name.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::core::{
    hint_endpoint, AccuracyService, CheckVerdict, Checker, CollaboratorError, HealthCheck,
    HintSource, Leaderboard, PositionFeedback, SessionControl, Similarity, SolutionSource,
    WordSource,
};
use crate::types::{Accuracy, HintKind, LeaderboardEntry};

const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Default)]
struct MemoryState {
    target: String,
    definition: String,
    part_of_speech: String,
    down: bool,
    latency: Duration,
    calls: Vec<&'static str>,
    rounds: u32,
    completed: u32,
    round_accuracies: Vec<f64>,
    scores: Vec<(String, i32)>,
}

/// In-memory implementation of every collaborator contract.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    pub fn new(target: &str) -> Self {
        let backend = Self::default();
        backend.set_target(target);
        backend
    }

    pub fn set_target(&self, target: &str) {
        let mut state = self.lock();
        state.target = target.to_string();
        state.part_of_speech = "noun".to_string();
        state.definition = format!("definition of {target}");
    }

    /// While down, every call fails as unreachable.
    pub fn set_down(&self, down: bool) {
        self.lock().down = down;
    }

    /// Block every call for `latency` before answering, like a slow service.
    pub fn set_latency(&self, latency: Duration) {
        self.lock().latency = latency;
    }

    /// Endpoint names of every call made so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        self.lock().calls.iter().filter(|c| **c == endpoint).count()
    }

    /// Left rotation by one letter.
    pub fn scramble(word: &str) -> String {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => chars.chain(std::iter::once(first)).collect(),
            None => String::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn enter(&self, endpoint: &'static str) -> Result<MutexGuard<'_, MemoryState>, CollaboratorError> {
        let latency = self.lock().latency;
        if !latency.is_zero() {
            std::thread::sleep(latency);
        }

        let mut state = self.lock();
        state.calls.push(endpoint);
        if state.down {
            return Err(CollaboratorError::unreachable(endpoint, "connection refused"));
        }
        Ok(state)
    }
}

impl HealthCheck for MemoryBackend {
    fn ping(&self) -> Result<(), CollaboratorError> {
        self.enter("/").map(|_| ())
    }
}

impl SessionControl for MemoryBackend {
    fn open_session(&self) -> Result<(), CollaboratorError> {
        let mut state = self.enter("/session")?;
        state.rounds = 0;
        state.completed = 0;
        state.round_accuracies.clear();
        Ok(())
    }
}

impl WordSource for MemoryBackend {
    fn get_word(&self, _letters: u8) -> Result<String, CollaboratorError> {
        let mut state = self.enter("/get-word")?;
        state.rounds += 1;
        Ok(Self::scramble(&state.target))
    }
}

impl Checker for MemoryBackend {
    fn check_word(&self, guess: &str) -> Result<CheckVerdict, CollaboratorError> {
        let mut state = self.enter("/check-word")?;
        let code: String = guess
            .chars()
            .zip(state.target.chars())
            .map(|(g, t)| if g == t { '*' } else { '-' })
            .collect();
        let feedback = PositionFeedback::parse(&code)
            .ok_or_else(|| CollaboratorError::malformed("/check-word", "code too long"))?;

        let letters = state.target.chars().count().max(1);
        let similarity = Similarity::new(feedback.correct_count() as f64 * 100.0 / letters as f64);

        let correct = guess == state.target;
        if correct {
            state.completed += 1;
        }

        Ok(CheckVerdict {
            correct,
            feedback,
            similarity,
        })
    }
}

impl HintSource for MemoryBackend {
    fn get_hint(&self, kind: HintKind) -> Result<String, CollaboratorError> {
        let state = self.enter(hint_endpoint(kind))?;
        Ok(match kind {
            HintKind::Speech => state.part_of_speech.clone(),
            HintKind::Letter => state.target.chars().take(1).collect(),
            HintKind::Definition => state.definition.clone(),
        })
    }
}

impl SolutionSource for MemoryBackend {
    fn get_solution(&self) -> Result<String, CollaboratorError> {
        let state = self.enter("/get-solution")?;
        Ok(state.target.clone())
    }
}

impl AccuracyService for MemoryBackend {
    fn compute_accuracy(&self, guess_attempts: u8) -> Result<Accuracy, CollaboratorError> {
        let mut state = self.enter("/accuracy")?;
        let completion = if state.rounds == 0 {
            0.0
        } else {
            f64::from(state.completed) / f64::from(state.rounds) * 100.0
        };
        let round_accuracy = 100.0 / f64::from(guess_attempts.max(1));
        state.round_accuracies.push(round_accuracy);
        let game_accuracy =
            state.round_accuracies.iter().sum::<f64>() / state.round_accuracies.len() as f64;

        Ok(Accuracy {
            completion,
            round_accuracy,
            game_accuracy,
        })
    }
}

impl Leaderboard for MemoryBackend {
    fn update_leaderboard(&self, username: &str, score: i32) -> Result<(), CollaboratorError> {
        let mut state = self.enter("/update-leaderboard")?;
        state.scores.push((username.to_string(), score));
        state.scores.sort_by(|a, b| b.1.cmp(&a.1));
        state.scores.truncate(LEADERBOARD_SIZE);
        Ok(())
    }

    fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, CollaboratorError> {
        let state = self.enter("/get-leaderboard")?;
        Ok(state
            .scores
            .iter()
            .zip(1..)
            .map(|((name, score), rank)| LeaderboardEntry {
                rank,
                name: name.clone(),
                score: *score,
            })
            .collect())
    }
}
