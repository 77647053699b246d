//! Session runtime - one player, one round at a time
//!
//! The session owns the current [`Round`] behind an async mutex shared only with
//! the round's [`Ticker`]. Every mutation (start, guess, hint, tick) takes that
//! lock, so the timer can never interleave with a guess. Collaborator calls are
//! blocking and run on tokio's blocking pool while the lock is held; the round is
//! only written once the answer is in.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::core::{
    hint_endpoint, Backend, CollaboratorError, GuessReport, Round, RoundError, RoundSnapshot,
};
use crate::events::RoundEvent;
use crate::summary::RoundSummary;
use crate::ticker::Ticker;
use crate::types::{HintKind, LeaderboardEntry, RoundPhase};

/// A player's game session.
pub struct Session {
    backend: Arc<dyn Backend>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
    round: Arc<Mutex<Round>>,
    ticker: Option<Ticker>,
    events: mpsc::UnboundedSender<RoundEvent>,
}

impl Session {
    /// Create a session and the receiver for its timer events.
    pub fn new(
        backend: Arc<dyn Backend>,
        clock: Arc<dyn Clock>,
        config: EngineConfig,
    ) -> (Self, mpsc::UnboundedReceiver<RoundEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let session = Self {
            backend,
            clock,
            config,
            round: Arc::new(Mutex::new(Round::new())),
            ticker: None,
            events,
        };
        (session, events_rx)
    }

    /// Reset the service's per-session tallies.
    pub async fn open(&self) -> Result<(), RoundError> {
        call(&self.backend, "/session", |b| b.open_session())
            .await
            .map_err(|err| reject("open", err.into()))
    }

    /// Start a new round and return the scrambled word.
    ///
    /// Any finished round is discarded. Fails with `IllegalTransition` while a
    /// round is still being played.
    pub async fn start(&mut self, letters: u8, identity: &str) -> Result<String, RoundError> {
        let phase = self.round.lock().await.phase();
        if phase.is_active() {
            return Err(reject(
                "start",
                RoundError::IllegalTransition {
                    operation: "start",
                    phase,
                },
            ));
        }
        Round::validate_start(letters, identity).map_err(|err| reject("start", err))?;

        self.stop_ticker().await;

        call(&self.backend, "/", |b| b.ping())
            .await
            .map_err(|err| reject("start", err.into()))?;
        let scrambled = call(&self.backend, "/get-word", move |b| b.get_word(letters))
            .await
            .map_err(|err| reject("start", err.into()))?;

        let mut fresh = Round::new();
        fresh
            .start(letters, identity, scrambled.clone(), self.clock.now())
            .map_err(|err| reject("start", err))?;
        *self.round.lock().await = fresh;

        info!(
            "[Session] round started for {} ({} letters): {}",
            identity.trim(),
            letters,
            scrambled
        );

        self.ticker = Some(Ticker::spawn(
            Arc::clone(&self.round),
            Arc::clone(&self.clock),
            self.events.clone(),
            self.config.tick,
        ));

        Ok(scrambled)
    }

    /// Submit a guess. On a terminal transition the ticker is stopped before
    /// this returns.
    pub async fn submit_guess(&mut self, word: &str) -> Result<GuessReport, RoundError> {
        let report = {
            let mut round = self.round.lock().await;
            round
                .check_guess(word)
                .map_err(|err| reject("submit_guess", err))?;

            let guess = word.to_string();
            let verdict = call(&self.backend, "/check-word", move |b| b.check_word(&guess))
                .await
                .map_err(|err| reject("submit_guess", err.into()))?;

            round
                .apply_verdict(word, verdict, self.clock.now())
                .map_err(|err| reject("submit_guess", err))?
        };

        debug!(
            "[Session] guess {} '{}' -> {} ({})",
            report.guess_number, report.guess, report.feedback, report.phase
        );

        if report.phase.is_terminal() {
            self.stop_ticker().await;
            match report.score {
                Some(score) => info!("[Session] round solved, score {}", score.total),
                None => info!("[Session] round exhausted"),
            }
        }

        Ok(report)
    }

    /// Buy a hint and return its content.
    pub async fn use_hint(&mut self, kind: HintKind) -> Result<String, RoundError> {
        let mut round = self.round.lock().await;
        round.check_hint(kind).map_err(|err| reject("use_hint", err))?;

        let content = call(&self.backend, hint_endpoint(kind), move |b| b.get_hint(kind))
            .await
            .map_err(|err| reject("use_hint", err.into()))?;

        round.record_hint(kind).map_err(|err| reject("use_hint", err))?;
        debug!("[Session] {} hint used", kind);
        Ok(content)
    }

    /// Recompute the elapsed time by hand (hosts that do not run the ticker).
    pub async fn tick(&self) -> Result<u64, RoundError> {
        let mut round = self.round.lock().await;
        round
            .tick(self.clock.now())
            .map_err(|err| reject("tick", err))
    }

    pub async fn snapshot(&self) -> RoundSnapshot {
        self.round.lock().await.snapshot()
    }

    pub async fn phase(&self) -> RoundPhase {
        self.round.lock().await.phase()
    }

    /// Current leaderboard listing, available at any time.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, RoundError> {
        call(&self.backend, "/get-leaderboard", |b| b.get_leaderboard())
            .await
            .map_err(|err| reject("leaderboard", err.into()))
    }

    /// Whether a ticker task is still attached to the session.
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Collect the post-round data for a finished round. Succeeds once per round.
    pub async fn conclude(&mut self) -> Result<RoundSummary, RoundError> {
        let outcome = {
            let mut round = self.round.lock().await;
            let phase = round.phase();
            let illegal = RoundError::IllegalTransition {
                operation: "conclude",
                phase,
            };
            if !phase.is_terminal() {
                return Err(reject("conclude", illegal));
            }
            round
                .take_outcome()
                .ok_or_else(|| reject("conclude", illegal))?
        };
        self.stop_ticker().await;

        let solution = call(&self.backend, "/get-solution", |b| b.get_solution()).await;

        let guesses = outcome.guess_count;
        let accuracy = call(&self.backend, "/accuracy", move |b| {
            b.compute_accuracy(guesses)
        })
        .await;

        let leaderboard_update = match outcome.score {
            Some(score) => {
                let username = outcome.identity.clone();
                let total = score.total;
                Some(
                    call(&self.backend, "/update-leaderboard", move |b| {
                        b.update_leaderboard(&username, total)
                    })
                    .await,
                )
            }
            None => None,
        };

        let leaderboard = call(&self.backend, "/get-leaderboard", |b| b.get_leaderboard()).await;

        let summary = RoundSummary {
            outcome,
            solution,
            accuracy,
            leaderboard_update,
            leaderboard,
        };
        for err in summary.errors() {
            warn!("[Session] post-round call failed: {}", err);
        }
        Ok(summary)
    }

    /// Stop the ticker, if any, and wait for it to exit.
    pub async fn shutdown(mut self) {
        self.stop_ticker().await;
    }

    async fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop().await;
        }
    }
}

/// Run a blocking collaborator call on tokio's blocking pool.
async fn call<T, F>(
    backend: &Arc<dyn Backend>,
    endpoint: &'static str,
    f: F,
) -> Result<T, CollaboratorError>
where
    T: Send + 'static,
    F: FnOnce(&dyn Backend) -> Result<T, CollaboratorError> + Send + 'static,
{
    let backend = Arc::clone(backend);
    tokio::task::spawn_blocking(move || f(backend.as_ref()))
        .await
        .map_err(|err| CollaboratorError::unreachable(endpoint, format!("task join error: {err}")))?
}

/// Log a failed operation at a level matching its severity.
fn reject(operation: &str, err: RoundError) -> RoundError {
    match &err {
        RoundError::IllegalTransition { .. } => error!("[Session] {} refused: {}", operation, err),
        RoundError::CollaboratorUnavailable(_) => warn!("[Session] {} failed: {}", operation, err),
        _ => debug!("[Session] {} rejected: {}", operation, err),
    }
    err
}
