//! The round timer.
//!
//! One task per active round. Each period it locks the round, recomputes the
//! elapsed seconds and emits a [`RoundEvent::Tick`]. The phase is checked only
//! after the tick has been emitted, so the final timer value is always shown
//! before the task exits with [`RoundEvent::Stopped`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::core::Round;
use crate::events::RoundEvent;

/// Handle to a running ticker task.
#[derive(Debug)]
pub struct Ticker {
    stop_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn(
        round: Arc<Mutex<Round>>,
        clock: Arc<dyn Clock>,
        events: mpsc::UnboundedSender<RoundEvent>,
        period: Duration,
    ) -> Self {
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = tokio::spawn(run(round, clock, events, period, stop_rx));
        Self { stop_tx, handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Ask the task to exit and wait until it has.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(());
        if let Err(err) = self.handle.await {
            warn!("[Ticker] task ended abnormally: {}", err);
        }
    }
}

async fn run(
    round: Arc<Mutex<Round>>,
    clock: Arc<dyn Clock>,
    events: mpsc::UnboundedSender<RoundEvent>,
    period: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut interval = time::interval_at(time::Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // A dropped sender (session gone) counts as a stop request.
        let stop_requested = tokio::select! {
            biased;
            _ = &mut stop_rx => true,
            _ = interval.tick() => false,
        };

        let (elapsed_seconds, phase) = {
            let mut round = round.lock().await;
            if round.phase().is_active() {
                if let Err(err) = round.tick(clock.now()) {
                    warn!("[Ticker] tick rejected: {}", err);
                }
            }
            (round.elapsed_seconds(), round.phase())
        };

        let _ = events.send(RoundEvent::Tick { elapsed_seconds });

        if stop_requested || !phase.is_active() {
            debug!("[Ticker] stopped at {}s ({})", elapsed_seconds, phase);
            let _ = events.send(RoundEvent::Stopped { phase });
            return;
        }
    }
}
