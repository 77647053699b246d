use tokio::sync::mpsc::UnboundedReceiver;

use crate::types::RoundPhase;

/// Notifications from the ticker to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    /// Refresh the displayed timer.
    Tick { elapsed_seconds: u64 },
    /// The ticker has exited; no more events for this round.
    Stopped { phase: RoundPhase },
}

/// Discard events already queued, returning how many were dropped.
///
/// Call after a round has been concluded so its final tick is not shown during
/// the next round.
pub fn drain(events: &mut UnboundedReceiver<RoundEvent>) -> usize {
    let mut dropped = 0;
    while events.try_recv().is_ok() {
        dropped += 1;
    }
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_drain_empties_queue() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(RoundEvent::Tick { elapsed_seconds: 3 }).unwrap();
        tx.send(RoundEvent::Stopped {
            phase: RoundPhase::Solved,
        })
        .unwrap();

        assert_eq!(drain(&mut rx), 2);
        assert_eq!(drain(&mut rx), 0);
        assert!(rx.try_recv().is_err());
    }
}
