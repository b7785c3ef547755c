//! Cancellable single-shot frame scheduling.
//!
//! At most one tick is pending at a time. Each scheduled tick is identified by
//! a token; cancelling or rescheduling invalidates every earlier token, so a
//! host callback that fires late finds its token stale and does nothing.

use std::time::{Duration, Instant};

/// Handle of one scheduled tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken {
    generation: u64,
}

#[derive(Debug, Clone, Copy)]
struct PendingTick {
    token: TickToken,
    due: Instant,
}

/// Frame clock with explicit cancellation
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    generation: u64,
    pending: Option<PendingTick>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            generation: 0,
            pending: None,
        }
    }

    /// Schedule the next tick one interval after `now`, replacing any pending one
    pub fn schedule(&mut self, now: Instant) -> TickToken {
        self.generation += 1;
        let token = TickToken {
            generation: self.generation,
        };
        self.pending = Some(PendingTick {
            token,
            due: now + self.interval,
        });
        token
    }

    /// Drop the pending tick; its token will never be accepted
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn pending(&self) -> Option<TickToken> {
        self.pending.map(|p| p.token)
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// The pending token, if its deadline has passed
    pub fn due(&self, now: Instant) -> Option<TickToken> {
        self.pending.filter(|p| p.due <= now).map(|p| p.token)
    }

    /// Claim the pending tick. Returns false for stale or already claimed tokens.
    pub fn consume(&mut self, token: TickToken) -> bool {
        match self.pending {
            Some(p) if p.token == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_once() {
        let mut ticker = Ticker::new(Duration::from_millis(16));
        let token = ticker.schedule(Instant::now());

        assert_eq!(ticker.pending(), Some(token));
        assert!(ticker.consume(token));
        assert!(!ticker.consume(token));
        assert_eq!(ticker.pending(), None);
    }

    #[test]
    fn test_cancel_invalidates_token() {
        let mut ticker = Ticker::new(Duration::from_millis(16));
        let token = ticker.schedule(Instant::now());
        ticker.cancel();

        assert!(!ticker.consume(token));

        // A fresh schedule does not revive the old token
        let fresh = ticker.schedule(Instant::now());
        assert_ne!(fresh, token);
        assert!(!ticker.consume(token));
        assert!(ticker.consume(fresh));
    }

    #[test]
    fn test_due_respects_interval() {
        let mut ticker = Ticker::new(Duration::from_millis(16));
        let start = Instant::now();
        let token = ticker.schedule(start);

        assert_eq!(ticker.due(start), None);
        assert_eq!(ticker.due(start + Duration::from_millis(16)), Some(token));
        assert_eq!(ticker.next_due(), Some(start + Duration::from_millis(16)));
    }
}
