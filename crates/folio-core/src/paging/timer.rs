use std::time::Duration;

use super::lock::SettleTicket;

/// Delayed lock release supplied by the host.
///
/// When the delay elapses the host hands the ticket back to
/// [`PagingController::settle`](super::PagingController::settle). Scheduling is
/// fire-and-forget; only teardown cancels.
pub trait SettleTimer {
    fn schedule(&mut self, delay: Duration, ticket: SettleTicket);

    /// Drop every pending release
    fn cancel_all(&mut self);
}

/// Timer driven by explicit calls to [`ManualTimer::advance`].
///
/// Backs simulations and tests where wall-clock time is not wanted.
#[derive(Debug, Default)]
pub struct ManualTimer {
    now: Duration,
    pending: Vec<(Duration, SettleTicket)>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward, returning tickets that came due in order
    pub fn advance(&mut self, by: Duration) -> Vec<SettleTicket> {
        self.now += by;
        let now = self.now;
        let mut due: Vec<(Duration, SettleTicket)> = Vec::new();
        self.pending.retain(|&(deadline, ticket)| {
            if deadline <= now {
                due.push((deadline, ticket));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(deadline, _)| deadline);
        due.into_iter().map(|(_, ticket)| ticket).collect()
    }
}

impl SettleTimer for ManualTimer {
    fn schedule(&mut self, delay: Duration, ticket: SettleTicket) {
        self.pending.push((self.now + delay, ticket));
    }

    fn cancel_all(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::lock::PagingLock;

    #[test]
    fn test_manual_timer_fires_at_deadline() {
        let mut lock = PagingLock::new();
        let ticket = lock.try_begin().unwrap();

        let mut timer = ManualTimer::new();
        timer.schedule(Duration::from_millis(750), ticket);

        assert!(timer.advance(Duration::from_millis(749)).is_empty());
        assert_eq!(timer.advance(Duration::from_millis(1)), vec![ticket]);
        assert_eq!(timer.pending(), 0);
        assert_eq!(timer.now(), Duration::from_millis(750));
    }

    #[test]
    fn test_cancel_all() {
        let mut lock = PagingLock::new();
        let mut timer = ManualTimer::new();
        timer.schedule(Duration::from_millis(10), lock.try_begin().unwrap());
        timer.cancel_all();
        assert!(timer.advance(Duration::from_secs(1)).is_empty());
    }
}
