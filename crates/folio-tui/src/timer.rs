use std::time::Duration;

use folio_core::paging::{SettleTicket, SettleTimer};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Settle timer backed by tokio tasks.
///
/// Each scheduled ticket sleeps on its own task and is delivered on an
/// unbounded channel that the main loop drains every frame.
pub struct TokioSettleTimer {
    tx: mpsc::UnboundedSender<SettleTicket>,
    tasks: Vec<JoinHandle<()>>,
}

impl TokioSettleTimer {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SettleTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                tasks: Vec::new(),
            },
            rx,
        )
    }

    /// Timers still sleeping
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }
}

impl SettleTimer for TokioSettleTimer {
    fn schedule(&mut self, delay: Duration, ticket: SettleTicket) {
        self.tasks.retain(|t| !t.is_finished());

        let tx = self.tx.clone();
        self.tasks.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!(generation = ticket.generation(), "Settle timer fired");
            // receiver gone means the app already shut down
            let _ = tx.send(ticket);
        }));
    }

    fn cancel_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for TokioSettleTimer {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::paging::PagingLock;

    #[tokio::test(start_paused = true)]
    async fn test_ticket_delivered_after_delay() {
        let (mut timer, mut rx) = TokioSettleTimer::new();
        let mut lock = PagingLock::new();
        let ticket = lock.try_begin().unwrap();

        timer.schedule(Duration::from_millis(750), ticket);
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(749)).await;
        assert!(rx.try_recv().is_err());

        let fired = rx.recv().await.unwrap();
        assert_eq!(fired, ticket);
        assert!(lock.end(fired));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all_drops_pending() {
        let (mut timer, mut rx) = TokioSettleTimer::new();
        let mut lock = PagingLock::new();
        let ticket = lock.try_begin().unwrap();

        timer.schedule(Duration::from_millis(750), ticket);
        tokio::task::yield_now().await;
        assert_eq!(timer.pending(), 1);

        timer.cancel_all();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(timer.pending(), 0);
    }
}
