use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PagingState {
    #[default]
    Idle,
    Paging,
}

/// Release token for one paging cycle.
///
/// Each `try_begin` bumps the generation, so a token from an earlier cycle or
/// from before a teardown cannot release the current lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SettleTicket {
    generation: u64,
}

impl SettleTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Single-flight paging flag.
///
/// Writes take effect immediately: a gesture handled right after `try_begin`
/// in the same turn already sees `Paging`. Observers get a read-only
/// [`watch::Receiver`] and cannot change the state.
#[derive(Debug)]
pub struct PagingLock {
    state: watch::Sender<PagingState>,
    generation: u64,
}

impl Default for PagingLock {
    fn default() -> Self {
        Self::new()
    }
}

impl PagingLock {
    pub fn new() -> Self {
        let (state, _) = watch::channel(PagingState::Idle);
        Self {
            state,
            generation: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> PagingState {
        *self.state.borrow()
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        self.state() == PagingState::Paging
    }

    pub fn subscribe(&self) -> watch::Receiver<PagingState> {
        self.state.subscribe()
    }

    /// Take the lock; `None` if a cycle is already running
    pub fn try_begin(&mut self) -> Option<SettleTicket> {
        if self.is_held() {
            return None;
        }
        self.generation += 1;
        self.state.send_replace(PagingState::Paging);
        Some(SettleTicket {
            generation: self.generation,
        })
    }

    /// Release the cycle `ticket` belongs to.
    ///
    /// Unconditional for the current cycle; returns false for stale tickets or
    /// when the lock is already idle.
    pub fn end(&mut self, ticket: SettleTicket) -> bool {
        if ticket.generation != self.generation || !self.is_held() {
            return false;
        }
        self.state.send_replace(PagingState::Idle);
        true
    }

    /// Ticket of the running cycle, if any
    pub fn current_ticket(&self) -> Option<SettleTicket> {
        self.is_held().then_some(SettleTicket {
            generation: self.generation,
        })
    }

    /// Drop any running cycle and orphan outstanding tickets
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.state.send_replace(PagingState::Idle);
    }
}
