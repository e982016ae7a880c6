//! One-shot broadcast signal.
//!
//! A [`Gate`] starts pending and transitions to signaled exactly once.
//! Every clone shares the same state, so a gate can be handed to whoever
//! fires it while the owner keeps waiting on its own copy.
//!
//! # Guarantees
//!
//! - Signaling is idempotent: repeated calls have no further effect
//! - Broadcast: every waiter observes the transition, not just one
//! - No missed wakeups: a signal sent before a waiter starts waiting is
//!   still observed

use tokio_util::sync::CancellationToken;

/// One-shot, idempotent, broadcast signal.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    token: CancellationToken,
}

impl Gate {
    /// Create a pending gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transition the gate to signaled.
    pub fn signal(&self) {
        self.token.cancel();
    }

    /// Whether the gate has been signaled.
    pub fn is_signaled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait until the gate is signaled.
    ///
    /// Completes immediately if the gate was already signaled.
    pub async fn signaled(&self) {
        self.token.cancelled().await;
    }
}
