//! Cooperative cancellation for the engine loop

use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    Active,
    /// Terminal; a token never returns to Active
    Cancelled,
}

/// Shared Active -> Cancelled flag that sleeping tasks can await
#[derive(Debug, Clone)]
pub struct CancelToken {
    state: Arc<watch::Sender<TokenState>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(TokenState::Active);
        Self { state: Arc::new(tx) }
    }

    /// Idempotent
    pub fn cancel(&self) {
        self.state.send_replace(TokenState::Cancelled);
    }

    pub fn state(&self) -> TokenState {
        *self.state.borrow()
    }

    pub fn is_cancelled(&self) -> bool {
        self.state() == TokenState::Cancelled
    }

    /// Resolves once the token is cancelled (immediately if it already is)
    pub async fn cancelled(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel.
        let _ = rx.wait_for(|state| *state == TokenState::Cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
