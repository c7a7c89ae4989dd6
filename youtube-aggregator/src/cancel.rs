//! Cooperative cancellation.
//!
//! A [`CancelHandle`] flips a shared flag that any number of [`CancelToken`]s observe through a
//! [`watch`] channel. Traversals poll the token before each page fetch and never block on it.

use tokio::sync::watch;

/// Creates a connected cancellation handle and token.
pub fn cancellation() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

/// The cancelling side of a [`cancellation`] pair.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signals cancellation to every token derived from this handle.
    ///
    /// Cancelling is permanent and idempotent.
    pub fn cancel(&self) {
        if !self.tx.send_replace(true) {
            tracing::debug!("cancellation requested");
        }
    }

    /// Returns another token observing this handle.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.tx.subscribe(),
        }
    }
}

/// The observing side of a [`cancellation`] pair.
///
/// If the handle is dropped without cancelling, the token stays un-cancelled forever.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    /// Whether cancellation has been signalled. Never blocks.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Completes once cancellation is signalled.
    ///
    /// Pends forever if the handle is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        let observed = rx.wait_for(|cancelled| *cancelled).await.map(drop);
        if observed.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
