//! Shutdown coordination.
//!
//! `main` triggers the coordinator with the name of the signal it caught. The
//! HTTP server holds a subscription, stops accepting once it fires, and logs
//! the reason while it drains.

use tokio::sync::broadcast::{self, error::RecvError};

/// Receiving side handed to long-running tasks.
pub type ShutdownReceiver = broadcast::Receiver<&'static str>;

/// Reason reported when the coordinator is dropped without being triggered.
pub const REASON_DROPPED: &str = "coordinator dropped";

/// Broadcasts a single shutdown reason to every subscriber.
pub struct Shutdown {
    tx: broadcast::Sender<&'static str>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> ShutdownReceiver {
        self.tx.subscribe()
    }

    /// Ask every subscriber to stop, naming why.
    pub fn trigger(&self, reason: &'static str) {
        let _ = self.tx.send(reason);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once shutdown is requested and return the reason.
///
/// A dropped coordinator also ends the wait, so a server never outlives the
/// owner that was meant to stop it.
pub async fn wait_for_shutdown(rx: &mut ShutdownReceiver) -> &'static str {
    loop {
        match rx.recv().await {
            Ok(reason) => return reason,
            // capacity is one; a second trigger only overwrote the first
            Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => return REASON_DROPPED,
        }
    }
}
