use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Cloneable shutdown signal shared by the server and the CLI.
#[derive(Clone, Default)]
pub struct Shutdown {
    signaled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self) {
        if !self.signaled.swap(true, Ordering::SeqCst) {
            tracing::info!("Graceful shutdown initiated");
            self.notify.notify_waiters();
        }
    }

    pub fn is_signaled(&self) -> bool {
        self.signaled.load(Ordering::SeqCst)
    }

    pub async fn wait(&self) {
        // Register with Notify before checking the flag, otherwise a signal
        // landing in between would be missed.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_signaled() {
            return;
        }
        notified.await;
    }

    /// Signals on the first Ctrl-C.
    pub fn listen_for_ctrl_c(&self) {
        let shutdown = self.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => shutdown.signal(),
                Err(err) => tracing::warn!(error = %err, "Failed to listen for Ctrl-C"),
            }
        });
    }
}
