//! Debounced search input.

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tracing::debug;

use crate::session::{CatalogSession, FetchOutcome};

/// Turns keystroke bursts into at most one search per idle window.
///
/// Only the delay is cancellable: once the window elapses the fetch is handed
/// to its own task and runs to completion even if the handler is dropped.
pub struct SearchIntentHandler {
    session: Arc<CatalogSession>,
    debounce: Duration,
    pending: Option<JoinHandle<()>>,
}

impl SearchIntentHandler {
    pub fn new(session: Arc<CatalogSession>, debounce: Duration) -> Self {
        Self {
            session,
            debounce,
            pending: None,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn on_search_text_changed(&mut self, text: impl Into<String>) {
        self.cancel();

        let text = text.into();
        let session = Arc::clone(&self.session);
        let delay = self.debounce;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(ticket) = session.begin_search_if_changed(&text).await {
                debug!(query = %text, "debounced search fired");
                tokio::spawn(async move {
                    session.run(ticket).await;
                });
            }
        }));
    }

    /// Explicit submission: skips the debounce and always refetches.
    pub async fn submit(&mut self, text: &str) -> FetchOutcome {
        self.cancel();
        self.session.search(text).await
    }

    pub fn clear(&mut self) {
        self.on_search_text_changed(String::new());
    }

    pub fn has_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchIntentHandler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
