//! Fetch orchestration and page navigation over a shared catalog state.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    remote::RemoteCatalogClient,
    state::{CatalogQueryState, CatalogSnapshot, Direction, FetchMode, PAGE_SIZE},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { page: u32, received: usize },
    Failed { message: String },
    /// A newer request was issued before this one settled; its result was dropped.
    Superseded,
}

#[derive(Debug, Clone)]
pub enum CatalogEvent {
    StateChanged(CatalogSnapshot),
    FetchFailed { message: String },
}

/// A fetch that has been registered against the state but not yet sent.
#[derive(Debug)]
pub(crate) struct FetchTicket {
    request_id: u64,
    page: u32,
    mode: FetchMode,
    query: String,
    loading: CatalogSnapshot,
}

pub struct CatalogSession {
    client: Arc<dyn RemoteCatalogClient>,
    state: Mutex<CatalogQueryState>,
    events: broadcast::Sender<CatalogEvent>,
}

impl CatalogSession {
    pub fn new(client: Arc<dyn RemoteCatalogClient>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            client,
            state: Mutex::new(CatalogQueryState::default()),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Fetches `page` for the current query. Not gated on `is_loading`.
    pub async fn fetch(&self, page: u32, mode: FetchMode) -> FetchOutcome {
        let ticket = {
            let mut guard = self.state.lock().await;
            Self::begin(&mut guard, page, mode)
        };
        self.run(ticket).await
    }

    /// Applies `text` as the new query and fetches its first page.
    pub async fn search(&self, text: &str) -> FetchOutcome {
        let ticket = {
            let mut guard = self.state.lock().await;
            Self::begin_search(&mut guard, text)
        };
        self.run(ticket).await
    }

    pub async fn load_more_sequential(&self) -> Option<FetchOutcome> {
        let ticket = self.begin_load_more().await?;
        Some(self.run(ticket).await)
    }

    pub async fn go_to_page(&self, page: u32) -> Option<FetchOutcome> {
        let ticket = {
            let mut guard = self.state.lock().await;
            if guard.is_loading {
                debug!(page, "page jump rejected while loading");
                return None;
            }
            if !guard.contains_page(page) {
                debug!(page, total_pages = guard.total_pages, "page jump out of range");
                return None;
            }
            Self::begin(&mut guard, page, FetchMode::Replace)
        };
        Some(self.run(ticket).await)
    }

    pub async fn navigate(&self, direction: Direction) -> Option<FetchOutcome> {
        let ticket = {
            let mut guard = self.state.lock().await;
            if guard.is_loading {
                debug!(?direction, "navigation rejected while loading");
                return None;
            }
            let target = match direction {
                Direction::Prev => guard.current_page.checked_sub(1)?,
                Direction::Next => guard.current_page.checked_add(1)?,
            };
            if !guard.contains_page(target) {
                debug!(?direction, target, "navigation out of range");
                return None;
            }
            Self::begin(&mut guard, target, FetchMode::Replace)
        };
        Some(self.run(ticket).await)
    }

    pub(crate) async fn begin_load_more(&self) -> Option<FetchTicket> {
        let mut guard = self.state.lock().await;
        if guard.is_loading || !guard.has_more() {
            return None;
        }
        let next = guard.current_page + 1;
        Some(Self::begin(&mut guard, next, FetchMode::Append))
    }

    /// Like `search`, but a query equal to the applied one is dropped.
    pub(crate) async fn begin_search_if_changed(&self, text: &str) -> Option<FetchTicket> {
        let mut guard = self.state.lock().await;
        if guard.search_query.trim() == text.trim() {
            debug!(query = text, "search text unchanged");
            return None;
        }
        Some(Self::begin_search(&mut guard, text))
    }

    fn begin_search(state: &mut CatalogQueryState, text: &str) -> FetchTicket {
        state.search_query = text.to_string();
        state.current_page = 1;
        Self::begin(state, 1, FetchMode::Replace)
    }

    fn begin(state: &mut CatalogQueryState, page: u32, mode: FetchMode) -> FetchTicket {
        state.is_loading = true;
        state.last_error = None;
        state.latest_request += 1;
        FetchTicket {
            request_id: state.latest_request,
            page,
            mode,
            query: state.search_query.trim().to_string(),
            loading: state.snapshot(),
        }
    }

    pub(crate) async fn run(&self, ticket: FetchTicket) -> FetchOutcome {
        let _ = self.events.send(CatalogEvent::StateChanged(ticket.loading));

        debug!(
            request_id = ticket.request_id,
            page = ticket.page,
            mode = ?ticket.mode,
            query = %ticket.query,
            "issuing catalog fetch"
        );
        let result = if ticket.query.is_empty() {
            self.client.list_default(ticket.page).await
        } else {
            self.client.search(&ticket.query, ticket.page).await
        };

        let mut guard = self.state.lock().await;
        if guard.latest_request != ticket.request_id {
            debug!(
                request_id = ticket.request_id,
                latest_request = guard.latest_request,
                "discarding superseded catalog response"
            );
            return FetchOutcome::Superseded;
        }

        let outcome = match result {
            Ok(page) => {
                let received = page.results.len().min(PAGE_SIZE);
                guard.apply_page(ticket.page, ticket.mode, page.results, page.total_results);
                info!(
                    page = guard.current_page,
                    total_pages = guard.total_pages,
                    received,
                    "catalog page applied"
                );
                FetchOutcome::Applied {
                    page: guard.current_page,
                    received,
                }
            }
            Err(err) => {
                warn!(page = ticket.page, error = %err, "catalog fetch failed");
                let message = err.to_string();
                guard.apply_failure(ticket.mode, message.clone());
                FetchOutcome::Failed { message }
            }
        };
        let snapshot = guard.snapshot();
        drop(guard);

        let _ = self.events.send(CatalogEvent::StateChanged(snapshot));
        if let FetchOutcome::Failed { message } = &outcome {
            let _ = self.events.send(CatalogEvent::FetchFailed {
                message: message.clone(),
            });
        }
        outcome
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
