//! Presentation boundary: commands in, snapshots and notifications out.

use std::sync::Arc;

use shared::domain::{MovieId, MovieSummary};
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing::debug;

use crate::{
    config::CatalogConfig,
    detail::{MovieCard, MovieDetails, PageWindow},
    remote::RemoteCatalogClient,
    scroll::{InfiniteScroll, InfiniteScrollGuard, ScrollMetrics},
    search::SearchIntentHandler,
    session::{CatalogEvent, CatalogSession, FetchOutcome},
    state::{CatalogSnapshot, Direction, FetchMode},
};

pub const FETCH_FAILED_NOTIFICATION: &str = "Failed to fetch movies. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogCommand {
    SearchTextChanged(String),
    SearchSubmitted(String),
    SearchCleared,
    MovieSelected(MovieId),
    LoadMoreRequested,
    PageRequested(u32),
    NavigateRequested(Direction),
    ModalClosed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEffect {
    Fetched(FetchOutcome),
    /// The command was a no-op under the current state.
    Rejected,
    /// A debounced search was (re)scheduled.
    Scheduled,
    SelectionChanged,
}

/// Result of [`CatalogView::dispatch`].
#[derive(Debug)]
pub enum Dispatched {
    Done(CommandEffect),
    /// A fetching command is running on its own task.
    InFlight(JoinHandle<CommandEffect>),
}

impl From<Option<FetchOutcome>> for CommandEffect {
    fn from(value: Option<FetchOutcome>) -> Self {
        value.map_or(Self::Rejected, Self::Fetched)
    }
}

/// One mounted catalog screen.
///
/// Owns the catalog state for its lifetime; the selected movie for the detail
/// view lives here rather than in the catalog state.
pub struct CatalogView {
    config: CatalogConfig,
    session: Arc<CatalogSession>,
    search: SearchIntentHandler,
    selected: Option<MovieSummary>,
    scroll: Option<InfiniteScrollGuard>,
}

impl CatalogView {
    pub fn new(client: Arc<dyn RemoteCatalogClient>, config: CatalogConfig) -> Self {
        let session = CatalogSession::new(client);
        let search = SearchIntentHandler::new(Arc::clone(&session), config.search_debounce());
        Self {
            config,
            session,
            search,
            selected: None,
            scroll: None,
        }
    }

    /// Loads the first page of the default listing.
    pub async fn mount(&self) -> FetchOutcome {
        self.session.fetch(1, FetchMode::Replace).await
    }

    pub async fn handle(&mut self, command: CatalogCommand) -> CommandEffect {
        debug!(?command, "catalog command");
        match command {
            CatalogCommand::SearchTextChanged(text) => {
                self.search.on_search_text_changed(text);
                CommandEffect::Scheduled
            }
            CatalogCommand::SearchSubmitted(text) => {
                CommandEffect::Fetched(self.search.submit(&text).await)
            }
            CatalogCommand::SearchCleared => {
                self.search.clear();
                CommandEffect::Scheduled
            }
            CatalogCommand::MovieSelected(id) => self.select(id).await,
            CatalogCommand::LoadMoreRequested
            | CatalogCommand::PageRequested(_)
            | CatalogCommand::NavigateRequested(_) => run_paging(&self.session, command).await,
            CatalogCommand::ModalClosed => {
                if self.selected.take().is_some() {
                    CommandEffect::SelectionChanged
                } else {
                    CommandEffect::Rejected
                }
            }
        }
    }

    /// Like [`handle`](Self::handle), but commands that fetch are moved onto
    /// their own task so the caller can keep accepting input meanwhile. The
    /// loading gate still applies: a paging command issued while that task
    /// is outstanding resolves to `Rejected`.
    pub async fn dispatch(&mut self, command: CatalogCommand) -> Dispatched {
        match command {
            CatalogCommand::LoadMoreRequested
            | CatalogCommand::PageRequested(_)
            | CatalogCommand::NavigateRequested(_) => {
                let session = Arc::clone(&self.session);
                Dispatched::InFlight(tokio::spawn(async move {
                    run_paging(&session, command).await
                }))
            }
            CatalogCommand::SearchSubmitted(text) => {
                self.search.cancel();
                let session = Arc::clone(&self.session);
                Dispatched::InFlight(tokio::spawn(async move {
                    CommandEffect::Fetched(session.search(&text).await)
                }))
            }
            other => Dispatched::Done(self.handle(other).await),
        }
    }

    async fn select(&mut self, id: MovieId) -> CommandEffect {
        let snapshot = self.session.snapshot().await;
        match snapshot.results.into_iter().find(|movie| movie.id == id) {
            Some(movie) => {
                self.selected = Some(movie);
                CommandEffect::SelectionChanged
            }
            None => {
                debug!(movie_id = %id, "selected movie is not in the current results");
                CommandEffect::Rejected
            }
        }
    }

    pub fn selected(&self) -> Option<&MovieSummary> {
        self.selected.as_ref()
    }

    pub fn selected_details(&self) -> Option<MovieDetails> {
        self.selected
            .as_ref()
            .map(|movie| MovieDetails::new(movie, &self.config.image_base_url))
    }

    pub fn cards(&self, snapshot: &CatalogSnapshot) -> Vec<MovieCard> {
        snapshot
            .results
            .iter()
            .map(|movie| MovieCard::new(movie, &self.config.image_base_url))
            .collect()
    }

    pub fn page_window(snapshot: &CatalogSnapshot) -> PageWindow {
        PageWindow::new(snapshot.current_page, snapshot.total_pages)
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.session.snapshot().await
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CatalogEvent> {
        self.session.subscribe_events()
    }

    /// Replaces any previous scroll subscription.
    pub fn attach_scroll(&mut self, metrics: watch::Receiver<ScrollMetrics>) {
        self.scroll = Some(InfiniteScroll::attach(
            Arc::clone(&self.session),
            metrics,
            self.config.scroll_threshold_px,
        ));
    }

    pub fn has_pending_search(&self) -> bool {
        self.search.has_pending()
    }

    /// Cancels the pending debounce and detaches the scroll listener.
    pub fn unmount(mut self) {
        self.search.cancel();
        if let Some(scroll) = self.scroll.take() {
            scroll.detach();
        }
    }
}

async fn run_paging(session: &CatalogSession, command: CatalogCommand) -> CommandEffect {
    match command {
        CatalogCommand::LoadMoreRequested => session.load_more_sequential().await.into(),
        CatalogCommand::PageRequested(page) => session.go_to_page(page).await.into(),
        CatalogCommand::NavigateRequested(direction) => session.navigate(direction).await.into(),
        _ => CommandEffect::Rejected,
    }
}

/// Transient user-facing text for a failed fetch.
pub fn notification_text(event: &CatalogEvent) -> Option<&'static str> {
    match event {
        CatalogEvent::FetchFailed { .. } => Some(FETCH_FAILED_NOTIFICATION),
        CatalogEvent::StateChanged(_) => None,
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
