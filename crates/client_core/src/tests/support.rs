//! Scripted remote catalog shared by the unit tests.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use shared::{
    domain::{MovieId, MovieSummary},
    protocol::MoviePage,
};
use tokio::sync::Notify;

use crate::{error::CatalogError, remote::RemoteCatalogClient};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RemoteCall {
    Search { query: String, page: u32 },
    Default { page: u32 },
}

impl RemoteCall {
    fn key(&self) -> (String, u32) {
        match self {
            Self::Search { query, page } => (query.clone(), *page),
            Self::Default { page } => (String::new(), *page),
        }
    }
}

/// Movie ids encode the page they came from: `page * 100 + index`.
pub(crate) fn movie_id(page: u32, index: usize) -> MovieId {
    MovieId(i64::from(page) * 100 + index as i64)
}

pub(crate) struct ScriptedCatalogClient {
    page_len: usize,
    default_total: u64,
    totals: Mutex<HashMap<String, u64>>,
    calls: Mutex<Vec<RemoteCall>>,
    failures: Mutex<VecDeque<CatalogError>>,
    gates: Mutex<HashMap<(String, u32), Arc<Notify>>>,
}

impl ScriptedCatalogClient {
    pub(crate) fn new(default_total: u64) -> Self {
        Self {
            page_len: 20,
            default_total,
            totals: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(VecDeque::new()),
            gates: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn with_page_len(mut self, page_len: usize) -> Self {
        self.page_len = page_len;
        self
    }

    pub(crate) fn with_total_for(self, query: &str, total: u64) -> Self {
        self.totals
            .lock()
            .expect("totals lock")
            .insert(query.to_string(), total);
        self
    }

    pub(crate) fn fail_next(&self, err: CatalogError) {
        self.failures.lock().expect("failures lock").push_back(err);
    }

    /// Holds responses for `(query, page)` until the returned handle is notified.
    /// An empty query addresses the default listing.
    pub(crate) fn gate(&self, query: &str, page: u32) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .expect("gates lock")
            .insert((query.to_string(), page), Arc::clone(&gate));
        gate
    }

    pub(crate) fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    pub(crate) async fn wait_for_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.call_count() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("remote calls did not arrive");
    }

    async fn respond(&self, call: RemoteCall) -> Result<MoviePage, CatalogError> {
        let (query, page) = call.key();
        self.calls.lock().expect("calls lock").push(call);

        let gate = self
            .gates
            .lock()
            .expect("gates lock")
            .get(&(query.clone(), page))
            .cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if let Some(err) = self.failures.lock().expect("failures lock").pop_front() {
            return Err(err);
        }

        let total = self
            .totals
            .lock()
            .expect("totals lock")
            .get(&query)
            .copied()
            .unwrap_or(self.default_total);
        let label = if query.is_empty() { "popular" } else { query.as_str() };
        let results = (0..self.page_len)
            .map(|index| MovieSummary::new(movie_id(page, index), format!("{label} p{page} #{index}")))
            .collect();
        Ok(MoviePage::new(page, results, total))
    }
}

#[async_trait]
impl RemoteCatalogClient for ScriptedCatalogClient {
    async fn search(&self, query: &str, page: u32) -> Result<MoviePage, CatalogError> {
        self.respond(RemoteCall::Search {
            query: query.to_string(),
            page,
        })
        .await
    }

    async fn list_default(&self, page: u32) -> Result<MoviePage, CatalogError> {
        self.respond(RemoteCall::Default { page }).await
    }
}
