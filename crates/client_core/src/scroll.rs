//! Proximity-to-end trigger for incremental loading.

use std::sync::Arc;

use tokio::{sync::watch, task::JoinHandle};
use tokio_stream::{wrappers::WatchStream, StreamExt};
use tracing::debug;

use crate::session::CatalogSession;

/// Geometry of a scrollable result list, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub viewport_height: f64,
    pub scroll_offset: f64,
    pub content_height: f64,
}

impl ScrollMetrics {
    pub fn new(viewport_height: f64, scroll_offset: f64, content_height: f64) -> Self {
        Self {
            viewport_height,
            scroll_offset,
            content_height,
        }
    }

    pub fn distance_to_end(&self) -> f64 {
        (self.content_height - (self.scroll_offset + self.viewport_height)).max(0.0)
    }

    pub fn is_near_end(&self, threshold_px: f64) -> bool {
        self.distance_to_end() <= threshold_px
    }
}

pub struct InfiniteScroll;

impl InfiniteScroll {
    /// Subscribes `session` to `metrics`; every update close enough to the end
    /// of the content requests the next page. Dropping the guard unsubscribes.
    pub fn attach(
        session: Arc<CatalogSession>,
        metrics: watch::Receiver<ScrollMetrics>,
        threshold_px: f64,
    ) -> InfiniteScrollGuard {
        let task = tokio::spawn(async move {
            let mut updates = WatchStream::from_changes(metrics);
            while let Some(position) = updates.next().await {
                if !position.is_near_end(threshold_px) {
                    continue;
                }
                // Gating happens under the state lock, so bursts of updates
                // while a page is in flight start nothing.
                let Some(ticket) = session.begin_load_more().await else {
                    continue;
                };
                debug!(
                    distance = position.distance_to_end(),
                    "scroll reached end of content"
                );
                let session = Arc::clone(&session);
                tokio::spawn(async move {
                    session.run(ticket).await;
                });
            }
        });

        InfiniteScrollGuard { task }
    }
}

pub struct InfiniteScrollGuard {
    task: JoinHandle<()>,
}

impl InfiniteScrollGuard {
    pub fn is_attached(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn detach(self) {
        drop(self);
    }
}

impl Drop for InfiniteScrollGuard {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
#[path = "tests/scroll_tests.rs"]
mod tests;
