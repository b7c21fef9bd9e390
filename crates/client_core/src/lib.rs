pub mod config;
pub mod detail;
pub mod error;
pub mod remote;
pub mod scroll;
pub mod search;
pub mod session;
pub mod state;
pub mod view;

pub use config::{load_config, load_config_from, CatalogConfig};
pub use error::CatalogError;
pub use remote::{HttpCatalogClient, RemoteCatalogClient};
pub use scroll::{InfiniteScroll, InfiniteScrollGuard, ScrollMetrics};
pub use search::SearchIntentHandler;
pub use session::{CatalogEvent, CatalogSession, FetchOutcome};
pub use state::{
    total_pages_for, CatalogQueryState, CatalogSnapshot, Direction, FetchMode, MAX_TOTAL_PAGES,
    PAGE_SIZE,
};
pub use view::{notification_text, CatalogCommand, CatalogView, CommandEffect, Dispatched};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
