use shared::domain::MovieSummary;

/// Items kept per fetched page, whatever the remote page size is.
pub const PAGE_SIZE: usize = 9;
/// Upper bound on addressable pages imposed by the remote service.
pub const MAX_TOTAL_PAGES: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Replace,
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// `min(500, ceil(total_results / 9))`, never below one.
pub fn total_pages_for(total_results: u64) -> u32 {
    let pages = total_results.div_ceil(PAGE_SIZE as u64);
    pages.clamp(1, u64::from(MAX_TOTAL_PAGES)) as u32
}

#[derive(Debug, Clone)]
pub struct CatalogQueryState {
    pub(crate) search_query: String,
    pub(crate) results: Vec<MovieSummary>,
    pub(crate) current_page: u32,
    pub(crate) total_pages: u32,
    pub(crate) is_loading: bool,
    pub(crate) last_error: Option<String>,
    pub(crate) latest_request: u64,
}

impl Default for CatalogQueryState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            results: Vec::new(),
            current_page: 1,
            total_pages: 1,
            is_loading: true,
            last_error: None,
            latest_request: 0,
        }
    }
}

impl CatalogQueryState {
    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn contains_page(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    /// Whitespace-only text browses the default listing.
    pub fn is_default_listing(&self) -> bool {
        self.search_query.trim().is_empty()
    }

    pub(crate) fn apply_page(
        &mut self,
        page: u32,
        mode: FetchMode,
        mut items: Vec<MovieSummary>,
        total_results: u64,
    ) {
        items.truncate(PAGE_SIZE);
        self.total_pages = total_pages_for(total_results);
        self.current_page = page.min(self.total_pages);
        match mode {
            FetchMode::Replace => self.results = items,
            FetchMode::Append => self.results.extend(items),
        }
        self.is_loading = false;
    }

    pub(crate) fn apply_failure(&mut self, mode: FetchMode, message: String) {
        self.last_error = Some(message);
        if mode == FetchMode::Replace {
            self.results.clear();
        }
        self.is_loading = false;
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            search_query: self.search_query.clone(),
            results: self.results.clone(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            is_loading: self.is_loading,
            last_error: self.last_error.clone(),
            has_more: self.has_more(),
        }
    }
}

/// Read-only copy of the catalog state handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub search_query: String,
    pub results: Vec<MovieSummary>,
    pub current_page: u32,
    pub total_pages: u32,
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::MovieId;

    fn movies(range: std::ops::Range<i64>) -> Vec<MovieSummary> {
        range
            .map(|id| MovieSummary::new(MovieId(id), format!("Movie {id}")))
            .collect()
    }

    #[test]
    fn page_count_rounds_up_and_is_bounded() {
        assert_eq!(total_pages_for(0), 1);
        assert_eq!(total_pages_for(1), 1);
        assert_eq!(total_pages_for(9), 1);
        assert_eq!(total_pages_for(10), 2);
        assert_eq!(total_pages_for(42), 5);
        assert_eq!(total_pages_for(4500), 500);
        assert_eq!(total_pages_for(4501), 500);
        assert_eq!(total_pages_for(u64::MAX), 500);
    }

    #[test]
    fn fresh_state_is_loading_first_page() {
        let state = CatalogQueryState::default();
        assert!(state.is_loading);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.total_pages, 1);
        assert!(!state.has_more());
        assert!(state.is_default_listing());
    }

    #[test]
    fn replace_truncates_to_page_size() {
        let mut state = CatalogQueryState::default();
        state.apply_page(1, FetchMode::Replace, movies(0..20), 42);

        assert_eq!(state.results.len(), PAGE_SIZE);
        assert_eq!(state.total_pages, 5);
        assert!(state.has_more());
        assert!(!state.is_loading);
    }

    #[test]
    fn append_accumulates_in_arrival_order() {
        let mut state = CatalogQueryState::default();
        state.apply_page(1, FetchMode::Replace, movies(0..9), 42);
        state.apply_page(2, FetchMode::Append, movies(100..120), 42);

        assert_eq!(state.results.len(), 18);
        assert_eq!(state.results[8].id, MovieId(8));
        assert_eq!(state.results[9].id, MovieId(100));
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn failure_clears_results_only_when_replacing() {
        let mut state = CatalogQueryState::default();
        state.apply_page(1, FetchMode::Replace, movies(0..9), 42);

        state.apply_failure(FetchMode::Append, "boom".into());
        assert_eq!(state.results.len(), 9);
        assert_eq!(state.last_error.as_deref(), Some("boom"));

        state.apply_failure(FetchMode::Replace, "boom again".into());
        assert!(state.results.is_empty());
        assert!(!state.is_loading);
    }

    #[test]
    fn whitespace_query_browses_default_listing() {
        let mut state = CatalogQueryState::default();
        state.search_query = "   ".into();
        assert!(state.is_default_listing());
        state.search_query = " alien ".into();
        assert!(!state.is_default_listing());
    }
}
