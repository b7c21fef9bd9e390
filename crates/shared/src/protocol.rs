use serde::{Deserialize, Serialize};

use crate::domain::MovieSummary;

/// One page of a paginated list or search response.
///
/// `total_results` is the count reported by the remote service across every
/// page; the client derives its own page count from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

impl MoviePage {
    pub fn new(page: u32, results: Vec<MovieSummary>, total_results: u64) -> Self {
        Self {
            page,
            results,
            total_pages: 0,
            total_results,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery<'a> {
    pub api_key: &'a str,
    pub query: &'a str,
    pub page: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListQuery<'a> {
    pub api_key: &'a str,
    pub page: u32,
}
