//! Display models for movie cards, the detail view and the pagination bar.

use chrono::{Datelike, NaiveDate};
use shared::domain::{GenreId, MovieId, MovieSummary};

pub const NO_IMAGE: &str = "No Image Available";
pub const UNKNOWN: &str = "Unknown";
const CARD_NO_OVERVIEW: &str = "No description available";
const DETAIL_NO_OVERVIEW: &str = "No description available.";
/// Page links shown at once in the pagination bar.
const PAGE_WINDOW_LEN: u32 = 5;

fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

pub fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> Option<String> {
    let path = poster_path.filter(|p| !p.is_empty())?;
    Some(format!("{}{}", image_base_url.trim_end_matches('/'), path))
}

fn upper_language(movie: &MovieSummary) -> Option<String> {
    movie
        .original_language
        .as_deref()
        .filter(|lang| !lang.is_empty())
        .map(str::to_uppercase)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub id: MovieId,
    pub title: String,
    pub poster_url: Option<String>,
    pub rating_badge: String,
    pub release_year: String,
    pub language: String,
    pub overview: String,
}

impl MovieCard {
    pub fn new(movie: &MovieSummary, image_base_url: &str) -> Self {
        let release_year = parse_release_date(&movie.release_date)
            .map(|date| date.year().to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let rating_badge = movie
            .vote_average
            .filter(|avg| *avg != 0.0)
            .map(|avg| format!("{avg:.1}"))
            .unwrap_or_else(|| "N/A".to_string());

        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: poster_url(image_base_url, movie.poster_path.as_deref()),
            rating_badge,
            release_year,
            language: upper_language(movie).unwrap_or_default(),
            overview: movie
                .overview
                .clone()
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| CARD_NO_OVERVIEW.to_string()),
        }
    }

    pub fn subtitle(&self) -> String {
        format!("{} • {}", self.release_year, self.language)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetails {
    pub id: MovieId,
    pub title: String,
    /// Only present when it differs from `title`.
    pub original_title: Option<String>,
    pub poster_url: Option<String>,
    pub release_date: String,
    pub rating: Option<String>,
    pub language: String,
    pub overview: String,
    pub genres: Vec<GenreId>,
    /// Width of the popularity bar in percent, `min(popularity / 2, 100)`.
    pub popularity_percent: Option<f64>,
}

impl MovieDetails {
    pub fn new(movie: &MovieSummary, image_base_url: &str) -> Self {
        let original_title = movie
            .original_title
            .clone()
            .filter(|original| original != &movie.title);

        Self {
            id: movie.id,
            title: movie.title.clone(),
            original_title,
            poster_url: poster_url(image_base_url, movie.poster_path.as_deref()),
            release_date: format_release_date(&movie.release_date),
            rating: movie.vote_average.map(|avg| match movie.vote_count {
                Some(count) => format!("★ {avg:.1}/10 ({count} votes)"),
                None => format!("★ {avg:.1}/10"),
            }),
            language: upper_language(movie).unwrap_or_else(|| UNKNOWN.to_string()),
            overview: movie
                .overview
                .clone()
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| DETAIL_NO_OVERVIEW.to_string()),
            genres: movie.genre_ids.clone().unwrap_or_default(),
            popularity_percent: movie
                .popularity
                .filter(|p| *p > 0.0)
                .map(|p| (p / 2.0).min(100.0)),
        }
    }
}

/// `"1999-03-31"` → `"March 31, 1999"`. Empty input is `Unknown`; anything
/// else that does not parse is shown as received.
pub fn format_release_date(raw: &str) -> String {
    if raw.trim().is_empty() {
        return UNKNOWN.to_string();
    }
    match parse_release_date(raw) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// The numbered links of the pagination bar around the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub pages: Vec<u32>,
    pub current: u32,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl PageWindow {
    pub fn new(current: u32, total: u32) -> Self {
        let total = total.max(1);
        let current = current.clamp(1, total);
        let reach = PAGE_WINDOW_LEN / 2;
        let pages = (current.saturating_sub(reach)..=current.saturating_add(reach))
            .filter(|page| (1..=total).contains(page))
            .collect();

        Self {
            pages,
            current,
            prev_disabled: current == 1,
            next_disabled: current == total,
        }
    }
}

#[cfg(test)]
#[path = "tests/detail_tests.rs"]
mod tests;
