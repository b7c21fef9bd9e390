use client_core::{
    detail::{MovieCard, MovieDetails, NO_IMAGE},
    CatalogSnapshot, CatalogView,
};

pub fn render_snapshot(snapshot: &CatalogSnapshot, image_base_url: &str) -> String {
    if snapshot.is_loading {
        return "Loading...".to_string();
    }

    let mut out = String::new();
    let heading = if snapshot.search_query.trim().is_empty() {
        "Popular Movies".to_string()
    } else {
        format!("Results for \"{}\"", snapshot.search_query.trim())
    };
    out.push_str(&heading);
    out.push('\n');

    if snapshot.results.is_empty() {
        out.push_str("No Movies Found\nTry adjusting your search criteria\n");
    }

    for movie in &snapshot.results {
        let card = MovieCard::new(movie, image_base_url);
        out.push_str(&render_card(&card));
    }

    out.push_str(&render_page_bar(snapshot));
    out
}

fn render_card(card: &MovieCard) -> String {
    format!(
        "  [{:>8}] {} ({})  {}\n             {}\n",
        card.id.0,
        card.title,
        card.subtitle(),
        card.rating_badge,
        truncate(&card.overview, 96),
    )
}

fn render_page_bar(snapshot: &CatalogSnapshot) -> String {
    let window = CatalogView::page_window(snapshot);
    let mut bar = String::from(if window.prev_disabled { "  (prev)" } else { "  <prev" });
    for page in &window.pages {
        if *page == window.current {
            bar.push_str(&format!(" [{page}]"));
        } else {
            bar.push_str(&format!(" {page}"));
        }
    }
    bar.push_str(if window.next_disabled { " (next)" } else { " next>" });
    bar.push_str(&format!(
        "   page {} of {}{}\n",
        snapshot.current_page,
        snapshot.total_pages,
        if snapshot.has_more { "" } else { " (end)" }
    ));
    bar
}

pub fn render_details(details: &MovieDetails) -> String {
    let mut out = format!("== {} ==\n", details.title);
    if let Some(original) = &details.original_title {
        out.push_str(&format!("Original: {original}\n"));
    }
    out.push_str(&format!(
        "Poster:       {}\n",
        details.poster_url.as_deref().unwrap_or(NO_IMAGE)
    ));
    out.push_str(&format!("Release Date: {}\n", details.release_date));
    if let Some(rating) = &details.rating {
        out.push_str(&format!("Rating:       {rating}\n"));
    }
    out.push_str(&format!("Language:     {}\n", details.language));
    out.push_str(&format!("Overview:\n  {}\n", details.overview));
    if !details.genres.is_empty() {
        let genres: Vec<String> = details.genres.iter().map(ToString::to_string).collect();
        out.push_str(&format!("Genres:       {}\n", genres.join(", ")));
    }
    if let Some(percent) = details.popularity_percent {
        let filled = (percent / 5.0).round() as usize;
        out.push_str(&format!(
            "Popularity:   [{}{}]\n",
            "#".repeat(filled),
            " ".repeat(20usize.saturating_sub(filled))
        ));
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
