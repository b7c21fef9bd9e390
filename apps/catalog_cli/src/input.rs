//! Line-oriented input mapped onto catalog commands.

use client_core::{CatalogCommand, Direction};
use shared::domain::MovieId;

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(CatalogCommand),
    ScrollToEnd,
    Help,
    Quit,
    Invalid(String),
}

pub const HELP: &str = "\
commands:
  <text>          type into the search box (debounced)
  /search <text>  submit a search immediately
  /clear          clear the search box
  n | p           next / previous page
  g <page>        go to page
  m               load more (append next page)
  s               scroll to the end of the list
  o <id>          open movie details
  c               close movie details
  ? | help        this text
  q | quit        exit";

pub fn parse_line(line: &str) -> Input {
    let trimmed = line.trim();
    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    match (head, rest) {
        ("q" | "quit", "") => Input::Quit,
        ("?" | "help", "") => Input::Help,
        ("n" | "next", "") => Input::Command(CatalogCommand::NavigateRequested(Direction::Next)),
        ("p" | "prev", "") => Input::Command(CatalogCommand::NavigateRequested(Direction::Prev)),
        ("m" | "more", "") => Input::Command(CatalogCommand::LoadMoreRequested),
        ("s", "") => Input::ScrollToEnd,
        ("c" | "close", "") => Input::Command(CatalogCommand::ModalClosed),
        ("/clear", "") => Input::Command(CatalogCommand::SearchCleared),
        ("/search", text) => Input::Command(CatalogCommand::SearchSubmitted(text.to_string())),
        ("g", page) => match page.parse::<u32>() {
            Ok(page) => Input::Command(CatalogCommand::PageRequested(page)),
            Err(_) => Input::Invalid(format!("not a page number: '{page}'")),
        },
        ("o", id) => match id.parse::<i64>() {
            Ok(id) => Input::Command(CatalogCommand::MovieSelected(MovieId(id))),
            Err(_) => Input::Invalid(format!("not a movie id: '{id}'")),
        },
        _ => Input::Command(CatalogCommand::SearchTextChanged(line.trim_end().to_string())),
    }
}
