use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    load_config_from, notification_text, CatalogCommand, CatalogEvent, CatalogView,
    CommandEffect, Dispatched, HttpCatalogClient, ScrollMetrics,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{broadcast, watch},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod input;
mod render;

use input::{parse_line, Input, HELP};
use render::{render_details, render_snapshot};

/// Nominal height of one rendered card, used to fake scroll geometry.
const CARD_HEIGHT_PX: f64 = 120.0;
const VIEWPORT_HEIGHT_PX: f64 = 600.0;
const NOTHING_TO_DO: &str = "(nothing to do)";

#[derive(Parser, Debug)]
#[command(about = "Browse a remote movie catalog from the terminal")]
struct Args {
    #[arg(long, default_value = client_core::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    api_key: Option<String>,
    /// Search submitted right after the first page loads.
    #[arg(long)]
    query: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut config = load_config_from(&args.config)?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(api_key) = args.api_key {
        config.api_key = Some(api_key);
    }

    let client = HttpCatalogClient::new(&config)?;
    info!(base_url = client.base_url(), "catalog client ready");

    let image_base_url = config.image_base_url.clone();
    let mut view = CatalogView::new(Arc::new(client), config);
    let renderer = tokio::spawn(render_events(view.subscribe_events(), image_base_url));

    let (scroll_tx, scroll_rx) = watch::channel(ScrollMetrics::default());
    view.attach_scroll(scroll_rx);

    view.mount().await;
    if let Some(query) = args.query {
        view.handle(CatalogCommand::SearchSubmitted(query)).await;
    }

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match parse_line(&line) {
            Input::Quit => break,
            Input::Help => println!("{HELP}"),
            Input::Invalid(reason) => println!("{reason}"),
            Input::ScrollToEnd => {
                let snapshot = view.snapshot().await;
                let content_height = snapshot.results.len() as f64 * CARD_HEIGHT_PX;
                let offset = (content_height - VIEWPORT_HEIGHT_PX).max(0.0);
                scroll_tx.send_replace(ScrollMetrics::new(
                    VIEWPORT_HEIGHT_PX,
                    offset,
                    content_height,
                ));
            }
            Input::Command(command) => match view.dispatch(command).await {
                Dispatched::Done(effect) => report(&view, effect),
                Dispatched::InFlight(task) => {
                    tokio::spawn(async move {
                        if let Ok(CommandEffect::Rejected) = task.await {
                            println!("{NOTHING_TO_DO}");
                        }
                    });
                }
            },
        }
    }

    view.unmount();
    renderer.abort();
    Ok(())
}

fn report(view: &CatalogView, effect: CommandEffect) {
    match effect {
        CommandEffect::Rejected => println!("{NOTHING_TO_DO}"),
        CommandEffect::SelectionChanged => match view.selected_details() {
            Some(details) => println!("{}", render_details(&details)),
            None => println!("(details closed)"),
        },
        CommandEffect::Fetched(_) | CommandEffect::Scheduled => {}
    }
}

async fn render_events(mut events: broadcast::Receiver<CatalogEvent>, image_base_url: String) {
    loop {
        match events.recv().await {
            Ok(event) => {
                if let Some(text) = notification_text(&event) {
                    println!("!! {text}");
                }
                match event {
                    CatalogEvent::StateChanged(snapshot) => {
                        println!("{}", render_snapshot(&snapshot, &image_base_url));
                    }
                    CatalogEvent::FetchFailed { message } => warn!(%message, "fetch failed"),
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "renderer fell behind catalog events");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
