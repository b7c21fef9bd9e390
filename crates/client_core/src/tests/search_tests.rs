use super::*;

use crate::{
    state::FetchMode,
    test_support::{RemoteCall, ScriptedCatalogClient},
};

const DEBOUNCE: Duration = Duration::from_millis(500);

async fn setup() -> (Arc<ScriptedCatalogClient>, Arc<CatalogSession>, SearchIntentHandler) {
    let client = Arc::new(ScriptedCatalogClient::new(1000));
    let session = CatalogSession::new(client.clone());
    session.fetch(1, FetchMode::Replace).await;
    let handler = SearchIntentHandler::new(Arc::clone(&session), DEBOUNCE);
    (client, session, handler)
}

fn search_call(query: &str) -> RemoteCall {
    RemoteCall::Search {
        query: query.into(),
        page: 1,
    }
}

#[tokio::test(start_paused = true)]
async fn only_last_keystroke_in_burst_reaches_remote() {
    let (client, session, mut handler) = setup().await;

    handler.on_search_text_changed("b");
    tokio::time::sleep(Duration::from_millis(200)).await;
    handler.on_search_text_changed("ba");
    tokio::time::sleep(Duration::from_millis(200)).await;
    handler.on_search_text_changed("bat");
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(
        client.calls(),
        vec![RemoteCall::Default { page: 1 }, search_call("bat")]
    );
    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.search_query, "bat");
    assert_eq!(snapshot.current_page, 1);
    assert!(!handler.has_pending());
}

#[tokio::test(start_paused = true)]
async fn nothing_fires_inside_the_idle_window() {
    let (client, _session, mut handler) = setup().await;

    handler.on_search_text_changed("alien");
    tokio::time::sleep(Duration::from_millis(499)).await;

    assert_eq!(client.call_count(), 1);
    assert!(handler.has_pending());

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(client.calls().last(), Some(&search_call("alien")));
}

#[tokio::test(start_paused = true)]
async fn submit_bypasses_and_cancels_pending_debounce() {
    let (client, _session, mut handler) = setup().await;

    handler.on_search_text_changed("half typed");
    let outcome = handler.submit("dune").await;
    assert_eq!(outcome, FetchOutcome::Applied { page: 1, received: 9 });

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(
        client.calls(),
        vec![RemoteCall::Default { page: 1 }, search_call("dune")]
    );
}

#[tokio::test(start_paused = true)]
async fn submit_refetches_even_when_query_is_unchanged() {
    let (client, _session, mut handler) = setup().await;

    handler.submit("dune").await;
    handler.submit("dune").await;

    assert_eq!(client.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn debounced_text_equal_to_applied_query_is_dropped() {
    let (client, _session, mut handler) = setup().await;

    handler.submit("batman").await;
    handler.on_search_text_changed(" batman ");
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(client.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn clear_goes_back_to_default_listing_after_debounce() {
    let (client, session, mut handler) = setup().await;

    handler.submit("batman").await;
    handler.clear();
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(client.calls().last(), Some(&RemoteCall::Default { page: 1 }));
    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.search_query, "");
    assert!(snapshot.results.iter().all(|m| m.title.starts_with("popular")));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handler_cancels_pending_search() {
    let (client, _session, mut handler) = setup().await;

    handler.on_search_text_changed("never sent");
    drop(handler);
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(client.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn debounced_search_is_not_gated_by_loading() {
    let client = Arc::new(ScriptedCatalogClient::new(1000));
    let session = CatalogSession::new(client.clone());
    let mut handler = SearchIntentHandler::new(Arc::clone(&session), DEBOUNCE);

    // Initial state is still loading; search must go through anyway.
    assert!(session.snapshot().await.is_loading);
    handler.on_search_text_changed("heat");
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(client.calls(), vec![search_call("heat")]);
    assert!(!session.snapshot().await.is_loading);
}
