use super::*;
use crate::net::http::{HttpClient, Method};
use crate::net::testing::ScriptedTransport;
use crate::net::types::QueueItem;
use crate::util::storage::{MemoryStorage, TokenStore};
use serde_json::json;

fn api() -> (ApiClient<ScriptedTransport, MemoryStorage>, ScriptedTransport) {
    let transport = ScriptedTransport::default();
    let tokens = TokenStore::new(MemoryStorage::default());
    tokens.write(Some("t1"), None);
    let http = HttpClient::new("http://api.test", transport.clone(), tokens);
    (ApiClient::new(http), transport)
}

fn deck(n: usize) -> ReviewDeck {
    let items = (0..n)
        .map(|i| QueueItem {
            hanzi: format!("字{i}"),
            pinyin: "zì".to_owned(),
            due_at: None,
            is_new: false,
        })
        .collect();
    ReviewDeck::new(items)
}

#[test]
fn summary_for_untouched_session() {
    assert_eq!(session_summary(&deck(3)), "Session ended. No cards reviewed.");
}

#[test]
fn summary_uses_singular_for_one_card() {
    let mut d = deck(2);
    d.record(Rating::Good);
    assert_eq!(session_summary(&d), "Session ended. Reviewed 1 card, 1 known.");
}

#[test]
fn summary_counts_known_cards() {
    let mut d = deck(3);
    d.record(Rating::Forgot);
    d.record(Rating::Easy);
    assert_eq!(session_summary(&d), "Session ended. Reviewed 2 cards, 1 known.");
}

// =============================================================
// start_session
// =============================================================

#[tokio::test]
async fn start_session_returns_session_and_deck() {
    let (api, transport) = api();
    transport
        .respond_json(json!({"session_id": 9, "started_at": "2026-01-01T00:00:00Z"}))
        .respond_json(json!({"items": [{"hanzi": "你"}, {"hanzi": "好"}]}));

    let (session, deck) = start_session(&api, 3).await.unwrap().unwrap();

    assert_eq!(session.session_id, 9);
    assert_eq!(deck.total(), 2);
    assert_eq!(transport.sent().len(), 2);
}

#[tokio::test]
async fn queue_failure_closes_the_opened_session() {
    let (api, transport) = api();
    transport
        .respond_json(json!({"session_id": 9, "started_at": "2026-01-01T00:00:00Z"}))
        .respond(500, "boom")
        .respond_json(json!({"session_id": 9, "ended_at": "2026-01-01T00:00:05Z"}));

    let err = start_session(&api, 3).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    let sent = transport.sent();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[2].method, Method::Post);
    assert_eq!(sent[2].url, "http://api.test/dictionaries/3/study/session/end");
    let body: serde_json::Value = serde_json::from_str(sent[2].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"session_id": 9}));
}

#[tokio::test]
async fn queue_failure_reports_queue_error_even_if_close_fails() {
    let (api, transport) = api();
    transport
        .respond_json(json!({"session_id": 9, "started_at": "2026-01-01T00:00:00Z"}))
        .respond(500, "boom")
        .respond(500, "still down");

    let err = start_session(&api, 3).await.unwrap_err();

    assert_eq!(err.to_string(), "boom");
}

#[tokio::test]
async fn unauthorized_queue_skips_close() {
    let (api, transport) = api();
    transport
        .respond_json(json!({"session_id": 9, "started_at": "2026-01-01T00:00:00Z"}))
        .respond(401, "");

    assert_eq!(start_session(&api, 3).await, Ok(None));
    assert_eq!(transport.sent().len(), 2);
}

#[tokio::test]
async fn unauthorized_start_fetches_no_queue() {
    let (api, transport) = api();
    transport.respond(401, "");

    assert_eq!(start_session(&api, 3).await, Ok(None));
    assert_eq!(transport.sent().len(), 1);
}
