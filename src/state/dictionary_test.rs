use super::*;
use crate::net::http::HttpClient;
use crate::net::testing::ScriptedTransport;
use crate::net::types::Visibility;
use crate::util::storage::{MemoryStorage, TokenStore};
use serde_json::json;

fn dict(id: DictionaryId, is_owner: bool, visibility: Visibility, name: &str) -> Dictionary {
    Dictionary {
        id,
        name: name.to_owned(),
        visibility,
        owner_id: None,
        is_owner,
    }
}

fn ids(items: &[Dictionary]) -> Vec<DictionaryId> {
    items.iter().map(|d| d.id).collect()
}

fn store(token: Option<&str>) -> (DictionaryStore<ScriptedTransport, MemoryStorage>, ScriptedTransport) {
    let transport = ScriptedTransport::default();
    let tokens = TokenStore::new(MemoryStorage::default());
    tokens.write(token, None);
    let http = HttpClient::new("http://api.test", transport.clone(), tokens);
    (DictionaryStore::new(ApiClient::new(http)), transport)
}

// =============================================================
// Ordering
// =============================================================

#[test]
fn owned_sort_before_not_owned() {
    let mut items = vec![
        dict(1, false, Visibility::Private, "A"),
        dict(2, true, Visibility::Public, "Z"),
    ];
    sort_dictionaries(&mut items);
    assert_eq!(ids(&items), vec![2, 1]);
}

#[test]
fn private_sorts_before_non_private_within_ownership() {
    let mut items = vec![
        dict(1, true, Visibility::Public, "A"),
        dict(2, true, Visibility::Shared, "B"),
        dict(3, true, Visibility::Private, "C"),
    ];
    sort_dictionaries(&mut items);
    assert_eq!(ids(&items)[0], 3);
}

#[test]
fn names_ascend_within_equal_keys() {
    let mut items = vec![
        dict(1, true, Visibility::Private, "beta"),
        dict(2, true, Visibility::Private, "Alpha"),
        dict(3, true, Visibility::Private, "gamma"),
    ];
    sort_dictionaries(&mut items);
    assert_eq!(ids(&items), vec![2, 1, 3]);
}

#[test]
fn full_ordering_holds_for_mixed_list() {
    let mut items = vec![
        dict(1, false, Visibility::Public, "A"),
        dict(2, true, Visibility::Public, "A"),
        dict(3, false, Visibility::Private, "B"),
        dict(4, true, Visibility::Private, "B"),
        dict(5, true, Visibility::Private, "A"),
    ];
    sort_dictionaries(&mut items);
    assert_eq!(ids(&items), vec![5, 4, 2, 3, 1]);
    for pair in items.windows(2) {
        assert_ne!(compare_dictionaries(&pair[0], &pair[1]), Ordering::Greater);
    }
}

#[cfg(not(feature = "csr"))]
#[test]
fn native_name_comparison_is_case_insensitive() {
    assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
    assert_eq!(compare_names("B", "a"), Ordering::Greater);
    assert_ne!(compare_names("a", "A"), Ordering::Equal);
}

// =============================================================
// DictionaryState
// =============================================================

#[test]
fn replace_selects_first_sorted_item_when_unselected() {
    let mut state = DictionaryState::default();
    state.replace(vec![
        dict(1, false, Visibility::Shared, "B"),
        dict(2, true, Visibility::Private, "A"),
    ]);
    assert_eq!(ids(&state.items), vec![2, 1]);
    assert_eq!(state.current_id, Some(2));
}

#[test]
fn replace_keeps_existing_selection() {
    let mut state = DictionaryState::default();
    state.set_current(1);
    state.replace(vec![
        dict(1, false, Visibility::Shared, "B"),
        dict(2, true, Visibility::Private, "A"),
    ]);
    assert_eq!(state.current().map(|d| d.id), Some(1));
}

#[test]
fn replace_with_empty_list_leaves_no_selection() {
    let mut state = DictionaryState::default();
    state.replace(Vec::new());
    assert!(state.current_id.is_none());
}

#[test]
fn set_current_accepts_unknown_ids() {
    let mut state = DictionaryState::default();
    state.replace(vec![dict(1, true, Visibility::Private, "A")]);
    state.set_current(99);
    assert_eq!(state.current_id, Some(99));
    assert!(state.current().is_none());
}

#[test]
fn set_current_is_idempotent() {
    let mut state = DictionaryState::default();
    state.replace(vec![
        dict(1, true, Visibility::Private, "A"),
        dict(2, true, Visibility::Private, "B"),
    ]);
    state.set_current(2);
    let first = state.current().cloned();
    state.set_current(2);
    assert_eq!(state.current().cloned(), first);
    assert_eq!(first.map(|d| d.id), Some(2));
}

#[test]
fn reset_clears_everything() {
    let mut state = DictionaryState {
        items: vec![dict(1, true, Visibility::Private, "A")],
        current_id: Some(1),
        loading: true,
        error: Some("x".to_owned()),
    };
    state.reset();
    assert_eq!(state, DictionaryState::default());
}

// =============================================================
// DictionaryStore::load
// =============================================================

#[tokio::test]
async fn load_sorts_and_selects_first() {
    let (store, transport) = store(Some("t1"));
    transport.respond_json(json!([
        {"id": 1, "is_owner": false, "visibility": "shared", "name": "B"},
        {"id": 2, "is_owner": true, "visibility": "private", "name": "A"}
    ]));

    let items = store.load().await.unwrap();

    assert_eq!(ids(&items), vec![2, 1]);
    assert_eq!(store.current_id(), Some(2));
    assert_eq!(store.current().map(|d| d.name), Some("A".to_owned()));
    assert!(!store.state().get_untracked().loading);
}

#[tokio::test]
async fn load_without_token_resets_regardless_of_prior_state() {
    let (store, transport) = store(Some("t1"));
    transport.respond_json(json!({"items": [
        {"id": 1, "is_owner": true, "visibility": "private", "name": "A"}
    ]}));
    store.load().await.unwrap();
    assert_eq!(store.current_id(), Some(1));

    store.api().tokens().clear();
    let items = store.load().await.unwrap();

    assert!(items.is_empty());
    assert_eq!(store.state().get_untracked(), DictionaryState::default());
    assert_eq!(transport.sent().len(), 1);
}

#[tokio::test]
async fn store_reset_lets_next_load_pick_first_again() {
    let (store, transport) = store(Some("t1"));
    transport.respond_json(json!([{"id": 3, "is_owner": true, "visibility": "private", "name": "A"}]));
    store.load().await.unwrap();
    assert_eq!(store.current_id(), Some(3));

    store.reset();
    assert_eq!(store.state().get_untracked(), DictionaryState::default());

    transport.respond_json(json!([{"id": 4, "is_owner": true, "visibility": "private", "name": "B"}]));
    store.load().await.unwrap();
    assert_eq!(store.current_id(), Some(4));
}

#[tokio::test]
async fn load_keeps_selection_across_reloads() {
    let (store, transport) = store(Some("t1"));
    let body = json!({"items": [
        {"id": 1, "is_owner": true, "visibility": "private", "name": "A"},
        {"id": 2, "is_owner": true, "visibility": "private", "name": "B"}
    ]});
    transport.respond_json(body.clone()).respond_json(body);

    store.load().await.unwrap();
    store.set_current(2);
    store.load().await.unwrap();

    assert_eq!(store.current_id(), Some(2));
}

#[tokio::test]
async fn load_that_hits_401_resets_state() {
    let (store, transport) = store(Some("t1"));
    store.set_current(5);
    transport.respond(401, "");

    let items = store.load().await.unwrap();

    assert!(items.is_empty());
    assert!(store.current_id().is_none());
    assert!(store.api().tokens().read().is_none());
}

#[tokio::test]
async fn load_failure_records_error_and_keeps_list() {
    let (store, transport) = store(Some("t1"));
    transport
        .respond_json(json!({"items": [
            {"id": 1, "is_owner": true, "visibility": "private", "name": "A"}
        ]}))
        .respond(500, r#"{"detail":"database locked"}"#);

    store.load().await.unwrap();
    let err = store.load().await.unwrap_err();

    let state = store.state().get_untracked();
    assert_eq!(err.status(), Some(500));
    assert_eq!(state.error.as_deref(), Some("database locked"));
    assert_eq!(ids(&state.items), vec![1]);
    assert!(!state.loading);
}
