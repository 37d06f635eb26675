use super::*;
use crate::net::types::UserProfile;
use crate::util::storage::{MemoryStorage, TokenStore};
use serde_json::json;

#[test]
fn signed_out_users_are_sent_to_login() {
    for path in ["/", "/study", "/input", "/stats", "/unknown"] {
        assert_eq!(evaluate(path, false), GuardDecision::Redirect("/login"), "{path}");
    }
}

#[test]
fn signed_out_users_may_see_login() {
    assert_eq!(evaluate("/login", false), GuardDecision::Allow);
    assert_eq!(evaluate("/login/", false), GuardDecision::Allow);
}

#[test]
fn signed_in_users_leave_login_for_study() {
    assert_eq!(evaluate("/login", true), GuardDecision::Redirect("/study"));
}

#[test]
fn signed_in_users_may_see_app_routes() {
    for path in ["/study", "/input", "/stats"] {
        assert_eq!(evaluate(path, true), GuardDecision::Allow, "{path}");
    }
}

#[test]
fn login_route_match_is_exact() {
    assert_eq!(evaluate("/login-help", false), GuardDecision::Redirect("/login"));
}

#[test]
fn login_then_visit_login_redirects_to_study() {
    let session = AuthSession::new(TokenStore::new(MemoryStorage::default()));
    let user: UserProfile = serde_json::from_value(json!({"id": 1})).unwrap();
    session.set(Some("t1".to_owned()), Some(user.clone()));

    let state = session.state().get_untracked();
    assert_eq!(state.token.as_deref(), Some("t1"));
    assert_eq!(state.user, Some(user));
    assert_eq!(
        evaluate("/login", session.is_authenticated()),
        GuardDecision::Redirect("/study")
    );
}

#[test]
fn cleared_storage_is_seen_before_deciding() {
    let session = AuthSession::new(TokenStore::new(MemoryStorage::default()));
    session.set(Some("t1".to_owned()), None);
    session.store().clear();
    assert_eq!(
        evaluate("/study", session.is_authenticated()),
        GuardDecision::Redirect("/login")
    );
}
