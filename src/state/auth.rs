//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthState` is the in-memory mirror of the token store. The route guard and
//! user-aware components read it through the `RwSignal` held by
//! [`AuthSession`]; subscribing is just tracking that signal.
//!
//! Storage can change underneath the mirror (another tab, or the HTTP client
//! clearing credentials after a 401), so anything that needs a fresh answer
//! calls [`AuthSession::refresh`] first.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::types::UserProfile;
use crate::util::storage::{KeyValueStorage, TokenStore};

/// Token and profile of the signed-in user, if any.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl AuthState {
    /// Snapshot of what is currently persisted.
    pub fn load<S: KeyValueStorage>(store: &TokenStore<S>) -> Self {
        Self {
            token: store.read(),
            user: store.read_user(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn display_name(&self) -> Option<String> {
        self.user.as_ref().map(UserProfile::display_name)
    }
}

/// Token store plus its reactive mirror.
#[derive(Clone)]
pub struct AuthSession<S> {
    store: TokenStore<S>,
    state: RwSignal<AuthState>,
}

impl<S: KeyValueStorage> AuthSession<S> {
    pub fn new(store: TokenStore<S>) -> Self {
        let state = RwSignal::new(AuthState::load(&store));
        Self { store, state }
    }

    pub fn state(&self) -> RwSignal<AuthState> {
        self.state
    }

    pub fn store(&self) -> &TokenStore<S> {
        &self.store
    }

    /// Resync the mirror from storage. Subscribers are only notified when the
    /// stored session actually differs from the mirror.
    pub fn refresh(&self) {
        let fresh = AuthState::load(&self.store);
        if self.state.with_untracked(|current| *current != fresh) {
            self.state.set(fresh);
        }
    }

    /// Persist a new session and mirror it.
    ///
    /// Storage follows the token store's partial-write rule; the mirror takes
    /// both values as given.
    pub fn set(&self, token: Option<String>, user: Option<UserProfile>) {
        self.store.write(token.as_deref(), user.as_ref());
        self.state.set(AuthState { token, user });
    }

    /// Clear storage and the mirror.
    pub fn logout(&self) {
        self.store.clear();
        self.state.set(AuthState::default());
    }

    /// Refresh, then report whether a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.refresh();
        self.state.with_untracked(AuthState::is_authenticated)
    }
}
