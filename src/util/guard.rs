//! Route guard shared by every page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages never check auth themselves. The guard re-evaluates on every path
//! change and every auth change, resyncing the auth mirror from storage first
//! because storage may have been cleared by a 401 or another tab.
//!
//! The guard is an effect, so it runs after the new route has rendered, not
//! before navigation. A protected page mounts briefly before the redirect and
//! must not assume a token is present.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

use crate::config::{DEFAULT_ROUTE, LOGIN_ROUTE};
use crate::state::auth::AuthSession;
use crate::util::storage::KeyValueStorage;

/// Outcome of one navigation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

fn is_login_route(path: &str) -> bool {
    let trimmed = path.trim_end_matches('/');
    trimmed == LOGIN_ROUTE
}

/// Decide whether `path` may be shown.
///
/// Signed-out users may only see the login route; signed-in users are sent
/// away from it to the default route.
pub fn evaluate(path: &str, authenticated: bool) -> GuardDecision {
    match (authenticated, is_login_route(path)) {
        (false, false) => GuardDecision::Redirect(LOGIN_ROUTE),
        (true, true) => GuardDecision::Redirect(DEFAULT_ROUTE),
        _ => GuardDecision::Allow,
    }
}

/// Install the guard effect. Must run inside the `<Router>`.
pub fn install_route_guard<S, F>(session: AuthSession<S>, navigate: F)
where
    S: KeyValueStorage + Clone + Send + Sync + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let location = use_location();
    let state = session.state();
    Effect::new(move || {
        let path = location.pathname.get();
        state.track();
        let authenticated = session.is_authenticated();
        if let GuardDecision::Redirect(target) = evaluate(&path, authenticated) {
            log::debug!("route guard: {path} -> {target}");
            navigate(
                target,
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
    });
}
