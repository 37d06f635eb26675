//! Root application component with routing and context providers.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
    hooks::use_navigate,
};

use crate::components::nav_bar::NavBar;
use crate::config::{ClientConfig, DEFAULT_ROUTE};
use crate::net::api::ApiClient;
use crate::net::http::{FetchTransport, HttpClient, Transport};
use crate::pages::{input::InputPage, login::LoginPage, stats::StatsPage, study::StudyPage};
use crate::state::auth::AuthSession;
use crate::state::dictionary::{DictionaryState, DictionaryStore};
use crate::util::guard::install_route_guard;
use crate::util::storage::{BrowserStorage, KeyValueStorage, TokenStore};

pub type BrowserAuth = AuthSession<BrowserStorage>;
pub type BrowserApi = ApiClient<FetchTransport, BrowserStorage>;
pub type BrowserDictionaries = DictionaryStore<FetchTransport, BrowserStorage>;

/// Wire the session, HTTP client, and dictionary store over one storage.
///
/// The HTTP client's unauthorized hook resyncs the auth mirror and drops the
/// dictionary list; with storage already cleared that signs the user out and
/// the route guard takes over. The next user starts with no stale selection.
pub fn build_services<T, S>(config: &ClientConfig, transport: T, storage: S) -> (AuthSession<S>, DictionaryStore<T, S>)
where
    T: Transport,
    S: KeyValueStorage + Clone + Send + Sync + 'static,
{
    let tokens = TokenStore::new(storage);
    let auth = AuthSession::new(tokens.clone());
    let expired = auth.clone();
    let dictionary_state = RwSignal::new(DictionaryState::default());
    let http = HttpClient::new(config.api_base.clone(), transport, tokens).with_unauthorized_handler(move || {
        expired.refresh();
        dictionary_state.update(DictionaryState::reset);
    });
    (auth, DictionaryStore::with_state(ApiClient::new(http), dictionary_state))
}

/// Root application component.
///
/// Provides the shared stores and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_env();
    log::info!("api base: {}", config.api_base);
    let (auth, dictionaries) = build_services(&config, FetchTransport, BrowserStorage);
    provide_context(auth);
    provide_context(dictionaries);

    view! {
        <Title text="Hanzi"/>

        <Router>
            <RouteGuard/>
            <NavBar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path=DEFAULT_ROUTE/> }/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("study") view=StudyPage/>
                    <Route path=StaticSegment("input") view=InputPage/>
                    <Route path=StaticSegment("stats") view=StatsPage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Installs the auth redirect effect; renders nothing.
#[component]
fn RouteGuard() -> impl IntoView {
    let auth = expect_context::<BrowserAuth>();
    install_route_guard(auth, use_navigate());
}
