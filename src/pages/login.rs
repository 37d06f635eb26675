//! Login page: username + password against `/auth/login`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::{BrowserAuth, BrowserDictionaries};
use crate::config::DEFAULT_ROUTE;
use crate::net::types::{LoginRequest, LoginResponse, UserProfile};

const MISSING_FIELDS: &str = "Enter both username and password.";
const INVALID_CREDENTIALS: &str = "Invalid username or password.";
const MISSING_TOKEN: &str = "Login response did not include a token.";

fn validate_login_input(username: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS);
    }
    Ok(LoginRequest {
        username: username.to_owned(),
        password: password.to_owned(),
    })
}

/// Split a successful login body into what gets stored.
fn session_from_login(resp: LoginResponse) -> Result<(String, Option<UserProfile>), &'static str> {
    match resp.access_token.filter(|t| !t.is_empty()) {
        Some(token) => Ok((token, resp.user)),
        None => Err(MISSING_TOKEN),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<BrowserAuth>();
    let api = expect_context::<BrowserDictionaries>().api().clone();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let payload = match validate_login_input(&username.get_untracked(), &password.get_untracked()) {
            Ok(payload) => payload,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        let auth = auth.clone();
        let api = api.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api.login(&payload).await {
                Ok(Some(resp)) => match session_from_login(resp) {
                    Ok((token, user)) => {
                        auth.set(Some(token), user);
                        password.set(String::new());
                        info.set(String::new());
                        navigate(DEFAULT_ROUTE, NavigateOptions::default());
                    }
                    Err(msg) => info.set(msg.to_owned()),
                },
                Ok(None) => info.set(INVALID_CREDENTIALS.to_owned()),
                Err(e) => info.set(format!("Login failed: {}", e.user_message())),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Hanzi"</h1>
                <p class="login-card__subtitle">"Sign in to study"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
