//! Top navigation: page links, signed-in user, and logout.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::{BrowserAuth, BrowserDictionaries};
use crate::state::auth::AuthState;

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<BrowserAuth>();
    let dictionaries = expect_context::<BrowserDictionaries>();
    let state = auth.state();

    // Storage and both mirrors are cleared; the route guard handles the redirect.
    let on_logout = Callback::new(move |()| {
        auth.logout();
        dictionaries.reset();
    });

    view! {
        <Show when=move || state.with(AuthState::is_authenticated)>
            <nav class="nav-bar">
                <A href="/study">"Study"</A>
                <A href="/input">"Input"</A>
                <A href="/stats">"Stats"</A>
                <span class="nav-bar__spacer"></span>
                <span class="nav-bar__user">
                    {move || state.with(AuthState::display_name).unwrap_or_default()}
                </span>
                <button class="nav-bar__logout" on:click=move |_| on_logout.run(())>
                    "Log out"
                </button>
            </nav>
        </Show>
    }
}
