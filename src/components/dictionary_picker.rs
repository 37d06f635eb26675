//! Dictionary selector shared by the study, input, and stats pages.
//!
//! DESIGN
//! ======
//! Mounting a picker reloads the dictionary list so each page sees fresh
//! ownership and visibility. The selection lives in the shared store, so
//! switching pages keeps the chosen dictionary.

#[cfg(test)]
#[path = "dictionary_picker_test.rs"]
mod dictionary_picker_test;

use leptos::prelude::*;

use crate::app::BrowserDictionaries;
use crate::net::types::{Dictionary, DictionaryId};

/// Option text for one dictionary.
pub(crate) fn option_label(dictionary: &Dictionary) -> String {
    if dictionary.is_owner {
        format!("{} ({})", dictionary.name, dictionary.visibility.label())
    } else {
        match dictionary.owner_id.as_deref() {
            Some(owner) => format!("{} (by {owner})", dictionary.name),
            None => format!("{} ({})", dictionary.name, dictionary.visibility.label()),
        }
    }
}

pub(crate) fn parse_dictionary_id(raw: &str) -> Option<DictionaryId> {
    raw.trim().parse().ok()
}

/// Reload the shared dictionary list in the background.
pub fn spawn_dictionary_load(store: BrowserDictionaries) {
    leptos::task::spawn_local(async move {
        if let Err(e) = store.load().await {
            log::warn!("dictionary reload failed: {e}");
        }
    });
}

#[component]
pub fn DictionaryPicker() -> impl IntoView {
    let dictionaries = expect_context::<BrowserDictionaries>();
    let state = dictionaries.state();
    spawn_dictionary_load(dictionaries);

    let on_change = move |ev: leptos::ev::Event| {
        if let Some(id) = parse_dictionary_id(&event_target_value(&ev)) {
            state.update(|s| s.set_current(id));
        }
    };

    view! {
        <label class="dictionary-picker">
            <span class="dictionary-picker__label">"Dictionary"</span>
            <select
                class="dictionary-picker__select"
                disabled=move || state.with(|s| s.items.is_empty())
                prop:value=move || state.with(|s| s.current_id.map(|id| id.to_string()).unwrap_or_default())
                on:change=on_change
            >
                <For
                    each=move || state.with(|s| s.items.clone())
                    key=|d| d.id
                    children=move |d: Dictionary| {
                        view! { <option value=d.id.to_string()>{option_label(&d)}</option> }
                    }
                />
            </select>
            <Show when=move || state.with(|s| s.loading)>
                <span class="dictionary-picker__status">"Loading..."</span>
            </Show>
            {move || state.with(|s| s.error.clone()).map(|e| view! { <span class="dictionary-picker__error">{e}</span> })}
        </label>
    }
}
