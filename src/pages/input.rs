//! Input page: manage dictionaries and import characters into the current one.
//!
//! The server filters imports (single CJK ideographs, no duplicates) and
//! reports what it skipped; the client only splits pasted text into
//! candidate characters.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use leptos::prelude::*;

use crate::app::{BrowserApi, BrowserDictionaries};
use crate::components::dictionary_picker::{DictionaryPicker, spawn_dictionary_load};
use crate::net::types::{CreateDictionary, ImportResult, UpdateDictionary, Visibility};

/// Distinct non-whitespace characters of `text`, in first-seen order.
pub(crate) fn parse_import_items(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    text.chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .filter(|c| seen.insert(*c))
        .map(String::from)
        .collect()
}

pub(crate) fn validate_dictionary_name(raw: &str) -> Result<String, &'static str> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("Enter a dictionary name.");
    }
    Ok(name.to_owned())
}

pub(crate) fn import_summary(result: ImportResult) -> String {
    format!("Imported {}, skipped {}.", result.imported, result.skipped)
}

fn parse_visibility(raw: &str) -> Visibility {
    match raw {
        "public" => Visibility::Public,
        "shared" => Visibility::Shared,
        _ => Visibility::Private,
    }
}

#[component]
pub fn InputPage() -> impl IntoView {
    let dictionaries = expect_context::<BrowserDictionaries>();
    let state = dictionaries.state();
    let store = StoredValue::new(dictionaries.clone());
    let api = StoredValue::new(dictionaries.api().clone());

    let new_name = RwSignal::new(String::new());
    let new_visibility = RwSignal::new(Visibility::Private);
    let rename = RwSignal::new(String::new());
    let import_text = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let message = RwSignal::new(String::new());

    let current_is_owned = move || state.with(|s| s.current().is_some_and(|d| d.is_owner));

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let name = match validate_dictionary_name(&new_name.get_untracked()) {
            Ok(name) => name,
            Err(msg) => {
                message.set(msg.to_owned());
                return;
            }
        };
        let payload = CreateDictionary {
            name,
            visibility: Some(new_visibility.get_untracked()),
        };
        busy.set(true);
        let api: BrowserApi = api.get_value();
        let store = store.get_value();
        leptos::task::spawn_local(async move {
            match api.create_dictionary(&payload).await {
                Ok(Some(created)) => {
                    new_name.set(String::new());
                    message.set(format!("Created \"{}\".", created.name));
                    store.set_current(created.id);
                    spawn_dictionary_load(store);
                }
                Ok(None) => {}
                Err(e) => message.set(e.user_message()),
            }
            busy.set(false);
        });
    };

    let on_rename = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = state.with_untracked(|s| s.current().map(|d| d.id)) else {
            return;
        };
        let name = match validate_dictionary_name(&rename.get_untracked()) {
            Ok(name) => name,
            Err(msg) => {
                message.set(msg.to_owned());
                return;
            }
        };
        let patch = UpdateDictionary {
            name: Some(name),
            visibility: None,
        };
        busy.set(true);
        let api: BrowserApi = api.get_value();
        let store = store.get_value();
        leptos::task::spawn_local(async move {
            match api.update_dictionary(id, &patch).await {
                Ok(Some(updated)) => {
                    rename.set(String::new());
                    message.set(format!("Renamed to \"{}\".", updated.name));
                    spawn_dictionary_load(store);
                }
                Ok(None) => {}
                Err(e) => message.set(e.user_message()),
            }
            busy.set(false);
        });
    };

    let on_visibility = move |ev: leptos::ev::Event| {
        let Some(id) = state.with_untracked(|s| s.current().map(|d| d.id)) else {
            return;
        };
        let patch = UpdateDictionary {
            name: None,
            visibility: Some(parse_visibility(&event_target_value(&ev))),
        };
        let api: BrowserApi = api.get_value();
        let store = store.get_value();
        leptos::task::spawn_local(async move {
            match api.update_dictionary(id, &patch).await {
                Ok(_) => spawn_dictionary_load(store),
                Err(e) => message.set(e.user_message()),
            }
        });
    };

    let on_delete = move |_| {
        let Some(current) = state.with_untracked(|s| s.current().cloned()) else {
            return;
        };
        busy.set(true);
        let api: BrowserApi = api.get_value();
        let store = store.get_value();
        leptos::task::spawn_local(async move {
            match api.delete_dictionary(current.id).await {
                Ok(_) => {
                    message.set(format!("Deleted \"{}\".", current.name));
                    store.state().update(|s| s.current_id = None);
                    spawn_dictionary_load(store);
                }
                Err(e) => message.set(e.user_message()),
            }
            busy.set(false);
        });
    };

    let on_import = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = state.with_untracked(|s| s.current().map(|d| d.id)) else {
            message.set("Choose a dictionary first.".to_owned());
            return;
        };
        let items = parse_import_items(&import_text.get_untracked());
        if items.is_empty() {
            message.set("Paste some characters to import.".to_owned());
            return;
        }
        busy.set(true);
        let api: BrowserApi = api.get_value();
        leptos::task::spawn_local(async move {
            match api.import_characters(id, items).await {
                Ok(Some(result)) => {
                    import_text.set(String::new());
                    message.set(import_summary(result));
                }
                Ok(None) => {}
                Err(e) => message.set(e.user_message()),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="input-page">
            <header class="page-header">
                <h1>"Input"</h1>
                <DictionaryPicker/>
            </header>

            <section class="input-page__section">
                <h2>"Import characters"</h2>
                <form class="input-form" on:submit=on_import>
                    <textarea
                        class="input-form__text"
                        rows="6"
                        placeholder="你好世界"
                        prop:value=move || import_text.get()
                        on:input=move |ev| import_text.set(event_target_value(&ev))
                    ></textarea>
                    <span class="input-form__count">
                        {move || format!("{} distinct", import_text.with(|t| parse_import_items(t).len()))}
                    </span>
                    <button type="submit" disabled=move || busy.get()>"Import"</button>
                </form>
            </section>

            <section class="input-page__section">
                <h2>"New dictionary"</h2>
                <form class="input-form" on:submit=on_create>
                    <input
                        type="text"
                        placeholder="Name"
                        prop:value=move || new_name.get()
                        on:input=move |ev| new_name.set(event_target_value(&ev))
                    />
                    <select on:change=move |ev| new_visibility.set(parse_visibility(&event_target_value(&ev)))>
                        <option value="private">"Private"</option>
                        <option value="public">"Public"</option>
                    </select>
                    <button type="submit" disabled=move || busy.get()>"Create"</button>
                </form>
            </section>

            <Show when=current_is_owned>
                <section class="input-page__section">
                    <h2>"Current dictionary"</h2>
                    <form class="input-form" on:submit=on_rename>
                        <input
                            type="text"
                            placeholder="New name"
                            prop:value=move || rename.get()
                            on:input=move |ev| rename.set(event_target_value(&ev))
                        />
                        <button type="submit" disabled=move || busy.get()>"Rename"</button>
                    </form>
                    <select
                        prop:value=move || {
                            state.with(|s| s.current().map(|d| d.visibility.label()).unwrap_or("private"))
                        }
                        on:change=on_visibility
                    >
                        <option value="private">"Private"</option>
                        <option value="public">"Public"</option>
                    </select>
                    <button class="input-page__delete" on:click=on_delete disabled=move || busy.get()>
                        "Delete"
                    </button>
                </section>
            </Show>

            <Show when=move || !message.get().is_empty()>
                <p class="page-message">{move || message.get()}</p>
            </Show>
        </div>
    }
}
