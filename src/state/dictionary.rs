//! Dictionary list and current-selection state.
//!
//! DESIGN
//! ======
//! The server returns dictionaries in its own order; the client re-sorts on
//! every load (owned first, then private first, then by name) and never
//! persists that order. Selection is an id rather than an index so a reload
//! that reorders the list keeps the user's choice.
//!
//! TRADE-OFFS
//! ==========
//! `set_current` does not check that the id is in the list, which allows
//! selecting a dictionary before the fetch that contains it lands. Lookups
//! through `current` treat unknown ids as no selection. Overlapping `load`
//! calls are not cancelled, so a slow older response can overwrite a newer one.

#[cfg(test)]
#[path = "dictionary_test.rs"]
mod dictionary_test;

use std::cmp::Ordering;

use leptos::prelude::*;

use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::http::Transport;
use crate::net::types::{Dictionary, DictionaryId};
use crate::util::storage::KeyValueStorage;

/// Locale-aware name comparison.
///
/// The browser build delegates to `String.prototype.localeCompare`; elsewhere
/// names compare case-folded, with code point order as the tie-break.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    #[cfg(feature = "csr")]
    {
        let a = js_sys::JsString::from(a);
        a.locale_compare(b, &js_sys::Array::new()).cmp(&0)
    }
    #[cfg(not(feature = "csr"))]
    {
        a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
    }
}

/// Display order: owned before shared-with-me, private before non-private,
/// then name ascending.
pub fn compare_dictionaries(a: &Dictionary, b: &Dictionary) -> Ordering {
    b.is_owner
        .cmp(&a.is_owner)
        .then_with(|| b.visibility.is_private().cmp(&a.visibility.is_private()))
        .then_with(|| compare_names(&a.name, &b.name))
}

pub fn sort_dictionaries(items: &mut [Dictionary]) {
    items.sort_by(compare_dictionaries);
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DictionaryState {
    pub items: Vec<Dictionary>,
    pub current_id: Option<DictionaryId>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DictionaryState {
    /// Empty list, no selection.
    pub fn reset(&mut self) {
        self.items.clear();
        self.current_id = None;
        self.loading = false;
        self.error = None;
    }

    /// Sort and store a freshly fetched list, selecting the first entry when
    /// nothing is selected yet.
    pub fn replace(&mut self, mut items: Vec<Dictionary>) {
        sort_dictionaries(&mut items);
        self.items = items;
        if self.current_id.is_none() {
            self.current_id = self.items.first().map(|d| d.id);
        }
    }

    pub fn set_current(&mut self, id: DictionaryId) {
        self.current_id = Some(id);
    }

    /// The selected dictionary, or `None` when nothing is selected or the
    /// selected id is not in the list.
    pub fn current(&self) -> Option<&Dictionary> {
        let id = self.current_id?;
        self.items.iter().find(|d| d.id == id)
    }
}

/// API facade plus the reactive dictionary list.
#[derive(Clone)]
pub struct DictionaryStore<T, S> {
    api: ApiClient<T, S>,
    state: RwSignal<DictionaryState>,
}

impl<T: Transport, S: KeyValueStorage> DictionaryStore<T, S> {
    pub fn new(api: ApiClient<T, S>) -> Self {
        Self::with_state(api, RwSignal::new(DictionaryState::default()))
    }

    /// Build over an existing signal, so hooks created before the store can
    /// already reach its state.
    pub fn with_state(api: ApiClient<T, S>, state: RwSignal<DictionaryState>) -> Self {
        Self { api, state }
    }

    pub fn state(&self) -> RwSignal<DictionaryState> {
        self.state
    }

    pub fn api(&self) -> &ApiClient<T, S> {
        &self.api
    }

    /// Fetch, sort, and store the dictionary list.
    ///
    /// Without a stored token the list and selection are reset and nothing is
    /// fetched. A 401 during the fetch resets the same way.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the list call; the message is also kept in
    /// `DictionaryState::error` and the previous list is left in place.
    pub async fn load(&self) -> Result<Vec<Dictionary>, ApiError> {
        if self.api.tokens().read().is_none() {
            self.state.update(DictionaryState::reset);
            return Ok(Vec::new());
        }

        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });
        match self.api.list_dictionaries().await {
            Ok(Some(items)) => {
                self.state.update(|s| {
                    s.replace(items);
                    s.loading = false;
                });
                Ok(self.state.with_untracked(|s| s.items.clone()))
            }
            Ok(None) => {
                self.state.update(DictionaryState::reset);
                Ok(Vec::new())
            }
            Err(e) => {
                log::warn!("dictionary list failed: {e}");
                self.state.update(|s| {
                    s.loading = false;
                    s.error = Some(e.user_message());
                });
                Err(e)
            }
        }
    }

    /// Drop the list and selection, e.g. when the session ends.
    pub fn reset(&self) {
        self.state.update(DictionaryState::reset);
    }

    pub fn set_current(&self, id: DictionaryId) {
        self.state.update(|s| s.set_current(id));
    }

    pub fn current(&self) -> Option<Dictionary> {
        self.state.with_untracked(|s| s.current().cloned())
    }

    pub fn current_id(&self) -> Option<DictionaryId> {
        self.state.with_untracked(|s| s.current_id)
    }
}
