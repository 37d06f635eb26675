//! Stats page: per-dictionary progress counts and accumulated study time.

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;

use leptos::prelude::*;

use crate::app::BrowserDictionaries;
use crate::components::dictionary_picker::DictionaryPicker;
use crate::net::types::StatsSummary;

/// `3725` -> `"1h 02m"`, `65` -> `"1m 05s"`.
pub(crate) fn format_study_time(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else {
        format!("{minutes}m {:02}s", secs % 60)
    }
}

/// Share of known characters as a whole percent; zero for an empty dictionary.
pub(crate) fn known_percent(summary: &StatsSummary) -> u64 {
    if summary.total == 0 {
        return 0;
    }
    summary.known * 100 / summary.total
}

#[component]
pub fn StatsPage() -> impl IntoView {
    let dictionaries = expect_context::<BrowserDictionaries>();
    let dictionary_state = dictionaries.state();
    let api = StoredValue::new(dictionaries.api().clone());

    let summary = RwSignal::new(None::<StatsSummary>);
    let error = RwSignal::new(None::<String>);

    Effect::new(move || {
        let Some(id) = dictionary_state.with(|s| s.current_id) else {
            summary.set(None);
            return;
        };
        let api = api.get_value();
        leptos::task::spawn_local(async move {
            match api.stats_summary(id).await {
                Ok(found) => {
                    // Ignore a late reply for a dictionary no longer selected.
                    if dictionary_state.with_untracked(|s| s.current_id) == Some(id) {
                        summary.set(found);
                        error.set(None);
                    }
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    });

    let row = |label: &'static str, value: String| {
        view! {
            <div class="stats-row">
                <span class="stats-row__label">{label}</span>
                <span class="stats-row__value">{value}</span>
            </div>
        }
    };

    view! {
        <div class="stats-page">
            <header class="page-header">
                <h1>"Stats"</h1>
                <DictionaryPicker/>
            </header>
            {move || {
                summary
                    .get()
                    .map(|s| {
                        view! {
                            <section class="stats-grid">
                                {row("Characters", s.total.to_string())}
                                {row("Known", format!("{} ({}%)", s.known, known_percent(&s)))}
                                {row("Unknown", s.unknown.to_string())}
                                {row("Due today", s.due_today.to_string())}
                                {row("Study time", format_study_time(s.study_time_total))}
                            </section>
                        }
                    })
            }}
            {move || error.get().map(|e| view! { <p class="page-message">{e}</p> })}
        </div>
    }
}
