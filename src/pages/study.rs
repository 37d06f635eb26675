//! Study page: run a review session over the current dictionary's queue.
//!
//! SYSTEM CONTEXT
//! ==============
//! Starting a session records it server-side and pulls the due queue. Each
//! rating is posted immediately; the server reschedules the card. Ending the
//! session closes the server-side interval used for study-time stats.

#[cfg(test)]
#[path = "study_test.rs"]
mod study_test;

use leptos::prelude::*;

use crate::app::{BrowserApi, BrowserDictionaries};
use crate::components::dictionary_picker::DictionaryPicker;
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::http::Transport;
use crate::net::types::{CharacterInfo, DictionaryId, Rating, ReviewRequest, SessionEndRequest, SessionStart};
use crate::state::study::ReviewDeck;
use crate::util::storage::KeyValueStorage;

/// Summary line shown after a session ends.
pub(crate) fn session_summary(deck: &ReviewDeck) -> String {
    match deck.reviewed() {
        0 => "Session ended. No cards reviewed.".to_owned(),
        1 => format!("Session ended. Reviewed 1 card, {} known.", deck.known()),
        n => format!("Session ended. Reviewed {n} cards, {} known.", deck.known()),
    }
}

/// Session bound to the dictionary it was started on.
#[derive(Clone, Debug, PartialEq)]
struct ActiveSession {
    dictionary_id: DictionaryId,
    session: SessionStart,
}

#[component]
pub fn StudyPage() -> impl IntoView {
    let dictionaries = expect_context::<BrowserDictionaries>();
    let dictionary_state = dictionaries.state();
    let api = StoredValue::new(dictionaries.api().clone());

    let active = RwSignal::new(None::<ActiveSession>);
    let deck = RwSignal::new(ReviewDeck::default());
    let info = RwSignal::new(None::<CharacterInfo>);
    let busy = RwSignal::new(false);
    let message = RwSignal::new(String::new());

    let on_start = Callback::new(move |()| {
        if busy.get_untracked() {
            return;
        }
        let Some(dictionary_id) = dictionary_state.with_untracked(|s| s.current().map(|d| d.id)) else {
            message.set("Choose a dictionary first.".to_owned());
            return;
        };
        busy.set(true);
        message.set(String::new());
        let api: BrowserApi = api.get_value();
        leptos::task::spawn_local(async move {
            match start_session(&api, dictionary_id).await {
                Ok(Some((session, queue))) => {
                    if queue.is_finished() {
                        message.set("Nothing is due right now.".to_owned());
                    }
                    deck.set(queue);
                    info.set(None);
                    active.set(Some(ActiveSession { dictionary_id, session }));
                }
                Ok(None) => {}
                Err(e) => message.set(format!("Could not start session: {}", e.user_message())),
            }
            busy.set(false);
        });
    });

    let on_reveal = Callback::new(move |()| {
        let Some(session) = active.get_untracked() else {
            return;
        };
        let Some(hanzi) = deck.with_untracked(|d| d.current().map(|c| c.hanzi.clone())) else {
            return;
        };
        deck.update(ReviewDeck::reveal);
        let api: BrowserApi = api.get_value();
        leptos::task::spawn_local(async move {
            match api.character_info(session.dictionary_id, &hanzi).await {
                Ok(found) => info.set(found),
                Err(e) => log::warn!("character info for {hanzi} failed: {e}"),
            }
        });
    });

    let on_rate = Callback::new(move |rating: Rating| {
        let Some(session) = active.get_untracked() else {
            return;
        };
        let Some(card) = deck.try_update(|d| d.record(rating)).flatten() else {
            return;
        };
        info.set(None);
        let api: BrowserApi = api.get_value();
        leptos::task::spawn_local(async move {
            let review = ReviewRequest::new(card.hanzi.clone(), rating);
            if let Err(e) = api.submit_review(session.dictionary_id, &review).await {
                message.set(format!("Review of {} not saved: {}", card.hanzi, e.user_message()));
            }
        });
    });

    let on_end = Callback::new(move |()| {
        let Some(session) = active.get_untracked() else {
            return;
        };
        busy.set(true);
        let api: BrowserApi = api.get_value();
        leptos::task::spawn_local(async move {
            let payload = SessionEndRequest {
                session_id: session.session.session_id,
                ended_at: None,
            };
            match api.end_session(session.dictionary_id, &payload).await {
                Ok(_) => {
                    message.set(deck.with_untracked(session_summary));
                    active.set(None);
                    deck.set(ReviewDeck::default());
                    info.set(None);
                }
                Err(e) => message.set(format!("Could not end session: {}", e.user_message())),
            }
            busy.set(false);
        });
    });

    let card_view = move || {
        let card = deck.with(|d| d.current().cloned())?;
        let answer = if deck.with(ReviewDeck::is_revealed) {
            view! {
                <div class="study-card__answer">
                    <div class="study-card__pinyin">{card.pinyin.clone()}</div>
                    <ul class="study-card__words">
                        {move || {
                            info.with(|i| i.as_ref().map(|i| i.common_words.clone()).unwrap_or_default())
                                .into_iter()
                                .map(|w| view! { <li>{w.word}</li> })
                                .collect_view()
                        }}
                    </ul>
                    <div class="study-card__ratings">
                        {Rating::ALL
                            .into_iter()
                            .map(|rating| {
                                view! {
                                    <button class="study-card__rate" on:click=move |_| on_rate.run(rating)>
                                        {rating.label()}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            }
                .into_any()
        } else {
            view! {
                <button class="study-card__reveal" on:click=move |_| on_reveal.run(())>
                    "Show answer"
                </button>
            }
                .into_any()
        };
        Some(view! {
            <div class="study-card" class:study-card--new=card.is_new>
                <div class="study-card__hanzi">{card.hanzi.clone()}</div>
                {answer}
            </div>
        })
    };

    view! {
        <div class="study-page">
            <header class="page-header">
                <h1>"Study"</h1>
                <DictionaryPicker/>
            </header>
            <Show
                when=move || active.with(Option::is_none)
                fallback=move || {
                    view! {
                        <div class="study-page__session">
                            <span class="study-page__progress">
                                {move || deck.with(|d| format!("{} / {}", d.reviewed(), d.total()))}
                            </span>
                            <button on:click=move |_| on_end.run(()) disabled=move || busy.get()>
                                "End session"
                            </button>
                        </div>
                    }
                }
            >
                <button on:click=move |_| on_start.run(()) disabled=move || busy.get()>
                    "Start session"
                </button>
            </Show>
            {card_view}
            <Show when=move || !message.get().is_empty()>
                <p class="page-message">{move || message.get()}</p>
            </Show>
        </div>
    }
}

/// Open a server-side session and fetch its queue.
///
/// A session whose queue cannot be loaded is ended again right away; the
/// caller has nothing to end it with.
///
/// # Errors
///
/// Propagates [`ApiError`] from the start or queue call.
pub(crate) async fn start_session<T: Transport, S: KeyValueStorage>(
    api: &ApiClient<T, S>,
    dictionary_id: DictionaryId,
) -> Result<Option<(SessionStart, ReviewDeck)>, ApiError> {
    let Some(session) = api.start_session(dictionary_id).await? else {
        return Ok(None);
    };
    match api.study_queue(dictionary_id).await {
        Ok(Some(queue)) => Ok(Some((session, ReviewDeck::new(queue.items)))),
        Ok(None) => {
            // After a 401 the token is gone and the session cannot be closed.
            if api.tokens().read().is_some() {
                abandon_session(api, dictionary_id, &session).await;
            }
            Ok(None)
        }
        Err(e) => {
            abandon_session(api, dictionary_id, &session).await;
            Err(e)
        }
    }
}

async fn abandon_session<T: Transport, S: KeyValueStorage>(
    api: &ApiClient<T, S>,
    dictionary_id: DictionaryId,
    session: &SessionStart,
) {
    let payload = SessionEndRequest {
        session_id: session.session_id,
        ended_at: None,
    };
    if let Err(e) = api.end_session(dictionary_id, &payload).await {
        log::warn!("could not close session {}: {e}", session.session_id);
    }
}
