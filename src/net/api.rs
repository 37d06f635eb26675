//! Typed REST facade over [`HttpClient`].
//!
//! Each method maps one named operation to a fixed method + path and decodes
//! the response into its DTO. There is no business logic here; every call
//! carries exactly the HTTP client contract (`Ok(None)` on 401/204).

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::http::{HttpClient, RequestSpec, Transport};
use super::types::{
    CharacterInfo, CreateDictionary, Dictionary, DictionaryId, DictionaryList, ImportRequest, ImportResult,
    LoginRequest, LoginResponse, ReviewRequest, ReviewResult, SessionEnd, SessionEndRequest, SessionStart,
    StatsSummary, StatusResponse, StudyQueue, UpdateDictionary, UserProfile,
};
use crate::util::storage::{KeyValueStorage, TokenStore};

pub const LOGIN_PATH: &str = "/auth/login";
pub const ME_PATH: &str = "/auth/me";
pub const DICTIONARIES_PATH: &str = "/dictionaries";

fn dictionary_endpoint(id: DictionaryId) -> String {
    format!("{DICTIONARIES_PATH}/{id}")
}

fn study_queue_endpoint(id: DictionaryId) -> String {
    format!("{DICTIONARIES_PATH}/{id}/study/queue")
}

fn review_endpoint(id: DictionaryId) -> String {
    format!("{DICTIONARIES_PATH}/{id}/study/review")
}

fn session_start_endpoint(id: DictionaryId) -> String {
    format!("{DICTIONARIES_PATH}/{id}/study/session/start")
}

fn session_end_endpoint(id: DictionaryId) -> String {
    format!("{DICTIONARIES_PATH}/{id}/study/session/end")
}

fn import_endpoint(id: DictionaryId) -> String {
    format!("{DICTIONARIES_PATH}/{id}/characters/import")
}

fn character_info_endpoint(id: DictionaryId, hanzi: &str) -> String {
    format!("{DICTIONARIES_PATH}/{id}/characters/{}/info", urlencoding::encode(hanzi))
}

fn stats_summary_endpoint(id: DictionaryId) -> String {
    format!("{DICTIONARIES_PATH}/{id}/stats/summary")
}

#[derive(Clone)]
pub struct ApiClient<T, S> {
    http: HttpClient<T, S>,
}

impl<T: Transport, S: KeyValueStorage> ApiClient<T, S> {
    pub fn new(http: HttpClient<T, S>) -> Self {
        Self { http }
    }

    pub fn tokens(&self) -> &TokenStore<S> {
        self.http.tokens()
    }

    async fn call<R: DeserializeOwned>(&self, req: RequestSpec) -> Result<Option<R>, ApiError> {
        let Some(value) = self.http.request(req).await? else {
            return Ok(None);
        };
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `POST /auth/login`. Invalid credentials come back as a 401, so they
    /// surface as `Ok(None)` like any expired session.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the HTTP client or response decoding.
    pub async fn login(&self, payload: &LoginRequest) -> Result<Option<LoginResponse>, ApiError> {
        self.call(RequestSpec::post(LOGIN_PATH).json(payload)?).await
    }

    /// `GET /auth/me`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the HTTP client or response decoding.
    pub async fn me(&self) -> Result<Option<UserProfile>, ApiError> {
        self.call(RequestSpec::get(ME_PATH)).await
    }

    /// `GET /dictionaries`, unwrapped to the item list in server order.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the HTTP client or response decoding.
    pub async fn list_dictionaries(&self) -> Result<Option<Vec<Dictionary>>, ApiError> {
        let list: Option<DictionaryList> = self.call(RequestSpec::get(DICTIONARIES_PATH)).await?;
        Ok(list.map(DictionaryList::into_items))
    }

    /// `POST /dictionaries`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the HTTP client or response decoding.
    pub async fn create_dictionary(&self, payload: &CreateDictionary) -> Result<Option<Dictionary>, ApiError> {
        self.call(RequestSpec::post(DICTIONARIES_PATH).json(payload)?).await
    }

    /// `PATCH /dictionaries/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the HTTP client or response decoding.
    pub async fn update_dictionary(
        &self,
        id: DictionaryId,
        payload: &UpdateDictionary,
    ) -> Result<Option<Dictionary>, ApiError> {
        self.call(RequestSpec::patch(dictionary_endpoint(id)).json(payload)?)
            .await
    }

    /// `DELETE /dictionaries/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the HTTP client or response decoding.
    pub async fn delete_dictionary(&self, id: DictionaryId) -> Result<Option<StatusResponse>, ApiError> {
        self.call(RequestSpec::delete(dictionary_endpoint(id))).await
    }

    /// `GET /dictionaries/{id}/study/queue`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the HTTP client or response decoding.
    pub async fn study_queue(&self, id: DictionaryId) -> Result<Option<StudyQueue>, ApiError> {
        self.call(RequestSpec::get(study_queue_endpoint(id))).await
    }

    /// `POST /dictionaries/{id}/study/review`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the HTTP client or response decoding.
    pub async fn submit_review(
        &self,
        id: DictionaryId,
        payload: &ReviewRequest,
    ) -> Result<Option<ReviewResult>, ApiError> {
        self.call(RequestSpec::post(review_endpoint(id)).json(payload)?)
            .await
    }

    /// `POST /dictionaries/{id}/study/session/start` (no body).
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the HTTP client or response decoding.
    pub async fn start_session(&self, id: DictionaryId) -> Result<Option<SessionStart>, ApiError> {
        self.call(RequestSpec::post(session_start_endpoint(id))).await
    }

    /// `POST /dictionaries/{id}/study/session/end`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the HTTP client or response decoding.
    pub async fn end_session(
        &self,
        id: DictionaryId,
        payload: &SessionEndRequest,
    ) -> Result<Option<SessionEnd>, ApiError> {
        self.call(RequestSpec::post(session_end_endpoint(id)).json(payload)?)
            .await
    }

    /// `POST /dictionaries/{id}/characters/import` with body `{ "items": [...] }`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the HTTP client or response decoding.
    pub async fn import_characters(
        &self,
        id: DictionaryId,
        items: Vec<String>,
    ) -> Result<Option<ImportResult>, ApiError> {
        let payload = ImportRequest { items };
        self.call(RequestSpec::post(import_endpoint(id)).json(&payload)?)
            .await
    }

    /// `GET /dictionaries/{id}/characters/{hanzi}/info`; `hanzi` is
    /// percent-encoded into the path.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the HTTP client or response decoding.
    pub async fn character_info(&self, id: DictionaryId, hanzi: &str) -> Result<Option<CharacterInfo>, ApiError> {
        self.call(RequestSpec::get(character_info_endpoint(id, hanzi)))
            .await
    }

    /// `GET /dictionaries/{id}/stats/summary`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the HTTP client or response decoding.
    pub async fn stats_summary(&self, id: DictionaryId) -> Result<Option<StatsSummary>, ApiError> {
        self.call(RequestSpec::get(stats_summary_endpoint(id))).await
    }
}
