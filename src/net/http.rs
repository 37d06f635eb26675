//! JSON-over-HTTP client shared by every REST call.
//!
//! SYSTEM CONTEXT
//! ==============
//! All API traffic funnels through [`HttpClient::request`]: it resolves the
//! path against the configured base URL, attaches the stored bearer token,
//! and applies the one cross-cutting policy of this layer, namely that a 401
//! ends the session.
//!
//! DESIGN
//! ======
//! The wire is behind [`Transport`] so the browser build can use `fetch`
//! through `gloo-net` while native tests script responses. Navigation after a
//! 401 is not done here; the client fires its unauthorized callback and the
//! hosting app decides where to go.
//!
//! ERROR HANDLING
//! ==============
//! 401 -> `Ok(None)` after clearing storage. Other non-2xx -> `RequestFailed`.
//! 204 -> `Ok(None)`. No retries.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;

use serde::Serialize;

use super::error::ApiError;
use crate::util::storage::{KeyValueStorage, TokenStore};

const STATUS_NO_CONTENT: u16 = 204;
const STATUS_UNAUTHORIZED: u16 = 401;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Caller-side description of a request: method, relative path, optional
/// JSON body, and extra headers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON-encoded body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let raw = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(raw);
        Ok(self)
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Fully resolved request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl PreparedRequest {
    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
    headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    headers.push((name.to_owned(), value));
}

/// Status line and body text of a completed response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// What a response means to the caller once status rules are applied.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseOutcome {
    Unauthorized,
    Empty,
    Json(serde_json::Value),
}

/// Apply the status rules, in order: 401, not-ok, 204, JSON body.
///
/// # Errors
///
/// Returns [`ApiError::RequestFailed`] for non-2xx statuses other than 401 and
/// [`ApiError::Decode`] when a 2xx body is not JSON.
pub fn interpret_response(response: RawResponse) -> Result<ResponseOutcome, ApiError> {
    if response.status == STATUS_UNAUTHORIZED {
        return Ok(ResponseOutcome::Unauthorized);
    }
    if !response.ok() {
        let message = if response.body.is_empty() {
            response.status_text
        } else {
            response.body
        };
        return Err(ApiError::RequestFailed {
            status: response.status,
            message,
        });
    }
    if response.status == STATUS_NO_CONTENT || response.body.trim().is_empty() {
        return Ok(ResponseOutcome::Empty);
    }
    serde_json::from_str(&response.body)
        .map(ResponseOutcome::Json)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Sends prepared requests over the wire.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response could be obtained.
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, ApiError>;
}

/// Browser `fetch` via `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::{Method as FetchMethod, RequestBuilder};

            let method = match request.method {
                Method::Get => FetchMethod::GET,
                Method::Post => FetchMethod::POST,
                Method::Patch => FetchMethod::PATCH,
                Method::Delete => FetchMethod::DELETE,
            };
            let mut builder = RequestBuilder::new(&request.url).method(method);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let built = match request.body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Transport(e.to_string()))?;
            let resp = built.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = resp.status();
            let status_text = resp.status_text();
            let body = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            Ok(RawResponse {
                status,
                status_text,
                body,
            })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }
}

/// Invoked after a 401 has cleared stored credentials.
pub type UnauthorizedHandler = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct HttpClient<T, S> {
    base_url: String,
    transport: T,
    tokens: TokenStore<S>,
    on_unauthorized: Option<UnauthorizedHandler>,
}

impl<T: Transport, S: KeyValueStorage> HttpClient<T, S> {
    pub fn new(base_url: impl Into<String>, transport: T, tokens: TokenStore<S>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            tokens,
            on_unauthorized: None,
        }
    }

    #[must_use]
    pub fn with_unauthorized_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_unauthorized = Some(Arc::new(handler));
        self
    }

    pub fn tokens(&self) -> &TokenStore<S> {
        &self.tokens
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve URL and headers for `req` using the currently stored token.
    pub fn prepare(&self, req: RequestSpec) -> PreparedRequest {
        let mut headers = req.headers;
        set_header(&mut headers, "Content-Type", "application/json".to_owned());
        if let Some(token) = self.tokens.read() {
            set_header(&mut headers, "Authorization", format!("Bearer {token}"));
        }
        PreparedRequest {
            method: req.method,
            url: format!("{}{}", self.base_url, req.path),
            headers,
            body: req.body,
        }
    }

    /// Send `req` and decode the JSON response.
    ///
    /// Returns `Ok(None)` for 204 responses and for 401 responses; the latter
    /// also clears stored credentials and fires the unauthorized handler.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport failures, non-2xx statuses other
    /// than 401, and 2xx bodies that are not JSON.
    pub async fn request(&self, req: RequestSpec) -> Result<Option<serde_json::Value>, ApiError> {
        let method = req.method;
        let path = req.path.clone();
        log::debug!("api request: {} {path}", method.as_str());

        let response = self.transport.send(self.prepare(req)).await?;
        match interpret_response(response) {
            Ok(ResponseOutcome::Unauthorized) => {
                log::info!("api session expired: {} {path}", method.as_str());
                self.tokens.clear();
                if let Some(handler) = &self.on_unauthorized {
                    handler();
                }
                Ok(None)
            }
            Ok(ResponseOutcome::Empty) => Ok(None),
            Ok(ResponseOutcome::Json(value)) => Ok(Some(value)),
            Err(e) => {
                log::warn!("api request failed: {} {path}: {e}", method.as_str());
                Err(e)
            }
        }
    }
}
