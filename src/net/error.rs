//! Errors surfaced by REST calls.
//!
//! An expired session (HTTP 401) is deliberately absent: the HTTP client
//! handles it globally and callers only see an empty result.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Non-success status other than 401. `message` is the response body,
    /// or the status text when the body is empty.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },
    #[error("request could not be sent: {0}")]
    Transport(String),
    #[error("request body could not be encoded: {0}")]
    Encode(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("not available outside the browser")]
    Unavailable,
}

impl ApiError {
    /// Text suitable for a form-level error line.
    ///
    /// The server reports failures as `{"detail": "..."}`; that string is
    /// preferred over the raw body when present.
    pub fn user_message(&self) -> String {
        if let Self::RequestFailed { message, .. } = self {
            if let Some(detail) = detail_text(message) {
                return detail;
            }
        }
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn detail_text(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) => Some(detail.clone()),
        // Validation errors arrive as a list of {"msg": ...} entries.
        serde_json::Value::Array(entries) => {
            let msgs: Vec<&str> = entries
                .iter()
                .filter_map(|e| e.get("msg").and_then(serde_json::Value::as_str))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    }
}
