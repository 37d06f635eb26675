//! Scripted transport for exercising the HTTP stack without a browser.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::error::ApiError;
use super::http::{PreparedRequest, RawResponse, Transport};

#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<RawResponse>>>,
    sent: Arc<Mutex<Vec<PreparedRequest>>>,
}

impl ScriptedTransport {
    pub(crate) fn respond(&self, status: u16, body: &str) -> &Self {
        let status_text = match status {
            200 => "OK",
            204 => "No Content",
            401 => "Unauthorized",
            404 => "Not Found",
            500 => "Internal Server Error",
            _ => "",
        };
        self.responses.lock().unwrap().push_back(RawResponse {
            status,
            status_text: status_text.to_owned(),
            body: body.to_owned(),
        });
        self
    }

    pub(crate) fn respond_json(&self, body: serde_json::Value) -> &Self {
        self.respond(200, &body.to_string())
    }

    pub(crate) fn sent(&self) -> Vec<PreparedRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn last_sent(&self) -> PreparedRequest {
        self.sent().pop().expect("no request was sent")
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, ApiError> {
        self.sent.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ApiError::Transport("no scripted response".to_owned()))
    }
}
