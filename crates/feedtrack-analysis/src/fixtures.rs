//! In-crate transport fake for unit tests.

use crate::error::TransportError;
use crate::transport::{GenerateContentRequest, GenerateContentResponse, GenerationTransport};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::VecDeque;

pub(crate) type Reply = Result<GenerateContentResponse, TransportError>;

/// Replays canned replies in order and records what was asked.
#[derive(Default)]
pub(crate) struct QueuedTransport {
    replies: Mutex<VecDeque<Reply>>,
    pub(crate) calls: Mutex<Vec<(String, String, GenerateContentRequest)>>,
}

impl QueuedTransport {
    pub(crate) fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::default(),
        }
    }

    pub(crate) fn models(&self) -> Vec<String> {
        let calls = self.calls.lock();
        calls.iter().map(|(model, _, _)| model.clone()).collect()
    }
}

#[async_trait]
impl GenerationTransport for QueuedTransport {
    async fn generate(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, TransportError> {
        self.calls
            .lock()
            .push((model.to_string(), api_key.to_string(), request.clone()));
        self.replies
            .lock()
            .pop_front()
            .unwrap_or(Err(TransportError::Request("no reply queued".to_string())))
    }
}

pub(crate) fn models(count: usize) -> Vec<String> {
    (1..=count).map(|idx| format!("model-{idx}")).collect()
}

pub(crate) fn json_reply(value: serde_json::Value) -> Reply {
    Ok(GenerateContentResponse::from_text(value.to_string()))
}

pub(crate) fn status(code: u16) -> Reply {
    Err(TransportError::Status {
        status: code,
        body: json!({ "error": { "code": code } }).to_string(),
    })
}
