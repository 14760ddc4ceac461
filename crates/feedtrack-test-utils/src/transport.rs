use async_trait::async_trait;
use feedtrack_analysis::{
    GenerateContentRequest, GenerateContentResponse, GenerationTransport, TransportError,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Canned outcome for one model.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Return this JSON value as the candidate text.
    Respond(Value),
    /// Return raw candidate text, parsed or not.
    Text(String),
    /// Fail the call.
    Fail(TransportError),
}

/// Transport that answers per model from a script and records every call.
///
/// Models without a script entry fail with a 404 status.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: HashMap<String, ScriptedReply>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, GenerateContentRequest)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport on which every model fails with `status`.
    pub fn failing(models: &[String], status: u16) -> Self {
        models.iter().fold(Self::new(), |transport, model| {
            transport.with_reply(
                model,
                ScriptedReply::Fail(TransportError::Status {
                    status,
                    body: "scripted failure".to_string(),
                }),
            )
        })
    }

    pub fn with_reply(mut self, model: impl Into<String>, reply: ScriptedReply) -> Self {
        self.script.insert(model.into(), reply);
        self
    }

    /// Sleep for `delay` before every reply, scripted or not.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn respond(self, model: impl Into<String>, value: Value) -> Self {
        self.with_reply(model, ScriptedReply::Respond(value))
    }

    /// Models asked so far, in call order.
    pub fn attempted_models(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .map(|(model, _)| model.clone())
            .collect()
    }

    pub fn calls(&self) -> Vec<(String, GenerateContentRequest)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl GenerationTransport for ScriptedTransport {
    async fn generate(
        &self,
        model: &str,
        _api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, TransportError> {
        self.calls.lock().push((model.to_string(), request.clone()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.script.get(model) {
            Some(ScriptedReply::Respond(value)) => {
                Ok(GenerateContentResponse::from_text(value.to_string()))
            }
            Some(ScriptedReply::Text(text)) => Ok(GenerateContentResponse::from_text(text.clone())),
            Some(ScriptedReply::Fail(err)) => Err(err.clone()),
            None => Err(TransportError::Status {
                status: 404,
                body: format!("model {model} not scripted"),
            }),
        }
    }
}
