//! Ordered, first-success-wins fallback chain over model identifiers.

use crate::error::{ClassifyError, ModelFailure, ModelUnavailable, TransportError};
use crate::transport::{GenerateContentRequest, GenerationTransport, HttpGenerationTransport};
use feedtrack_config::AiConfig;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// A payload the remote service can be asked to produce.
pub trait StructuredOutput: DeserializeOwned {
    /// Response schema sent with the request.
    fn response_schema() -> Value;
}

/// Parsed payload plus the attempts it took to get it.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteSuccess<T> {
    pub value: T,
    /// Model that produced `value`.
    pub model: String,
    /// Models that failed before it, in order.
    pub failures: Vec<ModelFailure>,
}

/// Client for the remote classification capability.
///
/// Each model is tried once, strictly in order; there is no retry of the
/// same model and no racing.
#[derive(Clone)]
pub struct RemoteClassifier {
    transport: Arc<dyn GenerationTransport>,
    models: Vec<String>,
    api_key: Option<String>,
}

impl RemoteClassifier {
    pub fn new(
        transport: Arc<dyn GenerationTransport>,
        models: Vec<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            transport,
            models,
            api_key,
        }
    }

    /// Build an HTTP-backed classifier, resolving the key from config or env.
    pub fn from_config(config: &AiConfig) -> Result<Self, TransportError> {
        let transport = HttpGenerationTransport::from_config(config)?;
        let api_key = config.resolve_api_key();
        info!(
            "remote classifier configured (models={}, credential_set={})",
            config.models.len(),
            api_key.is_some()
        );
        Ok(Self::new(
            Arc::new(transport),
            config.models.clone(),
            api_key,
        ))
    }

    /// Ask for a `T` built from `prompt`, walking the model list.
    pub async fn request<T: StructuredOutput>(
        &self,
        prompt: &str,
    ) -> Result<RemoteSuccess<T>, ClassifyError> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("classification credential missing; skipping remote path");
            return Err(ClassifyError::CredentialMissing);
        };

        let request = GenerateContentRequest::structured(prompt, T::response_schema());
        let mut failures = Vec::new();
        for model in &self.models {
            info!("attempting remote classification (model={model})");
            match self.attempt::<T>(model, api_key, &request).await {
                Ok(value) => {
                    info!(
                        "remote classification succeeded (model={}, failed_before={})",
                        model,
                        failures.len()
                    );
                    return Ok(RemoteSuccess {
                        value,
                        model: model.clone(),
                        failures,
                    });
                }
                Err(reason) => {
                    warn!("model unavailable (model={model}, reason={reason})");
                    let rejected = matches!(
                        &reason,
                        ModelUnavailable::Transport(err) if err.is_credential_rejection()
                    );
                    failures.push(ModelFailure {
                        model: model.clone(),
                        reason,
                    });
                    if rejected {
                        return Err(ClassifyError::CredentialRejected { failures });
                    }
                }
            }
        }
        warn!("all models exhausted (attempts={})", failures.len());
        Err(ClassifyError::AllModelsExhausted { failures })
    }

    async fn attempt<T: StructuredOutput>(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<T, ModelUnavailable> {
        let response = self.transport.generate(model, api_key, request).await?;
        let text = response
            .first_text()
            .ok_or(ModelUnavailable::EmptyResponse)?;
        serde_json::from_str(text).map_err(|err| ModelUnavailable::Malformed(err.to_string()))
    }
}
