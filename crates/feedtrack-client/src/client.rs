use crate::error::ClientError;
use feedtrack_analysis::RemoteClassifier;
use feedtrack_config::FeedTrackConfig;
use feedtrack_core::FeedbackService;
use feedtrack_core::service::TEXT_REQUIRED;
use feedtrack_core::ServiceError;
use feedtrack_protocol::{FeedbackRecord, InsightResult, Metrics, NewFeedback};
use feedtrack_store::MemoryFeedbackStore;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Where a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Server,
    /// Produced by the in-process degraded-mode service.
    Local,
}

/// A response value tagged with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Served<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Served<T> {
    fn server(value: T) -> Self {
        Self {
            value,
            source: Source::Server,
        }
    }

    fn local(value: T) -> Self {
        Self {
            value,
            source: Source::Local,
        }
    }
}

pub struct FeedTrackClient {
    http: Client,
    base_url: Url,
    local: FeedbackService,
}

impl FeedTrackClient {
    /// `base_url` points at the API root, e.g. `http://localhost:5000/api`.
    pub fn new(
        base_url: &str,
        local: FeedbackService,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ClientError::Setup(format!("invalid server url {base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Setup(format!("server url cannot hold a path: {base_url}")));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::Setup(err.to_string()))?;
        Ok(Self {
            http,
            base_url,
            local,
        })
    }

    /// Client whose degraded mode uses the configured classifier and a fresh
    /// in-memory store.
    pub fn from_config(config: &FeedTrackConfig) -> Result<Self, ClientError> {
        let remote = RemoteClassifier::from_config(&config.ai)
            .map_err(|err| ClientError::Setup(err.to_string()))?;
        let local = FeedbackService::offline(
            Arc::new(MemoryFeedbackStore::new()),
            Arc::new(remote),
            config.insights.window,
        );
        Self::new(&config.client.server_url, local, config.server_request_timeout())
    }

    pub fn local(&self) -> &FeedbackService {
        &self.local
    }

    pub async fn submit(
        &self,
        submission: NewFeedback,
    ) -> Result<Served<FeedbackRecord>, ClientError> {
        if submission.text.trim().is_empty() {
            return Err(ServiceError::Validation(TEXT_REQUIRED.to_string()).into());
        }
        let request = self.http.post(self.url(&["feedback"])).json(&submission);
        match self.fetch(request).await {
            Some(record) => Ok(Served::server(record)),
            None => {
                warn!("server offline; analyzing feedback locally");
                Ok(Served::local(self.local.submit(submission).await?))
            }
        }
    }

    pub async fn list_all(&self) -> Result<Served<Vec<FeedbackRecord>>, ClientError> {
        match self.fetch(self.http.get(self.url(&["feedback", "all"]))).await {
            Some(records) => Ok(Served::server(records)),
            None => {
                warn!("server offline; listing local feedback");
                Ok(Served::local(self.local.list_all().await?))
            }
        }
    }

    pub async fn list_for_student(
        &self,
        student_id: &str,
    ) -> Result<Served<Vec<FeedbackRecord>>, ClientError> {
        let url = self.url(&["feedback", "student", student_id]);
        match self.fetch(self.http.get(url)).await {
            Some(records) => Ok(Served::server(records)),
            None => {
                warn!("server offline; listing local feedback (student_id={student_id})");
                Ok(Served::local(self.local.list_for_student(student_id).await?))
            }
        }
    }

    pub async fn insights(&self) -> Result<Served<InsightResult>, ClientError> {
        match self.fetch(self.http.post(self.url(&["insights"]))).await {
            Some(insights) => Ok(Served::server(insights)),
            None => {
                warn!("server offline; generating insights locally");
                Ok(Served::local(self.local.generate_insights().await?))
            }
        }
    }

    pub async fn metrics(&self) -> Result<Served<Metrics>, ClientError> {
        match self.fetch(self.http.get(self.url(&["analytics", "metrics"]))).await {
            Some(metrics) => Ok(Served::server(metrics)),
            None => {
                warn!("server offline; computing metrics locally");
                Ok(Served::local(self.local.metrics().await?))
            }
        }
    }

    /// Append percent-encoded path segments to the API root.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send and decode; `None` on any transport, status, or decode failure.
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Option<T> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("server request failed (reason={err})");
                return None;
            }
        };
        let status = response.status();
        if !status.is_success() {
            warn!("server returned error (status={status})");
            return None;
        }
        match response.json::<T>().await {
            Ok(value) => {
                debug!("server response decoded (status={status})");
                Some(value)
            }
            Err(err) => {
                warn!("server response malformed (reason={err})");
                None
            }
        }
    }
}
