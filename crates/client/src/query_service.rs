use crate::error::{ClientError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Time range every query of a client runs against.
///
/// Fixed when the client is built; later calls do not slide it forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl QueryWindow {
    pub fn ending_at(end: DateTime<Utc>, minutes: u32) -> Self {
        Self {
            start: end - ChronoDuration::minutes(i64::from(minutes)),
            end,
        }
    }

    pub fn ending_now(minutes: u32) -> Self {
        Self::ending_at(Utc::now(), minutes)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueryMetadata {
    pub syntax: String,
    pub tier: String,
    pub start_time: String,
    pub end_time: String,
    pub default_source: String,
}

impl QueryMetadata {
    pub fn for_window(window: QueryWindow) -> Self {
        Self {
            syntax: "QUERY_SYNTAX_DATAPRIME".to_string(),
            tier: "TIER_ARCHIVE".to_string(),
            start_time: window.start.format(TIMESTAMP_FORMAT).to_string(),
            end_time: window.end.format(TIMESTAMP_FORMAT).to_string(),
            default_source: "logs".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub query: String,
    pub metadata: QueryMetadata,
}

/// Remote DataPrime query endpoint.
///
/// Returns the raw response body on a success status; transport failures
/// and non-success statuses are errors.
#[async_trait]
pub trait QueryService: Send + Sync {
    async fn execute(&self, request: &QueryRequest) -> Result<String>;
}

pub struct HttpQueryService {
    client: Client,
    url: String,
    api_key: String,
}

impl HttpQueryService {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl QueryService for HttpQueryService {
    async fn execute(&self, request: &QueryRequest) -> Result<String> {
        log::info!("Coralogix query: {}", request.query);
        log::debug!(
            "POST {} window {} .. {}",
            self.url,
            request.metadata.start_time,
            request.metadata.end_time
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}
