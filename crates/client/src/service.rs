use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashchat_core::{Error, Result, ServiceConfig};

use crate::error::QueryError;
use crate::mock::MockQueryService;
use crate::types::{QueryRequest, QueryResponse, QueryResult};

/// Backend that answers one chat prompt per call.
///
/// Implementations must be safe to call from a spawned task. A call either
/// returns a result or a [`QueryError`]; there is no retry at this layer.
#[async_trait]
pub trait QueryService: Send + Sync {
    async fn query(&self, request: QueryRequest) -> std::result::Result<QueryResult, QueryError>;

    /// Short human description for status output and logs
    fn describe(&self) -> String;
}

/// Query service that POSTs to a dashboard server
pub struct HttpQueryService {
    client: HttpClient,
    url: String,
    timeout: Duration,
}

impl HttpQueryService {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, url: url.into(), timeout })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn classify(&self, err: reqwest::Error) -> QueryError {
        if err.is_timeout() { QueryError::Timeout(self.timeout) } else { QueryError::from(err) }
    }

    /// Pull the server's `message` out of an error body.
    fn error_message(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        match value.get("message")? {
            serde_json::Value::Null => None,
            serde_json::Value::String(message) => Some(message.clone()),
            other => Some(other.to_string()),
        }
    }

    fn parse_success(body: &str) -> std::result::Result<QueryResult, QueryError> {
        let envelope: QueryResponse =
            serde_json::from_str(body).map_err(|e| QueryError::Malformed(format!("invalid JSON body: {}", e)))?;

        envelope
            .result
            .ok_or_else(|| QueryError::Malformed("missing `result` field".to_string()))
    }
}

#[async_trait]
impl QueryService for HttpQueryService {
    async fn query(&self, request: QueryRequest) -> std::result::Result<QueryResult, QueryError> {
        let start = Instant::now();

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        tracing::debug!(
            url = %self.url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            bytes = body.len(),
            "query completed"
        );

        if !status.is_success() {
            let message = Self::error_message(&body);
            tracing::warn!(status = status.as_u16(), message = ?message, "query service returned an error");
            return Err(QueryError::Status { status: status.as_u16(), message });
        }

        let result = Self::parse_success(&body)?;
        if let Some(sql) = &result.sql_query {
            tracing::debug!(sql = %sql, "query service reported SQL");
        }
        Ok(result)
    }

    fn describe(&self) -> String {
        format!("http {} (timeout {}s)", self.url, self.timeout.as_secs())
    }
}

pub struct QueryServiceFactory;

impl QueryServiceFactory {
    pub fn create_from_config(config: &ServiceConfig) -> Result<Arc<dyn QueryService>> {
        match config {
            ServiceConfig::Http { .. } => {
                let url = config
                    .query_url()
                    .ok_or_else(|| Error::Config("HTTP service has no query URL".to_string()))?;
                Ok(Arc::new(HttpQueryService::new(url, config.timeout())?))
            }
            ServiceConfig::Mock { responses_file, delay_ms } => {
                let service = match responses_file {
                    Some(path) => MockQueryService::from_file(path)?,
                    None => MockQueryService::default(),
                };
                Ok(Arc::new(service.with_delay(Duration::from_millis(*delay_ms))))
            }
        }
    }
}
