use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use dashchat_core::{Error, Result};

use crate::error::QueryError;
use crate::service::QueryService;
use crate::types::{QueryRequest, QueryResult};

/// Notice returned once every scripted response has been used
pub const EXHAUSTED_NOTICE: &str = "No more mock responses configured.";

/// One scripted reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MockResponse {
    Text {
        content: String,
        #[serde(default)]
        sql_query: Option<String>,
    },
    /// Success with no response text
    Empty,
    /// Failure; with `status` it behaves like a non-2xx reply
    Error {
        message: String,
        #[serde(default)]
        status: Option<u16>,
    },
    /// 2xx reply whose body is not a query result
    Malformed {
        #[serde(default = "default_malformed_reason")]
        reason: String,
    },
}

fn default_malformed_reason() -> String {
    "missing `result` field".to_string()
}

impl MockResponse {
    pub fn text(content: impl Into<String>) -> Self {
        MockResponse::Text { content: content.into(), sql_query: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        MockResponse::Error { message: message.into(), status: None }
    }

    fn into_outcome(self) -> std::result::Result<QueryResult, QueryError> {
        match self {
            MockResponse::Text { content, sql_query } => Ok(QueryResult { response: Some(content), sql_query }),
            MockResponse::Empty => Ok(QueryResult::empty()),
            MockResponse::Error { message, status: Some(status) } => {
                Err(QueryError::Status { status, message: Some(message) })
            }
            MockResponse::Error { message, status: None } => Err(QueryError::Transport(message)),
            MockResponse::Malformed { reason } => Err(QueryError::Malformed(reason)),
        }
    }
}

/// Mock configuration from TOML file
#[derive(Debug, Deserialize)]
struct MockScript {
    responses: Vec<MockResponse>,
}

/// Scripted query service for offline runs and tests.
///
/// Replies are handed out in order; every request is recorded.
pub struct MockQueryService {
    responses: Vec<MockResponse>,
    current: AtomicUsize,
    delay: Duration,
    requests: Mutex<Vec<QueryRequest>>,
}

impl MockQueryService {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self { responses, current: AtomicUsize::new(0), delay: Duration::ZERO, requests: Mutex::new(Vec::new()) }
    }

    /// Load a `[[responses]]` script
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read mock responses {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let script: MockScript = toml::from_str(content)?;
        Ok(Self::new(script.responses))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of queries received so far
    pub fn calls(&self) -> usize {
        self.requests.lock().map(|requests| requests.len()).unwrap_or_default()
    }

    /// Every request received, in order
    pub fn requests(&self) -> Vec<QueryRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn next_response(&self) -> MockResponse {
        let index = self.current.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(index)
            .cloned()
            .unwrap_or_else(|| MockResponse::text(EXHAUSTED_NOTICE))
    }
}

impl Default for MockQueryService {
    fn default() -> Self {
        Self::new(vec![MockResponse::Text {
            content: DEMO_ANSWER.to_string(),
            sql_query: Some("SELECT region, SUM(revenue) FROM sales GROUP BY region".to_string()),
        }])
    }
}

const DEMO_ANSWER: &str = r#"Here is revenue by region for the current quarter:

| Region | Revenue | Change |
|:-------|--------:|-------:|
| North  | $1.2M   | +5%    |
| South  | $0.9M   | -2%    |
| West   | $1.5M   | +11%   |

**West** is growing fastest. The numbers come from this query:

```sql
SELECT region, SUM(revenue)
FROM sales
GROUP BY region;
```"#;

#[async_trait]
impl QueryService for MockQueryService {
    async fn query(&self, request: QueryRequest) -> std::result::Result<QueryResult, QueryError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.next_response().into_outcome()
    }

    fn describe(&self) -> String {
        format!("mock ({} scripted responses, delay {}ms)", self.responses.len(), self.delay.as_millis())
    }
}
