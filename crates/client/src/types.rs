use dashchat_core::DashboardContext;
use serde::{Deserialize, Serialize};

/// Text used when the service answers without a usable response
pub const NO_RESPONSE: &str = "No response";

/// Body of a single chat query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub dashboard_id: DashboardContext,
    pub prompt: String,
}

impl QueryRequest {
    pub fn new(dashboard_id: DashboardContext, prompt: impl Into<String>) -> Self {
        Self { dashboard_id, prompt: prompt.into() }
    }
}

/// Envelope returned by the query route.
///
/// `result` is optional here so that its absence can be reported as a
/// malformed payload instead of a generic decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub result: Option<QueryResult>,
}

/// Answer to a query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub response: Option<String>,

    /// SQL the backend ran to produce the answer, if it reports one
    #[serde(default)]
    pub sql_query: Option<String>,
}

impl QueryResult {
    pub fn text(response: impl Into<String>) -> Self {
        Self { response: Some(response.into()), sql_query: None }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Response text, or [`NO_RESPONSE`] when missing or empty
    pub fn response_text(&self) -> &str {
        match self.response.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => NO_RESPONSE,
        }
    }
}
