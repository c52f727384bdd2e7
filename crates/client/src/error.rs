use std::time::Duration;
use thiserror::Error;

/// Why a query produced no answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Connection refused, DNS failure, reset, TLS and similar
    #[error("{0}")]
    Transport(String),

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Non-2xx status, with the server's `message` when it sent one
    #[error("{}", status_detail(.status, .message))]
    Status { status: u16, message: Option<String> },

    /// 2xx status with a body that is not a query result
    #[error("malformed response: {0}")]
    Malformed(String),
}

fn status_detail(status: &u16, message: &Option<String>) -> String {
    match message.as_deref() {
        Some(message) if !message.trim().is_empty() => message.to_string(),
        _ => format!("HTTP {}", status),
    }
}

impl QueryError {
    /// Text appended to the visible error entry, if any
    pub fn detail(&self) -> Option<String> {
        let detail = self.to_string();
        if detail.trim().is_empty() { None } else { Some(detail) }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, QueryError::Timeout(_))
    }
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        QueryError::Transport(err.to_string())
    }
}
