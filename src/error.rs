use thiserror::Error;

/// Errors surfaced by calls to the PocketBase backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status; `body` is the raw response body
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The response body as JSON, when the server sent JSON
    pub fn body_json(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Status { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }

    /// PocketBase puts a human readable message in `message`
    pub fn user_message(&self) -> String {
        self.body_json()
            .and_then(|json| json.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| self.to_string())
    }
}
