use serde::Deserialize;

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    #[serde(default, alias = "error")]
    pub message: String,
    /// Backend error code, when sent.
    #[serde(default)]
    pub code: Option<i64>,
}
