use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Task;

/// Errors from the external AI collaborator.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response contained no text")]
    EmptyResponse,

    #[error("Unreadable response body: {0}")]
    InvalidBody(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

/// Everything sent to the collaborator for one analysis.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Anchor date of the forecast window.
    pub today: NaiveDate,
    /// Incomplete tasks only.
    pub tasks: Vec<Task>,
    pub prompt: String,
    pub response_schema: serde_json::Value,
}

/// An external model that answers analysis requests.
///
/// One call, one reply: implementations return the model's raw JSON text and
/// must not retry on their own.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    async fn generate(&self, request: &AnalysisRequest) -> Result<String, ProviderError>;
}
