//! HTTP client for the Gemini `generateContent` API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::analysis::{AnalysisProvider, AnalysisRequest, ProviderError};
use crate::config::{Config, ConfigError};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini-backed [`AnalysisProvider`].
#[derive(Debug, Clone)]
pub struct GeminiClient {
    endpoint: String,
    model: String,
    api_key: String,
    client: Client,
}

impl GeminiClient {
    /// Create a client from configuration. Requires an API key.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?.to_string();
        Ok(Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
            Duration::from_secs(config.timeout_secs),
        ))
    }

    /// Create with explicit configuration.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Send one prompt and return the text of the first candidate.
    pub async fn generate_json(
        &self,
        prompt: &str,
        schema: serde_json::Value,
    ) -> Result<String, ProviderError> {
        let body = GenerateContentRequest::json_prompt(prompt, schema);

        let response = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::InvalidBody(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: error.message,
            });
        }

        parsed.text().ok_or(ProviderError::EmptyResponse)
    }
}

#[async_trait]
impl AnalysisProvider for GeminiClient {
    async fn generate(&self, request: &AnalysisRequest) -> Result<String, ProviderError> {
        tracing::debug!("Calling Gemini model {}", self.model);
        self.generate_json(&request.prompt, request.response_schema.clone())
            .await
    }
}
