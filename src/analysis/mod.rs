//! Stress analysis orchestration.
//!
//! [`Analyzer`] turns a task list into one request to an [`AnalysisProvider`],
//! validates the reply against the response schema, and normalizes the
//! forecast into seven days.

mod prompt;
mod provider;

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use thiserror::Error;

pub use prompt::{build_prompt, response_schema};
pub use provider::{AnalysisProvider, AnalysisRequest, ProviderError};

use crate::forecast;
use crate::models::{AiAnalysis, RawAnalysis, Task};

/// Message shown to users whenever an analysis fails.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to get analysis from AI. Please check your API key and try again.";

/// Why an analysis produced no result.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("AI provider request failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("AI response did not match the expected schema: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Failed to encode task list: {0}")]
    EncodeTasks(serde_json::Error),
}

impl AnalysisError {
    /// The message surfaced to front ends. Details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        ANALYSIS_FAILED_MESSAGE
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Runs analyses against a provider.
#[derive(Clone)]
pub struct Analyzer {
    provider: Arc<dyn AnalysisProvider>,
    today: fn() -> NaiveDate,
}

impl Analyzer {
    pub fn new(provider: Arc<dyn AnalysisProvider>) -> Self {
        Self {
            provider,
            today: local_today,
        }
    }

    /// Replace the source of "today" (the local calendar date by default).
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }

    /// Analyze `tasks` with the anchor date taken once from the clock.
    pub async fn refresh_analysis(&self, tasks: &[Task]) -> Result<AiAnalysis, AnalysisError> {
        let today = self.today();
        self.refresh_analysis_on(tasks, today).await
    }

    /// Analyze `tasks` for the window starting at `today`.
    ///
    /// Completed tasks are filtered out before anything is sent. The provider
    /// is called exactly once.
    pub async fn refresh_analysis_on(
        &self,
        tasks: &[Task],
        today: NaiveDate,
    ) -> Result<AiAnalysis, AnalysisError> {
        let request = build_request(tasks, today)?;
        tracing::info!(
            "Requesting stress analysis for {} open task(s) from {}",
            request.tasks.len(),
            today
        );

        let text = self.provider.generate(&request).await.map_err(|e| {
            tracing::error!("Analysis provider failed: {}", e);
            AnalysisError::from(e)
        })?;

        let raw = parse_response(&text).map_err(|e| {
            tracing::error!("Discarding malformed analysis response: {}", e);
            e
        })?;

        Ok(AiAnalysis {
            stress_forecast: forecast::normalize(today, raw.stress_forecast),
            recommendations: raw.recommendations,
        })
    }
}

/// Build the outbound request from the full task list.
pub fn build_request(tasks: &[Task], today: NaiveDate) -> Result<AnalysisRequest, AnalysisError> {
    let open: Vec<Task> = tasks.iter().filter(|t| t.is_open()).cloned().collect();
    let prompt = build_prompt(today, &open).map_err(AnalysisError::EncodeTasks)?;

    Ok(AnalysisRequest {
        today,
        tasks: open,
        prompt,
        response_schema: response_schema(),
    })
}

/// Strictly parse the model's reply. No partial acceptance.
pub fn parse_response(text: &str) -> Result<RawAnalysis, AnalysisError> {
    Ok(serde_json::from_str(text.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn build_request_drops_completed_tasks() {
        let mut done = Task::new("Team brainstorming session", date(2024, 6, 14));
        done.completed = true;
        let open = Task::new("Submit quarterly report", date(2024, 6, 14));

        let request = build_request(&[done.clone(), open.clone()], date(2024, 6, 10)).unwrap();

        assert_eq!(request.tasks, vec![open]);
        assert!(!request.prompt.contains("Team brainstorming session"));
    }

    #[test]
    fn parse_response_accepts_surrounding_whitespace() {
        let raw = parse_response("\n {\"stressForecast\": [], \"recommendations\": []} \n").unwrap();
        assert!(raw.stress_forecast.is_empty());
    }

    #[test]
    fn parse_response_rejects_missing_recommendations() {
        let err = parse_response(r#"{"stressForecast": []}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn parse_response_rejects_non_numeric_levels() {
        let err = parse_response(
            r#"{"stressForecast": [{"date": "2024-06-10", "stressLevel": "high"}], "recommendations": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn every_failure_has_the_same_user_message() {
        let err = AnalysisError::Provider(ProviderError::EmptyResponse);
        assert_eq!(err.user_message(), ANALYSIS_FAILED_MESSAGE);
    }
}
