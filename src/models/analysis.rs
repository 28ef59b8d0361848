use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use super::task::Task;

/// Predicted stress for one calendar day.
///
/// Only produced by [`normalize`](crate::forecast::normalize). The level is
/// nominally 1 (low) to 10 (high), but values from the model are carried as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressPoint {
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_level")]
    pub stress_level: f64,
}

/// One forecast entry exactly as the model returned it.
///
/// The date stays a string: entries whose date does not match a day in the
/// forecast window are dropped during normalization, not rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStressPoint {
    pub date: String,
    #[serde(serialize_with = "serialize_level")]
    pub stress_level: f64,
}

impl RawStressPoint {
    pub fn new(date: impl Into<String>, stress_level: f64) -> Self {
        Self {
            date: date.into(),
            stress_level,
        }
    }
}

impl From<StressPoint> for RawStressPoint {
    fn from(point: StressPoint) -> Self {
        Self {
            date: point.date.format(super::DATE_FORMAT).to_string(),
            stress_level: point.stress_level,
        }
    }
}

/// Largest magnitude below which every integer is exactly representable in f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Whole levels go out as JSON integers (`1`, not `1.0`).
fn serialize_level<S>(level: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if level.is_finite() && level.fract() == 0.0 && level.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*level as i64)
    } else {
        serializer.serialize_f64(*level)
    }
}

/// Advice for managing the predicted workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub text: String,
}

/// The model's reply after strict schema validation, before normalization.
///
/// Both fields are required; a reply missing either one fails to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalysis {
    pub stress_forecast: Vec<RawStressPoint>,
    pub recommendations: Vec<Recommendation>,
}

/// A published analysis.
///
/// `stress_forecast` holds exactly seven consecutive days starting at the
/// anchor date, except for the [`empty`](AiAnalysis::empty) sentinel published
/// after a failed refresh.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub stress_forecast: Vec<StressPoint>,
    pub recommendations: Vec<Recommendation>,
}

impl AiAnalysis {
    /// The sentinel published when analysis fails, so no stale series is shown.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Lifecycle of the analysis attached to a session.
///
/// - `Idle`: no refresh has been requested yet
/// - `Loading`: a refresh is in flight
/// - `Success`: the latest refresh published an analysis
/// - `Failed`: the latest refresh failed and the empty sentinel was published
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Snapshot of everything a front end needs to draw the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub tasks: Vec<Task>,
    pub ai_analysis: Option<AiAnalysis>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub status: AnalysisStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(level: f64) -> StressPoint {
        StressPoint {
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            stress_level: level,
        }
    }

    #[test]
    fn whole_levels_serialize_as_integers() {
        let value = serde_json::to_value(point(1.0)).unwrap();
        assert_eq!(value, json!({"date": "2024-06-10", "stressLevel": 1}));
        assert_eq!(serde_json::to_string(&point(7.0)).unwrap(), r#"{"date":"2024-06-10","stressLevel":7}"#);
    }

    #[test]
    fn fractional_levels_keep_their_fraction() {
        let value = serde_json::to_value(point(2.5)).unwrap();
        assert_eq!(value["stressLevel"], json!(2.5));
    }

    #[test]
    fn integer_levels_still_deserialize() {
        let raw: RawStressPoint =
            serde_json::from_str(r#"{"date": "2024-06-10", "stressLevel": 4}"#).unwrap();
        assert_eq!(raw.stress_level, 4.0);
        assert_eq!(serde_json::to_value(&raw).unwrap()["stressLevel"], json!(4));
    }
}
