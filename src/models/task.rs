use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A single to-do item with a due date.
///
/// Tasks are owned by the [`TaskStore`](crate::store::TaskStore). After
/// creation the only mutation is flipping `completed`; everything else is
/// fixed until the task is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    /// Calendar date the task is due, serialized as `YYYY-MM-DD`.
    pub due_date: NaiveDate,
    pub completed: bool,
}

impl Task {
    pub fn new(text: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            due_date,
            completed: false,
        }
    }

    /// Open tasks are the ones still counted toward the workload.
    pub fn is_open(&self) -> bool {
        !self.completed
    }
}

/// Input for adding a task.
///
/// `due_date` is optional on the wire so that a missing date surfaces as a
/// validation error instead of a deserialization failure. An absent field,
/// `null` and a blank string all count as missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskInput {
    pub text: String,
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub due_date: Option<NaiveDate>,
}

fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, super::DATE_FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl CreateTaskInput {
    pub fn new(text: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            text: text.into(),
            due_date: Some(due_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CreateTaskInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn blank_or_missing_due_date_is_none() {
        assert_eq!(parse(r#"{"text": "a"}"#).due_date, None);
        assert_eq!(parse(r#"{"text": "a", "dueDate": null}"#).due_date, None);
        assert_eq!(parse(r#"{"text": "a", "dueDate": ""}"#).due_date, None);
        assert_eq!(parse(r#"{"text": "a", "dueDate": "  "}"#).due_date, None);
    }

    #[test]
    fn due_date_parses_calendar_dates() {
        assert_eq!(
            parse(r#"{"text": "a", "dueDate": "2024-06-14"}"#).due_date,
            NaiveDate::from_ymd_opt(2024, 6, 14)
        );
    }

    #[test]
    fn malformed_due_date_is_rejected() {
        let err = serde_json::from_str::<CreateTaskInput>(r#"{"text": "a", "dueDate": "June 14"}"#);
        assert!(err.is_err());
    }
}
