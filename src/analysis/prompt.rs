//! Prompt text and response schema sent with every analysis request.

use chrono::NaiveDate;
use serde_json::json;

use crate::models::{Task, DATE_FORMAT};

/// Build the instructions for a seven-day stress forecast.
///
/// `tasks` must already be filtered to incomplete tasks.
pub fn build_prompt(today: NaiveDate, tasks: &[Task]) -> Result<String, serde_json::Error> {
    let task_list = serde_json::to_string_pretty(tasks)?;
    let today = today.format(DATE_FORMAT);

    Ok(format!(
        "You are a 'Life Copilot' AI that helps students and professionals manage their workload and prevent burnout.
Your task is to analyze a list of tasks with due dates and predict the user's stress level over the next 7 days.
Also, provide actionable recommendations to manage the predicted stress.

Today's date is {today}.

Here is the list of tasks the user needs to complete:
{task_list}

Based on this data, please provide a response in the specified JSON format.
Consider the following factors in your analysis:
- Task density: More tasks on a single day or consecutive days increase stress.
- Deadline proximity: Tasks due sooner are more stressful.
- Weekends: Assume stress is slightly lower on weekends (Saturday, Sunday) unless there are pressing deadlines.
- Uncompleted tasks: Only consider tasks that are not marked as completed.
- Cumulative effect: Stress can build up over several busy days and linger.

Return ONLY a valid JSON object matching the schema. The forecast should cover the next 7 days starting from today.
"
    ))
}

/// The structured-output schema the model must answer with.
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "stressForecast": {
                "type": "ARRAY",
                "description": "An array of predicted stress levels for the next 7 days.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "date": {
                            "type": "STRING",
                            "description": "The date in YYYY-MM-DD format."
                        },
                        "stressLevel": {
                            "type": "NUMBER",
                            "description": "A numerical stress score from 1 (low) to 10 (high)."
                        }
                    },
                    "required": ["date", "stressLevel"]
                }
            },
            "recommendations": {
                "type": "ARRAY",
                "description": "Actionable recommendations to manage stress.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {
                            "type": "STRING",
                            "description": "A short, catchy title for the recommendation."
                        },
                        "text": {
                            "type": "STRING",
                            "description": "A detailed explanation of the recommendation."
                        }
                    },
                    "required": ["title", "text"]
                }
            }
        },
        "required": ["stressForecast", "recommendations"]
    })
}
