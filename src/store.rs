//! In-memory task store.

use chrono::{Days, NaiveDate};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{CreateTaskInput, Task};

/// Rejections raised when adding a task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("Task text must not be empty")]
    EmptyText,

    #[error("Task due date is required")]
    MissingDueDate,

    #[error("Task due date {due_date} is before today ({today})")]
    DueDateInPast { due_date: NaiveDate, today: NaiveDate },
}

/// Ordered collection of tasks, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// A store pre-filled with a small sample week relative to `today`.
    pub fn with_demo_tasks(today: NaiveDate) -> Self {
        let due = |offset: u64| today.checked_add_days(Days::new(offset)).unwrap_or(today);

        let mut brainstorm = Task::new("Team brainstorming session", due(4));
        brainstorm.completed = true;

        Self::from_tasks(vec![
            Task::new("Prepare presentation for Monday meeting", due(2)),
            Task::new("Submit quarterly report", due(4)),
            brainstorm,
            Task::new("Review project mockups", due(6)),
        ])
    }

    /// Validate and append a new, incomplete task.
    ///
    /// Text is trimmed. On rejection the store is left unchanged.
    pub fn add(&mut self, input: CreateTaskInput, today: NaiveDate) -> Result<Task, TaskError> {
        let text = input.text.trim();
        if text.is_empty() {
            return Err(TaskError::EmptyText);
        }
        let due_date = input.due_date.ok_or(TaskError::MissingDueDate)?;
        if due_date < today {
            return Err(TaskError::DueDateInPast { due_date, today });
        }

        let task = Task::new(text, due_date);
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Flip `completed` on a task. Returns `None` for an unknown id.
    pub fn toggle(&mut self, id: Uuid) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task.clone())
    }

    /// Remove a task. Returns `false` (and changes nothing) for an unknown id.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }
}
