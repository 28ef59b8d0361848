//! The single in-memory session.
//!
//! A [`Session`] owns the task store and the published analysis. All mutation
//! goes through its commands. It is cheap to clone; clones share state.
//!
//! Every refresh is tagged with a monotonically increasing sequence number.
//! Only the most recently started refresh may publish; replies to superseded
//! refreshes are dropped.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::runtime::Handle;
use uuid::Uuid;

use crate::analysis::Analyzer;
use crate::models::{AiAnalysis, AnalysisStatus, CreateTaskInput, SessionView, Task};
use crate::store::{TaskError, TaskStore};

#[derive(Debug, Default)]
struct SessionState {
    tasks: TaskStore,
    analysis: Option<AiAnalysis>,
    status: AnalysisStatus,
    error: Option<String>,
    /// Sequence number of the newest refresh started so far.
    latest_refresh: u64,
}

impl SessionState {
    fn view(&self) -> SessionView {
        SessionView {
            tasks: self.tasks.list().to_vec(),
            ai_analysis: self.analysis.clone(),
            is_loading: self.status == AnalysisStatus::Loading,
            error: self.error.clone(),
            status: self.status,
        }
    }
}

/// A started refresh: its sequence number and the tasks it analyzes.
#[derive(Debug, Clone)]
pub struct RefreshTicket {
    pub sequence: u64,
    pub tasks: Vec<Task>,
}

/// What happened to a finished refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Published(AnalysisStatus),
    /// A newer refresh was started first; nothing was changed.
    Superseded,
}

#[derive(Clone)]
pub struct Session {
    state: Arc<Mutex<SessionState>>,
    analyzer: Analyzer,
    auto_refresh: bool,
}

impl Session {
    pub fn new(analyzer: Analyzer) -> Self {
        Self::with_store(analyzer, TaskStore::new())
    }

    pub fn with_store(analyzer: Analyzer, tasks: TaskStore) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState {
                tasks,
                ..SessionState::default()
            })),
            analyzer,
            auto_refresh: false,
        }
    }

    /// Re-run the analysis in the background after every task mutation.
    pub fn with_auto_refresh(mut self, enabled: bool) -> Self {
        self.auto_refresh = enabled;
        self
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().expect("session lock poisoned")
    }

    pub fn view(&self) -> SessionView {
        self.lock().view()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.list().to_vec()
    }

    // ============================================================
    // Task commands
    // ============================================================

    pub fn add_task(&self, input: CreateTaskInput) -> Result<Task, TaskError> {
        let today = self.analyzer.today();
        let task = self.lock().tasks.add(input, today).map_err(|e| {
            tracing::warn!("Rejected task: {}", e);
            e
        })?;
        tracing::info!("Added task {} due {}", task.id, task.due_date);
        self.after_mutation();
        Ok(task)
    }

    pub fn toggle_task(&self, id: Uuid) -> Option<Task> {
        let task = self.lock().tasks.toggle(id)?;
        tracing::info!("Task {} completed={}", task.id, task.completed);
        self.after_mutation();
        Some(task)
    }

    /// Delete a task. Unknown ids are ignored.
    pub fn delete_task(&self, id: Uuid) -> bool {
        let removed = self.lock().tasks.delete(id);
        if removed {
            tracing::info!("Deleted task {}", id);
            self.after_mutation();
        }
        removed
    }

    fn after_mutation(&self) {
        if self.auto_refresh {
            self.spawn_refresh();
        }
    }

    /// Start a refresh on the current tokio runtime without waiting for it.
    ///
    /// Outside a runtime nothing is started; the caller can still refresh
    /// explicitly. Returns whether a refresh was spawned.
    pub fn spawn_refresh(&self) -> bool {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("No tokio runtime available, skipping background refresh");
                return false;
            }
        };

        let session = self.clone();
        handle.spawn(async move {
            session.refresh_analysis().await;
        });
        true
    }

    // ============================================================
    // Analysis
    // ============================================================

    /// Run one analysis of the current tasks and return the resulting view.
    pub async fn refresh_analysis(&self) -> SessionView {
        let ticket = self.begin_refresh();
        self.finish_refresh(ticket).await;
        self.view()
    }

    /// Enter `Loading`, snapshot the tasks and claim the next sequence number.
    pub fn begin_refresh(&self) -> RefreshTicket {
        let mut state = self.lock();
        state.latest_refresh += 1;
        state.status = AnalysisStatus::Loading;
        state.error = None;

        RefreshTicket {
            sequence: state.latest_refresh,
            tasks: state.tasks.list().to_vec(),
        }
    }

    /// Call the provider for `ticket` and publish the result if still current.
    pub async fn finish_refresh(&self, ticket: RefreshTicket) -> RefreshOutcome {
        let result = self.analyzer.refresh_analysis(&ticket.tasks).await;

        let mut state = self.lock();
        if ticket.sequence != state.latest_refresh {
            tracing::warn!(
                "Discarding analysis #{} superseded by #{}",
                ticket.sequence,
                state.latest_refresh
            );
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(analysis) => {
                tracing::info!(
                    "Published analysis #{} with {} recommendation(s)",
                    ticket.sequence,
                    analysis.recommendations.len()
                );
                state.analysis = Some(analysis);
                state.error = None;
                state.status = AnalysisStatus::Success;
            }
            Err(e) => {
                tracing::error!("Analysis #{} failed: {}", ticket.sequence, e);
                state.analysis = Some(AiAnalysis::empty());
                state.error = Some(e.user_message().to_string());
                state.status = AnalysisStatus::Failed;
            }
        }

        RefreshOutcome::Published(state.status)
    }
}
