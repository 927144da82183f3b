//! In-memory task backend for board tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Semaphore;

use crate::board::{
    domain::{Collaborator, NewTask, Task, TaskData, TaskId, UserId},
    ports::{TaskApi, TaskApiError, TaskApiResult},
};

/// Backend call recorded by [`InMemoryTaskApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    /// `fetch_tasks`.
    FetchTasks,
    /// `update_task` with the submitted representation.
    UpdateTask(Task),
    /// `create_task` with the submitted request.
    CreateTask(NewTask),
    /// `delete_task`.
    DeleteTask(TaskId),
    /// `fetch_users` with the requested ids.
    FetchUsers(Vec<UserId>),
    /// `search_users` with the query.
    SearchUsers(String),
}

/// Thread-safe in-memory backend with failure injection.
///
/// Updates can be held open with [`InMemoryTaskApi::hold_updates`] to
/// observe the board while a reconciliation is outstanding, and batch user
/// lookups likewise with [`InMemoryTaskApi::hold_user_lookups`].
#[derive(Debug, Clone)]
pub struct InMemoryTaskApi {
    state: Arc<Mutex<InMemoryApiState>>,
    gate: Arc<Semaphore>,
    lookup_gate: Arc<Semaphore>,
}

#[derive(Debug, Default)]
struct InMemoryApiState {
    tasks: Vec<Task>,
    users: HashMap<UserId, Collaborator>,
    calls: Vec<ApiCall>,
    fetch_failure: Option<TaskApiError>,
    update_failure: Option<TaskApiError>,
    users_failure: Option<TaskApiError>,
    hold_updates: bool,
    hold_lookups: bool,
    next_id: u64,
}

impl Default for InMemoryTaskApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTaskApi {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(InMemoryApiState::default())),
            gate: Arc::new(Semaphore::new(0)),
            lookup_gate: Arc::new(Semaphore::new(0)),
        }
    }

    /// Creates a backend serving the given tasks.
    #[must_use]
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let api = Self::new();
        api.lock().tasks = tasks.into_iter().collect();
        api
    }

    /// Registers users resolvable through batch lookup and search.
    #[must_use]
    pub fn with_users(self, users: impl IntoIterator<Item = Collaborator>) -> Self {
        self.lock()
            .users
            .extend(users.into_iter().map(|user| (user.id().clone(), user)));
        self
    }

    /// Makes subsequent `fetch_tasks` calls fail.
    pub fn fail_fetches(&self, error: TaskApiError) {
        self.lock().fetch_failure = Some(error);
    }

    /// Makes subsequent `update_task` calls fail.
    pub fn fail_updates(&self, error: TaskApiError) {
        self.lock().update_failure = Some(error);
    }

    /// Makes subsequent `fetch_users` calls fail.
    pub fn fail_user_lookups(&self, error: TaskApiError) {
        self.lock().users_failure = Some(error);
    }

    /// Clears all injected failures.
    pub fn recover(&self) {
        let mut state = self.lock();
        state.fetch_failure = None;
        state.update_failure = None;
        state.users_failure = None;
    }

    /// Keeps `update_task` calls pending until [`Self::release_update`].
    pub fn hold_updates(&self) {
        self.lock().hold_updates = true;
    }

    /// Lets one held `update_task` call complete.
    pub fn release_update(&self) {
        self.gate.add_permits(1);
    }

    /// Keeps `fetch_users` calls pending until [`Self::release_user_lookup`].
    pub fn hold_user_lookups(&self) {
        self.lock().hold_lookups = true;
    }

    /// Lets one held `fetch_users` call complete.
    pub fn release_user_lookup(&self) {
        self.lookup_gate.add_permits(1);
    }

    /// Returns every recorded call in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    /// Returns the tasks currently held by the backend.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    fn lock(&self) -> MutexGuard<'_, InMemoryApiState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn record(&self, call: ApiCall) -> MutexGuard<'_, InMemoryApiState> {
        let mut state = self.lock();
        state.calls.push(call);
        state
    }
}

#[async_trait]
impl TaskApi for InMemoryTaskApi {
    async fn fetch_tasks(&self) -> TaskApiResult<Vec<Task>> {
        let state = self.record(ApiCall::FetchTasks);
        match &state.fetch_failure {
            Some(err) => Err(err.clone()),
            None => Ok(state.tasks.clone()),
        }
    }

    async fn update_task(&self, task: &Task) -> TaskApiResult<()> {
        let held = self.record(ApiCall::UpdateTask(task.clone())).hold_updates;
        if held {
            let permit = self
                .gate
                .acquire()
                .await
                .map_err(|err| TaskApiError::Transport(err.to_string()))?;
            permit.forget();
        }

        let mut state = self.lock();
        if let Some(err) = &state.update_failure {
            return Err(err.clone());
        }
        let stored = state
            .tasks
            .iter_mut()
            .find(|stored| stored.id() == task.id())
            .ok_or_else(|| TaskApiError::Rejected {
                status: 404,
                message: "Task not found".to_owned(),
            })?;
        *stored = task.clone();
        Ok(())
    }

    async fn create_task(&self, task: &NewTask) -> TaskApiResult<()> {
        let mut state = self.record(ApiCall::CreateTask(task.clone()));
        state.next_id += 1;
        let created = Task::from_data(TaskData {
            id: TaskId::new(format!("task-{}", state.next_id)),
            title: task.title().clone(),
            description: task.description().map(str::to_owned),
            status: task.status().clone(),
            category: task.category().clone(),
            remind_me: task.remind_me(),
            time_until_finish: task.time_until_finish(),
            created_at: Utc::now(),
            collaborators: task.collaborators().ids(),
        });
        state.tasks.push(created);
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> TaskApiResult<()> {
        let mut state = self.record(ApiCall::DeleteTask(id.clone()));
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id() != id);
        if state.tasks.len() == before {
            return Err(TaskApiError::Rejected {
                status: 404,
                message: "Task not found".to_owned(),
            });
        }
        Ok(())
    }

    async fn fetch_users(&self, ids: &[UserId]) -> TaskApiResult<Vec<Collaborator>> {
        let held = self.record(ApiCall::FetchUsers(ids.to_vec())).hold_lookups;
        if held {
            let permit = self
                .lookup_gate
                .acquire()
                .await
                .map_err(|err| TaskApiError::Transport(err.to_string()))?;
            permit.forget();
        }

        let state = self.lock();
        if let Some(err) = &state.users_failure {
            return Err(err.clone());
        }
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }

    async fn search_users(&self, email: &str) -> TaskApiResult<Vec<Collaborator>> {
        let state = self.record(ApiCall::SearchUsers(email.to_owned()));
        let mut found: Vec<Collaborator> = state
            .users
            .values()
            .filter(|user| user.email().eq_ignore_ascii_case(email))
            .cloned()
            .collect();
        found.sort_by(|left, right| left.id().cmp(right.id()));
        Ok(found)
    }
}
