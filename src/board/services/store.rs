//! In-memory cache of the task records shown by one board.

use crate::board::domain::{Task, TaskId, TaskPatch};
use std::collections::HashSet;
use tracing::warn;

/// Insertion-ordered task cache keyed by task id.
///
/// Every mutating operation bumps [`TaskStore::revision`] so that views can
/// tell when their projection is stale.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    revision: u64,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            revision: 0,
        }
    }

    /// Replaces the entire contents with a freshly fetched task list.
    ///
    /// Backend order is preserved. When an id appears more than once the
    /// first record wins.
    pub fn load(&mut self, tasks: impl IntoIterator<Item = Task>) {
        let mut seen = HashSet::new();
        let mut loaded = Vec::new();
        for task in tasks {
            if seen.insert(task.id().clone()) {
                loaded.push(task);
            } else {
                warn!(task_id = %task.id(), "dropping duplicate task record");
            }
        }
        self.tasks = loaded;
        self.bump();
    }

    /// Applies a shallow update to one task and returns its previous state.
    ///
    /// Returns `None`, leaving the store untouched, when the id is absent.
    pub fn patch(&mut self, id: &TaskId, patch: TaskPatch) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|task| task.id() == id)?;
        let previous = task.clone();
        task.apply(patch);
        self.bump();
        Some(previous)
    }

    /// Restores the store to a previously captured snapshot.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.bump();
    }

    /// Evicts every task.
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.bump();
    }

    /// Returns a copy of the current contents, suitable for rollback.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Returns the task with the given id.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns all tasks in store order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of cached tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when no tasks are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the change counter.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    const fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
