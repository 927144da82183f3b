//! Three-column board view derived from the task store.

use crate::board::domain::{BoardColumn, Task, TaskFilter, TaskId};

/// Tasks grouped by board column, in store order.
///
/// Tasks whose status has no column (archived or unrecognized) are counted
/// in [`BoardProjection::hidden`] and appear in no column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardProjection {
    pending: Vec<Task>,
    in_progress: Vec<Task>,
    completed: Vec<Task>,
    hidden: usize,
}

impl BoardProjection {
    /// Groups every task by column.
    #[must_use]
    pub fn project(tasks: &[Task]) -> Self {
        Self::project_filtered(tasks, &TaskFilter::new())
    }

    /// Groups the tasks that pass `filter` by column.
    #[must_use]
    pub fn project_filtered(tasks: &[Task], filter: &TaskFilter) -> Self {
        let mut projection = Self::default();
        for task in tasks.iter().filter(|task| filter.matches(task)) {
            match task.status().column() {
                Some(column) => projection.column_mut(column).push(task.clone()),
                None => projection.hidden += 1,
            }
        }
        projection
    }

    /// Returns the tasks in one column.
    #[must_use]
    pub fn column(&self, column: BoardColumn) -> &[Task] {
        match column {
            BoardColumn::Pending => &self.pending,
            BoardColumn::InProgress => &self.in_progress,
            BoardColumn::Completed => &self.completed,
        }
    }

    /// Returns the column holding a task, if it is displayed.
    #[must_use]
    pub fn locate(&self, id: &TaskId) -> Option<BoardColumn> {
        BoardColumn::ALL
            .into_iter()
            .find(|column| self.column(*column).iter().any(|task| task.id() == id))
    }

    /// Returns the number of displayed tasks.
    #[must_use]
    pub fn total(&self) -> usize {
        self.pending.len() + self.in_progress.len() + self.completed.len()
    }

    /// Returns the number of tasks without a column.
    #[must_use]
    pub const fn hidden(&self) -> usize {
        self.hidden
    }

    const fn column_mut(&mut self, column: BoardColumn) -> &mut Vec<Task> {
        match column {
            BoardColumn::Pending => &mut self.pending,
            BoardColumn::InProgress => &mut self.in_progress,
            BoardColumn::Completed => &mut self.completed,
        }
    }
}
