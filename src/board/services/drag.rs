//! Drag gesture phases and outcomes.

use crate::board::domain::{Task, TaskId};
use crate::board::ports::TaskApiError;

/// Phase of the board's single drag gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragPhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A card has been picked up; nothing has been mutated yet.
    Dragging {
        /// Task being dragged.
        task_id: TaskId,
        /// Task as it was when picked up, for the drag preview.
        preview: Task,
    },
    /// A status change was applied locally and awaits backend confirmation.
    Reconciling {
        /// Task whose status change is being persisted.
        task_id: TaskId,
    },
}

impl DragPhase {
    /// Returns `true` when a new gesture may start.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns the task involved in the current gesture, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<&TaskId> {
        match self {
            Self::Idle => None,
            Self::Dragging { task_id, .. } | Self::Reconciling { task_id } => Some(task_id),
        }
    }
}

/// Result of a drag-start gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragStart {
    /// The gesture started; carries the preview snapshot.
    Started(Task),
    /// Another gesture or reconciliation is still active.
    Rejected,
    /// The task is not in the store.
    UnknownTask,
}

/// Result of a request to change a task, from a drop or a direct call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// No gesture was in progress.
    NotDragging,
    /// Released outside any column, or the task vanished from the store.
    Cancelled,
    /// The task already had the target status; nothing was sent.
    Unchanged,
    /// Another gesture or reconciliation is still active.
    Busy,
    /// The backend confirmed the change.
    Persisted(Task),
    /// The backend call failed and the store was restored.
    RolledBack(TaskApiError),
}

impl DropOutcome {
    /// Returns `true` when the store ended up with a changed task.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted(_))
    }
}
