//! Notification sink provided by the presentation shell.

use crate::board::domain::{TaskId, TaskStatus};

/// User-facing message emitted by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A status change was confirmed by the backend.
    StatusUpdated {
        /// Task that moved.
        task_id: TaskId,
        /// Persisted status.
        status: TaskStatus,
    },
    /// A status change failed and was rolled back.
    StatusUpdateFailed {
        /// Task that moved back.
        task_id: TaskId,
        /// Failure description.
        reason: String,
    },
    /// An edit to a task was confirmed by the backend.
    TaskUpdated {
        /// Edited task.
        task_id: TaskId,
    },
    /// An edit to a task failed and was rolled back.
    TaskUpdateFailed {
        /// Task whose edit was reverted.
        task_id: TaskId,
        /// Failure description.
        reason: String,
    },
    /// The task list could not be fetched.
    FetchFailed {
        /// Failure description.
        reason: String,
    },
    /// A task was created.
    TaskCreated,
    /// A task was deleted.
    TaskDeleted {
        /// Deleted task.
        task_id: TaskId,
    },
    /// A create or delete request failed.
    RequestFailed {
        /// Failure description.
        reason: String,
    },
    /// The session is missing or expired; the user must sign in again.
    SessionExpired,
}

/// Receives board notifications.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Delivers one notification.
    fn notify(&self, notification: Notification);
}
