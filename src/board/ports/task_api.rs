//! Backend port for task records and user lookups.

use crate::board::domain::{Collaborator, NewTask, Task, TaskId, UserId};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for backend operations.
pub type TaskApiResult<T> = Result<T, TaskApiError>;

/// Task backend contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Fetches every task visible to the session's user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskApiError::MissingCredentials`] when the session holds no
    /// token, or another variant when the backend call fails.
    async fn fetch_tasks(&self) -> TaskApiResult<Vec<Task>>;

    /// Persists the full representation of an existing task.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskApiError`] when the backend does not confirm the
    /// update.
    async fn update_task(&self, task: &Task) -> TaskApiResult<()>;

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskApiError`] when the backend rejects the request.
    async fn create_task(&self, task: &NewTask) -> TaskApiResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskApiError`] when the backend rejects the request.
    async fn delete_task(&self, id: &TaskId) -> TaskApiResult<()>;

    /// Resolves user records for a batch of ids in one request.
    ///
    /// Ids unknown to the backend are absent from the result.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskApiError`] when the lookup fails.
    async fn fetch_users(&self, ids: &[UserId]) -> TaskApiResult<Vec<Collaborator>>;

    /// Finds users by email address.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskApiError`] when the search fails.
    async fn search_users(&self, email: &str) -> TaskApiResult<Vec<Collaborator>>;
}

/// Errors returned by task backend implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskApiError {
    /// The session holds no bearer token; no request was sent.
    #[error("no session token available, sign in again")]
    MissingCredentials,

    /// The backend rejected the session's credentials.
    #[error("session credentials were rejected")]
    Unauthorized,

    /// The backend answered with a non-success status.
    #[error("backend rejected the request (HTTP {status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the backend.
        message: String,
    },

    /// The request did not complete (connection failure or timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("could not decode backend response: {0}")]
    Decode(String),
}

impl TaskApiError {
    /// Returns `true` for failures the session collaborator must handle by
    /// sending the user back to the login screen.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::MissingCredentials | Self::Unauthorized)
    }
}
