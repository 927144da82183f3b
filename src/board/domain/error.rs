//! Error types for board domain validation and parsing.

use super::{BoardColumn, UserId};
use thiserror::Error;

/// Errors returned while constructing domain board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// A collaborator selection already holds the maximum number of entries.
    #[error("a task can have at most {max} collaborators")]
    TooManyCollaborators {
        /// Maximum number of collaborators per task.
        max: usize,
    },

    /// The collaborator is already part of the selection.
    #[error("user {0} is already a collaborator")]
    DuplicateCollaborator(UserId),
}

/// Error returned while parsing a drop-target identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseDropTargetError {
    /// The identifier does not carry the column prefix.
    #[error("drop target '{0}' is not a board column")]
    NotAColumn(String),

    /// The embedded status does not name a board column.
    #[error("drop target '{0}' names no droppable status")]
    UnknownColumn(String),
}

/// Error returned while parsing a board column name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown board column: {0}, expected one of {columns}", columns = BoardColumn::names())]
pub struct ParseColumnError(pub String);
