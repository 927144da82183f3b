//! Task status values and the board columns they map onto.

use super::ParseColumnError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task status as reported by the backend.
///
/// Statuses outside the known set are kept verbatim so that such tasks
/// survive a round trip through the store without being displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    /// Work has not started.
    Pending,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Completed,
    /// Hidden from the board; never a drag target.
    Archived,
    /// Any status value this client does not know.
    Unrecognized(String),
}

impl TaskStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Archived => "archived",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Returns the board column that displays this status, if any.
    #[must_use]
    pub const fn column(&self) -> Option<BoardColumn> {
        match self {
            Self::Pending => Some(BoardColumn::Pending),
            Self::InProgress => Some(BoardColumn::InProgress),
            Self::Completed => Some(BoardColumn::Completed),
            Self::Archived | Self::Unrecognized(_) => None,
        }
    }
}

impl From<String> for TaskStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "archived" => Self::Archived,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<&str> for TaskStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<TaskStatus> for String {
    fn from(value: TaskStatus) -> Self {
        match value {
            TaskStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl From<BoardColumn> for TaskStatus {
    fn from(value: BoardColumn) -> Self {
        value.status()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the three droppable board columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoardColumn {
    /// Column for [`TaskStatus::Pending`].
    Pending,
    /// Column for [`TaskStatus::InProgress`].
    InProgress,
    /// Column for [`TaskStatus::Completed`].
    Completed,
}

impl BoardColumn {
    /// All columns in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Returns the status stored on tasks placed in this column.
    #[must_use]
    pub const fn status(self) -> TaskStatus {
        match self {
            Self::Pending => TaskStatus::Pending,
            Self::InProgress => TaskStatus::InProgress,
            Self::Completed => TaskStatus::Completed,
        }
    }

    /// Returns the column's status name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub(crate) const fn names() -> &'static str {
        "pending, in_progress, completed"
    }
}

impl TryFrom<&str> for BoardColumn {
    type Error = ParseColumnError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseColumnError(value.to_owned())),
        }
    }
}

impl fmt::Display for BoardColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
