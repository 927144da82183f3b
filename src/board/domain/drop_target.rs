//! Drop-target identifiers emitted by the presentation shell.

use super::{BoardColumn, ParseDropTargetError};
use std::fmt;
use std::str::FromStr;

/// A droppable board column, as encoded in a drop-target identifier.
///
/// Column drop zones are identified as `column-<status>`, for example
/// `column-in_progress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropTarget(BoardColumn);

impl DropTarget {
    const PREFIX: &'static str = "column-";

    /// Returns the drop target for a column.
    #[must_use]
    pub const fn for_column(column: BoardColumn) -> Self {
        Self(column)
    }

    /// Returns the destination column.
    #[must_use]
    pub const fn column(self) -> BoardColumn {
        self.0
    }

    /// Returns the identifier the shell should assign to the drop zone.
    #[must_use]
    pub fn identifier(self) -> String {
        format!("{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for DropTarget {
    type Err = ParseDropTargetError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let status = raw
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| ParseDropTargetError::NotAColumn(raw.to_owned()))?;
        BoardColumn::try_from(status)
            .map(Self)
            .map_err(|_| ParseDropTargetError::UnknownColumn(raw.to_owned()))
    }
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}
