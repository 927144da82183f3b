//! Domain model for the task board.
//!
//! Tasks, statuses, board columns, collaborators and drop targets. All
//! infrastructure concerns stay outside of the domain boundary.

mod collaborator;
mod deadline;
mod drop_target;
mod error;
mod filter;
mod ids;
mod new_task;
mod status;
mod task;

pub use collaborator::{Collaborator, CollaboratorLabel, CollaboratorSelection};
pub use deadline::DeadlineBadge;
pub use drop_target::DropTarget;
pub use error::{ParseColumnError, ParseDropTargetError, TaskDomainError};
pub use filter::{CategoryFilter, TaskFilter};
pub use ids::{TaskId, UserId};
pub use new_task::NewTask;
pub use status::{BoardColumn, TaskStatus};
pub use task::{Category, FinishBudget, Task, TaskData, TaskPatch, TaskTitle};
