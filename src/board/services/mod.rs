//! Application services for the task board.

mod board;
mod collaborators;
mod drag;
mod projection;
mod store;

pub use board::{BoardError, BoardResult, TaskBoard};
pub use collaborators::{CollaboratorCache, collect_collaborator_ids};
pub use drag::{DragPhase, DragStart, DropOutcome};
pub use projection::BoardProjection;
pub use store::TaskStore;
