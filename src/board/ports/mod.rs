//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod notifier;
pub mod task_api;

pub use notifier::{Notification, Notifier};
pub use task_api::{TaskApi, TaskApiError, TaskApiResult};

#[cfg(test)]
pub use notifier::MockNotifier;
#[cfg(test)]
pub use task_api::MockTaskApi;
