//! In-memory adapter implementations for testing.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! exercising the board without a running backend.

mod notifier;
mod task_api;

pub use notifier::RecordingNotifier;
pub use task_api::{ApiCall, InMemoryTaskApi};
