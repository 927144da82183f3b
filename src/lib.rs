//! Taskboard: client core for a drag-and-drop task board.
//!
//! The crate keeps a local cache of the signed-in user's tasks, projects it
//! into pending, in-progress and completed columns, and turns drag gestures
//! into optimistic status changes that are persisted to a REST backend and
//! rolled back when the backend refuses them.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board values with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the backend and notifications
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory, log)
//!
//! # Modules
//!
//! - [`board`]: Task store, board projection and drag reconciliation
//! - [`config`]: Layered configuration
//! - [`session`]: Explicit session credentials
//! - [`telemetry`]: Tracing subscriber setup

pub mod board;
pub mod config;
pub mod session;
pub mod telemetry;
