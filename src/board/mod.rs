//! Task board management.
//!
//! This module holds the client-side task cache, the three-column board
//! projection, and the drag reconciliation engine that applies status
//! changes optimistically, persists them and rolls back on failure.
//! Collaborator ids across all visible tasks are resolved in one batch
//! lookup per refresh. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
