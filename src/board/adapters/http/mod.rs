//! HTTP adapter for the task backend.

mod client;
pub mod wire;

pub use client::HttpTaskApi;
