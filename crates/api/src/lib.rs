//! # Tara API
//!
//! HTTP boundary for the Tara voice scheduling agent.
//!
//! This crate contains:
//! - axum routes (turn step, conversation end, health probe)
//! - Application context (dependency injection)
//! - Logging setup and the binary entry point
//!
//! ## Architecture
//! - Depends on `tara-domain`, `tara-core`, and `tara-infra`
//! - Wires up the hexagonal architecture
//! - The voice platform only ever receives text to speak

pub mod context;
pub mod routes;
pub mod utils;

// Re-export for convenience
pub use context::AppContext;
pub use routes::router;
