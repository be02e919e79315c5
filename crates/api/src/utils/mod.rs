//! API-layer utilities

pub mod health;
pub mod logging;
