//! Logging initialization
//!
//! Structured `tracing` output with an env-controlled filter. Conversation
//! content never goes into log fields; handlers log ids, states and error
//! labels only.

use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter, e.g.
/// `TARA_LOG=tara_core=debug,info`.
const LOG_ENV: &str = "TARA_LOG";

/// Initialize the global tracing subscriber. Call once, before anything
/// logs.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}
