//! # Tara Infra
//!
//! Infrastructure adapters for the Tara voice scheduling agent.
//!
//! This crate contains:
//! - Groq chat-completions client (the `LanguageModel` port)
//! - Google Calendar client (the `CalendarGateway` port)
//! - Shared HTTP client with bounded retry
//! - Configuration loader
//! - In-memory session store (the `SessionStore` port)
//!
//! ## Architecture
//! - Depends on `tara-domain` and `tara-core`
//! - All provider specifics stay behind the core ports

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod store;

pub use config::loader as config_loader;
pub use errors::InfraError;
pub use http::HttpClient;
pub use integrations::calendar::GoogleCalendarClient;
pub use integrations::groq::GroqClient;
pub use store::InMemorySessionStore;
