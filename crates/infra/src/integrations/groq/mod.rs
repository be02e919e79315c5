//! Groq chat-completions integration (OpenAI-compatible API)

mod client;
mod types;

pub use client::GroqClient;
pub use types::GroqError;
