//! Shared HTTP client

mod client;

pub use client::{HttpClient, HttpClientBuilder};
