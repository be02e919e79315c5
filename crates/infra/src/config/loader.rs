//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `TARA_HOST` / `TARA_PORT`: HTTP listener (optional)
//! - `GROQ_API_KEY`: language-model API key
//! - `TARA_LLM_MODEL`: model override (optional)
//! - `TARA_LLM_API_URL`: endpoint override (optional)
//! - `TARA_LLM_TIMEOUT_SECS`: language-model call bound (optional)
//! - `CALENDAR_ID`: target calendar
//! - `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET` / `GOOGLE_REFRESH_TOKEN`:
//!   OAuth credentials for the refresh-token flow
//! - `TARA_CALENDAR_TIMEOUT_SECS`: calendar call bound (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml`
//! 2. `./tara.json` or `./tara.toml`
//! 3. The same names in the parent and grandparent directories

use std::path::{Path, PathBuf};

use tara_domain::constants::{DEFAULT_CALENDAR_TIMEOUT_SECS, DEFAULT_LLM_TIMEOUT_SECS};
use tara_domain::{
    CalendarConfig, LlmConfig, Result, ServerConfig, TaraConfig, TaraError,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `TaraError::Config` if configuration cannot be loaded from
/// either source.
pub fn load() -> Result<TaraConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "environment incomplete, trying config file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `TaraError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<TaraConfig> {
    let api_key = env_var("GROQ_API_KEY")?;
    let calendar_id = env_var("CALENDAR_ID")?;
    let client_id = env_var("GOOGLE_CLIENT_ID")?;
    let client_secret = env_var("GOOGLE_CLIENT_SECRET")?;
    let refresh_token = env_var("GOOGLE_REFRESH_TOKEN")?;

    let host = std::env::var("TARA_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env_parse_or("TARA_PORT", 3000)?;

    let model = std::env::var("TARA_LLM_MODEL")
        .unwrap_or_else(|_| tara_domain::constants::DEFAULT_LLM_MODEL.to_string());
    let api_url = std::env::var("TARA_LLM_API_URL").ok();
    let llm_timeout = env_parse_or("TARA_LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?;
    let calendar_timeout =
        env_parse_or("TARA_CALENDAR_TIMEOUT_SECS", DEFAULT_CALENDAR_TIMEOUT_SECS)?;

    Ok(TaraConfig {
        server: ServerConfig { host, port },
        llm: LlmConfig { api_key, model, api_url, timeout_seconds: llm_timeout },
        calendar: CalendarConfig {
            calendar_id,
            client_id,
            client_secret,
            refresh_token,
            timeout_seconds: calendar_timeout,
        },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `TaraError::Config` if no file is found, the format is invalid,
/// or required fields are missing.
pub fn load_from_file(path: Option<PathBuf>) -> Result<TaraConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TaraError::Config(format!("config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            TaraError::Config("no config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TaraError::Config(format!("failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, detecting the format by file
/// extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<TaraConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TaraError::Config(format!("invalid TOML config: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TaraError::Config(format!("invalid JSON config: {e}"))),
        other => Err(TaraError::Config(format!("unsupported config format: .{other}"))),
    }
}

/// Probe standard locations for a config file.
fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["config.json", "config.toml", "tara.json", "tara.toml"];
    const DIRS: [&str; 3] = [".", "..", "../.."];

    for dir in DIRS {
        for name in NAMES {
            let candidate = Path::new(dir).join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }
    }
    None
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| TaraError::Config(format!("missing environment variable: {name}")))
}

fn env_parse_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .map_err(|e| TaraError::Config(format!("invalid value for {name}: {e}"))),
    }
}
