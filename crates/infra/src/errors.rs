//! Infrastructure error conversions
//!
//! Transport errors are classified here once so every adapter maps
//! `reqwest` failures to the domain taxonomy the same way.

use tara_domain::TaraError;

/// Newtype carrier for infrastructure-side errors.
///
/// Exists so `From<reqwest::Error>` can live in this crate while the
/// public error type stays `TaraError`.
#[derive(Debug)]
pub struct InfraError(pub TaraError);

impl From<reqwest::Error> for InfraError {
    fn from(err: reqwest::Error) -> Self {
        let classified = if err.is_timeout() {
            TaraError::Timeout(format!("request timed out: {err}"))
        } else if err.is_connect() {
            TaraError::Network(format!("connection failed: {err}"))
        } else {
            TaraError::Network(format!("http error: {err}"))
        };
        InfraError(classified)
    }
}

impl From<InfraError> for TaraError {
    fn from(err: InfraError) -> Self {
        err.0
    }
}

impl std::fmt::Display for InfraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for InfraError {}
