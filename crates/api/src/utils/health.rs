//! Health check types for the `/health` probe

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Overall health status of the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Overall health indicator
    pub is_healthy: bool,

    /// Health score from 0.0 (completely unhealthy) to 1.0 (fully healthy)
    pub score: f64,

    /// Optional message describing overall health state
    pub message: Option<String>,

    /// Individual component health checks
    pub components: Vec<ComponentHealth>,

    /// Unix timestamp when the health check was performed
    pub timestamp: i64,
}

impl HealthStatus {
    /// Create a new health status with default values
    pub fn new() -> Self {
        Self {
            is_healthy: true,
            score: 1.0,
            message: None,
            components: Vec::new(),
            timestamp: unix_now(),
        }
    }

    /// Add a component health check, returning self for chaining
    pub fn add_component(mut self, component: ComponentHealth) -> Self {
        self.components.push(component);
        self
    }

    /// Recompute `score` and `is_healthy` from the components.
    ///
    /// Score = healthy_components / total_components; healthy at ≥ 0.8.
    pub fn calculate_score(&mut self) {
        if self.components.is_empty() {
            return;
        }

        let healthy_count = self.components.iter().filter(|c| c.is_healthy).count();
        self.score = healthy_count as f64 / self.components.len() as f64;
        self.is_healthy = self.score >= 0.8;
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Health status of an individual component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub is_healthy: bool,
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, message: None }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, message: Some(message.into()) }
    }
}

fn unix_now() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_reflects_component_ratio() {
        let mut status = HealthStatus::new()
            .add_component(ComponentHealth::healthy("dialogue_service"))
            .add_component(ComponentHealth::unhealthy("session_store", "unavailable"));
        status.calculate_score();

        assert_eq!(status.score, 0.5);
        assert!(!status.is_healthy);
    }

    #[test]
    fn all_healthy_scores_full() {
        let mut status = HealthStatus::new()
            .add_component(ComponentHealth::healthy("a"))
            .add_component(ComponentHealth::healthy("b"));
        status.calculate_score();

        assert_eq!(status.score, 1.0);
        assert!(status.is_healthy);
    }
}
