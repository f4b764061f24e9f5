//! Health status of the demo service.

use crate::error::ApiError;

/// Health of the demo service as observed by the last probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthStatus {
    /// No probe has completed yet.
    #[default]
    Checking,
    /// `/health` answered with a 2xx status.
    Healthy,
    /// `/health` answered, but not with a 2xx status.
    Unhealthy,
    /// The probe request itself failed.
    Down,
}

impl HealthStatus {
    /// Classify the outcome of a health probe.
    ///
    /// `Ok` carries the HTTP status code of the response. Only success vs.
    /// non-success is inspected; every non-2xx code maps to `Unhealthy`.
    pub fn from_probe(outcome: &Result<u16, ApiError>) -> Self {
        match outcome {
            Ok(code) if (200..300).contains(code) => HealthStatus::Healthy,
            Ok(_) => HealthStatus::Unhealthy,
            Err(_) => HealthStatus::Down,
        }
    }

    /// Returns the label shown next to "Service Status".
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Checking => "Checking...",
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Unhealthy => "Unhealthy (503)",
            HealthStatus::Down => "Down (Connection Refused)",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
