//! Faults that can be injected into the demo service.

use serde::Deserialize;

/// A fault the demo service can toggle on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// `/` starts answering 500.
    Error,
    /// Every request is delayed by 0.5-2s.
    Latency,
    /// `/health` starts answering 503.
    Unhealthy,
}

impl FaultKind {
    /// All fault kinds, in control-panel order.
    pub const ALL: [FaultKind; 3] = [FaultKind::Error, FaultKind::Latency, FaultKind::Unhealthy];

    /// Path segment under `/fault/`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            FaultKind::Error => "error",
            FaultKind::Latency => "latency",
            FaultKind::Unhealthy => "unhealthy",
        }
    }

    /// Label of the control-panel button.
    pub fn button_label(&self) -> &'static str {
        match self {
            FaultKind::Error => "Trigger 500 Errors",
            FaultKind::Latency => "Trigger Latency (1s+)",
            FaultKind::Unhealthy => "Trigger Unhealthy Check",
        }
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Fault switches as echoed by the demo service's toggle endpoints.
///
/// Each endpoint reports only the switch it flipped, so every field is
/// optional. These values are not kept as dashboard state: the next health
/// and audit polls are the source of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FaultFlags {
    #[serde(default)]
    pub error_mode: Option<bool>,
    #[serde(default)]
    pub latency_mode: Option<bool>,
    #[serde(default)]
    pub cpu_spike_mode: Option<bool>,
    #[serde(default)]
    pub healthy: Option<bool>,
}

impl FaultFlags {
    /// Render the reported switches as `name=value` pairs, or `None` if empty.
    pub fn describe(&self) -> Option<String> {
        let parts: Vec<String> = [
            ("error_mode", self.error_mode),
            ("latency_mode", self.latency_mode),
            ("cpu_spike_mode", self.cpu_spike_mode),
            ("healthy", self.healthy),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| format!("{}={}", name, v)))
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}
