//! Remote service abstraction.
//!
//! The dashboard talks to two black-box HTTP services: the demo service
//! (health probe, load target, fault switches) and the AutoHeal engine
//! (audit timeline). [`Backend`] is the seam between the dashboard loops and
//! those services, so the loops can be driven by a fake in tests.

mod http;

pub use http::HttpBackend;

use std::fmt::Debug;

use async_trait::async_trait;

use crate::data::{AuditEvent, FaultKind};
use crate::error::ApiError;

/// Access to the demo service and the AutoHeal audit API.
///
/// # Example
///
/// ```no_run
/// use autoheal_dash::{Backend, HttpBackend, Settings};
///
/// # tokio_test::block_on(async {
/// let backend = HttpBackend::new(&Settings::default()).unwrap();
/// match backend.probe_health().await {
///     Ok(code) => println!("/health answered {}", code),
///     Err(e) => println!("demo service unreachable: {}", e),
/// }
/// # });
/// ```
#[async_trait]
pub trait Backend: Send + Sync + Debug {
    /// Fetch the audit timeline in the order the API returns it (oldest first).
    async fn fetch_audit(&self) -> Result<Vec<AuditEvent>, ApiError>;

    /// Probe `/health` and return the HTTP status code.
    ///
    /// `Err` means the request itself failed (no response at all).
    async fn probe_health(&self) -> Result<u16, ApiError>;

    /// Send one request to the demo service root. The response is irrelevant.
    async fn generate_traffic(&self) -> Result<(), ApiError>;

    /// Toggle a fault and return the service's JSON reply.
    async fn toggle_fault(&self, kind: FaultKind) -> Result<serde_json::Value, ApiError>;

    /// Returns a human-readable description of the backend.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}
