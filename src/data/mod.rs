//! Data models for the dashboard.
//!
//! ## Submodules
//!
//! - [`audit`]: Audit events as served by the AutoHeal API, and the newest-first [`AuditLog`]
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "2s", "500ms")
//! - [`fault`]: Fault kinds that can be injected into the demo service
//! - [`health`]: The demo service's [`HealthStatus`] as seen by the health probe
//!
//! ## Data Flow
//!
//! ```text
//! GET /audit ──▶ Vec<AuditEvent> ──▶ AuditLog::from_fetched() (newest first)
//!
//! GET /health ──▶ HealthStatus::from_probe()
//! ```

pub mod audit;
pub mod duration;
pub mod fault;
pub mod health;

pub use audit::{AuditEvent, AuditLog, Timestamp};
pub use fault::{FaultFlags, FaultKind};
pub use health::HealthStatus;
