//! # autoheal-dash
//!
//! A terminal dashboard for the AutoHeal self-healing infrastructure demo.
//!
//! The dashboard polls two black-box HTTP services, the demo service and
//! the AutoHeal engine, and shows what it sees: the demo service's health,
//! a fault-injection control panel, the engine's audit timeline, and a
//! pointer to the external metrics dashboard.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌──────────────┐   watch    ┌─────────┐    ┌─────────────┐ │
//! │  │  controller  │──────────▶│   app   │───▶│     ui      │ │
//! │  │ (3 loops)    │            │ (state) │    │ (rendering) │ │
//! │  └──────┬───────┘            └────┬────┘    └─────────────┘ │
//! │         │                         │ toggle_fault            │
//! │         ▼                         ▼                         │
//! │  ┌──────────────┐                                           │
//! │  │   source     │◀── HttpBackend (reqwest)                  │
//! │  │  (Backend)   │                                           │
//! │  └──────────────┘                                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`controller`]**: The audit poll, health poll, and traffic generator as
//!   cancellable tokio tasks, plus the one-shot fault toggle
//! - **[`source`]**: The [`Backend`] trait and its HTTP implementation
//! - **[`data`]**: [`HealthStatus`], [`AuditEvent`]/[`AuditLog`], [`FaultKind`]
//! - **[`app`]** / **[`events`]** / **[`ui`]**: Terminal front end
//! - **[`config`]**: Layered [`Settings`] (file, environment, command line)
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use autoheal_dash::{Dashboard, FaultKind, HttpBackend, Settings};
//!
//! # tokio_test::block_on(async {
//! let settings = Settings::default();
//! let backend = Arc::new(HttpBackend::new(&settings).unwrap());
//! let dashboard = Dashboard::activate(backend, settings.intervals);
//!
//! let notification = dashboard.toggle_fault(FaultKind::Latency).await;
//! println!("{}", notification.message);
//! println!("Service status: {}", dashboard.health());
//!
//! dashboard.teardown().await;
//! # });
//! ```

pub mod app;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::{Intervals, Overrides, Settings};
pub use controller::{Dashboard, Notification, NotificationLevel};
pub use data::{AuditEvent, AuditLog, FaultFlags, FaultKind, HealthStatus, Timestamp};
pub use error::ApiError;
pub use source::{Backend, HttpBackend};
