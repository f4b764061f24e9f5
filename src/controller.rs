//! The dashboard controller.
//!
//! Owns three independent loops, each a tokio task:
//!
//! ```text
//!   audit poll    ──GET /audit──▶   watch<AuditLog>      (immediate, then every interval)
//!   health poll   ──GET /health──▶  watch<HealthStatus>  (immediate, then every interval)
//!   traffic       ──GET /──▶        (discarded)          (every interval)
//! ```
//!
//! Each loop is the only writer of its state slice. All loops share one
//! [`CancellationToken`]; [`Dashboard::teardown`] (or dropping the
//! [`Dashboard`]) cancels it. In-flight requests race the token and every
//! state write re-checks it, so nothing is written after teardown.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::config::Intervals;
use crate::data::{AuditLog, FaultFlags, FaultKind, HealthStatus};
use crate::source::Backend;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Confirmation,
    Error,
}

/// Result of a user action, shown as a modal until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn confirmation(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Confirmation,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Toggle a fault on the demo service.
///
/// Issues exactly one request. The reply is only used to word the
/// confirmation; no dashboard state is derived from it.
pub async fn toggle_fault(backend: &dyn Backend, kind: FaultKind) -> Notification {
    match backend.toggle_fault(kind).await {
        Ok(reply) => {
            info!(%kind, %reply, "Fault toggled");
            let flags: FaultFlags = serde_json::from_value(reply).unwrap_or_default();
            match flags.describe() {
                Some(reported) => Notification::confirmation(format!("Toggled {} ({})", kind, reported)),
                None => Notification::confirmation(format!("Toggled {}", kind)),
            }
        }
        Err(e) => {
            warn!(%kind, error = %e, "Failed to toggle fault");
            Notification::error(format!("Failed to toggle {}: {}", kind, e))
        }
    }
}

/// Poll the audit timeline and replace `log` on every successful fetch.
///
/// Fires immediately, then every `period`. Failures are logged and leave
/// `log` untouched.
pub fn start_audit_polling(
    backend: Arc<dyn Backend>,
    period: Duration,
    log: watch::Sender<AuditLog>,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = ticker(period, true);
        while tick(&mut ticker, &token).await {
            let Some(outcome) = until_cancelled(&token, backend.fetch_audit()).await else {
                break;
            };
            match outcome {
                Ok(events) => {
                    if token.is_cancelled() {
                        break;
                    }
                    trace!(count = events.len(), "Audit log refreshed");
                    log.send_replace(AuditLog::from_fetched(events));
                }
                Err(e) => warn!(error = %e, "Failed to fetch audit log"),
            }
        }
        debug!("Audit polling stopped");
    })
}

/// Probe the demo service's health and publish the resulting status.
///
/// Fires immediately, then every `period`.
pub fn start_health_polling(
    backend: Arc<dyn Backend>,
    period: Duration,
    health: watch::Sender<HealthStatus>,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = ticker(period, true);
        while tick(&mut ticker, &token).await {
            let Some(outcome) = until_cancelled(&token, backend.probe_health()).await else {
                break;
            };
            if let Err(e) = &outcome {
                warn!(error = %e, "Health check failed");
            }
            let status = HealthStatus::from_probe(&outcome);
            if token.is_cancelled() {
                break;
            }
            let changed = health.send_if_modified(|current| {
                if *current == status {
                    false
                } else {
                    *current = status;
                    true
                }
            });
            if changed {
                info!(%status, "Service status changed");
            }
        }
        debug!("Health polling stopped");
    })
}

/// Send load to the demo service root every `period`.
///
/// The first request goes out after one period. Responses and errors are
/// discarded.
pub fn start_traffic_generator(
    backend: Arc<dyn Backend>,
    period: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = ticker(period, false);
        while tick(&mut ticker, &token).await {
            match until_cancelled(&token, backend.generate_traffic()).await {
                None => break,
                Some(Err(e)) => trace!(error = %e, "Traffic request failed"),
                Some(Ok(())) => {}
            }
        }
        debug!("Traffic generator stopped");
    })
}

fn ticker(period: Duration, immediate: bool) -> Interval {
    let start = if immediate {
        Instant::now()
    } else {
        Instant::now() + period
    };
    let mut ticker = time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Wait for the next tick. Returns `false` once cancelled.
async fn tick(ticker: &mut Interval, token: &CancellationToken) -> bool {
    tokio::select! {
        biased;
        _ = token.cancelled() => false,
        _ = ticker.tick() => true,
    }
}

/// Run `fut` unless the token fires first.
async fn until_cancelled<F: Future>(token: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        output = fut => Some(output),
    }
}

/// A running dashboard: the three loops plus read access to their state.
///
/// Must be activated from within a tokio runtime.
#[derive(Debug)]
pub struct Dashboard {
    backend: Arc<dyn Backend>,
    health: watch::Receiver<HealthStatus>,
    audit: watch::Receiver<AuditLog>,
    token: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl Dashboard {
    /// Start all loops against `backend`.
    pub fn activate(backend: Arc<dyn Backend>, intervals: Intervals) -> Self {
        let token = CancellationToken::new();
        let (health_tx, health) = watch::channel(HealthStatus::Checking);
        let (audit_tx, audit) = watch::channel(AuditLog::default());

        let tasks = vec![
            start_audit_polling(backend.clone(), intervals.audit, audit_tx, token.clone()),
            start_health_polling(backend.clone(), intervals.health, health_tx, token.clone()),
            start_traffic_generator(backend.clone(), intervals.traffic, token.clone()),
        ];

        info!(backend = backend.description(), "Dashboard activated");

        Self {
            backend,
            health,
            audit,
            token,
            tasks,
        }
    }

    /// Latest health status.
    pub fn health(&self) -> HealthStatus {
        *self.health.borrow()
    }

    /// Latest audit log (newest first).
    pub fn audit_log(&self) -> AuditLog {
        self.audit.borrow().clone()
    }

    /// A receiver that is notified whenever the health status changes.
    pub fn subscribe_health(&self) -> watch::Receiver<HealthStatus> {
        self.health.clone()
    }

    /// A receiver that is notified whenever the audit log is replaced.
    pub fn subscribe_audit(&self) -> watch::Receiver<AuditLog> {
        self.audit.clone()
    }

    pub fn backend(&self) -> Arc<dyn Backend> {
        self.backend.clone()
    }

    /// Toggle a fault on the demo service. See [`toggle_fault`].
    pub async fn toggle_fault(&self, kind: FaultKind) -> Notification {
        toggle_fault(self.backend.as_ref(), kind).await
    }

    /// Stop all loops and wait for them to exit.
    pub async fn teardown(mut self) {
        self.token.cancel();
        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                warn!(error = %e, "Dashboard task ended abnormally");
            }
        }
        info!("Dashboard torn down");
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
