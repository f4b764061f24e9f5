//! Application state and interaction logic.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};

use crate::controller::{toggle_fault, Dashboard, Notification};
use crate::data::{AuditLog, FaultKind, HealthStatus};
use crate::ui::Theme;

/// How long a transient status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Controller and the latest state it published
    dashboard: Dashboard,
    health_rx: watch::Receiver<HealthStatus>,
    audit_rx: watch::Receiver<AuditLog>,
    pub health: HealthStatus,
    pub audit: AuditLog,
    pub last_audit_update: Option<Instant>,
    source_description: String,
    pub metrics_url: String,

    // Fault toggles run on the runtime and report back here
    runtime: Handle,
    notice_tx: mpsc::UnboundedSender<Notification>,
    notice_rx: mpsc::UnboundedReceiver<Notification>,
    pub pending_toggles: usize,
    notifications: VecDeque<Notification>,

    // Navigation state
    pub selected_fault: usize,
    pub selected_event: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App around an activated dashboard.
    ///
    /// Must be called from within a tokio runtime; fault toggles are spawned on it.
    pub fn new(dashboard: Dashboard, metrics_url: impl Into<String>, theme: Theme) -> Self {
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let health_rx = dashboard.subscribe_health();
        let audit_rx = dashboard.subscribe_audit();
        let source_description = dashboard.backend().description().to_string();
        Self {
            running: true,
            show_help: false,
            health: dashboard.health(),
            audit: dashboard.audit_log(),
            dashboard,
            health_rx,
            audit_rx,
            last_audit_update: None,
            source_description,
            metrics_url: metrics_url.into(),
            runtime: Handle::current(),
            notice_tx,
            notice_rx,
            pending_toggles: 0,
            notifications: VecDeque::new(),
            selected_fault: 0,
            selected_event: 0,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the remote services.
    pub fn source_description(&self) -> &str {
        &self.source_description
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Pick up whatever the dashboard loops and fault toggles published.
    ///
    /// Returns true if anything visible changed.
    pub fn refresh(&mut self) -> bool {
        let mut changed = false;

        if self.health_rx.has_changed().unwrap_or(false) {
            self.health = *self.health_rx.borrow_and_update();
            changed = true;
        }

        if self.audit_rx.has_changed().unwrap_or(false) {
            self.audit = self.audit_rx.borrow_and_update().clone();
            self.last_audit_update = Some(Instant::now());
            if self.selected_event >= self.audit.len() {
                self.selected_event = self.audit.len().saturating_sub(1);
            }
            changed = true;
        }

        while let Ok(notification) = self.notice_rx.try_recv() {
            self.pending_toggles = self.pending_toggles.saturating_sub(1);
            self.notifications.push_back(notification);
            changed = true;
        }

        changed
    }

    /// Fire a fault toggle in the background. The outcome arrives as a notification.
    pub fn trigger_fault(&mut self, kind: FaultKind) {
        let backend = self.dashboard.backend();
        let tx = self.notice_tx.clone();
        self.runtime.spawn(async move {
            let notification = toggle_fault(backend.as_ref(), kind).await;
            let _ = tx.send(notification);
        });
        self.pending_toggles += 1;
        self.set_status_message(format!("Toggling {}...", kind));
    }

    /// Toggle the fault whose button is selected.
    pub fn trigger_selected_fault(&mut self) {
        if let Some(kind) = self.selected_fault_kind() {
            self.trigger_fault(kind);
        }
    }

    pub fn selected_fault_kind(&self) -> Option<FaultKind> {
        FaultKind::ALL.get(self.selected_fault).copied()
    }

    /// Move the control-panel selection right, wrapping around.
    pub fn select_next_fault(&mut self) {
        self.selected_fault = (self.selected_fault + 1) % FaultKind::ALL.len();
    }

    /// Move the control-panel selection left, wrapping around.
    pub fn select_prev_fault(&mut self) {
        let len = FaultKind::ALL.len();
        self.selected_fault = (self.selected_fault + len - 1) % len;
    }

    /// The notification currently blocking input, if any.
    pub fn current_notification(&self) -> Option<&Notification> {
        self.notifications.front()
    }

    /// Dismiss the current notification; the next queued one (if any) takes its place.
    pub fn dismiss_notification(&mut self) {
        self.notifications.pop_front();
    }

    /// Move timeline selection down by one event.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move timeline selection up by one event.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move timeline selection down by n events.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.audit.len().saturating_sub(1);
        self.selected_event = (self.selected_event + n).min(max);
    }

    /// Move timeline selection up by n events.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_event = self.selected_event.saturating_sub(n);
    }

    /// Jump to the newest event.
    pub fn select_first(&mut self) {
        self.selected_event = 0;
    }

    /// Jump to the oldest event.
    pub fn select_last(&mut self) {
        self.selected_event = self.audit.len().saturating_sub(1);
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Hand the dashboard back so it can be torn down.
    pub fn into_dashboard(self) -> Dashboard {
        self.dashboard
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::Intervals;
    use crate::controller::tests::{event, FakeBackend};
    use crate::controller::NotificationLevel;
    use crate::error::ApiError;

    pub(crate) fn app_with(backend: Arc<FakeBackend>) -> App {
        let dashboard = Dashboard::activate(backend, Intervals::default());
        App::new(dashboard, "http://metrics.local/panel", Theme::dark())
    }

    async fn settle(app: &mut App) {
        tokio::time::sleep(Duration::from_millis(50)).await;
        app.refresh();
    }

    #[tokio::test]
    async fn test_refresh_picks_up_polled_state() {
        let backend = FakeBackend::default();
        backend
            .audit_script
            .lock()
            .unwrap()
            .push_back(Ok(vec![event(1, "a"), event(2, "b")]));
        let mut app = app_with(Arc::new(backend));
        assert_eq!(app.health, HealthStatus::Checking);
        assert!(app.audit.is_empty());

        settle(&mut app).await;

        assert_eq!(app.health, HealthStatus::Healthy);
        assert_eq!(app.audit.events()[0].details, "b");
        assert!(app.last_audit_update.is_some());

        app.into_dashboard().teardown().await;
    }

    #[tokio::test]
    async fn test_trigger_fault_queues_confirmation() {
        let backend = Arc::new(FakeBackend::default());
        let mut app = app_with(backend.clone());

        app.trigger_fault(FaultKind::Latency);
        assert_eq!(app.pending_toggles, 1);
        assert_eq!(app.get_status_message(), Some("Toggling latency..."));

        settle(&mut app).await;

        assert_eq!(app.pending_toggles, 0);
        assert_eq!(*backend.toggles.lock().unwrap(), vec![FaultKind::Latency]);
        let notification = app.current_notification().unwrap();
        assert_eq!(notification.level, NotificationLevel::Confirmation);

        app.dismiss_notification();
        assert!(app.current_notification().is_none());

        app.into_dashboard().teardown().await;
    }

    #[tokio::test]
    async fn test_failed_toggle_queues_error() {
        let backend = FakeBackend::default();
        *backend.toggle_error.lock().unwrap() = Some(ApiError::Status(404));
        let mut app = app_with(Arc::new(backend));

        app.trigger_fault(FaultKind::Unhealthy);
        settle(&mut app).await;

        let notification = app.current_notification().unwrap();
        assert!(notification.is_error());
        assert_eq!(notification.message, "Failed to toggle unhealthy: API returned status 404");
        assert_eq!(app.pending_toggles, 0);

        // Exactly one notification per toggle
        app.dismiss_notification();
        settle(&mut app).await;
        assert!(app.current_notification().is_none());

        app.into_dashboard().teardown().await;
    }

    #[tokio::test]
    async fn test_fault_selection_wraps() {
        let mut app = app_with(Arc::new(FakeBackend::default()));
        assert_eq!(app.selected_fault_kind(), Some(FaultKind::Error));

        app.select_prev_fault();
        assert_eq!(app.selected_fault_kind(), Some(FaultKind::Unhealthy));

        app.select_next_fault();
        app.select_next_fault();
        assert_eq!(app.selected_fault_kind(), Some(FaultKind::Latency));

        app.into_dashboard().teardown().await;
    }

    #[tokio::test]
    async fn test_timeline_selection_clamped() {
        let backend = FakeBackend::default();
        backend
            .audit_script
            .lock()
            .unwrap()
            .push_back(Ok(vec![event(1, "a"), event(2, "b"), event(3, "c")]));
        let mut app = app_with(Arc::new(backend));
        settle(&mut app).await;

        app.select_next_n(10);
        assert_eq!(app.selected_event, 2);
        app.select_prev();
        assert_eq!(app.selected_event, 1);
        app.select_first();
        assert_eq!(app.selected_event, 0);
        app.select_last();
        assert_eq!(app.selected_event, 2);

        app.into_dashboard().teardown().await;
    }
}
