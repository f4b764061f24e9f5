//! Common UI components.
//!
//! This module contains the header bar, status bar, help overlay, and the
//! notification modal.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::controller::NotificationLevel;
use crate::data::duration::format_duration;

/// Render the title bar.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.health_style(app.health)),
        Span::styled("AutoHeal Demo ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            "Self-Healing Infrastructure Demonstration",
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows: time since the last audit refresh, pending toggles, available controls.
/// Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let updated = match app.last_audit_update {
        Some(at) => format!("Audit updated {} ago", format_duration(at.elapsed())),
        None => "Waiting for audit log...".to_string(),
    };

    let pending = if app.pending_toggles > 0 {
        format!(" | {} toggle(s) in flight", app.pending_toggles)
    } else {
        String::new()
    };

    let status = format!(
        " {} | {}{} | 1-3:fault ←→:select Enter:trigger ↑↓:scroll ?:help q:quit",
        app.source_description(),
        updated,
        pending,
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Fault Injection",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  1         Trigger 500 errors"),
        Line::from("  2         Trigger latency"),
        Line::from("  3         Trigger unhealthy check"),
        Line::from("  ←/→ h/l   Select button"),
        Line::from("  Enter     Trigger selected"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Audit Timeline",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ j/k     Scroll events"),
        Line::from("  PgUp/PgDn   Jump 10 events"),
        Line::from("  Home/End    Newest/oldest"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    frame.render_widget(Clear, centered(area, 40, 22));
    frame.render_widget(paragraph, centered(area, 40, 22));
}

/// Render the current notification as a modal that must be dismissed.
pub fn render_notification(frame: &mut Frame, app: &App, area: Rect) {
    let Some(notification) = app.current_notification() else {
        return;
    };

    let (title, color) = match notification.level {
        NotificationLevel::Confirmation => (" Done ", app.theme.healthy),
        NotificationLevel::Error => (" Error ", app.theme.critical),
    };

    let text = vec![
        Line::from(""),
        Line::from(notification.message.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            "Enter/Esc to dismiss",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    let modal = centered(area, 60, 8);
    frame.render_widget(Clear, modal);
    frame.render_widget(paragraph, modal);
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
