//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::HealthStatus;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for in-progress and pending states.
    pub warning: Color,
    /// Color for failures and unhealthy status.
    pub critical: Color,
    /// Color for healthy status.
    pub healthy: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for panel titles and header rows.
    pub header: Style,
    /// Style for the selected timeline row.
    pub selected: Style,
    /// Style for the selected control-panel button.
    pub button_active: Style,
    /// Style for the other buttons.
    pub button_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            button_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            button_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            button_active: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            button_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for the service health status
    pub fn health_style(&self, status: HealthStatus) -> Style {
        match status {
            HealthStatus::Healthy => Style::default().fg(self.healthy).add_modifier(Modifier::BOLD),
            HealthStatus::Checking => Style::default().fg(self.warning),
            HealthStatus::Unhealthy | HealthStatus::Down => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
        }
    }

    /// Get style for an audit event status (see `AuditEvent::status_key`)
    pub fn audit_status_style(&self, status_key: &str) -> Style {
        match status_key {
            "resolved" => Style::default().fg(self.healthy),
            "in-progress" => Style::default().fg(self.warning),
            "failed" => Style::default().fg(self.critical).add_modifier(Modifier::BOLD),
            _ => Style::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_status_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.audit_status_style("resolved").fg, Some(Color::Green));
        assert_eq!(theme.audit_status_style("in-progress").fg, Some(Color::Yellow));
        assert_eq!(theme.audit_status_style("failed").fg, Some(Color::Red));
        assert_eq!(theme.audit_status_style("ok").fg, None);
    }

    #[test]
    fn test_down_and_unhealthy_share_style() {
        let theme = Theme::light();
        assert_eq!(
            theme.health_style(HealthStatus::Down),
            theme.health_style(HealthStatus::Unhealthy)
        );
    }
}
