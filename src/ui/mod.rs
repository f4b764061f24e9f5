//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`controls`]: Service status indicator and fault-injection buttons
//! - [`timeline`]: Audit timeline table and the metrics dashboard pointer
//! - [`common`]: Shared components (header, status bar, help overlay, notification modal)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Controls (controls::render)          │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ Audit Timeline (timeline::render)    │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Metrics (timeline::render_metrics)   │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - common::render_help
//!    - common::render_notification
//! ```

pub mod common;
pub mod controls;
pub mod theme;
pub mod timeline;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Minimum terminal size for usable display
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 16;

/// Draw a full frame.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(
            0,
            (area.height / 2).saturating_sub(2),
            area.width,
            5u16.min(area.height),
        );
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(4), // Status + buttons
        Constraint::Min(5),    // Timeline
        Constraint::Length(4), // Metrics
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    controls::render(frame, app, chunks[1]);
    timeline::render(frame, app, chunks[2]);
    timeline::render_metrics(frame, app, chunks[3]);
    common::render_status_bar(frame, app, chunks[4]);

    if app.show_help {
        common::render_help(frame, app, area);
    }

    // The notification sits above everything, help included
    common::render_notification(frame, app, area);
}
