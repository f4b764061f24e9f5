//! Service status indicator and the fault-injection control panel.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::FaultKind;

/// Render "Service Status: <label>" plus the fault buttons.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Controls ", app.theme.header))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [status_area, buttons_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);

    let status = Line::from(vec![
        Span::raw(" Service Status: "),
        Span::styled(app.health.label(), app.theme.health_style(app.health)),
    ]);
    frame.render_widget(Paragraph::new(status), status_area);

    frame.render_widget(Paragraph::new(button_line(app)), buttons_area);
}

fn button_line(app: &App) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (index, kind) in FaultKind::ALL.iter().enumerate() {
        let style = if index == app.selected_fault {
            app.theme.button_active
        } else {
            app.theme.button_inactive
        };
        spans.push(Span::styled(
            format!("[{}] {}", index + 1, kind.button_label()),
            style,
        ));
        spans.push(Span::raw("  "));
    }
    if app.pending_toggles > 0 {
        spans.push(Span::styled("…", Style::default().add_modifier(Modifier::DIM)));
    }
    Line::from(spans)
}
