//! Audit timeline and metrics panel rendering.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::App;

/// Shown in place of the table when the audit log is empty.
pub const EMPTY_PLACEHOLDER: &str = "No events recorded.";

/// Render the audit timeline, newest event first.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let position_info = if app.audit.is_empty() {
        String::new()
    } else {
        format!(" [{}/{}]", app.selected_event + 1, app.audit.len())
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" Audit Timeline{} ", position_info),
            app.theme.header,
        ))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if app.audit.is_empty() {
        let placeholder = Paragraph::new(format!(" {}", EMPTY_PLACEHOLDER))
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let header = Row::new(vec!["Time", "Status", "Action", "Details"])
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = app
        .audit
        .iter()
        .map(|event| {
            Row::new(vec![
                Cell::from(event.timestamp.display()),
                Cell::from(event.status.clone())
                    .style(app.theme.audit_status_style(&event.status_key())),
                Cell::from(event.action.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(event.details.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(19), // Time
        Constraint::Length(12), // Status
        Constraint::Fill(1),    // Action
        Constraint::Fill(3),    // Details
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_event.min(app.audit.len() - 1)));

    frame.render_stateful_widget(table, area, &mut state);
}

/// Render the pointer to the external metrics dashboard.
///
/// The dashboard itself is never fetched; it needs its own login.
pub fn render_metrics(frame: &mut Frame, app: &App, area: Rect) {
    let text = vec![
        Line::from(vec![
            Span::raw(" Dashboard: "),
            Span::styled(app.metrics_url.as_str(), Style::default().fg(app.theme.highlight)),
        ]),
        Line::from(Span::styled(
            " Note: the metrics dashboard requires a separate login.",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(Span::styled(" Metrics (Grafana) ", app.theme.header))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
