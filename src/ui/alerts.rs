//! Alerts view rendering.
//!
//! Displays all alerts across the fleet in a single table, newest first.

use chrono::Utc;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::ui::common::format_age;

/// Render the Alerts view.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let alerts = app.visible_alerts();
    let now = Utc::now();

    if alerts.is_empty() {
        let text = if app.filter_text.is_empty() {
            "  No active alerts"
        } else {
            "  No alerts match the filter"
        };
        let block = Block::default()
            .title(" Alerts (0) ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border));
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                text,
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Age"),
        Cell::from("Severity"),
        Cell::from("Device"),
        Cell::from("Location"),
        Cell::from("Message"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = alerts
        .iter()
        .map(|(device, alert)| {
            let severity_style = app.theme.severity_style(alert.severity);
            Row::new(vec![
                Cell::from(format_age(alert.timestamp, now)),
                Cell::from(alert.severity.label()).style(severity_style),
                Cell::from(device.name.clone()),
                Cell::from(device.location.clone())
                    .style(Style::default().add_modifier(Modifier::DIM)),
                Cell::from(alert.message.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),  // Age
        Constraint::Length(9),  // Severity
        Constraint::Fill(2),    // Device
        Constraint::Fill(2),    // Location
        Constraint::Fill(4),    // Message
    ];

    let selected = app.selected_alert_index.min(alerts.len().saturating_sub(1));

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let title = format!(" Alerts ({}){} ", alerts.len(), filter_info);

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}
