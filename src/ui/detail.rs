//! Detail overlay rendering.
//!
//! Displays a modal overlay with device information, active alerts, and
//! charts of the simulated measurement series.

use chrono::Utc;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Sparkline},
    Frame,
};

use crate::app::App;
use crate::ui::common::{format_age, format_flow, format_volume};

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 16;

/// Render the device detail as a modal overlay.
///
/// Shows the device's current metrics, its alerts, a volume chart over the
/// generated 24h series, and a flow-rate sparkline.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(device) = app.detail_device() else {
        return;
    };
    let now = Utc::now();

    // Calculate overlay size - use most of the screen
    let overlay_width = (area.width * 95 / 100).clamp(MIN_OVERLAY_WIDTH, 110);
    let overlay_height = (area.height * 90 / 100).clamp(MIN_OVERLAY_HEIGHT, 50);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let alert_rows = device.alerts.len().min(3) as u16;
    let alerts_height = if device.alerts.is_empty() {
        0
    } else {
        alert_rows + 2
    };

    let chunks = Layout::vertical([
        Constraint::Length(6),             // Header with device info
        Constraint::Length(alerts_height), // Active alerts (if any)
        Constraint::Min(8),                // Volume chart
        Constraint::Length(4),             // Flow sparkline
        Constraint::Length(1),             // Footer
    ])
    .split(overlay_area);

    // ===== HEADER SECTION =====
    let status_style = app.theme.status_style(device.status);

    let header_lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", device.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("({})", device.id),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Status: "),
            Span::styled(
                format!("{} {}", device.status.symbol(), device.status.label()),
                status_style.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    Flow: "),
            Span::styled(
                format_flow(device.current_flow_rate),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("    Volume: "),
            Span::styled(
                format_volume(device.total_volume),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("    Battery: "),
            Span::styled(
                format!("{}%", device.battery_level),
                app.theme.battery_style(device.battery_level),
            ),
        ]),
        Line::from(vec![
            Span::raw(" Location: "),
            Span::raw(device.location.clone()),
            Span::raw("    Last update: "),
            Span::raw(format_age(device.last_update, now)),
        ]),
    ];

    let header_block = Block::default()
        .title(" Device Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(header_lines).block(header_block), chunks[0]);

    // ===== ALERTS SECTION =====
    if !device.alerts.is_empty() {
        let alert_lines: Vec<Line> = device
            .alerts
            .iter()
            .take(alert_rows as usize)
            .map(|alert| {
                Line::from(vec![
                    Span::styled(
                        format!(" [{}] ", alert.severity.label()),
                        app.theme.severity_style(alert.severity),
                    ),
                    Span::raw(alert.message.clone()),
                    Span::styled(
                        format!("  ({})", format_age(alert.timestamp, now)),
                        Style::default().add_modifier(Modifier::DIM),
                    ),
                ])
            })
            .collect();

        let alerts_block = Block::default()
            .title(format!(" Active Alerts ({}) ", device.alerts.len()))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.warning));

        frame.render_widget(Paragraph::new(alert_lines).block(alerts_block), chunks[1]);
    }

    // ===== VOLUME CHART =====
    render_volume_chart(frame, app, chunks[2]);

    // ===== FLOW SPARKLINE =====
    render_flow_sparkline(frame, app, chunks[3]);

    // ===== FOOTER =====
    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " r:regenerate Esc:close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[4]);
}

/// Render the cumulative volume series as a line chart.
fn render_volume_chart(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Volume ({}h) ", app.history_hours))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if app.series.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No measurement data",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let points: Vec<(f64, f64)> = app
        .series
        .iter()
        .map(|p| (p.timestamp.timestamp() as f64, p.volume))
        .collect();

    let x_min = points.first().map(|p| p.0).unwrap_or(0.0);
    let x_max = points.last().map(|p| p.0).unwrap_or(1.0);
    let y_max = points.iter().map(|p| p.1).fold(0.0_f64, f64::max).max(1.0);

    let x_labels: Vec<Span> = [x_min, (x_min + x_max) / 2.0, x_max]
        .iter()
        .map(|&ts| {
            let dt = chrono::DateTime::from_timestamp(ts as i64, 0).unwrap_or_default();
            Span::raw(dt.format("%H:%M").to_string())
        })
        .collect();

    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format_volume(y_max / 2.0)),
        Span::raw(format_volume(y_max)),
    ];

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.highlight))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([0.0, y_max * 1.05])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Render the flow-rate series as a sparkline.
fn render_flow_sparkline(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Flow rate ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    // Show the most recent window that fits the overlay width.
    let capacity = area.width.saturating_sub(2) as usize;
    let flows: Vec<u64> = app
        .series
        .iter()
        .rev()
        .take(capacity)
        .rev()
        .map(|p| p.flow_rate.round().max(0.0) as u64)
        .collect();

    let sparkline = Sparkline::default()
        .block(block)
        .style(Style::default().fg(app.theme.active))
        .data(&flows);

    frame.render_widget(sparkline, area);
}
