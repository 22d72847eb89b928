//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar with a fleet status overview.
///
/// Displays: status indicator, device counts by status, total fleet volume.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.fleet.stats();
    let total_volume: f64 = app.fleet.devices.iter().map(|d| d.total_volume).sum();

    let status_style = app.theme.status_style(stats.worst());

    let line = Line::from(vec![
        Span::styled(" ● ", status_style),
        Span::styled("UROWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            format!("{}", stats.active),
            Style::default().fg(app.theme.active),
        ),
        Span::raw(" active "),
        if stats.warning > 0 {
            Span::styled(
                format!("{}", stats.warning),
                Style::default().fg(app.theme.warning),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" warn "),
        if stats.error > 0 {
            Span::styled(
                format!("{}", stats.error),
                Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" err "),
        if stats.offline > 0 {
            Span::styled(
                format!("{}", stats.offline),
                Style::default().fg(app.theme.offline),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" off │ "),
        Span::styled(
            format!("{}", stats.total),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" devices │ "),
        Span::raw(format!("Σ {}", format_volume(total_volume))),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![Line::from(" 1:Fleet "), Line::from(" 2:Alerts ")];

    let selected = match app.current_view {
        View::Fleet => 0,
        View::Alerts => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: current view, time since the last fleet tick, available controls.
/// Also displays temporary status messages.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let elapsed = app.fleet.last_updated.elapsed();

    // Context-sensitive controls
    let controls = if app.filter_active {
        "Type to search | Enter:apply Esc:cancel"
    } else {
        match app.current_view {
            View::Fleet => "/:search s:sort Tab:switch Enter:detail ?:help q:quit",
            View::Alerts => "/:search Tab:switch Enter:device ?:help q:quit",
        }
    };

    let status = format!(
        " {} | Updated {:.1}s ago | {}",
        app.current_view.label(),
        elapsed.as_secs_f64(),
        controls,
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Device detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Fleet view",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  /         Start filter/search"),
        Line::from("  c         Clear filter"),
        Line::from("  s         Cycle sort column"),
        Line::from("  S         Toggle sort direction"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refresh now"),
        Line::from("  e         Export fleet to JSON"),
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

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 24u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

/// Format a volume in mL for display (e.g. 1250.0 -> "1250 mL",
/// 12500.0 -> "12.5 L").
pub fn format_volume(ml: f64) -> String {
    if ml >= 10_000.0 {
        format!("{:.1} L", ml / 1000.0)
    } else {
        format!("{:.0} mL", ml)
    }
}

/// Format a flow rate in mL/min for display.
pub fn format_flow(ml_per_min: f64) -> String {
    format!("{:.1} mL/min", ml_per_min)
}

/// Format a timestamp as a relative age (e.g. "30s ago", "2m ago").
pub fn format_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - timestamp).num_seconds().max(0);
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(0.0), "0 mL");
        assert_eq!(format_volume(1250.0), "1250 mL");
        assert_eq!(format_volume(12500.0), "12.5 L");
    }

    #[test]
    fn test_format_age() {
        let now = Utc::now();
        assert_eq!(format_age(now - Duration::seconds(30), now), "30s ago");
        assert_eq!(format_age(now - Duration::minutes(2), now), "2m ago");
        assert_eq!(format_age(now - Duration::hours(3), now), "3h ago");
        // Future timestamps clamp to zero rather than going negative.
        assert_eq!(format_age(now + Duration::seconds(5), now), "0s ago");
    }
}
