//! Fleet view rendering.
//!
//! Displays a sortable table of all devices with status, flow rate,
//! volume, battery, and alert counts.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use chrono::Utc;

use crate::app::App;
use crate::data::Device;
use crate::ui::common::{format_age, format_volume};

/// Column to sort by in the Fleet view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// Sort by device name alphabetically.
    #[default]
    Name,
    /// Sort by status severity.
    Status,
    /// Sort by current flow rate.
    Flow,
    /// Sort by total volume.
    Volume,
    /// Sort by battery level.
    Battery,
}

impl SortColumn {
    /// Cycle to the next sort column.
    pub fn next(self) -> Self {
        match self {
            SortColumn::Name => SortColumn::Status,
            SortColumn::Status => SortColumn::Flow,
            SortColumn::Flow => SortColumn::Volume,
            SortColumn::Volume => SortColumn::Battery,
            SortColumn::Battery => SortColumn::Name,
        }
    }
}

/// Render the Fleet view showing all devices in a sortable table.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let devices = app.visible_devices();
    let now = Utc::now();

    let header = Row::new(vec![
        Cell::from(format_header("Device", SortColumn::Name, app)),
        Cell::from("ID"),
        Cell::from(format_header("Status", SortColumn::Status, app)),
        Cell::from(format_header("Flow mL/min", SortColumn::Flow, app)),
        Cell::from(format_header("Volume", SortColumn::Volume, app)),
        Cell::from(format_header("Batt", SortColumn::Battery, app)),
        Cell::from("Seen"),
        Cell::from("Alerts"),
        Cell::from("Location"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = devices
        .iter()
        .map(|(_, d)| {
            let status_style = app.theme.status_style(d.status);
            let battery_style = app.theme.battery_style(d.battery_level);

            let alert_cell = if d.alerts.is_empty() {
                Cell::from("-").style(Style::default().add_modifier(Modifier::DIM))
            } else {
                Cell::from(format!("{}", d.alerts.len()))
                    .style(Style::default().fg(app.theme.warning))
            };

            Row::new(vec![
                Cell::from(d.name.clone()),
                Cell::from(d.id.clone()).style(Style::default().add_modifier(Modifier::DIM)),
                Cell::from(d.status.symbol()).style(status_style),
                Cell::from(format!("{:.1}", d.current_flow_rate)),
                Cell::from(format_volume(d.total_volume)),
                Cell::from(format!("{}%", d.battery_level)).style(battery_style),
                Cell::from(format_age(d.last_update, now)),
                alert_cell,
                Cell::from(d.location.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),    // Device name
        Constraint::Length(7),  // ID
        Constraint::Length(6),  // Status
        Constraint::Length(12), // Flow
        Constraint::Length(9),  // Volume
        Constraint::Length(5),  // Battery
        Constraint::Length(8),  // Seen
        Constraint::Length(6),  // Alerts
        Constraint::Fill(3),    // Location
    ];

    // Clamp the visual selection to the filtered list
    let selected_visual_index = app.selected_device_index.min(devices.len().saturating_sub(1));

    let sort_indicator = match app.sort_column {
        SortColumn::Name => "name",
        SortColumn::Status => "status",
        SortColumn::Flow => "flow",
        SortColumn::Volume => "volume",
        SortColumn::Battery => "battery",
    };
    let sort_dir = if app.sort_ascending { "↑" } else { "↓" };

    // Build title with filter info
    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let position_info = if !devices.is_empty() {
        format!(" [{}/{}]", selected_visual_index + 1, devices.len())
    } else {
        String::new()
    };

    let title = format!(
        " Devices ({}/{}) [s:sort {}{}]{}{} ",
        devices.len(),
        app.fleet.devices.len(),
        sort_indicator,
        sort_dir,
        filter_info,
        position_info
    );

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
    state.select(Some(selected_visual_index));

    frame.render_stateful_widget(table, area, &mut state);
}

fn format_header(name: &str, col: SortColumn, app: &App) -> Span<'static> {
    if app.sort_column == col {
        let arrow = if app.sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}

/// Sort devices by the given column and direction (public for use in app.rs)
pub fn sort_devices_by(devices: &mut [(usize, &Device)], column: SortColumn, ascending: bool) {
    devices.sort_by(|a, b| {
        let primary = match column {
            SortColumn::Name => a.1.name.cmp(&b.1.name),
            SortColumn::Status => a.1.status.cmp(&b.1.status),
            SortColumn::Flow => a
                .1
                .current_flow_rate
                .total_cmp(&b.1.current_flow_rate),
            SortColumn::Volume => a.1.total_volume.total_cmp(&b.1.total_volume),
            SortColumn::Battery => a.1.battery_level.cmp(&b.1.battery_level),
        };

        // Apply direction to primary comparison
        let primary = if ascending { primary } else { primary.reverse() };

        // Use secondary sort by name for stability when primary values are equal
        if primary == std::cmp::Ordering::Equal {
            a.1.name.cmp(&b.1.name)
        } else {
            primary
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;

    #[test]
    fn test_sort_devices_by_flow() {
        let fleet = fixture::default_fleet(Utc::now());
        let mut devices: Vec<(usize, &Device)> = fleet.iter().enumerate().collect();

        sort_devices_by(&mut devices, SortColumn::Flow, false);
        assert_eq!(devices[0].1.id, "UM-003"); // 62.1 mL/min
        assert_eq!(devices.last().unwrap().1.current_flow_rate, 0.0);

        sort_devices_by(&mut devices, SortColumn::Flow, true);
        assert_eq!(devices.last().unwrap().1.id, "UM-003");
    }

    #[test]
    fn test_sort_devices_by_status_groups_severity() {
        let fleet = fixture::default_fleet(Utc::now());
        let mut devices: Vec<(usize, &Device)> = fleet.iter().enumerate().collect();

        sort_devices_by(&mut devices, SortColumn::Status, false);
        // Offline first, then error, warnings, actives.
        assert_eq!(devices[0].1.id, "UM-006");
        assert_eq!(devices[1].1.id, "UM-004");
        assert_eq!(devices[2].1.id, "UM-002");
    }
}
