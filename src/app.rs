//! Application state and navigation logic.

use std::time::Instant;

use anyhow::Result;
use chrono::Utc;

use crate::data::{simulate, Alert, Device, DeviceStatus, Fleet, MeasurementPoint, NoiseSource};
use crate::ui::fleet::SortColumn;
use crate::ui::Theme;

/// The current view/tab in the TUI.
///
/// Device detail is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Device table with fleet statistics.
    Fleet,
    /// All alerts across the fleet, newest first.
    Alerts,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Fleet => View::Alerts,
            View::Alerts => View::Fleet,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        self.next()
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Fleet => "Fleet",
            View::Alerts => "Alerts",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Fleet state and simulation
    pub fleet: Fleet,
    noise: Box<dyn NoiseSource>,
    pub history_hours: u32,

    // Live series for the device shown in the detail overlay
    pub series: Vec<MeasurementPoint>,
    pub series_device_id: Option<String>,

    // Navigation state
    pub selected_device_index: usize,
    pub selected_alert_index: usize,

    // Sorting (Fleet view)
    pub sort_column: SortColumn,
    pub sort_ascending: bool,

    // Search/filter
    pub filter_text: String,
    pub filter_active: bool,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App over a seeded device fleet.
    pub fn new(devices: Vec<Device>, noise: Box<dyn NoiseSource>, history_hours: u32) -> Self {
        Self {
            running: true,
            current_view: View::Fleet,
            show_help: false,
            show_detail_overlay: false,
            fleet: Fleet::new(devices),
            noise,
            history_hours,
            series: Vec::new(),
            series_device_id: None,
            selected_device_index: 0,
            selected_alert_index: 0,
            sort_column: SortColumn::default(),
            sort_ascending: true,
            filter_text: String::new(),
            filter_active: false,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Apply one coarse simulation tick to the whole fleet.
    ///
    /// Driven by the fleet refresh timer (30s by default). Only active
    /// devices change; the simulator passes the rest through untouched.
    pub fn tick_fleet(&mut self) {
        self.fleet.tick_all(&mut *self.noise);
    }

    /// Apply one fine simulation tick to the device in the detail overlay.
    ///
    /// Driven by the detail refresh timer (5s by default). Ticks the
    /// device, stores the returned snapshot in the fleet, and appends a
    /// live point to the bounded series.
    pub fn tick_detail(&mut self) {
        if !self.show_detail_overlay {
            return;
        }
        let Some(id) = self.series_device_id.clone() else {
            return;
        };
        let Some(updated) = self.fleet.tick_device(&id, &mut *self.noise) else {
            return;
        };
        if updated.status == DeviceStatus::Active {
            let series = std::mem::take(&mut self.series);
            self.series = simulate::append_live_point(series, &updated, Utc::now());
        }
    }

    /// Open the detail overlay for the currently selected device and
    /// generate a fresh measurement history for it.
    pub fn enter_detail(&mut self) {
        let device = match self.current_view {
            View::Fleet => self
                .get_selected_device_raw_index()
                .map(|i| self.fleet.devices[i].clone()),
            View::Alerts => self
                .visible_alerts()
                .get(self.selected_alert_index)
                .map(|(d, _)| (*d).clone()),
        };
        let Some(device) = device else {
            return;
        };

        self.series =
            simulate::generate_history(&device, self.history_hours, Utc::now(), &mut *self.noise);
        self.series_device_id = Some(device.id);
        self.show_detail_overlay = true;
    }

    /// Regenerate the detail series, or tick the fleet when no overlay is
    /// open. Bound to the manual refresh key.
    pub fn refresh(&mut self) {
        if self.show_detail_overlay {
            if let Some(id) = self.series_device_id.clone() {
                self.series = self.fleet.history(&id, self.history_hours, &mut *self.noise);
            }
        } else {
            self.tick_fleet();
        }
    }

    /// Close the detail overlay and drop its live series.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
        self.series.clear();
        self.series_device_id = None;
    }

    /// Navigate back: close the overlay first, then return to the Fleet view.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.close_overlay();
            return;
        }
        if self.current_view != View::Fleet {
            self.current_view = View::Fleet;
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        match self.current_view {
            View::Fleet => {
                let max = self.visible_devices().len().saturating_sub(1);
                self.selected_device_index = (self.selected_device_index + n).min(max);
            }
            View::Alerts => {
                let max = self.visible_alerts().len().saturating_sub(1);
                self.selected_alert_index = (self.selected_alert_index + n).min(max);
            }
        }
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        match self.current_view {
            View::Fleet => {
                self.selected_device_index = self.selected_device_index.saturating_sub(n);
            }
            View::Alerts => {
                self.selected_alert_index = self.selected_alert_index.saturating_sub(n);
            }
        }
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        match self.current_view {
            View::Fleet => self.selected_device_index = 0,
            View::Alerts => self.selected_alert_index = 0,
        }
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        match self.current_view {
            View::Fleet => {
                self.selected_device_index = self.visible_devices().len().saturating_sub(1);
            }
            View::Alerts => {
                self.selected_alert_index = self.visible_alerts().len().saturating_sub(1);
            }
        }
    }

    /// Devices after filtering and sorting, paired with their raw index
    /// into `fleet.devices`.
    ///
    /// The Fleet view renders this list, so the visual selection index
    /// differs from the underlying data index.
    pub fn visible_devices(&self) -> Vec<(usize, &Device)> {
        let mut devices: Vec<(usize, &Device)> = self
            .fleet
            .devices
            .iter()
            .enumerate()
            .filter(|(_, d)| d.matches(&self.filter_text))
            .collect();
        crate::ui::fleet::sort_devices_by(&mut devices, self.sort_column, self.sort_ascending);
        devices
    }

    /// Alerts after filtering, newest first.
    pub fn visible_alerts(&self) -> Vec<(&Device, &Alert)> {
        let query = self.filter_text.to_lowercase();
        self.fleet
            .all_alerts()
            .into_iter()
            .filter(|(device, alert)| {
                query.is_empty()
                    || device.matches(&query)
                    || alert.message.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Raw index into `fleet.devices` for the currently selected visual row.
    pub fn get_selected_device_raw_index(&self) -> Option<usize> {
        self.visible_devices()
            .get(self.selected_device_index)
            .map(|(idx, _)| *idx)
    }

    /// The device shown in the detail overlay, if any.
    pub fn detail_device(&self) -> Option<&Device> {
        let id = self.series_device_id.as_deref()?;
        self.fleet.get(id)
    }

    /// Cycle to the next sort column (Fleet view only).
    pub fn cycle_sort(&mut self) {
        if self.current_view == View::Fleet {
            self.sort_column = self.sort_column.next();
        }
    }

    /// Toggle sort direction between ascending and descending.
    pub fn toggle_sort_direction(&mut self) {
        if self.current_view == View::Fleet {
            self.sort_ascending = !self.sort_ascending;
        }
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the fleet state to a JSON file.
    pub fn export_state(&self, path: &std::path::Path) -> Result<()> {
        use std::io::Write;

        let stats = self.fleet.stats();
        let export = serde_json::json!({
            "summary": {
                "total": stats.total,
                "active": stats.active,
                "warning": stats.warning,
                "error": stats.error,
                "offline": stats.offline,
            },
            "devices": self.fleet.devices,
        });

        let json = serde_json::to_string_pretty(&export)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RngNoise;
    use crate::fixture;

    fn test_app() -> App {
        App::new(
            fixture::default_fleet(Utc::now()),
            Box::new(RngNoise::seeded(9)),
            24,
        )
    }

    #[test]
    fn test_enter_detail_generates_history() {
        let mut app = test_app();
        app.enter_detail();

        assert!(app.show_detail_overlay);
        assert_eq!(app.series.len(), 289);
        assert!(app.series_device_id.is_some());
    }

    #[test]
    fn test_close_overlay_drops_series() {
        let mut app = test_app();
        app.enter_detail();
        app.close_overlay();

        assert!(!app.show_detail_overlay);
        assert!(app.series.is_empty());
        assert!(app.series_device_id.is_none());
    }

    #[test]
    fn test_tick_detail_appends_and_truncates() {
        let mut app = test_app();
        // Narrow to an active device so the tick appends a live point.
        app.filter_text = "ICU-A".to_string();
        app.enter_detail();
        assert_eq!(app.series_device_id.as_deref(), Some("UM-001"));
        let volume_before = app.detail_device().unwrap().total_volume;

        app.tick_detail();

        // Series stays bounded and the last point carries the updated volume.
        assert_eq!(app.series.len(), crate::data::MAX_SERIES_POINTS);
        let last = app.series.last().unwrap();
        assert!(last.volume >= volume_before);
    }

    #[test]
    fn test_filter_narrows_fleet_view() {
        let mut app = test_app();
        assert_eq!(app.visible_devices().len(), 6);

        app.filter_text = "icu".to_string();
        assert_eq!(app.visible_devices().len(), 2);

        app.filter_text = "nothing-matches".to_string();
        assert!(app.visible_devices().is_empty());
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = test_app();
        app.select_next_n(100);
        assert_eq!(app.selected_device_index, 5);
        app.select_first();
        assert_eq!(app.selected_device_index, 0);
    }
}
