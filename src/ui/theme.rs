//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{AlertSeverity, DeviceStatus};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for actively measuring devices.
    pub active: Color,
    /// Color for warning-level status.
    pub warning: Color,
    /// Color for error-level status.
    pub error: Color,
    /// Color for offline devices.
    pub offline: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            active: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            offline: Color::DarkGray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            active: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            offline: Color::DarkGray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
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

    /// Get style for a device status
    pub fn status_style(&self, status: DeviceStatus) -> Style {
        match status {
            DeviceStatus::Active => Style::default().fg(self.active),
            DeviceStatus::Warning => Style::default().fg(self.warning),
            DeviceStatus::Error => Style::default().fg(self.error).add_modifier(Modifier::BOLD),
            DeviceStatus::Offline => Style::default().fg(self.offline),
        }
    }

    /// Get style for an alert severity
    pub fn severity_style(&self, severity: AlertSeverity) -> Style {
        match severity {
            AlertSeverity::Info => Style::default().fg(self.highlight),
            AlertSeverity::Warning => Style::default().fg(self.warning),
            AlertSeverity::Error => Style::default().fg(self.error).add_modifier(Modifier::BOLD),
        }
    }

    /// Get style for a battery level (green above 50%, yellow above 20%,
    /// red below).
    pub fn battery_style(&self, level: u8) -> Style {
        if level > 50 {
            Style::default().fg(self.active)
        } else if level > 20 {
            Style::default().fg(self.warning)
        } else {
            Style::default().fg(self.error)
        }
    }
}
