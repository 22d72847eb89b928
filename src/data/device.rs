//! Core device and measurement types.
//!
//! These types match the serialization format of the Uro-Meter fixture
//! dataset (camelCase JSON). They are the common currency between the
//! fixture loader, the simulator, and the UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reported status of a monitored device.
///
/// Ordered from least to most severe so fleet views can sort
/// attention-needing devices first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    /// Measuring normally.
    Active,
    /// Measuring, but with a condition that needs attention (e.g. low battery).
    Warning,
    /// A fault was reported; readings are not trustworthy.
    Error,
    /// No contact with the device.
    Offline,
}

impl DeviceStatus {
    /// Returns the display label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "Active",
            DeviceStatus::Warning => "Warning",
            DeviceStatus::Error => "Error",
            DeviceStatus::Offline => "Offline",
        }
    }

    /// Returns a short symbol for table cells.
    pub fn symbol(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "OK",
            DeviceStatus::Warning => "WARN",
            DeviceStatus::Error => "ERR",
            DeviceStatus::Offline => "OFF",
        }
    }

    /// True when the device is not delivering readings at all
    /// (faulted or out of contact).
    pub fn is_unresponsive(&self) -> bool {
        matches!(self, DeviceStatus::Error | DeviceStatus::Offline)
    }
}

/// Severity of an alert raised against a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Error,
}

impl AlertSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Error => "error",
        }
    }
}

/// A single alert attached to a device. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub severity: AlertSeverity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Point-in-time snapshot of a monitored Uro-Meter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    pub status: DeviceStatus,
    pub location: String,
    /// Current flow rate in mL/min.
    pub current_flow_rate: f64,
    /// Cumulative measured volume in mL. Non-decreasing while active.
    pub total_volume: f64,
    /// Battery charge in percent (0-100).
    pub battery_level: u8,
    pub last_update: DateTime<Utc>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

impl Device {
    /// Case-insensitive match against name, id, and location.
    ///
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.id.to_lowercase().contains(&query)
            || self.location.to_lowercase().contains(&query)
    }
}

/// One timestamped measurement sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementPoint {
    pub timestamp: DateTime<Utc>,
    /// Flow rate in mL/min, never negative.
    pub flow_rate: f64,
    /// Cumulative volume in mL, never negative.
    pub volume: f64,
    /// Pressure in mmHg, never negative.
    pub pressure: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_device() {
        let json = r#"{
            "id": "UM-001",
            "name": "Uro-Meter ICU-A",
            "status": "active",
            "lastUpdate": "2026-08-30T10:00:00Z",
            "location": "ICU Ward A - Room 101",
            "currentFlowRate": 45.2,
            "totalVolume": 1250.0,
            "batteryLevel": 92,
            "alerts": [
                {
                    "id": "alert-1",
                    "type": "warning",
                    "message": "Low battery level detected",
                    "timestamp": "2026-08-30T09:59:00Z"
                }
            ]
        }"#;

        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.id, "UM-001");
        assert_eq!(device.status, DeviceStatus::Active);
        assert_eq!(device.current_flow_rate, 45.2);
        assert_eq!(device.battery_level, 92);
        assert_eq!(device.alerts.len(), 1);
        assert_eq!(device.alerts[0].severity, AlertSeverity::Warning);
    }

    #[test]
    fn test_deserialize_device_without_alerts() {
        let json = r#"{
            "id": "UM-002",
            "name": "Uro-Meter ICU-B",
            "status": "offline",
            "lastUpdate": "2026-08-30T10:00:00Z",
            "location": "ICU Ward B",
            "currentFlowRate": 0.0,
            "totalVolume": 0.0,
            "batteryLevel": 45
        }"#;

        let device: Device = serde_json::from_str(json).unwrap();
        assert!(device.alerts.is_empty());
        assert!(device.status.is_unresponsive());
    }

    #[test]
    fn test_matches_filter() {
        let device = Device {
            id: "UM-003".to_string(),
            name: "Uro-Meter Surgical".to_string(),
            status: DeviceStatus::Active,
            location: "Surgical Ward - OR 3".to_string(),
            current_flow_rate: 62.1,
            total_volume: 2100.0,
            battery_level: 78,
            last_update: Utc::now(),
            alerts: Vec::new(),
        };

        assert!(device.matches(""));
        assert!(device.matches("surgical"));
        assert!(device.matches("um-003"));
        assert!(device.matches("or 3"));
        assert!(!device.matches("pediatric"));
    }

    #[test]
    fn test_status_ordering() {
        assert!(DeviceStatus::Offline > DeviceStatus::Error);
        assert!(DeviceStatus::Error > DeviceStatus::Warning);
        assert!(DeviceStatus::Warning > DeviceStatus::Active);
    }
}
