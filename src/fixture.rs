//! Fixture fleet seeding.
//!
//! The fleet is seeded once at startup, either from a JSON file or from
//! the built-in dataset below. Snapshots live only in memory and are never
//! persisted.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};

use crate::data::{Alert, AlertSeverity, Device, DeviceStatus};

/// Load a device fleet from a JSON fixture file.
///
/// The file holds an array of device snapshots in the same camelCase
/// format produced by [`crate::app::App::export_state`].
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Device>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading fixture file {}", path.display()))?;
    let devices: Vec<Device> = serde_json::from_str(&content)
        .with_context(|| format!("parsing fixture file {}", path.display()))?;
    Ok(devices)
}

/// The built-in six-device ward fleet.
///
/// Timestamps are expressed relative to `now` so the dashboard starts with
/// plausible "last seen" ages.
pub fn default_fleet(now: DateTime<Utc>) -> Vec<Device> {
    vec![
        Device {
            id: "UM-001".to_string(),
            name: "Uro-Meter ICU-A".to_string(),
            status: DeviceStatus::Active,
            location: "ICU Ward A - Room 101".to_string(),
            current_flow_rate: 45.2,
            total_volume: 1250.0,
            battery_level: 92,
            last_update: now - Duration::seconds(30),
            alerts: Vec::new(),
        },
        Device {
            id: "UM-002".to_string(),
            name: "Uro-Meter ICU-B".to_string(),
            status: DeviceStatus::Warning,
            location: "ICU Ward B - Room 205".to_string(),
            current_flow_rate: 28.7,
            total_volume: 890.0,
            battery_level: 15,
            last_update: now - Duration::minutes(2),
            alerts: vec![Alert {
                id: "alert-1".to_string(),
                severity: AlertSeverity::Warning,
                message: "Low battery level detected".to_string(),
                timestamp: now - Duration::minutes(1),
            }],
        },
        Device {
            id: "UM-003".to_string(),
            name: "Uro-Meter Surgical".to_string(),
            status: DeviceStatus::Active,
            location: "Surgical Ward - OR 3".to_string(),
            current_flow_rate: 62.1,
            total_volume: 2100.0,
            battery_level: 78,
            last_update: now - Duration::seconds(15),
            alerts: Vec::new(),
        },
        Device {
            id: "UM-004".to_string(),
            name: "Uro-Meter Emergency".to_string(),
            status: DeviceStatus::Error,
            location: "Emergency Room - Bed 12".to_string(),
            current_flow_rate: 0.0,
            total_volume: 450.0,
            battery_level: 0,
            last_update: now - Duration::minutes(5),
            alerts: vec![
                Alert {
                    id: "alert-2".to_string(),
                    severity: AlertSeverity::Error,
                    message: "Device disconnected - check connections".to_string(),
                    timestamp: now - Duration::minutes(3),
                },
                Alert {
                    id: "alert-3".to_string(),
                    severity: AlertSeverity::Error,
                    message: "Battery depleted".to_string(),
                    timestamp: now - Duration::minutes(5),
                },
            ],
        },
        Device {
            id: "UM-005".to_string(),
            name: "Uro-Meter Pediatric".to_string(),
            status: DeviceStatus::Active,
            location: "Pediatric Ward - Room 308".to_string(),
            current_flow_rate: 18.3,
            total_volume: 320.0,
            battery_level: 88,
            last_update: now - Duration::seconds(45),
            alerts: Vec::new(),
        },
        Device {
            id: "UM-006".to_string(),
            name: "Uro-Meter Recovery".to_string(),
            status: DeviceStatus::Offline,
            location: "Recovery Ward - Room 115".to_string(),
            current_flow_rate: 0.0,
            total_volume: 0.0,
            battery_level: 45,
            last_update: now - Duration::minutes(10),
            alerts: vec![Alert {
                id: "alert-4".to_string(),
                severity: AlertSeverity::Warning,
                message: "Device offline for over 5 minutes".to_string(),
                timestamp: now - Duration::minutes(5),
            }],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_fleet_shape() {
        let devices = default_fleet(Utc::now());
        assert_eq!(devices.len(), 6);
        assert_eq!(devices[0].id, "UM-001");
        assert_eq!(devices[3].status, DeviceStatus::Error);
        assert_eq!(devices[5].status, DeviceStatus::Offline);

        // The emergency device carries two error alerts.
        assert_eq!(devices[3].alerts.len(), 2);
    }

    #[test]
    fn test_default_fleet_round_trips_through_json() {
        let devices = default_fleet(Utc::now());
        let json = serde_json::to_string(&devices).unwrap();
        let parsed: Vec<Device> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, devices);
    }

    #[test]
    fn test_load_fixture_file() {
        let devices = default_fleet(Utc::now());
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&devices).unwrap()).unwrap();

        let loaded = load(file.path()).unwrap();
        assert_eq!(loaded, devices);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("/nonexistent/fixture.json").unwrap_err();
        assert!(err.to_string().contains("reading fixture file"));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let err = load(file.path()).unwrap_err();
        assert!(err.to_string().contains("parsing fixture file"));
    }
}
