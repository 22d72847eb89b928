//! Fleet state and derived statistics.
//!
//! The [`Fleet`] owns the only copy of device state. Simulator functions
//! are pure; every tick goes through here so updated snapshots are stored
//! explicitly rather than mutated behind a shared global.

use std::time::Instant;

use chrono::Utc;

use super::device::{Alert, Device, DeviceStatus, MeasurementPoint};
use super::simulate::{self, NoiseSource};

/// The collection of monitored devices.
#[derive(Debug, Clone)]
pub struct Fleet {
    pub devices: Vec<Device>,
    /// When the fleet was last ticked (for the "updated Ns ago" display).
    pub last_updated: Instant,
}

impl Fleet {
    /// Create a fleet from seeded device snapshots.
    pub fn new(devices: Vec<Device>) -> Self {
        Self {
            devices,
            last_updated: Instant::now(),
        }
    }

    /// Look up a device by id. Absence is a normal outcome, not an error.
    pub fn get(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// Apply one simulated telemetry tick to every device.
    ///
    /// Non-active devices pass through unchanged (the simulator's
    /// contract), so this is safe to run on the whole fleet.
    pub fn tick_all(&mut self, noise: &mut dyn NoiseSource) {
        let now = Utc::now();
        for device in &mut self.devices {
            *device = simulate::tick_update(device, now, noise);
        }
        self.last_updated = Instant::now();
    }

    /// Tick a single device and return its updated snapshot.
    ///
    /// Returns `None` for an unknown id.
    pub fn tick_device(&mut self, id: &str, noise: &mut dyn NoiseSource) -> Option<Device> {
        let index = self.devices.iter().position(|d| d.id == id)?;
        let updated = simulate::tick_update(&self.devices[index], Utc::now(), noise);
        self.devices[index] = updated.clone();
        self.last_updated = Instant::now();
        Some(updated)
    }

    /// Generate a measurement history for a device by id.
    ///
    /// Returns an empty series for an unknown id.
    pub fn history(
        &self,
        id: &str,
        hours: u32,
        noise: &mut dyn NoiseSource,
    ) -> Vec<MeasurementPoint> {
        self.get(id)
            .map(|device| simulate::generate_history(device, hours, Utc::now(), noise))
            .unwrap_or_default()
    }

    /// All alerts across the fleet, newest first.
    pub fn all_alerts(&self) -> Vec<(&Device, &Alert)> {
        let mut alerts: Vec<(&Device, &Alert)> = self
            .devices
            .iter()
            .flat_map(|d| d.alerts.iter().map(move |a| (d, a)))
            .collect();
        alerts.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp));
        alerts
    }

    /// Aggregate status counts for the fleet.
    pub fn stats(&self) -> FleetStats {
        let mut stats = FleetStats {
            total: self.devices.len(),
            ..FleetStats::default()
        };
        for device in &self.devices {
            match device.status {
                DeviceStatus::Active => stats.active += 1,
                DeviceStatus::Warning => stats.warning += 1,
                DeviceStatus::Error => stats.error += 1,
                DeviceStatus::Offline => stats.offline += 1,
            }
        }
        stats
    }
}

/// Device counts by status (the dashboard statistics row).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FleetStats {
    pub total: usize,
    pub active: usize,
    pub warning: usize,
    pub error: usize,
    pub offline: usize,
}

impl FleetStats {
    /// The most severe status present in the fleet, for the header
    /// indicator. An empty or all-active fleet reads as active.
    pub fn worst(&self) -> DeviceStatus {
        if self.error > 0 {
            DeviceStatus::Error
        } else if self.offline > 0 {
            DeviceStatus::Offline
        } else if self.warning > 0 {
            DeviceStatus::Warning
        } else {
            DeviceStatus::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::device::AlertSeverity;
    use crate::data::simulate::RngNoise;
    use chrono::Duration;

    fn sample_fleet() -> Fleet {
        let now = Utc::now();
        let make = |id: &str, status, flow: f64, volume: f64| Device {
            id: id.to_string(),
            name: format!("Uro-Meter {}", id),
            status,
            location: "Test Ward".to_string(),
            current_flow_rate: flow,
            total_volume: volume,
            battery_level: 80,
            last_update: now,
            alerts: Vec::new(),
        };

        let mut warning = make("UM-002", DeviceStatus::Warning, 28.7, 890.0);
        warning.alerts.push(Alert {
            id: "alert-1".to_string(),
            severity: AlertSeverity::Warning,
            message: "Low battery level detected".to_string(),
            timestamp: now - Duration::minutes(1),
        });
        let mut error = make("UM-004", DeviceStatus::Error, 0.0, 450.0);
        error.alerts.push(Alert {
            id: "alert-2".to_string(),
            severity: AlertSeverity::Error,
            message: "Device disconnected - check connections".to_string(),
            timestamp: now - Duration::minutes(3),
        });

        Fleet::new(vec![
            make("UM-001", DeviceStatus::Active, 45.2, 1250.0),
            warning,
            error,
        ])
    }

    #[test]
    fn test_get_by_id() {
        let fleet = sample_fleet();
        assert!(fleet.get("UM-001").is_some());
        assert!(fleet.get("UM-999").is_none());
    }

    #[test]
    fn test_stats_counts() {
        let stats = sample_fleet().stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.warning, 1);
        assert_eq!(stats.error, 1);
        assert_eq!(stats.offline, 0);
        assert_eq!(stats.worst(), DeviceStatus::Error);
    }

    #[test]
    fn test_tick_all_only_touches_active() {
        let mut fleet = sample_fleet();
        let before_warning = fleet.get("UM-002").unwrap().clone();
        let before_active_volume = fleet.get("UM-001").unwrap().total_volume;

        let mut noise = RngNoise::seeded(5);
        fleet.tick_all(&mut noise);

        assert_eq!(*fleet.get("UM-002").unwrap(), before_warning);
        assert!(fleet.get("UM-001").unwrap().total_volume >= before_active_volume);
    }

    #[test]
    fn test_tick_device_unknown_id() {
        let mut fleet = sample_fleet();
        let mut noise = RngNoise::seeded(5);
        assert!(fleet.tick_device("UM-999", &mut noise).is_none());
    }

    #[test]
    fn test_tick_device_stores_result() {
        let mut fleet = sample_fleet();
        let mut noise = RngNoise::seeded(5);
        let updated = fleet.tick_device("UM-001", &mut noise).unwrap();
        assert_eq!(*fleet.get("UM-001").unwrap(), updated);
    }

    #[test]
    fn test_history_unknown_device_is_empty() {
        let fleet = sample_fleet();
        let mut noise = RngNoise::seeded(5);
        assert!(fleet.history("UM-999", 24, &mut noise).is_empty());
        assert_eq!(fleet.history("UM-001", 24, &mut noise).len(), 289);
    }

    #[test]
    fn test_all_alerts_newest_first() {
        let fleet = sample_fleet();
        let alerts = fleet.all_alerts();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].1.id, "alert-1");
        assert_eq!(alerts[1].1.id, "alert-2");
        assert!(alerts[0].1.timestamp >= alerts[1].1.timestamp);
    }
}
