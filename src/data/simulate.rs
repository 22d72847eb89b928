//! Measurement-series simulation.
//!
//! There is no device connectivity in this tool: every reading shown in the
//! UI comes from here. The simulator is stateless - it takes a device
//! snapshot and a noise source, and returns new values for the caller to
//! store. The shaping logic (volume interpolation, silent window for
//! unresponsive devices) is deterministic; only the jitter terms draw from
//! the [`NoiseSource`].

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::device::{Device, DeviceStatus, MeasurementPoint};

/// Fixed sampling interval for generated history, in minutes.
pub const SAMPLE_INTERVAL_MIN: i64 = 5;

/// Maximum points retained by a live series (24 hours at 5-minute resolution).
pub const MAX_SERIES_POINTS: usize = 288;

/// How far back an unresponsive device is modelled as silent, in minutes.
///
/// Carried over from the original dashboard together with the volume pin
/// below. Illustrative heuristics, not a validated clinical model.
const SILENT_WINDOW_MIN: i64 = 120;

/// Fraction of total volume the series is pinned to inside the silent window.
const SILENT_VOLUME_FRACTION: f64 = 0.8;

/// Source of uniform random noise for the simulator.
///
/// Abstracting the RNG lets tests substitute a fixed or seeded source and
/// assert exact values instead of treating everything as bounded noise.
pub trait NoiseSource: Send {
    /// Draw a uniform sample from `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;
}

/// Production noise source backed by a seedable PRNG.
#[derive(Debug)]
pub struct RngNoise {
    rng: StdRng,
}

impl RngNoise {
    /// Create a noise source seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a noise source with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RngNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseSource for RngNoise {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        self.rng.random_range(lo..hi)
    }
}

/// Generate a historical measurement series for a device.
///
/// Steps backward from `now` in fixed 5-minute increments over `hours`
/// hours, producing `hours * 60 / 5 + 1` points in ascending-timestamp
/// order. Flow is the device's current rate plus uniform jitter in
/// [-5, +5] mL/min; volume interpolates linearly from zero up to the
/// device's current total; pressure is uniform around 15 mmHg. Devices in
/// error or offline status are modelled as silent for the most recent two
/// hours: flow baseline forced to zero and volume pinned at 80% of total.
///
/// All output fields are floored at zero. `hours == 0` yields an empty
/// series.
pub fn generate_history(
    device: &Device,
    hours: u32,
    now: DateTime<Utc>,
    noise: &mut dyn NoiseSource,
) -> Vec<MeasurementPoint> {
    let total_min = hours as i64 * 60;
    if total_min == 0 {
        return Vec::new();
    }

    let mut points = Vec::with_capacity((total_min / SAMPLE_INTERVAL_MIN + 1) as usize);

    // Walk offsets from oldest (total_min minutes ago) down to now, so the
    // series comes out in chronological order.
    let mut offset = total_min;
    while offset >= 0 {
        let silent = device.status.is_unresponsive() && offset < SILENT_WINDOW_MIN;

        let base_flow = if silent { 0.0 } else { device.current_flow_rate };
        let base_volume = if silent {
            device.total_volume * SILENT_VOLUME_FRACTION
        } else {
            device.total_volume / total_min as f64 * (total_min - offset) as f64
        };

        let flow_jitter = noise.uniform(-5.0, 5.0);
        let volume_increment =
            ((base_flow + flow_jitter) * SAMPLE_INTERVAL_MIN as f64 / 60.0).max(0.0);

        points.push(MeasurementPoint {
            timestamp: now - Duration::minutes(offset),
            flow_rate: (base_flow + flow_jitter).max(0.0),
            volume: (base_volume + volume_increment).max(0.0),
            pressure: noise.uniform(12.5, 17.5).max(0.0),
        });

        offset -= SAMPLE_INTERVAL_MIN;
    }

    points
}

/// Apply one simulated telemetry tick to a device snapshot.
///
/// Non-active devices are returned unchanged. Active devices get a small
/// flow delta (uniform [-2.5, +2.5], clamped at zero), a volume increment
/// (uniform [0, 1)), and a fresh `last_update`. The input is never
/// mutated; the caller stores the returned snapshot.
pub fn tick_update(device: &Device, now: DateTime<Utc>, noise: &mut dyn NoiseSource) -> Device {
    let mut next = device.clone();
    if device.status != DeviceStatus::Active {
        return next;
    }

    next.current_flow_rate = (next.current_flow_rate + noise.uniform(-2.5, 2.5)).max(0.0);
    next.total_volume += noise.uniform(0.0, 1.0);
    next.last_update = now;
    next
}

/// Append a live measurement point to a series, keeping at most
/// [`MAX_SERIES_POINTS`] entries (oldest dropped first).
///
/// Live points carry the device's updated total volume; flow and pressure
/// are zero placeholders in this path, matching what the detail chart
/// actually plots between full regenerations.
pub fn append_live_point(
    mut series: Vec<MeasurementPoint>,
    device: &Device,
    now: DateTime<Utc>,
) -> Vec<MeasurementPoint> {
    if series.len() >= MAX_SERIES_POINTS {
        let excess = series.len() - MAX_SERIES_POINTS + 1;
        series.drain(..excess);
    }

    series.push(MeasurementPoint {
        timestamp: now,
        flow_rate: 0.0,
        volume: device.total_volume,
        pressure: 0.0,
    });

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Noise source that always returns the midpoint of the range,
    /// i.e. zero jitter around every baseline.
    #[derive(Debug)]
    struct Midpoint;

    impl NoiseSource for Midpoint {
        fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
            (lo + hi) / 2.0
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap()
    }

    fn device(status: DeviceStatus, flow: f64, volume: f64) -> Device {
        Device {
            id: "UM-001".to_string(),
            name: "Uro-Meter ICU-A".to_string(),
            status,
            location: "ICU Ward A - Room 101".to_string(),
            current_flow_rate: flow,
            total_volume: volume,
            battery_level: 92,
            last_update: fixed_now() - Duration::seconds(30),
            alerts: Vec::new(),
        }
    }

    #[test]
    fn test_history_length_and_order() {
        let dev = device(DeviceStatus::Active, 45.2, 1250.0);
        let mut noise = RngNoise::seeded(1);
        let series = generate_history(&dev, 24, fixed_now(), &mut noise);

        assert_eq!(series.len(), 24 * 60 / 5 + 1);
        for pair in series.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
            assert_eq!(
                pair[1].timestamp - pair[0].timestamp,
                Duration::minutes(SAMPLE_INTERVAL_MIN)
            );
        }
        assert_eq!(series[0].timestamp, fixed_now() - Duration::hours(24));
        assert_eq!(series.last().unwrap().timestamp, fixed_now());
    }

    #[test]
    fn test_history_fields_never_negative() {
        // Low flow and volume so jitter would push values below zero
        // without the floor.
        let dev = device(DeviceStatus::Active, 1.0, 2.0);
        let mut noise = RngNoise::seeded(7);
        let series = generate_history(&dev, 24, fixed_now(), &mut noise);

        for p in &series {
            assert!(p.flow_rate >= 0.0);
            assert!(p.volume >= 0.0);
            assert!(p.pressure >= 0.0);
        }
    }

    #[test]
    fn test_offline_device_silent_window() {
        let dev = device(DeviceStatus::Offline, 45.2, 1000.0);
        let mut noise = RngNoise::seeded(3);
        let series = generate_history(&dev, 24, fixed_now(), &mut noise);

        // Offsets 0..120 minutes ago are the last 24 points of the series.
        let silent_points = 120 / SAMPLE_INTERVAL_MIN as usize;
        for p in &series[series.len() - silent_points..] {
            // Baseline is forced to zero, so only jitter remains: [0, 5].
            assert!(p.flow_rate <= 5.0, "flow {} in silent window", p.flow_rate);
        }
        // Outside the window the baseline is intact, so flow is at least
        // 45.2 - 5.
        for p in &series[..series.len() - silent_points] {
            assert!(p.flow_rate > 40.0);
        }
    }

    #[test]
    fn test_offline_device_volume_pinned() {
        let dev = device(DeviceStatus::Error, 45.2, 1000.0);
        let series = generate_history(&dev, 24, fixed_now(), &mut Midpoint);

        // With zero jitter the silent window has no volume increment, so
        // every point in it sits exactly at 80% of total volume.
        let silent_points = 120 / SAMPLE_INTERVAL_MIN as usize;
        for p in &series[series.len() - silent_points..] {
            assert_eq!(p.volume, 800.0);
            assert_eq!(p.flow_rate, 0.0);
        }
    }

    #[test]
    fn test_history_worked_example() {
        // Reference case: active device, 45.2 mL/min, 1250 mL total,
        // 24 hours.
        let dev = device(DeviceStatus::Active, 45.2, 1250.0);
        let series = generate_history(&dev, 24, fixed_now(), &mut Midpoint);

        assert_eq!(series.len(), 289);
        assert_eq!(series[0].timestamp, fixed_now() - Duration::hours(24));

        // With zero jitter every point carries the baseline plus one
        // 5-minute increment at the current flow rate.
        let increment = 45.2 * 5.0 / 60.0;
        assert!((series[0].volume - increment).abs() < 1e-9);
        let last = series.last().unwrap();
        assert!((last.volume - (1250.0 + increment)).abs() < 1e-9);
        assert_eq!(last.flow_rate, 45.2);
        assert_eq!(last.pressure, 15.0);

        // Volumes trend monotonically upward when jitter is removed.
        for pair in series.windows(2) {
            assert!(pair[1].volume >= pair[0].volume);
        }
    }

    #[test]
    fn test_history_zero_hours_is_empty() {
        let dev = device(DeviceStatus::Active, 45.2, 1250.0);
        let mut noise = RngNoise::seeded(1);
        assert!(generate_history(&dev, 0, fixed_now(), &mut noise).is_empty());
    }

    #[test]
    fn test_tick_non_active_unchanged() {
        for status in [
            DeviceStatus::Warning,
            DeviceStatus::Error,
            DeviceStatus::Offline,
        ] {
            let dev = device(status, 28.7, 890.0);
            let mut noise = RngNoise::seeded(11);
            let ticked = tick_update(&dev, fixed_now(), &mut noise);
            assert_eq!(ticked, dev);
        }
    }

    #[test]
    fn test_tick_active_properties() {
        let mut dev = device(DeviceStatus::Active, 2.0, 320.0);
        let mut noise = RngNoise::seeded(42);

        for _ in 0..200 {
            let next = tick_update(&dev, fixed_now(), &mut noise);
            assert!(next.current_flow_rate >= 0.0);
            assert!(next.total_volume >= dev.total_volume);
            assert_eq!(next.last_update, fixed_now());
            dev = next;
        }
    }

    #[test]
    fn test_tick_midpoint_deltas() {
        let dev = device(DeviceStatus::Active, 45.2, 1250.0);
        let ticked = tick_update(&dev, fixed_now(), &mut Midpoint);

        // Midpoint noise: flow delta 0, volume delta 0.5.
        assert_eq!(ticked.current_flow_rate, 45.2);
        assert_eq!(ticked.total_volume, 1250.5);
    }

    #[test]
    fn test_append_live_point() {
        let dev = device(DeviceStatus::Active, 45.2, 1250.0);
        let series = append_live_point(Vec::new(), &dev, fixed_now());

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].volume, 1250.0);
        assert_eq!(series[0].flow_rate, 0.0);
        assert_eq!(series[0].pressure, 0.0);
    }

    #[test]
    fn test_append_live_point_truncates() {
        let dev = device(DeviceStatus::Active, 45.2, 1250.0);

        // A freshly generated 24h history has 289 points, one over the
        // retention limit.
        let mut series = generate_history(&dev, 24, fixed_now(), &mut Midpoint);
        let second_ts = series[1].timestamp;
        let third_ts = series[2].timestamp;
        assert_eq!(series.len(), MAX_SERIES_POINTS + 1);

        series = append_live_point(series, &dev, fixed_now() + Duration::seconds(5));
        assert_eq!(series.len(), MAX_SERIES_POINTS);
        // The two oldest points were dropped to make room.
        assert_eq!(series[0].timestamp, third_ts);
        assert_ne!(series[0].timestamp, second_ts);

        // Further appends stay bounded and keep dropping oldest-first.
        for i in 1..10 {
            let now = fixed_now() + Duration::seconds(5 * (i + 1));
            series = append_live_point(series, &dev, now);
            assert_eq!(series.len(), MAX_SERIES_POINTS);
            assert_eq!(series.last().unwrap().timestamp, now);
        }
        for pair in series.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }
}
