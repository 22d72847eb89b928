//! Data models and simulation for the device fleet.
//!
//! Everything the UI renders comes out of this module: device snapshots
//! seeded from the fixture, and measurement series produced by the
//! simulator.
//!
//! ## Submodules
//!
//! - [`device`]: Core types ([`Device`], [`Alert`], [`MeasurementPoint`])
//! - [`fleet`]: Fleet state container with derived statistics
//! - [`simulate`]: The measurement-series simulator and noise abstraction
//!
//! ## Data flow
//!
//! ```text
//! fixture (JSON / built-in)
//!        │
//!        ▼
//!      Fleet ──▶ FleetStats (header / fleet view)
//!        │
//!        ├──▶ simulate::tick_update (periodic timers)
//!        │
//!        └──▶ simulate::generate_history ──▶ detail chart
//!                      │
//!                      └──▶ simulate::append_live_point (live series)
//! ```

pub mod device;
pub mod fleet;
pub mod simulate;

pub use device::{Alert, AlertSeverity, Device, DeviceStatus, MeasurementPoint};
pub use fleet::{Fleet, FleetStats};
pub use simulate::{
    append_live_point, generate_history, tick_update, NoiseSource, RngNoise, MAX_SERIES_POINTS,
    SAMPLE_INTERVAL_MIN,
};
