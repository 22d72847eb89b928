// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # urowatch
//!
//! A terminal dashboard for monitoring Uro-Meter flow-measurement devices.
//!
//! There is no real device connectivity: a fixture dataset seeds an
//! in-memory fleet and a deterministic-shaped simulator produces the
//! historical series and live updates the UI renders. Useful for ward
//! display demos, UI development, and testing downstream consumers of
//! the measurement format.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Application                         │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐   ┌────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │──▶│Terminal│ │
//! │  │ (state) │    │(simulate)│    │(render) │   │        │ │
//! │  └────┬────┘    └──────────┘    └─────────┘   └────────┘ │
//! │       │                                                  │
//! │       ▼                                                  │
//! │  ┌─────────┐                                             │
//! │  │ fixture │◀── built-in fleet | JSON file               │
//! │  │ (seed)  │                                             │
//! │  └─────────┘                                             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and the two
//!   simulation tick paths (coarse fleet tick, fine detail tick)
//! - **[`fixture`]**: Seed dataset - six built-in ward devices, or any
//!   JSON fixture file in the same format
//! - **[`data`]**: Device snapshots, fleet statistics, and the
//!   measurement-series simulator with its injectable [`NoiseSource`]
//! - **[`ui`]**: Terminal rendering using ratatui - fleet table, alert
//!   list, detail overlay with charts
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Monitor the built-in demo fleet
//! urowatch
//!
//! # Monitor a custom fixture with a reproducible noise seed
//! urowatch --fixture ward.json --seed 42
//! ```
//!
//! ### As a library
//!
//! ```
//! use chrono::Utc;
//! use urowatch::data::{generate_history, RngNoise};
//! use urowatch::fixture;
//!
//! let fleet = fixture::default_fleet(Utc::now());
//! let mut noise = RngNoise::seeded(42);
//! let series = generate_history(&fleet[0], 24, Utc::now(), &mut noise);
//! assert_eq!(series.len(), 289);
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod fixture;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use data::{
    Alert, AlertSeverity, Device, DeviceStatus, Fleet, FleetStats, MeasurementPoint, NoiseSource,
    RngNoise,
};
