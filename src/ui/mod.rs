//! Terminal rendering using ratatui.
//!
//! One file per view plus shared chrome:
//!
//! - [`common`]: header bar, tab bar, status bar, help overlay
//! - [`fleet`]: sortable device table with fleet statistics
//! - [`alerts`]: fleet-wide alert list
//! - [`detail`]: per-device overlay with measurement chart
//! - [`theme`]: light/dark color schemes

pub mod alerts;
pub mod common;
pub mod detail;
pub mod fleet;
pub mod theme;

pub use fleet::SortColumn;
pub use theme::Theme;
