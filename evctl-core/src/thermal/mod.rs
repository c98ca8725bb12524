//! Thermal monitoring
//!
//! Tracks motor heat and reports an overheat condition.

pub mod monitor;

pub use monitor::{ThermalMonitor, ThermalState};
