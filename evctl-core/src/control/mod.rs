//! Power and accessory arbitration
//!
//! Combines the redundant PLC/HMI command sources.

pub mod arbiter;

pub use arbiter::{Accessory, AccessoryBank, PowerArbiter};
