//! Board-agnostic core logic for the EV auxiliary motor controller
//!
//! This crate contains the complete per-cycle behavior of the controller
//! and nothing that depends on a specific clock source or pin mapping:
//!
//! - Bus decoding into operation-specific requests, and output encoding
//! - Power and accessory arbitration between the PLC and HMI sources
//! - Two-phase accelerator/brake sampling and motor speed arithmetic
//! - PWM duty modulation
//! - Thermal load tracking with hysteresis
//! - The synchronous step function tying them together, with reset
//! - Configuration type definitions
//!
//! A harness drives the core by calling [`controller::step`] (or
//! [`Controller::tick`]) once per clock edge.

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod config;
pub mod control;
pub mod controller;
#[cfg(feature = "serde")]
pub mod persist;
pub mod pwm;
pub mod sampler;
pub mod thermal;

pub use bus::{Operation, Outputs, Request};
pub use config::{ConfigError, ControllerConfig};
pub use controller::{step, Controller, CoreState, Inputs, StatusReport};
