//! Host-side testbench for the EV controller core
//!
//! Drives [`evctl_core`] at the pin level, one clock edge at a time, the
//! way a logic simulator drives the synthesized design:
//!
//! - [`Testbench`] holds the input pins and samples registered outputs
//! - [`scenario`] runs scripted stimulus with expectations from TOML
//! - [`config`] loads controller tunables from TOML

pub mod config;
pub mod error;
pub mod scenario;
pub mod testbench;

pub use error::ScenarioError;
pub use scenario::{Scenario, ScenarioReport};
pub use testbench::Testbench;
