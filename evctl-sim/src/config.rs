//! Controller configuration files
//!
//! ```toml
//! [sampler]
//! settle_cycles = 2
//!
//! [thermal]
//! max_heat = 1023
//! high_threshold = 768
//! low_threshold = 256
//! heat_shift = 4
//! decay_step = 1
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::fs;
use std::path::Path;

use log::info;

use evctl_core::ControllerConfig;

use crate::error::ScenarioError;

/// Parse and validate a configuration document
pub fn parse_config(input: &str) -> Result<ControllerConfig, ScenarioError> {
    let config: ControllerConfig = toml::from_str(input)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a configuration file
pub fn load_config(path: &Path) -> Result<ControllerConfig, ScenarioError> {
    let input = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&input)?;
    info!("Loaded controller configuration from {}", path.display());
    Ok(config)
}
