//! Binary persistence
//!
//! Configuration and status snapshots are stored as postcard binary in
//! fixed-capacity buffers.

use heapless::Vec;

use crate::config::{ConfigError, ControllerConfig};
use crate::controller::StatusReport;

/// Maximum serialized configuration size
pub const MAX_CONFIG_SIZE: usize = 32;

/// Maximum serialized status report size
pub const MAX_STATUS_SIZE: usize = 48;

/// Persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// Value did not fit the buffer
    BufferTooSmall,
    /// Bytes are not a valid encoding
    Deserialize,
    /// Decoded configuration failed validation
    Invalid(ConfigError),
}

impl core::fmt::Display for PersistError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PersistError::BufferTooSmall => f.write_str("buffer too small"),
            PersistError::Deserialize => f.write_str("malformed binary data"),
            PersistError::Invalid(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl core::error::Error for PersistError {}

impl From<ConfigError> for PersistError {
    fn from(e: ConfigError) -> Self {
        PersistError::Invalid(e)
    }
}

fn encode<T: serde::Serialize, const N: usize>(value: &T) -> Result<Vec<u8, N>, PersistError> {
    let mut buffer = [0u8; N];
    let used = postcard::to_slice(value, &mut buffer).map_err(|_| PersistError::BufferTooSmall)?;
    let mut vec = Vec::new();
    vec.extend_from_slice(used)
        .map_err(|_| PersistError::BufferTooSmall)?;
    Ok(vec)
}

/// Serialize a configuration
pub fn encode_config(config: &ControllerConfig) -> Result<Vec<u8, MAX_CONFIG_SIZE>, PersistError> {
    encode(config)
}

/// Deserialize and validate a configuration
pub fn decode_config(bytes: &[u8]) -> Result<ControllerConfig, PersistError> {
    let config: ControllerConfig =
        postcard::from_bytes(bytes).map_err(|_| PersistError::Deserialize)?;
    config.validate()?;
    Ok(config)
}

/// Serialize a status snapshot
pub fn encode_status(report: &StatusReport) -> Result<Vec<u8, MAX_STATUS_SIZE>, PersistError> {
    encode(report)
}

/// Deserialize a status snapshot
pub fn decode_status(bytes: &[u8]) -> Result<StatusReport, PersistError> {
    postcard::from_bytes(bytes).map_err(|_| PersistError::Deserialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Controller, Inputs};

    #[test]
    fn test_config_survives_storage() {
        let mut config = ControllerConfig::default();
        config.thermal.high_threshold = 900;
        config.sampler.settle_cycles = 3;
        let bytes = encode_config(&config).unwrap();
        assert_eq!(decode_config(&bytes), Ok(config));
    }

    #[test]
    fn test_invalid_stored_config_rejected() {
        let mut config = ControllerConfig::default();
        config.thermal.decay_step = 0;
        let bytes = encode_config(&config).unwrap();
        assert_eq!(
            decode_config(&bytes),
            Err(PersistError::Invalid(ConfigError::ZeroDecay))
        );
    }

    #[test]
    fn test_truncated_config() {
        let bytes = encode_config(&ControllerConfig::default()).unwrap();
        assert_eq!(
            decode_config(&bytes[..bytes.len() - 1]),
            Err(PersistError::Deserialize)
        );
    }

    #[test]
    fn test_status_snapshot() {
        let mut ctrl = Controller::default();
        ctrl.tick(&Inputs::running(0b0000_1000, 0));
        let report = ctrl.status();
        let bytes = encode_status(&report).unwrap();
        assert_eq!(decode_status(&bytes), Ok(report));
    }
}
