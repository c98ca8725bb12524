use std::path::PathBuf;

use evctl_core::ConfigError;

/// Errors raised while loading or running a scenario
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid controller configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("step `{step}`: expected uo_out & {mask:#04x} == {expected:#04x}, got {actual:#04x}")]
    OutputMismatch {
        step: String,
        mask: u8,
        expected: u8,
        actual: u8,
    },

    #[error("step `{step}`: expected uio_out == {expected}, got {actual}")]
    BusMismatch {
        step: String,
        expected: u8,
        actual: u8,
    },

    #[error("step `{step}`: PWM did not toggle over {cycles} cycles ({high} high)")]
    PwmStuck { step: String, cycles: u32, high: u32 },
}
