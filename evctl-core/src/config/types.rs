//! Configuration type definitions
//!
//! Defaults match the fixed constants of the synthesized design.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default accelerator-phase dwell before sampling the brake
pub const DEFAULT_SETTLE_CYCLES: u8 = 2;

/// Default heat ceiling (10-bit accumulator)
pub const DEFAULT_MAX_HEAT: u16 = 1023;

/// Default heat at which overheat is raised
pub const DEFAULT_HIGH_THRESHOLD: u16 = 768;

/// Default heat at or below which overheat clears
pub const DEFAULT_LOW_THRESHOLD: u16 = 256;

/// Default speed-to-heat shift (gain = speed >> 4, i.e. 1..=15 per cycle)
pub const DEFAULT_HEAT_SHIFT: u8 = 4;

/// Default heat lost per idle cycle
pub const DEFAULT_DECAY_STEP: u16 = 1;

/// Largest usable speed-to-heat shift for an 8-bit speed
pub const MAX_HEAT_SHIFT: u8 = 7;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Sampler settle delay must be at least one cycle
    ZeroSettleCycles,
    /// Low threshold must be strictly below the high threshold
    InvertedThresholds,
    /// High threshold exceeds the heat ceiling
    ThresholdAboveMax,
    /// Idle decay must remove heat
    ZeroDecay,
    /// Heat shift would discard the whole speed value
    HeatShiftTooLarge,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::ZeroSettleCycles => "sampler settle_cycles must be at least 1",
            ConfigError::InvertedThresholds => {
                "thermal low_threshold must be below high_threshold"
            }
            ConfigError::ThresholdAboveMax => "thermal high_threshold must not exceed max_heat",
            ConfigError::ZeroDecay => "thermal decay_step must be at least 1",
            ConfigError::HeatShiftTooLarge => "thermal heat_shift must be at most 7",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for ConfigError {}

/// Speed sampler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplerConfig {
    /// Cycles spent latching the accelerator before switching to brake
    pub settle_cycles: u8,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            settle_cycles: DEFAULT_SETTLE_CYCLES,
        }
    }
}

/// Thermal monitor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThermalConfig {
    /// Heat ceiling
    pub max_heat: u16,
    /// Overheat raised when heat reaches this value
    pub high_threshold: u16,
    /// Overheat cleared when heat falls to this value
    pub low_threshold: u16,
    /// Heat gain per cycle is `speed >> heat_shift` (at least 1)
    pub heat_shift: u8,
    /// Heat removed per idle cycle
    pub decay_step: u16,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            max_heat: DEFAULT_MAX_HEAT,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            low_threshold: DEFAULT_LOW_THRESHOLD,
            heat_shift: DEFAULT_HEAT_SHIFT,
            decay_step: DEFAULT_DECAY_STEP,
        }
    }
}

impl ThermalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.low_threshold >= self.high_threshold {
            return Err(ConfigError::InvertedThresholds);
        }
        if self.high_threshold > self.max_heat {
            return Err(ConfigError::ThresholdAboveMax);
        }
        if self.decay_step == 0 {
            return Err(ConfigError::ZeroDecay);
        }
        if self.heat_shift > MAX_HEAT_SHIFT {
            return Err(ConfigError::HeatShiftTooLarge);
        }
        Ok(())
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    pub sampler: SamplerConfig,
    pub thermal: ThermalConfig,
}

impl ControllerConfig {
    /// Check every section, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sampler.settle_cycles == 0 {
            return Err(ConfigError::ZeroSettleCycles);
        }
        self.thermal.validate()
    }
}
