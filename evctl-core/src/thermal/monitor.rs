//! Thermal monitor implementation
//!
//! Heat rises with motor speed and decays while the motor is idle. The
//! overheat flag uses two thresholds: it sets at `high_threshold` and only
//! clears once heat falls to `low_threshold`. Overheat is reported, not
//! acted on; the controller keeps evaluating.

use crate::config::ThermalConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Thermal condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ThermalState {
    #[default]
    Normal,
    Overheat,
}

/// Heat accumulator with hysteresis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThermalMonitor {
    /// Accumulated heat, 0..=max_heat
    heat: u16,
    state: ThermalState,
}

impl ThermalMonitor {
    /// Cold, normal
    pub const fn new() -> Self {
        Self {
            heat: 0,
            state: ThermalState::Normal,
        }
    }

    /// Heat added per cycle at a given speed
    ///
    /// Proportional to speed, and never zero while the motor turns.
    pub fn heat_gain(speed: u8, config: &ThermalConfig) -> u16 {
        let shift = config.heat_shift.min(7);
        u16::from(speed >> shift).max(1)
    }

    /// Advance one cycle at the given motor speed
    pub fn update(&mut self, speed: u8, config: &ThermalConfig) -> ThermalState {
        self.heat = if speed > 0 {
            self.heat
                .saturating_add(Self::heat_gain(speed, config))
                .min(config.max_heat)
        } else {
            self.heat.saturating_sub(config.decay_step)
        };

        self.state = match self.state {
            ThermalState::Normal if self.heat >= config.high_threshold => ThermalState::Overheat,
            ThermalState::Overheat if self.heat <= config.low_threshold => ThermalState::Normal,
            // Inside the hysteresis band: hold
            state => state,
        };

        self.state
    }

    pub fn heat(&self) -> u16 {
        self.heat
    }

    pub fn state(&self) -> ThermalState {
        self.state
    }

    pub fn is_overheated(&self) -> bool {
        self.state == ThermalState::Overheat
    }
}
