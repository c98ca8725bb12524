//! Power arbiter and accessory controller
//!
//! Both follow the same rule: a function is on when exactly one of the PLC
//! and HMI requests is asserted. Registers latch only while their own
//! operation is selected and hold otherwise.

use crate::bus::{RequestPair, SourceMode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Power state latched from the power-control operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerArbiter {
    on: bool,
    mode: SourceMode,
}

impl PowerArbiter {
    /// Powered off, PLC mode
    pub const fn new() -> Self {
        Self {
            on: false,
            mode: SourceMode::Plc,
        }
    }

    /// Latch a power request
    ///
    /// The mode switch is recorded but does not alter arbitration.
    pub fn update(&mut self, request: RequestPair, mode: SourceMode) {
        self.on = request.arbitrate();
        self.mode = mode;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }
}

/// Accessory channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Accessory {
    Headlight,
    Horn,
    Indicator,
}

/// Latched accessory requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccessoryBank {
    headlight: bool,
    horn: bool,
    indicator: bool,
}

impl AccessoryBank {
    /// All accessories off
    pub const fn new() -> Self {
        Self {
            headlight: false,
            horn: false,
            indicator: false,
        }
    }

    fn slot(&mut self, accessory: Accessory) -> &mut bool {
        match accessory {
            Accessory::Headlight => &mut self.headlight,
            Accessory::Horn => &mut self.horn,
            Accessory::Indicator => &mut self.indicator,
        }
    }

    /// Latch the arbitrated request for one accessory
    pub fn update(&mut self, accessory: Accessory, request: RequestPair) {
        *self.slot(accessory) = request.arbitrate();
    }

    /// Arbitrated request, regardless of power
    pub fn is_requested(&self, accessory: Accessory) -> bool {
        match accessory {
            Accessory::Headlight => self.headlight,
            Accessory::Horn => self.horn,
            Accessory::Indicator => self.indicator,
        }
    }

    /// Whether the accessory shows as on; never while unpowered
    pub fn is_on(&self, accessory: Accessory, powered: bool) -> bool {
        powered && self.is_requested(accessory)
    }
}
