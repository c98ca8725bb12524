//! PWM modulator
//!
//! A free-running 4-bit counter compared against the duty derived from
//! motor speed. The output is high while `counter < speed >> 4`, giving
//! 0/16 through 15/16 duty. Full-scale speed therefore tops out at 15/16;
//! there is no 16/16 level.

use crate::sampler::SPEED_SHIFT;

/// Counter period in cycles
pub const PWM_PERIOD: u8 = 16;

/// Duty (high cycles per period) for a motor speed
pub fn duty(speed: u8) -> u8 {
    speed >> SPEED_SHIFT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmModulator {
    counter: u8,
}

impl PwmModulator {
    pub const fn new() -> Self {
        Self { counter: 0 }
    }

    /// Output level for the current counter value
    pub fn level(&self, speed: u8) -> bool {
        self.counter < duty(speed)
    }

    /// Sample the level, then advance the counter
    pub fn tick(&mut self, speed: u8) -> bool {
        let level = self.level(speed);
        self.counter = (self.counter + 1) % PWM_PERIOD;
        level
    }

    pub fn counter(&self) -> u8 {
        self.counter
    }
}
