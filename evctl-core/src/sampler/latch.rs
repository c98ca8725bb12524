//! Accelerator/brake latches and motor speed
//!
//! Motor speed is `(accel - brake) << 4`, saturating at zero when the
//! brake reading is at least the accelerator reading. It is recomputed
//! whenever either latch is written and held otherwise.

use crate::bus::decode::NIBBLE_MASK;

use super::phase::SamplePhase;

/// Shift from pedal difference to motor speed
pub const SPEED_SHIFT: u8 = 4;

/// Highest reachable motor speed (15 << 4)
pub const MAX_MOTOR_SPEED: u8 = NIBBLE_MASK << SPEED_SHIFT;

/// Motor speed for a pair of pedal readings
///
/// Readings are truncated to 4 bits. Brake dominance yields zero.
pub fn motor_speed(accel: u8, brake: u8) -> u8 {
    let accel = accel & NIBBLE_MASK;
    let brake = brake & NIBBLE_MASK;
    accel.saturating_sub(brake) << SPEED_SHIFT
}

/// Two-slot pedal latch driven by [`SamplePhase`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedSampler {
    phase: SamplePhase,
    accel: u8,
    brake: u8,
    speed: u8,
}

impl SpeedSampler {
    /// Empty latches, armed for an accelerator reading
    pub const fn new() -> Self {
        Self {
            phase: SamplePhase::armed(),
            accel: 0,
            brake: 0,
            speed: 0,
        }
    }

    /// Advance one cycle
    ///
    /// `pedal` is `Some(nibble)` while motor-speed mode is selected and
    /// `None` otherwise. Latches and speed persist across deselection.
    pub fn sample(&mut self, pedal: Option<u8>, settle_cycles: u8) {
        if let Some(nibble) = pedal {
            let nibble = nibble & NIBBLE_MASK;
            match self.phase {
                SamplePhase::Accelerator { .. } => self.accel = nibble,
                SamplePhase::Brake => self.brake = nibble,
            }
            self.speed = motor_speed(self.accel, self.brake);
        }
        self.phase = self.phase.transition(pedal.is_some(), settle_cycles);
    }

    /// Drop all readings and re-arm
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn phase(&self) -> SamplePhase {
        self.phase
    }

    pub fn accel(&self) -> u8 {
        self.accel
    }

    pub fn brake(&self) -> u8 {
        self.brake
    }

    /// Last computed motor speed (multiple of 16, at most 240)
    pub fn speed(&self) -> u8 {
        self.speed
    }
}
