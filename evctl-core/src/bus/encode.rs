//! Output encoder
//!
//! Packs per-subsystem status bits into the primary output word:
//!
//! ```text
//! │ 7          │ 6       │ 5        │ 4   │ 3         │ 2    │ 1         │ 0     │
//! │ temp_fault │ enabled │ overheat │ pwm │ indicator │ horn │ headlight │ power │
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Primary output word bit positions
pub const OUT_POWER: u8 = 0;
pub const OUT_HEADLIGHT: u8 = 1;
pub const OUT_HORN: u8 = 2;
pub const OUT_INDICATOR: u8 = 3;
pub const OUT_PWM: u8 = 4;
pub const OUT_OVERHEAT: u8 = 5;
pub const OUT_SYSTEM_ENABLED: u8 = 6;
pub const OUT_TEMPERATURE_FAULT: u8 = 7;

/// Output enable value while the controller drives the aux bus
pub const BUS_DRIVEN: u8 = 0xFF;

/// Decoded view of the primary output word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatusWord {
    pub power: bool,
    pub headlight: bool,
    pub horn: bool,
    pub indicator: bool,
    pub pwm: bool,
    pub overheat: bool,
    pub system_enabled: bool,
    pub temperature_fault: bool,
}

impl StatusWord {
    /// Pack into the output word layout
    pub fn pack(&self) -> u8 {
        (self.power as u8) << OUT_POWER
            | (self.headlight as u8) << OUT_HEADLIGHT
            | (self.horn as u8) << OUT_HORN
            | (self.indicator as u8) << OUT_INDICATOR
            | (self.pwm as u8) << OUT_PWM
            | (self.overheat as u8) << OUT_OVERHEAT
            | (self.system_enabled as u8) << OUT_SYSTEM_ENABLED
            | (self.temperature_fault as u8) << OUT_TEMPERATURE_FAULT
    }

    /// Split an output word back into named bits
    pub fn unpack(word: u8) -> Self {
        let bit = |n: u8| (word >> n) & 1 != 0;
        Self {
            power: bit(OUT_POWER),
            headlight: bit(OUT_HEADLIGHT),
            horn: bit(OUT_HORN),
            indicator: bit(OUT_INDICATOR),
            pwm: bit(OUT_PWM),
            overheat: bit(OUT_OVERHEAT),
            system_enabled: bit(OUT_SYSTEM_ENABLED),
            temperature_fault: bit(OUT_TEMPERATURE_FAULT),
        }
    }
}

/// Registered pin-level outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Outputs {
    /// Primary output word
    pub uo_out: u8,
    /// Value driven onto the auxiliary bus
    pub uio_out: u8,
    /// Auxiliary bus output enable (1 = driven by the controller)
    pub uio_oe: u8,
}

impl Outputs {
    /// All outputs low, bus released
    pub const IDLE: Outputs = Outputs {
        uo_out: 0,
        uio_out: 0,
        uio_oe: 0,
    };

    /// Build outputs from a status word and an optional bus value
    ///
    /// `Some(value)` drives the aux bus; `None` leaves it as an input.
    pub fn new(status: StatusWord, bus: Option<u8>) -> Self {
        match bus {
            Some(value) => Self {
                uo_out: status.pack(),
                uio_out: value,
                uio_oe: BUS_DRIVEN,
            },
            None => Self {
                uo_out: status.pack(),
                uio_out: 0,
                uio_oe: 0,
            },
        }
    }

    /// Decoded view of `uo_out`
    pub fn status(&self) -> StatusWord {
        StatusWord::unpack(self.uo_out)
    }

    /// Whether the controller is driving the aux bus
    pub fn bus_driven(&self) -> bool {
        self.uio_oe == BUS_DRIVEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_positions() {
        let word = StatusWord {
            power: true,
            pwm: true,
            temperature_fault: true,
            ..Default::default()
        };
        assert_eq!(word.pack(), 0b1001_0001);
    }

    #[test]
    fn test_unpack_matches_pack() {
        let word = StatusWord::unpack(0b0110_1010);
        assert!(word.headlight);
        assert!(word.indicator);
        assert!(word.overheat);
        assert!(word.system_enabled);
        assert!(!word.power);
        assert_eq!(word.pack(), 0b0110_1010);
    }

    #[test]
    fn test_bus_direction() {
        let driven = Outputs::new(StatusWord::default(), Some(128));
        assert!(driven.bus_driven());
        assert_eq!(driven.uio_out, 128);

        let released = Outputs::new(StatusWord::default(), None);
        assert!(!released.bus_driven());
        assert_eq!(released, Outputs::IDLE);
    }
}
