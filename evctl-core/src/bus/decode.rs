//! Input decoder
//!
//! Splits the primary input word and the auxiliary bus into named fields,
//! then routes the fields valid for the selected operation into a
//! [`Request`]. No arithmetic happens here.
//!
//! Primary input word (`ui_in`):
//! ```text
//! │ 7        │ 6        │ 5    │ 4     │ 3     │ 2..0      │
//! │ head_hmi │ head_plc │ mode │ p_hmi │ p_plc │ operation │
//! ```
//!
//! Auxiliary bus (`uio_in`):
//! ```text
//! │ 7..4  │ 3       │ 2       │ 1        │ 0        │
//! │ pedal │ ind_hmi │ ind_plc │ horn_hmi │ horn_plc │
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mask for the 3-bit operation select field
pub const OPERATION_MASK: u8 = 0b0000_0111;

/// Mask for a 4-bit pedal reading
pub const NIBBLE_MASK: u8 = 0x0F;

// Primary input word bit positions
pub const BIT_POWER_PLC: u8 = 3;
pub const BIT_POWER_HMI: u8 = 4;
pub const BIT_MODE_SELECT: u8 = 5;
pub const BIT_HEADLIGHT_PLC: u8 = 6;
pub const BIT_HEADLIGHT_HMI: u8 = 7;

// Auxiliary bus bit positions
pub const BIT_HORN_PLC: u8 = 0;
pub const BIT_HORN_HMI: u8 = 1;
pub const BIT_INDICATOR_PLC: u8 = 2;
pub const BIT_INDICATOR_HMI: u8 = 3;
pub const PEDAL_SHIFT: u8 = 4;

#[inline]
fn bit(word: u8, n: u8) -> bool {
    (word >> n) & 1 != 0
}

/// Controller operation selected by the low three bits of `ui_in`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operation {
    /// Latch the PLC/HMI power request
    #[default]
    PowerControl = 0,
    /// Latch the headlight request
    Headlight = 1,
    /// Latch the horn request
    Horn = 2,
    /// Latch the right indicator request
    RightIndicator = 3,
    /// Sample accelerator/brake and drive speed onto the aux bus
    MotorSpeed = 4,
    /// Expose the PWM output
    PwmGeneration = 5,
    /// Temperature monitoring / status
    ThermalStatus = 6,
    /// Soft reset of the command path and status readout
    SystemReset = 7,
}

impl Operation {
    /// All operations in select-field order
    pub const ALL: [Operation; 8] = [
        Operation::PowerControl,
        Operation::Headlight,
        Operation::Horn,
        Operation::RightIndicator,
        Operation::MotorSpeed,
        Operation::PwmGeneration,
        Operation::ThermalStatus,
        Operation::SystemReset,
    ];

    /// Decode the operation from a select field (upper bits ignored)
    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & OPERATION_MASK) as usize]
    }

    /// Raw 3-bit select value
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Whether the controller drives the auxiliary bus in this operation
    pub fn drives_bus(self) -> bool {
        matches!(self, Operation::MotorSpeed)
    }
}

/// The same request from both redundant command sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RequestPair {
    /// Request from the PLC
    pub plc: bool,
    /// Request from the HMI
    pub hmi: bool,
}

impl RequestPair {
    pub const fn new(plc: bool, hmi: bool) -> Self {
        Self { plc, hmi }
    }

    /// Exclusive-or arbitration: on when exactly one source asserts
    pub const fn arbitrate(self) -> bool {
        self.plc ^ self.hmi
    }
}

/// Position of the PLC/HMI mode switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SourceMode {
    #[default]
    Plc,
    Hmi,
}

impl SourceMode {
    fn from_bit(hmi: bool) -> Self {
        if hmi {
            SourceMode::Hmi
        } else {
            SourceMode::Plc
        }
    }
}

/// Every field carried by the two input words
///
/// All fields are extracted every cycle; only the ones routed by
/// [`InputFields::request`] affect behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputFields {
    pub operation: Operation,
    pub power: RequestPair,
    pub mode: SourceMode,
    pub headlight: RequestPair,
    pub horn: RequestPair,
    pub indicator: RequestPair,
    /// Time-multiplexed accelerator/brake reading (0-15)
    pub pedal: u8,
}

impl InputFields {
    /// Split the raw input words into fields
    pub fn decode(ui_in: u8, uio_in: u8) -> Self {
        Self {
            operation: Operation::from_bits(ui_in),
            power: RequestPair::new(bit(ui_in, BIT_POWER_PLC), bit(ui_in, BIT_POWER_HMI)),
            mode: SourceMode::from_bit(bit(ui_in, BIT_MODE_SELECT)),
            headlight: RequestPair::new(
                bit(ui_in, BIT_HEADLIGHT_PLC),
                bit(ui_in, BIT_HEADLIGHT_HMI),
            ),
            horn: RequestPair::new(bit(uio_in, BIT_HORN_PLC), bit(uio_in, BIT_HORN_HMI)),
            indicator: RequestPair::new(
                bit(uio_in, BIT_INDICATOR_PLC),
                bit(uio_in, BIT_INDICATOR_HMI),
            ),
            pedal: (uio_in >> PEDAL_SHIFT) & NIBBLE_MASK,
        }
    }

    /// Route the fields valid for the selected operation
    pub fn request(&self) -> Request {
        match self.operation {
            Operation::PowerControl => Request::Power {
                request: self.power,
                mode: self.mode,
            },
            Operation::Headlight => Request::Headlight(self.headlight),
            Operation::Horn => Request::Horn(self.horn),
            Operation::RightIndicator => Request::Indicator(self.indicator),
            Operation::MotorSpeed => Request::MotorSpeed { pedal: self.pedal },
            Operation::PwmGeneration => Request::Pwm,
            Operation::ThermalStatus => Request::ThermalStatus,
            Operation::SystemReset => Request::SystemReset,
        }
    }
}

/// Operation-specific request for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    Power {
        request: RequestPair,
        mode: SourceMode,
    },
    Headlight(RequestPair),
    Horn(RequestPair),
    Indicator(RequestPair),
    /// Pedal nibble for the speed sampler; the aux bus is an output here
    MotorSpeed {
        pedal: u8,
    },
    Pwm,
    ThermalStatus,
    SystemReset,
}

impl Request {
    /// Decode both input words straight into a request
    pub fn decode(ui_in: u8, uio_in: u8) -> Self {
        InputFields::decode(ui_in, uio_in).request()
    }

    /// Operation this request belongs to
    pub fn operation(&self) -> Operation {
        match self {
            Request::Power { .. } => Operation::PowerControl,
            Request::Headlight(_) => Operation::Headlight,
            Request::Horn(_) => Operation::Horn,
            Request::Indicator(_) => Operation::RightIndicator,
            Request::MotorSpeed { .. } => Operation::MotorSpeed,
            Request::Pwm => Operation::PwmGeneration,
            Request::ThermalStatus => Operation::ThermalStatus,
            Request::SystemReset => Operation::SystemReset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_select_ignores_upper_bits() {
        assert_eq!(Operation::from_bits(0b1111_1000), Operation::PowerControl);
        assert_eq!(Operation::from_bits(0b0100_0001), Operation::Headlight);
        assert_eq!(Operation::from_bits(0b0000_0111), Operation::SystemReset);
        for op in Operation::ALL {
            assert_eq!(Operation::from_bits(op.bits()), op);
        }
    }

    #[test]
    fn test_power_fields() {
        let fields = InputFields::decode(0b0011_1000, 0);
        assert_eq!(fields.operation, Operation::PowerControl);
        assert_eq!(fields.power, RequestPair::new(true, true));
        assert_eq!(fields.mode, SourceMode::Hmi);
        assert!(!fields.power.arbitrate());
    }

    #[test]
    fn test_headlight_request() {
        let request = Request::decode(0b0100_0001, 0);
        assert_eq!(request, Request::Headlight(RequestPair::new(true, false)));
    }

    #[test]
    fn test_aux_bus_fields() {
        let fields = InputFields::decode(0, 0b1010_0110);
        assert_eq!(fields.horn, RequestPair::new(false, true));
        assert_eq!(fields.indicator, RequestPair::new(true, false));
        assert_eq!(fields.pedal, 0b1010);
    }

    #[test]
    fn test_routing_by_operation() {
        assert_eq!(
            Request::decode(0b0000_0010, 0b0000_0001),
            Request::Horn(RequestPair::new(true, false))
        );
        assert_eq!(
            Request::decode(0b0000_0011, 0b0000_0100),
            Request::Indicator(RequestPair::new(true, false))
        );
        assert_eq!(
            Request::decode(0b0000_0100, 0b1100_0000),
            Request::MotorSpeed { pedal: 12 }
        );
        assert_eq!(Request::decode(0b0000_0101, 0xFF), Request::Pwm);
        assert_eq!(Request::decode(0b0000_0110, 0), Request::ThermalStatus);
        assert_eq!(Request::decode(0b1111_1111, 0xFF), Request::SystemReset);
    }

    #[test]
    fn test_request_operation_matches_select() {
        for op in Operation::ALL {
            assert_eq!(Request::decode(op.bits(), 0).operation(), op);
        }
    }

    #[test]
    fn test_only_motor_speed_drives_bus() {
        for op in Operation::ALL {
            assert_eq!(op.drives_bus(), op == Operation::MotorSpeed);
        }
    }
}
