//! Per-cycle step function
//!
//! Evaluation order within one edge:
//!
//! 1. Reset (active low) forces the idle state and wins over everything.
//! 2. With enable low, registers and outputs hold.
//! 3. PWM and thermal advance on the motor speed held at the start of the
//!    cycle.
//! 4. The decoded request updates the register owned by its operation.
//! 5. Outputs are encoded from the new registers and registered.

use crate::bus::{Operation, Outputs, Request, StatusWord};
use crate::config::{ConfigError, ControllerConfig};
use crate::control::{Accessory, AccessoryBank, PowerArbiter};
use crate::pwm::PwmModulator;
use crate::sampler::SpeedSampler;
use crate::thermal::ThermalMonitor;

use super::status::StatusReport;

/// Pin-level inputs sampled at one clock edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Inputs {
    /// Primary input word
    pub ui_in: u8,
    /// Auxiliary bus as seen on its input side
    pub uio_in: u8,
    /// Pin-level enable
    pub ena: bool,
    /// Synchronous reset, active low
    pub rst_n: bool,
}

impl Inputs {
    /// Enabled, out of reset, with the given input words
    pub const fn running(ui_in: u8, uio_in: u8) -> Self {
        Self {
            ui_in,
            uio_in,
            ena: true,
            rst_n: true,
        }
    }

    /// Resolve possibly undriven pins
    ///
    /// An undriven pin (`None`) reads as 0, so an undriven `rst_n` holds
    /// the core in reset and an undriven `ena` disables it.
    pub fn resolve(
        ui_in: Option<u8>,
        uio_in: Option<u8>,
        ena: Option<bool>,
        rst_n: Option<bool>,
    ) -> Self {
        Self {
            ui_in: ui_in.unwrap_or(0),
            uio_in: uio_in.unwrap_or(0),
            ena: ena.unwrap_or(false),
            rst_n: rst_n.unwrap_or(false),
        }
    }
}

/// Every register of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoreState {
    pub(crate) power: PowerArbiter,
    pub(crate) accessories: AccessoryBank,
    pub(crate) sampler: SpeedSampler,
    pub(crate) pwm: PwmModulator,
    pub(crate) thermal: ThermalMonitor,
    /// Operation selected at the last evaluated edge
    pub(crate) operation: Operation,
    /// Registered outputs
    pub(crate) outputs: Outputs,
}

impl CoreState {
    /// State after reset
    pub const fn idle() -> Self {
        Self {
            power: PowerArbiter::new(),
            accessories: AccessoryBank::new(),
            sampler: SpeedSampler::new(),
            pwm: PwmModulator::new(),
            thermal: ThermalMonitor::new(),
            operation: Operation::PowerControl,
            outputs: Outputs::IDLE,
        }
    }

    pub fn power(&self) -> &PowerArbiter {
        &self.power
    }

    pub fn accessories(&self) -> &AccessoryBank {
        &self.accessories
    }

    pub fn sampler(&self) -> &SpeedSampler {
        &self.sampler
    }

    pub fn pwm(&self) -> &PwmModulator {
        &self.pwm
    }

    pub fn thermal(&self) -> &ThermalMonitor {
        &self.thermal
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn outputs(&self) -> Outputs {
        self.outputs
    }

    /// Current motor speed
    pub fn motor_speed(&self) -> u8 {
        self.sampler.speed()
    }

    /// Soft reset of the command path
    ///
    /// Heat and the PWM counter are not command state and keep running.
    fn clear_commands(&mut self) {
        self.power = PowerArbiter::new();
        self.accessories = AccessoryBank::new();
        self.sampler.clear();
    }

    /// Encode registered outputs for the selected operation
    fn encode(&self, operation: Operation, pwm_level: bool) -> Outputs {
        let powered = self.power.is_on();
        let overheat = self.thermal.is_overheated();

        let status = StatusWord {
            power: powered,
            headlight: self.accessories.is_on(Accessory::Headlight, powered),
            horn: self.accessories.is_on(Accessory::Horn, powered),
            indicator: self.accessories.is_on(Accessory::Indicator, powered),
            pwm: powered && operation == Operation::PwmGeneration && pwm_level,
            overheat,
            system_enabled: powered,
            temperature_fault: overheat,
        };

        let bus = operation
            .drives_bus()
            .then(|| if powered { self.sampler.speed() } else { 0 });

        Outputs::new(status, bus)
    }
}

/// Evaluate one clock edge
///
/// Pure: returns the next state and the outputs it registers.
pub fn step(state: &CoreState, inputs: &Inputs, config: &ControllerConfig) -> (CoreState, Outputs) {
    if !inputs.rst_n {
        let idle = CoreState::idle();
        return (idle, idle.outputs);
    }

    if !inputs.ena {
        return (*state, state.outputs);
    }

    let mut next = *state;
    let request = Request::decode(inputs.ui_in, inputs.uio_in);
    let operation = request.operation();

    let held_speed = state.sampler.speed();
    let pwm_level = next.pwm.tick(held_speed);
    next.thermal.update(held_speed, &config.thermal);

    let mut pedal = None;
    match request {
        Request::Power { request, mode } => next.power.update(request, mode),
        Request::Headlight(pair) => next.accessories.update(Accessory::Headlight, pair),
        Request::Horn(pair) => next.accessories.update(Accessory::Horn, pair),
        Request::Indicator(pair) => next.accessories.update(Accessory::Indicator, pair),
        Request::MotorSpeed { pedal: nibble } => pedal = Some(nibble),
        Request::Pwm | Request::ThermalStatus => {}
        Request::SystemReset => next.clear_commands(),
    }

    if request != Request::SystemReset {
        next.sampler.sample(pedal, config.sampler.settle_cycles);
    }

    next.operation = operation;
    next.outputs = next.encode(operation, pwm_level);
    (next, next.outputs)
}

/// Controller owning its configuration and registers
#[derive(Debug, Clone)]
pub struct Controller {
    config: ControllerConfig,
    state: CoreState,
}

impl Default for Controller {
    fn default() -> Self {
        Self {
            config: ControllerConfig::default(),
            state: CoreState::idle(),
        }
    }
}

impl Controller {
    /// Create a controller in the idle state
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: CoreState::idle(),
        })
    }

    /// Advance one clock edge
    pub fn tick(&mut self, inputs: &Inputs) -> Outputs {
        let (next, outputs) = step(&self.state, inputs, &self.config);
        self.state = next;
        outputs
    }

    /// Force the idle state, as if reset were held for one edge
    pub fn reset(&mut self) {
        self.state = CoreState::idle();
    }

    pub fn state(&self) -> &CoreState {
        &self.state
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Currently registered outputs
    pub fn outputs(&self) -> Outputs {
        self.state.outputs
    }

    /// Full register readout
    pub fn status(&self) -> StatusReport {
        StatusReport::capture(&self.state)
    }
}
