//! Full status readout
//!
//! A flat snapshot of every register, for host tooling and telemetry.

use crate::bus::{Operation, Outputs, SourceMode};
use crate::control::Accessory;
use crate::sampler::SamplePhase;
use crate::thermal::ThermalState;

use super::step::CoreState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatusReport {
    pub operation: Operation,
    pub power: bool,
    pub mode: SourceMode,
    /// Latched accessory requests, before power gating
    pub headlight: bool,
    pub horn: bool,
    pub indicator: bool,
    pub phase: SamplePhase,
    pub accel: u8,
    pub brake: u8,
    pub motor_speed: u8,
    pub pwm_counter: u8,
    pub heat: u16,
    pub thermal: ThermalState,
    pub outputs: Outputs,
}

impl StatusReport {
    pub fn capture(state: &CoreState) -> Self {
        let accessories = state.accessories();
        let sampler = state.sampler();
        Self {
            operation: state.operation(),
            power: state.power().is_on(),
            mode: state.power().mode(),
            headlight: accessories.is_requested(Accessory::Headlight),
            horn: accessories.is_requested(Accessory::Horn),
            indicator: accessories.is_requested(Accessory::Indicator),
            phase: sampler.phase(),
            accel: sampler.accel(),
            brake: sampler.brake(),
            motor_speed: sampler.speed(),
            pwm_counter: state.pwm().counter(),
            heat: state.thermal().heat(),
            thermal: state.thermal().state(),
            outputs: state.outputs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Controller, Inputs};

    #[test]
    fn test_idle_report() {
        let report = StatusReport::capture(&CoreState::idle());
        assert!(!report.power);
        assert_eq!(report.mode, SourceMode::Plc);
        assert_eq!(report.phase, SamplePhase::armed());
        assert_eq!(report.motor_speed, 0);
        assert_eq!(report.heat, 0);
        assert_eq!(report.thermal, ThermalState::Normal);
        assert_eq!(report.outputs, Outputs::IDLE);
    }

    #[test]
    fn test_report_tracks_registers() {
        let mut ctrl = Controller::default();
        ctrl.tick(&Inputs::running(0b0011_0000, 0));
        ctrl.tick(&Inputs::running(0b0000_0100, 0b1010_0000));

        let report = ctrl.status();
        assert_eq!(report.operation, Operation::MotorSpeed);
        assert!(report.power);
        assert_eq!(report.mode, SourceMode::Hmi);
        assert_eq!(report.accel, 10);
        assert_eq!(report.phase, SamplePhase::Accelerator { dwell: 1 });
        assert_eq!(report.pwm_counter, 2);
        assert!(report.outputs.bus_driven());
    }
}
