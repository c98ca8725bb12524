//! Pin-level testbench
//!
//! Inputs are held until changed and sampled on every clock edge. Pins
//! that were never driven read as 0, so a fresh testbench sits in reset
//! until `rst_n` is raised.

use log::{debug, trace, warn};

use evctl_core::bus::StatusWord;
use evctl_core::{ConfigError, Controller, ControllerConfig, Inputs, Outputs, StatusReport};

/// Cycles of reset applied by [`Testbench::power_on_reset`]
pub const DEFAULT_RESET_CYCLES: u32 = 10;

pub struct Testbench {
    controller: Controller,
    ui_in: Option<u8>,
    uio_in: Option<u8>,
    ena: Option<bool>,
    rst_n: Option<bool>,
    outputs: Outputs,
    cycle: u64,
}

impl Default for Testbench {
    fn default() -> Self {
        Self::with_controller(Controller::default())
    }
}

impl Testbench {
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_controller(Controller::new(config)?))
    }

    fn with_controller(controller: Controller) -> Self {
        Self {
            controller,
            ui_in: None,
            uio_in: None,
            ena: None,
            rst_n: None,
            outputs: Outputs::IDLE,
            cycle: 0,
        }
    }

    pub fn set_ui_in(&mut self, value: u8) {
        self.ui_in = Some(value);
    }

    pub fn set_uio_in(&mut self, value: u8) {
        self.uio_in = Some(value);
    }

    /// Stop driving the aux bus from the testbench side
    pub fn release_uio_in(&mut self) {
        self.uio_in = None;
    }

    pub fn set_ena(&mut self, enabled: bool) {
        self.ena = Some(enabled);
    }

    pub fn set_rst_n(&mut self, level: bool) {
        self.rst_n = Some(level);
    }

    /// Enable, clear inputs, hold reset for `cycles`, then release it
    pub fn power_on_reset(&mut self, cycles: u32) {
        self.set_ena(true);
        self.set_ui_in(0);
        self.set_uio_in(0);
        self.set_rst_n(false);
        self.clock_cycles(cycles);
        self.set_rst_n(true);
    }

    /// Advance `count` clock edges
    pub fn clock_cycles(&mut self, count: u32) {
        for _ in 0..count {
            self.clock_edge();
        }
    }

    fn clock_edge(&mut self) {
        let inputs = Inputs::resolve(self.ui_in, self.uio_in, self.ena, self.rst_n);
        let outputs = self.controller.tick(&inputs);
        self.cycle += 1;

        trace!(
            "cycle {}: ui_in={:#04x} uio_in={:#04x} -> uo_out={:#04x} uio_out={:#04x}",
            self.cycle,
            inputs.ui_in,
            inputs.uio_in,
            outputs.uo_out,
            outputs.uio_out
        );

        if outputs != self.outputs {
            debug!(
                "cycle {}: uo_out {:#010b} -> {:#010b}, uio_out {} -> {}",
                self.cycle,
                self.outputs.uo_out,
                outputs.uo_out,
                self.outputs.uio_out,
                outputs.uio_out
            );
        }

        let was_hot = self.outputs.status().overheat;
        let hot = outputs.status().overheat;
        if hot && !was_hot {
            warn!(
                "cycle {}: overheat raised (heat {})",
                self.cycle,
                self.controller.state().thermal().heat()
            );
        } else if was_hot && !hot {
            debug!("cycle {}: overheat cleared", self.cycle);
        }

        self.outputs = outputs;
    }

    pub fn uo_out(&self) -> u8 {
        self.outputs.uo_out
    }

    pub fn uio_out(&self) -> u8 {
        self.outputs.uio_out
    }

    pub fn uio_oe(&self) -> u8 {
        self.outputs.uio_oe
    }

    pub fn outputs(&self) -> Outputs {
        self.outputs
    }

    /// Decoded primary output word
    pub fn status_word(&self) -> StatusWord {
        self.outputs.status()
    }

    /// Full register readout
    pub fn status(&self) -> StatusReport {
        self.controller.status()
    }

    /// Clock edges applied so far
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_bench_held_in_reset() {
        let mut bench = Testbench::default();
        bench.set_ui_in(0b0000_1000);
        bench.clock_cycles(5);
        assert_eq!(bench.uo_out(), 0);
        assert_eq!(bench.cycle(), 5);
    }

    #[test]
    fn test_power_on_reset_then_power() {
        let mut bench = Testbench::default();
        bench.power_on_reset(DEFAULT_RESET_CYCLES);
        bench.set_ui_in(0b0000_1000);
        bench.clock_cycles(1);
        assert!(bench.status_word().power);
        assert_eq!(bench.cycle(), u64::from(DEFAULT_RESET_CYCLES) + 1);
    }

    #[test]
    fn test_released_bus_reads_zero() {
        let mut bench = Testbench::default();
        bench.power_on_reset(2);
        bench.set_ui_in(0b0000_0010);
        bench.set_uio_in(0b0000_0001);
        bench.clock_cycles(1);
        assert!(bench.status().horn);

        bench.release_uio_in();
        bench.clock_cycles(1);
        assert!(!bench.status().horn);
    }

    #[test]
    fn test_disable_freezes_outputs() {
        let mut bench = Testbench::default();
        bench.power_on_reset(2);
        bench.set_ui_in(0b0000_1000);
        bench.clock_cycles(1);
        let held = bench.outputs();

        bench.set_ena(false);
        bench.set_ui_in(0b0000_0000);
        bench.clock_cycles(5);
        assert_eq!(bench.outputs(), held);
    }
}
