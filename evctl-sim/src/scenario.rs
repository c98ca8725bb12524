//! Scripted stimulus with expectations
//!
//! A scenario is a list of steps. Each step drives any subset of the input
//! pins, advances the clock, and then checks the outputs:
//!
//! ```toml
//! name = "power on"
//! reset_cycles = 10
//!
//! [[step]]
//! name = "power from PLC"
//! ui_in = 0x08
//! cycles = 5
//! expect_uo = { mask = 0x01, value = 0x01 }
//! ```
//!
//! `sample_pwm = N` clocks N further cycles after the step and requires the
//! PWM output bit to be both high and low during that window.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use evctl_core::bus::encode::OUT_PWM;
use evctl_core::thermal::ThermalState;
use evctl_core::StatusReport;

use crate::error::ScenarioError;
use crate::testbench::{Testbench, DEFAULT_RESET_CYCLES};

fn default_reset_cycles() -> u32 {
    DEFAULT_RESET_CYCLES
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Reset cycles applied before the first step (0 skips reset)
    #[serde(default = "default_reset_cycles")]
    pub reset_cycles: u32,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub name: String,
    pub ui_in: Option<u8>,
    pub uio_in: Option<u8>,
    pub ena: Option<bool>,
    pub rst_n: Option<bool>,
    #[serde(default)]
    pub cycles: u32,
    pub expect_uo: Option<BitCheck>,
    pub expect_uio_out: Option<u8>,
    pub sample_pwm: Option<u32>,
}

/// Masked comparison against `uo_out`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BitCheck {
    pub mask: u8,
    pub value: u8,
}

/// Observed state after one step
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub name: String,
    pub cycle: u64,
    pub uo_out: u8,
    pub uio_out: u8,
    pub status: StatusReport,
}

#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: String,
    pub steps: Vec<StepOutcome>,
}

impl Scenario {
    pub fn parse(input: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let input = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&input)
    }

    /// Run every step, stopping at the first failed expectation
    pub fn run(&self, bench: &mut Testbench) -> Result<ScenarioReport, ScenarioError> {
        info!("=== {} ===", self.name);

        if self.reset_cycles > 0 {
            bench.power_on_reset(self.reset_cycles);
        }

        let mut steps = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            steps.push(step.run(bench)?);
        }

        Ok(ScenarioReport {
            name: self.name.clone(),
            steps,
        })
    }
}

impl Step {
    fn run(&self, bench: &mut Testbench) -> Result<StepOutcome, ScenarioError> {
        info!("{}", self.name);

        if let Some(value) = self.ui_in {
            bench.set_ui_in(value);
        }
        if let Some(value) = self.uio_in {
            bench.set_uio_in(value);
        }
        if let Some(enabled) = self.ena {
            bench.set_ena(enabled);
        }
        if let Some(level) = self.rst_n {
            bench.set_rst_n(level);
        }
        bench.clock_cycles(self.cycles);

        let outcome = StepOutcome {
            name: self.name.clone(),
            cycle: bench.cycle(),
            uo_out: bench.uo_out(),
            uio_out: bench.uio_out(),
            status: bench.status(),
        };

        if let Some(check) = self.expect_uo {
            let actual = outcome.uo_out & check.mask;
            let expected = check.value & check.mask;
            if actual != expected {
                return Err(ScenarioError::OutputMismatch {
                    step: self.name.clone(),
                    mask: check.mask,
                    expected,
                    actual,
                });
            }
        }

        if let Some(expected) = self.expect_uio_out {
            if outcome.uio_out != expected {
                return Err(ScenarioError::BusMismatch {
                    step: self.name.clone(),
                    expected,
                    actual: outcome.uio_out,
                });
            }
        }

        if let Some(cycles) = self.sample_pwm {
            let high = sample_pwm(bench, cycles);
            info!("PWM high count: {}/{}", high, cycles);
            if high == 0 || high >= cycles {
                return Err(ScenarioError::PwmStuck {
                    step: self.name.clone(),
                    cycles,
                    high,
                });
            }
        }

        if outcome.status.thermal == ThermalState::Overheat {
            warn!("{}: overheat active (heat {})", self.name, outcome.status.heat);
        }

        Ok(outcome)
    }
}

/// Sample the PWM bit, then clock, `cycles` times
fn sample_pwm(bench: &mut Testbench, cycles: u32) -> u32 {
    let mut high = 0;
    for _ in 0..cycles {
        high += u32::from((bench.uo_out() >> OUT_PWM) & 1);
        bench.clock_cycles(1);
    }
    high
}
