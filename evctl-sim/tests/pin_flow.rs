//! Pin-level walkthrough of every operation, driven through the testbench

use evctl_core::bus::{Operation, StatusWord};
use evctl_core::sampler::SamplePhase;
use evctl_core::thermal::ThermalState;
use evctl_core::ControllerConfig;
use evctl_sim::testbench::DEFAULT_RESET_CYCLES;
use evctl_sim::Testbench;

const POWER_PLC: u8 = 1 << 3;
const POWER_HMI: u8 = 1 << 4;
const MODE_HMI: u8 = 1 << 5;
const HEADLIGHT_PLC: u8 = 1 << 6;

fn op(operation: Operation) -> u8 {
    operation.bits()
}

fn pedal(nibble: u8) -> u8 {
    nibble << 4
}

fn powered_bench() -> Testbench {
    let mut bench = Testbench::default();
    bench.power_on_reset(DEFAULT_RESET_CYCLES);
    bench.set_ui_in(op(Operation::PowerControl) | POWER_PLC);
    bench.clock_cycles(5);
    bench
}

fn set_speed(bench: &mut Testbench, accel: u8, brake: u8) {
    bench.set_ui_in(op(Operation::ThermalStatus));
    bench.clock_cycles(1);
    bench.set_ui_in(op(Operation::MotorSpeed));
    bench.set_uio_in(pedal(accel));
    bench.clock_cycles(2);
    bench.set_uio_in(pedal(brake));
    bench.clock_cycles(5);
}

#[test]
fn test_reset_outputs_idle() {
    let mut bench = Testbench::default();
    bench.power_on_reset(DEFAULT_RESET_CYCLES);
    assert_eq!(bench.uo_out(), 0);
    assert_eq!(bench.uio_out(), 0);
    assert_eq!(bench.uio_oe(), 0);
}

#[test]
fn test_power_and_accessories() {
    let mut bench = powered_bench();
    assert_eq!(bench.status_word(), StatusWord {
        power: true,
        system_enabled: true,
        ..StatusWord::default()
    });

    bench.set_ui_in(op(Operation::Headlight) | HEADLIGHT_PLC);
    bench.clock_cycles(5);
    assert!(bench.status_word().headlight);

    bench.set_ui_in(op(Operation::Horn));
    bench.set_uio_in(0b0000_0001);
    bench.clock_cycles(5);
    assert!(bench.status_word().horn);

    bench.set_ui_in(op(Operation::RightIndicator));
    bench.set_uio_in(0b0000_0100);
    bench.clock_cycles(5);
    assert!(bench.status_word().indicator);

    // Latched accessories survive leaving their operation
    assert!(bench.status_word().headlight);
    assert!(bench.status_word().horn);
}

#[test]
fn test_motor_speed_on_bus() {
    let mut bench = powered_bench();
    set_speed(&mut bench, 12, 4);

    assert_eq!(bench.uio_out(), 128);
    assert_eq!(bench.uio_oe(), 0xFF);
    let status = bench.status();
    assert_eq!(status.accel, 12);
    assert_eq!(status.brake, 4);
    assert_eq!(status.phase, SamplePhase::Brake);

    // Bus released outside motor-speed mode, speed retained
    bench.set_ui_in(op(Operation::ThermalStatus));
    bench.clock_cycles(1);
    assert_eq!(bench.uio_oe(), 0);
    assert_eq!(bench.status().motor_speed, 128);
}

#[test]
fn test_brake_dominates() {
    let mut bench = powered_bench();
    set_speed(&mut bench, 4, 12);
    assert_eq!(bench.uio_out(), 0);
}

#[test]
fn test_pwm_toggles_in_pwm_mode() {
    let mut bench = powered_bench();
    set_speed(&mut bench, 12, 4);

    bench.set_ui_in(op(Operation::PwmGeneration));
    bench.clock_cycles(10);

    let mut high = 0;
    for _ in 0..32 {
        high += u32::from(bench.status_word().pwm);
        bench.clock_cycles(1);
    }
    // speed 128 -> duty 8/16
    assert_eq!(high, 16);
}

#[test]
fn test_pwm_hidden_outside_pwm_mode() {
    let mut bench = powered_bench();
    set_speed(&mut bench, 15, 0);

    bench.set_ui_in(op(Operation::ThermalStatus));
    for _ in 0..32 {
        bench.clock_cycles(1);
        assert!(!bench.status_word().pwm);
    }
}

#[test]
fn test_overheat_after_sustained_speed() {
    let mut bench = powered_bench();
    set_speed(&mut bench, 15, 0);
    bench.clock_cycles(100);

    let word = bench.status_word();
    assert!(word.overheat);
    assert!(word.temperature_fault);
    assert_eq!(bench.status().thermal, ThermalState::Overheat);
}

#[test]
fn test_hmi_power_with_mode() {
    let mut bench = Testbench::default();
    bench.power_on_reset(DEFAULT_RESET_CYCLES);
    bench.set_ui_in(op(Operation::PowerControl) | POWER_HMI | MODE_HMI);
    bench.clock_cycles(5);

    let word = bench.status_word();
    assert!(word.power);
    assert!(word.system_enabled);
}

#[test]
fn test_conflicting_power_requests_cancel() {
    let mut bench = Testbench::default();
    bench.power_on_reset(DEFAULT_RESET_CYCLES);
    bench.set_ui_in(op(Operation::PowerControl) | POWER_PLC | POWER_HMI);
    bench.clock_cycles(5);
    assert!(!bench.status_word().power);
}

#[test]
fn test_system_reset_operation() {
    let mut bench = powered_bench();
    bench.set_ui_in(op(Operation::Headlight) | HEADLIGHT_PLC);
    bench.clock_cycles(2);

    bench.set_ui_in(op(Operation::SystemReset));
    bench.clock_cycles(5);

    assert_eq!(bench.uo_out() & 0x5F, 0);
    let status = bench.status();
    assert!(!status.power);
    assert!(!status.headlight);
    assert_eq!(status.motor_speed, 0);
}

#[test]
fn test_headlight_needs_power() {
    let mut bench = Testbench::default();
    bench.power_on_reset(DEFAULT_RESET_CYCLES);
    bench.set_ui_in(op(Operation::Headlight) | HEADLIGHT_PLC);
    bench.clock_cycles(5);

    assert!(!bench.status_word().headlight);
    // Request is latched and shows once power arrives
    assert!(bench.status().headlight);
    bench.set_ui_in(op(Operation::PowerControl) | POWER_PLC);
    bench.clock_cycles(1);
    assert!(bench.status_word().headlight);
}

#[test]
fn test_reset_pin_overrides_everything() {
    let mut bench = powered_bench();
    set_speed(&mut bench, 15, 0);

    bench.set_rst_n(false);
    bench.clock_cycles(1);
    assert_eq!(bench.uo_out(), 0);
    assert_eq!(bench.status().motor_speed, 0);
    assert_eq!(bench.status().heat, 0);
}

#[test]
fn test_custom_config_trips_earlier() {
    let mut config = ControllerConfig::default();
    config.thermal.high_threshold = 64;
    config.thermal.low_threshold = 16;

    let mut bench = Testbench::new(config).unwrap();
    bench.power_on_reset(DEFAULT_RESET_CYCLES);
    bench.set_ui_in(op(Operation::PowerControl) | POWER_PLC);
    bench.clock_cycles(1);
    set_speed(&mut bench, 15, 0);
    bench.clock_cycles(5);

    assert!(bench.status_word().overheat);
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = ControllerConfig::default();
    config.thermal.low_threshold = config.thermal.high_threshold;
    assert!(Testbench::new(config).is_err());
}
