//! Accelerator/brake sampling
//!
//! The pedal nibble on the auxiliary bus carries the accelerator reading
//! first and the brake reading second. A small phase machine decides which
//! latch each write lands in.

pub mod latch;
pub mod phase;

pub use latch::{motor_speed, SpeedSampler, MAX_MOTOR_SPEED, SPEED_SHIFT};
pub use phase::SamplePhase;
