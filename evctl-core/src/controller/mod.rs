//! Synchronous controller core
//!
//! One call to [`step`] is one clock edge: every register is updated from
//! the same snapshot of state and inputs, and the registered outputs for
//! the next cycle are produced.

pub mod status;
pub mod step;

pub use status::StatusReport;
pub use step::{step, Controller, CoreState, Inputs};
