//! Sample phase machine
//!
//! The phase is a function of the current phase and whether motor-speed
//! mode is selected this cycle:
//!
//! ```text
//!           selected, dwell+1 < settle
//!              ┌──────┐
//!              ▼      │
//!  ──────► Accelerator ──── selected, dwell+1 >= settle ───► Brake ─┐
//!  not selected   ▲                                            │  ▲  │ selected
//!                 └──────────────── not selected ──────────────┘  └──┘
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which latch the next pedal write lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SamplePhase {
    /// Writes land in the accelerator latch; `dwell` counts cycles spent
    /// here so far while the driving logic settles
    Accelerator { dwell: u8 },
    /// Writes land in the brake latch
    Brake,
}

impl Default for SamplePhase {
    fn default() -> Self {
        Self::armed()
    }
}

impl SamplePhase {
    /// Start of a fresh accelerator/brake sequence
    pub const fn armed() -> Self {
        SamplePhase::Accelerator { dwell: 0 }
    }

    pub fn is_accelerator(&self) -> bool {
        matches!(self, SamplePhase::Accelerator { .. })
    }

    pub fn is_brake(&self) -> bool {
        matches!(self, SamplePhase::Brake)
    }

    /// Phase for the next cycle
    ///
    /// `settle_cycles` is the number of selected cycles spent in the
    /// accelerator phase before flipping to brake. Values below 1 behave
    /// as 1.
    pub fn transition(self, selected: bool, settle_cycles: u8) -> Self {
        use SamplePhase::*;

        match (self, selected) {
            (_, false) => Self::armed(),
            (Accelerator { dwell }, true) => {
                let dwell = dwell.saturating_add(1);
                if dwell >= settle_cycles {
                    Brake
                } else {
                    Accelerator { dwell }
                }
            }
            (Brake, true) => Brake,
        }
    }
}
