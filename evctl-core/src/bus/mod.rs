//! Input and output bus handling
//!
//! The controller sees two 8-bit input words and drives one 8-bit output
//! word plus the bidirectional auxiliary bus. This module turns the raw
//! words into typed requests and packs status back into words.

pub mod decode;
pub mod encode;

pub use decode::{InputFields, Operation, Request, RequestPair, SourceMode};
pub use encode::{Outputs, StatusWord};
