//! Configuration types
//!
//! Controller tunables. With the `serde` feature they can be loaded from a
//! host-side file or stored as postcard binary (see [`crate::persist`]).

pub mod types;

pub use types::*;
