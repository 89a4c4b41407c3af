//! High precision fixed point numbers for on-chain reward accounting.
//!
//! Reward indices and earned unit accumulators are stored on chain as an
//! unsigned 256-bit integer scaled by 10^12, laid out as four u64 words in
//! little endian order. This crate converts between that wire form and
//! canonical decimal strings, and provides checked arithmetic over the
//! scaled representation.

pub mod error;
pub mod math;
pub mod state;

pub use error::*;
pub use math::*;
pub use state::*;
