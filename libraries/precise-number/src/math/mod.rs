pub mod common;
pub mod decimal;

pub use common::*;
pub use decimal::*;
