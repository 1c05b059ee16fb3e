mod factory;
mod units;

pub use factory::*;
pub use units::*;

// Re-export primitive types used across the public API
pub use alloy_primitives::{Address, Bytes, U256};
pub use rust_decimal::Decimal;
