//! Small helpers shared across the crate: hex formatting/parsing and
//! timeout conversion.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
