// nfctrace/nfctrace/src/lib.rs

//! nfctrace
//!
//! Decoder for NFC traces: per-technology command classification (NFC-A,
//! NFC-B, NFC-F, NFC-V, ISO 7816 T=1 and the ISO-DEP block layer), field
//! extraction from poll and listen frames, and poll/listen pairing.

pub mod constants;
pub mod error;
#[cfg(feature = "json")]
pub mod export;
pub mod frame;
#[cfg(feature = "json")]
pub mod ingest;
pub mod prelude;
pub mod protocol;
pub mod session;
pub mod test_support;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available to consumers and to the
// `prelude`.
pub use crate::error::*;
pub use crate::frame::Frame;
pub use crate::types::*;

pub use prelude::*;
