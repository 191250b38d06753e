// nfctrace/nfctrace/src/prelude.rs

pub use crate::frame::Frame;
pub use crate::protocol::{CommandDetector, Request, Response, detect};
pub use crate::session::{
    FrameObserver, PairingConfig, ProcessorBuilder, StreamProcessor, Transaction,
    TransactionCollector, TransactionPairer,
};
pub use crate::{
    Atqb, BlockData, Direction, Error, FrameFlags, Idm, Pmm, Result, SystemCode, TagId, Technology,
};

#[cfg(feature = "json")]
pub use crate::export::JsonLinesObserver;
#[cfg(feature = "json")]
pub use crate::ingest::{LiveReader, parse_document};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, default_pairing_timeout, ms, parse_hex};
