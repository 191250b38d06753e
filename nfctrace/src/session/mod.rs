// nfctrace/nfctrace/src/session/mod.rs

pub mod pairing;
pub mod stream;

pub use pairing::{PairingConfig, Transaction, TransactionPairer, pair_all};
pub use stream::{FrameObserver, LogObserver, ProcessorBuilder, StreamProcessor, TransactionCollector};
