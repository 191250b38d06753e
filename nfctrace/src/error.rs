// nfctrace/nfctrace/src/error.rs

use thiserror::Error;

/// Errors raised at the ingestion/export boundary. The decoding and pairing
/// core never produces these; it reports absence through `Option`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("trace document is missing mandatory member '{0}'")]
    MissingMember(&'static str),

    #[error("invalid hex payload: {0}")]
    InvalidHex(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
