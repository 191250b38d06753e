// nfctrace/nfctrace/src/protocol/mod.rs

pub mod checksum;
pub mod detector;
pub mod iso7816;
pub mod isodep;
pub mod nfca;
pub mod nfcb;
pub mod nfcf;
pub mod nfcv;
pub mod parser;
pub mod request;
pub mod response;
pub mod tables;

pub use checksum::Checksum;
pub use detector::{CommandDetector, detect};
pub use request::Request;
pub use response::Response;

/// Classification step for a poll frame. Rules are kept in ordered slices
/// and the first one returning a name wins.
pub type PollRule = fn(&[u8]) -> Option<&'static str>;

/// Classification step for a listen frame given the command byte of the
/// request that solicited it.
pub type ListenRule = fn(&[u8], u8) -> Option<&'static str>;
