// nfctrace/nfctrace/src/protocol/request.rs

use crate::protocol::iso7816::Iso7816Frame;
use crate::protocol::isodep::IsoDepBlock;
use crate::protocol::nfca::NfcARequest;
use crate::protocol::nfcb::NfcBRequest;
use crate::protocol::nfcf::NfcFRequest;
use crate::protocol::nfcv::NfcVRequest;
use crate::types::{TagId, Technology};

/// Parsed poll frame. Per-technology structures live in
/// `protocol::<tech>.rs`; this enum gives callers one set of accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    NfcA(NfcARequest),
    NfcB(NfcBRequest),
    NfcF(NfcFRequest),
    NfcV(NfcVRequest),
    Iso7816(Iso7816Frame),
    IsoDep {
        technology: Technology,
        block: IsoDepBlock,
    },
}

impl Request {
    pub fn technology(&self) -> Technology {
        match self {
            Self::NfcA(_) => Technology::NfcA,
            Self::NfcB(_) => Technology::NfcB,
            Self::NfcF(_) => Technology::NfcF,
            Self::NfcV(_) => Technology::NfcV,
            Self::Iso7816(_) => Technology::Iso7816,
            Self::IsoDep { technology, .. } => *technology,
        }
    }

    /// Command byte as sent. For ISO 7816 and ISO-DEP blocks this is the PCB.
    pub fn command_code(&self) -> u8 {
        match self {
            Self::NfcA(r) => r.command,
            Self::NfcB(r) => r.command,
            Self::NfcF(r) => r.command,
            Self::NfcV(r) => r.command,
            Self::Iso7816(f) => f.command_code(),
            Self::IsoDep { block, .. } => block.pcb,
        }
    }

    /// Addressed identifier, in wire order.
    pub fn identifier(&self) -> Option<TagId> {
        match self {
            Self::NfcA(r) => r.identifier.clone(),
            Self::NfcB(r) => r.identifier.clone(),
            Self::NfcF(r) => r.identifier(),
            Self::NfcV(r) => r.identifier.clone(),
            Self::Iso7816(_) | Self::IsoDep { .. } => None,
        }
    }

    pub fn params(&self) -> Option<&[u8]> {
        match self {
            Self::NfcA(r) => r.params.as_deref(),
            Self::NfcB(r) => r.params.as_deref(),
            Self::NfcF(r) => r.params.as_deref(),
            Self::NfcV(r) => r.params.as_deref(),
            Self::Iso7816(Iso7816Frame::Block(b)) => non_empty(&b.inf),
            Self::Iso7816(Iso7816Frame::Pps(_)) => None,
            Self::IsoDep { block, .. } => non_empty(&block.inf),
        }
    }

    pub fn checksum(&self) -> Option<&[u8]> {
        match self {
            Self::NfcA(r) => r.checksum.as_ref().map(|c| &c[..]),
            Self::NfcB(r) => r.checksum.as_ref().map(|c| &c[..]),
            Self::NfcF(r) => r.checksum.as_ref().map(|c| &c[..]),
            Self::NfcV(r) => r.checksum.as_ref().map(|c| &c[..]),
            Self::Iso7816(Iso7816Frame::Block(b)) => b.edc.as_deref(),
            Self::Iso7816(Iso7816Frame::Pps(p)) => p.pck.as_ref().map(std::slice::from_ref),
            Self::IsoDep { block, .. } => block.checksum.as_ref().map(|c| &c[..]),
        }
    }
}

pub(crate) fn non_empty(bytes: &[u8]) -> Option<&[u8]> {
    if bytes.is_empty() { None } else { Some(bytes) }
}
