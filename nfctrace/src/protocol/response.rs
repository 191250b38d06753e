// nfctrace/nfctrace/src/protocol/response.rs

use crate::protocol::iso7816::Iso7816Frame;
use crate::protocol::isodep::IsoDepBlock;
use crate::protocol::nfca::NfcAResponse;
use crate::protocol::nfcb::NfcBResponse;
use crate::protocol::nfcf::NfcFResponse;
use crate::protocol::nfcv::NfcVResponse;
use crate::protocol::request::non_empty;
use crate::types::{TagId, Technology};

/// Parsed listen frame. Interpretation of most responses depends on the
/// request command supplied when parsing; without it only the generic
/// body/checksum split is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    NfcA(NfcAResponse),
    NfcB(NfcBResponse),
    NfcF(NfcFResponse),
    NfcV(NfcVResponse),
    Iso7816(Iso7816Frame),
    IsoDep {
        technology: Technology,
        block: IsoDepBlock,
    },
}

impl Response {
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

    /// Command code of the response. NFC-A and NFC-V answers do not carry
    /// one, so the request command supplied as context is reported instead.
    pub fn command_code(&self) -> Option<u8> {
        match self {
            Self::NfcA(r) => r.command,
            Self::NfcB(r) => Some(r.code),
            Self::NfcF(r) => Some(r.command),
            Self::NfcV(r) => r.command,
            Self::Iso7816(f) => Some(f.command_code()),
            Self::IsoDep { block, .. } => Some(block.pcb),
        }
    }

    pub fn identifier(&self) -> Option<TagId> {
        match self {
            Self::NfcA(r) => r.identifier.clone(),
            Self::NfcB(r) => r.identifier().cloned(),
            Self::NfcF(r) => r.identifier(),
            Self::NfcV(r) => r.identifier.clone(),
            Self::Iso7816(_) | Self::IsoDep { .. } => None,
        }
    }

    pub fn params(&self) -> Option<&[u8]> {
        match self {
            Self::NfcA(r) => r.body.as_deref(),
            Self::NfcB(r) => r.body.as_deref(),
            Self::NfcF(r) => r.body.as_deref(),
            Self::NfcV(r) => r.payload.as_deref(),
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

    /// NFC-V error code, or the APDU status word of an ISO-DEP I-block.
    pub fn error_code(&self) -> Option<u16> {
        match self {
            Self::NfcV(r) => r.error_code.map(u16::from),
            Self::IsoDep { block, .. } => block.status_word(),
            _ => None,
        }
    }
}
