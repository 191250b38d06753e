// nfctrace/nfctrace/src/protocol/isodep.rs

//! ISO-DEP (ISO/IEC 14443-4) block layer carried by NFC-A and NFC-B.
//!
//! Only consulted when the technology decoder left a frame unclassified.
//! Block layout: `PCB [CID] [NAD] INF... [CRC CRC]`.

use derive_more::Display;

use crate::protocol::checksum::{Checksum, split_tail};
use crate::protocol::{PollRule, parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IsoDepKind {
    #[display(fmt = "DESELECT")]
    Deselect,
    #[display(fmt = "WTX")]
    Wtx,
    #[display(fmt = "R_ACK")]
    Ack,
    #[display(fmt = "R_NAK")]
    Nak,
    #[display(fmt = "I_BLOCK")]
    Information,
}

impl IsoDepKind {
    /// Classify a PCB. Supervisory and receive-ready patterns are tested
    /// before the I-block bit. ACK and NAK differ only in bit 4.
    pub fn from_pcb(pcb: u8) -> Option<Self> {
        if pcb & 0xF7 == 0xC2 {
            Some(Self::Deselect)
        } else if pcb & 0xF7 == 0xF2 {
            Some(Self::Wtx)
        } else if pcb & 0xF6 == 0xA2 {
            Some(Self::Ack)
        } else if pcb & 0xF6 == 0xB2 {
            Some(Self::Nak)
        } else if pcb & 0x80 == 0 {
            Some(Self::Information)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Deselect => "DESELECT",
            Self::Wtx => "WTX",
            Self::Ack => "R_ACK",
            Self::Nak => "R_NAK",
            Self::Information => "I_BLOCK",
        }
    }
}

fn block_name(data: &[u8]) -> Option<&'static str> {
    IsoDepKind::from_pcb(*data.first()?).map(|kind| kind.name())
}

pub const RULES: &[PollRule] = &[block_name];

/// Classify a frame as an ISO-DEP block, in either direction.
pub fn decode(data: &[u8]) -> Option<&'static str> {
    RULES.iter().find_map(|rule| rule(data))
}

/// One ISO-DEP block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDepBlock {
    pub pcb: u8,
    pub kind: IsoDepKind,
    pub cid: Option<u8>,
    pub nad: Option<u8>,
    pub inf: Vec<u8>,
    pub checksum: Option<Checksum>,
}

impl IsoDepBlock {
    pub fn parse(data: &[u8]) -> Option<Self> {
        let pcb = *data.first()?;
        let kind = IsoDepKind::from_pcb(pcb)?;
        let (body, checksum) = split_tail(data);

        let mut offset = 1;
        let cid = if pcb & 0x08 != 0 {
            let cid = parser::byte_at(body, offset);
            offset += 1;
            cid
        } else {
            None
        };
        let nad = if kind == IsoDepKind::Information && pcb & 0x04 != 0 {
            let nad = parser::byte_at(body, offset);
            offset += 1;
            nad
        } else {
            None
        };
        let inf = parser::tail_from(body, offset).unwrap_or_default().to_vec();

        Some(Self {
            pcb,
            kind,
            cid: cid.map(|c| c & 0x0F),
            nad,
            inf,
            checksum,
        })
    }

    /// Block number toggled by I- and R-blocks.
    pub fn block_number(&self) -> Option<u8> {
        match self.kind {
            IsoDepKind::Information | IsoDepKind::Ack | IsoDepKind::Nak => Some(self.pcb & 0x01),
            IsoDepKind::Deselect | IsoDepKind::Wtx => None,
        }
    }

    /// Chaining bit of an I-block.
    pub fn is_chaining(&self) -> bool {
        self.kind == IsoDepKind::Information && self.pcb & 0x10 != 0
    }

    /// Waiting time extension multiplier of a WTX block.
    pub fn wtxm(&self) -> Option<u8> {
        if self.kind != IsoDepKind::Wtx {
            return None;
        }
        self.inf.first().map(|b| b & 0x3F)
    }

    /// Trailing SW1SW2 of an I-block that carries at least two INF bytes.
    /// Only meaningful for card responses.
    pub fn status_word(&self) -> Option<u16> {
        if self.kind != IsoDepKind::Information || self.inf.len() < 2 || self.is_chaining() {
            return None;
        }
        let at = self.inf.len() - 2;
        parser::be_u16_at(&self.inf, at)
    }

    /// APDU bytes without the status word.
    pub fn apdu_data(&self) -> &[u8] {
        match self.status_word() {
            Some(_) => &self.inf[..self.inf.len() - 2],
            None => &self.inf,
        }
    }
}
