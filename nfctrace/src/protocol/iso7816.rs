// nfctrace/nfctrace/src/protocol/iso7816.rs

//! ISO 7816-3 T=1 block protocol on a contact interface.
//!
//! Block layout: `NAD PCB LEN INF... EDC`. A frame starting with `0xFF` is
//! a PPS exchange instead of a block.

use derive_more::Display;

use crate::constants::ISO7816_PPSS;
use crate::protocol::parser;
use crate::types::Direction;

/// Block type selected by the PCB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BlockKind {
    #[display(fmt = "I-BLOCK")]
    Information,
    #[display(fmt = "R-BLOCK")]
    ReceiveReady,
    #[display(fmt = "S-BLOCK")]
    Supervisory,
}

impl BlockKind {
    pub fn from_pcb(pcb: u8) -> Self {
        if pcb & 0x80 == 0 {
            Self::Information
        } else if pcb & 0xC0 == 0x80 {
            Self::ReceiveReady
        } else {
            Self::Supervisory
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Information => "I-BLOCK",
            Self::ReceiveReady => "R-BLOCK",
            Self::Supervisory => "S-BLOCK",
        }
    }
}

/// Supervisory function carried in the low PCB bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SupervisoryKind {
    #[display(fmt = "RESYNCH")]
    Resynch,
    #[display(fmt = "IFS")]
    Ifs,
    #[display(fmt = "ABORT")]
    Abort,
    #[display(fmt = "WTX")]
    Wtx,
    #[display(fmt = "RFU")]
    Reserved,
}

impl SupervisoryKind {
    fn from_pcb(pcb: u8) -> Self {
        match pcb & 0x1F {
            0x00 => Self::Resynch,
            0x01 => Self::Ifs,
            0x02 => Self::Abort,
            0x03 => Self::Wtx,
            _ => Self::Reserved,
        }
    }
}

pub fn decode(data: &[u8], direction: Direction, _request: Option<u8>) -> Option<&'static str> {
    if matches!(direction, Direction::CarrierOn | Direction::CarrierOff) {
        return None;
    }
    if *data.first()? == ISO7816_PPSS {
        return Some("PPS");
    }
    parser::byte_at(data, 1).map(|pcb| BlockKind::from_pcb(pcb).name())
}

/// One T=1 block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct T1Block {
    pub nad: u8,
    pub pcb: u8,
    pub kind: BlockKind,
    /// Declared INF length
    pub len: Option<u8>,
    /// INF bytes, bounded by what was captured
    pub inf: Vec<u8>,
    /// Bytes after INF: LRC (1 byte) or CRC (2 bytes)
    pub edc: Option<Vec<u8>>,
}

impl T1Block {
    pub fn parse(data: &[u8]) -> Option<Self> {
        let nad = *data.first()?;
        let pcb = parser::byte_at(data, 1)?;
        let len = parser::byte_at(data, 2);
        let inf_start = 3.min(data.len());
        let inf_end = len
            .map(|l| (inf_start + l as usize).min(data.len()))
            .unwrap_or(inf_start);
        Some(Self {
            nad,
            pcb,
            kind: BlockKind::from_pcb(pcb),
            len,
            inf: data[inf_start..inf_end].to_vec(),
            edc: parser::non_empty(&data[inf_end..]),
        })
    }

    /// N(S) of an I-block.
    pub fn send_sequence(&self) -> Option<u8> {
        (self.kind == BlockKind::Information).then_some((self.pcb >> 6) & 0x01)
    }

    /// M bit of an I-block.
    pub fn more_data(&self) -> bool {
        self.kind == BlockKind::Information && self.pcb & 0x20 != 0
    }

    /// N(R) of an R-block.
    pub fn receive_sequence(&self) -> Option<u8> {
        (self.kind == BlockKind::ReceiveReady).then_some((self.pcb >> 4) & 0x01)
    }

    /// Error code of an R-block (0 means no error).
    pub fn receive_error(&self) -> Option<u8> {
        (self.kind == BlockKind::ReceiveReady).then_some(self.pcb & 0x03)
    }

    pub fn supervisory(&self) -> Option<SupervisoryKind> {
        (self.kind == BlockKind::Supervisory).then(|| SupervisoryKind::from_pcb(self.pcb))
    }

    /// True for the response half of an S-block pair.
    pub fn is_supervisory_response(&self) -> bool {
        self.kind == BlockKind::Supervisory && self.pcb & 0x20 != 0
    }
}

/// Protocol and parameter selection exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pps {
    pub pps0: u8,
    pub pps1: Option<u8>,
    pub pps2: Option<u8>,
    pub pps3: Option<u8>,
    pub pck: Option<u8>,
}

impl Pps {
    pub fn parse(data: &[u8]) -> Option<Self> {
        if *data.first()? != ISO7816_PPSS {
            return None;
        }
        let pps0 = parser::byte_at(data, 1)?;
        let mut offset = 2;
        let mut optional = |mask: u8| {
            if pps0 & mask == 0 {
                return None;
            }
            let value = parser::byte_at(data, offset);
            offset += 1;
            value
        };
        let pps1 = optional(0x10);
        let pps2 = optional(0x20);
        let pps3 = optional(0x40);
        let pck = parser::byte_at(data, offset);
        Some(Self {
            pps0,
            pps1,
            pps2,
            pps3,
            pck,
        })
    }

    /// Protocol type T requested.
    pub fn protocol(&self) -> u8 {
        self.pps0 & 0x0F
    }
}

/// A parsed ISO 7816 frame, in either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Iso7816Frame {
    Pps(Pps),
    Block(T1Block),
}

impl Iso7816Frame {
    /// PCB for blocks, PPS0 for PPS exchanges.
    pub fn command_code(&self) -> u8 {
        match self {
            Self::Pps(pps) => pps.pps0,
            Self::Block(block) => block.pcb,
        }
    }
}

pub fn parse_frame(data: &[u8]) -> Option<Iso7816Frame> {
    if *data.first()? == ISO7816_PPSS {
        Pps::parse(data).map(Iso7816Frame::Pps)
    } else {
        T1Block::parse(data).map(Iso7816Frame::Block)
    }
}

pub fn parse_request(data: &[u8]) -> Option<Iso7816Frame> {
    parse_frame(data)
}

pub fn parse_response(data: &[u8], _request: Option<u8>) -> Option<Iso7816Frame> {
    parse_frame(data)
}
