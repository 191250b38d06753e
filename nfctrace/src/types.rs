// nfctrace/nfctrace/src/types.rs

use crate::Error;
use crate::constants::*;
use bitflags::bitflags;
use derive_more::Display;
use std::convert::TryFrom;

/// Radio technology a frame was captured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Technology {
    #[display(fmt = "NfcA")]
    NfcA,
    #[display(fmt = "NfcB")]
    NfcB,
    #[display(fmt = "NfcF")]
    NfcF,
    #[display(fmt = "NfcV")]
    NfcV,
    #[display(fmt = "Iso7816")]
    Iso7816,
    #[display(fmt = "Unknown")]
    Unknown,
}

impl Technology {
    /// Map a capture tool technology code. Unrecognised codes map to `Unknown`.
    pub fn from_code(code: u32) -> Self {
        match code {
            TECH_NFC_A => Self::NfcA,
            TECH_NFC_B => Self::NfcB,
            TECH_NFC_F => Self::NfcF,
            TECH_NFC_V => Self::NfcV,
            TECH_ISO7816 => Self::Iso7816,
            _ => Self::Unknown,
        }
    }

    /// Capture tool code for this technology (0 for `Unknown`).
    pub fn code(&self) -> u32 {
        match self {
            Self::NfcA => TECH_NFC_A,
            Self::NfcB => TECH_NFC_B,
            Self::NfcF => TECH_NFC_F,
            Self::NfcV => TECH_NFC_V,
            Self::Iso7816 => TECH_ISO7816,
            Self::Unknown => 0,
        }
    }

    /// Technologies that can carry the ISO-DEP block transport.
    pub fn carries_iso_dep(&self) -> bool {
        matches!(self, Self::NfcA | Self::NfcB)
    }
}

/// Logical role of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[display(fmt = "Poll")]
    Poll,
    #[display(fmt = "Listen")]
    Listen,
    #[display(fmt = "CarrierOn")]
    CarrierOn,
    #[display(fmt = "CarrierOff")]
    CarrierOff,
}

impl Direction {
    /// Map a capture tool frame type code. ISO 7816 request/exchange frames
    /// are polls, ATR and response frames are listens.
    pub fn from_frame_type(code: u32) -> Option<Self> {
        match code {
            FRAME_CARRIER_OFF => Some(Self::CarrierOff),
            FRAME_CARRIER_ON => Some(Self::CarrierOn),
            FRAME_POLL | FRAME_ISO_REQUEST | FRAME_ISO_EXCHANGE => Some(Self::Poll),
            FRAME_LISTEN | FRAME_ISO_ATR | FRAME_ISO_RESPONSE => Some(Self::Listen),
            _ => None,
        }
    }

    /// Capture tool frame type code for this direction.
    pub fn frame_type(&self) -> u32 {
        match self {
            Self::CarrierOff => FRAME_CARRIER_OFF,
            Self::CarrierOn => FRAME_CARRIER_ON,
            Self::Poll => FRAME_POLL,
            Self::Listen => FRAME_LISTEN,
        }
    }
}

bitflags! {
    /// Anomaly markers attached to a captured frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct FrameFlags: u32 {
        const SHORT_FRAME = 0x01;
        const ENCRYPTED = 0x02;
        const TRUNCATED = 0x08;
        const PARITY_ERROR = 0x10;
        const CRC_ERROR = 0x20;
        const SYNC_ERROR = 0x40;
        /// Payload text could not be decoded as hex; the payload is empty.
        const MALFORMED_DATA = 0x100;
    }
}

impl FrameFlags {
    /// Decode the capture tool bitmask, dropping bits that carry no meaning.
    pub fn from_capture(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }

    /// True when any error marker is present.
    pub fn has_error(&self) -> bool {
        self.intersects(
            Self::CRC_ERROR | Self::PARITY_ERROR | Self::SYNC_ERROR | Self::MALFORMED_DATA,
        )
    }
}

/// Tag identifier bytes, kept in wire order.
///
/// NFC-V identifiers travel least significant byte first; `reversed`
/// returns the conventional big-endian view without touching the stored
/// bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TagId(Vec<u8>);

impl TagId {
    pub fn from_wire(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Byte-reversed copy of the identifier.
    pub fn reversed(&self) -> TagId {
        TagId(self.0.iter().rev().copied().collect())
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(&self.0)
    }

    /// Big-endian hex, the form printed on NFC-V tags.
    pub fn to_be_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.reversed().as_bytes())
    }
}

impl From<Idm> for TagId {
    fn from(idm: Idm) -> Self {
        TagId::from_wire(idm.as_bytes())
    }
}

/// IDm - Newtype Pattern (8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Idm([u8; 8]);

impl Idm {
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Idm {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 8] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: 8,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

/// PMm - Newtype Pattern (8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pmm([u8; 8]);

impl Pmm {
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Pmm {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 8] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: 8,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

/// FeliCa system code. Sent most significant byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemCode(u16);

impl SystemCode {
    pub const ANY: Self = Self(0xffff);
    pub const COMMON: Self = Self(0xfe00);
    pub const NDEF: Self = Self(0x12fc);

    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    pub fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

/// One 16-byte FeliCa block as returned by a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockData([u8; 16]);

impl BlockData {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }

    /// Printable view with non-graphic bytes shown as '.'.
    pub fn to_ascii_safe(&self) -> String {
        self.0
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect()
    }
}

impl TryFrom<&[u8]> for BlockData {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: 16,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

/// ATQB answer fields (NFC-B)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atqb {
    pub pupi: TagId,
    pub application_data: [u8; 4],
    pub protocol_info: [u8; 3],
    /// Bytes following the protocol info (extended ATQB)
    pub extra: Vec<u8>,
}

impl Atqb {
    /// Split an ATQB body (without the leading 0x50 and the CRC).
    pub fn from_body(body: &[u8]) -> Option<Self> {
        if body.len() < 11 {
            return None;
        }
        let mut application_data = [0u8; 4];
        application_data.copy_from_slice(&body[4..8]);
        let mut protocol_info = [0u8; 3];
        protocol_info.copy_from_slice(&body[8..11]);
        Some(Self {
            pupi: TagId::from_wire(&body[..4]),
            application_data,
            protocol_info,
            extra: body[11..].to_vec(),
        })
    }

    /// Maximum frame size code (FSCI) from protocol info byte 2.
    pub fn max_frame_size_code(&self) -> u8 {
        self.protocol_info[1] >> 4
    }

    /// True when the PICC declares ISO/IEC 14443-4 compliance.
    pub fn supports_iso_dep(&self) -> bool {
        self.protocol_info[1] & 0x01 != 0
    }
}
