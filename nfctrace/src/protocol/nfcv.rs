// nfctrace/nfctrace/src/protocol/nfcv.rs

//! NFC-V (ISO/IEC 15693) decoding.
//!
//! Requests are `flags cmd ...`, responses are `flags ...` and never repeat
//! the command. Identifiers are little endian on the wire.

use crate::constants::{NFCV_GET_SYSTEM_INFO, NFCV_INVENTORY};
use crate::protocol::checksum::{Checksum, split_tail};
use crate::protocol::tables::{NFCV_COMMANDS, NFCV_ERRORS, lookup};
use crate::protocol::{PollRule, parser};
use crate::types::{Direction, TagId};

const UID_LEN: usize = 8;

/// Request/response flags byte. Bits 4 and 5 change meaning with the
/// inventory bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NfcVFlags(u8);

impl NfcVFlags {
    pub const SUBCARRIER: u8 = 0x01;
    pub const ERROR: u8 = 0x01;
    pub const DATA_RATE: u8 = 0x02;
    pub const INVENTORY: u8 = 0x04;
    pub const PROTOCOL_EXTENSION: u8 = 0x08;
    pub const AFI: u8 = 0x10;
    pub const SELECT: u8 = 0x10;
    pub const ONE_SLOT: u8 = 0x20;
    pub const ADDRESSED: u8 = 0x20;
    pub const OPTION: u8 = 0x40;

    pub fn new(bits: u8) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    fn is_set(&self, mask: u8) -> bool {
        self.0 & mask != 0
    }

    /// Two subcarriers requested (request only).
    pub fn dual_subcarrier(&self) -> bool {
        self.is_set(Self::SUBCARRIER)
    }

    /// Error flag (response only).
    pub fn is_error(&self) -> bool {
        self.is_set(Self::ERROR)
    }

    pub fn high_data_rate(&self) -> bool {
        self.is_set(Self::DATA_RATE)
    }

    pub fn is_inventory(&self) -> bool {
        self.is_set(Self::INVENTORY)
    }

    pub fn protocol_extension(&self) -> bool {
        self.is_set(Self::PROTOCOL_EXTENSION)
    }

    pub fn afi_present(&self) -> bool {
        self.is_inventory() && self.is_set(Self::AFI)
    }

    pub fn one_slot(&self) -> bool {
        self.is_inventory() && self.is_set(Self::ONE_SLOT)
    }

    pub fn is_selected(&self) -> bool {
        !self.is_inventory() && self.is_set(Self::SELECT)
    }

    pub fn is_addressed(&self) -> bool {
        !self.is_inventory() && self.is_set(Self::ADDRESSED)
    }

    pub fn option(&self) -> bool {
        self.is_set(Self::OPTION)
    }
}

pub const POLL_RULES: &[PollRule] = &[inventory, table_command, custom_range];

/// INVENTORY is only recognised when the frame holds the whole mask.
pub fn inventory(data: &[u8]) -> Option<&'static str> {
    if parser::byte_at(data, 1)? != NFCV_INVENTORY {
        return None;
    }
    let (body, _) = split_tail(data);
    inventory_fields(body).map(|_| "INVENTORY")
}

pub fn table_command(data: &[u8]) -> Option<&'static str> {
    let code = parser::byte_at(data, 1)?;
    if code == NFCV_INVENTORY {
        return None;
    }
    lookup(NFCV_COMMANDS, code)
}

pub fn custom_range(data: &[u8]) -> Option<&'static str> {
    range_name(parser::byte_at(data, 1)?)
}

fn range_name(code: u8) -> Option<&'static str> {
    match code {
        0xA0..=0xDF => Some("CUSTOM"),
        0xE0..=0xFF => Some("PROPRIETARY"),
        _ => None,
    }
}

/// Name of an error code, `None` for codes outside the table.
pub fn error_name(code: u8) -> Option<&'static str> {
    lookup(NFCV_ERRORS, code)
}

/// Name of a request command code without looking at the frame layout.
pub fn command_name(code: u8) -> Option<&'static str> {
    lookup(NFCV_COMMANDS, code).or_else(|| range_name(code))
}

pub fn decode(data: &[u8], direction: Direction, request: Option<u8>) -> Option<&'static str> {
    let flags = NfcVFlags::new(*data.first()?);
    match direction {
        Direction::Poll => POLL_RULES.iter().find_map(|rule| rule(data)),
        Direction::Listen if flags.is_error() => Some("ERROR"),
        Direction::Listen => command_name(request?),
        Direction::CarrierOn | Direction::CarrierOff => None,
    }
}

struct InventoryFields<'a> {
    afi: Option<u8>,
    mask_length_bits: u8,
    mask: &'a [u8],
    rest: &'a [u8],
}

/// `flags 01 [afi] mask_len mask...` with the checksum already removed.
fn inventory_fields(body: &[u8]) -> Option<InventoryFields<'_>> {
    let flags = NfcVFlags::new(*body.first()?);
    let mut offset = 2;
    let afi = if flags.afi_present() {
        let afi = parser::byte_at(body, offset)?;
        offset += 1;
        Some(afi)
    } else {
        None
    };
    let mask_length_bits = parser::byte_at(body, offset)?;
    offset += 1;
    let mask = parser::slice_at(body, offset, mask_bytes(mask_length_bits))?;
    Some(InventoryFields {
        afi,
        mask_length_bits,
        mask,
        rest: &body[offset + mask.len()..],
    })
}

fn mask_bytes(bits: u8) -> usize {
    (bits as usize).div_ceil(8)
}

/// Parsed NFC-V poll frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfcVRequest {
    pub flags: NfcVFlags,
    pub command: u8,
    pub identifier: Option<TagId>,
    pub afi: Option<u8>,
    pub mask_length_bits: Option<u8>,
    pub mask: Option<Vec<u8>>,
    pub params: Option<Vec<u8>>,
    pub checksum: Option<Checksum>,
    /// Non-inventory request with neither Select nor Addressed set
    pub likely_unanswerable: bool,
}

impl NfcVRequest {
    pub fn mask_length_bytes(&self) -> Option<usize> {
        self.mask_length_bits.map(mask_bytes)
    }
}

/// Parse an NFC-V poll frame. Inventory frames too short for their
/// declared mask are rejected.
pub fn parse_request(data: &[u8]) -> Option<NfcVRequest> {
    let flags = NfcVFlags::new(*data.first()?);
    let command = parser::byte_at(data, 1)?;
    let (body, checksum) = split_tail(data);

    let mut request = NfcVRequest {
        flags,
        command,
        identifier: None,
        afi: None,
        mask_length_bits: None,
        mask: None,
        params: None,
        checksum,
        likely_unanswerable: false,
    };

    if command == NFCV_INVENTORY {
        let fields = inventory_fields(body)?;
        request.afi = fields.afi;
        request.mask_length_bits = Some(fields.mask_length_bits);
        request.mask = Some(fields.mask.to_vec());
        request.params = parser::non_empty(fields.rest);
        return Some(request);
    }

    let mut offset = 2;
    if flags.is_addressed() {
        if let Some(uid) = parser::tag_id_at(body, offset, UID_LEN) {
            request.identifier = Some(uid);
            offset += UID_LEN;
        }
    }
    request.params = parser::tail_from(body, offset).and_then(parser::non_empty);
    request.likely_unanswerable =
        !flags.is_inventory() && !flags.is_selected() && !flags.is_addressed();
    Some(request)
}

/// GET_SYSTEM_INFO answer fields. Optional members follow the identifier
/// in info flag order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub info_flags: u8,
    pub identifier: TagId,
    pub dsfid: Option<u8>,
    pub afi: Option<u8>,
    /// Number of blocks (stored minus one on the wire, reported as is)
    pub block_count: Option<u8>,
    pub block_size: Option<u8>,
    pub ic_reference: Option<u8>,
}

impl SystemInfo {
    fn parse(payload: &[u8]) -> Option<Self> {
        let info_flags = *payload.first()?;
        let identifier = parser::tag_id_at(payload, 1, UID_LEN)?;
        let mut offset = 1 + UID_LEN;
        let dsfid = optional_field(payload, &mut offset, info_flags & 0x01 != 0, 1).map(|b| b[0]);
        let afi = optional_field(payload, &mut offset, info_flags & 0x02 != 0, 1).map(|b| b[0]);
        let memory = optional_field(payload, &mut offset, info_flags & 0x04 != 0, 2);
        let ic_reference =
            optional_field(payload, &mut offset, info_flags & 0x08 != 0, 1).map(|b| b[0]);
        Some(Self {
            info_flags,
            identifier,
            dsfid,
            afi,
            block_count: memory.map(|m| m[0]),
            block_size: memory.map(|m| (m[1] & 0x1F) + 1),
            ic_reference,
        })
    }
}

fn optional_field<'a>(
    payload: &'a [u8],
    offset: &mut usize,
    present: bool,
    width: usize,
) -> Option<&'a [u8]> {
    if !present {
        return None;
    }
    let field = parser::slice_at(payload, *offset, width)?;
    *offset += width;
    Some(field)
}

/// Parsed NFC-V listen frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfcVResponse {
    pub flags: NfcVFlags,
    /// Request command supplied as context
    pub command: Option<u8>,
    pub error_code: Option<u8>,
    pub payload: Option<Vec<u8>>,
    pub checksum: Option<Checksum>,
    pub dsfid: Option<u8>,
    pub identifier: Option<TagId>,
    pub system_info: Option<SystemInfo>,
}

impl NfcVResponse {
    pub fn error_name(&self) -> Option<&'static str> {
        self.error_code.and_then(error_name)
    }
}

pub fn parse_response(data: &[u8], request: Option<u8>) -> Option<NfcVResponse> {
    let flags = NfcVFlags::new(*data.first()?);
    let (body, checksum) = split_tail(data);

    let mut response = NfcVResponse {
        flags,
        command: request,
        error_code: None,
        payload: None,
        checksum,
        dsfid: None,
        identifier: None,
        system_info: None,
    };

    if flags.is_error() {
        response.error_code = parser::byte_at(body, 1);
        return Some(response);
    }

    let payload = &body[1..];
    response.payload = parser::non_empty(payload);

    match request {
        Some(NFCV_INVENTORY) => match payload.len() {
            9 => {
                response.dsfid = Some(payload[0]);
                response.identifier = Some(TagId::from_wire(&payload[1..]));
            }
            UID_LEN => response.identifier = Some(TagId::from_wire(payload)),
            _ => {}
        },
        Some(NFCV_GET_SYSTEM_INFO) => {
            response.system_info = SystemInfo::parse(payload);
            response.identifier = response.system_info.as_ref().map(|i| i.identifier.clone());
            response.dsfid = response.system_info.as_ref().and_then(|i| i.dsfid);
        }
        _ => {}
    }

    Some(response)
}
