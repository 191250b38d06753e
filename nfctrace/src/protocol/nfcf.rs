// nfctrace/nfctrace/src/protocol/nfcf.rs

//! NFC-F (FeliCa) decoding.
//!
//! Frames are length prefixed: `LEN CMD body... [CRC CRC]`. The declared
//! length is only trusted when it agrees with the captured byte count.
//! Response codes are the request code plus one.

use crate::constants::{
    NFCF_POLLING, NFCF_READ, NFCF_READ_WITHOUT_ENCRYPTION, NFCF_WRITE,
    NFCF_WRITE_WITHOUT_ENCRYPTION,
};
use crate::protocol::checksum::{Checksum, split_tail_exact};
use crate::protocol::parser;
use crate::protocol::tables::{nfcf_request_name, nfcf_response_name};
use crate::types::{BlockData, Direction, Idm, Pmm, SystemCode, TagId};

const BLOCK_LEN: usize = 16;

pub fn decode(data: &[u8], direction: Direction, _request: Option<u8>) -> Option<&'static str> {
    let code = parser::byte_at(data, 1)?;
    match direction {
        Direction::Poll => nfcf_request_name(code),
        Direction::Listen => nfcf_response_name(code),
        Direction::CarrierOn | Direction::CarrierOff => None,
    }
}

/// Locate the body between the command byte and the optional checksum.
///
/// - declared length equals byte count: `data[2..declared]`, no checksum
/// - mismatch with 4 or more bytes: `data[2..len - 2]` plus checksum
/// - otherwise everything after the command byte
pub fn split_body(data: &[u8]) -> Option<(&[u8], Option<Checksum>)> {
    let declared = *data.first()? as usize;
    parser::ensure_len(data, 2)?;
    if declared == data.len() {
        return Some((&data[2..declared], None));
    }
    if data.len() >= 4 {
        let (body, checksum) = split_tail_exact(data);
        return Some((&body[2..], checksum));
    }
    Some((&data[2..], None))
}

/// Fields of a POLLING request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingRequest {
    pub system_code: SystemCode,
    pub request_code: u8,
    pub time_slot: u8,
}

/// Parsed NFC-F poll frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfcFRequest {
    pub declared_len: u8,
    pub command: u8,
    pub idm: Option<Idm>,
    /// Body after the IDm (or the whole body for POLLING)
    pub params: Option<Vec<u8>>,
    pub checksum: Option<Checksum>,
    pub polling: Option<PollingRequest>,
}

impl NfcFRequest {
    pub fn identifier(&self) -> Option<TagId> {
        self.idm.map(TagId::from)
    }
}

pub fn parse_request(data: &[u8]) -> Option<NfcFRequest> {
    let declared_len = *data.first()?;
    let command = parser::byte_at(data, 1)?;
    let (body, checksum) = split_body(data)?;

    let mut request = NfcFRequest {
        declared_len,
        command,
        idm: None,
        params: parser::non_empty(body),
        checksum,
        polling: None,
    };

    if command == NFCF_POLLING {
        request.polling = parse_polling_request(body);
    } else if let Some(idm) = parser::idm_at(body, 0) {
        request.idm = Some(idm);
        request.params = parser::non_empty(&body[8..]);
    }

    Some(request)
}

fn parse_polling_request(body: &[u8]) -> Option<PollingRequest> {
    Some(PollingRequest {
        system_code: SystemCode::new(parser::be_u16_at(body, 0)?),
        request_code: parser::byte_at(body, 2)?,
        time_slot: parser::byte_at(body, 3)?,
    })
}

/// Parsed NFC-F listen frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfcFResponse {
    pub declared_len: u8,
    /// Response code as sent (request code + 1)
    pub command: u8,
    /// Request command supplied as context
    pub request: Option<u8>,
    pub idm: Option<Idm>,
    /// Body after the IDm
    pub body: Option<Vec<u8>>,
    pub checksum: Option<Checksum>,
    pub pmm: Option<Pmm>,
    /// System codes listed after the PMm of a POLLING answer
    pub system_codes: Vec<SystemCode>,
    /// Status flag 1 and 2 of read/write answers
    pub status: Option<(u8, u8)>,
    pub blocks: Vec<BlockData>,
}

impl NfcFResponse {
    pub fn identifier(&self) -> Option<TagId> {
        self.idm.map(TagId::from)
    }

    pub fn is_success(&self) -> bool {
        self.status == Some((0, 0))
    }

    /// First listed system code.
    pub fn system_code(&self) -> Option<SystemCode> {
        self.system_codes.first().copied()
    }
}

/// Parse an NFC-F listen frame. Polling identifiers and status flags are
/// only extracted when `request` is known and matches the response code.
pub fn parse_response(data: &[u8], request: Option<u8>) -> Option<NfcFResponse> {
    let declared_len = *data.first()?;
    let command = parser::byte_at(data, 1)?;
    let (body, checksum) = split_body(data)?;

    let mut response = NfcFResponse {
        declared_len,
        command,
        request,
        idm: parser::idm_at(body, 0),
        body: parser::tail_from(body, 8).and_then(parser::non_empty),
        checksum,
        pmm: None,
        system_codes: Vec::new(),
        status: None,
        blocks: Vec::new(),
    };
    if response.idm.is_none() {
        response.body = parser::non_empty(body);
    }

    let Some(request) = request.filter(|r| r.wrapping_add(1) == command) else {
        return Some(response);
    };

    match request {
        NFCF_POLLING => {
            response.pmm = parser::pmm_at(body, 8);
            response.system_codes = system_codes(body);
        }
        NFCF_READ_WITHOUT_ENCRYPTION | NFCF_READ | NFCF_WRITE_WITHOUT_ENCRYPTION | NFCF_WRITE => {
            response.status = parser::byte_at(body, 8).zip(parser::byte_at(body, 9));
            if response.is_success() && matches!(request, NFCF_READ_WITHOUT_ENCRYPTION | NFCF_READ)
            {
                response.blocks = read_blocks(body);
            }
        }
        _ => {}
    }

    Some(response)
}

/// `IDm(8) PMm(8) code code...`; a dangling odd byte is ignored.
fn system_codes(body: &[u8]) -> Vec<SystemCode> {
    parser::tail_from(body, 16)
        .unwrap_or_default()
        .chunks_exact(2)
        .map(|pair| SystemCode::new(u16::from_be_bytes([pair[0], pair[1]])))
        .collect()
}

/// `IDm(8) status1 status2 count blocks...`; blocks cut short by the
/// capture are left out.
fn read_blocks(body: &[u8]) -> Vec<BlockData> {
    let Some(count) = parser::byte_at(body, 10) else {
        return Vec::new();
    };
    (0..count as usize)
        .map_while(|i| parser::slice_at(body, 11 + i * BLOCK_LEN, BLOCK_LEN))
        .filter_map(|block| BlockData::try_from(block).ok())
        .collect()
}
