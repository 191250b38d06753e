// nfctrace/nfctrace/src/protocol/nfcb.rs

//! NFC-B (ISO/IEC 14443-3B) decoding.

use crate::constants::{NFCB_ATQB, NFCB_ATTRIB, NFCB_HLTB, NFCB_REQB, NFCB_WUPB};
use crate::protocol::checksum::{Checksum, split_tail};
use crate::protocol::tables::{NFCB_COMMANDS, lookup};
use crate::protocol::{ListenRule, PollRule, parser};
use crate::types::{Atqb, Direction, TagId};

/// REQB parameter bit selecting the wake-up variant.
const WUPB_BIT: u8 = 0x08;

pub const POLL_RULES: &[PollRule] = &[table_command, slot_marker];

pub const LISTEN_RULES: &[ListenRule] = &[answer_to_request, attrib_answer, halt_answer];

/// Table lookup with REQB refined to WUPB.
pub fn table_command(data: &[u8]) -> Option<&'static str> {
    let name = lookup(NFCB_COMMANDS, *data.first()?)?;
    if data[0] == NFCB_REQB && is_wakeup(data) {
        Some("WUPB")
    } else {
        Some(name)
    }
}

/// Slot markers only exist on the reader side. Table commands in the same
/// range (WUPB) are matched first.
pub fn slot_marker(data: &[u8]) -> Option<&'static str> {
    match data.first()? {
        0x00..=0x0F => Some("SLOT_MARKER"),
        _ => None,
    }
}

pub fn answer_to_request(data: &[u8], request: u8) -> Option<&'static str> {
    if matches!(request, NFCB_REQB | NFCB_WUPB) && data.first() == Some(&NFCB_ATQB) {
        Some("ATQB")
    } else {
        None
    }
}

pub fn attrib_answer(_data: &[u8], request: u8) -> Option<&'static str> {
    (request == NFCB_ATTRIB).then_some("ATTRIB_RESPONSE")
}

pub fn halt_answer(_data: &[u8], request: u8) -> Option<&'static str> {
    (request == NFCB_HLTB).then_some("HLTB_RESPONSE")
}

fn is_wakeup(data: &[u8]) -> bool {
    parser::byte_at(data, 2).is_some_and(|param| param & WUPB_BIT != 0)
}

pub fn decode(data: &[u8], direction: Direction, request: Option<u8>) -> Option<&'static str> {
    if data.is_empty() {
        return None;
    }
    match direction {
        Direction::Poll => POLL_RULES.iter().find_map(|rule| rule(data)),
        Direction::Listen => {
            let request = request?;
            LISTEN_RULES.iter().find_map(|rule| rule(data, request))
        }
        Direction::CarrierOn | Direction::CarrierOff => None,
    }
}

/// Parsed NFC-B poll frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfcBRequest {
    pub command: u8,
    /// AFI of REQB/WUPB
    pub afi: Option<u8>,
    /// PUPI addressed by ATTRIB/HLTB
    pub identifier: Option<TagId>,
    pub params: Option<Vec<u8>>,
    pub checksum: Option<Checksum>,
}

impl NfcBRequest {
    pub fn is_wakeup(&self) -> bool {
        let param_bit = self
            .params
            .as_deref()
            .and_then(|p| p.get(1))
            .is_some_and(|param| param & WUPB_BIT != 0);
        self.command == NFCB_WUPB || (self.command == NFCB_REQB && param_bit)
    }
}

pub fn parse_request(data: &[u8]) -> Option<NfcBRequest> {
    let command = *data.first()?;
    let (body, checksum) = split_tail(data);
    let params = parser::tail_from(body, 1)?;
    let mut request = NfcBRequest {
        command,
        afi: None,
        identifier: None,
        params: parser::non_empty(params),
        checksum,
    };
    match command {
        NFCB_REQB | NFCB_WUPB => request.afi = parser::byte_at(body, 1),
        NFCB_ATTRIB | NFCB_HLTB => {
            request.identifier = parser::tag_id_at(body, 1, 4);
            request.params = parser::tail_from(body, 5).and_then(parser::non_empty);
        }
        _ => {}
    }
    Some(request)
}

/// Parsed NFC-B listen frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfcBResponse {
    /// First byte of the response
    pub code: u8,
    /// Command that solicited this response, when known
    pub command: Option<u8>,
    pub kind: Option<&'static str>,
    /// Bytes between the first byte and the checksum
    pub body: Option<Vec<u8>>,
    pub checksum: Option<Checksum>,
    pub atqb: Option<Atqb>,
}

impl NfcBResponse {
    pub fn identifier(&self) -> Option<&TagId> {
        self.atqb.as_ref().map(|atqb| &atqb.pupi)
    }
}

pub fn parse_response(data: &[u8], request: Option<u8>) -> Option<NfcBResponse> {
    let code = *data.first()?;
    let (body, checksum) = split_tail(data);
    let body = parser::tail_from(body, 1)?;
    let kind = decode(data, Direction::Listen, request);
    let atqb = if kind == Some("ATQB") {
        Atqb::from_body(body)
    } else {
        None
    };
    Some(NfcBResponse {
        code,
        command: request,
        kind,
        body: parser::non_empty(body),
        checksum,
        atqb,
    })
}
