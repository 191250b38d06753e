// nfctrace/nfctrace/src/protocol/nfca.rs

//! NFC-A (ISO/IEC 14443-3A) command classification and field extraction.
//!
//! The command byte sits at offset 0. Several bytes carry more than one
//! meaning, so poll frames run through `POLL_RULES` in order and the plain
//! table lookup comes last.

use crate::constants::*;
use crate::protocol::checksum::{Checksum, split_tail, split_tail_exact};
use crate::protocol::tables::{NFCA_COMMANDS, lookup};
use crate::protocol::{ListenRule, PollRule, parser};
use crate::types::{Direction, TagId};

/// Frame size for each FSDI/FSCI code.
const FRAME_SIZES: [u16; 16] = [16, 24, 32, 40, 48, 64, 96, 128, 256, 0, 0, 0, 0, 0, 0, 0];

const SELECT_NAMES: [&str; 3] = ["SELECT1", "SELECT2", "SELECT3"];
const ANTICOLLISION_NAMES: [&str; 3] = ["ANTICOLLISION1", "ANTICOLLISION2", "ANTICOLLISION3"];
const SEL_NAMES: [&str; 3] = ["SEL1", "SEL2", "SEL3"];

/// Poll classification, evaluated top to bottom.
pub const POLL_RULES: &[PollRule] = &[
    halt,
    parameter_selection,
    cascade,
    auth_or_version,
    page_write,
    table_command,
];

/// Listen classification given the command of the soliciting poll.
pub const LISTEN_RULES: &[ListenRule] = &[
    answer_to_request,
    cascade_answer,
    answer_to_select,
    pps_answer,
];

/// HLTA is `50 00`. A lone `0x50` or one followed by other bytes is left
/// unclassified (it is also the NFC-B HLTB byte).
pub fn halt(data: &[u8]) -> Option<&'static str> {
    match data {
        [NFCA_HLTA, 0x00, ..] => Some("HLTA"),
        _ => None,
    }
}

pub fn parameter_selection(data: &[u8]) -> Option<&'static str> {
    if data.len() >= 2 && data[0] & NFCA_PPS_MASK == NFCA_PPS {
        Some("PPS")
    } else {
        None
    }
}

/// SELECT / ANTICOLLISION / ambiguous SEL for the three cascade levels,
/// decided by the NVB byte. A cascade byte without NVB is not classified.
pub fn cascade(data: &[u8]) -> Option<&'static str> {
    let level = cascade_level(*data.first()?)?;
    match *data.get(1)? {
        NFCA_NVB_SELECT => Some(SELECT_NAMES[level]),
        nvb if nvb & 0xF0 == 0x20 => Some(ANTICOLLISION_NAMES[level]),
        _ => Some(SEL_NAMES[level]),
    }
}

/// `0x60` is AUTH_A when more than two bytes remain once the checksum tail
/// is split off, GET_VERSION otherwise.
pub fn auth_or_version(data: &[u8]) -> Option<&'static str> {
    if *data.first()? != NFCA_AUTH_A {
        return None;
    }
    let (body, _) = split_tail(data);
    if body.len() > 2 {
        Some("AUTH_A")
    } else {
        Some("GET_VERSION")
    }
}

/// Page write: `A2 page d0 d1 d2 d3 [crc crc]`. Shorter `0xA2` frames are
/// left for the ISO-DEP R(ACK) interpretation.
pub fn page_write(data: &[u8]) -> Option<&'static str> {
    if data.len() >= 6 && data[0] == NFCA_WRITE {
        Some("WRITE")
    } else {
        None
    }
}

pub fn table_command(data: &[u8]) -> Option<&'static str> {
    lookup(NFCA_COMMANDS, *data.first()?)
}

pub fn answer_to_request(data: &[u8], request: u8) -> Option<&'static str> {
    if matches!(request, NFCA_REQA | NFCA_WUPA) && data.len() == 2 {
        Some("ATQA")
    } else {
        None
    }
}

/// Replies to cascade commands are told apart by length alone.
pub fn cascade_answer(data: &[u8], request: u8) -> Option<&'static str> {
    cascade_level(request)?;
    match data.len() {
        3 => Some("SAK"),
        5 => Some("UID"),
        _ => None,
    }
}

/// ATS after RATS: the TL byte counts the ATS bytes without the CRC.
pub fn answer_to_select(data: &[u8], request: u8) -> Option<&'static str> {
    if request != NFCA_RATS {
        return None;
    }
    let tl = *data.first()? as usize;
    if tl == data.len() || tl + CHECKSUM_LEN == data.len() {
        Some("ATS")
    } else {
        None
    }
}

pub fn pps_answer(data: &[u8], request: u8) -> Option<&'static str> {
    if request & NFCA_PPS_MASK == NFCA_PPS && !data.is_empty() {
        Some("PPS_RESPONSE")
    } else {
        None
    }
}

/// Zero-based cascade level for SEL1/SEL2/SEL3 command bytes.
pub fn cascade_level(command: u8) -> Option<usize> {
    match command {
        NFCA_SEL1 => Some(0),
        NFCA_SEL2 => Some(1),
        NFCA_SEL3 => Some(2),
        _ => None,
    }
}

/// Classify an NFC-A frame. Listen frames need the soliciting command.
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

/// RATS parameter byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rats {
    pub fsdi: u8,
    pub cid: u8,
}

impl Rats {
    pub fn from_param(param: u8) -> Self {
        Self {
            fsdi: param >> 4,
            cid: param & 0x0F,
        }
    }

    /// Maximum frame size the reader accepts, 0 for reserved codes.
    pub fn frame_size(&self) -> u16 {
        FRAME_SIZES[self.fsdi as usize]
    }
}

/// Answer To Select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ats {
    pub tl: u8,
    pub t0: Option<u8>,
    pub ta: Option<u8>,
    pub tb: Option<u8>,
    pub tc: Option<u8>,
    pub historical: Vec<u8>,
}

impl Ats {
    /// Parse the ATS bytes without the CRC. Interface bytes announced in
    /// T0 but missing from the frame are left as `None`.
    pub fn parse(body: &[u8]) -> Option<Self> {
        let tl = *body.first()?;
        let end = (tl as usize).min(body.len());
        let mut ats = Self {
            tl,
            t0: None,
            ta: None,
            tb: None,
            tc: None,
            historical: Vec::new(),
        };
        if end < 2 {
            return Some(ats);
        }
        let t0 = body[1];
        ats.t0 = Some(t0);
        let mut offset = 2;
        for (mask, slot) in [(0x10, &mut ats.ta), (0x20, &mut ats.tb), (0x40, &mut ats.tc)] {
            if t0 & mask != 0 && offset < end {
                *slot = Some(body[offset]);
                offset += 1;
            }
        }
        ats.historical = body[offset..end].to_vec();
        Some(ats)
    }

    /// Maximum frame size the card accepts.
    pub fn frame_size(&self) -> Option<u16> {
        self.t0.map(|t0| FRAME_SIZES[(t0 & 0x0F) as usize])
    }

    /// Frame waiting time integer from TB.
    pub fn fwi(&self) -> Option<u8> {
        self.tb.map(|tb| tb >> 4)
    }

    /// Start-up frame guard time integer from TB.
    pub fn sfgi(&self) -> Option<u8> {
        self.tb.map(|tb| tb & 0x0F)
    }

    pub fn supports_cid(&self) -> bool {
        self.tc.is_some_and(|tc| tc & 0x02 != 0)
    }

    pub fn supports_nad(&self) -> bool {
        self.tc.is_some_and(|tc| tc & 0x01 != 0)
    }
}

/// Parsed NFC-A poll frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfcARequest {
    pub command: u8,
    /// NVB byte of cascade commands
    pub nvb: Option<u8>,
    /// UID CLn bytes of SELECT, partial UID bits of ANTICOLLISION
    pub identifier: Option<TagId>,
    pub params: Option<Vec<u8>>,
    pub checksum: Option<Checksum>,
    pub rats: Option<Rats>,
}

/// Parse an NFC-A poll frame.
pub fn parse_request(data: &[u8]) -> Option<NfcARequest> {
    let command = *data.first()?;
    let (body, checksum) = split_tail(data);
    let mut request = NfcARequest {
        command,
        nvb: None,
        identifier: None,
        params: parser::non_empty(parser::tail_from(body, 1)?),
        checksum,
        rats: None,
    };

    if cascade_level(command).is_some() {
        let nvb = parser::byte_at(body, 1);
        request.nvb = nvb;
        request.params = None;
        if nvb == Some(NFCA_NVB_SELECT) {
            // UID CLn (4, possibly starting with the cascade tag) + BCC
            request.identifier = parser::tag_id_at(body, 2, 4);
            request.params = parser::tail_from(body, 6).and_then(parser::non_empty);
        } else {
            request.identifier = parser::tail_from(body, 2)
                .filter(|uid| !uid.is_empty())
                .map(TagId::from_wire);
        }
    } else if command == NFCA_RATS {
        request.rats = parser::byte_at(body, 1).map(Rats::from_param);
    }

    Some(request)
}

/// Parsed NFC-A listen frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfcAResponse {
    /// Command that solicited this response, when known
    pub command: Option<u8>,
    pub kind: Option<&'static str>,
    pub identifier: Option<TagId>,
    pub body: Option<Vec<u8>>,
    pub checksum: Option<Checksum>,
    pub sak: Option<u8>,
    pub ats: Option<Ats>,
}

impl NfcAResponse {
    /// SAK bit 5: the card speaks ISO/IEC 14443-4.
    pub fn is_iso_dep_compliant(&self) -> bool {
        self.sak.is_some_and(|sak| sak & 0x20 != 0)
    }

    /// SAK bit 2: another cascade level follows.
    pub fn uid_incomplete(&self) -> bool {
        self.sak.is_some_and(|sak| sak & 0x04 != 0)
    }

    /// True when the UID part starts with the cascade tag.
    pub fn has_cascade_tag(&self) -> bool {
        self.identifier
            .as_ref()
            .is_some_and(|id| id.as_bytes().first() == Some(&NFCA_CASCADE_TAG))
    }
}

/// Parse an NFC-A listen frame. Without `request` only the generic body /
/// checksum split is available.
pub fn parse_response(data: &[u8], request: Option<u8>) -> Option<NfcAResponse> {
    if data.is_empty() {
        return None;
    }
    let kind = decode(data, Direction::Listen, request);
    let mut response = NfcAResponse {
        command: request,
        kind,
        identifier: None,
        body: None,
        checksum: None,
        sak: None,
        ats: None,
    };

    match kind {
        Some("UID") => {
            // UID CLn + BCC, sent without CRC
            response.identifier = parser::tag_id_at(data, 0, 4);
            response.body = parser::non_empty(&data[4..]);
        }
        Some("SAK") => {
            let (body, checksum) = split_tail_exact(data);
            response.sak = body.first().copied();
            response.body = parser::non_empty(body);
            response.checksum = checksum;
        }
        Some("ATS") => {
            let (body, checksum) = if data[0] as usize == data.len() {
                (data, None)
            } else {
                split_tail_exact(data)
            };
            response.ats = Ats::parse(body);
            response.body = parser::non_empty(body);
            response.checksum = checksum;
        }
        _ => {
            let (body, checksum) = split_tail(data);
            response.body = parser::non_empty(body);
            response.checksum = checksum;
        }
    }

    Some(response)
}
