// nfctrace/nfctrace/src/protocol/detector.rs

//! Technology dispatch for command classification and structured parsing.
//!
//! The technology decoder always runs first. NFC-A and NFC-B frames it
//! leaves unclassified fall through to the ISO-DEP block layer.

use crate::frame::Frame;
use crate::protocol::isodep::{self, IsoDepBlock};
use crate::protocol::{Request, Response, iso7816, nfca, nfcb, nfcf, nfcv};
use crate::types::{Direction, Technology};

/// Stateless command detector. Response accuracy depends on the caller
/// passing the command byte of the request being answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDetector {
    iso_dep: bool,
}

impl Default for CommandDetector {
    fn default() -> Self {
        Self { iso_dep: true }
    }
}

impl CommandDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the ISO-DEP block fallback.
    pub fn with_iso_dep(mut self, enabled: bool) -> Self {
        self.iso_dep = enabled;
        self
    }

    pub fn iso_dep(&self) -> bool {
        self.iso_dep
    }

    /// Best-effort command name for `frame`.
    pub fn detect(&self, frame: &Frame, request: Option<u8>) -> Option<&'static str> {
        if frame.is_empty() || frame.is_carrier() {
            return None;
        }
        let data = frame.payload();
        let direction = frame.direction();
        let name = match frame.technology() {
            Technology::NfcA => nfca::decode(data, direction, request),
            Technology::NfcB => nfcb::decode(data, direction, request),
            Technology::NfcF => nfcf::decode(data, direction, request),
            Technology::NfcV => nfcv::decode(data, direction, request),
            Technology::Iso7816 => iso7816::decode(data, direction, request),
            Technology::Unknown => None,
        }
        .or_else(|| self.overlay(frame).and_then(isodep::decode));

        log::trace!(
            "{} {} {:02x?} (request {:02x?}) -> {:?}",
            frame.technology(),
            direction,
            data,
            request,
            name
        );
        name
    }

    /// Detect and store the command name on the frame. Returns the name the
    /// frame carries afterwards, which is the earlier one if it was already
    /// annotated.
    pub fn annotate(&self, frame: &mut Frame, request: Option<u8>) -> Option<&'static str> {
        if frame.decoded_command().is_none() {
            if let Some(name) = self.detect(frame, request) {
                frame.annotate(name);
            }
        }
        frame.decoded_command()
    }

    /// Parse a poll frame into the request family of its technology.
    pub fn parse_request(&self, frame: &Frame) -> Option<Request> {
        if !frame.is_poll() || frame.is_empty() {
            return None;
        }
        let data = frame.payload();
        if let Some(block) = self.overlay_block(frame, None) {
            return Some(Request::IsoDep {
                technology: frame.technology(),
                block,
            });
        }
        match frame.technology() {
            Technology::NfcA => nfca::parse_request(data).map(Request::NfcA),
            Technology::NfcB => nfcb::parse_request(data).map(Request::NfcB),
            Technology::NfcF => nfcf::parse_request(data).map(Request::NfcF),
            Technology::NfcV => nfcv::parse_request(data).map(Request::NfcV),
            Technology::Iso7816 => iso7816::parse_request(data).map(Request::Iso7816),
            Technology::Unknown => None,
        }
    }

    /// Parse a listen frame into the response family of its technology.
    pub fn parse_response(&self, frame: &Frame, request: Option<u8>) -> Option<Response> {
        if !frame.is_listen() || frame.is_empty() {
            return None;
        }
        let data = frame.payload();
        if let Some(block) = self.overlay_block(frame, request) {
            return Some(Response::IsoDep {
                technology: frame.technology(),
                block,
            });
        }
        match frame.technology() {
            Technology::NfcA => nfca::parse_response(data, request).map(Response::NfcA),
            Technology::NfcB => nfcb::parse_response(data, request).map(Response::NfcB),
            Technology::NfcF => nfcf::parse_response(data, request).map(Response::NfcF),
            Technology::NfcV => nfcv::parse_response(data, request).map(Response::NfcV),
            Technology::Iso7816 => iso7816::parse_response(data, request).map(Response::Iso7816),
            Technology::Unknown => None,
        }
    }

    /// Payload eligible for the ISO-DEP layer.
    fn overlay<'a>(&self, frame: &'a Frame) -> Option<&'a [u8]> {
        let eligible = self.iso_dep
            && frame.technology().carries_iso_dep()
            && matches!(frame.direction(), Direction::Poll | Direction::Listen);
        eligible.then(|| frame.payload())
    }

    /// ISO-DEP block for frames the technology decoder does not claim.
    fn overlay_block(&self, frame: &Frame, request: Option<u8>) -> Option<IsoDepBlock> {
        let data = self.overlay(frame)?;
        let claimed = match frame.technology() {
            Technology::NfcA => nfca::decode(data, frame.direction(), request),
            Technology::NfcB => nfcb::decode(data, frame.direction(), request),
            _ => return None,
        };
        if claimed.is_some() {
            return None;
        }
        IsoDepBlock::parse(data)
    }
}

/// Classify `frame` with the default detector.
pub fn detect(frame: &Frame, request: Option<u8>) -> Option<&'static str> {
    CommandDetector::default().detect(frame, request)
}
