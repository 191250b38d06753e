// nfctrace/nfctrace/src/frame.rs

use crate::types::{Direction, FrameFlags, Technology};

/// One captured event: a poll or listen frame, or a carrier transition.
///
/// All fields are fixed at construction. The only mutable slot is the
/// decoded command annotation, which can be written once.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Frame {
    timestamp: f64,
    time_end: f64,
    technology: Technology,
    direction: Direction,
    payload: Vec<u8>,
    flags: FrameFlags,
    rate: Option<u32>,
    decoded_command: Option<&'static str>,
}

impl Frame {
    pub fn new(
        timestamp: f64,
        technology: Technology,
        direction: Direction,
        payload: Vec<u8>,
    ) -> Self {
        // carrier transitions never carry bytes
        let payload = match direction {
            Direction::CarrierOn | Direction::CarrierOff => Vec::new(),
            _ => payload,
        };
        Self {
            timestamp,
            time_end: timestamp,
            technology,
            direction,
            payload,
            flags: FrameFlags::empty(),
            rate: None,
            decoded_command: None,
        }
    }

    pub fn poll(timestamp: f64, technology: Technology, payload: &[u8]) -> Self {
        Self::new(timestamp, technology, Direction::Poll, payload.to_vec())
    }

    pub fn listen(timestamp: f64, technology: Technology, payload: &[u8]) -> Self {
        Self::new(timestamp, technology, Direction::Listen, payload.to_vec())
    }

    pub fn carrier(timestamp: f64, on: bool) -> Self {
        let direction = if on {
            Direction::CarrierOn
        } else {
            Direction::CarrierOff
        };
        Self::new(timestamp, Technology::Unknown, direction, Vec::new())
    }

    /// Set the end of the frame on the capture timeline. Values before the
    /// start are clamped to the start.
    pub fn with_time_end(mut self, time_end: f64) -> Self {
        self.time_end = time_end.max(self.timestamp);
        self
    }

    pub fn with_flags(mut self, flags: FrameFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_rate(mut self, rate: u32) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    pub fn time_end(&self) -> f64 {
        self.time_end
    }

    /// Air time of the frame.
    pub fn duration(&self) -> f64 {
        self.time_end - self.timestamp
    }

    pub fn technology(&self) -> Technology {
        self.technology
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn flags(&self) -> FrameFlags {
        self.flags
    }

    pub fn rate(&self) -> Option<u32> {
        self.rate
    }

    /// Actual byte count. Length fields inside the payload are never
    /// consulted.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn is_poll(&self) -> bool {
        self.direction == Direction::Poll
    }

    pub fn is_listen(&self) -> bool {
        self.direction == Direction::Listen
    }

    pub fn is_carrier(&self) -> bool {
        matches!(
            self.direction,
            Direction::CarrierOn | Direction::CarrierOff
        )
    }

    /// Byte holding the command code for this frame's technology: offset 0
    /// for NFC-A/B, offset 1 for NFC-F (after the length byte), NFC-V (after
    /// the flags byte) and ISO 7816 T=1 (the PCB after the NAD).
    pub fn command_byte(&self) -> Option<u8> {
        let offset = match self.technology {
            Technology::NfcA | Technology::NfcB => 0,
            Technology::NfcF | Technology::NfcV | Technology::Iso7816 => 1,
            Technology::Unknown => return None,
        };
        self.payload.get(offset).copied()
    }

    pub fn decoded_command(&self) -> Option<&'static str> {
        self.decoded_command
    }

    /// Record the decoded command. Returns false and keeps the existing
    /// value when the frame was already annotated.
    pub fn annotate(&mut self, command: &'static str) -> bool {
        if self.decoded_command.is_some() {
            return false;
        }
        self.decoded_command = Some(command);
        true
    }
}
