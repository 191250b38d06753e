//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize frame construction from hex so tests and
//! benches across the crate and tests/ directory share the same logic.
#![allow(dead_code)]

use crate::frame::Frame;
use crate::types::{Direction, Technology};
use crate::utils::parse_hex;

/// Decode a hex literal used in a test. Panics on invalid input.
#[doc(hidden)]
pub fn hex(s: &str) -> Vec<u8> {
    parse_hex(s).unwrap_or_else(|e| panic!("bad hex literal {:?}: {}", s, e))
}

#[doc(hidden)]
pub fn poll_hex(timestamp: f64, technology: Technology, payload: &str) -> Frame {
    Frame::poll(timestamp, technology, &hex(payload))
}

#[doc(hidden)]
pub fn listen_hex(timestamp: f64, technology: Technology, payload: &str) -> Frame {
    Frame::listen(timestamp, technology, &hex(payload))
}

/// Build a frame sequence from `(timestamp, technology, direction, hex)`
/// rows.
#[doc(hidden)]
pub fn script(rows: &[(f64, Technology, Direction, &str)]) -> Vec<Frame> {
    rows.iter()
        .map(|&(t, tech, direction, payload)| Frame::new(t, tech, direction, hex(payload)))
        .collect()
}

/// A typical NFC-A activation: REQA, anticollision, select, RATS and one
/// APDU exchange, 1 ms apart.
#[doc(hidden)]
pub fn nfca_activation() -> Vec<Frame> {
    use Direction::{Listen, Poll};
    use Technology::NfcA;
    script(&[
        (0.000, NfcA, Poll, "26"),
        (0.0005, NfcA, Listen, "0400"),
        (0.001, NfcA, Poll, "9320"),
        (0.0015, NfcA, Listen, "01020304 04"),
        (0.002, NfcA, Poll, "9370 01020304 04 aabb"),
        (0.0025, NfcA, Listen, "20 fc70"),
        (0.003, NfcA, Poll, "e080 3173"),
        (0.0035, NfcA, Listen, "0578807002 a546"),
        (0.004, NfcA, Poll, "02 00a4040007d2760000850101 00 1234"),
        (0.0045, NfcA, Listen, "02 9000 f109"),
        (0.005, NfcA, Poll, "c2 e0b4"),
        (0.0055, NfcA, Listen, "c2 e0b4"),
    ])
}
