#[path = "../common/mod.rs"]
mod common;

use common::fixtures::nfcb_atqb;
use nfctrace::protocol::{CommandDetector, Request, Response, detect};
use nfctrace::test_support::{listen_hex, poll_hex};
use nfctrace::{Frame, Technology};

#[test]
fn reqb_and_wupb() {
    assert_eq!(detect(&poll_hex(0.0, Technology::NfcB, "050000 71ff"), None), Some("REQB"));
    assert_eq!(detect(&poll_hex(0.0, Technology::NfcB, "050008 39e7"), None), Some("WUPB"));
    // the dedicated wake-up byte sits in the slot marker range
    assert_eq!(detect(&poll_hex(0.0, Technology::NfcB, "080000"), None), Some("WUPB"));
}

#[test]
fn atqb_after_wupb() {
    let d = CommandDetector::new();
    let frame = Frame::listen(0.0, Technology::NfcB, &nfcb_atqb());
    assert_eq!(d.detect(&frame, Some(0x08)), Some("ATQB"));
    match d.parse_response(&frame, Some(0x08)) {
        Some(Response::NfcB(resp)) => {
            assert_eq!(resp.kind, Some("ATQB"));
            assert!(resp.atqb.is_some());
        }
        other => panic!("expected NFC-B response, got {:?}", other),
    }
}

#[test]
fn atqb_needs_reqb_context() {
    let frame = Frame::listen(0.0, Technology::NfcB, &nfcb_atqb());
    assert_eq!(detect(&frame, Some(0x05)), Some("ATQB"));

    // without context the first byte only reads as an I-block PCB
    assert_eq!(detect(&frame, None), Some("I_BLOCK"));
    let d = CommandDetector::new().with_iso_dep(false);
    assert_eq!(d.detect(&frame, None), None);
}

#[test]
fn atqb_fields() {
    let d = CommandDetector::new();
    let frame = Frame::listen(0.0, Technology::NfcB, &nfcb_atqb());
    match d.parse_response(&frame, Some(0x05)) {
        Some(Response::NfcB(resp)) => {
            let atqb = resp.atqb.as_ref().unwrap();
            assert_eq!(atqb.pupi.as_bytes(), &[0x12, 0x34, 0x56, 0x78]);
            assert!(atqb.supports_iso_dep());
            assert_eq!(atqb.max_frame_size_code(), 8);
            assert_eq!(resp.checksum, Some([0xaa, 0xbb]));
        }
        other => panic!("expected NFC-B response, got {:?}", other),
    }
}

#[test]
fn attrib_addresses_pupi() {
    common::init_logger();
    let d = CommandDetector::new();
    let frame = poll_hex(0.0, Technology::NfcB, "1d 12345678 00080100 aabb");
    assert_eq!(d.detect(&frame, None), Some("ATTRIB"));
    match d.parse_request(&frame) {
        Some(req @ Request::NfcB(_)) => {
            assert_eq!(req.identifier().unwrap().as_bytes(), &[0x12, 0x34, 0x56, 0x78]);
            assert_eq!(req.params(), Some(&[0x00, 0x08, 0x01, 0x00][..]));
        }
        other => panic!("expected NFC-B request, got {:?}", other),
    }

    let answer = listen_hex(0.0, Technology::NfcB, "00 7856");
    assert_eq!(d.detect(&answer, Some(0x1d)), Some("ATTRIB_RESPONSE"));
}

#[test]
fn slot_markers_and_iso_dep() {
    let d = CommandDetector::new();
    assert_eq!(d.detect(&poll_hex(0.0, Technology::NfcB, "f0"), None), None);
    assert_eq!(d.detect(&poll_hex(0.0, Technology::NfcB, "05"), None), Some("REQB"));
    assert_eq!(d.detect(&poll_hex(0.0, Technology::NfcB, "0a"), None), Some("SLOT_MARKER"));

    // blocks the NFC-B tables do not claim fall through to ISO-DEP
    assert_eq!(d.detect(&poll_hex(0.0, Technology::NfcB, "c2 e0b4"), None), Some("DESELECT"));
    assert_eq!(d.detect(&listen_hex(0.0, Technology::NfcB, "b3"), None), Some("R_NAK"));
}
