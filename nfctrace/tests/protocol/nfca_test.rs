use nfctrace::protocol::{CommandDetector, Request, Response, detect};
use nfctrace::test_support::{hex, listen_hex, poll_hex};
use nfctrace::{Frame, Technology};
use proptest::prelude::*;

#[test]
fn hlta_with_and_without_checksum() {
    assert_eq!(detect(&poll_hex(0.0, Technology::NfcA, "5000"), None), Some("HLTA"));
    assert_eq!(detect(&poll_hex(0.0, Technology::NfcA, "5000 57cd"), None), Some("HLTA"));
}

proptest! {
    #[test]
    fn hlta_regardless_of_checksum(crc in any::<[u8; 2]>()) {
        let frame = Frame::poll(0.0, Technology::NfcA, &[0x50, 0x00, crc[0], crc[1]]);
        prop_assert_eq!(detect(&frame, None), Some("HLTA"));
    }

    #[test]
    fn select1_and_anticollision1(tail in prop::collection::vec(any::<u8>(), 0..8)) {
        let mut select = vec![0x93, 0x70];
        select.extend_from_slice(&tail);
        prop_assert_eq!(detect(&Frame::poll(0.0, Technology::NfcA, &select), None), Some("SELECT1"));

        let mut anticoll = vec![0x93, 0x20];
        anticoll.extend_from_slice(&tail);
        prop_assert_eq!(detect(&Frame::poll(0.0, Technology::NfcA, &anticoll), None), Some("ANTICOLLISION1"));
    }
}

#[test]
fn lone_0x50_is_not_hlta() {
    // unclassified by NFC-A, and bit 7 of 0x50 is clear so ISO-DEP reads it
    // as an I-block
    let frame = poll_hex(0.0, Technology::NfcA, "50");
    assert_eq!(CommandDetector::new().with_iso_dep(false).detect(&frame, None), None);
}

#[test]
fn get_version_versus_auth_a() {
    assert_eq!(detect(&poll_hex(0.0, Technology::NfcA, "60"), None), Some("GET_VERSION"));
    assert_eq!(detect(&poll_hex(0.0, Technology::NfcA, "60f8"), None), Some("GET_VERSION"));
    assert_eq!(detect(&poll_hex(0.0, Technology::NfcA, "6004 d13d"), None), Some("GET_VERSION"));
    assert_eq!(detect(&poll_hex(0.0, Technology::NfcA, "600401 d13d"), None), Some("AUTH_A"));
}

#[test]
fn ultralight_and_mifare_table_commands() {
    assert_eq!(detect(&poll_hex(0.0, Technology::NfcA, "1a00 4137"), None), Some("AUTH"));
    assert_eq!(detect(&poll_hex(0.0, Technology::NfcA, "a502 01000000 aabb"), None), Some("INCR_CNT"));
    // 0xC2 stays the ISO-DEP deselect rather than a MIFARE restore
    assert_eq!(detect(&poll_hex(0.0, Technology::NfcA, "c2 e0b4"), None), Some("DESELECT"));
}

#[test]
fn cascade_byte_needs_nvb() {
    let d = CommandDetector::new().with_iso_dep(false);
    for payload in ["93", "95", "97"] {
        assert_eq!(d.detect(&poll_hex(0.0, Technology::NfcA, payload), None), None);
    }
    assert_eq!(d.detect(&poll_hex(0.0, Technology::NfcA, "9340"), None), Some("SEL1"));
}

#[test]
fn cascade_response_context() {
    let d = CommandDetector::new();
    let uid = listen_hex(0.0, Technology::NfcA, "88042f5af9");
    assert_eq!(d.detect(&uid, Some(0x93)), Some("UID"));
    let sak = listen_hex(0.0, Technology::NfcA, "04 da17");
    assert_eq!(d.detect(&sak, Some(0x95)), Some("SAK"));
}

#[test]
fn select_request_fields() {
    let d = CommandDetector::new();
    let frame = poll_hex(0.0, Technology::NfcA, "9370 88042f5a f9 b8b9");
    match d.parse_request(&frame) {
        Some(req @ Request::NfcA(_)) => {
            assert_eq!(req.command_code(), 0x93);
            assert_eq!(req.identifier().unwrap().as_bytes(), &hex("88042f5a")[..]);
            assert_eq!(req.params(), Some(&[0xf9][..]));
            assert_eq!(req.checksum(), Some(&[0xb8, 0xb9][..]));
        }
        other => panic!("expected NFC-A request, got {:?}", other),
    }
}

#[test]
fn ats_response_fields() {
    let d = CommandDetector::new();
    let frame = listen_hex(0.0, Technology::NfcA, "0675778102 80 1234");
    match d.parse_response(&frame, Some(0xE0)) {
        Some(Response::NfcA(resp)) => {
            assert_eq!(resp.kind, Some("ATS"));
            let ats = resp.ats.unwrap();
            assert_eq!(ats.frame_size(), Some(64));
            assert_eq!(ats.historical, vec![0x80]);
        }
        other => panic!("expected NFC-A response, got {:?}", other),
    }
}
