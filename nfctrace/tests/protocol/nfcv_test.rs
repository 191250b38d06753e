#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{nfcv_addressed_read, sample_nfcv_uid};
use nfctrace::protocol::nfcv::NfcVFlags;
use nfctrace::protocol::{CommandDetector, Request, Response, detect};
use nfctrace::test_support::{listen_hex, poll_hex};
use nfctrace::{Frame, TagId, Technology};
use proptest::prelude::*;

#[test]
fn addressed_read_single_block() {
    common::init_logger();
    let d = CommandDetector::new();
    let frame = Frame::poll(0.0, Technology::NfcV, &nfcv_addressed_read());
    assert_eq!(d.detect(&frame, None), Some("READ_SINGLE_BLOCK"));

    match d.parse_request(&frame) {
        Some(Request::NfcV(req)) => {
            assert!(req.flags.is_addressed());
            assert!(!req.likely_unanswerable);
            let uid = req.identifier.unwrap();
            assert_eq!(uid.as_bytes(), &sample_nfcv_uid());
            assert_eq!(uid.to_be_hex(), "e00401001b714a5e");
            assert_eq!(req.params, Some(vec![0x00]));
            assert_eq!(req.checksum, Some([0x7e, 0x4d]));
        }
        other => panic!("expected NFC-V request, got {:?}", other),
    }
}

#[test]
fn unaddressed_request_is_flagged() {
    let d = CommandDetector::new();
    match d.parse_request(&poll_hex(0.0, Technology::NfcV, "02 20 00 aabb")) {
        Some(Request::NfcV(req)) => {
            assert!(req.likely_unanswerable);
            assert_eq!(req.identifier, None);
        }
        other => panic!("expected NFC-V request, got {:?}", other),
    }
}

#[test]
fn inventory_response_and_error() {
    let d = CommandDetector::new();
    let uid = hex_uid();
    let answer = listen_hex(0.0, Technology::NfcV, &format!("00 00 {} 1234", uid));
    assert_eq!(d.detect(&answer, Some(0x01)), Some("INVENTORY"));
    match d.parse_response(&answer, Some(0x01)) {
        Some(resp @ Response::NfcV(_)) => {
            assert_eq!(resp.identifier().unwrap().as_bytes(), &sample_nfcv_uid());
            assert_eq!(resp.error_code(), None);
        }
        other => panic!("expected NFC-V response, got {:?}", other),
    }

    let error = listen_hex(0.0, Technology::NfcV, "01 0f 1234");
    assert_eq!(d.detect(&error, Some(0x20)), Some("ERROR"));
    let resp = d.parse_response(&error, Some(0x20)).unwrap();
    assert_eq!(resp.error_code(), Some(0x0f));
    match resp {
        Response::NfcV(r) => assert_eq!(r.error_name(), Some("UNKNOWN")),
        other => panic!("expected NFC-V response, got {:?}", other),
    }
}

#[test]
fn extended_and_fast_commands() {
    let cases = [
        ("02 30 0000 aabb", "EXT_READ_SINGLE_BLOCK"),
        ("02 33 0000 03 aabb", "EXT_READ_MULTIPLE_BLOCKS"),
        ("02 3b aabb", "EXT_GET_SYSTEM_INFO"),
        ("02 c0 04 00 aabb", "FAST_READ_SINGLE_BLOCK"),
        ("02 c2 04 aabb", "PICK_RANDOM_UID"),
        ("02 c4 04 aabb", "CUSTOM"),
    ];
    for (payload, name) in cases {
        let frame = poll_hex(0.0, Technology::NfcV, payload);
        assert_eq!(detect(&frame, None), Some(name), "payload {}", payload);
    }
    let answer = listen_hex(0.0, Technology::NfcV, "00 11223344 aabb");
    assert_eq!(detect(&answer, Some(0x30)), Some("EXT_READ_SINGLE_BLOCK"));
}

#[test]
fn custom_and_proprietary_ranges() {
    assert_eq!(detect(&poll_hex(0.0, Technology::NfcV, "02 a1 04"), None), Some("CUSTOM"));
    assert_eq!(detect(&poll_hex(0.0, Technology::NfcV, "02 e0"), None), Some("PROPRIETARY"));
    assert_eq!(detect(&poll_hex(0.0, Technology::NfcV, "02 9f"), None), None);
}

#[test]
fn empty_payload_has_no_command() {
    for tech in [
        Technology::NfcA,
        Technology::NfcB,
        Technology::NfcF,
        Technology::NfcV,
        Technology::Iso7816,
    ] {
        assert_eq!(detect(&Frame::poll(0.0, tech, &[]), None), None);
        assert_eq!(detect(&Frame::listen(0.0, tech, &[]), Some(0x26)), None);
    }
}

fn hex_uid() -> String {
    nfctrace::utils::bytes_to_hex(&sample_nfcv_uid())
}

proptest! {
    #[test]
    fn inventory_requires_whole_mask(bits in 1u8..=64, extra in 0usize..3, crc in any::<[u8; 2]>()) {
        let flags = NfcVFlags::INVENTORY | NfcVFlags::ONE_SLOT;
        let needed = (bits as usize).div_ceil(8);
        let mut data = vec![flags, 0x01, bits];
        data.extend(std::iter::repeat_n(0xA5, needed));
        data.extend(std::iter::repeat_n(0x00, extra));
        data.extend_from_slice(&crc);

        let frame = Frame::poll(0.0, Technology::NfcV, &data);
        prop_assert_eq!(detect(&frame, None), Some("INVENTORY"));
        let d = CommandDetector::new();
        match d.parse_request(&frame) {
            Some(Request::NfcV(req)) => {
                prop_assert_eq!(req.mask_length_bits, Some(bits));
                prop_assert_eq!(req.mask_length_bytes(), Some(needed));
                prop_assert_eq!(req.checksum, Some(crc));
            }
            other => prop_assert!(false, "expected NFC-V request, got {:?}", other),
        }

        // one mask byte missing before the checksum
        let mut short = data[..2 + needed].to_vec();
        short.extend_from_slice(&crc);
        let short = Frame::poll(0.0, Technology::NfcV, &short);
        prop_assert_eq!(detect(&short, None), None);
        prop_assert!(d.parse_request(&short).is_none());
    }

    #[test]
    fn reversal_is_an_involution(
        bytes in prop_oneof![
            prop::collection::vec(any::<u8>(), 4),
            prop::collection::vec(any::<u8>(), 7),
            prop::collection::vec(any::<u8>(), 8),
            prop::collection::vec(any::<u8>(), 10),
        ]
    ) {
        let id = TagId::from_wire(&bytes);
        prop_assert_eq!(id.reversed().reversed(), id.clone());
        prop_assert_eq!(id.reversed().len(), bytes.len());
        let reversed = id.reversed();
        prop_assert_eq!(reversed.as_bytes().first(), bytes.last());
    }
}
