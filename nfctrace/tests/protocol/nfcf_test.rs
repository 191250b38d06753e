#[path = "../common/mod.rs"]
mod common;

use common::fixtures::*;
use nfctrace::protocol::nfcf::split_body;
use nfctrace::protocol::{CommandDetector, Request, Response, detect};
use nfctrace::test_support::poll_hex;
use nfctrace::{Frame, SystemCode, Technology};

#[test]
fn polling_request_fields() {
    let d = CommandDetector::new();
    let frame = poll_hex(0.0, Technology::NfcF, "06 00 ffff 01 0f");
    assert_eq!(d.detect(&frame, None), Some("POLLING"));
    match d.parse_request(&frame) {
        Some(Request::NfcF(req)) => {
            let polling = req.polling.unwrap();
            assert_eq!(polling.system_code, SystemCode::ANY);
            assert_eq!(polling.request_code, 0x01);
            assert_eq!(polling.time_slot, 0x0f);
            assert_eq!(req.checksum, None);
            assert!(req.idm.is_none());
        }
        other => panic!("expected NFC-F request, got {:?}", other),
    }
}

#[test]
fn exact_length_body_has_no_checksum() {
    let data = nfcf_polling_response_exact();
    let (body, checksum) = split_body(&data).unwrap();
    assert_eq!(body, &nfcf_polling_body()[..]);
    assert_eq!(checksum, None);
}

#[test]
fn mismatched_length_splits_checksum() {
    let data = nfcf_polling_response_with_crc();
    let (body, checksum) = split_body(&data).unwrap();
    assert_eq!(body, &nfcf_polling_body()[..]);
    assert_eq!(checksum, Some([0x9b, 0x3e]));
}

#[test]
fn polling_response_with_context() {
    common::init_logger();
    let d = CommandDetector::new();
    for data in [nfcf_polling_response_exact(), nfcf_polling_response_with_crc()] {
        let frame = Frame::listen(0.0, Technology::NfcF, &data);
        assert_eq!(d.detect(&frame, Some(0x00)), Some("POLLING_RESPONSE"));
        match d.parse_response(&frame, Some(0x00)) {
            Some(Response::NfcF(resp)) => {
                assert_eq!(resp.identifier().unwrap().as_bytes(), &sample_idm_bytes()[..]);
                assert_eq!(resp.pmm, Some(sample_pmm()));
                assert_eq!(resp.system_code(), Some(SystemCode::NDEF));
            }
            other => panic!("expected NFC-F response, got {:?}", other),
        }
    }
}

#[test]
fn response_context_must_match_code() {
    let d = CommandDetector::new();
    let frame = Frame::listen(0.0, Technology::NfcF, &nfcf_polling_response_exact());
    match d.parse_response(&frame, Some(0x06)) {
        Some(Response::NfcF(resp)) => {
            assert_eq!(resp.idm, Some(sample_idm()));
            assert_eq!(resp.pmm, None);
            assert!(resp.system_codes.is_empty());
        }
        other => panic!("expected NFC-F response, got {:?}", other),
    }
}

#[test]
fn read_response_blocks() {
    let d = CommandDetector::new();
    let mut data = vec![0x00, 0x07];
    data.extend_from_slice(&sample_idm_bytes());
    data.extend_from_slice(&[0x00, 0x00, 0x01]);
    data.extend_from_slice(b"nfctrace block 0");
    data[0] = data.len() as u8;
    let frame = Frame::listen(0.0, Technology::NfcF, &data);

    assert_eq!(d.detect(&frame, None), Some("READ_WITHOUT_ENCRYPTION_RESPONSE"));
    match d.parse_response(&frame, Some(0x06)) {
        Some(Response::NfcF(resp)) => {
            assert!(resp.is_success());
            assert_eq!(resp.blocks.len(), 1);
            assert_eq!(resp.blocks[0].to_ascii_safe(), "nfctrace block 0");
        }
        other => panic!("expected NFC-F response, got {:?}", other),
    }
}

#[test]
fn short_frames_are_unclassified() {
    assert_eq!(detect(&poll_hex(0.0, Technology::NfcF, "06"), None), None);
    assert!(CommandDetector::new().parse_request(&poll_hex(0.0, Technology::NfcF, "06")).is_none());
}
