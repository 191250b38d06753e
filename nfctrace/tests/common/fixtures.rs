// fixtures.rs: commonly used test payloads and identifiers

use nfctrace::test_support::hex;
use nfctrace::types::{Idm, Pmm, SystemCode};

pub fn sample_idm_bytes() -> [u8; 8] {
    [0x01, 0x2e, 0x4c, 0xd3, 0x8a, 0x1b, 0x44, 0x02]
}

pub fn sample_pmm_bytes() -> [u8; 8] {
    [0x03, 0x32, 0x42, 0x82, 0x82, 0x47, 0xaa, 0xff]
}

pub fn sample_idm() -> Idm {
    Idm::from_bytes(sample_idm_bytes())
}

pub fn sample_pmm() -> Pmm {
    Pmm::from_bytes(sample_pmm_bytes())
}

/// NFC-V UID as sent on the wire (least significant byte first).
pub fn sample_nfcv_uid() -> [u8; 8] {
    [0x5e, 0x4a, 0x71, 0x1b, 0x00, 0x01, 0x04, 0xe0]
}

/// Addressed READ_SINGLE_BLOCK for block 0 with CRC.
pub fn nfcv_addressed_read() -> Vec<u8> {
    let mut v = vec![0x22, 0x20];
    v.extend_from_slice(&sample_nfcv_uid());
    v.push(0x00);
    v.extend_from_slice(&[0x7e, 0x4d]);
    v
}

/// NFC-F POLLING response body: IDm, PMm and the NDEF system code.
pub fn nfcf_polling_body() -> Vec<u8> {
    let mut body = sample_idm_bytes().to_vec();
    body.extend_from_slice(&sample_pmm_bytes());
    body.extend_from_slice(&SystemCode::NDEF.to_be_bytes());
    body
}

/// POLLING response whose length byte matches the byte count.
pub fn nfcf_polling_response_exact() -> Vec<u8> {
    let body = nfcf_polling_body();
    let mut v = vec![(body.len() + 2) as u8, 0x01];
    v.extend_from_slice(&body);
    v
}

/// The same response captured with its CRC, so the length byte no longer
/// matches.
pub fn nfcf_polling_response_with_crc() -> Vec<u8> {
    let mut v = nfcf_polling_response_exact();
    v.extend_from_slice(&[0x9b, 0x3e]);
    v
}

pub fn nfcb_atqb() -> Vec<u8> {
    hex("50 12345678 00000000 008171 aabb")
}
