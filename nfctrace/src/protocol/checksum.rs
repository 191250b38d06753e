// nfctrace/nfctrace/src/protocol/checksum.rs

//! Checksum tail handling. Checksums are located and split off but never
//! verified; the capture tool already reports CRC failures through the
//! frame flags.

use crate::constants::{CHECKSUM_LEN, CHECKSUM_MIN_FRAME_LEN};

/// Two trailing CRC bytes as they appear on the wire.
pub type Checksum = [u8; CHECKSUM_LEN];

/// Split a frame into body and checksum tail. Frames shorter than
/// `CHECKSUM_MIN_FRAME_LEN` have no tail.
pub fn split_tail(data: &[u8]) -> (&[u8], Option<Checksum>) {
    if data.len() < CHECKSUM_MIN_FRAME_LEN {
        return (data, None);
    }
    split_tail_exact(data)
}

/// Split off the last two bytes whenever they exist, regardless of the
/// frame length. Used where the frame layout mandates a CRC.
pub fn split_tail_exact(data: &[u8]) -> (&[u8], Option<Checksum>) {
    match data.len().checked_sub(CHECKSUM_LEN) {
        Some(at) => {
            let (body, tail) = data.split_at(at);
            (body, Some([tail[0], tail[1]]))
        }
        None => (data, None),
    }
}
