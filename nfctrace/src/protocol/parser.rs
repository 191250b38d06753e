// nfctrace/nfctrace/src/protocol/parser.rs

//! Bounds-checked readers over payload bytes. Every helper returns `None`
//! instead of panicking so decoders can chain them with `?`.

use crate::types::{Idm, Pmm, TagId};

/// Return `data` when it holds at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Option<&[u8]> {
    if data.len() < min { None } else { Some(data) }
}

/// Read a single byte at `idx`.
pub fn byte_at(data: &[u8], idx: usize) -> Option<u8> {
    data.get(idx).copied()
}

/// Read a big-endian u16 at `idx`.
pub fn be_u16_at(data: &[u8], idx: usize) -> Option<u16> {
    let s = slice_at(data, idx, 2)?;
    Some(u16::from_be_bytes([s[0], s[1]]))
}

/// Return the subslice `data[idx..idx + len]`.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Option<&[u8]> {
    data.get(idx..idx.checked_add(len)?)
}

/// Return everything from `idx` on, or `None` past the end.
pub fn tail_from(data: &[u8], idx: usize) -> Option<&[u8]> {
    data.get(idx..)
}

/// Copy the bytes into an owned vector, mapping an empty slice to `None`.
pub fn non_empty(data: &[u8]) -> Option<Vec<u8>> {
    if data.is_empty() { None } else { Some(data.to_vec()) }
}

/// Read a tag identifier of `len` bytes at `start`.
pub fn tag_id_at(data: &[u8], start: usize, len: usize) -> Option<TagId> {
    slice_at(data, start, len).map(TagId::from_wire)
}

/// Parse an Idm (8 bytes) at `start`.
pub fn idm_at(data: &[u8], start: usize) -> Option<Idm> {
    Idm::try_from(slice_at(data, start, 8)?).ok()
}

/// Parse a PMm (8 bytes) at `start`. Same layout as `idm_at`.
pub fn pmm_at(data: &[u8], start: usize) -> Option<Pmm> {
    Pmm::try_from(slice_at(data, start, 8)?).ok()
}
