// nfctrace/nfctrace/src/ingest/archive.rs

//! Archived trace document: a JSON object whose `frames` member lists the
//! captured frames in order. Unpacking the outer container is left to the
//! caller.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::ingest::FrameFields;
use crate::utils::bytes_to_hex_colon;
use crate::{Error, Result};

/// One entry of the `frames` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_start: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_end: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u64>,
    pub time_start: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_end: Option<f64>,
    pub tech_type: u32,
    pub frame_type: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_phase: Option<u32>,
    #[serde(default)]
    pub frame_flags: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<u32>,
    /// Wall clock time of the capture, seconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<f64>,
    /// Payload as hex, with or without `:` separators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_data: Option<String>,
}

impl ArchiveEntry {
    pub fn fields(&self) -> FrameFields<'_> {
        FrameFields {
            time_start: self.time_start,
            time_end: self.time_end,
            tech_type: self.tech_type,
            frame_type: self.frame_type,
            frame_flags: self.frame_flags,
            frame_rate: self.frame_rate,
            frame_data: self.frame_data.as_deref(),
        }
    }

    /// Entry describing `frame`, with the payload in the colon form.
    pub fn from_frame(frame: &Frame) -> Self {
        Self {
            sample_start: None,
            sample_end: None,
            sample_rate: None,
            time_start: frame.timestamp(),
            time_end: Some(frame.time_end()),
            tech_type: frame.technology().code(),
            frame_type: frame.direction().frame_type(),
            frame_phase: None,
            frame_flags: frame.flags().bits(),
            frame_rate: frame.rate(),
            date_time: None,
            frame_data: (!frame.is_empty()).then(|| bytes_to_hex_colon(frame.payload())),
        }
    }
}

/// Top-level archive document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<ArchiveEntry>>,
}

impl TraceDocument {
    /// Convert the entries to frames, skipping unknown frame types.
    pub fn into_frames(self) -> Result<Vec<Frame>> {
        let entries = self.frames.ok_or(Error::MissingMember("frames"))?;
        let frames = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let frame = entry.fields().into_frame();
                if frame.is_none() {
                    log::warn!(
                        "frames[{}]: unknown frame type {:#06x}, skipped",
                        index,
                        entry.frame_type
                    );
                }
                frame
            })
            .collect();
        Ok(frames)
    }
}

/// Parse an archive document from text.
pub fn parse_document(json: &str) -> Result<Vec<Frame>> {
    let document: TraceDocument = serde_json::from_str(json)?;
    document.into_frames()
}

/// Parse an archive document from a reader.
pub fn read_document<R: Read>(reader: R) -> Result<Vec<Frame>> {
    let document: TraceDocument = serde_json::from_reader(reader)?;
    document.into_frames()
}

/// Serialise frames as an archive document.
pub fn to_document(frames: &[Frame]) -> Result<String> {
    let document = TraceDocument {
        frames: Some(frames.iter().map(ArchiveEntry::from_frame).collect()),
    };
    Ok(serde_json::to_string(&document)?)
}
