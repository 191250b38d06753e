// nfctrace/nfctrace/src/ingest/mod.rs

//! Frame sources: archived trace documents and live line-delimited streams.
//!
//! Both schemas carry the same information under different field names and
//! are converted through [`FrameFields`].

pub mod archive;
pub mod live;

pub use archive::{ArchiveEntry, TraceDocument, parse_document, read_document, to_document};
pub use live::{LiveReader, LiveRecord, parse_line};

use crate::frame::Frame;
use crate::types::{Direction, FrameFlags, Technology};
use crate::utils::parse_hex;

/// Schema-neutral view of one ingested record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameFields<'a> {
    pub time_start: f64,
    pub time_end: Option<f64>,
    pub tech_type: u32,
    pub frame_type: u32,
    pub frame_flags: u32,
    pub frame_rate: Option<u32>,
    pub frame_data: Option<&'a str>,
}

impl FrameFields<'_> {
    /// Build the frame. Unknown frame types yield `None`. Payload text that
    /// is not valid hex leaves the payload empty and sets `MALFORMED_DATA`.
    pub fn into_frame(self) -> Option<Frame> {
        let direction = Direction::from_frame_type(self.frame_type)?;
        let technology = Technology::from_code(self.tech_type);
        let mut flags = FrameFlags::from_capture(self.frame_flags);

        let payload = match self.frame_data.map(parse_hex) {
            None => Vec::new(),
            Some(Ok(bytes)) => bytes,
            Some(Err(err)) => {
                log::debug!("frame at {:.6}: {}", self.time_start, err);
                flags |= FrameFlags::MALFORMED_DATA;
                Vec::new()
            }
        };

        let mut frame = Frame::new(self.time_start, technology, direction, payload)
            .with_time_end(self.time_end.unwrap_or(self.time_start))
            .with_flags(flags);
        if let Some(rate) = self.frame_rate {
            frame = frame.with_rate(rate);
        }
        Some(frame)
    }
}
