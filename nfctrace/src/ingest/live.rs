// nfctrace/nfctrace/src/ingest/live.rs

//! Live stream: one JSON object per line, snake_case field names, payload
//! hex without separators. Blank lines, `#` comments and lines that do not
//! parse are skipped.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::ingest::FrameFields;
use crate::Result;

/// One line of the live stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveRecord {
    pub time_start: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_end: Option<f64>,
    pub tech_type: u32,
    pub frame_type: u32,
    #[serde(default)]
    pub frame_flags: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_data: Option<String>,
}

impl LiveRecord {
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
}

/// Parse one line. Blank lines, comments and unknown frame types give
/// `Ok(None)`; invalid JSON is an error.
pub fn parse_line(line: &str) -> Result<Option<Frame>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let record: LiveRecord = serde_json::from_str(line)?;
    Ok(record.fields().into_frame())
}

/// Iterator over the frames of a live stream. Only I/O errors are
/// reported; lines that are not UTF-8 or do not parse are logged and
/// skipped.
pub struct LiveReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
    skipped: usize,
}

impl<R: BufRead> LiveReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
            skipped: 0,
        }
    }

    /// Lines dropped because they were not valid records.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> Iterator for LiveReader<R> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => return Some(Err(err.into())),
            }
            self.line_no += 1;
            let line = match std::str::from_utf8(&self.buf) {
                Ok(line) => line,
                Err(err) => {
                    self.skipped += 1;
                    log::debug!("line {}: skipped ({})", self.line_no, err);
                    continue;
                }
            };
            match parse_line(line) {
                Ok(Some(frame)) => return Some(Ok(frame)),
                Ok(None) => continue,
                Err(err) => {
                    self.skipped += 1;
                    log::debug!("line {}: skipped ({})", self.line_no, err);
                }
            }
        }
    }
}
