// nfctrace/nfctrace/src/export.rs

//! JSON-lines export of decoded frames, using the live stream schema plus
//! the decoded command name.

use std::io::Write;

use serde::Serialize;

use crate::frame::Frame;
use crate::session::FrameObserver;
use crate::utils::bytes_to_hex;
use crate::{Error, Result};

/// One exported line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    pub time_start: f64,
    pub time_end: f64,
    pub tech_type: u32,
    pub frame_type: u32,
    pub frame_flags: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<u32>,
    pub frame_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<&'static str>,
}

impl From<&Frame> for FrameRecord {
    fn from(frame: &Frame) -> Self {
        Self {
            time_start: frame.timestamp(),
            time_end: frame.time_end(),
            tech_type: frame.technology().code(),
            frame_type: frame.direction().frame_type(),
            frame_flags: frame.flags().bits(),
            frame_rate: frame.rate(),
            frame_data: bytes_to_hex(frame.payload()),
            command: frame.decoded_command(),
        }
    }
}

/// Write one frame as a JSON line.
pub fn write_frame<W: Write>(writer: &mut W, frame: &Frame) -> Result<()> {
    serde_json::to_writer(&mut *writer, &FrameRecord::from(frame))?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write every frame as a JSON line.
pub fn write_frames<'f, W, I>(writer: &mut W, frames: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'f Frame>,
{
    for frame in frames {
        write_frame(writer, frame)?;
    }
    Ok(())
}

/// Observer that exports every processed frame. Observer callbacks cannot
/// fail, so the first write error is kept and later frames are dropped.
pub struct JsonLinesObserver<W: Write> {
    writer: W,
    written: usize,
    error: Option<Error>,
}

impl<W: Write> JsonLinesObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            error: None,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Return the writer, or the first error met while writing.
    pub fn into_inner(self) -> Result<W> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.writer),
        }
    }
}

impl<W: Write> FrameObserver for JsonLinesObserver<W> {
    fn on_frame(&mut self, frame: &Frame) {
        if self.error.is_some() {
            return;
        }
        match write_frame(&mut self.writer, frame) {
            Ok(()) => self.written += 1,
            Err(err) => {
                log::warn!("export stopped: {}", err);
                self.error = Some(err);
            }
        }
    }

    fn on_finish(&mut self) {
        if self.error.is_none() {
            if let Err(err) = self.writer.flush() {
                self.error = Some(err.into());
            }
        }
    }
}
