//! Replay recording writer.
//!
//! [`ReplayWriter`] streams frames to any `Write` sink. The header is
//! written immediately on construction.

use std::io::Write;

use cella_core::GridState;
use cella_engine::Command;

use crate::codec::{encode_frame, encode_header};
use crate::error::ReplayError;
use crate::types::{Frame, ReplayHeader};

/// Writes a replay log to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use cella_core::{footprint, GridState};
/// use cella_engine::{Command, Engine};
/// use cella_replay::{ReplayHeader, ReplayReader, ReplayWriter};
///
/// let mut engine = Engine::new();
/// let header = ReplayHeader::for_engine(&engine);
///
/// let mut buf = Vec::new();
/// let mut writer = ReplayWriter::new(&mut buf, &header).unwrap();
/// let cmd = Command::Place { id: "a".into(), footprint: footprint([(0, 0, 0)]) };
/// let state = engine.apply(&cmd).unwrap();
/// writer.write_step(0, &cmd, &state).unwrap();
/// assert_eq!(writer.frames_written(), 1);
/// drop(writer);
///
/// let mut reader = ReplayReader::open(buf.as_slice()).unwrap();
/// assert_eq!(reader.header(), &header);
/// let frame = reader.next_frame().unwrap().unwrap();
/// assert_eq!(frame.command, cmd);
/// assert_eq!(frame.state_hash, state.stable_hash());
/// assert!(reader.next_frame().unwrap().is_none());
/// ```
pub struct ReplayWriter<W: Write> {
    writer: W,
    frames_written: u64,
}

impl<W: Write> ReplayWriter<W> {
    /// Create a writer, immediately writing the header.
    pub fn new(mut writer: W, header: &ReplayHeader) -> Result<Self, ReplayError> {
        encode_header(&mut writer, header)?;
        Ok(Self {
            writer,
            frames_written: 0,
        })
    }

    /// Record one step: the command applied and the resulting state.
    pub fn write_step(
        &mut self,
        step: u64,
        command: &Command,
        state: &GridState,
    ) -> Result<(), ReplayError> {
        let frame = Frame {
            step,
            command: command.clone(),
            state_hash: state.stable_hash(),
        };
        self.write_raw_frame(&frame)
    }

    /// Write a pre-built frame.
    pub fn write_raw_frame(&mut self, frame: &Frame) -> Result<(), ReplayError> {
        encode_frame(&mut self.writer, frame)?;
        self.frames_written += 1;
        Ok(())
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<(), ReplayError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Unwrap the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
