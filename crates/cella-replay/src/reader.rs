//! Replay playback reader.
//!
//! [`ReplayReader`] reads frames from any `Read` source. The header is
//! validated on construction.

use std::io::Read;

use crate::codec::{decode_frame, decode_header};
use crate::error::ReplayError;
use crate::types::{Frame, ReplayHeader};

/// Reads a replay log from a byte stream.
pub struct ReplayReader<R: Read> {
    reader: R,
    header: ReplayHeader,
    frames_read: u64,
}

impl<R: Read> ReplayReader<R> {
    /// Open a log, reading and validating the header.
    pub fn open(mut reader: R) -> Result<Self, ReplayError> {
        let header = decode_header(&mut reader)?;
        Ok(Self {
            reader,
            header,
            frames_read: 0,
        })
    }

    /// The log header.
    pub fn header(&self) -> &ReplayHeader {
        &self.header
    }

    /// Read the next frame, or `None` if the stream is exhausted.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, ReplayError> {
        let frame = decode_frame(&mut self.reader)?;
        if frame.is_some() {
            self.frames_read += 1;
        }
        Ok(frame)
    }

    /// Number of frames read so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Convert into a frame iterator.
    pub fn frames(self) -> FrameIter<R> {
        FrameIter {
            reader: self.reader,
            done: false,
        }
    }
}

/// Iterator over the remaining frames. Stops after the first error.
pub struct FrameIter<R: Read> {
    reader: R,
    done: bool,
}

impl<R: Read> Iterator for FrameIter<R> {
    type Item = Result<Frame, ReplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match decode_frame(&mut self.reader) {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::ReplayWriter;
    use cella_engine::Command;

    fn header() -> ReplayHeader {
        ReplayHeader {
            engine_version: "test".into(),
            initial_hash: 0,
        }
    }

    fn log_of(n: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut w = ReplayWriter::new(&mut buf, &header()).unwrap();
        for step in 0..n {
            w.write_raw_frame(&Frame {
                step,
                command: Command::Undo,
                state_hash: step * 10,
            })
            .unwrap();
        }
        buf
    }

    #[test]
    fn empty_log() {
        let buf = log_of(0);
        let mut r = ReplayReader::open(buf.as_slice()).unwrap();
        assert!(r.next_frame().unwrap().is_none());
        assert_eq!(r.frames_read(), 0);
    }

    #[test]
    fn iterates_all_frames() {
        let buf = log_of(5);
        let mut r = ReplayReader::open(buf.as_slice()).unwrap();
        r.next_frame().unwrap();
        assert_eq!(r.frames_read(), 1);
        let rest: Vec<Frame> = r.frames().collect::<Result<_, _>>().unwrap();
        assert_eq!(rest.len(), 4);
        assert_eq!(rest[3].state_hash, 40);
    }

    #[test]
    fn iterator_stops_after_error() {
        let mut buf = log_of(2);
        buf.truncate(buf.len() - 3);
        let mut it = ReplayReader::open(buf.as_slice()).unwrap().frames();
        assert!(it.next().unwrap().is_ok());
        assert!(it.next().unwrap().is_err());
        assert!(it.next().is_none());
    }

    #[test]
    fn open_rejects_garbage() {
        assert!(matches!(
            ReplayReader::open(&b"NOPE\x01"[..]),
            Err(ReplayError::InvalidMagic)
        ));
        assert!(matches!(
            ReplayReader::open(&b""[..]),
            Err(ReplayError::Io(_))
        ));
    }
}
