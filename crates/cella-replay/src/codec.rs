//! Binary encode/decode for the replay format.
//!
//! All integers are little-endian. Strings are prefixed with a `u32`
//! byte length; footprints with a `u32` cell count followed by `i32`
//! `x, y, z` triples.

use std::io::{ErrorKind, Read, Write};

use cella_core::{Cell, Footprint, ObjectId};
use cella_engine::Command;

use crate::error::ReplayError;
use crate::types::{Frame, ReplayHeader};
use crate::{FORMAT_VERSION, MAGIC};

// ── Command tags ────────────────────────────────────────────────

const TAG_PLACE: u8 = 0;
const TAG_REMOVE: u8 = 1;
const TAG_MOVE: u8 = 2;
const TAG_UNDO: u8 = 3;
const TAG_REDO: u8 = 4;
const TAG_RESET: u8 = 5;

/// Upper bound on the capacity reserved from an untrusted length prefix.
const MAX_PREALLOC: usize = 4096;

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), ReplayError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian i32.
pub fn write_i32_le(w: &mut dyn Write, v: i32) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a length-prefixed UTF-8 string.
pub fn write_length_prefixed_str(w: &mut dyn Write, s: &str) -> Result<(), ReplayError> {
    let len = u32::try_from(s.len()).map_err(|_| ReplayError::MalformedFrame {
        detail: format!("string of {} bytes exceeds u32 length prefix", s.len()),
    })?;
    write_u32_le(w, len)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, ReplayError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, ReplayError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, ReplayError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a little-endian i32.
pub fn read_i32_le(r: &mut dyn Read) -> Result<i32, ReplayError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Read a length-prefixed UTF-8 string.
pub fn read_length_prefixed_str(r: &mut dyn Read) -> Result<String, ReplayError> {
    let len = read_u32_le(r)? as usize;
    let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
    r.take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(ReplayError::MalformedFrame {
            detail: format!("truncated string: got {} of {len} bytes", buf.len()),
        });
    }
    String::from_utf8(buf).map_err(|e| ReplayError::MalformedFrame {
        detail: format!("invalid UTF-8 string: {e}"),
    })
}

// ── Header encode/decode ────────────────────────────────────────

/// Encode the log header (magic, version, header fields).
pub fn encode_header(w: &mut dyn Write, header: &ReplayHeader) -> Result<(), ReplayError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;
    write_length_prefixed_str(w, &header.engine_version)?;
    write_u64_le(w, header.initial_hash)?;
    Ok(())
}

/// Decode and validate the log header.
pub fn decode_header(r: &mut dyn Read) -> Result<ReplayHeader, ReplayError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(ReplayError::InvalidMagic);
    }

    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion { found: version });
    }

    Ok(ReplayHeader {
        engine_version: read_length_prefixed_str(r)?,
        initial_hash: read_u64_le(r)?,
    })
}

// ── Command encode/decode ───────────────────────────────────────

fn write_footprint(w: &mut dyn Write, footprint: &Footprint) -> Result<(), ReplayError> {
    let count = u32::try_from(footprint.len()).map_err(|_| ReplayError::MalformedFrame {
        detail: format!("footprint of {} cells exceeds u32 count", footprint.len()),
    })?;
    write_u32_le(w, count)?;
    for cell in footprint {
        write_i32_le(w, cell.x)?;
        write_i32_le(w, cell.y)?;
        write_i32_le(w, cell.z)?;
    }
    Ok(())
}

fn read_footprint(r: &mut dyn Read) -> Result<Footprint, ReplayError> {
    let count = read_u32_le(r)? as usize;
    let mut footprint = Footprint::with_capacity(count.min(MAX_PREALLOC));
    for _ in 0..count {
        let x = read_i32_le(r)?;
        let y = read_i32_le(r)?;
        let z = read_i32_le(r)?;
        footprint.insert(Cell::new(x, y, z));
    }
    Ok(footprint)
}

fn read_id(r: &mut dyn Read) -> Result<ObjectId, ReplayError> {
    Ok(ObjectId::from(read_length_prefixed_str(r)?))
}

/// Encode one command: tag byte, then its fields.
pub fn encode_command(w: &mut dyn Write, command: &Command) -> Result<(), ReplayError> {
    match command {
        Command::Place { id, footprint } => {
            write_u8(w, TAG_PLACE)?;
            write_length_prefixed_str(w, id.as_str())?;
            write_footprint(w, footprint)
        }
        Command::Remove { id } => {
            write_u8(w, TAG_REMOVE)?;
            write_length_prefixed_str(w, id.as_str())
        }
        Command::Move { id, footprint } => {
            write_u8(w, TAG_MOVE)?;
            write_length_prefixed_str(w, id.as_str())?;
            write_footprint(w, footprint)
        }
        Command::Undo => write_u8(w, TAG_UNDO),
        Command::Redo => write_u8(w, TAG_REDO),
        Command::Reset => write_u8(w, TAG_RESET),
    }
}

/// Decode one command.
pub fn decode_command(r: &mut dyn Read) -> Result<Command, ReplayError> {
    Ok(match read_u8(r)? {
        TAG_PLACE => Command::Place {
            id: read_id(r)?,
            footprint: read_footprint(r)?,
        },
        TAG_REMOVE => Command::Remove { id: read_id(r)? },
        TAG_MOVE => Command::Move {
            id: read_id(r)?,
            footprint: read_footprint(r)?,
        },
        TAG_UNDO => Command::Undo,
        TAG_REDO => Command::Redo,
        TAG_RESET => Command::Reset,
        tag => return Err(ReplayError::UnknownCommandTag { tag }),
    })
}

// ── Frame encode/decode ─────────────────────────────────────────

/// Encode a single frame.
pub fn encode_frame(w: &mut dyn Write, frame: &Frame) -> Result<(), ReplayError> {
    write_u64_le(w, frame.step)?;
    encode_command(w, &frame.command)?;
    write_u64_le(w, frame.state_hash)?;
    Ok(())
}

/// Decode a single frame.
///
/// Returns `Ok(None)` on clean EOF (no bytes available), `Ok(Some(frame))`
/// on success, or an error on truncated or corrupt data.
pub fn decode_frame(r: &mut dyn Read) -> Result<Option<Frame>, ReplayError> {
    // Read the step byte-by-byte to tell clean EOF from truncation.
    let mut step_buf = [0u8; 8];
    let mut filled = 0;
    while filled < step_buf.len() {
        match r.read(&mut step_buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => {
                return Err(ReplayError::MalformedFrame {
                    detail: format!("truncated frame header: got {filled} of 8 bytes for step"),
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(ReplayError::Io(e)),
        }
    }
    let step = u64::from_le_bytes(step_buf);
    let command = decode_command(r)?;
    let state_hash = read_u64_le(r)?;
    Ok(Some(Frame {
        step,
        command,
        state_hash,
    }))
}
