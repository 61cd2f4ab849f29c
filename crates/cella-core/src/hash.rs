//! Portable FNV-1a hashing for grid snapshots.
//!
//! The standard library's hashers are randomly seeded per process, so
//! they cannot back a hash that must agree across runs and machines.
//! These helpers use FNV-1a 64 over little-endian encodings instead.
//! They are not cryptographically secure.

use crate::id::{Cell, ObjectId};

/// FNV-1a offset basis for 64-bit.
pub const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
pub const FNV_PRIME: u64 = 0x00000100000001B3;

/// Feed a single byte into an FNV-1a hash state.
#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

/// Feed a byte slice into an FNV-1a hash state.
#[inline]
pub fn fnv1a_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Feed a u32 (as 4 LE bytes) into an FNV-1a hash state.
#[inline]
pub fn fnv1a_u32(hash: u64, v: u32) -> u64 {
    fnv1a_bytes(hash, &v.to_le_bytes())
}

/// Feed an i32 (as 4 LE bytes) into an FNV-1a hash state.
#[inline]
pub fn fnv1a_i32(hash: u64, v: i32) -> u64 {
    fnv1a_bytes(hash, &v.to_le_bytes())
}

/// Feed one `(cell, id)` pair into an FNV-1a hash state.
///
/// The id is length-prefixed so that adjacent pairs cannot alias
/// (`"ab" + "c"` vs `"a" + "bc"`).
pub fn fnv1a_pair(mut hash: u64, cell: &Cell, id: &ObjectId) -> u64 {
    hash = fnv1a_i32(hash, cell.x);
    hash = fnv1a_i32(hash, cell.y);
    hash = fnv1a_i32(hash, cell.z);
    let bytes = id.as_str().as_bytes();
    hash = fnv1a_u32(hash, bytes.len() as u32);
    fnv1a_bytes(hash, bytes)
}

/// Hash a sequence of `(cell, id)` pairs already in canonical order.
///
/// Returns [`FNV_OFFSET`] for an empty sequence.
pub fn pairs_hash<'a>(pairs: impl IntoIterator<Item = (&'a Cell, &'a ObjectId)>) -> u64 {
    pairs
        .into_iter()
        .fold(FNV_OFFSET, |hash, (cell, id)| fnv1a_pair(hash, cell, id))
}
