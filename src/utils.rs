//! Low-level I/O primitives and the name codec shared by all parsers.
//!
//! Each read function reads exactly the bytes it promises or returns an
//! error - there is no partial-read ambiguity.

use std::io::Read;

use crate::{Error, Result};

/// Read one byte.
#[inline]
pub(crate) fn u8<R: Read>(r: &mut R) -> Result<u8> {
    let mut b = [0u8; 1];
    r.read_exact(&mut b)?;
    Ok(b[0])
}

/// Read a little-endian `u16`.
#[inline]
pub(crate) fn le_u16<R: Read>(r: &mut R) -> Result<u16> {
    let mut b = [0u8; 2];
    r.read_exact(&mut b)?;
    Ok(u16::from_le_bytes(b))
}

/// Read a little-endian `u32`.
#[inline]
pub(crate) fn le_u32<R: Read>(r: &mut R) -> Result<u32> {
    let mut b = [0u8; 4];
    r.read_exact(&mut b)?;
    Ok(u32::from_le_bytes(b))
}

/// Read exactly `len` bytes into a `Vec`.
#[inline]
pub(crate) fn bytesv<R: Read>(r: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut b = vec![0u8; len];
    r.read_exact(&mut b)?;
    Ok(b)
}

/// Decode single-byte (Latin-1) text.
///
/// Every byte maps to the code point of the same value, so decoding cannot
/// fail.
pub fn latin1_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Encode `name` as single-byte (Latin-1) text.
///
/// Returns [`Error::InvalidName`] if any character is above U+00FF.
pub fn latin1_bytes(name: &str) -> Result<Vec<u8>> {
    name.chars()
        .map(|c| c.try_into().map_err(|_| Error::InvalidName(name.to_owned())))
        .collect()
}
