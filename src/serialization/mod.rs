//! Binary serialization of dictionaries and guides.
//!
//! Both structures share one on-disk shape: a little-endian `u32` record
//! count followed by that many fixed-size records (4 bytes per dictionary
//! unit, 2 bytes per guide unit). The format is an external contract with
//! offline builders, so reading and writing are byte-exact and carry no
//! versioning.
//!
//! Streams are abstracted over [`std::io::Read`] and [`std::io::Write`];
//! anything stream-shaped (a file, an in-memory cursor, a socket) works.
//! Zero-copy loading from an existing byte region goes through the `map`
//! constructors on [`Dictionary`](crate::dictionary::Dictionary) and
//! [`Guide`](crate::dictionary::Guide) instead, which consume a prefix of the
//! region and return the rest so adjacent structures can be mapped in
//! sequence.

use std::io::{self, Read, Write};

/// Errors that can occur while loading or storing a dictionary or guide.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// I/O error from the underlying stream
    #[error("i/o error")]
    Io(#[from] io::Error),

    /// The stream or byte region ended before the announced record count
    #[error("truncated input while reading {section}")]
    Truncated {
        /// Which part of the structure was being read
        section: &'static str,
    },

    /// The announced record count does not fit in memory on this target
    #[error("record count {units} is too large for this target")]
    TooLarge {
        /// The offending record count
        units: usize,
    },

    /// A zero-copy mapping was attempted on a misaligned byte region
    #[error("byte region is not aligned for zero-copy mapping")]
    Misaligned,
}

/// Reads the little-endian `u32` record count that prefixes a section.
pub(crate) fn read_record_count<R: Read>(
    reader: &mut R,
    section: &'static str,
) -> Result<u32, SerializationError> {
    let mut buf = [0u8; 4];
    read_section(reader, &mut buf, section)?;
    Ok(u32::from_le_bytes(buf))
}

/// `read_exact` with short reads reported as [`SerializationError::Truncated`].
pub(crate) fn read_section<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    section: &'static str,
) -> Result<(), SerializationError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => SerializationError::Truncated { section },
        _ => SerializationError::Io(e),
    })
}

/// Writes the little-endian `u32` record count that prefixes a section.
pub(crate) fn write_record_count<W: Write>(
    writer: &mut W,
    count: usize,
) -> Result<(), SerializationError> {
    let count = u32::try_from(count).map_err(|_| SerializationError::TooLarge { units: count })?;
    writer.write_all(&count.to_le_bytes())?;
    Ok(())
}

/// Splits the little-endian `u32` record count off the front of a byte
/// region, returning the count and the remaining bytes.
pub(crate) fn split_record_count<'a>(
    bytes: &'a [u8],
    section: &'static str,
) -> Result<(u32, &'a [u8]), SerializationError> {
    if bytes.len() < 4 {
        return Err(SerializationError::Truncated { section });
    }
    let (head, rest) = bytes.split_at(4);
    let count = u32::from_le_bytes([head[0], head[1], head[2], head[3]]);
    Ok((count, rest))
}

/// Byte length of `count` records of `record_size` bytes, checked against
/// the target's address space.
pub(crate) fn section_byte_len(
    count: u32,
    record_size: usize,
) -> Result<usize, SerializationError> {
    (count as usize)
        .checked_mul(record_size)
        .ok_or(SerializationError::TooLarge {
            units: count as usize,
        })
}
