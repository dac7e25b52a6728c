//! Enumeration sidecar for ordered key traversal.

use std::borrow::Cow;
use std::io::{Read, Write};

use tracing::debug;

use crate::serialization::{
    read_record_count, read_section, section_byte_len, split_record_count, write_record_count,
    SerializationError,
};

/// Per-state enumeration record: the state's first child label and its next
/// sibling label under the enumeration order baked in at build time.
///
/// `0` means "none" in both fields; it can never be a real label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct GuideUnit {
    child: u8,
    sibling: u8,
}

impl GuideUnit {
    /// Serialized size of one guide unit in bytes.
    pub const UNIT_SIZE: usize = 2;

    /// Builds a unit from its two labels.
    #[inline]
    pub const fn new(child: u8, sibling: u8) -> Self {
        GuideUnit { child, sibling }
    }

    /// First child label, or `0` if the state has no children.
    #[inline]
    pub const fn child(self) -> u8 {
        self.child
    }

    /// Next sibling label, or `0` if this state is its parent's last child.
    #[inline]
    pub const fn sibling(self) -> u8 {
        self.sibling
    }
}

/// Sidecar array of [`GuideUnit`]s, indexed by dictionary state.
///
/// A guide must be built against the exact dictionary it accompanies (its
/// length equals the dictionary's unit count); the pair together defines the
/// observable, deterministic order in which searches enumerate keys.
#[derive(Clone, Debug)]
pub struct Guide<'a> {
    units: Cow<'a, [GuideUnit]>,
}

impl Default for Guide<'_> {
    fn default() -> Self {
        Guide {
            units: Cow::Owned(Vec::new()),
        }
    }
}

impl<'a> Guide<'a> {
    /// Creates an empty guide.
    pub fn new() -> Guide<'static> {
        Guide {
            units: Cow::Owned(Vec::new()),
        }
    }

    /// Wraps an externally built guide array.
    pub fn from_units(units: Vec<GuideUnit>) -> Guide<'static> {
        Guide {
            units: Cow::Owned(units),
        }
    }

    /// Number of guide units; equal to the paired dictionary's length.
    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the guide is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// First child label of `index`, or `0` for none (or out of range).
    #[inline]
    pub fn child(&self, index: u32) -> u8 {
        self.units
            .get(index as usize)
            .map_or(0, |unit| unit.child())
    }

    /// Next sibling label of `index`, or `0` for none (or out of range).
    #[inline]
    pub fn sibling(&self, index: u32) -> u8 {
        self.units
            .get(index as usize)
            .map_or(0, |unit| unit.sibling())
    }

    /// Reads a guide from a stream: a little-endian `u32` unit count
    /// followed by that many `(child, sibling)` byte pairs.
    pub fn read<R: Read>(reader: &mut R) -> Result<Guide<'static>, SerializationError> {
        let count = read_record_count(reader, "guide header")?;
        let byte_len = section_byte_len(count, GuideUnit::UNIT_SIZE)?;
        let mut buf = vec![0u8; byte_len];
        read_section(reader, &mut buf, "guide units")?;
        let units = buf
            .chunks_exact(GuideUnit::UNIT_SIZE)
            .map(|pair| GuideUnit::new(pair[0], pair[1]))
            .collect::<Vec<_>>();
        debug!(units = units.len(), "loaded guide");
        Ok(Guide {
            units: Cow::Owned(units),
        })
    }

    /// Writes the guide in the format [`read`](Guide::read) expects.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), SerializationError> {
        write_record_count(writer, self.units.len())?;
        let mut buf = Vec::with_capacity(self.units.len() * GuideUnit::UNIT_SIZE);
        for unit in self.units.iter() {
            buf.push(unit.child());
            buf.push(unit.sibling());
        }
        writer.write_all(&buf)?;
        Ok(())
    }

    /// Interprets the front of `bytes` as a serialized guide without
    /// copying, returning the guide and the unconsumed tail.
    pub fn map(bytes: &'a [u8]) -> Result<(Guide<'a>, &'a [u8]), SerializationError> {
        let (count, rest) = split_record_count(bytes, "guide header")?;
        let byte_len = section_byte_len(count, GuideUnit::UNIT_SIZE)?;
        if rest.len() < byte_len {
            return Err(SerializationError::Truncated {
                section: "guide units",
            });
        }
        let (unit_bytes, rest) = rest.split_at(byte_len);
        // SAFETY: GuideUnit is two bytes with alignment 1 in declaration
        // order (child, sibling), matching the on-disk record; the region is
        // checked above to cover `count` units and the slice borrows
        // `bytes`.
        let units = unsafe {
            std::slice::from_raw_parts(unit_bytes.as_ptr().cast::<GuideUnit>(), count as usize)
        };
        debug!(units = units.len(), "mapped guide");
        Ok((
            Guide {
                units: Cow::Borrowed(units),
            },
            rest,
        ))
    }
}
