//! The 32-bit packed unit making up a double-array dictionary.

/// One state of the double-array automaton, packed into 32 bits.
///
/// Bit layout, least significant first:
///
/// ```text
/// bits  0..=7   transition label
/// bit   8       HAS_LEAF: some key terminates at this state
/// bit   9       EXTENSION: offset field is stored in units of 256
/// bits 10..=31  offset to this state's child block
/// ```
///
/// A state with `HAS_LEAF` set stores its terminal value in a *value cell*,
/// the unit at `index ^ offset`. Value cells reuse the same 32 bits
/// differently: bit 31 (`IS_LEAF`) is set and the remaining 31 bits hold a
/// non-negative value. Because [`label`](DictionaryUnit::label) of a value
/// cell reports bit 31 as part of the label, no byte can ever match it and
/// ordinary transitions never land on one.
///
/// The layout is an on-disk contract shared with offline builders; units are
/// serialized as little-endian `u32`s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct DictionaryUnit(u32);

impl DictionaryUnit {
    /// Serialized size of one unit in bytes.
    pub const UNIT_SIZE: usize = 4;

    /// Offsets below this bound are stored directly; larger offsets must be
    /// multiples of 256 and set the extension flag.
    pub const OFFSET_MAX: u32 = 1 << 21;

    const HAS_LEAF_BIT: u32 = 1 << 8;
    const EXTENSION_BIT: u32 = 1 << 9;
    const IS_LEAF_BIT: u32 = 1 << 31;

    /// Reconstructs a unit from its raw 32-bit representation.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        DictionaryUnit(raw)
    }

    /// The raw 32-bit representation, as serialized.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whether a key terminates at this state.
    #[inline]
    pub const fn has_leaf(self) -> bool {
        self.0 & Self::HAS_LEAF_BIT != 0
    }

    /// The value stored in a value cell. Meaningful only for units reached
    /// via `index ^ offset` from a state with [`has_leaf`](Self::has_leaf).
    #[inline]
    pub const fn value(self) -> i32 {
        (self.0 & !Self::IS_LEAF_BIT) as i32
    }

    /// The incoming transition label, widened so that value cells (bit 31
    /// set) compare unequal to every byte.
    #[inline]
    pub const fn label(self) -> u32 {
        self.0 & (Self::IS_LEAF_BIT | 0xFF)
    }

    /// The offset from this state to its child block.
    #[inline]
    pub const fn offset(self) -> u32 {
        (self.0 >> 10) << ((self.0 & Self::EXTENSION_BIT) >> 6)
    }

    /// Marks this state as terminating a key.
    #[inline]
    pub fn set_has_leaf(&mut self) {
        self.0 |= Self::HAS_LEAF_BIT;
    }

    /// Turns this unit into a value cell holding `value`.
    ///
    /// Only the low 31 bits are representable; values must be non-negative.
    #[inline]
    pub fn set_value(&mut self, value: i32) {
        self.0 = value as u32 | Self::IS_LEAF_BIT;
    }

    /// Sets the incoming transition label, preserving flags and offset.
    #[inline]
    pub fn set_label(&mut self, label: u8) {
        self.0 = (self.0 & !0xFF) | u32::from(label);
    }

    /// Sets the offset to this state's child block, preserving the label and
    /// leaf flags. Returns `false` if the offset is not representable
    /// (at least [`OFFSET_MAX`](Self::OFFSET_MAX) and not a multiple of 256,
    /// or at least `OFFSET_MAX << 8`).
    pub fn set_offset(&mut self, offset: u32) -> bool {
        if offset >= Self::OFFSET_MAX << 8 {
            return false;
        }
        if offset >= Self::OFFSET_MAX && offset & 0xFF != 0 {
            return false;
        }
        self.0 &= Self::IS_LEAF_BIT | Self::HAS_LEAF_BIT | 0xFF;
        if offset < Self::OFFSET_MAX {
            self.0 |= offset << 10;
        } else {
            self.0 |= (offset << 2) | Self::EXTENSION_BIT;
        }
        true
    }
}
