//! Memory Access Types.
//!
//! This module defines how accesses are classified throughout the core:
//! 1. **Permission Validation:** the page walk distinguishes fetches from data reads and writes.
//! 2. **Fault Generation:** fetch failures raise instruction-access traps, data failures raise
//!    data-access traps.
//! 3. **Operand Widths:** the load/store layer dispatches on one of five transfer sizes.

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch (I-cache refill).
    Fetch,
    /// Data read from a load instruction.
    Read,
    /// Data write from a store instruction.
    Write,
}

impl AccessType {
    /// True for loads and stores, false for instruction fetches.
    #[inline(always)]
    pub const fn is_data(self) -> bool {
        !matches!(self, Self::Fetch)
    }

    /// True only for stores.
    #[inline(always)]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}

/// Operand width of a single bus transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Width {
    /// 8-bit transfer.
    Byte,
    /// 16-bit transfer.
    Half,
    /// 32-bit transfer.
    Word,
    /// 64-bit transfer.
    Double,
    /// 128-bit transfer.
    Quad,
}

impl Width {
    /// All widths, narrowest first.
    pub const ALL: [Self; 5] = [Self::Byte, Self::Half, Self::Word, Self::Double, Self::Quad];

    /// Number of bytes moved by this width.
    #[inline(always)]
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Double => 8,
            Self::Quad => 16,
        }
    }

    /// Maps a byte count back to a width.
    pub const fn from_bytes(bytes: u32) -> Option<Self> {
        match bytes {
            1 => Some(Self::Byte),
            2 => Some(Self::Half),
            4 => Some(Self::Word),
            8 => Some(Self::Double),
            16 => Some(Self::Quad),
            _ => None,
        }
    }

    /// Mask that clears the in-operand address bits (`!(size - 1)`).
    #[inline(always)]
    pub const fn align_mask(self) -> u32 {
        !(self.bytes() - 1)
    }

    /// All-ones value mask for this width, as a 128-bit carrier.
    #[inline(always)]
    pub const fn value_mask(self) -> u128 {
        match self {
            Self::Quad => u128::MAX,
            w => (1u128 << (w.bytes() * 8)) - 1,
        }
    }
}
