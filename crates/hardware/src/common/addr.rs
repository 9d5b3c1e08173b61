//! Physical and Virtual Address types.
//!
//! The i860 has a flat 32-bit address space. These newtypes keep virtual
//! addresses (what instructions compute) apart from physical addresses (what
//! the bus sees after the page walk) and expose the two-level split used by
//! the translator.

use super::constants::{PAGE_FRAME_MASK, PAGE_OFFSET_MASK, PAGE_SHIFT};

/// A virtual address as produced by instruction fetch or an effective-address computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtAddr(pub u32);

/// A physical address as presented to the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u32);

impl VirtAddr {
    /// Creates a new virtual address from a raw 32-bit value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Byte offset within the 4 KiB page.
    #[inline(always)]
    pub const fn page_offset(self) -> u32 {
        self.0 & PAGE_OFFSET_MASK
    }

    /// Virtual page number (upper 20 bits).
    #[inline(always)]
    pub const fn vpn(self) -> u32 {
        self.0 >> PAGE_SHIFT
    }

    /// Index into the page directory (bits 31..22).
    #[inline(always)]
    pub const fn dir_index(self) -> u32 {
        (self.0 >> 22) & 0x3ff
    }

    /// Index into the second-level page table (bits 21..12).
    #[inline(always)]
    pub const fn table_index(self) -> u32 {
        (self.0 >> PAGE_SHIFT) & 0x3ff
    }
}

impl PhysAddr {
    /// Creates a new physical address from a raw 32-bit value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Combines a page frame (low 12 bits ignored) with a page offset.
    #[inline(always)]
    pub const fn from_frame(frame: u32, offset: u32) -> Self {
        Self((frame & PAGE_FRAME_MASK) | (offset & PAGE_OFFSET_MASK))
    }
}

impl std::fmt::Display for VirtAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{:#010x}", self.0)
    }
}

impl std::fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{:#010x}", self.0)
    }
}
