//! Byte-order accessor tables.
//!
//! The core keeps one [`BusTable`] active at a time and swaps the whole table
//! when EPSR.BE changes. Every sized access goes through the table, so byte
//! order is decided in one place.

use crate::common::{PhysAddr, Width};
use crate::soc::traits::Bus;

type Reader = fn(&mut dyn Bus, PhysAddr) -> u128;
type Writer = fn(&mut dyn Bus, PhysAddr, u128);

/// Byte order of the active table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian (EPSR.BE = 0).
    Little,
    /// Big-endian (EPSR.BE = 1).
    Big,
}

/// Sized read/write accessors for one byte order, indexed by [`Width`].
#[derive(Clone, Copy)]
pub struct BusTable {
    order: ByteOrder,
    read: [Reader; 5],
    write: [Writer; 5],
}

impl std::fmt::Debug for BusTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusTable").field("order", &self.order).finish()
    }
}

fn rd8(b: &mut dyn Bus, a: PhysAddr) -> u128 {
    u128::from(b.read_u8(a))
}
fn wr8(b: &mut dyn Bus, a: PhysAddr, v: u128) {
    b.write_u8(a, v as u8);
}

/// Little-endian accessors.
pub const LITTLE_ENDIAN: BusTable = BusTable {
    order: ByteOrder::Little,
    read: [
        rd8,
        |b, a| u128::from(b.read_u16_le(a)),
        |b, a| u128::from(b.read_u32_le(a)),
        |b, a| u128::from(b.read_u64_le(a)),
        |b, a| b.read_u128_le(a),
    ],
    write: [
        wr8,
        |b, a, v| b.write_u16_le(a, v as u16),
        |b, a, v| b.write_u32_le(a, v as u32),
        |b, a, v| b.write_u64_le(a, v as u64),
        |b, a, v| b.write_u128_le(a, v),
    ],
};

/// Big-endian accessors.
pub const BIG_ENDIAN: BusTable = BusTable {
    order: ByteOrder::Big,
    read: [
        rd8,
        |b, a| u128::from(b.read_u16_be(a)),
        |b, a| u128::from(b.read_u32_be(a)),
        |b, a| u128::from(b.read_u64_be(a)),
        |b, a| b.read_u128_be(a),
    ],
    write: [
        wr8,
        |b, a, v| b.write_u16_be(a, v as u16),
        |b, a, v| b.write_u32_be(a, v as u32),
        |b, a, v| b.write_u64_be(a, v as u64),
        |b, a, v| b.write_u128_be(a, v),
    ],
};

const fn slot(width: Width) -> usize {
    match width {
        Width::Byte => 0,
        Width::Half => 1,
        Width::Word => 2,
        Width::Double => 3,
        Width::Quad => 4,
    }
}

impl BusTable {
    /// Table for the given EPSR.BE value.
    pub const fn for_big_endian(be: bool) -> &'static Self {
        if be { &BIG_ENDIAN } else { &LITTLE_ENDIAN }
    }

    /// Byte order of this table.
    pub const fn order(&self) -> ByteOrder {
        self.order
    }

    /// Reads `width` bytes at `addr`, zero-extended.
    #[inline]
    pub fn read(&self, bus: &mut dyn Bus, addr: PhysAddr, width: Width) -> u128 {
        (self.read[slot(width)])(bus, addr)
    }

    /// Writes the low `width` bytes of `val` at `addr`.
    #[inline]
    pub fn write(&self, bus: &mut dyn Bus, addr: PhysAddr, width: Width, val: u128) {
        (self.write[slot(width)])(bus, addr, val);
    }

    /// Reads a 32-bit word (page-table entries).
    pub fn read_u32(&self, bus: &mut dyn Bus, addr: PhysAddr) -> u32 {
        self.read(bus, addr, Width::Word) as u32
    }

    /// Writes a 32-bit word (page-table entries).
    pub fn write_u32(&self, bus: &mut dyn Bus, addr: PhysAddr, val: u32) {
        self.write(bus, addr, Width::Word, u128::from(val));
    }
}
