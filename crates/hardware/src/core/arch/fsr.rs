//! Floating-Point Status Register (FSR).
//!
//! Rounding control, trap enables, sticky and per-unit exception flags, and
//! the result-precision shadows of the last stage retired from each pipe.

use crate::core::units::fpu::rounding_modes::RoundingMode;

#[inline(always)]
const fn bit(v: u32, n: u32) -> bool {
    (v >> n) & 1 != 0
}

#[inline(always)]
const fn flag(b: bool, n: u32) -> u32 {
    (b as u32) << n
}

/// Bits `st.c` may change: 3..0, 8..5 and 21..17.
pub const WRITABLE_MASK: u32 = 0x003e_01ef;

/// Structured view of the FSR.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fsr {
    /// Flush underflows to zero (FZ).
    pub fz: bool,
    /// Trap on inexact (TI).
    pub ti: bool,
    /// Rounding mode (RM).
    pub rm: RoundingMode,
    /// Update the pipeline status flags on the next write (U).
    pub u: bool,
    /// Floating-point trap enable (FTE).
    pub fte: bool,
    /// Bit 6, reserved.
    pub r6: bool,
    /// Sticky inexact (SI).
    pub si: bool,
    /// Source exception (SE).
    pub se: bool,
    /// Multiplier underflow (MU).
    pub mu: bool,
    /// Multiplier overflow (MO).
    pub mo: bool,
    /// Multiplier inexact (MI).
    pub mi: bool,
    /// Multiplier add-one (MA).
    pub ma: bool,
    /// Adder underflow (AU).
    pub au: bool,
    /// Adder overflow (AO).
    pub ao: bool,
    /// Adder inexact (AI).
    pub ai: bool,
    /// Adder add-one (AA).
    pub aa: bool,
    /// Result register (RR, 5 bits).
    pub rr: u8,
    /// Adder exponent (AE, 3 bits).
    pub ae: u8,
    /// Load pipe result precision (LRP).
    pub lrp: bool,
    /// Graphics pipe result precision (IRP).
    pub irp: bool,
    /// Multiplier pipe result precision (MRP).
    pub mrp: bool,
    /// Adder pipe result precision (ARP).
    pub arp: bool,
}

impl Fsr {
    /// Unpacks a raw FSR value.
    pub const fn from_bits(v: u32) -> Self {
        Self {
            fz: bit(v, 0),
            ti: bit(v, 1),
            rm: RoundingMode::from_bits((v >> 2) as u8),
            u: bit(v, 4),
            fte: bit(v, 5),
            r6: bit(v, 6),
            si: bit(v, 7),
            se: bit(v, 8),
            mu: bit(v, 9),
            mo: bit(v, 10),
            mi: bit(v, 11),
            ma: bit(v, 12),
            au: bit(v, 13),
            ao: bit(v, 14),
            ai: bit(v, 15),
            aa: bit(v, 16),
            rr: ((v >> 17) & 0x1f) as u8,
            ae: ((v >> 22) & 0x7) as u8,
            lrp: bit(v, 27),
            irp: bit(v, 28),
            mrp: bit(v, 29),
            arp: bit(v, 30),
        }
    }

    /// Packs the record back into its architectural layout.
    pub const fn bits(&self) -> u32 {
        flag(self.fz, 0)
            | flag(self.ti, 1)
            | ((self.rm as u32) << 2)
            | flag(self.u, 4)
            | flag(self.fte, 5)
            | flag(self.r6, 6)
            | flag(self.si, 7)
            | flag(self.se, 8)
            | flag(self.mu, 9)
            | flag(self.mo, 10)
            | flag(self.mi, 11)
            | flag(self.ma, 12)
            | flag(self.au, 13)
            | flag(self.ao, 14)
            | flag(self.ai, 15)
            | flag(self.aa, 16)
            | ((self.rr as u32 & 0x1f) << 17)
            | ((self.ae as u32 & 0x7) << 22)
            | flag(self.lrp, 27)
            | flag(self.irp, 28)
            | flag(self.mrp, 29)
            | flag(self.arp, 30)
    }

    /// Applies a `st.c` write; only [`WRITABLE_MASK`] bits change.
    pub fn write(&mut self, val: u32) {
        *self = Self::from_bits((val & WRITABLE_MASK) | (self.bits() & !WRITABLE_MASK));
    }
}
