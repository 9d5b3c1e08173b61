//! Extended Processor Status Register (EPSR).
//!
//! Holds the processor identification (read-only), the integer overflow flag,
//! the data byte order, page write protection and the interrupt pin shadow.

#[inline(always)]
const fn bit(v: u32, n: u32) -> bool {
    (v >> n) & 1 != 0
}

#[inline(always)]
const fn flag(b: bool, n: u32) -> u32 {
    (b as u32) << n
}

/// Bits never changed by `st.c`: processor type, stepping, INT and DCS.
pub const READ_ONLY_MASK: u32 = 0x003e_1fff;

/// Bits only supervisor code may change: WP, PBM and BE.
pub const SUPERVISOR_ONLY_MASK: u32 = 0x00c0_4000;

/// Named bits that have their own fields; everything else is kept verbatim.
const NAMED_MASK: u32 = READ_ONLY_MASK | SUPERVISOR_ONLY_MASK | (1 << 13) | (1 << 24);

/// Structured view of the EPSR.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Epsr {
    /// Processor type (bits 7..0).
    pub processor_type: u8,
    /// Stepping number (bits 12..8).
    pub stepping: u8,
    /// Interlock (IL).
    pub il: bool,
    /// Write protect for supervisor accesses (WP).
    pub wp: bool,
    /// Interrupt pin shadow (INT).
    pub int: bool,
    /// Data cache size code (DCS).
    pub dcs: u8,
    /// Page-table bit mode (PBM).
    pub pbm: bool,
    /// Big-endian data accesses (BE).
    pub be: bool,
    /// Integer overflow (OF).
    pub of: bool,
    /// Unnamed bits, kept so software reads back what it wrote.
    pub other: u32,
}

impl Epsr {
    /// Unpacks a raw EPSR value.
    pub const fn from_bits(v: u32) -> Self {
        Self {
            processor_type: v as u8,
            stepping: ((v >> 8) & 0x1f) as u8,
            il: bit(v, 13),
            wp: bit(v, 14),
            int: bit(v, 17),
            dcs: ((v >> 18) & 0xf) as u8,
            pbm: bit(v, 22),
            be: bit(v, 23),
            of: bit(v, 24),
            other: v & !NAMED_MASK,
        }
    }

    /// Packs the record back into its architectural layout.
    pub const fn bits(&self) -> u32 {
        (self.processor_type as u32)
            | ((self.stepping as u32 & 0x1f) << 8)
            | flag(self.il, 13)
            | flag(self.wp, 14)
            | flag(self.int, 17)
            | ((self.dcs as u32 & 0xf) << 18)
            | flag(self.pbm, 22)
            | flag(self.be, 23)
            | flag(self.of, 24)
            | (self.other & !NAMED_MASK)
    }

    /// Applies a `st.c` write, preserving read-only fields and, in user mode,
    /// the supervisor-only fields.
    pub fn write(&mut self, val: u32, user: bool) {
        let mut keep = READ_ONLY_MASK;
        if user {
            keep |= SUPERVISOR_ONLY_MASK;
        }
        *self = Self::from_bits((val & !keep) | (self.bits() & keep));
    }
}
