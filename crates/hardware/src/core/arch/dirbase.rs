//! Directory Base Register (DIRBASE).
//!
//! Selects the page directory, enables translation and carries the cache
//! control fields. ITI is a command bit: writing it invalidates the TLB and
//! instruction cache and it never reads back as set.

#[inline(always)]
const fn bit(v: u32, n: u32) -> bool {
    (v >> n) & 1 != 0
}

#[inline(always)]
const fn flag(b: bool, n: u32) -> u32 {
    (b as u32) << n
}

/// Structured view of DIRBASE.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dirbase {
    /// Address translation enable (ATE).
    pub ate: bool,
    /// DRAM page size (DPS, 3 bits).
    pub dps: u8,
    /// Bus lock (BL).
    pub bl: bool,
    /// Invalidate TLB and instruction cache (ITI); a pulse, not stored.
    pub iti: bool,
    /// Bit 6, reserved.
    pub lb: bool,
    /// Code size 8-bit boot mode (CS8).
    pub cs8: bool,
    /// Replacement block (RB, 2 bits).
    pub rb: u8,
    /// Replacement control (RC, 2 bits).
    pub rc: u8,
    /// Directory table base, as a frame address (bits 31..12).
    pub dtb: u32,
}

impl Dirbase {
    /// Unpacks a raw DIRBASE value.
    pub const fn from_bits(v: u32) -> Self {
        Self {
            ate: bit(v, 0),
            dps: ((v >> 1) & 0x7) as u8,
            bl: bit(v, 4),
            iti: bit(v, 5),
            lb: bit(v, 6),
            cs8: bit(v, 7),
            rb: ((v >> 8) & 0x3) as u8,
            rc: ((v >> 10) & 0x3) as u8,
            dtb: v & 0xffff_f000,
        }
    }

    /// Packs the record back into its architectural layout.
    pub const fn bits(&self) -> u32 {
        flag(self.ate, 0)
            | ((self.dps as u32 & 0x7) << 1)
            | flag(self.bl, 4)
            | flag(self.iti, 5)
            | flag(self.lb, 6)
            | flag(self.cs8, 7)
            | ((self.rb as u32 & 0x3) << 8)
            | ((self.rc as u32 & 0x3) << 10)
            | (self.dtb & 0xffff_f000)
    }

    /// Physical address of the page directory entry for directory index `dir`.
    pub const fn pde_addr(&self, dir: u32) -> u32 {
        self.dtb | ((dir & 0x3ff) << 2)
    }
}
