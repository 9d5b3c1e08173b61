//! Processor Status Register (PSR).
//!
//! The PSR carries the integer condition codes, the privilege and interrupt
//! enables with their pre-trap shadows, the trap-status bits that tell a handler
//! why it was entered, and the pixel state used by the graphics instructions.
//!
//! | Bits   | Field | Meaning                               |
//! |--------|-------|---------------------------------------|
//! | 0      | BR    | Break on read of DB address           |
//! | 1      | BW    | Break on write of DB address          |
//! | 2      | CC    | Condition code                        |
//! | 3      | LCC   | Loop condition code (`bla`)           |
//! | 4      | IM    | Interrupt mask (1 = enabled)          |
//! | 5      | PIM   | IM before the last trap               |
//! | 6      | U     | User mode                             |
//! | 7      | PU    | U before the last trap                |
//! | 8..12  | IT/IN/IAT/DAT/FT | Trap-status bits           |
//! | 13     | DS    | Trap during a dual-mode switch        |
//! | 14     | DIM   | Trap during dual-instruction mode     |
//! | 15     | KNF   | Kill next FP instruction              |
//! | 17..21 | SC    | Shift count from the last `shr`       |
//! | 22..23 | PS    | Pixel size                            |
//! | 24..31 | PM    | Pixel mask                            |

use crate::common::TrapKind;

/// Bits a user-mode `st.c` cannot change (IM, PIM, U, PU).
pub const SUPERVISOR_ONLY_MASK: u32 = 0x0000_00f0;

/// All five trap-status bits.
pub const TRAP_BITS_MASK: u32 = 0x0000_1f00;

#[inline(always)]
const fn bit(v: u32, n: u32) -> bool {
    (v >> n) & 1 != 0
}

#[inline(always)]
const fn flag(b: bool, n: u32) -> u32 {
    (b as u32) << n
}

/// Pixel size selected by PSR.PS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelSize {
    /// 8-bit pixels, eight per 64-bit operand.
    Bits8,
    /// 16-bit pixels, four per operand.
    Bits16,
    /// 32-bit pixels, two per operand.
    Bits32,
}

impl PixelSize {
    /// Number of pixels packed in a 64-bit operand.
    pub const fn per_double(self) -> u32 {
        match self {
            Self::Bits8 => 8,
            Self::Bits16 => 4,
            Self::Bits32 => 2,
        }
    }
}

/// Structured view of the PSR.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Psr {
    /// Break on data read (BR).
    pub br: bool,
    /// Break on data write (BW).
    pub bw: bool,
    /// Condition code (CC).
    pub cc: bool,
    /// Loop condition code (LCC).
    pub lcc: bool,
    /// Interrupt mask (IM).
    pub im: bool,
    /// Previous interrupt mask (PIM).
    pub pim: bool,
    /// User mode (U).
    pub u: bool,
    /// Previous user mode (PU).
    pub pu: bool,
    /// Instruction trap (IT).
    pub it: bool,
    /// Interrupt (IN).
    pub intr: bool,
    /// Instruction access trap (IAT).
    pub iat: bool,
    /// Data access trap (DAT).
    pub dat: bool,
    /// Floating-point trap (FT).
    pub ft: bool,
    /// Delayed switch (DS).
    pub ds: bool,
    /// Dual-instruction mode at trap time (DIM).
    pub dim: bool,
    /// Kill next floating-point instruction (KNF).
    pub knf: bool,
    /// Shift count (SC, 5 bits).
    pub sc: u8,
    /// Raw pixel size field (PS, 2 bits).
    pub ps: u8,
    /// Pixel mask (PM, 8 bits).
    pub pm: u8,
}

impl Psr {
    /// Unpacks a raw PSR value.
    pub const fn from_bits(v: u32) -> Self {
        Self {
            br: bit(v, 0),
            bw: bit(v, 1),
            cc: bit(v, 2),
            lcc: bit(v, 3),
            im: bit(v, 4),
            pim: bit(v, 5),
            u: bit(v, 6),
            pu: bit(v, 7),
            it: bit(v, 8),
            intr: bit(v, 9),
            iat: bit(v, 10),
            dat: bit(v, 11),
            ft: bit(v, 12),
            ds: bit(v, 13),
            dim: bit(v, 14),
            knf: bit(v, 15),
            sc: ((v >> 17) & 0x1f) as u8,
            ps: ((v >> 22) & 0x3) as u8,
            pm: (v >> 24) as u8,
        }
    }

    /// Packs the record back into its architectural layout.
    pub const fn bits(&self) -> u32 {
        flag(self.br, 0)
            | flag(self.bw, 1)
            | flag(self.cc, 2)
            | flag(self.lcc, 3)
            | flag(self.im, 4)
            | flag(self.pim, 5)
            | flag(self.u, 6)
            | flag(self.pu, 7)
            | flag(self.it, 8)
            | flag(self.intr, 9)
            | flag(self.iat, 10)
            | flag(self.dat, 11)
            | flag(self.ft, 12)
            | flag(self.ds, 13)
            | flag(self.dim, 14)
            | flag(self.knf, 15)
            | ((self.sc as u32 & 0x1f) << 17)
            | ((self.ps as u32 & 0x3) << 22)
            | ((self.pm as u32) << 24)
    }

    /// Applies a `st.c` write. In user mode the supervisor-only bits keep their value.
    pub fn write(&mut self, val: u32, user: bool) {
        let val = if user {
            (val & !SUPERVISOR_ONLY_MASK) | (self.bits() & SUPERVISOR_ONLY_MASK)
        } else {
            val
        };
        *self = Self::from_bits(val);
    }

    /// True if any trap-status bit is set.
    pub const fn any_trap(&self) -> bool {
        self.it || self.intr || self.iat || self.dat || self.ft
    }

    /// Clears all five trap-status bits.
    pub fn clear_traps(&mut self) {
        self.it = false;
        self.intr = false;
        self.iat = false;
        self.dat = false;
        self.ft = false;
    }

    /// Sets the trap-status bit belonging to `kind`.
    pub fn set_trap(&mut self, kind: TrapKind) {
        match kind {
            TrapKind::Instruction => self.it = true,
            TrapKind::InstructionAccess => self.iat = true,
            TrapKind::DataAccess => self.dat = true,
            TrapKind::FloatingPoint => self.ft = true,
            TrapKind::Interrupt => self.intr = true,
        }
    }

    /// Decoded pixel size, or `None` for the undefined encoding 3.
    pub const fn pixel_size(&self) -> Option<PixelSize> {
        match self.ps {
            0 => Some(PixelSize::Bits8),
            1 => Some(PixelSize::Bits16),
            2 => Some(PixelSize::Bits32),
            _ => None,
        }
    }
}
