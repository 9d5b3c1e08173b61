//! Instruction word field extraction.
//!
//! Every i860 instruction is a 32-bit word with a fixed field layout:
//!
//! | Bits   | Field  |
//! |--------|--------|
//! | 31..26 | primary opcode |
//! | 25..21 | src2   |
//! | 20..16 | dest   |
//! | 15..11 | src1   |
//! | 15..0  | imm16  |
//!
//! Floating-point escapes add P (bit 10), D (bit 9), S (bit 8) and R (bit 7).

use std::fmt;

use super::opcodes::FP_ESCAPE;
use crate::common::constants::DUAL_FNOP;

/// Sign-extends the low `bits` bits of `v`.
#[inline(always)]
pub const fn sext(v: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((v << shift) as i32) >> shift
}

/// A raw instruction word with typed field accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Instruction(pub u32);

impl Instruction {
    /// Raw 32-bit encoding.
    #[inline(always)]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Primary opcode (bits 31..26).
    #[inline(always)]
    pub const fn primary(self) -> u32 {
        self.0 >> 26
    }

    /// `src1` register index (bits 15..11).
    #[inline(always)]
    pub const fn src1(self) -> usize {
        ((self.0 >> 11) & 0x1f) as usize
    }

    /// `src2` register index (bits 25..21).
    #[inline(always)]
    pub const fn src2(self) -> usize {
        ((self.0 >> 21) & 0x1f) as usize
    }

    /// `dest` register index (bits 20..16).
    #[inline(always)]
    pub const fn dest(self) -> usize {
        ((self.0 >> 16) & 0x1f) as usize
    }

    /// Zero-extended 16-bit immediate.
    #[inline(always)]
    pub const fn imm16(self) -> u32 {
        self.0 & 0xffff
    }

    /// Sign-extended 16-bit immediate.
    #[inline(always)]
    pub const fn simm16(self) -> i32 {
        sext(self.0, 16)
    }

    /// True for the immediate (odd) form of a 0x20..0x3F integer opcode,
    /// and for the displacement form of loads.
    #[inline(always)]
    pub const fn has_immediate(self) -> bool {
        self.0 & (1 << 26) != 0
    }

    /// Sign-extended split offset used by stores and `bte`/`btne`.
    #[inline(always)]
    pub const fn split_offset(self) -> i32 {
        sext(((self.0 >> 5) & 0xf800) | (self.0 & 0x7ff), 16)
    }

    /// Sign-extended 26-bit branch offset, in words.
    #[inline(always)]
    pub const fn branch26(self) -> i32 {
        sext(self.0 & 0x03ff_ffff, 26)
    }

    /// Auto-increment flag of floating loads and stores (bit 0).
    #[inline(always)]
    pub const fn auto_inc(self) -> bool {
        self.0 & 1 != 0
    }

    /// Pipelined (P) flag.
    #[inline(always)]
    pub const fn p(self) -> bool {
        self.0 & (1 << 10) != 0
    }

    /// Dual-instruction (D) flag.
    #[inline(always)]
    pub const fn d(self) -> bool {
        self.0 & (1 << 9) != 0
    }

    /// Source precision (S) flag; set means double.
    #[inline(always)]
    pub const fn s(self) -> bool {
        self.0 & (1 << 8) != 0
    }

    /// Result precision (R) flag; set means double.
    #[inline(always)]
    pub const fn r(self) -> bool {
        self.0 & (1 << 7) != 0
    }

    /// Floating-point escape sub-opcode (bits 6..0).
    #[inline(always)]
    pub const fn fp_op(self) -> u32 {
        self.0 & 0x7f
    }

    /// Core escape sub-opcode (bits 2..0).
    #[inline(always)]
    pub const fn core_op(self) -> u32 {
        self.0 & 0x7
    }

    /// Data-path control field of dual operations (bits 3..0).
    #[inline(always)]
    pub const fn dpc(self) -> usize {
        (self.0 & 0xf) as usize
    }

    /// Marks its pair as DIM-capable: a floating escape with D set, or `d.fnop`.
    #[inline(always)]
    pub const fn is_dim_capable(self) -> bool {
        (self.primary() == FP_ESCAPE && self.d()) || self.0 == DUAL_FNOP
    }

    /// Index into the flat dispatch table: primary opcode and bits 6..0.
    #[inline(always)]
    pub const fn dispatch_index(self) -> usize {
        (((self.0 >> 26) << 7) | (self.0 & 0x7f)) as usize
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
