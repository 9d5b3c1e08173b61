//! i860 instruction encoders.
//!
//! Register operands follow assembler order: `op src1, src2, dest`.

use i860_core::isa::{fp_escape, opcodes};

/// `shl r0, r0, r0`, the canonical core nop.
pub const NOP: u32 = opcodes::SHL << 26;

/// `d.fnop`.
pub const DFNOP: u32 = 0xB000_0200;

/// Register-register form.
pub const fn rrr(op: u32, src1: u32, src2: u32, dest: u32) -> u32 {
    (op << 26) | (src2 << 21) | (dest << 16) | (src1 << 11)
}

/// Immediate form; `op` must be the odd (immediate) opcode.
pub const fn ri(op: u32, imm: u16, src2: u32, dest: u32) -> u32 {
    (op << 26) | (src2 << 21) | (dest << 16) | imm as u32
}

/// 26-bit branch (`br`, `call`, `bc`, `bnc`, `bc.t`, `bnc.t`), offset in words.
pub const fn branch(op: u32, words: i32) -> u32 {
    (op << 26) | (words as u32 & 0x03ff_ffff)
}

/// Split 16-bit offset form used by stores, `bte`/`btne` and `bla`.
pub const fn split(op: u32, src1: u32, src2: u32, off: i32) -> u32 {
    let off = off as u32 & 0xffff;
    (op << 26) | (src2 << 21) | (((off >> 11) & 0x1f) << 16) | (src1 << 11) | (off & 0x7ff)
}

/// `addu src1, src2, dest`.
pub const fn addu(src1: u32, src2: u32, dest: u32) -> u32 {
    rrr(opcodes::ADDU, src1, src2, dest)
}

/// `adds src1, src2, dest`.
pub const fn adds(src1: u32, src2: u32, dest: u32) -> u32 {
    rrr(opcodes::ADDS, src1, src2, dest)
}

/// `addu #imm, src2, dest`.
pub const fn addu_i(imm: i16, src2: u32, dest: u32) -> u32 {
    ri(opcodes::ADDU | 1, imm as u16, src2, dest)
}

/// `or #imm, src2, dest`.
pub const fn or_i(imm: u16, src2: u32, dest: u32) -> u32 {
    ri(opcodes::OR | 1, imm, src2, dest)
}

/// `ld.l #off(src2), dest`.
pub const fn ld_l(off: i16, src2: u32, dest: u32) -> u32 {
    ri(opcodes::LD_SL_RI, off as u16 | 1, src2, dest)
}

/// `st.l src1, #off(src2)`.
pub const fn st_l(src1: u32, off: i32, src2: u32) -> u32 {
    split(opcodes::ST_SL, src1, src2, off | 1)
}

/// `fld.d #off(src2), fdest`, optionally auto-incrementing.
pub const fn fld_d(off: i16, src2: u32, fdest: u32, inc: bool) -> u32 {
    ri(opcodes::FLD_RI, (off as u16 & !7) | inc as u16, src2, fdest)
}

/// `fst.l fsrc, #off(src2)`.
pub const fn fst_l(off: i16, src2: u32, fsrc: u32) -> u32 {
    ri(opcodes::FST_RI, (off as u16 & !3) | 2, src2, fsrc)
}

/// `ld.c creg, dest`.
pub const fn ld_c(creg: u32, dest: u32) -> u32 {
    (opcodes::LD_C << 26) | (creg << 21) | (dest << 16)
}

/// `st.c src1, creg`.
pub const fn st_c(src1: u32, creg: u32) -> u32 {
    (opcodes::ST_C << 26) | (creg << 21) | (src1 << 11)
}

/// `bri src1`.
pub const fn bri(src1: u32) -> u32 {
    (opcodes::BRI << 26) | (src1 << 11)
}

/// `trap`.
pub const TRAP: u32 = opcodes::TRAP << 26;

/// Core escape with sub-opcode `sub`.
pub const fn core_escape(sub: u32, src1: u32) -> u32 {
    (opcodes::CORE_ESCAPE << 26) | (src1 << 11) | sub
}

/// Precision and pipelining flags of an FP-escape word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FpFlags {
    pub p: bool,
    pub d: bool,
    pub s: bool,
    pub r: bool,
}

impl FpFlags {
    pub const SS: Self = Self { p: false, d: false, s: false, r: false };
    pub const SD: Self = Self { p: false, d: false, s: false, r: true };
    pub const DS: Self = Self { p: false, d: false, s: true, r: false };
    pub const DD: Self = Self { p: false, d: false, s: true, r: true };

    /// Pipelined variant.
    pub const fn piped(self) -> Self {
        Self { p: true, ..self }
    }

    /// Dual-instruction variant.
    pub const fn dual(self) -> Self {
        Self { d: true, ..self }
    }
}

/// FP-escape instruction `fop fsrc1, fsrc2, fdest`.
pub const fn fp(fop: u32, src1: u32, src2: u32, dest: u32, f: FpFlags) -> u32 {
    rrr(opcodes::FP_ESCAPE, src1, src2, dest)
        | ((f.p as u32) << 10)
        | ((f.d as u32) << 9)
        | ((f.s as u32) << 8)
        | ((f.r as u32) << 7)
        | fop
}

/// `[p]fadd.xx fsrc1, fsrc2, fdest`.
pub const fn fadd(src1: u32, src2: u32, dest: u32, f: FpFlags) -> u32 {
    fp(fp_escape::FADD, src1, src2, dest, f)
}

/// `[p]fmul.xx fsrc1, fsrc2, fdest`.
pub const fn fmul(src1: u32, src2: u32, dest: u32, f: FpFlags) -> u32 {
    fp(fp_escape::FMUL, src1, src2, dest, f)
}
