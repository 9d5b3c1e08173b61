//! Instruction decoder.
//!
//! Decoding is two-level: the 6-bit primary opcode, refined for the two
//! escape opcodes by the low instruction bits (bits 2..0 for the core escape,
//! bits 6..0 for the floating-point escape). Both levels are folded into one
//! precomputed table of 8192 [`Op`] entries indexed by
//! [`Instruction::dispatch_index`], built at compile time.

use super::fp_escape as fpo;
use super::instruction::Instruction;
use super::opcodes as op;
use crate::common::constants::DISPATCH_ENTRIES;

/// Decoded operation class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    /// Unassigned encoding.
    Illegal,
    /// `ld.b`, `ld.s`, `ld.l`.
    LdInt,
    /// `st.b`, `st.s`, `st.l`.
    StInt,
    /// `ixfr`.
    Ixfr,
    /// `fld.{l,d,q}`.
    Fld,
    /// `fst.{l,d,q}`.
    Fst,
    /// `pfld.{l,d,q}`.
    Pfld,
    /// `ld.c`.
    LdC,
    /// `st.c`.
    StC,
    /// `flush`.
    Flush,
    /// `pst.d`.
    PstD,
    /// `bri`.
    Bri,
    /// `trap`.
    Trap,
    /// `lock`.
    Lock,
    /// `calli`.
    Calli,
    /// `intovr`.
    Intovr,
    /// `unlock`.
    Unlock,
    /// `btne`.
    Btne,
    /// `bte`.
    Bte,
    /// `br`.
    Br,
    /// `call`.
    Call,
    /// `bc`.
    Bc,
    /// `bc.t`.
    BcT,
    /// `bnc`.
    Bnc,
    /// `bnc.t`.
    BncT,
    /// `bla`.
    Bla,
    /// `addu`.
    Addu,
    /// `subu`.
    Subu,
    /// `adds`.
    Adds,
    /// `subs`.
    Subs,
    /// `shl`.
    Shl,
    /// `shr`.
    Shr,
    /// `shrd`.
    Shrd,
    /// `shra`.
    Shra,
    /// `and`.
    And,
    /// `andh`.
    Andh,
    /// `andnot`.
    Andnot,
    /// `andnoth`.
    Andnoth,
    /// `or`.
    Or,
    /// `orh`.
    Orh,
    /// `xor`.
    Xor,
    /// `xorh`.
    Xorh,
    /// `pfam`/`pfmam` and their subtract forms.
    DualOp,
    /// `fmul`.
    Fmul,
    /// `fmlow`.
    Fmlow,
    /// `frcp`.
    Frcp,
    /// `frsqr`.
    Frsqr,
    /// `pfmul3`.
    Pfmul3,
    /// `fadd`.
    Fadd,
    /// `fsub`.
    Fsub,
    /// `fix`.
    Fix,
    /// `famov`.
    Famov,
    /// `pfgt`/`pfle`.
    Pfgt,
    /// `pfeq`.
    Pfeq,
    /// `ftrunc`.
    Ftrunc,
    /// `fxfr`.
    Fxfr,
    /// `fiadd`.
    Fiadd,
    /// `fisub`.
    Fisub,
    /// `faddp`.
    Faddp,
    /// `faddz`.
    Faddz,
    /// `fzchkl`.
    Fzchkl,
    /// `form`.
    Form,
    /// `fzchks`.
    Fzchks,
}

const fn primary_op(primary: u32) -> Op {
    match primary {
        op::LD_B_RR | op::LD_B_RI | op::LD_SL_RR | op::LD_SL_RI => Op::LdInt,
        op::IXFR => Op::Ixfr,
        op::ST_B | op::ST_SL => Op::StInt,
        op::FLD_RR | op::FLD_RI => Op::Fld,
        op::FST_RR | op::FST_RI => Op::Fst,
        op::LD_C => Op::LdC,
        op::FLUSH => Op::Flush,
        op::ST_C => Op::StC,
        op::PST_D => Op::PstD,
        op::BRI => Op::Bri,
        op::TRAP => Op::Trap,
        op::BTNE | op::BTNE_I => Op::Btne,
        op::BTE | op::BTE_I => Op::Bte,
        op::PFLD_RR | op::PFLD_RI => Op::Pfld,
        op::BR => Op::Br,
        op::CALL => Op::Call,
        op::BC => Op::Bc,
        op::BC_T => Op::BcT,
        op::BNC => Op::Bnc,
        op::BNC_T => Op::BncT,
        0x20 | 0x21 => Op::Addu,
        0x22 | 0x23 => Op::Subu,
        0x24 | 0x25 => Op::Adds,
        0x26 | 0x27 => Op::Subs,
        0x28 | 0x29 => Op::Shl,
        0x2A | 0x2B => Op::Shr,
        op::SHRD => Op::Shrd,
        op::BLA => Op::Bla,
        0x2E | 0x2F => Op::Shra,
        0x30 | 0x31 => Op::And,
        op::ANDH => Op::Andh,
        0x34 | 0x35 => Op::Andnot,
        op::ANDNOTH => Op::Andnoth,
        0x38 | 0x39 => Op::Or,
        op::ORH => Op::Orh,
        0x3C | 0x3D => Op::Xor,
        op::XORH => Op::Xorh,
        _ => Op::Illegal,
    }
}

const fn core_escape_op(sub: u32) -> Op {
    match sub & 7 {
        op::ESC_LOCK => Op::Lock,
        op::ESC_CALLI => Op::Calli,
        op::ESC_INTOVR => Op::Intovr,
        op::ESC_UNLOCK => Op::Unlock,
        _ => Op::Illegal,
    }
}

const fn fp_escape_op(sub: u32) -> Op {
    match sub {
        fpo::DUAL_ADD_FIRST..=fpo::DUAL_SUB_LAST => Op::DualOp,
        fpo::FMUL => Op::Fmul,
        fpo::FMLOW => Op::Fmlow,
        fpo::FRCP => Op::Frcp,
        fpo::FRSQR => Op::Frsqr,
        fpo::PFMUL3 => Op::Pfmul3,
        fpo::FADD => Op::Fadd,
        fpo::FSUB => Op::Fsub,
        fpo::FIX => Op::Fix,
        fpo::FAMOV => Op::Famov,
        fpo::PFGT => Op::Pfgt,
        fpo::PFEQ => Op::Pfeq,
        fpo::FTRUNC => Op::Ftrunc,
        fpo::FXFR => Op::Fxfr,
        fpo::FIADD => Op::Fiadd,
        fpo::FISUB => Op::Fisub,
        fpo::FADDP => Op::Faddp,
        fpo::FADDZ => Op::Faddz,
        fpo::FZCHKL => Op::Fzchkl,
        fpo::FORM => Op::Form,
        fpo::FZCHKS => Op::Fzchks,
        _ => Op::Illegal,
    }
}

const fn build_table() -> [Op; DISPATCH_ENTRIES] {
    let mut table = [Op::Illegal; DISPATCH_ENTRIES];
    let mut idx = 0;
    while idx < DISPATCH_ENTRIES {
        let primary = (idx >> 7) as u32;
        let sub = (idx & 0x7f) as u32;
        table[idx] = match primary {
            op::FP_ESCAPE => fp_escape_op(sub),
            op::CORE_ESCAPE => core_escape_op(sub),
            _ => primary_op(primary),
        };
        idx += 1;
    }
    table
}

/// Precomputed decode table.
static DECODE_TABLE: [Op; DISPATCH_ENTRIES] = build_table();

/// Decodes an instruction word into its operation class.
#[inline(always)]
pub fn decode(insn: Instruction) -> Op {
    DECODE_TABLE[insn.dispatch_index()]
}
