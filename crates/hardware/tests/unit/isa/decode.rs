//! Two-level decoding.

use i860_core::isa::{Instruction, Op, decode, fp_escape, opcodes};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::encode::{self, FpFlags};

fn op_of(raw: u32) -> Op {
    decode(Instruction(raw))
}

#[rstest]
#[case::ld_b(opcodes::LD_B_RR, Op::LdInt)]
#[case::ld_l_imm(opcodes::LD_SL_RI, Op::LdInt)]
#[case::ixfr(opcodes::IXFR, Op::Ixfr)]
#[case::st(opcodes::ST_SL, Op::StInt)]
#[case::fld(opcodes::FLD_RI, Op::Fld)]
#[case::fst(opcodes::FST_RR, Op::Fst)]
#[case::pfld(opcodes::PFLD_RR, Op::Pfld)]
#[case::ld_c(opcodes::LD_C, Op::LdC)]
#[case::st_c(opcodes::ST_C, Op::StC)]
#[case::flush(opcodes::FLUSH, Op::Flush)]
#[case::pst(opcodes::PST_D, Op::PstD)]
#[case::bri(opcodes::BRI, Op::Bri)]
#[case::trap(opcodes::TRAP, Op::Trap)]
#[case::btne_i(opcodes::BTNE_I, Op::Btne)]
#[case::bte(opcodes::BTE, Op::Bte)]
#[case::br(opcodes::BR, Op::Br)]
#[case::call(opcodes::CALL, Op::Call)]
#[case::bc_t(opcodes::BC_T, Op::BcT)]
#[case::bnc(opcodes::BNC, Op::Bnc)]
#[case::bla(opcodes::BLA, Op::Bla)]
#[case::subs_imm(opcodes::SUBS | 1, Op::Subs)]
#[case::shrd(opcodes::SHRD, Op::Shrd)]
#[case::shra_imm(opcodes::SHRA | 1, Op::Shra)]
#[case::andh(opcodes::ANDH, Op::Andh)]
#[case::andnot_imm(opcodes::ANDNOT | 1, Op::Andnot)]
#[case::orh(opcodes::ORH, Op::Orh)]
#[case::xor(opcodes::XOR, Op::Xor)]
fn primary_opcodes(#[case] primary: u32, #[case] expected: Op) {
    assert_eq!(op_of(primary << 26), expected);
}

#[rstest]
#[case(0x06)]
#[case(0x32)]
#[case(0x36)]
#[case(0x3a)]
#[case(0x3e)]
fn unassigned_primaries(#[case] primary: u32) {
    assert_eq!(op_of(primary << 26), Op::Illegal);
}

#[rstest]
#[case(opcodes::ESC_LOCK, Op::Lock)]
#[case(opcodes::ESC_CALLI, Op::Calli)]
#[case(opcodes::ESC_INTOVR, Op::Intovr)]
#[case(opcodes::ESC_UNLOCK, Op::Unlock)]
#[case(0, Op::Illegal)]
#[case(3, Op::Illegal)]
#[case(5, Op::Illegal)]
fn core_escape_sub_opcodes(#[case] sub: u32, #[case] expected: Op) {
    assert_eq!(op_of(encode::core_escape(sub, 4)), expected);
}

#[rstest]
#[case(fp_escape::FMUL, Op::Fmul)]
#[case(fp_escape::FMLOW, Op::Fmlow)]
#[case(fp_escape::FRCP, Op::Frcp)]
#[case(fp_escape::FRSQR, Op::Frsqr)]
#[case(fp_escape::PFMUL3, Op::Pfmul3)]
#[case(fp_escape::FADD, Op::Fadd)]
#[case(fp_escape::FSUB, Op::Fsub)]
#[case(fp_escape::FIX, Op::Fix)]
#[case(fp_escape::FAMOV, Op::Famov)]
#[case(fp_escape::PFGT, Op::Pfgt)]
#[case(fp_escape::PFEQ, Op::Pfeq)]
#[case(fp_escape::FTRUNC, Op::Ftrunc)]
#[case(fp_escape::FXFR, Op::Fxfr)]
#[case(fp_escape::FIADD, Op::Fiadd)]
#[case(fp_escape::FISUB, Op::Fisub)]
#[case(fp_escape::FADDP, Op::Faddp)]
#[case(fp_escape::FADDZ, Op::Faddz)]
#[case(fp_escape::FZCHKL, Op::Fzchkl)]
#[case(fp_escape::FORM, Op::Form)]
#[case(fp_escape::FZCHKS, Op::Fzchks)]
#[case(0x25, Op::Illegal)]
#[case(0x3b, Op::Illegal)]
#[case(0x7f, Op::Illegal)]
fn fp_escape_sub_opcodes(#[case] fop: u32, #[case] expected: Op) {
    // Flag bits never change the decoded class.
    for flags in [FpFlags::SS, FpFlags::DD.piped().dual()] {
        assert_eq!(op_of(encode::fp(fop, 2, 4, 6, flags)), expected);
    }
}

proptest! {
    #[test]
    fn every_dual_sub_opcode_is_a_dual_op(dpc in 0u32..0x20) {
        prop_assert_eq!(op_of(encode::fp(dpc, 1, 2, 3, FpFlags::DD)), Op::DualOp);
    }

    #[test]
    fn register_fields_do_not_affect_decode(raw: u32, fields in 0u32..(1 << 15)) {
        // Bits 25..11 hold register numbers only.
        let scrubbed = raw & !(0x7fff << 11);
        let rewritten = scrubbed | (fields << 11);
        prop_assert_eq!(op_of(scrubbed), op_of(rewritten));
    }
}
