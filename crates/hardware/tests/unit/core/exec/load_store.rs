//! Integer and floating loads and stores.

use i860_core::isa::opcodes;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::encode::{self, NOP};
use crate::common::harness::{PROGRAM_BASE, TestContext};

const DATA: u32 = 0x0000_2000;

fn program(words: &[u32]) -> TestContext {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, words);
    ctx.set_reg(6, DATA);
    ctx
}

/// `pfld.l #off(r6), fdest`.
const fn pfld_l(off: u16, fdest: u32) -> u32 {
    encode::ri(opcodes::PFLD_RI, (off & !3) | 2, 6, fdest)
}

#[rstest]
#[case::byte(encode::ri(opcodes::LD_B_RI, 1, 6, 7), 0xffff_ff80)]
#[case::half(encode::ri(opcodes::LD_SL_RI, 2, 6, 7), 0xffff_8001)]
#[case::word(encode::ld_l(0, 6, 7), 0x8001_8000)]
fn integer_loads_sign_extend(#[case] insn: u32, #[case] expected: u32) {
    let mut ctx = program(&[insn, NOP]);
    ctx.poke_words(DATA, &[0x8001_8000]);
    ctx.step();
    assert_eq!(ctx.reg(7), expected);
}

#[test]
fn indexed_load() {
    let mut ctx = program(&[encode::rrr(opcodes::LD_SL_RR, 5, 6, 7) | 1, NOP]);
    ctx.poke_words(DATA + 0x40, &[0x1234_5678]);
    ctx.set_reg(5, 0x40);
    ctx.step();
    assert_eq!(ctx.reg(7), 0x1234_5678);
}

#[test]
fn byte_and_half_stores_use_split_offset() {
    let mut ctx = program(&[
        encode::split(opcodes::ST_B, 5, 6, 3),
        encode::split(opcodes::ST_SL, 5, 6, 4),
    ]);
    ctx.set_reg(5, 0xaabb_ccdd);
    ctx.step();
    assert_eq!(ctx.peek_u32(DATA), 0xdd00_0000);
    assert_eq!(ctx.peek_u32(DATA + 4), 0x0000_ccdd);
}

#[test]
fn fld_d_auto_increments_base() {
    let mut ctx = program(&[encode::fld_d(8, 6, 4, true), NOP]);
    ctx.poke_words(DATA + 8, &[0, 0x3ff8_0000]);
    ctx.step();
    assert_eq!(ctx.cpu.regs.fpr.read_d(4), 1.5);
    assert_eq!(ctx.reg(6), DATA + 8);
}

#[test]
fn fld_without_increment_keeps_base() {
    let mut ctx = program(&[encode::fld_d(8, 6, 4, false), NOP]);
    ctx.poke_words(DATA + 8, &[0, 0x3ff8_0000]);
    ctx.step();
    assert_eq!(ctx.reg(6), DATA);
}

#[test]
fn fld_q_fills_four_registers() {
    let mut ctx = program(&[encode::ri(opcodes::FLD_RI, 4, 6, 8), NOP]);
    ctx.poke_words(DATA, &[1, 2, 3, 4]);
    ctx.step();
    let fpr = &ctx.cpu.regs.fpr;
    assert_eq!(
        [fpr.read_bits(8), fpr.read_bits(9), fpr.read_bits(10), fpr.read_bits(11)],
        [1, 2, 3, 4]
    );
}

#[test]
fn indexed_fld_l_with_increment() {
    let insn = encode::rrr(opcodes::FLD_RR, 5, 6, 4) | 2 | 1;
    let mut ctx = program(&[insn, NOP]);
    ctx.poke_words(DATA + 0x10, &[0x4040_0000]);
    ctx.set_reg(5, 0x10);
    ctx.step();
    assert_eq!(ctx.cpu.regs.fpr.read_s(4), 3.0);
    assert_eq!(ctx.reg(6), DATA + 0x10);
}

#[test]
fn fst_l_and_fst_d() {
    let mut ctx = program(&[
        encode::fst_l(4, 6, 5),
        encode::ri(opcodes::FST_RI, 8, 6, 2),
    ]);
    ctx.cpu.regs.fpr.write_bits(5, 0xcafe_babe);
    ctx.cpu.regs.fpr.write_bits_d(2, 0x1111_2222_3333_4444);
    ctx.step();
    assert_eq!(ctx.peek_u32(DATA + 4), 0xcafe_babe);
    assert_eq!(ctx.peek_u32(DATA + 8), 0x3333_4444);
    assert_eq!(ctx.peek_u32(DATA + 12), 0x1111_2222);
}

#[test]
fn faulting_load_leaves_registers() {
    let mut ctx = program(&[encode::fld_d(0, 6, 4, true), NOP]);
    ctx.set_reg(6, DATA + 4);
    ctx.cpu.regs.fpr.write_d(4, 9.0);
    ctx.step();
    assert!(ctx.cpu.cr.psr.dat);
    assert_eq!(ctx.reg(6), DATA + 4);
    assert_eq!(ctx.cpu.regs.fpr.read_d(4), 9.0);
}

#[test]
fn pfld_delivers_three_loads_later() {
    let mut ctx = program(&[pfld_l(0, 10), pfld_l(4, 11), pfld_l(8, 12), pfld_l(12, 13)]);
    ctx.poke_words(DATA, &[11, 22, 33, 44]);
    ctx.run(2);
    let fpr = &ctx.cpu.regs.fpr;
    assert_eq!(fpr.read_bits(10), 0);
    assert_eq!(fpr.read_bits(12), 0);
    assert_eq!(fpr.read_bits(13), 11);
    assert!(!ctx.cpu.cr.fsr.lrp);
    assert_eq!(ctx.cpu.load.stage(0).bits(), 44);
}

#[test]
fn pfld_q_is_an_instruction_trap() {
    let mut ctx = program(&[encode::ri(opcodes::PFLD_RI, 4, 6, 8), NOP]);
    ctx.step();
    assert!(ctx.cpu.cr.psr.it);
    assert_eq!(ctx.cpu.load.stage(0).bits(), 0);
}

#[test]
fn pst_d_writes_masked_pixels() {
    let mut ctx = program(&[encode::ri(opcodes::PST_D, 0, 6, 4), NOP]);
    ctx.cpu.cr.psr.ps = 2;
    ctx.cpu.cr.psr.pm = 0b10;
    ctx.cpu.regs.fpr.write_bits_d(4, 0x1122_3344_5566_7788);
    ctx.step();
    assert_eq!(ctx.peek_u32(DATA), 0);
    assert_eq!(ctx.peek_u32(DATA + 4), 0x1122_3344);
    assert_eq!(ctx.cpu.cr.psr.pm, 0);
}

#[test]
fn pst_d_eight_bit_pixels() {
    let mut ctx = program(&[encode::ri(opcodes::PST_D, 0, 6, 4), NOP]);
    ctx.cpu.cr.psr.ps = 0;
    ctx.cpu.cr.psr.pm = 0b0000_0101;
    ctx.cpu.regs.fpr.write_bits_d(4, 0x1122_3344_5566_7788);
    ctx.step();
    assert_eq!(ctx.peek_u32(DATA), 0x0066_0088);
    assert_eq!(ctx.peek_u32(DATA + 4), 0);
}

#[test]
fn flush_only_updates_base() {
    let mut ctx = program(&[encode::ri(opcodes::FLUSH, 0x10 | 1, 6, 0), NOP]);
    ctx.step();
    assert_eq!(ctx.reg(6), DATA + 0x10);
    assert!(!ctx.cpu.cr.psr.any_trap());
}

#[test]
fn ixfr_copies_integer_bits() {
    let mut ctx = program(&[encode::rrr(opcodes::IXFR, 5, 0, 4), NOP]);
    ctx.set_reg(5, 0x3f80_0000);
    ctx.step();
    assert_eq!(ctx.cpu.regs.fpr.read_s(4), 1.0);
}
