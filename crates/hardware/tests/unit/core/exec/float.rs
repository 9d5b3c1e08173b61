//! Floating-point arithmetic, compares and conversions.

use i860_core::config::Config;
use i860_core::core::arch::creg::CtrlReg;
use i860_core::core::units::fpu::pipeline::PipeSlot;
use i860_core::isa::fp_escape;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::encode::{self, FpFlags, NOP};
use crate::common::harness::{PROGRAM_BASE, TestContext};

fn program(words: &[u32]) -> TestContext {
    TestContext::new().load_program(PROGRAM_BASE, words)
}

#[test]
fn scalar_add_single_leaves_pipes_alone() {
    let mut ctx = program(&[encode::fadd(2, 3, 4, FpFlags::SS), NOP]);
    ctx.cpu.regs.fpr.write_s(2, 1.25);
    ctx.cpu.regs.fpr.write_s(3, 2.0);
    ctx.step();
    assert_eq!(ctx.cpu.regs.fpr.read_s(4), 3.25);
    assert_eq!(ctx.cpu.adder.stage(0), PipeSlot::default());
}

#[test]
fn scalar_sub_double() {
    let mut ctx = program(&[encode::fp(fp_escape::FSUB, 2, 4, 6, FpFlags::DD), NOP]);
    ctx.cpu.regs.fpr.write_d(2, 10.0);
    ctx.cpu.regs.fpr.write_d(4, 0.5);
    ctx.step();
    assert_eq!(ctx.cpu.regs.fpr.read_d(6), 9.5);
}

#[test]
fn single_sources_double_result() {
    let mut ctx = program(&[encode::fmul(2, 3, 4, FpFlags::SD), NOP]);
    ctx.cpu.regs.fpr.write_s(2, 3.0);
    ctx.cpu.regs.fpr.write_s(3, 0.5);
    ctx.step();
    assert_eq!(ctx.cpu.regs.fpr.read_d(4), 1.5);
}

#[rstest]
#[case::fadd(fp_escape::FADD)]
#[case::fsub(fp_escape::FSUB)]
#[case::fmul(fp_escape::FMUL)]
#[case::famov(fp_escape::FAMOV)]
#[case::frcp(fp_escape::FRCP)]
fn double_source_single_result_traps(#[case] fop: u32) {
    let mut ctx = program(&[encode::fp(fop, 2, 4, 6, FpFlags::DS), NOP]);
    ctx.cpu.regs.fpr.write_d(6, 7.0);
    ctx.step();
    assert!(ctx.cpu.cr.psr.it);
    assert_eq!(ctx.cpu.regs.fpr.read_d(6), 7.0);
}

#[rstest]
#[case::pfmul3(fp_escape::PFMUL3, FpFlags::SS.piped())]
#[case::fmlow(fp_escape::FMLOW, FpFlags::SD)]
fn double_only_operations_trap_otherwise(#[case] fop: u32, #[case] flags: FpFlags) {
    let mut ctx = program(&[encode::fp(fop, 2, 4, 6, flags), NOP]);
    ctx.step();
    assert!(ctx.cpu.cr.psr.it);
}

#[test]
fn pipelined_multiply_double_is_two_deep() {
    let pf = FpFlags::DD.piped();
    let mut ctx = program(&[
        encode::fmul(2, 4, 10, pf),
        encode::fmul(6, 8, 10, pf),
        encode::fmul(2, 2, 12, pf),
        NOP,
    ]);
    for (idx, v) in [(2, 3.0), (4, 5.0), (6, 7.0), (8, 11.0)] {
        ctx.cpu.regs.fpr.write_d(idx, v);
    }
    ctx.run(2);
    assert_eq!(ctx.cpu.regs.fpr.read_d(12), 15.0);
    assert!(ctx.cpu.cr.fsr.mrp);
    assert_eq!(ctx.cpu.mul.stage(0).as_f64(), 9.0);
    assert_eq!(ctx.cpu.mul.stage(1).as_f64(), 77.0);
}

#[test]
fn pipelined_multiply_single_is_three_deep() {
    let pf = FpFlags::SS.piped();
    let mut ctx = program(&[
        encode::fmul(2, 3, 10, pf),
        encode::fmul(2, 3, 10, pf),
        encode::fmul(2, 3, 10, pf),
        encode::fmul(4, 4, 11, pf),
    ]);
    ctx.cpu.regs.fpr.write_s(2, 2.0);
    ctx.cpu.regs.fpr.write_s(3, 4.0);
    ctx.cpu.regs.fpr.write_s(4, 1.0);
    ctx.run(2);
    assert_eq!(ctx.cpu.regs.fpr.read_s(11), 8.0);
    assert!(!ctx.cpu.cr.fsr.mrp);
}

#[test]
fn pfmul3_uses_three_stages_for_doubles() {
    let pf = FpFlags::DD.piped();
    let op = |d| encode::fp(fp_escape::PFMUL3, 2, 4, d, pf);
    let mut ctx = program(&[op(10), op(10), op(10), op(12)]);
    ctx.cpu.regs.fpr.write_d(2, 2.0);
    ctx.cpu.regs.fpr.write_d(4, 8.0);
    ctx.run(2);
    assert_eq!(ctx.cpu.regs.fpr.read_d(12), 16.0);
}

#[test]
fn src2_equal_to_dest_reads_last_stage() {
    let mut ctx = program(&[encode::fadd(2, 8, 8, FpFlags::DD.piped()), NOP]);
    ctx.cpu.adder.advance(3, PipeSlot::double(5.0));
    ctx.cpu.adder.advance(3, PipeSlot::default());
    ctx.cpu.adder.advance(3, PipeSlot::default());
    ctx.cpu.regs.fpr.write_d(2, 1.0);
    ctx.cpu.regs.fpr.write_d(8, 100.0);
    ctx.step();
    assert_eq!(ctx.cpu.regs.fpr.read_d(8), 5.0);
    assert_eq!(ctx.cpu.adder.stage(0).as_f64(), 6.0);
}

#[test]
fn retiring_single_stage_sets_precision_shadow_clear() {
    let mut ctx = program(&[encode::fadd(2, 4, 6, FpFlags::DD.piped()), NOP]);
    ctx.cpu.adder.advance(3, PipeSlot::single(1.5));
    ctx.cpu.adder.advance(3, PipeSlot::default());
    ctx.cpu.adder.advance(3, PipeSlot::default());
    ctx.cpu.cr.fsr.arp = true;
    ctx.step();
    assert!(!ctx.cpu.cr.fsr.arp);
    assert_eq!(ctx.cpu.regs.fpr.read_s(6), 1.5);
}

#[test]
fn fmlow_multiplies_low_words() {
    let mut ctx = program(&[encode::fp(fp_escape::FMLOW, 2, 4, 6, FpFlags::DD), NOP]);
    ctx.cpu.regs.fpr.write_bits_d(2, (1 << 63) | 3);
    ctx.cpu.regs.fpr.write_bits_d(4, 0x0000_0007_0000_0005);
    ctx.step();
    assert_eq!(ctx.cpu.regs.fpr.read_bits_d(6), (1 << 63) | 15);
}

#[test]
fn frcp_masks_low_mantissa() {
    let mut ctx = program(&[encode::fp(fp_escape::FRCP, 0, 4, 6, FpFlags::DD), NOP]);
    ctx.cpu.regs.fpr.write_d(4, 3.0);
    ctx.step();
    let bits = ctx.cpu.regs.fpr.read_bits_d(6);
    assert_eq!(bits & 0x0000_0fff_ffff_ffff, 0);
    assert!((f64::from_bits(bits) - 1.0 / 3.0).abs() < 2e-3);
}

#[test]
fn frsqr_single() {
    let mut ctx = program(&[encode::fp(fp_escape::FRSQR, 0, 4, 6, FpFlags::SS), NOP]);
    ctx.cpu.regs.fpr.write_s(4, 4.0);
    ctx.step();
    assert_eq!(ctx.cpu.regs.fpr.read_s(6), 0.5);
}

#[test]
fn reciprocal_of_zero_traps_when_enabled() {
    let mut config = Config::default();
    config.core.fp_source_exception_traps = true;
    let mut ctx = TestContext::with_config(config).load_program(
        PROGRAM_BASE,
        &[encode::fp(fp_escape::FRCP, 0, 4, 6, FpFlags::DD), NOP],
    );
    ctx.cpu.cr.fsr.fte = true;
    ctx.cpu.regs.fpr.write_d(4, 0.0);
    ctx.cpu.regs.fpr.write_d(6, 2.0);
    ctx.step();
    assert!(ctx.cpu.cr.psr.ft);
    assert!(ctx.cpu.cr.fsr.se);
    assert_eq!(ctx.cpu.regs.fpr.read_d(6), 2.0);
}

#[test]
fn reciprocal_of_zero_is_infinite_by_default() {
    let mut ctx = program(&[encode::fp(fp_escape::FRCP, 0, 4, 6, FpFlags::DD), NOP]);
    ctx.cpu.cr.fsr.fte = true;
    ctx.cpu.regs.fpr.write_d(4, 0.0);
    ctx.step();
    assert!(!ctx.cpu.cr.psr.ft);
    assert_eq!(ctx.cpu.regs.fpr.read_d(6), f64::INFINITY);
}

fn frsqr_negative(flags: FpFlags, traps: bool) -> TestContext {
    let mut config = Config::default();
    config.core.fp_source_exception_traps = traps;
    let mut ctx = TestContext::with_config(config).load_program(
        PROGRAM_BASE,
        &[encode::fp(fp_escape::FRSQR, 0, 4, 6, flags), NOP],
    );
    ctx.cpu.cr.fsr.fte = true;
    if flags.s {
        ctx.cpu.regs.fpr.write_d(4, -4.0);
    } else {
        ctx.cpu.regs.fpr.write_s(4, -4.0);
    }
    ctx.cpu.regs.fpr.write_bits_d(6, 0x4000_0000_0000_0000);
    ctx.step();
    ctx
}

#[rstest]
#[case::single(FpFlags::SS)]
#[case::double(FpFlags::DD)]
fn rsqrt_of_negative_traps_when_enabled(#[case] flags: FpFlags) {
    let ctx = frsqr_negative(flags, true);
    assert!(ctx.cpu.cr.psr.ft);
    assert!(ctx.cpu.cr.fsr.se);
    assert_eq!(ctx.cpu.regs.fpr.read_bits_d(6), 0x4000_0000_0000_0000);
}

#[rstest]
#[case::single(FpFlags::SS)]
#[case::double(FpFlags::DD)]
fn rsqrt_of_negative_does_not_trap_by_default(#[case] flags: FpFlags) {
    let ctx = frsqr_negative(flags, false);
    assert!(!ctx.cpu.cr.psr.ft);
    assert!(!ctx.cpu.cr.fsr.se);
}

#[rstest]
#[case::gt_true(fp_escape::PFGT, false, 2.0, 1.0, true)]
#[case::gt_false(fp_escape::PFGT, false, 1.0, 2.0, false)]
#[case::gt_equal(fp_escape::PFGT, false, 2.0, 2.0, false)]
#[case::le_less(fp_escape::PFGT, true, 1.0, 2.0, false)]
#[case::le_greater(fp_escape::PFGT, true, 2.0, 1.0, true)]
#[case::eq_true(fp_escape::PFEQ, false, 2.0, 2.0, true)]
#[case::eq_false(fp_escape::PFEQ, false, 2.0, 3.0, false)]
fn compares_set_cc(
    #[case] fop: u32,
    #[case] r: bool,
    #[case] a: f32,
    #[case] b: f32,
    #[case] cc: bool,
) {
    let flags = FpFlags { r, ..FpFlags::SS };
    let mut ctx = program(&[encode::fp(fop, 2, 3, 0, flags), NOP]);
    ctx.cpu.regs.fpr.write_s(2, a);
    ctx.cpu.regs.fpr.write_s(3, b);
    ctx.cpu.cr.psr.cc = !cc;
    ctx.step();
    assert_eq!(ctx.cpu.cr.psr.cc, cc);
    assert!(!ctx.cpu.dim_cc_valid);
}

#[test]
fn pipelined_compare_pushes_a_zero_through_the_adder() {
    let mut ctx = program(&[encode::fp(fp_escape::PFEQ, 2, 4, 0, FpFlags::DD.piped()), NOP]);
    ctx.cpu.adder.advance(3, PipeSlot::double(9.0));
    ctx.step();
    assert_eq!(ctx.cpu.adder.stage(0), PipeSlot::raw(0, true));
    assert_eq!(ctx.cpu.adder.stage(1).as_f64(), 9.0);
}

#[rstest]
#[case::nearest(false, 0b00, 2.5, 2)]
#[case::nearest_odd(false, 0b00, 3.5, 4)]
#[case::up(false, 0b10, 2.1, 3)]
#[case::down(false, 0b01, -2.1, -3)]
#[case::truncate(true, 0b10, -2.7, -2)]
fn conversions_follow_rounding_mode(
    #[case] truncate: bool,
    #[case] rm: u32,
    #[case] v: f64,
    #[case] expected: i32,
) {
    let fop = if truncate { fp_escape::FTRUNC } else { fp_escape::FIX };
    let mut ctx = program(&[encode::fp(fop, 2, 0, 4, FpFlags::DD), NOP]);
    ctx.cpu.write_creg(CtrlReg::Fsr, rm << 2);
    ctx.cpu.regs.fpr.write_d(2, v);
    ctx.step();
    assert_eq!(ctx.cpu.regs.fpr.read_bits(4), expected as u32);
    assert_eq!(ctx.cpu.regs.fpr.read_bits(5), 0);
}

#[test]
fn famov_converts_precision() {
    let mut ctx = program(&[encode::fp(fp_escape::FAMOV, 2, 0, 4, FpFlags::SD), NOP]);
    ctx.cpu.regs.fpr.write_s(2, -1.5);
    ctx.step();
    assert_eq!(ctx.cpu.regs.fpr.read_d(4), -1.5);
}

#[test]
fn fxfr_moves_raw_bits() {
    let mut ctx = program(&[encode::fp(fp_escape::FXFR, 5, 0, 7, FpFlags::SS), NOP]);
    ctx.cpu.regs.fpr.write_bits(5, 0xdead_beef);
    ctx.step();
    assert_eq!(ctx.reg(7), 0xdead_beef);
}

#[test]
fn directed_rounding_applies_to_adds() {
    let mut ctx = program(&[encode::fadd(2, 3, 4, FpFlags::SS), NOP]);
    ctx.cpu.write_creg(CtrlReg::Fsr, 0b10 << 2);
    ctx.cpu.regs.fpr.write_s(2, 1.0);
    ctx.cpu.regs.fpr.write_s(3, 1e-10);
    ctx.step();
    assert!(ctx.cpu.regs.fpr.read_s(4) > 1.0);
}
