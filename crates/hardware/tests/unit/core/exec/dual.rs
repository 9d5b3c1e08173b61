//! Dual operations (`pfam`, `pfmam`, `pfsm`, `pfmsm`).

use i860_core::core::units::fpu::pipeline::PipeSlot;
use i860_core::isa::fp_escape::{DUAL_ADD_FIRST, DUAL_SUB_FIRST};
use pretty_assertions::assert_eq;

use crate::common::encode::{self, FpFlags, NOP};
use crate::common::harness::{PROGRAM_BASE, TestContext};

const MUL_LAST: f64 = 7.0;
const ADD_LAST: f64 = 42.0;

/// A CPU with `f2 = 10`, `f4 = 3`, `KR = 2`, `KI = 4`, `T = 0.5` and known last stages.
fn setup(insn: u32) -> TestContext {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[insn, NOP]);
    let cpu = &mut ctx.cpu;
    cpu.regs.fpr.write_d(2, 10.0);
    cpu.regs.fpr.write_d(4, 3.0);
    cpu.regs.kr = 2.0;
    cpu.regs.ki = 4.0;
    cpu.regs.t = 0.5;
    // Double-source multiplier is two stages deep, the adder three.
    cpu.mul.advance(2, PipeSlot::double(MUL_LAST));
    cpu.mul.advance(2, PipeSlot::default());
    cpu.adder.advance(3, PipeSlot::double(ADD_LAST));
    cpu.adder.advance(3, PipeSlot::default());
    cpu.adder.advance(3, PipeSlot::default());
    ctx
}

fn pfam(dpc: u32) -> u32 {
    encode::fp(DUAL_ADD_FIRST | dpc, 2, 4, 6, FpFlags::DD.piped())
}

fn pfmam(dpc: u32) -> u32 {
    encode::fp(DUAL_ADD_FIRST | dpc, 2, 4, 6, FpFlags::DD)
}

#[test]
fn r2p1_routes_kr_and_mul_last() {
    let mut ctx = setup(pfam(0));
    ctx.step();
    let cpu = &ctx.cpu;
    // Multiplier: KR (old value) * src2.
    assert_eq!(cpu.mul.stage(0).as_f64(), 2.0 * 3.0);
    // Adder: src1 + multiplier last stage.
    assert_eq!(cpu.adder.stage(0).as_f64(), 10.0 + MUL_LAST);
    // KR is latched from src1 after the multiply read it.
    assert_eq!(cpu.regs.kr, 10.0);
    assert_eq!(cpu.regs.t, 0.5);
    // pfam writes the adder's last stage.
    assert_eq!(cpu.regs.fpr.read_d(6), ADD_LAST);
    assert!(cpu.cr.fsr.arp);
}

#[test]
fn pfmam_writes_multiplier_last_stage() {
    let mut ctx = setup(pfmam(0));
    ctx.step();
    assert_eq!(ctx.cpu.regs.fpr.read_d(6), MUL_LAST);
    // Same routing and pipe advance as pfam.
    assert_eq!(ctx.cpu.adder.stage(0).as_f64(), 10.0 + MUL_LAST);
}

#[test]
fn r2ap1_latches_t_from_multiplier() {
    let mut ctx = setup(pfam(2));
    ctx.step();
    assert_eq!(ctx.cpu.regs.t, MUL_LAST);
    assert_eq!(ctx.cpu.adder.stage(0).as_f64(), 10.0 + ADD_LAST);
}

#[test]
fn i2pt_uses_ki_and_t() {
    let mut ctx = setup(pfam(5));
    ctx.step();
    let cpu = &ctx.cpu;
    assert_eq!(cpu.mul.stage(0).as_f64(), 4.0 * 3.0);
    assert_eq!(cpu.adder.stage(0).as_f64(), 0.5 + MUL_LAST);
    assert_eq!(cpu.regs.ki, 10.0);
    assert_eq!(cpu.regs.kr, 2.0);
}

#[test]
fn m12apm_multiplies_sources() {
    let mut ctx = setup(pfam(9));
    ctx.step();
    let cpu = &ctx.cpu;
    assert_eq!(cpu.mul.stage(0).as_f64(), 30.0);
    assert_eq!(cpu.adder.stage(0).as_f64(), ADD_LAST + MUL_LAST);
    assert_eq!(cpu.regs.kr, 2.0);
}

#[test]
fn subtract_form() {
    let insn = encode::fp(DUAL_SUB_FIRST | 9, 2, 4, 6, FpFlags::DD.piped());
    let mut ctx = setup(insn);
    ctx.step();
    assert_eq!(ctx.cpu.adder.stage(0).as_f64(), ADD_LAST - MUL_LAST);
}

#[test]
fn src2_aliasing_dest_reads_the_retiring_stage() {
    let insn = encode::fp(DUAL_ADD_FIRST | 9, 2, 6, 6, FpFlags::DD.piped());
    let mut ctx = setup(insn);
    ctx.step();
    assert_eq!(ctx.cpu.mul.stage(0).as_f64(), 10.0 * ADD_LAST);
}

#[test]
fn double_source_single_result_traps() {
    let insn = encode::fp(DUAL_ADD_FIRST, 2, 4, 6, FpFlags::DS.piped());
    let mut ctx = setup(insn);
    ctx.step();
    assert!(ctx.cpu.cr.psr.it);
    assert_eq!(ctx.cpu.regs.kr, 2.0);
}
