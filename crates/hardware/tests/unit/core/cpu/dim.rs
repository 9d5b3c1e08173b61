//! Dual-instruction mode progression and the dual-mode condition code.

use i860_core::core::arch::dim::DimState;
use i860_core::isa::opcodes;
use pretty_assertions::assert_eq;

use crate::common::encode::{self, DFNOP, FpFlags, NOP};
use crate::common::harness::{PROGRAM_BASE, TestContext};

#[test]
fn enters_and_leaves_with_one_pair_latency() {
    let mut ctx = TestContext::new().load_program(
        PROGRAM_BASE,
        &[DFNOP, NOP, DFNOP, NOP, NOP, NOP, NOP, NOP],
    );
    let mut seen = Vec::new();
    for _ in 0..4 {
        ctx.step();
        seen.push(ctx.cpu.dim);
    }
    assert_eq!(
        seen,
        [DimState::Temp, DimState::Full, DimState::Temp, DimState::None]
    );
}

#[test]
fn fp_escape_with_d_bit_is_dim_capable() {
    let dual_add = encode::fadd(2, 4, 6, FpFlags::SS.dual());
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[dual_add, NOP]);
    ctx.step();
    assert_eq!(ctx.cpu.dim, DimState::Temp);
}

#[test]
fn only_the_low_word_counts() {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[NOP, DFNOP]);
    ctx.step();
    assert_eq!(ctx.cpu.dim, DimState::None);
}

#[test]
fn pending_dual_compare_overrides_psr_cc() {
    let mut ctx =
        TestContext::new().load_program(PROGRAM_BASE, &[encode::branch(opcodes::BC, 8), NOP]);
    ctx.cpu.dim = DimState::Full;
    ctx.cpu.dim_cc = true;
    ctx.cpu.dim_cc_valid = true;
    ctx.cpu.cr.psr.cc = false;
    ctx.step();
    assert_eq!(ctx.cpu.pc, PROGRAM_BASE + 4 + 32);
    assert!(!ctx.cpu.dim_cc_valid);
}

#[test]
fn compare_in_dual_mode_latches_dim_cc() {
    let pfgt = encode::fp(
        i860_core::isa::fp_escape::PFGT,
        2,
        3,
        0,
        FpFlags::SS.dual(),
    );
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[pfgt, NOP]);
    ctx.cpu.regs.fpr.write_s(2, 5.0);
    ctx.cpu.regs.fpr.write_s(3, 1.0);
    ctx.cpu.dim = DimState::Full;
    ctx.step();
    assert!(ctx.cpu.cr.psr.cc);
    assert!(ctx.cpu.dim_cc);
    // Validity lasts only for the step that produced it.
    assert!(!ctx.cpu.dim_cc_valid);
}

#[test]
fn trap_snapshots_and_clears_dim() {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[encode::TRAP, NOP]);
    ctx.cpu.dim = DimState::Full;
    ctx.cpu.dim_cc = true;
    ctx.cpu.dim_cc_valid = true;
    ctx.step();
    assert_eq!(ctx.cpu.dim, DimState::None);
    assert!(!ctx.cpu.dim_cc_valid);
    assert_eq!(ctx.cpu.saved.dim, DimState::Full);
    assert!(ctx.cpu.saved.dim_cc);
    assert!(ctx.cpu.saved.dim_cc_valid);
    assert!(!ctx.cpu.cr.psr.dim);
}
