//! Trap entry, trap return and external interrupts.

use i860_core::common::TRAP_VECTOR;
use i860_core::core::arch::dim::DimState;
use i860_core::isa::opcodes;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::encode::{self, NOP};
use crate::common::harness::{PROGRAM_BASE, TestContext};

#[test]
fn software_trap_enters_supervisor_mode() {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[encode::TRAP, NOP]);
    ctx.cpu.cr.psr.u = true;
    ctx.cpu.cr.psr.im = true;
    ctx.step();

    let psr = ctx.cpu.cr.psr;
    assert_eq!(ctx.cpu.pc, TRAP_VECTOR);
    assert_eq!(ctx.cpu.cr.fir, PROGRAM_BASE);
    assert!(psr.it);
    assert!(!psr.u && psr.pu);
    assert!(!psr.im && psr.pim);
    assert_eq!(ctx.cpu.stats.traps, 1);
    assert_eq!(ctx.cpu.stats.interrupts, 0);
}

#[test]
fn first_fir_read_returns_trap_address() {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[encode::TRAP, NOP]);
    ctx.poke_words(TRAP_VECTOR, &[encode::ld_c(0, 10), encode::ld_c(0, 11)]);
    ctx.run(2);
    assert_eq!(ctx.reg(10), PROGRAM_BASE);
    assert_eq!(ctx.reg(11), TRAP_VECTOR + 4);
}

#[test]
fn bri_returns_and_restores_state() {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[encode::TRAP, NOP]);
    ctx.poke_words(TRAP_VECTOR, &[encode::bri(20), NOP]);
    ctx.set_reg(20, 0x0000_3000);
    ctx.cpu.cr.psr.u = true;
    ctx.cpu.cr.psr.im = true;
    ctx.cpu.dim = DimState::Full;

    ctx.step();
    assert_eq!(ctx.cpu.dim, DimState::None);
    ctx.step();

    let psr = ctx.cpu.cr.psr;
    assert_eq!(ctx.cpu.pc, 0x0000_3000);
    assert!(psr.u && psr.im);
    assert!(!psr.any_trap());
    // Restored state is not advanced by the returning step.
    assert_eq!(ctx.cpu.dim, DimState::Full);
}

#[test]
fn bri_without_pending_trap_is_a_plain_branch() {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[encode::bri(20), NOP]);
    ctx.set_reg(20, 0x0000_3000);
    ctx.cpu.cr.psr.pu = true;
    ctx.step();
    assert_eq!(ctx.cpu.pc, 0x0000_3000);
    assert!(!ctx.cpu.cr.psr.u);
}

#[test]
fn interrupt_taken_after_high_half() {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[NOP, NOP]);
    ctx.cpu.cr.psr.im = true;
    ctx.cpu.set_irq_line(true);
    ctx.step();

    let psr = ctx.cpu.cr.psr;
    assert!(psr.intr);
    assert!(!psr.im && psr.pim);
    assert!(ctx.cpu.cr.epsr.int);
    assert_eq!(ctx.cpu.pc, TRAP_VECTOR);
    assert_eq!(ctx.cpu.cr.fir, PROGRAM_BASE + 8);
    assert_eq!(ctx.cpu.stats.interrupts, 1);
    assert_eq!(ctx.cpu.stats.traps, 1);
}

#[test]
fn interrupt_waits_for_a_high_word() {
    let mut ctx =
        TestContext::new().load_program(PROGRAM_BASE, &[encode::branch(opcodes::BC, 8), NOP]);
    let target = PROGRAM_BASE + 4 + 32;
    ctx.poke_words(target, &[NOP]);
    ctx.cpu.cr.psr.cc = true;
    ctx.cpu.cr.psr.im = true;
    ctx.cpu.set_irq_line(true);

    ctx.step();
    assert!(!ctx.cpu.cr.psr.intr);
    assert_eq!(ctx.cpu.pc, target);

    // The target is a high word, so the next step samples the pin.
    ctx.step();
    assert!(ctx.cpu.cr.psr.intr);
    assert_eq!(ctx.cpu.cr.fir, target + 4);
}

#[rstest]
#[case::masked(false, DimState::None)]
#[case::dual_mode(true, DimState::Full)]
fn interrupt_not_taken(#[case] im: bool, #[case] dim: DimState) {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[NOP, NOP]);
    ctx.cpu.cr.psr.im = im;
    ctx.cpu.dim = dim;
    ctx.cpu.set_irq_line(true);
    ctx.step();
    assert!(!ctx.cpu.cr.psr.intr);
    assert_eq!(ctx.cpu.pc, PROGRAM_BASE + 8);
}

#[test]
fn unassigned_opcode_is_an_instruction_trap() {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[0x06 << 26, NOP]);
    ctx.step();
    assert!(ctx.cpu.cr.psr.it);
    assert_eq!(ctx.cpu.cr.fir, PROGRAM_BASE);
}

#[rstest]
#[case(true, true)]
#[case(false, false)]
fn intovr_traps_only_on_overflow(#[case] of: bool, #[case] traps: bool) {
    let intovr = encode::core_escape(opcodes::ESC_INTOVR, 0);
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[intovr, NOP]);
    ctx.cpu.cr.epsr.of = of;
    ctx.step();
    assert_eq!(ctx.cpu.cr.psr.it, traps);
    let expected = if traps { TRAP_VECTOR } else { PROGRAM_BASE + 8 };
    assert_eq!(ctx.cpu.pc, expected);
}

#[test]
fn unmapped_fetch_is_an_instruction_access_trap() {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[NOP, NOP]);
    ctx.cpu.cr.dirbase.dtb = 0x0001_0000;
    ctx.cpu.cr.dirbase.ate = true;
    ctx.step();
    assert!(ctx.cpu.cr.psr.iat);
    assert_eq!(ctx.cpu.cr.fir, PROGRAM_BASE);
    assert_eq!(ctx.cpu.pc, TRAP_VECTOR);
}

#[test]
fn debugger_fetch_leaves_trap_bits_alone() {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[NOP, NOP]);
    ctx.cpu.cr.dirbase.dtb = 0x0001_0000;
    ctx.cpu.cr.dirbase.ate = true;
    ctx.cpu.cr.psr.dat = true;
    assert_eq!(ctx.cpu.fetch_no_trap(PROGRAM_BASE), None);
    assert!(!ctx.cpu.cr.psr.iat);
    assert!(ctx.cpu.cr.psr.dat);

    ctx.cpu.cr.dirbase.ate = false;
    assert_eq!(ctx.cpu.fetch_no_trap(PROGRAM_BASE + 4), Some(NOP));
}
