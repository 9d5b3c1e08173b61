//! Compare-and-branch instructions.

use i860_core::isa::opcodes;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::encode::{self, NOP};
use crate::common::harness::{PROGRAM_BASE, TestContext};

const INC_R6: u32 = encode::addu_i(1, 6, 6);
const TAKEN: u32 = PROGRAM_BASE + 4 + 16;

#[rstest]
#[case::bte_equal(opcodes::BTE, 9, 9, true)]
#[case::bte_differs(opcodes::BTE, 9, 8, false)]
#[case::btne_equal(opcodes::BTNE, 9, 9, false)]
#[case::btne_differs(opcodes::BTNE, 9, 8, true)]
fn register_forms(#[case] op: u32, #[case] a: u32, #[case] b: u32, #[case] taken: bool) {
    let mut ctx =
        TestContext::new().load_program(PROGRAM_BASE, &[encode::split(op, 1, 2, 4), INC_R6]);
    ctx.set_reg(1, a);
    ctx.set_reg(2, b);
    ctx.set_reg(6, 0);
    ctx.step();
    if taken {
        assert_eq!(ctx.cpu.pc, TAKEN);
        assert_eq!(ctx.reg(6), 0);
    } else {
        assert_eq!(ctx.cpu.pc, PROGRAM_BASE + 8);
        assert_eq!(ctx.reg(6), 1);
    }
}

#[rstest]
#[case(opcodes::BTE_I, 5, true)]
#[case(opcodes::BTE_I, 6, false)]
#[case(opcodes::BTNE_I, 5, false)]
#[case(opcodes::BTNE_I, 31, true)]
fn immediate_forms_compare_the_src1_field(#[case] op: u32, #[case] src2: u32, #[case] taken: bool) {
    // The src1 field holds the literal 5; r5 holds something else.
    let mut ctx =
        TestContext::new().load_program(PROGRAM_BASE, &[encode::split(op, 5, 2, 4), NOP]);
    ctx.set_reg(5, 0x0bad_0bad);
    ctx.set_reg(2, src2);
    ctx.step();
    let expected = if taken { TAKEN } else { PROGRAM_BASE + 8 };
    assert_eq!(ctx.cpu.pc, expected);
}

#[test]
fn bte_backwards_offset() {
    let mut ctx =
        TestContext::new().load_program(0x2000, &[encode::split(opcodes::BTE, 0, 0, -2), NOP]);
    ctx.step();
    assert_eq!(ctx.cpu.pc, 0x2000 + 4 - 8);
}

#[test]
fn bc_does_not_run_a_delay_slot() {
    let mut ctx =
        TestContext::new().load_program(PROGRAM_BASE, &[encode::branch(opcodes::BC, 4), INC_R6]);
    ctx.set_reg(6, 0);
    ctx.cpu.cr.psr.cc = true;
    ctx.step();
    assert_eq!(ctx.reg(6), 0);
    assert_eq!(ctx.cpu.pc, TAKEN);
}
