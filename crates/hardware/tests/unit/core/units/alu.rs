//! ALU result and flag rules.

use i860_core::core::units::alu::{Alu, AluOp, AluOutput};
use i860_core::core::units::alu::shifts::shrd;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

fn out(value: u32, cc: Option<bool>, of: Option<bool>) -> AluOutput {
    AluOutput { value, cc, of }
}

#[rstest]
#[case::addu_plain(AluOp::Addu, 1, 2, out(3, Some(false), Some(false)))]
#[case::addu_carry(AluOp::Addu, 0x8000_0000, 0x8000_0000, out(0, Some(true), Some(true)))]
#[case::subu_no_borrow(AluOp::Subu, 5, 5, out(0, Some(true), Some(false)))]
#[case::subu_borrow(AluOp::Subu, 0, 1, out(0xffff_ffff, Some(false), Some(true)))]
#[case::adds_negative_sum(AluOp::Adds, 1, 0xffff_fffe, out(0xffff_ffff, Some(true), Some(false)))]
#[case::adds_overflow(AluOp::Adds, 0x4000_0000, 0x4000_0000, out(0x8000_0000, Some(false), Some(true)))]
#[case::subs_less(AluOp::Subs, 1, 2, out(0xffff_ffff, Some(true), Some(false)))]
#[case::subs_overflow(AluOp::Subs, 0x7fff_ffff, 0xffff_ffff, out(0x8000_0000, Some(false), Some(true)))]
fn arithmetic_flags(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: AluOutput) {
    assert_eq!(Alu::execute(op, a, b), expected);
}

#[rstest]
#[case::and(AluOp::And, 0xf0f0, 0x0ff0, 0x00f0)]
#[case::andnot(AluOp::AndNot, 0xf0f0, 0x0ff0, 0x0f00)]
#[case::or(AluOp::Or, 0xf000, 0x000f, 0xf00f)]
#[case::xor(AluOp::Xor, 0xffff, 0x0ff0, 0xf00f)]
fn logic_sets_cc_only_on_zero(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] value: u32) {
    let got = Alu::execute(op, a, b);
    assert_eq!(got, out(value, Some(false), None));
    assert_eq!(Alu::execute(op, 0, 0).cc, Some(true));
}

#[rstest]
#[case::shl(AluOp::Shl, 4, 0x0000_00ff, 0x0000_0ff0)]
#[case::shr(AluOp::Shr, 4, 0xf000_0000, 0x0f00_0000)]
#[case::shra(AluOp::Shra, 4, 0xf000_0000, 0xff00_0000)]
#[case::count_masked(AluOp::Shl, 33, 1, 2)]
fn shifts_leave_flags(#[case] op: AluOp, #[case] count: u32, #[case] value: u32, #[case] expected: u32) {
    assert_eq!(Alu::execute(op, count, value), out(expected, None, None));
}

#[test]
fn shrd_takes_low_word_of_pair() {
    assert_eq!(shrd(0x0000_00ab, 0x1234_5678, 8), 0xab12_3456);
    assert_eq!(shrd(0xdead_beef, 0x1234_5678, 0), 0x1234_5678);
}

proptest! {
    #[test]
    fn subu_cc_is_no_borrow(a: u32, b: u32) {
        let got = Alu::execute(AluOp::Subu, a, b);
        prop_assert_eq!(got.value, a.wrapping_sub(b));
        prop_assert_eq!(got.cc, Some(b <= a));
        prop_assert_eq!(got.of, got.cc.map(|c| !c));
    }

    #[test]
    fn adds_matches_checked_arithmetic(a: i32, b: i32) {
        let got = Alu::execute(AluOp::Adds, a as u32, b as u32);
        prop_assert_eq!(got.value, a.wrapping_add(b) as u32);
        prop_assert_eq!(got.of, Some(a.checked_add(b).is_none()));
    }
}
