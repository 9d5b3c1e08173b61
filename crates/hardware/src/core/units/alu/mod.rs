//! Arithmetic Logic Unit (ALU).
//!
//! Pure integer operations used by the integer instruction routines. Each
//! operation returns its result together with the flags it defines; the caller
//! commits flags before the destination register so that aliased operands are
//! observed with their original values.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: addu, subu, adds, subs
//! - [`logic`]:      and, andnot, or, xor
//! - [`shifts`]:     shl, shr, shra, shrd

/// Integer add/subtract with carry and overflow flags.
pub mod arithmetic;

/// Bitwise logical operations.
pub mod logic;

/// Shift operations.
pub mod shifts;

/// Integer ALU operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// Unsigned add.
    Addu,
    /// Unsigned subtract.
    Subu,
    /// Signed add.
    Adds,
    /// Signed subtract.
    Subs,
    /// Bitwise and.
    And,
    /// `!src1 & src2`.
    AndNot,
    /// Bitwise or.
    Or,
    /// Bitwise exclusive or.
    Xor,
    /// Shift left.
    Shl,
    /// Logical shift right.
    Shr,
    /// Arithmetic shift right.
    Shra,
}

/// Result of an ALU operation.
///
/// `cc` and `of` are `None` when the operation leaves that flag untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AluOutput {
    /// Destination value.
    pub value: u32,
    /// New PSR.CC.
    pub cc: Option<bool>,
    /// New EPSR.OF.
    pub of: Option<bool>,
}

/// Integer ALU.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alu;

impl Alu {
    /// Executes `op` with operands in assembler order (`src1`, `src2`).
    ///
    /// # Examples
    ///
    /// ```
    /// use i860_core::core::units::alu::{Alu, AluOp};
    ///
    /// let out = Alu::execute(AluOp::Addu, 0xffff_ffff, 1);
    /// assert_eq!(out.value, 0);
    /// assert_eq!(out.cc, Some(true));
    /// assert_eq!(out.of, Some(true));
    /// ```
    pub fn execute(op: AluOp, src1: u32, src2: u32) -> AluOutput {
        match op {
            AluOp::Addu | AluOp::Subu | AluOp::Adds | AluOp::Subs => {
                arithmetic::execute(op, src1, src2)
            }
            AluOp::And | AluOp::AndNot | AluOp::Or | AluOp::Xor => logic::execute(op, src1, src2),
            AluOp::Shl | AluOp::Shr | AluOp::Shra => AluOutput {
                value: shifts::execute(op, src1, src2),
                cc: None,
                of: None,
            },
        }
    }
}
