//! ALU logical operations.
//!
//! All logical operations set CC when the result is zero and leave OF alone.

use super::{AluOp, AluOutput};

/// Executes a logical operation. Returns a zero result for other ops.
pub fn execute(op: AluOp, src1: u32, src2: u32) -> AluOutput {
    let value = match op {
        AluOp::And => src1 & src2,
        AluOp::AndNot => !src1 & src2,
        AluOp::Or => src1 | src2,
        AluOp::Xor => src1 ^ src2,
        _ => return AluOutput::default(),
    };
    AluOutput {
        value,
        cc: Some(value == 0),
        of: None,
    }
}
