//! ALU arithmetic operations.
//!
//! Flag rules, with operands in assembler order `op src1, src2, dest`:
//!
//! | Op   | Result        | CC                      | OF                     |
//! |------|---------------|-------------------------|------------------------|
//! | addu | src1 + src2   | carry out of bit 31     | same as CC             |
//! | subu | src1 − src2   | src2 ≤ src1 (unsigned)  | !CC                    |
//! | adds | src1 + src2   | src2 < −src1 (signed)   | signed overflow        |
//! | subs | src1 − src2   | src2 > src1 (signed)    | signed overflow        |

use super::{AluOp, AluOutput};

const SIGN: u32 = 0x8000_0000;

/// Executes an add/subtract operation. Returns a zero result for other ops.
pub fn execute(op: AluOp, src1: u32, src2: u32) -> AluOutput {
    match op {
        AluOp::Addu => {
            let (value, carry) = src1.overflowing_add(src2);
            AluOutput {
                value,
                cc: Some(carry),
                of: Some(carry),
            }
        }
        AluOp::Subu => {
            let value = src1.wrapping_sub(src2);
            let cc = src2 <= src1;
            AluOutput {
                value,
                cc: Some(cc),
                of: Some(!cc),
            }
        }
        AluOp::Adds => {
            let value = src1.wrapping_add(src2);
            let (sa, sb, sr) = (src1 & SIGN, src2 & SIGN, value & SIGN);
            AluOutput {
                value,
                cc: Some((src2 as i32) < (src1 as i32).wrapping_neg()),
                of: Some(sa == sb && sa != sr),
            }
        }
        AluOp::Subs => {
            let value = src1.wrapping_sub(src2);
            let (sa, sb, sr) = (src1 & SIGN, src2 & SIGN, value & SIGN);
            AluOutput {
                value,
                cc: Some((src2 as i32) > (src1 as i32)),
                of: Some(sa != sb && sa != sr),
            }
        }
        _ => AluOutput::default(),
    }
}
