//! ALU shift operations.
//!
//! The shift count is `src1` masked to 5 bits; `src2` is the value shifted.

use super::AluOp;

/// Bit mask for a shift count (0–31).
pub const SHAMT_MASK: u32 = 0x1f;

/// Executes a shift. Returns `0` for non-shift opcodes.
pub fn execute(op: AluOp, src1: u32, src2: u32) -> u32 {
    let sh = src1 & SHAMT_MASK;
    match op {
        AluOp::Shl => src2 << sh,
        AluOp::Shr => src2 >> sh,
        AluOp::Shra => ((src2 as i32) >> sh) as u32,
        _ => 0,
    }
}

/// Double shift right: the 64-bit value `src1:src2` shifted right by the PSR
/// shift count, low word returned.
pub const fn shrd(src1: u32, src2: u32, sc: u32) -> u32 {
    let sc = sc & SHAMT_MASK;
    if sc == 0 {
        src2
    } else {
        (src2 >> sc) | (src1 << (32 - sc))
    }
}
