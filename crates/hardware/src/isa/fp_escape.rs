//! Floating-point escape sub-opcodes.
//!
//! Under primary opcode 0x12 bits 6-0 select the operation. Bits 10-7 carry
//! the pipelining (P), dual-instruction (D), source-precision (S) and
//! result-precision (R) flags.

/// First dual-operation add form (`pfam`/`pfmam`, DPC in bits 3-0).
pub const DUAL_ADD_FIRST: u32 = 0x00;
/// Last dual-operation add form.
pub const DUAL_ADD_LAST: u32 = 0x0F;
/// First dual-operation subtract form (`pfsm`/`pfmsm`).
pub const DUAL_SUB_FIRST: u32 = 0x10;
/// Last dual-operation subtract form.
pub const DUAL_SUB_LAST: u32 = 0x1F;
/// Multiply.
pub const FMUL: u32 = 0x20;
/// Multiply low (integer).
pub const FMLOW: u32 = 0x21;
/// Reciprocal.
pub const FRCP: u32 = 0x22;
/// Reciprocal square root.
pub const FRSQR: u32 = 0x23;
/// Three-stage pipelined multiply.
pub const PFMUL3: u32 = 0x24;
/// Add.
pub const FADD: u32 = 0x30;
/// Subtract.
pub const FSUB: u32 = 0x31;
/// Convert to integer (rounded).
pub const FIX: u32 = 0x32;
/// Adder move.
pub const FAMOV: u32 = 0x33;
/// Compare greater-than (R = 0) or less-or-equal (R = 1).
pub const PFGT: u32 = 0x34;
/// Compare equal.
pub const PFEQ: u32 = 0x35;
/// Convert to integer (truncated).
pub const FTRUNC: u32 = 0x3A;
/// Transfer floating register to integer register.
pub const FXFR: u32 = 0x40;
/// Integer add on the graphics unit.
pub const FIADD: u32 = 0x49;
/// Integer subtract on the graphics unit.
pub const FISUB: u32 = 0x4D;
/// Pixel add.
pub const FADDP: u32 = 0x50;
/// Z-buffer add.
pub const FADDZ: u32 = 0x51;
/// 32-bit z-buffer check.
pub const FZCHKL: u32 = 0x57;
/// Or with MERGE.
pub const FORM: u32 = 0x5A;
/// 16-bit z-buffer check.
pub const FZCHKS: u32 = 0x5F;
