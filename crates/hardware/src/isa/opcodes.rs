//! i860 primary opcodes.
//!
//! Defines the 6-bit primary opcodes (bits 31-26). In the 0x20..0x3F integer
//! range the odd opcode of each pair is the immediate form.

/// Load byte, register + register.
pub const LD_B_RR: u32 = 0x00;
/// Load byte, displacement + register.
pub const LD_B_RI: u32 = 0x01;
/// Transfer integer register to floating register.
pub const IXFR: u32 = 0x02;
/// Store byte.
pub const ST_B: u32 = 0x03;
/// Load short/long, register + register (bit 0 selects long).
pub const LD_SL_RR: u32 = 0x04;
/// Load short/long, displacement + register.
pub const LD_SL_RI: u32 = 0x05;
/// Store short/long.
pub const ST_SL: u32 = 0x07;
/// Floating load, register + register.
pub const FLD_RR: u32 = 0x08;
/// Floating load, displacement + register.
pub const FLD_RI: u32 = 0x09;
/// Floating store, register + register.
pub const FST_RR: u32 = 0x0A;
/// Floating store, displacement + register.
pub const FST_RI: u32 = 0x0B;
/// Load control register.
pub const LD_C: u32 = 0x0C;
/// Cache flush.
pub const FLUSH: u32 = 0x0D;
/// Store control register.
pub const ST_C: u32 = 0x0E;
/// Pixel store.
pub const PST_D: u32 = 0x0F;
/// Branch indirect (and trap return).
pub const BRI: u32 = 0x10;
/// Software trap.
pub const TRAP: u32 = 0x11;
/// Floating-point escape; refined by bits 6-0.
pub const FP_ESCAPE: u32 = 0x12;
/// Core escape; refined by bits 2-0.
pub const CORE_ESCAPE: u32 = 0x13;
/// Branch if not equal, register form.
pub const BTNE: u32 = 0x14;
/// Branch if not equal, 5-bit immediate form.
pub const BTNE_I: u32 = 0x15;
/// Branch if equal, register form.
pub const BTE: u32 = 0x16;
/// Branch if equal, 5-bit immediate form.
pub const BTE_I: u32 = 0x17;
/// Pipelined floating load, register + register.
pub const PFLD_RR: u32 = 0x18;
/// Pipelined floating load, displacement + register.
pub const PFLD_RI: u32 = 0x19;
/// Branch direct.
pub const BR: u32 = 0x1A;
/// Call.
pub const CALL: u32 = 0x1B;
/// Branch on CC.
pub const BC: u32 = 0x1C;
/// Branch on CC, delayed.
pub const BC_T: u32 = 0x1D;
/// Branch on not CC.
pub const BNC: u32 = 0x1E;
/// Branch on not CC, delayed.
pub const BNC_T: u32 = 0x1F;
/// Add unsigned.
pub const ADDU: u32 = 0x20;
/// Subtract unsigned.
pub const SUBU: u32 = 0x22;
/// Add signed.
pub const ADDS: u32 = 0x24;
/// Subtract signed.
pub const SUBS: u32 = 0x26;
/// Shift left.
pub const SHL: u32 = 0x28;
/// Shift right logical.
pub const SHR: u32 = 0x2A;
/// Shift right double.
pub const SHRD: u32 = 0x2C;
/// Branch on LCC and add.
pub const BLA: u32 = 0x2D;
/// Shift right arithmetic.
pub const SHRA: u32 = 0x2E;
/// And.
pub const AND: u32 = 0x30;
/// And high (immediate << 16).
pub const ANDH: u32 = 0x33;
/// And-not.
pub const ANDNOT: u32 = 0x34;
/// And-not high.
pub const ANDNOTH: u32 = 0x37;
/// Or.
pub const OR: u32 = 0x38;
/// Or high.
pub const ORH: u32 = 0x3B;
/// Exclusive or.
pub const XOR: u32 = 0x3C;
/// Exclusive or high.
pub const XORH: u32 = 0x3F;

/// Core escape: `lock`.
pub const ESC_LOCK: u32 = 1;
/// Core escape: `calli`.
pub const ESC_CALLI: u32 = 2;
/// Core escape: `intovr`.
pub const ESC_INTOVR: u32 = 4;
/// Core escape: `unlock`.
pub const ESC_UNLOCK: u32 = 7;
