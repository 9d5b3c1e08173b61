//! Global Architectural Constants.
//!
//! This module defines constants used across the core. It includes:
//! 1. **Memory Constants:** Page sizes, masks and shifts for the two-level walk.
//! 2. **Vectors:** The fixed trap and reset entry point.
//! 3. **Encoding Constants:** Field widths of the instruction word and dispatch table geometry.
//! 4. **Run Loop Constants:** Reset fill pattern and telemetry scaling.

/// Page size in bytes (4 KiB).
pub const PAGE_SIZE: u32 = 4096;

/// Number of bits to shift to convert between bytes and pages.
pub const PAGE_SHIFT: u32 = 12;

/// Mask for extracting the page offset from an address.
pub const PAGE_OFFSET_MASK: u32 = PAGE_SIZE - 1;

/// Mask for extracting the page frame from an address or page-table entry.
pub const PAGE_FRAME_MASK: u32 = !PAGE_OFFSET_MASK;

/// Fixed trap vector. Every trap and reset transfers control here.
pub const TRAP_VECTOR: u32 = 0xFFFF_FF00;

/// Reset entry point (same as the trap vector on the i860).
pub const RESET_VECTOR: u32 = TRAP_VECTOR;

/// Size of one instruction word in bytes.
pub const INSN_BYTES: u32 = 4;

/// Size of one aligned instruction pair in bytes.
pub const PAIR_BYTES: u32 = 8;

/// Number of architecturally defined control registers (FIR..EPSR).
pub const NUM_CREGS: u32 = 6;

/// Number of integer registers.
pub const NUM_IREGS: usize = 32;

/// Number of 32-bit floating register lanes.
pub const NUM_FREGS: usize = 32;

/// Width of the primary opcode field.
pub const PRIMARY_BITS: u32 = 6;

/// Width of the extended opcode field used by the FP escape.
pub const EXTENDED_BITS: u32 = 7;

/// Entries in the flat dispatch table (primary x extended).
pub const DISPATCH_ENTRIES: usize = 1 << (PRIMARY_BITS + EXTENDED_BITS);

/// `d.fnop`: the core no-op encoding carrying the dual-instruction bit.
pub const DUAL_FNOP: u32 = 0xB000_0200;

/// Default fill for "undefined" registers at reset, OR'd with the register index.
pub const UNDEFINED_PATTERN: u32 = 0xDEAD_BE00;
