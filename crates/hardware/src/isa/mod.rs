//! Instruction Set Architecture (ISA) definitions.
//!
//! Opcode constants, field extraction, the two-level decoder and the
//! disassembler interface.
//!
//! # Modules
//!
//! * `opcodes`: primary opcodes and core-escape sub-opcodes.
//! * `fp_escape`: floating-point escape sub-opcodes.
//! * `instruction`: the [`Instruction`] word and its fields.
//! * `decode`: the precomputed decode table.
//! * `disasm`: the [`Disassembler`] trait and a basic implementation.

/// Instruction decoding into operation classes.
pub mod decode;

/// Disassembler interface and built-in implementation.
pub mod disasm;

/// Floating-point escape sub-opcodes.
pub mod fp_escape;

/// Instruction word and field accessors.
pub mod instruction;

/// Primary and core-escape opcodes.
pub mod opcodes;

pub use decode::{Op, decode};
pub use disasm::{BasicDisassembler, Disassembler};
pub use instruction::Instruction;
