//! Intel i860 XR execution core.
//!
//! This crate implements the i860 XR integer, floating-point and graphics
//! units for use inside a board emulator:
//! 1. **Core:** Register files, control registers, dual-instruction mode, delayed branches and traps.
//! 2. **Units:** Pipelined adder, multiplier, load and graphics pipes; MMU with TLB; instruction cache.
//! 3. **ISA:** Decoding of the primary, core-escape and FP-escape opcode spaces, plus a disassembler.
//! 4. **SoC:** The bus trait the board implements, byte-order tables and a flat RAM board.
//! 5. **Simulation:** Image loader, control mailbox, threaded run loop and telemetry.

/// Common types and constants (addresses, traps, host errors).
pub mod common;
/// Core configuration (defaults, JSON loading, validation).
pub mod config;
/// CPU core (architectural state, execution, units).
pub mod core;
/// Instruction set (decode, opcode tables, disassembly).
pub mod isa;
/// Image loader, mailbox and threaded runner.
pub mod sim;
/// Board-side bus trait, byte-order tables and flat RAM.
pub mod soc;
/// Run-time counters and telemetry reports.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// The execution core.
pub use crate::core::Cpu;
/// Board collaborator trait and the flat RAM board.
pub use crate::soc::{Bus, FlatMemory};
