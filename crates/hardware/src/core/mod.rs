//! Core processor implementation.
//!
//! This module contains the i860 XR execution core: the architectural
//! register records, the CPU with its step loop and trap machine, the
//! instruction routines and the execution units they drive.

/// Architecture-specific components (control registers, register files, DIM state).
pub mod arch;

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Instruction execution routines, one per decoded operation.
pub mod exec;

/// Execution units (ALU, FPU pipes, MMU, instruction cache).
pub mod units;

pub use self::cpu::Cpu;
