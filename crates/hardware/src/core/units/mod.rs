//! Execution units and functional components.
//!
//! State-free or self-contained units used by the CPU: the integer ALU, the
//! floating-point support code, the MMU with its TLB and page walker, and the
//! instruction cache.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Instruction-pair cache.
pub mod cache;

/// Floating-point arithmetic, pipelines and graphics primitives.
pub mod fpu;

/// Memory Management Unit with TLB and page table walker.
pub mod mmu;
