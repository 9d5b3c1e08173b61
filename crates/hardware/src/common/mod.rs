//! Common utilities and types used throughout the i860 execution core.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Address Types:** Strong types for virtual and physical 32-bit addresses.
//! 2. **Constants:** Architectural vectors, page geometry and encoding constants.
//! 3. **Memory Access:** Access classification and operand widths.
//! 4. **Error Handling:** Architectural trap values and host-level errors.
//! 5. **Register Management:** A unified view of the integer and floating register files.

/// Address type definitions (physical and virtual addresses).
pub mod addr;

/// Common constants used throughout the core.
pub mod constants;

/// Memory access type and operand width definitions.
pub mod data;

/// Trap values and host error types.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use addr::{PhysAddr, VirtAddr};
pub use constants::{PAGE_SHIFT, TRAP_VECTOR};
pub use data::{AccessType, Width};
pub use error::{CoreError, ExecResult, Trap, TrapKind};
pub use reg::RegisterFile;
