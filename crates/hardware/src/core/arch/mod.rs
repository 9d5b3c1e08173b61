//! i860 architectural state.
//!
//! Register records with their bit layouts and write rules:
//! 1. **Register files:** integer ([`gpr`]) and floating ([`fpr`]) registers.
//! 2. **Control registers:** [`psr`], [`epsr`], [`dirbase`], [`fsr`] and the [`creg`] file that groups them.
//! 3. **Dual-instruction mode:** the [`dim`] state machine and its trap snapshot.

/// Control register file and index decoding.
pub mod creg;

/// Dual-instruction mode state.
pub mod dim;

/// Directory base register.
pub mod dirbase;

/// Extended processor status register.
pub mod epsr;

/// Floating-point register file.
pub mod fpr;

/// Floating-point status register.
pub mod fsr;

/// Integer register file.
pub mod gpr;

/// Processor status register.
pub mod psr;
