//! Unified register file.
//!
//! Groups the integer and floating register files with the dual-operation
//! scalars (KR, KI, T) and the graphics MERGE register, and formats them for
//! the debug console.

use std::fmt::Write;

use crate::core::arch::fpr::Fpr;
use crate::core::arch::gpr::Gpr;

/// Data registers visible to instructions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterFile {
    /// Integer registers.
    pub gpr: Gpr,
    /// Floating registers.
    pub fpr: Fpr,
    /// KR constant (dual operations).
    pub kr: f64,
    /// KI constant (dual operations).
    pub ki: f64,
    /// T transfer register (dual operations).
    pub t: f64,
    /// Graphics MERGE register.
    pub merge: u64,
}

impl RegisterFile {
    /// Creates a register file with everything zero.
    pub const fn new() -> Self {
        Self {
            gpr: Gpr::new(),
            fpr: Fpr::new(),
            kr: 0.0,
            ki: 0.0,
            t: 0.0,
            merge: 0,
        }
    }

    /// Puts every register in its post-reset state.
    pub fn reset(&mut self, pattern: u32) {
        self.gpr.fill_undefined(pattern);
        self.fpr.fill_undefined(pattern);
        self.kr = 0.0;
        self.ki = 0.0;
        self.t = 0.0;
        self.merge = 0;
    }

    /// Formats integer, floating and special registers.
    pub fn dump(&self) -> String {
        let mut out = self.gpr.dump();
        out.push_str(&self.fpr.dump());
        let _ = writeln!(
            out,
            "KR={:016x} KI={:016x} T={:016x} MERGE={:016x}",
            self.kr.to_bits(),
            self.ki.to_bits(),
            self.t.to_bits(),
            self.merge
        );
        out
    }
}
