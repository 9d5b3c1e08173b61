//! i860 Integer Register File.
//!
//! This module implements the integer register file. It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`r0`-`r31`).
//! 2. **Invariant Enforcement:** Ensures that register `r0` reads as zero and ignores writes.
//! 3. **Debugging:** Formats the complete register state for the debug console.

use std::fmt::Write as _;

/// Integer register file.
///
/// Register `r1` receives return addresses from `call`/`calli`; `r0` is hardwired to zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; 32],
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpr {
    /// Creates a new integer register file with all registers zero.
    pub const fn new() -> Self {
        Self { regs: [0; 32] }
    }

    /// Reads an integer register. `r0` always returns 0.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31); higher bits are ignored.
    #[inline(always)]
    pub const fn read(&self, idx: usize) -> u32 {
        let idx = idx & 0x1f;
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes an integer register. Writes to `r0` are discarded.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31); higher bits are ignored.
    /// * `val` - The 32-bit value to write.
    #[inline(always)]
    pub fn write(&mut self, idx: usize, val: u32) {
        let idx = idx & 0x1f;
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Fills every register except `r0` with `pattern | index`.
    pub fn fill_undefined(&mut self, pattern: u32) {
        for (i, r) in self.regs.iter_mut().enumerate().skip(1) {
            *r = pattern | i as u32;
        }
        self.regs[0] = 0;
    }

    /// Formats all integer registers, four per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for row in (0..32).step_by(4) {
            for i in row..row + 4 {
                let _ = write!(out, "r{:<2}={:08x} ", i, self.read(i));
            }
            out.push('\n');
        }
        out
    }
}
