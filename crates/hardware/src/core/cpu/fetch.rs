//! Instruction Fetch.
//!
//! Instructions are fetched as 64-bit aligned pairs through the instruction
//! cache. A miss translates the pair address, reads the pair from the bus and
//! fills the line. Instruction memory is always read little-endian.

use super::Cpu;
use crate::common::constants::{INSN_BYTES, PAIR_BYTES};
use crate::common::{AccessType, Trap, VirtAddr};
use crate::core::arch::psr::{Psr, TRAP_BITS_MASK};

impl Cpu {
    /// Returns the instruction word at `pc`.
    ///
    /// # Errors
    ///
    /// An instruction-access trap when the pair address does not translate.
    pub(crate) fn fetch(&mut self, pc: u32) -> Result<u32, Trap> {
        let pair = match self.icache.lookup(pc) {
            Some(pair) => pair,
            None => {
                let line = pc & !(PAIR_BYTES - 1);
                let paddr = self.translate(VirtAddr::new(line), AccessType::Fetch)?;
                let pair = self.bus.read_u64_le(paddr);
                self.icache.fill(pc, pair);
                pair
            }
        };
        Ok(if pc & INSN_BYTES == 0 {
            pair as u32
        } else {
            (pair >> 32) as u32
        })
    }

    /// Fetches for the debugger: a failed translation leaves the PSR trap bits untouched.
    pub fn fetch_no_trap(&mut self, pc: u32) -> Option<u32> {
        let kept = self.cr.psr.bits() & TRAP_BITS_MASK;
        let word = self.fetch(pc).ok();
        self.cr.psr = Psr::from_bits((self.cr.psr.bits() & !TRAP_BITS_MASK) | kept);
        word
    }
}
