//! Control Register Access Logic.
//!
//! This module implements `ld.c`/`st.c` for the CPU. It performs the following:
//! 1. **Read Operations:** returns control register values, latching FIR once per trap.
//! 2. **Write Operations:** applies per-register masks for read-only and supervisor-only bits.
//! 3. **Side Effect Management:** TLB and I-cache invalidation, bus byte-order swaps and the
//!    floating-point rounding mode.

use tracing::debug;

use super::Cpu;
use crate::core::arch::creg::CtrlReg;
use crate::core::arch::dirbase::Dirbase;
use crate::soc::BusTable;

impl Cpu {
    /// Reads a control register as `ld.c` sees it.
    ///
    /// The first FIR read after a trap returns the faulting address; later reads
    /// return the address of the reading instruction.
    pub fn read_creg(&mut self, reg: CtrlReg) -> u32 {
        match reg {
            CtrlReg::Fir if self.fir_gets_trap_addr => {
                self.fir_gets_trap_addr = false;
                self.cr.fir
            }
            CtrlReg::Fir => self.pc,
            _ => self.cr.raw(reg),
        }
    }

    /// Writes a control register as `st.c` does, applying its side effects.
    pub fn write_creg(&mut self, reg: CtrlReg, val: u32) {
        let user = self.cr.psr.u;
        match reg {
            CtrlReg::Fir => {
                debug!(target: "i860::creg", val = format_args!("{val:#010x}"), "write to fir ignored");
            }
            CtrlReg::Psr => self.cr.psr.write(val, user),
            CtrlReg::Dirbase => self.write_dirbase(Dirbase::from_bits(val)),
            CtrlReg::Db => self.cr.db = val,
            CtrlReg::Fsr => {
                self.cr.fsr.write(val);
                self.fp.set_rounding(self.cr.fsr.rm);
            }
            CtrlReg::Epsr => {
                let was_big = self.cr.epsr.be;
                self.cr.epsr.write(val, user);
                if self.cr.epsr.be != was_big {
                    self.table = BusTable::for_big_endian(self.cr.epsr.be);
                    debug!(target: "i860::creg", order = ?self.table.order(), "bus byte order switched");
                }
            }
        }
    }

    fn write_dirbase(&mut self, mut next: Dirbase) {
        if next.iti {
            self.mmu.flush();
            self.icache.invalidate();
            next.iti = false;
            debug!(target: "i860::creg", "tlb and i-cache invalidated");
        } else if next.ate != self.cr.dirbase.ate || next.dtb != self.cr.dirbase.dtb {
            self.icache.invalidate();
            debug!(target: "i860::creg", ate = next.ate, dtb = format_args!("{:#x}", next.dtb), "i-cache invalidated");
        }
        self.cr.dirbase = next;
    }
}
