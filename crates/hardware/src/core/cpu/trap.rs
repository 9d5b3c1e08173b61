//! Trap Handling Logic.
//!
//! This module implements trap entry and the state restore performed by `bri`. It performs
//! the following:
//! 1. **Context Saving:** snapshots the dual-instruction-mode state and fills FIR.
//! 2. **Privilege Switch:** saves U/IM into PU/PIM, enters supervisor mode with interrupts off.
//! 3. **Vectoring:** forces the program counter to the trap vector.
//! 4. **Return Handling:** restores privilege, interrupt mask and DIM state on return.

use tracing::debug;

use super::Cpu;
use crate::common::{TRAP_VECTOR, Trap};
use crate::core::arch::dim::{DimSnapshot, DimState};

impl Cpu {
    /// Enters the trap handler.
    ///
    /// The PSR trap-status bit for `trap` is already set by whoever raised it.
    /// FIR receives the faulting instruction's address, the address after the
    /// branch for a delay-slot fault, or the next instruction for an external
    /// interrupt.
    pub fn enter_trap(&mut self, trap: Trap) {
        self.saved = DimSnapshot {
            dim: self.dim,
            dim_cc: self.dim_cc,
            dim_cc_valid: self.dim_cc_valid,
            dim_op: self.flow.dim_op,
        };
        self.dim = DimState::None;
        self.dim_cc = false;
        self.dim_cc_valid = false;

        self.cr.fir = if trap.in_delay_slot {
            self.pc.wrapping_add(4)
        } else {
            self.pc
        };
        self.fir_gets_trap_addr = true;

        let psr = &mut self.cr.psr;
        psr.pu = psr.u;
        psr.pim = psr.im;
        psr.u = false;
        psr.im = false;
        psr.dim = false;
        psr.ds = false;

        self.stats.traps += 1;
        if trap.external {
            self.stats.interrupts += 1;
        }
        debug!(
            target: "i860::trap",
            %trap,
            fir = format_args!("{:#010x}", self.cr.fir),
            psr = format_args!("{:#010x}", self.cr.psr.bits()),
            dim = ?self.saved.dim,
            "trap entry"
        );
        self.pc = TRAP_VECTOR;
    }

    /// Undoes trap entry for `bri` when it returns from a handler.
    pub(crate) fn return_from_trap(&mut self) {
        let psr = &mut self.cr.psr;
        psr.u = psr.pu;
        psr.im = psr.pim;
        psr.clear_traps();

        self.dim = self.saved.dim;
        self.dim_cc = self.saved.dim_cc;
        self.dim_cc_valid = self.saved.dim_cc_valid;
        self.resume_dim_op = self.saved.dim_op;
        self.flow.dim_restored = true;
        debug!(
            target: "i860::trap",
            dim = ?self.dim,
            user = self.cr.psr.u,
            "trap return"
        );
    }
}
