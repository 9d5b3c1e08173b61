//! Main Execution Loop.
//!
//! This module implements the step cycle of the CPU. It performs the following:
//! 1. **Pair Issue:** fetches and executes the instruction pair at the program counter.
//! 2. **Delay Slots:** runs the instruction (or dual-mode pair) after a delayed branch inline.
//! 3. **Dual-Instruction Mode:** advances the NONE/TEMP/FULL machine once per completed step.
//! 4. **Interrupt Handling:** samples the external interrupt pin on the high half of a pair.
//! 5. **Observability:** emits a trace event per executed instruction when tracing is on.

use std::mem;

use tracing::{debug, trace};

use super::Cpu;
use crate::common::constants::INSN_BYTES;
use crate::common::{ExecResult, Trap};
use crate::core::arch::dim::DimState;
use crate::core::exec;
use crate::isa::Instruction;

/// Per-step control flags shared between the step loop and the instruction routines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Flow {
    /// The executing instruction redirected the program counter.
    pub pc_updated: bool,
    /// The low half of this step was DIM-capable.
    pub dim_op: bool,
    /// An instruction at an odd word address executed this step.
    pub high_half: bool,
    /// Pairs issue together this step; delay slots are two words wide.
    pub dual: bool,
    /// `bri` restored the DIM state; skip this step's transition.
    pub dim_restored: bool,
}

impl Cpu {
    /// Executes one step: the instruction pair at the program counter, or the
    /// single instruction when the program counter addresses a high word.
    ///
    /// Any fault raised during the step enters the trap handler before this
    /// returns. Faults never surface as host errors.
    pub fn step(&mut self) {
        self.flow = Flow {
            dim_op: mem::take(&mut self.resume_dim_op),
            dual: self.dim.is_dual(),
            ..Flow::default()
        };

        match self.execute_pair() {
            Err(trap) => self.enter_trap(trap),
            Ok(()) => {
                if !self.flow.dim_restored {
                    let next = self.dim.next(self.flow.dim_op);
                    if next != self.dim {
                        debug!(target: "i860::dim", from = ?self.dim, to = ?next, "dim transition");
                    }
                    self.dim = next;
                    self.dim_cc_valid = false;
                }

                if self.flow.high_half
                    && self.dim == DimState::None
                    && self.irq_line
                    && self.cr.psr.im
                {
                    self.cr.psr.intr = true;
                    self.enter_trap(Trap::external());
                }
            }
        }
        self.stats.steps += 1;
    }

    /// Executes `count` steps and returns the number executed.
    pub fn run_steps(&mut self, count: u64) -> u64 {
        for _ in 0..count {
            self.step();
        }
        count
    }

    fn execute_pair(&mut self) -> ExecResult {
        let first = self.pc;
        self.execute_one()?;
        if first & INSN_BYTES == 0 && !self.flow.pc_updated {
            self.execute_one()?;
        }
        Ok(())
    }

    /// Fetches and executes the instruction at the program counter.
    pub(crate) fn execute_one(&mut self) -> ExecResult {
        let pc = self.pc;
        let insn = Instruction(self.fetch(pc)?);
        if pc & INSN_BYTES == 0 {
            if insn.is_dim_capable() {
                self.flow.dim_op = true;
            }
        } else {
            self.flow.high_half = true;
        }

        self.flow.pc_updated = false;
        if self.trace {
            self.trace_insn(pc, insn);
        }

        exec::execute(self, insn)?;
        self.stats.instructions += 1;
        if !self.flow.pc_updated {
            self.pc = self.pc.wrapping_add(INSN_BYTES);
        }
        Ok(())
    }

    /// Runs the delay slot of the branch at the program counter.
    ///
    /// The slot is one instruction, or a full pair in dual mode. The program
    /// counter is restored to the branch on return so the caller can commit
    /// (or, on `Err`, abandon) its target.
    ///
    /// # Errors
    ///
    /// The slot's trap, marked as raised in a delay slot.
    pub(crate) fn delay_slot(&mut self) -> ExecResult {
        let branch_pc = self.pc;
        let words = if self.flow.dual { 2 } else { 1 };
        self.pc = branch_pc.wrapping_add(INSN_BYTES);

        let mut result = Ok(());
        for _ in 0..words {
            result = self.execute_one();
            if result.is_err() {
                break;
            }
        }

        self.pc = branch_pc;
        self.flow.pc_updated = false;
        result.map_err(Trap::in_delay_slot)
    }

    /// Bytes covered by a delay slot this step.
    pub(crate) const fn slot_bytes(&self) -> u32 {
        if self.flow.dual { 2 * INSN_BYTES } else { INSN_BYTES }
    }

    /// Redirects the program counter.
    #[inline]
    pub(crate) const fn jump(&mut self, target: u32) {
        self.pc = target;
        self.flow.pc_updated = true;
    }

    /// Condition code seen by `bc`/`bnc`: a pending dual-mode compare result wins over PSR.CC.
    pub(crate) const fn effective_cc(&self) -> bool {
        if self.dim_cc_valid {
            self.dim_cc
        } else {
            self.cr.psr.cc
        }
    }

    fn trace_insn(&self, pc: u32, insn: Instruction) {
        match &self.disasm {
            Some(d) => {
                let text = d.disassemble(pc, insn.raw());
                trace!(target: "i860::exec", pc = format_args!("{pc:#010x}"), %insn, "{text}");
            }
            None => trace!(target: "i860::exec", pc = format_args!("{pc:#010x}"), %insn),
        }
    }
}
