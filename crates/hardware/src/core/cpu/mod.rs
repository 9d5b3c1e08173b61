//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which owns the entire architectural state
//! of one i860 XR. It coordinates the following:
//! 1. **State Management:** integer/float registers, control registers, program counter and the
//!    dual-instruction-mode machine.
//! 2. **Floating-Point Pipes:** the adder, multiplier, load and graphics pipe stages.
//! 3. **Memory Hierarchy:** MMU with its TLB, the instruction cache and the active bus table.
//! 4. **System Integration:** the external bus collaborator and an optional disassembler.

/// Control-register (`ld.c`/`st.c`) access and side effects.
pub mod control;

/// Step loop, delay slots and dual-instruction-mode progression.
pub mod execution;

/// Instruction fetch through the instruction cache.
pub mod fetch;

/// Data load/store handling.
pub mod memory;

/// Trap entry and return.
pub mod trap;

use std::fmt::Write;

use tracing::{debug, info};

use crate::common::constants::PAIR_BYTES;
use crate::common::{CoreError, PhysAddr, RegisterFile, Width};
use crate::config::Config;
use crate::core::arch::creg::ControlRegs;
use crate::core::arch::dim::{DimSnapshot, DimState};
use crate::core::units::cache::ICache;
use crate::core::units::fpu::pipeline::Pipe;
use crate::core::units::fpu::rounding_modes::RoundingMode;
use crate::core::units::fpu::{FpArith, HostFp};
use crate::core::units::mmu::Mmu;
use crate::isa::Disassembler;
use crate::soc::{Bus, BusTable, FlatMemory};
use crate::stats::Stats;

use self::execution::Flow;

/// Main CPU structure containing all processor state and components.
///
/// The CPU is owned by the embedding application. It executes one instruction
/// pair per [`Cpu::step`], routes every memory access through the external
/// [`Bus`] and funnels all faults through a single trap-entry procedure.
pub struct Cpu {
    /// Integer, float and dual-operation registers.
    pub regs: RegisterFile,
    /// Control registers (FIR, PSR, DIRBASE, DB, FSR, EPSR).
    pub cr: ControlRegs,
    /// Program counter.
    pub pc: u32,

    /// Floating-point adder pipe.
    pub adder: Pipe,
    /// Floating-point multiplier pipe.
    pub mul: Pipe,
    /// Pipelined-load pipe.
    pub load: Pipe,
    /// Graphics (integer) pipe.
    pub graphics: Pipe,

    /// Dual-instruction mode.
    pub dim: DimState,
    /// Condition code produced by an FP compare in dual mode.
    pub dim_cc: bool,
    /// `dim_cc` overrides PSR.CC for the next conditional branch.
    pub dim_cc_valid: bool,
    /// DIM state frozen at trap entry.
    pub saved: DimSnapshot,

    /// Memory Management Unit.
    pub mmu: Mmu,
    /// Instruction cache.
    pub icache: ICache,
    /// Interrupt pin level as last delivered by the host.
    pub irq_line: bool,
    /// Enable instruction tracing.
    pub trace: bool,
    /// Run-time counters for the telemetry summary.
    pub stats: Stats,

    pub(crate) flow: Flow,
    pub(crate) resume_dim_op: bool,
    pub(crate) fir_gets_trap_addr: bool,
    pub(crate) table: &'static BusTable,
    pub(crate) bus: Box<dyn Bus>,
    pub(crate) fp: Box<dyn FpArith>,
    pub(crate) disasm: Option<Box<dyn Disassembler>>,

    pub(crate) start_pc: u32,
    pub(crate) trap_misaligned: bool,
    pub(crate) fp_source_exception_traps: bool,
    pub(crate) undefined_pattern: u32,
    pub(crate) processor_type: u8,
    pub(crate) stepping: u8,
}

impl std::fmt::Debug for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("pc", &format_args!("{:#010x}", self.pc))
            .field("dim", &self.dim)
            .field("psr", &format_args!("{:#010x}", self.cr.psr.bits()))
            .field("bus", &self.bus.name())
            .field("byte_order", &self.table.order())
            .finish_non_exhaustive()
    }
}

impl Cpu {
    /// Creates a CPU attached to `bus`, runs the host self-test and resets it.
    ///
    /// # Errors
    ///
    /// [`CoreError::Config`] for an invalid configuration and
    /// [`CoreError::SelfTest`] when the host cannot run this core.
    pub fn new(bus: Box<dyn Bus>, config: &Config) -> Result<Self, CoreError> {
        config.validate()?;
        let core = &config.core;

        let mut cpu = Self {
            regs: RegisterFile::new(),
            cr: ControlRegs::default(),
            pc: config.general.start_pc,
            adder: Pipe::new(),
            mul: Pipe::new(),
            load: Pipe::new(),
            graphics: Pipe::new(),
            dim: DimState::None,
            dim_cc: false,
            dim_cc_valid: false,
            saved: DimSnapshot::default(),
            mmu: Mmu::new(core.tlb_sets),
            icache: ICache::new(core.icache_lines),
            irq_line: false,
            trace: config.general.trace_instructions || cfg!(feature = "always-trace"),
            stats: Stats::new(),
            flow: Flow::default(),
            resume_dim_op: false,
            fir_gets_trap_addr: false,
            table: BusTable::for_big_endian(false),
            bus,
            fp: Box::new(HostFp::new()),
            disasm: None,
            start_pc: config.general.start_pc,
            trap_misaligned: core.trap_misaligned,
            fp_source_exception_traps: core.fp_source_exception_traps,
            undefined_pattern: core.undefined_pattern,
            processor_type: core.processor_type,
            stepping: core.stepping,
        };

        cpu.self_test()?;
        cpu.reset();
        info!(
            target: "i860::cpu",
            bus = cpu.bus.name(),
            start_pc = format_args!("{:#010x}", cpu.pc),
            "core ready"
        );
        Ok(cpu)
    }

    /// Replaces the floating-point arithmetic back end.
    #[must_use]
    pub fn with_fp(mut self, mut fp: Box<dyn FpArith>) -> Self {
        fp.set_rounding(self.cr.fsr.rm);
        self.fp = fp;
        self
    }

    /// Attaches a disassembler used by instruction tracing and the debug dump.
    pub fn set_disassembler(&mut self, disasm: Box<dyn Disassembler>) {
        self.disasm = Some(disasm);
    }

    /// Puts the core in its architectural reset state.
    ///
    /// Registers other than r0/f0/f1 receive the configured undefined
    /// pattern OR'd with their index. The bus interface returns to
    /// little-endian and every cache is emptied.
    pub fn reset(&mut self) {
        self.regs.reset(self.undefined_pattern);
        self.cr = ControlRegs::default();
        self.cr.epsr.processor_type = self.processor_type;
        self.cr.epsr.stepping = self.stepping;
        self.cr.epsr.int = self.irq_line;
        self.fp.set_rounding(RoundingMode::Nearest);
        self.pc = self.start_pc;

        self.adder.clear();
        self.mul.clear();
        self.load.clear();
        self.graphics.clear();

        self.dim = DimState::None;
        self.dim_cc = false;
        self.dim_cc_valid = false;
        self.saved = DimSnapshot::default();
        self.flow = Flow::default();
        self.resume_dim_op = false;
        self.fir_gets_trap_addr = false;

        self.table = BusTable::for_big_endian(false);
        self.mmu.flush();
        self.icache.invalidate();
        debug!(target: "i860::cpu", pc = format_args!("{:#010x}", self.pc), "reset");
    }

    /// Checks that register lanes and both bus byte orders behave as the core expects.
    ///
    /// # Errors
    ///
    /// [`CoreError::SelfTest`] naming the first failed check.
    pub fn self_test(&mut self) -> Result<(), CoreError> {
        let mut regs = RegisterFile::new();
        regs.gpr.write(5, 0xa5a5_5a5a);
        if regs.gpr.read(5) != 0xa5a5_5a5a || regs.gpr.read(0) != 0 {
            return Err(CoreError::SelfTest("integer register round-trip".into()));
        }

        regs.fpr.write_d(4, 1.5);
        if regs.fpr.read_bits(4) != 0 || regs.fpr.read_bits(5) != 0x3ff8_0000 {
            return Err(CoreError::SelfTest("double lane order".into()));
        }
        regs.fpr.write_s(7, -2.0);
        if regs.fpr.read_s(7) != -2.0 || regs.fpr.read_bits_d(0) != 0 {
            return Err(CoreError::SelfTest("single register round-trip".into()));
        }

        let mut scratch = FlatMemory::new(0, 16);
        let le = BusTable::for_big_endian(false);
        let be = BusTable::for_big_endian(true);
        le.write(&mut scratch, PhysAddr::new(0), Width::Word, 0x0102_0304);
        if scratch.as_slice()[..4] != [4, 3, 2, 1] {
            return Err(CoreError::SelfTest("little-endian bus order".into()));
        }
        be.write(&mut scratch, PhysAddr::new(8), Width::Double, 0x0102_0304_0506_0708);
        let back = be.read(&mut scratch, PhysAddr::new(8), Width::Double);
        if scratch.as_slice()[8] != 1 || back != 0x0102_0304_0506_0708 {
            return Err(CoreError::SelfTest("big-endian bus order".into()));
        }
        debug!(target: "i860::cpu", "self-test passed");
        Ok(())
    }

    /// Drives the external interrupt pin. EPSR.INT mirrors the level.
    pub fn set_irq_line(&mut self, level: bool) {
        self.irq_line = level;
        self.cr.epsr.int = level;
    }

    /// Shared access to the bus collaborator.
    pub fn bus(&self) -> &dyn Bus {
        self.bus.as_ref()
    }

    /// Exclusive access to the bus collaborator.
    pub fn bus_mut(&mut self) -> &mut dyn Bus {
        self.bus.as_mut()
    }

    /// Consumes the CPU and returns its bus.
    pub fn into_bus(self) -> Box<dyn Bus> {
        self.bus
    }

    /// Bus accessor table selected by EPSR.BE.
    pub const fn bus_table(&self) -> &'static BusTable {
        self.table
    }

    /// Formats registers, control registers, pipes and the DIM state for the debug console.
    pub fn dump_state(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "pc={:#010x} dim={:?} dim_cc={}{} byte_order={:?}",
            self.pc,
            self.dim,
            u8::from(self.dim_cc),
            if self.dim_cc_valid { " (valid)" } else { "" },
            self.table.order()
        );
        if let Some(word) = self.peek_insn(self.pc) {
            let text = self
                .disasm
                .as_ref()
                .map_or_else(String::new, |d| d.disassemble(self.pc, word));
            let _ = writeln!(out, "next: {word:08x} {text}");
        }
        out.push_str(&self.cr.dump());
        out.push_str(&self.regs.dump());
        for (name, pipe, depth) in [
            ("A", &self.adder, 3),
            ("M", &self.mul, 3),
            ("L", &self.load, 3),
            ("I", &self.graphics, 1),
        ] {
            let _ = write!(out, "{name}:");
            for stage in 0..depth {
                let slot = pipe.stage(stage);
                let _ = write!(
                    out,
                    " [{}]{:016x}{}",
                    stage,
                    slot.bits(),
                    if slot.is_double() { "d" } else { "s" }
                );
            }
            out.push('\n');
        }
        out
    }

    /// Instruction word at `pc` from the I-cache only, without touching any state.
    fn peek_insn(&self, pc: u32) -> Option<u32> {
        self.icache.peek(pc & !(PAIR_BYTES - 1)).map(|pair| {
            if pc & 4 == 0 {
                pair as u32
            } else {
                (pair >> 32) as u32
            }
        })
    }
}
