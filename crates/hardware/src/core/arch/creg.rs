//! Control register file.
//!
//! The six registers reachable by `ld.c`/`st.c`, held in structured form.
//! Side effects of reading and writing them (FIR latching, TLB flushes, byte
//! order swaps) belong to the CPU; this module only stores and formats.

use std::fmt::Write;

use super::dirbase::Dirbase;
use super::epsr::Epsr;
use super::fsr::Fsr;
use super::psr::Psr;

/// Control register index as encoded in the `src2` field of `ld.c`/`st.c`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CtrlReg {
    /// Fault instruction register.
    Fir,
    /// Processor status register.
    Psr,
    /// Directory base register.
    Dirbase,
    /// Data breakpoint register.
    Db,
    /// Floating-point status register.
    Fsr,
    /// Extended processor status register.
    Epsr,
}

impl CtrlReg {
    /// Decodes a register index; indices above 5 are undefined.
    pub const fn from_index(idx: u32) -> Option<Self> {
        Some(match idx {
            0 => Self::Fir,
            1 => Self::Psr,
            2 => Self::Dirbase,
            3 => Self::Db,
            4 => Self::Fsr,
            5 => Self::Epsr,
            _ => return None,
        })
    }

    /// Assembler name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fir => "fir",
            Self::Psr => "psr",
            Self::Dirbase => "dirbase",
            Self::Db => "db",
            Self::Fsr => "fsr",
            Self::Epsr => "epsr",
        }
    }
}

/// Control register state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlRegs {
    /// FIR: address of the faulting instruction.
    pub fir: u32,
    /// PSR.
    pub psr: Psr,
    /// DIRBASE.
    pub dirbase: Dirbase,
    /// DB: data breakpoint address.
    pub db: u32,
    /// FSR.
    pub fsr: Fsr,
    /// EPSR.
    pub epsr: Epsr,
}

impl ControlRegs {
    /// Raw value of `reg` with no side effects.
    pub const fn raw(&self, reg: CtrlReg) -> u32 {
        match reg {
            CtrlReg::Fir => self.fir,
            CtrlReg::Psr => self.psr.bits(),
            CtrlReg::Dirbase => self.dirbase.bits(),
            CtrlReg::Db => self.db,
            CtrlReg::Fsr => self.fsr.bits(),
            CtrlReg::Epsr => self.epsr.bits(),
        }
    }

    /// Formats all control registers on one line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for idx in 0..6 {
            if let Some(reg) = CtrlReg::from_index(idx) {
                let _ = write!(out, "{}={:08x} ", reg.name(), self.raw(reg));
            }
        }
        out.push('\n');
        out
    }
}
