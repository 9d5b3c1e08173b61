//! Control-register transfers, software traps and unassigned encodings.

use tracing::{debug, warn};

use crate::common::{ExecResult, TrapKind};
use crate::core::Cpu;
use crate::core::arch::creg::CtrlReg;
use crate::isa::Instruction;

/// Unassigned encoding: instruction trap.
pub fn illegal(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    debug!(target: "i860::exec", pc = format_args!("{:#010x}", cpu.pc), %insn, "unrecognized opcode");
    Err(cpu.raise(TrapKind::Instruction))
}

/// `ld.c creg, dest`.
pub fn ld_c(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let idx = insn.src2() as u32;
    let Some(reg) = CtrlReg::from_index(idx) else {
        warn!(target: "i860::exec", pc = format_args!("{:#010x}", cpu.pc), idx, "ld.c from undefined control register");
        return Ok(());
    };
    let val = cpu.read_creg(reg);
    cpu.regs.gpr.write(insn.dest(), val);
    Ok(())
}

/// `st.c src1, creg`.
pub fn st_c(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let idx = insn.src2() as u32;
    let Some(reg) = CtrlReg::from_index(idx) else {
        warn!(target: "i860::exec", pc = format_args!("{:#010x}", cpu.pc), idx, "st.c to undefined control register");
        return Ok(());
    };
    let val = cpu.regs.gpr.read(insn.src1());
    cpu.write_creg(reg, val);
    Ok(())
}

/// `trap`: unconditional instruction trap.
pub fn trap(cpu: &mut Cpu, _insn: Instruction) -> ExecResult {
    Err(cpu.raise(TrapKind::Instruction))
}

/// `intovr`: instruction trap when EPSR.OF is set.
pub fn intovr(cpu: &mut Cpu, _insn: Instruction) -> ExecResult {
    if cpu.cr.epsr.of {
        return Err(cpu.raise(TrapKind::Instruction));
    }
    Ok(())
}

/// `lock`: bus locking is not modeled.
pub fn lock(cpu: &mut Cpu, _insn: Instruction) -> ExecResult {
    warn!(target: "i860::exec", pc = format_args!("{:#010x}", cpu.pc), "lock ignored");
    Ok(())
}

/// `unlock`: bus locking is not modeled.
pub fn unlock(cpu: &mut Cpu, _insn: Instruction) -> ExecResult {
    warn!(target: "i860::exec", pc = format_args!("{:#010x}", cpu.pc), "unlock ignored");
    Ok(())
}
