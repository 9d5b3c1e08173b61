//! Branch instructions.
//!
//! `br`, `call`, `calli`, `bri`, `bla` and the taken path of `bc.t`/`bnc.t`
//! execute their delay slot before committing the target. A fault in the
//! delay slot abandons the branch: the target is not taken and any register
//! the branch would have updated keeps its old value.

use tracing::warn;

use crate::common::ExecResult;
use crate::common::constants::INSN_BYTES;
use crate::core::Cpu;
use crate::isa::Instruction;

/// Return-address register written by `call`/`calli`.
const LINK_REG: usize = 1;

#[inline(always)]
const fn target(pc: u32, words: i32) -> u32 {
    pc.wrapping_add(INSN_BYTES)
        .wrapping_add((words as u32).wrapping_shl(2))
}

/// Address of the first instruction after the delay slot.
#[inline(always)]
const fn after_slot(cpu: &Cpu) -> u32 {
    cpu.pc.wrapping_add(INSN_BYTES).wrapping_add(cpu.slot_bytes())
}

/// `br`: unconditional delayed branch.
pub fn br(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let dest = target(cpu.pc, insn.branch26());
    cpu.delay_slot()?;
    cpu.jump(dest);
    Ok(())
}

fn link_and_branch(cpu: &mut Cpu, dest: u32) -> ExecResult {
    let old = cpu.regs.gpr.read(LINK_REG);
    cpu.regs.gpr.write(LINK_REG, after_slot(cpu));
    if let Err(trap) = cpu.delay_slot() {
        cpu.regs.gpr.write(LINK_REG, old);
        return Err(trap);
    }
    cpu.jump(dest);
    Ok(())
}

/// `call`: delayed call; r1 receives the address after the delay slot.
pub fn call(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let dest = target(cpu.pc, insn.branch26());
    link_and_branch(cpu, dest)
}

/// `calli src1`: delayed indirect call. The target is read before r1 changes.
pub fn calli(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    if insn.src1() == LINK_REG {
        warn!(target: "i860::exec", pc = format_args!("{:#010x}", cpu.pc), "calli through r1");
    }
    let dest = cpu.regs.gpr.read(insn.src1());
    link_and_branch(cpu, dest)
}

/// `bri src1`: delayed indirect branch, also the return from a trap handler.
///
/// When any PSR trap bit was set at issue, a successful delay slot is followed
/// by the restore of U/IM from PU/PIM, the clearing of the trap bits and the
/// return of the DIM state saved at trap entry.
pub fn bri(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let dest = cpu.regs.gpr.read(insn.src1());
    let returning = cpu.cr.psr.any_trap();
    cpu.delay_slot()?;
    if returning {
        cpu.return_from_trap();
    }
    cpu.jump(dest);
    Ok(())
}

fn branch_if(cpu: &mut Cpu, taken: bool, dest: u32) -> ExecResult {
    if taken {
        cpu.jump(dest);
    }
    Ok(())
}

/// `bc`: branch if CC is set (not delayed).
pub fn bc(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let taken = cpu.effective_cc();
    branch_if(cpu, taken, target(cpu.pc, insn.branch26()))
}

/// `bnc`: branch if CC is clear (not delayed).
pub fn bnc(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let taken = !cpu.effective_cc();
    branch_if(cpu, taken, target(cpu.pc, insn.branch26()))
}

fn branch_taken_delayed(cpu: &mut Cpu, taken: bool, dest: u32) -> ExecResult {
    if taken {
        cpu.delay_slot()?;
        cpu.jump(dest);
    } else {
        let next = after_slot(cpu);
        cpu.jump(next);
    }
    Ok(())
}

/// `bc.t`: delayed branch if CC is set; the slot is skipped when not taken.
pub fn bc_t(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let taken = cpu.effective_cc();
    branch_taken_delayed(cpu, taken, target(cpu.pc, insn.branch26()))
}

/// `bnc.t`: delayed branch if CC is clear; the slot is skipped when not taken.
pub fn bnc_t(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let taken = !cpu.effective_cc();
    branch_taken_delayed(cpu, taken, target(cpu.pc, insn.branch26()))
}

fn compare_operand(cpu: &Cpu, insn: Instruction) -> u32 {
    if insn.has_immediate() {
        insn.src1() as u32
    } else {
        cpu.regs.gpr.read(insn.src1())
    }
}

/// `bte`: branch if `src1 == src2` (not delayed).
pub fn bte(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let taken = compare_operand(cpu, insn) == cpu.regs.gpr.read(insn.src2());
    branch_if(cpu, taken, target(cpu.pc, insn.split_offset()))
}

/// `btne`: branch if `src1 != src2` (not delayed).
pub fn btne(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let taken = compare_operand(cpu, insn) != cpu.regs.gpr.read(insn.src2());
    branch_if(cpu, taken, target(cpu.pc, insn.split_offset()))
}

/// `bla src1, src2, off`: loop branch.
///
/// Adds `src1` to `src2`, runs the delay slot, branches if LCC was set at
/// issue and finally latches the new LCC (`src2 >= -src1`, signed). A delay
/// slot fault leaves both `src2` and LCC unchanged.
pub fn bla(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let a = cpu.regs.gpr.read(insn.src1());
    let b = cpu.regs.gpr.read(insn.src2());
    let next_lcc = (b as i32) >= (a as i32).wrapping_neg();
    let taken = cpu.cr.psr.lcc;
    let dest = target(cpu.pc, insn.split_offset());

    cpu.regs.gpr.write(insn.src2(), a.wrapping_add(b));
    if let Err(trap) = cpu.delay_slot() {
        cpu.regs.gpr.write(insn.src2(), b);
        return Err(trap);
    }
    if taken {
        cpu.jump(dest);
    } else {
        let next = after_slot(cpu);
        cpu.jump(next);
    }
    cpu.cr.psr.lcc = next_lcc;
    Ok(())
}
