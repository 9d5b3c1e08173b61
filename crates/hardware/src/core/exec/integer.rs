//! Integer ALU instructions.
//!
//! Operands are in assembler order: `op src1, src2, dest`. In the immediate
//! forms `src1` is the 16-bit immediate, sign-extended for add/subtract,
//! zero-extended for logic and shifts and shifted into the upper half for the
//! `h` forms. Flags are computed from the original operands and the
//! destination is written last, so `dest` may alias either source.

use crate::common::ExecResult;
use crate::core::Cpu;
use crate::core::units::alu::shifts::{self, SHAMT_MASK};
use crate::core::units::alu::{Alu, AluOp, AluOutput};
use crate::isa::Instruction;

#[inline(always)]
fn src1(cpu: &Cpu, insn: Instruction, imm: u32) -> u32 {
    if insn.has_immediate() {
        imm
    } else {
        cpu.regs.gpr.read(insn.src1())
    }
}

fn commit(cpu: &mut Cpu, insn: Instruction, out: AluOutput) {
    if let Some(cc) = out.cc {
        cpu.cr.psr.cc = cc;
    }
    if let Some(of) = out.of {
        cpu.cr.epsr.of = of;
    }
    cpu.regs.gpr.write(insn.dest(), out.value);
}

/// `addu`, `subu`, `adds`, `subs`.
pub fn arith(cpu: &mut Cpu, insn: Instruction, op: AluOp) -> ExecResult {
    let a = src1(cpu, insn, insn.simm16() as u32);
    let b = cpu.regs.gpr.read(insn.src2());
    commit(cpu, insn, Alu::execute(op, a, b));
    Ok(())
}

/// `and`, `andnot`, `or`, `xor` and their `h` forms.
pub fn logic(cpu: &mut Cpu, insn: Instruction, op: AluOp, high: bool) -> ExecResult {
    let imm = if high { insn.imm16() << 16 } else { insn.imm16() };
    let a = src1(cpu, insn, imm);
    let b = cpu.regs.gpr.read(insn.src2());
    commit(cpu, insn, Alu::execute(op, a, b));
    Ok(())
}

/// `shl`, `shr`, `shra`. `shr` also latches its count in PSR.SC for `shrd`.
pub fn shift(cpu: &mut Cpu, insn: Instruction, op: AluOp) -> ExecResult {
    let count = src1(cpu, insn, insn.imm16());
    let value = cpu.regs.gpr.read(insn.src2());
    if op == AluOp::Shr {
        cpu.cr.psr.sc = (count & SHAMT_MASK) as u8;
    }
    commit(cpu, insn, Alu::execute(op, count, value));
    Ok(())
}

/// `shrd`: shift the pair `src1:src2` right by PSR.SC.
pub fn shrd(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let hi = cpu.regs.gpr.read(insn.src1());
    let lo = cpu.regs.gpr.read(insn.src2());
    let value = shifts::shrd(hi, lo, u32::from(cpu.cr.psr.sc));
    cpu.regs.gpr.write(insn.dest(), value);
    Ok(())
}
