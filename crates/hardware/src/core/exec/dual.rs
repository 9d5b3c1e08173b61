//! Dual operations: `pfam`/`pfmam` (add form) and `pfsm`/`pfmsm` (subtract form).
//!
//! One instruction issues a multiply and an add (or subtract) together. The
//! DPC field picks each pipe's operands from `fsrc1`, `fsrc2`, KR, KI, T and
//! the last stages of the adder and multiplier. Both pipes advance. `fdest`
//! receives the adder's last stage for `pfam` and the multiplier's for
//! `pfmam`; T and K are latched after all operands are gathered.

use super::float::{FpOp, Unit, compute, last_stage, read_operand, reject_ds, set_shadow, write_slot};
use crate::common::ExecResult;
use crate::core::Cpu;
use crate::core::units::fpu::dual_op::{Operand, loads_ki, route_for};
use crate::core::units::fpu::pipeline::{ADDER_STAGES, multiplier_stages};
use crate::isa::Instruction;

/// Extended-opcode bit selecting the subtract form.
const SUBTRACT_FORM: u32 = 0x10;

/// Executes a PFAM-family instruction.
pub fn dual_op(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    reject_ds(cpu, insn)?;
    let route = route_for(insn.raw());
    let (src_d, res_d) = (insn.s(), insn.r());
    let mul_depth = multiplier_stages(src_d, false);
    let mul_unit = Unit::Multiplier(mul_depth);

    let a_last = last_stage(cpu, Unit::Adder);
    let m_last = last_stage(cpu, mul_unit);
    let to_dest = if insn.p() { a_last } else { m_last };

    let fetch = |which: Operand| -> f64 {
        match which {
            Operand::Src1 => read_operand(cpu, insn.src1(), src_d),
            Operand::Src2 if insn.dest() == insn.src2() => to_dest.as_f64(),
            Operand::Src2 => read_operand(cpu, insn.src2(), src_d),
            Operand::Kr => cpu.regs.kr,
            Operand::Ki => cpu.regs.ki,
            Operand::T => cpu.regs.t,
            Operand::AdderLast => a_last.as_f64(),
            Operand::MulLast => m_last.as_f64(),
        }
    };
    let add_op = if insn.fp_op() & SUBTRACT_FORM != 0 {
        FpOp::Sub
    } else {
        FpOp::Add
    };
    let m_result = compute(cpu, FpOp::Mul, fetch(route.m_op1), fetch(route.m_op2), src_d, res_d);
    let a_result = compute(cpu, add_op, fetch(route.a_op1), fetch(route.a_op2), src_d, res_d);
    let k = read_operand(cpu, insn.src1(), src_d);

    if route.load_t {
        cpu.regs.t = m_last.as_f64();
    }
    if route.load_k {
        if loads_ki(route) {
            cpu.regs.ki = k;
        } else {
            cpu.regs.kr = k;
        }
    }

    write_slot(cpu, insn.dest(), to_dest);
    set_shadow(cpu, Unit::Adder, a_last.is_double());
    set_shadow(cpu, mul_unit, m_last.is_double());
    let _ = cpu.adder.advance(ADDER_STAGES, a_result);
    let _ = cpu.mul.advance(mul_depth, m_result);
    Ok(())
}
