//! Floating-point arithmetic.
//!
//! Pipelined forms (P set) write the last stage of their pipe to `fdest`,
//! tagged with that stage's own precision, then shift the pipe and insert the
//! new result. Scalar forms write the result directly and leave the pipes
//! alone. When a pipelined instruction names the same register as `fdest` and
//! `fsrc2`, the pre-shift last stage replaces the `fsrc2` operand; `fsrc1` is
//! never bypassed.

use tracing::warn;

use crate::common::{ExecResult, TrapKind};
use crate::core::Cpu;
use crate::core::units::fpu::pipeline::{
    ADDER_STAGES, GRAPHICS_STAGES, Pipe, PipeSlot, multiplier_stages,
};
use crate::isa::Instruction;

/// Low-mantissa mask applied to double `frcp`/`frsqr` results.
const RECIP_MASK_D: u64 = 0xffff_f000_0000_0000;
/// Low-mantissa mask applied to single `frcp`/`frsqr` results.
const RECIP_MASK_S: u32 = 0xffff_8000;
/// Significand bits kept by `fmlow`.
const FMLOW_MASK: u64 = (1 << 53) - 1;

/// Arithmetic performed by a floating unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FpOp {
    Add,
    Sub,
    Mul,
}

/// Execution pipe an instruction issues to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Unit {
    Adder,
    Multiplier(usize),
    Graphics,
}

impl Unit {
    const fn depth(self) -> usize {
        match self {
            Self::Adder => ADDER_STAGES,
            Self::Multiplier(depth) => depth,
            Self::Graphics => GRAPHICS_STAGES,
        }
    }
}

const fn pipe(cpu: &mut Cpu, unit: Unit) -> &mut Pipe {
    match unit {
        Unit::Adder => &mut cpu.adder,
        Unit::Multiplier(_) => &mut cpu.mul,
        Unit::Graphics => &mut cpu.graphics,
    }
}

/// Reads a float register at the given precision, widened to `f64`.
pub(crate) fn read_operand(cpu: &Cpu, idx: usize, double: bool) -> f64 {
    if double {
        cpu.regs.fpr.read_d(idx)
    } else {
        f64::from(cpu.regs.fpr.read_s(idx))
    }
}

/// Writes a pipe slot to a float register according to its precision tag.
pub(crate) fn write_slot(cpu: &mut Cpu, idx: usize, slot: PipeSlot) {
    if slot.is_double() {
        cpu.regs.fpr.write_bits_d(idx, slot.bits());
    } else {
        cpu.regs.fpr.write_bits(idx, slot.bits() as u32);
    }
}

/// Last stage of `unit` before this instruction shifts it.
pub(crate) fn last_stage(cpu: &Cpu, unit: Unit) -> PipeSlot {
    match unit {
        Unit::Adder => cpu.adder.last(unit.depth()),
        Unit::Multiplier(depth) => cpu.mul.last(depth),
        Unit::Graphics => cpu.graphics.last(unit.depth()),
    }
}

/// `fsrc2` as seen by `insn`, with the last-stage bypass applied.
fn src2_operand(cpu: &Cpu, insn: Instruction, unit: Unit, pipelined: bool) -> f64 {
    if pipelined && insn.dest() == insn.src2() {
        last_stage(cpu, unit).as_f64()
    } else {
        read_operand(cpu, insn.src2(), insn.s())
    }
}

/// Computes `a op b` in the source precision and rounds to the result precision.
pub(crate) fn compute(cpu: &Cpu, op: FpOp, a: f64, b: f64, src_d: bool, res_d: bool) -> PipeSlot {
    let fp = cpu.fp.as_ref();
    if src_d {
        let v = match op {
            FpOp::Add => fp.add_d(a, b),
            FpOp::Sub => fp.sub_d(a, b),
            FpOp::Mul => fp.mul_d(a, b),
        };
        if res_d {
            PipeSlot::double(v)
        } else {
            PipeSlot::single(fp.narrow(v))
        }
    } else {
        let (a, b) = (a as f32, b as f32);
        let v = match op {
            FpOp::Add => fp.add_s(a, b),
            FpOp::Sub => fp.sub_s(a, b),
            FpOp::Mul => fp.mul_s(a, b),
        };
        if res_d {
            PipeSlot::double(f64::from(v))
        } else {
            PipeSlot::single(v)
        }
    }
}

/// Records the precision of a retiring stage in the FSR shadow bit of `unit`.
pub(crate) const fn set_shadow(cpu: &mut Cpu, unit: Unit, double: bool) {
    match unit {
        Unit::Adder => cpu.cr.fsr.arp = double,
        Unit::Multiplier(_) => cpu.cr.fsr.mrp = double,
        Unit::Graphics => cpu.cr.fsr.irp = double,
    }
}

/// Retires `result`: straight to `fdest` for scalar forms, through `unit` for pipelined ones.
pub(crate) fn issue(cpu: &mut Cpu, insn: Instruction, unit: Unit, pipelined: bool, result: PipeSlot) {
    if pipelined {
        let last = last_stage(cpu, unit);
        write_slot(cpu, insn.dest(), last);
        set_shadow(cpu, unit, last.is_double());
        let _ = pipe(cpu, unit).advance(unit.depth(), result);
    } else {
        write_slot(cpu, insn.dest(), result);
    }
}

/// `.ds` (double source, single result) is undefined for this instruction.
pub(crate) fn reject_ds(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    if insn.s() && !insn.r() {
        return Err(cpu.raise(TrapKind::Instruction));
    }
    Ok(())
}

fn binary(cpu: &mut Cpu, insn: Instruction, op: FpOp, unit: Unit, pipelined: bool) -> ExecResult {
    let a = read_operand(cpu, insn.src1(), insn.s());
    let b = src2_operand(cpu, insn, unit, pipelined);
    let result = compute(cpu, op, a, b, insn.s(), insn.r());
    issue(cpu, insn, unit, pipelined, result);
    Ok(())
}

/// `fmul`/`pfmul`.
pub fn fmul(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    reject_ds(cpu, insn)?;
    let unit = Unit::Multiplier(multiplier_stages(insn.s(), false));
    binary(cpu, insn, FpOp::Mul, unit, insn.p())
}

/// `pfmul3.dd`: pipelined multiply through a three-stage multiplier.
pub fn pfmul3(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    if !(insn.s() && insn.r()) {
        return Err(cpu.raise(TrapKind::Instruction));
    }
    let unit = Unit::Multiplier(multiplier_stages(true, true));
    binary(cpu, insn, FpOp::Mul, unit, true)
}

/// `fmlow.dd`: low 53 bits of the product of the low words, with the sign of the product.
pub fn fmlow(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    if !(insn.s() && insn.r()) {
        return Err(cpu.raise(TrapKind::Instruction));
    }
    let a = cpu.regs.fpr.read_bits_d(insn.src1());
    let b = cpu.regs.fpr.read_bits_d(insn.src2());
    let product = u64::from(a as u32) * u64::from(b as u32);
    let sign = (a ^ b) & (1 << 63);
    cpu.regs
        .fpr
        .write_bits_d(insn.dest(), (product & FMLOW_MASK) | sign);
    Ok(())
}

fn reciprocal(cpu: &mut Cpu, insn: Instruction, sqrt: bool) -> ExecResult {
    reject_ds(cpu, insn)?;
    let v = read_operand(cpu, insn.src2(), insn.s());
    if (v == 0.0 || (sqrt && v < 0.0))
        && cpu.fp_source_exception_traps
        && cpu.cr.fsr.fte
    {
        cpu.cr.fsr.se = true;
        return Err(cpu.raise(TrapKind::FloatingPoint));
    }

    let fp = cpu.fp.as_ref();
    let denom = if sqrt { fp.sqrt_d(v) } else { v };
    let r = fp.div_d(1.0, denom);
    if insn.r() {
        cpu.regs
            .fpr
            .write_bits_d(insn.dest(), r.to_bits() & RECIP_MASK_D);
    } else {
        let bits = fp.narrow(r).to_bits() & RECIP_MASK_S;
        cpu.regs.fpr.write_bits(insn.dest(), bits);
    }
    Ok(())
}

/// `frcp`: reduced-precision reciprocal of `fsrc2`.
pub fn frcp(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    reciprocal(cpu, insn, false)
}

/// `frsqr`: reduced-precision reciprocal square root of `fsrc2`.
pub fn frsqr(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    reciprocal(cpu, insn, true)
}

/// `fadd`/`pfadd`.
pub fn fadd(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    reject_ds(cpu, insn)?;
    binary(cpu, insn, FpOp::Add, Unit::Adder, insn.p())
}

/// `fsub`/`pfsub`: `fsrc1 - fsrc2`.
pub fn fsub(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    reject_ds(cpu, insn)?;
    binary(cpu, insn, FpOp::Sub, Unit::Adder, insn.p())
}

/// `fix`/`ftrunc` and their pipelined forms: convert `fsrc1` to a 32-bit integer
/// held in the low word of a double result.
pub fn fix(cpu: &mut Cpu, insn: Instruction, truncate: bool) -> ExecResult {
    if !insn.r() {
        warn!(target: "i860::exec", pc = format_args!("{:#010x}", cpu.pc), %insn, "fix with single result, treated as double");
    }
    let v = read_operand(cpu, insn.src1(), insn.s());
    let value = cpu.fp.to_i32(v, truncate);
    let result = PipeSlot::raw(u64::from(value as u32), true);
    issue(cpu, insn, Unit::Adder, insn.p(), result);
    Ok(())
}

/// `famov`/`pfamov`: move `fsrc1` through the adder, converting precision.
pub fn famov(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    reject_ds(cpu, insn)?;
    let v = read_operand(cpu, insn.src1(), insn.s());
    let result = if insn.r() {
        PipeSlot::double(v)
    } else {
        PipeSlot::single(v as f32)
    };
    issue(cpu, insn, Unit::Adder, insn.p(), result);
    Ok(())
}

fn compare(cpu: &mut Cpu, insn: Instruction, cc: bool) {
    cpu.cr.psr.cc = cc;
    if cpu.dim.is_dual() {
        cpu.dim_cc = cc;
        cpu.dim_cc_valid = true;
    }
    if insn.p() {
        issue(cpu, insn, Unit::Adder, true, PipeSlot::raw(0, insn.s()));
    }
}

fn compare_operands(cpu: &Cpu, insn: Instruction) -> (f64, f64) {
    let a = read_operand(cpu, insn.src1(), insn.s());
    let b = src2_operand(cpu, insn, Unit::Adder, insn.p());
    if insn.s() {
        (a, b)
    } else {
        (f64::from(a as f32), f64::from(b as f32))
    }
}

/// `pfgt` (R clear): CC = `fsrc1 > fsrc2`. `pfle` (R set): CC = `!(fsrc1 <= fsrc2)`.
pub fn pfgt(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let (a, b) = compare_operands(cpu, insn);
    let cc = if insn.r() { !(a <= b) } else { a > b };
    compare(cpu, insn, cc);
    Ok(())
}

/// `pfeq`: CC = `fsrc1 == fsrc2`.
pub fn pfeq(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let (a, b) = compare_operands(cpu, insn);
    compare(cpu, insn, a == b);
    Ok(())
}

/// `fxfr fsrc1, dest`: float to integer register transfer.
pub fn fxfr(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let bits = cpu.regs.fpr.read_bits(insn.src1());
    cpu.regs.gpr.write(insn.dest(), bits);
    Ok(())
}
