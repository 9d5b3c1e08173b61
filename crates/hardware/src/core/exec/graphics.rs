//! Graphics-unit instructions.
//!
//! These treat float registers as raw 64-bit (or 32-bit) integers and issue
//! to the single-stage graphics pipe when P is set. Pixel operations also
//! update MERGE or PSR.PM.

use tracing::warn;

use super::float::{Unit, issue, last_stage};
use crate::common::ExecResult;
use crate::core::Cpu;
use crate::core::arch::psr::PixelSize;
use crate::core::units::fpu::graphics::{FADDZ_MERGE, faddp_merge_params, merge, zcheck16, zcheck32};
use crate::core::units::fpu::pipeline::PipeSlot;
use crate::isa::Instruction;

fn raw_operand(cpu: &Cpu, idx: usize, double: bool) -> u64 {
    if double {
        cpu.regs.fpr.read_bits_d(idx)
    } else {
        u64::from(cpu.regs.fpr.read_bits(idx))
    }
}

/// Raw `fsrc1` and `fsrc2`, with the graphics-pipe bypass applied to `fsrc2`.
fn operands(cpu: &Cpu, insn: Instruction, double: bool) -> (u64, u64) {
    let a = raw_operand(cpu, insn.src1(), double);
    let b = if insn.p() && insn.dest() == insn.src2() {
        last_stage(cpu, Unit::Graphics).bits()
    } else {
        raw_operand(cpu, insn.src2(), double)
    };
    (a, b)
}

fn require_dd(cpu: &Cpu, insn: Instruction) {
    if !(insn.s() && insn.r()) {
        warn!(target: "i860::exec", pc = format_args!("{:#010x}", cpu.pc), %insn, "graphics op without .dd, executed as .dd");
    }
}

fn pixel_size(cpu: &Cpu) -> PixelSize {
    cpu.cr.psr.pixel_size().unwrap_or_else(|| {
        warn!(target: "i860::exec", pc = format_args!("{:#010x}", cpu.pc), "undefined pixel size");
        PixelSize::Bits8
    })
}

fn integer(cpu: &mut Cpu, insn: Instruction, subtract: bool) -> ExecResult {
    let double = insn.s();
    if insn.s() != insn.r() {
        warn!(target: "i860::exec", pc = format_args!("{:#010x}", cpu.pc), %insn, "mismatched integer precision, using source precision");
    }
    let (a, b) = operands(cpu, insn, double);
    let value = if double {
        if subtract { a.wrapping_sub(b) } else { a.wrapping_add(b) }
    } else {
        let (a, b) = (a as u32, b as u32);
        u64::from(if subtract { a.wrapping_sub(b) } else { a.wrapping_add(b) })
    };
    issue(cpu, insn, Unit::Graphics, insn.p(), PipeSlot::raw(value, double));
    Ok(())
}

/// `fiadd`: 32- or 64-bit integer add.
pub fn fiadd(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    integer(cpu, insn, false)
}

/// `fisub`: 32- or 64-bit integer subtract, `fsrc1 - fsrc2`.
pub fn fisub(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    integer(cpu, insn, true)
}

fn pixel_add(cpu: &mut Cpu, insn: Instruction, (shift, mask): (u32, u64)) {
    let (a, b) = operands(cpu, insn, true);
    let sum = a.wrapping_add(b);
    cpu.regs.merge = merge(cpu.regs.merge, sum, shift, mask);
    issue(cpu, insn, Unit::Graphics, insn.p(), PipeSlot::raw(sum, true));
}

/// `faddp`: pixel add, accumulating the high bits of each pixel into MERGE.
pub fn faddp(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    require_dd(cpu, insn);
    let params = faddp_merge_params(pixel_size(cpu));
    pixel_add(cpu, insn, params);
    Ok(())
}

/// `faddz`: z-buffer add, accumulating the high 16 bits of each 32-bit field into MERGE.
pub fn faddz(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    require_dd(cpu, insn);
    pixel_add(cpu, insn, FADDZ_MERGE);
    Ok(())
}

/// `form`: OR `fsrc1` with MERGE, then clear MERGE.
pub fn form(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    require_dd(cpu, insn);
    let a = raw_operand(cpu, insn.src1(), true);
    let value = a | cpu.regs.merge;
    cpu.regs.merge = 0;
    issue(cpu, insn, Unit::Graphics, insn.p(), PipeSlot::raw(value, true));
    Ok(())
}

/// `fzchkl` (32-bit fields) and `fzchks` (16-bit fields): z-buffer check updating PSR.PM.
pub fn fzchk(cpu: &mut Cpu, insn: Instruction, long: bool) -> ExecResult {
    require_dd(cpu, insn);
    let (a, b) = operands(cpu, insn, true);
    let pm = cpu.cr.psr.pm;
    let (value, pm) = if long {
        zcheck32(a, b, pm)
    } else {
        zcheck16(a, b, pm)
    };
    cpu.cr.psr.pm = pm;
    issue(cpu, insn, Unit::Graphics, insn.p(), PipeSlot::raw(value, true));
    Ok(())
}
