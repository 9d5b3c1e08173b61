//! Loads and stores.
//!
//! Every routine computes its effective address, performs the access and only
//! then updates registers, so a faulting access leaves the register file
//! untouched. Auto-increment forms write the effective address back to `src2`
//! after the access succeeds.

use tracing::warn;

use super::float::write_slot;
use crate::common::{ExecResult, TrapKind, Width};
use crate::core::Cpu;
use crate::core::arch::psr::PixelSize;
use crate::core::units::fpu::graphics::pst_mask;
use crate::core::units::fpu::pipeline::{LOAD_STAGES, PipeSlot};
use crate::isa::Instruction;

/// Integer load/store widths indexed by `(bit 28 << 1) | bit 0`.
const INT_WIDTHS: [Width; 4] = [Width::Byte, Width::Byte, Width::Half, Width::Word];

/// Floating load/store widths indexed by bits 2..1.
const FP_WIDTHS: [Width; 4] = [Width::Double, Width::Word, Width::Quad, Width::Word];

const fn int_width(insn: Instruction) -> Width {
    INT_WIDTHS[(((insn.raw() >> 27) & 2) | (insn.raw() & 1)) as usize]
}

const fn fp_width(insn: Instruction) -> Width {
    FP_WIDTHS[((insn.raw() >> 1) & 3) as usize]
}

/// Effective address of an indexed (`src1(src2)`) or displacement (`#imm(src2)`) form.
fn effective_addr(cpu: &Cpu, insn: Instruction, width: Width) -> u32 {
    let base = cpu.regs.gpr.read(insn.src2());
    let offset = if insn.has_immediate() {
        insn.simm16() as u32 & width.align_mask()
    } else {
        cpu.regs.gpr.read(insn.src1())
    };
    base.wrapping_add(offset)
}

/// Warns about auto-increment with an index register equal to the base.
fn check_alias(cpu: &Cpu, insn: Instruction) {
    if insn.auto_inc() && !insn.has_immediate() && insn.src1() == insn.src2() {
        warn!(target: "i860::exec", pc = format_args!("{:#010x}", cpu.pc), %insn, "auto-increment with src1 == src2");
    }
}

/// `ld.b`, `ld.s`, `ld.l`: sign-extending integer loads.
pub fn ld_int(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let width = int_width(insn);
    let addr = effective_addr(cpu, insn, width);
    let raw = cpu.read_mem(addr, width)? as u32;
    let value = match width {
        Width::Byte => raw as u8 as i8 as i32 as u32,
        Width::Half => raw as u16 as i16 as i32 as u32,
        _ => raw,
    };
    cpu.regs.gpr.write(insn.dest(), value);
    Ok(())
}

/// `st.b`, `st.s`, `st.l src1, #off(src2)` with the split offset.
pub fn st_int(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let width = int_width(insn);
    let offset = insn.split_offset() as u32 & width.align_mask();
    let addr = cpu.regs.gpr.read(insn.src2()).wrapping_add(offset);
    let value = cpu.regs.gpr.read(insn.src1());
    cpu.write_mem(addr, width, u128::from(value))
}

/// `ixfr src1, fdest`: integer to float register transfer.
pub fn ixfr(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let value = cpu.regs.gpr.read(insn.src1());
    cpu.regs.fpr.write_bits(insn.dest(), value);
    Ok(())
}

fn auto_increment(cpu: &mut Cpu, insn: Instruction, addr: u32) {
    if insn.auto_inc() {
        cpu.regs.gpr.write(insn.src2(), addr);
    }
}

fn write_loaded(cpu: &mut Cpu, dest: usize, width: Width, value: u128) {
    match width {
        Width::Quad => {
            let words = [
                value as u32,
                (value >> 32) as u32,
                (value >> 64) as u32,
                (value >> 96) as u32,
            ];
            cpu.regs.fpr.load_lanes(dest, &words);
        }
        Width::Double => cpu.regs.fpr.write_bits_d(dest, value as u64),
        _ => cpu.regs.fpr.write_bits(dest, value as u32),
    }
}

/// `fld.{l,d,q}`: floating load.
pub fn fld(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    check_alias(cpu, insn);
    let width = fp_width(insn);
    let addr = effective_addr(cpu, insn, width);
    let value = cpu.read_mem(addr, width)?;
    write_loaded(cpu, insn.dest(), width, value);
    auto_increment(cpu, insn, addr);
    Ok(())
}

/// `pfld.{l,d}`: pipelined load through the three-stage load pipe.
///
/// The destination receives the value loaded three `pfld`s earlier. `pfld.q`
/// does not exist and traps.
pub fn pfld(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    check_alias(cpu, insn);
    let width = fp_width(insn);
    if width == Width::Quad {
        return Err(cpu.raise(TrapKind::Instruction));
    }
    let addr = effective_addr(cpu, insn, width);
    let value = cpu.read_mem(addr, width)?;

    let last = cpu.load.last(LOAD_STAGES);
    write_slot(cpu, insn.dest(), last);
    cpu.cr.fsr.lrp = last.is_double();
    let _ = cpu
        .load
        .advance(LOAD_STAGES, PipeSlot::raw(value as u64, width == Width::Double));
    auto_increment(cpu, insn, addr);
    Ok(())
}

/// `fst.{l,d,q}`: floating store.
pub fn fst(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    check_alias(cpu, insn);
    let width = fp_width(insn);
    let addr = effective_addr(cpu, insn, width);
    let src = insn.dest();
    let value = match width {
        Width::Quad => cpu
            .regs
            .fpr
            .store_lanes(src, 4)
            .iter()
            .rev()
            .fold(0u128, |acc, w| (acc << 32) | u128::from(*w)),
        Width::Double => u128::from(cpu.regs.fpr.read_bits_d(src)),
        _ => u128::from(cpu.regs.fpr.read_bits(src)),
    };
    cpu.write_mem(addr, width, value)?;
    auto_increment(cpu, insn, addr);
    Ok(())
}

/// `pst.d fsrc, #off(src2)`: pixel store under PSR.PM.
///
/// Only the pixels whose PM bit is set are written; PM then shifts right by
/// the number of pixels in a double word.
pub fn pst_d(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let addr = effective_addr(cpu, insn, Width::Double);
    let size = cpu.cr.psr.pixel_size().unwrap_or_else(|| {
        warn!(target: "i860::exec", pc = format_args!("{:#010x}", cpu.pc), "pst.d with undefined pixel size");
        PixelSize::Bits8
    });
    let (mask, shift) = pst_mask(size, cpu.cr.psr.pm);
    let value = cpu.regs.fpr.read_bits_d(insn.dest());
    cpu.write_masked(addr, value, mask)?;
    cpu.cr.psr.pm = (u32::from(cpu.cr.psr.pm) >> shift) as u8;
    auto_increment(cpu, insn, addr);
    Ok(())
}

/// `flush #off(src2)`: data cache flush. Only the address update is visible.
pub fn flush(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    let offset = insn.simm16() as u32 & !15;
    let addr = cpu.regs.gpr.read(insn.src2()).wrapping_add(offset);
    auto_increment(cpu, insn, addr);
    Ok(())
}
