//! Instruction execution routines.
//!
//! Every routine takes the CPU and the raw instruction and returns
//! `Ok(())` or the trap it raised. Routines never write a destination
//! register before the last operation that can fail.

/// Delayed and non-delayed branches.
pub mod branch;

/// Control registers, software traps and unassigned encodings.
pub mod control;

/// Dual-operation (PFAM/PFMAM family) routing.
pub mod dual;

/// Scalar and pipelined floating-point arithmetic.
pub mod float;

/// Graphics-unit integer and pixel operations.
pub mod graphics;

/// Integer ALU instructions.
pub mod integer;

/// Integer and floating loads and stores.
pub mod load_store;

use crate::common::ExecResult;
use crate::core::Cpu;
use crate::core::units::alu::AluOp;
use crate::isa::{Instruction, Op, decode};

/// Executes `insn` against `cpu`.
pub fn execute(cpu: &mut Cpu, insn: Instruction) -> ExecResult {
    match decode(insn) {
        Op::Illegal => control::illegal(cpu, insn),
        Op::LdInt => load_store::ld_int(cpu, insn),
        Op::StInt => load_store::st_int(cpu, insn),
        Op::Ixfr => load_store::ixfr(cpu, insn),
        Op::Fld => load_store::fld(cpu, insn),
        Op::Fst => load_store::fst(cpu, insn),
        Op::Pfld => load_store::pfld(cpu, insn),
        Op::PstD => load_store::pst_d(cpu, insn),
        Op::Flush => load_store::flush(cpu, insn),
        Op::LdC => control::ld_c(cpu, insn),
        Op::StC => control::st_c(cpu, insn),
        Op::Trap => control::trap(cpu, insn),
        Op::Intovr => control::intovr(cpu, insn),
        Op::Lock => control::lock(cpu, insn),
        Op::Unlock => control::unlock(cpu, insn),
        Op::Bri => branch::bri(cpu, insn),
        Op::Calli => branch::calli(cpu, insn),
        Op::Btne => branch::btne(cpu, insn),
        Op::Bte => branch::bte(cpu, insn),
        Op::Br => branch::br(cpu, insn),
        Op::Call => branch::call(cpu, insn),
        Op::Bc => branch::bc(cpu, insn),
        Op::BcT => branch::bc_t(cpu, insn),
        Op::Bnc => branch::bnc(cpu, insn),
        Op::BncT => branch::bnc_t(cpu, insn),
        Op::Bla => branch::bla(cpu, insn),
        Op::Addu => integer::arith(cpu, insn, AluOp::Addu),
        Op::Subu => integer::arith(cpu, insn, AluOp::Subu),
        Op::Adds => integer::arith(cpu, insn, AluOp::Adds),
        Op::Subs => integer::arith(cpu, insn, AluOp::Subs),
        Op::Shl => integer::shift(cpu, insn, AluOp::Shl),
        Op::Shr => integer::shift(cpu, insn, AluOp::Shr),
        Op::Shra => integer::shift(cpu, insn, AluOp::Shra),
        Op::Shrd => integer::shrd(cpu, insn),
        Op::And => integer::logic(cpu, insn, AluOp::And, false),
        Op::Andh => integer::logic(cpu, insn, AluOp::And, true),
        Op::Andnot => integer::logic(cpu, insn, AluOp::AndNot, false),
        Op::Andnoth => integer::logic(cpu, insn, AluOp::AndNot, true),
        Op::Or => integer::logic(cpu, insn, AluOp::Or, false),
        Op::Orh => integer::logic(cpu, insn, AluOp::Or, true),
        Op::Xor => integer::logic(cpu, insn, AluOp::Xor, false),
        Op::Xorh => integer::logic(cpu, insn, AluOp::Xor, true),
        Op::DualOp => dual::dual_op(cpu, insn),
        Op::Fmul => float::fmul(cpu, insn),
        Op::Pfmul3 => float::pfmul3(cpu, insn),
        Op::Fmlow => float::fmlow(cpu, insn),
        Op::Frcp => float::frcp(cpu, insn),
        Op::Frsqr => float::frsqr(cpu, insn),
        Op::Fadd => float::fadd(cpu, insn),
        Op::Fsub => float::fsub(cpu, insn),
        Op::Fix => float::fix(cpu, insn, false),
        Op::Ftrunc => float::fix(cpu, insn, true),
        Op::Famov => float::famov(cpu, insn),
        Op::Pfgt => float::pfgt(cpu, insn),
        Op::Pfeq => float::pfeq(cpu, insn),
        Op::Fxfr => float::fxfr(cpu, insn),
        Op::Fiadd => graphics::fiadd(cpu, insn),
        Op::Fisub => graphics::fisub(cpu, insn),
        Op::Faddp => graphics::faddp(cpu, insn),
        Op::Faddz => graphics::faddz(cpu, insn),
        Op::Form => graphics::form(cpu, insn),
        Op::Fzchkl => graphics::fzchk(cpu, insn, true),
        Op::Fzchks => graphics::fzchk(cpu, insn, false),
    }
}
