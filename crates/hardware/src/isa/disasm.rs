//! Instruction disassembly.
//!
//! The debugger console is an external collaborator that plugs into the core
//! through [`Disassembler`]. [`BasicDisassembler`] is a small built-in
//! implementation that renders mnemonics with register operands and branch
//! targets; it is what the instruction tracer and the command-line runner use.
//!
//! # Usage
//!
//! ```
//! use i860_core::isa::disasm::{BasicDisassembler, Disassembler};
//! let text = BasicDisassembler.disassemble(0, 0x8022_1800); // addu r3,r1,r2
//! assert_eq!(text, "addu r3,r1,r2");
//! ```

use super::decode::{Op, decode};
use super::instruction::Instruction;
use crate::common::constants::DUAL_FNOP;
use crate::core::units::fpu::dual_op::ROUTES;

/// Converts instruction words to text.
pub trait Disassembler: Send {
    /// Renders the instruction `insn` located at `pc`.
    fn disassemble(&self, pc: u32, insn: u32) -> String;
}

/// Built-in mnemonic disassembler.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicDisassembler;

fn ctrl_name(idx: usize) -> &'static str {
    ["fir", "psr", "dirbase", "db", "fsr", "epsr"]
        .get(idx)
        .copied()
        .unwrap_or("?")
}

fn precision(insn: Instruction) -> &'static str {
    match (insn.s(), insn.r()) {
        (false, false) => ".ss",
        (false, true) => ".sd",
        (true, false) => ".ds",
        (true, true) => ".dd",
    }
}

/// Size suffix and offset alignment mask of a floating load or store.
const fn fp_size(insn: Instruction) -> (&'static str, i32) {
    match (insn.raw() >> 1) & 3 {
        0 => (".d", !7),
        2 => (".q", !15),
        _ => (".l", !3),
    }
}

fn int_name(op: Op) -> &'static str {
    match op {
        Op::Addu => "addu",
        Op::Subu => "subu",
        Op::Adds => "adds",
        Op::Subs => "subs",
        Op::Shl => "shl",
        Op::Shr => "shr",
        Op::Shrd => "shrd",
        Op::Shra => "shra",
        Op::And => "and",
        Op::Andh => "andh",
        Op::Andnot => "andnot",
        Op::Andnoth => "andnoth",
        Op::Or => "or",
        Op::Orh => "orh",
        Op::Xor => "xor",
        Op::Xorh => "xorh",
        _ => "?",
    }
}

fn fp_name(op: Op, insn: Instruction) -> &'static str {
    match op {
        Op::Fmul => "fmul",
        Op::Fmlow => "fmlow",
        Op::Frcp => "frcp",
        Op::Frsqr => "frsqr",
        Op::Pfmul3 => "pfmul3",
        Op::Fadd => "fadd",
        Op::Fsub => "fsub",
        Op::Fix => "fix",
        Op::Famov => "famov",
        Op::Pfgt if insn.r() => "pfle",
        Op::Pfgt => "pfgt",
        Op::Pfeq => "pfeq",
        Op::Ftrunc => "ftrunc",
        Op::Fxfr => "fxfr",
        Op::Fiadd => "fiadd",
        Op::Fisub => "fisub",
        Op::Faddp => "faddp",
        Op::Faddz => "faddz",
        Op::Fzchkl => "fzchkl",
        Op::Form => "form",
        Op::Fzchks => "fzchks",
        Op::DualOp => match (insn.p(), insn.fp_op() & 0x10 != 0) {
            (true, false) => "pfam",
            (true, true) => "pfsm",
            (false, false) => "pfmam",
            (false, true) => "pfmsm",
        },
        _ => "?",
    }
}

impl Disassembler for BasicDisassembler {
    fn disassemble(&self, pc: u32, raw: u32) -> String {
        let insn = Instruction(raw);
        let (s1, s2, d) = (insn.src1(), insn.src2(), insn.dest());
        let target = |words: i32| pc.wrapping_add(4).wrapping_add((words << 2) as u32);
        let op = decode(insn);
        match op {
            Op::Illegal => format!(".long {raw:#010x}"),
            Op::LdInt | Op::StInt => {
                let (size, align) = [(".b", !0), (".b", !0), (".s", !1), (".l", !3)]
                    [(((raw >> 27) & 2) | (raw & 1)) as usize];
                if op == Op::StInt {
                    format!("st{size} r{s1},{}(r{s2})", insn.split_offset() & align)
                } else if insn.has_immediate() {
                    format!("ld{size} {}(r{s2}),r{d}", insn.simm16() & align)
                } else {
                    format!("ld{size} r{s1}(r{s2}),r{d}")
                }
            }
            Op::Fld | Op::Pfld | Op::Fst => {
                let base = match op {
                    Op::Fld => "fld",
                    Op::Pfld => "pfld",
                    _ => "fst",
                };
                let (suffix, align) = fp_size(insn);
                let inc = if insn.auto_inc() { "++" } else { "" };
                let addr = if insn.has_immediate() {
                    format!("{}(r{s2}){inc}", insn.simm16() & align)
                } else {
                    format!("r{s1}(r{s2}){inc}")
                };
                if op == Op::Fst {
                    format!("{base}{suffix} f{d},{addr}")
                } else {
                    format!("{base}{suffix} {addr},f{d}")
                }
            }
            Op::PstD => format!("pst.d f{d},{}(r{s2})", insn.simm16() & !7),
            Op::Ixfr => format!("ixfr r{s1},f{d}"),
            Op::LdC => format!("ld.c {},r{d}", ctrl_name(s2)),
            Op::StC => format!("st.c r{s1},{}", ctrl_name(s2)),
            Op::Flush => format!("flush {}(r{s2})", insn.simm16() & !15),
            Op::Bri => format!("bri r{s1}"),
            Op::Trap => format!("trap r{s1},r{s2},r{d}"),
            Op::Lock => "lock".into(),
            Op::Unlock => "unlock".into(),
            Op::Intovr => "intovr".into(),
            Op::Calli => format!("calli r{s1}"),
            Op::Btne | Op::Bte => {
                let name = if op == Op::Bte { "bte" } else { "btne" };
                let t = target(insn.split_offset());
                if raw & (1 << 26) != 0 {
                    format!("{name} {s1},r{s2},{t:#010x}")
                } else {
                    format!("{name} r{s1},r{s2},{t:#010x}")
                }
            }
            Op::Br | Op::Call | Op::Bc | Op::BcT | Op::Bnc | Op::BncT => {
                let name = match op {
                    Op::Br => "br",
                    Op::Call => "call",
                    Op::Bc => "bc",
                    Op::BcT => "bc.t",
                    Op::Bnc => "bnc",
                    _ => "bnc.t",
                };
                format!("{name} {:#010x}", target(insn.branch26()))
            }
            Op::Bla => format!("bla r{s1},r{s2},{:#010x}", target(insn.split_offset())),
            Op::Addu
            | Op::Subu
            | Op::Adds
            | Op::Subs
            | Op::Shl
            | Op::Shr
            | Op::Shrd
            | Op::Shra
            | Op::And
            | Op::Andh
            | Op::Andnot
            | Op::Andnoth
            | Op::Or
            | Op::Orh
            | Op::Xor
            | Op::Xorh => {
                let name = int_name(op);
                if raw == DUAL_FNOP {
                    "d.fnop".into()
                } else if insn.has_immediate() && op != Op::Shrd {
                    format!("{name} {:#x},r{s2},r{d}", insn.imm16())
                } else {
                    format!("{name} r{s1},r{s2},r{d}")
                }
            }
            _ => {
                let name = fp_name(op, insn);
                let dual = if insn.d() { "d." } else { "" };
                let piped =
                    insn.p() && !matches!(op, Op::DualOp | Op::Pfgt | Op::Pfeq | Op::Pfmul3);
                let name = if piped {
                    format!("pf{}", &name[1..])
                } else {
                    name.to_string()
                };
                match op {
                    Op::Fxfr => format!("{dual}{name} f{s1},r{d}"),
                    Op::Frcp | Op::Frsqr => format!("{dual}{name}{} f{s2},f{d}", precision(insn)),
                    Op::DualOp => format!(
                        "{dual}{name}{} f{s1},f{s2},f{d} ; {}",
                        precision(insn),
                        ROUTES[insn.dpc()].name
                    ),
                    _ => format!("{dual}{name}{} f{s1},f{s2},f{d}", precision(insn)),
                }
            }
        }
    }
}
