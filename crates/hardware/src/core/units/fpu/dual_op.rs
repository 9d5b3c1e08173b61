//! Dual-operation (PFAM/PFMAM) operand routing.
//!
//! The 4-bit data-path control (DPC) field of a dual-operation instruction
//! selects where each pipe takes its operands and whether the T and K
//! registers are latched. The mapping below is indexed by DPC.

/// Operand source for one input of the adder or multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// `fsrc1` register.
    Src1,
    /// `fsrc2` register.
    Src2,
    /// KR constant register.
    Kr,
    /// KI constant register.
    Ki,
    /// T transfer register.
    T,
    /// Last stage of the adder pipe.
    AdderLast,
    /// Last stage of the multiplier pipe.
    MulLast,
}

/// One row of the routing table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    /// Assembler suffix for the row.
    pub name: &'static str,
    /// Multiplier first operand.
    pub m_op1: Operand,
    /// Multiplier second operand.
    pub m_op2: Operand,
    /// Adder first operand.
    pub a_op1: Operand,
    /// Adder second operand.
    pub a_op2: Operand,
    /// Load T from the multiplier's last stage.
    pub load_t: bool,
    /// Load KR (or KI) from `fsrc1`.
    pub load_k: bool,
}

const fn route(
    name: &'static str,
    m_op1: Operand,
    m_op2: Operand,
    a_op1: Operand,
    a_op2: Operand,
    load_t: bool,
    load_k: bool,
) -> Route {
    Route {
        name,
        m_op1,
        m_op2,
        a_op1,
        a_op2,
        load_t,
        load_k,
    }
}

use Operand::{AdderLast, Ki, Kr, MulLast, Src1, Src2, T};

/// Routing table indexed by DPC (instruction bits 3..0).
pub const ROUTES: [Route; 16] = [
    route("r2p1", Kr, Src2, Src1, MulLast, false, true),
    route("r2pt", Kr, Src2, T, MulLast, false, true),
    route("r2ap1", Kr, Src2, Src1, AdderLast, true, true),
    route("r2apt", Kr, Src2, T, AdderLast, true, true),
    route("i2p1", Ki, Src2, Src1, MulLast, false, true),
    route("i2pt", Ki, Src2, T, MulLast, false, true),
    route("i2ap1", Ki, Src2, Src1, AdderLast, true, true),
    route("i2apt", Ki, Src2, T, AdderLast, true, true),
    route("rat1p2", Kr, AdderLast, Src1, Src2, true, false),
    route("m12apm", Src1, Src2, AdderLast, MulLast, false, false),
    route("ra1p2", Kr, AdderLast, Src1, Src2, false, false),
    route("m12ttpa", Src1, Src2, T, AdderLast, true, false),
    route("iat1p2", Ki, AdderLast, Src1, Src2, true, false),
    route("m12tpm", Src1, Src2, T, MulLast, false, false),
    route("ia1p2", Ki, AdderLast, Src1, Src2, false, false),
    route("m12tpa", Src1, Src2, T, AdderLast, false, false),
];

/// Routing row for a raw instruction word.
pub const fn route_for(insn: u32) -> &'static Route {
    &ROUTES[(insn & 0xf) as usize]
}

/// True if the row latches KI rather than KR when `load_k` is set.
pub const fn loads_ki(route: &Route) -> bool {
    matches!(route.m_op1, Operand::Ki)
}
