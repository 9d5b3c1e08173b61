//! Two-level page table walker.
//!
//! A virtual address splits into a 10-bit directory index, a 10-bit table
//! index and a 12-bit offset. The page directory entry lives at
//! `DTB | dir << 2` and the page table entry at `PDE.frame | page << 2`.
//! Entries are read and written back through the active byte-order table.

use crate::common::{AccessType, PhysAddr, TrapKind, VirtAddr};
use crate::soc::{Bus, BusTable};

use super::tlb::TlbHit;

/// Present bit.
pub const PTE_P: u32 = 1 << 0;
/// Writable bit.
pub const PTE_W: u32 = 1 << 1;
/// User-accessible bit.
pub const PTE_U: u32 = 1 << 2;
/// Write-through bit.
pub const PTE_WT: u32 = 1 << 3;
/// Cache-disable bit.
pub const PTE_CD: u32 = 1 << 4;
/// Accessed bit.
pub const PTE_A: u32 = 1 << 5;
/// Dirty bit.
pub const PTE_D: u32 = 1 << 6;
/// Frame address bits.
pub const PTE_FRAME: u32 = 0xffff_f000;

/// A raw 32-bit page directory or page table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageTableEntry(pub u32);

impl PageTableEntry {
    /// True if P is set.
    pub const fn present(self) -> bool {
        self.0 & PTE_P != 0
    }
    /// True if W is set.
    pub const fn writable(self) -> bool {
        self.0 & PTE_W != 0
    }
    /// True if U is set.
    pub const fn user(self) -> bool {
        self.0 & PTE_U != 0
    }
    /// True if D is set.
    pub const fn dirty(self) -> bool {
        self.0 & PTE_D != 0
    }
    /// Frame address (bits 31..12).
    pub const fn frame(self) -> u32 {
        self.0 & PTE_FRAME
    }
}

/// Privilege context for one translation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessContext {
    /// PSR.U: access made from user mode.
    pub user: bool,
    /// EPSR.WP: enforce write protection in supervisor mode too.
    pub write_protect: bool,
}

/// Fault class for a failed reference.
pub const fn fault_kind(access: AccessType) -> TrapKind {
    if access.is_data() {
        TrapKind::DataAccess
    } else {
        TrapKind::InstructionAccess
    }
}

/// Checks one level's permission bits against the access.
pub const fn check_level(
    writable: bool,
    user_ok: bool,
    access: AccessType,
    ctx: AccessContext,
) -> Result<(), TrapKind> {
    if access.is_write() && (ctx.user || ctx.write_protect) && !writable {
        return Err(fault_kind(access));
    }
    if ctx.user && !user_ok {
        return Err(fault_kind(access));
    }
    Ok(())
}

/// Walks the tables for `vaddr` rooted at directory base `dtb`.
///
/// Sets the accessed bit on both levels. On success returns the translation
/// to install in the TLB.
///
/// # Errors
///
/// The fault class of the first level that denies the access, or a data
/// access fault for a write to a page whose dirty bit is clear.
pub fn walk(
    bus: &mut dyn Bus,
    table: &BusTable,
    dtb: u32,
    vaddr: VirtAddr,
    access: AccessType,
    ctx: AccessContext,
) -> Result<TlbHit, TrapKind> {
    let pde_addr = PhysAddr::new(dtb | (vaddr.dir_index() << 2));
    let pde = PageTableEntry(table.read_u32(bus, pde_addr));
    if !pde.present() {
        return Err(fault_kind(access));
    }
    check_level(pde.writable(), pde.user(), access, ctx)?;

    let pte_addr = PhysAddr::new(pde.frame() | (vaddr.table_index() << 2));
    let pte = PageTableEntry(table.read_u32(bus, pte_addr));
    if !pte.present() {
        return Err(fault_kind(access));
    }
    check_level(pte.writable(), pte.user(), access, ctx)?;

    table.write_u32(bus, pde_addr, pde.0 | PTE_A);
    table.write_u32(bus, pte_addr, pte.0 | PTE_A);

    if access.is_write() && !pte.dirty() {
        return Err(TrapKind::DataAccess);
    }

    Ok(TlbHit {
        frame: pte.frame(),
        writable: pde.writable() && pte.writable(),
        user: pde.user() && pte.user(),
        dirty: pte.dirty(),
    })
}
