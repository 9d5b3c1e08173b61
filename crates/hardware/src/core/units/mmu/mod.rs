//! Memory Management Unit (MMU).
//!
//! Virtual-to-physical translation for the i860's 4 KiB two-level paging.
//! When DIRBASE.ATE is clear every address maps to itself. Otherwise the TLB
//! is consulted first and the page walker fills it on a miss.

/// Two-level page table walker.
pub mod ptw;

/// Translation Lookaside Buffer.
pub mod tlb;

use tracing::trace;

use crate::common::{AccessType, PhysAddr, TrapKind, VirtAddr};
use crate::core::arch::dirbase::Dirbase;
use crate::soc::{Bus, BusTable};

use self::ptw::{AccessContext, check_level};
use self::tlb::Tlb;

/// Memory Management Unit.
#[derive(Clone, Debug)]
pub struct Mmu {
    /// Shared instruction/data TLB.
    pub tlb: Tlb,
    /// TLB hits since the last telemetry report.
    pub hits: u64,
    /// TLB misses since the last telemetry report.
    pub misses: u64,
    /// Whole-TLB flushes since the last telemetry report.
    pub flushes: u64,
}

impl Mmu {
    /// Creates an MMU whose TLB has `tlb_sets` two-slot sets.
    pub fn new(tlb_sets: usize) -> Self {
        Self {
            tlb: Tlb::new(tlb_sets),
            hits: 0,
            misses: 0,
            flushes: 0,
        }
    }

    /// Translates `vaddr` for `access`.
    ///
    /// A TLB hit re-checks permissions against the current context; a write
    /// hit on a clean page falls through to the walker so the dirty-bit rule
    /// is applied against memory.
    ///
    /// # Errors
    ///
    /// The trap class to raise. The caller sets the PSR trap bit.
    pub fn translate(
        &mut self,
        vaddr: VirtAddr,
        access: AccessType,
        ctx: AccessContext,
        dirbase: &Dirbase,
        bus: &mut dyn Bus,
        table: &BusTable,
    ) -> Result<PhysAddr, TrapKind> {
        if !dirbase.ate {
            return Ok(PhysAddr::new(vaddr.val()));
        }

        let vpn = vaddr.vpn();
        if let Some(hit) = self.tlb.lookup(vpn) {
            check_level(hit.writable, hit.user, access, ctx)?;
            if !(access.is_write() && !hit.dirty) {
                self.hits += 1;
                return Ok(PhysAddr::from_frame(hit.frame, vaddr.page_offset()));
            }
        }

        self.misses += 1;
        let hit = ptw::walk(bus, table, dirbase.dtb, vaddr, access, ctx)?;
        trace!(target: "i860::mmu", %vaddr, frame = hit.frame, ?access, "tlb fill");
        self.tlb.insert(vpn, access.is_write(), hit);
        Ok(PhysAddr::from_frame(hit.frame, vaddr.page_offset()))
    }

    /// Drops every cached translation.
    pub fn flush(&mut self) {
        self.tlb.flush();
        self.flushes += 1;
    }

    /// Returns and clears the hit, miss and flush counters.
    pub fn take_counters(&mut self) -> (u64, u64, u64) {
        (
            std::mem::take(&mut self.hits),
            std::mem::take(&mut self.misses),
            std::mem::take(&mut self.flushes),
        )
    }
}
