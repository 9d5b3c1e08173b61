//! Memory Access Handling.
//!
//! This module implements the data side of the load/store unit. It performs the following:
//! 1. **Alignment Check:** misaligned operands raise a data-access trap when enabled.
//! 2. **Breakpoint Check:** PSR.BR/BW compare the operand against DB.
//! 3. **Address Translation:** virtual to physical through the MMU.
//! 4. **Bus Access:** through the accessor table selected by EPSR.BE.
//!
//! A failed access returns `Err` before any register is touched, so callers
//! only write their destination after `?` succeeds.

use tracing::debug;

use super::Cpu;
use crate::common::{AccessType, ExecResult, PhysAddr, Trap, TrapKind, VirtAddr, Width};
use crate::core::units::mmu::ptw::AccessContext;
use crate::soc::ByteOrder;

impl Cpu {
    /// Sets the PSR bit for `kind` and returns the trap to propagate.
    pub(crate) fn raise(&mut self, kind: TrapKind) -> Trap {
        self.cr.psr.set_trap(kind);
        Trap::new(kind)
    }

    /// Translates `vaddr` for `access` under the current privilege and DIRBASE.
    pub(crate) fn translate(&mut self, vaddr: VirtAddr, access: AccessType) -> Result<PhysAddr, Trap> {
        let ctx = AccessContext {
            user: self.cr.psr.u,
            write_protect: self.cr.epsr.wp,
        };
        self.mmu
            .translate(vaddr, access, ctx, &self.cr.dirbase, self.bus.as_mut(), self.table)
            .map_err(|kind| self.raise(kind))
    }

    fn check_data(&mut self, vaddr: u32, width: Width, access: AccessType) -> Result<PhysAddr, Trap> {
        let mask = width.align_mask();
        if vaddr & !mask != 0 && self.trap_misaligned {
            debug!(target: "i860::mem", vaddr = format_args!("{vaddr:#010x}"), ?width, "misaligned");
            return Err(self.raise(TrapKind::DataAccess));
        }

        let psr = self.cr.psr;
        let armed = if access.is_write() { psr.bw } else { psr.br };
        if armed && vaddr & mask == self.cr.db & mask {
            debug!(target: "i860::mem", vaddr = format_args!("{vaddr:#010x}"), ?access, "data breakpoint");
            return Err(self.raise(TrapKind::DataAccess));
        }

        self.translate(VirtAddr::new(vaddr), access)
    }

    /// Loads `width` bytes from `vaddr` in the current byte order.
    ///
    /// # Errors
    ///
    /// A data-access trap from alignment, breakpoint or translation.
    pub fn read_mem(&mut self, vaddr: u32, width: Width) -> Result<u128, Trap> {
        let paddr = self.check_data(vaddr, width, AccessType::Read)?;
        Ok(self.table.read(self.bus.as_mut(), paddr, width))
    }

    /// Stores the low `width` bytes of `val` at `vaddr` in the current byte order.
    ///
    /// # Errors
    ///
    /// A data-access trap from alignment, breakpoint or translation. Memory is
    /// not modified on error.
    pub fn write_mem(&mut self, vaddr: u32, width: Width, val: u128) -> ExecResult {
        let paddr = self.check_data(vaddr, width, AccessType::Write)?;
        self.table.write(self.bus.as_mut(), paddr, width, val);
        Ok(())
    }

    /// Stores the bytes of a 64-bit operand selected by `mask` (bit `i` = byte `i`).
    ///
    /// # Errors
    ///
    /// As [`Cpu::write_mem`].
    pub fn write_masked(&mut self, vaddr: u32, val: u64, mask: u8) -> ExecResult {
        let paddr = self.check_data(vaddr, Width::Double, AccessType::Write)?;
        if mask == 0xff {
            self.table
                .write(self.bus.as_mut(), paddr, Width::Double, u128::from(val));
            return Ok(());
        }

        let big = self.table.order() == ByteOrder::Big;
        for i in 0..8u32 {
            if mask & (1 << i) == 0 {
                continue;
            }
            let offset = if big { 7 - i } else { i };
            let byte = (val >> (8 * i)) as u8;
            self.bus
                .write_u8(PhysAddr::new(paddr.val().wrapping_add(offset)), byte);
        }
        Ok(())
    }
}
