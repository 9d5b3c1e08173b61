//! Flat RAM board.
//!
//! [`FlatMemory`] maps one contiguous RAM region at a physical base address and
//! implements [`Bus`] for it. Accesses outside the region read as zero and
//! writes are dropped; both are traced. It backs the command-line runner and
//! the test harness, standing in for a real board's address decoder.

use tracing::trace;

use crate::common::{CoreError, PhysAddr};
use crate::soc::traits::{BlankSource, Bus};

/// A single RAM region on an otherwise empty bus.
#[derive(Clone, Debug)]
pub struct FlatMemory {
    base: u32,
    data: Vec<u8>,
    blank: [bool; 2],
}

impl FlatMemory {
    /// Creates `size` bytes of zeroed RAM at physical address `base`.
    pub fn new(base: u32, size: usize) -> Self {
        Self {
            base,
            data: vec![0; size],
            blank: [false; 2],
        }
    }

    /// Physical base address.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Region size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the region has no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copies `image` into RAM at physical address `addr`.
    ///
    /// # Errors
    ///
    /// [`CoreError::ImageTooLarge`] if any part of the image falls outside the region.
    pub fn load(&mut self, addr: u32, image: &[u8]) -> Result<(), CoreError> {
        let too_large = || CoreError::ImageTooLarge {
            addr,
            len: image.len(),
        };
        let start = addr.checked_sub(self.base).ok_or_else(too_large)? as usize;
        let end = start.checked_add(image.len()).ok_or_else(too_large)?;
        let dst = self.data.get_mut(start..end).ok_or_else(too_large)?;
        dst.copy_from_slice(image);
        Ok(())
    }

    /// Raw view of RAM contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Last blanking state reported for `source`.
    pub const fn is_blanked(&self, source: BlankSource) -> bool {
        match source {
            BlankSource::Display => self.blank[0],
            BlankSource::Video => self.blank[1],
        }
    }

    fn offset(&self, addr: PhysAddr) -> Option<usize> {
        let off = addr.val().wrapping_sub(self.base) as usize;
        (off < self.data.len()).then_some(off)
    }
}

impl Bus for FlatMemory {
    fn name(&self) -> &str {
        "RAM"
    }

    fn read_u8(&mut self, addr: PhysAddr) -> u8 {
        match self.offset(addr) {
            Some(off) => self.data[off],
            None => {
                trace!(target: "i860::bus", %addr, "unmapped read");
                0
            }
        }
    }

    fn write_u8(&mut self, addr: PhysAddr, val: u8) {
        match self.offset(addr) {
            Some(off) => self.data[off] = val,
            None => trace!(target: "i860::bus", %addr, val, "unmapped write dropped"),
        }
    }

    fn read_bytes(&mut self, addr: PhysAddr, buf: &mut [u8]) {
        if let Some(off) = self.offset(addr)
            && let Some(src) = self.data.get(off..off + buf.len())
        {
            buf.copy_from_slice(src);
            return;
        }
        for (i, b) in buf.iter_mut().enumerate() {
            *b = self.read_u8(PhysAddr::new(addr.val().wrapping_add(i as u32)));
        }
    }

    fn write_bytes(&mut self, addr: PhysAddr, data: &[u8]) {
        if let Some(off) = self.offset(addr)
            && let Some(dst) = self.data.get_mut(off..off + data.len())
        {
            dst.copy_from_slice(data);
            return;
        }
        for (i, b) in data.iter().enumerate() {
            self.write_u8(PhysAddr::new(addr.val().wrapping_add(i as u32)), *b);
        }
    }

    fn blank_changed(&mut self, source: BlankSource, blanked: bool) {
        match source {
            BlankSource::Display => self.blank[0] = blanked,
            BlankSource::Video => self.blank[1] = blanked,
        }
    }
}
