//! Bus trait for the host board.
//!
//! The core reaches memory and devices only through [`Bus`]. Implementors
//! supply single-byte access at a physical address; the multi-byte accessors
//! in both byte orders have default implementations built from those, and a
//! board with faster paths may override any of them.
//!
//! All implementors must be `Send` so the core can run on its own thread.

use crate::common::PhysAddr;

/// Physical bus collaborator.
pub trait Bus: Send {
    /// Short name used in logs.
    fn name(&self) -> &str {
        "bus"
    }

    /// Reads one byte.
    fn read_u8(&mut self, addr: PhysAddr) -> u8;
    /// Writes one byte.
    fn write_u8(&mut self, addr: PhysAddr, val: u8);

    /// Fills `buf` from consecutive addresses starting at `addr`.
    fn read_bytes(&mut self, addr: PhysAddr, buf: &mut [u8]) {
        for (i, b) in buf.iter_mut().enumerate() {
            *b = self.read_u8(PhysAddr::new(addr.val().wrapping_add(i as u32)));
        }
    }

    /// Writes `data` to consecutive addresses starting at `addr`.
    fn write_bytes(&mut self, addr: PhysAddr, data: &[u8]) {
        for (i, b) in data.iter().enumerate() {
            self.write_u8(PhysAddr::new(addr.val().wrapping_add(i as u32)), *b);
        }
    }

    /// Display or video blanking changed on the board.
    fn blank_changed(&mut self, _source: BlankSource, _blanked: bool) {}

    /// Reads a little-endian half-word.
    fn read_u16_le(&mut self, addr: PhysAddr) -> u16 {
        let mut b = [0; 2];
        self.read_bytes(addr, &mut b);
        u16::from_le_bytes(b)
    }
    /// Reads a little-endian word.
    fn read_u32_le(&mut self, addr: PhysAddr) -> u32 {
        let mut b = [0; 4];
        self.read_bytes(addr, &mut b);
        u32::from_le_bytes(b)
    }
    /// Reads a little-endian double-word.
    fn read_u64_le(&mut self, addr: PhysAddr) -> u64 {
        let mut b = [0; 8];
        self.read_bytes(addr, &mut b);
        u64::from_le_bytes(b)
    }
    /// Reads a little-endian quad-word.
    fn read_u128_le(&mut self, addr: PhysAddr) -> u128 {
        let mut b = [0; 16];
        self.read_bytes(addr, &mut b);
        u128::from_le_bytes(b)
    }

    /// Reads a big-endian half-word.
    fn read_u16_be(&mut self, addr: PhysAddr) -> u16 {
        let mut b = [0; 2];
        self.read_bytes(addr, &mut b);
        u16::from_be_bytes(b)
    }
    /// Reads a big-endian word.
    fn read_u32_be(&mut self, addr: PhysAddr) -> u32 {
        let mut b = [0; 4];
        self.read_bytes(addr, &mut b);
        u32::from_be_bytes(b)
    }
    /// Reads a big-endian double-word.
    fn read_u64_be(&mut self, addr: PhysAddr) -> u64 {
        let mut b = [0; 8];
        self.read_bytes(addr, &mut b);
        u64::from_be_bytes(b)
    }
    /// Reads a big-endian quad-word.
    fn read_u128_be(&mut self, addr: PhysAddr) -> u128 {
        let mut b = [0; 16];
        self.read_bytes(addr, &mut b);
        u128::from_be_bytes(b)
    }

    /// Writes a little-endian half-word.
    fn write_u16_le(&mut self, addr: PhysAddr, val: u16) {
        self.write_bytes(addr, &val.to_le_bytes());
    }
    /// Writes a little-endian word.
    fn write_u32_le(&mut self, addr: PhysAddr, val: u32) {
        self.write_bytes(addr, &val.to_le_bytes());
    }
    /// Writes a little-endian double-word.
    fn write_u64_le(&mut self, addr: PhysAddr, val: u64) {
        self.write_bytes(addr, &val.to_le_bytes());
    }
    /// Writes a little-endian quad-word.
    fn write_u128_le(&mut self, addr: PhysAddr, val: u128) {
        self.write_bytes(addr, &val.to_le_bytes());
    }

    /// Writes a big-endian half-word.
    fn write_u16_be(&mut self, addr: PhysAddr, val: u16) {
        self.write_bytes(addr, &val.to_be_bytes());
    }
    /// Writes a big-endian word.
    fn write_u32_be(&mut self, addr: PhysAddr, val: u32) {
        self.write_bytes(addr, &val.to_be_bytes());
    }
    /// Writes a big-endian double-word.
    fn write_u64_be(&mut self, addr: PhysAddr, val: u64) {
        self.write_bytes(addr, &val.to_be_bytes());
    }
    /// Writes a big-endian quad-word.
    fn write_u128_be(&mut self, addr: PhysAddr, val: u128) {
        self.write_bytes(addr, &val.to_be_bytes());
    }
}

/// Source of a blanking notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlankSource {
    /// Display (monitor) blanking.
    Display,
    /// Video input blanking.
    Video,
}
