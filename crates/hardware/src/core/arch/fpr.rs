//! i860 Floating-Point Register File.
//!
//! The floating file is 32 lanes of 32 bits. A single-precision register is one
//! lane; a double-precision register is an even/odd lane pair with the even lane
//! holding the low word. `f0` and `f1` read as zero in every width and ignore
//! ordinary writes.
//!
//! Raw load paths (`fld.d`, `fld.q`) write lane storage directly, so a load that
//! targets `f0` transiently overwrites the zero lanes. [`Fpr::load_lanes`] models
//! this and re-zeroes the pair before returning, which keeps the zero invariant at
//! every instruction boundary.

use std::fmt::Write as _;

/// Floating-point register file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fpr {
    lanes: [u32; 32],
}

impl Default for Fpr {
    fn default() -> Self {
        Self::new()
    }
}

impl Fpr {
    /// Creates a floating register file with all lanes zero.
    pub const fn new() -> Self {
        Self { lanes: [0; 32] }
    }

    /// Reads the raw bits of single register `idx`.
    #[inline(always)]
    pub const fn read_bits(&self, idx: usize) -> u32 {
        let idx = idx & 0x1f;
        if idx < 2 { 0 } else { self.lanes[idx] }
    }

    /// Reads the raw bits of the double register starting at `idx` (odd indices round down).
    #[inline(always)]
    pub const fn read_bits_d(&self, idx: usize) -> u64 {
        let lo = idx & 0x1e;
        if lo == 0 {
            0
        } else {
            (self.lanes[lo] as u64) | ((self.lanes[lo + 1] as u64) << 32)
        }
    }

    /// Reads single register `idx` as an `f32`.
    #[inline(always)]
    pub const fn read_s(&self, idx: usize) -> f32 {
        f32::from_bits(self.read_bits(idx))
    }

    /// Reads double register `idx` as an `f64`.
    #[inline(always)]
    pub const fn read_d(&self, idx: usize) -> f64 {
        f64::from_bits(self.read_bits_d(idx))
    }

    /// Writes raw bits to single register `idx`; ignored for `f0`/`f1`.
    #[inline(always)]
    pub fn write_bits(&mut self, idx: usize, bits: u32) {
        let idx = idx & 0x1f;
        if idx >= 2 {
            self.lanes[idx] = bits;
        }
    }

    /// Writes raw bits to double register `idx`; ignored for the `f0`/`f1` pair.
    #[inline(always)]
    pub fn write_bits_d(&mut self, idx: usize, bits: u64) {
        let lo = idx & 0x1e;
        if lo != 0 {
            self.lanes[lo] = bits as u32;
            self.lanes[lo + 1] = (bits >> 32) as u32;
        }
    }

    /// Writes an `f32` to single register `idx`.
    #[inline(always)]
    pub fn write_s(&mut self, idx: usize, val: f32) {
        self.write_bits(idx, val.to_bits());
    }

    /// Writes an `f64` to double register `idx`.
    #[inline(always)]
    pub fn write_d(&mut self, idx: usize, val: f64) {
        self.write_bits_d(idx, val.to_bits());
    }

    /// Stores `words` into consecutive lanes starting at `idx` without the
    /// zero-register filter, then forces `f0`/`f1` back to zero.
    ///
    /// `idx` is aligned down to the transfer size (2 lanes for a double, 4 for a quad).
    pub fn load_lanes(&mut self, idx: usize, words: &[u32]) {
        let align = words.len().next_power_of_two().max(1);
        let base = (idx & 0x1f) & !(align - 1);
        for (i, w) in words.iter().enumerate() {
            self.lanes[(base + i) & 0x1f] = *w;
        }
        self.lanes[0] = 0;
        self.lanes[1] = 0;
    }

    /// Reads `count` consecutive lanes starting at `idx` (aligned like [`Fpr::load_lanes`]).
    pub fn store_lanes(&self, idx: usize, count: usize) -> Vec<u32> {
        let align = count.next_power_of_two().max(1);
        let base = (idx & 0x1f) & !(align - 1);
        (0..count).map(|i| self.read_bits(base + i)).collect()
    }

    /// Fills lanes 2..31 with `pattern | index`.
    pub fn fill_undefined(&mut self, pattern: u32) {
        for (i, l) in self.lanes.iter_mut().enumerate().skip(2) {
            *l = pattern | i as u32;
        }
        self.lanes[0] = 0;
        self.lanes[1] = 0;
    }

    /// Formats the file as double pairs with the single lanes shown in hex.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for row in (0..32).step_by(4) {
            for pair in [row, row + 2] {
                let _ = write!(
                    out,
                    "f{:<2}:f{:<2}={:08x}_{:08x} ({:>14e})  ",
                    pair + 1,
                    pair,
                    self.read_bits(pair + 1),
                    self.read_bits(pair),
                    self.read_d(pair)
                );
            }
            out.push('\n');
        }
        out
    }
}
