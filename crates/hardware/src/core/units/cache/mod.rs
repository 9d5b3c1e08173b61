//! Instruction cache.
//!
//! A direct-mapped cache of 64-bit instruction pairs keyed by virtual address.
//! Each line holds the 8-byte-aligned virtual address as its tag and the pair
//! as fetched from memory. A hit requires an exact tag match; anything else is
//! a refill through the translator, performed by the fetch unit.

/// One cache line.
#[derive(Clone, Copy, Debug, Default)]
struct CacheLine {
    tag: u32,
    valid: bool,
    pair: u64,
}

/// Direct-mapped instruction-pair cache.
#[derive(Clone, Debug)]
pub struct ICache {
    lines: Vec<CacheLine>,
    mask: usize,
    /// Hits since the last telemetry report.
    pub hits: u64,
    /// Misses since the last telemetry report.
    pub misses: u64,
    /// Whole-cache invalidations since the last telemetry report.
    pub invalidations: u64,
}

impl ICache {
    /// Creates a cache of `lines` lines (rounded up to a power of two).
    pub fn new(lines: usize) -> Self {
        let lines = lines.max(1).next_power_of_two();
        Self {
            lines: vec![CacheLine::default(); lines],
            mask: lines - 1,
            hits: 0,
            misses: 0,
            invalidations: 0,
        }
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false; a cache has at least one line.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[inline(always)]
    fn index(&self, vaddr: u32) -> usize {
        ((vaddr >> 3) as usize) & self.mask
    }

    /// Returns the cached pair for `vaddr`, counting the hit or miss.
    #[inline]
    pub fn lookup(&mut self, vaddr: u32) -> Option<u64> {
        let tag = vaddr & !7;
        let line = self.lines[self.index(vaddr)];
        if line.valid && line.tag == tag {
            self.hits += 1;
            Some(line.pair)
        } else {
            self.misses += 1;
            None
        }
    }

    /// Returns the cached pair for `vaddr` without counting.
    pub fn peek(&self, vaddr: u32) -> Option<u64> {
        let line = self.lines[self.index(vaddr)];
        (line.valid && line.tag == vaddr & !7).then_some(line.pair)
    }

    /// Installs a freshly fetched pair.
    pub fn fill(&mut self, vaddr: u32, pair: u64) {
        let idx = self.index(vaddr);
        self.lines[idx] = CacheLine {
            tag: vaddr & !7,
            valid: true,
            pair,
        };
    }

    /// Invalidates every line.
    pub fn invalidate(&mut self) {
        for line in &mut self.lines {
            line.valid = false;
        }
        self.invalidations += 1;
    }

    /// Returns and clears the hit, miss and invalidation counters.
    pub fn take_counters(&mut self) -> (u64, u64, u64) {
        (
            std::mem::take(&mut self.hits),
            std::mem::take(&mut self.misses),
            std::mem::take(&mut self.invalidations),
        )
    }
}
