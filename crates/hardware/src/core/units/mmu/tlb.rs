//! Translation Lookaside Buffer (TLB).
//!
//! A set-indexed cache of page translations with two slots per set. The slot
//! is chosen by access direction: even slots are filled by reads and fetches,
//! odd slots by writes, so a page that is both read and written does not
//! thrash a single slot. A lookup checks both slots of the set.

/// A single entry in the TLB.
#[derive(Clone, Copy, Debug, Default)]
struct TlbEntry {
    /// Virtual page number (tag).
    vpn: u32,
    /// Physical frame address (bits 31..12).
    frame: u32,
    /// Entry validity flag.
    valid: bool,
    /// Effective write permission (PDE.W & PTE.W).
    w: bool,
    /// Effective user permission (PDE.U & PTE.U).
    u: bool,
    /// PTE dirty bit at fill time.
    d: bool,
}

/// A cached translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TlbHit {
    /// Physical frame address (bits 31..12).
    pub frame: u32,
    /// Effective write permission.
    pub writable: bool,
    /// Effective user permission.
    pub user: bool,
    /// Page already dirty.
    pub dirty: bool,
}

/// Translation Lookaside Buffer structure.
#[derive(Clone, Debug)]
pub struct Tlb {
    /// Two entries per set.
    entries: Vec<TlbEntry>,
    /// Mask used for set indexing (sets - 1).
    mask: usize,
}

impl Tlb {
    /// Creates a TLB with `sets` sets (rounded up to a power of two).
    pub fn new(sets: usize) -> Self {
        let sets = sets.max(1).next_power_of_two();
        Self {
            entries: vec![TlbEntry::default(); sets * 2],
            mask: sets - 1,
        }
    }

    /// Number of sets.
    pub fn sets(&self) -> usize {
        self.mask + 1
    }

    #[inline(always)]
    fn set_base(&self, vpn: u32) -> usize {
        ((vpn as usize) & self.mask) * 2
    }

    /// Looks up `vpn` in both slots of its set.
    #[inline]
    pub fn lookup(&self, vpn: u32) -> Option<TlbHit> {
        let base = self.set_base(vpn);
        self.entries[base..base + 2]
            .iter()
            .find(|e| e.valid && e.vpn == vpn)
            .map(|e| TlbHit {
                frame: e.frame,
                writable: e.w,
                user: e.u,
                dirty: e.d,
            })
    }

    /// Installs a translation in the slot selected by `is_write`.
    ///
    /// A stale copy of the same page in the other slot is dropped, so a page
    /// refilled by a write is not shadowed by its older clean entry.
    pub fn insert(&mut self, vpn: u32, is_write: bool, hit: TlbHit) {
        let base = self.set_base(vpn);
        let other = &mut self.entries[base + usize::from(!is_write)];
        if other.vpn == vpn {
            other.valid = false;
        }
        let idx = base + usize::from(is_write);
        self.entries[idx] = TlbEntry {
            vpn,
            frame: hit.frame,
            valid: true,
            w: hit.writable,
            u: hit.user,
            d: hit.dirty,
        };
    }

    /// Invalidates every entry.
    pub fn flush(&mut self) {
        for e in &mut self.entries {
            e.valid = false;
        }
    }
}
