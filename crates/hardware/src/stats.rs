//! Run-time statistics and the telemetry summary.
//!
//! The core counts steps, executed instructions, traps and interrupts; the
//! instruction cache and TLB keep their own hit/miss counters. A report
//! turns the counters accumulated since the previous report into rates and
//! then starts a new window:
//! 1. **Throughput:** executed instructions per microsecond (MIPS).
//! 2. **Instruction cache:** hit percentage.
//! 3. **TLB:** hit percentage.
//! 4. **Invalidations:** instruction-cache and TLB flushes per second.
//! 5. **Interrupts:** external interrupts taken per second.

use std::time::{Duration, Instant};

use crate::core::Cpu;

/// Counters for the current reporting window.
#[derive(Clone, Debug)]
pub struct Stats {
    window_start: Instant,
    /// Steps executed.
    pub steps: u64,
    /// Instructions executed to completion.
    pub instructions: u64,
    /// Traps entered, including interrupts.
    pub traps: u64,
    /// External interrupts taken.
    pub interrupts: u64,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

/// One telemetry sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Report {
    /// Length of the sampled window.
    pub elapsed: Duration,
    /// Instructions per microsecond.
    pub mips: f64,
    /// Instruction-cache hit percentage.
    pub icache_hit_pct: f64,
    /// TLB hit percentage.
    pub tlb_hit_pct: f64,
    /// Instruction-cache and TLB invalidations per second.
    pub invalidations_per_sec: f64,
    /// Interrupts per second.
    pub interrupts_per_sec: f64,
    /// Traps entered in the window.
    pub traps: u64,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2} MIPS, icache {:.1}%, tlb {:.1}%, {:.0} inval/s, {:.0} irq/s, {} traps",
            self.mips,
            self.icache_hit_pct,
            self.tlb_hit_pct,
            self.invalidations_per_sec,
            self.interrupts_per_sec,
            self.traps
        )
    }
}

fn percent(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 * 100.0 / total as f64
    }
}

impl Stats {
    /// Starts an empty window now.
    pub fn new() -> Self {
        Self {
            window_start: Instant::now(),
            steps: 0,
            instructions: 0,
            traps: 0,
            interrupts: 0,
        }
    }

    /// Builds a report from this window plus the unit counters and starts a new window.
    pub fn report(&mut self, icache: (u64, u64, u64), tlb: (u64, u64, u64)) -> Report {
        let now = Instant::now();
        let elapsed = now.duration_since(self.window_start);
        let secs = elapsed.as_secs_f64().max(f64::MIN_POSITIVE);
        let micros = secs * 1e6;
        let (ic_hits, ic_misses, ic_flushes) = icache;
        let (tlb_hits, tlb_misses, tlb_flushes) = tlb;
        let invalidations = ic_flushes + tlb_flushes;

        let report = Report {
            elapsed,
            mips: self.instructions as f64 / micros,
            icache_hit_pct: percent(ic_hits, ic_misses),
            tlb_hit_pct: percent(tlb_hits, tlb_misses),
            invalidations_per_sec: invalidations as f64 / secs,
            interrupts_per_sec: self.interrupts as f64 / secs,
            traps: self.traps,
        };
        *self = Self {
            window_start: now,
            ..Self::new()
        };
        report
    }
}

impl Cpu {
    /// Returns the telemetry summary for the window since the previous call and resets all counters.
    pub fn telemetry(&mut self) -> Report {
        let icache = self.icache.take_counters();
        let tlb = self.mmu.take_counters();
        self.stats.report(icache, tlb)
    }
}
