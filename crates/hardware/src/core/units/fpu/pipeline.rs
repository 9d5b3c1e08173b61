//! Floating-point pipeline stage storage.
//!
//! Each pipe is a fixed array of stage slots indexed by stage number, stage 0
//! being the newest. A slot keeps the raw result bits plus the precision tag
//! the architecture calls ARP, MRP, LRP or IRP depending on the pipe. Slots
//! keep raw bits so the graphics pipe can carry 64-bit integers unchanged.
//!
//! Advancing is strictly: read the last stage, shift every stage down by one,
//! insert the new result at stage 0. Callers read the last stage before they
//! advance because operand forwarding observes the pre-shift value.

/// Maximum number of stages in any pipe.
pub const MAX_STAGES: usize = 3;

/// Adder pipe depth.
pub const ADDER_STAGES: usize = 3;

/// Load pipe depth.
pub const LOAD_STAGES: usize = 3;

/// Graphics pipe depth.
pub const GRAPHICS_STAGES: usize = 1;

/// Multiplier depth for the given source precision.
///
/// Double sources use a 2-stage multiplier, except `pfmul3.dd` which always
/// takes the 3-stage path.
pub const fn multiplier_stages(src_double: bool, three_stage: bool) -> usize {
    if src_double && !three_stage { 2 } else { 3 }
}

/// One stage slot: raw result bits with a precision tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipeSlot {
    bits: u64,
    double: bool,
}

impl PipeSlot {
    /// A single-precision result.
    pub const fn single(v: f32) -> Self {
        Self {
            bits: v.to_bits() as u64,
            double: false,
        }
    }

    /// A double-precision result.
    pub const fn double(v: f64) -> Self {
        Self {
            bits: v.to_bits(),
            double: true,
        }
    }

    /// A raw result of the given width (graphics and load pipes).
    pub const fn raw(bits: u64, double: bool) -> Self {
        Self {
            bits: if double { bits } else { bits & 0xffff_ffff },
            double,
        }
    }

    /// Precision tag (true = double).
    pub const fn is_double(&self) -> bool {
        self.double
    }

    /// Raw bits; single results occupy the low word.
    pub const fn bits(&self) -> u64 {
        self.bits
    }

    /// Value widened to double precision.
    pub fn as_f64(&self) -> f64 {
        if self.double {
            f64::from_bits(self.bits)
        } else {
            f64::from(f32::from_bits(self.bits as u32))
        }
    }

    /// Value as single precision (doubles are converted by value).
    pub fn as_f32(&self) -> f32 {
        if self.double {
            f64::from_bits(self.bits) as f32
        } else {
            f32::from_bits(self.bits as u32)
        }
    }
}

/// A pipe of up to [`MAX_STAGES`] slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pipe {
    slots: [PipeSlot; MAX_STAGES],
}

impl Pipe {
    /// An empty pipe (all slots zero, single precision).
    pub const fn new() -> Self {
        Self {
            slots: [PipeSlot {
                bits: 0,
                double: false,
            }; MAX_STAGES],
        }
    }

    /// Slot at `stage` (0 = newest).
    pub const fn stage(&self, stage: usize) -> PipeSlot {
        self.slots[stage]
    }

    /// Last stage of a pipe that is currently `depth` stages deep.
    pub const fn last(&self, depth: usize) -> PipeSlot {
        self.slots[depth - 1]
    }

    /// Shifts the first `depth` stages down by one and inserts `slot` at stage 0.
    ///
    /// Returns the slot that fell out of the last stage.
    pub fn advance(&mut self, depth: usize, slot: PipeSlot) -> PipeSlot {
        let retired = self.slots[depth - 1];
        for i in (1..depth).rev() {
            self.slots[i] = self.slots[i - 1];
        }
        self.slots[0] = slot;
        retired
    }

    /// Clears all stages to single-precision zero.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
