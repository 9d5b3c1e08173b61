//! Dual-instruction mode (DIM) state.
//!
//! DIM is entered and left with one pair of latency: a DIM-capable step moves
//! NONE to TEMP and TEMP to FULL; a step without the flag moves FULL back to
//! TEMP and TEMP to NONE. Dual issue applies whenever the state is not NONE.

/// Dual-instruction mode progression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DimState {
    /// Single-instruction mode.
    #[default]
    None,
    /// Entering or leaving dual mode.
    Temp,
    /// Dual mode established.
    Full,
}

impl DimState {
    /// State after a step that was (or was not) DIM-capable.
    pub const fn next(self, capable: bool) -> Self {
        match (self, capable) {
            (Self::None, false) | (Self::Temp, false) => Self::None,
            (Self::None, true) | (Self::Full, false) => Self::Temp,
            (Self::Temp, true) | (Self::Full, true) => Self::Full,
        }
    }

    /// True when instruction pairs issue together.
    pub const fn is_dual(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// DIM progress frozen on trap entry and restored by `bri` on return.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DimSnapshot {
    /// Mode at trap time.
    pub dim: DimState,
    /// Dual-mode condition code.
    pub dim_cc: bool,
    /// Dual-mode condition code is pending.
    pub dim_cc_valid: bool,
    /// The trapping step was itself DIM-capable.
    pub dim_op: bool,
}
