//! Floating-Point Unit (FPU).
//!
//! This module holds the pieces of the i860 floating-point engine that do not
//! depend on CPU state:
//! - [`rounding_modes`]: FSR.RM decoding and directed-rounding helpers.
//! - [`pipeline`]: the stage storage shared by the adder, multiplier, load and graphics pipes.
//! - [`dual_op`]: the PFAM/PFMAM operand routing table.
//! - [`graphics`]: pixel add/merge and z-buffer primitives.
//!
//! The IEEE-754 arithmetic itself sits behind the [`FpArith`] trait so an
//! embedding emulator can substitute a soft-float implementation. [`HostFp`]
//! is the default and uses host arithmetic with directed-rounding correction.

/// Rounding mode definitions and support.
pub mod rounding_modes;

/// Pipeline stage storage with per-stage precision tags.
pub mod pipeline;

/// Dual-operation routing table.
pub mod dual_op;

/// Graphics-unit primitives (pixel add, merge, z-check).
pub mod graphics;

use self::rounding_modes::{RoundingMode, adjust_f64, narrow, round_integral, two_product, two_sum};

/// Black-box IEEE-754 arithmetic provider used by the FP instruction routines.
pub trait FpArith: Send + std::fmt::Debug {
    /// Selects the rounding mode for subsequent operations (FSR.RM).
    fn set_rounding(&mut self, mode: RoundingMode);
    /// Currently selected rounding mode.
    fn rounding(&self) -> RoundingMode;

    /// Double-precision add.
    fn add_d(&self, a: f64, b: f64) -> f64;
    /// Double-precision subtract.
    fn sub_d(&self, a: f64, b: f64) -> f64;
    /// Double-precision multiply.
    fn mul_d(&self, a: f64, b: f64) -> f64;
    /// Double-precision divide.
    fn div_d(&self, a: f64, b: f64) -> f64;
    /// Double-precision square root.
    fn sqrt_d(&self, a: f64) -> f64;

    /// Single-precision add.
    fn add_s(&self, a: f32, b: f32) -> f32;
    /// Single-precision subtract.
    fn sub_s(&self, a: f32, b: f32) -> f32;
    /// Single-precision multiply.
    fn mul_s(&self, a: f32, b: f32) -> f32;
    /// Single-precision divide.
    fn div_s(&self, a: f32, b: f32) -> f32;
    /// Single-precision square root.
    fn sqrt_s(&self, a: f32) -> f32;

    /// Converts double to single using the current rounding mode.
    fn narrow(&self, v: f64) -> f32;
    /// Converts to a 32-bit integer, truncating or using the current rounding mode.
    fn to_i32(&self, v: f64, truncate: bool) -> i32;
}

/// Host-arithmetic provider.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostFp {
    mode: RoundingMode,
}

impl HostFp {
    /// Creates a provider rounding to nearest.
    pub const fn new() -> Self {
        Self {
            mode: RoundingMode::Nearest,
        }
    }
}

impl FpArith for HostFp {
    fn set_rounding(&mut self, mode: RoundingMode) {
        self.mode = mode;
    }

    fn rounding(&self) -> RoundingMode {
        self.mode
    }

    fn add_d(&self, a: f64, b: f64) -> f64 {
        let (s, e) = two_sum(a, b);
        adjust_f64(s, e, self.mode)
    }

    fn sub_d(&self, a: f64, b: f64) -> f64 {
        self.add_d(a, -b)
    }

    fn mul_d(&self, a: f64, b: f64) -> f64 {
        let (p, e) = two_product(a, b);
        adjust_f64(p, e, self.mode)
    }

    fn div_d(&self, a: f64, b: f64) -> f64 {
        a / b
    }

    fn sqrt_d(&self, a: f64) -> f64 {
        a.sqrt()
    }

    // Single-precision sums and products are formed exactly (or nearly so) in
    // double precision and narrowed once.
    fn add_s(&self, a: f32, b: f32) -> f32 {
        narrow(f64::from(a) + f64::from(b), self.mode)
    }

    fn sub_s(&self, a: f32, b: f32) -> f32 {
        narrow(f64::from(a) - f64::from(b), self.mode)
    }

    fn mul_s(&self, a: f32, b: f32) -> f32 {
        narrow(f64::from(a) * f64::from(b), self.mode)
    }

    fn div_s(&self, a: f32, b: f32) -> f32 {
        a / b
    }

    fn sqrt_s(&self, a: f32) -> f32 {
        a.sqrt()
    }

    fn narrow(&self, v: f64) -> f32 {
        narrow(v, self.mode)
    }

    fn to_i32(&self, v: f64, truncate: bool) -> i32 {
        let mode = if truncate { RoundingMode::Zero } else { self.mode };
        round_integral(v, mode) as i32
    }
}
