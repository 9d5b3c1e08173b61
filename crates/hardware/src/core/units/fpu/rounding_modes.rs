//! Floating-point rounding mode support.
//!
//! The i860 selects one of four rounding modes through FSR.RM:
//!
//! | Value | Mode    | Description                       |
//! |-------|---------|-----------------------------------|
//! | 0b00  | Nearest | Round to nearest, ties to even    |
//! | 0b01  | Down    | Round towards −∞                  |
//! | 0b10  | Up      | Round towards +∞                  |
//! | 0b11  | Zero    | Round towards zero (chop)         |
//!
//! Host arithmetic always rounds to nearest. The helpers here recover the
//! exact rounding error of a sum or product and step the nearest result by
//! one ulp when a directed mode requires it.

/// i860 rounding mode encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to nearest, ties to even.
    #[default]
    Nearest = 0b00,
    /// Round towards −∞.
    Down = 0b01,
    /// Round towards +∞.
    Up = 0b10,
    /// Round towards zero.
    Zero = 0b11,
}

impl RoundingMode {
    /// Decodes the 2-bit RM field; upper bits are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0b00 => Self::Nearest,
            0b01 => Self::Down,
            0b10 => Self::Up,
            _ => Self::Zero,
        }
    }
}

/// Next representable `f64` towards +∞.
pub fn next_up_f64(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Next representable `f64` towards −∞.
pub fn next_down_f64(x: f64) -> f64 {
    -next_up_f64(-x)
}

/// Next representable `f32` towards +∞.
pub fn next_up_f32(x: f32) -> f32 {
    if x.is_nan() || x == f32::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f32::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f32::from_bits(bits + 1)
    } else {
        f32::from_bits(bits - 1)
    }
}

/// Next representable `f32` towards −∞.
pub fn next_down_f32(x: f32) -> f32 {
    -next_up_f32(-x)
}

/// Adjusts a round-to-nearest result `r` whose exact value is `r + err`.
pub fn adjust_f64(r: f64, err: f64, mode: RoundingMode) -> f64 {
    if err == 0.0 || !r.is_finite() || err.is_nan() {
        return r;
    }
    match mode {
        RoundingMode::Nearest => r,
        RoundingMode::Up if err > 0.0 => next_up_f64(r),
        RoundingMode::Down if err < 0.0 => next_down_f64(r),
        RoundingMode::Zero if r > 0.0 && err < 0.0 => next_down_f64(r),
        RoundingMode::Zero if r < 0.0 && err > 0.0 => next_up_f64(r),
        _ => r,
    }
}

/// Error-free sum: returns `(a + b, err)` with `a + b == sum + err` exactly.
pub fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

/// Error-free product using a fused multiply-add.
pub fn two_product(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    (p, a.mul_add(b, -p))
}

/// Narrows an `f64` to `f32` honoring `mode`.
pub fn narrow(v: f64, mode: RoundingMode) -> f32 {
    let r = v as f32;
    if mode == RoundingMode::Nearest || !r.is_finite() || v.is_nan() {
        return r;
    }
    let back = f64::from(r);
    if back == v {
        return r;
    }
    match mode {
        RoundingMode::Up if back < v => next_up_f32(r),
        RoundingMode::Down if back > v => next_down_f32(r),
        RoundingMode::Zero if back.abs() > v.abs() => {
            if r > 0.0 {
                next_down_f32(r)
            } else {
                next_up_f32(r)
            }
        }
        _ => r,
    }
}

/// Rounds `v` to an integral value according to `mode`.
pub fn round_integral(v: f64, mode: RoundingMode) -> f64 {
    match mode {
        RoundingMode::Nearest => v.round_ties_even(),
        RoundingMode::Down => v.floor(),
        RoundingMode::Up => v.ceil(),
        RoundingMode::Zero => v.trunc(),
    }
}
