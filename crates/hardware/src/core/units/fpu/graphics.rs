//! Graphics-unit primitives.
//!
//! Pure functions over 64-bit operands used by `faddp`, `faddz`, `fzchks` and
//! `fzchkl`. Pixel mask updates are returned to the caller, which owns PSR.

use crate::core::arch::psr::PixelSize;

/// Shift and keep-mask applied to MERGE by `faddp` for each pixel size.
pub const fn faddp_merge_params(size: PixelSize) -> (u32, u64) {
    match size {
        PixelSize::Bits16 => (6, 0xfc00_fc00_fc00_fc00),
        PixelSize::Bits8 | PixelSize::Bits32 => (8, 0xff00_ff00_ff00_ff00),
    }
}

/// Shift and keep-mask applied to MERGE by `faddz`.
pub const FADDZ_MERGE: (u32, u64) = (16, 0xffff_0000_ffff_0000);

/// Folds the bits of `sum` selected by `mask` into the merge register.
pub const fn merge(merge: u64, sum: u64, shift: u32, mask: u64) -> u64 {
    ((merge >> shift) & !mask) | (sum & mask)
}

/// 16-bit z-buffer check.
///
/// Returns the selected z values and the updated pixel mask. Field `i` of the
/// result is the smaller of the two fields; bit `4 + i` of the mask is set when
/// `src2` wins.
pub const fn zcheck16(src1: u64, src2: u64, pm: u8) -> (u64, u8) {
    let mut pm = pm >> 4;
    let mut res = 0u64;
    let mut i = 0;
    while i < 4 {
        let shift = i * 16;
        let a = (src1 >> shift) & 0xffff;
        let b = (src2 >> shift) & 0xffff;
        if b <= a {
            res |= b << shift;
            pm |= 1 << (4 + i);
        } else {
            res |= a << shift;
            pm &= !(1 << (4 + i));
        }
        i += 1;
    }
    (res, pm)
}

/// 32-bit z-buffer check, the two-field analogue of [`zcheck16`].
pub const fn zcheck32(src1: u64, src2: u64, pm: u8) -> (u64, u8) {
    let mut pm = pm >> 2;
    let mut res = 0u64;
    let mut i = 0;
    while i < 2 {
        let shift = i * 32;
        let a = (src1 >> shift) & 0xffff_ffff;
        let b = (src2 >> shift) & 0xffff_ffff;
        if b <= a {
            res |= b << shift;
            pm |= 1 << (6 + i);
        } else {
            res |= a << shift;
            pm &= !(1 << (6 + i));
        }
        i += 1;
    }
    (res, pm)
}

/// Expands PSR.PM into a byte write-enable mask for `pst.d`.
///
/// Returns the byte mask (bit `i` enables byte lane `i`) and how far PM shifts
/// after a successful store.
pub const fn pst_mask(size: PixelSize, pm: u8) -> (u8, u32) {
    match size {
        PixelSize::Bits8 => (pm, 8),
        PixelSize::Bits16 => {
            let mut mask = 0u8;
            let mut i = 0;
            while i < 4 {
                if pm & (1 << i) != 0 {
                    mask |= 0b11 << (2 * i);
                }
                i += 1;
            }
            (mask, 4)
        }
        PixelSize::Bits32 => {
            let mut mask = 0u8;
            if pm & 1 != 0 {
                mask |= 0x0f;
            }
            if pm & 2 != 0 {
                mask |= 0xf0;
            }
            (mask, 2)
        }
    }
}
