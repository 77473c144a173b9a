//! Conversion between packed pixels and weighted channel sums.
//!
//! A convolution tap turns a packed pixel into four `u64` products
//! ([`unpack`]), the taps are summed into a [`PixelAccum`], and the sum is
//! divided back down into a packed pixel ([`pack`]). The transform is linear
//! over the raw channel bytes, so premultiplied and straight alpha both pass
//! through untouched.

use core::ops::{Add, AddAssign};

use crate::color::{OrderArgb, CHANNEL_MASK};

/// Per-channel weighted sums for one output pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelAccum {
    pub a: u64,
    pub r: u64,
    pub g: u64,
    pub b: u64,
}

impl PixelAccum {
    pub const ZERO: PixelAccum = PixelAccum {
        a: 0,
        r: 0,
        g: 0,
        b: 0,
    };

    /// Sums in (a, r, g, b) order.
    #[inline]
    pub fn channels(&self) -> [u64; 4] {
        [self.a, self.r, self.g, self.b]
    }
}

impl AddAssign for PixelAccum {
    #[inline]
    fn add_assign(&mut self, rhs: PixelAccum) {
        self.a += rhs.a;
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

impl Add for PixelAccum {
    type Output = PixelAccum;

    #[inline]
    fn add(mut self, rhs: PixelAccum) -> PixelAccum {
        self += rhs;
        self
    }
}

#[inline]
fn channel(value: u32, shift: u32) -> u64 {
    ((value >> shift) & CHANNEL_MASK) as u64
}

/// Split `value` into its channels, each multiplied by `weight`.
#[inline]
pub fn unpack(value: u32, weight: u32) -> PixelAccum {
    let w = weight as u64;
    PixelAccum {
        a: channel(value, OrderArgb::A) * w,
        r: channel(value, OrderArgb::R) * w,
        g: channel(value, OrderArgb::G) * w,
        b: channel(value, OrderArgb::B) * w,
    }
}

/// Divide each channel sum by `divisor`, saturate to 255, and repack.
///
/// `divisor` must be non-zero.
#[inline]
pub fn pack(accum: &PixelAccum, divisor: u64) -> u32 {
    debug_assert!(divisor != 0, "pack called with a zero divisor");
    let d = divisor.max(1);
    let sat = |sum: u64| -> u32 { (sum / d).min(CHANNEL_MASK as u64) as u32 };
    sat(accum.a) << OrderArgb::A
        | sat(accum.r) << OrderArgb::R
        | sat(accum.g) << OrderArgb::G
        | sat(accum.b) << OrderArgb::B
}

// ============================================================================
// Tests
// ============================================================================
