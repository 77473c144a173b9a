//! Packed 32-bit ARGB color.
//!
//! A pixel is a single `u32` holding four 8-bit channels:
//!
//! ```text
//!  31      24 23      16 15       8 7        0
//! +----------+----------+----------+----------+
//! |  alpha   |   red    |  green   |   blue   |
//! +----------+----------+----------+----------+
//! ```
//!
//! The layout matches a native-endian `CAIRO_FORMAT_ARGB32` word. Nothing
//! here knows whether the color channels are premultiplied by alpha; values
//! are carried through unchanged.

// ============================================================================
// Channel layout
// ============================================================================

/// Bit offsets of each channel inside a packed pixel.
pub struct OrderArgb;
impl OrderArgb {
    pub const A: u32 = 24;
    pub const R: u32 = 16;
    pub const G: u32 = 8;
    pub const B: u32 = 0;
    /// Channel offsets in accumulator order (a, r, g, b).
    pub const SHIFTS: [u32; 4] = [Self::A, Self::R, Self::G, Self::B];
}

/// Mask of one 8-bit channel after shifting it down.
pub const CHANNEL_MASK: u32 = 0xFF;

// ============================================================================
// Argb32
// ============================================================================

/// A packed ARGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Argb32(pub u32);

impl Argb32 {
    pub const TRANSPARENT: Argb32 = Argb32(0);
    pub const BLACK: Argb32 = Argb32(0xFF00_0000);
    pub const WHITE: Argb32 = Argb32(0xFFFF_FFFF);

    #[inline]
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(
            (a as u32) << OrderArgb::A
                | (r as u32) << OrderArgb::R
                | (g as u32) << OrderArgb::G
                | (b as u32) << OrderArgb::B,
        )
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(0xFF, r, g, b)
    }

    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 >> OrderArgb::A) as u8
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> OrderArgb::R) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> OrderArgb::G) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> OrderArgb::B) as u8
    }

    /// Channels in (a, r, g, b) order.
    #[inline]
    pub const fn channels(self) -> [u8; 4] {
        [self.a(), self.r(), self.g(), self.b()]
    }

    /// Largest per-channel absolute difference to `other`.
    pub fn max_channel_diff(self, other: Argb32) -> u8 {
        self.channels()
            .iter()
            .zip(other.channels().iter())
            .map(|(&x, &y)| x.abs_diff(y))
            .max()
            .unwrap_or(0)
    }
}

impl From<u32> for Argb32 {
    #[inline]
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl From<Argb32> for u32 {
    #[inline]
    fn from(c: Argb32) -> Self {
        c.0
    }
}

// ============================================================================
// Tests
// ============================================================================
