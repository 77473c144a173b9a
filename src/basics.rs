//! Foundation constants and helpers shared by the kernel and the convolver.

// ============================================================================
// Fixed-point kernel scale
// ============================================================================

/// Default number of fractional bits in a kernel weight.
pub const KERNEL_SHIFT: u32 = 16;
/// Default fixed-point scale: a kernel's weights sum to approximately this.
pub const KERNEL_SCALE: u32 = 1 << KERNEL_SHIFT; // 65536

/// Smallest accepted kernel shift.
pub const MIN_KERNEL_SHIFT: u32 = 8;
/// Largest accepted kernel shift. 2^24 * 255 * taps stays far inside `u64`.
pub const MAX_KERNEL_SHIFT: u32 = 24;

/// Kernel lengths are `ceil(KERNEL_SIGMA_SPAN * sigma)`, rounded up to odd.
pub const KERNEL_SIGMA_SPAN: f64 = 6.0;

// ============================================================================
// Rounding
// ============================================================================

/// Ceiling of a double as an unsigned size, or `None` if it does not fit.
#[inline]
pub fn uceil_checked(v: f64) -> Option<usize> {
    let c = v.ceil();
    if c.is_finite() && c >= 0.0 && c <= (isize::MAX as f64) {
        Some(c as usize)
    } else {
        None
    }
}

/// Smallest odd integer `>= v`, or `None` on overflow.
#[inline]
pub fn odd_ceil(v: f64) -> Option<usize> {
    let n = uceil_checked(v)?;
    if n % 2 == 0 {
        n.checked_add(1)
    } else {
        Some(n)
    }
}

// ============================================================================
// Pass directions
// ============================================================================

/// Axis of a one-dimensional convolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Taps run down a column: unit offset (0, 1).
    Vertical,
    /// Taps run along a row: unit offset (1, 0).
    Horizontal,
}

impl Direction {
    /// Order in which a full blur runs its two passes.
    pub const PASS_ORDER: [Direction; 2] = [Direction::Vertical, Direction::Horizontal];

    /// Unit step along x.
    #[inline]
    pub fn dx(self) -> isize {
        match self {
            Direction::Vertical => 0,
            Direction::Horizontal => 1,
        }
    }

    /// Unit step along y.
    #[inline]
    pub fn dy(self) -> isize {
        match self {
            Direction::Vertical => 1,
            Direction::Horizontal => 0,
        }
    }

    /// The other axis.
    #[inline]
    pub fn orthogonal(self) -> Direction {
        match self {
            Direction::Vertical => Direction::Horizontal,
            Direction::Horizontal => Direction::Vertical,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_scale() {
        assert_eq!(KERNEL_SCALE, 65536);
        assert!(MIN_KERNEL_SHIFT <= KERNEL_SHIFT && KERNEL_SHIFT <= MAX_KERNEL_SHIFT);
    }

    #[test]
    fn test_odd_ceil() {
        assert_eq!(odd_ceil(0.06), Some(1));
        assert_eq!(odd_ceil(1.0), Some(1));
        assert_eq!(odd_ceil(5.2), Some(7));
        assert_eq!(odd_ceil(6.0), Some(7));
        assert_eq!(odd_ceil(7.0), Some(7));
        assert_eq!(odd_ceil(f64::INFINITY), None);
        assert_eq!(odd_ceil(f64::NAN), None);
        assert_eq!(odd_ceil(1e300), None);
    }

    #[test]
    fn test_direction_offsets() {
        assert_eq!((Direction::Vertical.dx(), Direction::Vertical.dy()), (0, 1));
        assert_eq!(
            (Direction::Horizontal.dx(), Direction::Horizontal.dy()),
            (1, 0)
        );
    }

    #[test]
    fn test_pass_order_is_orthogonal() {
        let [a, b] = Direction::PASS_ORDER;
        assert_eq!(a.orthogonal(), b);
        assert_eq!(a.dx() * b.dx() + a.dy() * b.dy(), 0);
    }
}
