//! Discrete fixed-point Gaussian kernel.
//!
//! The kernel samples the continuous Gaussian density at integer offsets
//! around its center, normalizes the samples to sum to one, and stores them
//! as integers scaled by `1 << shift`. Truncation makes the stored weights
//! sum to slightly less than the scale, which is why the convolver divides
//! by the weights it actually applied rather than by the scale.

use crate::basics::{
    odd_ceil, KERNEL_SHIFT, KERNEL_SIGMA_SPAN, MAX_KERNEL_SHIFT, MIN_KERNEL_SHIFT,
};
use crate::error::{try_alloc, BlurError, BlurResult};

/// A one-dimensional Gaussian kernel with integer weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaussianKernel {
    weights: Vec<u32>,
    center: usize,
    sigma_bits: u64,
    shift: u32,
}

impl GaussianKernel {
    /// Build a kernel for `sigma` with the default 16-bit fixed-point scale.
    pub fn new(sigma: f64) -> BlurResult<Self> {
        Self::with_shift(sigma, KERNEL_SHIFT)
    }

    /// Build a kernel for `sigma` whose weights sum to about `1 << shift`.
    ///
    /// Fails with [`BlurError::InvalidParameter`] if `sigma` is not a
    /// positive finite number, if `shift` is outside
    /// `MIN_KERNEL_SHIFT..=MAX_KERNEL_SHIFT`, or if `sigma` is so wide that
    /// every weight truncates to zero. The center weight is roughly
    /// `2^shift / (sigma * 2.5066)`, so the widest usable sigma is about
    /// `2^shift / 2.5`: near 26000 at the default shift of 16. Fails with
    /// [`BlurError::AllocationFailure`] if the weight array cannot be
    /// allocated.
    pub fn with_shift(sigma: f64, shift: u32) -> BlurResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(BlurError::invalid("sigma", format!("{sigma:e}")));
        }
        if !(MIN_KERNEL_SHIFT..=MAX_KERNEL_SHIFT).contains(&shift) {
            return Err(BlurError::invalid("kernel_shift", shift));
        }

        let size = odd_ceil(sigma * KERNEL_SIGMA_SPAN)
            .ok_or_else(|| BlurError::alloc("kernel", usize::MAX))?;
        let center = size / 2;

        // Unscaled samples: the 1 / sqrt(2 pi sigma^2) factor cancels in the
        // normalization below and underflows for tiny sigma.
        let mut density: Vec<f64> = try_alloc("kernel", size)?;
        let mut sum = 0.0;
        for (i, d) in density.iter_mut().enumerate() {
            let t = (i as f64 - center as f64) / sigma;
            *d = (-0.5 * t * t).exp();
            sum += *d;
        }

        let scale = (1u64 << shift) as f64;
        let mut weights: Vec<u32> = try_alloc("kernel", size)?;
        for (w, d) in weights.iter_mut().zip(density.iter()) {
            // Truncation toward zero, not rounding.
            *w = (d / sum * scale) as u32;
        }
        drop(density);

        if weights[center] == 0 {
            return Err(BlurError::invalid(
                "sigma",
                format!("{sigma:e} (every weight truncates to zero at shift {shift})"),
            ));
        }

        let kernel = Self {
            weights,
            center,
            sigma_bits: sigma.to_bits(),
            shift,
        };
        log::debug!(
            "gaussian kernel: sigma={} size={} sum={} scale={}",
            sigma,
            kernel.len(),
            kernel.sum(),
            kernel.scale()
        );
        Ok(kernel)
    }

    /// Fixed-point weights, symmetric around [`center`](Self::center).
    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// Number of taps; always odd.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Never true: a kernel has at least its center tap.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Index of the tap at offset zero.
    pub fn center(&self) -> usize {
        self.center
    }

    pub fn sigma(&self) -> f64 {
        f64::from_bits(self.sigma_bits)
    }

    pub fn shift(&self) -> u32 {
        self.shift
    }

    /// Nominal weight total, `1 << shift`.
    pub fn scale(&self) -> u64 {
        1u64 << self.shift
    }

    /// Actual weight total. At most `scale()`, and less than it by at most
    /// `len()` because of truncation.
    pub fn sum(&self) -> u64 {
        self.weights.iter().map(|&w| w as u64).sum()
    }

    /// Iterate `(offset, weight)` pairs with offsets in `-center..=center`.
    pub fn taps(&self) -> impl Iterator<Item = (isize, u32)> + '_ {
        let c = self.center as isize;
        self.weights
            .iter()
            .enumerate()
            .map(move |(i, &w)| (i as isize - c, w))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::KERNEL_SCALE;

    #[test]
    fn test_kernel_size_is_smallest_odd_at_least_six_sigma() {
        for &(sigma, expected) in &[
            (0.01, 1usize),
            (0.1, 1),
            (0.5, 3),
            (1.0, 7),
            (1.5, 9),
            (2.0, 13),
            (2.5, 15),
            (3.3, 21),
            (10.0, 61),
            (1e-200, 1),
            (f64::MIN_POSITIVE, 1),
        ] {
            let k = GaussianKernel::new(sigma).unwrap();
            assert_eq!(k.len(), expected, "sigma={sigma}");
            assert_eq!(k.len() % 2, 1);
            assert_eq!(k.center(), k.len() / 2);
        }
    }

    #[test]
    fn test_kernel_sum_close_to_scale() {
        for &sigma in &[0.3, 1.0, 2.0, 4.5, 12.0] {
            let k = GaussianKernel::new(sigma).unwrap();
            let sum = k.sum();
            assert!(sum <= KERNEL_SCALE as u64, "sigma={sigma} sum={sum}");
            assert!(
                KERNEL_SCALE as u64 - sum <= k.len() as u64,
                "sigma={sigma} sum={sum} len={}",
                k.len()
            );
        }
    }

    #[test]
    fn test_kernel_symmetric_and_peaked() {
        let k = GaussianKernel::new(2.0).unwrap();
        let w = k.weights();
        let n = w.len();
        for i in 0..n / 2 {
            assert_eq!(w[i], w[n - 1 - i], "asymmetric at {i}");
            assert!(w[i] <= w[i + 1], "not increasing toward center at {i}");
        }
        assert_eq!(w.iter().max(), Some(&w[k.center()]));
    }

    #[test]
    fn test_single_tap_kernel_is_full_scale() {
        let k = GaussianKernel::new(0.1).unwrap();
        assert_eq!(k.weights(), &[KERNEL_SCALE]);
    }

    #[test]
    fn test_sigma_one_center_weight() {
        // 7 taps; the center density is 1/sqrt(2*pi) renormalized over
        // the truncated support.
        let k = GaussianKernel::new(1.0).unwrap();
        let c = k.weights()[k.center()] as f64 / KERNEL_SCALE as f64;
        assert!((c - 0.39905).abs() < 1e-3, "center={c}");
    }

    #[test]
    fn test_custom_shift() {
        let k = GaussianKernel::with_shift(1.0, 10).unwrap();
        assert_eq!(k.scale(), 1024);
        assert!(k.sum() <= 1024 && k.sum() >= 1024 - k.len() as u64);
    }

    #[test]
    fn test_invalid_sigma() {
        for &sigma in &[0.0, -1.0, -0.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(
                matches!(
                    GaussianKernel::new(sigma),
                    Err(BlurError::InvalidParameter { name: "sigma", .. })
                ),
                "sigma={sigma}"
            );
        }
    }

    #[test]
    fn test_invalid_shift() {
        for &shift in &[0, 7, 25, 64] {
            assert!(matches!(
                GaussianKernel::with_shift(1.0, shift),
                Err(BlurError::InvalidParameter {
                    name: "kernel_shift",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_degenerate_wide_kernel_rejected() {
        // At shift 8 the center weight truncates to zero once
        // 256 / (sigma * sqrt(2pi)) < 1, i.e. sigma > ~102.
        assert!(matches!(
            GaussianKernel::with_shift(200.0, 8),
            Err(BlurError::InvalidParameter { name: "sigma", .. })
        ));
    }

    #[test]
    fn test_tiny_sigma_is_single_full_tap() {
        for &sigma in &[1e-100, 1e-160, 1e-300, f64::MIN_POSITIVE, 5e-324] {
            let k = GaussianKernel::new(sigma).unwrap();
            assert_eq!(k.weights(), &[KERNEL_SCALE], "sigma={sigma:e}");
        }
    }

    #[test]
    fn test_widest_default_sigma() {
        assert!(GaussianKernel::new(20000.0).is_ok());
        assert!(matches!(
            GaussianKernel::new(30000.0),
            Err(BlurError::InvalidParameter { name: "sigma", .. })
        ));
    }

    #[test]
    fn test_invalid_sigma_value_is_compact() {
        match GaussianKernel::new(-1e-300) {
            Err(BlurError::InvalidParameter { value, .. }) => assert_eq!(value, "-1e-300"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unrepresentable_size() {
        assert!(matches!(
            GaussianKernel::new(1e300),
            Err(BlurError::AllocationFailure { .. })
        ));
    }

    #[test]
    fn test_taps_offsets() {
        let k = GaussianKernel::new(0.5).unwrap();
        let offsets: Vec<isize> = k.taps().map(|(o, _)| o).collect();
        assert_eq!(offsets, vec![-1, 0, 1]);
        assert_eq!(k.sigma(), 0.5);
    }
}
