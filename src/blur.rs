//! Separable Gaussian blur for packed ARGB32 surfaces.
//!
//! A 2-D Gaussian is the product of two 1-D Gaussians, so the blur is two
//! [`convolve_pass`] calls: one down the columns, then one along the rows,
//! each with the same fixed-point kernel and each reading from its own
//! snapshot.
//!
//! ```
//! use argb_blur::{gaussian_blur, ArgbBuffer, PixelSurface};
//!
//! let mut img = ArgbBuffer::new(16, 16, 0xFF00_0000).unwrap();
//! img.set_pixel(8, 8, 0xFFFF_FFFF);
//! gaussian_blur(&mut img, 1.5).unwrap();
//! assert!(img.pixel(9, 8) & 0x00FF_0000 != 0);
//! ```
//!
//! Blurring is not idempotent. Applying the same blur again smooths further,
//! roughly like a single blur with sigma multiplied by √2.

use crate::basics::{Direction, KERNEL_SHIFT};
use crate::convolve::convolve_pass;
use crate::error::BlurResult;
use crate::gaussian_kernel::GaussianKernel;
use crate::rendering_buffer::{ArgbBuffer, PixelSurface};

// ============================================================================
// Options
// ============================================================================

/// How pass results reach the caller's surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CommitMode {
    /// Run both passes on a private copy and write the result back only
    /// after both succeed. On error the surface is untouched.
    #[default]
    Staged,
    /// Run both passes directly on the surface. Needs one allocation fewer,
    /// but an allocation failure in the second pass leaves the surface
    /// blurred along one axis only.
    InPlace,
}

/// Tuning knobs for [`GaussianBlur`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlurOptions {
    commit: CommitMode,
    kernel_shift: u32,
}

impl BlurOptions {
    pub fn new() -> Self {
        Self {
            commit: CommitMode::Staged,
            kernel_shift: KERNEL_SHIFT,
        }
    }

    /// Set how results are committed. Default [`CommitMode::Staged`].
    pub fn commit(mut self, commit: CommitMode) -> Self {
        self.commit = commit;
        self
    }

    /// Set the number of fractional bits in kernel weights. Default 16.
    pub fn kernel_shift(mut self, shift: u32) -> Self {
        self.kernel_shift = shift;
        self
    }

    pub fn commit_mode(&self) -> CommitMode {
        self.commit
    }

    pub fn shift(&self) -> u32 {
        self.kernel_shift
    }
}

impl Default for BlurOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// GaussianBlur
// ============================================================================

/// A reusable Gaussian blur with a precomputed kernel.
#[derive(Debug, Clone)]
pub struct GaussianBlur {
    kernel: GaussianKernel,
    options: BlurOptions,
}

impl GaussianBlur {
    /// Blur with standard deviation `sigma` and default options.
    pub fn new(sigma: f64) -> BlurResult<Self> {
        Self::with_options(sigma, BlurOptions::new())
    }

    /// Validate `sigma` and `options` and build the kernel.
    pub fn with_options(sigma: f64, options: BlurOptions) -> BlurResult<Self> {
        let kernel = GaussianKernel::with_shift(sigma, options.kernel_shift)?;
        Ok(Self { kernel, options })
    }

    pub fn kernel(&self) -> &GaussianKernel {
        &self.kernel
    }

    pub fn options(&self) -> &BlurOptions {
        &self.options
    }

    pub fn sigma(&self) -> f64 {
        self.kernel.sigma()
    }

    /// Blur `surface` in place.
    ///
    /// Fails with [`BlurError::FormatMismatch`](crate::BlurError::FormatMismatch)
    /// before touching any pixel if the surface is not ARGB32, and with
    /// [`BlurError::AllocationFailure`](crate::BlurError::AllocationFailure)
    /// if a snapshot or the staging copy cannot be allocated.
    pub fn apply<S: PixelSurface + ?Sized>(&self, surface: &mut S) -> BlurResult<()> {
        surface.format().require_argb32()?;

        let (w, h) = (surface.width(), surface.height());
        log::debug!(
            "gaussian blur: {}x{} sigma={} taps={} commit={:?}",
            w,
            h,
            self.sigma(),
            self.kernel.len(),
            self.options.commit
        );
        if w == 0 || h == 0 {
            return Ok(());
        }

        match self.options.commit {
            CommitMode::InPlace => self.run_passes(surface),
            CommitMode::Staged => {
                let mut staging = ArgbBuffer::snapshot_of(surface)?;
                self.run_passes(&mut staging)?;
                surface.copy_from(staging.pixels());
                Ok(())
            }
        }
    }

    fn run_passes<S: PixelSurface + ?Sized>(&self, target: &mut S) -> BlurResult<()> {
        for dir in Direction::PASS_ORDER {
            convolve_pass(target, &self.kernel, dir)?;
        }
        Ok(())
    }
}

/// Blur `surface` with standard deviation `sigma` using default options.
///
/// Fails with [`BlurError::InvalidParameter`](crate::BlurError::InvalidParameter)
/// if `sigma` is zero, negative, NaN or infinite; the surface is left
/// untouched in that case.
pub fn gaussian_blur<S: PixelSurface + ?Sized>(surface: &mut S, sigma: f64) -> BlurResult<()> {
    GaussianBlur::new(sigma)?.apply(surface)
}

// ============================================================================
// Tests
// ============================================================================
