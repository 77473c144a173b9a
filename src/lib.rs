//! # argb-blur
//!
//! Fixed-point Gaussian blur for in-memory packed ARGB32 pixel buffers.
//!
//! The blur is separable: a discrete Gaussian kernel with integer weights is
//! built once from `sigma`, then applied as two one-dimensional passes along
//! orthogonal axes. Each pass reads from a snapshot of its input, so results
//! never depend on the order pixels are visited.
//!
//! ## Architecture
//!
//! 1. **Kernel** ([`gaussian_kernel`]): samples the Gaussian at integer
//!    offsets, normalizes, and scales to fixed point
//! 2. **Codec** ([`pixel_codec`]): packed pixel ⇄ weighted `u64` channel sums
//! 3. **Convolver** ([`convolve`]): one pass along a [`Direction`], skipping
//!    taps that fall outside the surface and renormalizing by the rest
//! 4. **Blur** ([`blur`]): validation, both passes, and commit to the
//!    caller's [`PixelSurface`]
//!
//! Pixels are treated as four independent bytes. Premultiplied and straight
//! alpha both pass through without conversion.
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade: `debug` for kernel builds,
//! blur invocations and errors, `trace` for individual passes.

// Foundation
pub mod basics;
pub mod color;
pub mod error;

// Buffers
pub mod pixel_codec;
pub mod rendering_buffer;

// Blur
pub mod blur;
pub mod convolve;
pub mod gaussian_kernel;

pub use basics::Direction;
pub use blur::{gaussian_blur, BlurOptions, CommitMode, GaussianBlur};
pub use color::Argb32;
pub use error::{BlurError, BlurResult};
pub use gaussian_kernel::GaussianKernel;
pub use rendering_buffer::{ArgbBuffer, ArgbSurface, PixelFormat, PixelSurface};
