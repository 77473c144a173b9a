//! Pixel surfaces: the buffers a blur reads from and writes to.
//!
//! The [`PixelSurface`] trait is the whole contract a host graphics object
//! has to meet: dimensions, a format tag, and read/write access to the packed
//! 32-bit value at `(x, y)`. Two implementations are provided:
//!
//! - [`ArgbBuffer`]: an owned, tightly packed `Vec<u32>` (stride = width).
//!   Used for snapshots and staging, and handy for tests.
//! - [`ArgbSurface`]: a bounds-checked view over a caller-owned `&mut [u32]`
//!   with a row stride, e.g. the data of an image surface whose rows are
//!   padded.

use crate::error::{try_alloc, BlurError, BlurResult};

// ============================================================================
// PixelFormat
// ============================================================================

/// Memory layout of a host surface.
///
/// Only [`PixelFormat::Argb32`] can be blurred; the rest exist so a host can
/// describe what it has and get a [`BlurError::FormatMismatch`] back instead
/// of corrupted pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// 8-bit alpha, red, green, blue packed into one `u32`.
    #[default]
    Argb32,
    /// 8-bit red, green, blue in a `u32` with the top byte unused.
    Rgb24,
    /// 8-bit alpha only.
    A8,
    /// 1-bit alpha only.
    A1,
    /// 5-6-5 packed RGB in 16 bits.
    Rgb565,
}

impl PixelFormat {
    /// Fail with [`BlurError::FormatMismatch`] unless this is `Argb32`.
    pub fn require_argb32(self) -> BlurResult<()> {
        if self == PixelFormat::Argb32 {
            Ok(())
        } else {
            Err(BlurError::format(format!(
                "expected Argb32 surface, got {self:?}"
            )))
        }
    }
}

// ============================================================================
// PixelSurface trait
// ============================================================================

/// Indexed access to a rectangle of packed pixels.
///
/// Coordinates passed to `pixel` and `set_pixel` are always inside
/// `0..width()` × `0..height()`; implementations may panic otherwise.
pub trait PixelSurface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Layout of the stored values. Defaults to packed ARGB32.
    fn format(&self) -> PixelFormat {
        PixelFormat::Argb32
    }

    /// Packed value at `(x, y)`.
    fn pixel(&self, x: usize, y: usize) -> u32;

    /// Overwrite the packed value at `(x, y)`.
    fn set_pixel(&mut self, x: usize, y: usize, value: u32);

    /// Number of logical pixels.
    fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Copy every pixel into `dst` in row-major order with stride = width.
    ///
    /// `dst.len()` must equal [`pixel_count`](Self::pixel_count).
    fn copy_to(&self, dst: &mut [u32]) {
        let w = self.width();
        if w == 0 {
            return;
        }
        for (y, row) in dst.chunks_exact_mut(w).enumerate() {
            for (x, p) in row.iter_mut().enumerate() {
                *p = self.pixel(x, y);
            }
        }
    }

    /// Overwrite every pixel from `src`, laid out as in
    /// [`copy_to`](Self::copy_to).
    fn copy_from(&mut self, src: &[u32]) {
        let w = self.width();
        if w == 0 {
            return;
        }
        for (y, row) in src.chunks_exact(w).enumerate() {
            for (x, &p) in row.iter().enumerate() {
                self.set_pixel(x, y, p);
            }
        }
    }
}

// ============================================================================
// ArgbBuffer
// ============================================================================

/// Owned, tightly packed ARGB32 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgbBuffer {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl ArgbBuffer {
    /// Allocate a `width` × `height` buffer filled with `fill`.
    pub fn new(width: usize, height: usize, fill: u32) -> BlurResult<Self> {
        let len = width
            .checked_mul(height)
            .ok_or_else(|| BlurError::alloc("pixel buffer", usize::MAX))?;
        let mut pixels: Vec<u32> = try_alloc("pixel buffer", len)?;
        pixels.fill(fill);
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Wrap existing row-major pixels.
    ///
    /// Fails with [`BlurError::FormatMismatch`] if
    /// `pixels.len() != width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u32>) -> BlurResult<Self> {
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(BlurError::format(format!(
                "{} pixels do not form a {width}x{height} buffer",
                pixels.len()
            )));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Copy any surface into a new packed buffer.
    pub fn snapshot_of<S: PixelSurface + ?Sized>(surface: &S) -> BlurResult<Self> {
        let (width, height) = (surface.width(), surface.height());
        let len = width
            .checked_mul(height)
            .ok_or_else(|| BlurError::alloc("snapshot", usize::MAX))?;
        let mut pixels: Vec<u32> = try_alloc("snapshot", len)?;
        surface.copy_to(&mut pixels);
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds ({}x{})",
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Pixels of row `y`.
    pub fn row(&self, y: usize) -> &[u32] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width]
    }

    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    /// Fill every pixel with `value`.
    pub fn clear(&mut self, value: u32) {
        self.pixels.fill(value);
    }
}

impl PixelSurface for ArgbBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[self.index(x, y)]
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, value: u32) {
        let i = self.index(x, y);
        self.pixels[i] = value;
    }

    fn copy_to(&self, dst: &mut [u32]) {
        dst.copy_from_slice(&self.pixels);
    }

    fn copy_from(&mut self, src: &[u32]) {
        self.pixels.copy_from_slice(src);
    }
}

// ============================================================================
// ArgbSurface
// ============================================================================

/// Mutable view over caller-owned pixel rows.
///
/// Row `y` starts at `data[y * stride]`; the `stride - width` padding values
/// at the end of each row are never read or written.
#[derive(Debug)]
pub struct ArgbSurface<'a> {
    data: &'a mut [u32],
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl<'a> ArgbSurface<'a> {
    /// Attach to `data`. `stride` is in pixels, not bytes.
    ///
    /// Fails with [`BlurError::FormatMismatch`] if `stride < width` or if
    /// `data` is too short to hold `height` rows.
    pub fn new(
        data: &'a mut [u32],
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> BlurResult<Self> {
        if stride < width {
            return Err(BlurError::format(format!(
                "stride {stride} is narrower than width {width}"
            )));
        }
        let required = match height {
            0 => 0,
            h => (h - 1)
                .checked_mul(stride)
                .and_then(|n| n.checked_add(width))
                .ok_or_else(|| BlurError::format("surface dimensions overflow"))?,
        };
        if data.len() < required {
            return Err(BlurError::format(format!(
                "{} pixels cannot hold a {width}x{height} surface with stride {stride}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    /// Attach to tightly packed ARGB32 data (stride = width).
    pub fn packed(data: &'a mut [u32], width: usize, height: usize) -> BlurResult<Self> {
        Self::new(data, width, height, width, PixelFormat::Argb32)
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds ({}x{})",
            self.width,
            self.height
        );
        y * self.stride + x
    }

    /// Pixels of row `y`, excluding padding.
    pub fn row(&self, y: usize) -> &[u32] {
        let start = self.index(0, y);
        &self.data[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u32] {
        let start = self.index(0, y);
        &mut self.data[start..start + self.width]
    }
}

impl PixelSurface for ArgbSurface<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> u32 {
        self.data[self.index(x, y)]
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, value: u32) {
        let i = self.index(x, y);
        self.data[i] = value;
    }

    fn copy_to(&self, dst: &mut [u32]) {
        if self.width == 0 {
            return;
        }
        for (y, out) in dst.chunks_exact_mut(self.width).enumerate() {
            out.copy_from_slice(self.row(y));
        }
    }

    fn copy_from(&mut self, src: &[u32]) {
        if self.width == 0 {
            return;
        }
        for (y, row) in src.chunks_exact(self.width).enumerate() {
            self.row_mut(y).copy_from_slice(row);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
