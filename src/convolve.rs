//! One-dimensional convolution pass.
//!
//! A pass copies its target into a snapshot, then recomputes every pixel of
//! the target from the snapshot along a single [`Direction`]. Reading only
//! from the snapshot means no tap ever sees a value written earlier in the
//! same pass.
//!
//! Edge handling: taps that fall outside the surface are skipped. They add
//! nothing to the channel sums and nothing to the divisor, so pixels near an
//! edge are normalized over the taps they actually have. Edge pixels
//! therefore lean more heavily on their in-bounds neighbours than a
//! clamp-to-edge or reflect policy would make them.

use crate::basics::Direction;
use crate::error::BlurResult;
use crate::gaussian_kernel::GaussianKernel;
use crate::pixel_codec::{pack, unpack, PixelAccum};
use crate::rendering_buffer::{ArgbBuffer, PixelSurface};

/// Range of kernel indices whose taps land inside `0..extent` when the
/// kernel is centered on `pos`.
#[inline]
fn tap_range(kernel: &GaussianKernel, pos: usize, extent: usize) -> core::ops::Range<usize> {
    let center = kernel.center();
    let lo = center.saturating_sub(pos);
    let hi = kernel.len().min(center + (extent - pos));
    lo..hi
}

/// Blur the pixel at `(x, y)` of `src` along `dir`.
///
/// `(x, y)` must lie inside `src`.
#[inline]
pub fn convolve_pixel(
    src: &ArgbBuffer,
    kernel: &GaussianKernel,
    dir: Direction,
    x: usize,
    y: usize,
) -> u32 {
    let (w, h) = (src.width(), src.height());
    let pixels = src.pixels();
    let weights = kernel.weights();
    let center = kernel.center();

    let mut accum = PixelAccum::ZERO;
    let mut applied: u64 = 0;

    match dir {
        Direction::Horizontal => {
            let row = &pixels[y * w..(y + 1) * w];
            for i in tap_range(kernel, x, w) {
                let sx = x + i - center;
                accum += unpack(row[sx], weights[i]);
                applied += weights[i] as u64;
            }
        }
        Direction::Vertical => {
            for i in tap_range(kernel, y, h) {
                let sy = y + i - center;
                accum += unpack(pixels[sy * w + x], weights[i]);
                applied += weights[i] as u64;
            }
        }
    }

    // The center tap is always in range and non-zero.
    pack(&accum, applied)
}

/// Run one pass over all of `target` along `dir`.
///
/// Allocates a snapshot of `target` for the duration of the pass; fails with
/// [`BlurError::AllocationFailure`](crate::error::BlurError::AllocationFailure)
/// before writing anything if it cannot.
pub fn convolve_pass<S: PixelSurface + ?Sized>(
    target: &mut S,
    kernel: &GaussianKernel,
    dir: Direction,
) -> BlurResult<()> {
    let (w, h) = (target.width(), target.height());
    if w == 0 || h == 0 {
        return Ok(());
    }

    let snapshot = ArgbBuffer::snapshot_of(target)?;
    log::trace!(
        "convolve pass: {:?} {}x{} taps={}",
        dir,
        w,
        h,
        kernel.len()
    );

    for y in 0..h {
        for x in 0..w {
            let v = convolve_pixel(&snapshot, kernel, dir, x, y);
            target.set_pixel(x, y, v);
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Argb32;

    fn buffer(w: usize, h: usize, pixels: &[u32]) -> ArgbBuffer {
        ArgbBuffer::from_pixels(w, h, pixels.to_vec()).unwrap()
    }

    #[test]
    fn test_tap_range_clips_at_edges() {
        let k = GaussianKernel::new(1.0).unwrap(); // 7 taps, center 3
        assert_eq!(tap_range(&k, 0, 10), 3..7);
        assert_eq!(tap_range(&k, 1, 10), 2..7);
        assert_eq!(tap_range(&k, 5, 10), 0..7);
        assert_eq!(tap_range(&k, 9, 10), 0..4);
        assert_eq!(tap_range(&k, 0, 1), 3..4);
    }

    #[test]
    fn test_single_pixel_pass_is_identity() {
        let k = GaussianKernel::new(3.0).unwrap();
        let px = Argb32::new(200, 10, 120, 250).0;
        let mut buf = buffer(1, 1, &[px]);
        convolve_pass(&mut buf, &k, Direction::Horizontal).unwrap();
        convolve_pass(&mut buf, &k, Direction::Vertical).unwrap();
        assert_eq!(buf.pixel(0, 0), px);
    }

    #[test]
    fn test_horizontal_pass_leaves_columns_independent() {
        // Two rows with different constant colors: a horizontal pass must not
        // mix them.
        let top = Argb32::rgb(255, 0, 0).0;
        let bottom = Argb32::rgb(0, 0, 255).0;
        let mut buf = buffer(4, 2, &[top, top, top, top, bottom, bottom, bottom, bottom]);
        let k = GaussianKernel::new(1.0).unwrap();
        convolve_pass(&mut buf, &k, Direction::Horizontal).unwrap();
        assert!(buf.row(0).iter().all(|&p| p == top));
        assert!(buf.row(1).iter().all(|&p| p == bottom));
    }

    #[test]
    fn test_vertical_pass_mixes_rows() {
        let top = Argb32::rgb(255, 0, 0).0;
        let bottom = Argb32::rgb(0, 0, 255).0;
        let mut buf = buffer(2, 2, &[top, top, bottom, bottom]);
        let k = GaussianKernel::new(1.0).unwrap();
        convolve_pass(&mut buf, &k, Direction::Vertical).unwrap();
        let p = Argb32(buf.pixel(0, 0));
        assert_eq!(p.a(), 255);
        assert!(p.r() > 0 && p.r() < 255);
        assert!(p.b() > 0 && p.b() < 255);
        // Rows blend symmetrically: top gets as much blue as bottom gets red.
        let q = Argb32(buf.pixel(0, 1));
        assert_eq!(p.b(), q.r());
    }

    #[test]
    fn test_reads_come_from_snapshot() {
        // 3 taps at sigma 0.5. With in-place reads the second pixel would see
        // the already-blurred first one; from the snapshot both ends stay
        // mirror images of each other.
        let k = GaussianKernel::new(0.5).unwrap();
        let mut buf = buffer(3, 1, &[0xFF00_0000, 0xFFFF_FFFF, 0xFF00_0000]);
        convolve_pass(&mut buf, &k, Direction::Horizontal).unwrap();
        assert_eq!(buf.pixel(0, 0), buf.pixel(2, 0));
    }

    #[test]
    fn test_edge_taps_renormalized() {
        // Left edge pixel of a 2-wide row: only center and right taps apply,
        // so the result is their weighted mean, not darkened toward zero.
        let k = GaussianKernel::new(0.5).unwrap();
        let w = k.weights();
        let (wc, wr) = (w[1] as u64, w[2] as u64);
        let mut buf = buffer(2, 1, &[Argb32::rgb(100, 100, 100).0, Argb32::rgb(200, 200, 200).0]);
        convolve_pass(&mut buf, &k, Direction::Horizontal).unwrap();
        let expected = ((100 * wc + 200 * wr) / (wc + wr)) as u8;
        let p = Argb32(buf.pixel(0, 0));
        assert_eq!(p.a(), 255);
        assert_eq!(p.r(), expected);
    }

    #[test]
    fn test_first_pixel_is_a_regular_tap() {
        // The pixel at index 0 contributes like any other in-bounds pixel.
        let k = GaussianKernel::new(0.5).unwrap();
        let bright = Argb32::rgb(255, 255, 255).0;
        let dark = Argb32::rgb(0, 0, 0).0;
        let mut buf = buffer(1, 2, &[bright, dark]);
        convolve_pass(&mut buf, &k, Direction::Vertical).unwrap();
        assert!(Argb32(buf.pixel(0, 1)).r() > 0);
    }

    #[test]
    fn test_empty_target_is_noop() {
        let k = GaussianKernel::new(1.0).unwrap();
        let mut buf = ArgbBuffer::new(0, 3, 0).unwrap();
        assert!(convolve_pass(&mut buf, &k, Direction::Vertical).is_ok());
    }
}
