//! Hue shifting and colour sampling over whole logo rasters.

use crate::color::{RgbColor, shift_rgb_hue};
use crate::sampler::PixelBuffer;

// ============================================================================
// Hue Shift
// ============================================================================

/// Rotates the hue of every visible pixel of a logo by `degrees`.
///
/// Uses the same HSL rotation as [`shift_hue`](crate::shift_hue), so a brand
/// colour and a logo shifted by the same angle stay in sync. Alpha is kept
/// as is and fully transparent pixels are left untouched. A non-finite
/// angle returns the logo unchanged.
pub fn shift_logo_hue(buffer: &PixelBuffer, degrees: f32) -> PixelBuffer {
    let mut result = buffer.as_image().clone();
    if !degrees.is_finite() || degrees.rem_euclid(360.0) == 0.0 {
        return PixelBuffer::new(result);
    }

    for pixel in result.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            continue;
        }
        let shifted = shift_rgb_hue(RgbColor::new(r, g, b), degrees);
        pixel.0 = [shifted.r, shifted.g, shifted.b, a];
    }

    PixelBuffer::new(result)
}

// ============================================================================
// Dominant Colour
// ============================================================================

/// Alpha-weighted average colour of the visible pixels.
///
/// Returns mid gray when the buffer has no visible pixels.
pub fn dominant_color(buffer: &PixelBuffer) -> RgbColor {
    let mut total_r: u64 = 0;
    let mut total_g: u64 = 0;
    let mut total_b: u64 = 0;
    let mut total_a: u64 = 0;

    for pixel in buffer.as_raw().chunks_exact(4) {
        let a = pixel[3] as u64;
        if a > 0 {
            total_r += pixel[0] as u64 * a;
            total_g += pixel[1] as u64 * a;
            total_b += pixel[2] as u64 * a;
            total_a += a;
        }
    }

    if total_a == 0 {
        return RgbColor::new(128, 128, 128);
    }

    RgbColor::new(
        (total_r / total_a) as u8,
        (total_g / total_a) as u8,
        (total_b / total_a) as u8,
    )
}
