//! Border synthesis and layer compositing for stickers.

use image::{Rgba, RgbaImage};

use super::distance::DistanceField;
use super::mask::ContentMask;

// ============================================================================
// Layers
// ============================================================================

/// Builds the white border layer from a distance field.
///
/// Pixels within `thickness` of the content are opaque white, the following
/// `antialias_width` band fades linearly to transparent, and everything
/// further out is transparent.
pub fn border_layer(field: &DistanceField, thickness: f32, antialias_width: f32) -> RgbaImage {
    let mut canvas = RgbaImage::new(field.width(), field.height());
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let alpha = border_alpha(field.pixels(x, y), thickness, antialias_width);
        if alpha > 0 {
            *pixel = Rgba([255, 255, 255, alpha]);
        }
    }
    canvas
}

fn border_alpha(distance: f32, thickness: f32, antialias_width: f32) -> u8 {
    if distance <= thickness {
        return 255;
    }
    let overshoot = distance - thickness;
    if antialias_width <= 0.0 || overshoot >= antialias_width {
        return 0;
    }
    ((1.0 - overshoot / antialias_width) * 255.0).round() as u8
}

/// Cuts the mark out of `target`: non-content pixels become fully
/// transparent, content pixels keep their colour (inverted when `invert`)
/// and their own alpha.
pub fn content_layer(target: &RgbaImage, mask: &ContentMask, invert: bool) -> RgbaImage {
    let mut layer = target.clone();
    for (pixel, &content) in layer.pixels_mut().zip(mask.cells()) {
        if !content {
            pixel.0[3] = 0;
        } else if invert {
            let [r, g, b, a] = pixel.0;
            pixel.0 = [255 - r, 255 - g, 255 - b, a];
        }
    }
    layer
}

// ============================================================================
// Layering
// ============================================================================

/// Lays `content` over `border` in place. Both layers share the sticker's
/// working size; `content` is straight-alpha like every layer here.
pub fn layer_over(border: &mut RgbaImage, content: &RgbaImage) {
    debug_assert_eq!(border.dimensions(), content.dimensions());
    for (below, above) in border.pixels_mut().zip(content.pixels()) {
        below.0 = over(above.0, below.0);
    }
}

/// Source-over for one straight-alpha pixel, in integer arithmetic scaled
/// by 255².
fn over(top: [u8; 4], bottom: [u8; 4]) -> [u8; 4] {
    let top_alpha = top[3] as u32;
    match top_alpha {
        0 => return bottom,
        255 => return top,
        _ => {}
    }

    let top_weight = top_alpha * 255;
    let bottom_weight = bottom[3] as u32 * (255 - top_alpha);
    let coverage = top_weight + bottom_weight;
    if coverage == 0 {
        return [0; 4];
    }

    let mix = |i: usize| {
        let sum = top[i] as u32 * top_weight + bottom[i] as u32 * bottom_weight;
        ((sum + coverage / 2) / coverage) as u8
    };
    [mix(0), mix(1), mix(2), ((coverage + 127) / 255) as u8]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sticker::distance::{ChamferWeights, chamfer_distance};
    use crate::sticker::mask::Background;

    #[test]
    fn border_alpha_bands() {
        assert_eq!(border_alpha(0.0, 30.0, 1.0), 255);
        assert_eq!(border_alpha(30.0, 30.0, 1.0), 255);
        assert_eq!(border_alpha(30.5, 30.0, 1.0), 128);
        assert_eq!(border_alpha(31.0, 30.0, 1.0), 0);
        assert_eq!(border_alpha(f32::INFINITY, 30.0, 1.0), 0);
        assert_eq!(border_alpha(30.5, 30.0, 0.0), 0);
    }

    #[test]
    fn border_surrounds_content() {
        let mut img = RgbaImage::from_pixel(21, 21, Rgba([255, 255, 255, 255]));
        img.put_pixel(10, 10, Rgba([0, 0, 0, 255]));
        let mask = ContentMask::from_raster(&img, Background::Light, 128.0);
        let field = chamfer_distance(&mask, ChamferWeights::default());

        let border = border_layer(&field, 3.0, 1.0);
        assert_eq!(border.get_pixel(10, 10).0, [255, 255, 255, 255]);
        assert_eq!(border.get_pixel(13, 10).0, [255, 255, 255, 255]);
        assert_eq!(border.get_pixel(15, 10).0[3], 0);
        assert_eq!(border.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn content_layer_cuts_and_inverts() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([20, 40, 60, 255]));
        img.put_pixel(1, 0, Rgba([200, 200, 200, 255]));
        let mask = ContentMask::from_raster(&img, Background::Light, 128.0);

        let plain = content_layer(&img, &mask, false);
        assert_eq!(plain.get_pixel(0, 0).0, [20, 40, 60, 255]);
        assert_eq!(plain.get_pixel(1, 0).0[3], 0);

        let inverted = content_layer(&img, &mask, true);
        assert_eq!(inverted.get_pixel(0, 0).0, [235, 215, 195, 255]);
    }

    #[test]
    fn opaque_content_replaces_border_and_cutout_keeps_it() {
        let mut border = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 255]));
        let mut content = RgbaImage::new(2, 1);
        content.put_pixel(0, 0, Rgba([12, 34, 56, 255]));

        layer_over(&mut border, &content);
        assert_eq!(border.get_pixel(0, 0).0, [12, 34, 56, 255]);
        assert_eq!(border.get_pixel(1, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn translucent_content_blends_into_white_border() {
        let mut border = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
        let content = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));

        layer_over(&mut border, &content);
        assert_eq!(border.get_pixel(0, 0).0, [127, 127, 127, 255]);
    }

    #[test]
    fn translucent_content_beyond_border_keeps_its_colour() {
        let mut border = RgbaImage::new(1, 1);
        let content = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 128]));

        layer_over(&mut border, &content);
        assert_eq!(border.get_pixel(0, 0).0, [10, 20, 30, 128]);
    }

    #[test]
    fn content_over_antialiased_edge() {
        let mut border = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 128]));
        let content = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));

        layer_over(&mut border, &content);
        let [r, g, b, a] = border.get_pixel(0, 0).0;
        assert_eq!((r, g, b), (85, 85, 85));
        assert_eq!(a, 192);
    }
}
