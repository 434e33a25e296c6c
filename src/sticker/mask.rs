//! Raster preparation, background classification and the binary content mask.

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::color::luminance;

// ============================================================================
// Raster Sizing
// ============================================================================

/// Size both sticker rasters are resampled to: the target's size, scaled
/// down so the longer edge does not exceed `max_dimension`.
pub fn shared_raster_size(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_dimension || longest == 0 {
        return (width, height);
    }
    let scale = max_dimension as f64 / longest as f64;
    let scaled = |v: u32| ((v as f64 * scale).round() as u32).max(1);
    (scaled(width), scaled(height))
}

/// Resamples `image` to exactly `width × height` (aspect ratio not preserved).
pub fn fit_raster(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Triangle)
}

// ============================================================================
// Background
// ============================================================================

/// Brightness class of the area surrounding a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Light,
    Dark,
}

/// Classifies the background from the four corners, each sampled `inset`
/// pixels in from the edge.
///
/// Light when the mean corner luminance exceeds `threshold`. Alpha is not
/// considered, so a transparent background reads as dark.
pub fn classify_background(image: &RgbaImage, inset: u32, threshold: f32) -> Background {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Background::Dark;
    }

    let near = |extent: u32| inset.min(extent - 1);
    let far = |extent: u32| (extent - 1).saturating_sub(inset);
    let corners = [
        (near(width), near(height)),
        (far(width), near(height)),
        (near(width), far(height)),
        (far(width), far(height)),
    ];

    let mean = corners
        .iter()
        .map(|&(x, y)| {
            let [r, g, b, _] = image.get_pixel(x, y).0;
            luminance(r, g, b)
        })
        .sum::<f32>()
        / corners.len() as f32;

    if mean > threshold {
        Background::Light
    } else {
        Background::Dark
    }
}

// ============================================================================
// ContentMask
// ============================================================================

/// Per-pixel "belongs to the mark" classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl ContentMask {
    /// Thresholds luminance against the background: on a light background
    /// darker pixels are content, on a dark one brighter pixels are.
    pub fn from_raster(image: &RgbaImage, background: Background, threshold: f32) -> Self {
        let cells = image
            .pixels()
            .map(|p| {
                let [r, g, b, _] = p.0;
                let lum = luminance(r, g, b);
                match background {
                    Background::Light => lum < threshold,
                    Background::Dark => lum >= threshold,
                }
            })
            .collect();

        Self {
            width: image.width(),
            height: image.height(),
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_content(&self, x: u32, y: u32) -> bool {
        self.cells[self.index(x, y)]
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn content_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn raster_size_caps_longer_edge() {
        assert_eq!(shared_raster_size(800, 600, 1024), (800, 600));
        assert_eq!(shared_raster_size(2048, 1024, 1024), (1024, 512));
        assert_eq!(shared_raster_size(1000, 3000, 1024), (341, 1024));
        assert_eq!(shared_raster_size(5000, 1, 1024), (1024, 1));
    }

    #[test]
    fn fit_raster_resamples_to_exact_size() {
        let img = RgbaImage::from_pixel(40, 20, Rgba([9, 9, 9, 255]));
        assert_eq!(fit_raster(&img, 10, 10).dimensions(), (10, 10));
        assert_eq!(fit_raster(&img, 40, 20), img);
    }

    #[test]
    fn corners_decide_background() {
        let mut img = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
        img.put_pixel(10, 10, Rgba([0, 0, 0, 255]));
        assert_eq!(classify_background(&img, 5, 128.0), Background::Light);

        let img = RgbaImage::from_pixel(20, 20, Rgba([10, 10, 10, 255]));
        assert_eq!(classify_background(&img, 5, 128.0), Background::Dark);

        let transparent = RgbaImage::new(20, 20);
        assert_eq!(classify_background(&transparent, 5, 128.0), Background::Dark);
    }

    #[test]
    fn tiny_rasters_clamp_the_inset() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([255, 255, 255, 255]));
        assert_eq!(classify_background(&img, 5, 128.0), Background::Light);
    }

    #[test]
    fn mask_inverts_with_background() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 255]));

        let on_light = ContentMask::from_raster(&img, Background::Light, 128.0);
        assert!(!on_light.is_content(0, 0));
        assert!(on_light.is_content(1, 0));

        let on_dark = ContentMask::from_raster(&img, Background::Dark, 128.0);
        assert!(on_dark.is_content(0, 0));
        assert!(!on_dark.is_content(1, 0));
        assert_eq!(on_dark.content_count(), 1);
    }
}
