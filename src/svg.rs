//! SVG rasterization using resvg/usvg.
//!
//! Logos frequently arrive as SVG. They are rendered at their intrinsic size
//! (capped on the longer edge) so the analyzers see the same raster a
//! browser would produce.

use std::sync::{Arc, OnceLock};

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree, fontdb};
use tracing::debug;

use crate::error::LoadError;

/// Longest edge, in pixels, of a rasterized SVG.
pub const MAX_SVG_DIMENSION: u32 = 1024;

// ============================================================================
// Parsing
// ============================================================================

/// Returns true if the payload looks like SVG markup rather than a raster format.
pub(crate) fn looks_like_svg(bytes: &[u8]) -> bool {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let head = &bytes[start..bytes.len().min(start + 1024)];

    head.starts_with(b"<svg")
        || ((head.starts_with(b"<?xml") || head.starts_with(b"<!--"))
            && head.windows(4).any(|w| w == b"<svg"))
}

/// The process-wide system font database, loaded on first use.
pub(crate) fn font_database() -> Arc<fontdb::Database> {
    static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            debug!(faces = db.len(), "loaded system font database");
            Arc::new(db)
        })
        .clone()
}

/// usvg options backed by the shared font database.
pub(crate) fn svg_options() -> Options<'static> {
    let mut options = Options::default();
    options.fontdb = font_database();
    options
}

// ============================================================================
// Rendering
// ============================================================================

/// Rasterizes SVG markup, scaling it down so neither edge exceeds `max_dimension`.
pub fn rasterize_svg(data: &[u8], max_dimension: u32) -> Result<RgbaImage, LoadError> {
    let tree = Tree::from_data(data, &svg_options()).map_err(|e| LoadError::Svg(e.to_string()))?;

    let size = tree.size();
    let longest = size.width().max(size.height());
    let scale = if longest > max_dimension as f32 {
        max_dimension as f32 / longest
    } else {
        1.0
    };
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or(LoadError::Empty)?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Converts a premultiplied tiny-skia pixmap into straight-alpha RGBA.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    img
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20"><rect x="10" y="5" width="20" height="10" fill="#ff0000"/></svg>"##;

    #[test]
    fn detects_svg_markup() {
        assert!(looks_like_svg(SQUARE_SVG.as_bytes()));
        assert!(looks_like_svg(b"  \n<?xml version=\"1.0\"?>\n<svg/>"));
        assert!(!looks_like_svg(b"\x89PNG\r\n\x1a\n"));
        assert!(!looks_like_svg(b"<?xml version=\"1.0\"?><html/>"));
    }

    #[test]
    fn rasterizes_at_intrinsic_size() {
        let img = rasterize_svg(SQUARE_SVG.as_bytes(), MAX_SVG_DIMENSION).unwrap();
        assert_eq!(img.dimensions(), (40, 20));
        assert_eq!(img.get_pixel(20, 10).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(2, 2).0[3], 0);
    }

    #[test]
    fn caps_the_longer_edge() {
        let img = rasterize_svg(SQUARE_SVG.as_bytes(), 10).unwrap();
        assert_eq!(img.dimensions(), (10, 5));
    }

    #[test]
    fn malformed_svg_is_an_error() {
        assert!(matches!(rasterize_svg(b"<svg", 64), Err(LoadError::Svg(_))));
    }
}
