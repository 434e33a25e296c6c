//! Pixel-level analysis of a logo mark.
//!
//! Two raster passes:
//!
//! 1. Every pixel: count filled pixels (alpha above a threshold), sum their
//!    luminance and track the bounding box of the filled region.
//! 2. Interior pixels: a filled pixel is an edge when its alpha differs from
//!    the mean alpha of its four neighbours by more than the edge threshold.
//!
//! The metrics are folded into a single `visual_weight` in `[0, 1]`.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{BoundingBox, Orientation};
use crate::color::luminance;
use crate::sampler::PixelBuffer;

/// Luminance assumed when a logo has no filled pixels.
const DEFAULT_LUMINANCE: f32 = 128.0;

const DENSITY_WEIGHT: f32 = 0.45;
const CONTRAST_WEIGHT: f32 = 0.30;
const COMPLEXITY_WEIGHT: f32 = 0.25;

// ============================================================================
// Options
// ============================================================================

/// Thresholds used by [`analyze_logo_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct LogoAnalysisOptions {
    /// A pixel is filled when its alpha is strictly above this value.
    pub alpha_threshold: u8,

    /// Minimum alpha jump against the neighbour mean for an edge pixel.
    pub edge_threshold: f32,
}

impl Default for LogoAnalysisOptions {
    fn default() -> Self {
        Self {
            alpha_threshold: 30,
            edge_threshold: 50.0,
        }
    }
}

impl LogoAnalysisOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Result
// ============================================================================

/// Visual metrics of a logo raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct LogoAnalysisResult {
    /// Combined prominence heuristic in `[0, 1]`.
    pub visual_weight: f32,
    /// Fraction of filled pixels in `[0, 1]`.
    pub density: f32,
    /// Mean luminance of filled pixels, normalized to `[0, 1]`.
    pub contrast: f32,
    /// Edge pixels per filled pixel in `[0, 1]`.
    pub complexity: f32,
    /// Width / height of the filled region.
    pub aspect_ratio: f32,
    pub orientation: Orientation,
    pub bounding_box: BoundingBox,
}

// ============================================================================
// Analysis
// ============================================================================

/// Analyzes a logo with the default thresholds.
pub fn analyze_logo(buffer: &PixelBuffer) -> LogoAnalysisResult {
    analyze_logo_with(buffer, &LogoAnalysisOptions::default())
}

/// Analyzes a logo with explicit thresholds.
pub fn analyze_logo_with(buffer: &PixelBuffer, options: &LogoAnalysisOptions) -> LogoAnalysisResult {
    let coverage = scan_coverage(buffer, options.alpha_threshold);
    let edge_pixels = count_edge_pixels(buffer, options);
    trace!(
        filled = coverage.filled,
        edges = edge_pixels,
        "logo raster passes complete"
    );

    let total = buffer.pixel_count();
    let density = if total == 0 {
        0.0
    } else {
        coverage.filled as f32 / total as f32
    };

    let avg_luminance = if coverage.filled == 0 {
        DEFAULT_LUMINANCE
    } else {
        (coverage.luminance_sum / coverage.filled as f64) as f32
    };
    let contrast = avg_luminance / 255.0;

    let complexity = if coverage.filled == 0 {
        0.0
    } else {
        edge_pixels as f32 / coverage.filled as f32
    };

    let bounding_box = coverage.bounding_box();
    let aspect_ratio = if bounding_box.is_empty() {
        1.0
    } else {
        bounding_box.width as f32 / bounding_box.height as f32
    };

    // Peaks for near-black or near-white content, zero for mid gray.
    let contrast_factor = (contrast - 0.5).abs() * 2.0;
    let visual_weight = density * DENSITY_WEIGHT
        + contrast_factor * CONTRAST_WEIGHT
        + complexity * COMPLEXITY_WEIGHT;

    let result = LogoAnalysisResult {
        visual_weight: visual_weight.clamp(0.0, 1.0),
        density: density.clamp(0.0, 1.0),
        contrast: contrast.clamp(0.0, 1.0),
        complexity: complexity.clamp(0.0, 1.0),
        aspect_ratio,
        orientation: Orientation::from_aspect_ratio(aspect_ratio),
        bounding_box,
    };
    debug!(
        visual_weight = result.visual_weight,
        density = result.density,
        contrast = result.contrast,
        complexity = result.complexity,
        orientation = ?result.orientation,
        "analyzed logo"
    );
    result
}

/// Accumulators of the first pass.
struct Coverage {
    filled: usize,
    luminance_sum: f64,
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

impl Coverage {
    fn bounding_box(&self) -> BoundingBox {
        if self.filled == 0 {
            return BoundingBox::default();
        }
        BoundingBox::new(
            self.min_x,
            self.min_y,
            self.max_x - self.min_x + 1,
            self.max_y - self.min_y + 1,
        )
    }
}

fn scan_coverage(buffer: &PixelBuffer, alpha_threshold: u8) -> Coverage {
    let mut coverage = Coverage {
        filled: 0,
        luminance_sum: 0.0,
        min_x: u32::MAX,
        min_y: u32::MAX,
        max_x: 0,
        max_y: 0,
    };

    for (x, y, pixel) in buffer.as_image().enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        if a <= alpha_threshold {
            continue;
        }
        coverage.filled += 1;
        coverage.luminance_sum += luminance(r, g, b) as f64;
        coverage.min_x = coverage.min_x.min(x);
        coverage.min_y = coverage.min_y.min(y);
        coverage.max_x = coverage.max_x.max(x);
        coverage.max_y = coverage.max_y.max(y);
    }

    coverage
}

fn count_edge_pixels(buffer: &PixelBuffer, options: &LogoAnalysisOptions) -> usize {
    let (width, height) = buffer.dimensions();
    if width < 3 || height < 3 {
        return 0;
    }

    let alpha = |x: u32, y: u32| buffer.pixel(x, y)[3] as f32;
    let mut edges = 0;
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let a = buffer.pixel(x, y)[3];
            if a <= options.alpha_threshold {
                continue;
            }
            let neighbours =
                (alpha(x - 1, y) + alpha(x + 1, y) + alpha(x, y - 1) + alpha(x, y + 1)) / 4.0;
            if (a as f32 - neighbours).abs() > options.edge_threshold {
                edges += 1;
            }
        }
    }
    edges
}

// ============================================================================
// Tests
// ============================================================================
