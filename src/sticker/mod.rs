//! Sticker-style cutouts: the mark on a thick white border.
//!
//! # Pipeline
//!
//! ```text
//! target ──┬──────────────────────────────────────────┐
//!          │                                          ▼
//! mask? ───┴► resample ► classify bg ► content mask ► content layer ─┐
//!                                          │                          ▼
//!                                          └► chamfer ► border layer ► composite ► PNG
//! ```
//!
//! 1. Both rasters are resampled to the target's size, capped at
//!    [`StickerConfig::max_dimension`] on the longer edge.
//! 2. The mask raster's corners decide whether the background is light or dark.
//! 3. A luminance threshold relative to that background yields the content mask.
//! 4. A chamfer distance transform of the mask feeds the border layer.
//! 5. The target is cut out with the mask (and inverted when it masks
//!    itself on a dark background) and layered over the border.
//!
//! [`compose_sticker`] is the synchronous core. [`create_sticker_effect`]
//! wraps it with loading and encoding and never fails: on any error it hands
//! back the original locator.

pub mod composite;
pub mod distance;
pub mod mask;

pub use distance::{ChamferWeights, DistanceField, chamfer_distance};
pub use mask::{Background, ContentMask};

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StickerError;
use crate::sampler::{PixelBuffer, load_pixel_buffer};

use composite::{border_layer, content_layer, layer_over};
use mask::{classify_background, fit_raster, shared_raster_size};

// ============================================================================
// StickerConfig
// ============================================================================

/// Tunable constants of the sticker pipeline.
///
/// Deserializes from camelCase JSON; missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct StickerConfig {
    /// Border width in raster pixels.
    pub border_thickness: f32,

    /// Longest edge of the working raster.
    pub max_dimension: u32,

    /// Chamfer cost of an orthogonal step.
    pub orthogonal_weight: u32,

    /// Chamfer cost of a diagonal step.
    pub diagonal_weight: u32,

    /// Distance of the background samples from each corner.
    pub corner_inset: u32,

    /// Luminance splitting light from dark, for both background and content.
    pub luminance_threshold: f32,

    /// Width of the fade at the outer edge of the border.
    pub antialias_width: f32,
}

impl Default for StickerConfig {
    fn default() -> Self {
        Self {
            border_thickness: 30.0,
            max_dimension: 1024,
            orthogonal_weight: 3,
            diagonal_weight: 4,
            corner_inset: 5,
            luminance_threshold: 128.0,
            antialias_width: 1.0,
        }
    }
}

impl StickerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_border_thickness(mut self, thickness: f32) -> Self {
        self.border_thickness = thickness;
        self
    }

    pub fn chamfer_weights(&self) -> ChamferWeights {
        ChamferWeights {
            orthogonal: self.orthogonal_weight.max(1),
            diagonal: self.diagonal_weight.max(1),
        }
    }
}

// ============================================================================
// StickerResult
// ============================================================================

/// A composited sticker raster.
#[derive(Debug, Clone, PartialEq)]
pub struct StickerResult {
    pub image: RgbaImage,

    /// Background classification of the mask raster.
    pub background: Background,

    /// True when the target served as its own mask.
    pub self_masked: bool,
}

impl StickerResult {
    /// Encodes the sticker as PNG.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, StickerError> {
        let mut buf = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(buf)
    }

    /// Encodes the sticker as a `data:image/png;base64,...` URI.
    pub fn to_data_uri(&self) -> Result<String, StickerError> {
        let png = self.to_png_bytes()?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Builds a sticker from decoded rasters.
///
/// `mask_source` defaults to `target`. The colours of a self-masked target on
/// a dark background are inverted so dark-on-dark marks stay visible on the
/// white border; a distinct mask source never triggers inversion.
pub fn compose_sticker(
    target: &PixelBuffer,
    mask_source: Option<&PixelBuffer>,
    config: &StickerConfig,
) -> Result<StickerResult, StickerError> {
    if target.is_empty() {
        return Err(StickerError::EmptyRaster);
    }

    let (width, height) = shared_raster_size(target.width(), target.height(), config.max_dimension);
    let target_raster = fit_raster(target.as_image(), width, height);

    let mask_source = mask_source.filter(|m| !m.is_empty());
    let self_masked = mask_source.is_none();
    let mask_raster = match mask_source {
        Some(source) => fit_raster(source.as_image(), width, height),
        None => target_raster.clone(),
    };

    let background =
        classify_background(&mask_raster, config.corner_inset, config.luminance_threshold);
    let mask = ContentMask::from_raster(&mask_raster, background, config.luminance_threshold);
    let field = chamfer_distance(&mask, config.chamfer_weights());

    let invert = self_masked && background == Background::Dark;
    let mut canvas = border_layer(&field, config.border_thickness, config.antialias_width);
    let content = content_layer(&target_raster, &mask, invert);
    layer_over(&mut canvas, &content);

    debug!(
        width,
        height,
        ?background,
        self_masked,
        invert,
        content_pixels = mask.content_count(),
        "composed sticker"
    );

    Ok(StickerResult {
        image: canvas,
        background,
        self_masked,
    })
}

/// Loads `target` (and `mask_source`, if given), builds a sticker and returns
/// it as a PNG data URI.
///
/// A mask source that fails to load is skipped and the target masks itself.
/// Any other failure returns `target` unchanged.
///
/// Background detection reads RGB only. A dark mark on a transparent
/// background therefore classifies as dark-on-dark and yields an empty
/// mask and a blank sticker. Flatten such images onto white, or pass a
/// flattened copy as `mask_source`, before calling.
#[tracing::instrument(level = "debug", skip_all)]
pub async fn create_sticker_effect(
    target: &str,
    mask_source: Option<&str>,
    config: &StickerConfig,
) -> String {
    match try_create_sticker(target, mask_source, config).await {
        Ok(uri) => uri,
        Err(err) => {
            warn!(%err, "sticker effect failed; returning original image");
            target.to_string()
        }
    }
}

async fn try_create_sticker(
    target: &str,
    mask_source: Option<&str>,
    config: &StickerConfig,
) -> Result<String, StickerError> {
    let target_buffer = load_pixel_buffer(target).await?;

    let mask_buffer = match mask_source {
        Some(locator) => match load_pixel_buffer(locator).await {
            Ok(buffer) => Some(buffer),
            Err(err) => {
                warn!(%err, "mask source failed to load; masking with the target");
                None
            }
        },
        None => None,
    };

    compose_sticker(&target_buffer, mask_buffer.as_ref(), config)?.to_data_uri()
}

// ============================================================================
// Tests
// ============================================================================
