//! brand-balance: visual balance between a logo mark and its wordmark
//!
//! This crate measures how heavy a logo raster and a piece of brand text
//! look, derives relative scales and a gap that make them feel equally
//! weighted, and maps the result onto layout settings. It also produces
//! "sticker" cutouts of a mark on a thick white border.
//!
//! # Example
//!
//! ```
//! use brand_balance::{
//!     EstimatedTextMeasurer, FontDescriptor, PixelBuffer, analyze_logo,
//!     analyze_wordmark_with, balance_to_display_settings, calculate_balance,
//! };
//! use image::{Rgba, RgbaImage};
//!
//! let mut raster = RgbaImage::new(64, 64);
//! for y in 16..48 {
//!     for x in 16..48 {
//!         raster.put_pixel(x, y, Rgba([30, 60, 200, 255]));
//!     }
//! }
//!
//! let logo = analyze_logo(&PixelBuffer::new(raster));
//! let font = FontDescriptor::new("Inter Bold");
//! let wordmark = analyze_wordmark_with(&EstimatedTextMeasurer, "Acme", &font, None);
//!
//! let balance = calculate_balance(&logo, &wordmark);
//! let settings = balance_to_display_settings(&balance);
//! assert!((10.0..=90.0).contains(&settings.vertical_logo_text_balance));
//! ```
//!
//! # Loading images
//!
//! [`load_pixel_buffer`] accepts data URIs, `http(s)` URLs, `file://` URLs
//! and plain paths. SVG payloads are rasterized with `resvg`.
//!
//! ```no_run
//! # async fn run() -> Result<(), brand_balance::LoadError> {
//! let buffer = brand_balance::load_pixel_buffer("assets/logo.svg").await?;
//! let logo = brand_balance::analyze_logo(&buffer);
//! # Ok(())
//! # }
//! ```
//!
//! # Stickers
//!
//! ```no_run
//! use brand_balance::{StickerConfig, create_sticker_effect};
//!
//! # async fn run() {
//! let config = StickerConfig::default().with_border_thickness(24.0);
//! // Falls back to the input locator on failure.
//! let uri = create_sticker_effect("assets/logo.png", None, &config).await;
//! # }
//! ```

pub mod analysis;
mod color;
mod error;
mod hue;
mod sampler;
mod settings;
mod source;
pub mod sticker;
mod svg;

pub use analysis::{
    BalanceResult, BoundingBox, EstimatedTextMeasurer, FontDescriptor, LogoAnalysisOptions,
    LogoAnalysisResult, Orientation, Reasoning, ReasoningKind, ReasoningStep, SvgTextMeasurer,
    TextMeasurer, WordmarkAnalysisResult, analyze_logo, analyze_logo_with, analyze_wordmark,
    analyze_wordmark_with, calculate_balance, infer_font_weight,
};
pub use color::{
    DEFAULT_LIGHTNESS_STEP, HslColor, LIGHT_LUMINANCE_THRESHOLD, RgbColor, darken_color,
    hex_to_rgb, hsl_to_rgb, is_light_color, lighten_color, luminance, rgb_to_hex, rgb_to_hsl,
    shift_hue,
};
pub use error::{LoadError, StickerError};
pub use hue::{dominant_color, shift_logo_hue};
pub use sampler::{PixelBuffer, decode_pixel_buffer, load_pixel_buffer, load_source};
pub use settings::{DisplaySettings, VERTICAL_GAP_FACTOR, balance_to_display_settings};
pub use source::ImageSource;
pub use sticker::{Background, StickerConfig, StickerResult, compose_sticker, create_sticker_effect};
pub use svg::{MAX_SVG_DIMENSION, rasterize_svg};
