//! Visual-balance analysis of a logo mark and its wordmark.
//!
//! The flow is leaf-first:
//!
//! ```text
//! PixelBuffer ──► analyze_logo ─────┐
//!                                   ├──► calculate_balance ──► balance_to_display_settings
//! text + font ──► analyze_wordmark ─┘
//! ```
//!
//! Every stage is a pure function of its inputs. Each result clamps its own
//! invariants at the end of the computation, so downstream stages can rely
//! on the documented ranges.

pub mod balance;
pub mod logo;
pub mod wordmark;

pub use balance::{BalanceResult, Reasoning, ReasoningKind, ReasoningStep, calculate_balance};
pub use logo::{LogoAnalysisOptions, LogoAnalysisResult, analyze_logo, analyze_logo_with};
pub use wordmark::{
    EstimatedTextMeasurer, FontDescriptor, SvgTextMeasurer, TextMeasurer, WordmarkAnalysisResult,
    analyze_wordmark, analyze_wordmark_with, infer_font_weight,
};

use serde::{Deserialize, Serialize};

// ============================================================================
// BoundingBox
// ============================================================================

/// A rectangle in pixel coordinates.
///
/// Used for the region of a logo raster that holds visible content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

// ============================================================================
// Orientation
// ============================================================================

/// Overall shape of a logo's visible content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
    Square,
}

impl Orientation {
    /// Aspect ratio (width / height) above which content is horizontal.
    pub const HORIZONTAL_THRESHOLD: f32 = 1.3;
    /// Aspect ratio below which content is vertical.
    pub const VERTICAL_THRESHOLD: f32 = 0.7;

    pub fn from_aspect_ratio(aspect_ratio: f32) -> Self {
        if aspect_ratio > Self::HORIZONTAL_THRESHOLD {
            Self::Horizontal
        } else if aspect_ratio < Self::VERTICAL_THRESHOLD {
            Self::Vertical
        } else {
            Self::Square
        }
    }
}
