//! Metric analysis of a wordmark (brand name set in a given font).
//!
//! The rendered width is obtained through a [`TextMeasurer`]. The default,
//! [`SvgTextMeasurer`], lays the text out with usvg against the system fonts
//! and falls back to [`EstimatedTextMeasurer`] when no glyphs come out.

use resvg::usvg::Tree;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::svg::svg_options;

/// Font size, in abstract units, used when the caller has no preference.
pub const DEFAULT_BASE_SIZE: f32 = 100.0;

/// Line height relative to the font size.
const LINE_HEIGHT: f32 = 1.2;

const ASCENDERS: &[char] = &['b', 'd', 'f', 'h', 'k', 'l', 't'];
const DESCENDERS: &[char] = &['g', 'j', 'p', 'q', 'y'];

// ============================================================================
// FontDescriptor
// ============================================================================

/// Identifies the font a wordmark is set in, e.g. `"Montserrat SemiBold"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct FontDescriptor {
    /// Family name, possibly carrying a weight keyword.
    pub name: String,
}

impl FontDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Weight factor inferred from the name, see [`infer_font_weight`].
    pub fn weight_factor(&self) -> f32 {
        infer_font_weight(&self.name)
    }

    /// CSS `font-weight` matching [`weight_factor`](Self::weight_factor).
    pub fn css_weight(&self) -> u16 {
        let factor = self.weight_factor();
        if factor <= 0.7 {
            100
        } else if factor <= 0.85 {
            300
        } else if factor <= 1.0 {
            400
        } else if factor <= 1.15 {
            600
        } else if factor <= 1.3 {
            700
        } else {
            900
        }
    }
}

impl From<&str> for FontDescriptor {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FontDescriptor {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Infers a weight factor in `[0.7, 1.5]` from weight keywords in a font name.
///
/// Case-insensitive substring match; the first matching keyword wins, in the
/// order thin/hairline, light, medium, semibold, bold, black/heavy.
pub fn infer_font_weight(font_name: &str) -> f32 {
    let name = font_name.to_lowercase();
    if name.contains("thin") || name.contains("hairline") {
        0.7
    } else if name.contains("light") {
        0.85
    } else if name.contains("medium") {
        1.0
    } else if name.contains("semibold") {
        1.15
    } else if name.contains("bold") {
        1.3
    } else if name.contains("black") || name.contains("heavy") {
        1.5
    } else {
        1.0
    }
}

// ============================================================================
// Text Measurement
// ============================================================================

/// Measures the advance width of a line of text.
pub trait TextMeasurer {
    /// Width of `text` set in `font` at `size` units.
    fn measure_width(&self, text: &str, font: &FontDescriptor, size: f32) -> f32;
}

/// Deterministic width estimate from per-character advance classes.
///
/// Advances are fractions of the font size, widened for heavier weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl EstimatedTextMeasurer {
    fn advance(c: char) -> f32 {
        match c {
            ' ' => 0.28,
            'i' | 'j' | 'l' | 't' | 'f' | 'r' | 'I' | '1' | '.' | ',' | ':' | ';' | '\'' | '!'
            | '|' => 0.3,
            'm' | 'w' | 'M' | 'W' => 0.85,
            c if c.is_ascii_digit() => 0.55,
            c if c.is_uppercase() => 0.68,
            _ => 0.52,
        }
    }
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure_width(&self, text: &str, font: &FontDescriptor, size: f32) -> f32 {
        let weight_spread = 1.0 + (font.weight_factor() - 1.0) * 0.25;
        let em: f32 = text.chars().map(Self::advance).sum();
        em * size * weight_spread
    }
}

/// Measures text by laying it out through usvg with the system fonts.
///
/// Width is the horizontal extent of the laid-out glyphs. When the font
/// database yields nothing (no fonts installed, empty text), the estimate of
/// [`EstimatedTextMeasurer`] is used instead so the result stays usable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgTextMeasurer {
    fallback: EstimatedTextMeasurer,
}

impl SvgTextMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    fn layout_width(&self, text: &str, font: &FontDescriptor, size: f32) -> Option<f32> {
        if text.trim().is_empty() || size.is_nan() || size <= 0.0 {
            return None;
        }

        let canvas_width = (size * text.chars().count() as f32 * 2.0).ceil();
        let canvas_height = (size * LINE_HEIGHT * 2.0).ceil();
        let markup = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{canvas_width}" height="{canvas_height}"><text x="0" y="{size}" font-family="{family}" font-weight="{weight}" font-size="{size}" xml:space="preserve">{text}</text></svg>"#,
            family = escape_xml(&font.name),
            weight = font.css_weight(),
            text = escape_xml(text),
        );

        let tree = Tree::from_str(&markup, &svg_options()).ok()?;
        if !tree.root().has_children() {
            return None;
        }
        let width = tree.root().abs_bounding_box().width();
        (width.is_finite() && width > 0.0).then_some(width)
    }
}

impl TextMeasurer for SvgTextMeasurer {
    fn measure_width(&self, text: &str, font: &FontDescriptor, size: f32) -> f32 {
        self.layout_width(text, font, size).unwrap_or_else(|| {
            debug!(font = %font.name, "no glyphs laid out; estimating wordmark width");
            self.fallback.measure_width(text, font, size)
        })
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

// ============================================================================
// Result
// ============================================================================

/// Visual metrics of a wordmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct WordmarkAnalysisResult {
    /// Combined prominence heuristic in `[0, 1]`.
    pub visual_weight: f32,
    pub character_count: usize,
    pub estimated_width: f32,
    pub estimated_height: f32,
    /// Weight factor in `[0.7, 1.5]`.
    pub font_weight: f32,
    pub has_ascenders: bool,
    pub has_descenders: bool,
}

// ============================================================================
// Analysis
// ============================================================================

/// Analyzes a wordmark, measuring it against the system fonts.
pub fn analyze_wordmark(
    text: &str,
    font: &FontDescriptor,
    base_size: Option<f32>,
) -> WordmarkAnalysisResult {
    analyze_wordmark_with(&SvgTextMeasurer::new(), text, font, base_size)
}

/// Analyzes a wordmark with an explicit measurer.
///
/// `base_size` defaults to [`DEFAULT_BASE_SIZE`].
pub fn analyze_wordmark_with(
    measurer: &impl TextMeasurer,
    text: &str,
    font: &FontDescriptor,
    base_size: Option<f32>,
) -> WordmarkAnalysisResult {
    let base_size = base_size
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(DEFAULT_BASE_SIZE);

    let estimated_width = measurer.measure_width(text, font, base_size).max(0.0);
    let estimated_height = base_size * LINE_HEIGHT;
    let character_count = text.chars().count();

    let lower = text.to_lowercase();
    let has_descenders = lower.chars().any(|c| DESCENDERS.contains(&c));
    let has_ascenders = lower.chars().any(|c| ASCENDERS.contains(&c));

    let font_weight = font.weight_factor();
    let length_factor = (character_count as f32 / 8.0).min(1.5);
    let width_factor = if character_count == 0 {
        0.0
    } else {
        (estimated_width / character_count as f32 / base_size).min(1.2)
    };

    let visual_weight = (font_weight * 0.5 + length_factor * 0.3 + width_factor * 0.2) / 2.0;

    let result = WordmarkAnalysisResult {
        visual_weight: visual_weight.clamp(0.0, 1.0),
        character_count,
        estimated_width,
        estimated_height,
        font_weight: font_weight.clamp(0.7, 1.5),
        has_ascenders,
        has_descenders,
    };
    debug!(
        visual_weight = result.visual_weight,
        characters = character_count,
        width = estimated_width,
        font_weight,
        "analyzed wordmark"
    );
    result
}

// ============================================================================
// Tests
// ============================================================================
