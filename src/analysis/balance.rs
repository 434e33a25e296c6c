//! Turns logo and wordmark visual weights into layout scale factors.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{LogoAnalysisResult, Orientation, WordmarkAnalysisResult};

/// Weight ratio (logo / wordmark) above which the logo counts as heavier.
const LOGO_HEAVIER_RATIO: f32 = 1.3;
/// Weight ratio below which the wordmark counts as heavier.
const TEXT_HEAVIER_RATIO: f32 = 0.7;

/// Floor applied to weights before dividing, so empty inputs stay finite.
const MIN_WEIGHT: f32 = 0.001;

const SCALE_RANGE: (f32, f32) = (0.5, 2.0);
const GAP_RANGE: (f32, f32) = (20.0, 80.0);
const CONFIDENCE_RANGE: (f32, f32) = (0.4, 1.0);

const LONG_WORDMARK: usize = 15;
const SHORT_WORDMARK: usize = 5;

// ============================================================================
// Reasoning
// ============================================================================

/// Which rule produced a reasoning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum ReasoningKind {
    LogoHeavier,
    TextHeavier,
    Balanced,
    HorizontalLogo,
    VerticalLogo,
    LongWordmark,
    ShortWordmark,
}

/// One human-readable explanation fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ReasoningStep {
    pub kind: ReasoningKind,
    pub text: String,
}

/// Ordered trace of the rules applied by [`calculate_balance`].
///
/// Steps are appended in a fixed order: primary weight comparison, logo
/// orientation, then wordmark length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(transparent)]
pub struct Reasoning {
    steps: Vec<ReasoningStep>,
}

impl Reasoning {
    fn push(&mut self, kind: ReasoningKind, text: impl Into<String>) {
        self.steps.push(ReasoningStep {
            kind,
            text: text.into(),
        });
    }

    pub fn steps(&self) -> &[ReasoningStep] {
        &self.steps
    }

    pub fn kinds(&self) -> impl Iterator<Item = ReasoningKind> + '_ {
        self.steps.iter().map(|s| s.kind)
    }

    pub fn contains(&self, kind: ReasoningKind) -> bool {
        self.kinds().any(|k| k == kind)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All fragments joined into a single sentence sequence.
    pub fn joined(&self) -> String {
        self.steps
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(". ")
    }
}

// ============================================================================
// BalanceResult
// ============================================================================

/// Suggested relative sizing of a logo and its wordmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct BalanceResult {
    /// Logo scale factor in `[0.5, 2.0]`.
    pub logo_scale: f32,
    /// Wordmark scale factor in `[0.5, 2.0]`.
    pub wordmark_scale: f32,
    /// Gap between logo and wordmark in `[20, 80]` layout units.
    pub suggested_gap: f32,
    /// How much to trust the suggestion, in `[0.4, 1.0]`.
    pub confidence: f32,
    pub reasoning: Reasoning,
}

// ============================================================================
// Calculation
// ============================================================================

/// Derives scale factors, gap and confidence from the two analyses.
pub fn calculate_balance(
    logo: &LogoAnalysisResult,
    wordmark: &WordmarkAnalysisResult,
) -> BalanceResult {
    let logo_weight = logo.visual_weight;
    let wordmark_weight = wordmark.visual_weight;
    let lw = logo_weight.max(MIN_WEIGHT);
    let ww = wordmark_weight.max(MIN_WEIGHT);
    let ratio = lw / ww;

    let mut reasoning = Reasoning::default();

    let (mut logo_scale, mut wordmark_scale) = if ratio > LOGO_HEAVIER_RATIO {
        reasoning.push(
            ReasoningKind::LogoHeavier,
            format!(
                "Logo is visually heavier than the wordmark ({ratio:.2}x); shrinking the logo and enlarging the text"
            ),
        );
        ((1.0 / ratio.sqrt()).max(0.6), (ratio * 0.8).sqrt().min(1.4))
    } else if ratio < TEXT_HEAVIER_RATIO {
        reasoning.push(
            ReasoningKind::TextHeavier,
            format!(
                "Wordmark is visually heavier than the logo ({:.2}x); enlarging the logo and shrinking the text",
                1.0 / ratio
            ),
        );
        ((1.0 / ratio).sqrt().min(1.6), ratio.sqrt().max(0.7))
    } else {
        reasoning.push(
            ReasoningKind::Balanced,
            format!("Logo and wordmark are already balanced (ratio {ratio:.2}); applying minor adjustments"),
        );
        (1.0 + (1.0 - ratio) * 0.3, 1.0 - (1.0 - ratio) * 0.2)
    };

    match logo.orientation {
        Orientation::Horizontal => {
            logo_scale *= 0.9;
            reasoning.push(
                ReasoningKind::HorizontalLogo,
                "Wide logo already reads large; reducing its scale slightly",
            );
        }
        Orientation::Vertical => {
            logo_scale *= 1.1;
            reasoning.push(
                ReasoningKind::VerticalLogo,
                "Tall, narrow logo reads small; increasing its scale slightly",
            );
        }
        Orientation::Square => {}
    }

    if wordmark.character_count > LONG_WORDMARK {
        wordmark_scale *= 0.85;
        reasoning.push(
            ReasoningKind::LongWordmark,
            format!(
                "Long wordmark ({} characters); reducing text scale",
                wordmark.character_count
            ),
        );
    } else if wordmark.character_count < SHORT_WORDMARK {
        wordmark_scale *= 1.15;
        reasoning.push(
            ReasoningKind::ShortWordmark,
            format!(
                "Short wordmark ({} characters); increasing text scale",
                wordmark.character_count
            ),
        );
    }

    let suggested_gap = (40.0 * (logo_weight + wordmark_weight)).clamp(GAP_RANGE.0, GAP_RANGE.1);

    let weight_balance = lw.min(ww) / lw.max(ww);
    let extremity_factor = 1.0 - (0.5 - (logo_weight + wordmark_weight) / 2.0).abs();
    let confidence = (0.6 * weight_balance + 0.4 * extremity_factor)
        .clamp(CONFIDENCE_RANGE.0, CONFIDENCE_RANGE.1);

    let result = BalanceResult {
        logo_scale: logo_scale.clamp(SCALE_RANGE.0, SCALE_RANGE.1),
        wordmark_scale: wordmark_scale.clamp(SCALE_RANGE.0, SCALE_RANGE.1),
        suggested_gap,
        confidence,
        reasoning,
    };
    debug!(
        ratio,
        logo_scale = result.logo_scale,
        wordmark_scale = result.wordmark_scale,
        gap = result.suggested_gap,
        confidence = result.confidence,
        "calculated balance"
    );
    result
}

// ============================================================================
// Tests
// ============================================================================
