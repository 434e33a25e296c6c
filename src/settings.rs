//! Serializable layout settings derived from a balance result.
//!
//! [`DisplaySettings`] is the fragment of a logo's layout configuration that
//! the balance calculator owns. It serializes to camelCase JSON so the caller
//! can persist it next to the rest of the layout configuration:
//!
//! ```json
//! {
//!   "verticalLogoTextBalance": 50.0,
//!   "horizontalLogoTextGap": 40.0,
//!   "verticalLogoTextGap": 48.0
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use brand_balance::{DisplaySettings, balance_to_display_settings};
//! # use brand_balance::{BalanceResult, Reasoning};
//! # let balance = BalanceResult {
//! #     logo_scale: 1.0,
//! #     wordmark_scale: 1.0,
//! #     suggested_gap: 40.0,
//! #     confidence: 1.0,
//! #     reasoning: Reasoning::default(),
//! # };
//!
//! let settings = balance_to_display_settings(&balance);
//! let json = settings.to_json().unwrap();
//! let restored = DisplaySettings::from_json(&json).unwrap();
//! assert_eq!(settings, restored);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::BalanceResult;

/// Vertical gap relative to the horizontal one.
pub const VERTICAL_GAP_FACTOR: f32 = 1.2;

const BALANCE_RANGE: (f32, f32) = (10.0, 90.0);

// ============================================================================
// DisplaySettings
// ============================================================================

/// Layout values for a logo + wordmark lockup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    /// 50 sizes logo and wordmark equally; lower favours the logo, higher the text.
    /// Always within `[10, 90]`.
    pub vertical_logo_text_balance: f32,

    /// Gap between logo and wordmark when laid out side by side.
    pub horizontal_logo_text_gap: f32,

    /// Gap when stacked; always `1.2 ×` the horizontal gap.
    pub vertical_logo_text_gap: f32,
}

impl DisplaySettings {
    /// Serializes the settings to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the settings to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Writes these settings into an existing layout configuration object.
    ///
    /// Unrelated keys are preserved. A non-object `config` is replaced by an
    /// object holding just these settings.
    pub fn merge_into(&self, config: &mut Value) -> Result<(), serde_json::Error> {
        let Value::Object(fields) = serde_json::to_value(self)? else {
            return Ok(());
        };
        match config {
            Value::Object(existing) => existing.extend(fields),
            other => *other = Value::Object(fields),
        }
        Ok(())
    }
}

// ============================================================================
// Mapping
// ============================================================================

/// Maps a balance result onto the `[10, 90]` layout slider and gap values.
///
/// The slider moves by 50 per doubling of `wordmark_scale / logo_scale`.
pub fn balance_to_display_settings(balance: &BalanceResult) -> DisplaySettings {
    let ratio = balance.wordmark_scale / balance.logo_scale;
    let value = 50.0 * (1.0 + ratio.log2());
    let vertical_logo_text_balance = if value.is_nan() {
        50.0
    } else {
        value.clamp(BALANCE_RANGE.0, BALANCE_RANGE.1)
    };

    DisplaySettings {
        vertical_logo_text_balance,
        horizontal_logo_text_gap: balance.suggested_gap,
        vertical_logo_text_gap: balance.suggested_gap * VERTICAL_GAP_FACTOR,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Reasoning;

    fn balance(logo_scale: f32, wordmark_scale: f32, gap: f32) -> BalanceResult {
        BalanceResult {
            logo_scale,
            wordmark_scale,
            suggested_gap: gap,
            confidence: 0.8,
            reasoning: Reasoning::default(),
        }
    }

    #[test]
    fn equal_scales_center_the_slider() {
        let settings = balance_to_display_settings(&balance(1.3, 1.3, 40.0));
        assert!((settings.vertical_logo_text_balance - 50.0).abs() < 1e-4);
    }

    #[test]
    fn larger_wordmark_moves_slider_up() {
        let mut previous = 0.0;
        for ws in [0.5, 0.8, 1.0, 1.2, 1.5] {
            let value = balance_to_display_settings(&balance(1.0, ws, 40.0)).vertical_logo_text_balance;
            assert!(value > previous, "{ws} -> {value}");
            previous = value;
        }
        // 1.2 / 1.0 -> 50 * (1 + log2 1.2)
        let value = balance_to_display_settings(&balance(1.0, 1.2, 40.0)).vertical_logo_text_balance;
        assert!((value - 63.15172).abs() < 1e-3);
    }

    #[test]
    fn slider_is_clamped() {
        let low = balance_to_display_settings(&balance(2.0, 0.5, 40.0));
        assert_eq!(low.vertical_logo_text_balance, 10.0);

        let high = balance_to_display_settings(&balance(0.5, 2.0, 40.0));
        assert_eq!(high.vertical_logo_text_balance, 90.0);
    }

    #[test]
    fn vertical_gap_is_scaled_horizontal_gap() {
        let settings = balance_to_display_settings(&balance(1.0, 1.0, 35.0));
        assert_eq!(settings.horizontal_logo_text_gap, 35.0);
        assert_eq!(settings.vertical_logo_text_gap, 35.0 * 1.2);
    }

    #[test]
    fn json_uses_camel_case() {
        let settings = balance_to_display_settings(&balance(1.0, 1.0, 40.0));
        let json = settings.to_json_pretty().unwrap();
        assert!(json.contains("\"verticalLogoTextBalance\""));
        assert!(json.contains("\"horizontalLogoTextGap\""));
        assert!(json.contains("\"verticalLogoTextGap\""));
    }

    #[test]
    fn merge_preserves_unrelated_keys() {
        let settings = balance_to_display_settings(&balance(1.0, 1.0, 40.0));
        let mut config = serde_json::json!({
            "showTagline": true,
            "verticalLogoTextBalance": 12.0
        });
        settings.merge_into(&mut config).unwrap();

        assert_eq!(config["showTagline"], true);
        assert_eq!(config["verticalLogoTextBalance"], 50.0);
        assert_eq!(config["horizontalLogoTextGap"], 40.0);

        let mut not_an_object = Value::Null;
        settings.merge_into(&mut not_an_object).unwrap();
        assert!(not_an_object.is_object());
    }
}
