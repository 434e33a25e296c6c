//! Hex, RGB and HSL colour conversions.
//!
//! Every helper here is total: malformed hex input never produces an error.
//! Instead each function documents the fallback it uses, because these values
//! only drive cosmetic parameters (logo tint, text colour, light/dark styling).
//!
//! HSL components are normalized to `[0, 1]` (hue included), RGB channels are
//! `0..=255`.

use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

/// Default lightness step used by [`darken_color`] and [`lighten_color`] callers.
pub const DEFAULT_LIGHTNESS_STEP: f32 = 0.2;

/// Normalized luminance above which a colour counts as "light".
///
/// Deliberately high: only very bright colours get the dark-logo treatment.
pub const LIGHT_LUMINANCE_THRESHOLD: f32 = 0.75;

// ============================================================================
// Colour Types
// ============================================================================

/// An 8-bit sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Weighted luma in `0.0..=255.0`.
    pub fn luminance(&self) -> f32 {
        luminance(self.r, self.g, self.b)
    }
}

/// An HSL colour with every component in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct HslColor {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl HslColor {
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }
}

/// Rec. 601 luma of an RGB triple, in `0.0..=255.0`.
///
/// Shared by the logo analyzer, the sticker compositor and [`is_light_color`].
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

// ============================================================================
// Conversions
// ============================================================================

/// Parses a 6-digit hex colour, with or without a leading `#`.
///
/// Case-insensitive. Any other shape (3-digit shorthand, alpha suffix,
/// stray characters) yields `None`.
pub fn hex_to_rgb(hex: &str) -> Option<RgbColor> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(RgbColor::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Formats a colour as `#rrggbb` (lowercase, zero padded).
pub fn rgb_to_hex(rgb: RgbColor) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Converts RGB to normalized HSL.
pub fn rgb_to_hsl(rgb: RgbColor) -> HslColor {
    let srgb = Srgb::new(
        rgb.r as f32 / 255.0,
        rgb.g as f32 / 255.0,
        rgb.b as f32 / 255.0,
    );
    let hsl: Hsl = srgb.into_color();
    HslColor::new(
        (hsl.hue.into_positive_degrees() / 360.0).rem_euclid(1.0),
        hsl.saturation.clamp(0.0, 1.0),
        hsl.lightness.clamp(0.0, 1.0),
    )
}

/// Converts normalized HSL back to RGB, rounding each channel.
pub fn hsl_to_rgb(hsl: HslColor) -> RgbColor {
    let color: Hsl = Hsl::new(hsl.h * 360.0, hsl.s, hsl.l);
    let rgb: Srgb = color.into_color();
    RgbColor::new(
        to_channel(rgb.red),
        to_channel(rgb.green),
        to_channel(rgb.blue),
    )
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ============================================================================
// Adjustments
// ============================================================================

/// Rotates the hue of a hex colour by `degrees`.
///
/// Negative angles wrap around; 0° and 360° are the identity. Invalid input
/// is returned unchanged.
pub fn shift_hue(hex: &str, degrees: f32) -> String {
    let Some(rgb) = hex_to_rgb(hex) else {
        return hex.to_string();
    };
    rgb_to_hex(shift_rgb_hue(rgb, degrees))
}

/// Hue rotation on an already-parsed colour.
///
/// A non-finite angle leaves the colour unchanged.
pub(crate) fn shift_rgb_hue(rgb: RgbColor, degrees: f32) -> RgbColor {
    if !degrees.is_finite() {
        return rgb;
    }
    let mut hsl = rgb_to_hsl(rgb);
    hsl.h = (hsl.h + (degrees / 360.0).rem_euclid(1.0)).rem_euclid(1.0);
    hsl_to_rgb(hsl)
}

/// Darkens a hex colour by reducing its HSL lightness by `amount`.
///
/// Lightness is clamped at 0. Invalid input is returned unchanged.
pub fn darken_color(hex: &str, amount: f32) -> String {
    adjust_lightness(hex, -amount)
}

/// Lightens a hex colour by raising its HSL lightness by `amount`.
///
/// Lightness is clamped at 1. Invalid input is returned unchanged.
pub fn lighten_color(hex: &str, amount: f32) -> String {
    adjust_lightness(hex, amount)
}

fn adjust_lightness(hex: &str, delta: f32) -> String {
    let Some(rgb) = hex_to_rgb(hex) else {
        return hex.to_string();
    };
    let mut hsl = rgb_to_hsl(rgb);
    hsl.l = (hsl.l + delta).clamp(0.0, 1.0);
    rgb_to_hex(hsl_to_rgb(hsl))
}

/// Returns true for very bright colours (normalized luminance above 0.75).
///
/// Unparseable input counts as light.
pub fn is_light_color(hex: &str) -> bool {
    match hex_to_rgb(hex) {
        Some(rgb) => rgb.luminance() / 255.0 > LIGHT_LUMINANCE_THRESHOLD,
        None => true,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_accepts_six_digits_only() {
        assert_eq!(hex_to_rgb("#ff8000"), Some(RgbColor::new(255, 128, 0)));
        assert_eq!(hex_to_rgb("FF8000"), Some(RgbColor::new(255, 128, 0)));
        assert_eq!(hex_to_rgb("#AbCdEf"), Some(RgbColor::new(0xab, 0xcd, 0xef)));

        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("##ff8000"), None);
        assert_eq!(hex_to_rgb("#ff800"), None);
        assert_eq!(hex_to_rgb("#ff80000"), None);
        assert_eq!(hex_to_rgb("#gg0000"), None);
        assert_eq!(hex_to_rgb(""), None);
    }

    #[test]
    fn hex_roundtrip_is_exact_for_lowercase_input() {
        for hex in ["#000000", "#ffffff", "#0a0b0c", "#123456", "#fedcba", "#7f7f7f"] {
            let rgb = hex_to_rgb(hex).unwrap();
            assert_eq!(rgb_to_hex(rgb), hex);
        }
    }

    #[test]
    fn hsl_roundtrip_within_one_step() {
        for r in (0..=255u16).step_by(17) {
            for g in (0..=255u16).step_by(15) {
                for b in (0..=255u16).step_by(51) {
                    let rgb = RgbColor::new(r as u8, g as u8, b as u8);
                    let back = hsl_to_rgb(rgb_to_hsl(rgb));
                    assert!((back.r as i16 - rgb.r as i16).abs() <= 1, "{rgb:?} -> {back:?}");
                    assert!((back.g as i16 - rgb.g as i16).abs() <= 1, "{rgb:?} -> {back:?}");
                    assert!((back.b as i16 - rgb.b as i16).abs() <= 1, "{rgb:?} -> {back:?}");
                }
            }
        }
    }

    #[test]
    fn hsl_components_are_normalized() {
        let hsl = rgb_to_hsl(RgbColor::new(0, 0, 255));
        assert!((hsl.h - 2.0 / 3.0).abs() < 1e-4);
        assert!((hsl.s - 1.0).abs() < 1e-4);
        assert!((hsl.l - 0.5).abs() < 1e-4);

        let gray = rgb_to_hsl(RgbColor::new(128, 128, 128));
        assert!(gray.s.abs() < 1e-6);
    }

    #[test]
    fn shift_hue_identity_angles() {
        for hex in ["#ff0000", "#3366cc", "#a1b2c3", "#000000", "#ffffff"] {
            assert_eq!(shift_hue(hex, 0.0), hex);
            assert_eq!(shift_hue(hex, 360.0), hex);
        }
    }

    #[test]
    fn shift_hue_rotates_and_wraps() {
        assert_eq!(shift_hue("#ff0000", 120.0), "#00ff00");
        assert_eq!(shift_hue("#ff0000", 240.0), "#0000ff");
        assert_eq!(shift_hue("#ff0000", -120.0), "#0000ff");
        assert_eq!(shift_hue("#ff0000", 480.0), "#00ff00");
    }

    #[test]
    fn shift_hue_ignores_non_finite_angles() {
        assert_eq!(shift_hue("#ff0000", f32::NAN), "#ff0000");
        assert_eq!(shift_hue("#3366cc", f32::INFINITY), "#3366cc");
        assert_eq!(shift_hue("#3366cc", f32::NEG_INFINITY), "#3366cc");
    }

    #[test]
    fn shift_hue_passes_invalid_input_through() {
        assert_eq!(shift_hue("not-a-color", 90.0), "not-a-color");
        assert_eq!(shift_hue("#abc", 90.0), "#abc");
    }

    #[test]
    fn lightness_adjustments_clamp() {
        assert_eq!(darken_color("#000000", DEFAULT_LIGHTNESS_STEP), "#000000");
        assert_eq!(lighten_color("#ffffff", DEFAULT_LIGHTNESS_STEP), "#ffffff");
        assert_eq!(lighten_color("#000000", 1.0), "#ffffff");
        assert_eq!(darken_color("#ffffff", 1.0), "#000000");

        // 50% gray: l = 0.502 -> 0.302
        let darker = hex_to_rgb(&darken_color("#808080", 0.2)).unwrap();
        assert!((darker.r as i16 - 77).abs() <= 1);

        assert_eq!(darken_color("oops", 0.2), "oops");
        assert_eq!(lighten_color("oops", 0.2), "oops");
    }

    #[test]
    fn light_color_classification() {
        assert!(is_light_color("#ffffff"));
        assert!(!is_light_color("#000000"));
        assert!(is_light_color("#ffff00"));
        assert!(!is_light_color("#808080"));
        assert!(!is_light_color("#ff0000"));
        assert!(is_light_color("invalid"));
    }
}
