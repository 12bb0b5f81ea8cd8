//! Colorspace math: sRGB → HSL and sRGB → OKLCH.
//!
//! # OKLCH pipeline
//!
//! ```text
//! sRGB (gamma encoded, 0–1)
//!   │  piecewise sRGB curve
//!   ▼
//! linear RGB
//!   │  standard D65 matrix
//!   ▼
//! CIE XYZ
//!   │  M1 → cube root → M2
//!   ▼
//! OKLab (L, a, b)
//!   │  C = hypot(a, b), H = atan2(b, a)
//!   ▼
//! OKLCH
//! ```
//!
//! OKLab is a perceptually uniform space: equal numeric steps look like
//! equal color differences, which is why design tools increasingly prefer
//! `oklch()` for palette work.

use super::{rgba_string, Rgba};
use crate::util::format_decimal;

// ─── HSL ────────────────────────────────────────────────────────────────────

/// Hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Standard min/max-channel HSL derivation.
///
/// Achromatic input (all channels equal) yields hue 0 and saturation 0.
pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> Hsl {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl { h: h * 60.0, s, l }
}

// ─── OKLCH ──────────────────────────────────────────────────────────────────

/// OKLCH color: lightness `[0, 1]`, chroma (unbounded, ~0.4 max for sRGB),
/// hue in degrees `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Oklch {
    fn is_finite(&self) -> bool {
        self.l.is_finite() && self.c.is_finite() && self.h.is_finite()
    }
}

/// Convert an sRGB component (0.0–1.0) to linear light.
fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Converts gamma-encoded sRGB channels to OKLCH.
pub fn rgb_to_oklch(r: f64, g: f64, b: f64) -> Oklch {
    let r = srgb_to_linear(r);
    let g = srgb_to_linear(g);
    let b = srgb_to_linear(b);

    // linear sRGB → XYZ (D65)
    let x = 0.4124564 * r + 0.3575761 * g + 0.1804375 * b;
    let y = 0.2126729 * r + 0.7151522 * g + 0.0721750 * b;
    let z = 0.0193339 * r + 0.1191920 * g + 0.9503041 * b;

    // XYZ → LMS (M1)
    let l = 0.8189330101 * x + 0.3618667424 * y - 0.1288597137 * z;
    let m = 0.0329845436 * x + 0.9293118715 * y + 0.0361456387 * z;
    let s = 0.0482003018 * x + 0.2643662691 * y + 0.6338517070 * z;

    let (l, m, s) = (l.cbrt(), m.cbrt(), s.cbrt());

    // LMS' → OKLab (M2)
    let lightness = 0.2104542553 * l + 0.7936177850 * m - 0.0040720468 * s;
    let a = 1.9779984951 * l - 2.4285922050 * m + 0.4505937099 * s;
    let bb = 0.0259040371 * l + 0.7827717662 * m - 0.8086757660 * s;

    let mut hue = bb.atan2(a).to_degrees();
    if hue < 0.0 {
        hue += 360.0;
    }

    Oklch {
        l: lightness,
        c: a.hypot(bb),
        h: hue,
    }
}

/// Renders RGBA channels as CSS `oklch(L% C H)` or `oklch(L% C H / A)`.
///
/// `L` is a percentage with 2 decimals, `C` has 4 decimals and `H` 2.
/// If the math produces a non-finite component the color falls back to
/// `rgba(...)`.
pub fn rgba_to_oklch(r: f64, g: f64, b: f64, a: f64) -> String {
    let oklch = rgb_to_oklch(r, g, b);
    if !oklch.is_finite() {
        return rgba_string(&Rgba::new(r, g, b, a));
    }

    let body = format!("{:.2}% {:.4} {:.2}", oklch.l * 100.0, oklch.c, oklch.h);
    let alpha = format_decimal(a, 3);
    if a < 1.0 && alpha != "1" {
        format!("oklch({} / {})", body, alpha)
    } else {
        format!("oklch({})", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_oklch(s: &str) -> (f64, f64, f64) {
        let inner = s
            .trim_start_matches("oklch(")
            .trim_end_matches(')')
            .split(" / ")
            .next()
            .unwrap()
            .to_string();
        let parts: Vec<&str> = inner.split_whitespace().collect();
        (
            parts[0].trim_end_matches('%').parse().unwrap(),
            parts[1].parse().unwrap(),
            parts[2].parse().unwrap(),
        )
    }

    // =====================================================================
    // HSL
    // =====================================================================

    #[test]
    fn hsl_primaries() {
        let red = rgb_to_hsl(1.0, 0.0, 0.0);
        assert_eq!((red.h, red.s, red.l), (0.0, 1.0, 0.5));

        let green = rgb_to_hsl(0.0, 1.0, 0.0);
        assert_eq!((green.h, green.s, green.l), (120.0, 1.0, 0.5));

        let blue = rgb_to_hsl(0.0, 0.0, 1.0);
        assert_eq!((blue.h, blue.s, blue.l), (240.0, 1.0, 0.5));
    }

    #[test]
    fn hsl_achromatic() {
        let gray = rgb_to_hsl(0.4, 0.4, 0.4);
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        assert!((gray.l - 0.4).abs() < 1e-9);
    }

    #[test]
    fn hsl_magenta_wraps_hue() {
        // max is red and g < b, so the hue wraps into the 300° range
        let magenta = rgb_to_hsl(1.0, 0.0, 1.0);
        assert!((magenta.h - 300.0).abs() < 1e-9);
    }

    // =====================================================================
    // OKLCH
    // =====================================================================

    #[test]
    fn oklch_black() {
        let o = rgb_to_oklch(0.0, 0.0, 0.0);
        assert!(o.l.abs() < 1e-6);
        assert!(o.c.abs() < 1e-6);
    }

    #[test]
    fn oklch_white_is_full_lightness() {
        let o = rgb_to_oklch(1.0, 1.0, 1.0);
        assert!((o.l - 1.0).abs() < 1e-3, "white L should be ~1, got {}", o.l);
        assert!(o.c < 1e-3, "white should be achromatic, got C={}", o.c);
    }

    #[test]
    fn oklch_red_reference_values() {
        // Reference: oklch(62.8% 0.2577 29.23)
        let (l, c, h) = parse_oklch(&rgba_to_oklch(1.0, 0.0, 0.0, 1.0));
        assert!((l - 62.8).abs() < 0.2, "L = {}", l);
        assert!((c - 0.2577).abs() < 0.002, "C = {}", c);
        assert!((h - 29.23).abs() < 0.5, "H = {}", h);
    }

    #[test]
    fn oklch_blue_reference_values() {
        // Reference: oklch(45.2% 0.3132 264.05)
        let (l, c, h) = parse_oklch(&rgba_to_oklch(0.0, 0.0, 1.0, 1.0));
        assert!((l - 45.2).abs() < 0.2, "L = {}", l);
        assert!((c - 0.3132).abs() < 0.002, "C = {}", c);
        assert!((h - 264.05).abs() < 0.5, "H = {}", h);
    }

    #[test]
    fn oklch_hue_is_normalized() {
        for (r, g, b) in [(0.2, 0.1, 0.9), (0.9, 0.1, 0.5), (0.1, 0.8, 0.3)] {
            let o = rgb_to_oklch(r, g, b);
            assert!((0.0..360.0).contains(&o.h), "hue out of range: {}", o.h);
        }
    }

    #[test]
    fn oklch_formatting_precision() {
        let out = rgba_to_oklch(0.2, 0.4, 0.6, 1.0);
        assert!(out.starts_with("oklch("));
        assert!(!out.contains('/'));
        let inner = out.trim_start_matches("oklch(").trim_end_matches(')');
        let parts: Vec<&str> = inner.split(' ').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].split('.').nth(1).unwrap().len(), 3); // "xx.xx%"
        assert_eq!(parts[1].split('.').nth(1).unwrap().len(), 4);
        assert_eq!(parts[2].split('.').nth(1).unwrap().len(), 2);
    }

    #[test]
    fn oklch_with_alpha() {
        let out = rgba_to_oklch(1.0, 0.0, 0.0, 0.5);
        assert!(out.ends_with(" / 0.5)"), "got {}", out);
    }

    #[test]
    fn oklch_alpha_rounding_to_one_is_opaque() {
        let out = rgba_to_oklch(1.0, 0.0, 0.0, 0.9996);
        assert!(!out.contains('/'), "got {}", out);
        assert_eq!(out, rgba_to_oklch(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn oklch_non_finite_falls_back_to_rgba() {
        let out = rgba_to_oklch(f64::NAN, 0.0, 0.0, 1.0);
        assert!(out.starts_with("rgba("), "got {}", out);
    }
}
