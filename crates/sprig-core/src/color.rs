//! Canonical color value.
//!
//! Every paint, stop, and shadow carries a [`Color`] with channels
//! normalized to `0.0..=1.0`. Target formats (hex, `rgba()`, `Color(0x..)`,
//! palette names) are derived from it at emission time, so two colors
//! compare equal exactly when their channels do.

use serde::{Deserialize, Serialize};

/// An RGBA color with normalized channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

/// LAB color space for perceptual color comparison.
#[derive(Debug, Clone, Copy)]
pub struct LabColor {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from 8-bit RGB values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Create from hex string (e.g., "#FF5733", "FF5733" or "#FF573380").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?)),
            8 => {
                let mut color = Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?);
                color.a = channel(6)? as f32 / 255.0;
                Some(color)
            }
            _ => None,
        }
    }

    /// Convert to a rounded 8-bit RGBA tuple.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b), q(self.a))
    }

    /// Lowercase `#rrggbb` of the color channels, ignoring alpha.
    pub fn to_hex(&self) -> String {
        let (r, g, b, _) = self.to_rgba8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Lowercase hex including the alpha byte when not fully opaque.
    pub fn to_hex_alpha(&self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        if a == 255 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }

    /// CSS color: hex when opaque, `rgba()` otherwise.
    pub fn to_css(&self) -> String {
        let (r, g, b, _) = self.to_rgba8();
        if self.is_opaque() {
            self.to_hex()
        } else {
            format!("rgba({}, {}, {}, {})", r, g, b, round2(self.a))
        }
    }

    /// Whether alpha rounds to fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.to_rgba8().3 == 255
    }

    /// Multiply alpha by a paint or layer opacity.
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            a: (self.a * opacity).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Convert to LAB color space for perceptual comparisons.
    pub fn to_lab(&self) -> LabColor {
        let (x, y, z) = self.to_xyz();

        // Reference white point (D65)
        let fx = lab_f(x / 95.047);
        let fy = lab_f(y / 100.0);
        let fz = lab_f(z / 108.883);

        LabColor {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    fn to_xyz(&self) -> (f32, f32, f32) {
        let r = srgb_to_linear(self.r.clamp(0.0, 1.0));
        let g = srgb_to_linear(self.g.clamp(0.0, 1.0));
        let b = srgb_to_linear(self.b.clamp(0.0, 1.0));

        // Linear RGB to XYZ (sRGB primaries, D65 white point)
        let x = r * 0.4124564 + g * 0.3575761 + b * 0.1804375;
        let y = r * 0.2126729 + g * 0.7151522 + b * 0.0721750;
        let z = r * 0.0193339 + g * 0.1191920 + b * 0.9503041;

        (x * 100.0, y * 100.0, z * 100.0)
    }

    /// Perceptual distance to another color using Delta E (CIE76).
    ///
    /// Alpha is not part of the distance.
    pub fn delta_e(&self, other: &Color) -> f32 {
        self.to_lab().distance(&other.to_lab())
    }

    /// WCAG relative luminance.
    pub fn relative_luminance(&self) -> f32 {
        let r = srgb_to_linear(self.r.clamp(0.0, 1.0));
        let g = srgb_to_linear(self.g.clamp(0.0, 1.0));
        let b = srgb_to_linear(self.b.clamp(0.0, 1.0));
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// WCAG contrast ratio against another color (1.0 to 21.0).
    pub fn contrast_ratio(&self, other: &Color) -> f32 {
        let l1 = self.relative_luminance();
        let l2 = other.relative_luminance();
        let (hi, lo) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
        (hi + 0.05) / (lo + 0.05)
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl LabColor {
    /// Calculate Delta E distance (CIE76).
    pub fn distance(&self, other: &LabColor) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

fn lab_f(t: f32) -> f32 {
    let delta: f32 = 6.0 / 29.0;
    if t > delta.powi(3) {
        t.powf(1.0 / 3.0)
    } else {
        t / (3.0 * delta * delta) + 4.0 / 29.0
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}
