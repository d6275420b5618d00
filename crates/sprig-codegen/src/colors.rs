//! Colors and gradients used by a selection.

use crate::format::fmt_num;
use crate::generators::CodeGenerator;
use indexmap::IndexMap;
use serde::Serialize;
use sprig_core::{
    walk_forest, CodeArtifact, Color, ColorRef, Effect, Framework, GradientStop, IrNode, Language,
    PaintKind,
};

/// A linear gradient used by the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct UsedGradient {
    pub angle: f64,
    pub stops: Vec<GradientStop>,
}

/// Distinct solid colors and linear gradients, in first-use order.
#[derive(Debug, Clone, Default)]
pub struct UsedColors {
    pub solids: Vec<ColorRef>,
    pub gradients: Vec<UsedGradient>,
}

/// Collect used colors from fills, strokes, and shadows of every node.
pub fn collect_colors(forest: &[IrNode]) -> UsedColors {
    let mut solids: IndexMap<(u8, u8, u8, u8), ColorRef> = IndexMap::new();
    let mut gradients: IndexMap<String, UsedGradient> = IndexMap::new();

    walk_forest(forest, &mut |node| {
        let style = &node.style;
        for paint in style.fills.iter().chain(style.strokes.iter()) {
            match &paint.kind {
                PaintKind::Solid { color } => {
                    solids
                        .entry(color.color.to_rgba8())
                        .or_insert_with(|| color.clone());
                }
                PaintKind::LinearGradient { angle, stops } => {
                    gradients
                        .entry(css_linear_gradient(*angle, stops))
                        .or_insert_with(|| UsedGradient {
                            angle: *angle,
                            stops: stops.clone(),
                        });
                }
                PaintKind::Image { .. } => {}
            }
        }
        for effect in &style.effects {
            if let Effect::DropShadow(shadow) | Effect::InnerShadow(shadow) = effect {
                solids
                    .entry(shadow.color.color.to_rgba8())
                    .or_insert_with(|| shadow.color.clone());
            }
        }
    });

    UsedColors {
        solids: solids.into_values().collect(),
        gradients: gradients.into_values().collect(),
    }
}

/// CSS `linear-gradient()` of an angle and stops.
pub fn css_linear_gradient(angle: f64, stops: &[GradientStop]) -> String {
    let stops = stops
        .iter()
        .map(|s| format!("{} {}%", s.color.color.to_css(), fmt_num(s.position * 100.0)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("linear-gradient({}deg, {})", fmt_num(angle), stops)
}

/// A solid color with its names and contrast ratios.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidColorConversion {
    pub hex: String,
    /// Palette name, or the hex when no entry is close enough
    pub color_name: String,
    /// The color as the selected target writes it
    pub export_value: String,
    pub contrast_white: f64,
    pub contrast_black: f64,
    pub meta: Option<String>,
}

/// A linear gradient as CSS and as the selected target writes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearGradientConversion {
    pub css_preview: String,
    pub export_value: String,
}

/// Convert used solid colors for display.
pub fn solid_conversions(
    colors: &UsedColors,
    generator: &dyn CodeGenerator,
) -> Vec<SolidColorConversion> {
    colors
        .solids
        .iter()
        .map(|c| {
            let hex = c.color.to_hex_alpha();
            SolidColorConversion {
                color_name: c
                    .palette
                    .as_ref()
                    .map_or_else(|| hex.clone(), |p| p.name.clone()),
                meta: palette_meta(c),
                export_value: generator.color_value(c),
                contrast_white: round2(c.color.contrast_ratio(&Color::WHITE)),
                contrast_black: round2(c.color.contrast_ratio(&Color::BLACK)),
                hex,
            }
        })
        .collect()
}

/// Convert used gradients for display.
pub fn gradient_conversions(
    colors: &UsedColors,
    generator: &dyn CodeGenerator,
) -> Vec<LinearGradientConversion> {
    colors
        .gradients
        .iter()
        .map(|g| LinearGradientConversion {
            css_preview: css_linear_gradient(g.angle, &g.stops),
            export_value: generator.gradient_value(g.angle, &g.stops),
        })
        .collect()
}

/// The palette block: one `#hex;` line per used color, followed by
/// `// name` when the color has a palette name and `(meta)` when there is
/// metadata.
pub fn palette_artifact(colors: &UsedColors, framework: Framework) -> CodeArtifact {
    let body = colors
        .solids
        .iter()
        .map(|c| {
            let hex = c.color.to_hex_alpha();
            let mut line = format!("{};", hex);
            if let Some(palette) = &c.palette {
                if palette.name != hex {
                    line.push_str(&format!(" // {}", palette.name));
                }
            }
            if let Some(meta) = palette_meta(c) {
                line.push_str(&format!(" ({})", meta));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n");

    match framework {
        Framework::Tailwind => CodeArtifact::new("Tailwind Colors", body, Language::Javascript),
        _ => CodeArtifact::new("Colors", body, Language::Plaintext),
    }
}

fn palette_meta(color: &ColorRef) -> Option<String> {
    match &color.palette {
        Some(p) if !p.exact => Some("nearest match".to_string()),
        _ => None,
    }
}

fn round2(v: f32) -> f64 {
    (f64::from(v) * 100.0).round() / 100.0
}
