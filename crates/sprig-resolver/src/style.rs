//! Style resolver.
//!
//! Normalizes native paints, effects, and typography into a
//! [`StyleDescriptor`]. Anything without an IR equivalent is dropped with a
//! warning.

use glam::DVec2;
use smallvec::SmallVec;
use sprig_core::{
    BlendMode, Color, ColorRef, CornerRadius, Diagnostics, Effect, GradientStop, IrKind, NodeId,
    Paint, PaintKind, ScaleMode, SceneBlendMode, SceneEffect, SceneEffectType, SceneLetterSpacingUnit,
    SceneLineHeightUnit, SceneNode, ScenePaint, ScenePaintType, SceneScaleMode, SceneStrokeAlign,
    SceneTextAlign, SceneTextAlignVertical, SceneTextCase, SceneTextDecoration, Settings, Shadow,
    Stroke, StrokeAlign, StyleDescriptor, TextAlign, TextAlignVertical, TextCase, TextDecoration,
    TextStyle, Typography,
};

use crate::palette::Palette;

/// Resolves [`StyleDescriptor`]s for scene nodes.
pub struct StyleResolver<'a> {
    settings: &'a Settings,
    palette: Palette,
}

impl<'a> StyleResolver<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            palette: Palette::for_framework(settings.framework),
        }
    }

    /// Resolve the style of a node.
    pub fn resolve(
        &self,
        node: &SceneNode,
        id: &NodeId,
        kind: IrKind,
        diag: &mut Diagnostics,
    ) -> StyleDescriptor {
        let size = DVec2::new(node.width, node.height);

        let fills = self.resolve_paints(&node.fills, size, id, diag);
        let strokes = if node.stroke_weight > 0.0 {
            self.resolve_paints(&node.strokes, size, id, diag)
        } else {
            SmallVec::new()
        };
        let stroke = (!strokes.is_empty()).then(|| Stroke {
            weight: node.stroke_weight,
            align: match node.stroke_align {
                SceneStrokeAlign::Center => StrokeAlign::Center,
                SceneStrokeAlign::Outside => StrokeAlign::Outside,
                SceneStrokeAlign::Inside | SceneStrokeAlign::Unknown => StrokeAlign::Inside,
            },
        });

        let effects = node
            .effects
            .iter()
            .filter(|e| e.visible)
            .filter_map(|e| self.resolve_effect(e, id, diag))
            .collect();

        let text = (kind == IrKind::Text).then(|| TextStyle {
            characters: node.characters.clone().unwrap_or_default(),
            typography: resolve_typography(node),
        });

        StyleDescriptor {
            fills,
            strokes,
            stroke,
            effects,
            corner_radius: resolve_corner_radius(node),
            opacity: node.opacity.clamp(0.0, 1.0),
            clips_content: node.clips_content,
            text,
        }
    }

    /// Attach the palette match of a color, if it is within tolerance.
    pub fn color_ref(&self, color: Color) -> ColorRef {
        ColorRef {
            color,
            palette: self
                .palette
                .nearest(&color, self.settings.effective_color_tolerance()),
        }
    }

    fn resolve_paints(
        &self,
        paints: &[ScenePaint],
        size: DVec2,
        id: &NodeId,
        diag: &mut Diagnostics,
    ) -> SmallVec<[Paint; 1]> {
        paints
            .iter()
            .filter(|p| p.visible && p.opacity > 0.0)
            .filter_map(|p| self.resolve_paint(p, size, id, diag))
            .collect()
    }

    fn resolve_paint(
        &self,
        paint: &ScenePaint,
        size: DVec2,
        id: &NodeId,
        diag: &mut Diagnostics,
    ) -> Option<Paint> {
        let opacity = paint.opacity.clamp(0.0, 1.0);
        let kind = match paint.paint_type {
            ScenePaintType::Solid => PaintKind::Solid {
                color: self.color_ref(paint.color.unwrap_or_default().with_opacity(opacity as f32)),
            },
            ScenePaintType::GradientLinear => {
                if paint.gradient_stops.is_empty() {
                    diag.warn(id, "linear gradient without stops omitted");
                    return None;
                }
                PaintKind::LinearGradient {
                    angle: gradient_angle(paint, size),
                    stops: paint
                        .gradient_stops
                        .iter()
                        .map(|s| GradientStop {
                            position: s.position.clamp(0.0, 1.0),
                            color: self.color_ref(s.color.with_opacity(opacity as f32)),
                        })
                        .collect(),
                }
            }
            ScenePaintType::Image => PaintKind::Image {
                image_ref: paint.image_hash.clone().unwrap_or_default(),
                scale_mode: match paint.scale_mode {
                    SceneScaleMode::Fit => ScaleMode::Fit,
                    SceneScaleMode::Crop => ScaleMode::Crop,
                    SceneScaleMode::Tile => ScaleMode::Tile,
                    SceneScaleMode::Fill | SceneScaleMode::Unknown => ScaleMode::Fill,
                },
            },
            ScenePaintType::GradientRadial => {
                diag.warn(id, "radial gradient is not supported and was omitted");
                return None;
            }
            ScenePaintType::GradientAngular => {
                diag.warn(id, "angular gradient is not supported and was omitted");
                return None;
            }
            ScenePaintType::GradientDiamond => {
                diag.warn(id, "diamond gradient is not supported and was omitted");
                return None;
            }
            ScenePaintType::Video => {
                diag.warn(id, "video fill is not supported and was omitted");
                return None;
            }
            ScenePaintType::Unknown => {
                diag.warn(id, "unknown paint type was omitted");
                return None;
            }
        };

        Some(Paint {
            kind,
            opacity,
            blend_mode: blend_mode(paint.blend_mode),
        })
    }

    fn resolve_effect(
        &self,
        effect: &SceneEffect,
        id: &NodeId,
        diag: &mut Diagnostics,
    ) -> Option<Effect> {
        let shadow = || Shadow {
            color: self.color_ref(effect.color.unwrap_or(Color::rgba(0.0, 0.0, 0.0, 0.25))),
            offset_x: effect.offset.x,
            offset_y: effect.offset.y,
            blur: effect.radius.max(0.0),
            spread: effect.spread,
        };
        match effect.effect_type {
            SceneEffectType::DropShadow => Some(Effect::DropShadow(shadow())),
            SceneEffectType::InnerShadow => Some(Effect::InnerShadow(shadow())),
            SceneEffectType::LayerBlur => Some(Effect::LayerBlur {
                radius: effect.radius.max(0.0),
            }),
            SceneEffectType::BackgroundBlur => Some(Effect::BackgroundBlur {
                radius: effect.radius.max(0.0),
            }),
            SceneEffectType::Noise => {
                diag.warn(id, "noise effect is not supported and was omitted");
                None
            }
            SceneEffectType::Texture => {
                diag.warn(id, "texture effect is not supported and was omitted");
                None
            }
            SceneEffectType::Unknown => {
                diag.warn(id, "unknown effect type was omitted");
                None
            }
        }
    }
}

/// CSS angle of a linear gradient from its handle positions.
///
/// Handles live in the node's unit square with y pointing down; they are
/// scaled to the node's size so the angle matches the rendered direction.
fn gradient_angle(paint: &ScenePaint, size: DVec2) -> f64 {
    let [start, end, ..] = paint.gradient_handle_positions.as_slice() else {
        return 180.0;
    };
    let scale = DVec2::new(
        if size.x > 0.0 { size.x } else { 1.0 },
        if size.y > 0.0 { size.y } else { 1.0 },
    );
    let direction = (DVec2::new(end.x, end.y) - DVec2::new(start.x, start.y)) * scale;
    if direction.length_squared() == 0.0 {
        return 180.0;
    }
    let degrees = direction.y.atan2(direction.x).to_degrees() + 90.0;
    let normalized = degrees.rem_euclid(360.0);
    (normalized * 100.0).round() / 100.0
}

fn resolve_corner_radius(node: &SceneNode) -> CornerRadius {
    if let Some(radii) = node.rectangle_corner_radii {
        let radii = radii.map(|r| r.max(0.0));
        if radii.iter().all(|r| *r == radii[0]) {
            if radii[0] > 0.0 {
                return CornerRadius::Uniform(radii[0]);
            }
        } else {
            return CornerRadius::PerCorner(radii);
        }
    }
    match node.corner_radius {
        Some(r) if r > 0.0 => CornerRadius::Uniform(r),
        _ => CornerRadius::None,
    }
}

fn blend_mode(mode: SceneBlendMode) -> BlendMode {
    match mode {
        SceneBlendMode::Multiply => BlendMode::Multiply,
        SceneBlendMode::Screen => BlendMode::Screen,
        SceneBlendMode::Overlay => BlendMode::Overlay,
        SceneBlendMode::Darken => BlendMode::Darken,
        SceneBlendMode::Lighten => BlendMode::Lighten,
        SceneBlendMode::ColorDodge => BlendMode::ColorDodge,
        SceneBlendMode::ColorBurn => BlendMode::ColorBurn,
        SceneBlendMode::HardLight => BlendMode::HardLight,
        SceneBlendMode::SoftLight => BlendMode::SoftLight,
        SceneBlendMode::Difference => BlendMode::Difference,
        SceneBlendMode::Exclusion => BlendMode::Exclusion,
        SceneBlendMode::Hue => BlendMode::Hue,
        SceneBlendMode::Saturation => BlendMode::Saturation,
        SceneBlendMode::Color => BlendMode::Color,
        SceneBlendMode::Luminosity => BlendMode::Luminosity,
        SceneBlendMode::Normal | SceneBlendMode::PassThrough | SceneBlendMode::Unknown => {
            BlendMode::Normal
        }
    }
}

fn resolve_typography(node: &SceneNode) -> Typography {
    let defaults = Typography::default();
    let (family, style) = match &node.font_name {
        Some(font) if !font.family.is_empty() => (font.family.clone(), font.style.as_str()),
        Some(font) => (defaults.family.clone(), font.style.as_str()),
        None => (defaults.family.clone(), ""),
    };
    let (style_weight, italic) = parse_font_style(style);
    let weight = node
        .font_weight
        .filter(|w| *w > 0.0)
        .map(|w| w.round().clamp(1.0, 1000.0) as u16)
        .unwrap_or(style_weight);
    let size = node.font_size.filter(|s| *s > 0.0).unwrap_or(defaults.size);

    let line_height = node.line_height.as_ref().and_then(|lh| match lh.unit {
        SceneLineHeightUnit::Pixels => Some(lh.value),
        SceneLineHeightUnit::Percent => Some(round2(size * lh.value / 100.0)),
        SceneLineHeightUnit::Auto | SceneLineHeightUnit::Unknown => None,
    });
    let letter_spacing = node.letter_spacing.as_ref().map_or(0.0, |ls| match ls.unit {
        SceneLetterSpacingUnit::Pixels => ls.value,
        SceneLetterSpacingUnit::Percent => round2(size * ls.value / 100.0),
        SceneLetterSpacingUnit::Unknown => 0.0,
    });

    Typography {
        family,
        weight,
        italic,
        size,
        line_height,
        letter_spacing,
        align_horizontal: match node.text_align_horizontal {
            SceneTextAlign::Center => TextAlign::Center,
            SceneTextAlign::Right => TextAlign::Right,
            SceneTextAlign::Justified => TextAlign::Justified,
            SceneTextAlign::Left | SceneTextAlign::Unknown => TextAlign::Left,
        },
        align_vertical: match node.text_align_vertical {
            SceneTextAlignVertical::Center => TextAlignVertical::Center,
            SceneTextAlignVertical::Bottom => TextAlignVertical::Bottom,
            SceneTextAlignVertical::Top | SceneTextAlignVertical::Unknown => TextAlignVertical::Top,
        },
        text_case: match node.text_case {
            SceneTextCase::Upper => TextCase::Upper,
            SceneTextCase::Lower => TextCase::Lower,
            SceneTextCase::Title => TextCase::Title,
            SceneTextCase::Original | SceneTextCase::Unknown => TextCase::Original,
        },
        decoration: match node.text_decoration {
            SceneTextDecoration::Underline => TextDecoration::Underline,
            SceneTextDecoration::Strikethrough => TextDecoration::Strikethrough,
            SceneTextDecoration::None | SceneTextDecoration::Unknown => TextDecoration::None,
        },
    }
}

/// Weight and italic flag from a font style name such as `"Semi Bold Italic"`.
fn parse_font_style(style: &str) -> (u16, bool) {
    let normalized: String = style
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    let italic = normalized.contains("italic") || normalized.contains("oblique");

    const WEIGHTS: &[(&str, u16)] = &[
        ("extralight", 200),
        ("ultralight", 200),
        ("semibold", 600),
        ("demibold", 600),
        ("extrabold", 800),
        ("ultrabold", 800),
        ("thin", 100),
        ("hairline", 100),
        ("light", 300),
        ("medium", 500),
        ("bold", 700),
        ("black", 900),
        ("heavy", 900),
    ];
    let weight = WEIGHTS
        .iter()
        .find(|(name, _)| normalized.contains(name))
        .map_or(400, |(_, w)| *w);
    (weight, italic)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_core::{FontName, SceneColorStop, SceneLineHeight, ScenePoint};

    fn resolve(node: &SceneNode, kind: IrKind) -> (StyleDescriptor, Diagnostics) {
        let settings = Settings::default();
        let resolver = StyleResolver::new(&settings);
        let mut diag = Diagnostics::new();
        let style = resolver.resolve(node, &NodeId::new(&node.id), kind, &mut diag);
        (style, diag)
    }

    #[test]
    fn test_paint_order_is_preserved() {
        let node = SceneNode::new("1", "FRAME")
            .with_fill(ScenePaint::solid(Color::WHITE))
            .with_fill(ScenePaint::solid(Color::from_hex("#3b82f6").unwrap()));
        let (style, _) = resolve(&node, IrKind::Container);
        assert_eq!(style.fills.len(), 2);
        let top = style.top_solid_fill().unwrap();
        assert_eq!(top.palette.as_ref().unwrap().name, "blue-500");
        assert_eq!(style.fills[0].solid_color().unwrap().color, Color::WHITE);
    }

    #[test]
    fn test_paint_opacity_folds_into_color() {
        let mut paint = ScenePaint::solid(Color::BLACK);
        paint.opacity = 0.5;
        let node = SceneNode::new("1", "FRAME").with_fill(paint);
        let (style, _) = resolve(&node, IrKind::Container);
        let color = style.fills[0].solid_color().unwrap().color;
        assert_eq!(color.to_css(), "rgba(0, 0, 0, 0.5)");
    }

    #[test]
    fn test_linear_gradient_angle() {
        let stops = vec![
            SceneColorStop { position: 0.0, color: Color::WHITE },
            SceneColorStop { position: 1.0, color: Color::BLACK },
        ];
        let down = ScenePaint::linear_gradient(ScenePoint::new(0.5, 0.0), ScenePoint::new(0.5, 1.0), stops.clone());
        let right = ScenePaint::linear_gradient(ScenePoint::new(0.0, 0.5), ScenePoint::new(1.0, 0.5), stops);
        let node = SceneNode::new("1", "FRAME")
            .with_bounds(0.0, 0.0, 100.0, 100.0)
            .with_fill(down)
            .with_fill(right);
        let (style, _) = resolve(&node, IrKind::Container);
        let angles: Vec<f64> = style
            .fills
            .iter()
            .filter_map(|p| match &p.kind {
                PaintKind::LinearGradient { angle, .. } => Some(*angle),
                _ => None,
            })
            .collect();
        assert_eq!(angles, vec![180.0, 90.0]);
    }

    #[test]
    fn test_unsupported_paints_warn() {
        let radial = ScenePaint {
            paint_type: ScenePaintType::GradientRadial,
            ..Default::default()
        };
        let node = SceneNode::new("7:1", "RECTANGLE").with_fill(radial);
        let (style, diag) = resolve(&node, IrKind::Container);
        assert!(style.fills.is_empty());
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].node_id.as_str(), "7:1");
    }

    #[test]
    fn test_hidden_paints_and_effects_skipped() {
        let mut hidden = ScenePaint::solid(Color::BLACK);
        hidden.visible = false;
        let mut node = SceneNode::new("1", "FRAME").with_fill(hidden);
        node.effects.push(SceneEffect {
            effect_type: SceneEffectType::LayerBlur,
            visible: false,
            radius: 4.0,
            ..Default::default()
        });
        let (style, diag) = resolve(&node, IrKind::Container);
        assert!(style.fills.is_empty());
        assert!(style.effects.is_empty());
        assert!(diag.is_empty());
    }

    #[test]
    fn test_corner_radius() {
        let mut node = SceneNode::new("1", "RECTANGLE");
        node.rectangle_corner_radii = Some([4.0, 4.0, 4.0, 4.0]);
        assert_eq!(resolve_corner_radius(&node), CornerRadius::Uniform(4.0));
        node.rectangle_corner_radii = Some([4.0, 0.0, 4.0, 0.0]);
        assert_eq!(resolve_corner_radius(&node), CornerRadius::PerCorner([4.0, 0.0, 4.0, 0.0]));
        node.rectangle_corner_radii = None;
        node.corner_radius = Some(8.0);
        assert_eq!(resolve_corner_radius(&node), CornerRadius::Uniform(8.0));
    }

    #[test]
    fn test_typography() {
        let mut node = SceneNode::new("1", "TEXT").with_characters("Hello");
        node.font_name = Some(FontName {
            family: "Roboto".to_string(),
            style: "Semi Bold Italic".to_string(),
        });
        node.font_size = Some(20.0);
        node.line_height = Some(SceneLineHeight {
            unit: SceneLineHeightUnit::Percent,
            value: 150.0,
        });
        let (style, _) = resolve(&node, IrKind::Text);
        let text = style.text.unwrap();
        assert_eq!(text.characters, "Hello");
        assert_eq!(text.typography.family, "Roboto");
        assert_eq!(text.typography.weight, 600);
        assert!(text.typography.italic);
        assert_eq!(text.typography.line_height, Some(30.0));
    }

    #[test]
    fn test_parse_font_style() {
        assert_eq!(parse_font_style("Regular"), (400, false));
        assert_eq!(parse_font_style("ExtraBold"), (800, false));
        assert_eq!(parse_font_style("Light Italic"), (300, true));
        assert_eq!(parse_font_style("Black"), (900, false));
    }
}
