//! Tailwind CSS code generator.
//!
//! Lengths are mapped onto the default Tailwind scales. A value that is not
//! on a scale becomes an arbitrary value (`w-[37px]`) unless
//! `round_tailwind_values` is set and a scale step lies within
//! [`SCALE_SNAP_TOLERANCE`].

use super::html::{background_value, render_markup, shadow_value};
use super::{note_text_image_fill, CodeGenerator};
use crate::colors::css_linear_gradient;
use crate::error::Result;
use crate::format::{fmt_num, placeholder_image, weight_name};
use crate::templates::TemplateEngine;
use crate::text_styles::TextStyleGroup;
use convert_case::{Case, Casing};
use serde_json::json;
use sprig_core::{
    Alignment, BlendMode, CodeArtifact, ColorRef, CornerRadius, Diagnostics, Direction,
    Distribution, Effect, FlowLayout, Framework, GradientStop, IrKind, IrNode, Language,
    LayoutMode, Paint, PaintKind, Placement, ScaleMode, Settings, ShapeHint, SizingMode,
    StrokeAlign, TextAlign, TextAlignVertical, TextCase, TextDecoration, Typography,
};

/// Largest relative distance to a scale step that still snaps to it.
pub const SCALE_SNAP_TOLERANCE: f64 = 0.15;

/// Spacing scale: pixels to class suffix.
const SPACING: &[(f64, &str)] = &[
    (0.0, "0"),
    (1.0, "px"),
    (2.0, "0.5"),
    (4.0, "1"),
    (6.0, "1.5"),
    (8.0, "2"),
    (10.0, "2.5"),
    (12.0, "3"),
    (14.0, "3.5"),
    (16.0, "4"),
    (20.0, "5"),
    (24.0, "6"),
    (28.0, "7"),
    (32.0, "8"),
    (36.0, "9"),
    (40.0, "10"),
    (44.0, "11"),
    (48.0, "12"),
    (56.0, "14"),
    (64.0, "16"),
    (80.0, "20"),
    (96.0, "24"),
    (112.0, "28"),
    (128.0, "32"),
    (144.0, "36"),
    (160.0, "40"),
    (176.0, "44"),
    (192.0, "48"),
    (208.0, "52"),
    (224.0, "56"),
    (240.0, "60"),
    (256.0, "64"),
    (288.0, "72"),
    (320.0, "80"),
    (384.0, "96"),
];

const FONT_SIZE: &[(f64, &str)] = &[
    (12.0, "xs"),
    (14.0, "sm"),
    (16.0, "base"),
    (18.0, "lg"),
    (20.0, "xl"),
    (24.0, "2xl"),
    (30.0, "3xl"),
    (36.0, "4xl"),
    (48.0, "5xl"),
    (60.0, "6xl"),
    (72.0, "7xl"),
    (96.0, "8xl"),
    (128.0, "9xl"),
];

/// Border radius scale; an empty suffix is the bare `rounded` class.
const RADIUS: &[(f64, &str)] = &[
    (0.0, "none"),
    (2.0, "sm"),
    (4.0, ""),
    (6.0, "md"),
    (8.0, "lg"),
    (12.0, "xl"),
    (16.0, "2xl"),
    (24.0, "3xl"),
];

const BORDER_WIDTH: &[(f64, &str)] = &[(0.0, "0"), (1.0, ""), (2.0, "2"), (4.0, "4"), (8.0, "8")];

const OUTLINE_WIDTH: &[(f64, &str)] = &[(0.0, "0"), (1.0, "1"), (2.0, "2"), (4.0, "4"), (8.0, "8")];

const BLUR: &[(f64, &str)] = &[
    (0.0, "none"),
    (4.0, "sm"),
    (8.0, ""),
    (12.0, "md"),
    (16.0, "lg"),
    (24.0, "xl"),
    (40.0, "2xl"),
    (64.0, "3xl"),
];

const ROTATION: &[f64] = &[0.0, 1.0, 2.0, 3.0, 6.0, 12.0, 45.0, 90.0, 180.0];

/// Tailwind code generator.
pub struct TailwindGenerator<'a> {
    engine: TemplateEngine<'a>,
}

impl<'a> TailwindGenerator<'a> {
    /// Create a new Tailwind generator.
    pub fn new() -> Self {
        let mut engine = TemplateEngine::new();
        Self::register_templates(&mut engine);
        Self { engine }
    }

    fn register_templates(engine: &mut TemplateEngine) {
        let _ = engine.register_template(
            "text_styles",
            r#"{{#each styles}}
.{{name}} {
  @apply {{classes}};
}
{{/each}}"#,
        );
    }
}

impl<'a> Default for TailwindGenerator<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CodeGenerator for TailwindGenerator<'a> {
    fn framework(&self) -> Framework {
        Framework::Tailwind
    }

    fn generate(
        &self,
        forest: &[IrNode],
        settings: &Settings,
        diag: &mut Diagnostics,
    ) -> Result<Vec<CodeArtifact>> {
        let classes = TailwindClasses::new(settings);
        let keyword = if settings.jsx { "className" } else { "class" };
        let mut attrs = |node: &IrNode, parent: Option<&IrNode>, diag: &mut Diagnostics| {
            let list = classes.node_classes(node, parent, diag);
            if list.is_empty() {
                Vec::new()
            } else {
                vec![format!("{}=\"{}\"", keyword, list.join(" "))]
            }
        };
        let code = render_markup(
            forest,
            settings.jsx,
            settings.show_layer_names,
            &mut attrs,
            diag,
        );
        Ok(vec![CodeArtifact::new("Code", code, Language::Html)])
    }

    fn generate_text_styles(&self, groups: &[TextStyleGroup], settings: &Settings) -> String {
        let classes = TailwindClasses::new(settings);
        let styles: Vec<_> = groups
            .iter()
            .map(|g| {
                json!({
                    "name": g.name.to_case(Case::Kebab),
                    "classes": classes.typography_classes(&g.typography).join(" "),
                })
            })
            .collect();
        match self.engine.render("text_styles", &json!({ "styles": styles })) {
            Ok(css) => css.trim().to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "text styles template failed");
                String::new()
            }
        }
    }

    fn text_styles_language(&self, _settings: &Settings) -> Language {
        Language::Css
    }

    fn color_value(&self, color: &ColorRef) -> String {
        color_token(color)
    }

    fn gradient_value(&self, angle: f64, stops: &[GradientStop]) -> String {
        gradient_classes(angle, stops).join(" ")
    }
}

/// Class list builder for one settings snapshot.
struct TailwindClasses<'s> {
    settings: &'s Settings,
}

impl<'s> TailwindClasses<'s> {
    fn new(settings: &'s Settings) -> Self {
        Self { settings }
    }

    /// Scale suffix for a length: exact step, snapped step, or arbitrary.
    fn scaled(&self, value: f64, scale: &[(f64, &'static str)]) -> String {
        if let Some((_, key)) = scale.iter().find(|(px, _)| (px - value).abs() < 0.01) {
            return (*key).to_string();
        }
        if self.settings.round_tailwind_values {
            let nearest = scale.iter().min_by(|a, b| {
                (a.0 - value)
                    .abs()
                    .partial_cmp(&(b.0 - value).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            if let Some((px, key)) = nearest {
                if value != 0.0 && ((px - value) / value).abs() <= SCALE_SNAP_TOLERANCE {
                    return (*key).to_string();
                }
            }
        }
        format!("[{}px]", fmt_num(value))
    }

    fn spacing(&self, value: f64) -> String {
        self.scaled(value, SPACING)
    }

    /// `prefix-suffix`, or the bare prefix for an empty suffix.
    fn class(prefix: &str, suffix: &str) -> String {
        if suffix.is_empty() {
            prefix.to_string()
        } else {
            format!("{}-{}", prefix, suffix)
        }
    }

    fn node_classes(
        &self,
        node: &IrNode,
        parent: Option<&IrNode>,
        diag: &mut Diagnostics,
    ) -> Vec<String> {
        let mut c = Vec::new();
        let layout = &node.layout;
        let style = &node.style;

        match layout.placement {
            Placement::Absolute { left, top } => {
                c.push("absolute".to_string());
                c.push(format!("left-{}", self.spacing(left)));
                c.push(format!("top-{}", self.spacing(top)));
            }
            _ if node.children.iter().any(|c| c.layout.is_absolute_child()) => {
                c.push("relative".to_string());
            }
            _ => {}
        }

        if let LayoutMode::Flow(flow) = &layout.mode {
            self.flow_classes(&mut c, flow);
        }

        let parent_direction = match layout.placement {
            Placement::Flow => parent.and_then(|p| p.layout.flow()).map(|f| f.direction),
            _ => None,
        };
        let is_line = matches!(node.kind, IrKind::Vector { shape: ShapeHint::Line });
        for (axis, sizing, prefix) in [
            (Direction::Horizontal, layout.sizing.horizontal, "w"),
            (Direction::Vertical, layout.sizing.vertical, "h"),
        ] {
            match sizing {
                SizingMode::Fixed(v) => {
                    let v = match (is_line, axis, &style.stroke) {
                        (true, Direction::Vertical, Some(stroke)) => stroke.weight,
                        _ => v,
                    };
                    c.push(format!("{}-{}", prefix, self.spacing(v)));
                    if parent_direction == Some(axis) {
                        c.push("shrink-0".to_string());
                    }
                }
                SizingMode::Hug => {}
                SizingMode::Fill => match (layout.placement, parent_direction) {
                    (Placement::Root, _) => c.push(format!("{}-full", prefix)),
                    (_, Some(direction)) if direction == axis => c.push("flex-1".to_string()),
                    _ => c.push("self-stretch".to_string()),
                },
            }
        }

        if let Some(text) = &style.text {
            note_text_image_fill(node, diag);
            match style.fills.last().map(|p| &p.kind) {
                Some(PaintKind::Solid { color }) => c.push(format!("text-{}", color_token(color))),
                Some(PaintKind::LinearGradient { angle, stops }) => {
                    c.extend(gradient_classes(*angle, stops));
                    c.push("bg-clip-text".to_string());
                    c.push("text-transparent".to_string());
                }
                Some(PaintKind::Image { .. }) | None => {}
            }
            c.extend(self.typography_classes(&text.typography));
            if text.typography.align_vertical != TextAlignVertical::Top
                && layout.sizing.vertical.fixed().is_some()
            {
                c.push("flex".to_string());
                c.push("flex-col".to_string());
                c.push(
                    match text.typography.align_vertical {
                        TextAlignVertical::Center => "justify-center",
                        _ => "justify-end",
                    }
                    .to_string(),
                );
            }
            if layout.sizing.horizontal == SizingMode::Hug {
                c.push("whitespace-nowrap".to_string());
            }
        } else if is_line {
            if let Some(color) = style.top_solid_stroke() {
                c.push(format!("bg-{}", color_token(color)));
            }
        } else if node.kind != IrKind::Image {
            self.background_classes(&mut c, node);
            self.border_classes(&mut c, node, diag);
        }

        match (node.kind, style.corner_radius) {
            (IrKind::Vector { shape: ShapeHint::Ellipse }, _) => c.push("rounded-full".to_string()),
            (_, CornerRadius::Uniform(r)) => {
                c.push(Self::class("rounded", &self.scaled(r, RADIUS)));
            }
            (_, CornerRadius::PerCorner(radii)) => {
                for (corner, r) in ["tl", "tr", "br", "bl"].iter().zip(radii) {
                    if r > 0.0 {
                        let prefix = format!("rounded-{}", corner);
                        c.push(Self::class(&prefix, &self.scaled(r, RADIUS)));
                    }
                }
            }
            (_, CornerRadius::None) => {}
        }

        self.effect_classes(&mut c, node, diag);

        if style.opacity < 1.0 {
            c.push(format!("opacity-{}", percent_suffix(style.opacity)));
        }
        if style.clips_content {
            c.push("overflow-hidden".to_string());
        }
        if node.geometry.rotation != 0.0 {
            c.push(rotate_class(-node.geometry.rotation));
            c.push("origin-top-left".to_string());
        }

        c
    }

    fn flow_classes(&self, c: &mut Vec<String>, flow: &FlowLayout) {
        c.push("flex".to_string());
        if flow.direction == Direction::Vertical {
            c.push("flex-col".to_string());
        }
        c.push(
            match flow.distribution {
                Distribution::Start => "justify-start",
                Distribution::Center => "justify-center",
                Distribution::End => "justify-end",
                Distribution::SpaceBetween => "justify-between",
            }
            .to_string(),
        );
        c.push(
            match flow.alignment {
                Alignment::Start => "items-start",
                Alignment::Center => "items-center",
                Alignment::End => "items-end",
                Alignment::Baseline => "items-baseline",
            }
            .to_string(),
        );
        if flow.gap > 0.0 {
            c.push(format!("gap-{}", self.spacing(flow.gap)));
        }
        if flow.wrap {
            c.push("flex-wrap".to_string());
        }

        let p = &flow.padding;
        if p.is_zero() {
            return;
        }
        if p.is_uniform() {
            c.push(format!("p-{}", self.spacing(p.top)));
        } else if p.is_symmetric() {
            if p.left > 0.0 {
                c.push(format!("px-{}", self.spacing(p.left)));
            }
            if p.top > 0.0 {
                c.push(format!("py-{}", self.spacing(p.top)));
            }
        } else {
            for (side, v) in [("pt", p.top), ("pr", p.right), ("pb", p.bottom), ("pl", p.left)] {
                if v > 0.0 {
                    c.push(format!("{}-{}", side, self.spacing(v)));
                }
            }
        }
    }

    fn background_classes(&self, c: &mut Vec<String>, node: &IrNode) {
        let fills: &[Paint] = node.style.fills.as_slice();
        match fills {
            [] => return,
            [single] => match &single.kind {
                PaintKind::Solid { color } => c.push(format!("bg-{}", color_token(color))),
                PaintKind::LinearGradient { angle, stops } => {
                    c.extend(gradient_classes(*angle, stops))
                }
                PaintKind::Image { scale_mode, .. } => {
                    let url = placeholder_image(node.geometry.width, node.geometry.height);
                    c.push(format!("bg-[url({})]", url));
                    c.push(
                        match scale_mode {
                            ScaleMode::Fit => "bg-contain",
                            ScaleMode::Tile => "bg-repeat",
                            ScaleMode::Fill | ScaleMode::Crop => "bg-cover",
                        }
                        .to_string(),
                    );
                    if *scale_mode != ScaleMode::Tile {
                        c.push("bg-center".to_string());
                        c.push("bg-no-repeat".to_string());
                    }
                }
            },
            _ => c.push(format!(
                "[background:{}]",
                arbitrary(&background_value(fills, node))
            )),
        }

        if fills.iter().any(|p| p.blend_mode != BlendMode::Normal) {
            if let [single] = fills {
                c.push(format!("mix-blend-{}", single.blend_mode.css_name()));
            } else {
                let modes: Vec<&str> = fills.iter().rev().map(|p| p.blend_mode.css_name()).collect();
                c.push(format!("[background-blend-mode:{}]", modes.join(",")));
            }
        }
    }

    fn border_classes(&self, c: &mut Vec<String>, node: &IrNode, diag: &mut Diagnostics) {
        let style = &node.style;
        let Some(stroke) = &style.stroke else {
            return;
        };
        if style.strokes.len() > 1 {
            diag.warn(&node.id, "multiple strokes; only the topmost is emitted");
        }
        let Some(top) = style.strokes.last() else {
            return;
        };
        let outside = stroke.align == StrokeAlign::Outside;
        let prefix = if outside { "outline" } else { "border" };
        match &top.kind {
            PaintKind::Solid { color } => {
                if outside {
                    c.push("outline".to_string());
                    c.push(format!("outline-{}", self.scaled(stroke.weight, OUTLINE_WIDTH)));
                } else {
                    c.push(Self::class("border", &self.scaled(stroke.weight, BORDER_WIDTH)));
                }
                c.push(format!("{}-{}", prefix, color_token(color)));
            }
            PaintKind::LinearGradient { angle, stops } => {
                c.push(Self::class("border", &self.scaled(stroke.weight, BORDER_WIDTH)));
                c.push(format!(
                    "[border-image:{}_1]",
                    arbitrary(&css_linear_gradient(*angle, stops))
                ));
            }
            PaintKind::Image { .. } => {
                diag.warn(&node.id, "image stroke is not supported and was omitted");
            }
        }
    }

    fn effect_classes(&self, c: &mut Vec<String>, node: &IrNode, diag: &mut Diagnostics) {
        let is_text = node.kind == IrKind::Text;
        let mut shadows = Vec::new();
        let mut text_shadows = Vec::new();
        for effect in &node.style.effects {
            match effect {
                Effect::DropShadow(s) if is_text => text_shadows.push(format!(
                    "{}px {}px {}px {}",
                    fmt_num(s.offset_x),
                    fmt_num(s.offset_y),
                    fmt_num(s.blur),
                    s.color.color.to_css()
                )),
                Effect::InnerShadow(_) if is_text => {
                    diag.warn(&node.id, "inner shadow on text is not supported and was omitted");
                }
                Effect::DropShadow(s) => shadows.push(shadow_value(s, false)),
                Effect::InnerShadow(s) => shadows.push(shadow_value(s, true)),
                Effect::LayerBlur { radius } => {
                    c.push(Self::class("blur", &self.scaled(radius / 2.0, BLUR)));
                }
                Effect::BackgroundBlur { radius } => {
                    c.push(Self::class("backdrop-blur", &self.scaled(radius / 2.0, BLUR)));
                }
            }
        }
        if !shadows.is_empty() {
            c.push(format!("shadow-[{}]", arbitrary(&shadows.join(","))));
        }
        if !text_shadows.is_empty() {
            c.push(format!("[text-shadow:{}]", arbitrary(&text_shadows.join(","))));
        }
    }

    /// Typography classes; also used for the text-styles block.
    fn typography_classes(&self, t: &Typography) -> Vec<String> {
        let mut c = Vec::new();
        if t.family.contains(' ') {
            c.push(format!("font-['{}']", t.family.replace(' ', "_")));
        } else {
            c.push(format!("font-[{}]", t.family));
        }
        c.push(format!("text-{}", self.scaled(t.size, FONT_SIZE)));
        if t.weight % 100 == 0 {
            c.push(format!("font-{}", weight_name(t.weight)));
        } else {
            c.push(format!("font-[{}]", t.weight));
        }
        if t.italic {
            c.push("italic".to_string());
        }
        if let Some(line_height) = t.line_height {
            let steps = line_height / 4.0;
            if steps.fract() == 0.0 && (3.0..=10.0).contains(&steps) {
                c.push(format!("leading-{}", steps as u32));
            } else {
                c.push(format!("leading-[{}px]", fmt_num(line_height)));
            }
        }
        if t.letter_spacing != 0.0 {
            c.push(format!("tracking-[{}px]", fmt_num(t.letter_spacing)));
        }
        match t.align_horizontal {
            TextAlign::Left => {}
            TextAlign::Center => c.push("text-center".to_string()),
            TextAlign::Right => c.push("text-right".to_string()),
            TextAlign::Justified => c.push("text-justify".to_string()),
        }
        match t.text_case {
            TextCase::Original => {}
            TextCase::Upper => c.push("uppercase".to_string()),
            TextCase::Lower => c.push("lowercase".to_string()),
            TextCase::Title => c.push("capitalize".to_string()),
        }
        match t.decoration {
            TextDecoration::None => {}
            TextDecoration::Underline => c.push("underline".to_string()),
            TextDecoration::Strikethrough => c.push("line-through".to_string()),
        }
        c
    }
}

/// Arbitrary-value body: Tailwind reads underscores as spaces.
fn arbitrary(css: &str) -> String {
    css.replace(", ", ",").replace(' ', "_")
}

/// Color suffix: palette name or `[#hex]`, with an opacity modifier.
fn color_token(color: &ColorRef) -> String {
    let base = match &color.palette {
        Some(p) => p.name.clone(),
        None => format!("[{}]", color.color.to_hex()),
    };
    if color.color.is_opaque() {
        base
    } else {
        format!("{}/{}", base, percent_suffix(f64::from(color.color.a)))
    }
}

/// `50` for 0.5, `[0.37]` when not a multiple of five percent.
fn percent_suffix(value: f64) -> String {
    let percent = (value * 100.0).round();
    if (value * 100.0 - percent).abs() < 0.01 && percent as i64 % 5 == 0 {
        format!("{}", percent as i64)
    } else {
        format!("[{}]", fmt_num(value))
    }
}

fn rotate_class(css_degrees: f64) -> String {
    let sign = if css_degrees < 0.0 { "-" } else { "" };
    let magnitude = css_degrees.abs();
    if ROTATION.iter().any(|r| (r - magnitude).abs() < 0.01) {
        format!("{}rotate-{}", sign, fmt_num(magnitude))
    } else {
        format!("rotate-[{}deg]", fmt_num(css_degrees))
    }
}

/// Direction keyword of a gradient angle on a 45 degree step.
fn gradient_direction(angle: f64) -> Option<&'static str> {
    let normalized = angle.rem_euclid(360.0);
    let step = normalized / 45.0;
    if (step - step.round()).abs() > 0.01 {
        return None;
    }
    Some(match step.round() as u32 % 8 {
        0 => "t",
        1 => "tr",
        2 => "r",
        3 => "br",
        4 => "b",
        5 => "bl",
        6 => "l",
        _ => "tl",
    })
}

/// Gradient classes: `bg-gradient-to-*` with color stops when the stops are
/// evenly placed, otherwise an arbitrary background.
fn gradient_classes(angle: f64, stops: &[GradientStop]) -> Vec<String> {
    let even = match stops {
        [a, b] => a.position == 0.0 && b.position == 1.0,
        [a, b, c] => a.position == 0.0 && (b.position - 0.5).abs() < 0.001 && c.position == 1.0,
        _ => false,
    };
    match gradient_direction(angle) {
        Some(direction) if even => {
            let mut c = vec![format!("bg-gradient-to-{}", direction)];
            c.push(format!("from-{}", color_token(&stops[0].color)));
            if stops.len() == 3 {
                c.push(format!("via-{}", color_token(&stops[1].color)));
            }
            c.push(format!("to-{}", color_token(&stops[stops.len() - 1].color)));
            c
        }
        _ => vec![format!(
            "bg-[{}]",
            arbitrary(&css_linear_gradient(angle, stops))
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_core::{
        Color, Geometry, LayoutDescriptor, NodeId, PaletteMatch, Sizing, StyleDescriptor,
        TextStyle,
    };

    fn node(id: &str, kind: IrKind, placement: Placement) -> IrNode {
        IrNode {
            id: NodeId::new(id),
            kind,
            name: Some(format!("Layer {}", id)),
            unique_name: format!("layer_{}", id),
            geometry: Geometry {
                width: 64.0,
                height: 32.0,
                ..Default::default()
            },
            style: StyleDescriptor::default(),
            layout: LayoutDescriptor {
                mode: LayoutMode::Absolute,
                sizing: Sizing::fixed(64.0, 32.0),
                placement,
            },
            unsupported_kind: None,
            children: Vec::new(),
        }
    }

    fn named(color: Color, name: &str) -> ColorRef {
        ColorRef {
            color,
            palette: Some(PaletteMatch {
                name: name.to_string(),
                exact: true,
            }),
        }
    }

    #[test]
    fn test_spacing_scale() {
        let exact = Settings::default();
        let classes = TailwindClasses::new(&exact);
        assert_eq!(classes.spacing(8.0), "2");
        assert_eq!(classes.spacing(1.0), "px");
        assert_eq!(classes.spacing(17.0), "[17px]");

        let rounding = Settings {
            round_tailwind_values: true,
            ..Default::default()
        };
        let classes = TailwindClasses::new(&rounding);
        assert_eq!(classes.spacing(17.0), "4");
        assert_eq!(classes.spacing(500.0), "[500px]");
    }

    #[test]
    fn test_flow_with_gap_and_children_in_order() {
        let mut root = node("1", IrKind::Container, Placement::Root);
        root.layout.mode = LayoutMode::Flow(FlowLayout::horizontal().with_gap(8.0));
        root.style.fills.push(Paint {
            kind: PaintKind::Solid {
                color: named(Color::WHITE, "white"),
            },
            opacity: 1.0,
            blend_mode: BlendMode::Normal,
        });
        root.children = vec![
            node("2", IrKind::Container, Placement::Flow),
            node("3", IrKind::Container, Placement::Flow),
        ];
        let mut diag = Diagnostics::new();
        let artifacts = TailwindGenerator::new()
            .generate(&[root], &Settings::default(), &mut diag)
            .unwrap();
        let code = &artifacts[0].body;
        let first = code.lines().next().unwrap();
        assert_eq!(
            first,
            "<div class=\"flex justify-start items-start gap-2 w-16 h-8 bg-white\">"
        );
        let lines: Vec<&str> = code.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "  <div class=\"w-16 shrink-0 h-8\"></div>");
    }

    #[test]
    fn test_color_tokens() {
        assert_eq!(color_token(&named(Color::rgb(0.0, 0.0, 0.0), "black")), "black");
        assert_eq!(
            color_token(&named(Color::rgba(0.0, 0.0, 0.0, 0.5), "black")),
            "black/50"
        );
        assert_eq!(
            color_token(&ColorRef::raw(Color::rgba(1.0, 0.0, 0.0, 0.37))),
            "[#ff0000]/[0.37]"
        );
    }

    #[test]
    fn test_gradient_classes() {
        let stops = vec![
            GradientStop {
                position: 0.0,
                color: named(Color::WHITE, "white"),
            },
            GradientStop {
                position: 1.0,
                color: named(Color::BLACK, "black"),
            },
        ];
        assert_eq!(
            gradient_classes(180.0, &stops),
            vec!["bg-gradient-to-b", "from-white", "to-black"]
        );
        assert_eq!(
            gradient_classes(100.0, &stops),
            vec!["bg-[linear-gradient(100deg,#ffffff_0%,#000000_100%)]"]
        );
    }

    #[test]
    fn test_layer_comments_and_jsx() {
        let mut root = node("1", IrKind::Container, Placement::Root);
        root.children = vec![node("2", IrKind::Container, Placement::Absolute { left: 4.0, top: 0.0 })];
        let settings = Settings {
            jsx: true,
            show_layer_names: true,
            ..Default::default()
        };
        let mut diag = Diagnostics::new();
        let code = &TailwindGenerator::new()
            .generate(&[root], &settings, &mut diag)
            .unwrap()[0]
            .body;
        let lines: Vec<&str> = code.lines().collect();
        assert_eq!(lines[0], "{/* Layer 1 */}");
        assert_eq!(lines[1], "<div className=\"relative w-16 h-8\">");
        assert_eq!(lines[2], "  {/* Layer 2 */}");
        assert_eq!(lines[3], "  <div className=\"absolute left-1 top-0 w-16 h-8\"></div>");
    }

    #[test]
    fn test_layer_comment_never_holds_double_dash() {
        let mut root = node("1", IrKind::Container, Placement::Root);
        root.name = Some("Hero --- v2 ----- */ final".into());
        let settings = Settings {
            show_layer_names: true,
            ..Default::default()
        };
        let mut diag = Diagnostics::new();
        let generator = TailwindGenerator::new();
        let code = &generator.generate(&[root.clone()], &settings, &mut diag).unwrap()[0].body;
        let first = code.lines().next().unwrap();
        assert_eq!(first, "<!-- Hero - v2 - * / final -->");
        assert!(!first["<!--".len()..first.len() - "-->".len()].contains("--"));

        let jsx = Settings {
            jsx: true,
            ..settings
        };
        let code = &generator.generate(&[root], &jsx, &mut diag).unwrap()[0].body;
        assert_eq!(code.lines().next(), Some("{/* Hero - v2 - * / final */}"));
    }

    #[test]
    fn test_typography_classes() {
        let settings = Settings::default();
        let classes = TailwindClasses::new(&settings);
        let t = Typography {
            family: "Open Sans".to_string(),
            size: 16.0,
            weight: 700,
            line_height: Some(24.0),
            text_case: TextCase::Upper,
            ..Default::default()
        };
        assert_eq!(
            classes.typography_classes(&t),
            vec!["font-['Open_Sans']", "text-base", "font-bold", "leading-6", "uppercase"]
        );
    }

    #[test]
    fn test_text_styles_block() {
        let group = TextStyleGroup {
            name: "inter_16_bold".into(),
            typography: Typography {
                size: 16.0,
                weight: 700,
                ..Default::default()
            },
            node_ids: vec![NodeId::new("1")],
            sample: "Hi".into(),
        };
        let css = TailwindGenerator::new().generate_text_styles(&[group], &Settings::default());
        assert_eq!(css, ".inter-16-bold {\n  @apply font-[Inter] text-base font-bold;\n}");
    }

    #[test]
    fn test_text_node_classes() {
        let mut text = node("4", IrKind::Text, Placement::Root);
        text.layout.sizing.horizontal = SizingMode::Hug;
        text.style.fills.push(Paint::solid(Color::BLACK));
        text.style.text = Some(TextStyle {
            characters: "Hi".into(),
            typography: Typography::default(),
        });
        let settings = Settings::default();
        let mut diag = Diagnostics::new();
        let classes = TailwindClasses::new(&settings).node_classes(&text, None, &mut diag);
        assert_eq!(
            classes,
            vec!["h-8", "text-[#000000]", "font-[Inter]", "text-xs", "font-normal", "whitespace-nowrap"]
        );
    }
}
