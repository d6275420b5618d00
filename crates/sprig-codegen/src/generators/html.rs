//! HTML + CSS code generator.
//!
//! Supports inline styles (`style="..."`), a class stylesheet, and JSX
//! attribute naming (`className`, `style={{...}}`). The markup walk is shared
//! with the Tailwind generator.

use super::{note_text_image_fill, note_unsupported, CodeGenerator};
use crate::colors::css_linear_gradient;
use crate::error::Result;
use crate::format::{escape_html, fmt_num, placeholder_image};
use crate::templates::TemplateEngine;
use crate::text_styles::TextStyleGroup;
use convert_case::{Case, Casing};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::json;
use sprig_core::{
    Alignment, BlendMode, CodeArtifact, ColorRef, CornerRadius, Diagnostics, Direction,
    Distribution, Effect, FlowLayout, Framework, GradientStop, IrKind, IrNode, Language,
    LayoutMode, Padding, Paint, PaintKind, Placement, ScaleMode, Settings, ShapeHint, Shadow,
    SizingMode, StrokeAlign, TextAlign, TextAlignVertical, TextCase, TextDecoration, Typography,
};

/// Ordered CSS declarations.
pub(crate) type Declarations = IndexMap<&'static str, String>;

/// HTML preview of a selection, shown by the host regardless of target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HtmlPreview {
    pub width: f64,
    pub height: f64,
    pub content: String,
}

/// HTML code generator.
pub struct HtmlGenerator<'a> {
    engine: TemplateEngine<'a>,
}

impl<'a> HtmlGenerator<'a> {
    /// Create a new HTML generator.
    pub fn new() -> Self {
        let mut engine = TemplateEngine::new();
        Self::register_templates(&mut engine);
        Self { engine }
    }

    fn register_templates(engine: &mut TemplateEngine) {
        let _ = engine.register_template(
            "html_preview",
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <style>
    body { margin: 0; }
  </style>
</head>
<body>
{{indent body 2}}
</body>
</html>
"#,
        );
    }

    /// Inline-style HTML of the selection wrapped in a standalone document.
    ///
    /// The preview size is the widest root by the stacked root heights.
    pub fn preview(&self, forest: &[IrNode], settings: &Settings) -> Result<HtmlPreview> {
        let preview_settings = Settings {
            framework: Framework::Html,
            jsx: false,
            inline_style: true,
            show_layer_names: false,
            ..settings.clone()
        };
        // Warnings were already reported by the selected target
        let mut scratch = Diagnostics::new();
        let mut writer = HtmlWriter::new(&preview_settings);
        let body = writer.write_forest(forest, &mut scratch);
        let content = self.engine.render("html_preview", &json!({ "body": body }))?;

        Ok(HtmlPreview {
            width: forest.iter().map(|n| n.geometry.width).fold(0.0, f64::max),
            height: forest.iter().map(|n| n.geometry.height).sum(),
            content,
        })
    }
}

impl<'a> Default for HtmlGenerator<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CodeGenerator for HtmlGenerator<'a> {
    fn framework(&self) -> Framework {
        Framework::Html
    }

    fn generate(
        &self,
        forest: &[IrNode],
        settings: &Settings,
        diag: &mut Diagnostics,
    ) -> Result<Vec<CodeArtifact>> {
        let mut writer = HtmlWriter::new(settings);
        let code = writer.write_forest(forest, diag);
        let mut artifacts = vec![CodeArtifact::new("Code", code, Language::Html)];
        if !settings.inline_style {
            artifacts.push(CodeArtifact::new(
                "Styles",
                stylesheet(&writer.rules),
                Language::Css,
            ));
        }
        Ok(artifacts)
    }

    fn generate_text_styles(&self, groups: &[TextStyleGroup], settings: &Settings) -> String {
        if settings.jsx {
            return groups
                .iter()
                .map(|g| style_object(&g.name.to_case(Case::Camel), &typography_declarations(&g.typography)))
                .collect::<Vec<_>>()
                .join("\n\n");
        }
        let rules: Vec<(String, Declarations)> = groups
            .iter()
            .map(|g| (g.name.to_case(Case::Kebab), typography_declarations(&g.typography)))
            .collect();
        stylesheet(&rules)
    }

    fn text_styles_language(&self, settings: &Settings) -> Language {
        if settings.jsx {
            Language::Javascript
        } else {
            Language::Css
        }
    }

    fn color_value(&self, color: &ColorRef) -> String {
        color.color.to_css()
    }

    fn gradient_value(&self, angle: f64, stops: &[GradientStop]) -> String {
        css_linear_gradient(angle, stops)
    }
}

/// Writes HTML for a forest and, in class mode, collects the rules.
struct HtmlWriter<'s> {
    settings: &'s Settings,
    rules: Vec<(String, Declarations)>,
}

impl<'s> HtmlWriter<'s> {
    fn new(settings: &'s Settings) -> Self {
        Self {
            settings,
            rules: Vec::new(),
        }
    }

    fn write_forest(&mut self, forest: &[IrNode], diag: &mut Diagnostics) -> String {
        let settings = self.settings;
        let rules = &mut self.rules;
        let mut attrs = |node: &IrNode, parent: Option<&IrNode>, diag: &mut Diagnostics| {
            let decls = css_declarations(node, parent, diag);
            let mut attrs = Vec::new();
            if settings.show_layer_names {
                if let Some(name) = &node.name {
                    attrs.push(format!("data-layer=\"{}\"", escape_html(name)));
                }
            }
            if decls.is_empty() {
                return attrs;
            }
            if settings.inline_style {
                attrs.push(style_attribute(&decls, settings.jsx));
            } else {
                let class = node.unique_name.to_case(Case::Kebab);
                let keyword = if settings.jsx { "className" } else { "class" };
                attrs.push(format!("{}=\"{}\"", keyword, class));
                rules.push((class, decls));
            }
            attrs
        };
        render_markup(forest, settings.jsx, false, &mut attrs, diag)
    }
}

/// Attribute provider for [`render_markup`].
pub(crate) type AttrFn<'f> = dyn FnMut(&IrNode, Option<&IrNode>, &mut Diagnostics) -> Vec<String> + 'f;

/// Depth-first markup walk shared by the HTML and Tailwind generators.
///
/// Multiple roots are wrapped in a fragment in JSX mode.
pub(crate) fn render_markup(
    forest: &[IrNode],
    jsx: bool,
    layer_comments: bool,
    attrs: &mut AttrFn<'_>,
    diag: &mut Diagnostics,
) -> String {
    let mut lines = Vec::new();
    let wrap = jsx && forest.len() > 1;
    let depth = usize::from(wrap);
    if wrap {
        lines.push("<>".to_string());
    }
    for root in forest {
        write_element(&mut lines, root, None, depth, jsx, layer_comments, attrs, diag);
    }
    if wrap {
        lines.push("</>".to_string());
    }
    lines.join("\n")
}

#[allow(clippy::too_many_arguments)]
fn write_element(
    lines: &mut Vec<String>,
    node: &IrNode,
    parent: Option<&IrNode>,
    depth: usize,
    jsx: bool,
    layer_comments: bool,
    attrs: &mut AttrFn<'_>,
    diag: &mut Diagnostics,
) {
    note_unsupported(node, diag);
    let pad = "  ".repeat(depth);

    if layer_comments {
        if let Some(name) = &node.name {
            let name = comment_safe(name);
            if jsx {
                lines.push(format!("{}{{/* {} */}}", pad, name));
            } else {
                lines.push(format!("{}<!-- {} -->", pad, name));
            }
        }
    }

    let mut attributes = attrs(node, parent, diag);

    if node.kind == IrKind::Image {
        attributes.insert(
            0,
            format!(
                "src=\"{}\"",
                placeholder_image(node.geometry.width, node.geometry.height)
            ),
        );
        lines.push(format!("{}<img {} />", pad, attributes.join(" ")));
        return;
    }

    let open = if attributes.is_empty() {
        "<div>".to_string()
    } else {
        format!("<div {}>", attributes.join(" "))
    };

    if let Some(text) = node.characters() {
        lines.push(format!("{}{}{}</div>", pad, open, text_content(text, jsx)));
        return;
    }

    if node.children.is_empty() {
        lines.push(format!("{}{}</div>", pad, open));
        return;
    }

    lines.push(format!("{}{}", pad, open));
    for child in &node.children {
        write_element(lines, child, Some(node), depth + 1, jsx, layer_comments, attrs, diag);
    }
    lines.push(format!("{}</div>", pad));
}

fn text_content(text: &str, jsx: bool) -> String {
    let escaped = escape_html(text);
    if jsx {
        let mut out = String::with_capacity(escaped.len());
        for c in escaped.chars() {
            match c {
                '{' => out.push_str("{'{'}"),
                '}' => out.push_str("{'}'}"),
                '\n' => out.push_str("<br />"),
                _ => out.push(c),
            }
        }
        out
    } else {
        escaped.replace('\n', "<br/>")
    }
}

fn style_attribute(decls: &Declarations, jsx: bool) -> String {
    if jsx {
        let body = decls
            .iter()
            .map(|(k, v)| format!("{}: \"{}\"", jsx_property(k), v.replace('"', "\\\"")))
            .collect::<Vec<_>>()
            .join(", ");
        format!("style={{{{{}}}}}", body)
    } else {
        let body = decls
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; ");
        format!("style=\"{}\"", body)
    }
}

/// React style key of a CSS property (`background-color` to `backgroundColor`,
/// `-webkit-background-clip` to `WebkitBackgroundClip`).
fn jsx_property(property: &str) -> String {
    match property.strip_prefix('-') {
        Some(vendor) => vendor.to_case(Case::Pascal),
        None => property.to_case(Case::Camel),
    }
}

/// A named React style object, one property per line.
fn style_object(name: &str, decls: &Declarations) -> String {
    let body = decls
        .iter()
        .map(|(k, v)| format!("  {}: \"{}\",", jsx_property(k), v.replace('"', "\\\"")))
        .collect::<Vec<_>>()
        .join("\n");
    format!("const {} = {{\n{}\n}};", name, body)
}

fn stylesheet(rules: &[(String, Declarations)]) -> String {
    rules
        .iter()
        .map(|(class, decls)| {
            let body = decls
                .iter()
                .map(|(k, v)| format!("  {}: {};", k, v))
                .collect::<Vec<_>>()
                .join("\n");
            format!(".{} {{\n{}\n}}", class, body)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn px(value: f64) -> String {
    format!("{}px", fmt_num(value))
}

/// CSS declarations of a node, in a fixed property order.
pub(crate) fn css_declarations(
    node: &IrNode,
    parent: Option<&IrNode>,
    diag: &mut Diagnostics,
) -> Declarations {
    let mut d = Declarations::new();
    let layout = &node.layout;
    let style = &node.style;

    // Placement
    match layout.placement {
        Placement::Absolute { left, top } => {
            d.insert("position", "absolute".into());
            d.insert("left", px(left));
            d.insert("top", px(top));
        }
        _ if node.children.iter().any(|c| c.layout.is_absolute_child()) => {
            d.insert("position", "relative".into());
        }
        _ => {}
    }

    // Own flow layout
    if let LayoutMode::Flow(flow) = &layout.mode {
        flow_declarations(&mut d, flow);
    }

    // Sizing
    let parent_direction = match layout.placement {
        Placement::Flow => parent.and_then(|p| p.layout.flow()).map(|f| f.direction),
        _ => None,
    };
    let is_line = matches!(node.kind, IrKind::Vector { shape: ShapeHint::Line });
    for (axis, sizing, property) in [
        (Direction::Horizontal, layout.sizing.horizontal, "width"),
        (Direction::Vertical, layout.sizing.vertical, "height"),
    ] {
        match sizing {
            SizingMode::Fixed(v) => {
                let v = match (is_line, axis, &style.stroke) {
                    (true, Direction::Vertical, Some(stroke)) => stroke.weight,
                    _ => v,
                };
                d.insert(property, px(v));
                if parent_direction == Some(axis) {
                    d.insert("flex-shrink", "0".into());
                }
            }
            SizingMode::Hug => {}
            SizingMode::Fill => match (layout.placement, parent_direction) {
                (Placement::Root, _) => {
                    d.insert(property, "100%".into());
                }
                (_, Some(direction)) if direction == axis => {
                    d.insert("flex", "1 1 0".into());
                }
                _ => {
                    d.insert("align-self", "stretch".into());
                }
            },
        }
    }

    // Paint
    if let Some(text) = &style.text {
        note_text_image_fill(node, diag);
        text_paint_declarations(&mut d, style.fills.as_slice());
        d.extend(typography_declarations(&text.typography));
        if text.typography.align_vertical != TextAlignVertical::Top
            && layout.sizing.vertical.fixed().is_some()
        {
            d.insert("display", "flex".into());
            d.insert("flex-direction", "column".into());
            d.insert(
                "justify-content",
                match text.typography.align_vertical {
                    TextAlignVertical::Center => "center",
                    _ => "flex-end",
                }
                .into(),
            );
        }
        if layout.sizing.horizontal == SizingMode::Hug {
            d.insert("white-space", "nowrap".into());
        }
    } else if is_line {
        if let Some(color) = style.top_solid_stroke() {
            d.insert("background", color.color.to_css());
        }
    } else if node.kind != IrKind::Image {
        background_declarations(&mut d, style.fills.as_slice(), node);
        border_declarations(&mut d, node, diag);
    }

    match (node.kind, style.corner_radius) {
        (IrKind::Vector { shape: ShapeHint::Ellipse }, _) => {
            d.insert("border-radius", "50%".into());
        }
        (_, CornerRadius::Uniform(r)) => {
            d.insert("border-radius", px(r));
        }
        (_, CornerRadius::PerCorner(radii)) => {
            d.insert(
                "border-radius",
                radii.iter().map(|r| px(*r)).collect::<Vec<_>>().join(" "),
            );
        }
        (_, CornerRadius::None) => {}
    }

    effect_declarations(&mut d, node, diag);

    if style.opacity < 1.0 {
        d.insert("opacity", fmt_num(style.opacity));
    }
    if style.clips_content {
        d.insert("overflow", "hidden".into());
    }
    if node.geometry.rotation != 0.0 {
        d.insert(
            "transform",
            format!("rotate({}deg)", fmt_num(-node.geometry.rotation)),
        );
        d.insert("transform-origin", "top left".into());
    }

    d
}

fn flow_declarations(d: &mut Declarations, flow: &FlowLayout) {
    d.insert("display", "flex".into());
    d.insert(
        "flex-direction",
        match flow.direction {
            Direction::Horizontal => "row",
            Direction::Vertical => "column",
        }
        .into(),
    );
    d.insert(
        "justify-content",
        match flow.distribution {
            Distribution::Start => "flex-start",
            Distribution::Center => "center",
            Distribution::End => "flex-end",
            Distribution::SpaceBetween => "space-between",
        }
        .into(),
    );
    d.insert(
        "align-items",
        match flow.alignment {
            Alignment::Start => "flex-start",
            Alignment::Center => "center",
            Alignment::End => "flex-end",
            Alignment::Baseline => "baseline",
        }
        .into(),
    );
    if flow.gap > 0.0 {
        d.insert("gap", px(flow.gap));
    }
    if flow.wrap {
        d.insert("flex-wrap", "wrap".into());
    }
    if !flow.padding.is_zero() {
        d.insert("padding", padding_value(&flow.padding));
    }
}

fn padding_value(p: &Padding) -> String {
    if p.is_uniform() {
        px(p.top)
    } else if p.is_symmetric() {
        format!("{} {}", px(p.top), px(p.left))
    } else {
        format!("{} {} {} {}", px(p.top), px(p.right), px(p.bottom), px(p.left))
    }
}

/// CSS value of one background layer.
fn layer_value(paint: &Paint, node: &IrNode, single: bool) -> String {
    match &paint.kind {
        PaintKind::Solid { color } if single => color.color.to_css(),
        PaintKind::Solid { color } => {
            let c = color.color.to_css();
            format!("linear-gradient({}, {})", c, c)
        }
        PaintKind::LinearGradient { angle, stops } => css_linear_gradient(*angle, stops),
        PaintKind::Image { scale_mode, .. } => {
            let url = placeholder_image(node.geometry.width, node.geometry.height);
            match scale_mode {
                ScaleMode::Tile => format!("url({}) repeat", url),
                ScaleMode::Fit => format!("url({}) center / contain no-repeat", url),
                ScaleMode::Fill | ScaleMode::Crop => format!("url({}) center / cover no-repeat", url),
            }
        }
    }
}

/// CSS `background` value of a fill stack. CSS lists the topmost layer first.
pub(crate) fn background_value(fills: &[Paint], node: &IrNode) -> String {
    let single = fills.len() == 1;
    fills
        .iter()
        .rev()
        .map(|p| layer_value(p, node, single))
        .collect::<Vec<_>>()
        .join(", ")
}

fn background_declarations(d: &mut Declarations, fills: &[Paint], node: &IrNode) {
    if fills.is_empty() {
        return;
    }
    let single = fills.len() == 1;
    d.insert("background", background_value(fills, node));

    if fills.iter().any(|p| p.blend_mode != BlendMode::Normal) {
        if single {
            d.insert("mix-blend-mode", fills[0].blend_mode.css_name().into());
        } else {
            let modes: Vec<&str> = fills.iter().rev().map(|p| p.blend_mode.css_name()).collect();
            d.insert("background-blend-mode", modes.join(", "));
        }
    }
}

fn text_paint_declarations(d: &mut Declarations, fills: &[Paint]) {
    match fills.last().map(|p| &p.kind) {
        Some(PaintKind::Solid { color }) => {
            d.insert("color", color.color.to_css());
        }
        Some(PaintKind::LinearGradient { angle, stops }) => {
            d.insert("background", css_linear_gradient(*angle, stops));
            d.insert("-webkit-background-clip", "text".into());
            d.insert("background-clip", "text".into());
            d.insert("color", "transparent".into());
        }
        Some(PaintKind::Image { .. }) | None => {}
    }
}

fn border_declarations(d: &mut Declarations, node: &IrNode, diag: &mut Diagnostics) {
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
    let width = px(stroke.weight);
    match &top.kind {
        PaintKind::Solid { color } => {
            let value = format!("{} solid {}", width, color.color.to_css());
            match stroke.align {
                StrokeAlign::Outside => {
                    d.insert("outline", value);
                }
                StrokeAlign::Inside => {
                    d.insert("border", value);
                    d.insert("box-sizing", "border-box".into());
                }
                StrokeAlign::Center => {
                    d.insert("border", value);
                }
            }
        }
        PaintKind::LinearGradient { angle, stops } => {
            d.insert("border", format!("{} solid", width));
            d.insert("border-image", format!("{} 1", css_linear_gradient(*angle, stops)));
        }
        PaintKind::Image { .. } => {
            diag.warn(&node.id, "image stroke is not supported and was omitted");
        }
    }
}

pub(crate) fn shadow_value(shadow: &Shadow, inset: bool) -> String {
    format!(
        "{}{} {} {} {} {}",
        if inset { "inset " } else { "" },
        px(shadow.offset_x),
        px(shadow.offset_y),
        px(shadow.blur),
        px(shadow.spread),
        shadow.color.color.to_css()
    )
}

fn effect_declarations(d: &mut Declarations, node: &IrNode, diag: &mut Diagnostics) {
    let is_text = node.kind == IrKind::Text;
    let mut shadows = Vec::new();
    let mut text_shadows = Vec::new();
    for effect in &node.style.effects {
        match effect {
            Effect::DropShadow(s) if is_text => text_shadows.push(format!(
                "{} {} {} {}",
                px(s.offset_x),
                px(s.offset_y),
                px(s.blur),
                s.color.color.to_css()
            )),
            Effect::InnerShadow(_) if is_text => {
                diag.warn(&node.id, "inner shadow on text is not supported and was omitted");
            }
            Effect::DropShadow(s) => shadows.push(shadow_value(s, false)),
            Effect::InnerShadow(s) => shadows.push(shadow_value(s, true)),
            Effect::LayerBlur { radius } => {
                d.insert("filter", format!("blur({})", px(radius / 2.0)));
            }
            Effect::BackgroundBlur { radius } => {
                d.insert("backdrop-filter", format!("blur({})", px(radius / 2.0)));
            }
        }
    }
    if !shadows.is_empty() {
        d.insert("box-shadow", shadows.join(", "));
    }
    if !text_shadows.is_empty() {
        d.insert("text-shadow", text_shadows.join(", "));
    }
}

/// Typography declarations; also used for the text-styles block.
pub(crate) fn typography_declarations(t: &Typography) -> Declarations {
    let mut d = Declarations::new();
    let family = if t.family.contains(' ') {
        format!("'{}'", t.family)
    } else {
        t.family.clone()
    };
    d.insert("font-family", family);
    d.insert("font-size", px(t.size));
    d.insert("font-weight", t.weight.to_string());
    if t.italic {
        d.insert("font-style", "italic".into());
    }
    if let Some(line_height) = t.line_height {
        d.insert("line-height", px(line_height));
    }
    if t.letter_spacing != 0.0 {
        d.insert("letter-spacing", px(t.letter_spacing));
    }
    match t.align_horizontal {
        TextAlign::Left => {}
        TextAlign::Center => {
            d.insert("text-align", "center".into());
        }
        TextAlign::Right => {
            d.insert("text-align", "right".into());
        }
        TextAlign::Justified => {
            d.insert("text-align", "justify".into());
        }
    }
    match t.text_case {
        TextCase::Original => {}
        TextCase::Upper => {
            d.insert("text-transform", "uppercase".into());
        }
        TextCase::Lower => {
            d.insert("text-transform", "lowercase".into());
        }
        TextCase::Title => {
            d.insert("text-transform", "capitalize".into());
        }
    }
    match t.decoration {
        TextDecoration::None => {}
        TextDecoration::Underline => {
            d.insert("text-decoration", "underline".into());
        }
        TextDecoration::Strikethrough => {
            d.insert("text-decoration", "line-through".into());
        }
    }
    d
}

/// Layer name with every dash run collapsed, safe inside both comment forms.
fn comment_safe(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch == '-' && out.ends_with('-') {
            continue;
        }
        out.push(ch);
    }
    out.replace("*/", "* /")
}
