//! Flutter code generator.

use super::{note_unsupported, root_type_names, CodeGenerator};
use crate::error::Result;
use crate::format::{escape_dart, fmt_double, fmt_num, fmt_precision, placeholder_image};
use crate::templates::TemplateEngine;
use crate::text_styles::TextStyleGroup;
use convert_case::{Case, Casing};
use serde_json::json;
use sprig_core::{
    Alignment, BlendMode, CodeArtifact, ColorRef, CornerRadius, Diagnostics, Direction,
    Distribution, Effect, FlowLayout, Framework, GenerationMode, GradientStop, IrKind, IrNode,
    Language, LayoutMode, Padding, PaintKind, Placement, ScaleMode, Settings, ShapeHint,
    SizingMode, StrokeAlign, TextAlign, TextDecoration, TextStyle, Typography,
};

/// Longest call that is still written on one line.
const INLINE_WIDTH: usize = 80;

/// A Dart expression.
#[derive(Debug, Clone)]
enum Expr {
    Raw(String),
    Call(Call),
    List(Vec<Expr>),
    /// An expression preceded by a `// name` line
    Commented(String, Box<Expr>),
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        Expr::Raw(s)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::Raw(s.to_string())
    }
}

impl From<Call> for Expr {
    fn from(c: Call) -> Self {
        Expr::Call(c)
    }
}

impl Expr {
    fn render(&self, indent: usize) -> String {
        match self {
            Expr::Raw(s) => s.clone(),
            Expr::Call(call) => call.render(indent),
            Expr::Commented(comment, inner) => format!(
                "// {}\n{}{}",
                comment,
                " ".repeat(indent),
                inner.render(indent)
            ),
            Expr::List(items) if items.is_empty() => "[]".to_string(),
            Expr::List(items) => {
                if items.iter().all(|i| matches!(i, Expr::Raw(_))) {
                    let inline = format!(
                        "[{}]",
                        items.iter().map(|i| i.render(0)).collect::<Vec<_>>().join(", ")
                    );
                    if indent + inline.len() <= INLINE_WIDTH {
                        return inline;
                    }
                }
                let pad = " ".repeat(indent + 2);
                let mut out = String::from("[\n");
                for item in items {
                    out.push_str(&pad);
                    out.push_str(&item.render(indent + 2));
                    out.push_str(",\n");
                }
                out.push_str(&" ".repeat(indent));
                out.push(']');
                out
            }
        }
    }
}

/// A constructor call with positional and named arguments.
#[derive(Debug, Clone)]
struct Call {
    name: String,
    args: Vec<(Option<&'static str>, Expr)>,
}

impl Call {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    fn positional(mut self, value: impl Into<Expr>) -> Self {
        self.args.push((None, value.into()));
        self
    }

    fn arg(mut self, name: &'static str, value: impl Into<Expr>) -> Self {
        self.args.push((Some(name), value.into()));
        self
    }

    fn arg_opt(self, name: &'static str, value: Option<impl Into<Expr>>) -> Self {
        match value {
            Some(v) => self.arg(name, v),
            None => self,
        }
    }

    fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// One line when every argument is a plain value and it fits, otherwise
    /// one argument per line with trailing commas.
    fn render(&self, indent: usize) -> String {
        if self.args.is_empty() {
            return format!("{}()", self.name);
        }
        let arg_text = |name: &Option<&str>, value: &Expr, indent: usize| match (name, value) {
            (Some(n), Expr::Commented(comment, inner)) => format!(
                "// {}\n{}{}: {}",
                comment,
                " ".repeat(indent),
                n,
                inner.render(indent)
            ),
            (Some(n), _) => format!("{}: {}", n, value.render(indent)),
            (None, _) => value.render(indent),
        };
        if self.args.iter().all(|(_, v)| matches!(v, Expr::Raw(_))) {
            let inline = format!(
                "{}({})",
                self.name,
                self.args
                    .iter()
                    .map(|(n, v)| arg_text(n, v, 0))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            if indent + inline.len() <= INLINE_WIDTH {
                return inline;
            }
        }
        let pad = " ".repeat(indent + 2);
        let mut out = format!("{}(\n", self.name);
        for (name, value) in &self.args {
            out.push_str(&pad);
            out.push_str(&arg_text(name, value, indent + 2));
            out.push_str(",\n");
        }
        out.push_str(&" ".repeat(indent));
        out.push(')');
        out
    }
}

/// Flutter code generator.
pub struct FlutterGenerator<'a> {
    engine: TemplateEngine<'a>,
}

impl<'a> FlutterGenerator<'a> {
    /// Create a new Flutter generator.
    pub fn new() -> Self {
        let mut engine = TemplateEngine::new();
        Self::register_templates(&mut engine);
        Self { engine }
    }

    fn register_templates(engine: &mut TemplateEngine) {
        let _ = engine.register_template(
            "flutter_app",
            r#"import 'package:flutter/material.dart';
{{#if needs_ui}}
import 'dart:ui';
{{/if}}

void main() {
  runApp(const MyApp());
}

class MyApp extends StatelessWidget {
  const MyApp({super.key});

  @override
  Widget build(BuildContext context) {
    return MaterialApp(
      home: Scaffold(
        body: SingleChildScrollView(
          child: Column(
            crossAxisAlignment: CrossAxisAlignment.start,
            children: [
{{#each widgets}}
              const {{name}}Widget(),
{{/each}}
            ],
          ),
        ),
      ),
    );
  }
}
{{#each widgets}}

class {{name}}Widget extends StatelessWidget {
  const {{name}}Widget({super.key});

  @override
  Widget build(BuildContext context) {
    return {{body}};
  }
}
{{/each}}
"#,
        );
    }
}

impl<'a> Default for FlutterGenerator<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CodeGenerator for FlutterGenerator<'a> {
    fn framework(&self) -> Framework {
        Framework::Flutter
    }

    fn generate(
        &self,
        forest: &[IrNode],
        settings: &Settings,
        diag: &mut Diagnostics,
    ) -> Result<Vec<CodeArtifact>> {
        let mut writer = WidgetWriter::new(settings);
        let code = match settings.flutter_generation_mode {
            GenerationMode::Snippet => {
                let mut roots: Vec<Expr> =
                    forest.iter().map(|n| writer.widget(n, None, diag)).collect();
                let root = if roots.len() == 1 {
                    roots.remove(0)
                } else {
                    Call::new("Column")
                        .arg("crossAxisAlignment", "CrossAxisAlignment.start")
                        .arg("children", Expr::List(roots))
                        .into()
                };
                root.render(0)
            }
            GenerationMode::Full => {
                let widgets: Vec<_> = forest
                    .iter()
                    .zip(root_type_names(forest))
                    .map(|(n, name)| {
                        json!({
                            "name": name,
                            "body": writer.widget(n, None, diag).render(4),
                        })
                    })
                    .collect();
                self.engine.render(
                    "flutter_app",
                    &json!({ "needs_ui": writer.needs_ui, "widgets": widgets }),
                )?
            }
        };
        Ok(vec![CodeArtifact::new("Code", code, Language::Dart)])
    }

    fn generate_text_styles(&self, groups: &[TextStyleGroup], _settings: &Settings) -> String {
        groups
            .iter()
            .map(|g| {
                let style = text_style_call(&g.typography);
                format!("final {} = {};", g.name.to_case(Case::Camel), style.render(0))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn text_styles_language(&self, _settings: &Settings) -> Language {
        Language::Dart
    }

    fn color_value(&self, color: &ColorRef) -> String {
        dart_color(color)
    }

    fn gradient_value(&self, angle: f64, stops: &[GradientStop]) -> String {
        linear_gradient(angle, stops).render(0)
    }
}

/// Builds widget expressions and tracks the imports they need.
#[derive(Default)]
struct WidgetWriter {
    layer_names: bool,
    /// `dart:ui` is needed for `ImageFilter`
    needs_ui: bool,
}

impl WidgetWriter {
    fn new(settings: &Settings) -> Self {
        Self {
            layer_names: settings.show_layer_names,
            needs_ui: false,
        }
    }

    fn widget(&mut self, node: &IrNode, parent: Option<&IrNode>, diag: &mut Diagnostics) -> Expr {
        note_unsupported(node, diag);
        let style = &node.style;

        let mut widget = match (&style.text, node.kind) {
            (Some(text), _) => self.text_widget(node, text, parent, diag),
            (None, IrKind::Image) => image_widget(node),
            _ => self.container_widget(node, parent, diag),
        };

        for effect in &style.effects {
            match effect {
                Effect::LayerBlur { radius } => {
                    self.needs_ui = true;
                    widget = Call::new("ImageFiltered")
                        .arg("imageFilter", blur_filter(*radius))
                        .arg("child", widget)
                        .into();
                }
                Effect::BackgroundBlur { radius } => {
                    self.needs_ui = true;
                    let backdrop = Call::new("BackdropFilter")
                        .arg("filter", blur_filter(*radius))
                        .arg("child", widget);
                    widget = Call::new("ClipRect").arg("child", backdrop).into();
                }
                Effect::InnerShadow(_) => {
                    diag.warn(&node.id, "inner shadow is not supported and was omitted");
                }
                Effect::DropShadow(_) => {}
            }
        }

        if style.opacity < 1.0 {
            widget = Call::new("Opacity")
                .arg("opacity", fmt_double(style.opacity))
                .arg("child", widget)
                .into();
        }

        if node.geometry.rotation != 0.0 {
            let radians = (-node.geometry.rotation).to_radians();
            widget = Call::new("Transform.rotate")
                .arg("angle", fmt_precision(radians, 4))
                .arg("alignment", "Alignment.topLeft")
                .arg("child", widget)
                .into();
        }

        match &node.name {
            Some(name) if self.layer_names => {
                Expr::Commented(name.replace('\n', " "), Box::new(widget))
            }
            _ => widget,
        }
    }

    /// A child wrapped for its placement in `parent`.
    fn child_widget(&mut self, child: &IrNode, parent: &IrNode, diag: &mut Diagnostics) -> Expr {
        let widget = self.widget(child, Some(parent), diag);
        match (child.layout.placement, parent.layout.flow()) {
            (Placement::Absolute { left, top }, _) => Call::new("Positioned")
                .arg("left", fmt_double(left))
                .arg("top", fmt_double(top))
                .arg("child", widget)
                .into(),
            (Placement::Flow, Some(flow))
                if !flow.wrap && child.layout.sizing.primary(flow.direction).is_fill() =>
            {
                Call::new("Expanded").arg("child", widget).into()
            }
            _ => widget,
        }
    }

    fn container_widget(
        &mut self,
        node: &IrNode,
        parent: Option<&IrNode>,
        diag: &mut Diagnostics,
    ) -> Expr {
        let style = &node.style;
        let width = size_value(node, Direction::Horizontal, parent);

        if matches!(node.kind, IrKind::Vector { shape: ShapeHint::Line }) {
            let color = style.top_solid_stroke().map(dart_color);
            let weight = style.stroke.as_ref().map(|s| fmt_double(s.weight));
            return Call::new("Container")
                .arg_opt("width", width)
                .arg_opt("height", weight)
                .arg_opt("color", color)
                .into();
        }

        let height = size_value(node, Direction::Vertical, parent);
        let child = self.children_widget(node, diag);
        let decoration = decoration(node, diag);
        let padding = node
            .layout
            .flow()
            .filter(|f| !f.padding.is_zero())
            .map(|f| edge_insets(&f.padding));

        let widget: Expr = match (decoration, padding) {
            (None, None) => {
                let sized = Call::new("SizedBox")
                    .arg_opt("width", width)
                    .arg_opt("height", height)
                    .arg_opt("child", child);
                if style.clips_content {
                    Call::new("ClipRect").arg("child", sized).into()
                } else {
                    sized.into()
                }
            }
            (decoration, padding) => {
                let clip = style.clips_content && decoration.is_some();
                Call::new("Container")
                    .arg_opt("width", width)
                    .arg_opt("height", height)
                    .arg_opt("padding", padding)
                    .arg_opt("clipBehavior", clip.then_some("Clip.antiAlias"))
                    .arg_opt("decoration", decoration)
                    .arg_opt("child", child)
                    .into()
            }
        };
        widget
    }

    fn children_widget(&mut self, node: &IrNode, diag: &mut Diagnostics) -> Option<Expr> {
        if node.children.is_empty() {
            return None;
        }
        match &node.layout.mode {
            LayoutMode::Flow(flow) => {
                let mut flowing = Vec::new();
                let mut positioned = Vec::new();
                for child in &node.children {
                    let widget = self.child_widget(child, node, diag);
                    if child.layout.is_absolute_child() {
                        positioned.push(widget);
                    } else {
                        flowing.push(widget);
                    }
                }
                let hug = node.layout.sizing.primary(flow.direction) == SizingMode::Hug;
                let flow_widget = flow_call(flow, hug, flowing);
                if positioned.is_empty() {
                    Some(flow_widget.into())
                } else {
                    let mut children = vec![Expr::from(flow_widget)];
                    children.extend(positioned);
                    Some(
                        Call::new("Stack")
                            .arg("clipBehavior", "Clip.none")
                            .arg("children", Expr::List(children))
                            .into(),
                    )
                }
            }
            LayoutMode::Absolute => {
                let children = node
                    .children
                    .iter()
                    .map(|c| self.child_widget(c, node, diag))
                    .collect();
                let stack = if node.style.clips_content {
                    Call::new("Stack")
                } else {
                    Call::new("Stack").arg("clipBehavior", "Clip.none")
                };
                Some(stack.arg("children", Expr::List(children)).into())
            }
        }
    }

    fn text_widget(
        &mut self,
        node: &IrNode,
        text: &TextStyle,
        parent: Option<&IrNode>,
        diag: &mut Diagnostics,
    ) -> Expr {
        let t = &text.typography;
        let content = t.text_case.apply(&text.characters);
        let mut style = text_style_call(t);

        match node.style.fills.last().map(|p| &p.kind) {
            Some(PaintKind::Solid { color }) => style = style.arg("color", dart_color(color)),
            Some(PaintKind::LinearGradient { .. }) | Some(PaintKind::Image { .. }) => {
                diag.warn(&node.id, "non-solid text fill is not supported and was omitted");
            }
            None => {}
        }
        let shadows: Vec<Expr> = node
            .style
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::DropShadow(s) => Some(
                    Call::new("Shadow")
                        .arg("color", dart_color(&s.color))
                        .arg("offset", offset(s.offset_x, s.offset_y))
                        .arg("blurRadius", fmt_double(s.blur))
                        .into(),
                ),
                _ => None,
            })
            .collect();
        if !shadows.is_empty() {
            style = style.arg("shadows", Expr::List(shadows));
        }

        let align = match t.align_horizontal {
            TextAlign::Left => None,
            TextAlign::Center => Some("TextAlign.center"),
            TextAlign::Right => Some("TextAlign.right"),
            TextAlign::Justified => Some("TextAlign.justify"),
        };
        let text_call = Call::new("Text")
            .positional(format!("'{}'", escape_dart(&content)))
            .arg_opt("textAlign", align)
            .arg("style", style);

        let width = size_value(node, Direction::Horizontal, parent);
        let height = size_value(node, Direction::Vertical, parent);
        if width.is_none() && height.is_none() {
            text_call.into()
        } else {
            Call::new("SizedBox")
                .arg_opt("width", width)
                .arg_opt("height", height)
                .arg("child", text_call)
                .into()
        }
    }
}

fn flow_call(flow: &FlowLayout, hug: bool, children: Vec<Expr>) -> Call {
    if flow.wrap {
        let alignment = match flow.distribution {
            Distribution::Start => "WrapAlignment.start",
            Distribution::Center => "WrapAlignment.center",
            Distribution::End => "WrapAlignment.end",
            Distribution::SpaceBetween => "WrapAlignment.spaceBetween",
        };
        let cross = match flow.alignment {
            Alignment::Center => "WrapCrossAlignment.center",
            Alignment::End => "WrapCrossAlignment.end",
            Alignment::Start | Alignment::Baseline => "WrapCrossAlignment.start",
        };
        let gap = (flow.gap > 0.0).then(|| fmt_double(flow.gap));
        return Call::new("Wrap")
            .arg_opt(
                "direction",
                (flow.direction == Direction::Vertical).then_some("Axis.vertical"),
            )
            .arg_opt("spacing", gap.clone())
            .arg_opt("runSpacing", gap)
            .arg("alignment", alignment)
            .arg("crossAxisAlignment", cross)
            .arg("children", Expr::List(children));
    }

    let name = match flow.direction {
        Direction::Horizontal => "Row",
        Direction::Vertical => "Column",
    };
    let main = match flow.distribution {
        Distribution::Start => None,
        Distribution::Center => Some("MainAxisAlignment.center"),
        Distribution::End => Some("MainAxisAlignment.end"),
        Distribution::SpaceBetween => Some("MainAxisAlignment.spaceBetween"),
    };
    let cross = match flow.alignment {
        Alignment::Start => Some("CrossAxisAlignment.start"),
        Alignment::Center => None,
        Alignment::End => Some("CrossAxisAlignment.end"),
        Alignment::Baseline => Some("CrossAxisAlignment.baseline"),
    };
    Call::new(name)
        .arg_opt("mainAxisSize", hug.then_some("MainAxisSize.min"))
        .arg_opt("mainAxisAlignment", main)
        .arg_opt("crossAxisAlignment", cross)
        .arg_opt(
            "textBaseline",
            (flow.alignment == Alignment::Baseline).then_some("TextBaseline.alphabetic"),
        )
        .arg_opt(
            "spacing",
            (flow.gap > 0.0 && flow.distribution != Distribution::SpaceBetween)
                .then(|| fmt_double(flow.gap)),
        )
        .arg("children", Expr::List(children))
}

/// Size along an axis, or `None` when the widget sizes itself or an
/// `Expanded` wrapper provides it.
fn size_value(node: &IrNode, axis: Direction, parent: Option<&IrNode>) -> Option<String> {
    let sizing = match axis {
        Direction::Horizontal => node.layout.sizing.horizontal,
        Direction::Vertical => node.layout.sizing.vertical,
    };
    match sizing {
        SizingMode::Fixed(v) => Some(fmt_double(v)),
        SizingMode::Hug => None,
        SizingMode::Fill => {
            let expanded = node.layout.placement == Placement::Flow
                && parent
                    .and_then(|p| p.layout.flow())
                    .is_some_and(|f| !f.wrap && f.direction == axis);
            (!expanded).then(|| "double.infinity".to_string())
        }
    }
}

fn decoration(node: &IrNode, diag: &mut Diagnostics) -> Option<Call> {
    let style = &node.style;
    let mut deco = Call::new("BoxDecoration");

    if style.fills.len() > 1 {
        diag.warn(&node.id, "multiple fills; only the topmost is emitted");
    }
    if let Some(top) = style.fills.last() {
        deco = match &top.kind {
            PaintKind::Solid { color } => deco.arg("color", dart_color(color)),
            PaintKind::LinearGradient { angle, stops } => {
                deco.arg("gradient", linear_gradient(*angle, stops))
            }
            PaintKind::Image { scale_mode, .. } => {
                let url = placeholder_image(node.geometry.width, node.geometry.height);
                let image = Call::new("DecorationImage")
                    .arg("image", format!("NetworkImage('{}')", url));
                let image = match scale_mode {
                    ScaleMode::Fit => image.arg("fit", "BoxFit.contain"),
                    ScaleMode::Tile => image.arg("repeat", "ImageRepeat.repeat"),
                    ScaleMode::Fill | ScaleMode::Crop => image.arg("fit", "BoxFit.cover"),
                };
                deco.arg("image", image)
            }
        };
        if top.blend_mode != BlendMode::Normal {
            deco = deco.arg(
                "backgroundBlendMode",
                format!("BlendMode.{}", top.blend_mode.css_name().to_case(Case::Camel)),
            );
        }
    }

    if let (Some(stroke), Some(top)) = (&style.stroke, style.strokes.last()) {
        if style.strokes.len() > 1 {
            diag.warn(&node.id, "multiple strokes; only the topmost is emitted");
        }
        match &top.kind {
            PaintKind::Solid { color } => {
                let align = match stroke.align {
                    StrokeAlign::Inside => "BorderSide.strokeAlignInside",
                    StrokeAlign::Center => "BorderSide.strokeAlignCenter",
                    StrokeAlign::Outside => "BorderSide.strokeAlignOutside",
                };
                deco = deco.arg(
                    "border",
                    Call::new("Border.all")
                        .arg("color", dart_color(color))
                        .arg("width", fmt_double(stroke.weight))
                        .arg("strokeAlign", align),
                );
            }
            PaintKind::LinearGradient { .. } | PaintKind::Image { .. } => {
                diag.warn(&node.id, "non-solid stroke is not supported and was omitted");
            }
        }
    }

    if matches!(node.kind, IrKind::Vector { shape: ShapeHint::Ellipse }) {
        deco = deco.arg("shape", "BoxShape.circle");
    } else {
        deco = deco.arg_opt("borderRadius", border_radius(style.corner_radius));
    }

    let shadows: Vec<Expr> = style
        .effects
        .iter()
        .filter_map(|e| match e {
            Effect::DropShadow(s) => Some(
                Call::new("BoxShadow")
                    .arg("color", dart_color(&s.color))
                    .arg("offset", offset(s.offset_x, s.offset_y))
                    .arg("blurRadius", fmt_double(s.blur))
                    .arg("spreadRadius", fmt_double(s.spread))
                    .into(),
            ),
            _ => None,
        })
        .collect();
    if !shadows.is_empty() {
        deco = deco.arg("boxShadow", Expr::List(shadows));
    }

    (!deco.is_empty()).then_some(deco)
}

fn border_radius(radius: CornerRadius) -> Option<Expr> {
    match radius {
        CornerRadius::None => None,
        CornerRadius::Uniform(r) => Some(format!("BorderRadius.circular({})", fmt_double(r)).into()),
        CornerRadius::PerCorner([tl, tr, br, bl]) => {
            let corner = |r: f64| format!("Radius.circular({})", fmt_double(r));
            Some(
                Call::new("BorderRadius.only")
                    .arg("topLeft", corner(tl))
                    .arg("topRight", corner(tr))
                    .arg("bottomRight", corner(br))
                    .arg("bottomLeft", corner(bl))
                    .into(),
            )
        }
    }
}

fn image_widget(node: &IrNode) -> Expr {
    let url = placeholder_image(node.geometry.width, node.geometry.height);
    let image = Call::new("Image.network")
        .positional(format!("'{}'", url))
        .arg_opt("width", node.layout.sizing.horizontal.fixed().map(fmt_double))
        .arg_opt("height", node.layout.sizing.vertical.fixed().map(fmt_double))
        .arg("fit", "BoxFit.cover");
    match border_radius(node.style.corner_radius) {
        Some(radius) => Call::new("ClipRRect")
            .arg("borderRadius", radius)
            .arg("child", image)
            .into(),
        None => image.into(),
    }
}

fn edge_insets(p: &Padding) -> String {
    if p.is_uniform() {
        format!("EdgeInsets.all({})", fmt_double(p.top))
    } else if p.is_symmetric() {
        format!(
            "EdgeInsets.symmetric(horizontal: {}, vertical: {})",
            fmt_double(p.left),
            fmt_double(p.top)
        )
    } else {
        format!(
            "EdgeInsets.only(left: {}, top: {}, right: {}, bottom: {})",
            fmt_double(p.left),
            fmt_double(p.top),
            fmt_double(p.right),
            fmt_double(p.bottom)
        )
    }
}

fn offset(x: f64, y: f64) -> String {
    format!("Offset({}, {})", fmt_double(x), fmt_double(y))
}

fn blur_filter(radius: f64) -> String {
    let sigma = fmt_double(radius / 2.0);
    format!("ImageFilter.blur(sigmaX: {}, sigmaY: {})", sigma, sigma)
}

/// `TextStyle(...)` without color; also used for the text-styles block.
fn text_style_call(t: &Typography) -> Call {
    let weight = ((f64::from(t.weight) / 100.0).round() as u16).clamp(1, 9) * 100;
    let line_height = t
        .line_height
        .filter(|_| t.size > 0.0)
        .map(|lh| fmt_precision(lh / t.size, 2));
    let decoration = match t.decoration {
        TextDecoration::None => None,
        TextDecoration::Underline => Some("TextDecoration.underline"),
        TextDecoration::Strikethrough => Some("TextDecoration.lineThrough"),
    };
    Call::new("TextStyle")
        .arg("fontFamily", format!("'{}'", escape_dart(&t.family)))
        .arg("fontSize", fmt_double(t.size))
        .arg("fontWeight", format!("FontWeight.w{}", weight))
        .arg_opt("fontStyle", t.italic.then_some("FontStyle.italic"))
        .arg_opt("height", line_height)
        .arg_opt(
            "letterSpacing",
            (t.letter_spacing != 0.0).then(|| fmt_double(t.letter_spacing)),
        )
        .arg_opt("decoration", decoration)
}

/// `Colors.x` for a palette match, otherwise `Color(0xAARRGGBB)`.
fn dart_color(color: &ColorRef) -> String {
    match &color.palette {
        Some(p) if color.color.is_opaque() => p.name.clone(),
        Some(p) => format!("{}.withOpacity({})", p.name, fmt_num(f64::from(color.color.a))),
        None => {
            let (r, g, b, a) = color.color.to_rgba8();
            format!("Color(0x{:02X}{:02X}{:02X}{:02X})", a, r, g, b)
        }
    }
}

/// `Alignment` of a point on the unit box edge.
fn alignment_name(x: f64, y: f64) -> String {
    let named = match (x as i32, y as i32) {
        _ if x.fract() != 0.0 || y.fract() != 0.0 => None,
        (-1, -1) => Some("topLeft"),
        (0, -1) => Some("topCenter"),
        (1, -1) => Some("topRight"),
        (-1, 0) => Some("centerLeft"),
        (1, 0) => Some("centerRight"),
        (-1, 1) => Some("bottomLeft"),
        (0, 1) => Some("bottomCenter"),
        (1, 1) => Some("bottomRight"),
        _ => None,
    };
    match named {
        Some(n) => format!("Alignment.{}", n),
        None => format!("Alignment({}, {})", fmt_num(x), fmt_num(y)),
    }
}

/// `LinearGradient` whose begin and end lie on the box edge along the CSS
/// angle (0 points up, clockwise).
fn linear_gradient(angle: f64, stops: &[GradientStop]) -> Call {
    let radians = angle.to_radians();
    let (dx, dy) = (radians.sin(), -radians.cos());
    let scale = dx.abs().max(dy.abs());
    let round = |v: f64| {
        let r = (v / scale * 100.0).round() / 100.0;
        if r == 0.0 {
            0.0
        } else {
            r
        }
    };
    let (ex, ey) = (round(dx), round(dy));
    let begin = alignment_name(if ex == 0.0 { 0.0 } else { -ex }, if ey == 0.0 { 0.0 } else { -ey });

    Call::new("LinearGradient")
        .arg("begin", begin)
        .arg("end", alignment_name(ex, ey))
        .arg(
            "colors",
            Expr::List(stops.iter().map(|s| dart_color(&s.color).into()).collect()),
        )
        .arg(
            "stops",
            Expr::List(stops.iter().map(|s| fmt_double(s.position).into()).collect()),
        )
}
