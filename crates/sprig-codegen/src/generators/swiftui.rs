//! SwiftUI code generator.

use super::{note_text_image_fill, note_unsupported, root_type_names, CodeGenerator};
use crate::error::Result;
use crate::format::{escape_swift, fmt_num, fmt_precision, placeholder_image};
use crate::templates::TemplateEngine;
use crate::text_styles::TextStyleGroup;
use convert_case::{Case, Casing};
use serde_json::json;
use sprig_core::{
    Alignment, CodeArtifact, ColorRef, CornerRadius, Diagnostics, Direction, Distribution,
    Effect, FlowLayout, Framework, GenerationMode, GradientStop, IrKind, IrNode, Language,
    LayoutMode, Padding, Paint, PaintKind, Placement, Settings, ShapeHint, SizingMode,
    StrokeAlign, TextAlign, TextAlignVertical, TextDecoration, TextStyle, Typography,
};

const INDENT: usize = 4;

/// A view expression with an optional trailing-closure body and modifiers.
#[derive(Debug, Clone)]
struct View {
    /// Written as a `// comment` line above the view
    comment: Option<String>,
    head: String,
    children: Vec<View>,
    /// Modifier calls without the leading dot
    modifiers: Vec<String>,
}

impl View {
    fn new(head: impl Into<String>) -> Self {
        Self {
            comment: None,
            head: head.into(),
            children: Vec::new(),
            modifiers: Vec::new(),
        }
    }

    fn with_children(mut self, children: Vec<View>) -> Self {
        self.children = children;
        self
    }

    fn modifier(&mut self, modifier: impl Into<String>) {
        self.modifiers.push(modifier.into());
    }

    fn render(&self, indent: usize) -> String {
        let pad = " ".repeat(indent);
        let mut out = match &self.comment {
            Some(comment) => format!("{}// {}\n", pad, comment),
            None => String::new(),
        };
        out.push_str(&pad);
        out.push_str(&self.head);
        if !self.children.is_empty() {
            out.push_str(" {\n");
            for child in &self.children {
                out.push_str(&child.render(indent + INDENT));
                out.push('\n');
            }
            out.push_str(&pad);
            out.push('}');
        }
        let modifier_pad = " ".repeat(indent + INDENT);
        for modifier in &self.modifiers {
            out.push('\n');
            out.push_str(&modifier_pad);
            out.push('.');
            out.push_str(&modifier.replace('\n', &format!("\n{}", modifier_pad)));
        }
        out
    }
}

/// SwiftUI code generator.
pub struct SwiftUIGenerator<'a> {
    engine: TemplateEngine<'a>,
}

impl<'a> SwiftUIGenerator<'a> {
    /// Create a new SwiftUI generator.
    pub fn new() -> Self {
        let mut engine = TemplateEngine::new();
        Self::register_templates(&mut engine);
        Self { engine }
    }

    fn register_templates(engine: &mut TemplateEngine) {
        let _ = engine.register_template(
            "swiftui_app",
            r#"import SwiftUI

{{#each views}}
struct {{name}}View: View {
    var body: some View {
{{indent body 8}}
    }
}

{{/each}}
struct ContentView: View {
    var body: some View {
        VStack(alignment: .leading) {
{{#each views}}
            {{name}}View()
{{/each}}
        }
    }
}

#if DEBUG
struct ContentView_Previews: PreviewProvider {
    static var previews: some View {
        ContentView()
    }
}
#endif

@main
struct GeneratedApp: App {
    var body: some Scene {
        WindowGroup {
            ContentView()
        }
    }
}
"#,
        );
    }
}

impl<'a> Default for SwiftUIGenerator<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CodeGenerator for SwiftUIGenerator<'a> {
    fn framework(&self) -> Framework {
        Framework::SwiftUI
    }

    fn generate(
        &self,
        forest: &[IrNode],
        settings: &Settings,
        diag: &mut Diagnostics,
    ) -> Result<Vec<CodeArtifact>> {
        let code = match settings.swiftui_generation_mode {
            GenerationMode::Snippet => {
                let mut roots: Vec<View> = forest
                    .iter()
                    .map(|n| view(n, settings.show_layer_names, diag))
                    .collect();
                let root = if roots.len() == 1 {
                    roots.remove(0)
                } else {
                    View::new("VStack(alignment: .leading)").with_children(roots)
                };
                root.render(0)
            }
            GenerationMode::Full => {
                let views: Vec<_> = forest
                    .iter()
                    .zip(root_type_names(forest))
                    .map(|(n, name)| {
                        json!({
                            "name": name,
                            "body": view(n, settings.show_layer_names, diag).render(0),
                        })
                    })
                    .collect();
                self.engine.render("swiftui_app", &json!({ "views": views }))?
            }
        };
        Ok(vec![CodeArtifact::new("Code", code, Language::Swift)])
    }

    fn generate_text_styles(&self, groups: &[TextStyleGroup], _settings: &Settings) -> String {
        groups
            .iter()
            .map(|g| {
                let mut content = View::new("content");
                content.modifiers = typography_modifiers(&g.typography);
                format!(
                    "struct {}: ViewModifier {{\n    func body(content: Content) -> some View {{\n{}\n    }}\n}}",
                    g.name.to_case(Case::Pascal),
                    content.render(8)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn text_styles_language(&self, _settings: &Settings) -> Language {
        Language::Swift
    }

    fn color_value(&self, color: &ColorRef) -> String {
        swift_color(color)
    }

    fn gradient_value(&self, angle: f64, stops: &[GradientStop]) -> String {
        linear_gradient(angle, stops)
    }
}

fn view(node: &IrNode, layer_names: bool, diag: &mut Diagnostics) -> View {
    note_unsupported(node, diag);
    let style = &node.style;
    let shape = shape_of(node);

    let mut v = match (&style.text, node.kind) {
        (Some(text), _) => {
            note_text_image_fill(node, diag);
            text_view(node, text)
        }
        (None, IrKind::Image) => View::new(format!(
            "AsyncImage(url: URL(string: \"{}\"))",
            placeholder_image(node.geometry.width, node.geometry.height)
        )),
        (None, IrKind::Vector { shape: ShapeHint::Line }) => {
            let mut line = View::new("Rectangle()");
            if let Some(color) = style.top_solid_stroke() {
                line.modifier(format!("fill({})", swift_color(color)));
            }
            line
        }
        (None, IrKind::Vector { .. }) if node.children.is_empty() => {
            let mut shape_view = View::new(shape.clone());
            if style.fills.len() > 1 {
                diag.warn(&node.id, "multiple fills; only the topmost is emitted");
            }
            if let Some(top) = style.fills.last() {
                shape_view.modifier(format!("fill({})", fill_style(top, node)));
            }
            shape_view
        }
        _ => container_view(node, layer_names, diag),
    };

    // Padding sits inside the frame and background
    if let Some(flow) = node.layout.flow() {
        for modifier in padding_modifiers(&flow.padding) {
            v.modifier(modifier);
        }
    }
    if let Some(frame) = frame_modifier(node) {
        v.modifier(frame);
    }

    let is_shape = matches!(node.kind, IrKind::Vector { .. }) && node.children.is_empty();
    if style.text.is_none() && !is_shape && node.kind != IrKind::Image {
        if let Some(background) = background_modifier(node, &shape) {
            v.modifier(background);
        }
    }
    if !matches!(node.kind, IrKind::Vector { shape: ShapeHint::Line }) {
        if let Some(overlay) = stroke_modifier(node, &shape, diag) {
            v.modifier(overlay);
        }
    }
    if style.clips_content || (node.kind == IrKind::Image && shape != "Rectangle()") {
        v.modifier(format!("clipShape({})", shape));
    }

    for effect in &style.effects {
        match effect {
            Effect::DropShadow(s) => {
                if s.spread != 0.0 {
                    diag.warn(&node.id, "shadow spread is not supported and was ignored");
                }
                v.modifier(format!(
                    "shadow(color: {}, radius: {}, x: {}, y: {})",
                    swift_color(&s.color),
                    fmt_num(s.blur / 2.0),
                    fmt_num(s.offset_x),
                    fmt_num(s.offset_y)
                ));
            }
            Effect::InnerShadow(_) => {
                diag.warn(&node.id, "inner shadow is not supported and was omitted");
            }
            Effect::LayerBlur { radius } => {
                v.modifier(format!("blur(radius: {})", fmt_num(radius / 2.0)));
            }
            Effect::BackgroundBlur { .. } => {
                diag.warn(&node.id, "background blur is not supported and was omitted");
            }
        }
    }

    if style.opacity < 1.0 {
        v.modifier(format!("opacity({})", fmt_num(style.opacity)));
    }
    if node.geometry.rotation != 0.0 {
        v.modifier(format!(
            "rotationEffect(.degrees({}), anchor: .topLeading)",
            fmt_num(-node.geometry.rotation)
        ));
    }
    if let Placement::Absolute { left, top } = node.layout.placement {
        v.modifier(format!("offset(x: {}, y: {})", fmt_num(left), fmt_num(top)));
    }
    if layer_names {
        v.comment = node.name.as_ref().map(|n| n.replace('\n', " "));
    }
    v
}

fn container_view(node: &IrNode, layer_names: bool, diag: &mut Diagnostics) -> View {
    if node.children.is_empty() {
        return View::new("Color.clear");
    }
    match &node.layout.mode {
        LayoutMode::Flow(flow) => {
            let mut flowing = Vec::new();
            let mut positioned = Vec::new();
            for child in &node.children {
                let child_view = view(child, layer_names, diag);
                if child.layout.is_absolute_child() {
                    positioned.push(child_view);
                } else {
                    flowing.push(child_view);
                }
            }
            if flow.wrap {
                diag.warn(
                    &node.id,
                    "wrapping layout is not supported; children are laid out in one line",
                );
            }
            let stack = stack_view(flow, flowing);
            if positioned.is_empty() {
                stack
            } else {
                let mut children = vec![stack];
                children.extend(positioned);
                View::new("ZStack(alignment: .topLeading)").with_children(children)
            }
        }
        LayoutMode::Absolute => {
            let children = node
                .children
                .iter()
                .map(|c| view(c, layer_names, diag))
                .collect();
            View::new("ZStack(alignment: .topLeading)").with_children(children)
        }
    }
}

fn stack_view(flow: &FlowLayout, children: Vec<View>) -> View {
    let (name, alignment) = match flow.direction {
        Direction::Horizontal => (
            "HStack",
            match flow.alignment {
                Alignment::Start => ".top",
                Alignment::Center => ".center",
                Alignment::End => ".bottom",
                Alignment::Baseline => ".firstTextBaseline",
            },
        ),
        Direction::Vertical => (
            "VStack",
            match flow.alignment {
                Alignment::Start | Alignment::Baseline => ".leading",
                Alignment::Center => ".center",
                Alignment::End => ".trailing",
            },
        ),
    };

    if flow.distribution == Distribution::SpaceBetween {
        let mut spaced = Vec::with_capacity(children.len() * 2);
        for (i, child) in children.into_iter().enumerate() {
            if i > 0 {
                spaced.push(View::new("Spacer()"));
            }
            spaced.push(child);
        }
        return View::new(format!("{}(alignment: {}, spacing: 0)", name, alignment))
            .with_children(spaced);
    }
    View::new(format!(
        "{}(alignment: {}, spacing: {})",
        name,
        alignment,
        fmt_num(flow.gap)
    ))
    .with_children(children)
}

fn text_view(node: &IrNode, text: &TextStyle) -> View {
    let t = &text.typography;
    let content = t.text_case.apply(&text.characters);
    let mut v = View::new(format!("Text(\"{}\")", escape_swift(&content)));
    v.modifiers = typography_modifiers(t);
    match node.style.fills.last().map(|p| &p.kind) {
        Some(PaintKind::Solid { color }) => {
            v.modifier(format!("foregroundColor({})", swift_color(color)));
        }
        Some(PaintKind::LinearGradient { angle, stops }) => {
            v.modifier(format!("foregroundStyle({})", linear_gradient(*angle, stops)));
        }
        Some(PaintKind::Image { .. }) | None => {}
    }
    match t.align_horizontal {
        TextAlign::Left | TextAlign::Justified => {}
        TextAlign::Center => v.modifier("multilineTextAlignment(.center)"),
        TextAlign::Right => v.modifier("multilineTextAlignment(.trailing)"),
    }
    v
}

/// Font modifiers shared by text views and the text-styles block.
fn typography_modifiers(t: &Typography) -> Vec<String> {
    let mut m = vec![format!(
        "font(.custom(\"{}\", size: {}).weight({}))",
        escape_swift(&t.family),
        fmt_num(t.size),
        swift_weight(t.weight)
    )];
    if t.italic {
        m.push("italic()".to_string());
    }
    if let Some(line_height) = t.line_height {
        if line_height > t.size {
            m.push(format!("lineSpacing({})", fmt_num(line_height - t.size)));
        }
    }
    if t.letter_spacing != 0.0 {
        m.push(format!("tracking({})", fmt_num(t.letter_spacing)));
    }
    match t.decoration {
        TextDecoration::None => {}
        TextDecoration::Underline => m.push("underline()".to_string()),
        TextDecoration::Strikethrough => m.push("strikethrough()".to_string()),
    }
    m
}

fn swift_weight(weight: u16) -> &'static str {
    match weight {
        0..=149 => ".ultraLight",
        150..=249 => ".thin",
        250..=349 => ".light",
        350..=449 => ".regular",
        450..=549 => ".medium",
        550..=649 => ".semibold",
        650..=749 => ".bold",
        750..=849 => ".heavy",
        _ => ".black",
    }
}

/// Outline shape of a node, used for fills, strokes, and clipping.
fn shape_of(node: &IrNode) -> String {
    if matches!(node.kind, IrKind::Vector { shape: ShapeHint::Ellipse }) {
        return "Ellipse()".to_string();
    }
    match node.style.corner_radius {
        CornerRadius::None => "Rectangle()".to_string(),
        CornerRadius::Uniform(r) => format!("RoundedRectangle(cornerRadius: {})", fmt_num(r)),
        CornerRadius::PerCorner([tl, tr, br, bl]) => format!(
            "UnevenRoundedRectangle(topLeadingRadius: {}, bottomLeadingRadius: {}, bottomTrailingRadius: {}, topTrailingRadius: {})",
            fmt_num(tl),
            fmt_num(bl),
            fmt_num(br),
            fmt_num(tr)
        ),
    }
}

fn fill_style(paint: &Paint, node: &IrNode) -> String {
    match &paint.kind {
        PaintKind::Solid { color } => swift_color(color),
        PaintKind::LinearGradient { angle, stops } => linear_gradient(*angle, stops),
        PaintKind::Image { .. } => format!(
            "ImagePaint(image: Image(\"{}\"))",
            placeholder_image(node.geometry.width, node.geometry.height)
        ),
    }
}

/// One background layer view.
fn fill_layer(paint: &Paint, node: &IrNode, shape: &str) -> View {
    match &paint.kind {
        PaintKind::Solid { color } if shape == "Rectangle()" => View::new(swift_color(color)),
        PaintKind::Image { .. } => {
            let mut image = View::new(format!(
                "AsyncImage(url: URL(string: \"{}\"))",
                placeholder_image(node.geometry.width, node.geometry.height)
            ));
            if shape != "Rectangle()" {
                image.modifier(format!("clipShape({})", shape));
            }
            image
        }
        _ => {
            let mut layer = View::new(shape.to_string());
            layer.modifier(format!("fill({})", fill_style(paint, node)));
            layer
        }
    }
}

/// `.background(...)` of a container, layers stacked bottom first.
fn background_modifier(node: &IrNode, shape: &str) -> Option<String> {
    let fills = node.style.fills.as_slice();
    match fills {
        [] => None,
        [single] => Some(format!("background({})", fill_layer(single, node, shape).render(0))),
        _ => {
            let layers = fills.iter().map(|p| fill_layer(p, node, shape)).collect();
            let stack = View::new("ZStack").with_children(layers);
            Some(format!("background({})", stack.render(0)))
        }
    }
}

fn stroke_modifier(node: &IrNode, shape: &str, diag: &mut Diagnostics) -> Option<String> {
    let style = &node.style;
    let stroke = style.stroke.as_ref()?;
    let top = style.strokes.last()?;
    if style.strokes.len() > 1 {
        diag.warn(&node.id, "multiple strokes; only the topmost is emitted");
    }
    let paint = match &top.kind {
        PaintKind::Solid { color } => swift_color(color),
        PaintKind::LinearGradient { angle, stops } => linear_gradient(*angle, stops),
        PaintKind::Image { .. } => {
            diag.warn(&node.id, "image stroke is not supported and was omitted");
            return None;
        }
    };
    let width = fmt_num(stroke.weight);
    Some(match stroke.align {
        StrokeAlign::Inside => format!(
            "overlay({}.strokeBorder({}, lineWidth: {}))",
            shape, paint, width
        ),
        StrokeAlign::Center => format!("overlay({}.stroke({}, lineWidth: {}))", shape, paint, width),
        StrokeAlign::Outside => format!(
            "overlay({}.stroke({}, lineWidth: {}).padding(-{}))",
            shape,
            paint,
            width,
            fmt_num(stroke.weight / 2.0)
        ),
    })
}

fn padding_modifiers(p: &Padding) -> Vec<String> {
    if p.is_zero() {
        Vec::new()
    } else if p.is_uniform() {
        vec![format!("padding({})", fmt_num(p.top))]
    } else if p.is_symmetric() {
        let mut m = Vec::new();
        if p.left > 0.0 {
            m.push(format!("padding(.horizontal, {})", fmt_num(p.left)));
        }
        if p.top > 0.0 {
            m.push(format!("padding(.vertical, {})", fmt_num(p.top)));
        }
        m
    } else {
        vec![format!(
            "padding(EdgeInsets(top: {}, leading: {}, bottom: {}, trailing: {}))",
            fmt_num(p.top),
            fmt_num(p.left),
            fmt_num(p.bottom),
            fmt_num(p.right)
        )]
    }
}

/// Alignment of content inside a frame larger than the content.
fn frame_alignment(node: &IrNode) -> Option<&'static str> {
    let (horizontal, vertical) = if let Some(text) = &node.style.text {
        let t = &text.typography;
        (
            match t.align_horizontal {
                TextAlign::Center => 1,
                TextAlign::Right => 2,
                TextAlign::Left | TextAlign::Justified => 0,
            },
            match t.align_vertical {
                TextAlignVertical::Top => 0,
                TextAlignVertical::Center => 1,
                TextAlignVertical::Bottom => 2,
            },
        )
    } else {
        match &node.layout.mode {
            LayoutMode::Absolute => (0, 0),
            LayoutMode::Flow(flow) => {
                let main = match flow.distribution {
                    Distribution::Start | Distribution::SpaceBetween => 0,
                    Distribution::Center => 1,
                    Distribution::End => 2,
                };
                let cross = match flow.alignment {
                    Alignment::Start | Alignment::Baseline => 0,
                    Alignment::Center => 1,
                    Alignment::End => 2,
                };
                match flow.direction {
                    Direction::Horizontal => (main, cross),
                    Direction::Vertical => (cross, main),
                }
            }
        }
    };
    let name = match (vertical, horizontal) {
        (0, 0) => ".topLeading",
        (0, 1) => ".top",
        (0, _) => ".topTrailing",
        (1, 0) => ".leading",
        (1, 1) => return None,
        (1, _) => ".trailing",
        (_, 0) => ".bottomLeading",
        (_, 1) => ".bottom",
        _ => ".bottomTrailing",
    };
    Some(name)
}

fn frame_modifier(node: &IrNode) -> Option<String> {
    let sizing = node.layout.sizing;
    let is_line = matches!(node.kind, IrKind::Vector { shape: ShapeHint::Line });
    let height = match (is_line, &node.style.stroke, sizing.vertical) {
        (true, Some(stroke), SizingMode::Fixed(_)) => SizingMode::Fixed(stroke.weight),
        (_, _, vertical) => vertical,
    };
    let axes = [("Width", sizing.horizontal), ("Height", height)];
    let flexible = axes.iter().any(|(_, s)| s.is_fill());

    let mut args = Vec::new();
    for (axis, mode) in axes {
        match (mode, flexible) {
            (SizingMode::Fixed(v), false) => {
                args.push(format!("{}: {}", axis.to_lowercase(), fmt_num(v)))
            }
            (SizingMode::Fixed(v), true) => {
                args.push(format!("min{}: {}", axis, fmt_num(v)));
                args.push(format!("max{}: {}", axis, fmt_num(v)));
            }
            (SizingMode::Fill, _) => args.push(format!("max{}: .infinity", axis)),
            (SizingMode::Hug, _) => {}
        }
    }
    if args.is_empty() {
        return None;
    }
    let has_children = !node.children.is_empty() || node.style.text.is_some();
    if has_children {
        if let Some(alignment) = frame_alignment(node) {
            args.push(format!("alignment: {}", alignment));
        }
    }
    Some(format!("frame({})", args.join(", ")))
}

/// `Color.x` for a palette match, otherwise RGB components.
fn swift_color(color: &ColorRef) -> String {
    let c = color.color;
    let alpha = f64::from(c.a);
    match &color.palette {
        Some(p) if c.is_opaque() => p.name.clone(),
        Some(p) => format!("{}.opacity({})", p.name, fmt_num(alpha)),
        None => {
            let component = |v: f32| fmt_precision(f64::from(v), 3);
            if c.is_opaque() {
                format!(
                    "Color(red: {}, green: {}, blue: {})",
                    component(c.r),
                    component(c.g),
                    component(c.b)
                )
            } else {
                format!(
                    "Color(red: {}, green: {}, blue: {}, opacity: {})",
                    component(c.r),
                    component(c.g),
                    component(c.b),
                    fmt_num(alpha)
                )
            }
        }
    }
}

fn unit_point(x: f64, y: f64) -> String {
    let named = match ((x * 2.0).round() as i32, (y * 2.0).round() as i32) {
        _ if (x * 2.0).fract() != 0.0 || (y * 2.0).fract() != 0.0 => None,
        (0, 0) => Some(".topLeading"),
        (1, 0) => Some(".top"),
        (2, 0) => Some(".topTrailing"),
        (0, 1) => Some(".leading"),
        (1, 1) => Some(".center"),
        (2, 1) => Some(".trailing"),
        (0, 2) => Some(".bottomLeading"),
        (1, 2) => Some(".bottom"),
        (2, 2) => Some(".bottomTrailing"),
        _ => None,
    };
    match named {
        Some(n) => n.to_string(),
        None => format!("UnitPoint(x: {}, y: {})", fmt_num(x), fmt_num(y)),
    }
}

/// `LinearGradient` with start and end on the unit box edge along the CSS
/// angle (0 points up, clockwise).
fn linear_gradient(angle: f64, stops: &[GradientStop]) -> String {
    let radians = angle.to_radians();
    let (dx, dy) = (radians.sin(), -radians.cos());
    let scale = dx.abs().max(dy.abs()) * 2.0;
    // Adding zero folds -0.0 into 0.0
    let round = |v: f64| (v * 100.0).round() / 100.0 + 0.0;
    let (ex, ey) = (round(0.5 + dx / scale), round(0.5 + dy / scale));
    let (sx, sy) = (round(0.5 - dx / scale), round(0.5 - dy / scale));
    let stops = stops
        .iter()
        .map(|s| {
            format!(
                ".init(color: {}, location: {})",
                swift_color(&s.color),
                fmt_num(s.position)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "LinearGradient(stops: [{}], startPoint: {}, endPoint: {})",
        stops,
        unit_point(sx, sy),
        unit_point(ex, ey)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_core::{Color, Geometry, LayoutDescriptor, NodeId, PaletteMatch, Shadow, Sizing, StyleDescriptor};

    fn node(id: &str, kind: IrKind, placement: Placement) -> IrNode {
        IrNode {
            id: NodeId::new(id),
            kind,
            name: Some(id.to_string()),
            unique_name: format!("layer_{}", id),
            geometry: Geometry {
                width: 120.0,
                height: 60.0,
                ..Default::default()
            },
            style: StyleDescriptor::default(),
            layout: LayoutDescriptor {
                mode: LayoutMode::Absolute,
                sizing: Sizing::fixed(120.0, 60.0),
                placement,
            },
            unsupported_kind: None,
            children: Vec::new(),
        }
    }

    fn text(id: &str, characters: &str) -> IrNode {
        let mut n = node(id, IrKind::Text, Placement::Flow);
        n.layout.sizing = Sizing {
            horizontal: SizingMode::Hug,
            vertical: SizingMode::Hug,
        };
        n.style.text = Some(TextStyle {
            characters: characters.to_string(),
            typography: Typography::default(),
        });
        n
    }

    #[test]
    fn test_vstack_with_children_in_order() {
        let mut root = node("1", IrKind::Container, Placement::Root);
        root.layout.mode = LayoutMode::Flow(FlowLayout::vertical().with_gap(12.0));
        root.children = vec![text("2", "Title"), text("3", "Body")];
        let mut diag = Diagnostics::new();
        let code = &SwiftUIGenerator::new()
            .generate(&[root], &Settings::for_framework(Framework::SwiftUI), &mut diag)
            .unwrap()[0]
            .body;
        let lines: Vec<&str> = code.lines().collect();
        assert_eq!(lines[0], "VStack(alignment: .leading, spacing: 12) {");
        assert_eq!(lines[1], "    Text(\"Title\")");
        assert_eq!(lines[2], "        .font(.custom(\"Inter\", size: 12).weight(.regular))");
        assert_eq!(lines[3], "    Text(\"Body\")");
        assert_eq!(lines[5], "}");
        assert_eq!(lines[6], "    .frame(width: 120, height: 60, alignment: .topLeading)");
    }

    #[test]
    fn test_space_between_inserts_spacers() {
        let mut root = node("1", IrKind::Container, Placement::Root);
        root.layout.mode = LayoutMode::Flow(
            FlowLayout::horizontal().with_distribution(Distribution::SpaceBetween),
        );
        root.children = vec![text("2", "A"), text("3", "B")];
        let mut diag = Diagnostics::new();
        let code = view(&root, false, &mut diag).render(0);
        assert!(code.starts_with("HStack(alignment: .top, spacing: 0) {\n"));
        assert!(code.contains("    Spacer()\n"));
    }

    #[test]
    fn test_absolute_children_use_offset() {
        let mut root = node("1", IrKind::Container, Placement::Root);
        let mut child = node("2", IrKind::Vector { shape: ShapeHint::Ellipse }, Placement::Absolute { left: 8.0, top: 4.0 });
        child.style.fills.push(Paint::solid(Color::BLACK));
        root.children = vec![child];
        let mut diag = Diagnostics::new();
        let code = view(&root, false, &mut diag).render(0);
        assert!(code.starts_with("ZStack(alignment: .topLeading) {\n    Ellipse()\n"));
        assert!(code.contains("        .fill(Color(red: 0, green: 0, blue: 0))"));
        assert!(code.contains("        .offset(x: 8, y: 4)"));
    }

    #[test]
    fn test_background_layers_bottom_first() {
        let mut card = node("1", IrKind::Container, Placement::Root);
        card.style.fills.push(Paint::solid(Color::WHITE));
        card.style.fills.push(Paint::solid(Color::BLACK));
        let background = background_modifier(&card, "Rectangle()").unwrap();
        assert_eq!(
            background,
            "background(ZStack {\n    Color(red: 1, green: 1, blue: 1)\n    Color(red: 0, green: 0, blue: 0)\n})"
        );
    }

    #[test]
    fn test_fill_frame_and_warnings() {
        let mut card = node("9", IrKind::Container, Placement::Root);
        card.layout.sizing.horizontal = SizingMode::Fill;
        card.style.effects.push(Effect::DropShadow(Shadow {
            color: ColorRef::raw(Color::BLACK),
            offset_x: 0.0,
            offset_y: 4.0,
            blur: 8.0,
            spread: 2.0,
        }));
        let mut diag = Diagnostics::new();
        let code = view(&card, false, &mut diag).render(0);
        assert!(code.contains(".frame(maxWidth: .infinity, minHeight: 60, maxHeight: 60)"));
        assert!(code.contains(".shadow(color: Color(red: 0, green: 0, blue: 0), radius: 4, x: 0, y: 4)"));
        assert_eq!(diag.warnings()[0].reason, "shadow spread is not supported and was ignored");
    }

    #[test]
    fn test_layer_name_comments() {
        let mut root = node("1", IrKind::Container, Placement::Root);
        root.name = Some("Hero".into());
        root.children = vec![text("2", "Hi")];
        root.children[0].name = Some("Headline".into());
        let mut diag = Diagnostics::new();
        let code = view(&root, true, &mut diag).render(0);
        assert!(code.starts_with("// Hero\nZStack(alignment: .topLeading) {\n    // Headline\n    Text(\"Hi\")"));
    }

    #[test]
    fn test_swift_colors() {
        let named = ColorRef {
            color: Color::rgba(0.0, 0.48, 1.0, 0.5),
            palette: Some(PaletteMatch {
                name: "Color.blue".into(),
                exact: false,
            }),
        };
        assert_eq!(swift_color(&named), "Color.blue.opacity(0.5)");
        assert_eq!(
            swift_color(&ColorRef::raw(Color::rgb(0.2, 0.4, 0.8))),
            "Color(red: 0.2, green: 0.4, blue: 0.8)"
        );
    }

    #[test]
    fn test_gradient_points() {
        let stops = vec![
            GradientStop {
                position: 0.0,
                color: ColorRef::raw(Color::WHITE),
            },
            GradientStop {
                position: 1.0,
                color: ColorRef::raw(Color::BLACK),
            },
        ];
        let gradient = linear_gradient(180.0, &stops);
        assert!(gradient.ends_with("startPoint: .top, endPoint: .bottom)"));
    }

    #[test]
    fn test_full_mode_scaffold() {
        let settings = Settings {
            swiftui_generation_mode: GenerationMode::Full,
            ..Settings::for_framework(Framework::SwiftUI)
        };
        let mut diag = Diagnostics::new();
        let code = &SwiftUIGenerator::new()
            .generate(&[node("1", IrKind::Container, Placement::Root)], &settings, &mut diag)
            .unwrap()[0]
            .body;
        assert!(code.starts_with("import SwiftUI\n"));
        assert!(code.contains("struct Layer1View: View {"));
        assert!(code.contains("        Color.clear\n            .frame(width: 120, height: 60)"));
        assert!(code.contains("            Layer1View()"));
        assert!(code.contains("#if DEBUG"));
        assert!(code.contains("@main"));
    }

    #[test]
    fn test_full_mode_view_names_do_not_collide() {
        let settings = Settings {
            swiftui_generation_mode: GenerationMode::Full,
            ..Settings::for_framework(Framework::SwiftUI)
        };
        let mut first = node("1", IrKind::Container, Placement::Root);
        first.unique_name = "card_1".into();
        let mut second = node("2", IrKind::Container, Placement::Root);
        second.unique_name = "card1".into();
        let mut diag = Diagnostics::new();
        let code = &SwiftUIGenerator::new()
            .generate(&[first, second], &settings, &mut diag)
            .unwrap()[0]
            .body;
        assert_eq!(code.matches("struct Card1View: View {").count(), 1);
        assert_eq!(code.matches("struct Card12View: View {").count(), 1);
        assert!(code.contains("            Card1View()\n            Card12View()"));
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
        let swift = SwiftUIGenerator::new().generate_text_styles(&[group], &Settings::default());
        assert_eq!(
            swift,
            "struct Inter16Bold: ViewModifier {\n    func body(content: Content) -> some View {\n        content\n            .font(.custom(\"Inter\", size: 16).weight(.bold))\n    }\n}"
        );
    }
}
