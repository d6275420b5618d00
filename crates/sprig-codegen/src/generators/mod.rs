//! Code generators for the supported targets.

mod flutter;
mod html;
mod swiftui;
mod tailwind;

pub use flutter::FlutterGenerator;
pub use html::{HtmlGenerator, HtmlPreview};
pub use swiftui::SwiftUIGenerator;
pub use tailwind::TailwindGenerator;

use std::collections::HashSet;

use crate::error::Result;
use crate::text_styles::TextStyleGroup;
use convert_case::{Case, Casing};
use sprig_core::{
    CodeArtifact, ColorRef, Diagnostics, Framework, GradientStop, IrNode, Language, Settings,
};

/// Common trait for code generators.
pub trait CodeGenerator {
    /// Target this generator writes.
    fn framework(&self) -> Framework;

    /// Target framework name.
    fn framework_name(&self) -> &'static str {
        self.framework().name()
    }

    /// Generate the code artifacts for a forest, in emission order.
    fn generate(
        &self,
        forest: &[IrNode],
        settings: &Settings,
        diag: &mut Diagnostics,
    ) -> Result<Vec<CodeArtifact>>;

    /// One style definition per text-style group.
    fn generate_text_styles(&self, groups: &[TextStyleGroup], settings: &Settings) -> String;

    /// Language of the text-styles block.
    fn text_styles_language(&self, settings: &Settings) -> Language;

    /// A color as this target writes it.
    fn color_value(&self, color: &ColorRef) -> String;

    /// A linear gradient as this target writes it.
    fn gradient_value(&self, angle: f64, stops: &[GradientStop]) -> String;
}

/// The generator for a target.
pub fn generator_for(framework: Framework) -> Box<dyn CodeGenerator> {
    match framework {
        Framework::Html => Box::new(HtmlGenerator::new()),
        Framework::Tailwind => Box::new(TailwindGenerator::new()),
        Framework::Flutter => Box::new(FlutterGenerator::new()),
        Framework::SwiftUI => Box::new(SwiftUIGenerator::new()),
    }
}

/// Pascal-case type names for the roots of a forest. Names that collide
/// after case conversion get a numeric suffix.
pub(crate) fn root_type_names(forest: &[IrNode]) -> Vec<String> {
    let mut used = HashSet::new();
    forest
        .iter()
        .map(|node| {
            let base = node.unique_name.to_case(Case::Pascal);
            let mut name = base.clone();
            let mut suffix = 2;
            while !used.insert(name.clone()) {
                name = format!("{}{}", base, suffix);
                suffix += 1;
            }
            name
        })
        .collect()
}

/// Warn when the topmost fill of a text node is an image, which no target
/// can paint glyphs with.
pub(crate) fn note_text_image_fill(node: &IrNode, diag: &mut Diagnostics) {
    if let Some(sprig_core::PaintKind::Image { .. }) = node.style.fills.last().map(|p| &p.kind) {
        diag.warn(&node.id, "image fill on text is not supported and was omitted");
    }
}

/// Record the warning every emitter gives for a node kept as a generic
/// container.
pub(crate) fn note_unsupported(node: &IrNode, diag: &mut Diagnostics) {
    if let Some(native) = &node.unsupported_kind {
        diag.warn(
            &node.id,
            format!("unsupported node type '{}' rendered as a plain container", native),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_core::{
        BlendMode, Geometry, IrKind, LayoutDescriptor, LayoutMode, NodeId, Paint, PaintKind,
        Placement, ScaleMode, Sizing, StyleDescriptor, TextStyle, Typography,
    };

    fn image_filled_text() -> IrNode {
        let mut style = StyleDescriptor::default();
        style.fills.push(Paint {
            kind: PaintKind::Image {
                image_ref: "a1b2".into(),
                scale_mode: ScaleMode::Fill,
            },
            opacity: 1.0,
            blend_mode: BlendMode::Normal,
        });
        style.text = Some(TextStyle {
            characters: "Sale".into(),
            typography: Typography::default(),
        });
        IrNode {
            id: NodeId::new("8:1"),
            kind: IrKind::Text,
            name: None,
            unique_name: "sale".into(),
            geometry: Geometry {
                width: 60.0,
                height: 20.0,
                ..Default::default()
            },
            style,
            layout: LayoutDescriptor {
                mode: LayoutMode::Absolute,
                sizing: Sizing::fixed(60.0, 20.0),
                placement: Placement::Root,
            },
            unsupported_kind: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_root_type_names_stay_unique_after_casing() {
        let mut forest = Vec::new();
        for (id, unique) in [("8:1", "card_1"), ("8:2", "card1"), ("8:3", "card_1_2"), ("8:4", "hero")] {
            let mut node = image_filled_text();
            node.id = NodeId::new(id);
            node.unique_name = unique.into();
            forest.push(node);
        }
        assert_eq!(
            root_type_names(&forest),
            vec!["Card1", "Card12", "Card122", "Hero"]
        );
    }

    #[test]
    fn test_image_fill_on_text_warns_in_every_target() {
        let forest = vec![image_filled_text()];
        for framework in Framework::ALL {
            let mut diag = Diagnostics::new();
            let artifacts = generator_for(framework)
                .generate(&forest, &Settings::for_framework(framework), &mut diag)
                .unwrap();
            assert!(artifacts[0].body.contains("Sale"), "{}", framework);

            let expected = match framework {
                Framework::Flutter => "non-solid text fill is not supported and was omitted",
                _ => "image fill on text is not supported and was omitted",
            };
            let matching: Vec<_> = diag
                .warnings()
                .iter()
                .filter(|w| w.reason == expected)
                .collect();
            assert_eq!(matching.len(), 1, "{}", framework);
            assert_eq!(matching[0].node_id.as_str(), "8:1");
        }
    }
}
