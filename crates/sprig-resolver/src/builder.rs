//! IR builder.
//!
//! Converts the host's selection into an IR forest in one recursive pass:
//! kinds are mapped, styles and layouts resolved, names registered. The
//! builder never fails for a single node; an unrecognized node becomes a
//! plain container and a warning is recorded.

use sprig_core::{
    Diagnostics, Geometry, IrKind, IrNode, NodeId, Placement, Result, SceneNode,
    ScenePaintType, ScenePositioning, Settings, ShapeHint, SprigError,
};
use sprig_layout::{LayoutResolver, ParentLayout};

use crate::naming::NameRegistry;
use crate::style::StyleResolver;

/// Build the IR forest for a selection.
///
/// `parent` is the native parent of the selected roots, when the host
/// provides one; it decides whether the roots may fill their container.
/// Fails only when nothing visible is selected.
pub fn build_forest(
    roots: &[SceneNode],
    parent: Option<&SceneNode>,
    settings: &Settings,
    diag: &mut Diagnostics,
) -> Result<Vec<IrNode>> {
    let mut builder = IrBuilder::new(settings);
    let forest = builder.build(roots, parent, diag);
    if forest.is_empty() {
        return Err(SprigError::EmptySelection);
    }
    tracing::debug!(roots = forest.len(), "IR forest built");
    Ok(forest)
}

/// Map a native node type to an IR kind.
///
/// Returns `None` for types without an IR equivalent.
pub fn kind_of(node: &SceneNode) -> Option<IrKind> {
    let has_image_fill = || {
        node.fills
            .iter()
            .any(|p| p.visible && p.paint_type == ScenePaintType::Image)
    };
    let kind = match node.node_type.as_str() {
        "FRAME" | "COMPONENT" | "COMPONENT_SET" | "SECTION" => IrKind::Container,
        "INSTANCE" => IrKind::Instance,
        "GROUP" => IrKind::Group,
        "TEXT" => IrKind::Text,
        "RECTANGLE" | "ELLIPSE" if has_image_fill() => IrKind::Image,
        "RECTANGLE" => IrKind::Vector {
            shape: ShapeHint::Rectangle,
        },
        "ELLIPSE" => IrKind::Vector {
            shape: ShapeHint::Ellipse,
        },
        "LINE" => IrKind::Vector {
            shape: ShapeHint::Line,
        },
        "VECTOR" | "STAR" | "POLYGON" | "BOOLEAN_OPERATION" => IrKind::Vector {
            shape: ShapeHint::Path,
        },
        _ => return None,
    };
    Some(kind)
}

/// Recursive IR builder.
pub struct IrBuilder<'a> {
    styles: StyleResolver<'a>,
    layouts: LayoutResolver<'a>,
    names: NameRegistry,
}

impl<'a> IrBuilder<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            styles: StyleResolver::new(settings),
            layouts: LayoutResolver::new(settings),
            names: NameRegistry::new(),
        }
    }

    /// Build the ordered forest for `roots`, skipping invisible ones.
    pub fn build(
        &mut self,
        roots: &[SceneNode],
        parent: Option<&SceneNode>,
        diag: &mut Diagnostics,
    ) -> Vec<IrNode> {
        let parent_mode = parent.map(|p| {
            let kind = kind_of(p).unwrap_or(IrKind::Container);
            self.layouts.classify(p, kind)
        });
        let parent_layout = match &parent_mode {
            Some(mode) => ParentLayout::Node(mode),
            None => ParentLayout::Root,
        };

        let mut forest = Vec::with_capacity(roots.len());
        for (index, root) in roots.iter().enumerate() {
            let fallback_id = format!("root:{}", index);
            if let Some(mut node) =
                self.build_node(root, &fallback_id, parent_layout, (0.0, 0.0), diag)
            {
                node.layout.placement = Placement::Root;
                forest.push(node);
            }
        }
        forest
    }

    fn build_node(
        &mut self,
        node: &SceneNode,
        fallback_id: &str,
        parent: ParentLayout<'_>,
        offset: (f64, f64),
        diag: &mut Diagnostics,
    ) -> Option<IrNode> {
        if !node.visible {
            return None;
        }

        if let Some(only_child) = pass_through_child(node) {
            tracing::debug!(group = %node.id, "flattening pass-through group");
            let offset = (offset.0 + node.x, offset.1 + node.y);
            return self.build_node(only_child, fallback_id, parent, offset, diag);
        }

        let id = if node.id.is_empty() {
            NodeId::new(fallback_id)
        } else {
            NodeId::new(node.id.as_str())
        };

        let (kind, unsupported_kind) = match kind_of(node) {
            Some(kind) => (kind, None),
            None => {
                diag.warn(
                    &id,
                    format!(
                        "unsupported node type '{}' rendered as a plain container",
                        node.node_type
                    ),
                );
                (IrKind::Container, Some(node.node_type.clone()))
            }
        };

        let geometry = Geometry {
            x: node.x + offset.0,
            y: node.y + offset.1,
            width: node.width.max(0.0),
            height: node.height.max(0.0),
            rotation: node.rotation,
        };

        let style = if unsupported_kind.is_some() {
            Default::default()
        } else {
            self.styles.resolve(node, &id, kind, diag)
        };
        let layout = self.layouts.resolve(node, kind, &geometry, parent);

        let name = (!node.name.is_empty()).then(|| node.name.clone());
        let unique_name = self.names.register(&node.name, fallback_name(kind));

        let mut children = Vec::new();
        if kind.is_container_like() {
            for (index, child) in node.children.iter().enumerate() {
                let child_fallback = format!("{}:{}", id, index);
                if let Some(child) = self.build_node(
                    child,
                    &child_fallback,
                    ParentLayout::Node(&layout.mode),
                    (0.0, 0.0),
                    diag,
                ) {
                    children.push(child);
                }
            }
        } else if !node.children.is_empty() && kind != IrKind::Text {
            tracing::debug!(node = %id, "children of a leaf shape are not emitted");
        }

        Some(IrNode {
            id,
            kind,
            name,
            unique_name,
            geometry,
            style,
            layout,
            unsupported_kind,
            children,
        })
    }
}

/// The single child of a group that can be removed without changing
/// layout or appearance.
fn pass_through_child(node: &SceneNode) -> Option<&SceneNode> {
    if node.node_type != "GROUP"
        || node.has_visual_style()
        || node.opacity < 1.0
        || node.rotation != 0.0
        || node.layout_positioning == ScenePositioning::Absolute
        || node.layout_grow > 0.0
    {
        return None;
    }
    let mut visible = node.children.iter().filter(|c| c.visible);
    let only = visible.next()?;
    if visible.next().is_some() || only.layout_positioning == ScenePositioning::Absolute {
        return None;
    }
    Some(only)
}

fn fallback_name(kind: IrKind) -> &'static str {
    match kind {
        IrKind::Container => "frame",
        IrKind::Text => "text",
        IrKind::Vector { .. } => "shape",
        IrKind::Image => "image",
        IrKind::Group => "group",
        IrKind::Instance => "instance",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_core::{
        Color, LayoutMode, SceneAutoLayout, SceneLayoutMode, ScenePaint, SceneSizing, SizingMode,
    };

    fn build(roots: &[SceneNode]) -> (Vec<IrNode>, Diagnostics) {
        let settings = Settings::default();
        let mut diag = Diagnostics::new();
        let forest = build_forest(roots, None, &settings, &mut diag).unwrap();
        (forest, diag)
    }

    fn rect(id: &str, x: f64, y: f64) -> SceneNode {
        SceneNode::new(id, "RECTANGLE")
            .with_name("Box")
            .with_bounds(x, y, 10.0, 10.0)
            .with_fill(ScenePaint::solid(Color::BLACK))
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(kind_of(&SceneNode::new("1", "COMPONENT")), Some(IrKind::Container));
        assert_eq!(kind_of(&SceneNode::new("1", "INSTANCE")), Some(IrKind::Instance));
        assert_eq!(
            kind_of(&SceneNode::new("1", "STAR")),
            Some(IrKind::Vector { shape: ShapeHint::Path })
        );
        let image = SceneNode::new("1", "RECTANGLE").with_fill(ScenePaint::image("abc"));
        assert_eq!(kind_of(&image), Some(IrKind::Image));
        assert_eq!(kind_of(&SceneNode::new("1", "STICKY")), None);
    }

    #[test]
    fn test_invisible_nodes_are_skipped() {
        let mut hidden = rect("2", 0.0, 0.0);
        hidden.visible = false;
        let frame = SceneNode::new("1", "FRAME")
            .with_child(hidden)
            .with_child(rect("3", 0.0, 0.0));
        let (forest, _) = build(&[frame]);
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].id.as_str(), "3");
    }

    #[test]
    fn test_empty_selection_is_an_error() {
        let settings = Settings::default();
        let mut diag = Diagnostics::new();
        let mut hidden = rect("1", 0.0, 0.0);
        hidden.visible = false;
        assert!(matches!(
            build_forest(&[hidden], None, &settings, &mut diag),
            Err(SprigError::EmptySelection)
        ));
        assert!(matches!(
            build_forest(&[], None, &settings, &mut diag),
            Err(SprigError::EmptySelection)
        ));
    }

    #[test]
    fn test_pass_through_group_is_flattened() {
        let group = SceneNode::new("g", "GROUP")
            .with_bounds(20.0, 30.0, 10.0, 10.0)
            .with_child(rect("r", 5.0, 5.0));
        let frame = SceneNode::new("f", "FRAME")
            .with_bounds(0.0, 0.0, 100.0, 100.0)
            .with_child(group);
        let (forest, _) = build(&[frame]);
        let child = &forest[0].children[0];
        assert_eq!(child.id.as_str(), "r");
        assert_eq!(child.layout.placement, Placement::Absolute { left: 25.0, top: 35.0 });
    }

    #[test]
    fn test_styled_group_is_kept() {
        let group = SceneNode::new("g", "GROUP")
            .with_fill(ScenePaint::solid(Color::WHITE))
            .with_child(rect("r", 0.0, 0.0));
        let (forest, _) = build(&[group]);
        assert_eq!(forest[0].kind, IrKind::Group);
        assert_eq!(forest[0].children.len(), 1);
    }

    #[test]
    fn test_unknown_kind_warns_and_continues() {
        let sticky = SceneNode::new("9:9", "STICKY").with_fill(ScenePaint::solid(Color::WHITE));
        let frame = SceneNode::new("1", "FRAME")
            .with_child(sticky)
            .with_child(rect("2", 0.0, 0.0));
        let (forest, diag) = build(&[frame]);
        let children = &forest[0].children;
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind, IrKind::Container);
        assert_eq!(children[0].unsupported_kind.as_deref(), Some("STICKY"));
        assert!(children[0].style.fills.is_empty());
        assert_eq!(diag.warnings()[0].node_id.as_str(), "9:9");
    }

    #[test]
    fn test_ids_and_names_are_deterministic() {
        let frame = SceneNode::new("", "FRAME")
            .with_name("Card")
            .with_child(rect("", 0.0, 0.0))
            .with_child(rect("", 0.0, 0.0));
        let (forest, _) = build(&[frame.clone()]);
        assert_eq!(forest[0].id.as_str(), "root:0");
        assert_eq!(forest[0].children[1].id.as_str(), "root:0:1");
        assert_eq!(forest[0].children[0].unique_name, "box");
        assert_eq!(forest[0].children[1].unique_name, "box_2");

        let (again, _) = build(&[frame]);
        assert_eq!(forest, again);
    }

    #[test]
    fn test_parent_reference_enables_fill_for_roots() {
        let mut parent = SceneNode::new("p", "FRAME");
        parent.auto_layout = SceneAutoLayout {
            layout_mode: SceneLayoutMode::Vertical,
            ..Default::default()
        };
        let mut root = rect("r", 0.0, 0.0);
        root.layout_sizing_horizontal = Some(SceneSizing::Fill);

        let settings = Settings::default();
        let mut diag = Diagnostics::new();
        let forest = build_forest(&[root.clone()], Some(&parent), &settings, &mut diag).unwrap();
        assert_eq!(forest[0].layout.sizing.horizontal, SizingMode::Fill);
        assert_eq!(forest[0].layout.placement, Placement::Root);

        let forest = build_forest(&[root], None, &settings, &mut diag).unwrap();
        assert_eq!(forest[0].layout.sizing.horizontal, SizingMode::Fixed(10.0));
    }

    const TOOLBAR: &str = r#"{
        "id": "4:1",
        "name": "Toolbar",
        "type": "FRAME",
        "width": 300,
        "height": 48,
        "inferredAutoLayout": {"layoutMode": "HORIZONTAL", "itemSpacing": 12},
        "children": [
            {"id": "4:2", "name": "Title", "type": "TEXT", "characters": "Inbox",
             "width": 120, "height": 20, "layoutSizingHorizontal": "FILL"},
            {"id": "4:3", "type": "RECTANGLE", "visible": false, "width": 4, "height": 4},
            {"id": "4:4", "type": "WIDGET", "width": 24, "height": 24}
        ]
    }"#;

    #[test]
    fn test_json_scene_with_inferred_layout() {
        let frame: SceneNode = serde_json::from_str(TOOLBAR).unwrap();
        let (forest, diag) = build(&[frame.clone()]);
        let root = &forest[0];
        match &root.layout.mode {
            LayoutMode::Flow(flow) => assert_eq!(flow.gap, 12.0),
            other => panic!("expected flow, got {:?}", other),
        }
        let ids: Vec<&str> = root.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["4:2", "4:4"]);
        assert_eq!(root.children[0].layout.sizing.horizontal, SizingMode::Fill);
        assert_eq!(root.children[0].layout.placement, Placement::Flow);
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].node_id.as_str(), "4:4");

        let settings = Settings {
            optimize_layout: false,
            ..Default::default()
        };
        let mut diag = Diagnostics::new();
        let forest = build_forest(&[frame], None, &settings, &mut diag).unwrap();
        assert_eq!(forest[0].layout.mode, LayoutMode::Absolute);
        assert_eq!(
            forest[0].children[0].layout.sizing.horizontal,
            SizingMode::Fixed(120.0)
        );
    }
}
