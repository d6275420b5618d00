//! Layout resolver.

use crate::auto_layout::{flow_from_native, native_auto_layout};
use sprig_core::{
    Direction, Geometry, IrKind, LayoutDescriptor, LayoutMode, Placement, SceneLayoutAlign,
    SceneNode, ScenePositioning, SceneSizing, SceneTextAutoResize, Settings, Sizing, SizingMode,
};

/// Layout of the IR parent a node is resolved against.
#[derive(Debug, Clone, Copy)]
pub enum ParentLayout<'a> {
    /// The node is a selection root.
    Root,
    /// The node sits inside a parent with this layout mode.
    Node(&'a LayoutMode),
}

impl<'a> ParentLayout<'a> {
    fn flow_direction(&self) -> Option<Direction> {
        match self {
            Self::Node(LayoutMode::Flow(flow)) => Some(flow.direction),
            _ => None,
        }
    }
}

/// Resolves [`LayoutDescriptor`]s for scene nodes.
pub struct LayoutResolver<'a> {
    settings: &'a Settings,
}

impl<'a> LayoutResolver<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// How the node arranges its own children.
    pub fn classify(&self, node: &SceneNode, kind: IrKind) -> LayoutMode {
        if !matches!(kind, IrKind::Container | IrKind::Instance) {
            return LayoutMode::Absolute;
        }
        let mode = native_auto_layout(node, self.settings)
            .and_then(flow_from_native)
            .map(LayoutMode::Flow)
            .unwrap_or(LayoutMode::Absolute);
        tracing::trace!(node = %node.id, flow = matches!(mode, LayoutMode::Flow(_)), "classified");
        mode
    }

    /// Resolve the full layout descriptor of a node.
    ///
    /// `geometry` is the node's geometry relative to its IR parent, which may
    /// differ from the native offsets when pass-through groups were removed.
    pub fn resolve(
        &self,
        node: &SceneNode,
        kind: IrKind,
        geometry: &Geometry,
        parent: ParentLayout<'_>,
    ) -> LayoutDescriptor {
        let mode = self.classify(node, kind);
        let sizing = self.sizing(node, kind, &mode, geometry, parent);
        let placement = match parent {
            ParentLayout::Root => Placement::Root,
            ParentLayout::Node(LayoutMode::Flow(_))
                if node.layout_positioning != ScenePositioning::Absolute =>
            {
                Placement::Flow
            }
            ParentLayout::Node(_) => Placement::Absolute {
                left: geometry.x,
                top: geometry.y,
            },
        };

        LayoutDescriptor {
            mode,
            sizing,
            placement,
        }
    }

    fn sizing(
        &self,
        node: &SceneNode,
        kind: IrKind,
        mode: &LayoutMode,
        geometry: &Geometry,
        parent: ParentLayout<'_>,
    ) -> Sizing {
        let in_flow = parent.flow_direction().is_some()
            && node.layout_positioning != ScenePositioning::Absolute;
        let can_hug = matches!(mode, LayoutMode::Flow(_)) || kind == IrKind::Text;

        let requested = |axis: Direction| -> Option<SizingMode> {
            let explicit = match axis {
                Direction::Horizontal => node.layout_sizing_horizontal,
                Direction::Vertical => node.layout_sizing_vertical,
            };
            if let Some(explicit) = explicit {
                return match explicit {
                    SceneSizing::Fixed => None,
                    SceneSizing::Hug => Some(SizingMode::Hug),
                    SceneSizing::Fill => Some(SizingMode::Fill),
                    SceneSizing::Unknown => None,
                };
            }

            // Older files describe fill through grow and stretch
            if let Some(parent_direction) = parent.flow_direction() {
                if parent_direction == axis && node.layout_grow > 0.0 {
                    return Some(SizingMode::Fill);
                }
                if parent_direction != axis && node.layout_align == SceneLayoutAlign::Stretch {
                    return Some(SizingMode::Fill);
                }
            }

            if kind == IrKind::Text {
                match (node.text_auto_resize, axis) {
                    (SceneTextAutoResize::WidthAndHeight, _) => return Some(SizingMode::Hug),
                    (SceneTextAutoResize::Height, Direction::Vertical) => {
                        return Some(SizingMode::Hug)
                    }
                    _ => {}
                }
            }
            None
        };

        let resolve_axis = |axis: Direction, measured: f64| -> SizingMode {
            match requested(axis) {
                Some(SizingMode::Hug) if can_hug => SizingMode::Hug,
                Some(SizingMode::Fill) if in_flow => SizingMode::Fill,
                Some(wanted) => {
                    tracing::debug!(
                        node = %node.id,
                        ?axis,
                        ?wanted,
                        "sizing not applicable here, using measured size"
                    );
                    SizingMode::Fixed(measured)
                }
                None => SizingMode::Fixed(measured),
            }
        };

        let mut sizing = Sizing {
            horizontal: resolve_axis(Direction::Horizontal, geometry.width),
            vertical: resolve_axis(Direction::Vertical, geometry.height),
        };

        if matches!(parent, ParentLayout::Root) && self.settings.responsive_root {
            sizing.horizontal = SizingMode::Fill;
        }

        sizing
    }
}
