//! The framework-agnostic IR tree.
//!
//! An IR forest is built once per invocation from the host's selection and
//! is not mutated afterwards; every emitter reads the same forest.

use crate::layout::LayoutDescriptor;
use crate::style::StyleDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an IR node, derived from the source node id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shape drawn by a vector node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeHint {
    Rectangle,
    Ellipse,
    Line,
    /// Arbitrary path; emitted as a sized placeholder
    Path,
}

/// Kind of an IR node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum IrKind {
    Container,
    Text,
    Vector { shape: ShapeHint },
    Image,
    Group,
    Instance,
}

impl IrKind {
    /// Whether the node may hold children.
    pub fn is_container_like(&self) -> bool {
        matches!(self, Self::Container | Self::Group | Self::Instance)
    }
}

/// Position (parent-relative), size, and rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, counter-clockwise
    pub rotation: f64,
}

/// A node of the IR tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrNode {
    pub id: NodeId,
    pub kind: IrKind,
    /// Layer name as authored
    pub name: Option<String>,
    /// Sanitized identifier, unique within the forest
    pub unique_name: String,
    pub geometry: Geometry,
    pub style: StyleDescriptor,
    pub layout: LayoutDescriptor,
    /// Native type of a node kept as a generic container
    pub unsupported_kind: Option<String>,
    pub children: Vec<IrNode>,
}

impl IrNode {
    /// Depth-first pre-order traversal.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a IrNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Text content, for text nodes.
    pub fn characters(&self) -> Option<&str> {
        self.style.text.as_ref().map(|t| t.characters.as_str())
    }
}

/// Depth-first pre-order traversal of a forest.
pub fn walk_forest<'a>(forest: &'a [IrNode], visit: &mut dyn FnMut(&'a IrNode)) {
    for root in forest {
        root.walk(visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutMode, Placement, Sizing};

    fn node(id: &str, children: Vec<IrNode>) -> IrNode {
        IrNode {
            id: NodeId::new(id),
            kind: IrKind::Container,
            name: None,
            unique_name: id.to_string(),
            geometry: Geometry::default(),
            style: StyleDescriptor::default(),
            layout: LayoutDescriptor {
                mode: LayoutMode::Absolute,
                sizing: Sizing::fixed(0.0, 0.0),
                placement: Placement::Root,
            },
            unsupported_kind: None,
            children,
        }
    }

    #[test]
    fn test_walk_is_preorder() {
        let forest = vec![
            node("a", vec![node("b", vec![node("c", vec![])]), node("d", vec![])]),
            node("e", vec![]),
        ];
        let mut seen = Vec::new();
        walk_forest(&forest, &mut |n| seen.push(n.id.as_str()));
        assert_eq!(seen, vec!["a", "b", "c", "d", "e"]);
    }
}
