//! Text-style aggregation.
//!
//! Groups every text node of a selection by typography equality and gives
//! each distinct group a stable name. Groups appear in the order their first
//! member is met in a depth-first walk.

use crate::format::{fmt_num, weight_name};
use sprig_core::{walk_forest, IrNode, NodeId, Typography};
use sprig_resolver::NameRegistry;

/// One distinct text style and the nodes that use it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyleGroup {
    /// Unique snake_case name, e.g. `inter_16_bold`
    pub name: String,
    pub typography: Typography,
    pub node_ids: Vec<NodeId>,
    /// Text of the first member, for previews
    pub sample: String,
}

/// Collect the distinct text styles of a forest.
pub fn aggregate_text_styles(forest: &[IrNode]) -> Vec<TextStyleGroup> {
    let mut groups: Vec<TextStyleGroup> = Vec::new();
    walk_forest(forest, &mut |node| {
        let Some(text) = &node.style.text else {
            return;
        };
        match groups.iter_mut().find(|g| g.typography == text.typography) {
            Some(group) => group.node_ids.push(node.id.clone()),
            None => groups.push(TextStyleGroup {
                name: String::new(),
                typography: text.typography.clone(),
                node_ids: vec![node.id.clone()],
                sample: text.characters.clone(),
            }),
        }
    });

    let mut names = NameRegistry::new();
    for group in &mut groups {
        let t = &group.typography;
        let base = format!(
            "{} {} {}{}",
            t.family,
            fmt_num(t.size),
            weight_name(t.weight),
            if t.italic { " italic" } else { "" }
        );
        group.name = names.register(&base, "text_style");
    }

    tracing::debug!(groups = groups.len(), "text styles aggregated");
    groups
}
