//! Native auto-layout to [`FlowLayout`].

use sprig_core::{
    Alignment, Direction, Distribution, FlowLayout, Padding, SceneAutoLayout, SceneCounterAlign,
    SceneLayoutMode, SceneLayoutWrap, SceneNode, ScenePrimaryAlign, Settings,
};

/// The auto-layout block that governs a node's children, if any.
///
/// Explicit auto-layout always wins. The host's inferred auto-layout is used
/// only when `optimize_layout` is enabled.
pub fn native_auto_layout<'n>(node: &'n SceneNode, settings: &Settings) -> Option<&'n SceneAutoLayout> {
    if is_flow(&node.auto_layout) {
        return Some(&node.auto_layout);
    }
    if settings.optimize_layout {
        let inferred = node.inferred_auto_layout.as_ref().filter(|a| is_flow(a));
        if inferred.is_some() {
            tracing::debug!(node = %node.id, "using inferred auto-layout");
        }
        return inferred;
    }
    None
}

fn is_flow(auto: &SceneAutoLayout) -> bool {
    matches!(
        auto.layout_mode,
        SceneLayoutMode::Horizontal | SceneLayoutMode::Vertical
    )
}

/// Convert a native auto-layout block. Returns `None` unless the block
/// has a horizontal or vertical layout mode.
pub fn flow_from_native(auto: &SceneAutoLayout) -> Option<FlowLayout> {
    let direction = match auto.layout_mode {
        SceneLayoutMode::Horizontal => Direction::Horizontal,
        SceneLayoutMode::Vertical => Direction::Vertical,
        SceneLayoutMode::None | SceneLayoutMode::Unknown => return None,
    };

    let distribution = match auto.primary_axis_align_items {
        ScenePrimaryAlign::Center => Distribution::Center,
        ScenePrimaryAlign::Max => Distribution::End,
        ScenePrimaryAlign::SpaceBetween => Distribution::SpaceBetween,
        ScenePrimaryAlign::Min | ScenePrimaryAlign::Unknown => Distribution::Start,
    };

    let alignment = match auto.counter_axis_align_items {
        SceneCounterAlign::Center => Alignment::Center,
        SceneCounterAlign::Max => Alignment::End,
        SceneCounterAlign::Baseline if direction == Direction::Horizontal => Alignment::Baseline,
        _ => Alignment::Start,
    };

    Some(FlowLayout {
        direction,
        // Space-between distributes the free space itself
        gap: if distribution == Distribution::SpaceBetween {
            0.0
        } else {
            auto.item_spacing.max(0.0)
        },
        padding: Padding {
            top: auto.padding_top.max(0.0),
            right: auto.padding_right.max(0.0),
            bottom: auto.padding_bottom.max(0.0),
            left: auto.padding_left.max(0.0),
        },
        distribution,
        alignment,
        wrap: auto.layout_wrap == SceneLayoutWrap::Wrap,
    })
}
