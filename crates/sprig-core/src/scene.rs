//! Native scene nodes as supplied by the host design tool.
//!
//! The shapes here follow the design tool's JSON vocabulary
//! (`"type": "FRAME"`, `"layoutMode": "HORIZONTAL"`, ...). Every field except
//! `id` has a default so a partially populated node still deserializes;
//! enumerated strings that are not recognized land in an `Unknown` variant
//! instead of failing the whole selection.
//!
//! Coordinates are relative to the parent node.

use crate::color::Color;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_one() -> f64 {
    1.0
}

/// A node of the host's scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneNode {
    pub id: String,
    pub name: String,
    /// Native node type (`FRAME`, `TEXT`, `RECTANGLE`, ...).
    #[serde(rename = "type")]
    pub node_type: String,
    pub visible: bool,

    // Geometry
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, counter-clockwise.
    pub rotation: f64,

    // Appearance
    pub opacity: f64,
    pub blend_mode: SceneBlendMode,
    pub fills: Vec<ScenePaint>,
    pub strokes: Vec<ScenePaint>,
    pub stroke_weight: f64,
    pub stroke_align: SceneStrokeAlign,
    pub effects: Vec<SceneEffect>,
    pub corner_radius: Option<f64>,
    /// Per-corner radii: top-left, top-right, bottom-right, bottom-left.
    pub rectangle_corner_radii: Option<[f64; 4]>,
    pub clips_content: bool,

    // Auto-layout of this node's children
    #[serde(flatten)]
    pub auto_layout: SceneAutoLayout,
    /// Auto-layout the design tool inferred for a frame without one.
    pub inferred_auto_layout: Option<SceneAutoLayout>,

    // Participation in the parent's auto-layout
    pub layout_sizing_horizontal: Option<SceneSizing>,
    pub layout_sizing_vertical: Option<SceneSizing>,
    pub layout_positioning: ScenePositioning,
    pub layout_grow: f64,
    pub layout_align: SceneLayoutAlign,

    // Text
    pub characters: Option<String>,
    pub font_name: Option<FontName>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub line_height: Option<SceneLineHeight>,
    pub letter_spacing: Option<SceneLetterSpacing>,
    pub text_align_horizontal: SceneTextAlign,
    pub text_align_vertical: SceneTextAlignVertical,
    pub text_case: SceneTextCase,
    pub text_decoration: SceneTextDecoration,
    pub text_auto_resize: SceneTextAutoResize,

    pub children: Vec<SceneNode>,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            node_type: String::new(),
            visible: true,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            opacity: 1.0,
            blend_mode: SceneBlendMode::default(),
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke_weight: 0.0,
            stroke_align: SceneStrokeAlign::default(),
            effects: Vec::new(),
            corner_radius: None,
            rectangle_corner_radii: None,
            clips_content: false,
            auto_layout: SceneAutoLayout::default(),
            inferred_auto_layout: None,
            layout_sizing_horizontal: None,
            layout_sizing_vertical: None,
            layout_positioning: ScenePositioning::default(),
            layout_grow: 0.0,
            layout_align: SceneLayoutAlign::default(),
            characters: None,
            font_name: None,
            font_size: None,
            font_weight: None,
            line_height: None,
            letter_spacing: None,
            text_align_horizontal: SceneTextAlign::default(),
            text_align_vertical: SceneTextAlignVertical::default(),
            text_case: SceneTextCase::default(),
            text_decoration: SceneTextDecoration::default(),
            text_auto_resize: SceneTextAutoResize::default(),
            children: Vec::new(),
        }
    }
}

impl SceneNode {
    /// Create a node of the given native type.
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            ..Default::default()
        }
    }

    /// Set the layer name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set position and size.
    pub fn with_bounds(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }

    /// Append a fill paint (painted above existing fills).
    pub fn with_fill(mut self, paint: ScenePaint) -> Self {
        self.fills.push(paint);
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set text content.
    pub fn with_characters(mut self, characters: impl Into<String>) -> Self {
        self.characters = Some(characters.into());
        self
    }

    /// Whether the node has any visible paint, stroke, or effect.
    pub fn has_visual_style(&self) -> bool {
        self.fills.iter().any(|p| p.visible)
            || (self.stroke_weight > 0.0 && self.strokes.iter().any(|p| p.visible))
            || self.effects.iter().any(|e| e.visible)
    }
}

/// Auto-layout properties a frame applies to its children.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneAutoLayout {
    pub layout_mode: SceneLayoutMode,
    pub layout_wrap: SceneLayoutWrap,
    pub padding_left: f64,
    pub padding_right: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub item_spacing: f64,
    pub primary_axis_align_items: ScenePrimaryAlign,
    pub counter_axis_align_items: SceneCounterAlign,
}

/// Font family and style name (e.g. `"Inter"`, `"Semi Bold Italic"`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

/// A fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScenePaint {
    #[serde(rename = "type")]
    pub paint_type: ScenePaintType,
    pub visible: bool,
    pub opacity: f64,
    pub blend_mode: SceneBlendMode,
    pub color: Option<Color>,
    pub gradient_stops: Vec<SceneColorStop>,
    /// Start, end, and width handles in the node's unit square.
    pub gradient_handle_positions: Vec<ScenePoint>,
    pub image_hash: Option<String>,
    pub scale_mode: SceneScaleMode,
}

impl Default for ScenePaint {
    fn default() -> Self {
        Self {
            paint_type: ScenePaintType::Solid,
            visible: default_true(),
            opacity: default_one(),
            blend_mode: SceneBlendMode::default(),
            color: None,
            gradient_stops: Vec::new(),
            gradient_handle_positions: Vec::new(),
            image_hash: None,
            scale_mode: SceneScaleMode::default(),
        }
    }
}

impl ScenePaint {
    /// A solid paint.
    pub fn solid(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    /// A linear gradient from `start` to `end` (unit square coordinates).
    pub fn linear_gradient(start: ScenePoint, end: ScenePoint, stops: Vec<SceneColorStop>) -> Self {
        Self {
            paint_type: ScenePaintType::GradientLinear,
            gradient_stops: stops,
            gradient_handle_positions: vec![start, end],
            ..Default::default()
        }
    }

    /// An image paint.
    pub fn image(hash: impl Into<String>) -> Self {
        Self {
            paint_type: ScenePaintType::Image,
            image_hash: Some(hash.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenePoint {
    pub x: f64,
    pub y: f64,
}

impl ScenePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneColorStop {
    pub position: f64,
    pub color: Color,
}

/// A shadow or blur effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneEffect {
    #[serde(rename = "type")]
    pub effect_type: SceneEffectType,
    pub visible: bool,
    pub radius: f64,
    pub color: Option<Color>,
    pub offset: ScenePoint,
    pub spread: f64,
}

impl Default for SceneEffect {
    fn default() -> Self {
        Self {
            effect_type: SceneEffectType::DropShadow,
            visible: default_true(),
            radius: 0.0,
            color: None,
            offset: ScenePoint::default(),
            spread: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLineHeight {
    pub unit: SceneLineHeightUnit,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLetterSpacing {
    pub unit: SceneLetterSpacingUnit,
    #[serde(default)]
    pub value: f64,
}

macro_rules! scene_enum {
    ($(#[$meta:meta])* $name:ident { $default:ident $(, $variant:ident)* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            #[default]
            $default,
            $($variant,)*
            #[serde(other)]
            Unknown,
        }
    };
}

scene_enum!(
    /// Paint type tag.
    ScenePaintType { Solid, GradientLinear, GradientRadial, GradientAngular, GradientDiamond, Image, Video }
);
scene_enum!(
    /// Effect type tag.
    SceneEffectType { DropShadow, InnerShadow, LayerBlur, BackgroundBlur, Noise, Texture }
);
scene_enum!(
    SceneBlendMode {
        Normal, PassThrough, Darken, Multiply, ColorBurn, Lighten, Screen, ColorDodge,
        Overlay, SoftLight, HardLight, Difference, Exclusion, Hue, Saturation, Color, Luminosity,
    }
);
scene_enum!(SceneScaleMode { Fill, Fit, Crop, Tile });
scene_enum!(SceneStrokeAlign { Inside, Outside, Center });
scene_enum!(SceneLayoutMode { None, Horizontal, Vertical });
scene_enum!(SceneLayoutWrap { NoWrap, Wrap });
scene_enum!(ScenePrimaryAlign { Min, Center, Max, SpaceBetween });
scene_enum!(SceneCounterAlign { Min, Center, Max, Baseline });
scene_enum!(SceneSizing { Fixed, Hug, Fill });
scene_enum!(ScenePositioning { Auto, Absolute });
scene_enum!(SceneLayoutAlign { Inherit, Stretch, Min, Center, Max });
scene_enum!(SceneLineHeightUnit { Auto, Pixels, Percent });
scene_enum!(SceneLetterSpacingUnit { Pixels, Percent });
scene_enum!(SceneTextAlign { Left, Center, Right, Justified });
scene_enum!(SceneTextAlignVertical { Top, Center, Bottom });
scene_enum!(SceneTextCase { Original, Upper, Lower, Title });
scene_enum!(SceneTextDecoration { None, Underline, Strikethrough });
scene_enum!(SceneTextAutoResize { None, WidthAndHeight, Height, Truncate });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_frame_with_auto_layout() {
        let json = r#"{
            "id": "1:2",
            "name": "Card",
            "type": "FRAME",
            "width": 200,
            "height": 100,
            "layoutMode": "VERTICAL",
            "itemSpacing": 8,
            "paddingTop": 16,
            "primaryAxisAlignItems": "SPACE_BETWEEN",
            "fills": [{"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1}}],
            "children": [{"id": "1:3", "type": "TEXT", "characters": "Hi"}]
        }"#;
        let node: SceneNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.node_type, "FRAME");
        assert!(node.visible);
        assert_eq!(node.opacity, 1.0);
        assert_eq!(node.auto_layout.layout_mode, SceneLayoutMode::Vertical);
        assert_eq!(node.auto_layout.item_spacing, 8.0);
        assert_eq!(node.auto_layout.primary_axis_align_items, ScenePrimaryAlign::SpaceBetween);
        assert_eq!(node.fills[0].color, Some(Color::WHITE));
        assert!(node.fills[0].visible);
        assert_eq!(node.children[0].characters.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_unknown_enum_values_do_not_fail() {
        let json = r#"{
            "id": "9",
            "type": "WIDGET",
            "layoutMode": "GRID",
            "fills": [{"type": "PATTERN"}],
            "effects": [{"type": "GLASS", "radius": 3}],
            "someFutureField": {"nested": true}
        }"#;
        let node: SceneNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.auto_layout.layout_mode, SceneLayoutMode::Unknown);
        assert_eq!(node.fills[0].paint_type, ScenePaintType::Unknown);
        assert_eq!(node.effects[0].effect_type, SceneEffectType::Unknown);
    }

    #[test]
    fn test_has_visual_style() {
        let plain = SceneNode::new("1", "GROUP");
        assert!(!plain.has_visual_style());

        let filled = SceneNode::new("2", "GROUP").with_fill(ScenePaint::solid(Color::BLACK));
        assert!(filled.has_visual_style());

        let mut hidden = ScenePaint::solid(Color::BLACK);
        hidden.visible = false;
        let hidden_fill = SceneNode::new("3", "GROUP").with_fill(hidden);
        assert!(!hidden_fill.has_visual_style());
    }
}
