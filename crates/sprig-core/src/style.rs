//! Style descriptors.
//!
//! Paints, effects, and typography normalized away from the host's native
//! representation. Paint layers are ordered bottom to top, so the topmost
//! source layer is the last element.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A color together with its palette match, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRef {
    pub color: Color,
    pub palette: Option<PaletteMatch>,
}

impl ColorRef {
    /// A color with no palette match.
    pub fn raw(color: Color) -> Self {
        Self {
            color,
            palette: None,
        }
    }
}

/// The palette entry a color was matched to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteMatch {
    /// Canonical palette name (e.g. `blue-500`, `Colors.red`, `.blue`)
    pub name: String,
    /// Whether the color is identical to the entry after 8-bit rounding
    pub exact: bool,
}

/// Color stop of a gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient line (0.0 to 1.0)
    pub position: f64,
    pub color: ColorRef,
}

/// Blend mode of a paint layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    /// CSS `mix-blend-mode` keyword.
    pub fn css_name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::HardLight => "hard-light",
            Self::SoftLight => "soft-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Color => "color",
            Self::Luminosity => "luminosity",
        }
    }
}

/// How an image fills its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    #[default]
    Fill,
    Fit,
    Crop,
    Tile,
}

/// Content of a paint layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PaintKind {
    Solid { color: ColorRef },
    LinearGradient {
        /// CSS angle in degrees (0 points up, 90 points right)
        angle: f64,
        stops: Vec<GradientStop>,
    },
    Image {
        image_ref: String,
        scale_mode: ScaleMode,
    },
}

/// A fill or stroke layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub kind: PaintKind,
    /// Layer opacity, already folded into solid and stop colors
    pub opacity: f64,
    pub blend_mode: BlendMode,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Self {
            kind: PaintKind::Solid {
                color: ColorRef::raw(color),
            },
            opacity: 1.0,
            blend_mode: BlendMode::Normal,
        }
    }

    /// The color of a solid paint.
    pub fn solid_color(&self) -> Option<&ColorRef> {
        match &self.kind {
            PaintKind::Solid { color } => Some(color),
            _ => None,
        }
    }
}

/// Where a stroke sits relative to the node's edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeAlign {
    #[default]
    Inside,
    Center,
    Outside,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub weight: f64,
    pub align: StrokeAlign,
}

/// Corner rounding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerRadius {
    #[default]
    None,
    Uniform(f64),
    /// Top-left, top-right, bottom-right, bottom-left
    PerCorner([f64; 4]),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: ColorRef,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub spread: f64,
}

/// Visual effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Effect {
    DropShadow(Shadow),
    InnerShadow(Shadow),
    LayerBlur { radius: f64 },
    BackgroundBlur { radius: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignVertical {
    #[default]
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextCase {
    #[default]
    Original,
    Upper,
    Lower,
    Title,
}

impl TextCase {
    /// Apply the case transform to text content.
    pub fn apply(&self, text: &str) -> String {
        match self {
            Self::Original => text.to_string(),
            Self::Upper => text.to_uppercase(),
            Self::Lower => text.to_lowercase(),
            Self::Title => text
                .split(' ')
                .map(|word| {
                    let mut chars = word.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().chain(chars).collect(),
                        None => String::new(),
                    }
                })
                .collect::<Vec<String>>()
                .join(" "),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    Strikethrough,
}

/// Typography of a text node.
///
/// Two text nodes share a text style exactly when their typography values
/// are equal. Color is not part of typography; text color comes from the
/// node's fills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    pub family: String,
    /// Numeric weight (100 to 900)
    pub weight: u16,
    pub italic: bool,
    /// Font size in pixels
    pub size: f64,
    /// Line height in pixels, `None` for the font's natural line height
    pub line_height: Option<f64>,
    /// Letter spacing in pixels
    pub letter_spacing: f64,
    pub align_horizontal: TextAlign,
    pub align_vertical: TextAlignVertical,
    pub text_case: TextCase,
    pub decoration: TextDecoration,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            family: "Inter".to_string(),
            weight: 400,
            italic: false,
            size: 12.0,
            line_height: None,
            letter_spacing: 0.0,
            align_horizontal: TextAlign::Left,
            align_vertical: TextAlignVertical::Top,
            text_case: TextCase::Original,
            decoration: TextDecoration::None,
        }
    }
}

/// Text content and its typography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub characters: String,
    pub typography: Typography,
}

/// Resolved style of an IR node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    /// Fill layers, bottom to top
    pub fills: SmallVec<[Paint; 1]>,
    /// Stroke layers, bottom to top
    pub strokes: SmallVec<[Paint; 1]>,
    pub stroke: Option<Stroke>,
    pub effects: Vec<Effect>,
    pub corner_radius: CornerRadius,
    /// Layer opacity (0.0 to 1.0)
    pub opacity: f64,
    pub clips_content: bool,
    pub text: Option<TextStyle>,
}

impl Default for StyleDescriptor {
    fn default() -> Self {
        Self {
            fills: SmallVec::new(),
            strokes: SmallVec::new(),
            stroke: None,
            effects: Vec::new(),
            corner_radius: CornerRadius::None,
            opacity: 1.0,
            clips_content: false,
            text: None,
        }
    }
}

impl StyleDescriptor {
    /// The topmost solid fill color, used as text color.
    pub fn top_solid_fill(&self) -> Option<&ColorRef> {
        self.fills.iter().rev().find_map(Paint::solid_color)
    }

    /// The topmost solid stroke color.
    pub fn top_solid_stroke(&self) -> Option<&ColorRef> {
        self.strokes.iter().rev().find_map(Paint::solid_color)
    }

    pub fn typography(&self) -> Option<&Typography> {
        self.text.as_ref().map(|t| &t.typography)
    }
}
