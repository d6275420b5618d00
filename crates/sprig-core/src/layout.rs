//! Layout descriptors.
//!
//! Every IR node carries exactly one [`LayoutDescriptor`]: how it arranges
//! its own children ([`LayoutMode`]), how it sizes itself on each axis
//! ([`Sizing`]), and how its parent places it ([`Placement`]).

use serde::{Deserialize, Serialize};

/// Direction of a flow layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Left to right
    #[default]
    Horizontal,
    /// Top to bottom
    Vertical,
}

/// Alignment of items on the counter axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
    /// Text baselines line up (horizontal flows only)
    Baseline,
}

/// Distribution of items on the primary axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distribution {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
}

/// Padding on all sides.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    /// Create uniform padding.
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create symmetric padding.
    pub fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }

    pub fn is_uniform(&self) -> bool {
        self.top == self.right && self.right == self.bottom && self.bottom == self.left
    }

    /// Left and right are equal, and top and bottom are equal.
    pub fn is_symmetric(&self) -> bool {
        self.left == self.right && self.top == self.bottom
    }
}

/// Flow (auto-layout) configuration for a container's children.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowLayout {
    pub direction: Direction,
    /// Gap between items
    pub gap: f64,
    pub padding: Padding,
    /// Primary axis
    pub distribution: Distribution,
    /// Counter axis
    pub alignment: Alignment,
    pub wrap: bool,
}

impl FlowLayout {
    /// Create a horizontal flow.
    pub fn horizontal() -> Self {
        Self {
            direction: Direction::Horizontal,
            ..Default::default()
        }
    }

    /// Create a vertical flow.
    pub fn vertical() -> Self {
        Self {
            direction: Direction::Vertical,
            ..Default::default()
        }
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }
}

/// How a node arranges its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum LayoutMode {
    Flow(FlowLayout),
    /// Children are positioned by offset from this node's top-left corner.
    Absolute,
}

impl Default for LayoutMode {
    fn default() -> Self {
        Self::Absolute
    }
}

/// Sizing behavior on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingMode {
    /// Measured size in pixels
    Fixed(f64),
    /// Shrink to fit the contents
    Hug,
    /// Grow to fill the parent container
    Fill,
}

impl SizingMode {
    pub fn is_fill(&self) -> bool {
        matches!(self, Self::Fill)
    }

    /// Pixel size when fixed.
    pub fn fixed(&self) -> Option<f64> {
        match self {
            Self::Fixed(v) => Some(*v),
            _ => None,
        }
    }
}

/// Sizing per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sizing {
    pub horizontal: SizingMode,
    pub vertical: SizingMode,
}

impl Sizing {
    pub fn fixed(width: f64, height: f64) -> Self {
        Self {
            horizontal: SizingMode::Fixed(width),
            vertical: SizingMode::Fixed(height),
        }
    }

    /// Sizing along the given flow direction's primary axis.
    pub fn primary(&self, direction: Direction) -> SizingMode {
        match direction {
            Direction::Horizontal => self.horizontal,
            Direction::Vertical => self.vertical,
        }
    }

    /// Sizing along the counter axis of the given flow direction.
    pub fn counter(&self, direction: Direction) -> SizingMode {
        match direction {
            Direction::Horizontal => self.vertical,
            Direction::Vertical => self.horizontal,
        }
    }
}

/// How the parent places this node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// A selection root
    Root,
    /// Placed by the parent's flow layout
    Flow,
    /// Offset from the parent IR node's top-left corner
    Absolute { left: f64, top: f64 },
}

/// Resolved layout of an IR node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDescriptor {
    pub mode: LayoutMode,
    pub sizing: Sizing,
    pub placement: Placement,
}

impl LayoutDescriptor {
    /// The flow configuration when this node is a flow container.
    pub fn flow(&self) -> Option<&FlowLayout> {
        match &self.mode {
            LayoutMode::Flow(flow) => Some(flow),
            LayoutMode::Absolute => None,
        }
    }

    pub fn is_absolute_child(&self) -> bool {
        matches!(self.placement, Placement::Absolute { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding() {
        let p = Padding::symmetric(16.0, 8.0);
        assert!(p.is_symmetric());
        assert!(!p.is_uniform());
        assert!(Padding::uniform(4.0).is_uniform());
        assert!(Padding::default().is_zero());
    }

    #[test]
    fn test_sizing_axes() {
        let sizing = Sizing {
            horizontal: SizingMode::Fill,
            vertical: SizingMode::Hug,
        };
        assert!(sizing.primary(Direction::Horizontal).is_fill());
        assert_eq!(sizing.counter(Direction::Horizontal), SizingMode::Hug);
        assert_eq!(sizing.primary(Direction::Vertical), SizingMode::Hug);
    }

    #[test]
    fn test_flow_builder() {
        let flow = FlowLayout::vertical()
            .with_gap(8.0)
            .with_distribution(Distribution::SpaceBetween);
        assert_eq!(flow.direction, Direction::Vertical);
        assert_eq!(flow.gap, 8.0);
        assert_eq!(flow.alignment, Alignment::Start);
    }
}
