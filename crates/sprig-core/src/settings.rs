//! Per-invocation settings.
//!
//! Keys follow the host plugin's stored settings schema (camelCase). Stored
//! settings are merged over the defaults leniently: unknown keys and values
//! of the wrong JSON type are ignored instead of rejected.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Default perceptual distance (delta E) under which a color is reported by
/// its palette name. Roughly the smallest difference the eye notices.
pub const DEFAULT_COLOR_TOLERANCE: f64 = 2.3;

/// Tolerance used when `roundTailwindColors` is enabled.
pub const SNAPPED_COLOR_TOLERANCE: f64 = 10.0;

/// Target syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Framework {
    #[default]
    #[serde(rename = "HTML")]
    Html,
    Tailwind,
    Flutter,
    #[serde(rename = "SwiftUI")]
    SwiftUI,
}

impl Framework {
    pub const ALL: [Framework; 4] = [
        Framework::Html,
        Framework::Tailwind,
        Framework::Flutter,
        Framework::SwiftUI,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Tailwind => "Tailwind",
            Self::Flutter => "Flutter",
            Self::SwiftUI => "SwiftUI",
        }
    }

    /// Parse a framework name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output scope of the widget emitters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GenerationMode {
    /// Only the widget subtree
    #[default]
    Snippet,
    /// The subtree wrapped in a minimal runnable scaffold
    Full,
}

/// Settings supplied with every invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub framework: Framework,
    /// JSX attribute naming (`className`, `style={{...}}`)
    pub jsx: bool,
    /// Use the host's inferred auto-layout for frames without one
    pub optimize_layout: bool,
    pub show_layer_names: bool,
    /// Inline styles instead of a class stylesheet
    pub inline_style: bool,
    /// Root width fills its container
    pub responsive_root: bool,
    pub flutter_generation_mode: GenerationMode,
    #[serde(rename = "swiftUIGenerationMode")]
    pub swiftui_generation_mode: GenerationMode,
    /// Snap spacing and sizing to the Tailwind scale
    pub round_tailwind_values: bool,
    /// Snap colors to the nearest Tailwind color
    pub round_tailwind_colors: bool,
    /// Palette match tolerance (delta E)
    pub color_tolerance: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            framework: Framework::Html,
            jsx: false,
            optimize_layout: true,
            show_layer_names: false,
            inline_style: true,
            responsive_root: false,
            flutter_generation_mode: GenerationMode::Snippet,
            swiftui_generation_mode: GenerationMode::Snippet,
            round_tailwind_values: false,
            round_tailwind_colors: false,
            color_tolerance: DEFAULT_COLOR_TOLERANCE,
        }
    }
}

impl Settings {
    /// Defaults with the given framework selected.
    pub fn for_framework(framework: Framework) -> Self {
        Self {
            framework,
            ..Default::default()
        }
    }

    /// Merge a stored settings object over the defaults.
    ///
    /// A stored key is taken only when it is a known key whose JSON type
    /// matches the default's and whose value decodes. Anything that is not an
    /// object yields the defaults.
    pub fn from_json_lenient(stored: &Value) -> Self {
        let defaults = Self::default();
        let (Some(stored), Ok(Value::Object(mut merged))) =
            (stored.as_object(), serde_json::to_value(&defaults))
        else {
            return defaults;
        };

        let keys: Vec<String> = merged.keys().cloned().collect();
        for key in keys {
            let Some(value) = stored.get(&key) else {
                continue;
            };
            let Some(default_value) = merged.get(&key) else {
                continue;
            };
            if !same_json_type(default_value, value) {
                tracing::debug!(key = %key, "ignoring stored setting of the wrong type");
                continue;
            }
            let previous = merged.insert(key.clone(), value.clone());
            if Self::decode(&merged).is_none() {
                tracing::debug!(key = %key, "ignoring stored setting with an unknown value");
                if let Some(previous) = previous {
                    merged.insert(key, previous);
                }
            }
        }

        Self::decode(&merged).unwrap_or(defaults)
    }

    fn decode(map: &Map<String, Value>) -> Option<Self> {
        serde_json::from_value(Value::Object(map.clone())).ok()
    }

    /// Palette match tolerance in effect.
    pub fn effective_color_tolerance(&self) -> f64 {
        if self.round_tailwind_colors {
            self.color_tolerance.max(SNAPPED_COLOR_TOLERANCE)
        } else {
            self.color_tolerance
        }
    }
}

fn same_json_type(a: &Value, b: &Value) -> bool {
    matches!(
        (a, b),
        (Value::Null, Value::Null)
            | (Value::Bool(_), Value::Bool(_))
            | (Value::Number(_), Value::Number(_))
            | (Value::String(_), Value::String(_))
            | (Value::Array(_), Value::Array(_))
            | (Value::Object(_), Value::Object(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.framework, Framework::Html);
        assert!(s.inline_style);
        assert!(s.optimize_layout);
        assert!(!s.jsx);
        assert_eq!(s.swiftui_generation_mode, GenerationMode::Snippet);
        assert_eq!(s.color_tolerance, DEFAULT_COLOR_TOLERANCE);
    }

    #[test]
    fn test_lenient_merge_ignores_unknown_and_mistyped() {
        let stored = json!({
            "framework": "Tailwind",
            "jsx": "yes",
            "roundTailwindValues": true,
            "swiftUIGenerationMode": "full",
            "someRemovedSetting": 42
        });
        let s = Settings::from_json_lenient(&stored);
        assert_eq!(s.framework, Framework::Tailwind);
        assert!(!s.jsx);
        assert!(s.round_tailwind_values);
        assert_eq!(s.swiftui_generation_mode, GenerationMode::Full);
    }

    #[test]
    fn test_lenient_merge_rejects_unknown_enum_value() {
        let s = Settings::from_json_lenient(&json!({"framework": "Elm", "jsx": true}));
        assert_eq!(s.framework, Framework::Html);
        assert!(s.jsx);
    }

    #[test]
    fn test_lenient_merge_non_object() {
        assert_eq!(Settings::from_json_lenient(&json!([1, 2])), Settings::default());
    }

    #[test]
    fn test_framework_round_trip_names() {
        assert_eq!(serde_json::to_value(Framework::SwiftUI).unwrap(), json!("SwiftUI"));
        assert_eq!(Framework::from_name("tailwind"), Some(Framework::Tailwind));
        assert_eq!(Framework::from_name("react"), None);
    }

    #[test]
    fn test_effective_tolerance() {
        let mut s = Settings::default();
        assert_eq!(s.effective_color_tolerance(), DEFAULT_COLOR_TOLERANCE);
        s.round_tailwind_colors = true;
        assert_eq!(s.effective_color_tolerance(), SNAPPED_COLOR_TOLERANCE);
    }
}
