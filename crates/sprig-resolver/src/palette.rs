//! Named color palettes and nearest-color matching.
//!
//! Matching uses the CIE76 delta E distance in LAB space. A color is
//! reported under a palette name only when its distance to the nearest entry
//! is within the tolerance; otherwise callers fall back to the raw value.

use serde::{Deserialize, Serialize};
use sprig_core::{Color, Framework, PaletteMatch, Result, SprigError};

/// One entry of a named color system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColor {
    /// Lowercase `#rrggbb`
    pub hex: String,
    /// Canonical name in the target syntax
    pub name: String,
    pub meta: Option<String>,
}

/// Known color systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteKind {
    /// Tailwind CSS v3 default colors (`blue-500`)
    Tailwind,
    /// Flutter Material primaries (`Colors.blue`)
    Material,
    /// SwiftUI system colors (`Color.blue`)
    SwiftUI,
}

impl PaletteKind {
    pub const ALL: [PaletteKind; 3] = [Self::Tailwind, Self::Material, Self::SwiftUI];

    /// Palette whose names the given target emits.
    pub fn for_framework(framework: Framework) -> Self {
        match framework {
            Framework::Html | Framework::Tailwind => Self::Tailwind,
            Framework::Flutter => Self::Material,
            Framework::SwiftUI => Self::SwiftUI,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Tailwind => "Tailwind",
            Self::Material => "Material",
            Self::SwiftUI => "SwiftUI",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }

    fn entries(&self) -> Vec<PaletteColor> {
        match self {
            Self::Tailwind => tailwind_entries(),
            Self::Material => MATERIAL
                .iter()
                .map(|(name, hex)| entry(hex, &format!("Colors.{}", name), material_meta(name)))
                .collect(),
            Self::SwiftUI => SWIFTUI
                .iter()
                .map(|(name, hex)| entry(hex, &format!("Color.{}", name), None))
                .collect(),
        }
    }
}

/// Every entry of a named color system, in source order.
pub fn retrieve_palette(name: &str) -> Result<Vec<PaletteColor>> {
    PaletteKind::from_name(name)
        .map(|kind| kind.entries())
        .ok_or_else(|| SprigError::UnknownPalette {
            name: name.to_string(),
        })
}

/// A palette prepared for matching.
#[derive(Debug, Clone)]
pub struct Palette {
    kind: PaletteKind,
    entries: Vec<(PaletteColor, Color)>,
}

impl Palette {
    pub fn new(kind: PaletteKind) -> Self {
        let entries = kind
            .entries()
            .into_iter()
            .filter_map(|e| Color::from_hex(&e.hex).map(|c| (e, c)))
            .collect();
        Self { kind, entries }
    }

    pub fn for_framework(framework: Framework) -> Self {
        Self::new(PaletteKind::for_framework(framework))
    }

    pub fn kind(&self) -> PaletteKind {
        self.kind
    }

    pub fn entries(&self) -> impl Iterator<Item = &PaletteColor> {
        self.entries.iter().map(|(e, _)| e)
    }

    /// Nearest entry within `tolerance` (delta E). Alpha is ignored. On a tie
    /// the entry listed first wins.
    pub fn nearest(&self, color: &Color, tolerance: f64) -> Option<PaletteMatch> {
        let (r, g, b, _) = color.to_rgba8();
        let opaque = Color::from_rgb8(r, g, b);

        let mut best: Option<(&PaletteColor, &Color, f32)> = None;
        for (entry, candidate) in &self.entries {
            let distance = opaque.delta_e(candidate);
            if best.map_or(true, |(_, _, d)| distance < d) {
                best = Some((entry, candidate, distance));
            }
        }

        let (entry, candidate, distance) = best?;
        if f64::from(distance) > tolerance {
            return None;
        }
        let (cr, cg, cb, _) = candidate.to_rgba8();
        Some(PaletteMatch {
            name: entry.name.clone(),
            exact: (r, g, b) == (cr, cg, cb),
        })
    }
}

fn entry(hex: &str, name: &str, meta: Option<String>) -> PaletteColor {
    PaletteColor {
        hex: hex.to_ascii_lowercase(),
        name: name.to_string(),
        meta,
    }
}

fn material_meta(name: &str) -> Option<String> {
    match name {
        "black" | "white" => None,
        _ => Some("Material 500".to_string()),
    }
}

const TAILWIND_SHADES: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

fn tailwind_entries() -> Vec<PaletteColor> {
    let mut entries = vec![entry("#000000", "black", None), entry("#ffffff", "white", None)];
    for (family, hexes) in TAILWIND {
        for (shade, hex) in TAILWIND_SHADES.iter().zip(hexes.iter()) {
            entries.push(entry(hex, &format!("{}-{}", family, shade), None));
        }
    }
    entries
}

#[rustfmt::skip]
const TAILWIND: &[(&str, [&str; 11])] = &[
    ("slate",   ["#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1", "#94a3b8", "#64748b", "#475569", "#334155", "#1e293b", "#0f172a", "#020617"]),
    ("gray",    ["#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db", "#9ca3af", "#6b7280", "#4b5563", "#374151", "#1f2937", "#111827", "#030712"]),
    ("zinc",    ["#fafafa", "#f4f4f5", "#e4e4e7", "#d4d4d8", "#a1a1aa", "#71717a", "#52525b", "#3f3f46", "#27272a", "#18181b", "#09090b"]),
    ("neutral", ["#fafafa", "#f5f5f5", "#e5e5e5", "#d4d4d4", "#a3a3a3", "#737373", "#525252", "#404040", "#262626", "#171717", "#0a0a0a"]),
    ("stone",   ["#fafaf9", "#f5f5f4", "#e7e5e4", "#d6d3d1", "#a8a29e", "#78716c", "#57534e", "#44403c", "#292524", "#1c1917", "#0c0a09"]),
    ("red",     ["#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444", "#dc2626", "#b91c1c", "#991b1b", "#7f1d1d", "#450a0a"]),
    ("orange",  ["#fff7ed", "#ffedd5", "#fed7aa", "#fdba74", "#fb923c", "#f97316", "#ea580c", "#c2410c", "#9a3412", "#7c2d12", "#431407"]),
    ("amber",   ["#fffbeb", "#fef3c7", "#fde68a", "#fcd34d", "#fbbf24", "#f59e0b", "#d97706", "#b45309", "#92400e", "#78350f", "#451a03"]),
    ("yellow",  ["#fefce8", "#fef9c3", "#fef08a", "#fde047", "#facc15", "#eab308", "#ca8a04", "#a16207", "#854d0e", "#713f12", "#422006"]),
    ("lime",    ["#f7fee7", "#ecfccb", "#d9f99d", "#bef264", "#a3e635", "#84cc16", "#65a30d", "#4d7c0f", "#3f6212", "#365314", "#1a2e05"]),
    ("green",   ["#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a", "#15803d", "#166534", "#14532d", "#052e16"]),
    ("emerald", ["#ecfdf5", "#d1fae5", "#a7f3d0", "#6ee7b7", "#34d399", "#10b981", "#059669", "#047857", "#065f46", "#064e3b", "#022c22"]),
    ("teal",    ["#f0fdfa", "#ccfbf1", "#99f6e4", "#5eead4", "#2dd4bf", "#14b8a6", "#0d9488", "#0f766e", "#115e59", "#134e4a", "#042f2e"]),
    ("cyan",    ["#ecfeff", "#cffafe", "#a5f3fc", "#67e8f9", "#22d3ee", "#06b6d4", "#0891b2", "#0e7490", "#155e75", "#164e63", "#083344"]),
    ("sky",     ["#f0f9ff", "#e0f2fe", "#bae6fd", "#7dd3fc", "#38bdf8", "#0ea5e9", "#0284c7", "#0369a1", "#075985", "#0c4a6e", "#082f49"]),
    ("blue",    ["#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb", "#1d4ed8", "#1e40af", "#1e3a8a", "#172554"]),
    ("indigo",  ["#eef2ff", "#e0e7ff", "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1", "#4f46e5", "#4338ca", "#3730a3", "#312e81", "#1e1b4b"]),
    ("violet",  ["#f5f3ff", "#ede9fe", "#ddd6fe", "#c4b5fd", "#a78bfa", "#8b5cf6", "#7c3aed", "#6d28d9", "#5b21b6", "#4c1d95", "#2e1065"]),
    ("purple",  ["#faf5ff", "#f3e8ff", "#e9d5ff", "#d8b4fe", "#c084fc", "#a855f7", "#9333ea", "#7e22ce", "#6b21a8", "#581c87", "#3b0764"]),
    ("fuchsia", ["#fdf4ff", "#fae8ff", "#f5d0fe", "#f0abfc", "#e879f9", "#d946ef", "#c026d3", "#a21caf", "#86198f", "#701a75", "#4a044e"]),
    ("pink",    ["#fdf2f8", "#fce7f3", "#fbcfe8", "#f9a8d4", "#f472b6", "#ec4899", "#db2777", "#be185d", "#9d174d", "#831843", "#500724"]),
    ("rose",    ["#fff1f2", "#ffe4e6", "#fecdd3", "#fda4af", "#fb7185", "#f43f5e", "#e11d48", "#be123c", "#9f1239", "#881337", "#4c0519"]),
];

const MATERIAL: &[(&str, &str)] = &[
    ("red", "#F44336"),
    ("pink", "#E91E63"),
    ("purple", "#9C27B0"),
    ("deepPurple", "#673AB7"),
    ("indigo", "#3F51B5"),
    ("blue", "#2196F3"),
    ("lightBlue", "#03A9F4"),
    ("cyan", "#00BCD4"),
    ("teal", "#009688"),
    ("green", "#4CAF50"),
    ("lightGreen", "#8BC34A"),
    ("lime", "#CDDC39"),
    ("yellow", "#FFEB3B"),
    ("amber", "#FFC107"),
    ("orange", "#FF9800"),
    ("deepOrange", "#FF5722"),
    ("brown", "#795548"),
    ("grey", "#9E9E9E"),
    ("blueGrey", "#607D8B"),
    ("black", "#000000"),
    ("white", "#FFFFFF"),
];

const SWIFTUI: &[(&str, &str)] = &[
    ("red", "#FF3B30"),
    ("orange", "#FF9500"),
    ("yellow", "#FFCC00"),
    ("green", "#34C759"),
    ("mint", "#00C7BE"),
    ("teal", "#30B0C7"),
    ("cyan", "#32ADE6"),
    ("blue", "#007AFF"),
    ("indigo", "#5856D6"),
    ("purple", "#AF52DE"),
    ("pink", "#FF2D55"),
    ("brown", "#A2845E"),
    ("gray", "#8E8E93"),
    ("black", "#000000"),
    ("white", "#FFFFFF"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sprig_core::DEFAULT_COLOR_TOLERANCE;

    #[test]
    fn test_retrieve_palette_in_source_order() {
        let tailwind = retrieve_palette("Tailwind").unwrap();
        assert_eq!(tailwind.len(), 2 + 22 * 11);
        assert_eq!(tailwind[0].name, "black");
        assert_eq!(tailwind[2].name, "slate-50");
        assert_eq!(tailwind.last().unwrap().name, "rose-950");

        let material = retrieve_palette("material").unwrap();
        assert_eq!(material[0].hex, "#f44336");
        assert_eq!(material[0].name, "Colors.red");
        assert_eq!(material[0].meta.as_deref(), Some("Material 500"));
    }

    #[test]
    fn test_unknown_palette_is_an_error() {
        assert!(matches!(
            retrieve_palette("Bootstrap"),
            Err(SprigError::UnknownPalette { .. })
        ));
    }

    #[test]
    fn test_exact_match_reports_palette_name() {
        let palette = Palette::new(PaletteKind::Tailwind);
        let blue = Color::from_hex("#3b82f6").unwrap();
        let m = palette.nearest(&blue, DEFAULT_COLOR_TOLERANCE).unwrap();
        assert_eq!(m.name, "blue-500");
        assert!(m.exact);
    }

    #[test]
    fn test_near_match_within_tolerance() {
        let palette = Palette::new(PaletteKind::Tailwind);
        let almost_blue = Color::from_hex("#3b82f7").unwrap();
        let m = palette.nearest(&almost_blue, DEFAULT_COLOR_TOLERANCE).unwrap();
        assert_eq!(m.name, "blue-500");
        assert!(!m.exact);
    }

    #[test]
    fn test_outside_tolerance_has_no_name() {
        let palette = Palette::new(PaletteKind::SwiftUI);
        let odd = Color::from_hex("#7a3b10").unwrap();
        assert!(palette.nearest(&odd, DEFAULT_COLOR_TOLERANCE).is_none());
    }

    #[test]
    fn test_tie_prefers_first_entry() {
        // zinc-50 and neutral-50 share #fafafa
        let palette = Palette::new(PaletteKind::Tailwind);
        let m = palette.nearest(&Color::from_hex("#fafafa").unwrap(), 0.0).unwrap();
        assert_eq!(m.name, "zinc-50");
    }

    proptest! {
        #[test]
        fn prop_named_match_is_within_tolerance(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let palette = Palette::new(PaletteKind::Tailwind);
            let color = Color::from_rgb8(r, g, b);
            if let Some(m) = palette.nearest(&color, DEFAULT_COLOR_TOLERANCE) {
                let named = palette
                    .entries()
                    .find(|e| e.name == m.name)
                    .and_then(|e| Color::from_hex(&e.hex))
                    .unwrap();
                prop_assert!(f64::from(color.delta_e(&named)) <= DEFAULT_COLOR_TOLERANCE);
                prop_assert_eq!(m.exact, color.to_hex() == named.to_hex());
            }
        }

        #[test]
        fn prop_palette_colors_match_themselves(index in 0usize..244) {
            let palette = Palette::new(PaletteKind::Tailwind);
            let entry = palette.entries().nth(index).unwrap().clone();
            let color = Color::from_hex(&entry.hex).unwrap();
            let m = palette.nearest(&color, DEFAULT_COLOR_TOLERANCE).unwrap();
            prop_assert!(m.exact);
            prop_assert_eq!(Color::from_hex(&palette.entries().find(|e| e.name == m.name).unwrap().hex).unwrap().to_hex(), entry.hex);
        }
    }
}
