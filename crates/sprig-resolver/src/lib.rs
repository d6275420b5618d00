//! Style resolution and IR building for sprig.
//!
//! This crate turns the host's native scene nodes into the IR forest:
//! - Paints, effects, and typography resolved into style descriptors
//! - Colors matched against named palettes (Tailwind, Material, SwiftUI)
//! - Layer names sanitized into unique identifiers
//! - Invisible nodes skipped and pass-through groups flattened

mod builder;
mod naming;
mod palette;
mod style;

pub use builder::{build_forest, kind_of, IrBuilder};
pub use naming::NameRegistry;
pub use palette::{retrieve_palette, Palette, PaletteColor, PaletteKind};
pub use style::StyleResolver;
