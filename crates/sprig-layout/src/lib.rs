//! Layout resolution for sprig IR nodes.
//!
//! Classifies each node as a flow (auto-layout) or absolute container,
//! resolves its per-axis sizing, and decides how its parent places it.
//!
//! # Example
//!
//! ```ignore
//! use sprig_layout::{LayoutResolver, ParentLayout};
//!
//! let resolver = LayoutResolver::new(&settings);
//! let layout = resolver.resolve(&scene_node, kind, &geometry, ParentLayout::Root);
//! ```

mod auto_layout;
mod resolver;

pub use auto_layout::{flow_from_native, native_auto_layout};
pub use resolver::{LayoutResolver, ParentLayout};
