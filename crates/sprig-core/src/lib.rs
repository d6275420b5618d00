//! Core types shared by every sprig crate.
//!
//! - Native scene input as delivered by the host design tool
//! - The framework-agnostic IR tree with its style and layout descriptors
//! - Canonical colors, settings, code artifacts, and diagnostics
//! - Error types

pub mod artifact;
pub mod color;
pub mod errors;
pub mod ir;
pub mod layout;
pub mod scene;
pub mod settings;
pub mod style;

pub use artifact::*;
pub use color::*;
pub use errors::*;
pub use ir::*;
pub use layout::*;
pub use scene::*;
pub use settings::*;
pub use style::*;
